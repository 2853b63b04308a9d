//! dom.rs - The injected parse/serialize seam over the external HTML parser.
//!
//! The pipeline never touches any global document state; everything goes
//! through the fragment tree produced here. Mutation helpers operate on
//! node IDs taken from a snapshot, so stages can rewrite the tree while
//! iterating without skipping or double-processing nodes.

use ego_tree::{NodeId, Tree};
use scraper::node::Text;
use scraper::{ElementRef, Html, Node, Selector};

/// Parses a markup fragment into a tree rooted at a synthetic container
/// element. Malformed input is recovered by the parser's own rules; the
/// caller must tolerate whatever tree comes back, including an empty one.
pub fn parse_fragment(html: &str) -> Html {
    Html::parse_fragment(html)
}

/// Serializes the fragment back to markup: the inner HTML of the synthetic
/// root. An empty tree serializes to the empty string.
pub fn serialize_fragment(doc: &Html) -> String {
    doc.tree
        .root()
        .children()
        .find_map(ElementRef::wrap)
        .map(|root| root.inner_html())
        .unwrap_or_default()
}

fn root_element_id(doc: &Html) -> Option<NodeId> {
    doc.tree
        .root()
        .children()
        .find(|child| child.value().is_element())
        .map(|root| root.id())
}

/// Snapshot of every element in the fragment, in document order, excluding
/// the synthetic root itself.
pub fn element_ids(doc: &Html) -> Vec<NodeId> {
    let Some(root_id) = root_element_id(doc) else {
        return Vec::new();
    };
    let Some(root) = doc.tree.get(root_id) else {
        return Vec::new();
    };
    root.descendants()
        .filter(|node| node.id() != root_id && node.value().is_element())
        .map(|node| node.id())
        .collect()
}

/// Snapshot of every element with the given (lowercase) tag name, in
/// document order.
pub fn elements_named(doc: &Html, name: &str) -> Vec<NodeId> {
    element_ids(doc)
        .into_iter()
        .filter(|&id| {
            doc.tree
                .get(id)
                .and_then(|node| node.value().as_element())
                .map_or(false, |el| el.name() == name)
        })
        .collect()
}

/// True when the node matches any of the given selectors.
pub fn matches_any(doc: &Html, id: NodeId, selectors: &[Selector]) -> bool {
    let Some(node) = doc.tree.get(id) else {
        return false;
    };
    let Some(element) = ElementRef::wrap(node) else {
        return false;
    };
    selectors.iter().any(|sel| sel.matches(&element))
}

/// The concatenated text content of the node's subtree.
pub fn text_content(doc: &Html, id: NodeId) -> String {
    doc.tree
        .get(id)
        .and_then(ElementRef::wrap)
        .map(|el| el.text().collect())
        .unwrap_or_default()
}

/// Detaches the node (and its subtree) from its parent. Detaching a node
/// that is already an orphan is a no-op.
pub fn detach(tree: &mut Tree<Node>, id: NodeId) {
    if let Some(mut node) = tree.get_mut(id) {
        node.detach();
    }
}

/// Removes the element while promoting its children into its former
/// position, preserving order. Orphan elements are left alone.
pub fn unwrap_element(tree: &mut Tree<Node>, id: NodeId) {
    let Some(node) = tree.get(id) else { return };
    if node.parent().is_none() {
        return;
    }
    let child_ids: Vec<NodeId> = node.children().map(|child| child.id()).collect();
    for child_id in child_ids {
        if let Some(mut node) = tree.get_mut(id) {
            node.insert_id_before(child_id);
        }
    }
    detach(tree, id);
}

/// Replaces the element with a single ordinary space text node.
pub fn replace_with_space(tree: &mut Tree<Node>, id: NodeId) {
    let Some(mut node) = tree.get_mut(id) else { return };
    if node.parent().is_none() {
        return;
    }
    node.insert_before(Node::Text(Text { text: " ".into() }));
    node.detach();
}
