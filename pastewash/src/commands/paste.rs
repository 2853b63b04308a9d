//! Paste command implementation: system clipboard in, cleaned markup out.

use anyhow::Result;
use std::path::PathBuf;

use pastewash_core::HtmlEngine;

/// Options for the paste command runner.
pub struct PasteOptions {
    pub output_path: Option<PathBuf>,
}

#[cfg(feature = "clipboard")]
pub fn run_paste(engine: HtmlEngine, opts: PasteOptions) -> Result<()> {
    use anyhow::Context;
    use is_terminal::IsTerminal;
    use log::info;
    use pastewash_core::{EditorSurface, Paster};
    use std::fs;
    use std::io::{self, Write};

    use crate::utils::clipboard::ArboardClipboard;

    /// Collects the inserted markup; the CLI has no live cursor to target.
    #[derive(Default)]
    struct CapturedInsert(String);

    impl EditorSurface for CapturedInsert {
        fn insert_at_cursor(&mut self, markup: &str) -> Result<()> {
            self.0.push_str(markup);
            Ok(())
        }
    }

    info!("Starting paste operation.");
    let paster = Paster::new(engine);
    let mut clipboard = ArboardClipboard::new()?;
    let mut surface = CapturedInsert::default();
    paster.paste(&mut clipboard, &mut surface)?;
    let cleaned = surface.0;

    if let Some(path) = &opts.output_path {
        info!("Writing cleaned markup to file: {}", path.display());
        fs::write(path, format!("{}\n", cleaned))
            .with_context(|| format!("Failed to create output file: {}", path.display()))?;
    } else {
        let stdout = io::stdout();
        let mut writer = stdout.lock();
        if stdout.is_terminal() {
            writeln!(writer, "{}", cleaned)?;
        } else {
            write!(writer, "{}", cleaned)?;
        }
    }

    info!("Paste operation completed.");
    Ok(())
}

#[cfg(not(feature = "clipboard"))]
pub fn run_paste(_engine: HtmlEngine, _opts: PasteOptions) -> Result<()> {
    anyhow::bail!("pastewash was built without clipboard support")
}
