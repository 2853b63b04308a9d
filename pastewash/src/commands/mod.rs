//! Command implementations for the `pastewash` CLI.

pub mod paste;
pub mod sanitize;
