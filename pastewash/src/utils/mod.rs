//! Utility helpers for the CLI front-end.

pub mod clipboard;
