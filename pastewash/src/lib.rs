// pastewash/src/lib.rs
//! # PasteWash CLI Application
//!
//! This crate provides the command-line front-end for the PasteWash
//! cleaning pipeline: read raw HTML from a file, stdin, or the system
//! clipboard, run it through `pastewash-core`, and write the cleaned
//! markup back out.

pub mod cli;
pub mod commands;
pub mod logger;
pub mod utils;
