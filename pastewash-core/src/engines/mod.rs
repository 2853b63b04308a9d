//! Concrete implementations of the `SanitizeEngine` trait.

pub mod html_engine;
