//! File I/O for documents.
//!
//! Loads YAML, JSON and JSON Lines documents from disk or stdin, plain or
//! gzip-compressed, as [`Value`](crate::reflect::Value)s.

pub mod loader;

pub use loader::{load_document, load_from_stdin, parse_document};
