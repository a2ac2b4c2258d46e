//! Storage layer for the catalog
//!
//! The collection is a single JSON array file, read in full on every query
//! and rewritten in full on insert.

mod error;
mod json_file;
pub mod traits;

pub use error::StorageError;
pub use json_file::{JsonFileStore, next_item_id};
pub use traits::ItemStore;
