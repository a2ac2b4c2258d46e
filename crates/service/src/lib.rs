//! Service layer for the catalog
//!
//! Centralizes business logic between the HTTP handlers and the item store.

#![allow(clippy::missing_errors_doc, reason = "Errors are self-explanatory from Result types")]
#![allow(clippy::implicit_return, reason = "Implicit return is idiomatic Rust")]
#![allow(clippy::question_mark_used, reason = "? operator is idiomatic Rust")]
#![allow(clippy::min_ident_chars, reason = "Short error vars are idiomatic")]

mod error;
mod item_service;
mod stats_service;

pub use error::ServiceError;
pub use item_service::{ItemService, ListQuery, filter_by_name, find_by_id};
pub use stats_service::{CacheState, StatsService, change_signal};
