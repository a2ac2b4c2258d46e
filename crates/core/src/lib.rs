//! Core types for the catalog
//!
//! Domain types shared by the storage, service, HTTP and client crates.

mod constants;
mod env_config;
mod error;
mod item;
mod lenient;
mod pagination;
mod stats;

pub use constants::*;
pub use env_config::env_parse_with_default;
pub use error::*;
pub use item::*;
pub use lenient::{leading_int, parse_int_prefix};
pub use pagination::*;
pub use stats::*;
