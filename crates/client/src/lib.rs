//! Client side of the catalog
//!
//! [`CatalogClient`] talks to the HTTP API. [`DataLayer`] holds the list
//! state a UI renders from: current page, pagination, search query, loading
//! flag and last error. [`views`] renders that state as text.

mod client;
mod data_layer;
mod debounce;
mod error;
mod token;
pub mod views;

pub use client::{CatalogClient, ListResponse, RawPagination};
pub use data_layer::{DataLayer, DataState, normalize_list};
pub use debounce::SearchDebouncer;
pub use error::ClientError;
pub use token::FetchToken;
