//! Shared constants for the catalog crates.

/// Page size used when the caller does not pass `limit`.
pub const DEFAULT_PAGE_LIMIT: usize = 10;

/// Upper bound on `limit` for list queries (DoS protection).
pub const MAX_PAGE_LIMIT: usize = 100;

/// Stats cache time-to-live in seconds.
pub const STATS_CACHE_TTL_SECS: u64 = 300;

/// Location of the item collection when `CATALOG_DATA_PATH` is unset.
pub const DEFAULT_DATA_PATH: &str = "data/items.json";

/// Port the HTTP server binds by default.
pub const DEFAULT_PORT: u16 = 3001;

/// Base URL the client talks to when `CATALOG_API_URL` is unset.
pub const DEFAULT_API_URL: &str = "http://localhost:3001";

/// Page size the client data layer always requests.
pub const CLIENT_PAGE_LIMIT: usize = 10;

/// Quiet period after the last keystroke before a search is issued.
pub const SEARCH_DEBOUNCE_MS: u64 = 500;

/// Number of leading characters of a non-JSON body kept for diagnostics.
pub const ERROR_PREVIEW_CHARS: usize = 100;

/// Row height of the virtualized item list.
pub const LIST_ROW_HEIGHT: usize = 150;

/// Rows rendered beyond each edge of the visible window.
pub const LIST_OVERSCAN: usize = 5;
