/// Default auth collaborator base URL
pub const DEFAULT_AUTH_BASE_URL: &str = "http://127.0.0.1:3000/api/auth";

/// Default products collaborator base URL
pub const DEFAULT_PRODUCTS_BASE_URL: &str = "https://app.getswipe.in/api/public";

/// Default request timeout for both collaborators
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;

/// Bounds for the request timeout
pub const MIN_REQUEST_TIMEOUT_SECS: u64 = 1;
pub const MAX_REQUEST_TIMEOUT_SECS: u64 = 300;

/// Default delay between the last search keystroke and the filter recompute
pub const DEFAULT_SEARCH_DEBOUNCE_MS: u64 = 300;

/// Longest accepted search debounce
pub const MAX_SEARCH_DEBOUNCE_MS: u64 = 5000;
