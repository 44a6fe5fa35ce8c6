//! Environment variable names read directly by the binary.
//!
//! Configuration keys themselves are overridden through `SECTION__KEY`
//! variables picked up by the config loader.

/// Alternate config file location, used when `--config` is not given
pub const CATALOG_CONFIG: &str = "CATALOG_CONFIG";
/// Alternate store file location, used when `--store` is not given
pub const CATALOG_STORE: &str = "CATALOG_STORE";
