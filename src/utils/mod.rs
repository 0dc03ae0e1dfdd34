//! Utility module for pyss.
//!
//! Config file discovery and other path helpers.

mod paths;

pub use paths::{find_config_file, CONFIG_FILE_NAMES, MAX_SEARCH_DEPTH};
