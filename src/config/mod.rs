//! Configuration module for Doc-Ripple
//!
//! This module handles loading, parsing, and validating TOML configuration files.
//!
//! # Example
//!
//! ```no_run
//! use doc_ripple::config::load_config;
//! use std::path::Path;
//!
//! let config = load_config(Path::new("ripple.toml")).unwrap();
//! println!("Crawl starts at: {}", config.site.root);
//! ```

mod parser;
mod types;
mod validation;

// Re-export types
pub use types::{CheckConfig, Config, OutputConfig, SiteConfig, UserAgentConfig};

// Re-export parser functions
pub use parser::{compute_config_hash, load_config, load_config_with_hash, parse_config};

// Re-export validation so callers can re-check a config after overriding fields
pub use validation::validate;
