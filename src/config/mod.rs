//! Configuration module for Robots-Gate
//!
//! This module handles loading, parsing, and validating TOML configuration files.
//!
//! # Example
//!
//! ```no_run
//! use robots_gate::config::load_config;
//! use std::path::Path;
//!
//! let config = load_config(Path::new("robots-gate.toml")).unwrap();
//! println!("Fetch timeout: {}s", config.fetch.timeout_secs);
//! ```

mod parser;
mod types;
mod validation;

// Re-export types
pub use types::{Config, FetchConfig, UserAgentConfig, DEFAULT_TIMEOUT_SECS};

// Re-export parser and validation functions
pub use parser::{load_config, parse_config};
pub use validation::validate;
