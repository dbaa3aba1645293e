//! # voxnav Config
//!
//! Configuration management for voxnav: TOML schema with per-field defaults,
//! `${VAR}` substitution, and validation.

mod error;
mod loader;
mod schema;
mod validator;

pub use error::ConfigError;
pub use loader::ConfigLoader;
pub use schema::*;
pub use validator::{ConfigValidator, ValidationError, ValidationResult, ValidationWarning};
