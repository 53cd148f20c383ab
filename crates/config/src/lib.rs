//! Configuration management for the Saviynt provider.
//!
//! This crate provides the provider configuration type and the loader that
//! merges explicit provider-block values, environment variables and `.env`
//! files into it.

pub mod constants;
mod env;
mod error;
mod loader;
pub mod types;

pub use env::{env_var_or_none, is_acceptance_test};
pub use error::ConfigError;
pub use loader::ConfigLoader;
pub use types::ProviderConfig;
