//! Configuration subsystem.
//!
//! # Data Flow
//! ```text
//! config file (TOML)
//!     → loader.rs (parse & deserialize)
//!     → ServerConfig (defaulted, immutable)
//!     → consumed by http::ApiServer at construction
//! ```
//!
//! # Design Decisions
//! - Config is immutable once loaded
//! - All fields have defaults so a minimal (or empty) config is valid

pub mod loader;
pub mod schema;

pub use loader::{load_config, ConfigError};
pub use schema::{LimitsConfig, ServerConfig, TimeoutConfig};
