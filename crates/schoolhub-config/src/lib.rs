//! # SchoolHub Config
//!
//! Configuration structures loaded from environment variables. Every struct has
//! a `from_env()` constructor that falls back to development defaults when a
//! variable is missing or cannot be parsed.
//!
//! - [`jwt`]: token signing secret and lifetime
//! - [`cookie`]: name and flags of the cookie carrying the token
//! - [`cors`]: allowed browser origins
//! - [`database`]: connection string and pool sizing
//! - [`server`]: bind address
//!
//! # Example
//!
//! ```ignore
//! use schoolhub_config::{CookieConfig, JwtConfig};
//!
//! let jwt_config = JwtConfig::from_env();
//! let cookie_config = CookieConfig::from_env();
//! ```

pub mod cookie;
pub mod cors;
pub mod database;
pub mod jwt;
pub mod server;

pub use cookie::CookieConfig;
pub use cors::CorsConfig;
pub use database::DatabaseConfig;
pub use jwt::JwtConfig;
pub use server::ServerConfig;

/// Reads a boolean flag; accepts `true`/`1` case-insensitively.
pub(crate) fn env_flag(key: &str, default: bool) -> bool {
    std::env::var(key)
        .map(|v| v.eq_ignore_ascii_case("true") || v == "1")
        .unwrap_or(default)
}
