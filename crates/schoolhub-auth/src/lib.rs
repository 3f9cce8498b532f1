//! # SchoolHub Auth
//!
//! Access token claims and the functions that sign and verify them.
//!
//! Tokens are HS256 JWTs. Verification is purely cryptographic: the gate never
//! consults the database, so a token stays usable until its `exp` claim passes
//! even if the account behind it is deactivated in the meantime.
//!
//! # Example
//!
//! ```ignore
//! use schoolhub_auth::{create_access_token, verify_token};
//! use schoolhub_config::JwtConfig;
//!
//! let config = JwtConfig::from_env();
//! let token = create_access_token(account_id, "t1", "teacher", &config)?;
//! let claims = verify_token(&token, &config)?;
//! assert_eq!(claims.role, "teacher");
//! ```

pub mod claims;
pub mod jwt;

pub use claims::Claims;
pub use jwt::{create_access_token, verify_token};
