//! # SchoolHub Core
//!
//! Foundational types shared by every SchoolHub crate:
//!
//! - [`errors`]: the [`ErrorKind`] taxonomy and [`AppError`], which renders as a
//!   `{"kind", "error"}` JSON body with the matching HTTP status
//! - [`password`]: bcrypt hashing and verification
//!
//! # Example
//!
//! ```ignore
//! use schoolhub_core::{AppError, hash_password, verify_password};
//!
//! let hash = hash_password("correct horse battery staple")?;
//! if !verify_password("guess", &hash)? {
//!     return Err(AppError::invalid_credentials());
//! }
//! ```

pub mod errors;
pub mod password;

pub use errors::{AppError, ErrorKind, ErrorResponse};
pub use password::{hash_password, verify_against_dummy, verify_password, warm_dummy_hash};
