//! # SchoolHub CLI
//!
//! Administrative commands that run against the database directly rather than
//! through the API.
//!
//! - [`admin`]: bootstrap the first super admin
//! - [`seeder`]: reference catalog and fake demo accounts
//!
//! ```ignore
//! use schoolhub_cli::seeder::{DemoConfig, seed_catalog, seed_demo};
//!
//! seed_catalog(&pool).await?;
//! seed_demo(&pool, DemoConfig::default()).await?;
//! ```

pub mod admin;
pub mod seeder;

pub type CliResult<T> = Result<T, Box<dyn std::error::Error>>;
