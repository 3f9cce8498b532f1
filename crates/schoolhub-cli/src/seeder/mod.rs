//! Development data.
//!
//! The catalog seeder is idempotent and safe to run repeatedly. The demo
//! seeder always adds new accounts, with random usernames so repeated runs do
//! not collide.

mod accounts;
mod catalog;

pub use accounts::{DEMO_PASSWORD, DemoConfig, DemoSummary, seed_demo};
pub use catalog::{CatalogSummary, SUBJECT_NAMES, seed_catalog};
