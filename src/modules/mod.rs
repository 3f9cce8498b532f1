pub mod accounts;
pub mod approvals;
pub mod auth;
pub mod profile;
