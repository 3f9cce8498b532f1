//! # SchoolHub Models
//!
//! Domain types and request/response DTOs shared by the API server and the CLI.
//!
//! - [`ids`]: typed UUID identifiers
//! - [`accounts`]: the [`Role`] enum and account records
//! - [`profiles`]: per-role profiles and the role-tagged [`Profile`] union
//! - [`auth`]: registration, login and self-service bodies
//! - [`approvals`]: the pending-approval listing
//! - [`catalog`]: grades, classes and subjects
//!
//! # Example
//!
//! ```ignore
//! use schoolhub_models::{NewProfile, RegisterRequest, Role};
//!
//! let request: RegisterRequest = serde_json::from_str(body)?;
//! if request.profile.role() == Role::Teacher {
//!     // starts inactive until approved
//! }
//! ```

pub mod accounts;
pub mod approvals;
pub mod auth;
pub mod catalog;
pub mod ids;
pub mod profiles;

pub use accounts::{Account, AccountSummary, Role};
pub use approvals::PendingAccount;
pub use auth::{
    ChangePasswordRequest, LoginRequest, LoginResponse, MeResponse, MessageResponse,
    RegisterRequest,
};
pub use catalog::{Class, Grade, Subject};
pub use ids::{AccountId, ClassId, GradeId, SubjectId};
pub use profiles::{
    AdminProfile, NewAdminProfile, NewParentProfile, NewProfile, NewStudentProfile,
    NewTeacherProfile, ParentProfile, Profile, ProfileDisplay, ProfileUpdate, StudentProfile,
    TeacherProfile, UpdateStudentProfile,
};
