//! Role-specific profile records.
//!
//! Storage keeps one table per role, keyed by the owning account's id. In code a
//! profile is a [`Profile`], a union tagged by role, so a caller can never hold
//! a teacher's fields under a student account.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use validator::{Validate, ValidationErrors};

use crate::accounts::Role;
use crate::ids::{AccountId, ClassId, GradeId, SubjectId};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, FromRow, ToSchema)]
pub struct AdminProfile {
    pub id: AccountId,
    pub name: String,
    pub email: Option<String>,
    /// Only super admins may create further admin accounts.
    pub is_super_admin: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, FromRow, ToSchema)]
pub struct TeacherProfile {
    pub id: AccountId,
    pub name: String,
    pub surname: String,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub address: Option<String>,
    pub subject_ids: Vec<SubjectId>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, FromRow, ToSchema)]
pub struct StudentProfile {
    pub id: AccountId,
    pub name: String,
    pub surname: String,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub address: Option<String>,
    pub parent_id: AccountId,
    pub class_id: ClassId,
    pub grade_id: GradeId,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, FromRow, ToSchema)]
pub struct ParentProfile {
    pub id: AccountId,
    pub name: String,
    pub surname: String,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub address: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
#[serde(tag = "role", rename_all = "lowercase")]
pub enum Profile {
    Admin(AdminProfile),
    Teacher(TeacherProfile),
    Student(StudentProfile),
    Parent(ParentProfile),
}

/// The fields shown next to an account in listings such as the approval queue.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, ToSchema)]
pub struct ProfileDisplay {
    pub name: String,
    pub surname: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
}

impl Profile {
    pub fn role(&self) -> Role {
        match self {
            Profile::Admin(_) => Role::Admin,
            Profile::Teacher(_) => Role::Teacher,
            Profile::Student(_) => Role::Student,
            Profile::Parent(_) => Role::Parent,
        }
    }

    pub fn id(&self) -> AccountId {
        match self {
            Profile::Admin(p) => p.id,
            Profile::Teacher(p) => p.id,
            Profile::Student(p) => p.id,
            Profile::Parent(p) => p.id,
        }
    }

    pub fn display(&self) -> ProfileDisplay {
        match self {
            Profile::Admin(p) => ProfileDisplay {
                name: p.name.clone(),
                surname: None,
                email: p.email.clone(),
                phone: None,
            },
            Profile::Teacher(p) => ProfileDisplay {
                name: p.name.clone(),
                surname: Some(p.surname.clone()),
                email: p.email.clone(),
                phone: p.phone.clone(),
            },
            Profile::Student(p) => ProfileDisplay {
                name: p.name.clone(),
                surname: Some(p.surname.clone()),
                email: p.email.clone(),
                phone: p.phone.clone(),
            },
            Profile::Parent(p) => ProfileDisplay {
                name: p.name.clone(),
                surname: Some(p.surname.clone()),
                email: p.email.clone(),
                phone: p.phone.clone(),
            },
        }
    }
}

#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct NewAdminProfile {
    #[validate(length(min = 1, max = 100, message = "name must be between 1 and 100 characters"))]
    #[schema(example = "Ada")]
    pub name: String,
    #[validate(email(message = "email must be a valid email address"))]
    pub email: Option<String>,
}

#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct NewTeacherProfile {
    #[validate(length(min = 1, max = 100, message = "name must be between 1 and 100 characters"))]
    pub name: String,
    #[validate(length(min = 1, max = 100, message = "surname must be between 1 and 100 characters"))]
    pub surname: String,
    #[validate(email(message = "email must be a valid email address"))]
    pub email: Option<String>,
    #[validate(length(max = 32, message = "phone must be at most 32 characters"))]
    pub phone: Option<String>,
    pub address: Option<String>,
    #[serde(default)]
    pub subject_ids: Vec<SubjectId>,
}

#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct NewStudentProfile {
    #[validate(length(min = 1, max = 100, message = "name must be between 1 and 100 characters"))]
    pub name: String,
    #[validate(length(min = 1, max = 100, message = "surname must be between 1 and 100 characters"))]
    pub surname: String,
    #[validate(email(message = "email must be a valid email address"))]
    pub email: Option<String>,
    #[validate(length(max = 32, message = "phone must be at most 32 characters"))]
    pub phone: Option<String>,
    pub address: Option<String>,
    /// Account id of an existing parent.
    pub parent_id: AccountId,
    pub class_id: ClassId,
    pub grade_id: GradeId,
}

#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct NewParentProfile {
    #[validate(length(min = 1, max = 100, message = "name must be between 1 and 100 characters"))]
    pub name: String,
    #[validate(length(min = 1, max = 100, message = "surname must be between 1 and 100 characters"))]
    pub surname: String,
    #[validate(email(message = "email must be a valid email address"))]
    pub email: Option<String>,
    #[validate(length(max = 32, message = "phone must be at most 32 characters"))]
    pub phone: Option<String>,
    pub address: Option<String>,
}

/// Profile fields submitted when an account is created, tagged by `role`.
#[derive(Debug, Clone, Deserialize, ToSchema)]
#[serde(tag = "role", rename_all = "lowercase")]
pub enum NewProfile {
    Admin(NewAdminProfile),
    Teacher(NewTeacherProfile),
    Student(NewStudentProfile),
    Parent(NewParentProfile),
}

impl NewProfile {
    pub fn role(&self) -> Role {
        match self {
            NewProfile::Admin(_) => Role::Admin,
            NewProfile::Teacher(_) => Role::Teacher,
            NewProfile::Student(_) => Role::Student,
            NewProfile::Parent(_) => Role::Parent,
        }
    }
}

impl Validate for NewProfile {
    fn validate(&self) -> Result<(), ValidationErrors> {
        match self {
            NewProfile::Admin(p) => p.validate(),
            NewProfile::Teacher(p) => p.validate(),
            NewProfile::Student(p) => p.validate(),
            NewProfile::Parent(p) => p.validate(),
        }
    }
}

/// Self-service student update. Parent, class and grade are assigned by the
/// school and cannot be changed from here.
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct UpdateStudentProfile {
    #[validate(length(min = 1, max = 100, message = "name must be between 1 and 100 characters"))]
    pub name: String,
    #[validate(length(min = 1, max = 100, message = "surname must be between 1 and 100 characters"))]
    pub surname: String,
    #[validate(email(message = "email must be a valid email address"))]
    pub email: Option<String>,
    #[validate(length(max = 32, message = "phone must be at most 32 characters"))]
    pub phone: Option<String>,
    pub address: Option<String>,
}

/// Replacement profile fields for `PUT /api/me/profile`, tagged by `role`.
///
/// The tag must equal the caller's role; a student cannot submit a teacher
/// update.
#[derive(Debug, Clone, Deserialize, ToSchema)]
#[serde(tag = "role", rename_all = "lowercase")]
pub enum ProfileUpdate {
    Admin(NewAdminProfile),
    Teacher(NewTeacherProfile),
    Student(UpdateStudentProfile),
    Parent(NewParentProfile),
}

impl ProfileUpdate {
    pub fn role(&self) -> Role {
        match self {
            ProfileUpdate::Admin(_) => Role::Admin,
            ProfileUpdate::Teacher(_) => Role::Teacher,
            ProfileUpdate::Student(_) => Role::Student,
            ProfileUpdate::Parent(_) => Role::Parent,
        }
    }
}

impl Validate for ProfileUpdate {
    fn validate(&self) -> Result<(), ValidationErrors> {
        match self {
            ProfileUpdate::Admin(p) => p.validate(),
            ProfileUpdate::Teacher(p) => p.validate(),
            ProfileUpdate::Student(p) => p.validate(),
            ProfileUpdate::Parent(p) => p.validate(),
        }
    }
}
