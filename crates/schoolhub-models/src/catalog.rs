//! Reference rows that profiles point at.

use chrono::{DateTime, Utc};
use serde::Serialize;
use sqlx::FromRow;
use utoipa::ToSchema;

use crate::ids::{ClassId, GradeId, SubjectId};

#[derive(Debug, Clone, Serialize, FromRow, ToSchema)]
pub struct Grade {
    pub id: GradeId,
    pub level: i32,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, FromRow, ToSchema)]
pub struct Class {
    pub id: ClassId,
    pub name: String,
    pub capacity: i32,
    pub grade_id: GradeId,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, FromRow, ToSchema)]
pub struct Subject {
    pub id: SubjectId,
    pub name: String,
    pub created_at: DateTime<Utc>,
}
