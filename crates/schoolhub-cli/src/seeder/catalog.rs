use schoolhub_models::{GradeId, SubjectId};
use sqlx::PgPool;
use std::time::Instant;

use crate::CliResult;

pub const SUBJECT_NAMES: [&str; 10] = [
    "Mathematics",
    "English",
    "Biology",
    "Chemistry",
    "Physics",
    "History",
    "Geography",
    "Art",
    "Music",
    "Physical Education",
];

const GRADE_LEVELS: std::ops::RangeInclusive<i32> = 1..=12;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CatalogSummary {
    pub grades: usize,
    pub classes: usize,
    pub subjects: usize,
}

fn class_name(level: i32) -> String {
    format!("{}A", level)
}

/// Inserts grades 1 to 12, one class per grade and the standard subjects.
/// Rows that already exist are left alone; the summary counts new rows only.
pub async fn seed_catalog(db: &PgPool) -> CliResult<CatalogSummary> {
    let start_time = Instant::now();
    println!("📚 Seeding reference catalog...");

    let mut tx = db.begin().await?;
    let mut summary = CatalogSummary::default();

    for level in GRADE_LEVELS {
        let inserted: Option<GradeId> = sqlx::query_scalar(
            "INSERT INTO grades (level) VALUES ($1) ON CONFLICT (level) DO NOTHING RETURNING id",
        )
        .bind(level)
        .fetch_optional(&mut *tx)
        .await?;
        summary.grades += usize::from(inserted.is_some());

        let grade_id: GradeId = sqlx::query_scalar("SELECT id FROM grades WHERE level = $1")
            .bind(level)
            .fetch_one(&mut *tx)
            .await?;

        let result = sqlx::query(
            "INSERT INTO classes (name, grade_id) VALUES ($1, $2) ON CONFLICT (name) DO NOTHING",
        )
        .bind(class_name(level))
        .bind(grade_id)
        .execute(&mut *tx)
        .await?;
        summary.classes += result.rows_affected() as usize;
    }

    for name in SUBJECT_NAMES {
        let inserted: Option<SubjectId> = sqlx::query_scalar(
            "INSERT INTO subjects (name) VALUES ($1) ON CONFLICT (name) DO NOTHING RETURNING id",
        )
        .bind(name)
        .fetch_optional(&mut *tx)
        .await?;
        summary.subjects += usize::from(inserted.is_some());
    }

    tx.commit().await?;

    println!(
        "   ✓ {} grades, {} classes, {} subjects added in {:?}",
        summary.grades,
        summary.classes,
        summary.subjects,
        start_time.elapsed()
    );

    Ok(summary)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_class_names_are_unique_per_grade() {
        let names: std::collections::HashSet<String> = GRADE_LEVELS.map(class_name).collect();
        assert_eq!(names.len(), 12);
        assert!(names.contains("1A"));
        assert!(names.contains("12A"));
    }
}
