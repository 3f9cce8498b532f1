use fake::Fake;
use fake::faker::address::en::StreetName;
use fake::faker::internet::en::SafeEmail;
use fake::faker::name::en::{FirstName, LastName};
use fake::faker::phone_number::en::PhoneNumber;
use schoolhub_core::hash_password;
use schoolhub_db::provisioning::{NewAccount, insert_account_with_profile};
use schoolhub_models::{
    AccountId, ClassId, GradeId, NewParentProfile, NewProfile, NewStudentProfile,
    NewTeacherProfile, SubjectId,
};
use sqlx::{PgConnection, PgPool};
use std::time::Instant;
use uuid::Uuid;

use crate::CliResult;

/// Password shared by every demo account.
pub const DEMO_PASSWORD: &str = "password123";

#[derive(Debug, Clone)]
pub struct DemoConfig {
    pub parents: usize,
    pub students_per_parent: usize,
    pub teachers: usize,
}

impl Default for DemoConfig {
    fn default() -> Self {
        Self {
            parents: 10,
            students_per_parent: 2,
            teachers: 5,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DemoSummary {
    pub parents: usize,
    pub students: usize,
    pub teachers: usize,
}

/// Lowercase ASCII name plus a short random suffix, e.g. `jane.k3f9a1c2`.
fn generate_username(first_name: &str) -> String {
    let base: String = first_name
        .chars()
        .filter(|c| c.is_ascii_alphanumeric())
        .take(20)
        .collect::<String>()
        .to_lowercase();
    let suffix = Uuid::new_v4().simple().to_string();
    let base = if base.is_empty() { "user" } else { base.as_str() };

    format!("{}.{}", base, &suffix[..8])
}

fn fake_contact() -> (String, String, Option<String>, Option<String>, Option<String>) {
    let name: String = FirstName().fake();
    let surname: String = LastName().fake();
    let email: String = SafeEmail().fake();
    let phone: String = PhoneNumber().fake();
    let address: String = StreetName().fake();
    (name, surname, Some(email), Some(phone), Some(address))
}

async fn insert(
    conn: &mut PgConnection,
    profile: NewProfile,
    password_hash: &str,
) -> CliResult<AccountId> {
    let first_name = match &profile {
        NewProfile::Admin(p) => p.name.clone(),
        NewProfile::Teacher(p) => p.name.clone(),
        NewProfile::Student(p) => p.name.clone(),
        NewProfile::Parent(p) => p.name.clone(),
    };
    let username = generate_username(&first_name);
    let is_active = profile.role().is_active_on_registration();

    let account = insert_account_with_profile(
        conn,
        NewAccount {
            username: &username,
            password_hash,
            profile: &profile,
            is_active,
            is_super_admin: false,
        },
    )
    .await?;

    Ok(account.id)
}

/// Creates parents with their children, plus teachers waiting for approval.
///
/// Requires the catalog: students are spread round-robin over the existing
/// classes, teachers get up to two subjects each. Everything is written in one
/// transaction.
pub async fn seed_demo(db: &PgPool, config: DemoConfig) -> CliResult<DemoSummary> {
    let start_time = Instant::now();

    let classes: Vec<(ClassId, GradeId)> =
        sqlx::query_as("SELECT id, grade_id FROM classes ORDER BY name")
            .fetch_all(db)
            .await?;
    if classes.is_empty() && config.students_per_parent > 0 && config.parents > 0 {
        return Err("No classes found. Run `seed-catalog` first.".into());
    }

    let subjects: Vec<SubjectId> = sqlx::query_scalar("SELECT id FROM subjects ORDER BY name")
        .fetch_all(db)
        .await?;

    println!(
        "👪 Seeding {} parents with {} students each and {} teachers...",
        config.parents, config.students_per_parent, config.teachers
    );

    let password_hash =
        hash_password(DEMO_PASSWORD).map_err(|e| format!("Failed to hash password: {}", e.error))?;

    let mut tx = db.begin().await?;
    let mut summary = DemoSummary::default();

    for _ in 0..config.parents {
        let (name, surname, email, phone, address) = fake_contact();
        let parent_id = insert(
            &mut *tx,
            NewProfile::Parent(NewParentProfile {
                name,
                surname: surname.clone(),
                email,
                phone,
                address: address.clone(),
            }),
            &password_hash,
        )
        .await?;
        summary.parents += 1;

        for _ in 0..config.students_per_parent {
            let (class_id, grade_id) = classes[summary.students % classes.len()];
            let name: String = FirstName().fake();
            insert(
                &mut *tx,
                NewProfile::Student(NewStudentProfile {
                    name,
                    surname: surname.clone(),
                    email: None,
                    phone: None,
                    address: address.clone(),
                    parent_id,
                    class_id,
                    grade_id,
                }),
                &password_hash,
            )
            .await?;
            summary.students += 1;
        }
    }

    for idx in 0..config.teachers {
        let (name, surname, email, phone, address) = fake_contact();
        let subject_ids = if subjects.is_empty() {
            Vec::new()
        } else {
            let first = subjects[idx % subjects.len()];
            let second = subjects[(idx + 1) % subjects.len()];
            let mut ids = vec![first];
            if second != first {
                ids.push(second);
            }
            ids
        };

        insert(
            &mut *tx,
            NewProfile::Teacher(NewTeacherProfile {
                name,
                surname,
                email,
                phone,
                address,
                subject_ids,
            }),
            &password_hash,
        )
        .await?;
        summary.teachers += 1;
    }

    tx.commit().await?;

    println!(
        "   ✓ Inserted {} parents, {} students and {} pending teachers in {:?}",
        summary.parents,
        summary.students,
        summary.teachers,
        start_time.elapsed()
    );

    Ok(summary)
}
