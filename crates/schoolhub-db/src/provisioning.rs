//! Account + profile creation.
//!
//! Both rows are written through the caller's connection, which is expected to
//! be inside a transaction. The caller commits; dropping the transaction on any
//! error discards the account and the profile together.

use schoolhub_models::{Account, AccountId, NewProfile};
use sqlx::PgConnection;

/// Everything needed to create one account and its profile.
#[derive(Debug, Clone, Copy)]
pub struct NewAccount<'a> {
    pub username: &'a str,
    /// Already hashed with bcrypt.
    pub password_hash: &'a str,
    pub profile: &'a NewProfile,
    pub is_active: bool,
    /// Ignored unless the profile is an admin profile.
    pub is_super_admin: bool,
}

/// Inserts the account row, then the profile row of the matching role under
/// the same id, then a teacher's subject links.
///
/// Storage errors are returned untouched so the caller can tell a unique
/// violation (username taken concurrently) from a foreign key violation
/// (reference deleted concurrently).
pub async fn insert_account_with_profile(
    conn: &mut PgConnection,
    new: NewAccount<'_>,
) -> Result<Account, sqlx::Error> {
    let account = sqlx::query_as::<_, Account>(
        r#"
        INSERT INTO accounts (username, password, role, is_active)
        VALUES ($1, $2, $3, $4)
        RETURNING id, username, password, role, is_active, created_at
        "#,
    )
    .bind(new.username)
    .bind(new.password_hash)
    .bind(new.profile.role())
    .bind(new.is_active)
    .fetch_one(&mut *conn)
    .await?;

    insert_profile(conn, account.id, new.profile, new.is_super_admin).await?;

    Ok(account)
}

async fn insert_profile(
    conn: &mut PgConnection,
    id: AccountId,
    profile: &NewProfile,
    is_super_admin: bool,
) -> Result<(), sqlx::Error> {
    match profile {
        NewProfile::Admin(p) => {
            sqlx::query(
                "INSERT INTO admin_profiles (id, name, email, is_super_admin) VALUES ($1, $2, $3, $4)",
            )
            .bind(id)
            .bind(&p.name)
            .bind(&p.email)
            .bind(is_super_admin)
            .execute(&mut *conn)
            .await?;
        }
        NewProfile::Teacher(p) => {
            sqlx::query(
                r#"
                INSERT INTO teacher_profiles (id, name, surname, email, phone, address)
                VALUES ($1, $2, $3, $4, $5, $6)
                "#,
            )
            .bind(id)
            .bind(&p.name)
            .bind(&p.surname)
            .bind(&p.email)
            .bind(&p.phone)
            .bind(&p.address)
            .execute(&mut *conn)
            .await?;

            if !p.subject_ids.is_empty() {
                sqlx::query(
                    r#"
                    INSERT INTO teacher_subjects (teacher_id, subject_id)
                    SELECT $1, subject_id FROM UNNEST($2::uuid[]) AS t(subject_id)
                    ON CONFLICT DO NOTHING
                    "#,
                )
                .bind(id)
                .bind(&p.subject_ids)
                .execute(&mut *conn)
                .await?;
            }
        }
        NewProfile::Student(p) => {
            sqlx::query(
                r#"
                INSERT INTO student_profiles
                    (id, name, surname, email, phone, address, parent_id, class_id, grade_id)
                VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
                "#,
            )
            .bind(id)
            .bind(&p.name)
            .bind(&p.surname)
            .bind(&p.email)
            .bind(&p.phone)
            .bind(&p.address)
            .bind(p.parent_id)
            .bind(p.class_id)
            .bind(p.grade_id)
            .execute(&mut *conn)
            .await?;
        }
        NewProfile::Parent(p) => {
            sqlx::query(
                r#"
                INSERT INTO parent_profiles (id, name, surname, email, phone, address)
                VALUES ($1, $2, $3, $4, $5, $6)
                "#,
            )
            .bind(id)
            .bind(&p.name)
            .bind(&p.surname)
            .bind(&p.email)
            .bind(&p.phone)
            .bind(&p.address)
            .execute(&mut *conn)
            .await?;
        }
    }

    Ok(())
}
