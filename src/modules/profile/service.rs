use anyhow::anyhow;
use schoolhub_core::{AppError, hash_password, verify_password};
use schoolhub_models::{
    Account, AccountId, AdminProfile, ChangePasswordRequest, MeResponse, ParentProfile, Profile,
    ProfileUpdate, Role, StudentProfile, TeacherProfile,
};
use sqlx::{PgConnection, PgPool};
use tracing::{info, instrument};

use crate::modules::accounts::service::ensure_subjects_exist;

pub struct ProfileService;

impl ProfileService {
    /// Loads the profile of the table selected by `role`.
    pub async fn find_profile(
        conn: &mut PgConnection,
        id: AccountId,
        role: Role,
    ) -> Result<Option<Profile>, sqlx::Error> {
        let profile = match role {
            Role::Admin => sqlx::query_as::<_, AdminProfile>(
                "SELECT id, name, email, is_super_admin FROM admin_profiles WHERE id = $1",
            )
            .bind(id)
            .fetch_optional(&mut *conn)
            .await?
            .map(Profile::Admin),
            Role::Teacher => sqlx::query_as::<_, TeacherProfile>(
                r#"
                SELECT t.id, t.name, t.surname, t.email, t.phone, t.address,
                       COALESCE(
                           array_agg(ts.subject_id ORDER BY ts.subject_id)
                               FILTER (WHERE ts.subject_id IS NOT NULL),
                           '{}'
                       ) AS subject_ids
                FROM teacher_profiles t
                LEFT JOIN teacher_subjects ts ON ts.teacher_id = t.id
                WHERE t.id = $1
                GROUP BY t.id
                "#,
            )
            .bind(id)
            .fetch_optional(&mut *conn)
            .await?
            .map(Profile::Teacher),
            Role::Student => sqlx::query_as::<_, StudentProfile>(
                r#"
                SELECT id, name, surname, email, phone, address, parent_id, class_id, grade_id
                FROM student_profiles
                WHERE id = $1
                "#,
            )
            .bind(id)
            .fetch_optional(&mut *conn)
            .await?
            .map(Profile::Student),
            Role::Parent => sqlx::query_as::<_, ParentProfile>(
                "SELECT id, name, surname, email, phone, address FROM parent_profiles WHERE id = $1",
            )
            .bind(id)
            .fetch_optional(&mut *conn)
            .await?
            .map(Profile::Parent),
        };

        Ok(profile)
    }

    #[instrument(skip(db))]
    pub async fn get_me(db: &PgPool, account_id: AccountId) -> Result<MeResponse, AppError> {
        let mut conn = db.acquire().await.map_err(AppError::database)?;

        let account = find_account(&mut *conn, account_id).await?;
        let profile = Self::find_profile(&mut *conn, account.id, account.role)
            .await
            .map_err(AppError::database)?
            .ok_or_else(|| AppError::not_found(anyhow!("Profile not found")))?;

        Ok(MeResponse {
            account: account.into(),
            profile,
        })
    }

    /// Replaces the caller's own profile fields. The payload's role tag must
    /// match the caller's role.
    #[instrument(skip(db, update), fields(update_role = %update.role()))]
    pub async fn update_profile(
        db: &PgPool,
        account_id: AccountId,
        role: Role,
        update: ProfileUpdate,
    ) -> Result<Profile, AppError> {
        if update.role() != role {
            return Err(AppError::validation(anyhow!(
                "Profile role '{}' does not match account role '{}'",
                update.role(),
                role
            )));
        }

        if let ProfileUpdate::Teacher(teacher) = &update {
            ensure_subjects_exist(db, &teacher.subject_ids).await?;
        }

        let mut tx = db.begin().await.map_err(AppError::database)?;

        let updated = match &update {
            ProfileUpdate::Admin(p) => sqlx::query(
                "UPDATE admin_profiles SET name = $2, email = $3, updated_at = NOW() WHERE id = $1",
            )
            .bind(account_id)
            .bind(&p.name)
            .bind(&p.email)
            .execute(&mut *tx)
            .await,
            ProfileUpdate::Teacher(p) => sqlx::query(
                r#"
                UPDATE teacher_profiles
                SET name = $2, surname = $3, email = $4, phone = $5, address = $6, updated_at = NOW()
                WHERE id = $1
                "#,
            )
            .bind(account_id)
            .bind(&p.name)
            .bind(&p.surname)
            .bind(&p.email)
            .bind(&p.phone)
            .bind(&p.address)
            .execute(&mut *tx)
            .await,
            ProfileUpdate::Student(p) => sqlx::query(
                r#"
                UPDATE student_profiles
                SET name = $2, surname = $3, email = $4, phone = $5, address = $6, updated_at = NOW()
                WHERE id = $1
                "#,
            )
            .bind(account_id)
            .bind(&p.name)
            .bind(&p.surname)
            .bind(&p.email)
            .bind(&p.phone)
            .bind(&p.address)
            .execute(&mut *tx)
            .await,
            ProfileUpdate::Parent(p) => sqlx::query(
                r#"
                UPDATE parent_profiles
                SET name = $2, surname = $3, email = $4, phone = $5, address = $6, updated_at = NOW()
                WHERE id = $1
                "#,
            )
            .bind(account_id)
            .bind(&p.name)
            .bind(&p.surname)
            .bind(&p.email)
            .bind(&p.phone)
            .bind(&p.address)
            .execute(&mut *tx)
            .await,
        }
        .map_err(AppError::database)?;

        if updated.rows_affected() == 0 {
            return Err(AppError::not_found(anyhow!("Profile not found")));
        }

        if let ProfileUpdate::Teacher(p) = &update {
            sqlx::query("DELETE FROM teacher_subjects WHERE teacher_id = $1")
                .bind(account_id)
                .execute(&mut *tx)
                .await
                .map_err(AppError::database)?;

            sqlx::query(
                r#"
                INSERT INTO teacher_subjects (teacher_id, subject_id)
                SELECT $1, subject_id FROM UNNEST($2::uuid[]) AS s(subject_id)
                ON CONFLICT DO NOTHING
                "#,
            )
            .bind(account_id)
            .bind(&p.subject_ids)
            .execute(&mut *tx)
            .await
            .map_err(AppError::database)?;
        }

        let profile = Self::find_profile(&mut *tx, account_id, role)
            .await
            .map_err(AppError::database)?
            .ok_or_else(|| AppError::not_found(anyhow!("Profile not found")))?;

        tx.commit().await.map_err(AppError::database)?;

        info!(%account_id, "profile updated");
        Ok(profile)
    }

    #[instrument(skip(db, dto))]
    pub async fn change_password(
        db: &PgPool,
        account_id: AccountId,
        dto: ChangePasswordRequest,
    ) -> Result<(), AppError> {
        let mut conn = db.acquire().await.map_err(AppError::database)?;
        let account = find_account(&mut *conn, account_id).await?;

        if !verify_password(&dto.current_password, &account.password)? {
            return Err(AppError::invalid_credentials());
        }

        let new_hash = hash_password(&dto.new_password)?;

        sqlx::query("UPDATE accounts SET password = $2, updated_at = NOW() WHERE id = $1")
            .bind(account_id)
            .bind(new_hash)
            .execute(&mut *conn)
            .await
            .map_err(AppError::database)?;

        info!(%account_id, "password changed");
        Ok(())
    }
}

async fn find_account(conn: &mut PgConnection, account_id: AccountId) -> Result<Account, AppError> {
    sqlx::query_as::<_, Account>(
        "SELECT id, username, password, role, is_active, created_at FROM accounts WHERE id = $1",
    )
    .bind(account_id)
    .fetch_optional(&mut *conn)
    .await
    .map_err(AppError::database)?
    .ok_or_else(|| AppError::not_found(anyhow!("Account not found")))
}
