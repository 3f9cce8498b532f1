use anyhow::anyhow;
use schoolhub_core::{AppError, hash_password};
use schoolhub_db::provisioning::{NewAccount, insert_account_with_profile};
use schoolhub_models::{AccountId, AccountSummary, NewProfile, RegisterRequest, Role, SubjectId};
use schoolhub_observability::track_account_registered;
use sqlx::PgPool;
use tracing::{info, instrument};
use validator::Validate;

const USERNAME_CONSTRAINT: &str = "accounts_username_key";

/// How an account came to exist. Decides whether it starts active.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Provisioning {
    /// Public registration: students and parents are active at once, teachers
    /// and admins wait for approval.
    SelfRegistration,
    /// Created by an administrator, active immediately.
    AdminCreated,
}

impl Provisioning {
    pub fn initial_activation(self, role: Role) -> bool {
        match self {
            Provisioning::SelfRegistration => role.is_active_on_registration(),
            Provisioning::AdminCreated => true,
        }
    }
}

pub struct AccountService;

impl AccountService {
    /// Creates an account and its profile in one transaction.
    ///
    /// All checks (field rules, username availability, referenced rows) run
    /// before the first write.
    #[instrument(skip(db, dto), fields(username = %dto.username, role = %dto.profile.role()))]
    pub async fn provision(
        db: &PgPool,
        dto: RegisterRequest,
        origin: Provisioning,
    ) -> Result<AccountSummary, AppError> {
        dto.profile
            .validate()
            .map_err(|e| AppError::from_validation_errors(&e))?;

        Self::ensure_username_available(db, &dto.username).await?;
        Self::ensure_references_exist(db, &dto.profile).await?;

        let role = dto.profile.role();
        let is_active = origin.initial_activation(role);
        let password_hash = hash_password(&dto.password)?;

        let mut tx = db.begin().await.map_err(AppError::database)?;

        let account = insert_account_with_profile(
            &mut *tx,
            NewAccount {
                username: &dto.username,
                password_hash: &password_hash,
                profile: &dto.profile,
                is_active,
                is_super_admin: false,
            },
        )
        .await
        .map_err(|e| map_write_error(e, &dto.username))?;

        tx.commit().await.map_err(AppError::database)?;

        track_account_registered(role.as_str());
        info!(account_id = %account.id, is_active, "account provisioned");

        Ok(account.into())
    }

    /// Administrator-initiated creation. Only super admins may create admins.
    #[instrument(skip(db, dto), fields(username = %dto.username, role = %dto.profile.role()))]
    pub async fn create_by_admin(
        db: &PgPool,
        caller_id: AccountId,
        dto: RegisterRequest,
    ) -> Result<AccountSummary, AppError> {
        if dto.profile.role() == Role::Admin && !Self::is_super_admin(db, caller_id).await? {
            return Err(AppError::forbidden(
                "Only super admins can create admin accounts",
            ));
        }

        Self::provision(db, dto, Provisioning::AdminCreated).await
    }

    pub async fn is_super_admin(db: &PgPool, account_id: AccountId) -> Result<bool, AppError> {
        let is_super_admin = sqlx::query_scalar::<_, bool>(
            "SELECT is_super_admin FROM admin_profiles WHERE id = $1",
        )
        .bind(account_id)
        .fetch_optional(db)
        .await
        .map_err(AppError::database)?;

        Ok(is_super_admin.unwrap_or(false))
    }

    async fn ensure_username_available(db: &PgPool, username: &str) -> Result<(), AppError> {
        let exists = sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS(SELECT 1 FROM accounts WHERE username = $1)",
        )
        .bind(username)
        .fetch_one(db)
        .await
        .map_err(AppError::database)?;

        if exists {
            return Err(AppError::duplicate_username(username));
        }

        Ok(())
    }

    async fn ensure_references_exist(db: &PgPool, profile: &NewProfile) -> Result<(), AppError> {
        match profile {
            NewProfile::Student(student) => {
                let parent_exists = sqlx::query_scalar::<_, bool>(
                    "SELECT EXISTS(SELECT 1 FROM parent_profiles WHERE id = $1)",
                )
                .bind(student.parent_id)
                .fetch_one(db)
                .await
                .map_err(AppError::database)?;

                if !parent_exists {
                    return Err(AppError::validation(anyhow!(
                        "parent_id does not reference an existing parent"
                    )));
                }

                let (class_exists, grade_exists) = sqlx::query_as::<_, (bool, bool)>(
                    r#"
                    SELECT EXISTS(SELECT 1 FROM classes WHERE id = $1),
                           EXISTS(SELECT 1 FROM grades WHERE id = $2)
                    "#,
                )
                .bind(student.class_id)
                .bind(student.grade_id)
                .fetch_one(db)
                .await
                .map_err(AppError::database)?;

                if !class_exists {
                    return Err(AppError::validation(anyhow!(
                        "class_id does not reference an existing class"
                    )));
                }
                if !grade_exists {
                    return Err(AppError::validation(anyhow!(
                        "grade_id does not reference an existing grade"
                    )));
                }

                Ok(())
            }
            NewProfile::Teacher(teacher) => ensure_subjects_exist(db, &teacher.subject_ids).await,
            NewProfile::Admin(_) | NewProfile::Parent(_) => Ok(()),
        }
    }
}

pub(crate) async fn ensure_subjects_exist(
    db: &PgPool,
    subject_ids: &[SubjectId],
) -> Result<(), AppError> {
    if subject_ids.is_empty() {
        return Ok(());
    }

    let mut unique = subject_ids.to_vec();
    unique.sort_by_key(|id| id.into_inner());
    unique.dedup();

    let found = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM subjects WHERE id = ANY($1)")
        .bind(&unique)
        .fetch_one(db)
        .await
        .map_err(AppError::database)?;

    if found != unique.len() as i64 {
        return Err(AppError::validation(anyhow!(
            "subject_ids contains an unknown subject"
        )));
    }

    Ok(())
}

/// Maps a failed account/profile insert. A username unique violation here
/// means a concurrent registration won the race after the pre-check.
pub(crate) fn map_write_error(err: sqlx::Error, username: &str) -> AppError {
    if let sqlx::Error::Database(db_err) = &err {
        if db_err.is_unique_violation() && db_err.constraint() == Some(USERNAME_CONSTRAINT) {
            return AppError::duplicate_username(username);
        }
        if db_err.is_foreign_key_violation() {
            return AppError::validation(anyhow!("A referenced record no longer exists"));
        }
    }

    AppError::database(err)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_self_registration_activation() {
        let origin = Provisioning::SelfRegistration;
        assert!(origin.initial_activation(Role::Student));
        assert!(origin.initial_activation(Role::Parent));
        assert!(!origin.initial_activation(Role::Teacher));
        assert!(!origin.initial_activation(Role::Admin));
    }

    #[test]
    fn test_admin_created_always_active() {
        for role in Role::ALL {
            assert!(Provisioning::AdminCreated.initial_activation(role));
        }
    }

    #[test]
    fn test_non_database_write_error_is_internal() {
        let err = map_write_error(sqlx::Error::RowNotFound, "t1");
        assert_eq!(err.kind, schoolhub_core::ErrorKind::InternalError);
    }

    #[sqlx::test(migrations = "./migrations")]
    async fn test_username_unique_violation_is_duplicate_username(pool: PgPool) {
        let profile = NewProfile::Parent(schoolhub_models::NewParentProfile {
            name: "Pat".to_string(),
            surname: "Doe".to_string(),
            email: None,
            phone: None,
            address: None,
        });
        let new = || NewAccount {
            username: "p1",
            password_hash: "not-a-real-hash",
            profile: &profile,
            is_active: true,
            is_super_admin: false,
        };

        let mut conn = pool.acquire().await.unwrap();
        insert_account_with_profile(&mut *conn, new()).await.unwrap();

        let mut tx = pool.begin().await.unwrap();
        let err = insert_account_with_profile(&mut *tx, new())
            .await
            .unwrap_err();
        let mapped = map_write_error(err, "p1");

        assert_eq!(mapped.kind, schoolhub_core::ErrorKind::DuplicateUsername);
    }
}
