use schoolhub_auth::create_access_token;
use schoolhub_config::JwtConfig;
use schoolhub_core::{AppError, verify_against_dummy, verify_password};
use schoolhub_models::{Account, AccountSummary, LoginRequest, LoginResponse, RegisterRequest};
use schoolhub_observability::{track_login_failure, track_login_success, track_token_issued};
use sqlx::PgPool;
use tracing::{info, instrument, warn};

use crate::modules::accounts::service::{AccountService, Provisioning};

pub struct AuthService;

impl AuthService {
    pub async fn register(db: &PgPool, dto: RegisterRequest) -> Result<AccountSummary, AppError> {
        AccountService::provision(db, dto, Provisioning::SelfRegistration).await
    }

    /// Checks credentials and issues a token.
    ///
    /// Unknown usernames and wrong passwords fail identically, and both run a
    /// full bcrypt verification. Inactive accounts are refused with
    /// `PendingApproval` before the password is compared.
    #[instrument(skip(db, dto, jwt_config), fields(username = %dto.username))]
    pub async fn login(
        db: &PgPool,
        dto: LoginRequest,
        jwt_config: &JwtConfig,
    ) -> Result<LoginResponse, AppError> {
        let account = sqlx::query_as::<_, Account>(
            r#"
            SELECT id, username, password, role, is_active, created_at
            FROM accounts
            WHERE username = $1
            "#,
        )
        .bind(&dto.username)
        .fetch_optional(db)
        .await
        .map_err(AppError::database)?;

        let Some(account) = account else {
            verify_against_dummy(&dto.password);
            track_login_failure("invalid_credentials");
            warn!("login failed");
            return Err(AppError::invalid_credentials());
        };

        if !account.is_active {
            track_login_failure("pending_approval");
            info!(account_id = %account.id, "login refused, account pending approval");
            return Err(AppError::pending_approval());
        }

        if !verify_password(&dto.password, &account.password)? {
            track_login_failure("invalid_credentials");
            warn!("login failed");
            return Err(AppError::invalid_credentials());
        }

        let access_token = create_access_token(
            account.id.into_inner(),
            &account.username,
            account.role.as_str(),
            jwt_config,
        )?;

        track_token_issued();
        track_login_success(account.role.as_str());
        info!(account_id = %account.id, role = %account.role, "login succeeded");

        Ok(LoginResponse {
            access_token,
            user: account.into(),
        })
    }
}
