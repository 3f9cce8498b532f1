use schoolhub_config::{CookieConfig, CorsConfig, JwtConfig};
use sqlx::PgPool;

/// Shared, read-only request context. The pool is the only resource; it is
/// created once in `main` and closed on shutdown.
#[derive(Clone, Debug)]
pub struct AppState {
    pub db: PgPool,
    pub jwt_config: JwtConfig,
    pub cookie_config: CookieConfig,
    pub cors_config: CorsConfig,
}

impl AppState {
    pub fn from_env(db: PgPool) -> Self {
        Self {
            db,
            jwt_config: JwtConfig::from_env(),
            cookie_config: CookieConfig::from_env(),
            cors_config: CorsConfig::from_env(),
        }
    }
}
