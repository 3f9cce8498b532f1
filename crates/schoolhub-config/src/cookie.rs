use std::env;

use crate::env_flag;

/// Settings for the cookie that carries the access token.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CookieConfig {
    pub name: String,
    /// Adds the `Secure` attribute. Enable behind HTTPS.
    pub secure: bool,
}

impl Default for CookieConfig {
    fn default() -> Self {
        Self {
            name: "token".to_string(),
            secure: false,
        }
    }
}

impl CookieConfig {
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            name: env::var("COOKIE_NAME")
                .ok()
                .filter(|s| !s.trim().is_empty())
                .unwrap_or(defaults.name),
            secure: env_flag("COOKIE_SECURE", defaults.secure),
        }
    }
}
