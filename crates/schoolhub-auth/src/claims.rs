use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

/// JWT claims for access tokens.
///
/// Everything the gate needs to authorize a request lives here, so no database
/// lookup happens per request.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct Claims {
    /// Account ID (subject claim)
    pub sub: String,
    pub username: String,
    /// Lowercase role name: `admin`, `teacher`, `student` or `parent`
    pub role: String,
    /// Expiration timestamp (Unix seconds)
    pub exp: usize,
    /// Issued-at timestamp (Unix seconds)
    pub iat: usize,
}

impl Claims {
    /// Parses the subject claim. `None` means the token was signed with a
    /// subject that is not an account id.
    pub fn account_id(&self) -> Option<Uuid> {
        Uuid::parse_str(&self.sub).ok()
    }
}
