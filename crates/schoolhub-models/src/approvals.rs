use chrono::{DateTime, Utc};
use serde::Serialize;
use utoipa::ToSchema;

use crate::accounts::{Account, Role};
use crate::ids::AccountId;
use crate::profiles::ProfileDisplay;

/// An inactive account waiting for an administrator's decision.
///
/// Display fields are `None` when the profile could not be found, which only
/// happens if the account and profile tables disagree.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct PendingAccount {
    pub id: AccountId,
    pub username: String,
    pub role: Role,
    pub created_at: DateTime<Utc>,
    pub name: Option<String>,
    pub surname: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
}

impl PendingAccount {
    pub fn new(account: &Account, display: Option<ProfileDisplay>) -> Self {
        let display = display.map(|d| (Some(d.name), d.surname, d.email, d.phone));
        let (name, surname, email, phone) = display.unwrap_or_default();

        Self {
            id: account.id,
            username: account.username.clone(),
            role: account.role,
            created_at: account.created_at,
            name,
            surname,
            email,
            phone,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn teacher_account() -> Account {
        Account {
            id: AccountId::new(),
            username: "t1".to_string(),
            password: "hash".to_string(),
            role: Role::Teacher,
            is_active: false,
            created_at: Utc::now(),
        }
    }

    #[test]
    fn test_pending_account_with_display() {
        let account = teacher_account();
        let pending = PendingAccount::new(
            &account,
            Some(ProfileDisplay {
                name: "Tess".to_string(),
                surname: Some("Smith".to_string()),
                email: None,
                phone: Some("555".to_string()),
            }),
        );

        assert_eq!(pending.id, account.id);
        assert_eq!(pending.name.as_deref(), Some("Tess"));
        assert_eq!(pending.surname.as_deref(), Some("Smith"));
        assert_eq!(pending.phone.as_deref(), Some("555"));
    }

    #[test]
    fn test_pending_account_without_profile() {
        let pending = PendingAccount::new(&teacher_account(), None);
        assert_eq!(pending.name, None);
        assert_eq!(pending.role, Role::Teacher);
    }
}
