//! User account entity.

use serde::{Deserialize, Serialize};

/// A named permission granted to a user (e.g. `ADMIN`, `MANAGER`).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Permission {
    pub id: Option<i64>,
    pub description: String,
}

impl Permission {
    #[must_use]
    pub fn new(description: impl Into<String>) -> Self {
        Self {
            id: None,
            description: description.into(),
        }
    }
}

/// An account that can sign in and obtain tokens.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: Option<i64>,

    /// Unique login name.
    pub user_name: String,

    pub full_name: String,

    /// Argon2 hash (never exposed via API).
    #[serde(skip_serializing)]
    pub password: String,

    pub account_non_expired: bool,
    pub account_non_locked: bool,
    pub credentials_non_expired: bool,
    pub enabled: bool,

    pub permissions: Vec<Permission>,
}

impl User {
    /// Creates an active account with the given permissions.
    #[must_use]
    pub fn new(
        user_name: impl Into<String>,
        full_name: impl Into<String>,
        password_hash: impl Into<String>,
        permissions: Vec<Permission>,
    ) -> Self {
        Self {
            id: None,
            user_name: user_name.into(),
            full_name: full_name.into(),
            password: password_hash.into(),
            account_non_expired: true,
            account_non_locked: true,
            credentials_non_expired: true,
            enabled: true,
            permissions,
        }
    }

    /// Returns the permission descriptions, used as token roles.
    #[must_use]
    pub fn roles(&self) -> Vec<String> {
        self.permissions.iter().map(|p| p.description.clone()).collect()
    }

    /// Returns true if the account may sign in.
    #[must_use]
    pub const fn can_sign_in(&self) -> bool {
        self.enabled && self.account_non_expired && self.account_non_locked && self.credentials_non_expired
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_user_can_sign_in() {
        let user = User::new("leandro", "Leandro Costa", "hash", vec![Permission::new("ADMIN")]);
        assert!(user.can_sign_in());
        assert_eq!(user.roles(), vec!["ADMIN".to_string()]);
    }

    #[test]
    fn test_locked_user_cannot_sign_in() {
        let mut user = User::new("flavio", "Flavio Costa", "hash", Vec::new());
        user.account_non_locked = false;
        assert!(!user.can_sign_in());
    }

    #[test]
    fn test_password_not_serialized() {
        let user = User::new("leandro", "Leandro Costa", "secret-hash", Vec::new());
        let json = serde_json::to_string(&user).unwrap();
        assert!(!json.contains("secret-hash"));
    }
}
