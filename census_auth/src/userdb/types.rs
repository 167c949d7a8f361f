use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use std::collections::HashMap;

use super::errors::UserError;

/// A local user identity, possibly linked to several OAuth providers
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct User {
    /// Unique user identifier
    pub id: String,
    /// Whether this is an anonymous identity; always false for resolved OAuth logins
    pub anonymous: bool,
    /// Known email addresses, order-preserving and duplicate-free
    pub emails: Vec<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub home_page: Option<String>,
    /// Provider name mapped to the provider-assigned subject identifier.
    /// At most one entry per provider; relinking the same provider overwrites.
    pub providers: HashMap<String, String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl User {
    /// Create a new non-anonymous user with the given id and emails
    pub fn new(id: String, emails: Vec<String>) -> Self {
        let now = Utc::now();
        Self {
            id,
            anonymous: false,
            emails,
            first_name: None,
            last_name: None,
            home_page: None,
            providers: HashMap::new(),
            created_at: now,
            updated_at: now,
        }
    }

    /// Record the link to an external provider identity
    pub fn link_provider(&mut self, provider: &str, subject_id: &str) {
        self.providers
            .insert(provider.to_string(), subject_id.to_string());
        self.updated_at = Utc::now();
    }

    pub fn has_email(&self, email: &str) -> bool {
        self.emails.iter().any(|e| e == email)
    }

    pub(crate) fn emails_json(&self) -> Result<String, UserError> {
        Ok(serde_json::to_string(&self.emails)?)
    }

    pub(crate) fn providers_json(&self) -> Result<String, UserError> {
        Ok(serde_json::to_string(&self.providers)?)
    }
}

/// Raw database row; the emails and providers columns hold JSON text
#[derive(Debug, Clone, FromRow)]
pub(crate) struct UserRow {
    pub(crate) id: String,
    pub(crate) anonymous: bool,
    pub(crate) emails: String,
    pub(crate) first_name: Option<String>,
    pub(crate) last_name: Option<String>,
    pub(crate) home_page: Option<String>,
    pub(crate) providers: String,
    pub(crate) created_at: DateTime<Utc>,
    pub(crate) updated_at: DateTime<Utc>,
}

impl TryFrom<UserRow> for User {
    type Error = UserError;

    fn try_from(row: UserRow) -> Result<Self, Self::Error> {
        Ok(User {
            id: row.id,
            anonymous: row.anonymous,
            emails: serde_json::from_str(&row.emails)?,
            first_name: row.first_name,
            last_name: row.last_name,
            home_page: row.home_page,
            providers: serde_json::from_str(&row.providers)?,
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;
    use proptest::prelude::*;

    /// Test that a new user has the expected defaults and fresh timestamps
    #[test]
    fn test_user_new() {
        // Given an id and a set of emails
        let id = "user123".to_string();
        let emails = vec!["a@example.com".to_string(), "b@example.com".to_string()];

        // When creating a new user
        let user = User::new(id.clone(), emails.clone());

        // Then the user should have the correct properties
        assert_eq!(user.id, id);
        assert_eq!(user.emails, emails);
        assert!(!user.anonymous);
        assert!(user.providers.is_empty());
        assert!(user.first_name.is_none());
        assert!(user.last_name.is_none());
        assert!(user.home_page.is_none());

        // And created_at and updated_at should be within the last second
        let one_second_ago = Utc::now() - Duration::seconds(1);
        assert!(user.created_at > one_second_ago);
        assert_eq!(user.created_at, user.updated_at);
    }

    /// Linking two different providers keeps both entries
    #[test]
    fn test_link_provider_preserves_other_providers() {
        // Given a user linked to google
        let mut user = User::new("user123".to_string(), vec!["a@example.com".to_string()]);
        user.link_provider("google", "google-sub-1");

        // When linking facebook as well
        user.link_provider("facebook", "fb-sub-1");

        // Then both providers are present
        assert_eq!(user.providers.len(), 2);
        assert_eq!(user.providers.get("google").map(String::as_str), Some("google-sub-1"));
        assert_eq!(user.providers.get("facebook").map(String::as_str), Some("fb-sub-1"));
    }

    /// Relinking the same provider overwrites the previous subject id
    #[test]
    fn test_link_provider_same_provider_overwrites() {
        // Given a user linked to google
        let mut user = User::new("user123".to_string(), vec!["a@example.com".to_string()]);
        user.link_provider("google", "google-sub-1");

        // When linking google again with a different subject id
        user.link_provider("google", "google-sub-2");

        // Then only the newer subject id remains
        assert_eq!(user.providers.len(), 1);
        assert_eq!(user.providers.get("google").map(String::as_str), Some("google-sub-2"));
    }

    #[test]
    fn test_has_email() {
        let user = User::new("u".to_string(), vec!["a@example.com".to_string()]);

        assert!(user.has_email("a@example.com"));
        assert!(!user.has_email("b@example.com"));
    }

    /// Round trip through the database row representation
    #[test]
    fn test_user_row_round_trip() {
        // Given a user with providers and emails
        let mut user = User::new(
            "user123".to_string(),
            vec!["a@example.com".to_string(), "b@example.com".to_string()],
        );
        user.first_name = Some("Ada".to_string());
        user.last_name = Some("Lovelace".to_string());
        user.home_page = Some("https://example.com/ada".to_string());
        user.link_provider("google", "g1");

        // When converting to a row and back
        let row = UserRow {
            id: user.id.clone(),
            anonymous: user.anonymous,
            emails: user.emails_json().unwrap(),
            first_name: user.first_name.clone(),
            last_name: user.last_name.clone(),
            home_page: user.home_page.clone(),
            providers: user.providers_json().unwrap(),
            created_at: user.created_at,
            updated_at: user.updated_at,
        };
        let restored = User::try_from(row).expect("row conversion failed");

        // Then the user survives unchanged
        assert_eq!(restored, user);
    }

    /// A row with malformed JSON columns fails with InvalidData
    #[test]
    fn test_user_row_invalid_json() {
        let row = UserRow {
            id: "user123".to_string(),
            anonymous: false,
            emails: "not json".to_string(),
            first_name: None,
            last_name: None,
            home_page: None,
            providers: "{}".to_string(),
            created_at: Utc::now(),
            updated_at: Utc::now(),
        };

        assert!(matches!(
            User::try_from(row),
            Err(UserError::InvalidData(_))
        ));
    }

    proptest! {
        /// Any valid User serializes and deserializes without loss
        #[test]
        fn test_user_serde_roundtrip(
            id in "[a-zA-Z0-9_-]{1,64}",
            emails in proptest::collection::vec(
                "[a-z0-9.]{1,16}@[a-z0-9]{1,16}\\.[a-z]{2,8}", 0..4),
            first_name in proptest::option::of("[A-Za-z]{1,32}"),
            anonymous in proptest::bool::ANY,
        ) {
            let now = Utc::now();
            let user = User {
                id,
                anonymous,
                emails,
                first_name,
                last_name: None,
                home_page: None,
                providers: HashMap::new(),
                created_at: now,
                updated_at: now,
            };

            let serialized = serde_json::to_string(&user).expect("Failed to serialize");
            let deserialized: User = serde_json::from_str(&serialized).expect("Failed to deserialize");

            prop_assert_eq!(user.id, deserialized.id);
            prop_assert_eq!(user.anonymous, deserialized.anonymous);
            prop_assert_eq!(user.emails, deserialized.emails);
            prop_assert_eq!(user.first_name, deserialized.first_name);
        }
    }
}
