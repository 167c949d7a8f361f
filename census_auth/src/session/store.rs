//! Session user passthrough.
//!
//! Contract: store exactly what identity resolution returned; no
//! transformation on the way in or out.

use crate::storage::{CacheData, GENERIC_CACHE_STORE};
use crate::userdb::User;

use super::config::SESSION_USER_TTL;
use super::errors::SessionError;

const SESSION_USER_PREFIX: &str = "session_user";

pub struct SessionStore;

impl SessionStore {
    /// Persist the resolved user verbatim under the session id
    pub async fn persist_user(session_id: &str, user: &User) -> Result<(), SessionError> {
        let mut store = GENERIC_CACHE_STORE.lock().await;
        let value = serde_json::to_string(user)?;
        store
            .put_with_ttl(
                SESSION_USER_PREFIX,
                session_id,
                CacheData { value },
                *SESSION_USER_TTL,
            )
            .await?;
        Ok(())
    }

    /// Load the user stored for this session, exactly as persisted
    pub async fn load_user(session_id: &str) -> Result<Option<User>, SessionError> {
        let store = GENERIC_CACHE_STORE.lock().await;
        match store.get(SESSION_USER_PREFIX, session_id).await? {
            Some(data) => Ok(Some(serde_json::from_str(&data.value)?)),
            None => Ok(None),
        }
    }

    pub async fn clear(session_id: &str) -> Result<(), SessionError> {
        let mut store = GENERIC_CACHE_STORE.lock().await;
        store.remove(SESSION_USER_PREFIX, session_id).await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::init_test_environment;
    use serial_test::serial;

    fn unique_session() -> String {
        format!("session-store-test-{}", uuid::Uuid::new_v4())
    }

    #[tokio::test]
    #[serial]
    async fn test_passthrough_round_trip() {
        init_test_environment().await;

        // Given a resolved user
        let session_id = unique_session();
        let mut user = User::new(
            uuid::Uuid::new_v4().to_string(),
            vec!["session@example.com".to_string()],
        );
        user.first_name = Some("Ada".to_string());
        user.link_provider("google", "g-42");

        // When persisting and loading it
        SessionStore::persist_user(&session_id, &user)
            .await
            .expect("persist failed");
        let loaded = SessionStore::load_user(&session_id)
            .await
            .expect("load failed")
            .expect("user should be present");

        // Then the stored value is exactly what resolution returned
        assert_eq!(loaded, user);
    }

    #[tokio::test]
    #[serial]
    async fn test_load_missing_session_returns_none() {
        init_test_environment().await;

        let loaded = SessionStore::load_user(&unique_session())
            .await
            .expect("load failed");

        assert!(loaded.is_none());
    }

    #[tokio::test]
    #[serial]
    async fn test_clear_removes_user() {
        init_test_environment().await;

        let session_id = unique_session();
        let user = User::new(uuid::Uuid::new_v4().to_string(), vec![]);
        SessionStore::persist_user(&session_id, &user)
            .await
            .expect("persist failed");

        SessionStore::clear(&session_id).await.expect("clear failed");

        let loaded = SessionStore::load_user(&session_id)
            .await
            .expect("load failed");
        assert!(loaded.is_none());
    }
}
