//! One-shot flash messages.
//!
//! Each message is visible exactly once: it is stored by the request that
//! sets it and consumed by the next request that renders.

use crate::storage::{CacheData, GENERIC_CACHE_STORE};

use super::config::FLASH_TTL;
use super::errors::SessionError;

const FLASH_PREFIX: &str = "flash";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FlashKind {
    Error,
    Info,
}

impl FlashKind {
    pub fn as_str(self) -> &'static str {
        match self {
            FlashKind::Error => "error",
            FlashKind::Info => "info",
        }
    }
}

pub struct FlashStore;

impl FlashStore {
    fn make_key(session_id: &str, kind: FlashKind) -> String {
        format!("{session_id}:{}", kind.as_str())
    }

    /// Append a message to the session's flash queue for the given category
    pub async fn push(
        session_id: &str,
        kind: FlashKind,
        message: &str,
    ) -> Result<(), SessionError> {
        let mut store = GENERIC_CACHE_STORE.lock().await;
        let key = Self::make_key(session_id, kind);

        let mut messages: Vec<String> = match store.get(FLASH_PREFIX, &key).await? {
            Some(data) => serde_json::from_str(&data.value)?,
            None => Vec::new(),
        };
        messages.push(message.to_string());

        let value = serde_json::to_string(&messages)?;
        store
            .put_with_ttl(FLASH_PREFIX, &key, CacheData { value }, *FLASH_TTL)
            .await?;
        Ok(())
    }

    /// Read and clear the session's flash queue for the given category.
    /// Returns the messages in the order they were pushed.
    pub async fn take(session_id: &str, kind: FlashKind) -> Result<Vec<String>, SessionError> {
        let mut store = GENERIC_CACHE_STORE.lock().await;
        let key = Self::make_key(session_id, kind);

        match store.get(FLASH_PREFIX, &key).await? {
            Some(data) => {
                store.remove(FLASH_PREFIX, &key).await?;
                Ok(serde_json::from_str(&data.value)?)
            }
            None => Ok(Vec::new()),
        }
    }
}
