use thiserror::Error;

use crate::storage::StorageError;

#[derive(Debug, Error, Clone)]
pub enum SessionError {
    #[error("Storage error: {0}")]
    Storage(String),

    #[error("Serialization error: {0}")]
    Serde(String),
}

impl From<StorageError> for SessionError {
    fn from(err: StorageError) -> Self {
        match err {
            StorageError::Storage(msg) => SessionError::Storage(msg),
            StorageError::Serde(msg) => SessionError::Serde(msg),
        }
    }
}

impl From<serde_json::Error> for SessionError {
    fn from(err: serde_json::Error) -> Self {
        SessionError::Serde(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_storage_error() {
        // Given a storage-layer error
        let storage_error = StorageError::Storage("redis down".to_string());

        // When converting to SessionError
        let session_error = SessionError::from(storage_error);

        // Then it maps onto the Storage variant
        match session_error {
            SessionError::Storage(msg) => assert!(msg.contains("redis down")),
            _ => panic!("Expected Storage variant"),
        }
    }

    #[test]
    fn test_from_serde_error() {
        let serde_error = serde_json::from_str::<serde_json::Value>("invalid").unwrap_err();

        let session_error = SessionError::from(serde_error);

        assert!(matches!(session_error, SessionError::Serde(_)));
    }
}
