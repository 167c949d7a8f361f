use thiserror::Error;

#[derive(Clone, Error, Debug)]
pub enum UserError {
    #[error("User not found")]
    NotFound,

    #[error("Storage error: {0}")]
    Storage(String),

    #[error("Invalid data: {0}")]
    InvalidData(String),
}

impl From<serde_json::Error> for UserError {
    fn from(err: serde_json::Error) -> Self {
        UserError::InvalidData(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_serde_json_error() {
        // Create a serde_json::Error
        let json_error = serde_json::from_str::<serde_json::Value>("invalid json").unwrap_err();

        // Convert to UserError
        let user_error = UserError::from(json_error);

        // Verify it's the correct variant
        match user_error {
            UserError::InvalidData(msg) => {
                assert!(
                    msg.contains("expected value"),
                    "Error message should contain the original error"
                );
            }
            _ => panic!("Expected InvalidData variant"),
        }
    }

    /// Test error propagation through the ? operator
    #[test]
    fn test_error_propagation() {
        fn validate_user_data(id: &str) -> Result<(), UserError> {
            if id.is_empty() {
                return Err(UserError::InvalidData(
                    "User ID cannot be empty".to_string(),
                ));
            }
            Ok(())
        }

        fn process_user(id: &str) -> Result<String, UserError> {
            validate_user_data(id)?;
            Ok(format!("Processed user {id}"))
        }

        assert!(process_user("user123").is_ok());
        assert!(matches!(
            process_user(""),
            Err(UserError::InvalidData(_))
        ));
    }

    #[test]
    fn test_not_found_display() {
        // Given the NotFound variant
        let error = UserError::NotFound;

        // Then it formats as expected
        assert_eq!(error.to_string(), "User not found");
    }
}
