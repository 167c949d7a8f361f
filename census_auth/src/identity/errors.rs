use thiserror::Error;

use crate::userdb::UserError;

/// Errors surfaced while resolving a provider profile to a local user
#[derive(Debug, Error, Clone)]
pub enum IdentityError {
    /// Error from the user database operations
    #[error("User error: {0}")]
    User(#[from] UserError),
}
