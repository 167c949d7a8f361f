use thiserror::Error;

#[derive(Debug, Error, Clone)]
pub enum OAuth2Error {
    #[error("Unknown provider: {0}")]
    UnknownProvider(String),

    #[error("Provider misconfigured: {0}")]
    Misconfigured(String),
}
