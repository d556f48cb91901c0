use thiserror::Error;

#[derive(Error, Debug)]
pub enum CabinetError {
    #[error("Resource not found: {0}")]
    NotFound(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Action refused: {0}")]
    Refusal(String),

    #[error("Authentication error: {0}")]
    Authentication(String),

    #[error("Authorization error: {0}")]
    Authorization(String),

    #[error("Database error: {0}")]
    Database(#[from] eyre::Report),

    #[error("Internal server error: {0}")]
    Internal(#[from] Box<dyn std::error::Error + Send + Sync>),
}

impl CabinetError {
    /// Message safe to show to an admin. Storage and internal failures are
    /// collapsed into a generic message; their detail only goes to the logs.
    pub fn public_message(&self) -> String {
        match self {
            CabinetError::Database(_) | CabinetError::Internal(_) => {
                "Operation failed".to_string()
            }
            other => other.to_string(),
        }
    }
}

pub type CabinetResult<T> = Result<T, CabinetError>;
