use thiserror::Error;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Not Found")]
    NotFound,

    #[error("Bad Request {0}")]
    BadRequest(String),

    #[error("Authentication required")]
    Unauthenticated,

    #[error("Checkout rejected: {}", .0.join("; "))]
    CheckoutRejected(Vec<String>),

    #[error("Storage error")]
    Io(#[from] std::io::Error),

    #[error("Serialization error")]
    Serde(#[from] serde_json::Error),

    #[error("Internal error")]
    Internal(#[from] anyhow::Error),
}

pub type StoreResult<T> = Result<T, StoreError>;
