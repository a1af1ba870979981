use shared::error::ErrorCode;
use thiserror::Error;

/// Failure reported by a [`crate::BillsStore`] operation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoreError {
    #[error("store rejected request ({status}): {message}")]
    Rejected {
        status: u16,
        code: ErrorCode,
        message: String,
    },
    #[error("store transport failure: {0}")]
    Transport(String),
    #[error("invalid store response: {0}")]
    Decode(String),
    #[error("{0}")]
    Opaque(String),
}

impl StoreError {
    pub fn opaque(reason: impl Into<String>) -> Self {
        StoreError::Opaque(reason.into())
    }

    pub fn rejected(status: u16, message: impl Into<String>) -> Self {
        StoreError::Rejected {
            status,
            code: ErrorCode::from_status(status),
            message: message.into(),
        }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            StoreError::Rejected {
                code: ErrorCode::NotFound,
                ..
            }
        )
    }
}

impl From<reqwest::Error> for StoreError {
    fn from(err: reqwest::Error) -> Self {
        if let Some(status) = err.status() {
            StoreError::rejected(status.as_u16(), err.to_string())
        } else if err.is_decode() {
            StoreError::Decode(err.to_string())
        } else {
            StoreError::Transport(err.to_string())
        }
    }
}
