use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorCode {
    Unauthorized,
    Forbidden,
    NotFound,
    Validation,
    Internal,
}

impl ErrorCode {
    pub fn from_status(status: u16) -> Self {
        match status {
            401 => ErrorCode::Unauthorized,
            403 => ErrorCode::Forbidden,
            404 => ErrorCode::NotFound,
            400 | 422 => ErrorCode::Validation,
            _ => ErrorCode::Internal,
        }
    }
}

/// Error body returned by the bills service.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiError {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub code: Option<ErrorCode>,
    pub message: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ReceiptFileError {
    #[error("no receipt file selected")]
    Missing,
    #[error("invalid receipt file '{file_name}': only jpg, jpeg and png images are accepted")]
    InvalidExtension { file_name: String },
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BillFieldError {
    #[error("unknown expense type '{0}'")]
    ExpenseType(String),
    #[error("invalid amount '{0}'")]
    Amount(String),
    #[error("invalid date '{0}': expected YYYY-MM-DD")]
    Date(String),
    #[error("invalid VAT '{0}'")]
    Vat(String),
    #[error("invalid percentage '{0}'")]
    Pct(String),
}
