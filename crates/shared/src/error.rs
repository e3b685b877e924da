use serde::{Deserialize, Serialize};

/// Failure classes surfaced to the user as notifications.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorCode {
    InvalidCredentials,
    DuplicateEmail,
    PasswordMismatch,
    Validation,
    Storage,
    Internal,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorReport {
    pub code: ErrorCode,
    pub message: String,
}

impl ErrorReport {
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
        }
    }

    /// Whether the user can fix this by editing the form they submitted.
    pub fn is_user_correctable(&self) -> bool {
        matches!(
            self.code,
            ErrorCode::InvalidCredentials
                | ErrorCode::DuplicateEmail
                | ErrorCode::PasswordMismatch
                | ErrorCode::Validation
        )
    }
}
