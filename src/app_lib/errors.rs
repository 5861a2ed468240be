use thiserror::Error;

/// A single client-side validation failure, keyed by form field.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FieldError {
    pub field: &'static str,
    pub message: String,
}

impl FieldError {
    #[must_use]
    pub fn new(field: &'static str, message: impl Into<String>) -> Self {
        Self {
            field,
            message: message.into(),
        }
    }
}

#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum AppError {
    #[error("Config error: {0}")]
    Config(String),
    #[error("Network error: {0}")]
    Network(String),
    #[error("Timeout: {0}")]
    Timeout(String),
    #[error("Request failed ({status}): {message}")]
    Http { status: u16, message: String },
    #[error("Response error: {0}")]
    Parse(String),
    #[error("Request error: {0}")]
    Serialization(String),
    #[error("Storage error: {0}")]
    Storage(String),
    #[error("{0}")]
    InvalidCredentials(String),
    #[error("Not authorized as Officer")]
    UnauthorizedRole,
    #[error("Validation failed: {}", summarize(.0))]
    Validation(Vec<FieldError>),
}

impl AppError {
    /// HTTP status carried by the error, if it came from a response.
    #[must_use]
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Http { status, .. } => Some(*status),
            _ => None,
        }
    }

    #[must_use]
    pub fn is_unauthorized(&self) -> bool {
        self.status() == Some(401)
    }

    /// Login failures the caller should present as "cannot sign in".
    #[must_use]
    pub fn is_login_rejection(&self) -> bool {
        matches!(self, Self::InvalidCredentials(_) | Self::UnauthorizedRole)
    }
}

fn summarize(errors: &[FieldError]) -> String {
    errors
        .iter()
        .map(|error| format!("{}: {}", error.field, error.message))
        .collect::<Vec<_>>()
        .join("; ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unauthorized_role_message() {
        assert_eq!(
            AppError::UnauthorizedRole.to_string(),
            "Not authorized as Officer"
        );
    }

    #[test]
    fn http_status_helpers() {
        let err = AppError::Http {
            status: 401,
            message: "Token expired".to_string(),
        };
        assert!(err.is_unauthorized());
        assert_eq!(err.status(), Some(401));
        assert_eq!(err.to_string(), "Request failed (401): Token expired");

        let err = AppError::Network("down".to_string());
        assert!(!err.is_unauthorized());
        assert_eq!(err.status(), None);
    }

    #[test]
    fn login_rejections() {
        assert!(AppError::UnauthorizedRole.is_login_rejection());
        assert!(AppError::InvalidCredentials("bad".to_string()).is_login_rejection());
        assert!(!AppError::Timeout("slow".to_string()).is_login_rejection());
    }

    #[test]
    fn validation_lists_every_field() {
        let err = AppError::Validation(vec![
            FieldError::new("nic", "NIC is required."),
            FieldError::new("password", "Password must be at least 8 characters."),
        ]);
        assert_eq!(
            err.to_string(),
            "Validation failed: nic: NIC is required.; password: Password must be at least 8 characters."
        );
    }
}
