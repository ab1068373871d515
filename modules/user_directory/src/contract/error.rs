use thiserror::Error;

/// Errors that are safe to expose to other modules
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum UserDirectoryError {
    #[error("User not found: {id}")]
    NotFound { id: i32 },

    #[error("No users found")]
    NoMatches,

    #[error("User '{full_name}' already exists")]
    Conflict { full_name: String },

    #[error("Validation error: {message}")]
    Validation { message: String },

    #[error("Upstream services unavailable")]
    UpstreamUnavailable,

    #[error("Internal error")]
    Internal,
}

impl UserDirectoryError {
    pub fn not_found(id: i32) -> Self {
        Self::NotFound { id }
    }

    pub fn conflict(full_name: impl Into<String>) -> Self {
        Self::Conflict {
            full_name: full_name.into(),
        }
    }

    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation {
            message: message.into(),
        }
    }

    pub fn internal() -> Self {
        Self::Internal
    }
}

impl From<crate::domain::error::DomainError> for UserDirectoryError {
    fn from(domain_error: crate::domain::error::DomainError) -> Self {
        use crate::domain::error::DomainError::*;
        match domain_error {
            UserNotFound { id } => Self::not_found(id),
            NoUsersFound => Self::NoMatches,
            FullNameTaken {
                name,
                surname,
                patronymic,
            } => Self::conflict(format!("{name} {surname} {patronymic}")),
            Validation { field, message } => Self::validation(format!("{field}: {message}")),
            PageOutOfRange { page, total_pages } => Self::validation(format!(
                "page {page} exceeds available pages ({total_pages})"
            )),
            UpstreamUnavailable { .. } => Self::UpstreamUnavailable,
            Database { .. } => Self::internal(),
        }
    }
}
