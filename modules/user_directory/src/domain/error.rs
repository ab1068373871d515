use thiserror::Error;

/// Domain-specific errors using thiserror
#[derive(Error, Debug)]
pub enum DomainError {
    #[error("User not found: {id}")]
    UserNotFound { id: i32 },

    #[error("User '{name} {surname} {patronymic}' already exists")]
    FullNameTaken {
        name: String,
        surname: String,
        patronymic: String,
    },

    #[error("Validation failed: {field}: {message}")]
    Validation { field: String, message: String },

    #[error("Enrichment failed: {message}")]
    UpstreamUnavailable { message: String },

    #[error("No users match the given filters")]
    NoUsersFound,

    #[error("Page {page} exceeds available pages ({total_pages})")]
    PageOutOfRange { page: u64, total_pages: u64 },

    #[error("Database error: {message}")]
    Database { message: String },
}

impl DomainError {
    pub fn user_not_found(id: i32) -> Self {
        Self::UserNotFound { id }
    }

    pub fn full_name_taken(
        name: impl Into<String>,
        surname: impl Into<String>,
        patronymic: impl Into<String>,
    ) -> Self {
        Self::FullNameTaken {
            name: name.into(),
            surname: surname.into(),
            patronymic: patronymic.into(),
        }
    }

    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Validation {
            field: field.into(),
            message: message.into(),
        }
    }

    pub fn upstream(message: impl Into<String>) -> Self {
        Self::UpstreamUnavailable {
            message: message.into(),
        }
    }

    pub fn page_out_of_range(page: u64, total_pages: u64) -> Self {
        Self::PageOutOfRange { page, total_pages }
    }

    pub fn database(message: impl Into<String>) -> Self {
        Self::Database {
            message: message.into(),
        }
    }
}
