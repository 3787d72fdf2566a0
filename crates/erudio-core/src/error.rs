//! Unified error types for all layers of the application.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt::Debug;
use thiserror::Error;

/// Failure to convert between an entity and one of its representations.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum MappingError {
    /// A non-nullable field declared by the representation version was absent.
    #[error("{entity} {version} representation is missing required field '{field}'")]
    MissingField {
        entity: &'static str,
        version: &'static str,
        field: &'static str,
    },

    /// The identifier was required but absent.
    #[error("{entity} {version} representation is missing its identifier")]
    MissingIdentifier {
        entity: &'static str,
        version: &'static str,
    },
}

/// Unified error type for all layers of Erudio.
#[derive(Error, Debug)]
pub enum ErudioError {
    // ============ Domain Errors ============
    /// Resource not found
    #[error("No records found for this ID! ({resource_type} {id})")]
    NotFound {
        resource_type: &'static str,
        id: String,
    },

    /// The caller supplied an empty body to create or update.
    #[error("It is not allowed to persist a null object!")]
    RequiredObjectIsNull,

    /// Representation and entity schemas do not line up.
    #[error("Mapping error: {0}")]
    Mapping(#[from] MappingError),

    /// A page request asked for zero items per page.
    #[error("Invalid page size: {0}; page size must be at least 1")]
    InvalidPageSize(usize),

    /// Validation error
    #[error("Validation error: {0}")]
    Validation(String),

    /// Conflict error (e.g., duplicate entry)
    #[error("Conflict: {0}")]
    Conflict(String),

    /// The request body is not JSON, XML or YAML.
    #[error("Unsupported media type: {0}")]
    UnsupportedMediaType(String),

    /// No format listed in `Accept` can be produced.
    #[error("Not acceptable: {0}")]
    NotAcceptable(String),

    // ============ Authentication/Authorization Errors ============
    /// Unauthorized access
    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    /// Forbidden access
    #[error("Forbidden: {0}")]
    Forbidden(String),

    /// Invalid token
    #[error("Invalid token: {0}")]
    InvalidToken(String),

    /// Token expired
    #[error("Token expired")]
    TokenExpired,

    /// Invalid credentials
    #[error("Invalid username/password supplied!")]
    InvalidCredentials,

    // ============ Infrastructure Errors ============
    /// Database error
    #[error("Database error: {0}")]
    Database(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Body could not be encoded or decoded.
    #[error("Serialization error: {0}")]
    Serialization(String),

    // ============ Internal Errors ============
    /// Internal error
    #[error("Internal error: {0}")]
    Internal(String),

    /// Generic error wrapper
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl ErudioError {
    /// Returns the HTTP status code for this error.
    #[must_use]
    pub const fn status_code(&self) -> u16 {
        match self {
            Self::NotFound { .. } => 404,
            Self::RequiredObjectIsNull
            | Self::Mapping(_)
            | Self::InvalidPageSize(_)
            | Self::Validation(_) => 400,
            Self::Conflict(_) => 409,
            Self::NotAcceptable(_) => 406,
            Self::UnsupportedMediaType(_) => 415,
            Self::Unauthorized(_) | Self::InvalidToken(_) | Self::TokenExpired | Self::InvalidCredentials => 401,
            Self::Forbidden(_) => 403,
            Self::Database(_)
            | Self::Configuration(_)
            | Self::Serialization(_)
            | Self::Internal(_)
            | Self::Other(_) => 500,
        }
    }

    /// Returns a machine-readable error code.
    #[must_use]
    pub const fn error_code(&self) -> &'static str {
        match self {
            Self::NotFound { .. } => "NOT_FOUND",
            Self::RequiredObjectIsNull => "REQUIRED_OBJECT_IS_NULL",
            Self::Mapping(_) => "MAPPING_ERROR",
            Self::InvalidPageSize(_) => "INVALID_PAGE_SIZE",
            Self::Validation(_) => "VALIDATION_ERROR",
            Self::Conflict(_) => "CONFLICT",
            Self::UnsupportedMediaType(_) => "UNSUPPORTED_MEDIA_TYPE",
            Self::NotAcceptable(_) => "NOT_ACCEPTABLE",
            Self::Unauthorized(_) => "UNAUTHORIZED",
            Self::Forbidden(_) => "FORBIDDEN",
            Self::InvalidToken(_) => "INVALID_TOKEN",
            Self::TokenExpired => "TOKEN_EXPIRED",
            Self::InvalidCredentials => "INVALID_CREDENTIALS",
            Self::Database(_) => "DATABASE_ERROR",
            Self::Configuration(_) => "CONFIGURATION_ERROR",
            Self::Serialization(_) => "SERIALIZATION_ERROR",
            Self::Internal(_) | Self::Other(_) => "INTERNAL_ERROR",
        }
    }

    /// Creates a not found error for a resource.
    #[must_use]
    pub fn not_found<T: ToString>(resource_type: &'static str, id: T) -> Self {
        Self::NotFound {
            resource_type,
            id: id.to_string(),
        }
    }

    /// Creates a validation error.
    #[must_use]
    pub fn validation<T: Into<String>>(message: T) -> Self {
        Self::Validation(message.into())
    }

    /// Creates an unauthorized error.
    #[must_use]
    pub fn unauthorized<T: Into<String>>(message: T) -> Self {
        Self::Unauthorized(message.into())
    }

    /// Creates a forbidden error.
    #[must_use]
    pub fn forbidden<T: Into<String>>(message: T) -> Self {
        Self::Forbidden(message.into())
    }

    /// Creates an internal error.
    #[must_use]
    pub fn internal<T: Into<String>>(message: T) -> Self {
        Self::Internal(message.into())
    }
}

#[cfg(feature = "sqlx")]
impl From<sqlx::Error> for ErudioError {
    fn from(err: sqlx::Error) -> Self {
        match &err {
            sqlx::Error::RowNotFound => Self::NotFound {
                resource_type: "database_row",
                id: "unknown".to_string(),
            },
            sqlx::Error::Database(db_err) => {
                if let Some(code) = db_err.code() {
                    // MySQL duplicate entry / PostgreSQL unique violation
                    if code == "23000" || code == "1062" || code == "23505" {
                        return Self::Conflict(db_err.message().to_string());
                    }
                }
                Self::Database(err.to_string())
            }
            _ => Self::Database(err.to_string()),
        }
    }
}

impl From<serde_json::Error> for ErudioError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serialization(format!("JSON: {}", err))
    }
}

/// Serializable error body returned by every failing endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(rename_all = "camelCase")]
pub struct ErrorResponse {
    /// When the error was produced
    pub timestamp: DateTime<Utc>,
    /// Machine-readable error code
    pub code: String,
    /// Human-readable error message
    pub message: String,
    /// Request path or other context
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

impl ErrorResponse {
    /// Creates a new error response from an `ErudioError`.
    #[must_use]
    pub fn from_error(error: &ErudioError) -> Self {
        Self {
            timestamp: Utc::now(),
            code: error.error_code().to_string(),
            message: error.to_string(),
            details: None,
        }
    }

    /// Sets the request context (usually the path).
    #[must_use]
    pub fn with_details(mut self, details: impl Into<String>) -> Self {
        self.details = Some(details.into());
        self
    }
}
