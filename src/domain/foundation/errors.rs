//! Error types for the domain layer.

use std::collections::HashMap;
use std::error::Error;
use std::fmt;
use thiserror::Error;

/// Errors raised when input fails validation.
///
/// Each variant is a distinct failure mode so callers can react to the
/// specific precondition that was violated.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValidationError {
    #[error("Field '{field}' cannot be empty")]
    EmptyField { field: String },

    #[error("Field '{field}' must be {max} characters or less, got {actual}")]
    TooLong {
        field: String,
        max: usize,
        actual: usize,
    },

    #[error("Field '{field}' must be a finite number")]
    NotFinite { field: String },

    #[error("Field '{field}' must be positive, got {value}")]
    NotPositive { field: String, value: f64 },

    #[error("Field '{field}' must not exceed {max}, got {actual}")]
    AboveLimit { field: String, max: f64, actual: f64 },

    #[error("Cannot consume {requested}g, only {remaining}g remaining")]
    ExceedsRemaining { requested: f64, remaining: f64 },

    #[error("Recipe is already fully consumed")]
    AlreadyConsumed,

    #[error("Recipe must have at least one ingredient")]
    NoIngredients,

    #[error("Recipe total weight must be positive, got {total}")]
    InvalidTotalWeight { total: f64 },

    #[error("Recipe total weight {recorded}g does not match ingredient sum {computed}g")]
    InconsistentTotal { recorded: f64, computed: f64 },

    #[error("Field '{field}' has invalid format: {reason}")]
    InvalidFormat { field: String, reason: String },
}

impl ValidationError {
    /// Creates an empty field validation error.
    pub fn empty_field(field: impl Into<String>) -> Self {
        ValidationError::EmptyField { field: field.into() }
    }

    /// Creates a too-long validation error.
    pub fn too_long(field: impl Into<String>, max: usize, actual: usize) -> Self {
        ValidationError::TooLong {
            field: field.into(),
            max,
            actual,
        }
    }

    pub fn not_finite(field: impl Into<String>) -> Self {
        ValidationError::NotFinite { field: field.into() }
    }

    pub fn not_positive(field: impl Into<String>, value: f64) -> Self {
        ValidationError::NotPositive {
            field: field.into(),
            value,
        }
    }

    pub fn above_limit(field: impl Into<String>, max: f64, actual: f64) -> Self {
        ValidationError::AboveLimit {
            field: field.into(),
            max,
            actual,
        }
    }

    /// Creates an invalid format validation error.
    pub fn invalid_format(field: impl Into<String>, reason: impl Into<String>) -> Self {
        ValidationError::InvalidFormat {
            field: field.into(),
            reason: reason.into(),
        }
    }

    /// Returns the field name the error refers to, when there is one.
    pub fn field(&self) -> Option<&str> {
        match self {
            ValidationError::EmptyField { field }
            | ValidationError::TooLong { field, .. }
            | ValidationError::NotFinite { field }
            | ValidationError::NotPositive { field, .. }
            | ValidationError::AboveLimit { field, .. }
            | ValidationError::InvalidFormat { field, .. } => Some(field),
            _ => None,
        }
    }
}

/// Stable codes callers can match on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    // Validation errors
    ValidationFailed,

    // Not found errors
    RecipeNotFound,
    IngredientNotFound,

    // Conflict errors
    DuplicateRecipeName,
    DuplicateIngredientName,

    // Infrastructure errors
    StorageError,
    InternalError,
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            ErrorCode::ValidationFailed => "VALIDATION_FAILED",
            ErrorCode::RecipeNotFound => "RECIPE_NOT_FOUND",
            ErrorCode::IngredientNotFound => "INGREDIENT_NOT_FOUND",
            ErrorCode::DuplicateRecipeName => "DUPLICATE_RECIPE_NAME",
            ErrorCode::DuplicateIngredientName => "DUPLICATE_INGREDIENT_NAME",
            ErrorCode::StorageError => "STORAGE_ERROR",
            ErrorCode::InternalError => "INTERNAL_ERROR",
        };
        write!(f, "{}", s)
    }
}

/// Caller-facing error with a stable code and optional key/value details.
#[derive(Debug, Clone)]
pub struct DomainError {
    pub code: ErrorCode,
    pub message: String,
    pub details: HashMap<String, String>,
}

impl DomainError {
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            details: HashMap::new(),
        }
    }

    /// Attaches a detail such as the offending field or recipe id.
    pub fn with_detail(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.details.insert(key.into(), value.into());
        self
    }

    /// True for errors the caller can fix by correcting input.
    pub fn is_recoverable(&self) -> bool {
        !matches!(self.code, ErrorCode::StorageError | ErrorCode::InternalError)
    }
}

impl fmt::Display for DomainError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}", self.code, self.message)
    }
}

impl Error for DomainError {}

impl From<ValidationError> for DomainError {
    fn from(err: ValidationError) -> Self {
        let field = err.field().map(str::to_string);
        let domain = DomainError::new(ErrorCode::ValidationFailed, err.to_string());
        match field {
            Some(field) => domain.with_detail("field", field),
            None => domain,
        }
    }
}
