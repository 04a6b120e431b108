//! The error type returned across the core's public API.
//!
//! [`VxlanError`] separates validation failures, which the lifecycle wrapper
//! turns into a failed ready milestone, from failures behind a port, which
//! abort the operation.

use thiserror::Error;

use crate::application::ApplicationError;
use crate::domain::{self, DomainError};

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum VxlanError {
    /// The intent does not fit the fabric.
    #[error("Validation error: {0}")]
    Domain(#[from] DomainError),

    /// A port (renderer, template store, plan tracker, loader) failed.
    #[error("Application error: {0}")]
    Application(#[from] ApplicationError),

    /// Broken invariant inside the crate or one of its adapters.
    #[error("Internal error: {message}")]
    Internal { message: String },
}

impl VxlanError {
    pub fn suggestions(&self) -> Vec<String> {
        match self {
            Self::Domain(e) => e.suggestions(),
            Self::Application(e) => e.suggestions(),
            Self::Internal { .. } => vec![
                "Re-run with -vvv and keep the log".into(),
                "File a bug with the intent and fabric documents attached".into(),
            ],
        }
    }

    /// Coarse classification the CLI maps onto exit codes.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::Domain(e) => e.category().into(),
            Self::Application(e) => e.category(),
            Self::Internal { .. } => ErrorCategory::Internal,
        }
    }

    /// `true` for errors the lifecycle wrapper absorbs.
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::Domain(_))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Validation,
    NotFound,
    Configuration,
    Internal,
}

impl From<domain::ErrorCategory> for ErrorCategory {
    fn from(category: domain::ErrorCategory) -> Self {
        match category {
            domain::ErrorCategory::Validation => Self::Validation,
            domain::ErrorCategory::NotFound => Self::NotFound,
        }
    }
}

pub type VxlanResult<T> = Result<T, VxlanError>;
