//! Application layer errors.
//!
//! These errors represent failures in orchestration and in the adapters
//! behind the ports, not validation. Validation errors are `DomainError`
//! from `crate::domain`.

use std::path::PathBuf;
use thiserror::Error;

use crate::error::ErrorCategory;

/// Errors that occur during application orchestration.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ApplicationError {
    /// The template renderer rejected a call.
    #[error("Template '{template}' rendering failed: {reason}")]
    RenderingFailed { template: String, reason: String },

    /// No template with this name is available.
    #[error("Template not found: {name}")]
    TemplateNotFound { name: String },

    /// An intent or fabric document could not be read or parsed.
    #[error("Failed to load {path}: {reason}")]
    DocumentLoad { path: PathBuf, reason: String },

    /// Rendered configuration could not be applied.
    #[error("Failed to apply configuration for '{device}': {reason}")]
    ApplyFailed { device: String, reason: String },

    /// Shared adapter state is unusable (lock poisoned).
    #[error("{resource} lock poisoned")]
    LockPoisoned { resource: &'static str },

    /// No service is registered under this service point.
    #[error("Unknown service point: {name}")]
    UnknownServicePoint { name: String },
}

impl ApplicationError {
    /// Get user-actionable suggestions.
    pub fn suggestions(&self) -> Vec<String> {
        match self {
            Self::RenderingFailed { template, .. } => vec![
                format!("Check the '{}' template for unbound variables", template),
                "Run with --dry-run to inspect the variable bindings".into(),
            ],
            Self::TemplateNotFound { name } => vec![
                format!("No template named '{}'", name),
                "Try: vxlan templates to see available templates".into(),
                "Or point --templates at a directory containing <name>.tmpl".into(),
            ],
            Self::DocumentLoad { path, .. } => vec![
                format!("Check that {} exists and is valid JSON or TOML", path.display()),
            ],
            Self::ApplyFailed { .. } => vec![
                "Check that the output directory is writable".into(),
            ],
            Self::LockPoisoned { .. } => vec![
                "A previous operation panicked while holding shared state".into(),
                "Restart the process and try again".into(),
            ],
            Self::UnknownServicePoint { .. } => vec![
                "Registered service points: vxlan-l2-servicepoint, vxlan-l3-servicepoint".into(),
            ],
        }
    }

    /// Get error category.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::TemplateNotFound { .. } | Self::UnknownServicePoint { .. } => {
                ErrorCategory::NotFound
            }
            Self::DocumentLoad { .. } => ErrorCategory::Configuration,
            Self::RenderingFailed { .. } | Self::ApplyFailed { .. } | Self::LockPoisoned { .. } => {
                ErrorCategory::Internal
            }
        }
    }
}
