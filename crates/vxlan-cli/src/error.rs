//! [`CliError`]: everything a command can fail with, plus how each failure
//! is reported (message, causes, suggestions) and which exit status it maps to.

use std::error::Error;

use owo_colors::{OwoColorize, Style};
use thiserror::Error;

use vxlan_core::{domain::DomainError, error::VxlanError};

pub use vxlan_core::error::ErrorCategory as CoreCategory;

pub type CliResult<T> = Result<T, CliError>;

#[derive(Debug, Error)]
pub enum CliError {
    /// A required document was neither passed as a flag nor configured.
    #[error("No {what} given")]
    MissingInput {
        what: &'static str,
        flag: &'static str,
        key: &'static str,
    },

    /// Config file missing or malformed, unknown key, bad env override.
    #[error("Configuration error: {message}")]
    ConfigError {
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// Anything returned by `vxlan-core` or an adapter.
    #[error("{0}")]
    Core(#[from] VxlanError),

    /// The service was rejected and its ready milestone marked failed.
    #[error("Service '{service_id}' failed: {source}")]
    ServiceFailed {
        service_id: String,
        #[source]
        source: DomainError,
    },

    #[error("{message}")]
    IoError {
        message: String,
        #[source]
        source: std::io::Error,
    },
}

impl From<std::io::Error> for CliError {
    fn from(err: std::io::Error) -> Self {
        CliError::IoError {
            message: err.to_string(),
            source: err,
        }
    }
}

impl From<config::ConfigError> for CliError {
    fn from(err: config::ConfigError) -> Self {
        CliError::ConfigError {
            message: err.to_string(),
            source: Some(Box::new(err)),
        }
    }
}

impl CliError {
    /// Hints printed under the message.
    pub fn suggestions(&self) -> Vec<String> {
        match self {
            Self::MissingInput { what, flag, key } => vec![
                format!("Pass the {} with {} FILE", what, flag),
                format!("Or set '{}' in the config file (vxlan config path)", key),
            ],

            Self::ConfigError { .. } => vec![
                "Check the file given with --config, ./vxlan.toml and VXLAN_* variables".into(),
                "'vxlan config path' shows the platform file, 'vxlan init' writes one".into(),
            ],

            Self::Core(core_err) => core_err.suggestions(),

            Self::ServiceFailed { source, .. } => {
                let mut suggestions = source.suggestions();
                suggestions.push("No configuration was written".into());
                suggestions
            }

            Self::IoError { source, .. } => match source.kind() {
                std::io::ErrorKind::PermissionDenied => {
                    vec!["Choose a writable directory with --output".into()]
                }
                _ => Vec::new(),
            },
        }
    }

    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::MissingInput { .. } => ErrorCategory::UserError,
            Self::ConfigError { .. } => ErrorCategory::Configuration,
            Self::Core(core) => core.category().into(),
            Self::ServiceFailed { source, .. } => VxlanError::from(source.clone()).category().into(),
            Self::IoError { .. } => ErrorCategory::Internal,
        }
    }

    pub fn exit_code(&self) -> u8 {
        match self.category() {
            ErrorCategory::UserError => 2,
            ErrorCategory::NotFound => 3,
            ErrorCategory::Configuration => 4,
            ErrorCategory::Internal => 1,
        }
    }

    /// Message, cause chain (verbose only) and suggestions, with ANSI colour.
    pub fn format_colored(&self, verbose: bool) -> String {
        self.render(verbose, true)
    }

    /// Same report as [`Self::format_colored`] without escape codes.
    pub fn format_plain(&self, verbose: bool) -> String {
        self.render(verbose, false)
    }

    fn render(&self, verbose: bool, color: bool) -> String {
        let paint = |text: &str, style: Style| {
            if color {
                text.style(style).to_string()
            } else {
                text.to_string()
            }
        };
        let red = Style::new().red();

        let mut lines = vec![
            String::new(),
            format!("{} {}", paint("Error:", red.bold()), paint(&self.to_string(), red)),
        ];

        if verbose {
            let causes = std::iter::successors(self.source(), |&err| err.source());
            lines.extend(causes.map(|cause| {
                paint(&format!("  Caused by: {cause}"), Style::new().dimmed())
            }));
        }

        let suggestions = self.suggestions();
        if !suggestions.is_empty() {
            lines.push(String::new());
            lines.push(paint("Suggestions:", Style::new().yellow().bold()));
            lines.extend(suggestions.iter().map(|s| format!("  {s}")));
        }

        if !verbose {
            lines.push(String::new());
            lines.push(paint("Use -v / --verbose for more details.", Style::new().dimmed()));
        }

        let mut report = lines.join("\n");
        report.push('\n');
        report
    }

    /// Emit one tracing event at the category's severity.
    pub fn log(&self) {
        let cause = self.source().map(|c| c.to_string()).unwrap_or_default();
        match self.category() {
            ErrorCategory::UserError | ErrorCategory::NotFound => {
                tracing::warn!(category = ?self.category(), %cause, "{self}")
            }
            ErrorCategory::Configuration | ErrorCategory::Internal => {
                tracing::error!(category = ?self.category(), %cause, "{self}")
            }
        }
    }
}

/// Drives the exit status and the log level of the failure event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    /// Bad arguments or a rejected service.
    UserError,
    NotFound,
    Configuration,
    Internal,
}

impl From<CoreCategory> for ErrorCategory {
    fn from(category: CoreCategory) -> Self {
        match category {
            CoreCategory::Validation => Self::UserError,
            CoreCategory::NotFound => Self::NotFound,
            CoreCategory::Configuration => Self::Configuration,
            CoreCategory::Internal => Self::Internal,
        }
    }
}

/// `map_err` into [`CliError`] with a message built at the call site.
pub trait IntoCli<T> {
    fn with_cli_context<F, S>(self, f: F) -> CliResult<T>
    where
        F: FnOnce() -> S,
        S: Into<String>;
}

impl<T> IntoCli<T> for Result<T, std::io::Error> {
    fn with_cli_context<F, S>(self, f: F) -> CliResult<T>
    where
        F: FnOnce() -> S,
        S: Into<String>,
    {
        self.map_err(|e| CliError::IoError {
            message: f().into(),
            source: e,
        })
    }
}

impl<T> IntoCli<T> for Result<T, toml::ser::Error> {
    fn with_cli_context<F, S>(self, f: F) -> CliResult<T>
    where
        F: FnOnce() -> S,
        S: Into<String>,
    {
        self.map_err(|e| CliError::ConfigError {
            message: format!("{}: {e}", f().into()),
            source: Some(Box::new(e)),
        })
    }
}
