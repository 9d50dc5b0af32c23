use thiserror::Error;

/// Errors raised by the configuration and parsing surfaces.
///
/// Play resolution itself never fails; these only come out of loading
/// tables/configuration and parsing labels supplied by callers.
#[derive(Error, Debug)]
pub enum CoreError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid configuration: {field}: {reason}")]
    InvalidConfig { field: &'static str, reason: String },

    #[error("Unknown {kind} label: {label}")]
    UnknownLabel { kind: &'static str, label: String },

    #[error("Unsupported config file extension: {path}")]
    UnsupportedFormat { path: String },
}

impl CoreError {
    pub(crate) fn unknown_label(kind: &'static str, label: &str) -> Self {
        CoreError::UnknownLabel { kind, label: label.to_string() }
    }

    pub(crate) fn invalid(field: &'static str, reason: impl Into<String>) -> Self {
        CoreError::InvalidConfig { field, reason: reason.into() }
    }
}

pub type Result<T> = std::result::Result<T, CoreError>;
