use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ScaffoldError {
    #[error("missing replacement for placeholder '{name}'")]
    MissingPlaceholder { name: String },

    #[error("invalid input: {0}")]
    InvalidInput(String),

    #[error("expected '{section}' to be an object")]
    MalformedTarget { section: String },

    #[error("missing template: {0}")]
    TemplateNotFound(String),

    #[error("invalid JSON in {}: {source}", .path.display())]
    InvalidJson {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("{}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl ScaffoldError {
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io { path: path.into(), source }
    }
}

pub type Result<T> = std::result::Result<T, ScaffoldError>;
