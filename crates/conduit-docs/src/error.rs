//! # Document Error Types

use std::path::PathBuf;

use thiserror::Error;

/// Result type alias for document operations.
pub type DocsResult<T> = Result<T, DocsError>;

#[derive(Debug, Error)]
pub enum DocsError {
    /// The named template file does not exist.
    #[error("Template {name} not found at {}", path.display())]
    TemplateNotFound { name: String, path: PathBuf },

    /// Motion type outside the supported set.
    #[error("Unknown motion type: '{0}'. Valid options: compel, sanctions, modify, emergency")]
    UnknownMotionType(String),

    /// The compiler ran and exited unsuccessfully.
    #[error("Document compilation failed ({status}): {stderr}")]
    CompileFailed { status: String, stderr: String },

    /// The compiler program could not be started.
    #[error("Failed to run {program}: {reason}")]
    CompilerUnavailable { program: String, reason: String },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Malformed parameter file.
    #[error("Invalid motion configuration: {0}")]
    Json(#[from] serde_json::Error),
}

impl DocsError {
    /// Returns true if this error came from the external compiler.
    pub fn is_compile_error(&self) -> bool {
        matches!(
            self,
            DocsError::CompileFailed { .. } | DocsError::CompilerUnavailable { .. }
        )
    }
}
