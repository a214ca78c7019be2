//! Error types for fixture generation

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can abort a generation run
#[derive(Debug, Error)]
pub enum GeneratorError {
    /// A schema node carries a type tag with no registered handler
    #[error("No handler has been implemented for type '{type_tag}'")]
    UnsupportedType { type_tag: String },

    /// A schema file could not be read or parsed
    #[error("Failed to load schema from {}: {reason}", path.display())]
    SchemaLoad { path: PathBuf, reason: String },
}

impl GeneratorError {
    pub fn unsupported(type_tag: impl Into<String>) -> Self {
        GeneratorError::UnsupportedType {
            type_tag: type_tag.into(),
        }
    }
}

/// Result type alias for generation operations
pub type GeneratorResult<T> = Result<T, GeneratorError>;
