//! Error types for code generation.

use thiserror::Error;

/// Error type for code generation operations.
#[derive(Debug, Error)]
pub enum CodegenError {
    /// Flattening or renaming failed.
    #[error("naming error: {0}")]
    Naming(#[from] typeweave_model::NamingError),

    /// A type could not be rebuilt after configuration was applied.
    #[error("model error: {0}")]
    Model(#[from] typeweave_model::ModelError),

    /// Configuration could not be read or written.
    #[error("configuration error: {0}")]
    Config(#[from] typeweave_config::ConfigError),

    /// A configured name is not usable as an identifier.
    #[error("identifier error: {0}")]
    Identifier(#[from] typeweave_core::Error),

    /// The emitted code does not parse.
    #[error("generated code for {package} does not parse: {message}")]
    InvalidSyntax {
        /// Package being generated.
        package: String,
        /// Parser message.
        message: String,
    },

    /// Code generation error.
    #[error("generation error: {message}")]
    Generation {
        /// Error message.
        message: String,
    },
}

impl CodegenError {
    /// Creates a generation error with the given message.
    pub fn generation(message: impl Into<String>) -> Self {
        Self::Generation {
            message: message.into(),
        }
    }

    /// Creates a syntax error for `package`.
    pub fn invalid_syntax(package: impl ToString, message: impl Into<String>) -> Self {
        Self::InvalidSyntax {
            package: package.to_string(),
            message: message.into(),
        }
    }
}
