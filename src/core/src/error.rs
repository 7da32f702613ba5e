use thiserror::Error;

/// Errors raised while scanning and validating a Forgefile.
///
/// Every failure aborts the parse; no partial result is returned.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    /// A command token with no argument after it
    #[error("expected value after {token} at line {line}")]
    MissingArgument { token: String, line: usize },

    /// A `\` as the very last character of the document
    #[error("unterminated escape sequence at line {line}")]
    UnterminatedEscape { line: usize },

    /// A token that matches no command type
    #[error("invalid command {token} on line {line}")]
    UnknownCommand { token: String, line: usize },

    /// The first command is not an origin (`FROM`)
    #[error("first command must be FROM")]
    MissingOrigin,

    /// More than one origin command
    #[error("only one FROM command is allowed")]
    MultipleOrigin,

    /// More than one entrypoint command
    #[error("only one ENTRYPOINT or CMD command is allowed")]
    MultipleEntrypoint,
}

impl ParseError {
    /// The 1-based line the error was detected on.
    ///
    /// Document-level checks have no single line and return `None`.
    pub fn line(&self) -> Option<usize> {
        match self {
            ParseError::MissingArgument { line, .. }
            | ParseError::UnterminatedEscape { line }
            | ParseError::UnknownCommand { line, .. } => Some(*line),
            ParseError::MissingOrigin
            | ParseError::MultipleOrigin
            | ParseError::MultipleEntrypoint => None,
        }
    }
}

/// A3S Forge error types
#[derive(Error, Debug)]
pub enum ForgeError {
    /// Forgefile parse or validation error
    #[error("Definition error: {0}")]
    Definition(#[from] ParseError),

    /// Origin value that is not a usable image reference
    #[error("Invalid origin '{value}': {message}")]
    InvalidOrigin { value: String, message: String },

    /// A build collaborator failed while handling a step
    #[error("Build step {step} failed: {message}")]
    Backend { step: usize, message: String },

    /// I/O error
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),

    /// Serialization error
    #[error("Serialization error: {0}")]
    SerializationError(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    ConfigError(String),
}

impl From<serde_json::Error> for ForgeError {
    fn from(err: serde_json::Error) -> Self {
        ForgeError::SerializationError(err.to_string())
    }
}

impl From<serde_yaml::Error> for ForgeError {
    fn from(err: serde_yaml::Error) -> Self {
        ForgeError::SerializationError(err.to_string())
    }
}

/// Result type alias for A3S Forge operations
pub type Result<T> = std::result::Result<T, ForgeError>;
