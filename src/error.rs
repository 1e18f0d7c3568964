use miette::Diagnostic;
use thiserror::Error;

/// Result type for randomizer operations
pub type Result<T> = std::result::Result<T, Error>;

/// Error types for the variable randomizer
#[derive(Error, Debug, Diagnostic, Clone, PartialEq, Eq)]
pub enum Error {
    #[error("File not found: {path}")]
    #[diagnostic(
        code(var_randomizer::file_not_found),
        help("check that the script path exists and is readable")
    )]
    FileNotFound { path: String },

    #[error("I/O error: {0}")]
    #[diagnostic(code(var_randomizer::io_error))]
    Io(String),

    #[error("No unused name left for prefix {prefix:?} after {attempts} attempts")]
    #[diagnostic(
        code(var_randomizer::name_space_exhausted),
        help("use a shorter prefix or a larger --min-length")
    )]
    NameSpaceExhausted { prefix: String, attempts: usize },

    #[error("Invalid option: {message}")]
    #[diagnostic(code(var_randomizer::invalid_option))]
    InvalidOption { message: String },
}

impl Error {
    /// Create an invalid option error
    pub fn invalid_option(message: impl Into<String>) -> Self {
        Error::InvalidOption {
            message: message.into(),
        }
    }
}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Error::Io(err.to_string())
    }
}
