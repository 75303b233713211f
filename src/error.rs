use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Parse,
    Synthesis,
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ErrorKind::Parse => f.write_str("ParseError"),
            ErrorKind::Synthesis => f.write_str("SynthesisError"),
        }
    }
}

/// Failure of a single conversion. Never accompanied by partial output.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    /// Input text is not well-formed JSON. `message` is the parser's own text.
    #[error("Invalid JSON: {message}")]
    Parse {
        message: String,
        line: usize,
        column: usize,
        /// JSON path reached before the failure (`.` when at the top level).
        path: String,
    },

    #[error("An unexpected error occurred: {message}")]
    Synthesis { message: String },
}

impl Error {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Error::Parse { .. } => ErrorKind::Parse,
            Error::Synthesis { .. } => ErrorKind::Synthesis,
        }
    }

    pub fn message(&self) -> &str {
        match self {
            Error::Parse { message, .. } | Error::Synthesis { message } => message,
        }
    }

    pub(crate) fn parse(err: &serde_json::Error, path: String) -> Self {
        Error::Parse {
            message: err.to_string(),
            line: err.line(),
            column: err.column(),
            path,
        }
    }

    pub(crate) fn synthesis(message: impl Into<String>) -> Self {
        Error::Synthesis { message: message.into() }
    }
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
