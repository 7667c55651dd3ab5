use thiserror::Error;

/// Encapsulates all errors that can occur when calling the procedure API.
#[derive(Debug, Error)]
pub enum Error {
    /// The server answered with a non-success HTTP status.
    #[error("HTTP error! status: {status}")]
    RequestFailed {
        /// The status code returned by the server.
        status: reqwest::StatusCode,
    },
    /// An error which originated from the underlying HTTP library, either
    /// while sending the request or while decoding the response body.
    #[error("HTTP error: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("Could not parse a URL: {0}")]
    UrlParse(#[from] url::ParseError),
    #[error("URL is not formatted for the procedure API: {0}")]
    UrlFormat(String),
}

impl Error {
    /// Return true if this error was caused by a non-success HTTP status.
    pub fn is_request_failed(&self) -> bool {
        matches!(self, Self::RequestFailed { .. })
    }

    /// Return the HTTP status code associated with this error, if there
    /// is one.
    pub fn status(&self) -> Option<reqwest::StatusCode> {
        match self {
            Self::RequestFailed { status } => Some(*status),
            Self::Transport(err) => err.status(),
            _ => None,
        }
    }
}

/// Errors that can occur when creating a new `ProcedureClient`.
#[derive(Debug, Error)]
pub enum NewClientError {
    /// The base URL was not suitable for the procedure API.
    #[error("URL is not formatted for the procedure API: {0}")]
    UrlFormat(String),
    #[error("Could not parse a URL: {0}")]
    UrlParse(#[from] url::ParseError),
    /// An error originating in the underlying HTTP client.
    #[error("Error occurred in the underlying HTTP client: {0}")]
    HttpClient(#[from] reqwest::Error),
    /// A required environment variable was not set.
    #[error("Environment variable {0} is not set")]
    MissingEnv(String),
}

impl NewClientError {
    pub(crate) fn url<S>(msg: S) -> Self
    where
        S: AsRef<str>,
    {
        NewClientError::UrlFormat(msg.as_ref().to_owned())
    }
}

/// An error indicating that a `ProcedureType` could not be parsed.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ParseProcedureTypeError {
    unparsable_type: String,
}

impl ParseProcedureTypeError {
    pub(crate) fn from_str(s: &str) -> Self {
        Self {
            unparsable_type: s.to_string(),
        }
    }
}

impl std::fmt::Display for ParseProcedureTypeError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Could not parse a procedure type from string {}",
            self.unparsable_type
        )
    }
}

impl std::error::Error for ParseProcedureTypeError {}
