use thiserror::Error;

/// Coarse classification of every [`NetError`].
///
/// Only `Argument` errors are returned to the caller directly; every other kind
/// is delivered through the `error` callback of the exchange.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Malformed convenience-call arguments. Raised before any network attempt.
    Argument,
    /// The connection could not be opened, configured or established.
    Connection,
    /// A response arrived but its status code is greater than 300.
    ///
    /// This deliberately includes 3xx codes. When the transport has already
    /// followed a redirect the final status is the target's, so only an
    /// unfollowed 3xx lands here; whether that should count as a failure is
    /// an open product question and the behavior is kept as is.
    HttpStatus,
    /// Reading or writing a body failed.
    Stream,
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum NetError {
    // Argument Errors
    #[error("{0}")]
    InvalidArguments(&'static str),

    // Connection Errors
    #[error("Invalid URL")]
    InvalidUrl,
    #[error("Unknown URL scheme")]
    UnknownUrlScheme,
    #[error("Name not resolved")]
    NameNotResolved,
    #[error("Name not resolved for {domain}: {reason}")]
    NameNotResolvedFor { domain: String, reason: String },
    #[error("Connection failed")]
    ConnectionFailed,
    #[error("Connection to {host}:{port} failed: {reason}")]
    ConnectionFailedTo {
        host: String,
        port: u16,
        reason: String,
    },
    #[error("SSL protocol error")]
    SslProtocolError,
    #[error("Invalid header")]
    InvalidHeader,
    #[error("Too many redirects")]
    TooManyRedirects,
    #[error("Invalid redirect")]
    InvalidRedirect,
    #[error("Request aborted: {0}")]
    RequestAborted(String),
    #[error("Runtime unavailable")]
    RuntimeUnavailable,

    // HTTP Errors
    #[error("{message}")]
    HttpStatus { status: u16, message: String },

    // Stream Errors
    #[error("Writing request body failed: {0}")]
    RequestBodyFailed(String),
    #[error("Reading response body failed: {0}")]
    ResponseBodyFailed(String),
    #[error("Content decoding failed")]
    ContentDecodingFailed,
    #[error("Response content already consumed")]
    ContentConsumed,
    #[error("Socket not connected")]
    NotConnected,
    #[error("Invalid response")]
    InvalidResponse,
}

impl NetError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            NetError::InvalidArguments(_) => ErrorKind::Argument,

            NetError::InvalidUrl
            | NetError::UnknownUrlScheme
            | NetError::NameNotResolved
            | NetError::NameNotResolvedFor { .. }
            | NetError::ConnectionFailed
            | NetError::ConnectionFailedTo { .. }
            | NetError::SslProtocolError
            | NetError::InvalidHeader
            | NetError::TooManyRedirects
            | NetError::InvalidRedirect
            | NetError::RequestAborted(_)
            | NetError::RuntimeUnavailable => ErrorKind::Connection,

            NetError::HttpStatus { .. } => ErrorKind::HttpStatus,

            NetError::RequestBodyFailed(_)
            | NetError::ResponseBodyFailed(_)
            | NetError::ContentDecodingFailed
            | NetError::ContentConsumed
            | NetError::NotConnected
            | NetError::InvalidResponse => ErrorKind::Stream,
        }
    }

    /// Status carried by the error, `0` when no response was received.
    pub fn status(&self) -> u16 {
        match self {
            NetError::HttpStatus { status, .. } => *status,
            _ => 0,
        }
    }

    pub fn connection_failed_to(host: &str, port: u16, err: std::io::Error) -> Self {
        NetError::ConnectionFailedTo {
            host: host.to_string(),
            port,
            reason: err.to_string(),
        }
    }

    pub fn dns_failed(domain: &str, err: std::io::Error) -> Self {
        NetError::NameNotResolvedFor {
            domain: domain.to_string(),
            reason: err.to_string(),
        }
    }
}
