//! The transport primitive an exchange drives.
//!
//! A [`Connection`] mirrors the classic URL-connection life cycle:
//! configure → (write body) → connect → read response → disconnect.
//! [`Transport`] opens connections; the default is
//! [`HttpTransport`](crate::http::transaction::HttpTransport).

use crate::base::neterror::NetError;
use http::header::{CONTENT_ENCODING, CONTENT_LENGTH, CONTENT_TYPE};
use http::{HeaderMap, Method};
use std::io::{Read, Write};
use url::Url;

/// Opens connections. Shared by every request a client makes.
pub trait Transport: Send + Sync {
    fn open(&self, url: &Url) -> Result<Box<dyn Connection>, NetError>;
}

/// One request/response on one connection. Owned exclusively by an exchange.
pub trait Connection {
    /// The URL of the request; after `connect` this is the final URL.
    fn url(&self) -> &Url;

    /// Interactive prompts (e.g. credential dialogs) are never supported.
    fn set_allow_user_interaction(&mut self, _allow: bool) {}

    fn set_follow_redirects(&mut self, follow: bool);

    fn set_request_method(&mut self, method: Method);

    /// Set a request header, replacing any previous value.
    fn set_request_property(&mut self, name: &str, value: &str) -> Result<(), NetError>;

    /// Enable writing a request body.
    fn set_do_output(&mut self, enabled: bool);

    /// Sink for the request body. Only valid after `set_do_output(true)` and
    /// before `connect`.
    fn output_stream(&mut self) -> Result<&mut dyn Write, NetError>;

    /// Transmit the request and read the response head.
    fn connect(&mut self) -> Result<(), NetError>;

    /// The response head, once `connect` succeeded.
    fn response(&self) -> Option<&ResponseHead>;

    /// Body of a non-error response (status below 400).
    fn input_stream(&mut self) -> Result<Box<dyn Read>, NetError>;

    /// Body of an error response (status 400 and above), if any.
    fn error_stream(&mut self) -> Option<Box<dyn Read>>;

    /// Release the underlying socket. Idempotent.
    fn disconnect(&mut self);
}

/// Status line and headers of a received response.
#[derive(Debug, Clone)]
pub struct ResponseHead {
    pub status: u16,
    pub message: String,
    pub headers: HeaderMap,
    pub url: Url,
}

impl ResponseHead {
    pub fn header(&self, name: impl http::header::AsHeaderName) -> Option<&str> {
        self.headers.get(name).and_then(|v| v.to_str().ok())
    }

    pub fn content_type(&self) -> Option<&str> {
        self.header(CONTENT_TYPE)
    }

    pub fn content_length(&self) -> Option<u64> {
        self.header(CONTENT_LENGTH)
            .and_then(|v| v.trim().parse().ok())
    }

    pub fn content_encoding(&self) -> Option<&str> {
        self.header(CONTENT_ENCODING)
    }
}
