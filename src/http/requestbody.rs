//! Request data for every method.
//!
//! GET and DELETE requests fold structured data into the query string;
//! POST and PUT transmit it as the request body.

use crate::base::context::IoResultExt;
use crate::base::neterror::NetError;
use crate::http::mimeparams::encoding_for;
use bytes::Bytes;
use encoding_rs::Encoding;
use std::fmt;
use std::io::{self, Cursor, Read, Write};
use url::form_urlencoded;

/// Data attached to a request.
#[derive(Default)]
pub enum RequestData {
    /// Nothing to send.
    #[default]
    Empty,
    /// Pre-encoded text: a query string for GET, a body for POST.
    Text(String),
    /// Key-value pairs, form-url-encoded in order. Keys may repeat.
    Form(Vec<(String, String)>),
    /// Raw bytes, sent verbatim.
    Bytes(Bytes),
    /// Any byte source (file, socket, memory), copied verbatim.
    Stream(Box<dyn Read + Send>),
    /// A character source in `charset`, re-encoded with the request charset.
    TextStream {
        reader: Box<dyn Read + Send>,
        charset: &'static Encoding,
    },
}

impl RequestData {
    /// Key-value pairs to be form-url-encoded.
    pub fn form<K, V, I>(pairs: I) -> Self
    where
        K: Into<String>,
        V: Into<String>,
        I: IntoIterator<Item = (K, V)>,
    {
        RequestData::Form(
            pairs
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }

    /// A byte stream copied verbatim into the request body.
    pub fn stream<R: Read + Send + 'static>(reader: R) -> Self {
        RequestData::Stream(Box::new(reader))
    }

    /// An in-memory byte stream.
    pub fn memory(bytes: impl Into<Vec<u8>>) -> Self {
        RequestData::Stream(Box::new(Cursor::new(bytes.into())))
    }

    /// A text stream whose bytes are encoded in `charset`.
    pub fn text_stream<R: Read + Send + 'static>(reader: R, charset: &str) -> Self {
        RequestData::TextStream {
            reader: Box::new(reader),
            charset: encoding_for(charset),
        }
    }

    pub fn is_empty(&self) -> bool {
        match self {
            RequestData::Empty => true,
            RequestData::Text(s) => s.is_empty(),
            RequestData::Form(pairs) => pairs.is_empty(),
            RequestData::Bytes(b) => b.is_empty(),
            RequestData::Stream(_) | RequestData::TextStream { .. } => false,
        }
    }

    /// Encode as a URL query string. Streams and binary data have no query form.
    pub fn to_query_string(&self) -> Option<String> {
        match self {
            RequestData::Text(s) if !s.is_empty() => Some(s.clone()),
            RequestData::Form(pairs) if !pairs.is_empty() => Some(url_encode(pairs)),
            RequestData::Bytes(_) | RequestData::Stream(_) | RequestData::TextStream { .. } => {
                tracing::debug!("binary request data cannot be sent as a query string; ignoring");
                None
            }
            _ => None,
        }
    }

    /// Transmit the data as a request body.
    ///
    /// Byte sources are copied verbatim. Text sources are written in `charset`.
    /// Returns the number of bytes written.
    pub fn write_to(self, out: &mut dyn Write, charset: &str) -> Result<u64, NetError> {
        let encoding = encoding_for(charset);
        let written = match self {
            RequestData::Empty => 0,
            RequestData::Bytes(bytes) => {
                let mut source = Cursor::new(bytes);
                io::copy(&mut source, out).request_body_context()?
            }
            RequestData::Stream(mut reader) => io::copy(&mut reader, out).request_body_context()?,
            RequestData::TextStream {
                mut reader,
                charset: source_charset,
            } => {
                let mut raw = Vec::new();
                reader.read_to_end(&mut raw).request_body_context()?;
                let (text, _, _) = source_charset.decode(&raw);
                write_text(out, &text, encoding)?
            }
            RequestData::Text(text) => write_text(out, &text, encoding)?,
            RequestData::Form(pairs) => write_text(out, &url_encode(&pairs), encoding)?,
        };
        out.flush().request_body_context()?;
        Ok(written)
    }
}

fn write_text(out: &mut dyn Write, text: &str, encoding: &'static Encoding) -> Result<u64, NetError> {
    if text.is_empty() {
        return Ok(0);
    }
    let (bytes, _, _) = encoding.encode(text);
    out.write_all(&bytes).request_body_context()?;
    Ok(bytes.len() as u64)
}

/// Form-url-encode key-value pairs (`a=x&b=y`, spaces as `+`).
pub fn url_encode(pairs: &[(String, String)]) -> String {
    form_urlencoded::Serializer::new(String::new())
        .extend_pairs(pairs.iter())
        .finish()
}

/// Append `query` to `url`, joining with `&` when a query is already present.
pub fn append_query(url: &str, query: &str) -> String {
    if query.is_empty() {
        return url.to_string();
    }
    let (base, fragment) = match url.split_once('#') {
        Some((base, fragment)) => (base, Some(fragment)),
        None => (url, None),
    };
    let separator = if base.contains('?') { '&' } else { '?' };
    let mut joined = format!("{}{}{}", base, separator, query);
    if let Some(fragment) = fragment {
        joined.push('#');
        joined.push_str(fragment);
    }
    joined
}

impl fmt::Debug for RequestData {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RequestData::Empty => f.write_str("Empty"),
            RequestData::Text(s) => f.debug_tuple("Text").field(s).finish(),
            RequestData::Form(pairs) => f.debug_tuple("Form").field(pairs).finish(),
            RequestData::Bytes(b) => f.debug_tuple("Bytes").field(&b.len()).finish(),
            RequestData::Stream(_) => f.write_str("Stream(..)"),
            RequestData::TextStream { charset, .. } => f
                .debug_struct("TextStream")
                .field("charset", &charset.name())
                .finish(),
        }
    }
}

impl From<String> for RequestData {
    fn from(s: String) -> Self {
        RequestData::Text(s)
    }
}

impl From<&str> for RequestData {
    fn from(s: &str) -> Self {
        RequestData::Text(s.to_owned())
    }
}

impl From<Vec<u8>> for RequestData {
    fn from(v: Vec<u8>) -> Self {
        RequestData::Bytes(Bytes::from(v))
    }
}

impl From<&[u8]> for RequestData {
    fn from(v: &[u8]) -> Self {
        RequestData::Bytes(Bytes::copy_from_slice(v))
    }
}

impl From<Bytes> for RequestData {
    fn from(b: Bytes) -> Self {
        RequestData::Bytes(b)
    }
}

impl From<Vec<(String, String)>> for RequestData {
    fn from(pairs: Vec<(String, String)>) -> Self {
        RequestData::Form(pairs)
    }
}

impl<K: Into<String>, V: Into<String>, const N: usize> From<[(K, V); N]> for RequestData {
    fn from(pairs: [(K, V); N]) -> Self {
        RequestData::form(pairs)
    }
}
