//! Response content stream selection and decompression.

use crate::base::neterror::NetError;
use crate::http::connection::Connection;
use flate2::read::{GzDecoder, ZlibDecoder};
use std::io::{self, Read};

/// Compression named by a `Content-Encoding` header.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContentEncoding {
    Identity,
    Gzip,
    Deflate,
}

impl ContentEncoding {
    /// Unrecognized or absent encodings pass the body through untouched.
    pub fn from_header(value: Option<&str>) -> Self {
        match value.map(str::trim) {
            Some(v) if v.eq_ignore_ascii_case("gzip") || v.eq_ignore_ascii_case("x-gzip") => {
                ContentEncoding::Gzip
            }
            Some(v) if v.eq_ignore_ascii_case("deflate") => ContentEncoding::Deflate,
            _ => ContentEncoding::Identity,
        }
    }

    pub fn decode(self, raw: Box<dyn Read>) -> Box<dyn Read> {
        match self {
            ContentEncoding::Identity => raw,
            ContentEncoding::Gzip => Box::new(GzDecoder::new(raw)),
            ContentEncoding::Deflate => Box::new(ZlibDecoder::new(raw)),
        }
    }
}

/// Pick the body stream for `status` and wrap it in the decoder its
/// content encoding asks for.
///
/// Statuses in `[200, 400)` read the normal body; everything else reads the
/// error body, or nothing when the connection has none.
pub fn open(conn: &mut dyn Connection) -> Result<Box<dyn Read>, NetError> {
    let head = conn.response().ok_or(NetError::NotConnected)?;
    let status = head.status;
    let encoding = ContentEncoding::from_header(head.content_encoding());

    let raw: Box<dyn Read> = if (200..400).contains(&status) {
        conn.input_stream()?
    } else {
        conn.error_stream()
            .unwrap_or_else(|| Box::new(io::empty()))
    };
    tracing::debug!(status, encoding = ?encoding, "opened content stream");
    Ok(encoding.decode(raw))
}
