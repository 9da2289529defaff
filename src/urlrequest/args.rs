//! Positional arguments of the convenience calls.
//!
//! `get`, `post`, `put` and `del` take `url[, data][, success][, error]`.
//! Each position is an [`Arg`]; [`resolve`] checks the shape and sorts the
//! values into url, data and callbacks.

use crate::base::neterror::NetError;
use crate::http::requestbody::RequestData;
use crate::urlrequest::callbacks::{CallbackResult, Content, ErrorFn, SuccessFn};
use crate::urlrequest::exchange::Exchange;
use bytes::Bytes;
use std::fmt;

/// One positional argument.
pub enum Arg {
    /// A string: the url in first position, text data afterwards.
    Str(String),
    Data(RequestData),
    Success(SuccessFn),
    Error(ErrorFn),
}

impl fmt::Debug for Arg {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Arg::Str(s) => f.debug_tuple("Str").field(s).finish(),
            Arg::Data(d) => f.debug_tuple("Data").field(d).finish(),
            Arg::Success(_) => f.write_str("Success(..)"),
            Arg::Error(_) => f.write_str("Error(..)"),
        }
    }
}

/// Wrap a closure as the `success` argument.
pub fn on_success<F>(f: F) -> Arg
where
    F: FnMut(Content<'_>, u16, Option<&str>, &Exchange) -> CallbackResult + 'static,
{
    Arg::Success(Box::new(f))
}

/// Wrap a closure as the `error` argument.
pub fn on_error<F>(f: F) -> Arg
where
    F: FnMut(&str, u16, &Exchange) -> CallbackResult + 'static,
{
    Arg::Error(Box::new(f))
}

impl From<&str> for Arg {
    fn from(s: &str) -> Self {
        Arg::Str(s.to_string())
    }
}

impl From<String> for Arg {
    fn from(s: String) -> Self {
        Arg::Str(s)
    }
}

impl From<RequestData> for Arg {
    fn from(data: RequestData) -> Self {
        Arg::Data(data)
    }
}

impl From<Vec<u8>> for Arg {
    fn from(bytes: Vec<u8>) -> Self {
        Arg::Data(bytes.into())
    }
}

impl From<Bytes> for Arg {
    fn from(bytes: Bytes) -> Self {
        Arg::Data(bytes.into())
    }
}

impl From<Vec<(String, String)>> for Arg {
    fn from(pairs: Vec<(String, String)>) -> Self {
        Arg::Data(pairs.into())
    }
}

impl<K: Into<String>, V: Into<String>, const N: usize> From<[(K, V); N]> for Arg {
    fn from(pairs: [(K, V); N]) -> Self {
        Arg::Data(pairs.into())
    }
}

/// The full argument list of one convenience call.
#[derive(Debug, Default)]
pub struct Args(pub Vec<Arg>);

impl From<Vec<Arg>> for Args {
    fn from(args: Vec<Arg>) -> Self {
        Args(args)
    }
}

impl From<&str> for Args {
    fn from(url: &str) -> Self {
        Args(vec![url.into()])
    }
}

impl From<String> for Args {
    fn from(url: String) -> Self {
        Args(vec![url.into()])
    }
}

impl<A: Into<Arg>> From<(&str, A)> for Args {
    fn from((url, a): (&str, A)) -> Self {
        Args(vec![url.into(), a.into()])
    }
}

impl<A: Into<Arg>, B: Into<Arg>> From<(&str, A, B)> for Args {
    fn from((url, a, b): (&str, A, B)) -> Self {
        Args(vec![url.into(), a.into(), b.into()])
    }
}

impl<A: Into<Arg>, B: Into<Arg>, C: Into<Arg>> From<(&str, A, B, C)> for Args {
    fn from((url, a, b, c): (&str, A, B, C)) -> Self {
        Args(vec![url.into(), a.into(), b.into(), c.into()])
    }
}

/// Arguments sorted by role.
#[derive(Default)]
pub struct Resolved {
    pub url: String,
    pub data: RequestData,
    pub success: Option<SuccessFn>,
    pub error: Option<ErrorFn>,
}

impl fmt::Debug for Resolved {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Resolved")
            .field("url", &self.url)
            .field("data", &self.data)
            .field("success", &self.success.is_some())
            .field("error", &self.error.is_some())
            .finish()
    }
}

fn data_of(arg: Arg) -> Option<RequestData> {
    match arg {
        Arg::Str(s) => Some(RequestData::Text(s)),
        Arg::Data(d) => Some(d),
        Arg::Success(_) | Arg::Error(_) => None,
    }
}

/// Sort 1 to 4 positional arguments into url, data and callbacks.
///
/// Accepted shapes:
/// `(url)`, `(url, success)`, `(url, data)`, `(url, success, error)`,
/// `(url, data, success)` and `(url, data, success, error)`.
pub fn resolve(args: Args) -> Result<Resolved, NetError> {
    let mut it = args.0.into_iter();
    let url = match it.next() {
        Some(Arg::Str(url)) => url,
        _ => {
            return Err(NetError::InvalidArguments(
                "first argument (url) must be string",
            ))
        }
    };
    let mut resolved = Resolved {
        url,
        ..Default::default()
    };

    match (it.next(), it.next(), it.next(), it.next()) {
        (None, None, None, None) => {}
        (Some(second), None, None, None) => match second {
            Arg::Success(f) => resolved.success = Some(f),
            Arg::Error(_) => {
                return Err(NetError::InvalidArguments(
                    "two argument form must be (url, success) or (url, data)",
                ))
            }
            data => resolved.data = data_of(data).unwrap_or_default(),
        },
        (Some(second), Some(third), None, None) => match (second, third) {
            (Arg::Success(s), Arg::Error(e)) => {
                resolved.success = Some(s);
                resolved.error = Some(e);
            }
            (data @ (Arg::Str(_) | Arg::Data(_)), Arg::Success(s)) => {
                resolved.data = data_of(data).unwrap_or_default();
                resolved.success = Some(s);
            }
            _ => {
                return Err(NetError::InvalidArguments(
                    "three argument form must be (url, success, error) or (url, data, success)",
                ))
            }
        },
        (
            Some(data @ (Arg::Str(_) | Arg::Data(_))),
            Some(Arg::Success(s)),
            Some(Arg::Error(e)),
            None,
        ) => {
            resolved.data = data_of(data).unwrap_or_default();
            resolved.success = Some(s);
            resolved.error = Some(e);
        }
        _ => return Err(NetError::InvalidArguments("unknown arguments")),
    }
    Ok(resolved)
}
