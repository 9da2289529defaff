//! Typed callback slots of a request.
//!
//! Every slot is optional; an empty slot behaves as a no-op. A callback that
//! returns `Err` is logged and otherwise ignored: it never changes which of
//! `success`/`error` fired and never prevents `complete` or teardown.
//! A callback that panics is not caught; the panic reaches the caller.

use crate::urlrequest::exchange::Exchange;
use std::fmt;

pub type CallbackError = Box<dyn std::error::Error + Send + Sync>;
pub type CallbackResult = Result<(), CallbackError>;

/// Response content handed to `success` and `complete`.
///
/// `Binary` when the request asked for binary content, `Text` (decoded with the
/// response charset) otherwise.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Content<'a> {
    Text(&'a str),
    Binary(&'a [u8]),
}

impl<'a> Content<'a> {
    pub fn as_bytes(&self) -> &'a [u8] {
        match *self {
            Content::Text(text) => text.as_bytes(),
            Content::Binary(bytes) => bytes,
        }
    }

    pub fn as_text(&self) -> Option<&'a str> {
        match *self {
            Content::Text(text) => Some(text),
            Content::Binary(_) => None,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.as_bytes().is_empty()
    }
}

/// `success(content, status, content_type, exchange)`; `complete` has the same shape.
pub type SuccessFn = Box<dyn FnMut(Content<'_>, u16, Option<&str>, &Exchange) -> CallbackResult>;
pub type CompleteFn = SuccessFn;
/// `error(message, status, exchange)`; `status` is `0` when no response arrived.
pub type ErrorFn = Box<dyn FnMut(&str, u16, &Exchange) -> CallbackResult>;
/// `before_send(exchange)`, after headers are set and before the body is sent.
pub type BeforeSendFn = Box<dyn FnMut(&Exchange) -> CallbackResult>;
/// `part(chunk, status, content_type)` for each decoded body chunk.
pub type PartFn = Box<dyn FnMut(&[u8], u16, Option<&str>) -> CallbackResult>;

#[derive(Default)]
pub struct Callbacks {
    pub success: Option<SuccessFn>,
    pub error: Option<ErrorFn>,
    pub complete: Option<CompleteFn>,
    pub before_send: Option<BeforeSendFn>,
    pub part: Option<PartFn>,
}

impl fmt::Debug for Callbacks {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Callbacks")
            .field("success", &self.success.is_some())
            .field("error", &self.error.is_some())
            .field("complete", &self.complete.is_some())
            .field("before_send", &self.before_send.is_some())
            .field("part", &self.part.is_some())
            .finish()
    }
}

/// Log a failed callback. Callback failures never alter the outcome.
pub(crate) fn report(name: &str, result: CallbackResult) {
    if let Err(e) = result {
        tracing::warn!(callback = name, error = %e, "callback returned an error");
    }
}
