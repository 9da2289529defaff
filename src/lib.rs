//! # syncnet
//!
//! A blocking HTTP client with callback-driven exchanges.
//!
//! Every request runs as one [`Exchange`]: the calling thread blocks while the
//! connection is opened, the request is sent and the response is read, then
//! exactly one of the `success`/`error` callbacks fires, followed by
//! `complete`. The connection is always released before the call returns.
//!
//! ## Features
//!
//! - **Convenience API**: `get`/`post`/`put`/`del` taking `url[, data][, success][, error]`
//! - **Request data**: text, form pairs, bytes, byte streams and text streams
//! - **Response decoding**: gzip/deflate decompression and charset-aware text
//! - **Cookies**: every `Set-Cookie` header parsed into a [`Cookie`]
//! - **Basic auth**: from URL userinfo or explicit username/password
//! - **Redirects**: followed by the built-in HTTP/1.1 transport (limit 20)
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use syncnet::{on_success, RequestOptions};
//!
//! // Convenience form
//! let exchange = syncnet::get((
//!     "http://localhost:8080/hello",
//!     on_success(|content, status, content_type, _| {
//!         println!("{} {:?}: {}", status, content_type, content.as_text().unwrap_or_default());
//!         Ok(())
//!     }),
//! ))?;
//! println!("cookies: {:?}", exchange.cookies().keys());
//!
//! // Generic form
//! let exchange = syncnet::request(
//!     RequestOptions::new("http://localhost:8080/upload")
//!         .method(syncnet::Method::POST)
//!         .data([("name", "value")])
//!         .username("user")
//!         .password("secret")
//!         .on_error(|message, status, _| {
//!             eprintln!("failed with {}: {}", status, message);
//!             Ok(())
//!         }),
//! );
//! assert!(exchange.done());
//! # Ok::<(), syncnet::NetError>(())
//! ```
//!
//! ## Modules
//!
//! - [`base`] - Error taxonomy and exchange states
//! - [`cookies`] - `Set-Cookie` parsing
//! - [`http`] - Transport seam, default HTTP/1.1 transport, body codecs
//! - [`socket`] - DNS → TCP → TLS connection establishment
//! - [`urlrequest`] - Options, argument resolution, callbacks and the exchange
//!
//! ## Blocking
//!
//! The built-in transport drives its own single-threaded tokio runtime per
//! connection. Do not call into this crate from inside an async task; use
//! `tokio::task::spawn_blocking` there instead.

pub mod base;
pub mod client;
pub mod cookies;
pub mod http;
pub mod socket;
pub mod urlrequest;

pub use crate::base::exchangestate::{ExchangeState, Outcome};
pub use crate::base::neterror::{ErrorKind, NetError};
pub use crate::client::{Client, ClientBuilder, USER_AGENT};
pub use crate::cookies::Cookie;
pub use crate::http::{Headers, RequestData};
pub use crate::urlrequest::{on_error, on_success, Arg, Args, Content, Exchange, RequestOptions};
pub use ::http::Method;

use once_cell::sync::Lazy;

static DEFAULT_CLIENT: Lazy<Client> = Lazy::new(Client::new);

/// Run a request on the shared default client. See [`Client::request`].
pub fn request(options: RequestOptions) -> Exchange {
    DEFAULT_CLIENT.request(options)
}

/// GET on the shared default client. See [`Client::get`].
pub fn get(args: impl Into<Args>) -> Result<Exchange, NetError> {
    DEFAULT_CLIENT.get(args)
}

/// POST on the shared default client. See [`Client::post`].
pub fn post(args: impl Into<Args>) -> Result<Exchange, NetError> {
    DEFAULT_CLIENT.post(args)
}

/// PUT on the shared default client. See [`Client::put`].
pub fn put(args: impl Into<Args>) -> Result<Exchange, NetError> {
    DEFAULT_CLIENT.put(args)
}

/// DELETE on the shared default client. See [`Client::del`].
pub fn del(args: impl Into<Args>) -> Result<Exchange, NetError> {
    DEFAULT_CLIENT.del(args)
}
