//! Blocking HTTP client with a convenience API.
//!
//! # Example
//!
//! ```rust,no_run
//! use syncnet::{on_error, on_success, Client};
//!
//! let client = Client::builder().user_agent("my-app/1.0").build();
//!
//! let exchange = client.get((
//!     "http://localhost:8080/items",
//!     [("page", "2")],
//!     on_success(|content, status, _, _| {
//!         println!("{}: {}", status, content.as_text().unwrap_or_default());
//!         Ok(())
//!     }),
//! ))?;
//! assert!(exchange.done());
//!
//! client.del((
//!     "http://localhost:8080/items/7",
//!     on_success(|_, _, _, _| Ok(())),
//!     on_error(|message, status, _| {
//!         eprintln!("delete failed ({}): {}", status, message);
//!         Ok(())
//!     }),
//! ))?;
//! # Ok::<(), syncnet::NetError>(())
//! ```

use crate::base::neterror::NetError;
use crate::http::connection::Transport;
use crate::http::transaction::{HttpTransport, DEFAULT_MAX_REDIRECTS};
use crate::urlrequest::args::{self, Args};
use crate::urlrequest::exchange::Exchange;
use crate::urlrequest::options::RequestOptions;
use http::Method;
use std::fmt;
use std::sync::Arc;

/// `User-Agent` sent with every request unless overridden.
pub const USER_AGENT: &str = concat!("syncnet HttpClient ", env!("CARGO_PKG_VERSION"));

/// HTTP client for making blocking requests.
///
/// Cheap to clone; clones share the transport. Use [`Client::builder()`] to
/// plug in a custom [`Transport`] or change the `User-Agent`.
#[derive(Clone)]
pub struct Client {
    transport: Arc<dyn Transport>,
    user_agent: String,
}

impl Default for Client {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for Client {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Client")
            .field("user_agent", &self.user_agent)
            .finish_non_exhaustive()
    }
}

impl Client {
    /// Create a new client with default settings.
    pub fn new() -> Self {
        Self::builder().build()
    }

    /// Create a new client builder.
    pub fn builder() -> ClientBuilder {
        ClientBuilder::default()
    }

    pub fn user_agent(&self) -> &str {
        &self.user_agent
    }

    /// Run a request described by `options`.
    ///
    /// Blocks until the exchange is closed: callbacks have run and every
    /// resource is released. Failures are reported through the `error`
    /// callback and [`Exchange::error`], never returned.
    pub fn request(&self, options: RequestOptions) -> Exchange {
        let options = options.normalize();
        tracing::debug!(method = %options.method, url = %options.url, "starting request");
        Exchange::execute(options, self.transport.as_ref(), &self.user_agent)
    }

    /// GET `url[, data][, success][, error]`; data becomes the query string.
    pub fn get(&self, args: impl Into<Args>) -> Result<Exchange, NetError> {
        self.convenience(Method::GET, args.into())
    }

    /// POST `url[, data][, success][, error]`; data becomes the body.
    pub fn post(&self, args: impl Into<Args>) -> Result<Exchange, NetError> {
        self.convenience(Method::POST, args.into())
    }

    /// PUT `url[, data][, success][, error]`; data becomes the body.
    pub fn put(&self, args: impl Into<Args>) -> Result<Exchange, NetError> {
        self.convenience(Method::PUT, args.into())
    }

    /// DELETE `url[, data][, success][, error]`; data becomes the query string.
    pub fn del(&self, args: impl Into<Args>) -> Result<Exchange, NetError> {
        self.convenience(Method::DELETE, args.into())
    }

    /// Only malformed arguments are returned as errors; they are rejected
    /// before any connection is attempted.
    fn convenience(&self, method: Method, args: Args) -> Result<Exchange, NetError> {
        let resolved = args::resolve(args)?;
        let mut options = RequestOptions::new(resolved.url)
            .method(method)
            .data(resolved.data);
        options.callbacks.success = resolved.success;
        options.callbacks.error = resolved.error;
        Ok(self.request(options))
    }
}

/// Builder for creating a [`Client`].
#[derive(Default)]
pub struct ClientBuilder {
    transport: Option<Arc<dyn Transport>>,
    user_agent: Option<String>,
    max_redirects: Option<usize>,
}

impl ClientBuilder {
    /// Use a custom transport instead of the built-in HTTP/1.1 one.
    pub fn transport(mut self, transport: Arc<dyn Transport>) -> Self {
        self.transport = Some(transport);
        self
    }

    /// Override the `User-Agent` header (default [`USER_AGENT`]).
    pub fn user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = Some(user_agent.into());
        self
    }

    /// Redirect limit of the built-in transport (default 20). Ignored when a
    /// custom transport is set.
    pub fn max_redirects(mut self, max: usize) -> Self {
        self.max_redirects = Some(max);
        self
    }

    /// Build the client.
    pub fn build(self) -> Client {
        let max_redirects = self.max_redirects.unwrap_or(DEFAULT_MAX_REDIRECTS);
        let transport = self
            .transport
            .unwrap_or_else(|| Arc::new(HttpTransport::with_max_redirects(max_redirects)));

        Client {
            transport,
            user_agent: self.user_agent.unwrap_or_else(|| USER_AGENT.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::http::connection::Connection;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use url::Url;

    /// Counts open attempts and always refuses.
    #[derive(Default)]
    struct Refusing {
        opened: AtomicUsize,
    }

    impl Transport for Refusing {
        fn open(&self, _url: &Url) -> Result<Box<dyn Connection>, NetError> {
            self.opened.fetch_add(1, Ordering::SeqCst);
            Err(NetError::ConnectionFailed)
        }
    }

    #[test]
    fn test_default_user_agent() {
        let client = Client::new();
        assert!(client.user_agent().starts_with("syncnet HttpClient "));
        assert!(client.user_agent().ends_with(env!("CARGO_PKG_VERSION")));
    }

    #[test]
    fn test_builder_user_agent() {
        let client = Client::builder().user_agent("custom/1.0").build();
        assert_eq!(client.user_agent(), "custom/1.0");
    }

    #[test]
    fn test_argument_errors_never_reach_transport() {
        let transport = Arc::new(Refusing::default());
        let client = Client::builder().transport(transport.clone()).build();

        let err = client
            .post(vec![crate::urlrequest::Arg::Data("x".into())])
            .unwrap_err();
        assert_eq!(err, NetError::InvalidArguments("first argument (url) must be string"));
        assert_eq!(transport.opened.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn test_convenience_routes_through_transport() {
        let transport = Arc::new(Refusing::default());
        let client = Client::builder().transport(transport.clone()).build();

        for exchange in [
            client.get("http://localhost/").unwrap(),
            client.post(("http://localhost/", "a=1")).unwrap(),
            client.put(("http://localhost/", vec![1u8, 2, 3])).unwrap(),
            client.del("http://localhost/").unwrap(),
        ] {
            assert!(exchange.done());
            assert_eq!(exchange.status(), 0);
            assert_eq!(exchange.error(), Some(&NetError::ConnectionFailed));
        }
        assert_eq!(transport.opened.load(Ordering::SeqCst), 4);
    }

    #[test]
    fn test_methods_are_fixed_by_convenience_call() {
        let client = Client::builder()
            .transport(Arc::new(Refusing::default()))
            .build();
        assert_eq!(*client.get("http://h/").unwrap().method(), Method::GET);
        assert_eq!(*client.post("http://h/").unwrap().method(), Method::POST);
        assert_eq!(*client.put("http://h/").unwrap().method(), Method::PUT);
        assert_eq!(*client.del("http://h/").unwrap().method(), Method::DELETE);
    }
}
