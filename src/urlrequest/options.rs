//! Request options and their normalization.

use crate::http::orderedheaders::Headers;
use crate::http::requestbody::RequestData;
use crate::urlrequest::callbacks::{CallbackResult, Callbacks, Content};
use crate::urlrequest::exchange::Exchange;
use http::Method;

/// Content type used when neither the options nor the headers name one.
pub const DEFAULT_CONTENT_TYPE: &str = "application/x-www-form-urlencoded;charset=utf-8";

/// Everything describing one request.
///
/// Build with [`RequestOptions::new`] and the chained setters, or fill the
/// public fields directly.
///
/// ```rust,no_run
/// use syncnet::RequestOptions;
///
/// let exchange = syncnet::request(
///     RequestOptions::new("http://localhost:8080/search")
///         .data([("q", "rust")])
///         .on_success(|content, status, _, _| {
///             println!("{} {}", status, content.as_text().unwrap_or_default());
///             Ok(())
///         }),
/// );
/// assert!(exchange.done());
/// ```
#[derive(Debug)]
pub struct RequestOptions {
    pub url: String,
    pub method: Method,
    pub data: RequestData,
    pub headers: Headers,
    pub username: Option<String>,
    pub password: Option<String>,
    pub content_type: Option<String>,
    pub follow_redirects: bool,
    pub binary: bool,
    pub callbacks: Callbacks,
}

impl Default for RequestOptions {
    fn default() -> Self {
        Self {
            url: String::new(),
            method: Method::GET,
            data: RequestData::Empty,
            headers: Headers::new(),
            username: None,
            password: None,
            content_type: None,
            follow_redirects: true,
            binary: false,
            callbacks: Callbacks::default(),
        }
    }
}

impl RequestOptions {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            ..Default::default()
        }
    }

    pub fn method(mut self, method: Method) -> Self {
        self.method = method;
        self
    }

    pub fn data(mut self, data: impl Into<RequestData>) -> Self {
        self.data = data.into();
        self
    }

    /// Add a header, replacing any header of the same name (case-insensitive).
    pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.insert(name, value);
        self
    }

    pub fn headers<K, V, I>(mut self, headers: I) -> Self
    where
        K: Into<String>,
        V: Into<String>,
        I: IntoIterator<Item = (K, V)>,
    {
        for (name, value) in headers {
            self.headers.insert(name, value);
        }
        self
    }

    pub fn username(mut self, username: impl Into<String>) -> Self {
        self.username = Some(username.into());
        self
    }

    pub fn password(mut self, password: impl Into<String>) -> Self {
        self.password = Some(password.into());
        self
    }

    pub fn content_type(mut self, content_type: impl Into<String>) -> Self {
        self.content_type = Some(content_type.into());
        self
    }

    pub fn follow_redirects(mut self, follow: bool) -> Self {
        self.follow_redirects = follow;
        self
    }

    /// Deliver content to `success`/`complete` as bytes instead of text.
    pub fn binary(mut self, binary: bool) -> Self {
        self.binary = binary;
        self
    }

    pub fn on_success<F>(mut self, f: F) -> Self
    where
        F: FnMut(Content<'_>, u16, Option<&str>, &Exchange) -> CallbackResult + 'static,
    {
        self.callbacks.success = Some(Box::new(f));
        self
    }

    pub fn on_error<F>(mut self, f: F) -> Self
    where
        F: FnMut(&str, u16, &Exchange) -> CallbackResult + 'static,
    {
        self.callbacks.error = Some(Box::new(f));
        self
    }

    pub fn on_complete<F>(mut self, f: F) -> Self
    where
        F: FnMut(Content<'_>, u16, Option<&str>, &Exchange) -> CallbackResult + 'static,
    {
        self.callbacks.complete = Some(Box::new(f));
        self
    }

    pub fn before_send<F>(mut self, f: F) -> Self
    where
        F: FnMut(&Exchange) -> CallbackResult + 'static,
    {
        self.callbacks.before_send = Some(Box::new(f));
        self
    }

    pub fn on_part<F>(mut self, f: F) -> Self
    where
        F: FnMut(&[u8], u16, Option<&str>) -> CallbackResult + 'static,
    {
        self.callbacks.part = Some(Box::new(f));
        self
    }

    /// Resolve derived values. Performs no I/O.
    ///
    /// The content type is the explicit option, else the `Content-Type`
    /// header, else [`DEFAULT_CONTENT_TYPE`].
    pub fn normalize(self) -> NormalizedOptions {
        let content_type = self
            .content_type
            .filter(|ct| !ct.is_empty())
            .or_else(|| self.headers.get("Content-Type").map(str::to_string))
            .unwrap_or_else(|| DEFAULT_CONTENT_TYPE.to_string());

        NormalizedOptions {
            url: self.url,
            method: self.method,
            data: self.data,
            headers: self.headers,
            username: self.username,
            password: self.password,
            content_type,
            follow_redirects: self.follow_redirects,
            binary: self.binary,
            callbacks: self.callbacks,
        }
    }
}

/// Options with every default applied and the content type resolved.
#[derive(Debug)]
pub struct NormalizedOptions {
    pub url: String,
    pub method: Method,
    pub data: RequestData,
    pub headers: Headers,
    pub username: Option<String>,
    pub password: Option<String>,
    pub content_type: String,
    pub follow_redirects: bool,
    pub binary: bool,
    pub callbacks: Callbacks,
}

impl NormalizedOptions {
    /// Whether the data travels as a request body rather than a query string.
    pub fn sends_body(&self) -> bool {
        self.method == Method::POST || self.method == Method::PUT
    }
}
