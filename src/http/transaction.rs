//! Default blocking transport: HTTP/1.1 over hyper.
//!
//! Each [`HttpConnection`] owns a current-thread tokio runtime and drives it
//! with `block_on`, so the calling thread blocks for connect, send and every
//! body read. It must not be used from inside an async context.

use crate::base::neterror::NetError;
use crate::http::connection::{Connection, ResponseHead, Transport};
use crate::http::orderedheaders::Headers;
use crate::http::responsebody::BodyReader;
use crate::socket::connectjob::ConnectJob;
use bytes::Bytes;
use http::header::{HeaderName, HeaderValue, HOST, LOCATION};
use http::{Method, Request, Response, StatusCode};
use http_body_util::Full;
use hyper::body::Incoming;
use hyper_util::rt::TokioIo;
use std::io::{Read, Write};
use std::sync::Arc;
use tokio::runtime::Runtime;
use tokio::task::JoinHandle;
use url::{Position, Url};

/// Chromium's redirect limit.
pub const DEFAULT_MAX_REDIRECTS: usize = 20;

/// Opens [`HttpConnection`]s for `http` (and, with the `boringssl` feature,
/// `https`) URLs.
#[derive(Debug, Clone)]
pub struct HttpTransport {
    max_redirects: usize,
}

impl Default for HttpTransport {
    fn default() -> Self {
        Self {
            max_redirects: DEFAULT_MAX_REDIRECTS,
        }
    }
}

impl HttpTransport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_max_redirects(max_redirects: usize) -> Self {
        Self { max_redirects }
    }

    pub fn max_redirects(&self) -> usize {
        self.max_redirects
    }
}

impl Transport for HttpTransport {
    fn open(&self, url: &Url) -> Result<Box<dyn Connection>, NetError> {
        match url.scheme() {
            "http" | "https" => {}
            _ => return Err(NetError::UnknownUrlScheme),
        }
        if url.host_str().is_none() {
            return Err(NetError::InvalidUrl);
        }
        Ok(Box::new(HttpConnection::new(url.clone(), self.max_redirects)))
    }
}

/// Internal state machine states.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    Idle,
    Connected,
    Disconnected,
}

pub struct HttpConnection {
    url: Url,
    method: Method,
    headers: Headers,
    follow_redirects: bool,
    max_redirects: usize,
    do_output: bool,
    body: Vec<u8>,
    state: State,
    runtime: Option<Arc<Runtime>>,
    driver: Option<JoinHandle<()>>,
    head: Option<ResponseHead>,
    response_body: Option<Incoming>,
}

impl HttpConnection {
    pub fn new(url: Url, max_redirects: usize) -> Self {
        Self {
            url,
            method: Method::GET,
            headers: Headers::new(),
            follow_redirects: true,
            max_redirects,
            do_output: false,
            body: Vec::new(),
            state: State::Idle,
            runtime: None,
            driver: None,
            head: None,
            response_body: None,
        }
    }

    fn take_body(&mut self) -> Option<Box<dyn Read>> {
        let runtime = self.runtime.clone()?;
        let body = self.response_body.take()?;
        Some(Box::new(BodyReader::new(runtime, body)))
    }
}

impl Connection for HttpConnection {
    fn url(&self) -> &Url {
        &self.url
    }

    fn set_follow_redirects(&mut self, follow: bool) {
        self.follow_redirects = follow;
    }

    fn set_request_method(&mut self, method: Method) {
        self.method = method;
    }

    fn set_request_property(&mut self, name: &str, value: &str) -> Result<(), NetError> {
        HeaderName::from_bytes(name.as_bytes()).map_err(|_| NetError::InvalidHeader)?;
        HeaderValue::from_str(value).map_err(|_| NetError::InvalidHeader)?;
        self.headers.insert(name, value);
        Ok(())
    }

    fn set_do_output(&mut self, enabled: bool) {
        self.do_output = enabled;
    }

    fn output_stream(&mut self) -> Result<&mut dyn Write, NetError> {
        if !self.do_output {
            return Err(NetError::RequestBodyFailed(
                "output is not enabled for this connection".into(),
            ));
        }
        if self.state != State::Idle {
            return Err(NetError::RequestBodyFailed("request already sent".into()));
        }
        Ok(&mut self.body)
    }

    fn connect(&mut self) -> Result<(), NetError> {
        match self.state {
            State::Idle => {}
            State::Connected => return Ok(()),
            State::Disconnected => return Err(NetError::NotConnected),
        }

        let runtime = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .map_err(|e| {
                tracing::debug!(error = %e, "failed to build runtime");
                NetError::RuntimeUnavailable
            })?;
        let runtime = Arc::new(runtime);

        let mut method = self.method.clone();
        let mut url = self.url.clone();
        let mut headers = self.headers.clone();
        let mut body = if self.do_output {
            Bytes::from(std::mem::take(&mut self.body))
        } else {
            Bytes::new()
        };
        let mut redirects = 0;

        loop {
            tracing::debug!(method = %method, url = %url, "sending request");
            let (response, driver) =
                runtime.block_on(send_once(&method, &url, &headers, body.clone()))?;
            let status = response.status();

            let location = if self.follow_redirects && status.is_redirection() {
                response.headers().get(LOCATION).cloned()
            } else {
                None
            };

            let Some(location) = location else {
                let head = ResponseHead {
                    status: status.as_u16(),
                    message: reason_phrase(&response),
                    headers: response.headers().clone(),
                    url: url.clone(),
                };
                tracing::debug!(url = %url, status = head.status, "response received");
                self.url = url;
                self.head = Some(head);
                self.response_body = Some(response.into_body());
                self.driver = Some(driver);
                self.runtime = Some(runtime);
                self.state = State::Connected;
                return Ok(());
            };

            driver.abort();
            drop(response);

            if redirects >= self.max_redirects {
                return Err(NetError::TooManyRedirects);
            }
            let next = location
                .to_str()
                .ok()
                .and_then(|loc| url.join(loc).ok())
                .ok_or(NetError::InvalidRedirect)?;
            if !matches!(next.scheme(), "http" | "https") {
                return Err(NetError::InvalidRedirect);
            }

            if rewrites_to_get(status, &method) {
                method = Method::GET;
                body = Bytes::new();
                headers.remove("Content-Type");
                headers.remove("Content-Length");
            }
            if next.origin() != url.origin() {
                headers.remove("Authorization");
                headers.remove("Host");
            }

            tracing::debug!(
                from = %url,
                to = %next,
                status = status.as_u16(),
                "following redirect"
            );
            url = next;
            redirects += 1;
        }
    }

    fn response(&self) -> Option<&ResponseHead> {
        self.head.as_ref()
    }

    fn input_stream(&mut self) -> Result<Box<dyn Read>, NetError> {
        let head = self.head.as_ref().ok_or(NetError::NotConnected)?;
        if head.status >= 400 {
            return Err(NetError::HttpStatus {
                status: head.status,
                message: head.message.clone(),
            });
        }
        self.take_body().ok_or(NetError::ContentConsumed)
    }

    fn error_stream(&mut self) -> Option<Box<dyn Read>> {
        match self.head.as_ref() {
            Some(head) if head.status >= 400 => self.take_body(),
            _ => None,
        }
    }

    fn disconnect(&mut self) {
        if self.state == State::Disconnected {
            return;
        }
        self.state = State::Disconnected;
        self.response_body = None;
        if let Some(driver) = self.driver.take() {
            driver.abort();
        }
        self.runtime = None;
        tracing::debug!(url = %self.url, "connection released");
    }
}

impl Drop for HttpConnection {
    fn drop(&mut self) {
        self.disconnect();
    }
}

/// 303 always becomes GET (except HEAD); 301/302 downgrade POST and PUT.
fn rewrites_to_get(status: StatusCode, method: &Method) -> bool {
    match status {
        StatusCode::SEE_OTHER => *method != Method::HEAD && *method != Method::GET,
        StatusCode::MOVED_PERMANENTLY | StatusCode::FOUND => {
            *method == Method::POST || *method == Method::PUT
        }
        _ => false,
    }
}

fn reason_phrase(response: &Response<Incoming>) -> String {
    match response.extensions().get::<hyper::ext::ReasonPhrase>() {
        Some(reason) => String::from_utf8_lossy(reason.as_bytes()).into_owned(),
        None => response
            .status()
            .canonical_reason()
            .unwrap_or_default()
            .to_string(),
    }
}

fn host_header(url: &Url) -> Result<HeaderValue, NetError> {
    let host = url.host_str().ok_or(NetError::InvalidUrl)?;
    let value = match url.port() {
        Some(port) => format!("{}:{}", host, port),
        None => host.to_string(),
    };
    HeaderValue::from_str(&value).map_err(|_| NetError::InvalidUrl)
}

async fn send_once(
    method: &Method,
    url: &Url,
    headers: &Headers,
    body: Bytes,
) -> Result<(Response<Incoming>, JoinHandle<()>), NetError> {
    let socket = ConnectJob::connect(url).await?;
    let (mut sender, conn) = hyper::client::conn::http1::handshake(TokioIo::new(socket))
        .await
        .map_err(|e| {
            tracing::debug!(url = %url, error = %e, "HTTP/1.1 handshake failed");
            NetError::ConnectionFailed
        })?;
    let driver = tokio::spawn(async move {
        if let Err(e) = conn.await {
            tracing::debug!(error = %e, "connection closed with error");
        }
    });

    let mut header_map = headers.to_header_map()?;
    if !header_map.contains_key(HOST) {
        header_map.insert(HOST, host_header(url)?);
    }

    let mut request = Request::builder()
        .method(method.clone())
        .uri(&url[Position::BeforePath..Position::AfterQuery])
        .body(Full::new(body))
        .map_err(|_| NetError::InvalidUrl)?;
    *request.headers_mut() = header_map;

    match sender.send_request(request).await {
        Ok(response) => Ok((response, driver)),
        Err(e) => {
            driver.abort();
            tracing::debug!(url = %url, error = %e, "request failed");
            if e.is_parse() {
                Err(NetError::InvalidResponse)
            } else {
                Err(NetError::ConnectionFailed)
            }
        }
    }
}
