//! Read-only view of cookies a server set on a response.

use http::header::SET_COOKIE;
use http::HeaderMap;
use std::collections::HashMap;
use time::OffsetDateTime;

/// One parsed `Set-Cookie` entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Cookie {
    name: String,
    value: String,
    domain: Option<String>,
    path: Option<String>,
    max_age: Option<i64>,
    secure: bool,
    version: u32,
}

impl Cookie {
    /// Parse a single `Set-Cookie` header value.
    ///
    /// Values are percent-decoded. `max_age` comes from `Max-Age` when present,
    /// otherwise from the seconds left until `Expires` (never negative);
    /// session cookies have none.
    pub fn parse(header: &str) -> Option<Self> {
        let parsed = cookie::Cookie::parse_encoded(header)
            .or_else(|_| cookie::Cookie::parse(header))
            .ok()?;

        let max_age = match parsed.max_age() {
            Some(age) => Some(age.whole_seconds()),
            None => parsed
                .expires()
                .and_then(|e| e.datetime())
                .map(|at| (at - OffsetDateTime::now_utc()).whole_seconds().max(0)),
        };

        Some(Self {
            name: parsed.name().to_string(),
            value: parsed.value().to_string(),
            domain: parsed.domain().map(|d| d.to_string()),
            path: parsed.path().map(|p| p.to_string()),
            max_age,
            secure: parsed.secure().unwrap_or(false),
            version: version_attribute(header),
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn value(&self) -> &str {
        &self.value
    }

    pub fn domain(&self) -> Option<&str> {
        self.domain.as_deref()
    }

    pub fn path(&self) -> Option<&str> {
        self.path.as_deref()
    }

    /// Lifetime in seconds, `None` for a session cookie.
    pub fn max_age(&self) -> Option<i64> {
        self.max_age
    }

    pub fn is_secure(&self) -> bool {
        self.secure
    }

    /// `0` for Netscape-style cookies, otherwise the `Version` attribute.
    pub fn version(&self) -> u32 {
        self.version
    }
}

// The cookie crate drops unknown attributes, so Version is read from the raw line.
fn version_attribute(header: &str) -> u32 {
    header
        .split(';')
        .skip(1)
        .filter_map(|attr| attr.split_once('='))
        .find(|(k, _)| k.trim().eq_ignore_ascii_case("version"))
        .and_then(|(_, v)| v.trim().trim_matches('"').parse().ok())
        .unwrap_or(0)
}

/// Collect every `Set-Cookie` header by cookie name; a later entry for the
/// same name replaces an earlier one.
pub fn extract_cookies(headers: &HeaderMap) -> HashMap<String, Cookie> {
    let mut cookies = HashMap::new();
    for value in headers.get_all(SET_COOKIE) {
        let Ok(line) = value.to_str() else {
            tracing::warn!("ignoring non-ASCII Set-Cookie header");
            continue;
        };
        match Cookie::parse(line) {
            Some(cookie) => {
                cookies.insert(cookie.name.clone(), cookie);
            }
            None => tracing::warn!(header = %line, "failed to parse Set-Cookie header"),
        }
    }
    cookies
}
