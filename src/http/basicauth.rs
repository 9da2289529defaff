//! HTTP Basic authentication.

use base64::{engine::general_purpose, Engine as _};
use percent_encoding::percent_decode_str;
use url::Url;

/// A username/password pair.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Credentials {
    pub username: String,
    pub password: String,
}

impl Credentials {
    /// Resolve credentials from the URL userinfo and explicit options.
    ///
    /// Each explicit value takes precedence over the one embedded in the URL.
    /// Returns `None` unless both a username and a password are known.
    pub fn resolve(url: &Url, username: Option<&str>, password: Option<&str>) -> Option<Self> {
        let url_user = Some(url.username())
            .filter(|u| !u.is_empty())
            .map(decode_userinfo);
        let url_pass = url.password().map(decode_userinfo);

        let username = username.map(str::to_string).or(url_user)?;
        let password = password.map(str::to_string).or(url_pass)?;
        Some(Self { username, password })
    }

    /// The `Authorization` header value: `Basic base64(username:password)`.
    pub fn to_header_value(&self) -> String {
        let creds = format!("{}:{}", self.username, self.password);
        let encoded = general_purpose::STANDARD.encode(creds);
        format!("Basic {}", encoded)
    }
}

fn decode_userinfo(raw: &str) -> String {
    percent_decode_str(raw).decode_utf8_lossy().into_owned()
}
