//! Cookies received on a response.
//!
//! Every `Set-Cookie` header is parsed into a [`Cookie`](setcookie::Cookie)
//! when the response head arrives. Cookies are not stored or replayed.

pub mod setcookie;

pub use setcookie::{extract_cookies, Cookie};
