//! HTTP request and response plumbing.
//!
//! - [`connection`]: the `Transport`/`Connection` seam an exchange drives
//! - [`transaction`]: the default HTTP/1.1 transport with redirect following
//! - [`requestbody`], [`orderedheaders`], [`basicauth`]: request side
//! - [`responsebody`], [`contentstream`], [`mimeparams`]: response side

pub mod basicauth;
pub mod connection;
pub mod contentstream;
pub mod mimeparams;
pub mod orderedheaders;
pub mod requestbody;
pub mod responsebody;
pub mod transaction;

// Re-exports for convenience
pub use connection::{Connection, ResponseHead, Transport};
pub use orderedheaders::Headers;
pub use requestbody::RequestData;
pub use transaction::{HttpConnection, HttpTransport};
