//! Socket connection establishment.
//!
//! - [`connectjob`]: DNS → TCP → TLS connection flow
//! - [`client`]: the connected socket type
//! - `tls`: TLS configuration with BoringSSL (feature `boringssl`)

pub mod client;
pub mod connectjob;
#[cfg(feature = "boringssl")]
pub mod tls;
