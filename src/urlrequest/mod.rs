//! Request options, callbacks and the exchange that runs them.
//!
//! - [`options`]: `RequestOptions` and their normalization
//! - [`args`]: positional arguments of the convenience calls
//! - [`callbacks`]: typed `success`/`error`/`complete`/`before_send`/`part` slots
//! - [`exchange`]: one request/response cycle

pub mod args;
pub mod callbacks;
pub mod exchange;
pub mod options;

pub use args::{on_error, on_success, Arg, Args};
pub use callbacks::{CallbackError, CallbackResult, Callbacks, Content};
pub use exchange::Exchange;
pub use options::{NormalizedOptions, RequestOptions, DEFAULT_CONTENT_TYPE};
