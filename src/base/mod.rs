//! Base types and error handling.
//!
//! - [`NetError`](neterror::NetError): every failure an exchange can report
//! - [`ExchangeState`](exchangestate::ExchangeState): exchange lifecycle states

pub mod context;
pub mod exchangestate;
pub mod neterror;
