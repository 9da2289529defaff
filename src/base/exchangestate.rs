/// Outcome recorded when an exchange reaches `Completed`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Success,
    Error,
}

/// The lifecycle of an `Exchange`.
///
/// `Initialized → Connecting → Sending → Receiving → Completed → Closed`.
/// `Sending` is skipped for methods without a body, and failures jump straight
/// to `Completed(Outcome::Error)`. Every path ends in `Closed`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ExchangeState {
    /// Options normalized, nothing opened yet.
    #[default]
    Initialized,

    /// Opening and configuring the connection.
    Connecting,

    /// Transmitting the request body.
    Sending,

    /// Waiting for and reading the response.
    Receiving,

    /// Exactly one of success/error has been dispatched.
    Completed(Outcome),

    /// Streams and connection released. Terminal.
    Closed,
}

impl ExchangeState {
    pub fn is_terminal(self) -> bool {
        matches!(self, ExchangeState::Closed)
    }

    /// Whether `next` is a legal successor of `self`.
    pub fn can_advance_to(self, next: ExchangeState) -> bool {
        use ExchangeState::*;
        match (self, next) {
            (Initialized, Connecting) => true,
            (Connecting, Sending) | (Connecting, Receiving) => true,
            (Sending, Receiving) => true,
            (Initialized | Connecting | Sending | Receiving, Completed(_)) => true,
            (Completed(_), Closed) => true,
            _ => false,
        }
    }
}
