//!
//! Ideaboard: a real-time board for sharing and liking ideas.
//!
//! This library holds everything except the network surface, which lives in
//! the `ideaboard` binary.
//!
//! ## Core Concepts
//!
//! * **Ideas (`idea::Idea`)**: A titled submission with an author, a profession, an advisory audience tag and a like counter.
//! * **Collection (`idea::Collection`)**: All ideas, newest first. It is always read and written as a single document.
//! * **Store (`store::Store`)**: A JSON file holding the collection. No caching; every operation goes back to disk.
//! * **Sessions (`session::Session`)**: The display name and profession a connection claims through `join`. Never persisted.
//! * **Protocol (`protocol`)**: The `{event, data}` frames exchanged with clients.
//! * **Relay (`relay::Relay`)**: Applies client events to the store and broadcasts the results to every connected client.

pub mod clock;
pub mod idea;
pub mod protocol;
pub mod relay;
pub mod session;
pub mod store;

pub use clock::{Clock, SystemClock};
#[cfg(any(test, feature = "testing"))]
pub use clock::FixedClock;
pub use idea::{Collection, Idea, NewIdea};
pub use protocol::{ClientEvent, ServerEvent};
pub use relay::{Connection, Relay};
pub use session::Session;
pub use store::Store;

/// Result type used throughout the Ideaboard library.
pub type Result<T> = std::result::Result<T, Error>;

/// Common error type for the Ideaboard library.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Structured persistence errors from the store module
    #[error(transparent)]
    Store(store::StoreError),

    /// Structured decoding errors from the protocol module
    #[error(transparent)]
    Protocol(protocol::ProtocolError),
}

impl Error {
    /// Get the originating module for this error.
    pub fn module(&self) -> &'static str {
        match self {
            Error::Store(_) => "store",
            Error::Protocol(_) => "protocol",
        }
    }

    /// Check if this error is I/O related.
    pub fn is_io_error(&self) -> bool {
        match self {
            Error::Store(store_err) => store_err.is_io_error(),
            _ => false,
        }
    }

    /// Check if this error is a (de)serialization failure.
    pub fn is_serialization_error(&self) -> bool {
        match self {
            Error::Store(store_err) => store_err.is_serialization_error(),
            _ => false,
        }
    }

    /// Check if this error came from decoding a client frame.
    pub fn is_protocol_error(&self) -> bool {
        matches!(self, Error::Protocol(_))
    }
}
