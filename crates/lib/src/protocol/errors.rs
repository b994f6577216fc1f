//! Error types for decoding client frames.

use thiserror::Error;

/// Errors that can occur while decoding an inbound frame.
///
/// None of these are reported back to the client; the connection simply
/// ignores the frame.
#[non_exhaustive]
#[derive(Debug, Error)]
pub enum ProtocolError {
    /// The frame is not a JSON object with an `event` name.
    #[error("Invalid frame")]
    InvalidFrame {
        /// The underlying JSON error
        #[source]
        source: serde_json::Error,
    },

    /// The event name is not one the server handles.
    #[error("Unknown event: {event}")]
    UnknownEvent {
        /// The event name that was received
        event: String,
    },

    /// The payload cannot be interpreted for this event.
    #[error("Invalid payload for {event}: {reason}")]
    InvalidPayload {
        /// The event the payload belonged to
        event: String,
        /// What was wrong with it
        reason: String,
    },
}

impl ProtocolError {
    /// Check if the frame named an event the server does not know.
    pub fn is_unknown_event(&self) -> bool {
        matches!(self, ProtocolError::UnknownEvent { .. })
    }
}

impl From<ProtocolError> for crate::Error {
    fn from(err: ProtocolError) -> Self {
        crate::Error::Protocol(err)
    }
}
