//! Wire events exchanged with board clients.
//!
//! Every frame is a JSON object `{"event": <name>, "data": <payload>}`.
//! Outbound [`ServerEvent`]s are encoded with serde's adjacent tagging.
//! Inbound [`ClientEvent`]s are decoded leniently: missing, `null` or
//! wrongly-typed payload fields are treated as absent rather than rejecting
//! the whole frame.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::idea::{Idea, NewIdea};

pub mod errors;

pub use errors::ProtocolError;

/// Events a client sends to the server.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "event", content = "data", rename_all = "kebab-case")]
pub enum ClientEvent {
    /// Set the session's display attributes.
    Join(JoinPayload),
    /// Submit a new idea.
    PostIdea(NewIdea),
    /// Like the idea with this id.
    LikeIdea(String),
}

/// Payload of a `join` event.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct JoinPayload {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub profession: Option<String>,
}

/// Events the server sends to clients.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "event", content = "data", rename_all = "kebab-case")]
pub enum ServerEvent {
    /// Full collection, sent once to a client right after it connects.
    InitialIdeas(Vec<Idea>),
    /// A newly posted idea, broadcast to every client.
    Idea(Idea),
    /// A like count update, broadcast to every client.
    IdeaLike(IdeaLike),
}

/// Payload of an `idea-like` event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IdeaLike {
    pub id: String,
    pub likes: u64,
}

#[derive(Deserialize)]
struct RawFrame {
    event: String,
    #[serde(default)]
    data: Value,
}

impl ClientEvent {
    /// Decode a text frame.
    pub fn from_json(text: &str) -> Result<Self, ProtocolError> {
        let frame: RawFrame =
            serde_json::from_str(text).map_err(|source| ProtocolError::InvalidFrame { source })?;

        match frame.event.as_str() {
            "join" => Ok(ClientEvent::Join(JoinPayload {
                name: string_field(&frame.data, "name"),
                profession: string_field(&frame.data, "profession"),
            })),
            "post-idea" => Ok(ClientEvent::PostIdea(NewIdea {
                title: string_field(&frame.data, "title"),
                body: string_field(&frame.data, "body"),
                audience: string_field(&frame.data, "audience"),
            })),
            "like-idea" => match frame.data {
                Value::String(id) => Ok(ClientEvent::LikeIdea(id)),
                other => Err(ProtocolError::InvalidPayload {
                    event: frame.event,
                    reason: format!("expected an idea id string, got {other}"),
                }),
            },
            _ => Err(ProtocolError::UnknownEvent { event: frame.event }),
        }
    }

    /// Event name as it appears on the wire.
    pub fn name(&self) -> &'static str {
        match self {
            ClientEvent::Join(_) => "join",
            ClientEvent::PostIdea(_) => "post-idea",
            ClientEvent::LikeIdea(_) => "like-idea",
        }
    }
}

impl ServerEvent {
    /// Encode as a text frame.
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }
}

fn string_field(data: &Value, key: &str) -> Option<String> {
    data.get(key).and_then(Value::as_str).map(str::to_string)
}
