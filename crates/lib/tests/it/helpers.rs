use std::time::Duration;

use ideaboard::{
    ClientEvent, Idea, NewIdea, ServerEvent, Session,
    protocol::{IdeaLike, JoinPayload},
};
use tokio::sync::broadcast::{Receiver, error::TryRecvError};

// Re-export TestContext for convenience
pub use crate::context::TestContext;

/// How long to wait for a broadcast before failing a test.
const RECV_TIMEOUT: Duration = Duration::from_secs(5);

/// A session that has joined with the given identity.
pub fn joined_session(name: &str, profession: &str) -> Session {
    let mut session = Session::new();
    session.join(Some(name.to_string()), Some(profession.to_string()));
    session
}

/// A `join` event with every field set.
pub fn join_event(name: &str, profession: &str) -> ClientEvent {
    ClientEvent::Join(JoinPayload {
        name: Some(name.to_string()),
        profession: Some(profession.to_string()),
    })
}

/// A `post-idea` event with every field set.
pub fn post_event(title: &str, body: &str, audience: &str) -> ClientEvent {
    ClientEvent::PostIdea(NewIdea::new(title, body, audience))
}

/// Wait for the next broadcast on `rx`.
pub async fn next_event(rx: &mut Receiver<ServerEvent>) -> ServerEvent {
    tokio::time::timeout(RECV_TIMEOUT, rx.recv())
        .await
        .expect("Timed out waiting for broadcast")
        .expect("Broadcast channel closed")
}

/// Wait for the next broadcast and require it to be a new idea.
pub async fn next_idea(rx: &mut Receiver<ServerEvent>) -> Idea {
    match next_event(rx).await {
        ServerEvent::Idea(idea) => idea,
        other => panic!("Expected idea broadcast, got {other:?}"),
    }
}

/// Wait for the next broadcast and require it to be a like update.
pub async fn next_like(rx: &mut Receiver<ServerEvent>) -> IdeaLike {
    match next_event(rx).await {
        ServerEvent::IdeaLike(update) => update,
        other => panic!("Expected idea-like broadcast, got {other:?}"),
    }
}

/// Assert nothing is waiting on `rx`.
pub fn assert_no_event(rx: &mut Receiver<ServerEvent>) {
    match rx.try_recv() {
        Err(TryRecvError::Empty) => {}
        other => panic!("Expected no broadcast, got {other:?}"),
    }
}
