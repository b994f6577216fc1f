//! Event relay between connected clients and the idea store.
//!
//! Each connection calls [`Relay::connect`] once, sends the returned snapshot
//! to its client, then feeds decoded [`ClientEvent`]s to [`Relay::handle`]
//! while forwarding everything from its broadcast receiver back to the
//! client. New ideas and like updates go to every subscriber, including the
//! connection that caused them.
//!
//! Store mutations run under a mutex held across the whole
//! load-modify-save-broadcast cycle, so two clients posting or liking at the
//! same time cannot overwrite each other's change.

use std::sync::Arc;

use tokio::sync::{Mutex, broadcast};
use tracing::{debug, info};
use uuid::Uuid;

use crate::{
    Result,
    clock::{Clock, SystemClock},
    idea::{Collection, Idea, NewIdea},
    protocol::{ClientEvent, IdeaLike, ServerEvent},
    session::Session,
    store::Store,
};


/// Number of broadcast events buffered per subscriber before it starts
/// missing updates.
pub const DEFAULT_CHANNEL_CAPACITY: usize = 256;

/// Shared hub that every connection talks to. Cloning is cheap.
#[derive(Clone)]
pub struct Relay {
    store: Arc<Mutex<Store>>,
    events: broadcast::Sender<ServerEvent>,
    clock: Arc<dyn Clock>,
}

/// A freshly connected client.
pub struct Connection {
    /// Identifier used in logs.
    pub id: Uuid,
    /// Collection as it was when the client connected.
    pub snapshot: Collection,
    /// The client's identity, empty until it joins.
    pub session: Session,
    /// Broadcasts to forward to the client.
    pub events: broadcast::Receiver<ServerEvent>,
}

impl Connection {
    /// The one-time `initial-ideas` event for this client.
    pub fn initial_ideas(&self) -> ServerEvent {
        ServerEvent::InitialIdeas(self.snapshot.ideas.clone())
    }
}

impl Relay {
    /// A relay over `store` using the system clock.
    pub fn new(store: Store) -> Self {
        Self::with_clock(store, Arc::new(SystemClock))
    }

    /// A relay over `store` taking timestamps from `clock`.
    pub fn with_clock(store: Store, clock: Arc<dyn Clock>) -> Self {
        let (events, _) = broadcast::channel(DEFAULT_CHANNEL_CAPACITY);
        Self {
            store: Arc::new(Mutex::new(store)),
            events,
            clock,
        }
    }

    /// Register a new client.
    ///
    /// The broadcast subscription is taken before the snapshot is read, so an
    /// idea posted in between shows up in the snapshot, as a broadcast, or
    /// both, but is never lost.
    pub async fn connect(&self) -> Connection {
        let events = self.events.subscribe();
        let snapshot = self.ideas().await;
        let id = Uuid::new_v4();
        info!(connection = %id, ideas = snapshot.len(), "Client connected");
        Connection {
            id,
            snapshot,
            session: Session::new(),
            events,
        }
    }

    /// Apply one client event.
    ///
    /// Only persistence write failures are returned. Unknown ids and
    /// incomplete payloads are handled silently.
    pub async fn handle(&self, session: &mut Session, event: ClientEvent) -> Result<()> {
        match event {
            ClientEvent::Join(payload) => {
                let rejoined = session.has_joined();
                session.join(payload.name, payload.profession);
                info!(
                    rejoined,
                    "{} ({}) joined",
                    session.author(),
                    session.profession()
                );
            }
            ClientEvent::PostIdea(submission) => {
                self.post_idea(session, submission).await?;
            }
            ClientEvent::LikeIdea(id) => {
                self.like_idea(&id).await?;
            }
        }
        Ok(())
    }

    /// Create, persist and broadcast a new idea.
    pub async fn post_idea(&self, session: &Session, submission: NewIdea) -> Result<Idea> {
        let store = self.store.lock().await;
        let mut collection = store.load().await;
        let id = collection.fresh_id(self.clock.as_ref());
        let idea = Idea::from_submission(submission, session, id, self.clock.now_rfc3339());
        collection.prepend(idea.clone());
        store.save(&collection).await?;

        info!(
            id = %idea.id,
            "New idea by {}, audience: {}",
            idea.author,
            idea.audience
        );
        // Broadcast before releasing the lock so clients see updates in save order.
        self.broadcast(ServerEvent::Idea(idea.clone()));
        Ok(idea)
    }

    /// Add a like to the idea with `id`, persist and broadcast the new count.
    ///
    /// Returns `None` without saving or broadcasting when no idea has that id.
    pub async fn like_idea(&self, id: &str) -> Result<Option<IdeaLike>> {
        let store = self.store.lock().await;
        let mut collection = store.load().await;
        let Some(idea) = collection.get_mut(id) else {
            debug!(id, "Like for unknown idea ignored");
            return Ok(None);
        };
        let update = IdeaLike {
            id: id.to_string(),
            likes: idea.like(),
        };
        store.save(&collection).await?;

        info!(id, likes = update.likes, "Idea liked");
        self.broadcast(ServerEvent::IdeaLike(update.clone()));
        Ok(Some(update))
    }

    /// Current collection as stored on disk.
    pub async fn ideas(&self) -> Collection {
        self.store.lock().await.load().await
    }

    /// Number of clients currently subscribed to broadcasts.
    pub fn client_count(&self) -> usize {
        self.events.receiver_count()
    }

    fn broadcast(&self, event: ServerEvent) {
        // An error only means nobody is connected right now.
        if self.events.send(event).is_err() {
            debug!("No connected clients to broadcast to");
        }
    }
}
