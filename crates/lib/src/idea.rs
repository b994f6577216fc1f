//! Ideas and the collection that holds them.
//!
//! An [`Idea`] is immutable once created except for its like counter. The
//! [`Collection`] keeps ideas newest-first and is always loaded and saved as
//! a whole.

use rand::Rng;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use crate::{clock::Clock, session::Session};

/// Maximum number of characters kept from a submitted title.
pub const MAX_TITLE_CHARS: usize = 200;

/// Maximum number of characters kept from a submitted body.
pub const MAX_BODY_CHARS: usize = 2000;

/// Audience used when a submission does not name one.
pub const DEFAULT_AUDIENCE: &str = "All";

/// Length of the random suffix in generated ids.
const ID_SUFFIX_LEN: usize = 6;

const BASE36_DIGITS: &[u8; 36] = b"0123456789abcdefghijklmnopqrstuvwxyz";

/// A posted idea as stored on disk and sent to clients.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Idea {
    pub id: String,
    pub title: String,
    pub body: String,
    pub author: String,
    pub profession: String,
    /// `"All"` or a profession name. Advisory only; filtering is left to clients.
    pub audience: String,
    /// RFC 3339 creation time.
    pub created_at: String,
    /// Stored counts that are missing, `null` or not a non-negative integer
    /// read as zero.
    #[serde(default, deserialize_with = "lenient_count")]
    pub likes: u64,
}

impl Idea {
    /// Build a new idea from a client submission and the poster's session.
    ///
    /// Title and body are truncated, a missing or empty audience becomes
    /// [`DEFAULT_AUDIENCE`], and the like counter starts at zero.
    pub fn from_submission(
        submission: NewIdea,
        session: &Session,
        id: String,
        created_at: String,
    ) -> Self {
        let audience = submission
            .audience
            .filter(|a| !a.is_empty())
            .unwrap_or_else(|| DEFAULT_AUDIENCE.to_string());

        Self {
            id,
            title: truncate_chars(submission.title.as_deref().unwrap_or(""), MAX_TITLE_CHARS),
            body: truncate_chars(submission.body.as_deref().unwrap_or(""), MAX_BODY_CHARS),
            author: session.author().to_string(),
            profession: session.profession().to_string(),
            audience,
            created_at,
            likes: 0,
        }
    }

    /// Add one like and return the new count.
    pub fn like(&mut self) -> u64 {
        self.likes = self.likes.saturating_add(1);
        self.likes
    }
}

/// The client-supplied part of a new idea. Every field is optional.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewIdea {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub body: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub audience: Option<String>,
}

impl NewIdea {
    /// Convenience constructor with every field present.
    pub fn new(
        title: impl Into<String>,
        body: impl Into<String>,
        audience: impl Into<String>,
    ) -> Self {
        Self {
            title: Some(title.into()),
            body: Some(body.into()),
            audience: Some(audience.into()),
        }
    }
}

/// Every idea on the board, newest first.
///
/// This is also the shape of the persisted document: `{ "ideas": [...] }`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Collection {
    #[serde(default)]
    pub ideas: Vec<Idea>,
}

impl Collection {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.ideas.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ideas.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Idea> {
        self.ideas.iter()
    }

    /// Insert an idea at the front.
    pub fn prepend(&mut self, idea: Idea) {
        self.ideas.insert(0, idea);
    }

    /// First idea with the given id.
    pub fn get(&self, id: &str) -> Option<&Idea> {
        self.ideas.iter().find(|i| i.id == id)
    }

    /// First idea with the given id, mutably.
    pub fn get_mut(&mut self, id: &str) -> Option<&mut Idea> {
        self.ideas.iter_mut().find(|i| i.id == id)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.get(id).is_some()
    }

    /// Generate an id that is not yet used by any idea in this collection.
    pub fn fresh_id(&self, clock: &dyn Clock) -> String {
        loop {
            let id = generate_id(clock);
            if !self.contains(&id) {
                return id;
            }
        }
    }
}

impl From<Vec<Idea>> for Collection {
    fn from(ideas: Vec<Idea>) -> Self {
        Self { ideas }
    }
}

/// Create an idea id: the current time in base 36, a dash, then six random
/// base-36 characters.
pub fn generate_id(clock: &dyn Clock) -> String {
    let mut rng = rand::thread_rng();
    let suffix: String = (0..ID_SUFFIX_LEN)
        .map(|_| BASE36_DIGITS[rng.gen_range(0..BASE36_DIGITS.len())] as char)
        .collect();
    format!("{}-{suffix}", to_base36(clock.now_millis()))
}

fn to_base36(mut n: u64) -> String {
    if n == 0 {
        return "0".to_string();
    }
    let mut digits = Vec::new();
    while n > 0 {
        digits.push(BASE36_DIGITS[(n % 36) as usize]);
        n /= 36;
    }
    digits.reverse();
    String::from_utf8(digits).unwrap_or_default()
}

fn lenient_count<'de, D>(deserializer: D) -> Result<u64, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(value.as_ref().and_then(Value::as_u64).unwrap_or(0))
}

/// Keep at most `max` characters of `s`, never splitting a character.
pub fn truncate_chars(s: &str, max: usize) -> String {
    match s.char_indices().nth(max) {
        Some((byte_idx, _)) => s[..byte_idx].to_string(),
        None => s.to_string(),
    }
}
