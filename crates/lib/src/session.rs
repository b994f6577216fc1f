//! Per-connection identity.
//!
//! A [`Session`] lives exactly as long as its connection. It is owned by the
//! connection task and handed to the relay by reference, so nothing else can
//! observe or change another client's identity.

/// Author name used when a session never joined or joined without a name.
pub const DEFAULT_AUTHOR: &str = "Anonymous";

/// Profession used when a session never joined or joined without one.
pub const DEFAULT_PROFESSION: &str = "Unknown";

/// Display attributes claimed by a client through `join`.
///
/// Claims are not verified; a client may call itself anything.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Session {
    name: Option<String>,
    profession: Option<String>,
}

impl Session {
    /// A session that has not joined yet.
    pub fn new() -> Self {
        Self::default()
    }

    /// Record the client's display attributes. The last call wins.
    ///
    /// Missing or empty values fall back to [`DEFAULT_AUTHOR`] and
    /// [`DEFAULT_PROFESSION`].
    pub fn join(&mut self, name: Option<String>, profession: Option<String>) {
        self.name = Some(non_empty_or(name, DEFAULT_AUTHOR));
        self.profession = Some(non_empty_or(profession, DEFAULT_PROFESSION));
    }

    /// Whether `join` has been called on this session.
    pub fn has_joined(&self) -> bool {
        self.name.is_some()
    }

    /// Name stamped on ideas posted from this session.
    pub fn author(&self) -> &str {
        self.name.as_deref().unwrap_or(DEFAULT_AUTHOR)
    }

    /// Profession stamped on ideas posted from this session.
    pub fn profession(&self) -> &str {
        self.profession.as_deref().unwrap_or(DEFAULT_PROFESSION)
    }
}

fn non_empty_or(value: Option<String>, default: &str) -> String {
    value
        .filter(|v| !v.is_empty())
        .unwrap_or_else(|| default.to_string())
}
