use serde::{Deserialize, Serialize};

/// A journal post. Field names on the wire match the stored column names,
/// so the entry text travels as `entry`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Entry {
    pub id: String,
    /// RFC 3339 creation time. Kept as the stored string so rows written by
    /// older clients (naive ISO-8601) round-trip untouched.
    pub timestamp: String,
    pub author: String,
    pub title: String,
    #[serde(rename = "entry")]
    pub body: String,
    pub hearts: i64,
    pub likes: i64,
}

/// A reply attached to an entry by id. The entry is not required to exist.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Comment {
    pub id: i64,
    pub entry_id: String,
    pub author: String,
    #[serde(rename = "comment")]
    pub body: String,
    pub timestamp: String,
}

/// Counter snapshot returned after a reaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Reactions {
    pub hearts: i64,
    pub likes: i64,
}

/// Reaction name as supplied by the caller.
///
/// Anything other than `hearts` or `likes` parses to `Other` and is treated
/// as a no-op by the store rather than rejected.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReactionKind {
    Hearts,
    Likes,
    Other(String),
}

impl ReactionKind {
    pub fn as_str(&self) -> &str {
        match self {
            Self::Hearts => "hearts",
            Self::Likes => "likes",
            Self::Other(raw) => raw,
        }
    }

    /// Counter column this kind increments, if any.
    pub fn column(&self) -> Option<&'static str> {
        match self {
            Self::Hearts => Some("hearts"),
            Self::Likes => Some("likes"),
            Self::Other(_) => None,
        }
    }
}

impl From<&str> for ReactionKind {
    fn from(raw: &str) -> Self {
        match raw {
            "hearts" => Self::Hearts,
            "likes" => Self::Likes,
            other => Self::Other(other.to_string()),
        }
    }
}

impl std::fmt::Display for ReactionKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
