use clap::ValueEnum;
use indexmap::IndexSet;
use serde::{Deserialize, Serialize};

/// Base URL for linking a reported username to its profile page. Usernames in
/// standard export files are URL-safe, so they are appended without escaping.
pub const PROFILE_BASE_URL: &str = "https://instagram.com/";

/// Which of the two export kinds a given file represents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Followers,
    Following,
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Role::Followers => write!(f, "followers"),
            Role::Following => write!(f, "following"),
        }
    }
}

/// Canonical collection of usernames extracted from one export file.
///
/// Membership is set semantics (unique, exact string equality); iteration
/// follows the order usernames first appeared in the source document, so
/// derived output is deterministic without sorting.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UsernameSet {
    entries: IndexSet<String>,
}

impl UsernameSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts a username, keeping the first-seen position. Returns false when
    /// the username was already present (a later duplicate is a no-op).
    pub fn insert(&mut self, username: impl Into<String>) -> bool {
        self.entries.insert(username.into())
    }

    pub fn contains(&self, username: &str) -> bool {
        self.entries.contains(username)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(String::as_str)
    }
}

impl<S: Into<String>> FromIterator<S> for UsernameSet {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        let mut set = UsernameSet::new();
        for username in iter {
            set.insert(username);
        }
        set
    }
}

/// The two asymmetric-relationship lists produced by one comparison.
///
/// `not_following_back` holds usernames present in `following` but absent from
/// `followers`; `dont_follow_back` the reverse. Each list preserves its source
/// set's insertion order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ComparisonResult {
    pub not_following_back: Vec<String>,
    pub dont_follow_back: Vec<String>,
}

pub fn profile_url(username: &str) -> String {
    format!("{PROFILE_BASE_URL}{username}")
}
