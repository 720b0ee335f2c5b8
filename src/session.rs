//! Session state for one audit: the two named sets, the latest comparison
//! result, and the latest error.
//!
//! The two roles' loads are independent — either may complete first, or not
//! at all. A per-role generation counter decides which load is authoritative:
//! starting a new load supersedes any still-unfinished one for the same role,
//! so completion order never matters.

use crate::compare;
use crate::errors::AuditError;
use crate::model::{ComparisonResult, Role, UsernameSet};
use crate::normalize;
use std::path::Path;

/// A normalized set together with the file it came from.
#[derive(Debug, Clone)]
pub struct StoredSet {
    pub file: String,
    pub set: UsernameSet,
}

/// Handle for one in-flight load, issued by [`AuditSession::begin_load`].
#[derive(Debug, Clone, Copy)]
pub struct LoadTicket {
    role: Role,
    generation: u64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadOutcome {
    Stored { username_count: usize },
    /// A newer load for the same role started after this ticket was issued;
    /// the completed text was discarded.
    Superseded,
}

#[derive(Debug, Default)]
pub struct AuditSession {
    followers: Option<StoredSet>,
    following: Option<StoredSet>,
    followers_generation: u64,
    following_generation: u64,
    last_result: Option<ComparisonResult>,
    last_error: Option<String>,
}

impl AuditSession {
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts a load for `role`, superseding any load still in flight for it.
    pub fn begin_load(&mut self, role: Role) -> LoadTicket {
        let generation = self.generation_mut(role);
        *generation += 1;
        LoadTicket {
            role,
            generation: *generation,
        }
    }

    /// Finishes a load with the raw text read for `ticket`.
    ///
    /// The role's stored set is replaced only after successful normalization;
    /// on failure the previously accepted set stays untouched and the error
    /// is recorded as the session's latest. A stale ticket is ignored.
    pub fn complete_load(
        &mut self,
        ticket: LoadTicket,
        file: &str,
        raw: &str,
    ) -> Result<LoadOutcome, AuditError> {
        if ticket.generation != self.generation(ticket.role) {
            tracing::debug!(role = %ticket.role, file, "ignoring superseded load");
            return Ok(LoadOutcome::Superseded);
        }

        match normalize::normalize(ticket.role, file, raw) {
            Ok(set) => {
                let username_count = set.len();
                tracing::debug!(role = %ticket.role, file, username_count, "stored normalized set");
                *self.slot_mut(ticket.role) = Some(StoredSet {
                    file: file.to_string(),
                    set,
                });
                self.last_error = None;
                Ok(LoadOutcome::Stored { username_count })
            }
            Err(error) => {
                tracing::warn!(role = %ticket.role, file, %error, "load rejected");
                self.last_error = Some(error.to_string());
                Err(error)
            }
        }
    }

    /// Reads `path` to completion and feeds it through [`Self::complete_load`].
    /// The single suspension point is the whole-file read.
    pub async fn load_path(&mut self, role: Role, path: &Path) -> Result<LoadOutcome, AuditError> {
        let ticket = self.begin_load(role);
        let raw = match read_export(role, path).await {
            Ok(raw) => raw,
            Err(error) => {
                self.last_error = Some(error.to_string());
                return Err(error);
            }
        };
        self.complete_load(ticket, &display_name(path), &raw)
    }

    /// Runs the comparison over the currently stored sets. A role with no
    /// accepted load compares as empty and fails the precondition check.
    pub fn compare(&mut self) -> Result<ComparisonResult, AuditError> {
        let empty = UsernameSet::new();
        let followers = self.followers.as_ref().map_or(&empty, |stored| &stored.set);
        let following = self.following.as_ref().map_or(&empty, |stored| &stored.set);

        match compare::compare(followers, following) {
            Ok(result) => {
                self.last_result = Some(result.clone());
                self.last_error = None;
                Ok(result)
            }
            Err(error) => {
                self.last_error = Some(error.to_string());
                Err(error)
            }
        }
    }

    pub fn stored(&self, role: Role) -> Option<&StoredSet> {
        self.slot(role).as_ref()
    }

    pub fn username_count(&self, role: Role) -> Option<usize> {
        self.stored(role).map(|stored| stored.set.len())
    }

    pub fn last_result(&self) -> Option<&ComparisonResult> {
        self.last_result.as_ref()
    }

    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    fn generation(&self, role: Role) -> u64 {
        match role {
            Role::Followers => self.followers_generation,
            Role::Following => self.following_generation,
        }
    }

    fn generation_mut(&mut self, role: Role) -> &mut u64 {
        match role {
            Role::Followers => &mut self.followers_generation,
            Role::Following => &mut self.following_generation,
        }
    }

    fn slot(&self, role: Role) -> &Option<StoredSet> {
        match role {
            Role::Followers => &self.followers,
            Role::Following => &self.following,
        }
    }

    fn slot_mut(&mut self, role: Role) -> &mut Option<StoredSet> {
        match role {
            Role::Followers => &mut self.followers,
            Role::Following => &mut self.following,
        }
    }
}

/// Reads one export file into memory, reporting an unreadable path as a
/// missing-file error for `role`.
pub async fn read_export(role: Role, path: &Path) -> Result<String, AuditError> {
    tokio::fs::read_to_string(path)
        .await
        .map_err(|source| AuditError::MissingFile {
            role,
            path: path.to_path_buf(),
            source,
        })
}

/// File name shown in payloads and error messages.
pub fn display_name(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}
