//! Decodes the two known export shapes into canonical username sets.
//!
//! Both shapes are loosely structured: records carry extra fields (hrefs,
//! timestamps) that are ignored. Decoding is strict about the structure that
//! matters — a document that parses as JSON but does not match its role's
//! expected shape is rejected with the file name and a reason, never silently
//! skipped over.

use crate::errors::AuditError;
use crate::model::{Role, UsernameSet};
use serde::Deserialize;
use serde_json::Value;

/// One top-level entry of a followers export. Each entry represents a single
/// follower with its identity records nested under `string_list_data`.
#[derive(Debug, Deserialize)]
struct FollowerItem {
    #[serde(default)]
    string_list_data: Vec<IdentityRecord>,
}

#[derive(Debug, Deserialize)]
struct IdentityRecord {
    value: String,
}

/// A following export: an object wrapping the `relationships_following`
/// collection.
#[derive(Debug, Deserialize)]
struct FollowingExport {
    relationships_following: Vec<FollowingRecord>,
}

#[derive(Debug, Deserialize)]
struct FollowingRecord {
    title: String,
}

/// Converts raw export text into a canonical [`UsernameSet`] for `role`.
///
/// `file` is the display name carried into error messages. Text that is not
/// valid JSON fails with [`AuditError::JsonSyntax`]; valid JSON of the wrong
/// structure fails with [`AuditError::ShapeMismatch`]. A failed parse never
/// yields a partial set.
pub fn normalize(role: Role, file: &str, raw: &str) -> Result<UsernameSet, AuditError> {
    let document: Value =
        serde_json::from_str(raw).map_err(|source| AuditError::json_syntax(file, source))?;

    match role {
        Role::Followers => normalize_followers(file, document),
        Role::Following => normalize_following(file, document),
    }
}

fn normalize_followers(file: &str, document: Value) -> Result<UsernameSet, AuditError> {
    let items: Vec<FollowerItem> = serde_json::from_value(document)
        .map_err(|error| AuditError::shape_mismatch(file, Role::Followers, error.to_string()))?;

    if items.is_empty() {
        return Err(AuditError::shape_mismatch(
            file,
            Role::Followers,
            "export contains no entries",
        ));
    }

    let mut usernames = UsernameSet::new();
    for (index, item) in items.iter().enumerate() {
        // One follower per entry, identified by the first identity record.
        let record = item.string_list_data.first().ok_or_else(|| {
            AuditError::shape_mismatch(
                file,
                Role::Followers,
                format!("entry {index} has no identity record"),
            )
        })?;
        usernames.insert(record.value.clone());
    }

    Ok(usernames)
}

fn normalize_following(file: &str, document: Value) -> Result<UsernameSet, AuditError> {
    let export: FollowingExport = serde_json::from_value(document)
        .map_err(|error| AuditError::shape_mismatch(file, Role::Following, error.to_string()))?;

    let mut usernames = UsernameSet::new();
    for record in export.relationships_following {
        usernames.insert(record.title);
    }

    Ok(usernames)
}
