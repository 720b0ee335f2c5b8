//! Set comparison between the two canonical username sets.

use crate::errors::AuditError;
use crate::model::{ComparisonResult, UsernameSet};

/// Computes both asymmetric-relationship lists from the two canonical sets.
///
/// Each list is one linear pass over its source set in retained insertion
/// order with O(1) membership tests against the other set. Pure over its
/// borrowed inputs; every call produces a fresh result.
///
/// Fails with a precondition error when either set is empty — both files must
/// be supplied before a comparison is meaningful.
pub fn compare(
    followers: &UsernameSet,
    following: &UsernameSet,
) -> Result<ComparisonResult, AuditError> {
    if followers.is_empty() || following.is_empty() {
        return Err(AuditError::precondition(
            "both followers and following files must be loaded before comparing",
        ));
    }

    let not_following_back = following
        .iter()
        .filter(|username| !followers.contains(username))
        .map(str::to_string)
        .collect();

    let dont_follow_back = followers
        .iter()
        .filter(|username| !following.contains(username))
        .map(str::to_string)
        .collect();

    Ok(ComparisonResult {
        not_following_back,
        dont_follow_back,
    })
}
