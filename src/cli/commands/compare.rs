use crate::model::{Role, profile_url};
use crate::session::{AuditSession, display_name, read_export};
use anyhow::Result;
use serde_json::{Value, json};
use std::path::PathBuf;

pub async fn compare(followers: PathBuf, following: PathBuf, links: bool) -> Result<Value> {
    let mut session = AuditSession::new();
    let followers_ticket = session.begin_load(Role::Followers);
    let following_ticket = session.begin_load(Role::Following);

    // The two reads are independent; neither is ordered before the other.
    let (followers_raw, following_raw) = tokio::join!(
        read_export(Role::Followers, &followers),
        read_export(Role::Following, &following),
    );

    session.complete_load(followers_ticket, &display_name(&followers), &followers_raw?)?;
    session.complete_load(following_ticket, &display_name(&following), &following_raw?)?;

    let result = session.compare()?;

    Ok(json!({
        "followers": role_summary(&session, Role::Followers),
        "following": role_summary(&session, Role::Following),
        "not_following_back_count": result.not_following_back.len(),
        "dont_follow_back_count": result.dont_follow_back.len(),
        "not_following_back": render_usernames(&result.not_following_back, links),
        "dont_follow_back": render_usernames(&result.dont_follow_back, links),
    }))
}

fn role_summary(session: &AuditSession, role: Role) -> Value {
    match session.stored(role) {
        Some(stored) => json!({
            "file": stored.file,
            "username_count": stored.set.len(),
        }),
        None => Value::Null,
    }
}

fn render_usernames(usernames: &[String], links: bool) -> Value {
    if links {
        Value::Array(
            usernames
                .iter()
                .map(|username| {
                    json!({
                        "username": username,
                        "profile_url": profile_url(username),
                    })
                })
                .collect(),
        )
    } else {
        json!(usernames)
    }
}
