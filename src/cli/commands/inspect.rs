use crate::model::Role;
use crate::normalize;
use crate::session::{display_name, read_export};
use anyhow::Result;
use serde_json::{Value, json};
use std::path::PathBuf;

pub async fn inspect(role: Role, file: PathBuf) -> Result<Value> {
    let raw = read_export(role, &file).await?;
    let name = display_name(&file);
    let usernames = normalize::normalize(role, &name, &raw)?;

    Ok(json!({
        "role": role.to_string(),
        "file": name,
        "username_count": usernames.len(),
        "usernames": usernames.iter().collect::<Vec<_>>(),
    }))
}
