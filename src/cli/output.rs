use crate::cli::OutputFormat;
use anyhow::Result;
use serde_json::Value;
use std::io::Write;

pub fn emit_value(value: &Value, format: OutputFormat, compact: bool, quiet: bool) -> Result<()> {
    let stdout = std::io::stdout();
    let mut handle = stdout.lock();

    match format {
        OutputFormat::Json => {
            if compact || quiet {
                serde_json::to_writer(&mut handle, value)?;
            } else {
                serde_json::to_writer_pretty(&mut handle, value)?;
            }
            handle.write_all(b"\n")?;
        }
        OutputFormat::Text => render_text(&mut handle, value)?,
    }

    Ok(())
}

fn render_text(out: &mut impl Write, value: &Value) -> Result<()> {
    // Compare payload: two labeled lists with counts.
    if value.get("not_following_back").is_some() && value.get("dont_follow_back").is_some() {
        write_list(out, "Don't follow you back", &value["not_following_back"])?;
        writeln!(out)?;
        write_list(out, "You don't follow back", &value["dont_follow_back"])?;
        return Ok(());
    }

    // Inspect payload: one labeled list.
    if let (Some(role), Some(usernames)) = (value.get("role"), value.get("usernames")) {
        let label = format!("{} usernames", role.as_str().unwrap_or("export"));
        write_list(out, &label, usernames)?;
        return Ok(());
    }

    writeln!(out, "{value:#}")?;
    Ok(())
}

fn write_list(out: &mut impl Write, label: &str, entries: &Value) -> Result<()> {
    let entries = entries.as_array().map(Vec::as_slice).unwrap_or_default();
    writeln!(out, "{label} ({}):", entries.len())?;

    for entry in entries {
        match entry {
            Value::String(username) => writeln!(out, "  {username}")?,
            Value::Object(fields) => {
                let username = fields
                    .get("username")
                    .and_then(Value::as_str)
                    .unwrap_or_default();
                match fields.get("profile_url").and_then(Value::as_str) {
                    Some(url) => writeln!(out, "  {username}  {url}")?,
                    None => writeln!(out, "  {username}")?,
                }
            }
            other => writeln!(out, "  {other}")?,
        }
    }

    Ok(())
}
