pub mod commands;
pub mod errors;
pub mod output;

use crate::model::Role;
use anyhow::Result;
use clap::{Parser, Subcommand, ValueEnum};
use serde_json::Value;
use std::path::PathBuf;

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum OutputFormat {
    Json,
    Text,
}

#[derive(Debug, Parser)]
#[command(
    name = "follow-audit",
    version,
    about = "Compare follower and following exports and report who does not follow back",
    long_about = "Compare follower and following exports and report asymmetric relationships.\n\nCommon workflow:\n  • Verify one export first: inspect followers followers_1.json\n  • Compare both: compare followers_1.json following.json\n  • Add profile links for quick visits: compare ... --links\n\nPayloads are JSON on stdout by default; use --output-format text for labeled lists."
)]
pub struct Cli {
    #[arg(
        long = "output-format",
        value_enum,
        default_value_t = OutputFormat::Json,
        global = true,
        help = "Output format (json payloads or human-readable text lists)"
    )]
    pub output_format: OutputFormat,

    #[arg(
        long,
        global = true,
        help = "Emit compact JSON without pretty-printing"
    )]
    pub compact: bool,

    #[arg(long, global = true, help = "Suppress non-essential output")]
    pub quiet: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    #[command(
        about = "Compare a followers export against a following export",
        after_long_help = "Examples:\n  follow-audit compare followers_1.json following.json\n  follow-audit compare followers_1.json following.json --links\n  follow-audit --output-format text compare followers_1.json following.json"
    )]
    Compare {
        #[arg(
            value_name = "FOLLOWERS_FILE",
            help = "Followers export (typically followers_1.json)"
        )]
        followers: PathBuf,
        #[arg(
            value_name = "FOLLOWING_FILE",
            help = "Following export (typically following.json)"
        )]
        following: PathBuf,
        #[arg(long, help = "Include a profile URL for each reported username")]
        links: bool,
    },
    #[command(
        about = "Normalize one export and list the usernames it contains",
        after_long_help = "Examples:\n  follow-audit inspect followers followers_1.json\n  follow-audit inspect following following.json"
    )]
    Inspect {
        #[arg(value_name = "ROLE", value_enum, help = "Which export the file represents")]
        role: Role,
        #[arg(value_name = "FILE", help = "Path to the export file")]
        file: PathBuf,
    },
}

pub async fn run_command(command: Commands) -> Result<Value> {
    match command {
        Commands::Compare {
            followers,
            following,
            links,
        } => commands::compare::compare(followers, following, links).await,
        Commands::Inspect { role, file } => commands::inspect::inspect(role, file).await,
    }
}

pub async fn run() -> Result<()> {
    init_tracing();
    let cli = Cli::parse();
    run_with_options(cli.command, cli.output_format, cli.compact, cli.quiet).await
}

pub async fn run_with_options(
    command: Commands,
    format: OutputFormat,
    compact: bool,
    quiet: bool,
) -> Result<()> {
    match run_command(command).await {
        Ok(payload) => {
            if let Err(error) = output::emit_value(&payload, format, compact, quiet) {
                emit_error_and_exit(error);
            }
            Ok(())
        }
        Err(error) => emit_error_and_exit(error),
    }
}

fn init_tracing() {
    use tracing_subscriber::EnvFilter;

    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .try_init();
}

fn emit_error_and_exit(error: anyhow::Error) -> ! {
    let envelope = errors::envelope_for(&error);
    let stderr = std::io::stderr();
    let mut handle = stderr.lock();
    if serde_json::to_writer(&mut handle, &envelope).is_err() {
        eprintln!("{{\"code\":\"COMMAND_FAILED\",\"message\":\"{}\"}}", error);
    } else {
        use std::io::Write;
        let _ = handle.write_all(b"\n");
    }
    std::process::exit(1)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_global_flags_and_compare() {
        let cli = Cli::try_parse_from([
            "follow-audit",
            "--output-format",
            "json",
            "--compact",
            "--quiet",
            "compare",
            "followers_1.json",
            "following.json",
            "--links",
        ])
        .expect("parse command");

        assert!(matches!(cli.output_format, OutputFormat::Json));
        assert!(cli.compact);
        assert!(cli.quiet);
        match cli.command {
            Commands::Compare {
                followers,
                following,
                links,
            } => {
                assert_eq!(followers, PathBuf::from("followers_1.json"));
                assert_eq!(following, PathBuf::from("following.json"));
                assert!(links);
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn parses_inspect_with_role() {
        let cli = Cli::try_parse_from(["follow-audit", "inspect", "following", "following.json"])
            .expect("parse command");

        match cli.command {
            Commands::Inspect { role, file } => {
                assert_eq!(role, Role::Following);
                assert_eq!(file, PathBuf::from("following.json"));
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn rejects_unknown_role() {
        let result = Cli::try_parse_from(["follow-audit", "inspect", "friends", "friends.json"]);
        assert!(result.is_err());
    }
}
