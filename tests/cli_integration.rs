use serde_json::Value;
use std::path::Path;
use std::process::Command;
use tempfile::tempdir;

const FOLLOWERS_EXPORT: &str = r#"[
  {"string_list_data": [{"href": "https://instagram.com/alice", "value": "alice", "timestamp": 1700000000}]},
  {"string_list_data": [{"value": "bob"}]}
]"#;

const FOLLOWING_EXPORT: &str = r#"{
  "relationships_following": [{"title": "bob"}, {"title": "carol"}]
}"#;

fn write_fixture(path: &Path, contents: &str) {
    std::fs::write(path, contents).expect("write fixture");
}

fn run_cli(args: &[&str]) -> std::process::Output {
    Command::new(assert_cmd::cargo::cargo_bin!("follow-audit"))
        .args(args)
        .output()
        .expect("run follow-audit")
}

fn parse_stdout_json(output: &std::process::Output) -> Value {
    let stdout = String::from_utf8(output.stdout.clone()).expect("stdout utf8");
    serde_json::from_str(&stdout).expect("valid json")
}

fn parse_stderr_json(output: &std::process::Output) -> Value {
    let stderr = String::from_utf8(output.stderr.clone()).expect("stderr utf8");
    serde_json::from_str(&stderr).expect("valid json error")
}

fn parse_stdout_text(output: &std::process::Output) -> String {
    String::from_utf8(output.stdout.clone()).expect("stdout utf8")
}

#[test]
fn compare_reports_asymmetric_relationships() {
    let dir = tempdir().expect("tempdir");
    let followers = dir.path().join("followers_1.json");
    let following = dir.path().join("following.json");
    write_fixture(&followers, FOLLOWERS_EXPORT);
    write_fixture(&following, FOLLOWING_EXPORT);

    let output = run_cli(&[
        "compare",
        followers.to_str().unwrap(),
        following.to_str().unwrap(),
    ]);
    assert!(output.status.success(), "stderr: {:?}", output.stderr);

    let payload = parse_stdout_json(&output);
    assert_eq!(payload["followers"]["username_count"], 2);
    assert_eq!(payload["following"]["username_count"], 2);
    assert_eq!(payload["not_following_back_count"], 1);
    assert_eq!(payload["dont_follow_back_count"], 1);
    assert_eq!(payload["not_following_back"], serde_json::json!(["carol"]));
    assert_eq!(payload["dont_follow_back"], serde_json::json!(["alice"]));
}

#[test]
fn compare_with_links_includes_profile_urls() {
    let dir = tempdir().expect("tempdir");
    let followers = dir.path().join("followers_1.json");
    let following = dir.path().join("following.json");
    write_fixture(&followers, FOLLOWERS_EXPORT);
    write_fixture(&following, FOLLOWING_EXPORT);

    let output = run_cli(&[
        "compare",
        followers.to_str().unwrap(),
        following.to_str().unwrap(),
        "--links",
    ]);
    assert!(output.status.success(), "stderr: {:?}", output.stderr);

    let payload = parse_stdout_json(&output);
    assert_eq!(
        payload["not_following_back"][0]["username"],
        "carol",
        "unexpected payload: {payload}"
    );
    assert_eq!(
        payload["not_following_back"][0]["profile_url"],
        "https://instagram.com/carol"
    );
}

#[test]
fn text_output_renders_labeled_lists_with_counts() {
    let dir = tempdir().expect("tempdir");
    let followers = dir.path().join("followers_1.json");
    let following = dir.path().join("following.json");
    write_fixture(&followers, FOLLOWERS_EXPORT);
    write_fixture(&following, FOLLOWING_EXPORT);

    let output = run_cli(&[
        "--output-format",
        "text",
        "compare",
        followers.to_str().unwrap(),
        following.to_str().unwrap(),
    ]);
    assert!(output.status.success(), "stderr: {:?}", output.stderr);

    let text = parse_stdout_text(&output);
    assert!(text.contains("Don't follow you back (1):"));
    assert!(text.contains("You don't follow back (1):"));
    assert!(text.contains("carol"));
    assert!(text.contains("alice"));
}

#[test]
fn shape_mismatch_surfaces_an_error_envelope() {
    let dir = tempdir().expect("tempdir");
    let followers = dir.path().join("followers_1.json");
    let following = dir.path().join("following.json");
    write_fixture(&followers, FOLLOWERS_EXPORT);
    write_fixture(&following, r#"{"foo": []}"#);

    let output = run_cli(&[
        "compare",
        followers.to_str().unwrap(),
        following.to_str().unwrap(),
    ]);
    assert!(!output.status.success());

    let err = parse_stderr_json(&output);
    assert_eq!(err["code"], "SHAPE_MISMATCH", "unexpected envelope: {err}");
    let message = err["message"].as_str().expect("message string");
    assert!(message.contains("following.json"));
    assert!(message.contains("following"));
}

#[test]
fn invalid_json_surfaces_a_syntax_envelope() {
    let dir = tempdir().expect("tempdir");
    let followers = dir.path().join("followers_1.json");
    let following = dir.path().join("following.json");
    write_fixture(&followers, "definitely not json");
    write_fixture(&following, FOLLOWING_EXPORT);

    let output = run_cli(&[
        "compare",
        followers.to_str().unwrap(),
        following.to_str().unwrap(),
    ]);
    assert!(!output.status.success());

    let err = parse_stderr_json(&output);
    assert_eq!(err["code"], "JSON_SYNTAX", "unexpected envelope: {err}");
}

#[test]
fn missing_file_surfaces_an_envelope() {
    let dir = tempdir().expect("tempdir");
    let following = dir.path().join("following.json");
    write_fixture(&following, FOLLOWING_EXPORT);

    let output = run_cli(&[
        "compare",
        dir.path().join("absent.json").to_str().unwrap(),
        following.to_str().unwrap(),
    ]);
    assert!(!output.status.success());

    let err = parse_stderr_json(&output);
    assert_eq!(err["code"], "MISSING_FILE", "unexpected envelope: {err}");
}

#[test]
fn empty_following_collection_fails_the_precondition() {
    let dir = tempdir().expect("tempdir");
    let followers = dir.path().join("followers_1.json");
    let following = dir.path().join("following.json");
    write_fixture(&followers, FOLLOWERS_EXPORT);
    write_fixture(&following, r#"{"relationships_following": []}"#);

    let output = run_cli(&[
        "compare",
        followers.to_str().unwrap(),
        following.to_str().unwrap(),
    ]);
    assert!(!output.status.success());

    let err = parse_stderr_json(&output);
    assert_eq!(err["code"], "PRECONDITION", "unexpected envelope: {err}");
}

#[test]
fn inspect_lists_the_usernames_of_one_export() {
    let dir = tempdir().expect("tempdir");
    let following = dir.path().join("following.json");
    write_fixture(&following, FOLLOWING_EXPORT);

    let output = run_cli(&["inspect", "following", following.to_str().unwrap()]);
    assert!(output.status.success(), "stderr: {:?}", output.stderr);

    let payload = parse_stdout_json(&output);
    assert_eq!(payload["role"], "following");
    assert_eq!(payload["file"], "following.json");
    assert_eq!(payload["username_count"], 2);
    assert_eq!(payload["usernames"], serde_json::json!(["bob", "carol"]));
}

#[test]
fn compact_flag_emits_single_line_json() {
    let dir = tempdir().expect("tempdir");
    let following = dir.path().join("following.json");
    write_fixture(&following, FOLLOWING_EXPORT);

    let output = run_cli(&[
        "--compact",
        "inspect",
        "following",
        following.to_str().unwrap(),
    ]);
    assert!(output.status.success(), "stderr: {:?}", output.stderr);

    let text = parse_stdout_text(&output);
    assert_eq!(text.trim().lines().count(), 1);
}

#[test]
fn cli_help_surfaces_commands_and_examples() {
    let root_help = run_cli(&["--help"]);
    assert!(root_help.status.success(), "stderr: {:?}", root_help.stderr);
    let root = parse_stdout_text(&root_help);
    assert!(root.contains("Compare follower and following exports"));
    assert!(root.contains("compare"));
    assert!(root.contains("inspect"));

    let compare_help = run_cli(&["compare", "--help"]);
    assert!(
        compare_help.status.success(),
        "stderr: {:?}",
        compare_help.stderr
    );
    let compare = parse_stdout_text(&compare_help);
    assert!(compare.contains("Examples:"));
    assert!(compare.contains("follow-audit compare followers_1.json following.json"));
}
