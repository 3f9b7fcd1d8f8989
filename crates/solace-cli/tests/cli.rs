use std::io::Write;
use std::path::PathBuf;
use std::process::{Command, Output, Stdio};

use solace_instruments::lexicon::LexiconDef;

const NOTICE: &str = "No conversation found or no user messages.";

fn solace() -> Command {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_solace"));
    cmd.env_remove("RUST_LOG").env_remove("SOLACE_LEXICON");
    cmd
}

fn temp_file(name: &str, contents: &str) -> PathBuf {
    let path = std::env::temp_dir().join(format!("solace-cli-{}-{name}", std::process::id()));
    std::fs::write(&path, contents).unwrap();
    path
}

fn run_with_stdin(mut cmd: Command, input: &str) -> Output {
    let mut child = cmd
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .unwrap();
    child
        .stdin
        .take()
        .unwrap()
        .write_all(input.as_bytes())
        .unwrap();
    child.wait_with_output().unwrap()
}

fn assert_notice(output: &Output) {
    assert!(output.status.success(), "{output:?}");
    assert!(output.stdout.is_empty());
    assert!(String::from_utf8_lossy(&output.stderr).contains(NOTICE));
}

#[test]
fn missing_transcript_prints_notice_and_succeeds() {
    let path = std::env::temp_dir().join("solace-cli-transcript-that-does-not-exist.json");
    let output = solace().arg(&path).output().unwrap();
    assert_notice(&output);
}

#[test]
fn transcript_without_user_turns_prints_notice_and_succeeds() {
    let path = temp_file(
        "assistant-only.json",
        r#"[{"role": "assistant", "content": "How are you feeling today?"}]"#,
    );
    let output = solace().arg(&path).output();
    std::fs::remove_file(&path).unwrap();
    assert_notice(&output.unwrap());
}

#[test]
fn dash_reads_transcript_from_stdin() {
    let mut cmd = solace();
    cmd.arg("-");
    let output = run_with_stdin(
        cmd,
        r#"[{"role": "user", "content": "I feel hopeless every day"}]"#,
    );

    assert!(output.status.success(), "{output:?}");
    let result: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(result["overall_risk"], "Low");
    assert_eq!(result["PHQ-9"]["per_item"]["2"]["score"], 3);
}

#[test]
fn compact_output_is_a_single_line() {
    let mut cmd = solace();
    cmd.args(["--compact", "-"]);
    let output = run_with_stdin(cmd, r#"[{"role": "user", "content": "I feel anxious"}]"#);

    assert!(output.status.success(), "{output:?}");
    let stdout = String::from_utf8(output.stdout).unwrap();
    assert_eq!(stdout.trim_end().lines().count(), 1);
    assert!(stdout.contains("\"overall_risk\""));
}

#[test]
fn malformed_transcript_fails() {
    let mut cmd = solace();
    cmd.arg("-");
    let output = run_with_stdin(cmd, "[{");

    assert!(!output.status.success());
    assert!(output.stdout.is_empty());
}

#[test]
fn print_lexicon_prints_builtin_tables() {
    let output = solace().arg("--print-lexicon").output().unwrap();

    assert!(output.status.success(), "{output:?}");
    let def: LexiconDef = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(def.instruments.len(), 3);
}

#[test]
fn print_lexicon_rejects_invalid_lexicon() {
    let mut def = LexiconDef::builtin().unwrap();
    def.cues.frequency[0].level = 4;
    let path = temp_file("invalid-lexicon.json", &serde_json::to_string(&def).unwrap());

    let output = solace()
        .arg("--print-lexicon")
        .arg("--lexicon")
        .arg(&path)
        .output();
    std::fs::remove_file(&path).unwrap();
    let output = output.unwrap();

    assert!(!output.status.success());
    assert!(output.stdout.is_empty());
}
