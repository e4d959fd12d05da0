use std::{
    fs,
    path::Path,
    process::{Command, Output},
};
use tempfile::TempDir;

fn fixture(sentences: &[&str]) -> TempDir {
    let dir = TempDir::new().unwrap();
    fs::write(
        dir.path().join("kanji.json"),
        r#"{"花": ["はな"], "火": ["ひ", "か"], "人": ["ひと"]}"#,
    )
    .unwrap();
    let questions = dir.path().join("questions");
    fs::create_dir(&questions).unwrap();
    let questions_json = sentences
        .iter()
        .enumerate()
        .map(|(i, s)| format!(r#"{{"id": "{i}", "sentence": "{s}"}}"#))
        .collect::<Vec<_>>()
        .join(", ");
    fs::write(
        questions.join("questions-a.json"),
        format!(r#"{{"questions": [{questions_json}]}}"#),
    )
    .unwrap();
    dir
}

fn yomi_check(dir: &Path, extra: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_yomi-check"))
        .current_dir(dir)
        .env_remove("YOMI_CHECK_CONFIG")
        .env_remove("RUST_LOG")
        .args(["--kanji-readings", "kanji.json", "--no-compounds"])
        .args(["--questions", "questions"])
        .args(extra)
        .output()
        .unwrap()
}

fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).into_owned()
}

#[test]
fn exits_with_zero_when_all_valid() {
    let dir = fixture(&["[花火|はなび]を見ました。", "[人|ひと]がいます。"]);
    let output = yomi_check(dir.path(), &[]);
    println!("{}", stdout(&output));
    assert_eq!(output.status.code(), Some(0));
    assert!(stdout(&output).contains("questions-a.json: all 2 readings valid"));
}

#[test]
fn exits_with_one_on_invalid_reading() {
    let dir = fixture(&["[花火|はなぴ]を見ました。", "[人|ひと]がいます。"]);
    let output = yomi_check(dir.path(), &[]);
    assert_eq!(output.status.code(), Some(1));
    assert!(stdout(&output).contains("invalid: 1"));
}

#[test]
fn exits_with_one_on_placeholder() {
    let dir = fixture(&["[人|よみ]がいます。"]);
    let output = yomi_check(dir.path(), &[]);
    assert_eq!(output.status.code(), Some(1));
    assert!(stdout(&output).contains("placeholders: 1"));
}

#[test]
fn exits_with_two_on_missing_dictionary() {
    let dir = fixture(&["[人|ひと]がいます。"]);
    fs::remove_file(dir.path().join("kanji.json")).unwrap();
    let output = yomi_check(dir.path(), &[]);
    assert_eq!(output.status.code(), Some(2));
    assert!(stdout(&output).is_empty());
}

#[test]
fn prints_summary_when_report_cannot_be_written() {
    let dir = fixture(&["[花火|はなぴ]を見ました。"]);
    let output = yomi_check(dir.path(), &["--report", "missing-dir/report.json"]);
    let stderr = String::from_utf8_lossy(&output.stderr);
    println!("{stderr}");
    assert_eq!(output.status.code(), Some(2));
    assert!(stdout(&output).contains("total: 1, valid: 0, invalid: 1"));
    assert!(stderr.contains("failed to write the report"));
    assert_eq!(stderr.matches("os error").count(), 1);
}

#[test]
fn writes_json_report() {
    let dir = fixture(&["[人|ひと]がいます。"]);
    let output = yomi_check(dir.path(), &["--report", "report.json"]);
    assert_eq!(output.status.code(), Some(0));
    let json: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(dir.path().join("report.json")).unwrap())
            .unwrap();
    assert_eq!(json["valid"], 1);
}

#[test]
fn honors_log_filter() {
    let dir = fixture(&["[人|ひと]がいます。"]);

    let output = yomi_check(dir.path(), &[]);
    assert!(String::from_utf8_lossy(&output.stderr).contains("checking"));

    let quiet = Command::new(env!("CARGO_BIN_EXE_yomi-check"))
        .current_dir(dir.path())
        .env_remove("YOMI_CHECK_CONFIG")
        .env("RUST_LOG", "warn")
        .args(["--kanji-readings", "kanji.json", "--no-compounds"])
        .args(["--questions", "questions"])
        .output()
        .unwrap();
    assert_eq!(quiet.status.code(), Some(0));
    assert!(!String::from_utf8_lossy(&quiet.stderr).contains("checking"));
}
