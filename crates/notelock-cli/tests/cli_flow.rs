use std::io::Write;
use std::path::{Path, PathBuf};
use std::process::{Command, Output, Stdio};

use tempfile::TempDir;

fn bin() -> PathBuf {
    PathBuf::from(env!("CARGO_BIN_EXE_notelock"))
}

fn base_command(config_home: &Path) -> Command {
    let mut cmd = Command::new(bin());
    cmd.env("XDG_CONFIG_HOME", config_home)
        .env_remove("NOTELOCK_CONFIG")
        .env_remove("NOTELOCK_PASSPHRASE")
        .env_remove("NOTELOCK_LOG")
        .env_remove("RUST_LOG")
        .env_remove("EDITOR")
        .arg("--ascii");
    cmd
}

fn run_session(cmd: &mut Command, script: &str) -> Output {
    let mut child = cmd
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .expect("spawn notelock");
    child
        .stdin
        .take()
        .expect("stdin")
        .write_all(script.as_bytes())
        .expect("write script");
    child.wait_with_output().expect("wait for notelock")
}

fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).to_string()
}

fn stderr(output: &Output) -> String {
    String::from_utf8_lossy(&output.stderr).to_string()
}

#[test]
fn test_lock_unlock_round_trip() {
    let home = TempDir::new().expect("temp dir");
    let mut cmd = base_command(home.path());
    cmd.env("NOTELOCK_PASSPHRASE", "hunter2");

    let output = run_session(
        &mut cmd,
        "set hello world\nlock\nshow\nstatus\nunlock\nshow\nstatus\nquit\n",
    );
    let out = stdout(&output);

    assert!(output.status.success(), "stderr: {}", stderr(&output));
    assert!(out.contains("[OK] Note locked."));
    assert!(out.contains("[INFO] [locked] Note is locked."));
    assert!(out.contains("state=locked"));
    assert!(out.contains("[OK] Note unlocked."));
    assert!(out.contains("hello world\n"));
    assert!(out.contains("state=unlocked"));
}

#[test]
fn test_locked_note_refuses_edits() {
    let home = TempDir::new().expect("temp dir");
    let mut cmd = base_command(home.path());
    cmd.env("NOTELOCK_PASSPHRASE", "pw");

    let output = run_session(
        &mut cmd,
        "set draft\nlock\nset overwrite\nlock\nunlock\nshow\n",
    );
    let out = stdout(&output);

    assert!(output.status.success(), "stderr: {}", stderr(&output));
    assert!(out.contains("[WARN] Document is locked; unlock it before editing"));
    assert!(out.contains("[WARN] Note is already locked"));
    assert!(out.ends_with("draft\n"));
}

#[test]
fn test_unlock_when_not_locked_is_informational() {
    let home = TempDir::new().expect("temp dir");
    let mut cmd = base_command(home.path());
    cmd.env("NOTELOCK_PASSPHRASE", "pw");

    let output = run_session(&mut cmd, "set plain\nunlock\nshow\n");
    assert!(output.status.success());
    let out = stdout(&output);
    assert!(out.contains("[INFO] Note is not locked"));
    assert!(out.ends_with("plain\n"));
}

#[test]
fn test_session_ending_locked_exits_with_code_5() {
    let home = TempDir::new().expect("temp dir");
    let mut cmd = base_command(home.path());
    cmd.env("NOTELOCK_PASSPHRASE", "pw");

    let output = run_session(&mut cmd, "set secret\nlock\nquit\n");
    assert_eq!(output.status.code(), Some(5));
    assert!(stderr(&output).contains("Session ended with the note locked"));
    assert!(!stdout(&output).contains("secret"));
}

#[test]
fn test_missing_file_exits_with_code_3() {
    let home = TempDir::new().expect("temp dir");
    let missing = home.path().join("absent.txt");
    let mut cmd = base_command(home.path());
    cmd.arg("edit").arg(&missing);

    let output = run_session(&mut cmd, "");
    assert_eq!(output.status.code(), Some(3));
    let err = stderr(&output);
    assert!(err.contains("error=No note found at"));
    assert!(err.contains("hint="));
}

#[test]
fn test_edit_file_append_and_save() {
    let home = TempDir::new().expect("temp dir");
    let note = home.path().join("note.txt");
    std::fs::write(&note, "first line\n").expect("write note");

    let mut cmd = base_command(home.path());
    cmd.arg("edit").arg(&note);
    let output = run_session(&mut cmd, "append second line\nsave\nquit\n");

    assert!(output.status.success(), "stderr: {}", stderr(&output));
    assert_eq!(
        std::fs::read_to_string(&note).expect("read note"),
        "first line\nsecond line"
    );
}

#[test]
fn test_locked_save_cannot_be_unlocked_later() {
    let home = TempDir::new().expect("temp dir");
    let note = home.path().join("locked.txt");

    let mut first = base_command(home.path());
    first.env("NOTELOCK_PASSPHRASE", "pw");
    let script = format!("set diary\nlock\nsave {}\nquit\n", note.display());
    let output = run_session(&mut first, &script);
    assert_eq!(output.status.code(), Some(5));

    let on_disk = std::fs::read_to_string(&note).expect("read note");
    assert!(on_disk.starts_with("notelock:v1:"));
    assert!(!on_disk.contains("diary"));

    let mut second = base_command(home.path());
    second.env("NOTELOCK_PASSPHRASE", "pw");
    second.arg("edit").arg(&note);
    let output = run_session(&mut second, "unlock\nquit\n");
    assert!(output.status.success());
    let out = stdout(&output);
    assert!(out.contains("[WARN] This file holds a note locked in another session"));
    assert!(out.contains("[INFO] Note is not locked"));
}

#[test]
fn test_lock_without_passphrase_source_keeps_session() {
    let home = TempDir::new().expect("temp dir");
    let mut cmd = base_command(home.path());

    let output = run_session(&mut cmd, "set draft\nlock\nshow\n");
    assert!(output.status.success(), "stderr: {}", stderr(&output));
    assert!(stderr(&output).contains("NOTELOCK_PASSPHRASE"));
    assert!(stdout(&output).ends_with("draft\n"));
}

#[test]
fn test_whitespace_passphrase_from_env_is_used() {
    let home = TempDir::new().expect("temp dir");
    let mut cmd = base_command(home.path());
    cmd.env("NOTELOCK_PASSPHRASE", " ");

    let output = run_session(&mut cmd, "set draft\nlock\nunlock\nshow\n");
    assert!(output.status.success(), "stderr: {}", stderr(&output));
    let out = stdout(&output);
    assert!(out.contains("[OK] Note locked."));
    assert!(out.ends_with("draft\n"));
}

#[test]
fn test_status_json() {
    let home = TempDir::new().expect("temp dir");
    let mut cmd = base_command(home.path());
    cmd.arg("--json").env("NOTELOCK_PASSPHRASE", "pw");

    let output = run_session(&mut cmd, "set abc\nlock\nstatus\nunlock\n");
    assert!(output.status.success(), "stderr: {}", stderr(&output));

    let value: serde_json::Value =
        serde_json::from_str(&stdout(&output)).expect("status should be JSON");
    assert_eq!(value["locked"], true);
    assert!(value["locked_since"].is_string());
    assert!(value["key_fingerprint"].is_string());
}

#[test]
fn test_quiet_suppresses_confirmations() {
    let home = TempDir::new().expect("temp dir");
    let mut cmd = base_command(home.path());
    cmd.arg("-q").env("NOTELOCK_PASSPHRASE", "pw");

    let output = run_session(&mut cmd, "set text\nlock\nunlock\nshow\n");
    assert!(output.status.success());
    assert_eq!(stdout(&output), "text\n");
}

#[test]
fn test_init_writes_config_once() {
    let home = TempDir::new().expect("temp dir");
    let config_path = home.path().join("notelock").join("config.toml");

    let output = base_command(home.path())
        .arg("init")
        .output()
        .expect("run init");
    assert!(output.status.success(), "stderr: {}", stderr(&output));
    let contents = std::fs::read_to_string(&config_path).expect("config written");
    assert!(contents.contains("[log]"));
    assert!(contents.contains("level = \"warn\""));

    let again = base_command(home.path())
        .arg("init")
        .output()
        .expect("run init");
    assert_eq!(again.status.code(), Some(4));
    assert!(stderr(&again).contains("already exists"));

    let forced = base_command(home.path())
        .args(["init", "--force"])
        .output()
        .expect("run init --force");
    assert!(forced.status.success());
}

#[test]
fn test_broken_config_is_reported() {
    let home = TempDir::new().expect("temp dir");
    let config_dir = home.path().join("notelock");
    std::fs::create_dir_all(&config_dir).expect("config dir");
    std::fs::write(config_dir.join("config.toml"), "[ui\nascii = ").expect("write config");

    let output = run_session(&mut base_command(home.path()), "quit\n");
    assert_eq!(output.status.code(), Some(1));
    assert!(stderr(&output).contains("Failed to parse config"));
}

#[test]
fn test_completions() {
    let home = TempDir::new().expect("temp dir");
    let output = base_command(home.path())
        .args(["completions", "bash"])
        .output()
        .expect("run completions");
    assert!(output.status.success());
    assert!(stdout(&output).contains("notelock"));
}
