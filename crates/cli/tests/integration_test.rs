//! End-to-end tests driving the `encfix` binary.

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use std::path::Path;
use tempfile::TempDir;

const GBK: &[u8] = &[0xD6, 0xD0, 0xCE, 0xC4];
const UTF8: &[u8] = &[0xE4, 0xB8, 0xAD, 0xE6, 0x96, 0x87];

fn encfix() -> Command {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_encfix"));
    cmd.env_remove("RUST_LOG");
    cmd
}

fn project() -> TempDir {
    let dir = TempDir::new().unwrap();
    let root = dir.path();
    fs::write(root.join("Form1.frm"), GBK).unwrap();
    fs::write(root.join("Module1.bas"), UTF8).unwrap();
    fs::write(root.join("odd.txt"), [0xFF, 0xFE]).unwrap();
    dir
}

fn no_temp_files(root: &Path) -> bool {
    fs::read_dir(root)
        .unwrap()
        .all(|e| !e.unwrap().file_name().to_string_lossy().ends_with(".tmp"))
}

#[test]
fn shows_help() {
    encfix()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("to-utf8"))
        .stdout(predicate::str::contains("verify"));
}

#[test]
fn missing_subcommand_is_a_usage_error() {
    encfix().assert().failure();
}

#[test]
fn scan_reports_each_file() {
    let dir = project();
    encfix()
        .arg("scan")
        .arg(dir.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("Scanning directory:"))
        .stdout(predicate::str::contains("[GBK]").and(predicate::str::contains("Form1.frm")))
        .stdout(predicate::str::contains("[UTF-8]"))
        .stdout(predicate::str::contains("[Unknown]"));

    assert_eq!(fs::read(dir.path().join("Form1.frm")).unwrap(), GBK);
}

#[test]
fn to_utf8_converts_and_summarises() {
    let dir = project();
    encfix()
        .arg("to-utf8")
        .arg(dir.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("Converting Form1.frm (GBK -> UTF-8)... Done"))
        .stdout(predicate::str::contains("Summary: 1 converted, 2 skipped, 0 failed"));

    assert_eq!(fs::read(dir.path().join("Form1.frm")).unwrap(), UTF8);
    assert_eq!(fs::read(dir.path().join("Module1.bas")).unwrap(), UTF8);
    assert_eq!(fs::read(dir.path().join("odd.txt")).unwrap(), [0xFF, 0xFE]);
    assert!(no_temp_files(dir.path()));
}

#[test]
fn to_utf8_twice_is_idempotent() {
    let dir = project();
    encfix().arg("to-utf8").arg(dir.path()).assert().success();
    encfix()
        .arg("to-utf8")
        .arg(dir.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("Summary: 0 converted, 3 skipped, 0 failed"));
}

#[test]
fn to_gb_reports_unmappable_characters_and_continues() {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join("a.txt"), "中文".as_bytes()).unwrap();
    fs::write(dir.path().join("b.txt"), "smile 😀".as_bytes()).unwrap();

    encfix()
        .arg("to-gb")
        .arg(dir.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("Failed:"))
        .stdout(predicate::str::contains("Summary: 1 converted, 0 skipped, 1 failed"));

    assert_eq!(fs::read(dir.path().join("a.txt")).unwrap(), GBK);
    assert_eq!(
        fs::read(dir.path().join("b.txt")).unwrap(),
        "smile 😀".as_bytes()
    );
}

#[test]
fn to_utf8_leaves_gb18030_four_byte_files_untouched() {
    let dir = TempDir::new().unwrap();
    let legacy = [0x81, 0x30, 0x81, 0x30];
    fs::write(dir.path().join("legacy.txt"), legacy).unwrap();

    encfix()
        .arg("to-utf8")
        .arg(dir.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("Summary: 0 converted, 1 skipped, 0 failed"));

    assert_eq!(fs::read(dir.path().join("legacy.txt")).unwrap(), legacy);
}

#[test]
fn to_gb_refuses_to_drop_a_utf8_bom() {
    let dir = TempDir::new().unwrap();
    let original = b"\xEF\xBB\xBFA\r\n";
    fs::write(dir.path().join("bom.txt"), original).unwrap();

    encfix()
        .arg("to-gb")
        .arg(dir.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("U+FEFF"))
        .stdout(predicate::str::contains("Summary: 0 converted, 0 skipped, 1 failed"));

    assert_eq!(fs::read(dir.path().join("bom.txt")).unwrap(), original);
}

#[test]
fn dry_run_does_not_write() {
    let dir = project();
    encfix()
        .args(["to-utf8", "--dry-run"])
        .arg(dir.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("Would convert Form1.frm"))
        .stdout(predicate::str::contains("1 would be converted"));

    assert_eq!(fs::read(dir.path().join("Form1.frm")).unwrap(), GBK);
}

#[test]
fn verify_lists_unknown_files() {
    let dir = project();
    encfix()
        .arg("verify")
        .arg(dir.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("[UNKNOWN]").and(predicate::str::contains("odd.txt")))
        .stdout(predicate::str::contains("Found 1 files with issues."));
}

#[test]
fn verify_clean_tree() {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join("Form1.frm"), GBK).unwrap();
    encfix()
        .arg("verify")
        .arg(dir.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("All files have valid encodings (UTF-8 or GBK)."));
}

#[test]
fn json_output_is_parseable() {
    let dir = project();
    let output = encfix()
        .args(["scan", "--format", "json"])
        .arg(dir.path())
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();

    let json: serde_json::Value = serde_json::from_slice(&output).unwrap();
    let files = json["files"].as_array().unwrap();
    assert_eq!(files.len(), 3);
    assert_eq!(files[0]["detection"]["label"], "GBK");
    assert_eq!(json["command"], "scan");
}

#[test]
fn oversized_files_are_skipped() {
    let dir = TempDir::new().unwrap();
    let big = GBK.repeat(512);
    fs::write(dir.path().join("big.txt"), &big).unwrap();

    encfix()
        .args(["to-utf8", "--max-size", "1K"])
        .arg(dir.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("exceeds size limit"));

    assert_eq!(fs::read(dir.path().join("big.txt")).unwrap(), big);
}

#[test]
fn missing_root_exits_with_failure() {
    let dir = TempDir::new().unwrap();
    encfix()
        .arg("scan")
        .arg(dir.path().join("does-not-exist"))
        .assert()
        .code(1)
        .stderr(predicate::str::contains("failed to walk directory"));
}

#[cfg(unix)]
#[test]
fn conversion_keeps_permissions() {
    use std::os::unix::fs::PermissionsExt;

    let dir = project();
    let form = dir.path().join("Form1.frm");
    fs::set_permissions(&form, fs::Permissions::from_mode(0o600)).unwrap();

    encfix().arg("to-utf8").arg(dir.path()).assert().success();

    let mode = fs::metadata(&form).unwrap().permissions().mode() & 0o777;
    assert_eq!(mode, 0o600);
}

#[test]
fn encoding_rs_agrees_on_the_converted_text() {
    let dir = project();
    encfix().arg("to-utf8").arg(dir.path()).assert().success();

    let bytes = fs::read(dir.path().join("Form1.frm")).unwrap();
    let (expected, _, _) = encoding_rs::GBK.decode(GBK);
    assert_eq!(std::str::from_utf8(&bytes).unwrap(), expected);
}
