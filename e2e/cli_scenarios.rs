//! Black-box CLI tests against the `stringer` binary, covering the
//! documented end-to-end scenarios (S1-S6) and the flag surface
//! (encodings, `--null-only`, `--cap-run-bytes`, `--json`, `--output`,
//! exit codes).

use std::fs;
use std::io::Write;
use std::path::PathBuf;
use std::process::{Command, Stdio};

use tempfile::TempDir;

fn stringer_bin() -> PathBuf {
    if let Ok(p) = std::env::var("CARGO_BIN_EXE_stringer") {
        return PathBuf::from(p);
    }
    let mut p = std::env::current_exe().unwrap();
    p.pop();
    if p.ends_with("deps") {
        p.pop();
    }
    p.push("stringer");
    p
}

fn write_input(dir: &TempDir, name: &str, bytes: &[u8]) -> PathBuf {
    let path = dir.path().join(name);
    fs::write(&path, bytes).unwrap();
    path
}

fn run(args: &[&str]) -> std::process::Output {
    Command::new(stringer_bin())
        .args(args)
        .output()
        .expect("failed to run stringer")
}

#[test]
fn s1_two_ascii_runs_separated_by_junk() {
    let dir = TempDir::new().unwrap();
    let input = write_input(&dir, "s1.bin", b"Hell\x01lehoo");

    let out = run(&["-m", "3", "-e", "ascii", "-j", "-t", "1", input.to_str().unwrap()]);
    assert!(out.status.success());
    let text = String::from_utf8(out.stdout).unwrap();
    assert_eq!(
        text,
        "{\"offset\":0,\"kind\":\"ascii\",\"len\":4,\"text\":\"Hell\"}\n\
         {\"offset\":5,\"kind\":\"ascii\",\"len\":5,\"text\":\"lehoo\"}\n"
    );
}

#[test]
fn s2_null_only_drops_then_keeps_terminated_run() {
    let dir = TempDir::new().unwrap();

    let unterminated = write_input(&dir, "s2a.bin", b"CraK");
    let out = run(&["-m", "2", "-e", "ascii", "-n", "-j", "-t", "1", unterminated.to_str().unwrap()]);
    assert!(out.status.success());
    assert_eq!(out.stdout, b"");

    let terminated = write_input(&dir, "s2b.bin", b"CraK\0");
    let out = run(&["-m", "2", "-e", "ascii", "-n", "-j", "-t", "1", terminated.to_str().unwrap()]);
    assert!(out.status.success());
    assert_eq!(
        String::from_utf8(out.stdout).unwrap(),
        "{\"offset\":0,\"kind\":\"ascii\",\"len\":4,\"text\":\"CraK\"}\n"
    );
}

#[test]
fn s3_utf16le_run_is_decoded() {
    let dir = TempDir::new().unwrap();
    let input = write_input(&dir, "s3.bin", b"S\0e\0r\0v\0e\0r\0");

    let out = run(&["-m", "6", "-e", "utf16le", "-j", "-t", "1", input.to_str().unwrap()]);
    assert!(out.status.success());
    assert_eq!(
        String::from_utf8(out.stdout).unwrap(),
        "{\"offset\":0,\"kind\":\"utf16le\",\"len\":6,\"text\":\"Server\"}\n"
    );
}

#[test]
fn s4_misaligned_prefix_suppresses_utf16_detection() {
    let dir = TempDir::new().unwrap();
    let mut bytes = vec![0xAA];
    bytes.extend_from_slice(b"S\0e\0r\0v\0e\0r\0");
    let input = write_input(&dir, "s4.bin", &bytes);

    let out = run(&["-m", "6", "-e", "utf16le", "-j", "-t", "1", input.to_str().unwrap()]);
    assert!(out.status.success());
    assert_eq!(out.stdout, b"");
}

#[test]
fn s5_cap_run_bytes_truncates_detector_and_render() {
    let dir = TempDir::new().unwrap();
    let input = write_input(&dir, "s5.bin", b"AAAAAAAAAAAA");

    let out = run(&["-m", "2", "-e", "ascii", "-c", "5", "-j", "-t", "1", input.to_str().unwrap()]);
    assert!(out.status.success());
    assert_eq!(
        String::from_utf8(out.stdout).unwrap(),
        "{\"offset\":0,\"kind\":\"ascii\",\"len\":5,\"text\":\"AAAAA\"}\n"
    );
}

#[test]
fn s6_single_vs_multi_threaded_agree_after_sorting() {
    let dir = TempDir::new().unwrap();
    let mut bytes = Vec::new();
    bytes.extend_from_slice(b"AAAXXX");
    bytes.push(0x01);
    bytes.extend_from_slice(b"BBBBB");
    bytes.push(0x00);
    bytes.extend_from_slice(b"CCCCC");
    bytes.push(0x01);
    bytes.extend_from_slice(b"DDD");
    let input = write_input(&dir, "s6.bin", &bytes);

    let single = run(&["-m", "3", "-e", "ascii", "-j", "-t", "1", input.to_str().unwrap()]);
    let multi = run(&["-m", "3", "-e", "ascii", "-j", "-t", "2", input.to_str().unwrap()]);
    assert!(single.status.success());
    assert!(multi.status.success());

    let mut single_lines: Vec<_> = String::from_utf8(single.stdout).unwrap().lines().map(String::from).collect();
    let mut multi_lines: Vec<_> = String::from_utf8(multi.stdout).unwrap().lines().map(String::from).collect();
    single_lines.sort();
    multi_lines.sort();
    assert_eq!(single_lines, multi_lines);
    assert!(!single_lines.is_empty());
}

#[test]
fn invalid_min_len_exits_with_code_two() {
    let dir = TempDir::new().unwrap();
    let input = write_input(&dir, "bad.bin", b"hello");
    let out = run(&["-m", "1", input.to_str().unwrap()]);
    assert_eq!(out.status.code(), Some(2));
    assert!(!String::from_utf8_lossy(&out.stderr).is_empty());
}

#[test]
fn unknown_encoding_exits_with_code_two() {
    let dir = TempDir::new().unwrap();
    let input = write_input(&dir, "bad2.bin", b"hello");
    let out = run(&["-e", "rot13", input.to_str().unwrap()]);
    assert_eq!(out.status.code(), Some(2));
}

#[test]
fn missing_file_exits_nonzero() {
    let out = run(&["/definitely/does/not/exist/stringer-e2e"]);
    assert!(!out.status.success());
    assert_ne!(out.status.code(), Some(2));
}

#[test]
fn output_flag_writes_to_file_instead_of_stdout() {
    let dir = TempDir::new().unwrap();
    let input = write_input(&dir, "out.bin", b"Hello\x01World");
    let out_path = dir.path().join("hits.jsonl");

    let out = run(&[
        "-m",
        "3",
        "-j",
        "-o",
        out_path.to_str().unwrap(),
        input.to_str().unwrap(),
    ]);
    assert!(out.status.success());
    assert_eq!(out.stdout, b"");
    let written = fs::read_to_string(&out_path).unwrap();
    assert!(written.contains("\"text\":\"Hello\""));
    assert!(written.contains("\"text\":\"World\""));
}

#[test]
fn reads_from_stdin_when_path_is_dash() {
    let mut child = Command::new(stringer_bin())
        .args(["-m", "3", "-j", "-t", "1", "-"])
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .spawn()
        .expect("failed to spawn stringer");
    child.stdin.take().unwrap().write_all(b"Hello\x01World").unwrap();
    let out = child.wait_with_output().unwrap();
    assert!(out.status.success());
    let text = String::from_utf8(out.stdout).unwrap();
    assert!(text.contains("\"text\":\"Hello\""));
    assert!(text.contains("\"text\":\"World\""));
}

#[test]
fn help_and_version_exit_zero() {
    let out = run(&["--help"]);
    assert!(out.status.success());
    assert!(!out.stdout.is_empty());

    let out = run(&["--version"]);
    assert!(out.status.success());
    assert!(!out.stdout.is_empty());
}
