//! Exit status and stream output of the `perlin2d` binary.

use std::io::Write;
use std::process::{Command, Output, Stdio};

fn perlin2d(args: &[&str], stdin: &str) -> Output {
    let mut child = Command::new(env!("CARGO_BIN_EXE_perlin2d"))
        .args(args)
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .unwrap();
    child
        .stdin
        .take()
        .unwrap()
        .write_all(stdin.as_bytes())
        .unwrap();
    child.wait_with_output().unwrap()
}

#[test]
fn test_export_rejects_zero_width() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("noise.png");
    let output = perlin2d(
        &["export", "--width", "0", "--height", "3", "--output", path.to_str().unwrap()],
        "",
    );
    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("grid dimensions must be positive"));
    assert!(!path.exists());
}

#[test]
fn test_export_rejects_negative_scale() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("noise.png");
    let output = perlin2d(
        &[
            "export", "--width", "2", "--height", "2", "--scale", "-3", "--output",
            path.to_str().unwrap(),
        ],
        "",
    );
    assert!(!output.status.success());
    assert!(!path.exists());
}

#[test]
fn test_export_writes_png() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("noise.png");
    let output = perlin2d(
        &[
            "--seed", "7", "export", "--width", "3", "--height", "2", "--scale", "4",
            "--output", path.to_str().unwrap(),
        ],
        "",
    );
    assert!(output.status.success(), "{output:?}");
    let image = image::open(&path).unwrap();
    assert_eq!((image.width(), image.height()), (12, 8));
}

#[test]
fn test_console_rejects_non_positive_dimensions() {
    let output = perlin2d(&[], "0 4\n");
    assert!(!output.status.success());
    assert_eq!(
        String::from_utf8_lossy(&output.stderr).lines().next(),
        Some("Error: grid dimensions must be positive values.")
    );
}

#[test]
fn test_console_session_exits_cleanly() {
    let output = perlin2d(&["--seed", "3", "sample"], "5 5\n5.0 5.0\n5.01 3.0\n");
    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert_eq!(stdout.matches("Noise: ").count(), 1);
    assert!(stderr.contains("Error: target position must be within the bounds of the grid."));
}
