use std::process::Command;

const SCRIPT: &str = "llljjhhhhkkkkkkkll";

fn run_headless(args: &[&str]) -> std::process::Output {
    Command::new(env!("CARGO_BIN_EXE_grid-pursuit"))
        .args(args)
        .env_remove("RUST_LOG")
        .output()
        .expect("failed to launch grid-pursuit binary")
}

#[test]
fn scripted_session_prints_final_frame() {
    let output = run_headless(&["--script", SCRIPT]);
    assert!(output.status.success(), "headless run should succeed");

    let stdout = String::from_utf8(output.stdout).expect("frame is utf-8");
    let lines: Vec<&str> = stdout.lines().collect();
    assert_eq!(lines.first(), Some(&"Welcome to Grid Pursuit."));
    assert_eq!(lines.len(), 1 + 20 + 1);
    assert_eq!(lines.last(), Some(&"redraws: 18"));

    let row: Vec<char> = lines[1 + 6].chars().collect();
    assert_eq!(row.len(), 50);
    assert_eq!(row[10], '▓');
    assert_eq!(row[20], 'r');
    assert_eq!(row[21], '@');
    assert_eq!(row[40], '▓');
}

#[test]
fn unbound_script_keys_fail() {
    let output = run_headless(&["--script", "lz"]);

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("unsupported script key"));
}

#[test]
fn missing_layout_file_is_reported() {
    let output = run_headless(&["--layout", "does/not/exist.toml", "--script", "l"]);

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("failed to read layout file"));
}
