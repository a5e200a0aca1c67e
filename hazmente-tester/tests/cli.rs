use std::process::Command;

fn temp_path(label: &str) -> std::path::PathBuf {
    std::env::temp_dir().join(format!(
        "hazmente-cli-{label}-{}",
        std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .unwrap_or_default()
            .as_nanos()
    ))
}

#[test]
fn cli_list_scenarios_writes_output() {
    let exe = env!("CARGO_BIN_EXE_hazmente-tester");
    let output_path = temp_path("list");
    let status = Command::new(exe)
        .args(["--list-scenarios", "--output"])
        .arg(&output_path)
        .status()
        .expect("run cli");
    assert!(status.success());
    let content = std::fs::read_to_string(output_path).expect("read output");
    assert!(content.contains("Available scenarios"));
    assert!(content.contains("onboarding"));
}

#[test]
fn cli_runs_with_unknown_browser_and_json_report() {
    let exe = env!("CARGO_BIN_EXE_hazmente-tester");
    let output_path = temp_path("run");
    let output = Command::new(exe)
        .args([
            "--mode",
            "browser",
            "--browsers",
            "unknown",
            "--report",
            "json",
            "--scenarios",
            "smoke",
            "--iterations",
            "1",
            "--levels",
            "1",
            "--output",
        ])
        .arg(&output_path)
        .output()
        .expect("run cli");
    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stdout.contains("HazMente Automated Tester") || stderr.contains("Unknown browser"));
}

#[test]
fn cli_logic_run_passes_on_shipped_documents() {
    let exe = env!("CARGO_BIN_EXE_hazmente-tester");
    let output_path = temp_path("logic");
    let output = Command::new(exe)
        .current_dir(env!("CARGO_MANIFEST_DIR"))
        .args([
            "--scenarios",
            "all",
            "--levels",
            "1,2,5",
            "--iterations",
            "2",
            "--today",
            "2026-10-18",
            "--report",
            "markdown",
            "--output",
        ])
        .arg(&output_path)
        .output()
        .expect("run cli");
    assert!(
        output.status.success(),
        "{}",
        String::from_utf8_lossy(&output.stderr)
    );
    let report = std::fs::read_to_string(output_path).expect("read report");
    assert!(report.contains("# HazMente Logic Test Results"));
}

#[test]
fn cli_rejects_bad_levels() {
    let exe = env!("CARGO_BIN_EXE_hazmente-tester");
    let output = Command::new(exe)
        .args(["--levels", "zero"])
        .output()
        .expect("run cli");
    assert!(!output.status.success());
}
