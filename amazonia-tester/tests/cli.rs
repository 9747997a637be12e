use std::process::Command;

fn temp_path(label: &str) -> std::path::PathBuf {
    std::env::temp_dir().join(format!(
        "amazonia-cli-{label}-{}-{}",
        std::process::id(),
        std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .unwrap_or_default()
            .as_nanos()
    ))
}

#[test]
fn cli_writes_json_report_to_output() {
    let exe = env!("CARGO_BIN_EXE_amazonia-tester");
    let output_path = temp_path("json");
    let output = Command::new(exe)
        .args([
            "--seeds",
            "1,2",
            "--iterations",
            "1",
            "--class",
            "both",
            "--max-hours",
            "48",
            "--report",
            "json",
            "--output",
        ])
        .arg(&output_path)
        .output()
        .expect("run cli");
    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Amazonia Autopilot Tester"));

    let content = std::fs::read_to_string(&output_path).expect("read output");
    let report: serde_json::Value = serde_json::from_str(&content).expect("valid json");
    assert_eq!(report["runs"].as_array().map(Vec::len), Some(4));
    assert_eq!(report["aggregates"].as_array().map(Vec::len), Some(2));
    std::fs::remove_file(output_path).ok();
}

#[test]
fn cli_writes_markdown_report() {
    let exe = env!("CARGO_BIN_EXE_amazonia-tester");
    let output_path = temp_path("markdown");
    let status = Command::new(exe)
        .args([
            "--seeds",
            "5",
            "--iterations",
            "2",
            "--class",
            "hunter",
            "--max-hours",
            "24",
            "--report",
            "markdown",
            "--output",
        ])
        .arg(&output_path)
        .status()
        .expect("run cli");
    assert!(status.success());
    let content = std::fs::read_to_string(&output_path).expect("read output");
    assert!(content.starts_with("# Amazonia Autopilot Results"));
    assert!(content.contains("hunter-5-0"));
    assert!(content.contains("hunter-5-1"));
    std::fs::remove_file(output_path).ok();
}

#[test]
fn cli_saves_final_states_as_a_json_array() {
    let exe = env!("CARGO_BIN_EXE_amazonia-tester");
    let save_path = temp_path("saves");
    let report_path = temp_path("saves-report");
    let status = Command::new(exe)
        .args([
            "--seeds",
            "9",
            "--iterations",
            "1",
            "--max-hours",
            "12",
            "--report",
            "json",
            "--save-file",
        ])
        .arg(&save_path)
        .arg("--output")
        .arg(&report_path)
        .status()
        .expect("run cli");
    assert!(status.success());

    let content = std::fs::read_to_string(&save_path).expect("read saves");
    let saves: serde_json::Value = serde_json::from_str(&content).expect("valid json");
    let saves = saves.as_array().expect("saves are an array");
    assert_eq!(saves.len(), 2);
    for save in saves {
        assert!(save.get("time").is_some());
        assert!(save.get("days_survived").is_some());
        assert!(save["player"].get("player_class").is_some());
    }
    std::fs::remove_file(save_path).ok();
    std::fs::remove_file(report_path).ok();
}

#[test]
fn cli_rejects_bad_seeds() {
    let exe = env!("CARGO_BIN_EXE_amazonia-tester");
    let output = Command::new(exe)
        .args(["--seeds", "1,banana", "--iterations", "1"])
        .output()
        .expect("run cli");
    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("invalid seed"));
}
