//! Healthcheck state machine tests with local command probes.
//!
//! Probes here are shell commands instead of live services, so the retry
//! loop, the report shape, and the keep-going-after-failure behavior are all
//! exercised without docker or a network.

use std::time::Duration;

use mnemograph::healthcheck::{CheckStatus, Doctor, HealthLog, Probe, Report, LOG_FILE};

fn passing_probe() -> Probe {
    Probe::command("sh", ["-c", "exit 0"], Duration::from_secs(5))
}

fn failing_probe() -> Probe {
    Probe::command("sh", ["-c", "exit 1"], Duration::from_secs(5))
}

/// Probe that appends one line to `marker` per attempt, then fails.
fn counting_probe(marker: &std::path::Path) -> Probe {
    Probe::command(
        "sh",
        [
            "-c".to_string(),
            format!("echo attempt >> {}; exit 1", marker.display()),
        ],
        Duration::from_secs(5),
    )
}

fn stage(condition: &str, probe: Probe) -> mnemograph::healthcheck::Stage {
    mnemograph::healthcheck::Stage::new(condition, condition, None, probe)
}

#[tokio::test]
async fn failing_stage_runs_exactly_max_retries_attempts() {
    let dir = tempfile::tempdir().unwrap();
    let marker = dir.path().join("attempts");
    let mut log = HealthLog::open(&dir.path().join(LOG_FILE)).unwrap();
    let mut report = Report::new();

    let doctor = Doctor::new()
        .with_log_dir(dir.path())
        .with_retries(3)
        .with_delay(Duration::ZERO);

    doctor
        .run_checks(
            vec![stage("always_failing", counting_probe(&marker))],
            &mut log,
            &mut report,
        )
        .await
        .unwrap();

    let attempts = std::fs::read_to_string(&marker).unwrap();
    assert_eq!(attempts.lines().count(), 3, "one probe run per retry");
    assert_eq!(report.status_of("always_failing"), Some(CheckStatus::Fail));
}

#[tokio::test]
async fn one_failure_does_not_mask_later_stages() {
    let dir = tempfile::tempdir().unwrap();
    let mut log = HealthLog::open(&dir.path().join(LOG_FILE)).unwrap();
    let mut report = Report::new();

    let doctor = Doctor::new()
        .with_log_dir(dir.path())
        .with_retries(2)
        .with_delay(Duration::ZERO);

    doctor
        .run_checks(
            vec![
                stage("first_ok", passing_probe()),
                stage("middle_broken", failing_probe()),
                stage("last_ok", passing_probe()),
            ],
            &mut log,
            &mut report,
        )
        .await
        .unwrap();

    assert_eq!(report.status_of("first_ok"), Some(CheckStatus::Pass));
    assert_eq!(report.status_of("middle_broken"), Some(CheckStatus::Fail));
    assert_eq!(report.status_of("last_ok"), Some(CheckStatus::Pass));
    assert_eq!(report.summary(), "2/3 checks passed");

    let json = report.to_json();
    let object = json.as_object().unwrap();
    assert_eq!(object["middle_broken"], "FAIL");
    assert_eq!(object.keys().last().unwrap(), "_summary");
}

#[tokio::test]
async fn all_passing_stages_yield_clean_report_and_one_header_per_stage() {
    let dir = tempfile::tempdir().unwrap();
    let log_path = dir.path().join(LOG_FILE);
    let mut log = HealthLog::open(&log_path).unwrap();
    let mut report = Report::new();

    let doctor = Doctor::new()
        .with_log_dir(dir.path())
        .with_retries(2)
        .with_delay(Duration::ZERO);

    doctor
        .run_checks(
            vec![
                stage("model_runtime", passing_probe()),
                stage("database", passing_probe()),
                stage("application", passing_probe()),
            ],
            &mut log,
            &mut report,
        )
        .await
        .unwrap();

    assert!(report.all_passed());
    let json = report.to_json();
    let object = json.as_object().unwrap();
    for condition in ["model_runtime", "database", "application"] {
        assert_eq!(object[condition], "PASS");
    }
    assert_eq!(object["_summary"], "3/3 checks passed");

    let content = std::fs::read_to_string(&log_path).unwrap();
    let headers = content.lines().filter(|l| l.starts_with("=== ")).count();
    assert_eq!(headers, 3, "one header line per stage");
}

#[tokio::test]
async fn report_file_round_trips_as_json() {
    let dir = tempfile::tempdir().unwrap();
    let mut report = Report::new();
    report.record("stack_restarted", CheckStatus::Pass);
    report.record("database", CheckStatus::Fail);

    let path = dir.path().join("report.json");
    report.write_to(&path).unwrap();

    let parsed: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
    assert_eq!(parsed["stack_restarted"], "PASS");
    assert_eq!(parsed["database"], "FAIL");
    assert_eq!(parsed["_summary"], "1/2 checks passed");
}
