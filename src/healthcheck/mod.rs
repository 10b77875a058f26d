//! Deployment stack doctor.
//!
//! Restarts the docker-compose stack and walks a fixed sequence of service
//! checks: model runtime, database, application endpoint. Each check retries
//! a single boolean probe a bounded number of times; on exhaustion it records
//! FAIL, dumps the tail of that service's logs, and moves on - one dead
//! dependency never masks the status of the rest.
//!
//! Artifacts land under a fixed relative directory: an append-only text log
//! and a JSON report mapping each condition to PASS/FAIL plus a terminal
//! `_summary`. Probe failures do not change the process exit code; the
//! report is the source of truth.

mod probe;
mod report;

pub use probe::Probe;
pub use report::{CheckStatus, HealthLog, Report};

use std::path::PathBuf;
use std::time::Duration;

use crate::error::AppError;

/// Attempts per check stage.
pub const MAX_RETRIES: u32 = 10;
/// Pause between attempts within one stage.
pub const RETRY_DELAY: Duration = Duration::from_secs(3);
/// Lines of service log dumped when a stage exhausts its retries.
pub const LOG_TAIL_LINES: u32 = 50;
/// Fixed relative directory for both artifacts.
pub const LOG_DIR: &str = "logs";
/// Append-only text log file name.
pub const LOG_FILE: &str = "healthcheck.log";
/// JSON report file name.
pub const REPORT_FILE: &str = "healthcheck_report.json";

/// Generous ceiling for `docker compose` invocations.
const COMPOSE_TIMEOUT: Duration = Duration::from_secs(180);

/// One sequential check stage.
pub struct Stage {
    /// Key in the JSON report.
    pub condition: String,
    /// Human-readable header in the text log.
    pub title: String,
    /// Compose service whose logs are dumped on failure.
    pub service: Option<String>,
    pub probe: Probe,
}

impl Stage {
    pub fn new(
        condition: impl Into<String>,
        title: impl Into<String>,
        service: Option<&str>,
        probe: Probe,
    ) -> Self {
        Self {
            condition: condition.into(),
            title: title.into(),
            service: service.map(str::to_string),
            probe,
        }
    }
}

/// Runs the restart plus the check sequence and produces the artifacts.
pub struct Doctor {
    log_dir: PathBuf,
    retries: u32,
    delay: Duration,
}

impl Default for Doctor {
    fn default() -> Self {
        Self {
            log_dir: PathBuf::from(LOG_DIR),
            retries: MAX_RETRIES,
            delay: RETRY_DELAY,
        }
    }
}

impl Doctor {
    pub fn new() -> Self {
        Self::default()
    }

    /// Redirect artifacts, used by tests.
    pub fn with_log_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.log_dir = dir.into();
        self
    }

    pub fn with_retries(mut self, retries: u32) -> Self {
        self.retries = retries.max(1);
        self
    }

    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    /// The default stage sequence for the deployed stack.
    fn default_stages() -> Vec<Stage> {
        vec![
            Stage::new(
                "ollama_responding",
                "Model runtime (Ollama)",
                Some("ollama"),
                Probe::http("http://localhost:11434/api/version"),
            ),
            Stage::new(
                "neo4j_responding",
                "Graph database (Neo4j)",
                Some("neo4j"),
                Probe::http("http://localhost:7474"),
            ),
            Stage::new(
                "mcp_server_responding",
                "Application endpoint (MCP server)",
                Some("mnemograph"),
                Probe::http("http://localhost:8000/status"),
            ),
        ]
    }

    /// Full run: restart the stack, then walk every check stage.
    pub async fn run(&self) -> Result<Report, AppError> {
        std::fs::create_dir_all(&self.log_dir)?;
        let mut log = HealthLog::open(&self.log_dir.join(LOG_FILE))?;
        let mut report = Report::new();

        log.header("Restarting container stack")?;
        tracing::info!("Restarting container stack");
        let restart = Probe::command("docker", ["compose", "restart"], COMPOSE_TIMEOUT);
        let restarted = restart.run().await;
        let status = if restarted {
            CheckStatus::Pass
        } else {
            log.line("docker compose restart failed")?;
            tracing::error!("docker compose restart failed");
            CheckStatus::Fail
        };
        report.record("stack_restarted", status);

        self.run_checks(Self::default_stages(), &mut log, &mut report)
            .await?;

        let report_path = self.log_dir.join(REPORT_FILE);
        report.write_to(&report_path)?;
        log.line(&format!("Report written to {}", report_path.display()))?;
        log.line(&report.summary())?;
        tracing::info!(summary = %report.summary(), "Healthcheck complete");

        Ok(report)
    }

    /// Walks the given stages strictly sequentially, recording one
    /// PASS/FAIL entry each.
    pub async fn run_checks(
        &self,
        stages: Vec<Stage>,
        log: &mut HealthLog,
        report: &mut Report,
    ) -> Result<(), AppError> {
        for stage in stages {
            log.header(&stage.title)?;
            tracing::info!(condition = %stage.condition, "Checking {}", stage.title);

            let status = self.run_stage(&stage, log).await?;
            if status == CheckStatus::Fail {
                if let Some(ref service) = stage.service {
                    self.dump_service_logs(service, log).await?;
                }
            }
            report.record(stage.condition, status);
        }
        Ok(())
    }

    /// Retries one probe up to the configured ceiling.
    async fn run_stage(&self, stage: &Stage, log: &mut HealthLog) -> Result<CheckStatus, AppError> {
        for attempt in 1..=self.retries {
            if stage.probe.run().await {
                log.line(&format!("OK on attempt {}/{}", attempt, self.retries))?;
                return Ok(CheckStatus::Pass);
            }
            log.line(&format!("attempt {}/{} failed", attempt, self.retries))?;
            if attempt < self.retries {
                tokio::time::sleep(self.delay).await;
            }
        }

        log.line(&format!(
            "giving up after {} attempts, recording FAIL",
            self.retries
        ))?;
        tracing::warn!(title = %stage.title, "Check failed after {} attempts", self.retries);
        Ok(CheckStatus::Fail)
    }

    /// Appends the tail of a compose service's logs to the health log.
    async fn dump_service_logs(&self, service: &str, log: &mut HealthLog) -> Result<(), AppError> {
        log.line(&format!(
            "last {} log lines from service '{}':",
            LOG_TAIL_LINES, service
        ))?;

        let output = tokio::process::Command::new("docker")
            .args([
                "compose",
                "logs",
                "--no-color",
                "--tail",
                &LOG_TAIL_LINES.to_string(),
                service,
            ])
            .output()
            .await;

        match output {
            Ok(output) => {
                log.block(&String::from_utf8_lossy(&output.stdout))?;
                if !output.status.success() {
                    log.block(&String::from_utf8_lossy(&output.stderr))?;
                }
            }
            Err(e) => {
                log.line(&format!("could not read service logs: {}", e))?;
            }
        }
        Ok(())
    }
}
