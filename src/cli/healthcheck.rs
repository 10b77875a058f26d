//! Healthcheck command handler.

use color_eyre::Result;

use crate::healthcheck::Doctor;

use super::App;

impl App {
    /// Restart the deployment stack and probe every dependent service.
    ///
    /// Probe failures land in the JSON report, not in the exit code; the
    /// command only fails when it cannot produce its artifacts.
    pub async fn run_healthcheck(&self) -> Result<()> {
        let report = Doctor::new()
            .run()
            .await
            .map_err(|e| color_eyre::eyre::eyre!("Healthcheck failed to run: {}", e))?;

        if report.all_passed() {
            tracing::info!(summary = %report.summary(), "Stack is healthy");
        } else {
            tracing::warn!(summary = %report.summary(), "Some checks failed, see the report");
        }

        Ok(())
    }
}
