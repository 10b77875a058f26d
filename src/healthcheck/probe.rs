//! Boolean probes against external services.

use std::time::Duration;

use tokio::time::timeout;

/// A single boolean check against one external service.
///
/// Probes never error: an unreachable target, a non-2xx response, a nonzero
/// exit status, and a timeout all count as a failed observation.
#[derive(Debug, Clone)]
pub enum Probe {
    /// HTTP GET; success is any 2xx response.
    Http { url: String, timeout: Duration },
    /// External command; success is exit status zero.
    Command {
        program: String,
        args: Vec<String>,
        timeout: Duration,
    },
}

impl Probe {
    /// Default per-attempt timeout for HTTP probes.
    pub const HTTP_TIMEOUT: Duration = Duration::from_secs(5);

    pub fn http(url: impl Into<String>) -> Self {
        Self::Http {
            url: url.into(),
            timeout: Self::HTTP_TIMEOUT,
        }
    }

    pub fn command(
        program: impl Into<String>,
        args: impl IntoIterator<Item = impl Into<String>>,
        timeout: Duration,
    ) -> Self {
        Self::Command {
            program: program.into(),
            args: args.into_iter().map(Into::into).collect(),
            timeout,
        }
    }

    /// Runs one attempt, bounded by the probe's own timeout.
    pub async fn run(&self) -> bool {
        match self {
            Self::Http {
                url,
                timeout: probe_timeout,
            } => {
                let client = match reqwest::Client::builder().timeout(*probe_timeout).build() {
                    Ok(client) => client,
                    Err(e) => {
                        tracing::warn!(error = %e, "Failed to build HTTP client");
                        return false;
                    }
                };
                match client.get(url).send().await {
                    Ok(response) => {
                        let ok = response.status().is_success();
                        tracing::debug!(url = %url, status = %response.status(), ok, "HTTP probe");
                        ok
                    }
                    Err(e) => {
                        tracing::debug!(url = %url, error = %e, "HTTP probe failed");
                        false
                    }
                }
            }
            Self::Command {
                program,
                args,
                timeout: probe_timeout,
            } => {
                let child = tokio::process::Command::new(program).args(args).output();
                match timeout(*probe_timeout, child).await {
                    Ok(Ok(output)) => {
                        tracing::debug!(program = %program, code = ?output.status.code(), "Command probe");
                        output.status.success()
                    }
                    Ok(Err(e)) => {
                        tracing::debug!(program = %program, error = %e, "Command probe failed to spawn");
                        false
                    }
                    Err(_) => {
                        tracing::debug!(program = %program, timeout = ?probe_timeout, "Command probe timed out");
                        false
                    }
                }
            }
        }
    }
}
