//! Run-level settings resolved from the environment

use std::path::PathBuf;
use std::time::Duration;

/// Settings for one evaluation run
#[derive(Debug, Clone)]
pub struct Settings {
    /// Directory the JSON reports are written to
    pub results_dir: PathBuf,
    /// Delay between consecutive calls on one provider, to respect rate limits
    pub pacing: Duration,
    /// End-to-end timeout for a single backend call
    pub request_timeout: Duration,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            results_dir: PathBuf::from("results"),
            pacing: Duration::from_secs(1),
            request_timeout: Duration::from_secs(120),
        }
    }
}

impl Settings {
    /// Resolve settings from the environment, falling back to defaults
    ///
    /// Recognized variables: `RESULTS_DIR`, `FINBENCH_PACING_SECS`,
    /// `FINBENCH_REQUEST_TIMEOUT_SECS`.
    pub fn from_env() -> Self {
        let mut settings = Self::default();

        if let Ok(dir) = std::env::var("RESULTS_DIR") {
            if !dir.is_empty() {
                settings.results_dir = PathBuf::from(dir);
            }
        }
        if let Some(secs) = parse_secs("FINBENCH_PACING_SECS") {
            settings.pacing = Duration::from_secs_f64(secs);
        }
        if let Some(secs) = parse_secs("FINBENCH_REQUEST_TIMEOUT_SECS") {
            settings.request_timeout = Duration::from_secs_f64(secs);
        }

        settings
    }

    /// Build the shared HTTP client used by every provider
    pub fn http_client(&self) -> reqwest::Client {
        reqwest::Client::builder()
            .timeout(self.request_timeout)
            .build()
            .unwrap_or_else(|_| reqwest::Client::new())
    }
}

fn parse_secs(var: &str) -> Option<f64> {
    std::env::var(var).ok()?.parse::<f64>().ok().filter(|s| *s >= 0.0)
}
