//! Shared integration-test harness for running the `psych-report` binary.

#![allow(dead_code)]

use std::path::{Path, PathBuf};
use std::process::Output;
use std::time::Duration;

use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::process::{Child, Command};

/// How long to wait for the preview server to report its address.
pub const STARTUP_TIMEOUT: Duration = Duration::from_secs(10);

/// Environment variables that would leak host configuration into a test.
const ISOLATED_ENV: [&str; 6] = [
    "PSYCH_REPORT_CONFIG",
    "PSYCH_REPORT_LOG_LEVEL",
    "PSYCH_REPORT_LOG_FORMAT",
    "PSYCH_REPORT_COLOR",
    "PSYCH_REPORT_BIND",
    "PSYCH_REPORT_MAX_CONFIG_SIZE",
];

/// Helpers for running the binary.
pub struct ReportProcess;

impl ReportProcess {
    /// Runs a command to completion and returns its output.
    #[allow(clippy::missing_panics_doc)]
    #[must_use]
    pub fn spawn_command(args: &[&str]) -> Output {
        let mut cmd = std::process::Command::new(env!("CARGO_BIN_EXE_psych-report"));
        for var in ISOLATED_ENV {
            cmd.env_remove(var);
        }
        cmd.args(args).output().expect("failed to run psych-report")
    }

    /// Returns the path to a test fixture.
    #[must_use]
    pub fn fixture_path(name: &str) -> PathBuf {
        PathBuf::from(env!("CARGO_MANIFEST_DIR"))
            .join("tests/fixtures")
            .join(name)
    }
}

/// A running `psych-report serve` process.
///
/// The child process is killed on drop via `kill_on_drop(true)`.
pub struct PreviewServer {
    child: Child,
    /// Base URL, e.g. `http://127.0.0.1:41234/`.
    pub base_url: String,
}

impl PreviewServer {
    /// Starts `serve --dir <site_dir> --bind 127.0.0.1:0` and waits for the
    /// bound address.
    #[allow(clippy::missing_panics_doc)]
    pub async fn start(site_dir: &Path) -> Self {
        let mut cmd = Command::new(env!("CARGO_BIN_EXE_psych-report"));
        for var in ISOLATED_ENV {
            cmd.env_remove(var);
        }
        let mut child = cmd
            .args([
                "serve",
                "--dir",
                site_dir.to_str().expect("non-UTF-8 site path"),
                "--bind",
                "127.0.0.1:0",
                "--quiet",
            ])
            .stdout(std::process::Stdio::piped())
            .stderr(std::process::Stdio::null())
            .kill_on_drop(true)
            .spawn()
            .expect("failed to spawn psych-report serve");

        let stdout = child.stdout.take().expect("stdout not captured");
        let mut reader = BufReader::new(stdout);
        let mut line = String::new();
        tokio::time::timeout(STARTUP_TIMEOUT, reader.read_line(&mut line))
            .await
            .expect("timed out waiting for server address")
            .expect("read_line I/O error");

        let start = line.find("http://").expect("no URL in server banner");
        let base_url = line[start..].trim().to_string();

        Self { child, base_url }
    }

    /// Absolute URL for a site path.
    #[must_use]
    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path.trim_start_matches('/'))
    }

    /// Kills the server and waits for it to exit.
    #[allow(clippy::missing_panics_doc)]
    pub async fn shutdown(mut self) {
        self.child.kill().await.expect("failed to kill child");
    }
}
