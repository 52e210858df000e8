//! One prover run inside a scratch directory.

use std::path::{Path, PathBuf};
use std::process::Stdio;
use std::time::Duration;

use tempfile::TempDir;
use tokio::process::Command;

use super::LoadPath;
use crate::config::ProverConfig;
use crate::error::{HierarchyError, Result};

const SCRIPT_NAME: &str = "hierarchy.v";

/// Script importing `libs` and printing what the extractor needs.
pub fn query_script(libs: &[String]) -> String {
    let mut script = String::new();
    for lib in libs {
        script.push_str(&format!("Require Import {}.\n", lib));
    }
    script.push_str("Print Canonical Projections.\n");
    script.push_str("Print Graph.\n");
    script
}

/// Scratch directory holding the query script and everything the prover
/// writes next to it (`.vo`, `.glob`, ...).
///
/// The directory is deleted when the session is dropped, whether the run
/// succeeded, failed or never happened.
pub struct ProverSession {
    dir: TempDir,
    script: PathBuf,
}

impl ProverSession {
    pub fn create(libs: &[String]) -> Result<Self> {
        let dir = tempfile::Builder::new().prefix("hierarchy-").tempdir()?;
        let script = dir.path().join(SCRIPT_NAME);
        std::fs::write(&script, query_script(libs))?;
        log::debug!("query script written to {}", script.display());
        Ok(Self { dir, script })
    }

    pub fn dir(&self) -> &Path {
        self.dir.path()
    }

    pub fn script_path(&self) -> &Path {
        &self.script
    }

    /// Run the prover on the query script and return its stdout.
    pub async fn run(&self, config: &ProverConfig, load_paths: &[LoadPath]) -> Result<String> {
        let mut command = Command::new(&config.program);
        command.args(&config.args);
        for lp in load_paths {
            command.args(lp.to_args());
        }
        command
            .arg(&self.script)
            .current_dir(self.dir())
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true);

        log::info!("running {} on {}", config.program, self.script_path().display());
        let child = command.spawn().map_err(|source| HierarchyError::ProverLaunch {
            program: config.program.clone(),
            source,
        })?;

        let timeout = Duration::from_secs(config.timeout_secs);
        let output = match tokio::time::timeout(timeout, child.wait_with_output()).await {
            Ok(result) => result?,
            Err(_) => {
                log::error!("{} still running after {}s", config.program, config.timeout_secs);
                return Err(HierarchyError::ProverTimeout(config.timeout_secs));
            }
        };

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr).trim().to_string();
            return Err(HierarchyError::ProverExit {
                status: output.status.to_string(),
                stderr,
            });
        }

        let stdout = String::from_utf8_lossy(&output.stdout).into_owned();
        log::debug!("prover printed {} lines", stdout.lines().count());
        Ok(stdout)
    }
}
