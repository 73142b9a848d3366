//! Thin wrapper around the `svn` command-line tool.
//!
//! The differ talks to version control exclusively through [`VcsClient`],
//! so everything above this module can run against an in-memory fake.
//! [`SvnCli`] is the real implementation: it builds an argv, spawns `svn`,
//! and turns non-zero exits into diagnostics carrying the captured stderr.

use std::process::Command;

use thiserror::Error;
use tracing::debug;

use crate::config::{AuthConfig, BranchConfig};
use crate::summary;

#[derive(Debug, Error)]
pub enum SvnError {
    /// `svn` could not be started at all (not installed, not on PATH).
    #[error("failed to launch `svn`: {0}")]
    Launch(#[from] std::io::Error),

    /// `svn` ran and exited unsuccessfully.
    #[error("svn exited with status {code}: {stderr}")]
    Exit { code: i32, stderr: String },
}

/// Raw result of one diff invocation. `file_list` is populated only when
/// the diff was summarized; `output` always holds the unprocessed stdout.
#[derive(Debug, Clone, Default)]
pub struct DiffOutput {
    pub output: String,
    pub file_list: Vec<String>,
}

/// Capability the differ needs from the version-control engine.
pub trait VcsClient {
    fn check_connection(&self, url: &str) -> Result<(), SvnError>;

    fn get_diff(
        &self,
        branch_a: &BranchConfig,
        branch_b: &BranchConfig,
        summarize: bool,
    ) -> Result<DiffOutput, SvnError>;

    fn get_log(&self, branch: &BranchConfig) -> Result<String, SvnError>;
}

/// Client that shells out to the `svn` binary.
pub struct SvnCli {
    auth: AuthConfig,
}

impl SvnCli {
    pub fn new(auth: AuthConfig) -> Self {
        Self { auth }
    }

    fn run(&self, args: &[String]) -> Result<String, SvnError> {
        debug!(argv = ?loggable(args), "running svn");

        let output = Command::new("svn").args(args).output()?;
        if !output.status.success() {
            return Err(SvnError::Exit {
                code: output.status.code().unwrap_or(-1),
                stderr: String::from_utf8_lossy(&output.stderr).trim_end().to_string(),
            });
        }

        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }

    /// `--username`/`--password` pairs. The password is only passed along
    /// when a username is set.
    fn credential_args(&self) -> Vec<String> {
        let mut args = Vec::new();
        if !self.auth.user.is_empty() {
            args.push("--username".to_string());
            args.push(self.auth.user.clone());
            if !self.auth.password.is_empty() {
                args.push("--password".to_string());
                args.push(self.auth.password.clone());
            }
        }
        args
    }

    fn info_args(&self, url: &str) -> Vec<String> {
        let mut args = vec!["info".to_string()];
        args.extend(self.credential_args());
        args.push(url.to_string());
        args
    }

    /// Each side is pinned to its latest listed revision with `url@rev`.
    fn diff_args(
        &self,
        branch_a: &BranchConfig,
        branch_b: &BranchConfig,
        summarize: bool,
    ) -> Vec<String> {
        let mut args = vec!["diff".to_string()];
        args.extend(self.credential_args());
        if summarize {
            args.push("--summarize".to_string());
        }
        args.push(format!("{}@{}", branch_a.url, branch_a.latest_revision()));
        args.push(format!("{}@{}", branch_b.url, branch_b.latest_revision()));
        args
    }

    fn log_args(&self, branch: &BranchConfig) -> Vec<String> {
        let mut args = vec!["log".to_string()];
        args.extend(self.credential_args());
        let range = branch.revision_range();
        if !range.is_empty() {
            args.push("-r".to_string());
            args.push(range);
        }
        args.push(branch.url.clone());
        args
    }
}

impl VcsClient for SvnCli {
    fn check_connection(&self, url: &str) -> Result<(), SvnError> {
        self.run(&self.info_args(url)).map(drop)
    }

    fn get_diff(
        &self,
        branch_a: &BranchConfig,
        branch_b: &BranchConfig,
        summarize: bool,
    ) -> Result<DiffOutput, SvnError> {
        let output = self.run(&self.diff_args(branch_a, branch_b, summarize))?;
        let file_list = if summarize {
            summary::parse_file_list(&output)
        } else {
            Vec::new()
        };

        Ok(DiffOutput { output, file_list })
    }

    fn get_log(&self, branch: &BranchConfig) -> Result<String, SvnError> {
        self.run(&self.log_args(branch))
    }
}

/// Argv as it may appear in debug logs: the token following `--password`
/// is masked.
fn loggable(args: &[String]) -> Vec<&str> {
    let mut shown = Vec::with_capacity(args.len());
    let mut redact_next = false;
    for arg in args {
        shown.push(if redact_next { "<redacted>" } else { arg.as_str() });
        redact_next = arg == "--password";
    }
    shown
}
