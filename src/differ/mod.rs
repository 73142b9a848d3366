//! Orchestrates one comparison run and renders its result.
//!
//! A [`Differ`] validates the configuration, checks that both branches are
//! reachable, asks the client for the right kind of diff, and renders it in
//! the configured output mode. All output goes through an injected writer,
//! so renderers are testable in memory without touching stdout.

use std::cell::{RefCell, RefMut};
use std::io::Write;

use colored::Colorize;
use serde::Serialize;

use crate::config::{BranchConfig, Config, OutputFormat};
use crate::error::Error;
use crate::summary::{self, FileChange};
use crate::svn::VcsClient;

/// JSON view of one side of the comparison.
#[derive(Debug, Serialize)]
pub struct BranchInfo {
    pub url: String,
    pub revisions: Vec<String>,
    pub latest: String,
}

impl From<&BranchConfig> for BranchInfo {
    fn from(branch: &BranchConfig) -> Self {
        Self {
            url: branch.url.clone(),
            revisions: branch.revisions.clone(),
            latest: branch.latest_revision().to_string(),
        }
    }
}

/// JSON view of the whole comparison. Field names are part of the output
/// contract and must not drift.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DiffSummary {
    pub branch_a: BranchInfo,
    pub branch_b: BranchInfo,
    pub changes: Vec<FileChange>,
    pub total_files: usize,
}

pub struct Differ {
    config: Config,
    client: Box<dyn VcsClient>,
    writer: RefCell<Box<dyn Write>>,
}

impl Differ {
    pub fn new(config: Config, client: Box<dyn VcsClient>, writer: Box<dyn Write>) -> Self {
        Self {
            config,
            client,
            writer: RefCell::new(writer),
        }
    }

    fn writer(&self) -> RefMut<'_, Box<dyn Write>> {
        self.writer.borrow_mut()
    }

    /// One full run: validate, check both branches, render. The first
    /// failure aborts; nothing is retried.
    pub fn run(&self) -> Result<(), Error> {
        self.config.validate()?;
        let format = self.config.format()?;

        self.check_connections()?;

        match format {
            OutputFormat::List => self.render_list(),
            OutputFormat::Diff => self.render_diff(),
            OutputFormat::Json => self.render_json(),
        }
    }

    /// Branch A first, then branch B; a failure names the branch it
    /// belongs to and keeps the client diagnostic as the cause.
    fn check_connections(&self) -> Result<(), Error> {
        self.client
            .check_connection(&self.config.branch_a.url)
            .map_err(|source| Error::Connection {
                branch: "A",
                url: self.config.branch_a.url.clone(),
                source,
            })?;
        self.client
            .check_connection(&self.config.branch_b.url)
            .map_err(|source| Error::Connection {
                branch: "B",
                url: self.config.branch_b.url.clone(),
                source,
            })?;

        Ok(())
    }

    fn render_list(&self) -> Result<(), Error> {
        let result = self
            .client
            .get_diff(&self.config.branch_a, &self.config.branch_b, true)
            .map_err(|source| Error::Execution {
                operation: "diff",
                source,
            })?;

        self.print_header()?;

        if result.file_list.is_empty() {
            return self.print_no_differences();
        }

        writeln!(
            self.writer(),
            "{}",
            format!("Changed files ({}):", result.file_list.len()).yellow()
        )?;
        for file in &result.file_list {
            writeln!(self.writer(), "  {file}")?;
        }

        Ok(())
    }

    fn render_diff(&self) -> Result<(), Error> {
        let result = self
            .client
            .get_diff(&self.config.branch_a, &self.config.branch_b, false)
            .map_err(|source| Error::Execution {
                operation: "diff",
                source,
            })?;

        self.print_header()?;

        if result.output.trim().is_empty() {
            return self.print_no_differences();
        }

        self.print_colorized_diff(&result.output)
    }

    fn render_json(&self) -> Result<(), Error> {
        let result = self
            .client
            .get_diff(&self.config.branch_a, &self.config.branch_b, true)
            .map_err(|source| Error::Execution {
                operation: "diff",
                source,
            })?;

        // `changes` re-parses the raw text while `total_files` counts the
        // client's file list; both go through the same tokenizer, so the
        // two views stay consistent.
        let summary = DiffSummary {
            branch_a: BranchInfo::from(&self.config.branch_a),
            branch_b: BranchInfo::from(&self.config.branch_b),
            changes: summary::parse_changes(&result.output),
            total_files: result.file_list.len(),
        };

        let encoded = serde_json::to_string_pretty(&summary)?;
        writeln!(self.writer(), "{encoded}")?;

        Ok(())
    }

    fn print_header(&self) -> Result<(), Error> {
        let mut writer = self.writer();
        writeln!(writer, "{}", "=== SVN Diff Comparison ===".cyan())?;
        writeln!(
            writer,
            "Branch A: {} @ {}",
            self.config.branch_a.url,
            self.config.branch_a.latest_revision()
        )?;
        writeln!(
            writer,
            "Branch B: {} @ {}",
            self.config.branch_b.url,
            self.config.branch_b.latest_revision()
        )?;
        writeln!(writer)?;

        Ok(())
    }

    fn print_no_differences(&self) -> Result<(), Error> {
        writeln!(
            self.writer(),
            "{}",
            "✓ No differences found between the branches.".green()
        )?;

        Ok(())
    }

    /// Recolors a unified diff line by line. The `+++`/`---` checks must
    /// run before the single-character `+`/`-` ones so file headers are
    /// not mistaken for added/removed lines.
    fn print_colorized_diff(&self, diff: &str) -> Result<(), Error> {
        let mut writer = self.writer();
        for line in diff.lines() {
            let styled = if line.starts_with("+++") || line.starts_with("---") {
                line.blue()
            } else if line.starts_with("@@") {
                line.magenta()
            } else if line.starts_with('+') {
                line.green()
            } else if line.starts_with('-') {
                line.red()
            } else if line.starts_with("Index:") || line.starts_with("===") {
                line.yellow()
            } else {
                line.normal()
            };
            writeln!(writer, "{styled}")?;
        }

        Ok(())
    }
}
