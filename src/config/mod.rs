//! Run configuration.
//!
//! A [`Config`] is resolved once per run from three layers, lowest to
//! highest precedence: the TOML config file, `SVNDIFF_*` environment
//! variables, and command-line flags. The resolved value is handed to the
//! differ by ownership; nothing configuration-shaped lives in globals.

use std::path::Path;
use std::str::FromStr;

use serde::Deserialize;
use tracing::info;

use crate::error::Error;

/// File consulted when `--config` is not given. Missing is fine; an
/// explicit `--config` path that cannot be read is not.
pub const DEFAULT_CONFIG_FILE: &str = "svndiff.toml";

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Config {
    #[serde(rename = "branchA")]
    pub branch_a: BranchConfig,
    #[serde(rename = "branchB")]
    pub branch_b: BranchConfig,
    pub auth: AuthConfig,
    pub output: String,
    pub summarize: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            branch_a: BranchConfig::default(),
            branch_b: BranchConfig::default(),
            auth: AuthConfig::default(),
            output: "list".to_string(),
            summarize: true,
        }
    }
}

/// One side of the comparison: a branch URL plus the revisions of interest,
/// in the order the operator considers meaningful.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct BranchConfig {
    pub url: String,
    pub revisions: Vec<String>,
}

impl BranchConfig {
    /// The last listed revision, or `""` when none are listed. List order
    /// is authoritative; identifiers are never compared numerically.
    pub fn latest_revision(&self) -> &str {
        self.revisions.last().map(String::as_str).unwrap_or("")
    }

    /// `"<first>:<last>"` over list positions, the single identifier when
    /// only one is listed, `""` when none are.
    pub fn revision_range(&self) -> String {
        match self.revisions.as_slice() {
            [] => String::new(),
            [only] => only.clone(),
            [first, .., last] => format!("{first}:{last}"),
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct AuthConfig {
    pub user: String,
    pub password: String,
}

/// The three output modes. `Config::output` stays a plain string through
/// resolution so every layer can set it; it is parsed during validation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    List,
    Diff,
    Json,
}

impl FromStr for OutputFormat {
    type Err = Error;

    fn from_str(raw: &str) -> Result<Self, Error> {
        match raw {
            "list" => Ok(Self::List),
            "diff" => Ok(Self::Diff),
            "json" => Ok(Self::Json),
            other => Err(Error::Config(format!(
                "unsupported output format '{other}' (valid: list, diff, json)"
            ))),
        }
    }
}

impl Config {
    /// Checks the invariants every run depends on: both URLs present, both
    /// revision lists non-empty, output mode known.
    pub fn validate(&self) -> Result<(), Error> {
        if self.branch_a.url.is_empty() {
            return Err(Error::Config("branch A URL is required".to_string()));
        }
        if self.branch_b.url.is_empty() {
            return Err(Error::Config("branch B URL is required".to_string()));
        }
        if self.branch_a.revisions.is_empty() {
            return Err(Error::Config(
                "at least one revision for branch A is required".to_string(),
            ));
        }
        if self.branch_b.revisions.is_empty() {
            return Err(Error::Config(
                "at least one revision for branch B is required".to_string(),
            ));
        }
        self.output.parse::<OutputFormat>()?;

        Ok(())
    }

    pub fn format(&self) -> Result<OutputFormat, Error> {
        self.output.parse()
    }
}

/// Command-line values layered on top of file and environment. `None`
/// leaves the lower layers untouched.
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    pub url_a: Option<String>,
    pub revs_a: Option<Vec<String>>,
    pub url_b: Option<String>,
    pub revs_b: Option<Vec<String>>,
    pub user: Option<String>,
    pub password: Option<String>,
    pub output: Option<String>,
    pub summarize: Option<bool>,
}

/// Resolves the configuration for this run: defaults, then the config
/// file, then `SVNDIFF_*` environment variables, then flags.
pub fn load(explicit_file: Option<&Path>, flags: &Overrides) -> Result<Config, Error> {
    let mut config = match explicit_file {
        Some(path) => read_file(path)?,
        None => {
            let fallback = Path::new(DEFAULT_CONFIG_FILE);
            if fallback.exists() {
                read_file(fallback)?
            } else {
                Config::default()
            }
        }
    };

    apply_env(&mut config, |name| std::env::var(name).ok());
    apply_flags(&mut config, flags);

    Ok(config)
}

fn read_file(path: &Path) -> Result<Config, Error> {
    let text = std::fs::read_to_string(path).map_err(|e| {
        Error::Config(format!("cannot read config file {}: {e}", path.display()))
    })?;
    let config = toml::from_str(&text).map_err(|e| {
        Error::Config(format!("cannot parse config file {}: {e}", path.display()))
    })?;

    info!(file = %path.display(), "using config file");
    Ok(config)
}

fn apply_env(config: &mut Config, lookup: impl Fn(&str) -> Option<String>) {
    if let Some(url) = lookup("SVNDIFF_BRANCHA_URL") {
        config.branch_a.url = url;
    }
    if let Some(revs) = lookup("SVNDIFF_BRANCHA_REVISIONS") {
        config.branch_a.revisions = split_revisions(&revs);
    }
    if let Some(url) = lookup("SVNDIFF_BRANCHB_URL") {
        config.branch_b.url = url;
    }
    if let Some(revs) = lookup("SVNDIFF_BRANCHB_REVISIONS") {
        config.branch_b.revisions = split_revisions(&revs);
    }
    if let Some(user) = lookup("SVNDIFF_AUTH_USER") {
        config.auth.user = user;
    }
    if let Some(password) = lookup("SVNDIFF_AUTH_PASSWORD") {
        config.auth.password = password;
    }
    if let Some(output) = lookup("SVNDIFF_OUTPUT") {
        config.output = output;
    }
    if let Some(summarize) = lookup("SVNDIFF_SUMMARIZE")
        && let Ok(value) = summarize.parse()
    {
        config.summarize = value;
    }
}

fn apply_flags(config: &mut Config, flags: &Overrides) {
    if let Some(url) = &flags.url_a {
        config.branch_a.url = url.clone();
    }
    if let Some(revs) = &flags.revs_a {
        config.branch_a.revisions = revs.clone();
    }
    if let Some(url) = &flags.url_b {
        config.branch_b.url = url.clone();
    }
    if let Some(revs) = &flags.revs_b {
        config.branch_b.revisions = revs.clone();
    }
    if let Some(user) = &flags.user {
        config.auth.user = user.clone();
    }
    if let Some(password) = &flags.password {
        config.auth.password = password.clone();
    }
    if let Some(output) = &flags.output {
        config.output = output.clone();
    }
    if let Some(summarize) = flags.summarize {
        config.summarize = summarize;
    }
}

/// Comma-separated revision lists, as accepted by `--revsA`/`--revsB` and
/// the matching environment variables.
pub fn split_revisions(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|rev| !rev.is_empty())
        .map(str::to_string)
        .collect()
}
