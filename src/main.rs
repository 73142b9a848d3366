use anyhow::Result;
use clap::Parser;
use is_terminal::IsTerminal;
use minus::Pager;
use std::path::PathBuf;

use svndiff::config::{self, Overrides};
use svndiff::differ::Differ;
use svndiff::pager::{self, PagerWriter};
use svndiff::svn::SvnCli;

#[derive(Parser)]
#[command(
    name = "svndiff",
    version,
    about = "Compare revision sets between two SVN branches",
    long_about = "svndiff compares a set of revisions on one SVN branch with a set of \
    revisions on another branch, using the `svn` command-line tool as the engine of record. \
    Configuration comes from a TOML file, SVNDIFF_* environment variables, and flags; \
    flags always take precedence.",
    help_template = r"
{name} {version} - {about}

USAGE:
    {usage}

OPTIONS:
    {all-args}
",
)]
struct Cli {
    /// Configuration file (default: ./svndiff.toml when present)
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// URL of branch A
    #[arg(long = "urlA", value_name = "URL")]
    url_a: Option<String>,

    /// Revisions of branch A, comma-separated and in meaningful order
    #[arg(long = "revsA", value_name = "REVS", value_delimiter = ',')]
    revs_a: Option<Vec<String>>,

    /// URL of branch B
    #[arg(long = "urlB", value_name = "URL")]
    url_b: Option<String>,

    /// Revisions of branch B, comma-separated and in meaningful order
    #[arg(long = "revsB", value_name = "REVS", value_delimiter = ',')]
    revs_b: Option<Vec<String>>,

    /// SVN username
    #[arg(long, value_name = "USER")]
    user: Option<String>,

    /// SVN password
    #[arg(long, value_name = "PASSWORD")]
    password: Option<String>,

    /// Output format: list, diff, or json
    #[arg(long, value_name = "FORMAT")]
    output: Option<String>,

    /// Show only a summary of the differences
    #[arg(
        long,
        value_name = "BOOL",
        action = clap::ArgAction::Set,
        num_args = 0..=1,
        default_missing_value = "true"
    )]
    summarize: Option<bool>,
}

impl Cli {
    fn overrides(&self) -> Overrides {
        Overrides {
            url_a: self.url_a.clone(),
            revs_a: self.revs_a.clone(),
            url_b: self.url_b.clone(),
            revs_b: self.revs_b.clone(),
            user: self.user.clone(),
            password: self.password.clone(),
            output: self.output.clone(),
            summarize: self.summarize,
        }
    }
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let config = config::load(cli.config.as_deref(), &cli.overrides())?;
    let client = Box::new(SvnCli::new(config.auth.clone()));

    // Full diffs get paged on a terminal; every other mode, and any
    // redirected output, writes straight through.
    if config.output == "diff" && std::io::stdout().is_terminal() {
        let pager = Pager::new();
        let differ = Differ::new(config, client, Box::new(PagerWriter::new(pager.clone())));
        differ.run()?;
        pager::page(pager)?;
    } else {
        let differ = Differ::new(config, client, Box::new(std::io::stdout()));
        differ.run()?;
    }

    Ok(())
}
