//! Shared fixtures for driving the `svndiff` binary.

use assert_cmd::Command;
use assert_fs::TempDir;
use rstest::fixture;
use std::path::Path;

use super::svn::StubSvn;

pub const URL_A: &str = "https://svn.example.com/repo/branches/a";
pub const URL_B: &str = "https://svn.example.com/repo/branches/b";

/// Output of `svn diff --summarize` for the canonical two-file scenario.
pub const SUMMARIZED_TWO_FILES: &str = "M       foo.txt\nA       bar.txt";

#[fixture]
pub fn work_dir() -> TempDir {
    TempDir::new().expect("failed to create temp dir")
}

/// A `svndiff` command rooted in `dir` with the stub `svn` first on PATH
/// and the process environment scrubbed of `SVNDIFF_*` variables.
pub fn svndiff(dir: &Path, stub: &StubSvn) -> Command {
    let mut cmd = Command::cargo_bin("svndiff").expect("svndiff binary");
    cmd.current_dir(dir);
    cmd.env("PATH", stub.path_env());
    scrub_env(&mut cmd);
    cmd
}

/// Like [`svndiff`], but without any `svn` on PATH at all.
pub fn svndiff_without_svn(dir: &Path) -> Command {
    let mut cmd = Command::cargo_bin("svndiff").expect("svndiff binary");
    cmd.current_dir(dir);
    cmd.env("PATH", dir.display().to_string());
    scrub_env(&mut cmd);
    cmd
}

fn scrub_env(cmd: &mut Command) {
    for name in [
        "SVNDIFF_BRANCHA_URL",
        "SVNDIFF_BRANCHA_REVISIONS",
        "SVNDIFF_BRANCHB_URL",
        "SVNDIFF_BRANCHB_REVISIONS",
        "SVNDIFF_AUTH_USER",
        "SVNDIFF_AUTH_PASSWORD",
        "SVNDIFF_OUTPUT",
        "SVNDIFF_SUMMARIZE",
    ] {
        cmd.env_remove(name);
    }
}

/// Appends the canonical branch flags: A at revision 123, B at 124.
pub fn with_branches(cmd: &mut Command) -> &mut Command {
    cmd.args([
        "--urlA",
        URL_A,
        "--revsA",
        "123",
        "--urlB",
        URL_B,
        "--revsB",
        "124",
    ])
}

/// Writes a config file into `dir` and returns its path as a string.
pub fn write_config(dir: &Path, name: &str, contents: &str) -> String {
    let path = dir.join(name);
    std::fs::write(&path, contents).expect("config file");
    path.display().to_string()
}
