//! A stub `svn` executable for end-to-end tests.
//!
//! Each test installs a small shell script named `svn` into a temp
//! directory and prepends that directory to `PATH`, so the binary under
//! test spawns the stub instead of a real client. Every invocation is
//! appended to `calls.log` next to the script for later assertions.

use derive_new::new;
use std::fs;
use std::os::unix::fs::PermissionsExt;
use std::path::{Path, PathBuf};

#[derive(Debug, new)]
pub struct StubSvn {
    pub bin_dir: PathBuf,
}

impl StubSvn {
    /// `PATH` value that resolves `svn` to the stub first.
    pub fn path_env(&self) -> String {
        let inherited = std::env::var("PATH").unwrap_or_default();
        format!("{}:{inherited}", self.bin_dir.display())
    }

    /// Argv lines of every `svn` invocation seen so far, oldest first.
    pub fn calls(&self) -> Vec<String> {
        fs::read_to_string(self.bin_dir.join("calls.log"))
            .map(|log| log.lines().map(str::to_string).collect())
            .unwrap_or_default()
    }
}

/// Installs a stub whose behavior is the given shell `case` body over the
/// subcommand in `$1`.
pub fn install(dir: &Path, body: &str) -> StubSvn {
    let bin_dir = dir.join("stub-bin");
    fs::create_dir_all(&bin_dir).expect("stub bin dir");

    let script = bin_dir.join("svn");
    let log = bin_dir.join("calls.log");
    let contents = format!(
        "#!/bin/sh\nprintf '%s\\n' \"$*\" >> \"{}\"\n{body}\n",
        log.display()
    );
    fs::write(&script, contents).expect("stub script");

    let mut permissions = fs::metadata(&script).expect("stub metadata").permissions();
    permissions.set_mode(0o755);
    fs::set_permissions(&script, permissions).expect("stub permissions");

    StubSvn::new(bin_dir)
}

/// Stub for the happy path: connectivity checks succeed and `svn diff`
/// prints `diff_output` regardless of flags.
pub fn reachable(dir: &Path, diff_output: &str) -> StubSvn {
    install(
        dir,
        &format!(
            "case \"$1\" in\n\
             \x20 info) exit 0 ;;\n\
             \x20 diff) cat <<'SVN_STUB_EOF'\n\
             {diff_output}\n\
             SVN_STUB_EOF\n\
             \x20;;\n\
             \x20 *) exit 0 ;;\n\
             esac"
        ),
    )
}

/// Stub where `svn info` fails for any URL containing `unreachable`.
pub fn unreachable_when(dir: &Path, unreachable: &str) -> StubSvn {
    install(
        dir,
        &format!(
            "case \"$*\" in\n\
             \x20 info*{unreachable}*)\n\
             \x20   echo \"svn: E170013: Unable to connect to a repository\" >&2\n\
             \x20   exit 1 ;;\n\
             \x20 info*) exit 0 ;;\n\
             \x20 *) exit 0 ;;\n\
             esac"
        ),
    )
}

/// Stub where connectivity succeeds but `svn diff` itself fails.
pub fn diff_fails(dir: &Path) -> StubSvn {
    install(
        dir,
        "case \"$1\" in\n\
         \x20 info) exit 0 ;;\n\
         \x20 diff)\n\
         \x20   echo \"svn: E160006: No such revision 999\" >&2\n\
         \x20   exit 1 ;;\n\
         \x20 *) exit 0 ;;\n\
         esac",
    )
}
