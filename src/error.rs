use crate::svn::SvnError;
use thiserror::Error;

/// Everything that can abort a run. Each variant is one error category so
/// callers can branch on kind instead of scraping message text; the
/// underlying `svn` diagnostic travels along as `source`.
#[derive(Debug, Error)]
pub enum Error {
    /// Rejected during validation, before any `svn` invocation.
    #[error("invalid configuration: {0}")]
    Config(String),

    /// The connectivity check for one of the branches failed.
    #[error("cannot reach branch {branch} ({url})")]
    Connection {
        branch: &'static str,
        url: String,
        #[source]
        source: SvnError,
    },

    /// An `svn` operation was dispatched and came back unsuccessful.
    #[error("svn {operation} failed")]
    Execution {
        operation: &'static str,
        #[source]
        source: SvnError,
    },

    /// The in-memory summary could not be serialized. Indicates a logic
    /// fault, not an operator mistake.
    #[error("cannot encode the diff summary as JSON")]
    Render(#[from] serde_json::Error),

    #[error("cannot write output")]
    Io(#[from] std::io::Error),
}
