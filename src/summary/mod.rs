//! Parsing of summarized diff output.
//!
//! `svn diff --summarize` prints one `STATUS   PATH` line per touched path.
//! The parsers here turn that raw text into structured records, skipping
//! blank and malformed lines rather than failing on them, so the tool stays
//! usable against slightly irregular output.

use serde::Serialize;

/// Labels for the single-character status codes `svn` prints.
pub const STATUS_LABELS: phf::Map<&'static str, &'static str> = phf::phf_map! {
    "M" => "Modified",
    "A" => "Added",
    "D" => "Deleted",
    "R" => "Replaced",
    "C" => "Conflicted",
    "X" => "External",
    "I" => "Ignored",
    "?" => "Unversioned",
    "!" => "Missing",
    "~" => "Obstructed",
};

/// Maps a status code to its label. Codes outside the table pass through
/// unchanged; matching is exact and case-sensitive.
pub fn classify(code: &str) -> &str {
    STATUS_LABELS.get(code).copied().unwrap_or(code)
}

/// One changed path with its classified status label.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FileChange {
    pub path: String,
    pub status: String,
}

/// Splits summarized output into `(status code, path)` records.
///
/// Shared by both parsers so they can never disagree on line splitting:
/// blank lines are skipped, lines with fewer than two whitespace-separated
/// tokens are dropped, and the path is every token after the status code
/// rejoined with single spaces (paths may contain internal whitespace).
fn records(output: &str) -> impl Iterator<Item = (&str, String)> {
    output.lines().filter_map(|line| {
        let mut tokens = line.split_whitespace();
        let code = tokens.next()?;
        let rest: Vec<&str> = tokens.collect();
        if rest.is_empty() {
            return None;
        }
        Some((code, rest.join(" ")))
    })
}

/// Parses summarized output into [`FileChange`]s, in source order. Empty or
/// all-blank input yields an empty vec. Paths are not de-duplicated.
pub fn parse_changes(output: &str) -> Vec<FileChange> {
    records(output)
        .map(|(code, path)| FileChange {
            path,
            status: classify(code).to_string(),
        })
        .collect()
}

/// Parses summarized output into the touched paths only, discarding status
/// codes. Yields the same paths in the same order as [`parse_changes`].
pub fn parse_file_list(output: &str) -> Vec<String> {
    records(output).map(|(_, path)| path).collect()
}
