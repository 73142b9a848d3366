//! Paged output for long diffs.
//!
//! Full unified diffs can run to thousands of lines, so the diff mode
//! pushes them through the `minus` pager when stdout is a terminal.

use derive_new::new;
use minus::Pager;
use std::io::{self, Write};

/// Adapts a [`minus::Pager`] to `std::io::Write` so the differ can render
/// into it like any other writer.
#[derive(new)]
pub struct PagerWriter {
    pager: Pager,
}

impl Write for PagerWriter {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        let text = std::str::from_utf8(buf)
            .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;
        self.pager.push_str(text).map_err(io::Error::other)?;
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

/// Displays everything pushed into the pager and blocks until the user
/// closes it.
pub fn page(pager: Pager) -> anyhow::Result<()> {
    minus::page_all(pager)?;
    Ok(())
}
