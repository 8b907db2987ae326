//! The "load more" prompt.

use std::io::{BufRead, Write};

use anyhow::Result;
use colored::Colorize;

/// Ask whether to load more records.
///
/// Enter (or anything other than `q`) means yes; `q`, `quit` or end of
/// input means no.
pub fn ask_load_more(input: &mut impl BufRead, out: &mut impl Write, current: u32) -> Result<bool> {
    write!(
        out,
        "{} {}",
        format!("Load More Records (Current: {})", current).bold(),
        "[Enter to load, q to quit] ".dimmed()
    )?;
    out.flush()?;

    let mut line = String::new();
    if input.read_line(&mut line)? == 0 {
        writeln!(out)?;
        return Ok(false);
    }

    let answer = line.trim().to_ascii_lowercase();
    Ok(!matches!(answer.as_str(), "q" | "quit"))
}
