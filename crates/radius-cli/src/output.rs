//! Output formatting helpers.

use std::io::Write;

use anyhow::Result;
use colored::Colorize;
use serde::Serialize;

/// Write an informational notice.
pub fn info(out: &mut impl Write, msg: &str) -> Result<()> {
    writeln!(out, "{} {}", "ℹ".blue(), msg)?;
    Ok(())
}

/// Write a warning.
pub fn warning(out: &mut impl Write, msg: &str) -> Result<()> {
    writeln!(out, "{} {}", "!".yellow(), msg)?;
    Ok(())
}

/// Write an error message.
pub fn error(out: &mut impl Write, msg: &str) -> Result<()> {
    writeln!(out, "{} {}", "✗".red(), msg)?;
    Ok(())
}

/// Write a labeled field.
pub fn field(out: &mut impl Write, label: &str, value: &str) -> Result<()> {
    writeln!(out, "{}: {}", label.dimmed(), value)?;
    Ok(())
}

/// Write a horizontal rule.
pub fn rule(out: &mut impl Write) -> Result<()> {
    writeln!(out, "{}", "─".repeat(60).dimmed())?;
    Ok(())
}

/// Write a value as pretty-printed JSON.
pub fn json_pretty<T: Serialize>(out: &mut impl Write, value: &T) -> Result<()> {
    let json = serde_json::to_string_pretty(value)?;
    writeln!(out, "{}", json)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn field_contains_label_and_value() {
        colored::control::set_override(false);
        let mut out = Vec::new();
        field(&mut out, "Status", "200").unwrap();
        assert_eq!(String::from_utf8(out).unwrap(), "Status: 200\n");
    }

    #[test]
    fn json_pretty_is_parseable() {
        let mut out = Vec::new();
        json_pretty(&mut out, &serde_json::json!({"limit": 800})).unwrap();
        let value: serde_json::Value = serde_json::from_slice(&out).unwrap();
        assert_eq!(value["limit"], 800);
    }
}
