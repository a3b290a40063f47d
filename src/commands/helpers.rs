//! Helper functions shared across commands

use revsim_core::error::Result;
use serde::Serialize;

/// Print a value as pretty JSON on stdout
pub fn print_json<T: Serialize + ?Sized>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

/// Print a value as a single JSON line on stdout
pub fn print_json_line<T: Serialize + ?Sized>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string(value)?);
    Ok(())
}

/// Quote an item id for records header fields
pub fn quoted(item: &str) -> String {
    format!("\"{}\"", revsim_core::records::escape_quotes(item))
}

/// Display width of the widest item id, for aligned human tables
pub fn column_width<'a, I>(items: I) -> usize
where
    I: IntoIterator<Item = &'a str>,
{
    items
        .into_iter()
        .map(|s| s.chars().count())
        .max()
        .unwrap_or(0)
}
