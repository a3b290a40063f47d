//! Utilities for records output format
//!
//! Records are single lines with a one-letter prefix:
//! - `H` header with the mode and result count
//! - `P` a product (item id) in corpus order
//! - `R` a ranked recommendation
//! - `D` a near-duplicate pair
//! - `S` a pairwise similarity score

use crate::format::format_score;

/// Escape double quotes in a string for records format.
/// Replaces `"` with `\"` to allow safe embedding in quoted fields.
pub fn escape_quotes(s: &str) -> String {
    s.replace('\"', r#"\""#)
}

/// Header line shared by every records-mode command
pub fn header(mode: &str, fields: &[(&str, String)]) -> String {
    let mut line = format!("H revsim=1 records=1 mode={}", mode);
    for (key, value) in fields {
        line.push_str(&format!(" {}={}", key, value));
    }
    line
}

/// `R <rank> <position> <score> "<item>"`
pub fn recommendation_line(rank: usize, position: usize, score: f64, item: &str) -> String {
    format!(
        "R {} {} {} \"{}\"",
        rank,
        position,
        format_score(score),
        escape_quotes(item)
    )
}

/// `P <position> "<item>"`
pub fn product_line(position: usize, item: &str) -> String {
    format!("P {} \"{}\"", position, escape_quotes(item))
}

/// `D <score> "<item a>" "<item b>"`
pub fn duplicate_line(score: f64, item_a: &str, item_b: &str) -> String {
    format!(
        "D {} \"{}\" \"{}\"",
        format_score(score),
        escape_quotes(item_a),
        escape_quotes(item_b)
    )
}

/// `S <score> "<item a>" "<item b>"`
pub fn score_line(score: f64, item_a: &str, item_b: &str) -> String {
    format!(
        "S {} \"{}\" \"{}\"",
        format_score(score),
        escape_quotes(item_a),
        escape_quotes(item_b)
    )
}
