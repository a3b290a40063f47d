use revsim_core::OutputFormat;

/// Parse output format from string
pub fn parse_output_format(s: &str) -> std::result::Result<OutputFormat, String> {
    s.parse::<OutputFormat>().map_err(|e| e.to_string())
}

/// Parse a recommendation count (at least 1)
pub fn parse_k(s: &str) -> std::result::Result<usize, String> {
    let k: usize = s
        .parse()
        .map_err(|_| format!("'{}' is not a whole number", s))?;
    if k == 0 {
        return Err("must be at least 1".to_string());
    }
    Ok(k)
}

/// Parse a similarity threshold within 0.0..=1.0
pub fn parse_threshold(s: &str) -> std::result::Result<f64, String> {
    let threshold: f64 = s
        .parse()
        .map_err(|_| format!("'{}' is not a number", s))?;
    if !(0.0..=1.0).contains(&threshold) {
        return Err(format!("{} is outside 0.0..=1.0", threshold));
    }
    Ok(threshold)
}
