/// Renders a result the way the REPL prints it.
///
/// Integral values print without a fractional part, very large or very
/// small magnitudes switch to exponent form and everything else is the
/// shortest decimal that reads back to the same `f64`.
pub fn format_number(value: f64) -> String {
    if value == 0.0 {
        // also folds -0
        return "0".to_string();
    }

    if value.is_nan() {
        return "nan".to_string();
    }

    if value.is_infinite() {
        return match value.is_sign_positive() {
            true => "inf".to_string(),
            false => "-inf".to_string(),
        };
    }

    let magnitude = value.abs();

    if magnitude >= 1e16 || magnitude < 1e-6 {
        format!("{value:e}")
    } else {
        format!("{value}")
    }
}

/// Cuts the line at the first `#` or `//`.
pub fn strip_comments(line: &str) -> &str {
    let hash = line.find('#');
    let slashes = line.find("//");

    let cut = match (hash, slashes) {
        (Some(a), Some(b)) => Some(a.min(b)),
        (a, b) => a.or(b),
    };

    match cut {
        Some(cut) => &line[..cut],
        None => line,
    }
}
