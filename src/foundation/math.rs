/// Replace NaN and infinities with `0.0`.
pub(crate) fn finite_or_zero(v: f64) -> f64 {
    if v.is_finite() { v } else { 0.0 }
}

/// Clamp a percentage-space coordinate into `0..=100`, treating non-finite input as `0`.
pub(crate) fn clamp_pct(v: f64) -> f64 {
    finite_or_zero(v).clamp(0.0, 100.0)
}

/// Clamp into `0..=1`, treating non-finite input as `0`.
pub(crate) fn clamp_unit(v: f64) -> f64 {
    finite_or_zero(v).clamp(0.0, 1.0)
}

pub(crate) fn distance(a: [f64; 2], b: [f64; 2]) -> f64 {
    let dx = a[0] - b[0];
    let dy = a[1] - b[1];
    (dx * dx + dy * dy).sqrt()
}

/// Normalized dedup key for a term or label: trimmed, inner whitespace collapsed, lower-cased.
pub(crate) fn normalize_key(s: &str) -> String {
    s.split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .to_lowercase()
}

/// Truncate to at most `max_chars` Unicode scalar values.
pub(crate) fn truncate_chars(s: &str, max_chars: usize) -> String {
    match s.char_indices().nth(max_chars) {
        Some((byte_idx, _)) => s[..byte_idx].to_string(),
        None => s.to_string(),
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/math.rs"]
mod tests;
