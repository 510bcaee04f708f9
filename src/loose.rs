//! Text-to-number conversion for values that arrive as text (route
//! parameters, caller-chosen codes).

/// Convert `raw` the way a loosely typed caller would: surrounding whitespace
/// is ignored (blank means zero), decimal and exponent forms are accepted, as
/// are `0x`/`0o`/`0b` integer literals and a signed `Infinity`. `None` when
/// the text is not a number.
pub(crate) fn to_number(raw: &str) -> Option<f64> {
    let s = raw.trim();
    if s.is_empty() {
        return Some(0.0);
    }
    for (prefix, radix) in [("0x", 16), ("0X", 16), ("0o", 8), ("0O", 8), ("0b", 2), ("0B", 2)] {
        if let Some(digits) = s.strip_prefix(prefix) {
            if digits.is_empty() {
                return None;
            }
            return digits.chars().try_fold(0.0_f64, |acc, c| {
                c.to_digit(radix).map(|d| acc * f64::from(radix) + f64::from(d))
            });
        }
    }
    if s.strip_prefix(['+', '-']).unwrap_or(s) == "Infinity" {
        return Some(if s.starts_with('-') {
            f64::NEG_INFINITY
        } else {
            f64::INFINITY
        });
    }
    if !s
        .chars()
        .all(|c| c.is_ascii_digit() || matches!(c, '.' | 'e' | 'E' | '+' | '-'))
    {
        return None;
    }
    s.parse::<f64>().ok()
}
