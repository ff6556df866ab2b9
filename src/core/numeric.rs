// src/core/numeric.rs

/// Parse the longest leading decimal prefix of `s`, `0.0` when there is none.
///
/// Leading whitespace is skipped, then an optional sign, digits with an
/// optional `.` fraction, and an optional exponent. Anything after the prefix
/// is ignored: `"12.5abc"` is `12.5`, `"abc"` is `0.0`, `"-"` is `0.0`.
pub fn leading_f64(s: &str) -> f64 {
    let t = s.trim_start();
    let b = t.as_bytes();
    let mut i = 0;

    if matches!(b.first(), Some(b'+' | b'-')) { i += 1; }

    let int_start = i;
    while i < b.len() && b[i].is_ascii_digit() { i += 1; }
    let mut digits = i - int_start;

    if i < b.len() && b[i] == b'.' {
        let frac_start = i + 1;
        let mut j = frac_start;
        while j < b.len() && b[j].is_ascii_digit() { j += 1; }
        digits += j - frac_start;
        if digits > 0 { i = j; }
    }

    if digits == 0 { return 0.0; }

    // Exponent only counts if at least one digit follows it
    if i < b.len() && matches!(b[i], b'e' | b'E') {
        let mut j = i + 1;
        if matches!(b.get(j), Some(b'+' | b'-')) { j += 1; }
        let exp_start = j;
        while j < b.len() && b[j].is_ascii_digit() { j += 1; }
        if j > exp_start { i = j; }
    }

    t[..i].parse().unwrap_or(0.0)
}

#[cfg(test)]
mod tests {
    use super::leading_f64;

    #[test]
    fn plain_numbers() {
        assert_eq!(leading_f64("100.5"), 100.5);
        assert_eq!(leading_f64("-34.123"), -34.123);
        assert_eq!(leading_f64("+7"), 7.0);
        assert_eq!(leading_f64(".5"), 0.5);
        assert_eq!(leading_f64("5."), 5.0);
    }

    #[test]
    fn prefix_and_garbage() {
        assert_eq!(leading_f64("  12.5abc"), 12.5);
        assert_eq!(leading_f64("1e3x"), 1000.0);
        assert_eq!(leading_f64("2e"), 2.0);
        assert_eq!(leading_f64("1,5"), 1.0);
        assert_eq!(leading_f64("abc"), 0.0);
        assert_eq!(leading_f64("-"), 0.0);
        assert_eq!(leading_f64("."), 0.0);
        assert_eq!(leading_f64(""), 0.0);
    }
}
