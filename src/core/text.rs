// src/core/text.rs

/// Cut `s` to at most `max` bytes without splitting a UTF-8 character.
pub fn truncate_bytes(s: &str, max: usize) -> &str {
    if s.len() <= max { return s; }
    let mut end = max;
    while !s.is_char_boundary(end) { end -= 1; }
    &s[..end]
}

/// Byte cut `<= max` for a raw line. Backs off so a UTF-8 character is not
/// split; bytes that are not UTF-8 are cut exactly at `max`.
pub fn utf8_cut(bytes: &[u8], max: usize) -> usize {
    if bytes.len() <= max { return bytes.len(); }
    let mut start = max;
    while start > 0 && max - start < 3 && bytes[start] & 0xC0 == 0x80 { start -= 1; }
    let width = match bytes[start] {
        0xC0..=0xDF => 2,
        0xE0..=0xEF => 3,
        0xF0..=0xF7 => 4,
        _ => 1,
    };
    if start < max && start + width > max { start } else { max }
}

/// Owned snapshot of `s` that fits a legacy `cap`-byte slot (terminator included).
pub fn bounded(s: &str, cap: usize) -> String {
    s!(truncate_bytes(s, cap.saturating_sub(1)))
}

/// Collapse runs of whitespace into one space and trim the ends.
pub fn normalize_ws(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut prev_space = false;
    for ch in s.chars() {
        if ch.is_whitespace() {
            if !prev_space { out.push(' '); prev_space = true; }
        } else { out.push(ch); prev_space = false; }
    }
    out.trim().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn truncation_respects_char_boundaries() {
        // 'ú' is two bytes; cutting inside it backs off one byte
        assert_eq!(truncate_bytes("súper", 2), "s");
        assert_eq!(truncate_bytes("súper", 3), "sú");
        assert_eq!(truncate_bytes("abc", 10), "abc");
    }

    #[test]
    fn raw_cut_backs_off_only_inside_utf8() {
        assert_eq!(utf8_cut("súper".as_bytes(), 2), 1);
        assert_eq!(utf8_cut("súper".as_bytes(), 3), 3);
        assert_eq!(utf8_cut(b"abc", 10), 3);
        // Latin-1 bytes are cut where asked
        assert_eq!(utf8_cut(&[0xE9; 20], 7), 7);
        assert_eq!(utf8_cut(&[b'a', 0xAB, 0xAB, 0xAB, 0xAB, 0xAB], 4), 4);
    }

    #[test]
    fn bounded_reserves_terminator() {
        assert_eq!(bounded("abcdef", 4), "abc");
        assert_eq!(bounded("ab", 4), "ab");
        assert_eq!(bounded("ab", 0), "");
    }

    #[test]
    fn ws_is_collapsed() {
        assert_eq!(normalize_ws("  GAS   OIL \t GRADO 3 "), "GAS OIL GRADO 3");
    }
}
