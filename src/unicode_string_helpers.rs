
/// Returns the longest prefix of `s` that is no more than `max_bytes` long and ends on a
/// character boundary
pub fn utf8_truncate(s: &str, max_bytes: usize) -> &str {
    if s.len() <= max_bytes {
        return s;
    }
    let mut end = max_bytes;
    while !s.is_char_boundary(end) {
        end -= 1;
    }
    &s[..end]
}

/// Compares two strings without regard to case
///
/// NOTE: This lowercases char-by-char rather than allocating, so "Straße" and "STRASSE" are
/// not considered equal.  That is fine for the names and codes we key records on.
pub fn unicode_eq_ignore_case(a: &str, b: &str) -> bool {
    let mut a_chars = a.chars().flat_map(char::to_lowercase);
    let mut b_chars = b.chars().flat_map(char::to_lowercase);
    loop {
        match (a_chars.next(), b_chars.next()) {
            (None, None) => return true,
            (Some(a_char), Some(b_char)) if a_char == b_char => continue,
            _ => return false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn truncate_respects_char_boundaries() {
        assert_eq!(utf8_truncate("hello", 10), "hello");
        assert_eq!(utf8_truncate("hello", 3), "hel");
        //'é' is two bytes, so cutting in the middle of it backs off to before it
        assert_eq!(utf8_truncate("café", 4), "caf");
        assert_eq!(utf8_truncate("日曜日", 4), "日");
        assert_eq!(utf8_truncate("abc", 0), "");
    }

    #[test]
    fn case_insensitive_compare() {
        assert!(unicode_eq_ignore_case("Alice Smith", "alice SMITH"));
        assert!(unicode_eq_ignore_case("ÉCOLE", "école"));
        assert!(!unicode_eq_ignore_case("Alice", "Alicia"));
        assert!(!unicode_eq_ignore_case("Al", "Alice"));
        assert!(unicode_eq_ignore_case("", ""));
    }
}
