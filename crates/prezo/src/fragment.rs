//! Address fragment encoding of the current slide: `#/<index>`.

/// Read the slide index out of a location hash.
///
/// Accepts the hash with or without its leading `#`, but the `/` must be
/// there. After it an optional sign and a run of leading digits are read, so
/// `#/3`, `/3` and `#/3abc` all give 3. A fragment without the `/`, empty or
/// non-numeric gives 0. Negative and oversized values are returned as read and
/// left to the render pass to clamp.
pub fn parse_index(fragment: &str) -> i64 {
    let rest = fragment.strip_prefix('#').unwrap_or(fragment);
    let Some(rest) = rest.strip_prefix('/') else {
        return 0;
    };
    let rest = rest.trim_start();

    let (negative, digits) = match rest.as_bytes().first() {
        Some(b'-') => (true, &rest[1..]),
        Some(b'+') => (false, &rest[1..]),
        _ => (false, rest),
    };

    let mut value: i64 = 0;
    let mut seen_digit = false;
    for b in digits.bytes().take_while(u8::is_ascii_digit) {
        seen_digit = true;
        value = value.saturating_mul(10).saturating_add(i64::from(b - b'0'));
    }

    if !seen_digit {
        0
    } else if negative {
        -value
    } else {
        value
    }
}

/// Fragment (without `#`) that encodes `index`.
pub fn format_index(index: usize) -> String {
    format!("/{index}")
}

/// Whether `fragment` is already the canonical encoding of `index`.
pub fn encodes(fragment: &str, index: usize) -> bool {
    let rest = fragment.strip_prefix('#').unwrap_or(fragment);
    rest == format_index(index)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_plain() {
        assert_eq!(parse_index("#/0"), 0);
        assert_eq!(parse_index("#/3"), 3);
        assert_eq!(parse_index("#/42"), 42);
        assert_eq!(parse_index("/7"), 7);
    }

    #[test]
    fn test_parse_absent_or_garbage() {
        assert_eq!(parse_index(""), 0);
        assert_eq!(parse_index("#"), 0);
        assert_eq!(parse_index("#/"), 0);
        assert_eq!(parse_index("#/intro"), 0);
        assert_eq!(parse_index("#/-"), 0);
        assert_eq!(parse_index("#3"), 0);
        assert_eq!(parse_index("#x5"), 0);
        assert_eq!(parse_index("3"), 0);
    }

    #[test]
    fn test_parse_integer_prefix() {
        assert_eq!(parse_index("#/3abc"), 3);
        assert_eq!(parse_index("#/12/notes"), 12);
        assert_eq!(parse_index("#/ 5"), 5);
    }

    #[test]
    fn test_parse_signed_and_huge() {
        assert_eq!(parse_index("#/-2"), -2);
        assert_eq!(parse_index("#/+4"), 4);
        assert_eq!(parse_index("#/99999999999999999999999"), i64::MAX);
    }

    #[test]
    fn test_format_then_parse() {
        for k in [0usize, 1, 9, 10, 250] {
            let fragment = format!("#{}", format_index(k));
            assert_eq!(parse_index(&fragment), k as i64);
            assert!(encodes(&fragment, k));
        }
    }

    #[test]
    fn test_encodes_is_strict() {
        assert!(encodes("#/2", 2));
        assert!(encodes("/2", 2));
        assert!(!encodes("#/02", 2));
        assert!(!encodes("#/2abc", 2));
        assert!(!encodes("", 0));
    }
}
