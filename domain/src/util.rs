//! Shared text helpers.

/// Cut `s` to at most `max_bytes` bytes, backing up to a UTF-8 boundary.
pub fn truncate_str(s: &str, max_bytes: usize) -> &str {
    if s.len() <= max_bytes {
        return s;
    }
    let mut end = max_bytes;
    while end > 0 && !s.is_char_boundary(end) {
        end -= 1;
    }
    &s[..end]
}

/// One-line preview of a possibly long LLM text for logs and progress lines.
///
/// Whitespace runs (including newlines) collapse to a single space; text
/// longer than `max_bytes` is cut and suffixed with `...`.
pub fn preview(text: &str, max_bytes: usize) -> String {
    let flat = text.split_whitespace().collect::<Vec<_>>().join(" ");
    if flat.len() <= max_bytes {
        return flat;
    }
    format!("{}...", truncate_str(&flat, max_bytes))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn truncate_multibyte_boundary() {
        let s = "déjà vu";
        // 'é' spans bytes 1..3
        assert_eq!(truncate_str(s, 2), "d");
        assert_eq!(truncate_str(s, 3), "dé");
        assert_eq!(truncate_str(s, 100), s);
    }

    #[test]
    fn preview_flattens_whitespace() {
        assert_eq!(preview("Revenue\n\n  was   $10M", 100), "Revenue was $10M");
    }

    #[test]
    fn preview_truncates_with_ellipsis() {
        assert_eq!(preview("abcdefghij", 4), "abcd...");
        assert_eq!(preview("", 4), "");
    }
}
