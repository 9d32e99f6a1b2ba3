//! Shared utility functions.

/// Truncate a string to approximately `max_bytes` without splitting a UTF-8
/// character boundary.
///
/// Returns a sub-slice of the original string. If the string is shorter than
/// `max_bytes`, the entire string is returned unchanged.
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

/// Collapse a possibly multi-line string into a single preview line of at
/// most `max_bytes`, appending `...` when something was cut.
pub fn preview(s: &str, max_bytes: usize) -> String {
    let flat = s.split_whitespace().collect::<Vec<_>>().join(" ");
    let cut = truncate_str(&flat, max_bytes);
    if cut.len() < flat.len() {
        format!("{}...", cut)
    } else {
        flat
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn truncate_ascii() {
        assert_eq!(truncate_str("hello world", 5), "hello");
    }

    #[test]
    fn truncate_no_op_when_short() {
        assert_eq!(truncate_str("hi", 10), "hi");
    }

    #[test]
    fn truncate_inside_marker() {
        // '【' is 3 bytes (U+3010)
        let s = "【工具";
        assert_eq!(truncate_str(s, 4), "【");
        assert_eq!(truncate_str(s, 6), "【工");
    }

    #[test]
    fn preview_flattens_and_marks_cut() {
        assert_eq!(preview("line one\nline two", 100), "line one line two");
        assert_eq!(preview("abcdefgh", 3), "abc...");
    }
}
