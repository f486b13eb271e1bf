/// Removes every double-quote character from `text`.
///
/// Applied to partial output when the deadline fires. Output of a stream that
/// closed on its own is returned untouched.
pub fn sanitize(text: &str) -> String {
    text.replace('"', "")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strips_all_double_quotes() {
        assert_eq!(sanitize(r#"say "hi" to "them""#), "say hi to them");
    }

    #[test]
    fn leaves_single_quotes_and_plain_text() {
        assert_eq!(sanitize("it's fine"), "it's fine");
        assert_eq!(sanitize(""), "");
    }

    #[test]
    fn is_idempotent() {
        for input in ["", "\"", "a\"b\"\"c", "no quotes", "\u{201c}curly\u{201d}"] {
            let once = sanitize(input);
            assert_eq!(sanitize(&once), once);
        }
    }
}
