use once_cell::sync::Lazy;
use regex::Regex;

static WS_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+").unwrap());

/// Replace every whitespace run (including newlines) with a single space.
/// Does not trim.
pub fn collapse_whitespace(text: &str) -> String {
    WS_RE.replace_all(text, " ").into_owned()
}

/// Trimmed, non-empty lines in document order.
pub fn non_blank_lines(text: &str) -> Vec<&str> {
    text.split('\n')
        .map(str::trim)
        .filter(|l| !l.is_empty())
        .collect()
}

/// Number of characters (not bytes) in `s`.
pub fn char_len(s: &str) -> usize {
    s.chars().count()
}

/// Truncate to at most `max_chars` characters, on a char boundary.
pub fn truncate_chars(s: &str, max_chars: usize) -> &str {
    match s.char_indices().nth(max_chars) {
        Some((idx, _)) => &s[..idx],
        None => s,
    }
}

/// First sentence of `text`: everything up to and including the first
/// `.`, `!` or `?` that is followed by whitespace. The whole text when
/// there is no such boundary.
pub fn first_sentence(text: &str) -> &str {
    let mut chars = text.char_indices().peekable();
    while let Some((idx, c)) = chars.next() {
        if matches!(c, '.' | '!' | '?') {
            if let Some(&(_, next)) = chars.peek() {
                if next.is_whitespace() {
                    return &text[..idx + c.len_utf8()];
                }
            }
        }
    }
    text
}
