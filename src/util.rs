/// Trims `s` and returns it only when something is left.
#[inline]
pub fn non_empty(s: &str) -> Option<&str> {
    let s = s.trim();
    (!s.is_empty()).then_some(s)
}

/// Replaces every run of whitespace (newlines included) by a single space.
pub fn collapse_whitespace(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for word in s.split_whitespace() {
        if !out.is_empty() {
            out.push(' ');
        }
        out.push_str(word);
    }
    out
}

/// Cuts `s` to at most `max` characters, appending `marker` when anything was cut.
///
/// Counting is done on `char`s so multi-byte text is never split mid-codepoint.
pub fn truncate_chars(s: &str, max: usize, marker: &str) -> String {
    match s.char_indices().nth(max) {
        Some((end, _)) => {
            let mut out = String::with_capacity(end + marker.len());
            out.push_str(&s[..end]);
            out.push_str(marker);
            out
        }
        None => s.to_owned(),
    }
}
