//! Delimiter-aware text extraction, done as small explicit state
//! machines over the character stream instead of ad hoc counters.

enum EscapeState {
    Normal,
    Escaped,
}

/// The prefix of `s` up to (excluding) the first occurrence of `stop`
/// that is not preceded by an odd run of backslashes. Returns all of `s`
/// when no unescaped stop character exists.
pub fn prefix_to_unescaped(s: &str, stop: char) -> &str {
    let mut state = EscapeState::Normal;
    for (idx, c) in s.char_indices() {
        match state {
            EscapeState::Normal => {
                if c == stop {
                    return &s[..idx];
                }
                if c == '\\' {
                    state = EscapeState::Escaped;
                }
            }
            EscapeState::Escaped => {
                state = EscapeState::Normal;
            }
        }
    }
    s
}

enum TagState {
    Text,
    Tag,
}

/// Drop `<...>` tag spans, keeping only text content.
fn strip_tags(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut state = TagState::Text;
    for c in s.chars() {
        match state {
            TagState::Text => {
                if c == '<' {
                    state = TagState::Tag;
                } else {
                    out.push(c);
                }
            }
            TagState::Tag => {
                if c == '>' {
                    state = TagState::Text;
                }
            }
        }
    }
    out
}

/// Text of the first `<h1>` element in converted HTML, if any. Used to
/// derive the artifact title from content instead of the file name.
pub fn h1_text(html: &str) -> Option<String> {
    let open = html.find("<h1")?;
    let after_open = &html[open..];
    let start = after_open.find('>')? + 1;
    let inner = &after_open[start..];
    let end = inner.find("</h1>")?;

    let text = strip_tags(&inner[..end]).trim().to_string();
    if text.is_empty() { None } else { Some(text) }
}
