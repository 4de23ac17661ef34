//! Markup flattening helpers
//!
//! Source pages are treated as text, not as a document tree. Flattening turns
//! every tag into a line break so that text which sits in separate elements
//! ends up on separate lines, which is what the extraction patterns key on.

use regex::Regex;
use std::sync::LazyLock;

static SCRIPT_STYLE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?is)<script\b.*?</script\s*>|<style\b.*?</style\s*>|<!--.*?-->")
        .expect("valid regex")
});

static TAG_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"<[^>]*>").expect("valid regex"));

/// Entities that show up in names on the source pages. `&amp;` goes last so
/// that double-escaped text is only unescaped once.
const ENTITIES: &[(&str, &str)] = &[
    ("&nbsp;", " "),
    ("&#160;", " "),
    ("&quot;", "\""),
    ("&#34;", "\""),
    ("&#39;", "'"),
    ("&#039;", "'"),
    ("&apos;", "'"),
    ("&rsquo;", "'"),
    ("&lt;", "<"),
    ("&gt;", ">"),
    ("&amp;", "&"),
];

/// Replace markup with line breaks and decode common entities
pub fn flatten(markup: &str) -> String {
    let without_code = SCRIPT_STYLE_RE.replace_all(markup, "\n");
    let text = TAG_RE.replace_all(&without_code, "\n");
    decode_entities(&text)
}

pub fn decode_entities(text: &str) -> String {
    let mut decoded = text.to_string();
    for (entity, replacement) in ENTITIES {
        if decoded.contains(entity) {
            decoded = decoded.replace(entity, replacement);
        }
    }
    decoded
}

/// Trim and squeeze internal whitespace runs to single spaces
pub fn collapse_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Byte offset of the first ASCII case-insensitive occurrence of `needle`
pub fn find_ignore_ascii_case(haystack: &str, needle: &str) -> Option<usize> {
    if needle.is_empty() {
        return None;
    }
    let haystack = haystack.to_ascii_lowercase();
    let needle = needle.to_ascii_lowercase();
    haystack.find(&needle)
}
