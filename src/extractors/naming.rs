//! Name normalisation for DJ and show names

use regex::Regex;
use std::sync::LazyLock;

use super::markup::collapse_whitespace;

static DATE_SUFFIX_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?:\s*\(\d{4}-\d{2}-\d{2}\))+\s*$").expect("valid regex")
});

static DJ_PREFIX_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)^dj[\s_\-]*").expect("valid regex"));

static CASE_BOUNDARY_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"([a-z])([A-Z])").expect("valid regex"));

static TITLED_DJ_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^Dj\b").expect("valid regex"));

/// Remove trailing `(YYYY-MM-DD)` tokens from a show name.
///
/// Every trailing date token is removed, so applying this twice gives the
/// same result as applying it once.
pub fn strip_date_suffix(show_name: &str) -> String {
    DATE_SUFFIX_RE.replace(show_name, "").trim().to_string()
}

/// Build a display name from a profile slug, e.g. `djmakoby` -> `DJ Makoby`
pub fn display_name_from_slug(slug: &str) -> String {
    let prefixed = DJ_PREFIX_RE.replace(slug.trim(), "DJ ");
    let split = CASE_BOUNDARY_RE.replace_all(&prefixed, "$1 $2");
    let titled = collapse_whitespace(&split)
        .split(' ')
        .map(title_case_word)
        .collect::<Vec<_>>()
        .join(" ");
    TITLED_DJ_RE.replace(&titled, "DJ").into_owned()
}

fn title_case_word(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first
            .to_uppercase()
            .chain(chars.flat_map(char::to_lowercase))
            .collect(),
        None => String::new(),
    }
}
