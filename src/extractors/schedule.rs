//! Upcoming-show extraction
//!
//! A schedule section starts at a heading and runs until the next known
//! section marker (or the end of the page). Inside it, each entry is a time of
//! day followed by two name phrases: the DJ and the show.

use regex::Regex;
use std::sync::LazyLock;
use tracing::debug;

use super::markup::{collapse_whitespace, find_ignore_ascii_case, flatten};
use crate::models::ScheduleEntry;

/// `H:MM`/`HH:MM` with an optional meridiem. Each match opens an entry that
/// runs until the next match.
static TIME_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\b\d{1,2}:\d{2}(?:[ \t]*(?:[AaPp][Mm]\b|[AaPp]\.[Mm]\.))?")
        .expect("valid regex")
});

/// DJ phrase, hard separator, show phrase at the start of one entry's text
static NAMES_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(concat!(
        r"^[\s|•·–—\-]*",
        r"([A-Za-z0-9][A-Za-z0-9 \t'\-]*?)",
        r"[ \t]*(?:\n|[|•·–—]|\s-\s)[\s|•·–—]*",
        r"([A-Za-z0-9][A-Za-z0-9 \t'\-]*)",
    ))
    .expect("valid regex")
});

/// Finds and parses schedule sections
#[derive(Debug, Clone)]
pub struct ScheduleExtractor {
    boundary_markers: Vec<String>,
}

impl ScheduleExtractor {
    pub fn new(boundary_markers: Vec<String>) -> Self {
        Self { boundary_markers }
    }

    /// Text between `heading` and the next boundary marker, if the heading
    /// appears at all
    pub fn section<'a>(&self, page: &'a str, heading: &str) -> Option<&'a str> {
        let start = find_ignore_ascii_case(page, heading)? + heading.len();
        let rest = &page[start..];
        let end = self
            .boundary_markers
            .iter()
            .filter_map(|marker| find_ignore_ascii_case(rest, marker))
            .min()
            .unwrap_or(rest.len());
        Some(&rest[..end])
    }

    /// Entries listed under `heading`; empty when the heading is missing or
    /// the section holds nothing recognisable
    pub fn extract(&self, page: &str, heading: &str) -> Vec<ScheduleEntry> {
        let Some(section) = self.section(page, heading) else {
            debug!("Schedule heading '{}' not found", heading);
            return Vec::new();
        };

        let entries = parse_entries(&flatten(section));
        debug!(
            "Found {} schedule entries under '{}'",
            entries.len(),
            heading
        );
        entries
    }
}

/// Parse every entry in already-flattened section text. Entries need no
/// separator between them: a show name ends where the next time begins.
pub fn parse_entries(text: &str) -> Vec<ScheduleEntry> {
    let times: Vec<_> = TIME_RE.find_iter(text).collect();

    times
        .iter()
        .enumerate()
        .filter_map(|(i, time)| {
            let end = times.get(i + 1).map_or(text.len(), |next| next.start());
            let caps = NAMES_RE.captures(&text[time.end()..end])?;

            let dj_name = clean_phrase(&caps[1]);
            let show_name = clean_phrase(&caps[2]);
            // A meridiem on its own line read as the DJ name
            if dj_name.is_empty() || show_name.is_empty() || is_meridiem(&dj_name) {
                return None;
            }
            Some(ScheduleEntry {
                time: collapse_whitespace(time.as_str()),
                dj_name,
                show_name,
                channel_id: None,
                channel_name: None,
            })
        })
        .collect()
}

fn is_meridiem(phrase: &str) -> bool {
    matches!(
        phrase.replace('.', "").to_ascii_lowercase().as_str(),
        "am" | "pm"
    )
}

fn clean_phrase(phrase: &str) -> String {
    collapse_whitespace(phrase.trim_matches(|c: char| c == '-' || c.is_whitespace()))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn extractor() -> ScheduleExtractor {
        ScheduleExtractor::new(vec![
            "Track History".to_string(),
            "<footer".to_string(),
        ])
    }

    const CHANNEL_PAGE: &str = r#"
        <nav><a href="/">Home</a></nav>
        <h2>Upcoming Shows</h2>
        <ul>
          <li><span>9:00 PM</span><strong>DJ Nova</strong><em>Club Vibes</em></li>
          <li><span>11:30 PM</span><strong>Dj Echo</strong><em>Night Drive</em></li>
        </ul>
        <h2>Track History</h2>
        <ul><li><span>8:00 PM</span><strong>Artist</strong><em>Track</em></li></ul>
        <footer>&copy; 2025</footer>
    "#;

    #[test]
    fn test_extracts_entries_in_page_order() {
        let entries = extractor().extract(CHANNEL_PAGE, "Upcoming Shows");
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].time, "9:00 PM");
        assert_eq!(entries[0].dj_name, "DJ Nova");
        assert_eq!(entries[0].show_name, "Club Vibes");
        assert_eq!(entries[1].time, "11:30 PM");
        assert_eq!(entries[1].dj_name, "Dj Echo");
        assert_eq!(entries[1].show_name, "Night Drive");
        assert!(entries.iter().all(|e| e.channel_id.is_none()));
    }

    #[test]
    fn test_section_stops_at_boundary() {
        let section = extractor().section(CHANNEL_PAGE, "Upcoming Shows").unwrap();
        assert!(section.contains("Night Drive"));
        assert!(!section.contains("Artist"));
    }

    #[test]
    fn test_section_runs_to_end_without_boundary() {
        let page = "<h3>Upcoming Events</h3><p>10:00 | DJ Late | After Hours</p>";
        let entries = extractor().extract(page, "Upcoming Events");
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].time, "10:00");
        assert_eq!(entries[0].dj_name, "DJ Late");
        assert_eq!(entries[0].show_name, "After Hours");
    }

    #[test]
    fn test_heading_match_ignores_case() {
        let entries = extractor().extract(CHANNEL_PAGE, "UPCOMING SHOWS");
        assert_eq!(entries.len(), 2);
    }

    #[test]
    fn test_missing_heading_is_empty() {
        assert!(extractor().extract(CHANNEL_PAGE, "Coming Soon").is_empty());
        assert!(extractor().extract("", "Upcoming Shows").is_empty());
        assert!(extractor().extract(CHANNEL_PAGE, "").is_empty());
    }

    #[test]
    fn test_heading_without_entries_is_empty() {
        let page = "<h2>Upcoming Shows</h2><p>Nothing scheduled</p><footer>x</footer>";
        assert!(extractor().extract(page, "Upcoming Shows").is_empty());
    }

    #[test]
    fn test_dash_separated_plain_text() {
        let entries = parse_entries("9:00 PM - DJ Nova - Club Vibes\n9:30 am - Dj Sunrise - Wake-Up Call\n");
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].dj_name, "DJ Nova");
        assert_eq!(entries[0].show_name, "Club Vibes");
        assert_eq!(entries[1].time, "9:30 am");
        assert_eq!(entries[1].show_name, "Wake-Up Call");
    }

    #[test]
    fn test_next_hour_not_taken_as_show() {
        let entries = parse_entries("9:00 PM\nDJ Nova\n10:00 PM\nDj Echo\nNight Drive\n");
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].time, "10:00 PM");
        assert_eq!(entries[0].dj_name, "Dj Echo");
    }

    #[test]
    fn test_names_are_whitespace_collapsed() {
        let entries = parse_entries("21:00\n  DJ   Nova  \n  Club    Vibes \n");
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].time, "21:00");
        assert_eq!(entries[0].dj_name, "DJ Nova");
        assert_eq!(entries[0].show_name, "Club Vibes");
    }

    #[test]
    fn test_entries_on_one_line() {
        let entries = parse_entries(
            "9:00 PM | DJ Nova | Club Vibes 10:00 PM | Dj Echo | Night Drive 11:30 PM | Dj Orbit | Deep Space\n",
        );
        assert_eq!(entries.len(), 3);
        assert_eq!(entries[0].time, "9:00 PM");
        assert_eq!(entries[0].dj_name, "DJ Nova");
        assert_eq!(entries[0].show_name, "Club Vibes");
        assert_eq!(entries[1].time, "10:00 PM");
        assert_eq!(entries[1].show_name, "Night Drive");
        assert_eq!(entries[2].dj_name, "Dj Orbit");
        assert_eq!(entries[2].show_name, "Deep Space");
    }

    #[test]
    fn test_one_line_section_in_markup() {
        let page = "<h2>Upcoming Shows</h2><p>20:00 DJ Nova - Club Vibes 22:00 Dj Echo - Night Drive</p>";
        let entries = extractor().extract(page, "Upcoming Shows");
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].time, "20:00");
        assert_eq!(entries[0].show_name, "Club Vibes");
        assert_eq!(entries[1].time, "22:00");
        assert_eq!(entries[1].dj_name, "Dj Echo");
    }

    #[test]
    fn test_meridiem_line_not_taken_as_dj() {
        let entries = parse_entries("9:00\nPM\nDJ Nova\n");
        assert_eq!(entries.len(), 0);
    }
}
