//! Now-playing status extraction
//!
//! A channel page has no stable structure, so the status is assembled from an
//! ordered table of small rules. Each rule looks at the page (and at what the
//! earlier rules resolved) and may fill some fields of a [`PartialStatus`].
//! Fields are filled first-success-wins: a later rule never overwrites a field
//! an earlier rule already resolved, but different fields can come from
//! different rules.

use chrono::Utc;
use regex::Regex;
use std::sync::LazyLock;
use tracing::debug;
use url::Url;

use super::markup::{collapse_whitespace, flatten};
use super::naming::{display_name_from_slug, strip_date_suffix};
use crate::models::{Channel, ChannelStatus, DEFAULT_DJ_NAME, DEFAULT_SHOW_NAME};

static LIVE_MARKER_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)>\s*live\s*<").expect("valid regex"));

static REPLAY_MARKER_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)replay").expect("valid regex"));

static BANNER_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"/dj_banner/(\d+)\.jpg").expect("valid regex"));

static PROFILE_LINK_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?i)href\s*=\s*["']?(?:https?://[^/"'\s>]+)?/djs/([a-z0-9]+)/"#)
        .expect("valid regex")
});

/// `Live|Replay`, DJ line, then `Show Name (YYYY-MM-DD)` on the next line
static DATED_HEADING_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(concat!(
        r"\b(?i:live|replay)\b\s+",
        r"((?i:dj\s+)?[A-Za-z0-9][A-Za-z0-9 \t]*?)[ \t]*\n\s*",
        r"([A-Za-z0-9][A-Za-z0-9 \t'\-]*?)[ \t]*\(\d{4}-\d{2}-\d{2}\)",
    ))
    .expect("valid regex")
});

/// Looser variant: any line/pipe/dash separator, and only a trailing year
static YEAR_HEADING_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(concat!(
        r"\b(?i:live|replay)\b\s+",
        r"([A-Za-z0-9][A-Za-z0-9 \t._\-]*?)[ \t]*(?:\n|\||\s-\s)[\s|]*",
        r"([A-Za-z0-9][A-Za-z0-9 \t'._\-]*?)[ \t]*\(?\d{4}\b",
    ))
    .expect("valid regex")
});

/// A page prepared for the rule table
pub struct StatusPage<'a> {
    /// Raw markup, used by the rules that key on attributes and tags
    pub raw: &'a str,
    /// Flattened text, used by the rules that key on visible text
    pub text: String,
}

impl<'a> StatusPage<'a> {
    pub fn new(raw: &'a str) -> Self {
        Self {
            raw,
            text: flatten(raw),
        }
    }
}

/// Fields resolved so far; `None` means "not resolved yet"
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PartialStatus {
    pub is_live: Option<bool>,
    pub is_replay: Option<bool>,
    pub banner_id: Option<String>,
    pub dj_slug: Option<String>,
    pub dj_name: Option<String>,
    pub show_name: Option<String>,
}

impl PartialStatus {
    /// Fill every unresolved field from `other`
    pub fn fill_from(&mut self, other: PartialStatus) {
        self.is_live = self.is_live.or(other.is_live);
        self.is_replay = self.is_replay.or(other.is_replay);
        self.banner_id = self.banner_id.take().or(other.banner_id);
        self.dj_slug = self.dj_slug.take().or(other.dj_slug);
        self.dj_name = self.dj_name.take().or(other.dj_name);
        self.show_name = self.show_name.take().or(other.show_name);
    }

    fn has_dj_name(&self) -> bool {
        self.dj_name.as_deref().is_some_and(|n| !n.is_empty())
    }
}

pub type RuleFn = fn(&StatusPage<'_>, &PartialStatus) -> PartialStatus;

pub struct StatusRule {
    pub name: &'static str,
    pub apply: RuleFn,
}

/// Extraction rules in the order they are consulted. The slug-derived name
/// must stay after both text rules.
pub const STATUS_RULES: &[StatusRule] = &[
    StatusRule {
        name: "broadcast_markers",
        apply: broadcast_markers,
    },
    StatusRule {
        name: "banner_image",
        apply: banner_image,
    },
    StatusRule {
        name: "profile_slug",
        apply: profile_slug,
    },
    StatusRule {
        name: "dated_heading",
        apply: dated_heading,
    },
    StatusRule {
        name: "year_heading",
        apply: year_heading,
    },
    StatusRule {
        name: "slug_name",
        apply: slug_name,
    },
];

fn broadcast_markers(page: &StatusPage<'_>, _: &PartialStatus) -> PartialStatus {
    let is_replay = REPLAY_MARKER_RE.is_match(page.raw);
    let is_live = LIVE_MARKER_RE.is_match(page.raw) && !is_replay;
    PartialStatus {
        is_live: Some(is_live),
        is_replay: Some(is_replay),
        ..Default::default()
    }
}

fn banner_image(page: &StatusPage<'_>, _: &PartialStatus) -> PartialStatus {
    PartialStatus {
        banner_id: BANNER_RE
            .captures(page.raw)
            .map(|caps| caps[1].to_string()),
        ..Default::default()
    }
}

fn profile_slug(page: &StatusPage<'_>, _: &PartialStatus) -> PartialStatus {
    PartialStatus {
        dj_slug: PROFILE_LINK_RE
            .captures(page.raw)
            .map(|caps| caps[1].to_string()),
        ..Default::default()
    }
}

fn dated_heading(page: &StatusPage<'_>, _: &PartialStatus) -> PartialStatus {
    names_from(&DATED_HEADING_RE, &page.text)
}

fn year_heading(page: &StatusPage<'_>, _: &PartialStatus) -> PartialStatus {
    names_from(&YEAR_HEADING_RE, &page.text)
}

fn slug_name(_: &StatusPage<'_>, resolved: &PartialStatus) -> PartialStatus {
    if resolved.has_dj_name() {
        return PartialStatus::default();
    }
    PartialStatus {
        dj_name: resolved
            .dj_slug
            .as_deref()
            .filter(|slug| !slug.is_empty())
            .map(display_name_from_slug),
        ..Default::default()
    }
}

/// DJ name from group 1 and show name from group 2. A captured "AutoDJ" is
/// the site's own placeholder and counts as unresolved.
fn names_from(re: &Regex, text: &str) -> PartialStatus {
    let Some(caps) = re.captures(text) else {
        return PartialStatus::default();
    };

    let dj_name = Some(collapse_whitespace(&caps[1]))
        .filter(|n| !n.is_empty() && !n.eq_ignore_ascii_case(DEFAULT_DJ_NAME));
    let show_name = Some(collapse_whitespace(&caps[2])).filter(|n| !n.is_empty());

    PartialStatus {
        dj_name,
        show_name,
        ..Default::default()
    }
}

/// Run the rule table over one page
pub fn resolve(page: &StatusPage<'_>) -> PartialStatus {
    let mut resolved = PartialStatus::default();
    for rule in STATUS_RULES {
        let found = (rule.apply)(page, &resolved);
        if found != PartialStatus::default() {
            debug!("Status rule '{}' produced {:?}", rule.name, found);
        }
        resolved.fill_from(found);
    }
    resolved
}

/// Turns channel pages into [`ChannelStatus`] records
#[derive(Debug, Clone)]
pub struct StatusExtractor {
    base_url: Url,
}

impl StatusExtractor {
    /// `base_url` is the site root that banner and profile paths hang off
    pub fn new(base_url: Url) -> Self {
        Self { base_url }
    }

    /// Extract the status of `channel` from its page. Never fails: anything
    /// that cannot be resolved falls back to the documented defaults.
    pub fn extract(&self, channel: &Channel, raw: &str) -> ChannelStatus {
        let page = StatusPage::new(raw);
        let resolved = resolve(&page);

        let is_replay = resolved.is_replay.unwrap_or(false);
        let is_live = resolved.is_live.unwrap_or(false) && !is_replay;

        let dj_name = resolved
            .dj_name
            .filter(|n| !n.is_empty())
            .unwrap_or_else(|| DEFAULT_DJ_NAME.to_string());
        let show_name = resolved
            .show_name
            .map(|s| strip_date_suffix(&s))
            .filter(|s| !s.is_empty())
            .unwrap_or_else(|| DEFAULT_SHOW_NAME.to_string());

        let dj_slug = resolved.dj_slug.unwrap_or_default();
        let dj_image = resolved
            .banner_id
            .and_then(|id| self.banner_url(&id))
            .unwrap_or_default();
        let dj_profile_url = self.profile_url(&dj_slug);

        ChannelStatus {
            channel_id: channel.id.clone(),
            channel_name: channel.display_name.clone(),
            is_live,
            is_replay,
            dj_name,
            show_name,
            dj_slug,
            dj_image,
            dj_profile_url,
            timestamp: Utc::now(),
            error: None,
        }
    }

    pub fn banner_url(&self, banner_id: &str) -> Option<String> {
        self.base_url
            .join(&format!("/image/dj_banner/{banner_id}.jpg"))
            .ok()
            .map(String::from)
    }

    /// Profile page for a slug; `None` for an empty slug
    pub fn profile_url(&self, slug: &str) -> Option<String> {
        if slug.is_empty() {
            return None;
        }
        self.base_url
            .join(&format!("/djs/{slug}/"))
            .ok()
            .map(String::from)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn extractor() -> StatusExtractor {
        StatusExtractor::new(Url::parse("https://virtualdjradio.com").unwrap())
    }

    fn channel() -> Channel {
        Channel::new("clubzone", "ClubZone", "https://virtualdjradio.com/clubzone/")
    }

    const LIVE_PAGE: &str = r#"
        <div class="onair">
          <img src="/image/dj_banner/4821.jpg" alt="">
          <span class="badge">LIVE</span>
          <a href="/djs/djnova/">Dj Nova</a>
          <div class="show">Club Vibes (2025-08-08)</div>
        </div>
    "#;

    #[test]
    fn test_live_page_fully_resolved() {
        let status = extractor().extract(&channel(), LIVE_PAGE);
        assert!(status.is_live);
        assert!(!status.is_replay);
        assert_eq!(status.dj_name, "Dj Nova");
        assert_eq!(status.show_name, "Club Vibes");
        assert_eq!(status.dj_slug, "djnova");
        assert_eq!(
            status.dj_image,
            "https://virtualdjradio.com/image/dj_banner/4821.jpg"
        );
        assert_eq!(
            status.dj_profile_url.as_deref(),
            Some("https://virtualdjradio.com/djs/djnova/")
        );
        assert_eq!(status.channel_id, "clubzone");
        assert_eq!(status.channel_name, "ClubZone");
        assert!(status.error.is_none());
    }

    #[test]
    fn test_replay_wins_over_live() {
        let page = r#"<span>LIVE</span><span>Replay</span>
            <b>Dj Echo</b><i>Night Drive (2025-01-02)</i>"#;
        let status = extractor().extract(&channel(), page);
        assert!(status.is_replay);
        assert!(!status.is_live);
        assert_eq!(status.dj_name, "Dj Echo");
        assert_eq!(status.show_name, "Night Drive");
    }

    #[test]
    fn test_live_marker_needs_markup_delimiters() {
        let status = extractor().extract(&channel(), "<p>Deliver the live set</p>");
        assert!(!status.is_live);

        let status = extractor().extract(&channel(), "<span> Live </span>");
        assert!(status.is_live);
    }

    #[test]
    fn test_slug_fallback_name() {
        let page = r#"<span>LIVE</span><a href="/djs/djmakoby/">profile</a>"#;
        let status = extractor().extract(&channel(), page);
        assert!(status.is_live);
        assert!(!status.is_replay);
        assert_eq!(status.dj_name, "DJ Makoby");
        assert_eq!(status.show_name, DEFAULT_SHOW_NAME);
        assert_eq!(
            status.dj_profile_url.as_deref(),
            Some("https://virtualdjradio.com/djs/djmakoby/")
        );
    }

    #[test]
    fn test_empty_page_yields_defaults() {
        let status = extractor().extract(&channel(), "<html><body>Welcome</body></html>");
        assert!(!status.is_live);
        assert!(!status.is_replay);
        assert_eq!(status.dj_name, DEFAULT_DJ_NAME);
        assert_eq!(status.show_name, DEFAULT_SHOW_NAME);
        assert_eq!(status.dj_slug, "");
        assert_eq!(status.dj_image, "");
        assert!(status.dj_profile_url.is_none());
        assert!(status.error.is_none());
    }

    #[test]
    fn test_year_fallback_when_date_incomplete() {
        let page = "<span>Replay</span> <b>Dj Orbit</b> | <i>Space Trance 2025</i>";
        let status = extractor().extract(&channel(), page);
        assert!(status.is_replay);
        assert_eq!(status.dj_name, "Dj Orbit");
        assert_eq!(status.show_name, "Space Trance");
    }

    #[test]
    fn test_text_name_beats_slug_name() {
        let page = r#"<span>LIVE</span><a href="/djs/djother/">Dj Real Name</a>
            <i>Warm Up (2025-03-03)</i>"#;
        let resolved = resolve(&StatusPage::new(page));
        assert_eq!(resolved.dj_name.as_deref(), Some("Dj Real Name"));
        assert_eq!(resolved.dj_slug.as_deref(), Some("djother"));
    }

    #[test]
    fn test_autodj_placeholder_falls_through_to_slug() {
        let page = r#"<span>LIVE</span><a href="/djs/djmakoby/"><b>AutoDJ</b></a>
            <i>Mixed Hits (2025-03-03)</i>"#;
        let status = extractor().extract(&channel(), page);
        assert_eq!(status.dj_name, "DJ Makoby");
        assert_eq!(status.show_name, "Mixed Hits");
    }

    #[test]
    fn test_absolute_profile_link() {
        let page = r#"<a href="https://virtualdjradio.com/djs/bassHunter/">x</a>"#;
        let status = extractor().extract(&channel(), page);
        assert_eq!(status.dj_slug, "bassHunter");
        assert_eq!(status.dj_name, "Bass Hunter");
    }

    #[test]
    fn test_profile_url_is_deterministic() {
        let extractor = extractor();
        let first = extractor.extract(&channel(), LIVE_PAGE);
        let second = extractor.extract(&channel(), LIVE_PAGE);
        assert_eq!(first.dj_profile_url, second.dj_profile_url);
        assert_eq!(extractor.profile_url(""), None);
    }

    #[test]
    fn test_first_banner_wins() {
        let page = r#"<img src="/image/dj_banner/1.jpg"><img src="/image/dj_banner/2.jpg">"#;
        let resolved = resolve(&StatusPage::new(page));
        assert_eq!(resolved.banner_id.as_deref(), Some("1"));
    }

    #[test]
    fn test_fill_from_keeps_first_success() {
        let mut resolved = PartialStatus {
            dj_name: Some("First".to_string()),
            ..Default::default()
        };
        resolved.fill_from(PartialStatus {
            dj_name: Some("Second".to_string()),
            show_name: Some("Show".to_string()),
            ..Default::default()
        });
        assert_eq!(resolved.dj_name.as_deref(), Some("First"));
        assert_eq!(resolved.show_name.as_deref(), Some("Show"));
    }

    #[test]
    fn test_live_and_replay_never_both_true() {
        let pages = [
            "",
            ">LIVE<",
            "Replay",
            ">live< replay",
            "<b>LIVE</b><b>REPLAY</b>",
            LIVE_PAGE,
        ];
        for page in pages {
            let status = extractor().extract(&channel(), page);
            assert!(!(status.is_live && status.is_replay), "page: {page:?}");
            assert!(!status.dj_name.is_empty());
            assert!(!status.show_name.is_empty());
        }
    }
}
