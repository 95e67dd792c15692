//! Result presentation.
//!
//! Pure mappings from backend payloads to view models. Front ends decide how
//! to draw them; nothing here holds state or performs I/O.

use crate::types::{DomainResponse, PlatformStatus, UsernameResponse};
use chrono::{DateTime, NaiveDate, NaiveDateTime};

/// Placeholder for dates and counts that are absent or unreadable.
pub const NOT_AVAILABLE: &str = "N/A";

/// Shown when an unregistered domain is found.
pub const DOMAIN_AVAILABLE_MESSAGE: &str =
    "🎉 Great news! This domain appears to be available for registration.";

/// Follow-up hint for an unregistered domain.
pub const DOMAIN_AVAILABLE_HINT: &str = "Visit your preferred domain registrar to secure it now!";

const DEFAULT_PLATFORM_ICON: &str = "🌐";

const PLATFORM_ICONS: &[(&str, &str)] = &[
    ("twitter", "🐦"),
    ("instagram", "📸"),
    ("github", "💻"),
    ("tiktok", "🎵"),
    ("youtube", "▶️"),
    ("reddit", "🤖"),
    ("pinterest", "📌"),
    ("linkedin", "💼"),
    ("twitch", "🎮"),
    ("snapchat", "👻"),
];

/// Icon for a platform key, with a generic globe for unknown platforms.
pub fn platform_icon(platform: &str) -> &'static str {
    PLATFORM_ICONS
        .iter()
        .find(|(name, _)| *name == platform)
        .map(|(_, icon)| *icon)
        .unwrap_or(DEFAULT_PLATFORM_ICON)
}

/// Visual tone of a badge or card.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tone {
    Success,
    Warning,
    Unavailable,
    Neutral,
}

/// Status of one platform entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlatformStatusLabel {
    Available,
    Taken,
    Error,
}

impl PlatformStatusLabel {
    pub fn of(status: &PlatformStatus) -> Self {
        if status.error.is_some() {
            Self::Error
        } else if status.available {
            Self::Available
        } else {
            Self::Taken
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Available => "✓ Available",
            Self::Taken => "✕ Taken",
            Self::Error => "Error",
        }
    }

    pub fn tone(self) -> Tone {
        match self {
            Self::Available => Tone::Success,
            Self::Taken => Tone::Unavailable,
            Self::Error => Tone::Neutral,
        }
    }
}

/// One platform card.
#[derive(Debug, Clone, PartialEq)]
pub struct PlatformCard {
    pub platform: String,
    pub icon: &'static str,
    pub status: PlatformStatusLabel,
    /// Profile link; omitted for entries the backend could not check
    pub link: Option<String>,
    pub error: Option<String>,
}

/// A suggested alternative handle.
#[derive(Debug, Clone, PartialEq)]
pub struct SuggestionChip {
    pub text: String,
}

impl SuggestionChip {
    /// Chip caption, e.g. `@testuser123_`.
    pub fn caption(&self) -> String {
        format!("@{}", self.text)
    }

    /// Text placed on the clipboard when the chip is activated.
    pub fn copy_text(&self) -> &str {
        &self.text
    }
}

/// Rendering model of a username check.
#[derive(Debug, Clone, PartialEq)]
pub struct UsernameView {
    pub username: String,
    pub all_available: bool,
    /// Entries without an error that are available
    pub available: usize,
    /// Entries without an error
    pub total: usize,
    pub cards: Vec<PlatformCard>,
    /// Empty when every platform is available
    pub suggestions: Vec<SuggestionChip>,
}

impl UsernameView {
    pub fn summary_label(&self) -> String {
        format!("{} / {} Available", self.available, self.total)
    }

    pub fn tone(&self) -> Tone {
        if self.all_available {
            Tone::Success
        } else {
            Tone::Warning
        }
    }

    pub fn title(&self) -> String {
        format!("Results for @{}", self.username)
    }
}

impl From<&UsernameResponse> for UsernameView {
    fn from(response: &UsernameResponse) -> Self {
        let checked = response.results.iter().filter(|r| r.error.is_none());
        let total = checked.clone().count();
        let available = checked.filter(|r| r.available).count();

        let cards = response
            .results
            .iter()
            .map(|r| PlatformCard {
                platform: r.platform.clone(),
                icon: platform_icon(&r.platform),
                status: PlatformStatusLabel::of(r),
                link: r.error.is_none().then(|| r.url.clone()),
                error: r.error.clone(),
            })
            .collect();

        let suggestions = if response.all_available {
            Vec::new()
        } else {
            response
                .suggestions
                .iter()
                .map(|s| SuggestionChip { text: s.clone() })
                .collect()
        };

        Self {
            username: response.username.clone(),
            all_available: response.all_available,
            available,
            total,
            cards,
            suggestions,
        }
    }
}

/// Details shown for a registered domain.
#[derive(Debug, Clone, PartialEq)]
pub struct RegisteredDomain {
    pub domain_name: String,
    pub registrar: String,
    pub created: String,
    pub expires: String,
    /// "N servers" or "N/A"
    pub name_server_summary: String,
    /// Lowercased name servers
    pub name_servers: Vec<String>,
}

/// Rendering model of a domain lookup.
#[derive(Debug, Clone, PartialEq)]
pub enum DomainView {
    /// The backend reported a lookup error for this domain
    Error { domain_name: String, message: String },
    Registered(RegisteredDomain),
    Available { domain_name: String },
}

impl DomainView {
    pub fn domain_name(&self) -> &str {
        match self {
            DomainView::Error { domain_name, .. } | DomainView::Available { domain_name } => {
                domain_name
            }
            DomainView::Registered(details) => &details.domain_name,
        }
    }

    pub fn badge(&self) -> &'static str {
        match self {
            DomainView::Error { .. } => "Error",
            DomainView::Registered(_) => "Registered",
            DomainView::Available { .. } => "Available!",
        }
    }

    pub fn icon(&self) -> &'static str {
        match self {
            DomainView::Error { .. } => "❌",
            DomainView::Registered(_) => "🔒",
            DomainView::Available { .. } => "✅",
        }
    }
}

impl From<&DomainResponse> for DomainView {
    fn from(response: &DomainResponse) -> Self {
        if let Some(message) = &response.error {
            return DomainView::Error {
                domain_name: response.domain_name.clone(),
                message: message.clone(),
            };
        }

        if !response.domain_exists {
            return DomainView::Available {
                domain_name: response.domain_name.clone(),
            };
        }

        let name_server_summary = if response.name_servers.is_empty() {
            NOT_AVAILABLE.to_string()
        } else {
            format!("{} servers", response.name_servers.len())
        };

        DomainView::Registered(RegisteredDomain {
            domain_name: response.domain_name.clone(),
            registrar: response
                .registrar
                .clone()
                .filter(|r| !r.trim().is_empty())
                .unwrap_or_else(|| "Unknown".to_string()),
            created: format_long_date(response.creation_date.as_deref()),
            expires: format_long_date(response.expiration_date.as_deref()),
            name_server_summary,
            name_servers: response
                .name_servers
                .iter()
                .map(|ns| ns.to_lowercase())
                .collect(),
        })
    }
}

/// Render a WHOIS date as e.g. `August 14, 1995`.
///
/// The calendar date is taken as written, without shifting time zones.
/// Returns `N/A` when the date is missing or cannot be parsed.
pub fn format_long_date(raw: Option<&str>) -> String {
    raw.and_then(parse_whois_date)
        .map(|date| date.format("%B %-d, %Y").to_string())
        .unwrap_or_else(|| NOT_AVAILABLE.to_string())
}

fn parse_whois_date(raw: &str) -> Option<NaiveDate> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.date_naive());
    }

    // WHOIS records frequently carry a numeric offset without a colon.
    for fmt in ["%Y-%m-%dT%H:%M:%S%z", "%Y-%m-%d %H:%M:%S%z"] {
        if let Ok(dt) = DateTime::parse_from_str(raw, fmt) {
            return Some(dt.date_naive());
        }
    }

    for fmt in ["%Y-%m-%dT%H:%M:%S", "%Y-%m-%d %H:%M:%S", "%Y-%m-%dT%H:%M:%S%.f"] {
        if let Ok(dt) = NaiveDateTime::parse_from_str(raw, fmt) {
            return Some(dt.date());
        }
    }

    for fmt in ["%Y-%m-%d", "%d-%b-%Y", "%Y/%m/%d"] {
        if let Ok(date) = NaiveDate::parse_from_str(raw, fmt) {
            return Some(date);
        }
    }

    None
}

#[cfg(test)]
mod tests {
    use super::*;

    fn status(platform: &str, available: bool, error: Option<&str>) -> PlatformStatus {
        PlatformStatus {
            platform: platform.to_string(),
            available,
            url: format!("https://{}.example/{}", platform, "x"),
            error: error.map(str::to_string),
        }
    }

    #[test]
    fn test_testuser123_scenario() {
        let response = UsernameResponse {
            username: "testuser123".to_string(),
            all_available: false,
            results: vec![PlatformStatus {
                platform: "github".to_string(),
                available: false,
                url: "https://github.com/testuser123".to_string(),
                error: None,
            }],
            suggestions: vec!["testuser123_".to_string(), "the_testuser123".to_string()],
        };

        let view = UsernameView::from(&response);
        assert_eq!(view.summary_label(), "0 / 1 Available");
        assert_eq!(view.tone(), Tone::Warning);
        assert_eq!(view.cards.len(), 1);
        assert_eq!(view.cards[0].platform, "github");
        assert_eq!(view.cards[0].icon, "💻");
        assert_eq!(view.cards[0].status, PlatformStatusLabel::Taken);
        assert_eq!(view.cards[0].status.label(), "✕ Taken");
        assert_eq!(
            view.cards[0].link.as_deref(),
            Some("https://github.com/testuser123")
        );
        assert_eq!(view.suggestions.len(), 2);
        assert_eq!(view.suggestions[0].caption(), "@testuser123_");
        assert_eq!(view.suggestions[1].copy_text(), "the_testuser123");
    }

    #[test]
    fn test_counts_skip_errored_entries() {
        let response = UsernameResponse {
            username: "alice".to_string(),
            all_available: false,
            results: vec![
                status("github", true, None),
                status("twitter", false, None),
                status("reddit", true, None),
                status("tiktok", false, Some("Request timed out")),
                status("snapchat", true, Some("boom")),
            ],
            suggestions: vec![],
        };

        let view = UsernameView::from(&response);
        assert_eq!(view.available, 2);
        assert_eq!(view.total, 3);
        assert_eq!(view.cards[3].status, PlatformStatusLabel::Error);
        assert_eq!(view.cards[3].link, None);
        assert_eq!(view.cards[3].status.tone(), Tone::Neutral);
        assert!(view.suggestions.is_empty());
    }

    #[test]
    fn test_all_available_hides_suggestions() {
        let response = UsernameResponse {
            username: "zz9plural".to_string(),
            all_available: true,
            results: vec![status("github", true, None)],
            suggestions: vec!["zz9plural1".to_string()],
        };
        let view = UsernameView::from(&response);
        assert!(view.suggestions.is_empty());
        assert_eq!(view.tone(), Tone::Success);
        assert_eq!(view.summary_label(), "1 / 1 Available");
        assert_eq!(view.title(), "Results for @zz9plural");
    }

    #[test]
    fn test_platform_icons() {
        assert_eq!(platform_icon("twitter"), "🐦");
        assert_eq!(platform_icon("snapchat"), "👻");
        assert_eq!(platform_icon("mastodon"), "🌐");
        assert_eq!(platform_icon("GitHub"), "🌐");
    }

    #[test]
    fn test_registered_domain_scenario() {
        let response = DomainResponse {
            domain_name: "example.com".to_string(),
            domain_exists: true,
            registrar: Some("Example Registrar".to_string()),
            creation_date: Some("1995-08-14".to_string()),
            expiration_date: Some("2026-08-13".to_string()),
            name_servers: vec!["NS1.EXAMPLE.COM".to_string(), "ns2.example.com".to_string()],
            error: None,
        };

        let view = DomainView::from(&response);
        assert_eq!(view.badge(), "Registered");
        assert_eq!(view.icon(), "🔒");
        let DomainView::Registered(details) = view else {
            panic!("expected registered view");
        };
        assert_eq!(details.registrar, "Example Registrar");
        assert_eq!(details.created, "August 14, 1995");
        assert_eq!(details.expires, "August 13, 2026");
        assert_eq!(details.name_server_summary, "2 servers");
        assert_eq!(details.name_servers, vec!["ns1.example.com", "ns2.example.com"]);
    }

    #[test]
    fn test_registered_domain_missing_fields() {
        let response = DomainResponse {
            domain_name: "example.org".to_string(),
            domain_exists: true,
            ..Default::default()
        };
        let DomainView::Registered(details) = DomainView::from(&response) else {
            panic!("expected registered view");
        };
        assert_eq!(details.registrar, "Unknown");
        assert_eq!(details.created, "N/A");
        assert_eq!(details.expires, "N/A");
        assert_eq!(details.name_server_summary, "N/A");
        assert!(details.name_servers.is_empty());
    }

    #[test]
    fn test_available_domain() {
        let response = DomainResponse {
            domain_name: "free-name.dev".to_string(),
            domain_exists: false,
            ..Default::default()
        };
        let view = DomainView::from(&response);
        assert_eq!(
            view,
            DomainView::Available {
                domain_name: "free-name.dev".to_string()
            }
        );
        assert_eq!(view.badge(), "Available!");
    }

    #[test]
    fn test_backend_error_wins_over_flags() {
        let response = DomainResponse {
            domain_name: "broken.com".to_string(),
            domain_exists: true,
            error: Some("Request timed out".to_string()),
            ..Default::default()
        };
        let view = DomainView::from(&response);
        assert_eq!(view.domain_name(), "broken.com");
        assert_eq!(
            view,
            DomainView::Error {
                domain_name: "broken.com".to_string(),
                message: "Request timed out".to_string()
            }
        );
    }

    #[test]
    fn test_format_long_date_variants() {
        assert_eq!(format_long_date(Some("1995-08-14")), "August 14, 1995");
        assert_eq!(
            format_long_date(Some("1995-08-14T04:00:00Z")),
            "August 14, 1995"
        );
        assert_eq!(
            format_long_date(Some("1995-08-14T04:00:00+0000")),
            "August 14, 1995"
        );
        assert_eq!(
            format_long_date(Some("2026-08-13 04:00:00")),
            "August 13, 2026"
        );
        assert_eq!(format_long_date(Some("14-aug-1995")), "August 14, 1995");
        assert_eq!(format_long_date(Some("2024-01-05")), "January 5, 2024");
    }

    #[test]
    fn test_format_long_date_fallbacks() {
        assert_eq!(format_long_date(None), "N/A");
        assert_eq!(format_long_date(Some("")), "N/A");
        assert_eq!(format_long_date(Some("not a date")), "N/A");
        assert_eq!(format_long_date(Some("1995-13-40")), "N/A");
    }
}
