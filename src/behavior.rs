use std::collections::HashSet;

pub const THEME_STORAGE_KEY: &str = "theme";
pub const DARK_THEME_CLASS: &str = "dark-theme";
pub const ACTIVE_CLASS: &str = "active";
pub const SCROLLED_CLASS: &str = "scrolled";
pub const REVEAL_CLASS: &str = "fade-in-up";

pub const NAVBAR_SCROLL_THRESHOLD: f64 = 100.0;
pub const SECTION_TRIGGER_MARGIN: f64 = 100.0;
pub const ANCHOR_SCROLL_MARGIN: f64 = 70.0;
pub const REVEAL_THRESHOLD: f64 = 0.1;
pub const REVEAL_ROOT_MARGIN: &str = "0px 0px -50px 0px";
pub const FOOTER_YEAR_PLACEHOLDER: &str = "2024";

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Theme {
    Light,
    Dark,
}

impl Theme {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Light => "light",
            Self::Dark => "dark",
        }
    }

    pub fn from_str(value: &str) -> Option<Self> {
        match value {
            "light" => Some(Self::Light),
            "dark" => Some(Self::Dark),
            _ => None,
        }
    }

    pub fn toggled(self) -> Self {
        match self {
            Self::Light => Self::Dark,
            Self::Dark => Self::Light,
        }
    }

    pub fn is_dark(self) -> bool {
        matches!(self, Self::Dark)
    }

    pub fn icon(self) -> &'static str {
        match self {
            Self::Light => "🌙",
            Self::Dark => "☀️",
        }
    }
}

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum MenuState {
    Open,
    Closed,
}

impl MenuState {
    pub fn from_marker(marker_present: bool) -> Self {
        if marker_present {
            Self::Open
        } else {
            Self::Closed
        }
    }

    pub fn toggled(self) -> Self {
        match self {
            Self::Open => Self::Closed,
            Self::Closed => Self::Open,
        }
    }

    pub fn is_open(self) -> bool {
        matches!(self, Self::Open)
    }
}

pub fn navbar_scrolled(scroll_y: f64) -> bool {
    scroll_y > NAVBAR_SCROLL_THRESHOLD
}

#[derive(Clone, PartialEq, Debug)]
pub struct SectionSpan {
    pub id: String,
    pub top: f64,
    pub height: f64,
}

impl SectionSpan {
    pub fn from_layout(id: String, offset_top: f64, offset_height: f64) -> Self {
        Self {
            id,
            top: offset_top - SECTION_TRIGGER_MARGIN,
            height: offset_height,
        }
    }

    pub fn contains(&self, scroll_y: f64) -> bool {
        scroll_y >= self.top && scroll_y <= self.top + self.height
    }
}

// Last span in document order wins when ranges overlap; an iteration-order
// artifact of the page this was built for, kept as observed behavior.
pub fn active_section(spans: &[SectionSpan], scroll_y: f64) -> Option<&str> {
    spans
        .iter()
        .rev()
        .find(|span| span.contains(scroll_y))
        .map(|span| span.id.as_str())
}

pub fn anchor_target_id(href: &str) -> Option<&str> {
    href.strip_prefix('#').filter(|id| !id.is_empty())
}

pub fn scroll_target_top(offset_top: f64) -> f64 {
    offset_top - ANCHOR_SCROLL_MARGIN
}

#[derive(Default)]
pub struct RevealTracker {
    revealed: HashSet<usize>,
}

impl RevealTracker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn mark(&mut self, key: usize) -> bool {
        self.revealed.insert(key)
    }
}

pub fn updated_footer_text(text: &str, year: u32) -> String {
    text.replacen(FOOTER_YEAR_PLACEHOLDER, &year.to_string(), 1)
}

pub fn email_from_mailto(href: &str) -> Option<&str> {
    href.strip_prefix("mailto:").filter(|email| !email.is_empty())
}

pub struct TrackedEvent {
    category: String,
    action: String,
    label: String,
}

impl TrackedEvent {
    pub fn new(category: &str, action: &str, label: &str) -> Self {
        Self {
            category: category.to_string(),
            action: action.to_string(),
            label: label.to_string(),
        }
    }

    pub fn log_line(&self) -> String {
        format!(
            "Event tracked: {} - {} - {}",
            self.category, self.action, self.label
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_or_unknown_stored_theme_defaults_to_light() {
        assert_eq!(Theme::from_str("dark"), Some(Theme::Dark));
        assert_eq!(Theme::from_str("light"), Some(Theme::Light));
        assert_eq!(Theme::from_str("solarized"), None);

        let initial = Theme::from_str("solarized").unwrap_or(Theme::Light);
        assert_eq!(initial, Theme::Light);
        assert_eq!(initial.icon(), "🌙");
    }

    #[test]
    fn toggling_twice_returns_to_the_original_theme() {
        let toggled = Theme::Light.toggled();
        assert_eq!(toggled, Theme::Dark);
        assert_eq!(toggled.icon(), "☀️");
        assert_eq!(toggled.as_str(), "dark");

        let toggled_back = toggled.toggled();
        assert_eq!(toggled_back, Theme::Light);
        assert_eq!(toggled_back.as_str(), "light");
    }

    #[test]
    fn menu_state_follows_the_marker_class() {
        assert_eq!(MenuState::from_marker(true), MenuState::Open);
        assert_eq!(MenuState::from_marker(false), MenuState::Closed);
        assert_eq!(MenuState::Closed.toggled(), MenuState::Open);
        assert_eq!(MenuState::Open.toggled(), MenuState::Closed);
        assert!(!MenuState::Closed.is_open());
    }

    #[test]
    fn navbar_marker_appears_only_past_the_threshold() {
        assert!(!navbar_scrolled(0.0));
        assert!(!navbar_scrolled(100.0));
        assert!(navbar_scrolled(100.5));
        assert!(navbar_scrolled(2000.0));
    }

    #[test]
    fn section_span_is_inclusive_at_both_ends() {
        let span = SectionSpan::from_layout("about".to_string(), 500.0, 300.0);
        assert_eq!(span.top, 400.0);

        assert!(!span.contains(399.0));
        assert!(span.contains(400.0));
        assert!(span.contains(700.0));
        assert!(!span.contains(701.0));
    }

    #[test]
    fn active_section_picks_the_only_containing_span() {
        let spans = vec![
            SectionSpan::from_layout("home".to_string(), 100.0, 400.0),
            SectionSpan::from_layout("projects".to_string(), 600.0, 400.0),
        ];

        assert_eq!(active_section(&spans, 0.0), Some("home"));
        assert_eq!(active_section(&spans, 550.0), Some("projects"));
        assert_eq!(active_section(&spans, 1000.0), None);
    }

    #[test]
    fn last_span_wins_when_ranges_overlap() {
        let spans = vec![
            SectionSpan::from_layout("home".to_string(), 100.0, 500.0),
            SectionSpan::from_layout("about".to_string(), 400.0, 500.0),
        ];

        assert_eq!(active_section(&spans, 350.0), Some("about"));
        assert_eq!(active_section(&spans, 100.0), Some("home"));
    }

    #[test]
    fn anchor_target_requires_a_non_empty_fragment() {
        assert_eq!(anchor_target_id("#contact"), Some("contact"));
        assert_eq!(anchor_target_id("#"), None);
        assert_eq!(anchor_target_id("/resume.pdf"), None);
    }

    #[test]
    fn scroll_target_sits_below_the_fixed_navbar() {
        assert_eq!(scroll_target_top(570.0), 500.0);
    }

    #[test]
    fn reveal_tracker_marks_each_element_once() {
        let mut tracker = RevealTracker::new();

        assert!(tracker.mark(3));
        assert!(!tracker.mark(3));
        assert!(tracker.mark(4));
        assert!(!tracker.mark(3));
    }

    #[test]
    fn footer_text_replaces_only_the_first_placeholder_year() {
        assert_eq!(
            updated_footer_text("© 2024 Jane Doe", 2026),
            "© 2026 Jane Doe"
        );
        assert_eq!(
            updated_footer_text("2024, est. 2024", 2026),
            "2026, est. 2024"
        );
        assert_eq!(updated_footer_text("no year here", 2026), "no year here");
    }

    #[test]
    fn mailto_prefix_is_stripped_from_email_links() {
        assert_eq!(
            email_from_mailto("mailto:jane@example.com"),
            Some("jane@example.com")
        );
        assert_eq!(email_from_mailto("mailto:"), None);
        assert_eq!(email_from_mailto("https://example.com"), None);
    }

    #[test]
    fn tracked_event_formats_one_structured_line() {
        let event = TrackedEvent::new("Project", "Click", "Weather Dashboard");
        assert_eq!(
            event.log_line(),
            "Event tracked: Project - Click - Weather Dashboard"
        );
    }
}
