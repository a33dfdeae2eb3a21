//! Pure rendering of week payloads into view descriptions
//!
//! Nothing here performs I/O; the `Display` impls give a terminal rendering.

use crate::state::{NavigationState, PaginationControls};
use std::fmt;
use wt_calendar::{local_short_date, week_label};
use wt_workspace::{KnowledgeBaseResponse, PageRecord};

/// Shown in place of the list for a week without pages
pub const EMPTY_WEEK_MESSAGE: &str = "No pages created this week";

/// Parent container line of an item
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParentLine {
    /// Database or page icon
    pub icon: &'static str,
    /// Container title
    pub title: String,
}

/// One page in a week's list
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageItem {
    /// Page title
    pub title: String,
    /// Creation date in local time, e.g. `10/13/2026`
    pub created: String,
    /// Parent container, when resolved
    pub parent: Option<ParentLine>,
    /// External link property
    pub link: Option<String>,
    /// Page URL
    pub url: String,
}

/// One week section
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WeekView {
    /// Weeks before the current one
    pub weeks_ago: u32,
    /// "This Week", "Last Week", ...
    pub label: String,
    /// Range string from the payload
    pub date_range: String,
    /// "1 page" / "N pages"
    pub page_count: String,
    /// Page list, empty when the week has no pages
    pub items: Vec<PageItem>,
    /// Sections other than the current week start collapsed
    pub collapsed: bool,
}

impl WeekView {
    /// Check if the week has no pages
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

/// Paged view: one week plus its pagination controls
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageView {
    /// Displayed week
    pub week: WeekView,
    /// Button state
    pub controls: PaginationControls,
}

/// Render one week's payload
#[must_use]
pub fn render_week(weeks_ago: u32, payload: &KnowledgeBaseResponse) -> WeekView {
    WeekView {
        weeks_ago,
        label: week_label(weeks_ago),
        date_range: payload.date_range.clone(),
        page_count: page_count_label(payload.total_count),
        items: payload.pages.iter().map(render_item).collect(),
        collapsed: weeks_ago != 0,
    }
}

/// Render the paged view for `state`
///
/// The week is always expanded here; collapsing only applies to the
/// all-weeks listing.
#[must_use]
pub fn render(state: &NavigationState, payload: &KnowledgeBaseResponse) -> PageView {
    let mut week = render_week(state.weeks_ago(), payload);
    week.collapsed = false;
    PageView {
        week,
        controls: state.controls(),
    }
}

fn render_item(page: &PageRecord) -> PageItem {
    PageItem {
        title: page.title.clone(),
        created: local_short_date(&page.created_time),
        parent: page.parent_info.as_ref().map(|parent| ParentLine {
            icon: parent.kind.icon(),
            title: parent.title.clone(),
        }),
        link: page.link_property.clone(),
        url: page.url.clone(),
    }
}

fn page_count_label(count: usize) -> String {
    if count == 1 {
        "1 page".to_string()
    } else {
        format!("{count} pages")
    }
}

impl fmt::Display for PageItem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "  • {}", self.title)?;
        writeln!(f, "    Created: {}", self.created)?;
        if let Some(parent) = &self.parent {
            writeln!(f, "    {} Parent: {}", parent.icon, parent.title)?;
        }
        if let Some(link) = &self.link {
            writeln!(f, "    Link: {link}")?;
        }
        writeln!(f, "    Page URL: {}", self.url)
    }
}

impl fmt::Display for WeekView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let marker = if self.collapsed { '▸' } else { '▾' };
        writeln!(f, "{marker} {} ({})", self.label, self.page_count)?;
        writeln!(f, "  {}", self.date_range)?;
        if self.collapsed {
            return Ok(());
        }
        if self.items.is_empty() {
            return writeln!(f, "  {EMPTY_WEEK_MESSAGE}");
        }
        for item in &self.items {
            write!(f, "{item}")?;
        }
        Ok(())
    }
}

impl fmt::Display for PageView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.week)?;
        let previous = if self.controls.previous_enabled {
            "[p] ← Previous week"
        } else {
            "    ← Previous week"
        };
        let next = if self.controls.next_enabled {
            "[n] Next week →"
        } else {
            "    Next week →"
        };
        writeln!(f)?;
        writeln!(f, "{previous}   {next}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use wt_workspace::ParentInfo;

    fn record(title: &str, parent: Option<ParentInfo>, link: Option<&str>) -> PageRecord {
        PageRecord {
            id: title.to_lowercase(),
            title: title.to_string(),
            url: format!("https://notion.so/{}", title.to_lowercase()),
            created_time: Utc.with_ymd_and_hms(2026, 10, 13, 12, 0, 0).unwrap(),
            link_property: link.map(str::to_string),
            parent_info: parent,
        }
    }

    fn payload(pages: Vec<PageRecord>) -> KnowledgeBaseResponse {
        KnowledgeBaseResponse {
            date_range: "Oct 12, 2026 - Oct 18, 2026".into(),
            total_count: pages.len(),
            pages,
        }
    }

    #[test]
    fn week_view_carries_label_count_and_items() {
        let view = render_week(
            0,
            &payload(vec![
                record("Roadmap", Some(ParentInfo::database("db", "Projects")), None),
                record("Reading", None, Some("https://example.com")),
            ]),
        );

        assert_eq!(view.label, "This Week");
        assert_eq!(view.page_count, "2 pages");
        assert!(!view.collapsed);
        assert_eq!(
            view.items[0].parent,
            Some(ParentLine { icon: "📊", title: "Projects".into() })
        );
        assert_eq!(view.items[1].link.as_deref(), Some("https://example.com"));
    }

    #[test]
    fn count_label_is_singular_for_one() {
        let view = render_week(2, &payload(vec![record("Solo", None, None)]));
        assert_eq!(view.page_count, "1 page");
        assert_eq!(view.label, "2 Weeks Ago");
        assert!(view.collapsed);
    }

    #[test]
    fn empty_week_prints_placeholder() {
        let view = render(&NavigationState::current(), &payload(Vec::new()));
        let text = view.to_string();

        assert!(view.week.is_empty());
        assert!(text.contains(EMPTY_WEEK_MESSAGE));
        assert!(text.contains("0 pages"));
    }

    #[test]
    fn paged_view_reflects_controls() {
        let current = render(&NavigationState::current(), &payload(Vec::new())).to_string();
        assert!(!current.contains("[n]"));
        assert!(current.contains("[p]"));

        let older = render(&NavigationState::at(1), &payload(Vec::new()));
        assert!(!older.week.collapsed);
        assert!(older.to_string().contains("[n] Next week"));
    }

    #[test]
    fn item_display_includes_parent_and_link() {
        let view = render_week(
            0,
            &payload(vec![record(
                "Roadmap",
                Some(ParentInfo::page("pg", "Team wiki")),
                Some("https://x.test"),
            )]),
        );
        let text = view.to_string();

        assert!(text.contains("• Roadmap"));
        assert!(text.contains("📄 Parent: Team wiki"));
        assert!(text.contains("Link: https://x.test"));
        assert!(text.contains("Page URL: https://notion.so/roadmap"));
    }
}
