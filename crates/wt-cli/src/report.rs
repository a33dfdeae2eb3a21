//! Plain-text weekly report

use std::io::{self, Write};
use wt_calendar::local_short_date;
use wt_workspace::PageRecord;

/// Printed instead of the list when the week has no new pages
pub const NO_PAGES_MESSAGE: &str = "No new pages found for this week.";

/// Week label and date range
pub fn write_header<W: Write>(out: &mut W, label: &str, date_range: &str) -> io::Result<()> {
    writeln!(out)?;
    writeln!(out, "📅 {label}")?;
    writeln!(out, "{date_range}")?;
    writeln!(out)
}

/// Numbered page list with parent, link and URL lines
pub fn write_pages<W: Write>(out: &mut W, pages: &[PageRecord]) -> io::Result<()> {
    if pages.is_empty() {
        return writeln!(out, "{NO_PAGES_MESSAGE}");
    }

    writeln!(out, "Found {} new page(s):", pages.len())?;
    writeln!(out)?;
    for (index, page) in pages.iter().enumerate() {
        writeln!(out, "{}. {}", index + 1, page.title)?;
        writeln!(out, "   Created: {}", local_short_date(&page.created_time))?;
        if let Some(parent) = &page.parent_info {
            writeln!(out, "   {} Parent: {}", parent.kind.icon(), parent.title)?;
        }
        if let Some(link) = &page.link_property {
            writeln!(out, "   Link: {link}")?;
        }
        writeln!(out, "   Page URL: {}", page.url)?;
        writeln!(out)?;
    }
    Ok(())
}
