//! Weekly Tracker Calendar
//!
//! Week arithmetic shared by the report, export and navigation paths:
//! - [`WeekWindow`]: Monday 00:00:00.000 to Sunday 23:59:59.999, N weeks back
//! - [`week_label`]: "This Week", "Last Week", "{n} Weeks Ago"
//! - [`local_short_date`]: page creation dates as `10/13/2026`
//! - [`WeekWindow::date_range`]: "Oct 12, 2026 - Oct 18, 2026"
//!
//! # Example
//!
//! ```rust,ignore
//! use wt_calendar::{week_label, WeekWindow};
//!
//! let window = WeekWindow::current(1);
//! println!("{}: {}", week_label(1), window.date_range());
//! ```

#![warn(missing_docs)]
#![warn(unreachable_pub)]

mod label;
mod window;

pub use label::{local_short_date, short_date, week_label};
pub use window::WeekWindow;

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
