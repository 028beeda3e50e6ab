//! Calendar name generation.

use crate::models::{CalendarEvent, observed_range};

/// The date format used in generated calendar names.
const NAME_DATE_FORMAT: &str = "%m/%d/%Y";

/// Derives the calendar label for a set of events.
///
/// An override is returned verbatim. Otherwise the base name is suffixed with
/// the earliest and latest event start dates; with no events the base name is
/// used alone.
///
/// # Example
///
/// ```
/// use timeoff_calendar::pipeline::generate_calendar_name;
///
/// assert_eq!(generate_calendar_name(&[], None, "Employee Time Off"), "Employee Time Off");
/// assert_eq!(generate_calendar_name(&[], Some("Team Leave"), "Employee Time Off"), "Team Leave");
/// ```
pub fn generate_calendar_name(
    events: &[CalendarEvent],
    name_override: Option<&str>,
    base: &str,
) -> String {
    if let Some(name) = name_override {
        return name.to_string();
    }

    match observed_range(events) {
        Some((first, last)) => format!(
            "{} ({} - {})",
            base,
            first.format(NAME_DATE_FORMAT),
            last.format(NAME_DATE_FORMAT)
        ),
        None => base.to_string(),
    }
}
