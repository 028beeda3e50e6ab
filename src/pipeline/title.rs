//! Event title and description formatting.

use crate::models::TimeOffRequest;

/// The human-readable text of one event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EventText {
    /// The event summary.
    pub title: String,
    /// The event description; empty unless verbose.
    pub description: String,
}

/// Builds the title and description for a request.
///
/// Plain output shows only the employee. Verbose output appends the reason
/// to the title and lists reason and policy in the description.
///
/// # Example
///
/// ```
/// use timeoff_calendar::models::{RequestStatus, TimeOffRequest};
/// use timeoff_calendar::pipeline::format_title;
/// use chrono::NaiveDate;
/// use rust_decimal::Decimal;
///
/// let request = TimeOffRequest {
///     row: 2,
///     employee: "Alice".to_string(),
///     start_date: NaiveDate::from_ymd_opt(2026, 1, 5).unwrap(),
///     duration_days: Decimal::new(3, 0),
///     status: RequestStatus::Approved,
///     reason: "VAC".to_string(),
///     policy: "Standard".to_string(),
///     start_time: None,
/// };
///
/// assert_eq!(format_title(&request, false).title, "Alice");
/// assert_eq!(format_title(&request, true).title, "Alice - VAC");
/// ```
pub fn format_title(request: &TimeOffRequest, verbose: bool) -> EventText {
    if !verbose {
        return EventText {
            title: request.employee.clone(),
            description: String::new(),
        };
    }

    let mut description = format!("Reason: {}", request.reason);
    if !request.policy.is_empty() {
        description.push_str(&format!("\nPolicy: {}", request.policy));
    }

    EventText {
        title: format!("{} - {}", request.employee, request.reason),
        description,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::RequestStatus;
    use chrono::NaiveDate;
    use rust_decimal::Decimal;

    fn create_test_request(policy: &str) -> TimeOffRequest {
        TimeOffRequest {
            row: 2,
            employee: "Alice".to_string(),
            start_date: NaiveDate::from_ymd_opt(2026, 1, 5).unwrap(),
            duration_days: Decimal::new(3, 0),
            status: RequestStatus::Approved,
            reason: "VAC".to_string(),
            policy: policy.to_string(),
            start_time: None,
        }
    }

    #[test]
    fn test_plain_title_has_no_description() {
        let text = format_title(&create_test_request("Standard"), false);
        assert_eq!(text.title, "Alice");
        assert!(text.description.is_empty());
    }

    #[test]
    fn test_verbose_title_and_description() {
        let text = format_title(&create_test_request("Standard"), true);
        assert_eq!(text.title, "Alice - VAC");
        assert_eq!(text.description, "Reason: VAC\nPolicy: Standard");
    }

    #[test]
    fn test_verbose_without_policy_omits_policy_line() {
        let text = format_title(&create_test_request(""), true);
        assert_eq!(text.description, "Reason: VAC");
    }
}
