//! Status and date-range filtering.
//!
//! Only approved requests become events. When a date range is given, a
//! request is kept if its start date lies inside the range, regardless of
//! where its span ends.

use crate::models::{DateRange, TimeOffRequest};

/// The requests that survived filtering, with counts of what was dropped.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterOutcome {
    /// Requests to turn into events, in input order.
    pub kept: Vec<TimeOffRequest>,
    /// Requests dropped because they were not approved.
    pub excluded_by_status: usize,
    /// Approved requests dropped because they started outside the range.
    pub excluded_by_range: usize,
}

/// Applies the approved-only filter and the optional inclusive date range.
///
/// # Example
///
/// ```
/// use timeoff_calendar::models::{DateRange, RequestStatus, TimeOffRequest};
/// use timeoff_calendar::pipeline::filter_requests;
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
///     policy: String::new(),
///     start_time: None,
/// };
///
/// let range = DateRange::parse("01-06-2026", "01-10-2026").unwrap();
/// let outcome = filter_requests(vec![request], Some(&range));
/// assert!(outcome.kept.is_empty());
/// assert_eq!(outcome.excluded_by_range, 1);
/// ```
pub fn filter_requests(
    requests: Vec<TimeOffRequest>,
    range: Option<&DateRange>,
) -> FilterOutcome {
    let mut outcome = FilterOutcome::default();

    for request in requests {
        if !request.is_approved() {
            tracing::debug!(
                row = request.row,
                employee = %request.employee,
                status = %request.status,
                "Excluding request that is not approved"
            );
            outcome.excluded_by_status += 1;
            continue;
        }

        if let Some(range) = range
            && !range.contains(request.start_date)
        {
            tracing::debug!(
                row = request.row,
                employee = %request.employee,
                start_date = %request.start_date,
                "Excluding request outside date range"
            );
            outcome.excluded_by_range += 1;
            continue;
        }

        outcome.kept.push(request);
    }

    outcome
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::RequestStatus;
    use chrono::NaiveDate;
    use rust_decimal::Decimal;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn create_test_request(row: usize, start: NaiveDate, status: RequestStatus) -> TimeOffRequest {
        TimeOffRequest {
            row,
            employee: format!("Employee {}", row),
            start_date: start,
            duration_days: Decimal::new(3, 0),
            status,
            reason: "VAC".to_string(),
            policy: "Standard".to_string(),
            start_time: None,
        }
    }

    #[test]
    fn test_only_approved_requests_kept() {
        let requests = vec![
            create_test_request(2, date(2026, 1, 5), RequestStatus::Approved),
            create_test_request(3, date(2026, 1, 6), RequestStatus::Other("Denied".to_string())),
            create_test_request(4, date(2026, 1, 7), RequestStatus::Other("Pending".to_string())),
        ];
        let outcome = filter_requests(requests, None);
        assert_eq!(outcome.kept.len(), 1);
        assert_eq!(outcome.kept[0].row, 2);
        assert_eq!(outcome.excluded_by_status, 2);
        assert_eq!(outcome.excluded_by_range, 0);
    }

    #[test]
    fn test_range_bounds_are_inclusive() {
        let range = DateRange::new(date(2026, 1, 6), date(2026, 1, 10)).unwrap();
        let requests = vec![
            create_test_request(2, date(2026, 1, 5), RequestStatus::Approved),
            create_test_request(3, date(2026, 1, 6), RequestStatus::Approved),
            create_test_request(4, date(2026, 1, 10), RequestStatus::Approved),
            create_test_request(5, date(2026, 1, 11), RequestStatus::Approved),
        ];
        let outcome = filter_requests(requests, Some(&range));
        let rows: Vec<usize> = outcome.kept.iter().map(|r| r.row).collect();
        assert_eq!(rows, vec![3, 4]);
        assert_eq!(outcome.excluded_by_range, 2);
    }

    /// A request overlapping the start of the range is dropped because only
    /// its start date is compared.
    #[test]
    fn test_overlapping_request_starting_before_range_is_dropped() {
        let range = DateRange::new(date(2026, 1, 6), date(2026, 1, 10)).unwrap();
        let requests = vec![create_test_request(2, date(2026, 1, 5), RequestStatus::Approved)];
        let outcome = filter_requests(requests, Some(&range));
        assert!(outcome.kept.is_empty());
    }

    #[test]
    fn test_status_checked_before_range() {
        let range = DateRange::new(date(2026, 1, 6), date(2026, 1, 10)).unwrap();
        let requests = vec![create_test_request(
            2,
            date(2026, 2, 1),
            RequestStatus::Other("Denied".to_string()),
        )];
        let outcome = filter_requests(requests, Some(&range));
        assert_eq!(outcome.excluded_by_status, 1);
        assert_eq!(outcome.excluded_by_range, 0);
    }

    #[test]
    fn test_preserves_input_order() {
        let requests = vec![
            create_test_request(5, date(2026, 3, 1), RequestStatus::Approved),
            create_test_request(2, date(2026, 1, 1), RequestStatus::Approved),
        ];
        let outcome = filter_requests(requests, None);
        let rows: Vec<usize> = outcome.kept.iter().map(|r| r.row).collect();
        assert_eq!(rows, vec![5, 2]);
    }
}
