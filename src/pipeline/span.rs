//! Event span calculation functionality.
//!
//! This module turns a start date and a duration in days into a concrete
//! [`EventSpan`]. Whole-day durations become all-day spans; fractional
//! durations become timed spans anchored at a start-of-day time.

use chrono::{Days, Duration, NaiveDate, NaiveTime};
use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;

use crate::config::SpanSettings;
use crate::error::{ImportError, ImportResult};
use crate::models::{EventSpan, TimeOffRequest};

/// Computes a span using the default settings (midnight anchor, 24 hour days).
///
/// # Examples
///
/// ```
/// use timeoff_calendar::pipeline::compute_span;
/// use chrono::NaiveDate;
/// use rust_decimal::Decimal;
///
/// let start = NaiveDate::from_ymd_opt(2026, 1, 5).unwrap();
///
/// let span = compute_span(start, Decimal::new(3, 0)).unwrap();
/// assert!(span.all_day);
/// assert_eq!(span.end_date(), NaiveDate::from_ymd_opt(2026, 1, 8).unwrap());
///
/// let span = compute_span(start, Decimal::new(5, 1)).unwrap();
/// assert!(!span.all_day);
/// assert_eq!(span.duration(), chrono::Duration::hours(12));
/// assert_eq!(span.end.date(), start);
/// ```
pub fn compute_span(start_date: NaiveDate, duration_days: Decimal) -> ImportResult<EventSpan> {
    SpanCalculator::default().compute(start_date, duration_days, None)
}

/// Converts request durations into spans under configured settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SpanCalculator {
    day_start: NaiveTime,
    hours_per_day: Decimal,
}

impl Default for SpanCalculator {
    fn default() -> Self {
        Self::from_settings(&SpanSettings::default())
    }
}

impl SpanCalculator {
    /// Creates a calculator from the span settings.
    pub fn from_settings(settings: &SpanSettings) -> Self {
        Self {
            day_start: settings.day_start,
            hours_per_day: settings.partial_day.hours_per_day(),
        }
    }

    /// Computes the span for a validated request.
    ///
    /// The request's own start time, when present, anchors partial-day spans
    /// instead of the configured start of day.
    pub fn span(&self, request: &TimeOffRequest) -> ImportResult<EventSpan> {
        self.compute(request.start_date, request.duration_days, request.start_time)
    }

    /// Computes a span from its parts.
    ///
    /// # Errors
    ///
    /// Returns `InvalidDuration` if the duration is not positive, rounds to
    /// less than one minute, or runs past the supported date range. A timed
    /// span must also end by the midnight closing the last day its duration
    /// covers, so a partial day never spills into the following date.
    pub fn compute(
        &self,
        start_date: NaiveDate,
        duration_days: Decimal,
        start_time: Option<NaiveTime>,
    ) -> ImportResult<EventSpan> {
        let invalid = |message: &str| ImportError::InvalidDuration {
            duration: duration_days,
            message: message.to_string(),
        };

        if duration_days <= Decimal::ZERO {
            return Err(invalid("must be greater than zero"));
        }

        if duration_days.fract().is_zero() {
            let days = duration_days
                .to_u32()
                .ok_or_else(|| invalid("too many days"))?;
            start_date
                .checked_add_days(Days::new(u64::from(days)))
                .ok_or_else(|| invalid("ends after the last supported date"))?;
            return Ok(EventSpan::all_day(start_date, days));
        }

        let minutes = duration_days
            .checked_mul(self.hours_per_day)
            .and_then(|hours| hours.checked_mul(Decimal::new(60, 0)))
            .and_then(|minutes| minutes.round().to_i64())
            .ok_or_else(|| invalid("too long"))?;
        if minutes <= 0 {
            return Err(invalid("shorter than one minute"));
        }

        let start = start_date.and_time(start_time.unwrap_or(self.day_start));
        let end = Duration::try_minutes(minutes)
            .and_then(|length| start.checked_add_signed(length))
            .ok_or_else(|| invalid("ends after the last supported date"))?;

        let covered_days = duration_days
            .ceil()
            .to_u64()
            .ok_or_else(|| invalid("too many days"))?;
        let last_midnight = start_date
            .checked_add_days(Days::new(covered_days))
            .ok_or_else(|| invalid("ends after the last supported date"))?
            .and_time(NaiveTime::MIN);
        if end > last_midnight {
            return Err(invalid(&format!(
                "starting at {} it runs past midnight into {}",
                start.time(),
                end.date()
            )));
        }

        Ok(EventSpan::timed(start, end))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::PartialDayMapping;
    use proptest::prelude::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn business_day_calculator() -> SpanCalculator {
        SpanCalculator::from_settings(&SpanSettings {
            day_start: NaiveTime::from_hms_opt(8, 0, 0).unwrap(),
            partial_day: PartialDayMapping::BusinessHours {
                hours: Decimal::new(8, 0),
            },
        })
    }

    #[test]
    fn test_single_day_is_all_day() {
        let span = compute_span(date(2026, 1, 6), Decimal::ONE).unwrap();
        assert!(span.all_day);
        assert_eq!(span.start_date(), date(2026, 1, 6));
        assert_eq!(span.end_date(), date(2026, 1, 7));
    }

    #[test]
    fn test_three_days_end_exclusive() {
        let span = compute_span(date(2026, 1, 5), Decimal::new(3, 0)).unwrap();
        assert_eq!(span.end_date(), date(2026, 1, 8));
        assert_eq!(span.days(), 3);
    }

    #[test]
    fn test_whole_number_with_scale_is_all_day() {
        let span = compute_span(date(2026, 1, 5), Decimal::new(200, 2)).unwrap();
        assert!(span.all_day);
        assert_eq!(span.days(), 2);
    }

    #[test]
    fn test_half_day_defaults_to_twelve_hours_from_midnight() {
        let span = compute_span(date(2026, 1, 5), Decimal::new(5, 1)).unwrap();
        assert!(!span.all_day);
        assert_eq!(span.start, date(2026, 1, 5).and_hms_opt(0, 0, 0).unwrap());
        assert_eq!(span.end, date(2026, 1, 5).and_hms_opt(12, 0, 0).unwrap());
    }

    #[test]
    fn test_three_quarter_day_stays_on_start_date() {
        let start = date(2026, 1, 5);
        let span = compute_span(start, Decimal::new(75, 2)).unwrap();
        assert_eq!(span.end, start.and_hms_opt(18, 0, 0).unwrap());
        assert_eq!(span.end.date(), start);
    }

    #[test]
    fn test_almost_whole_day_ends_by_midnight() {
        let start = date(2026, 1, 5);
        let span = compute_span(start, Decimal::new(99, 2)).unwrap();
        assert_eq!(span.end.date(), start);
    }

    #[test]
    fn test_late_anchor_crossing_midnight_is_rejected() {
        let calculator = SpanCalculator::from_settings(&SpanSettings {
            day_start: NaiveTime::from_hms_opt(9, 0, 0).unwrap(),
            partial_day: PartialDayMapping::FractionOfDay,
        });
        let result = calculator.compute(date(2026, 1, 5), Decimal::new(75, 2), None);
        match result {
            Err(ImportError::InvalidDuration { message, .. }) => {
                assert!(message.contains("midnight"));
            }
            other => panic!("Expected InvalidDuration, got {:?}", other),
        }
    }

    #[test]
    fn test_row_start_time_crossing_midnight_is_rejected() {
        let result = SpanCalculator::default().compute(
            date(2026, 1, 5),
            Decimal::new(5, 1),
            NaiveTime::from_hms_opt(20, 0, 0),
        );
        assert!(matches!(result, Err(ImportError::InvalidDuration { .. })));
    }

    #[test]
    fn test_day_and_a_half_ends_on_second_day() {
        let start = date(2026, 1, 5);
        let span = compute_span(start, Decimal::new(15, 1)).unwrap();
        assert!(!span.all_day);
        assert_eq!(span.end, date(2026, 1, 6).and_hms_opt(12, 0, 0).unwrap());
    }

    #[test]
    fn test_business_hours_mapping() {
        let span = business_day_calculator()
            .compute(date(2026, 1, 5), Decimal::new(5, 1), None)
            .unwrap();
        assert_eq!(span.start, date(2026, 1, 5).and_hms_opt(8, 0, 0).unwrap());
        assert_eq!(span.duration(), Duration::hours(4));
    }

    #[test]
    fn test_row_start_time_takes_precedence() {
        let span = business_day_calculator()
            .compute(
                date(2026, 1, 5),
                Decimal::new(25, 2),
                NaiveTime::from_hms_opt(13, 0, 0),
            )
            .unwrap();
        assert_eq!(span.start, date(2026, 1, 5).and_hms_opt(13, 0, 0).unwrap());
        assert_eq!(span.end, date(2026, 1, 5).and_hms_opt(15, 0, 0).unwrap());
    }

    #[test]
    fn test_repeating_fraction_rounds_to_minute() {
        let days = Decimal::new(4, 0) / Decimal::new(24, 0);
        let span = compute_span(date(2026, 1, 5), days).unwrap();
        assert_eq!(span.duration(), Duration::hours(4));
    }

    #[test]
    fn test_non_positive_duration_is_rejected() {
        for days in [Decimal::ZERO, Decimal::new(-1, 0), Decimal::new(-5, 1)] {
            let result = compute_span(date(2026, 1, 5), days);
            assert!(matches!(result, Err(ImportError::InvalidDuration { .. })));
        }
    }

    #[test]
    fn test_sub_minute_duration_is_rejected() {
        let result = compute_span(date(2026, 1, 5), Decimal::new(1, 5));
        match result {
            Err(ImportError::InvalidDuration { message, .. }) => {
                assert!(message.contains("minute"));
            }
            other => panic!("Expected InvalidDuration, got {:?}", other),
        }
    }

    #[test]
    fn test_absurd_duration_is_rejected() {
        let result = compute_span(date(2026, 1, 5), Decimal::new(4_000_000_000, 0));
        assert!(matches!(result, Err(ImportError::InvalidDuration { .. })));
    }

    proptest! {
        #[test]
        fn test_whole_days_span_exactly_n_days(offset in 0i64..3650, days in 1u32..400) {
            let start = date(2020, 1, 1) + Duration::days(offset);
            let span = compute_span(start, Decimal::from(days)).unwrap();
            prop_assert!(span.all_day);
            prop_assert_eq!(span.days(), i64::from(days));
            prop_assert_eq!(span.start_date(), start);
        }

        #[test]
        fn test_fractional_days_are_timed_and_well_formed(
            offset in 0i64..3650,
            tenths in 1i64..100,
        ) {
            prop_assume!(tenths % 10 != 0);
            let start = date(2020, 1, 1) + Duration::days(offset);
            let span = compute_span(start, Decimal::new(tenths, 1)).unwrap();
            prop_assert!(!span.all_day);
            prop_assert!(span.is_well_formed());
            prop_assert_eq!(span.duration(), Duration::minutes(tenths * 24 * 6));
            let covered = u64::try_from((tenths + 9) / 10).unwrap();
            let limit = start.checked_add_days(Days::new(covered)).unwrap();
            prop_assert!(span.end <= limit.and_time(NaiveTime::MIN));
        }
    }
}
