//! Daily-limit admission checks.
//!
//! Pure predicates over data the caller already fetched; the repository
//! supplies "today's transfers" (scheduled for the current date, any
//! status, scoped to the submitting client).

use chrono::NaiveTime;
use rust_decimal::Decimal;

use super::model::{Ted, TedLimit};

/// Check whether admitting `candidate_value` would exceed the daily policy.
///
/// Exceeded when any of the three checks trips:
/// - today's transfer count has reached the daily count cap;
/// - today's total value plus the candidate exceeds the daily value cap;
/// - the candidate alone exceeds the per-transfer cap.
///
/// Canceled and rejected transfers still count toward the day's totals;
/// the policy is conservative by standing decision.
pub fn exceeds_daily_limit(
    candidate_value: Decimal,
    todays_teds: &[Ted],
    limit: &TedLimit,
) -> bool {
    if todays_teds.len() as i64 >= limit.max_count_per_day as i64 {
        return true;
    }

    let day_total: Decimal = todays_teds.iter().map(|t| t.requested_value).sum();
    if day_total + candidate_value > limit.max_value_per_day {
        return true;
    }

    candidate_value > limit.max_value_per_single
}

/// Check whether a scheduling time-of-day falls inside the settlement
/// system's operating window. Boundaries are inclusive; the comparison is
/// date-independent.
pub fn within_operating_window(at: NaiveTime, start: NaiveTime, end: NaiveTime) -> bool {
    at >= start && at <= end
}
