//! Order Number Generation
//!
//! `ORD-YYYYMMDD-NNN` — 按营业日重新计数，同日内严格递增。
//! 日期由调用方注入，本模块从不读系统时钟。

use chrono::NaiveDate;

/// Fixed prefix for order numbers
pub const NUMBER_PREFIX: &str = "ORD";

/// Minimum zero-padded width of the daily counter
const COUNTER_WIDTH: usize = 3;

/// Day prefix including the trailing separator, e.g. `ORD-20250807-`
pub fn day_prefix(date: NaiveDate) -> String {
    format!("{}-{}-", NUMBER_PREFIX, date.format("%Y%m%d"))
}

/// Format a number for the given date and counter value.
///
/// The counter keeps its 3-digit zero padding up to 999 and then grows
/// naturally (`ORD-20250807-1000`): a busier-than-expected day widens the
/// number instead of colliding.
pub fn format_number(date: NaiveDate, counter: u32) -> String {
    format!("{}{:0width$}", day_prefix(date), counter, width = COUNTER_WIDTH)
}

/// Extract the trailing counter from a number with the given day prefix.
/// Numbers from other days or with malformed tails yield `None`.
fn parse_counter(number: &str, prefix: &str) -> Option<u32> {
    number.strip_prefix(prefix)?.parse().ok()
}

/// Compute the next order number for `date` given every existing number
/// carrying that day's prefix.
///
/// The highest parseable counter wins; an empty or unparseable set starts
/// at 1. Uniqueness under concurrency is NOT guaranteed here — the caller
/// allocates inside a critical section and the UNIQUE index on
/// `order.number` is the final arbiter.
pub fn next_order_number(date: NaiveDate, existing: &[String]) -> String {
    let prefix = day_prefix(date);
    let max = existing
        .iter()
        .filter_map(|n| parse_counter(n, &prefix))
        .max()
        .unwrap_or(0);
    format_number(date, max + 1)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 8, 7).unwrap()
    }

    #[test]
    fn first_of_the_day_is_001() {
        assert_eq!(next_order_number(date(), &[]), "ORD-20250807-001");
    }

    #[test]
    fn increments_past_the_highest_existing() {
        let existing = vec![
            "ORD-20250807-001".to_string(),
            "ORD-20250807-003".to_string(),
            "ORD-20250807-002".to_string(),
        ];
        assert_eq!(next_order_number(date(), &existing), "ORD-20250807-004");
    }

    #[test]
    fn other_days_do_not_leak_into_the_counter() {
        let existing = vec![
            "ORD-20250806-250".to_string(),
            "ORD-20250807-001".to_string(),
        ];
        assert_eq!(next_order_number(date(), &existing), "ORD-20250807-002");
    }

    #[test]
    fn malformed_tails_are_ignored() {
        let existing = vec![
            "ORD-20250807-abc".to_string(),
            "ORD-20250807-".to_string(),
            "garbage".to_string(),
        ];
        assert_eq!(next_order_number(date(), &existing), "ORD-20250807-001");
    }

    #[test]
    fn counter_widens_past_999_instead_of_colliding() {
        let existing = vec!["ORD-20250807-999".to_string()];
        assert_eq!(next_order_number(date(), &existing), "ORD-20250807-1000");

        // and keeps counting correctly from the widened form
        let existing = vec![
            "ORD-20250807-999".to_string(),
            "ORD-20250807-1000".to_string(),
        ];
        assert_eq!(next_order_number(date(), &existing), "ORD-20250807-1001");
    }
}
