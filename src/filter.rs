//! Purchase-date parsing and the date-range filter.

use crate::error::{Result, RewardsError};
use crate::transaction::Transaction;
use chrono::{DateTime, Months, NaiveDate, NaiveDateTime};
use log::debug;

/// Format expected for date arguments and plain purchase dates.
pub const ISO_DATE: &str = "%Y-%m-%d";

/// Length of the default reporting window.
pub const DEFAULT_WINDOW_MONTHS: u32 = 3;

/// Parses a purchase date into a calendar date.
///
/// Accepts `YYYY-MM-DD`, RFC 3339 timestamps, and `YYYY-MM-DDTHH:MM:SS`;
/// only the date part of a timestamp is kept. Blank or unparseable input
/// yields `None`.
pub fn parse_purchase_date(raw: &str) -> Option<NaiveDate> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }

    NaiveDate::parse_from_str(raw, ISO_DATE)
        .ok()
        .or_else(|| DateTime::parse_from_rfc3339(raw).ok().map(|dt| dt.date_naive()))
        .or_else(|| {
            NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S")
                .ok()
                .map(|dt| dt.date())
        })
}

/// Parses a `YYYY-MM-DD` argument, reporting the offending text on failure.
pub fn parse_date_argument(raw: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(raw.trim(), ISO_DATE)
        .map_err(|_| RewardsError::InvalidDate(raw.to_string()))
}

/// An inclusive calendar-date window.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateWindow {
    pub from: NaiveDate,
    pub to: NaiveDate,
}

impl DateWindow {
    /// Creates a window, rejecting one that starts after it ends.
    pub fn new(from: NaiveDate, to: NaiveDate) -> Result<Self> {
        if from > to {
            return Err(RewardsError::InvalidDateRange { from, to });
        }
        Ok(DateWindow { from, to })
    }

    /// The default window: the last three months up to and including `today`.
    ///
    /// When the same day does not exist three months back (May 31 → Feb 31),
    /// the start clamps to the last day of that month: May 31 gives Feb 28.
    /// This deliberately differs from day-overflow arithmetic, which rolls the
    /// excess days into the following month and would start the window on
    /// Mar 3 instead.
    pub fn last_three_months(today: NaiveDate) -> Self {
        let from = today
            .checked_sub_months(Months::new(DEFAULT_WINDOW_MONTHS))
            .unwrap_or(NaiveDate::MIN);
        DateWindow { from, to: today }
    }

    /// Returns `true` if `date` lies within the window, bounds included.
    pub fn contains(&self, date: NaiveDate) -> bool {
        self.from <= date && date <= self.to
    }

    /// Applies [`filter_by_purchase_date`] with this window's bounds.
    pub fn apply<'a>(&self, transactions: &'a [Transaction]) -> Vec<&'a Transaction> {
        filter_by_purchase_date(transactions, self.from, self.to)
    }
}

/// Keeps transactions purchased within `[from, to]`, in input order.
///
/// Transactions with a missing or unparseable purchase date are dropped.
/// An inverted range keeps nothing.
pub fn filter_by_purchase_date(
    transactions: &[Transaction],
    from: NaiveDate,
    to: NaiveDate,
) -> Vec<&Transaction> {
    transactions
        .iter()
        .filter(|tx| match tx.purchased_on() {
            Some(date) => from <= date && date <= to,
            None => {
                debug!(
                    "Transaction {}: no valid purchase date, excluded from filter",
                    tx.transaction_id
                );
                false
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn tx(id: &str, purchase_date: Option<&str>) -> Transaction {
        Transaction {
            transaction_id: id.into(),
            purchase_date: purchase_date.map(str::to_string),
            ..Transaction::default()
        }
    }

    fn ids(filtered: &[&Transaction]) -> Vec<String> {
        filtered.iter().map(|t| t.transaction_id.to_string()).collect()
    }

    #[test]
    fn test_parse_purchase_date_formats() {
        assert_eq!(parse_purchase_date("2025-01-15"), Some(date(2025, 1, 15)));
        assert_eq!(
            parse_purchase_date("2025-01-15T23:30:00Z"),
            Some(date(2025, 1, 15))
        );
        assert_eq!(
            parse_purchase_date("2025-01-15T08:00:00"),
            Some(date(2025, 1, 15))
        );
        assert_eq!(parse_purchase_date(" 2025-01-15 "), Some(date(2025, 1, 15)));
    }

    #[test]
    fn test_parse_purchase_date_rejects_invalid() {
        assert_eq!(parse_purchase_date(""), None);
        assert_eq!(parse_purchase_date("not a date"), None);
        assert_eq!(parse_purchase_date("2025-02-30"), None);
        assert_eq!(parse_purchase_date("2025-13-01"), None);
    }

    #[test]
    fn test_filter_keeps_dates_in_range() {
        let transactions = vec![
            tx("a", Some("2025-09-01")),
            tx("b", Some("2025-06-01")),
            tx("c", None),
        ];

        let filtered = filter_by_purchase_date(&transactions, date(2025, 8, 1), date(2025, 9, 30));
        assert_eq!(ids(&filtered), vec!["a"]);
    }

    #[test]
    fn test_filter_bounds_are_inclusive() {
        let transactions = vec![
            tx("before", Some("2025-02-28")),
            tx("first", Some("2025-03-01")),
            tx("middle", Some("2025-03-15")),
            tx("last", Some("2025-03-31")),
            tx("after", Some("2025-04-01")),
        ];

        let filtered = filter_by_purchase_date(&transactions, date(2025, 3, 1), date(2025, 3, 31));
        assert_eq!(ids(&filtered), vec!["first", "middle", "last"]);
    }

    #[test]
    fn test_filter_drops_blank_and_malformed_dates() {
        let transactions = vec![
            tx("blank", Some("")),
            tx("garbage", Some("yesterday")),
            tx("ok", Some("2025-03-10")),
        ];

        let filtered = filter_by_purchase_date(&transactions, date(2025, 1, 1), date(2025, 12, 31));
        assert_eq!(ids(&filtered), vec!["ok"]);
    }

    #[test]
    fn test_filter_preserves_input_order() {
        let transactions = vec![
            tx("3", Some("2025-03-03")),
            tx("1", Some("2025-03-01")),
            tx("2", Some("2025-03-02")),
        ];

        let filtered = filter_by_purchase_date(&transactions, date(2025, 3, 1), date(2025, 3, 3));
        assert_eq!(ids(&filtered), vec!["3", "1", "2"]);
    }

    #[test]
    fn test_inverted_range_keeps_nothing() {
        let transactions = vec![tx("a", Some("2025-03-03"))];
        let filtered = filter_by_purchase_date(&transactions, date(2025, 4, 1), date(2025, 3, 1));
        assert!(filtered.is_empty());
    }

    #[test]
    fn test_window_rejects_inverted_bounds() {
        let err = DateWindow::new(date(2025, 4, 1), date(2025, 3, 1)).unwrap_err();
        assert!(matches!(err, RewardsError::InvalidDateRange { .. }));
        assert!(DateWindow::new(date(2025, 3, 1), date(2025, 3, 1)).is_ok());
    }

    #[test]
    fn test_last_three_months() {
        let window = DateWindow::last_three_months(date(2025, 9, 19));
        assert_eq!(window.from, date(2025, 6, 19));
        assert_eq!(window.to, date(2025, 9, 19));

        let clamped = DateWindow::last_three_months(date(2025, 5, 31));
        assert_eq!(clamped.from, date(2025, 2, 28));

        let across_year = DateWindow::last_three_months(date(2025, 1, 15));
        assert_eq!(across_year.from, date(2024, 10, 15));
    }

    #[test]
    fn test_window_apply_matches_filter() {
        let transactions = vec![
            tx("old", Some("2025-01-01")),
            tx("recent", Some("2025-03-20")),
        ];
        let window = DateWindow::last_three_months(date(2025, 3, 31));

        assert!(window.contains(date(2024, 12, 31)));
        assert_eq!(ids(&window.apply(&transactions)), vec!["old", "recent"]);
    }

    #[test]
    fn test_parse_date_argument() {
        assert_eq!(parse_date_argument("2025-03-01").unwrap(), date(2025, 3, 1));
        assert!(matches!(
            parse_date_argument("03/01/2025"),
            Err(RewardsError::InvalidDate(_))
        ));
    }
}
