//! Human-readable reference numbers.
//!
//! Every generated identifier is backed by a named database sequence; the
//! scope name ties the counter to its calendar bucket so finance references
//! restart monthly, accounting references daily and student numbers yearly.

use chrono::{Datelike, NaiveDate};

fn two_digit_year(date: NaiveDate) -> u32 {
    u32::try_from(date.year().rem_euclid(100)).unwrap_or(0)
}

/// Formats a finance record reference: `FIN<YY><MM><seq6>`.
#[must_use]
pub fn finance_reference(date: NaiveDate, seq: u64) -> String {
    format!("FIN{:02}{:02}{seq:06}", two_digit_year(date), date.month())
}

/// Sequence scope for finance references, one counter per month.
#[must_use]
pub fn finance_sequence_scope(date: NaiveDate) -> String {
    format!("finance_records:{:02}{:02}", two_digit_year(date), date.month())
}

/// Formats an accounting transaction reference: `TXN-<YYYYMMDD>-<seq4>`.
#[must_use]
pub fn accounting_reference(date: NaiveDate, seq: u64) -> String {
    format!("TXN-{}-{seq:04}", date.format("%Y%m%d"))
}

/// Sequence scope for accounting references, one counter per day.
#[must_use]
pub fn accounting_sequence_scope(date: NaiveDate) -> String {
    format!("accounting_transactions:{}", date.format("%Y%m%d"))
}

/// Formats an auto-assigned student number: `STU<YY><seq4>`.
#[must_use]
pub fn student_number(date: NaiveDate, seq: u64) -> String {
    format!("STU{:02}{seq:04}", two_digit_year(date))
}

/// Sequence scope for student numbers, one counter per year.
#[must_use]
pub fn student_sequence_scope(date: NaiveDate) -> String {
    format!("students:{:02}", two_digit_year(date))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_finance_reference_format() {
        assert_eq!(finance_reference(date(2026, 8, 6), 1), "FIN2608000001");
        assert_eq!(finance_reference(date(2026, 12, 31), 123_456), "FIN2612123456");
    }

    #[test]
    fn test_accounting_reference_format() {
        assert_eq!(accounting_reference(date(2026, 8, 6), 1), "TXN-20260806-0001");
        assert_eq!(accounting_reference(date(2026, 1, 2), 42), "TXN-20260102-0042");
    }

    #[test]
    fn test_student_number_format() {
        assert_eq!(student_number(date(2026, 8, 6), 7), "STU260007");
        assert_eq!(student_number(date(2025, 1, 1), 1234), "STU251234");
    }

    #[test]
    fn test_scopes_partition_by_calendar_bucket() {
        assert_eq!(finance_sequence_scope(date(2026, 8, 1)), "finance_records:2608");
        assert_ne!(
            finance_sequence_scope(date(2026, 8, 1)),
            finance_sequence_scope(date(2026, 9, 1))
        );
        assert_eq!(
            accounting_sequence_scope(date(2026, 8, 6)),
            "accounting_transactions:20260806"
        );
        assert_ne!(
            accounting_sequence_scope(date(2026, 8, 6)),
            accounting_sequence_scope(date(2026, 8, 7))
        );
        assert_eq!(student_sequence_scope(date(2026, 3, 1)), "students:26");
    }

    #[test]
    fn test_sequence_increments_keep_width() {
        assert_eq!(accounting_reference(date(2026, 8, 6), 9999), "TXN-20260806-9999");
        assert_eq!(accounting_reference(date(2026, 8, 6), 10_000), "TXN-20260806-10000");
    }
}
