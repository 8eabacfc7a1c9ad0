//! Balance calculations for student accounts and ledger codes.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Open finance item entering a student balance.
#[derive(Debug, Clone)]
pub struct OpenItem {
    /// Item amount (always non-negative).
    pub amount: Decimal,
    /// Payments reduce the balance; everything else increases it.
    pub is_payment: bool,
}

/// Computes a student's outstanding balance over open (pending/overdue)
/// finance records.
#[must_use]
pub fn outstanding_balance<I>(items: I) -> Decimal
where
    I: IntoIterator<Item = OpenItem>,
{
    items.into_iter().fold(Decimal::ZERO, |total, item| {
        if item.is_payment {
            total - item.amount
        } else {
            total + item.amount
        }
    })
}

/// Ledger account categories.
///
/// Assets and Expenses are debit-normal; Liabilities, Equity and Revenue are
/// credit-normal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AccountCategory {
    /// Debit-normal.
    Assets,
    /// Credit-normal.
    Liabilities,
    /// Credit-normal.
    Equity,
    /// Credit-normal.
    Revenue,
    /// Debit-normal.
    Expenses,
}

impl AccountCategory {
    /// Parses a category from its wire representation.
    #[must_use]
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "Assets" => Some(Self::Assets),
            "Liabilities" => Some(Self::Liabilities),
            "Equity" => Some(Self::Equity),
            "Revenue" => Some(Self::Revenue),
            "Expenses" => Some(Self::Expenses),
            _ => None,
        }
    }

    /// The wire representation of this category.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Assets => "Assets",
            Self::Liabilities => "Liabilities",
            Self::Equity => "Equity",
            Self::Revenue => "Revenue",
            Self::Expenses => "Expenses",
        }
    }

    /// Returns true when this category carries a debit-normal balance.
    #[must_use]
    pub const fn is_debit_normal(&self) -> bool {
        matches!(self, Self::Assets | Self::Expenses)
    }
}

/// Debit/credit totals accumulated for a ledger code.
#[derive(Debug, Clone, Copy, Default)]
pub struct LedgerTotals {
    /// Sum over debit-normal categories.
    pub total_debits: Decimal,
    /// Sum over credit-normal categories.
    pub total_credits: Decimal,
}

/// Nets ledger totals into a balance for the given category.
#[must_use]
pub fn ledger_balance(category: AccountCategory, totals: LedgerTotals) -> Decimal {
    if category.is_debit_normal() {
        totals.total_debits - totals.total_credits
    } else {
        totals.total_credits - totals.total_debits
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_outstanding_balance_payments_subtract() {
        let items = vec![
            OpenItem {
                amount: dec!(1000),
                is_payment: false,
            },
            OpenItem {
                amount: dec!(250),
                is_payment: true,
            },
            OpenItem {
                amount: dec!(75.50),
                is_payment: false,
            },
        ];
        assert_eq!(outstanding_balance(items), dec!(825.50));
    }

    #[test]
    fn test_outstanding_balance_empty() {
        assert_eq!(outstanding_balance(Vec::new()), Decimal::ZERO);
    }

    #[test]
    fn test_overpayment_goes_negative() {
        let items = vec![
            OpenItem {
                amount: dec!(100),
                is_payment: false,
            },
            OpenItem {
                amount: dec!(150),
                is_payment: true,
            },
        ];
        assert_eq!(outstanding_balance(items), dec!(-50));
    }

    #[test]
    fn test_normal_sides() {
        assert!(AccountCategory::Assets.is_debit_normal());
        assert!(AccountCategory::Expenses.is_debit_normal());
        assert!(!AccountCategory::Liabilities.is_debit_normal());
        assert!(!AccountCategory::Equity.is_debit_normal());
        assert!(!AccountCategory::Revenue.is_debit_normal());
    }

    #[test]
    fn test_ledger_balance_nets_by_normal_side() {
        let totals = LedgerTotals {
            total_debits: dec!(500),
            total_credits: dec!(200),
        };
        assert_eq!(ledger_balance(AccountCategory::Assets, totals), dec!(300));
        assert_eq!(ledger_balance(AccountCategory::Revenue, totals), dec!(-300));
    }

    #[test]
    fn test_category_parse_round_trip() {
        for s in ["Assets", "Liabilities", "Equity", "Revenue", "Expenses"] {
            assert_eq!(AccountCategory::parse(s).unwrap().as_str(), s);
        }
        assert!(AccountCategory::parse("Other").is_none());
    }
}
