//! Repository abstractions for data access.
//!
//! Repositories provide a clean interface for database operations,
//! hiding the `SeaORM` implementation details from the rest of the
//! application. CRM repositories additionally take an [`OwnerScope`] so the
//! record-ownership filter is injected into the query itself rather than
//! applied after the fetch.

pub mod accounting;
pub mod course;
pub mod deal;
pub mod finance;
pub mod history;
pub mod lead;
pub mod notification;
pub mod placement;
pub mod report;
pub mod sequence;
pub mod student;
pub mod user;

pub use accounting::{
    AccountingError, AccountingRepository, AccountingStats, CreateTransactionInput, LedgerBalance,
    TransactionBulkUpdate, TransactionFilter, TransactionSortKey, UpdateTransactionInput,
};
pub use course::{
    CourseBulkUpdate, CourseError, CourseFilter, CourseRepository, CourseSortKey, CourseStats,
    CreateCourseInput, UpdateCourseInput,
};
pub use deal::{
    CreateDealInput, DealError, DealFilter, DealRepository, StagePipeline, UpdateDealInput,
};
pub use finance::{
    CreateFinanceRecordInput, FinanceBulkUpdate, FinanceError, FinanceFilter, FinanceRepository,
    FinanceSortKey, FinanceStats, UpdateFinanceRecordInput,
};
pub use history::{CreateHistoryInput, HistoryError, HistoryRepository, UpdateHistoryInput};
pub use lead::{
    ConvertDealSeed, ConvertLeadInput, ConvertedLead, CreateLeadInput, LeadError, LeadFilter,
    LeadRepository, LeadStats, UpdateLeadInput,
};
pub use notification::{CreateNotificationInput, NotificationRepository, UpdateNotificationInput};
pub use placement::{
    CreateInterviewInput, CreatePlacementInput, PlacementBulkUpdate, PlacementError,
    PlacementFilter, PlacementRepository, PlacementSortKey, PlacementStats, UpdatePlacementInput,
};
pub use report::{AdmissionsSummary, PlacementOutcomes, RegistrarBreakdown, ReportRepository};
pub use sequence::SequenceRepository;
pub use student::{
    CreateStudentInput, StudentBulkUpdate, StudentError, StudentFilter, StudentRepository,
    StudentSortKey, StudentStats, UpdateStudentInput,
};
pub use user::{CreateUserInput, UpdateProfileInput, UserRepository};

use sea_orm::IntoSimpleExpr;
use sea_orm::sea_query::{Expr, ExprTrait, Func, SimpleExpr};
use uuid::Uuid;

/// Record-visibility scope for CRM queries.
///
/// Privileged principals see everything; everyone else is restricted to
/// records they are assigned, created or own.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OwnerScope {
    /// No ownership restriction (privileged role).
    All,
    /// Restricted to records referencing this user id.
    Owner(Uuid),
}

impl OwnerScope {
    /// Returns the scoping user id, if any.
    #[must_use]
    pub const fn owner(&self) -> Option<Uuid> {
        match self {
            Self::All => None,
            Self::Owner(id) => Some(*id),
        }
    }
}

/// Case-insensitive substring match on a column.
pub(crate) fn contains_ci<C: IntoSimpleExpr>(col: C, term: &str) -> SimpleExpr {
    let pattern = format!("%{}%", term.to_lowercase().replace('%', "\\%"));
    Expr::expr(Func::lower(col.into_simple_expr())).like(pattern)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_owner_scope_owner() {
        let id = Uuid::new_v4();
        assert_eq!(OwnerScope::Owner(id).owner(), Some(id));
        assert_eq!(OwnerScope::All.owner(), None);
    }
}
