//! Re-exports of all entity types.

pub use super::academic_history::Entity as AcademicHistory;
pub use super::accounting_transactions::Entity as AccountingTransactions;
pub use super::accounts::Entity as Accounts;
pub use super::activities::Entity as Activities;
pub use super::contacts::Entity as Contacts;
pub use super::course_enrollments::Entity as CourseEnrollments;
pub use super::courses::Entity as Courses;
pub use super::crm_tasks::Entity as CrmTasks;
pub use super::deals::Entity as Deals;
pub use super::finance_records::Entity as FinanceRecords;
pub use super::leads::Entity as Leads;
pub use super::notifications::Entity as Notifications;
pub use super::placement_interviews::Entity as PlacementInterviews;
pub use super::placements::Entity as Placements;
pub use super::sequences::Entity as Sequences;
pub use super::students::Entity as Students;
pub use super::transaction_audit_logs::Entity as TransactionAuditLogs;
pub use super::users::Entity as Users;
