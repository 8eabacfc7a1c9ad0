//! `SeaORM` entity definitions.

pub mod prelude;
pub mod sea_orm_active_enums;

pub mod academic_history;
pub mod accounting_transactions;
pub mod accounts;
pub mod activities;
pub mod contacts;
pub mod course_enrollments;
pub mod courses;
pub mod crm_tasks;
pub mod deals;
pub mod finance_records;
pub mod leads;
pub mod notifications;
pub mod placement_interviews;
pub mod placements;
pub mod sequences;
pub mod students;
pub mod transaction_audit_logs;
pub mod users;
