//! `SeaORM` Entity for accounting transactions.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

use super::sea_orm_active_enums::{AccountCategory, PaymentMethod, TxnStatus, TxnType};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq, Serialize, Deserialize)]
#[sea_orm(table_name = "accounting_transactions")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    /// `TXN-<YYYYMMDD>-<seq>`, allocated from the daily sequence.
    #[sea_orm(unique)]
    pub reference_number: String,
    pub student_number: String,
    pub txn_type: TxnType,
    pub amount: Decimal,
    pub original_amount: Option<Decimal>,
    pub method: PaymentMethod,
    pub ledger_code: String,
    pub account_category: AccountCategory,
    pub sub_category: Option<String>,
    pub status: TxnStatus,
    pub transaction_date: Date,
    pub due_date: Option<Date>,
    pub settlement_date: Option<Date>,
    pub term: Option<String>,
    pub session: Option<String>,
    pub academic_year: Option<String>,
    pub payment_reference: Option<String>,
    pub check_number: Option<String>,
    pub card_last_four: Option<String>,
    pub reconciled: bool,
    pub reconciliation_date: Option<DateTimeWithTimeZone>,
    pub reconciled_by: Option<Uuid>,
    pub approved: bool,
    pub approved_by: Option<Uuid>,
    pub approved_at: Option<DateTimeWithTimeZone>,
    pub approval_notes: Option<String>,
    pub description: String,
    pub notes: Option<String>,
    pub internal_notes: Option<String>,
    pub attachments: Option<Json>,
    pub is_active: bool,
    pub created_by: Uuid,
    pub created_at: DateTimeWithTimeZone,
    pub updated_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::transaction_audit_logs::Entity")]
    TransactionAuditLogs,
}

impl Related<super::transaction_audit_logs::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::TransactionAuditLogs.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
