//! `SeaORM` Entity for the accounting transaction audit trail.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

use super::sea_orm_active_enums::AuditAction;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq, Serialize, Deserialize)]
#[sea_orm(table_name = "transaction_audit_logs")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub transaction_id: Uuid,
    pub action: AuditAction,
    pub performed_by: Uuid,
    pub performed_at: DateTimeWithTimeZone,
    pub notes: Option<String>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::accounting_transactions::Entity",
        from = "Column::TransactionId",
        to = "super::accounting_transactions::Column::Id"
    )]
    AccountingTransactions,
}

impl Related<super::accounting_transactions::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::AccountingTransactions.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
