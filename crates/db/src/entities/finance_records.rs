//! `SeaORM` Entity for student finance ledger entries.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

use super::sea_orm_active_enums::{
    FinanceCategory, FinanceStatus, FinanceType, FundingSource, PaymentMethod,
};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq, Serialize, Deserialize)]
#[sea_orm(table_name = "finance_records")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub student_number: String,
    pub record_type: FinanceType,
    pub category: FinanceCategory,
    pub amount: Decimal,
    pub original_amount: Option<Decimal>,
    pub record_date: Date,
    pub due_date: Option<Date>,
    pub paid_date: Option<Date>,
    pub term: String,
    pub session: String,
    pub funding_source: Option<FundingSource>,
    pub status: FinanceStatus,
    pub payment_method: Option<PaymentMethod>,
    /// `FIN<YY><MM><seq>`, allocated from the monthly sequence.
    #[sea_orm(unique)]
    pub reference_number: String,
    pub check_number: Option<String>,
    pub external_transaction_id: Option<String>,
    pub description: String,
    pub notes: Option<String>,
    pub approved_by: Option<Uuid>,
    pub approved_at: Option<DateTimeWithTimeZone>,
    pub processed_by: Option<Uuid>,
    pub processed_at: Option<DateTimeWithTimeZone>,
    pub attachments: Option<Json>,
    pub is_active: bool,
    pub is_recurring: bool,
    pub recurring_frequency: Option<String>,
    pub created_at: DateTimeWithTimeZone,
    pub updated_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
