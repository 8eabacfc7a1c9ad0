//! `SeaORM` Entity for named counters.
//!
//! Backs reference-number and student-number allocation; counters advance
//! through an atomic increment-and-fetch, never a read-then-write.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq, Serialize, Deserialize)]
#[sea_orm(table_name = "sequences")]
pub struct Model {
    /// Scope name, e.g. `accounting_transactions:20260806`.
    #[sea_orm(primary_key, auto_increment = false)]
    pub name: String,
    pub value: i64,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
