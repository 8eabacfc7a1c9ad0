//! `SeaORM` Entity for interviews attached to a placement.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

use super::sea_orm_active_enums::{InterviewKind, InterviewOutcome};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq, Serialize, Deserialize)]
#[sea_orm(table_name = "placement_interviews")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub placement_id: Uuid,
    pub interview_date: DateTimeWithTimeZone,
    pub kind: InterviewKind,
    pub interviewer: Option<String>,
    pub notes: Option<String>,
    pub outcome: InterviewOutcome,
    pub created_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::placements::Entity",
        from = "Column::PlacementId",
        to = "super::placements::Column::Id"
    )]
    Placements,
}

impl Related<super::placements::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Placements.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
