//! Deal repository for the sales CRM.
//!
//! Stage changes always refresh the probability from the stage ladder, so a
//! deal can never carry a probability its stage does not imply.

use atrium_shared::types::pagination::{PageRequest, SortOrder};
use chrono::Utc;
use rust_decimal::Decimal;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, DatabaseConnection, DbErr, EntityTrait,
    IntoActiveModel, Order, PaginatorTrait, QueryFilter, QueryOrder, QuerySelect, Select, Set,
};
use uuid::Uuid;

use atrium_core::crm::DealStage as CoreStage;

use super::{OwnerScope, contains_ci};
use crate::entities::{
    activities, deals,
    sea_orm_active_enums::{ActivityKind, DealStage, LeadSource, Priority},
};

/// Error types for deal operations.
#[derive(Debug, thiserror::Error)]
pub enum DealError {
    /// Deal not found.
    #[error("Deal not found: {0}")]
    NotFound(Uuid),

    /// The principal does not own this record.
    #[error("Access denied: record is not assigned to you")]
    NotOwner,

    /// The deal is already closed.
    #[error("Deal is already closed")]
    AlreadyClosed,

    /// The deal sits in a stage with no successor.
    #[error("Deal cannot advance from its current stage")]
    CannotAdvance,

    /// Database error.
    #[error("Database error: {0}")]
    Database(#[from] DbErr),
}

/// Filter options for listing deals.
#[derive(Debug, Clone, Default)]
pub struct DealFilter {
    /// Filter by stage.
    pub stage: Option<DealStage>,
    /// Filter by account.
    pub account_id: Option<Uuid>,
    /// Filter by priority.
    pub priority: Option<Priority>,
    /// Case-insensitive substring search over the deal name.
    pub search: Option<String>,
}

/// Input for creating a deal.
#[derive(Debug, Clone)]
pub struct CreateDealInput {
    /// Deal name.
    pub name: String,
    /// Description.
    pub description: Option<String>,
    /// Value, non-negative.
    pub value: Decimal,
    /// Currency code.
    pub currency: Option<String>,
    /// Initial stage.
    pub stage: DealStage,
    /// Pipeline name.
    pub pipeline: Option<String>,
    /// Owning account.
    pub account_id: Uuid,
    /// Primary contact.
    pub primary_contact_id: Option<Uuid>,
    /// Owning user.
    pub assigned_to: Uuid,
    /// Expected close date.
    pub expected_close_date: chrono::NaiveDate,
    /// Service type.
    pub service_type: Option<String>,
    /// Lead source.
    pub lead_source: Option<LeadSource>,
    /// Priority.
    pub priority: Option<Priority>,
    /// Notes.
    pub notes: Option<String>,
    /// Creating user.
    pub created_by: Uuid,
}

/// Allow-listed update fields for a deal.
#[derive(Debug, Clone, Default)]
pub struct UpdateDealInput {
    /// Deal name.
    pub name: Option<String>,
    /// Description.
    pub description: Option<String>,
    /// Value.
    pub value: Option<Decimal>,
    /// Stage; refreshes the probability.
    pub stage: Option<DealStage>,
    /// Expected close date.
    pub expected_close_date: Option<chrono::NaiveDate>,
    /// Next step.
    pub next_step: Option<String>,
    /// Next step date.
    pub next_step_date: Option<chrono::NaiveDate>,
    /// Priority.
    pub priority: Option<Priority>,
    /// Notes.
    pub notes: Option<String>,
    /// Updating user.
    pub updated_by: Uuid,
}

/// Per-stage pipeline rollup.
#[derive(Debug, Clone)]
pub struct StagePipeline {
    /// Stage.
    pub stage: DealStage,
    /// Number of open deals in this stage.
    pub count: u64,
    /// Total value.
    pub total_value: Decimal,
    /// Probability-weighted value.
    pub weighted_value: Decimal,
}

/// Deal repository.
#[derive(Debug, Clone)]
pub struct DealRepository {
    db: DatabaseConnection,
}

impl DealRepository {
    /// Creates a new deal repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    fn scoped(scope: OwnerScope) -> Select<deals::Entity> {
        let query = deals::Entity::find().filter(deals::Column::IsActive.eq(true));
        match scope {
            OwnerScope::All => query,
            OwnerScope::Owner(user_id) => query.filter(
                Condition::any()
                    .add(deals::Column::AssignedTo.eq(user_id))
                    .add(deals::Column::CreatedBy.eq(user_id)),
            ),
        }
    }

    fn owns(deal: &deals::Model, scope: OwnerScope) -> bool {
        match scope {
            OwnerScope::All => true,
            OwnerScope::Owner(user_id) => {
                deal.assigned_to == user_id || deal.created_by == user_id
            }
        }
    }

    const fn core_stage(stage: &DealStage) -> CoreStage {
        match stage {
            DealStage::Prospecting => CoreStage::Prospecting,
            DealStage::Qualification => CoreStage::Qualification,
            DealStage::NeedsAnalysis => CoreStage::NeedsAnalysis,
            DealStage::Proposal => CoreStage::Proposal,
            DealStage::Negotiation => CoreStage::Negotiation,
            DealStage::Decision => CoreStage::Decision,
            DealStage::ClosedWon => CoreStage::ClosedWon,
            DealStage::ClosedLost => CoreStage::ClosedLost,
        }
    }

    const fn entity_stage(stage: CoreStage) -> DealStage {
        match stage {
            CoreStage::Prospecting => DealStage::Prospecting,
            CoreStage::Qualification => DealStage::Qualification,
            CoreStage::NeedsAnalysis => DealStage::NeedsAnalysis,
            CoreStage::Proposal => DealStage::Proposal,
            CoreStage::Negotiation => DealStage::Negotiation,
            CoreStage::Decision => DealStage::Decision,
            CoreStage::ClosedWon => DealStage::ClosedWon,
            CoreStage::ClosedLost => DealStage::ClosedLost,
        }
    }

    async fn log_close_activity(
        &self,
        deal: &deals::Model,
        performed_by: Uuid,
        outcome: &str,
    ) -> Result<(), DbErr> {
        let now = Utc::now().into();
        let activity = activities::ActiveModel {
            id: Set(Uuid::new_v4()),
            kind: Set(ActivityKind::Note),
            subject: Set(format!("Deal closed {outcome}")),
            detail: Set(Some(format!("{} closed {outcome}", deal.name))),
            activity_date: Set(now),
            duration_minutes: Set(None),
            related_lead_id: Set(None),
            related_deal_id: Set(Some(deal.id)),
            related_account_id: Set(Some(deal.account_id)),
            related_contact_id: Set(deal.primary_contact_id),
            performed_by: Set(performed_by),
            created_by: Set(performed_by),
            is_active: Set(true),
            created_at: Set(now),
            updated_at: Set(now),
        };
        activity.insert(&self.db).await?;
        Ok(())
    }

    /// Lists visible deals with the total matching count.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn list(
        &self,
        scope: OwnerScope,
        filter: &DealFilter,
        order: SortOrder,
        page: &PageRequest,
    ) -> Result<(Vec<deals::Model>, u64), DbErr> {
        let mut query = Self::scoped(scope);

        if let Some(stage) = &filter.stage {
            query = query.filter(deals::Column::Stage.eq(stage.clone()));
        }
        if let Some(account_id) = filter.account_id {
            query = query.filter(deals::Column::AccountId.eq(account_id));
        }
        if let Some(priority) = &filter.priority {
            query = query.filter(deals::Column::Priority.eq(priority.clone()));
        }
        if let Some(search) = &filter.search {
            query = query.filter(contains_ci(deals::Column::Name, search));
        }

        let total = query.clone().count(&self.db).await?;

        let order = match order {
            SortOrder::Asc => Order::Asc,
            SortOrder::Desc => Order::Desc,
        };

        let items = query
            .order_by(deals::Column::ExpectedCloseDate, order)
            .offset(page.offset())
            .limit(page.limit())
            .all(&self.db)
            .await?;

        Ok((items, total))
    }

    /// Fetches all visible deals grouped for a kanban board, one bucket per
    /// stage in pipeline order.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn kanban(
        &self,
        scope: OwnerScope,
    ) -> Result<Vec<(DealStage, Vec<deals::Model>)>, DbErr> {
        let deals = Self::scoped(scope)
            .order_by_asc(deals::Column::ExpectedCloseDate)
            .all(&self.db)
            .await?;

        let mut buckets: Vec<(DealStage, Vec<deals::Model>)> = [
            DealStage::Prospecting,
            DealStage::Qualification,
            DealStage::NeedsAnalysis,
            DealStage::Proposal,
            DealStage::Negotiation,
            DealStage::Decision,
            DealStage::ClosedWon,
            DealStage::ClosedLost,
        ]
        .into_iter()
        .map(|stage| (stage, Vec::new()))
        .collect();

        for deal in deals {
            if let Some((_, bucket)) = buckets.iter_mut().find(|(stage, _)| *stage == deal.stage) {
                bucket.push(deal);
            }
        }

        Ok(buckets)
    }

    /// Loads a deal and checks ownership explicitly.
    ///
    /// # Errors
    ///
    /// Returns `DealError::NotFound` or `DealError::NotOwner`.
    pub async fn find_scoped(&self, id: Uuid, scope: OwnerScope) -> Result<deals::Model, DealError> {
        let deal = deals::Entity::find_by_id(id)
            .one(&self.db)
            .await?
            .ok_or(DealError::NotFound(id))?;

        if !Self::owns(&deal, scope) {
            return Err(DealError::NotOwner);
        }

        Ok(deal)
    }

    /// Creates a deal with the probability implied by its stage.
    ///
    /// # Errors
    ///
    /// Returns an error if the database insert fails.
    pub async fn create(&self, input: CreateDealInput) -> Result<deals::Model, DbErr> {
        let now = Utc::now().into();
        let probability = Self::core_stage(&input.stage).probability();

        let deal = deals::ActiveModel {
            id: Set(Uuid::new_v4()),
            name: Set(input.name),
            description: Set(input.description),
            value: Set(input.value),
            currency: Set(input.currency.unwrap_or_else(|| "USD".to_string())),
            probability: Set(probability),
            stage: Set(input.stage),
            pipeline: Set(input.pipeline.unwrap_or_else(|| "Default".to_string())),
            account_id: Set(input.account_id),
            primary_contact_id: Set(input.primary_contact_id),
            assigned_to: Set(input.assigned_to),
            expected_close_date: Set(input.expected_close_date),
            actual_close_date: Set(None),
            next_step: Set(None),
            next_step_date: Set(None),
            products: Set(None),
            service_type: Set(input.service_type),
            lead_source: Set(input.lead_source),
            loss_reason: Set(None),
            competitor_won: Set(None),
            contract_type: Set(None),
            contract_length_months: Set(None),
            renewal_date: Set(None),
            tags: Set(None),
            priority: Set(input.priority.unwrap_or(Priority::Medium)),
            notes: Set(input.notes),
            is_active: Set(true),
            created_by: Set(input.created_by),
            updated_by: Set(None),
            created_at: Set(now),
            updated_at: Set(now),
        };

        deal.insert(&self.db).await
    }

    /// Applies an allow-listed update after the ownership check.
    ///
    /// # Errors
    ///
    /// Returns `DealError::NotFound` or `DealError::NotOwner`.
    pub async fn update(
        &self,
        id: Uuid,
        scope: OwnerScope,
        input: UpdateDealInput,
    ) -> Result<deals::Model, DealError> {
        let deal = self.find_scoped(id, scope).await?;

        let mut active = deal.into_active_model();
        if let Some(name) = input.name {
            active.name = Set(name);
        }
        if let Some(description) = input.description {
            active.description = Set(Some(description));
        }
        if let Some(value) = input.value {
            active.value = Set(value);
        }
        if let Some(stage) = input.stage {
            active.probability = Set(Self::core_stage(&stage).probability());
            active.stage = Set(stage);
        }
        if let Some(expected_close_date) = input.expected_close_date {
            active.expected_close_date = Set(expected_close_date);
        }
        if let Some(next_step) = input.next_step {
            active.next_step = Set(Some(next_step));
        }
        if let Some(next_step_date) = input.next_step_date {
            active.next_step_date = Set(Some(next_step_date));
        }
        if let Some(priority) = input.priority {
            active.priority = Set(priority);
        }
        if let Some(notes) = input.notes {
            active.notes = Set(Some(notes));
        }
        active.updated_by = Set(Some(input.updated_by));
        active.updated_at = Set(Utc::now().into());

        Ok(active.update(&self.db).await?)
    }

    /// Advances a deal one stage along the open ladder.
    ///
    /// # Errors
    ///
    /// Returns `DealError::CannotAdvance` for closed deals or the last
    /// open stage.
    pub async fn advance_stage(
        &self,
        id: Uuid,
        scope: OwnerScope,
        updated_by: Uuid,
    ) -> Result<deals::Model, DealError> {
        let deal = self.find_scoped(id, scope).await?;

        let next = Self::core_stage(&deal.stage)
            .next()
            .ok_or(DealError::CannotAdvance)?;

        let mut active = deal.into_active_model();
        active.stage = Set(Self::entity_stage(next));
        active.probability = Set(next.probability());
        active.updated_by = Set(Some(updated_by));
        active.updated_at = Set(Utc::now().into());

        Ok(active.update(&self.db).await?)
    }

    /// Closes a deal as won, stamping the actual close date.
    ///
    /// # Errors
    ///
    /// Returns `DealError::AlreadyClosed` when the deal is closed.
    pub async fn close_won(
        &self,
        id: Uuid,
        scope: OwnerScope,
        updated_by: Uuid,
    ) -> Result<deals::Model, DealError> {
        let deal = self.find_scoped(id, scope).await?;

        if Self::core_stage(&deal.stage).is_closed() {
            return Err(DealError::AlreadyClosed);
        }

        let now = Utc::now();
        let mut active = deal.into_active_model();
        active.stage = Set(DealStage::ClosedWon);
        active.probability = Set(CoreStage::ClosedWon.probability());
        active.actual_close_date = Set(Some(now.date_naive()));
        active.updated_by = Set(Some(updated_by));
        active.updated_at = Set(now.into());

        let deal = active.update(&self.db).await?;
        self.log_close_activity(&deal, updated_by, "won").await?;
        Ok(deal)
    }

    /// Closes a deal as lost with a reason.
    ///
    /// # Errors
    ///
    /// Returns `DealError::AlreadyClosed` when the deal is closed.
    pub async fn close_lost(
        &self,
        id: Uuid,
        scope: OwnerScope,
        updated_by: Uuid,
        loss_reason: Option<String>,
        competitor_won: Option<String>,
    ) -> Result<deals::Model, DealError> {
        let deal = self.find_scoped(id, scope).await?;

        if Self::core_stage(&deal.stage).is_closed() {
            return Err(DealError::AlreadyClosed);
        }

        let now = Utc::now();
        let mut active = deal.into_active_model();
        active.stage = Set(DealStage::ClosedLost);
        active.probability = Set(CoreStage::ClosedLost.probability());
        active.actual_close_date = Set(Some(now.date_naive()));
        active.loss_reason = Set(loss_reason);
        active.competitor_won = Set(competitor_won);
        active.updated_by = Set(Some(updated_by));
        active.updated_at = Set(now.into());

        let deal = active.update(&self.db).await?;
        self.log_close_activity(&deal, updated_by, "lost").await?;
        Ok(deal)
    }

    /// Soft-deletes a deal after the ownership check.
    ///
    /// # Errors
    ///
    /// Returns `DealError::NotFound` or `DealError::NotOwner`.
    pub async fn soft_delete(&self, id: Uuid, scope: OwnerScope) -> Result<(), DealError> {
        let deal = self.find_scoped(id, scope).await?;

        let mut active = deal.into_active_model();
        active.is_active = Set(false);
        active.updated_at = Set(Utc::now().into());
        active.update(&self.db).await?;
        Ok(())
    }

    /// Computes the per-stage pipeline rollup over visible deals.
    ///
    /// Weighted value is `value x probability / 100`, summed per stage.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn pipeline_stats(&self, scope: OwnerScope) -> Result<Vec<StagePipeline>, DbErr> {
        let deals = Self::scoped(scope).all(&self.db).await?;

        let mut rollup: Vec<StagePipeline> = Vec::new();
        for deal in deals {
            let weighted = deal.value * Decimal::from(deal.probability) / Decimal::ONE_HUNDRED;
            if let Some(entry) = rollup.iter_mut().find(|entry| entry.stage == deal.stage) {
                entry.count += 1;
                entry.total_value += deal.value;
                entry.weighted_value += weighted;
            } else {
                rollup.push(StagePipeline {
                    stage: deal.stage,
                    count: 1,
                    total_value: deal.value,
                    weighted_value: weighted,
                });
            }
        }

        Ok(rollup)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(DealStage::Prospecting, 10)]
    #[case(DealStage::Qualification, 20)]
    #[case(DealStage::NeedsAnalysis, 30)]
    #[case(DealStage::Proposal, 50)]
    #[case(DealStage::Negotiation, 70)]
    #[case(DealStage::Decision, 80)]
    #[case(DealStage::ClosedWon, 100)]
    #[case(DealStage::ClosedLost, 0)]
    fn test_stage_mapping_keeps_probability(#[case] stage: DealStage, #[case] expected: i32) {
        let core = DealRepository::core_stage(&stage);
        assert_eq!(core.probability(), expected);
        assert_eq!(DealRepository::entity_stage(core), stage);
    }
}
