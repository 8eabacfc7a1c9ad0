//! Lead repository for the sales CRM.
//!
//! Every query takes an [`OwnerScope`]: non-privileged principals only see
//! leads they are assigned or created. For list and stats queries the scope
//! is injected into the predicate; single-record operations load first and
//! compare ownership explicitly.

use atrium_shared::types::pagination::{PageRequest, SortOrder};
use chrono::Utc;
use rust_decimal::Decimal;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, DatabaseConnection, DbErr, EntityTrait,
    FromQueryResult, IntoActiveModel, Order, PaginatorTrait, QueryFilter, QueryOrder, QuerySelect,
    Select, Set, TransactionTrait,
};
use uuid::Uuid;

use atrium_core::crm::{LeadQualification, lead_score};

use super::{OwnerScope, contains_ci};
use crate::entities::{
    accounts, activities, contacts, crm_tasks, deals, leads,
    sea_orm_active_enums::{ActivityKind, DealStage, LeadSource, LeadStatus, Priority, TaskStatus},
};

/// Error types for lead operations.
#[derive(Debug, thiserror::Error)]
pub enum LeadError {
    /// Lead not found.
    #[error("Lead not found: {0}")]
    NotFound(Uuid),

    /// The principal does not own this record.
    #[error("Access denied: record is not assigned to you")]
    NotOwner,

    /// The lead was already converted.
    #[error("Lead has already been converted")]
    AlreadyConverted,

    /// Database error.
    #[error("Database error: {0}")]
    Database(#[from] DbErr),
}

/// Filter options for listing leads.
#[derive(Debug, Clone, Default)]
pub struct LeadFilter {
    /// Filter by status.
    pub status: Option<LeadStatus>,
    /// Filter by source.
    pub source: Option<LeadSource>,
    /// Filter by territory.
    pub territory: Option<String>,
    /// Case-insensitive substring search over name, email and company.
    pub search: Option<String>,
}

/// Input for creating a lead.
#[derive(Debug, Clone)]
pub struct CreateLeadInput {
    /// First name.
    pub first_name: String,
    /// Last name.
    pub last_name: String,
    /// Email.
    pub email: String,
    /// Phone.
    pub phone: Option<String>,
    /// Company.
    pub company: Option<String>,
    /// Position.
    pub position: Option<String>,
    /// Source.
    pub source: LeadSource,
    /// Source details.
    pub source_details: Option<String>,
    /// School district.
    pub school_district: Option<String>,
    /// School type.
    pub school_type: Option<String>,
    /// Student count.
    pub student_count: Option<i32>,
    /// Territory.
    pub territory: Option<String>,
    /// Address blob.
    pub address: Option<serde_json::Value>,
    /// Industry.
    pub industry: Option<String>,
    /// Estimated value.
    pub estimated_value: Option<Decimal>,
    /// Budget range bracket.
    pub budget_range: Option<String>,
    /// Expected close date.
    pub expected_close_date: Option<chrono::NaiveDate>,
    /// Notes.
    pub notes: Option<String>,
    /// Owning user.
    pub assigned_to: Uuid,
    /// Creating user.
    pub created_by: Uuid,
}

/// Allow-listed update fields for a lead.
#[derive(Debug, Clone, Default)]
pub struct UpdateLeadInput {
    /// First name.
    pub first_name: Option<String>,
    /// Last name.
    pub last_name: Option<String>,
    /// Email.
    pub email: Option<String>,
    /// Phone.
    pub phone: Option<String>,
    /// Company.
    pub company: Option<String>,
    /// Status.
    pub status: Option<LeadStatus>,
    /// Territory.
    pub territory: Option<String>,
    /// Estimated value.
    pub estimated_value: Option<Decimal>,
    /// Next follow-up date.
    pub next_follow_up: Option<chrono::NaiveDate>,
    /// Last contact timestamp.
    pub last_contact_date: Option<chrono::DateTime<Utc>>,
    /// Decision-maker flag.
    pub decision_maker: Option<bool>,
    /// Budget-confirmed flag.
    pub has_budget: Option<bool>,
    /// Need-established flag.
    pub has_need: Option<bool>,
    /// Timeline-established flag.
    pub has_timeline: Option<bool>,
    /// Notes.
    pub notes: Option<String>,
    /// Loss reason.
    pub lost_reason: Option<String>,
    /// Reassignment target (privileged only, enforced by the route).
    pub assigned_to: Option<Uuid>,
    /// Updating user.
    pub updated_by: Uuid,
}

/// Input for converting a lead into account/contact/deal.
#[derive(Debug, Clone)]
pub struct ConvertLeadInput {
    /// Name for the new account; the lead's company when omitted.
    pub account_name: Option<String>,
    /// Create a contact from the lead's person fields.
    pub create_contact: bool,
    /// Create a deal seeded with these fields.
    pub deal: Option<ConvertDealSeed>,
    /// Converting user.
    pub performed_by: Uuid,
}

/// Deal seed used during lead conversion.
#[derive(Debug, Clone)]
pub struct ConvertDealSeed {
    /// Deal name.
    pub name: String,
    /// Deal value.
    pub value: Decimal,
    /// Expected close date.
    pub expected_close_date: chrono::NaiveDate,
}

/// Result of a lead conversion.
#[derive(Debug, Clone)]
pub struct ConvertedLead {
    /// The updated lead.
    pub lead: leads::Model,
    /// The created account.
    pub account: accounts::Model,
    /// The created contact, when requested.
    pub contact: Option<contacts::Model>,
    /// The created deal, when requested.
    pub deal: Option<deals::Model>,
}

/// Status rollup for the lead stats endpoint.
#[derive(Debug, Clone, Default)]
pub struct LeadStats {
    /// All visible active leads.
    pub total: u64,
    /// Converted leads.
    pub converted: u64,
    /// Conversion rate in percent.
    pub conversion_rate: Decimal,
    /// Count per status.
    pub by_status: Vec<(LeadStatus, i64)>,
}

#[derive(Debug, FromQueryResult)]
struct StatusCount {
    status: LeadStatus,
    count: i64,
}

/// Lead repository.
#[derive(Debug, Clone)]
pub struct LeadRepository {
    db: DatabaseConnection,
}

impl LeadRepository {
    /// Creates a new lead repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    fn scoped(scope: OwnerScope) -> Select<leads::Entity> {
        let query = leads::Entity::find().filter(leads::Column::IsActive.eq(true));
        match scope {
            OwnerScope::All => query,
            OwnerScope::Owner(user_id) => query.filter(
                Condition::any()
                    .add(leads::Column::AssignedTo.eq(user_id))
                    .add(leads::Column::CreatedBy.eq(user_id)),
            ),
        }
    }

    fn owns(lead: &leads::Model, scope: OwnerScope) -> bool {
        match scope {
            OwnerScope::All => true,
            OwnerScope::Owner(user_id) => {
                lead.assigned_to == user_id || lead.created_by == user_id
            }
        }
    }

    /// Lists visible leads with the total matching count.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn list(
        &self,
        scope: OwnerScope,
        filter: &LeadFilter,
        order: SortOrder,
        page: &PageRequest,
    ) -> Result<(Vec<leads::Model>, u64), DbErr> {
        let mut query = Self::scoped(scope);

        if let Some(status) = &filter.status {
            query = query.filter(leads::Column::Status.eq(status.clone()));
        }
        if let Some(source) = &filter.source {
            query = query.filter(leads::Column::Source.eq(source.clone()));
        }
        if let Some(territory) = &filter.territory {
            query = query.filter(leads::Column::Territory.eq(territory));
        }
        if let Some(search) = &filter.search {
            query = query.filter(
                Condition::any()
                    .add(contains_ci(leads::Column::FirstName, search))
                    .add(contains_ci(leads::Column::LastName, search))
                    .add(contains_ci(leads::Column::Email, search))
                    .add(contains_ci(leads::Column::Company, search)),
            );
        }

        let total = query.clone().count(&self.db).await?;

        let order = match order {
            SortOrder::Asc => Order::Asc,
            SortOrder::Desc => Order::Desc,
        };

        let items = query
            .order_by(leads::Column::CreatedAt, order)
            .offset(page.offset())
            .limit(page.limit())
            .all(&self.db)
            .await?;

        Ok((items, total))
    }

    /// Loads a lead and checks ownership explicitly.
    ///
    /// # Errors
    ///
    /// Returns `LeadError::NotFound` or `LeadError::NotOwner`.
    pub async fn find_scoped(&self, id: Uuid, scope: OwnerScope) -> Result<leads::Model, LeadError> {
        let lead = leads::Entity::find_by_id(id)
            .one(&self.db)
            .await?
            .ok_or(LeadError::NotFound(id))?;

        if !Self::owns(&lead, scope) {
            return Err(LeadError::NotOwner);
        }

        Ok(lead)
    }

    /// Creates a lead.
    ///
    /// # Errors
    ///
    /// Returns an error if the database insert fails.
    pub async fn create(&self, input: CreateLeadInput) -> Result<leads::Model, DbErr> {
        let now = Utc::now().into();
        let lead = leads::ActiveModel {
            id: Set(Uuid::new_v4()),
            first_name: Set(input.first_name),
            last_name: Set(input.last_name),
            email: Set(input.email.to_lowercase()),
            phone: Set(input.phone),
            company: Set(input.company),
            position: Set(input.position),
            status: Set(LeadStatus::New),
            lead_score: Set(0),
            source: Set(input.source),
            source_details: Set(input.source_details),
            school_district: Set(input.school_district),
            school_type: Set(input.school_type),
            student_count: Set(input.student_count),
            territory: Set(input.territory),
            address: Set(input.address),
            preferred_contact: Set(None),
            time_zone: Set(None),
            tags: Set(None),
            industry: Set(input.industry),
            estimated_value: Set(input.estimated_value),
            budget_range: Set(input.budget_range),
            expected_close_date: Set(input.expected_close_date),
            next_follow_up: Set(None),
            last_contact_date: Set(None),
            decision_maker: Set(false),
            has_budget: Set(false),
            has_need: Set(false),
            has_timeline: Set(false),
            notes: Set(input.notes),
            lost_reason: Set(None),
            converted_to_account: Set(None),
            converted_at: Set(None),
            assigned_to: Set(input.assigned_to),
            created_by: Set(input.created_by),
            updated_by: Set(None),
            is_active: Set(true),
            created_at: Set(now),
            updated_at: Set(now),
        };

        lead.insert(&self.db).await
    }

    /// Applies an allow-listed update after the ownership check.
    ///
    /// # Errors
    ///
    /// Returns `LeadError::NotFound` or `LeadError::NotOwner`.
    pub async fn update(
        &self,
        id: Uuid,
        scope: OwnerScope,
        input: UpdateLeadInput,
    ) -> Result<leads::Model, LeadError> {
        let lead = self.find_scoped(id, scope).await?;

        let mut active = lead.into_active_model();
        if let Some(first_name) = input.first_name {
            active.first_name = Set(first_name);
        }
        if let Some(last_name) = input.last_name {
            active.last_name = Set(last_name);
        }
        if let Some(email) = input.email {
            active.email = Set(email.to_lowercase());
        }
        if let Some(phone) = input.phone {
            active.phone = Set(Some(phone));
        }
        if let Some(company) = input.company {
            active.company = Set(Some(company));
        }
        if let Some(status) = input.status {
            active.status = Set(status);
        }
        if let Some(territory) = input.territory {
            active.territory = Set(Some(territory));
        }
        if let Some(estimated_value) = input.estimated_value {
            active.estimated_value = Set(Some(estimated_value));
        }
        if let Some(next_follow_up) = input.next_follow_up {
            active.next_follow_up = Set(Some(next_follow_up));
        }
        if let Some(last_contact_date) = input.last_contact_date {
            active.last_contact_date = Set(Some(last_contact_date.into()));
        }
        if let Some(decision_maker) = input.decision_maker {
            active.decision_maker = Set(decision_maker);
        }
        if let Some(has_budget) = input.has_budget {
            active.has_budget = Set(has_budget);
        }
        if let Some(has_need) = input.has_need {
            active.has_need = Set(has_need);
        }
        if let Some(has_timeline) = input.has_timeline {
            active.has_timeline = Set(has_timeline);
        }
        if let Some(notes) = input.notes {
            active.notes = Set(Some(notes));
        }
        if let Some(lost_reason) = input.lost_reason {
            active.lost_reason = Set(Some(lost_reason));
        }
        if let Some(assigned_to) = input.assigned_to {
            active.assigned_to = Set(assigned_to);
        }
        active.updated_by = Set(Some(input.updated_by));
        active.updated_at = Set(Utc::now().into());

        Ok(active.update(&self.db).await?)
    }

    /// Recomputes the lead score from the qualification flags.
    ///
    /// # Errors
    ///
    /// Returns `LeadError::NotFound` or `LeadError::NotOwner`.
    pub async fn rescore(&self, id: Uuid, scope: OwnerScope) -> Result<leads::Model, LeadError> {
        let lead = self.find_scoped(id, scope).await?;
        let now = Utc::now();

        let score = lead_score(
            &LeadQualification {
                decision_maker: lead.decision_maker,
                budget: lead.has_budget,
                need: lead.has_need,
                timeline: lead.has_timeline,
                last_contact: lead.last_contact_date.map(Into::into),
            },
            now,
        );

        let mut active = lead.into_active_model();
        active.lead_score = Set(score);
        active.updated_at = Set(now.into());

        Ok(active.update(&self.db).await?)
    }

    /// Converts a lead: creates the account (plus optional contact and
    /// deal) and stamps the lead, all in one database transaction.
    ///
    /// # Errors
    ///
    /// Returns `LeadError::AlreadyConverted` when the lead was converted
    /// before, plus the usual not-found/ownership errors.
    pub async fn convert(
        &self,
        id: Uuid,
        scope: OwnerScope,
        input: ConvertLeadInput,
    ) -> Result<ConvertedLead, LeadError> {
        let lead = self.find_scoped(id, scope).await?;

        if lead.converted_to_account.is_some() {
            return Err(LeadError::AlreadyConverted);
        }

        let now = Utc::now();
        let txn = self.db.begin().await?;

        let account_name = input
            .account_name
            .or_else(|| lead.company.clone())
            .unwrap_or_else(|| format!("{} {}", lead.first_name, lead.last_name));

        let account = accounts::ActiveModel {
            id: Set(Uuid::new_v4()),
            name: Set(account_name),
            industry: Set(lead.industry.clone()),
            website: Set(None),
            phone: Set(lead.phone.clone()),
            address: Set(lead.address.clone()),
            account_owner: Set(lead.assigned_to),
            source: Set(Some(lead.source.clone())),
            notes: Set(lead.notes.clone()),
            is_active: Set(true),
            created_by: Set(input.performed_by),
            created_at: Set(now.into()),
            updated_at: Set(now.into()),
        };
        let account = account.insert(&txn).await?;

        let contact = if input.create_contact {
            let contact = contacts::ActiveModel {
                id: Set(Uuid::new_v4()),
                account_id: Set(account.id),
                first_name: Set(lead.first_name.clone()),
                last_name: Set(lead.last_name.clone()),
                email: Set(Some(lead.email.clone())),
                phone: Set(lead.phone.clone()),
                position: Set(lead.position.clone()),
                is_primary: Set(true),
                notes: Set(None),
                is_active: Set(true),
                created_by: Set(input.performed_by),
                created_at: Set(now.into()),
                updated_at: Set(now.into()),
            };
            Some(contact.insert(&txn).await?)
        } else {
            None
        };

        let deal = if let Some(seed) = input.deal {
            let stage = DealStage::Prospecting;
            let deal = deals::ActiveModel {
                id: Set(Uuid::new_v4()),
                name: Set(seed.name),
                description: Set(None),
                value: Set(seed.value),
                currency: Set("USD".to_string()),
                probability: Set(atrium_core::crm::DealStage::Prospecting.probability()),
                stage: Set(stage),
                pipeline: Set("Default".to_string()),
                account_id: Set(account.id),
                primary_contact_id: Set(contact.as_ref().map(|c| c.id)),
                assigned_to: Set(lead.assigned_to),
                expected_close_date: Set(seed.expected_close_date),
                actual_close_date: Set(None),
                next_step: Set(None),
                next_step_date: Set(None),
                products: Set(None),
                service_type: Set(None),
                lead_source: Set(Some(lead.source.clone())),
                loss_reason: Set(None),
                competitor_won: Set(None),
                contract_type: Set(None),
                contract_length_months: Set(None),
                renewal_date: Set(None),
                tags: Set(None),
                priority: Set(Priority::Medium),
                notes: Set(None),
                is_active: Set(true),
                created_by: Set(input.performed_by),
                updated_by: Set(None),
                created_at: Set(now.into()),
                updated_at: Set(now.into()),
            };
            Some(deal.insert(&txn).await?)
        } else {
            None
        };

        // A follow-up task keeps the new deal from going quiet.
        if let Some(deal) = &deal {
            let task = crm_tasks::ActiveModel {
                id: Set(Uuid::new_v4()),
                title: Set(format!("Follow up on {}", deal.name)),
                description: Set(None),
                due_date: Set(None),
                status: Set(TaskStatus::Pending),
                priority: Set(Priority::Medium),
                related_lead_id: Set(Some(lead.id)),
                related_deal_id: Set(Some(deal.id)),
                related_account_id: Set(Some(account.id)),
                assigned_to: Set(lead.assigned_to),
                created_by: Set(input.performed_by),
                completed_at: Set(None),
                is_active: Set(true),
                created_at: Set(now.into()),
                updated_at: Set(now.into()),
            };
            task.insert(&txn).await?;
        }

        let activity = activities::ActiveModel {
            id: Set(Uuid::new_v4()),
            kind: Set(ActivityKind::Note),
            subject: Set("Lead converted".to_string()),
            detail: Set(Some(format!(
                "Converted {} {} into account {}",
                lead.first_name, lead.last_name, account.name
            ))),
            activity_date: Set(now.into()),
            duration_minutes: Set(None),
            related_lead_id: Set(Some(lead.id)),
            related_deal_id: Set(deal.as_ref().map(|d| d.id)),
            related_account_id: Set(Some(account.id)),
            related_contact_id: Set(contact.as_ref().map(|c| c.id)),
            performed_by: Set(input.performed_by),
            created_by: Set(input.performed_by),
            is_active: Set(true),
            created_at: Set(now.into()),
            updated_at: Set(now.into()),
        };
        activity.insert(&txn).await?;

        let mut active = lead.into_active_model();
        active.status = Set(LeadStatus::ClosedWon);
        active.converted_to_account = Set(Some(account.id));
        active.converted_at = Set(Some(now.into()));
        active.updated_by = Set(Some(input.performed_by));
        active.updated_at = Set(now.into());
        let lead = active.update(&txn).await?;

        txn.commit().await?;

        Ok(ConvertedLead {
            lead,
            account,
            contact,
            deal,
        })
    }

    /// Soft-deletes a lead after the ownership check.
    ///
    /// # Errors
    ///
    /// Returns `LeadError::NotFound` or `LeadError::NotOwner`.
    pub async fn soft_delete(&self, id: Uuid, scope: OwnerScope) -> Result<(), LeadError> {
        let lead = self.find_scoped(id, scope).await?;

        let mut active = lead.into_active_model();
        active.is_active = Set(false);
        active.updated_at = Set(Utc::now().into());
        active.update(&self.db).await?;
        Ok(())
    }

    /// Computes the visible-lead stats summary.
    ///
    /// # Errors
    ///
    /// Returns an error if a database query fails.
    pub async fn stats(&self, scope: OwnerScope) -> Result<LeadStats, DbErr> {
        let total = Self::scoped(scope).count(&self.db).await?;
        let converted = Self::scoped(scope)
            .filter(leads::Column::ConvertedToAccount.is_not_null())
            .count(&self.db)
            .await?;

        let conversion_rate = if total == 0 {
            Decimal::ZERO
        } else {
            (Decimal::from(converted) / Decimal::from(total) * Decimal::ONE_HUNDRED).round_dp(1)
        };

        let by_status = Self::scoped(scope)
            .select_only()
            .column(leads::Column::Status)
            .column_as(leads::Column::Id.count(), "count")
            .group_by(leads::Column::Status)
            .into_model::<StatusCount>()
            .all(&self.db)
            .await?
            .into_iter()
            .map(|row| (row.status, row.count))
            .collect();

        Ok(LeadStats {
            total,
            converted,
            conversion_rate,
            by_status,
        })
    }
}
