//! Placement repository for student employment records.

use atrium_shared::types::pagination::{PageRequest, SortOrder};
use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use sea_orm::sea_query::{Expr, Func, SimpleExpr};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, DatabaseConnection, DbErr, EntityTrait,
    FromQueryResult, IntoActiveModel, IntoSimpleExpr, Order, PaginatorTrait, QueryFilter,
    QueryOrder, QuerySelect, Select, Set,
};
use uuid::Uuid;

use super::contains_ci;
use crate::entities::{
    placement_interviews, placements,
    sea_orm_active_enums::{
        InterviewKind, InterviewOutcome, JobType, PlacementStatus, SalaryType, VerificationMethod,
    },
};

/// Error types for placement operations.
#[derive(Debug, thiserror::Error)]
pub enum PlacementError {
    /// Placement not found.
    #[error("Placement not found: {0}")]
    NotFound(Uuid),

    /// Database error.
    #[error("Database error: {0}")]
    Database(#[from] DbErr),
}

/// Filter options for listing placements.
#[derive(Debug, Clone, Default)]
pub struct PlacementFilter {
    /// Filter by student number.
    pub student_number: Option<String>,
    /// Filter by status.
    pub status: Option<PlacementStatus>,
    /// Filter by job type.
    pub job_type: Option<JobType>,
    /// Filter by verification flag.
    pub verified: Option<bool>,
    /// Inclusive start-date range start.
    pub from: Option<NaiveDate>,
    /// Inclusive start-date range end.
    pub to: Option<NaiveDate>,
    /// Case-insensitive substring search over company and title.
    pub search: Option<String>,
}

/// Allow-listed sort keys for placement lists.
#[derive(Debug, Clone, Copy, Default)]
pub enum PlacementSortKey {
    /// Sort by application date.
    #[default]
    ApplicationDate,
    /// Sort by start date.
    StartDate,
    /// Sort by company name.
    CompanyName,
    /// Sort by status.
    Status,
}

impl PlacementSortKey {
    /// Parses an allow-listed sort key; anything else falls back to the
    /// application date.
    #[must_use]
    pub fn parse(s: &str) -> Self {
        match s {
            "start_date" => Self::StartDate,
            "company_name" => Self::CompanyName,
            "status" => Self::Status,
            _ => Self::ApplicationDate,
        }
    }

    const fn column(self) -> placements::Column {
        match self {
            Self::ApplicationDate => placements::Column::ApplicationDate,
            Self::StartDate => placements::Column::StartDate,
            Self::CompanyName => placements::Column::CompanyName,
            Self::Status => placements::Column::Status,
        }
    }
}

/// Input for creating a placement.
#[derive(Debug, Clone)]
pub struct CreatePlacementInput {
    /// Student number.
    pub student_number: String,
    /// Company name.
    pub company_name: String,
    /// Company industry.
    pub company_industry: Option<String>,
    /// Company size bracket.
    pub company_size: Option<String>,
    /// Company website.
    pub company_website: Option<String>,
    /// Company address blob.
    pub company_address: Option<serde_json::Value>,
    /// Job title.
    pub job_title: String,
    /// Job type.
    pub job_type: JobType,
    /// Department.
    pub department: Option<String>,
    /// Start date.
    pub start_date: NaiveDate,
    /// End date.
    pub end_date: Option<NaiveDate>,
    /// Hours per week.
    pub hours_per_week: Option<i32>,
    /// Salary amount.
    pub salary_amount: Option<Decimal>,
    /// Salary structure.
    pub salary_type: Option<SalaryType>,
    /// Salary currency.
    pub salary_currency: Option<String>,
    /// Benefits blob.
    pub benefits: Option<serde_json::Value>,
    /// Status.
    pub status: PlacementStatus,
    /// Application date.
    pub application_date: Option<NaiveDate>,
    /// Employer contact name.
    pub contact_name: String,
    /// Employer contact title.
    pub contact_title: Option<String>,
    /// Employer contact email.
    pub contact_email: String,
    /// Employer contact phone.
    pub contact_phone: Option<String>,
    /// How the application was made.
    pub application_method: Option<String>,
    /// Resume submitted.
    pub resume_submitted: bool,
    /// Cover letter submitted.
    pub cover_letter_submitted: bool,
    /// Notes.
    pub notes: Option<String>,
    /// Creating user.
    pub created_by: Option<Uuid>,
}

/// Allow-listed update fields for a placement.
#[derive(Debug, Clone, Default)]
pub struct UpdatePlacementInput {
    /// Job title.
    pub job_title: Option<String>,
    /// Job type.
    pub job_type: Option<JobType>,
    /// Status.
    pub status: Option<PlacementStatus>,
    /// Start date.
    pub start_date: Option<NaiveDate>,
    /// End date.
    pub end_date: Option<NaiveDate>,
    /// Hours per week.
    pub hours_per_week: Option<i32>,
    /// Salary amount.
    pub salary_amount: Option<Decimal>,
    /// Salary structure.
    pub salary_type: Option<SalaryType>,
    /// Performance rating, 1-5.
    pub performance_rating: Option<i32>,
    /// Performance feedback.
    pub performance_feedback: Option<String>,
    /// Notes.
    pub notes: Option<String>,
}

/// Input for logging an interview.
#[derive(Debug, Clone)]
pub struct CreateInterviewInput {
    /// When the interview happens.
    pub interview_date: DateTime<Utc>,
    /// Format.
    pub kind: InterviewKind,
    /// Interviewer name.
    pub interviewer: Option<String>,
    /// Notes.
    pub notes: Option<String>,
    /// Outcome, defaults to Pending.
    pub outcome: Option<InterviewOutcome>,
}

/// Fields accepted by the bulk update endpoint.
#[derive(Debug, Clone, Default)]
pub struct PlacementBulkUpdate {
    /// New status.
    pub status: Option<PlacementStatus>,
    /// New verification flag.
    pub verified: Option<bool>,
}

/// Placement stats rollup.
#[derive(Debug, Clone, Default)]
pub struct PlacementStats {
    /// All active placements.
    pub total: u64,
    /// Verified employed placements.
    pub employed: u64,
    /// Employment rate in percent.
    pub employment_rate: Decimal,
    /// Average salary over employed placements that report one.
    pub average_salary: Option<Decimal>,
    /// Count per industry, descending.
    pub by_industry: Vec<(String, i64)>,
}

#[derive(Debug, FromQueryResult)]
struct IndustryCount {
    bucket: Option<String>,
    count: i64,
}

#[derive(Debug, FromQueryResult)]
struct SalaryAvg {
    average: Option<Decimal>,
}

/// Placement repository.
#[derive(Debug, Clone)]
pub struct PlacementRepository {
    db: DatabaseConnection,
}

impl PlacementRepository {
    /// Creates a new placement repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    fn filtered(filter: &PlacementFilter) -> Select<placements::Entity> {
        let mut query = placements::Entity::find().filter(placements::Column::IsActive.eq(true));

        if let Some(student_number) = &filter.student_number {
            query = query.filter(placements::Column::StudentNumber.eq(student_number));
        }
        if let Some(status) = &filter.status {
            query = query.filter(placements::Column::Status.eq(status.clone()));
        }
        if let Some(job_type) = &filter.job_type {
            query = query.filter(placements::Column::JobType.eq(job_type.clone()));
        }
        if let Some(verified) = filter.verified {
            query = query.filter(placements::Column::Verified.eq(verified));
        }
        if let Some(from) = filter.from {
            query = query.filter(placements::Column::StartDate.gte(from));
        }
        if let Some(to) = filter.to {
            query = query.filter(placements::Column::StartDate.lte(to));
        }
        if let Some(search) = &filter.search {
            query = query.filter(
                Condition::any()
                    .add(contains_ci(placements::Column::CompanyName, search))
                    .add(contains_ci(placements::Column::JobTitle, search))
                    .add(contains_ci(placements::Column::StudentNumber, search)),
            );
        }

        query
    }

    /// Lists placements with the total matching count.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn list(
        &self,
        filter: &PlacementFilter,
        sort: PlacementSortKey,
        order: SortOrder,
        page: &PageRequest,
    ) -> Result<(Vec<placements::Model>, u64), DbErr> {
        let query = Self::filtered(filter);
        let total = query.clone().count(&self.db).await?;

        let order = match order {
            SortOrder::Asc => Order::Asc,
            SortOrder::Desc => Order::Desc,
        };

        let items = query
            .order_by(sort.column(), order)
            .offset(page.offset())
            .limit(page.limit())
            .all(&self.db)
            .await?;

        Ok((items, total))
    }

    /// Fetches all placements matching the filter, for export.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn export(&self, filter: &PlacementFilter) -> Result<Vec<placements::Model>, DbErr> {
        Self::filtered(filter)
            .order_by_desc(placements::Column::ApplicationDate)
            .all(&self.db)
            .await
    }

    /// Finds a placement by ID.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<placements::Model>, DbErr> {
        placements::Entity::find_by_id(id).one(&self.db).await
    }

    /// Creates a placement.
    ///
    /// # Errors
    ///
    /// Returns an error if the database insert fails.
    pub async fn create(&self, input: CreatePlacementInput) -> Result<placements::Model, DbErr> {
        let now = Utc::now();
        let placement = placements::ActiveModel {
            id: Set(Uuid::new_v4()),
            student_number: Set(input.student_number),
            company_name: Set(input.company_name),
            company_industry: Set(input.company_industry),
            company_size: Set(input.company_size),
            company_website: Set(input.company_website),
            company_address: Set(input.company_address),
            job_title: Set(input.job_title),
            job_type: Set(input.job_type),
            department: Set(input.department),
            start_date: Set(input.start_date),
            end_date: Set(input.end_date),
            hours_per_week: Set(input.hours_per_week),
            salary_amount: Set(input.salary_amount),
            salary_type: Set(input.salary_type),
            salary_currency: Set(input.salary_currency.unwrap_or_else(|| "USD".to_string())),
            benefits: Set(input.benefits),
            status: Set(input.status),
            application_date: Set(input.application_date.unwrap_or_else(|| now.date_naive())),
            contact_name: Set(input.contact_name),
            contact_title: Set(input.contact_title),
            contact_email: Set(input.contact_email.to_lowercase()),
            contact_phone: Set(input.contact_phone),
            application_method: Set(input.application_method),
            resume_submitted: Set(input.resume_submitted),
            cover_letter_submitted: Set(input.cover_letter_submitted),
            verified: Set(false),
            verification_date: Set(None),
            verification_method: Set(None),
            verification_source: Set(None),
            performance_rating: Set(None),
            performance_feedback: Set(None),
            notes: Set(input.notes),
            documents: Set(None),
            is_active: Set(true),
            created_by: Set(input.created_by),
            created_at: Set(now.into()),
            updated_at: Set(now.into()),
        };

        placement.insert(&self.db).await
    }

    /// Applies an allow-listed update.
    ///
    /// # Errors
    ///
    /// Returns `PlacementError::NotFound` when the id does not exist.
    pub async fn update(
        &self,
        id: Uuid,
        input: UpdatePlacementInput,
    ) -> Result<placements::Model, PlacementError> {
        let placement = self
            .find_by_id(id)
            .await?
            .ok_or(PlacementError::NotFound(id))?;

        let mut active = placement.into_active_model();
        if let Some(job_title) = input.job_title {
            active.job_title = Set(job_title);
        }
        if let Some(job_type) = input.job_type {
            active.job_type = Set(job_type);
        }
        if let Some(status) = input.status {
            active.status = Set(status);
        }
        if let Some(start_date) = input.start_date {
            active.start_date = Set(start_date);
        }
        if let Some(end_date) = input.end_date {
            active.end_date = Set(Some(end_date));
        }
        if let Some(hours_per_week) = input.hours_per_week {
            active.hours_per_week = Set(Some(hours_per_week));
        }
        if let Some(salary_amount) = input.salary_amount {
            active.salary_amount = Set(Some(salary_amount));
        }
        if let Some(salary_type) = input.salary_type {
            active.salary_type = Set(Some(salary_type));
        }
        if let Some(rating) = input.performance_rating {
            active.performance_rating = Set(Some(rating.clamp(1, 5)));
        }
        if let Some(feedback) = input.performance_feedback {
            active.performance_feedback = Set(Some(feedback));
        }
        if let Some(notes) = input.notes {
            active.notes = Set(Some(notes));
        }
        active.updated_at = Set(Utc::now().into());

        Ok(active.update(&self.db).await?)
    }

    /// Soft-deletes a placement.
    ///
    /// # Errors
    ///
    /// Returns `PlacementError::NotFound` when the id does not exist.
    pub async fn soft_delete(&self, id: Uuid) -> Result<(), PlacementError> {
        let placement = self
            .find_by_id(id)
            .await?
            .ok_or(PlacementError::NotFound(id))?;

        let mut active = placement.into_active_model();
        active.is_active = Set(false);
        active.updated_at = Set(Utc::now().into());
        active.update(&self.db).await?;
        Ok(())
    }

    /// Lists verified, employed placements.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn employed(&self) -> Result<Vec<placements::Model>, DbErr> {
        placements::Entity::find()
            .filter(placements::Column::IsActive.eq(true))
            .filter(placements::Column::Status.eq(PlacementStatus::Employed))
            .filter(placements::Column::Verified.eq(true))
            .order_by_desc(placements::Column::StartDate)
            .all(&self.db)
            .await
    }

    /// Lists applications still in flight (Applied or Interviewing).
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn pending(&self) -> Result<Vec<placements::Model>, DbErr> {
        placements::Entity::find()
            .filter(placements::Column::IsActive.eq(true))
            .filter(
                placements::Column::Status
                    .is_in([PlacementStatus::Applied, PlacementStatus::Interviewing]),
            )
            .order_by_desc(placements::Column::ApplicationDate)
            .all(&self.db)
            .await
    }

    /// Verifies a placement, stamping the verification date.
    ///
    /// # Errors
    ///
    /// Returns `PlacementError::NotFound` when the id does not exist.
    pub async fn verify(
        &self,
        id: Uuid,
        method: VerificationMethod,
        source: Option<String>,
    ) -> Result<placements::Model, PlacementError> {
        let placement = self
            .find_by_id(id)
            .await?
            .ok_or(PlacementError::NotFound(id))?;
        let now = Utc::now();

        let mut active = placement.into_active_model();
        active.verified = Set(true);
        active.verification_date = Set(Some(now.into()));
        active.verification_method = Set(Some(method));
        active.verification_source = Set(source);
        active.updated_at = Set(now.into());

        Ok(active.update(&self.db).await?)
    }

    /// Logs an interview against a placement.
    ///
    /// # Errors
    ///
    /// Returns `PlacementError::NotFound` when the id does not exist.
    pub async fn add_interview(
        &self,
        id: Uuid,
        input: CreateInterviewInput,
    ) -> Result<placement_interviews::Model, PlacementError> {
        self.find_by_id(id)
            .await?
            .ok_or(PlacementError::NotFound(id))?;

        let interview = placement_interviews::ActiveModel {
            id: Set(Uuid::new_v4()),
            placement_id: Set(id),
            interview_date: Set(input.interview_date.into()),
            kind: Set(input.kind),
            interviewer: Set(input.interviewer),
            notes: Set(input.notes),
            outcome: Set(input.outcome.unwrap_or(InterviewOutcome::Pending)),
            created_at: Set(Utc::now().into()),
        };

        Ok(interview.insert(&self.db).await?)
    }

    /// Lists the interviews for a placement, oldest first.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn interviews(
        &self,
        placement_id: Uuid,
    ) -> Result<Vec<placement_interviews::Model>, DbErr> {
        placement_interviews::Entity::find()
            .filter(placement_interviews::Column::PlacementId.eq(placement_id))
            .order_by_asc(placement_interviews::Column::InterviewDate)
            .all(&self.db)
            .await
    }

    /// Computes the placement stats rollup.
    ///
    /// # Errors
    ///
    /// Returns an error if a database query fails.
    pub async fn stats(&self) -> Result<PlacementStats, DbErr> {
        let active = placements::Entity::find().filter(placements::Column::IsActive.eq(true));

        let total = active.clone().count(&self.db).await?;
        let employed = active
            .clone()
            .filter(placements::Column::Status.eq(PlacementStatus::Employed))
            .filter(placements::Column::Verified.eq(true))
            .count(&self.db)
            .await?;

        let employment_rate = if total == 0 {
            Decimal::ZERO
        } else {
            (Decimal::from(employed) / Decimal::from(total) * Decimal::ONE_HUNDRED).round_dp(1)
        };

        let average_salary = placements::Entity::find()
            .select_only()
            .column_as(
                SimpleExpr::from(Func::avg(placements::Column::SalaryAmount.into_simple_expr())),
                "average",
            )
            .filter(placements::Column::IsActive.eq(true))
            .filter(placements::Column::Status.eq(PlacementStatus::Employed))
            .filter(placements::Column::SalaryAmount.is_not_null())
            .into_model::<SalaryAvg>()
            .one(&self.db)
            .await?
            .and_then(|row| row.average.map(|avg| avg.round_dp(2)));

        let by_industry = placements::Entity::find()
            .select_only()
            .column_as(placements::Column::CompanyIndustry, "bucket")
            .column_as(placements::Column::Id.count(), "count")
            .filter(placements::Column::IsActive.eq(true))
            .group_by(placements::Column::CompanyIndustry)
            .order_by_desc(Expr::col(sea_orm::sea_query::Alias::new("count")))
            .into_model::<IndustryCount>()
            .all(&self.db)
            .await?
            .into_iter()
            .map(|row| (row.bucket.unwrap_or_else(|| "Unknown".to_string()), row.count))
            .collect();

        Ok(PlacementStats {
            total,
            employed,
            employment_rate,
            average_salary,
            by_industry,
        })
    }

    /// Applies a bulk update to the given ids, returning
    /// `(matched_count, modified_count)`.
    ///
    /// # Errors
    ///
    /// Returns an error if a database query fails.
    pub async fn bulk_update(
        &self,
        ids: &[Uuid],
        updates: PlacementBulkUpdate,
    ) -> Result<(u64, u64), DbErr> {
        let matched = placements::Entity::find()
            .filter(placements::Column::Id.is_in(ids.to_vec()))
            .count(&self.db)
            .await?;

        let mut update = placements::Entity::update_many()
            .filter(placements::Column::Id.is_in(ids.to_vec()))
            .col_expr(placements::Column::UpdatedAt, Expr::value(Utc::now()));

        if let Some(status) = updates.status {
            update = update.col_expr(placements::Column::Status, Expr::value(status));
        }
        if let Some(verified) = updates.verified {
            update = update.col_expr(placements::Column::Verified, Expr::value(verified));
        }

        let result = update.exec(&self.db).await?;
        Ok((matched, result.rows_affected))
    }
}
