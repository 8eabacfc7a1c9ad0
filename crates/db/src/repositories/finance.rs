//! Finance record repository.
//!
//! Reference numbers come from the monthly sequence; the old
//! count-then-insert allocation is gone.

use atrium_shared::types::pagination::{PageRequest, SortOrder};
use chrono::{NaiveDate, Utc};
use rust_decimal::Decimal;
use sea_orm::sea_query::Expr;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, DatabaseConnection, DbErr, EntityTrait,
    FromQueryResult, IntoActiveModel, Order, PaginatorTrait, QueryFilter, QueryOrder, QuerySelect,
    Select, Set,
};
use uuid::Uuid;

use atrium_core::finance::{OpenItem, finance_reference, finance_sequence_scope, outstanding_balance};

use super::{SequenceRepository, contains_ci};
use crate::entities::{
    finance_records,
    sea_orm_active_enums::{
        FinanceCategory, FinanceStatus, FinanceType, FundingSource, PaymentMethod,
    },
};

/// Error types for finance operations.
#[derive(Debug, thiserror::Error)]
pub enum FinanceError {
    /// Record not found.
    #[error("Finance record not found: {0}")]
    NotFound(Uuid),

    /// Database error.
    #[error("Database error: {0}")]
    Database(#[from] DbErr),
}

/// Filter options for listing finance records.
#[derive(Debug, Clone, Default)]
pub struct FinanceFilter {
    /// Filter by student number.
    pub student_number: Option<String>,
    /// Filter by record type.
    pub record_type: Option<FinanceType>,
    /// Filter by category.
    pub category: Option<FinanceCategory>,
    /// Filter by status.
    pub status: Option<FinanceStatus>,
    /// Filter by term.
    pub term: Option<String>,
    /// Inclusive date range start.
    pub from: Option<NaiveDate>,
    /// Inclusive date range end.
    pub to: Option<NaiveDate>,
    /// Inclusive minimum amount.
    pub min_amount: Option<Decimal>,
    /// Inclusive maximum amount.
    pub max_amount: Option<Decimal>,
    /// Case-insensitive substring search over reference and description.
    pub search: Option<String>,
}

/// Allow-listed sort keys for finance lists.
#[derive(Debug, Clone, Copy, Default)]
pub enum FinanceSortKey {
    /// Sort by record date.
    #[default]
    RecordDate,
    /// Sort by amount.
    Amount,
    /// Sort by status.
    Status,
    /// Sort by reference number.
    ReferenceNumber,
}

impl FinanceSortKey {
    /// Parses an allow-listed sort key; anything else falls back to date.
    #[must_use]
    pub fn parse(s: &str) -> Self {
        match s {
            "amount" => Self::Amount,
            "status" => Self::Status,
            "reference_number" => Self::ReferenceNumber,
            _ => Self::RecordDate,
        }
    }

    const fn column(self) -> finance_records::Column {
        match self {
            Self::RecordDate => finance_records::Column::RecordDate,
            Self::Amount => finance_records::Column::Amount,
            Self::Status => finance_records::Column::Status,
            Self::ReferenceNumber => finance_records::Column::ReferenceNumber,
        }
    }
}

/// Input for creating a finance record.
#[derive(Debug, Clone)]
pub struct CreateFinanceRecordInput {
    /// Student number.
    pub student_number: String,
    /// Record type.
    pub record_type: FinanceType,
    /// Category.
    pub category: FinanceCategory,
    /// Amount, non-negative.
    pub amount: Decimal,
    /// Record date.
    pub record_date: NaiveDate,
    /// Due date.
    pub due_date: Option<NaiveDate>,
    /// Term.
    pub term: String,
    /// Session.
    pub session: String,
    /// Funding source.
    pub funding_source: Option<FundingSource>,
    /// Status.
    pub status: FinanceStatus,
    /// Payment method.
    pub payment_method: Option<PaymentMethod>,
    /// Check number.
    pub check_number: Option<String>,
    /// External processor transaction id.
    pub external_transaction_id: Option<String>,
    /// Description.
    pub description: String,
    /// Notes.
    pub notes: Option<String>,
    /// Recurring flag.
    pub is_recurring: bool,
    /// Recurrence frequency.
    pub recurring_frequency: Option<String>,
}

/// Allow-listed update fields for a finance record.
#[derive(Debug, Clone, Default)]
pub struct UpdateFinanceRecordInput {
    /// Amount.
    pub amount: Option<Decimal>,
    /// Due date.
    pub due_date: Option<NaiveDate>,
    /// Status.
    pub status: Option<FinanceStatus>,
    /// Payment method.
    pub payment_method: Option<PaymentMethod>,
    /// Description.
    pub description: Option<String>,
    /// Notes.
    pub notes: Option<String>,
    /// Processing user.
    pub processed_by: Option<Uuid>,
}

/// Fields accepted by the bulk update endpoint.
#[derive(Debug, Clone, Default)]
pub struct FinanceBulkUpdate {
    /// New status.
    pub status: Option<FinanceStatus>,
    /// New category.
    pub category: Option<FinanceCategory>,
}

/// One bucket of the finance stats rollup.
#[derive(Debug, Clone, FromQueryResult)]
pub struct FinanceTypeTotal {
    /// Record type.
    pub record_type: FinanceType,
    /// Total amount for this type.
    pub total: Option<Decimal>,
    /// Record count for this type.
    pub count: i64,
}

/// Finance stats rollup.
#[derive(Debug, Clone, Default)]
pub struct FinanceStats {
    /// Sum of all non-payment amounts (billed).
    pub total_charges: Decimal,
    /// Sum of payment amounts (collected).
    pub total_payments: Decimal,
    /// Open (pending + overdue) amount.
    pub outstanding: Decimal,
    /// Totals grouped by record type.
    pub by_type: Vec<(FinanceType, Decimal, i64)>,
    /// Totals grouped by status.
    pub by_status: Vec<(FinanceStatus, Decimal, i64)>,
}

#[derive(Debug, FromQueryResult)]
struct StatusTotal {
    status: FinanceStatus,
    total: Option<Decimal>,
    count: i64,
}

/// Finance record repository.
#[derive(Debug, Clone)]
pub struct FinanceRepository {
    db: DatabaseConnection,
}

impl FinanceRepository {
    /// Creates a new finance repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    fn filtered(filter: &FinanceFilter) -> Select<finance_records::Entity> {
        let mut query =
            finance_records::Entity::find().filter(finance_records::Column::IsActive.eq(true));

        if let Some(student_number) = &filter.student_number {
            query = query.filter(finance_records::Column::StudentNumber.eq(student_number));
        }
        if let Some(record_type) = &filter.record_type {
            query = query.filter(finance_records::Column::RecordType.eq(record_type.clone()));
        }
        if let Some(category) = &filter.category {
            query = query.filter(finance_records::Column::Category.eq(category.clone()));
        }
        if let Some(status) = &filter.status {
            query = query.filter(finance_records::Column::Status.eq(status.clone()));
        }
        if let Some(term) = &filter.term {
            query = query.filter(finance_records::Column::Term.eq(term));
        }
        if let Some(from) = filter.from {
            query = query.filter(finance_records::Column::RecordDate.gte(from));
        }
        if let Some(to) = filter.to {
            query = query.filter(finance_records::Column::RecordDate.lte(to));
        }
        if let Some(min) = filter.min_amount {
            query = query.filter(finance_records::Column::Amount.gte(min));
        }
        if let Some(max) = filter.max_amount {
            query = query.filter(finance_records::Column::Amount.lte(max));
        }
        if let Some(search) = &filter.search {
            query = query.filter(
                Condition::any()
                    .add(contains_ci(finance_records::Column::ReferenceNumber, search))
                    .add(contains_ci(finance_records::Column::Description, search))
                    .add(contains_ci(finance_records::Column::StudentNumber, search)),
            );
        }

        query
    }

    /// Lists finance records with the total matching count.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn list(
        &self,
        filter: &FinanceFilter,
        sort: FinanceSortKey,
        order: SortOrder,
        page: &PageRequest,
    ) -> Result<(Vec<finance_records::Model>, u64), DbErr> {
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

    /// Fetches all records matching the filter, for export.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn export(
        &self,
        filter: &FinanceFilter,
    ) -> Result<Vec<finance_records::Model>, DbErr> {
        Self::filtered(filter)
            .order_by_desc(finance_records::Column::RecordDate)
            .all(&self.db)
            .await
    }

    /// Finds a record by ID.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<finance_records::Model>, DbErr> {
        finance_records::Entity::find_by_id(id).one(&self.db).await
    }

    /// Creates a finance record, allocating the `FIN` reference from the
    /// monthly sequence.
    ///
    /// # Errors
    ///
    /// Returns an error if the allocation or insert fails.
    pub async fn create(
        &self,
        input: CreateFinanceRecordInput,
    ) -> Result<finance_records::Model, DbErr> {
        let seq = SequenceRepository::new(self.db.clone())
            .next_value(&finance_sequence_scope(input.record_date))
            .await?;
        let reference = finance_reference(input.record_date, seq);

        let now = Utc::now();
        let paid_date = (input.status == FinanceStatus::Paid).then(|| now.date_naive());

        let record = finance_records::ActiveModel {
            id: Set(Uuid::new_v4()),
            student_number: Set(input.student_number),
            record_type: Set(input.record_type),
            category: Set(input.category),
            amount: Set(input.amount),
            original_amount: Set(Some(input.amount)),
            record_date: Set(input.record_date),
            due_date: Set(input.due_date),
            paid_date: Set(paid_date),
            term: Set(input.term),
            session: Set(input.session),
            funding_source: Set(input.funding_source),
            status: Set(input.status),
            payment_method: Set(input.payment_method),
            reference_number: Set(reference),
            check_number: Set(input.check_number),
            external_transaction_id: Set(input.external_transaction_id),
            description: Set(input.description),
            notes: Set(input.notes),
            approved_by: Set(None),
            approved_at: Set(None),
            processed_by: Set(None),
            processed_at: Set(None),
            attachments: Set(None),
            is_active: Set(true),
            is_recurring: Set(input.is_recurring),
            recurring_frequency: Set(input.recurring_frequency),
            created_at: Set(now.into()),
            updated_at: Set(now.into()),
        };

        record.insert(&self.db).await
    }

    /// Applies an allow-listed update, stamping `paid_date` the first time
    /// the status becomes Paid.
    ///
    /// # Errors
    ///
    /// Returns `FinanceError::NotFound` when the id does not exist.
    pub async fn update(
        &self,
        id: Uuid,
        input: UpdateFinanceRecordInput,
    ) -> Result<finance_records::Model, FinanceError> {
        let record = self.find_by_id(id).await?.ok_or(FinanceError::NotFound(id))?;
        let now = Utc::now();
        let had_paid_date = record.paid_date.is_some();

        let mut active = record.into_active_model();
        if let Some(amount) = input.amount {
            active.amount = Set(amount);
        }
        if let Some(due_date) = input.due_date {
            active.due_date = Set(Some(due_date));
        }
        if let Some(status) = input.status {
            if status == FinanceStatus::Paid && !had_paid_date {
                active.paid_date = Set(Some(now.date_naive()));
            }
            active.status = Set(status);
        }
        if let Some(payment_method) = input.payment_method {
            active.payment_method = Set(Some(payment_method));
        }
        if let Some(description) = input.description {
            active.description = Set(description);
        }
        if let Some(notes) = input.notes {
            active.notes = Set(Some(notes));
        }
        if let Some(processed_by) = input.processed_by {
            active.processed_by = Set(Some(processed_by));
            active.processed_at = Set(Some(now.into()));
        }
        active.updated_at = Set(now.into());

        Ok(active.update(&self.db).await?)
    }

    /// Soft-deletes a record.
    ///
    /// # Errors
    ///
    /// Returns `FinanceError::NotFound` when the id does not exist.
    pub async fn soft_delete(&self, id: Uuid) -> Result<(), FinanceError> {
        let record = self.find_by_id(id).await?.ok_or(FinanceError::NotFound(id))?;

        let mut active = record.into_active_model();
        active.is_active = Set(false);
        active.updated_at = Set(Utc::now().into());
        active.update(&self.db).await?;
        Ok(())
    }

    /// Computes a student's outstanding balance over open records.
    /// Payments subtract; everything else adds.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn student_balance(&self, student_number: &str) -> Result<Decimal, DbErr> {
        let open = finance_records::Entity::find()
            .filter(finance_records::Column::StudentNumber.eq(student_number))
            .filter(finance_records::Column::IsActive.eq(true))
            .filter(
                finance_records::Column::Status
                    .is_in([FinanceStatus::Pending, FinanceStatus::Overdue]),
            )
            .all(&self.db)
            .await?;

        Ok(outstanding_balance(open.into_iter().map(|record| OpenItem {
            amount: record.amount,
            is_payment: record.record_type == FinanceType::Payment,
        })))
    }

    /// Lists pending records past their due date.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn overdue(&self) -> Result<Vec<finance_records::Model>, DbErr> {
        finance_records::Entity::find()
            .filter(finance_records::Column::IsActive.eq(true))
            .filter(finance_records::Column::Status.eq(FinanceStatus::Pending))
            .filter(finance_records::Column::DueDate.lt(Utc::now().date_naive()))
            .order_by_asc(finance_records::Column::DueDate)
            .all(&self.db)
            .await
    }

    /// Computes the finance stats rollup over an optional date range.
    ///
    /// # Errors
    ///
    /// Returns an error if a database query fails.
    pub async fn stats(
        &self,
        from: Option<NaiveDate>,
        to: Option<NaiveDate>,
    ) -> Result<FinanceStats, DbErr> {
        let ranged = |mut query: Select<finance_records::Entity>| {
            query = query.filter(finance_records::Column::IsActive.eq(true));
            if let Some(from) = from {
                query = query.filter(finance_records::Column::RecordDate.gte(from));
            }
            if let Some(to) = to {
                query = query.filter(finance_records::Column::RecordDate.lte(to));
            }
            query
        };

        let by_type: Vec<FinanceTypeTotal> = ranged(finance_records::Entity::find())
            .select_only()
            .column(finance_records::Column::RecordType)
            .column_as(finance_records::Column::Amount.sum(), "total")
            .column_as(finance_records::Column::Id.count(), "count")
            .group_by(finance_records::Column::RecordType)
            .into_model::<FinanceTypeTotal>()
            .all(&self.db)
            .await?;

        let by_status: Vec<StatusTotal> = ranged(finance_records::Entity::find())
            .select_only()
            .column(finance_records::Column::Status)
            .column_as(finance_records::Column::Amount.sum(), "total")
            .column_as(finance_records::Column::Id.count(), "count")
            .group_by(finance_records::Column::Status)
            .into_model::<StatusTotal>()
            .all(&self.db)
            .await?;

        let mut total_charges = Decimal::ZERO;
        let mut total_payments = Decimal::ZERO;
        for bucket in &by_type {
            let amount = bucket.total.unwrap_or(Decimal::ZERO);
            if bucket.record_type == FinanceType::Payment {
                total_payments += amount;
            } else {
                total_charges += amount;
            }
        }

        let outstanding = by_status
            .iter()
            .filter(|bucket| {
                matches!(bucket.status, FinanceStatus::Pending | FinanceStatus::Overdue)
            })
            .map(|bucket| bucket.total.unwrap_or(Decimal::ZERO))
            .sum();

        Ok(FinanceStats {
            total_charges,
            total_payments,
            outstanding,
            by_type: by_type
                .into_iter()
                .map(|bucket| {
                    (
                        bucket.record_type,
                        bucket.total.unwrap_or(Decimal::ZERO),
                        bucket.count,
                    )
                })
                .collect(),
            by_status: by_status
                .into_iter()
                .map(|bucket| {
                    (
                        bucket.status,
                        bucket.total.unwrap_or(Decimal::ZERO),
                        bucket.count,
                    )
                })
                .collect(),
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
        updates: FinanceBulkUpdate,
    ) -> Result<(u64, u64), DbErr> {
        let matched = finance_records::Entity::find()
            .filter(finance_records::Column::Id.is_in(ids.to_vec()))
            .count(&self.db)
            .await?;

        let mut update = finance_records::Entity::update_many()
            .filter(finance_records::Column::Id.is_in(ids.to_vec()))
            .col_expr(finance_records::Column::UpdatedAt, Expr::value(Utc::now()));

        if let Some(status) = updates.status {
            update = update.col_expr(finance_records::Column::Status, Expr::value(status));
        }
        if let Some(category) = updates.category {
            update = update.col_expr(finance_records::Column::Category, Expr::value(category));
        }

        let result = update.exec(&self.db).await?;
        Ok((matched, result.rows_affected))
    }
}
