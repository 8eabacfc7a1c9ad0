//! Accounting transaction repository.
//!
//! Creation allocates the day-scoped `TXN` reference from the atomic
//! sequence and writes the first audit-trail row inside the same database
//! transaction.

use atrium_shared::types::pagination::{PageRequest, SortOrder};
use chrono::{NaiveDate, Utc};
use rust_decimal::Decimal;
use sea_orm::sea_query::Expr;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, ConnectionTrait, DatabaseConnection, DbErr,
    EntityTrait, FromQueryResult, IntoActiveModel, Order, PaginatorTrait, QueryFilter, QueryOrder,
    QuerySelect, Select, Set, Statement, TransactionTrait,
};
use uuid::Uuid;

use atrium_core::finance::{
    AccountCategory as CoreCategory, LedgerTotals, accounting_reference,
    accounting_sequence_scope, ledger_balance,
};

use super::contains_ci;
use crate::entities::{
    accounting_transactions,
    sea_orm_active_enums::{AccountCategory, AuditAction, PaymentMethod, TxnStatus, TxnType},
    transaction_audit_logs,
};

/// Error types for accounting operations.
#[derive(Debug, thiserror::Error)]
pub enum AccountingError {
    /// Transaction not found.
    #[error("Transaction not found: {0}")]
    NotFound(Uuid),

    /// Database error.
    #[error("Database error: {0}")]
    Database(#[from] DbErr),
}

/// Filter options for listing transactions.
#[derive(Debug, Clone, Default)]
pub struct TransactionFilter {
    /// Filter by student number.
    pub student_number: Option<String>,
    /// Filter by transaction type.
    pub txn_type: Option<TxnType>,
    /// Filter by status.
    pub status: Option<TxnStatus>,
    /// Filter by ledger code.
    pub ledger_code: Option<String>,
    /// Filter by account category.
    pub account_category: Option<AccountCategory>,
    /// Filter by reconciliation flag.
    pub reconciled: Option<bool>,
    /// Inclusive date range start.
    pub from: Option<NaiveDate>,
    /// Inclusive date range end.
    pub to: Option<NaiveDate>,
    /// Case-insensitive substring search over reference and description.
    pub search: Option<String>,
}

/// Allow-listed sort keys for transaction lists.
#[derive(Debug, Clone, Copy, Default)]
pub enum TransactionSortKey {
    /// Sort by transaction date.
    #[default]
    TransactionDate,
    /// Sort by amount.
    Amount,
    /// Sort by reference number.
    ReferenceNumber,
    /// Sort by status.
    Status,
}

impl TransactionSortKey {
    /// Parses an allow-listed sort key; anything else falls back to date.
    #[must_use]
    pub fn parse(s: &str) -> Self {
        match s {
            "amount" => Self::Amount,
            "reference_number" => Self::ReferenceNumber,
            "status" => Self::Status,
            _ => Self::TransactionDate,
        }
    }

    const fn column(self) -> accounting_transactions::Column {
        match self {
            Self::TransactionDate => accounting_transactions::Column::TransactionDate,
            Self::Amount => accounting_transactions::Column::Amount,
            Self::ReferenceNumber => accounting_transactions::Column::ReferenceNumber,
            Self::Status => accounting_transactions::Column::Status,
        }
    }
}

/// Input for creating a transaction.
#[derive(Debug, Clone)]
pub struct CreateTransactionInput {
    /// Student number.
    pub student_number: String,
    /// Transaction type.
    pub txn_type: TxnType,
    /// Amount, non-negative.
    pub amount: Decimal,
    /// Payment method.
    pub method: PaymentMethod,
    /// Ledger code.
    pub ledger_code: String,
    /// Account category.
    pub account_category: AccountCategory,
    /// Sub-category.
    pub sub_category: Option<String>,
    /// Status.
    pub status: TxnStatus,
    /// Transaction date.
    pub transaction_date: NaiveDate,
    /// Due date.
    pub due_date: Option<NaiveDate>,
    /// Term.
    pub term: Option<String>,
    /// Session.
    pub session: Option<String>,
    /// Academic year.
    pub academic_year: Option<String>,
    /// Payment reference.
    pub payment_reference: Option<String>,
    /// Check number.
    pub check_number: Option<String>,
    /// Last four card digits.
    pub card_last_four: Option<String>,
    /// Description.
    pub description: String,
    /// Notes.
    pub notes: Option<String>,
    /// Internal notes.
    pub internal_notes: Option<String>,
    /// Creating user.
    pub created_by: Uuid,
}

/// Allow-listed update fields for a transaction.
#[derive(Debug, Clone, Default)]
pub struct UpdateTransactionInput {
    /// Amount.
    pub amount: Option<Decimal>,
    /// Status.
    pub status: Option<TxnStatus>,
    /// Payment method.
    pub method: Option<PaymentMethod>,
    /// Due date.
    pub due_date: Option<NaiveDate>,
    /// Description.
    pub description: Option<String>,
    /// Notes.
    pub notes: Option<String>,
    /// Internal notes.
    pub internal_notes: Option<String>,
    /// User applying the update, recorded on the audit trail.
    pub updated_by: Uuid,
}

/// Fields accepted by the bulk update endpoint.
#[derive(Debug, Clone, Default)]
pub struct TransactionBulkUpdate {
    /// New status.
    pub status: Option<TxnStatus>,
    /// New reconciliation flag.
    pub reconciled: Option<bool>,
}

/// Ledger balance summary for one code.
#[derive(Debug, Clone)]
pub struct LedgerBalance {
    /// Ledger code.
    pub ledger_code: String,
    /// Total over debit-normal categories.
    pub total_debits: Decimal,
    /// Total over credit-normal categories.
    pub total_credits: Decimal,
    /// Net balance for the given category.
    pub balance: Decimal,
}

/// Accounting stats rollup.
#[derive(Debug, Clone, Default)]
pub struct AccountingStats {
    /// All active transactions.
    pub total_count: u64,
    /// Total transacted amount.
    pub total_amount: Decimal,
    /// Pending count.
    pub pending_count: u64,
    /// Reconciled count.
    pub reconciled_count: u64,
    /// Totals grouped by type.
    pub by_type: Vec<(TxnType, Decimal, i64)>,
    /// Totals grouped by status.
    pub by_status: Vec<(TxnStatus, Decimal, i64)>,
}

#[derive(Debug, FromQueryResult)]
struct TypeTotal {
    txn_type: TxnType,
    total: Option<Decimal>,
    count: i64,
}

#[derive(Debug, FromQueryResult)]
struct StatusTotal {
    status: TxnStatus,
    total: Option<Decimal>,
    count: i64,
}

#[derive(Debug, FromQueryResult)]
struct CategoryTotal {
    account_category: AccountCategory,
    total: Option<Decimal>,
}

/// Accounting transaction repository.
#[derive(Debug, Clone)]
pub struct AccountingRepository {
    db: DatabaseConnection,
}

impl AccountingRepository {
    /// Creates a new accounting repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    fn filtered(filter: &TransactionFilter) -> Select<accounting_transactions::Entity> {
        let mut query = accounting_transactions::Entity::find()
            .filter(accounting_transactions::Column::IsActive.eq(true));

        if let Some(student_number) = &filter.student_number {
            query =
                query.filter(accounting_transactions::Column::StudentNumber.eq(student_number));
        }
        if let Some(txn_type) = &filter.txn_type {
            query = query.filter(accounting_transactions::Column::TxnType.eq(txn_type.clone()));
        }
        if let Some(status) = &filter.status {
            query = query.filter(accounting_transactions::Column::Status.eq(status.clone()));
        }
        if let Some(ledger_code) = &filter.ledger_code {
            query = query.filter(accounting_transactions::Column::LedgerCode.eq(ledger_code));
        }
        if let Some(category) = &filter.account_category {
            query = query
                .filter(accounting_transactions::Column::AccountCategory.eq(category.clone()));
        }
        if let Some(reconciled) = filter.reconciled {
            query = query.filter(accounting_transactions::Column::Reconciled.eq(reconciled));
        }
        if let Some(from) = filter.from {
            query = query.filter(accounting_transactions::Column::TransactionDate.gte(from));
        }
        if let Some(to) = filter.to {
            query = query.filter(accounting_transactions::Column::TransactionDate.lte(to));
        }
        if let Some(search) = &filter.search {
            query = query.filter(
                Condition::any()
                    .add(contains_ci(
                        accounting_transactions::Column::ReferenceNumber,
                        search,
                    ))
                    .add(contains_ci(accounting_transactions::Column::Description, search))
                    .add(contains_ci(
                        accounting_transactions::Column::StudentNumber,
                        search,
                    )),
            );
        }

        query
    }

    /// Lists transactions with the total matching count.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn list(
        &self,
        filter: &TransactionFilter,
        sort: TransactionSortKey,
        order: SortOrder,
        page: &PageRequest,
    ) -> Result<(Vec<accounting_transactions::Model>, u64), DbErr> {
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

    /// Fetches all transactions matching the filter, for export.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn export(
        &self,
        filter: &TransactionFilter,
    ) -> Result<Vec<accounting_transactions::Model>, DbErr> {
        Self::filtered(filter)
            .order_by_desc(accounting_transactions::Column::TransactionDate)
            .all(&self.db)
            .await
    }

    /// Finds a transaction by ID.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn find_by_id(
        &self,
        id: Uuid,
    ) -> Result<Option<accounting_transactions::Model>, DbErr> {
        accounting_transactions::Entity::find_by_id(id).one(&self.db).await
    }

    /// Returns the audit trail for a transaction, oldest first.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn audit_trail(
        &self,
        transaction_id: Uuid,
    ) -> Result<Vec<transaction_audit_logs::Model>, DbErr> {
        transaction_audit_logs::Entity::find()
            .filter(transaction_audit_logs::Column::TransactionId.eq(transaction_id))
            .order_by_asc(transaction_audit_logs::Column::PerformedAt)
            .all(&self.db)
            .await
    }

    /// Creates a transaction plus its Created audit row in one database
    /// transaction. The reference number comes from the day-scoped sequence,
    /// so concurrent creations on the same day cannot collide.
    ///
    /// # Errors
    ///
    /// Returns an error if the allocation or insert fails.
    pub async fn create(
        &self,
        input: CreateTransactionInput,
    ) -> Result<accounting_transactions::Model, DbErr> {
        let txn = self.db.begin().await?;

        let stmt = Statement::from_sql_and_values(
            txn.get_database_backend(),
            "INSERT INTO sequences (name, value) VALUES ($1, 1) \
             ON CONFLICT (name) DO UPDATE SET value = sequences.value + 1 \
             RETURNING value",
            [accounting_sequence_scope(input.transaction_date).into()],
        );
        let row = txn
            .query_one(stmt)
            .await?
            .ok_or_else(|| DbErr::Custom("sequence upsert returned no row".to_string()))?;
        let seq: i64 = row.try_get("", "value")?;
        let reference =
            accounting_reference(input.transaction_date, u64::try_from(seq).unwrap_or(0));

        let now = Utc::now();
        let settlement_date = (input.status == TxnStatus::Settled).then(|| now.date_naive());
        let transaction_id = Uuid::new_v4();

        let record = accounting_transactions::ActiveModel {
            id: Set(transaction_id),
            reference_number: Set(reference),
            student_number: Set(input.student_number),
            txn_type: Set(input.txn_type),
            amount: Set(input.amount),
            original_amount: Set(Some(input.amount)),
            method: Set(input.method),
            ledger_code: Set(input.ledger_code),
            account_category: Set(input.account_category),
            sub_category: Set(input.sub_category),
            status: Set(input.status),
            transaction_date: Set(input.transaction_date),
            due_date: Set(input.due_date),
            settlement_date: Set(settlement_date),
            term: Set(input.term),
            session: Set(input.session),
            academic_year: Set(input.academic_year),
            payment_reference: Set(input.payment_reference),
            check_number: Set(input.check_number),
            card_last_four: Set(input.card_last_four),
            reconciled: Set(false),
            reconciliation_date: Set(None),
            reconciled_by: Set(None),
            approved: Set(false),
            approved_by: Set(None),
            approved_at: Set(None),
            approval_notes: Set(None),
            description: Set(input.description),
            notes: Set(input.notes),
            internal_notes: Set(input.internal_notes),
            attachments: Set(None),
            is_active: Set(true),
            created_by: Set(input.created_by),
            created_at: Set(now.into()),
            updated_at: Set(now.into()),
        };
        let record = record.insert(&txn).await?;

        let audit = transaction_audit_logs::ActiveModel {
            id: Set(Uuid::new_v4()),
            transaction_id: Set(transaction_id),
            action: Set(AuditAction::Created),
            performed_by: Set(input.created_by),
            performed_at: Set(now.into()),
            notes: Set(None),
        };
        audit.insert(&txn).await?;

        txn.commit().await?;
        Ok(record)
    }

    async fn append_audit(
        &self,
        transaction_id: Uuid,
        action: AuditAction,
        performed_by: Uuid,
        notes: Option<String>,
    ) -> Result<(), DbErr> {
        let audit = transaction_audit_logs::ActiveModel {
            id: Set(Uuid::new_v4()),
            transaction_id: Set(transaction_id),
            action: Set(action),
            performed_by: Set(performed_by),
            performed_at: Set(Utc::now().into()),
            notes: Set(notes),
        };
        audit.insert(&self.db).await?;
        Ok(())
    }

    /// Applies an allow-listed update, stamping the settlement date on the
    /// first transition to Settled and appending an Updated audit row.
    ///
    /// # Errors
    ///
    /// Returns `AccountingError::NotFound` when the id does not exist.
    pub async fn update(
        &self,
        id: Uuid,
        input: UpdateTransactionInput,
    ) -> Result<accounting_transactions::Model, AccountingError> {
        let record = self
            .find_by_id(id)
            .await?
            .ok_or(AccountingError::NotFound(id))?;
        let now = Utc::now();
        let had_settlement = record.settlement_date.is_some();

        let mut active = record.into_active_model();
        if let Some(amount) = input.amount {
            active.amount = Set(amount);
        }
        if let Some(status) = input.status {
            if status == TxnStatus::Settled && !had_settlement {
                active.settlement_date = Set(Some(now.date_naive()));
            }
            active.status = Set(status);
        }
        if let Some(method) = input.method {
            active.method = Set(method);
        }
        if let Some(due_date) = input.due_date {
            active.due_date = Set(Some(due_date));
        }
        if let Some(description) = input.description {
            active.description = Set(description);
        }
        if let Some(notes) = input.notes {
            active.notes = Set(Some(notes));
        }
        if let Some(internal_notes) = input.internal_notes {
            active.internal_notes = Set(Some(internal_notes));
        }
        active.updated_at = Set(now.into());

        let updated = active.update(&self.db).await?;
        self.append_audit(id, AuditAction::Updated, input.updated_by, None)
            .await?;
        Ok(updated)
    }

    /// Approves a transaction.
    ///
    /// # Errors
    ///
    /// Returns `AccountingError::NotFound` when the id does not exist.
    pub async fn approve(
        &self,
        id: Uuid,
        approved_by: Uuid,
        notes: Option<String>,
    ) -> Result<accounting_transactions::Model, AccountingError> {
        let record = self
            .find_by_id(id)
            .await?
            .ok_or(AccountingError::NotFound(id))?;
        let now = Utc::now();

        let mut active = record.into_active_model();
        active.approved = Set(true);
        active.approved_by = Set(Some(approved_by));
        active.approved_at = Set(Some(now.into()));
        active.approval_notes = Set(notes.clone());
        active.updated_at = Set(now.into());

        let updated = active.update(&self.db).await?;
        self.append_audit(id, AuditAction::Approved, approved_by, notes)
            .await?;
        Ok(updated)
    }

    /// Reconciles a transaction against the bank statement.
    ///
    /// # Errors
    ///
    /// Returns `AccountingError::NotFound` when the id does not exist.
    pub async fn reconcile(
        &self,
        id: Uuid,
        reconciled_by: Uuid,
    ) -> Result<accounting_transactions::Model, AccountingError> {
        let record = self
            .find_by_id(id)
            .await?
            .ok_or(AccountingError::NotFound(id))?;
        let now = Utc::now();

        let mut active = record.into_active_model();
        active.reconciled = Set(true);
        active.reconciled_by = Set(Some(reconciled_by));
        active.reconciliation_date = Set(Some(now.into()));
        active.status = Set(TxnStatus::Reconciled);
        active.updated_at = Set(now.into());

        let updated = active.update(&self.db).await?;
        self.append_audit(id, AuditAction::Reconciled, reconciled_by, None)
            .await?;
        Ok(updated)
    }

    /// Marks a transaction disputed.
    ///
    /// # Errors
    ///
    /// Returns `AccountingError::NotFound` when the id does not exist.
    pub async fn dispute(
        &self,
        id: Uuid,
        disputed_by: Uuid,
        reason: String,
    ) -> Result<accounting_transactions::Model, AccountingError> {
        let record = self
            .find_by_id(id)
            .await?
            .ok_or(AccountingError::NotFound(id))?;

        let mut active = record.into_active_model();
        active.status = Set(TxnStatus::Disputed);
        active.updated_at = Set(Utc::now().into());

        let updated = active.update(&self.db).await?;
        self.append_audit(id, AuditAction::Disputed, disputed_by, Some(reason))
            .await?;
        Ok(updated)
    }

    /// Soft-deletes a transaction.
    ///
    /// # Errors
    ///
    /// Returns `AccountingError::NotFound` when the id does not exist.
    pub async fn soft_delete(&self, id: Uuid) -> Result<(), AccountingError> {
        let record = self
            .find_by_id(id)
            .await?
            .ok_or(AccountingError::NotFound(id))?;

        let mut active = record.into_active_model();
        active.is_active = Set(false);
        active.updated_at = Set(Utc::now().into());
        active.update(&self.db).await?;
        Ok(())
    }

    /// Lists pending transactions, oldest first.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn pending(&self) -> Result<Vec<accounting_transactions::Model>, DbErr> {
        accounting_transactions::Entity::find()
            .filter(accounting_transactions::Column::IsActive.eq(true))
            .filter(accounting_transactions::Column::Status.eq(TxnStatus::Pending))
            .order_by_asc(accounting_transactions::Column::TransactionDate)
            .all(&self.db)
            .await
    }

    /// Lists open transactions past their due date.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn overdue(&self) -> Result<Vec<accounting_transactions::Model>, DbErr> {
        accounting_transactions::Entity::find()
            .filter(accounting_transactions::Column::IsActive.eq(true))
            .filter(
                accounting_transactions::Column::Status
                    .is_in([TxnStatus::Pending, TxnStatus::Overdue]),
            )
            .filter(accounting_transactions::Column::DueDate.lt(Utc::now().date_naive()))
            .order_by_asc(accounting_transactions::Column::DueDate)
            .all(&self.db)
            .await
    }

    /// Lists unreconciled transactions, newest first.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn unreconciled(&self) -> Result<Vec<accounting_transactions::Model>, DbErr> {
        accounting_transactions::Entity::find()
            .filter(accounting_transactions::Column::IsActive.eq(true))
            .filter(accounting_transactions::Column::Reconciled.eq(false))
            .order_by_desc(accounting_transactions::Column::TransactionDate)
            .all(&self.db)
            .await
    }

    /// Computes the balance for one ledger code. Debit-normal categories
    /// (Assets, Expenses) add on the debit side; the rest on the credit side.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn ledger_code_balance(
        &self,
        ledger_code: &str,
        category: AccountCategory,
    ) -> Result<LedgerBalance, DbErr> {
        let rows: Vec<CategoryTotal> = accounting_transactions::Entity::find()
            .select_only()
            .column(accounting_transactions::Column::AccountCategory)
            .column_as(accounting_transactions::Column::Amount.sum(), "total")
            .filter(accounting_transactions::Column::IsActive.eq(true))
            .filter(accounting_transactions::Column::LedgerCode.eq(ledger_code))
            .group_by(accounting_transactions::Column::AccountCategory)
            .into_model::<CategoryTotal>()
            .all(&self.db)
            .await?;

        let mut totals = LedgerTotals::default();
        for row in rows {
            let amount = row.total.unwrap_or(Decimal::ZERO);
            if core_category(&row.account_category).is_debit_normal() {
                totals.total_debits += amount;
            } else {
                totals.total_credits += amount;
            }
        }

        Ok(LedgerBalance {
            ledger_code: ledger_code.to_string(),
            total_debits: totals.total_debits,
            total_credits: totals.total_credits,
            balance: ledger_balance(core_category(&category), totals),
        })
    }

    /// Computes the accounting stats rollup over an optional date range.
    ///
    /// # Errors
    ///
    /// Returns an error if a database query fails.
    pub async fn stats(
        &self,
        from: Option<NaiveDate>,
        to: Option<NaiveDate>,
    ) -> Result<AccountingStats, DbErr> {
        let ranged = |mut query: Select<accounting_transactions::Entity>| {
            query = query.filter(accounting_transactions::Column::IsActive.eq(true));
            if let Some(from) = from {
                query = query.filter(accounting_transactions::Column::TransactionDate.gte(from));
            }
            if let Some(to) = to {
                query = query.filter(accounting_transactions::Column::TransactionDate.lte(to));
            }
            query
        };

        let total_count = ranged(accounting_transactions::Entity::find())
            .count(&self.db)
            .await?;
        let pending_count = ranged(accounting_transactions::Entity::find())
            .filter(accounting_transactions::Column::Status.eq(TxnStatus::Pending))
            .count(&self.db)
            .await?;
        let reconciled_count = ranged(accounting_transactions::Entity::find())
            .filter(accounting_transactions::Column::Reconciled.eq(true))
            .count(&self.db)
            .await?;

        let by_type: Vec<TypeTotal> = ranged(accounting_transactions::Entity::find())
            .select_only()
            .column(accounting_transactions::Column::TxnType)
            .column_as(accounting_transactions::Column::Amount.sum(), "total")
            .column_as(accounting_transactions::Column::Id.count(), "count")
            .group_by(accounting_transactions::Column::TxnType)
            .into_model::<TypeTotal>()
            .all(&self.db)
            .await?;

        let by_status: Vec<StatusTotal> = ranged(accounting_transactions::Entity::find())
            .select_only()
            .column(accounting_transactions::Column::Status)
            .column_as(accounting_transactions::Column::Amount.sum(), "total")
            .column_as(accounting_transactions::Column::Id.count(), "count")
            .group_by(accounting_transactions::Column::Status)
            .into_model::<StatusTotal>()
            .all(&self.db)
            .await?;

        let total_amount = by_type
            .iter()
            .map(|bucket| bucket.total.unwrap_or(Decimal::ZERO))
            .sum();

        Ok(AccountingStats {
            total_count,
            total_amount,
            pending_count,
            reconciled_count,
            by_type: by_type
                .into_iter()
                .map(|b| (b.txn_type, b.total.unwrap_or(Decimal::ZERO), b.count))
                .collect(),
            by_status: by_status
                .into_iter()
                .map(|b| (b.status, b.total.unwrap_or(Decimal::ZERO), b.count))
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
        updates: TransactionBulkUpdate,
    ) -> Result<(u64, u64), DbErr> {
        let matched = accounting_transactions::Entity::find()
            .filter(accounting_transactions::Column::Id.is_in(ids.to_vec()))
            .count(&self.db)
            .await?;

        let mut update = accounting_transactions::Entity::update_many()
            .filter(accounting_transactions::Column::Id.is_in(ids.to_vec()))
            .col_expr(
                accounting_transactions::Column::UpdatedAt,
                Expr::value(Utc::now()),
            );

        if let Some(status) = updates.status {
            update = update.col_expr(accounting_transactions::Column::Status, Expr::value(status));
        }
        if let Some(reconciled) = updates.reconciled {
            update = update.col_expr(
                accounting_transactions::Column::Reconciled,
                Expr::value(reconciled),
            );
        }

        let result = update.exec(&self.db).await?;
        Ok((matched, result.rows_affected))
    }
}

const fn core_category(category: &AccountCategory) -> CoreCategory {
    match category {
        AccountCategory::Assets => CoreCategory::Assets,
        AccountCategory::Liabilities => CoreCategory::Liabilities,
        AccountCategory::Equity => CoreCategory::Equity,
        AccountCategory::Revenue => CoreCategory::Revenue,
        AccountCategory::Expenses => CoreCategory::Expenses,
    }
}
