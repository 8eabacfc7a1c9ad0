//! Named sequence allocator.
//!
//! Reference numbers and student numbers need a per-scope counter. The
//! increment happens in a single upsert statement so two concurrent
//! allocations can never observe the same value.

use sea_orm::{ConnectionTrait, DatabaseConnection, DbErr, Statement};

/// Repository for named counters.
#[derive(Debug, Clone)]
pub struct SequenceRepository {
    db: DatabaseConnection,
}

impl SequenceRepository {
    /// Creates a new sequence repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Atomically increments the counter for `scope` and returns the new
    /// value. The first allocation in a scope returns 1.
    ///
    /// # Errors
    ///
    /// Returns an error if the database statement fails.
    pub async fn next_value(&self, scope: &str) -> Result<u64, DbErr> {
        let stmt = Statement::from_sql_and_values(
            self.db.get_database_backend(),
            "INSERT INTO sequences (name, value) VALUES ($1, 1) \
             ON CONFLICT (name) DO UPDATE SET value = sequences.value + 1 \
             RETURNING value",
            [scope.into()],
        );

        let row = self
            .db
            .query_one(stmt)
            .await?
            .ok_or_else(|| DbErr::Custom("sequence upsert returned no row".to_string()))?;

        let value: i64 = row.try_get("", "value")?;
        u64::try_from(value)
            .map_err(|_| DbErr::Custom(format!("sequence {scope} went negative: {value}")))
    }
}
