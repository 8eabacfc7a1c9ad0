//! Cross-module report aggregations.
//!
//! Each rollup accepts an inclusive date range and reuses the module
//! repositories' aggregation queries where one exists. There is no
//! execution engine behind custom/scheduled reports; those endpoints keep
//! metadata only.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use sea_orm::{ColumnTrait, DatabaseConnection, DbErr, EntityTrait, PaginatorTrait, QueryFilter};

use super::{
    AccountingRepository, FinanceRepository, HistoryRepository, PlacementRepository,
    StudentRepository,
};
use crate::entities::{
    academic_history, placements, students,
    sea_orm_active_enums::{HistoryStatus, PlacementStatus},
};

/// Admissions report: enrollment overview and distributions.
#[derive(Debug, Clone, Default)]
pub struct AdmissionsSummary {
    /// All active students.
    pub total_students: u64,
    /// Enrolled or active students.
    pub enrolled: u64,
    /// Prospective students.
    pub prospective: u64,
    /// Graduated students.
    pub graduated: u64,
    /// New students inside the date range (by first term).
    pub new_in_range: u64,
    /// Count per program.
    pub by_program: Vec<(String, i64)>,
    /// Count per campus.
    pub by_campus: Vec<(String, i64)>,
}

/// Registrar report: courses and academic performance.
#[derive(Debug, Clone, Default)]
pub struct RegistrarBreakdown {
    /// All active courses.
    pub total_courses: u64,
    /// Courses with status Active.
    pub active_courses: u64,
    /// Sum of enrollment limits.
    pub total_capacity: i64,
    /// Active roster entries.
    pub total_enrolled: u64,
    /// Completed history records.
    pub completed_records: u64,
    /// Completion rate in percent over history records.
    pub completion_rate: Decimal,
}

/// Placement report: employment outcomes.
#[derive(Debug, Clone, Default)]
pub struct PlacementOutcomes {
    /// All active placements.
    pub total: u64,
    /// Verified employed placements.
    pub employed: u64,
    /// Employment rate in percent.
    pub employment_rate: Decimal,
    /// Average reported salary.
    pub average_salary: Option<Decimal>,
    /// Count per industry.
    pub by_industry: Vec<(String, i64)>,
}

/// Report repository bundling the cross-module rollups.
#[derive(Debug, Clone)]
pub struct ReportRepository {
    db: DatabaseConnection,
}

impl ReportRepository {
    /// Creates a new report repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Builds the admissions summary.
    ///
    /// # Errors
    ///
    /// Returns an error if a database query fails.
    pub async fn admissions_summary(
        &self,
        from: Option<NaiveDate>,
        to: Option<NaiveDate>,
    ) -> Result<AdmissionsSummary, DbErr> {
        let stats = StudentRepository::new(self.db.clone()).stats().await?;

        let mut ranged = students::Entity::find()
            .filter(students::Column::IsActive.eq(true));
        if let Some(from) = from {
            ranged = ranged.filter(students::Column::FirstTerm.gte(from));
        }
        if let Some(to) = to {
            ranged = ranged.filter(students::Column::FirstTerm.lte(to));
        }
        let new_in_range = ranged.count(&self.db).await?;

        Ok(AdmissionsSummary {
            total_students: stats.total,
            enrolled: stats.enrolled,
            prospective: stats.prospective,
            graduated: stats.graduated,
            new_in_range,
            by_program: stats.by_program,
            by_campus: stats.by_campus,
        })
    }

    /// Builds the finance stats rollup.
    ///
    /// # Errors
    ///
    /// Returns an error if a database query fails.
    pub async fn finance_stats(
        &self,
        from: Option<NaiveDate>,
        to: Option<NaiveDate>,
    ) -> Result<super::finance::FinanceStats, DbErr> {
        FinanceRepository::new(self.db.clone()).stats(from, to).await
    }

    /// Builds the accounting stats rollup.
    ///
    /// # Errors
    ///
    /// Returns an error if a database query fails.
    pub async fn accounting_stats(
        &self,
        from: Option<NaiveDate>,
        to: Option<NaiveDate>,
    ) -> Result<super::accounting::AccountingStats, DbErr> {
        AccountingRepository::new(self.db.clone()).stats(from, to).await
    }

    /// Builds the registrar breakdown.
    ///
    /// # Errors
    ///
    /// Returns an error if a database query fails.
    pub async fn registrar_breakdown(&self) -> Result<RegistrarBreakdown, DbErr> {
        let course_stats = super::CourseRepository::new(self.db.clone()).stats().await?;

        let history_total = academic_history::Entity::find()
            .filter(academic_history::Column::IsActive.eq(true))
            .count(&self.db)
            .await?;
        let completed_records = academic_history::Entity::find()
            .filter(academic_history::Column::IsActive.eq(true))
            .filter(academic_history::Column::Status.eq(HistoryStatus::Completed))
            .count(&self.db)
            .await?;

        let completion_rate = if history_total == 0 {
            Decimal::ZERO
        } else {
            (Decimal::from(completed_records) / Decimal::from(history_total)
                * Decimal::ONE_HUNDRED)
                .round_dp(1)
        };

        Ok(RegistrarBreakdown {
            total_courses: course_stats.total,
            active_courses: course_stats.active,
            total_capacity: course_stats.total_capacity,
            total_enrolled: course_stats.total_enrolled,
            completed_records,
            completion_rate,
        })
    }

    /// Builds the placement outcomes report.
    ///
    /// # Errors
    ///
    /// Returns an error if a database query fails.
    pub async fn placement_outcomes(
        &self,
        from: Option<NaiveDate>,
        to: Option<NaiveDate>,
    ) -> Result<PlacementOutcomes, DbErr> {
        let stats = PlacementRepository::new(self.db.clone()).stats().await?;

        // Range-restricted employment rate, by start date.
        let mut ranged = placements::Entity::find()
            .filter(placements::Column::IsActive.eq(true));
        if let Some(from) = from {
            ranged = ranged.filter(placements::Column::StartDate.gte(from));
        }
        if let Some(to) = to {
            ranged = ranged.filter(placements::Column::StartDate.lte(to));
        }
        let ranged_total = ranged.clone().count(&self.db).await?;
        let ranged_employed = ranged
            .filter(placements::Column::Status.eq(PlacementStatus::Employed))
            .filter(placements::Column::Verified.eq(true))
            .count(&self.db)
            .await?;

        let employment_rate = if ranged_total == 0 {
            stats.employment_rate
        } else {
            (Decimal::from(ranged_employed) / Decimal::from(ranged_total)
                * Decimal::ONE_HUNDRED)
                .round_dp(1)
        };

        Ok(PlacementOutcomes {
            total: stats.total,
            employed: stats.employed,
            employment_rate,
            average_salary: stats.average_salary,
            by_industry: stats.by_industry,
        })
    }

    /// Average GPA over students with completed records; part of the
    /// academic-performance report.
    ///
    /// # Errors
    ///
    /// Returns an error if a database query fails.
    pub async fn average_gpa(&self) -> Result<Decimal, DbErr> {
        use sea_orm::QuerySelect;

        let numbers: Vec<String> = academic_history::Entity::find()
            .select_only()
            .column(academic_history::Column::StudentNumber)
            .distinct()
            .filter(academic_history::Column::IsActive.eq(true))
            .filter(academic_history::Column::Status.eq(HistoryStatus::Completed))
            .into_tuple()
            .all(&self.db)
            .await?;

        if numbers.is_empty() {
            return Ok(Decimal::ZERO);
        }

        let history = HistoryRepository::new(self.db.clone());
        let mut sum = Decimal::ZERO;
        for number in &numbers {
            sum += history.gpa(number).await?;
        }

        Ok((sum / Decimal::from(numbers.len() as u64)).round_dp(2))
    }
}
