//! Postgres enum types shared across entities.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// User roles.
#[derive(Debug, Clone, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "Enum", enum_name = "user_role")]
#[serde(rename_all = "snake_case")]
pub enum UserRole {
    /// Full access; bypasses record-ownership scoping.
    #[sea_orm(string_value = "admin")]
    Admin,
    /// Course and academic-history management.
    #[sea_orm(string_value = "registrar")]
    Registrar,
    /// Finance and accounting management.
    #[sea_orm(string_value = "finance")]
    Finance,
    /// Course management and grading.
    #[sea_orm(string_value = "instructor")]
    Instructor,
    /// CRM pipeline work.
    #[sea_orm(string_value = "sales_rep")]
    SalesRep,
    /// Marketing campaigns.
    #[sea_orm(string_value = "marketing")]
    Marketing,
    /// Self-service student account.
    #[sea_orm(string_value = "student")]
    Student,
}

/// Student lifecycle status. Transitions are not enforced; any value is
/// settable.
#[derive(Debug, Clone, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "Enum", enum_name = "student_status")]
pub enum StudentStatus {
    /// Inquiring, not yet enrolled.
    #[sea_orm(string_value = "Prospective")]
    Prospective,
    /// Accepted and enrolled.
    #[sea_orm(string_value = "Enrolled")]
    Enrolled,
    /// Attending classes.
    #[sea_orm(string_value = "Active")]
    Active,
    /// Program completed.
    #[sea_orm(string_value = "Graduated")]
    Graduated,
    /// Left the program.
    #[sea_orm(string_value = "Withdrawn")]
    Withdrawn,
    /// Suspended.
    #[sea_orm(string_value = "Suspended")]
    Suspended,
}

/// Enrollment modality.
#[derive(Debug, Clone, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "Enum", enum_name = "enrollment_status")]
pub enum EnrollmentStatus {
    /// Full-time.
    #[sea_orm(string_value = "Full-time")]
    #[serde(rename = "Full-time")]
    FullTime,
    /// Part-time.
    #[sea_orm(string_value = "Part-time")]
    #[serde(rename = "Part-time")]
    PartTime,
    /// Online.
    #[sea_orm(string_value = "Online")]
    Online,
    /// Hybrid.
    #[sea_orm(string_value = "Hybrid")]
    Hybrid,
}

/// Where a student or CRM lead came from.
#[derive(Debug, Clone, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "Enum", enum_name = "lead_source")]
pub enum LeadSource {
    /// Website inquiry.
    #[sea_orm(string_value = "Website")]
    Website,
    /// Social media.
    #[sea_orm(string_value = "Social Media")]
    #[serde(rename = "Social Media")]
    SocialMedia,
    /// Referral.
    #[sea_orm(string_value = "Referral")]
    Referral,
    /// Advertisement.
    #[sea_orm(string_value = "Advertisement")]
    Advertisement,
    /// Career fair.
    #[sea_orm(string_value = "Career Fair")]
    #[serde(rename = "Career Fair")]
    CareerFair,
    /// Trade show.
    #[sea_orm(string_value = "Trade Show")]
    #[serde(rename = "Trade Show")]
    TradeShow,
    /// Event.
    #[sea_orm(string_value = "Event")]
    Event,
    /// Inbound contact.
    #[sea_orm(string_value = "Inbound")]
    Inbound,
    /// Cold outreach.
    #[sea_orm(string_value = "Cold Outreach")]
    #[serde(rename = "Cold Outreach")]
    ColdOutreach,
    /// Anything else.
    #[sea_orm(string_value = "Other")]
    Other,
}

/// How a student funds their program.
#[derive(Debug, Clone, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "Enum", enum_name = "funding_source")]
pub enum FundingSource {
    /// Self-pay.
    #[sea_orm(string_value = "Self-Pay")]
    #[serde(rename = "Self-Pay")]
    SelfPay,
    /// Federal aid.
    #[sea_orm(string_value = "Federal Aid")]
    #[serde(rename = "Federal Aid")]
    FederalAid,
    /// Private loan.
    #[sea_orm(string_value = "Private Loan")]
    #[serde(rename = "Private Loan")]
    PrivateLoan,
    /// Scholarship.
    #[sea_orm(string_value = "Scholarship")]
    Scholarship,
    /// Employer sponsored.
    #[sea_orm(string_value = "Employer")]
    Employer,
    /// Anything else.
    #[sea_orm(string_value = "Other")]
    Other,
}

/// Course lifecycle status.
#[derive(Debug, Clone, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "Enum", enum_name = "course_status")]
pub enum CourseStatus {
    /// Open and running.
    #[sea_orm(string_value = "Active")]
    Active,
    /// Not currently offered.
    #[sea_orm(string_value = "Inactive")]
    Inactive,
    /// Cancelled.
    #[sea_orm(string_value = "Cancelled")]
    Cancelled,
    /// Finished.
    #[sea_orm(string_value = "Completed")]
    Completed,
}

/// Status of one roster entry.
#[derive(Debug, Clone, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "Enum", enum_name = "roster_status")]
pub enum RosterStatus {
    /// Counted against capacity.
    #[sea_orm(string_value = "Enrolled")]
    Enrolled,
    /// Dropped out of the course.
    #[sea_orm(string_value = "Dropped")]
    Dropped,
    /// Completed the course.
    #[sea_orm(string_value = "Completed")]
    Completed,
    /// Withdrew from the program.
    #[sea_orm(string_value = "Withdrawn")]
    Withdrawn,
}

/// Status of an academic history record.
#[derive(Debug, Clone, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "Enum", enum_name = "history_status")]
pub enum HistoryStatus {
    /// Currently taking the course.
    #[sea_orm(string_value = "Enrolled")]
    Enrolled,
    /// Finished; counts toward the GPA.
    #[sea_orm(string_value = "Completed")]
    Completed,
    /// Withdrew.
    #[sea_orm(string_value = "Withdrawn")]
    Withdrawn,
    /// Incomplete.
    #[sea_orm(string_value = "Incomplete")]
    Incomplete,
    /// Auditing, ungraded.
    #[sea_orm(string_value = "Audit")]
    Audit,
}

/// Transcript letter grades.
#[derive(Debug, Clone, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "Enum", enum_name = "letter_grade")]
pub enum LetterGrade {
    /// 4.00.
    #[sea_orm(string_value = "A")]
    A,
    /// 3.70.
    #[sea_orm(string_value = "A-")]
    #[serde(rename = "A-")]
    AMinus,
    /// 3.30.
    #[sea_orm(string_value = "B+")]
    #[serde(rename = "B+")]
    BPlus,
    /// 3.00.
    #[sea_orm(string_value = "B")]
    B,
    /// 2.70.
    #[sea_orm(string_value = "B-")]
    #[serde(rename = "B-")]
    BMinus,
    /// 2.30.
    #[sea_orm(string_value = "C+")]
    #[serde(rename = "C+")]
    CPlus,
    /// 2.00.
    #[sea_orm(string_value = "C")]
    C,
    /// 1.70.
    #[sea_orm(string_value = "C-")]
    #[serde(rename = "C-")]
    CMinus,
    /// 1.30.
    #[sea_orm(string_value = "D+")]
    #[serde(rename = "D+")]
    DPlus,
    /// 1.00.
    #[sea_orm(string_value = "D")]
    D,
    /// 0.70.
    #[sea_orm(string_value = "D-")]
    #[serde(rename = "D-")]
    DMinus,
    /// 0.00.
    #[sea_orm(string_value = "F")]
    F,
    /// Incomplete (no GPA effect).
    #[sea_orm(string_value = "I")]
    I,
    /// Withdrawn (no GPA effect).
    #[sea_orm(string_value = "W")]
    W,
    /// Pass (no GPA effect).
    #[sea_orm(string_value = "P")]
    P,
    /// No pass (no GPA effect).
    #[sea_orm(string_value = "NP")]
    Np,
}

/// Finance record types.
#[derive(Debug, Clone, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "Enum", enum_name = "finance_type")]
pub enum FinanceType {
    /// Tuition charge.
    #[sea_orm(string_value = "Tuition")]
    Tuition,
    /// Payment received; reduces the balance.
    #[sea_orm(string_value = "Payment")]
    Payment,
    /// Fee charge.
    #[sea_orm(string_value = "Fee")]
    Fee,
    /// Refund issued.
    #[sea_orm(string_value = "Refund")]
    Refund,
    /// Scholarship credit.
    #[sea_orm(string_value = "Scholarship")]
    Scholarship,
    /// Loan disbursement.
    #[sea_orm(string_value = "Loan")]
    Loan,
    /// Generic credit.
    #[sea_orm(string_value = "Credit")]
    Credit,
    /// Generic debit.
    #[sea_orm(string_value = "Debit")]
    Debit,
}

/// Finance record categories.
#[derive(Debug, Clone, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "Enum", enum_name = "finance_category")]
pub enum FinanceCategory {
    /// Tuition.
    #[sea_orm(string_value = "Tuition")]
    Tuition,
    /// Books.
    #[sea_orm(string_value = "Books")]
    Books,
    /// Supplies.
    #[sea_orm(string_value = "Supplies")]
    Supplies,
    /// Lab fees.
    #[sea_orm(string_value = "Lab Fees")]
    #[serde(rename = "Lab Fees")]
    LabFees,
    /// Late fees.
    #[sea_orm(string_value = "Late Fees")]
    #[serde(rename = "Late Fees")]
    LateFees,
    /// Anything else.
    #[sea_orm(string_value = "Other")]
    Other,
}

/// Finance record status.
#[derive(Debug, Clone, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "Enum", enum_name = "finance_status")]
pub enum FinanceStatus {
    /// Awaiting payment.
    #[sea_orm(string_value = "Pending")]
    Pending,
    /// Paid in full.
    #[sea_orm(string_value = "Paid")]
    Paid,
    /// Past its due date.
    #[sea_orm(string_value = "Overdue")]
    Overdue,
    /// Cancelled.
    #[sea_orm(string_value = "Cancelled")]
    Cancelled,
    /// Refunded.
    #[sea_orm(string_value = "Refunded")]
    Refunded,
    /// Under dispute.
    #[sea_orm(string_value = "Disputed")]
    Disputed,
}

/// Payment methods across finance and accounting.
#[derive(Debug, Clone, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "Enum", enum_name = "payment_method")]
pub enum PaymentMethod {
    /// Cash.
    #[sea_orm(string_value = "Cash")]
    Cash,
    /// Check.
    #[sea_orm(string_value = "Check")]
    Check,
    /// Credit card.
    #[sea_orm(string_value = "Credit Card")]
    #[serde(rename = "Credit Card")]
    CreditCard,
    /// Debit card.
    #[sea_orm(string_value = "Debit Card")]
    #[serde(rename = "Debit Card")]
    DebitCard,
    /// Bank transfer.
    #[sea_orm(string_value = "Bank Transfer")]
    #[serde(rename = "Bank Transfer")]
    BankTransfer,
    /// Online payment.
    #[sea_orm(string_value = "Online Payment")]
    #[serde(rename = "Online Payment")]
    OnlinePayment,
    /// ACH.
    #[sea_orm(string_value = "ACH")]
    #[serde(rename = "ACH")]
    Ach,
    /// Wire transfer.
    #[sea_orm(string_value = "Wire Transfer")]
    #[serde(rename = "Wire Transfer")]
    WireTransfer,
    /// Loan disbursement.
    #[sea_orm(string_value = "Loan")]
    Loan,
    /// Scholarship disbursement.
    #[sea_orm(string_value = "Scholarship")]
    Scholarship,
    /// Anything else.
    #[sea_orm(string_value = "Other")]
    Other,
}

/// Accounting transaction types.
#[derive(Debug, Clone, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "Enum", enum_name = "txn_type")]
pub enum TxnType {
    /// Tuition charge.
    #[sea_orm(string_value = "Tuition")]
    Tuition,
    /// Payment received.
    #[sea_orm(string_value = "Payment")]
    Payment,
    /// Refund issued.
    #[sea_orm(string_value = "Refund")]
    Refund,
    /// Fee charge.
    #[sea_orm(string_value = "Fee")]
    Fee,
    /// Scholarship credit.
    #[sea_orm(string_value = "Scholarship")]
    Scholarship,
    /// Loan disbursement.
    #[sea_orm(string_value = "Loan")]
    Loan,
    /// Generic credit.
    #[sea_orm(string_value = "Credit")]
    Credit,
    /// Generic debit.
    #[sea_orm(string_value = "Debit")]
    Debit,
    /// Manual adjustment.
    #[sea_orm(string_value = "Adjustment")]
    Adjustment,
}

/// Accounting transaction status.
#[derive(Debug, Clone, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "Enum", enum_name = "txn_status")]
pub enum TxnStatus {
    /// Funds settled.
    #[sea_orm(string_value = "Settled")]
    Settled,
    /// Awaiting settlement.
    #[sea_orm(string_value = "Pending")]
    Pending,
    /// Past its due date.
    #[sea_orm(string_value = "Overdue")]
    Overdue,
    /// Cancelled.
    #[sea_orm(string_value = "Cancelled")]
    Cancelled,
    /// Under dispute.
    #[sea_orm(string_value = "Disputed")]
    Disputed,
    /// Matched against the bank statement.
    #[sea_orm(string_value = "Reconciled")]
    Reconciled,
}

/// Ledger account categories.
#[derive(Debug, Clone, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "Enum", enum_name = "account_category")]
pub enum AccountCategory {
    /// Debit-normal.
    #[sea_orm(string_value = "Assets")]
    Assets,
    /// Credit-normal.
    #[sea_orm(string_value = "Liabilities")]
    Liabilities,
    /// Credit-normal.
    #[sea_orm(string_value = "Equity")]
    Equity,
    /// Credit-normal.
    #[sea_orm(string_value = "Revenue")]
    Revenue,
    /// Debit-normal.
    #[sea_orm(string_value = "Expenses")]
    Expenses,
}

/// Audit trail actions on accounting transactions.
#[derive(Debug, Clone, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "Enum", enum_name = "audit_action")]
pub enum AuditAction {
    /// Transaction created.
    #[sea_orm(string_value = "Created")]
    Created,
    /// Fields updated.
    #[sea_orm(string_value = "Updated")]
    Updated,
    /// Transaction approved.
    #[sea_orm(string_value = "Approved")]
    Approved,
    /// Transaction reconciled.
    #[sea_orm(string_value = "Reconciled")]
    Reconciled,
    /// Transaction cancelled.
    #[sea_orm(string_value = "Cancelled")]
    Cancelled,
    /// Transaction disputed.
    #[sea_orm(string_value = "Disputed")]
    Disputed,
}

/// Placement status.
#[derive(Debug, Clone, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "Enum", enum_name = "placement_status")]
pub enum PlacementStatus {
    /// Application submitted.
    #[sea_orm(string_value = "Applied")]
    Applied,
    /// In the interview loop.
    #[sea_orm(string_value = "Interviewing")]
    Interviewing,
    /// Offer extended.
    #[sea_orm(string_value = "Offered")]
    Offered,
    /// Hired.
    #[sea_orm(string_value = "Employed")]
    Employed,
    /// Application rejected.
    #[sea_orm(string_value = "Rejected")]
    Rejected,
    /// Application withdrawn.
    #[sea_orm(string_value = "Withdrawn")]
    Withdrawn,
    /// Not currently seeking employment.
    #[sea_orm(string_value = "Not Seeking")]
    #[serde(rename = "Not Seeking")]
    NotSeeking,
}

/// Employment types.
#[derive(Debug, Clone, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "Enum", enum_name = "job_type")]
pub enum JobType {
    /// Full-time.
    #[sea_orm(string_value = "Full-time")]
    #[serde(rename = "Full-time")]
    FullTime,
    /// Part-time.
    #[sea_orm(string_value = "Part-time")]
    #[serde(rename = "Part-time")]
    PartTime,
    /// Contract.
    #[sea_orm(string_value = "Contract")]
    Contract,
    /// Internship.
    #[sea_orm(string_value = "Internship")]
    Internship,
    /// Temporary.
    #[sea_orm(string_value = "Temporary")]
    Temporary,
    /// Freelance.
    #[sea_orm(string_value = "Freelance")]
    Freelance,
}

/// Salary structure.
#[derive(Debug, Clone, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "Enum", enum_name = "salary_type")]
pub enum SalaryType {
    /// Paid hourly.
    #[sea_orm(string_value = "Hourly")]
    Hourly,
    /// Annual salary.
    #[sea_orm(string_value = "Salary")]
    Salary,
    /// Commission based.
    #[sea_orm(string_value = "Commission")]
    Commission,
    /// Anything else.
    #[sea_orm(string_value = "Other")]
    Other,
}

/// Interview formats.
#[derive(Debug, Clone, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "Enum", enum_name = "interview_kind")]
pub enum InterviewKind {
    /// Phone screen.
    #[sea_orm(string_value = "Phone")]
    Phone,
    /// Video call.
    #[sea_orm(string_value = "Video")]
    Video,
    /// On site.
    #[sea_orm(string_value = "In-Person")]
    #[serde(rename = "In-Person")]
    InPerson,
    /// Panel.
    #[sea_orm(string_value = "Panel")]
    Panel,
    /// Technical assessment.
    #[sea_orm(string_value = "Technical")]
    Technical,
    /// Anything else.
    #[sea_orm(string_value = "Other")]
    Other,
}

/// Interview outcomes.
#[derive(Debug, Clone, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "Enum", enum_name = "interview_outcome")]
pub enum InterviewOutcome {
    /// Advanced to the next round.
    #[sea_orm(string_value = "Passed")]
    Passed,
    /// Did not advance.
    #[sea_orm(string_value = "Failed")]
    Failed,
    /// Awaiting a decision.
    #[sea_orm(string_value = "Pending")]
    Pending,
    /// Cancelled.
    #[sea_orm(string_value = "Cancelled")]
    Cancelled,
}

/// How a placement was verified.
#[derive(Debug, Clone, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "Enum", enum_name = "verification_method")]
pub enum VerificationMethod {
    /// Verified over email.
    #[sea_orm(string_value = "Email")]
    Email,
    /// Verified over the phone.
    #[sea_orm(string_value = "Phone")]
    Phone,
    /// Verified from documents.
    #[sea_orm(string_value = "Document")]
    Document,
    /// Verified in person.
    #[sea_orm(string_value = "In-Person")]
    #[serde(rename = "In-Person")]
    InPerson,
    /// Anything else.
    #[sea_orm(string_value = "Other")]
    Other,
}

/// Lead pipeline status.
#[derive(Debug, Clone, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "Enum", enum_name = "lead_status")]
pub enum LeadStatus {
    /// Fresh, untouched.
    #[sea_orm(string_value = "New")]
    New,
    /// First contact made.
    #[sea_orm(string_value = "Contacted")]
    Contacted,
    /// Qualified as a real opportunity.
    #[sea_orm(string_value = "Qualified")]
    Qualified,
    /// Proposal out.
    #[sea_orm(string_value = "Proposal")]
    Proposal,
    /// Negotiating terms.
    #[sea_orm(string_value = "Negotiation")]
    Negotiation,
    /// Won.
    #[sea_orm(string_value = "Closed Won")]
    #[serde(rename = "Closed Won")]
    ClosedWon,
    /// Lost.
    #[sea_orm(string_value = "Closed Lost")]
    #[serde(rename = "Closed Lost")]
    ClosedLost,
}

/// Deal pipeline stages.
#[derive(Debug, Clone, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "Enum", enum_name = "deal_stage")]
pub enum DealStage {
    /// Initial outreach.
    #[sea_orm(string_value = "Prospecting")]
    Prospecting,
    /// Qualifying fit and budget.
    #[sea_orm(string_value = "Qualification")]
    Qualification,
    /// Understanding requirements.
    #[sea_orm(string_value = "Needs Analysis")]
    #[serde(rename = "Needs Analysis")]
    NeedsAnalysis,
    /// Proposal delivered.
    #[sea_orm(string_value = "Proposal")]
    Proposal,
    /// Terms under negotiation.
    #[sea_orm(string_value = "Negotiation")]
    Negotiation,
    /// Awaiting a decision.
    #[sea_orm(string_value = "Decision")]
    Decision,
    /// Won.
    #[sea_orm(string_value = "Closed Won")]
    #[serde(rename = "Closed Won")]
    ClosedWon,
    /// Lost.
    #[sea_orm(string_value = "Closed Lost")]
    #[serde(rename = "Closed Lost")]
    ClosedLost,
}

/// Priority for deals and CRM tasks.
#[derive(Debug, Clone, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "Enum", enum_name = "priority")]
pub enum Priority {
    /// Low.
    #[sea_orm(string_value = "Low")]
    Low,
    /// Medium.
    #[sea_orm(string_value = "Medium")]
    Medium,
    /// High.
    #[sea_orm(string_value = "High")]
    High,
    /// Critical.
    #[sea_orm(string_value = "Critical")]
    Critical,
}

/// CRM task status.
#[derive(Debug, Clone, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "Enum", enum_name = "task_status")]
pub enum TaskStatus {
    /// Not started.
    #[sea_orm(string_value = "Pending")]
    Pending,
    /// Being worked.
    #[sea_orm(string_value = "In Progress")]
    #[serde(rename = "In Progress")]
    InProgress,
    /// Done.
    #[sea_orm(string_value = "Completed")]
    Completed,
    /// Cancelled.
    #[sea_orm(string_value = "Cancelled")]
    Cancelled,
}

/// Activity kinds logged against CRM records.
#[derive(Debug, Clone, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "Enum", enum_name = "activity_kind")]
pub enum ActivityKind {
    /// Phone call.
    #[sea_orm(string_value = "Call")]
    Call,
    /// Email sent or received.
    #[sea_orm(string_value = "Email")]
    Email,
    /// Meeting held.
    #[sea_orm(string_value = "Meeting")]
    Meeting,
    /// Freeform note.
    #[sea_orm(string_value = "Note")]
    Note,
    /// Product demo.
    #[sea_orm(string_value = "Demo")]
    Demo,
    /// Follow-up touch.
    #[sea_orm(string_value = "Follow-up")]
    #[serde(rename = "Follow-up")]
    FollowUp,
}

/// Notification severity/kind.
#[derive(Debug, Clone, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "Enum", enum_name = "notification_kind")]
#[serde(rename_all = "lowercase")]
pub enum NotificationKind {
    /// Positive event.
    #[sea_orm(string_value = "success")]
    Success,
    /// Informational.
    #[sea_orm(string_value = "info")]
    Info,
    /// Needs attention.
    #[sea_orm(string_value = "warning")]
    Warning,
    /// Something failed.
    #[sea_orm(string_value = "error")]
    Error,
}
