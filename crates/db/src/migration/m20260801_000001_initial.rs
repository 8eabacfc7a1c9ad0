//! Initial database migration.
//!
//! Creates all enums, tables and indexes for the SIS and CRM modules.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        let db = manager.get_connection();

        // ============================================================
        // PART 1: ENUMS
        // ============================================================
        db.execute_unprepared(ENUMS_SQL).await?;

        // ============================================================
        // PART 2: IDENTITY & ADMISSIONS
        // ============================================================
        db.execute_unprepared(USERS_SQL).await?;
        db.execute_unprepared(STUDENTS_SQL).await?;

        // ============================================================
        // PART 3: REGISTRAR
        // ============================================================
        db.execute_unprepared(COURSES_SQL).await?;
        db.execute_unprepared(ACADEMIC_HISTORY_SQL).await?;

        // ============================================================
        // PART 4: FINANCE & ACCOUNTING
        // ============================================================
        db.execute_unprepared(FINANCE_SQL).await?;
        db.execute_unprepared(ACCOUNTING_SQL).await?;

        // ============================================================
        // PART 5: PLACEMENT
        // ============================================================
        db.execute_unprepared(PLACEMENTS_SQL).await?;

        // ============================================================
        // PART 6: SALES CRM
        // ============================================================
        db.execute_unprepared(CRM_SQL).await?;

        // ============================================================
        // PART 7: NOTIFICATIONS & SEQUENCES
        // ============================================================
        db.execute_unprepared(NOTIFICATIONS_SQL).await?;
        db.execute_unprepared(SEQUENCES_SQL).await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        let db = manager.get_connection();
        db.execute_unprepared(DROP_ALL_SQL).await?;
        Ok(())
    }
}

// ============================================================
// SQL CONSTANTS
// ============================================================

const ENUMS_SQL: &str = r"
CREATE TYPE user_role AS ENUM (
    'admin', 'registrar', 'finance', 'instructor', 'sales_rep', 'marketing', 'student'
);

CREATE TYPE student_status AS ENUM (
    'Prospective', 'Enrolled', 'Active', 'Graduated', 'Withdrawn', 'Suspended'
);

CREATE TYPE enrollment_status AS ENUM (
    'Full-time', 'Part-time', 'Online', 'Hybrid'
);

CREATE TYPE lead_source AS ENUM (
    'Website', 'Social Media', 'Referral', 'Advertisement', 'Career Fair',
    'Trade Show', 'Event', 'Inbound', 'Cold Outreach', 'Other'
);

CREATE TYPE funding_source AS ENUM (
    'Self-Pay', 'Federal Aid', 'Private Loan', 'Scholarship', 'Employer', 'Other'
);

CREATE TYPE course_status AS ENUM (
    'Active', 'Inactive', 'Cancelled', 'Completed'
);

CREATE TYPE roster_status AS ENUM (
    'Enrolled', 'Dropped', 'Completed', 'Withdrawn'
);

CREATE TYPE history_status AS ENUM (
    'Enrolled', 'Completed', 'Withdrawn', 'Incomplete', 'Audit'
);

CREATE TYPE letter_grade AS ENUM (
    'A', 'A-', 'B+', 'B', 'B-', 'C+', 'C', 'C-', 'D+', 'D', 'D-', 'F',
    'I', 'W', 'P', 'NP'
);

CREATE TYPE finance_type AS ENUM (
    'Tuition', 'Payment', 'Fee', 'Refund', 'Scholarship', 'Loan', 'Credit', 'Debit'
);

CREATE TYPE finance_category AS ENUM (
    'Tuition', 'Books', 'Supplies', 'Lab Fees', 'Late Fees', 'Other'
);

CREATE TYPE finance_status AS ENUM (
    'Pending', 'Paid', 'Overdue', 'Cancelled', 'Refunded', 'Disputed'
);

CREATE TYPE payment_method AS ENUM (
    'Cash', 'Check', 'Credit Card', 'Debit Card', 'Bank Transfer',
    'Online Payment', 'ACH', 'Wire Transfer', 'Loan', 'Scholarship', 'Other'
);

CREATE TYPE txn_type AS ENUM (
    'Tuition', 'Payment', 'Refund', 'Fee', 'Scholarship', 'Loan', 'Credit',
    'Debit', 'Adjustment'
);

CREATE TYPE txn_status AS ENUM (
    'Settled', 'Pending', 'Overdue', 'Cancelled', 'Disputed', 'Reconciled'
);

CREATE TYPE account_category AS ENUM (
    'Assets', 'Liabilities', 'Equity', 'Revenue', 'Expenses'
);

CREATE TYPE audit_action AS ENUM (
    'Created', 'Updated', 'Approved', 'Reconciled', 'Cancelled', 'Disputed'
);

CREATE TYPE placement_status AS ENUM (
    'Applied', 'Interviewing', 'Offered', 'Employed', 'Rejected', 'Withdrawn', 'Not Seeking'
);

CREATE TYPE job_type AS ENUM (
    'Full-time', 'Part-time', 'Contract', 'Internship', 'Temporary', 'Freelance'
);

CREATE TYPE salary_type AS ENUM (
    'Hourly', 'Salary', 'Commission', 'Other'
);

CREATE TYPE interview_kind AS ENUM (
    'Phone', 'Video', 'In-Person', 'Panel', 'Technical', 'Other'
);

CREATE TYPE interview_outcome AS ENUM (
    'Passed', 'Failed', 'Pending', 'Cancelled'
);

CREATE TYPE verification_method AS ENUM (
    'Email', 'Phone', 'Document', 'In-Person', 'Other'
);

CREATE TYPE lead_status AS ENUM (
    'New', 'Contacted', 'Qualified', 'Proposal', 'Negotiation', 'Closed Won', 'Closed Lost'
);

CREATE TYPE deal_stage AS ENUM (
    'Prospecting', 'Qualification', 'Needs Analysis', 'Proposal', 'Negotiation',
    'Decision', 'Closed Won', 'Closed Lost'
);

CREATE TYPE priority AS ENUM (
    'Low', 'Medium', 'High', 'Critical'
);

CREATE TYPE task_status AS ENUM (
    'Pending', 'In Progress', 'Completed', 'Cancelled'
);

CREATE TYPE activity_kind AS ENUM (
    'Call', 'Email', 'Meeting', 'Note', 'Demo', 'Follow-up'
);

CREATE TYPE notification_kind AS ENUM (
    'success', 'info', 'warning', 'error'
);
";

const USERS_SQL: &str = r"
CREATE TABLE users (
    id UUID PRIMARY KEY,
    username TEXT NOT NULL UNIQUE,
    email TEXT NOT NULL UNIQUE,
    password_hash TEXT NOT NULL,
    first_name TEXT NOT NULL,
    last_name TEXT NOT NULL,
    phone TEXT,
    role user_role NOT NULL DEFAULT 'student',
    department TEXT,
    position TEXT,
    student_number TEXT,
    is_active BOOLEAN NOT NULL DEFAULT TRUE,
    email_verified_at TIMESTAMPTZ,
    last_login_at TIMESTAMPTZ,
    failed_login_attempts INTEGER NOT NULL DEFAULT 0,
    locked_until TIMESTAMPTZ,
    password_reset_token TEXT,
    password_reset_expires_at TIMESTAMPTZ,
    email_verification_token TEXT,
    email_verification_expires_at TIMESTAMPTZ,
    avatar TEXT,
    bio TEXT,
    preferences JSONB,
    created_at TIMESTAMPTZ NOT NULL,
    updated_at TIMESTAMPTZ NOT NULL
);

CREATE INDEX idx_users_role ON users (role);
CREATE INDEX idx_users_is_active ON users (is_active);
";

const STUDENTS_SQL: &str = r"
CREATE TABLE students (
    id UUID PRIMARY KEY,
    student_number TEXT NOT NULL UNIQUE,
    name TEXT NOT NULL,
    email TEXT NOT NULL UNIQUE,
    phone TEXT,
    date_of_birth DATE,
    gender TEXT,
    campus TEXT NOT NULL,
    program TEXT NOT NULL,
    session TEXT NOT NULL,
    first_term DATE NOT NULL,
    expected_graduation DATE,
    status student_status NOT NULL DEFAULT 'Prospective',
    enrollment_status enrollment_status NOT NULL DEFAULT 'Full-time',
    lead_source lead_source,
    cohort_group TEXT,
    address JSONB,
    emergency_contact JSONB,
    funding_source funding_source,
    notes TEXT,
    documents JSONB,
    is_active BOOLEAN NOT NULL DEFAULT TRUE,
    last_login_at TIMESTAMPTZ,
    created_at TIMESTAMPTZ NOT NULL,
    updated_at TIMESTAMPTZ NOT NULL
);

CREATE INDEX idx_students_status ON students (status);
CREATE INDEX idx_students_program ON students (program);
CREATE INDEX idx_students_campus ON students (campus);
";

const COURSES_SQL: &str = r"
CREATE TABLE courses (
    id UUID PRIMARY KEY,
    course_code TEXT NOT NULL UNIQUE,
    title TEXT NOT NULL,
    description TEXT,
    credits NUMERIC(5, 2) NOT NULL,
    lecture_hours INTEGER NOT NULL DEFAULT 0,
    lab_hours INTEGER NOT NULL DEFAULT 0,
    clinical_hours INTEGER NOT NULL DEFAULT 0,
    total_hours INTEGER NOT NULL,
    term TEXT NOT NULL,
    session TEXT NOT NULL,
    academic_year TEXT NOT NULL,
    instructor_name TEXT NOT NULL,
    instructor_email TEXT NOT NULL,
    instructor_phone TEXT,
    instructor_department TEXT,
    schedule JSONB,
    enrollment_limit INTEGER NOT NULL CHECK (enrollment_limit >= 1),
    prerequisites JSONB,
    materials JSONB,
    grading_policy JSONB,
    status course_status NOT NULL DEFAULT 'Active',
    notes TEXT,
    syllabus TEXT,
    is_active BOOLEAN NOT NULL DEFAULT TRUE,
    created_by UUID,
    created_at TIMESTAMPTZ NOT NULL,
    updated_at TIMESTAMPTZ NOT NULL
);

CREATE INDEX idx_courses_term_session ON courses (term, session);
CREATE INDEX idx_courses_status ON courses (status);

CREATE TABLE course_enrollments (
    id UUID PRIMARY KEY,
    course_id UUID NOT NULL REFERENCES courses (id) ON DELETE CASCADE,
    student_number TEXT NOT NULL,
    status roster_status NOT NULL DEFAULT 'Enrolled',
    enrolled_at TIMESTAMPTZ NOT NULL,
    updated_at TIMESTAMPTZ NOT NULL
);

CREATE INDEX idx_course_enrollments_course ON course_enrollments (course_id, status);
CREATE INDEX idx_course_enrollments_student ON course_enrollments (student_number);
";

const ACADEMIC_HISTORY_SQL: &str = r"
CREATE TABLE academic_history (
    id UUID PRIMARY KEY,
    student_number TEXT NOT NULL,
    course_code TEXT NOT NULL,
    course_title TEXT NOT NULL,
    term TEXT NOT NULL,
    session TEXT NOT NULL,
    academic_year TEXT NOT NULL,
    grade letter_grade NOT NULL,
    grade_points NUMERIC(4, 2) CHECK (grade_points >= 0 AND grade_points <= 4),
    credits NUMERIC(5, 2) NOT NULL CHECK (credits >= 0),
    total_sessions INTEGER NOT NULL DEFAULT 0,
    attended_sessions INTEGER NOT NULL DEFAULT 0,
    attendance_percent NUMERIC(5, 2),
    scores JSONB,
    status history_status NOT NULL DEFAULT 'Enrolled',
    enrolled_at TIMESTAMPTZ NOT NULL,
    completion_date DATE,
    withdrawal_date DATE,
    instructor_name TEXT,
    instructor_email TEXT,
    comments JSONB,
    is_retake BOOLEAN NOT NULL DEFAULT FALSE,
    original_grade TEXT,
    is_transfer_credit BOOLEAN NOT NULL DEFAULT FALSE,
    transfer_institution TEXT,
    is_active BOOLEAN NOT NULL DEFAULT TRUE,
    created_at TIMESTAMPTZ NOT NULL,
    updated_at TIMESTAMPTZ NOT NULL
);

CREATE INDEX idx_academic_history_student ON academic_history (student_number);
CREATE INDEX idx_academic_history_course ON academic_history (course_code);
CREATE INDEX idx_academic_history_grade ON academic_history (grade);
CREATE INDEX idx_academic_history_status ON academic_history (status);
";

const FINANCE_SQL: &str = r"
CREATE TABLE finance_records (
    id UUID PRIMARY KEY,
    student_number TEXT NOT NULL,
    record_type finance_type NOT NULL,
    category finance_category NOT NULL DEFAULT 'Other',
    amount NUMERIC(12, 2) NOT NULL CHECK (amount >= 0),
    original_amount NUMERIC(12, 2),
    record_date DATE NOT NULL,
    due_date DATE,
    paid_date DATE,
    term TEXT NOT NULL,
    session TEXT NOT NULL,
    funding_source funding_source,
    status finance_status NOT NULL DEFAULT 'Pending',
    payment_method payment_method,
    reference_number TEXT NOT NULL UNIQUE,
    check_number TEXT,
    external_transaction_id TEXT,
    description TEXT NOT NULL,
    notes TEXT,
    approved_by UUID,
    approved_at TIMESTAMPTZ,
    processed_by UUID,
    processed_at TIMESTAMPTZ,
    attachments JSONB,
    is_active BOOLEAN NOT NULL DEFAULT TRUE,
    is_recurring BOOLEAN NOT NULL DEFAULT FALSE,
    recurring_frequency TEXT,
    created_at TIMESTAMPTZ NOT NULL,
    updated_at TIMESTAMPTZ NOT NULL
);

CREATE INDEX idx_finance_records_student ON finance_records (student_number);
CREATE INDEX idx_finance_records_status ON finance_records (status);
CREATE INDEX idx_finance_records_date ON finance_records (record_date DESC);
";

const ACCOUNTING_SQL: &str = r"
CREATE TABLE accounting_transactions (
    id UUID PRIMARY KEY,
    reference_number TEXT NOT NULL UNIQUE,
    student_number TEXT NOT NULL,
    txn_type txn_type NOT NULL,
    amount NUMERIC(12, 2) NOT NULL CHECK (amount >= 0),
    original_amount NUMERIC(12, 2),
    method payment_method NOT NULL,
    ledger_code TEXT NOT NULL,
    account_category account_category NOT NULL,
    sub_category TEXT,
    status txn_status NOT NULL DEFAULT 'Pending',
    transaction_date DATE NOT NULL,
    due_date DATE,
    settlement_date DATE,
    term TEXT,
    session TEXT,
    academic_year TEXT,
    payment_reference TEXT,
    check_number TEXT,
    card_last_four VARCHAR(4),
    reconciled BOOLEAN NOT NULL DEFAULT FALSE,
    reconciliation_date TIMESTAMPTZ,
    reconciled_by UUID,
    approved BOOLEAN NOT NULL DEFAULT FALSE,
    approved_by UUID,
    approved_at TIMESTAMPTZ,
    approval_notes TEXT,
    description TEXT NOT NULL,
    notes TEXT,
    internal_notes TEXT,
    attachments JSONB,
    is_active BOOLEAN NOT NULL DEFAULT TRUE,
    created_by UUID NOT NULL,
    created_at TIMESTAMPTZ NOT NULL,
    updated_at TIMESTAMPTZ NOT NULL
);

CREATE INDEX idx_accounting_transactions_student ON accounting_transactions (student_number);
CREATE INDEX idx_accounting_transactions_status ON accounting_transactions (status);
CREATE INDEX idx_accounting_transactions_date ON accounting_transactions (transaction_date DESC);
CREATE INDEX idx_accounting_transactions_ledger ON accounting_transactions (ledger_code);
CREATE INDEX idx_accounting_transactions_reconciled ON accounting_transactions (reconciled);

CREATE TABLE transaction_audit_logs (
    id UUID PRIMARY KEY,
    transaction_id UUID NOT NULL REFERENCES accounting_transactions (id) ON DELETE CASCADE,
    action audit_action NOT NULL,
    performed_by UUID NOT NULL,
    performed_at TIMESTAMPTZ NOT NULL,
    notes TEXT
);

CREATE INDEX idx_transaction_audit_logs_txn ON transaction_audit_logs (transaction_id);
";

const PLACEMENTS_SQL: &str = r"
CREATE TABLE placements (
    id UUID PRIMARY KEY,
    student_number TEXT NOT NULL,
    company_name TEXT NOT NULL,
    company_industry TEXT,
    company_size TEXT,
    company_website TEXT,
    company_address JSONB,
    job_title TEXT NOT NULL,
    job_type job_type NOT NULL,
    department TEXT,
    start_date DATE NOT NULL,
    end_date DATE,
    hours_per_week INTEGER CHECK (hours_per_week >= 0),
    salary_amount NUMERIC(12, 2) CHECK (salary_amount >= 0),
    salary_type salary_type,
    salary_currency TEXT NOT NULL DEFAULT 'USD',
    benefits JSONB,
    status placement_status NOT NULL DEFAULT 'Applied',
    application_date DATE NOT NULL,
    contact_name TEXT NOT NULL,
    contact_title TEXT,
    contact_email TEXT NOT NULL,
    contact_phone TEXT,
    application_method TEXT,
    resume_submitted BOOLEAN NOT NULL DEFAULT FALSE,
    cover_letter_submitted BOOLEAN NOT NULL DEFAULT FALSE,
    verified BOOLEAN NOT NULL DEFAULT FALSE,
    verification_date TIMESTAMPTZ,
    verification_method verification_method,
    verification_source TEXT,
    performance_rating INTEGER CHECK (performance_rating BETWEEN 1 AND 5),
    performance_feedback TEXT,
    notes TEXT,
    documents JSONB,
    is_active BOOLEAN NOT NULL DEFAULT TRUE,
    created_by UUID,
    created_at TIMESTAMPTZ NOT NULL,
    updated_at TIMESTAMPTZ NOT NULL
);

CREATE INDEX idx_placements_student ON placements (student_number);
CREATE INDEX idx_placements_status ON placements (status);
CREATE INDEX idx_placements_start_date ON placements (start_date DESC);

CREATE TABLE placement_interviews (
    id UUID PRIMARY KEY,
    placement_id UUID NOT NULL REFERENCES placements (id) ON DELETE CASCADE,
    interview_date TIMESTAMPTZ NOT NULL,
    kind interview_kind NOT NULL,
    interviewer TEXT,
    notes TEXT,
    outcome interview_outcome NOT NULL DEFAULT 'Pending',
    created_at TIMESTAMPTZ NOT NULL
);

CREATE INDEX idx_placement_interviews_placement ON placement_interviews (placement_id);
";

const CRM_SQL: &str = r"
CREATE TABLE accounts (
    id UUID PRIMARY KEY,
    name TEXT NOT NULL,
    industry TEXT,
    website TEXT,
    phone TEXT,
    address JSONB,
    account_owner UUID NOT NULL,
    source lead_source,
    notes TEXT,
    is_active BOOLEAN NOT NULL DEFAULT TRUE,
    created_by UUID NOT NULL,
    created_at TIMESTAMPTZ NOT NULL,
    updated_at TIMESTAMPTZ NOT NULL
);

CREATE INDEX idx_accounts_owner ON accounts (account_owner);

CREATE TABLE contacts (
    id UUID PRIMARY KEY,
    account_id UUID NOT NULL REFERENCES accounts (id) ON DELETE CASCADE,
    first_name TEXT NOT NULL,
    last_name TEXT NOT NULL,
    email TEXT,
    phone TEXT,
    position TEXT,
    is_primary BOOLEAN NOT NULL DEFAULT FALSE,
    notes TEXT,
    is_active BOOLEAN NOT NULL DEFAULT TRUE,
    created_by UUID NOT NULL,
    created_at TIMESTAMPTZ NOT NULL,
    updated_at TIMESTAMPTZ NOT NULL
);

CREATE INDEX idx_contacts_account ON contacts (account_id);

CREATE TABLE leads (
    id UUID PRIMARY KEY,
    first_name TEXT NOT NULL,
    last_name TEXT NOT NULL,
    email TEXT NOT NULL,
    phone TEXT,
    company TEXT,
    position TEXT,
    status lead_status NOT NULL DEFAULT 'New',
    lead_score INTEGER NOT NULL DEFAULT 0 CHECK (lead_score BETWEEN 0 AND 100),
    source lead_source NOT NULL,
    source_details TEXT,
    school_district TEXT,
    school_type TEXT,
    student_count INTEGER CHECK (student_count >= 0),
    territory TEXT,
    address JSONB,
    preferred_contact TEXT,
    time_zone TEXT,
    tags JSONB,
    industry TEXT,
    estimated_value NUMERIC(12, 2) CHECK (estimated_value >= 0),
    budget_range TEXT,
    expected_close_date DATE,
    next_follow_up DATE,
    last_contact_date TIMESTAMPTZ,
    decision_maker BOOLEAN NOT NULL DEFAULT FALSE,
    has_budget BOOLEAN NOT NULL DEFAULT FALSE,
    has_need BOOLEAN NOT NULL DEFAULT FALSE,
    has_timeline BOOLEAN NOT NULL DEFAULT FALSE,
    notes TEXT,
    lost_reason TEXT,
    converted_to_account UUID REFERENCES accounts (id),
    converted_at TIMESTAMPTZ,
    assigned_to UUID NOT NULL,
    created_by UUID NOT NULL,
    updated_by UUID,
    is_active BOOLEAN NOT NULL DEFAULT TRUE,
    created_at TIMESTAMPTZ NOT NULL,
    updated_at TIMESTAMPTZ NOT NULL
);

CREATE INDEX idx_leads_assigned_status ON leads (assigned_to, status);
CREATE INDEX idx_leads_source ON leads (source);
CREATE INDEX idx_leads_created_at ON leads (created_at DESC);

CREATE TABLE deals (
    id UUID PRIMARY KEY,
    name TEXT NOT NULL,
    description TEXT,
    value NUMERIC(12, 2) NOT NULL CHECK (value >= 0),
    currency TEXT NOT NULL DEFAULT 'USD',
    probability INTEGER NOT NULL DEFAULT 50 CHECK (probability BETWEEN 0 AND 100),
    stage deal_stage NOT NULL DEFAULT 'Prospecting',
    pipeline TEXT NOT NULL DEFAULT 'Default',
    account_id UUID NOT NULL REFERENCES accounts (id),
    primary_contact_id UUID REFERENCES contacts (id),
    assigned_to UUID NOT NULL,
    expected_close_date DATE NOT NULL,
    actual_close_date DATE,
    next_step TEXT,
    next_step_date DATE,
    products JSONB,
    service_type TEXT,
    lead_source lead_source,
    loss_reason TEXT,
    competitor_won TEXT,
    contract_type TEXT,
    contract_length_months INTEGER CHECK (contract_length_months >= 1),
    renewal_date DATE,
    tags JSONB,
    priority priority NOT NULL DEFAULT 'Medium',
    notes TEXT,
    is_active BOOLEAN NOT NULL DEFAULT TRUE,
    created_by UUID NOT NULL,
    updated_by UUID,
    created_at TIMESTAMPTZ NOT NULL,
    updated_at TIMESTAMPTZ NOT NULL
);

CREATE INDEX idx_deals_assigned_stage ON deals (assigned_to, stage);
CREATE INDEX idx_deals_account ON deals (account_id);
CREATE INDEX idx_deals_expected_close ON deals (expected_close_date);

CREATE TABLE crm_tasks (
    id UUID PRIMARY KEY,
    title TEXT NOT NULL,
    description TEXT,
    due_date TIMESTAMPTZ,
    status task_status NOT NULL DEFAULT 'Pending',
    priority priority NOT NULL DEFAULT 'Medium',
    related_lead_id UUID REFERENCES leads (id),
    related_deal_id UUID REFERENCES deals (id),
    related_account_id UUID REFERENCES accounts (id),
    assigned_to UUID NOT NULL,
    created_by UUID NOT NULL,
    completed_at TIMESTAMPTZ,
    is_active BOOLEAN NOT NULL DEFAULT TRUE,
    created_at TIMESTAMPTZ NOT NULL,
    updated_at TIMESTAMPTZ NOT NULL
);

CREATE INDEX idx_crm_tasks_assigned ON crm_tasks (assigned_to, status);

CREATE TABLE activities (
    id UUID PRIMARY KEY,
    kind activity_kind NOT NULL,
    subject TEXT NOT NULL,
    detail TEXT,
    activity_date TIMESTAMPTZ NOT NULL,
    duration_minutes INTEGER CHECK (duration_minutes >= 0),
    related_lead_id UUID REFERENCES leads (id),
    related_deal_id UUID REFERENCES deals (id),
    related_account_id UUID REFERENCES accounts (id),
    related_contact_id UUID REFERENCES contacts (id),
    performed_by UUID NOT NULL,
    created_by UUID NOT NULL,
    is_active BOOLEAN NOT NULL DEFAULT TRUE,
    created_at TIMESTAMPTZ NOT NULL,
    updated_at TIMESTAMPTZ NOT NULL
);

CREATE INDEX idx_activities_lead ON activities (related_lead_id);
CREATE INDEX idx_activities_deal ON activities (related_deal_id);
";

const NOTIFICATIONS_SQL: &str = r"
CREATE TABLE notifications (
    id UUID PRIMARY KEY,
    title TEXT NOT NULL,
    message TEXT NOT NULL,
    kind notification_kind NOT NULL DEFAULT 'info',
    category TEXT,
    read BOOLEAN NOT NULL DEFAULT FALSE,
    important BOOLEAN NOT NULL DEFAULT FALSE,
    user_id UUID,
    created_at TIMESTAMPTZ NOT NULL,
    updated_at TIMESTAMPTZ NOT NULL
);

CREATE INDEX idx_notifications_read ON notifications (read);
CREATE INDEX idx_notifications_created_at ON notifications (created_at DESC);
";

const SEQUENCES_SQL: &str = r"
CREATE TABLE sequences (
    name TEXT PRIMARY KEY,
    value BIGINT NOT NULL DEFAULT 0
);
";

const DROP_ALL_SQL: &str = r"
DROP TABLE IF EXISTS sequences;
DROP TABLE IF EXISTS notifications;
DROP TABLE IF EXISTS activities;
DROP TABLE IF EXISTS crm_tasks;
DROP TABLE IF EXISTS deals;
DROP TABLE IF EXISTS leads;
DROP TABLE IF EXISTS contacts;
DROP TABLE IF EXISTS accounts;
DROP TABLE IF EXISTS placement_interviews;
DROP TABLE IF EXISTS placements;
DROP TABLE IF EXISTS transaction_audit_logs;
DROP TABLE IF EXISTS accounting_transactions;
DROP TABLE IF EXISTS finance_records;
DROP TABLE IF EXISTS academic_history;
DROP TABLE IF EXISTS course_enrollments;
DROP TABLE IF EXISTS courses;
DROP TABLE IF EXISTS students;
DROP TABLE IF EXISTS users;

DROP TYPE IF EXISTS notification_kind;
DROP TYPE IF EXISTS activity_kind;
DROP TYPE IF EXISTS task_status;
DROP TYPE IF EXISTS priority;
DROP TYPE IF EXISTS deal_stage;
DROP TYPE IF EXISTS lead_status;
DROP TYPE IF EXISTS verification_method;
DROP TYPE IF EXISTS interview_outcome;
DROP TYPE IF EXISTS interview_kind;
DROP TYPE IF EXISTS salary_type;
DROP TYPE IF EXISTS job_type;
DROP TYPE IF EXISTS placement_status;
DROP TYPE IF EXISTS audit_action;
DROP TYPE IF EXISTS account_category;
DROP TYPE IF EXISTS txn_status;
DROP TYPE IF EXISTS txn_type;
DROP TYPE IF EXISTS payment_method;
DROP TYPE IF EXISTS finance_status;
DROP TYPE IF EXISTS finance_category;
DROP TYPE IF EXISTS finance_type;
DROP TYPE IF EXISTS letter_grade;
DROP TYPE IF EXISTS history_status;
DROP TYPE IF EXISTS roster_status;
DROP TYPE IF EXISTS course_status;
DROP TYPE IF EXISTS funding_source;
DROP TYPE IF EXISTS lead_source;
DROP TYPE IF EXISTS enrollment_status;
DROP TYPE IF EXISTS student_status;
DROP TYPE IF EXISTS user_role;
";
