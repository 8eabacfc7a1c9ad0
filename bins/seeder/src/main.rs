//! Database seeder for Atrium development and testing.
//!
//! Seeds an admin user, a handful of students, one course and matching
//! finance records for local development.
//!
//! Usage: cargo run --bin seeder

use chrono::{NaiveDate, Utc};
use rust_decimal::Decimal;
use sea_orm::{ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, Set};
use std::str::FromStr;
use uuid::Uuid;

use atrium_db::entities::{
    courses, finance_records,
    sea_orm_active_enums::{
        CourseStatus, EnrollmentStatus, FinanceCategory, FinanceStatus, FinanceType,
        StudentStatus, UserRole,
    },
    students, users,
};

/// Seed admin user ID (consistent for all seeds)
const ADMIN_USER_ID: &str = "00000000-0000-0000-0000-000000000001";

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    let database_url =
        std::env::var("DATABASE_URL").expect("DATABASE_URL must be set in environment");

    println!("Connecting to database...");
    let db = atrium_db::connect(&database_url)
        .await
        .expect("Failed to connect to database");

    println!("Seeding admin user...");
    seed_admin_user(&db).await;

    println!("Seeding students...");
    seed_students(&db).await;

    println!("Seeding course...");
    seed_course(&db).await;

    println!("Seeding finance records...");
    seed_finance_records(&db).await;

    println!("Seeding complete!");
}

fn admin_user_id() -> Uuid {
    Uuid::parse_str(ADMIN_USER_ID).unwrap()
}

async fn seed_admin_user(db: &DatabaseConnection) {
    let existing = users::Entity::find_by_id(admin_user_id())
        .one(db)
        .await
        .expect("Failed to query users");
    if existing.is_some() {
        println!("  Admin user already exists, skipping");
        return;
    }

    // Password: "admin-password" (hashed with the same Argon2id defaults
    // the auth service uses).
    let password_hash =
        atrium_core::auth::hash_password("admin-password").expect("Failed to hash password");

    let now = Utc::now().into();
    let user = users::ActiveModel {
        id: Set(admin_user_id()),
        username: Set("admin".to_string()),
        email: Set("admin@atrium.test".to_string()),
        password_hash: Set(password_hash),
        first_name: Set("Atrium".to_string()),
        last_name: Set("Admin".to_string()),
        phone: Set(None),
        role: Set(UserRole::Admin),
        department: Set(Some("Administration".to_string())),
        position: Set(Some("System Administrator".to_string())),
        student_number: Set(None),
        is_active: Set(true),
        email_verified_at: Set(Some(now)),
        last_login_at: Set(None),
        failed_login_attempts: Set(0),
        locked_until: Set(None),
        password_reset_token: Set(None),
        password_reset_expires_at: Set(None),
        email_verification_token: Set(None),
        email_verification_expires_at: Set(None),
        avatar: Set(None),
        bio: Set(None),
        preferences: Set(None),
        created_at: Set(now),
        updated_at: Set(now),
    };
    user.insert(db).await.expect("Failed to seed admin user");
}

async fn seed_students(db: &DatabaseConnection) {
    let samples = [
        ("STU260001", "Sarah Johnson", "sarah.johnson@example.com", "Massage Therapy"),
        ("STU260002", "Michael Chen", "michael.chen@example.com", "Massage Therapy"),
        ("STU260003", "Priya Patel", "priya.patel@example.com", "Esthetics"),
    ];

    let now = Utc::now().into();
    for (number, name, email, program) in samples {
        let exists = students::Entity::find()
            .filter(students::Column::StudentNumber.eq(number))
            .one(db)
            .await
            .expect("Failed to query students")
            .is_some();
        if exists {
            continue;
        }

        let student = students::ActiveModel {
            id: Set(Uuid::new_v4()),
            student_number: Set(number.to_string()),
            name: Set(name.to_string()),
            email: Set(email.to_string()),
            phone: Set(None),
            date_of_birth: Set(None),
            gender: Set(None),
            campus: Set("Main".to_string()),
            program: Set(program.to_string()),
            session: Set("Day".to_string()),
            first_term: Set(NaiveDate::from_ymd_opt(2026, 1, 12).unwrap()),
            expected_graduation: Set(None),
            status: Set(StudentStatus::Active),
            enrollment_status: Set(EnrollmentStatus::FullTime),
            lead_source: Set(None),
            cohort_group: Set(None),
            address: Set(None),
            emergency_contact: Set(None),
            funding_source: Set(None),
            notes: Set(None),
            documents: Set(None),
            is_active: Set(true),
            last_login_at: Set(None),
            created_at: Set(now),
            updated_at: Set(now),
        };
        if let Err(e) = student.insert(db).await {
            println!("  Skipping student {number}: {e}");
        }
    }
}

async fn seed_course(db: &DatabaseConnection) {
    let now = Utc::now().into();
    let course = courses::ActiveModel {
        id: Set(Uuid::new_v4()),
        course_code: Set("MT101".to_string()),
        title: Set("Introduction to Swedish Massage".to_string()),
        description: Set(None),
        credits: Set(Decimal::from_str("3.0").unwrap()),
        lecture_hours: Set(30),
        lab_hours: Set(60),
        clinical_hours: Set(0),
        total_hours: Set(90),
        term: Set("Spring".to_string()),
        session: Set("Day".to_string()),
        academic_year: Set("2026".to_string()),
        instructor_name: Set("Dana Reeves".to_string()),
        instructor_email: Set("dana.reeves@atrium.test".to_string()),
        instructor_phone: Set(None),
        instructor_department: Set(Some("Massage Therapy".to_string())),
        schedule: Set(None),
        enrollment_limit: Set(24),
        prerequisites: Set(None),
        materials: Set(None),
        grading_policy: Set(None),
        status: Set(CourseStatus::Active),
        notes: Set(None),
        syllabus: Set(None),
        is_active: Set(true),
        created_by: Set(Some(admin_user_id())),
        created_at: Set(now),
        updated_at: Set(now),
    };
    if let Err(e) = course.insert(db).await {
        println!("  Skipping course MT101: {e}");
    }
}

async fn seed_finance_records(db: &DatabaseConnection) {
    let now = Utc::now();
    let record = finance_records::ActiveModel {
        id: Set(Uuid::new_v4()),
        student_number: Set("STU260001".to_string()),
        record_type: Set(FinanceType::Tuition),
        category: Set(FinanceCategory::Tuition),
        amount: Set(Decimal::from_str("4500.00").unwrap()),
        original_amount: Set(Some(Decimal::from_str("4500.00").unwrap())),
        record_date: Set(now.date_naive()),
        due_date: Set(None),
        paid_date: Set(None),
        term: Set("Spring".to_string()),
        session: Set("Day".to_string()),
        funding_source: Set(None),
        status: Set(FinanceStatus::Pending),
        payment_method: Set(None),
        reference_number: Set("FIN2601000001".to_string()),
        check_number: Set(None),
        external_transaction_id: Set(None),
        description: Set("Spring term tuition".to_string()),
        notes: Set(None),
        approved_by: Set(None),
        approved_at: Set(None),
        processed_by: Set(None),
        processed_at: Set(None),
        attachments: Set(None),
        is_active: Set(true),
        is_recurring: Set(false),
        recurring_frequency: Set(None),
        created_at: Set(now.into()),
        updated_at: Set(now.into()),
    };
    if let Err(e) = record.insert(db).await {
        println!("  Skipping finance record: {e}");
    }
}
