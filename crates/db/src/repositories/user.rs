//! User repository for database operations.

use chrono::{DateTime, Duration, Utc};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, DbErr, EntityTrait, IntoActiveModel,
    PaginatorTrait, QueryFilter, Set,
};
use uuid::Uuid;

use crate::entities::{sea_orm_active_enums::UserRole, users};

/// Hours a password reset token stays valid.
const RESET_TOKEN_HOURS: i64 = 1;

/// Hours an email verification token stays valid.
const VERIFICATION_TOKEN_HOURS: i64 = 24;

/// Input for creating a user.
#[derive(Debug, Clone)]
pub struct CreateUserInput {
    /// Unique username.
    pub username: String,
    /// Unique email.
    pub email: String,
    /// Argon2id password hash.
    pub password_hash: String,
    /// First name.
    pub first_name: String,
    /// Last name.
    pub last_name: String,
    /// Role.
    pub role: UserRole,
    /// Department.
    pub department: Option<String>,
    /// Position.
    pub position: Option<String>,
}

/// Allow-listed profile fields.
#[derive(Debug, Clone, Default)]
pub struct UpdateProfileInput {
    /// First name.
    pub first_name: Option<String>,
    /// Last name.
    pub last_name: Option<String>,
    /// Phone number.
    pub phone: Option<String>,
    /// Department.
    pub department: Option<String>,
    /// Position.
    pub position: Option<String>,
    /// Short bio.
    pub bio: Option<String>,
    /// UI preferences blob.
    pub preferences: Option<serde_json::Value>,
}

/// User repository for CRUD and credential operations.
#[derive(Debug, Clone)]
pub struct UserRepository {
    db: DatabaseConnection,
}

impl UserRepository {
    /// Creates a new user repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Finds a user by email.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn find_by_email(&self, email: &str) -> Result<Option<users::Model>, DbErr> {
        users::Entity::find()
            .filter(users::Column::Email.eq(email.to_lowercase()))
            .one(&self.db)
            .await
    }

    /// Finds a user by ID.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<users::Model>, DbErr> {
        users::Entity::find_by_id(id).one(&self.db).await
    }

    /// Checks if an email is already registered.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn email_exists(&self, email: &str) -> Result<bool, DbErr> {
        let count = users::Entity::find()
            .filter(users::Column::Email.eq(email.to_lowercase()))
            .count(&self.db)
            .await?;

        Ok(count > 0)
    }

    /// Checks if a username is taken.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn username_exists(&self, username: &str) -> Result<bool, DbErr> {
        let count = users::Entity::find()
            .filter(users::Column::Username.eq(username.to_lowercase()))
            .count(&self.db)
            .await?;

        Ok(count > 0)
    }

    /// Creates a new user.
    ///
    /// # Errors
    ///
    /// Returns an error if the database insert fails.
    pub async fn create(&self, input: CreateUserInput) -> Result<users::Model, DbErr> {
        let now = Utc::now().into();
        let user = users::ActiveModel {
            id: Set(Uuid::new_v4()),
            username: Set(input.username.to_lowercase()),
            email: Set(input.email.to_lowercase()),
            password_hash: Set(input.password_hash),
            first_name: Set(input.first_name),
            last_name: Set(input.last_name),
            phone: Set(None),
            role: Set(input.role),
            department: Set(input.department),
            position: Set(input.position),
            student_number: Set(None),
            is_active: Set(true),
            email_verified_at: Set(None),
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

        user.insert(&self.db).await
    }

    /// Persists a failed login attempt: counter plus optional lockout.
    ///
    /// # Errors
    ///
    /// Returns an error if the database update fails.
    pub async fn record_failed_login(
        &self,
        user: users::Model,
        attempts: i32,
        locked_until: Option<DateTime<Utc>>,
    ) -> Result<users::Model, DbErr> {
        let mut active = user.into_active_model();
        active.failed_login_attempts = Set(attempts);
        active.locked_until = Set(locked_until.map(Into::into));
        active.updated_at = Set(Utc::now().into());
        active.update(&self.db).await
    }

    /// Resets the lockout counter and stamps the last login.
    ///
    /// # Errors
    ///
    /// Returns an error if the database update fails.
    pub async fn record_successful_login(&self, user: users::Model) -> Result<users::Model, DbErr> {
        let now = Utc::now();
        let mut active = user.into_active_model();
        active.failed_login_attempts = Set(0);
        active.locked_until = Set(None);
        active.last_login_at = Set(Some(now.into()));
        active.updated_at = Set(now.into());
        active.update(&self.db).await
    }

    /// Applies an allow-listed profile update.
    ///
    /// # Errors
    ///
    /// Returns an error if the database update fails.
    pub async fn update_profile(
        &self,
        user: users::Model,
        input: UpdateProfileInput,
    ) -> Result<users::Model, DbErr> {
        let mut active = user.into_active_model();
        if let Some(first_name) = input.first_name {
            active.first_name = Set(first_name);
        }
        if let Some(last_name) = input.last_name {
            active.last_name = Set(last_name);
        }
        if let Some(phone) = input.phone {
            active.phone = Set(Some(phone));
        }
        if let Some(department) = input.department {
            active.department = Set(Some(department));
        }
        if let Some(position) = input.position {
            active.position = Set(Some(position));
        }
        if let Some(bio) = input.bio {
            active.bio = Set(Some(bio));
        }
        if let Some(preferences) = input.preferences {
            active.preferences = Set(Some(preferences));
        }
        active.updated_at = Set(Utc::now().into());
        active.update(&self.db).await
    }

    /// Replaces the password hash.
    ///
    /// # Errors
    ///
    /// Returns an error if the database update fails.
    pub async fn change_password(
        &self,
        user: users::Model,
        password_hash: String,
    ) -> Result<users::Model, DbErr> {
        let mut active = user.into_active_model();
        active.password_hash = Set(password_hash);
        active.password_reset_token = Set(None);
        active.password_reset_expires_at = Set(None);
        active.updated_at = Set(Utc::now().into());
        active.update(&self.db).await
    }

    /// Stores a password reset token with a one-hour expiry.
    ///
    /// # Errors
    ///
    /// Returns an error if the database update fails.
    pub async fn set_reset_token(
        &self,
        user: users::Model,
        token: String,
    ) -> Result<users::Model, DbErr> {
        let now = Utc::now();
        let mut active = user.into_active_model();
        active.password_reset_token = Set(Some(token));
        active.password_reset_expires_at =
            Set(Some((now + Duration::hours(RESET_TOKEN_HOURS)).into()));
        active.updated_at = Set(now.into());
        active.update(&self.db).await
    }

    /// Finds the user holding an unexpired reset token.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn find_by_reset_token(&self, token: &str) -> Result<Option<users::Model>, DbErr> {
        users::Entity::find()
            .filter(users::Column::PasswordResetToken.eq(token))
            .filter(users::Column::PasswordResetExpiresAt.gt(Utc::now()))
            .one(&self.db)
            .await
    }

    /// Stores an email verification token with a 24-hour expiry.
    ///
    /// # Errors
    ///
    /// Returns an error if the database update fails.
    pub async fn set_verification_token(
        &self,
        user: users::Model,
        token: String,
    ) -> Result<users::Model, DbErr> {
        let now = Utc::now();
        let mut active = user.into_active_model();
        active.email_verification_token = Set(Some(token));
        active.email_verification_expires_at =
            Set(Some((now + Duration::hours(VERIFICATION_TOKEN_HOURS)).into()));
        active.updated_at = Set(now.into());
        active.update(&self.db).await
    }

    /// Marks an email verified if the token is valid and unexpired.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query or update fails.
    pub async fn verify_email_token(&self, token: &str) -> Result<Option<users::Model>, DbErr> {
        let user = users::Entity::find()
            .filter(users::Column::EmailVerificationToken.eq(token))
            .filter(users::Column::EmailVerificationExpiresAt.gt(Utc::now()))
            .one(&self.db)
            .await?;

        let Some(user) = user else {
            return Ok(None);
        };

        let now = Utc::now();
        let mut active = user.into_active_model();
        active.email_verified_at = Set(Some(now.into()));
        active.email_verification_token = Set(None);
        active.email_verification_expires_at = Set(None);
        active.updated_at = Set(now.into());
        active.update(&self.db).await.map(Some)
    }
}
