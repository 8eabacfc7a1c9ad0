//! Notification repository.
//!
//! Notifications are persisted rows rather than an in-memory list, so they
//! survive restarts. They are system messages, not domain records, so the
//! delete path here is a real delete.

use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, DbErr, EntityTrait, IntoActiveModel,
    QueryFilter, QueryOrder, Set,
};
use uuid::Uuid;

use crate::entities::{notifications, sea_orm_active_enums::NotificationKind};

/// Input for creating a notification.
#[derive(Debug, Clone)]
pub struct CreateNotificationInput {
    /// Headline.
    pub title: String,
    /// Body text.
    pub message: String,
    /// Kind.
    pub kind: NotificationKind,
    /// Originating module.
    pub category: Option<String>,
    /// Flagged important.
    pub important: bool,
    /// Recipient; broadcast when absent.
    pub user_id: Option<Uuid>,
}

/// Allow-listed update fields for a notification.
#[derive(Debug, Clone, Default)]
pub struct UpdateNotificationInput {
    /// Read flag.
    pub read: Option<bool>,
    /// Important flag.
    pub important: Option<bool>,
}

/// Notification repository.
#[derive(Debug, Clone)]
pub struct NotificationRepository {
    db: DatabaseConnection,
}

impl NotificationRepository {
    /// Creates a new notification repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Lists notifications, newest first.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn list(&self, unread_only: bool) -> Result<Vec<notifications::Model>, DbErr> {
        let mut query = notifications::Entity::find();
        if unread_only {
            query = query.filter(notifications::Column::Read.eq(false));
        }
        query
            .order_by_desc(notifications::Column::CreatedAt)
            .all(&self.db)
            .await
    }

    /// Creates a notification.
    ///
    /// # Errors
    ///
    /// Returns an error if the database insert fails.
    pub async fn create(
        &self,
        input: CreateNotificationInput,
    ) -> Result<notifications::Model, DbErr> {
        let now = Utc::now().into();
        let notification = notifications::ActiveModel {
            id: Set(Uuid::new_v4()),
            title: Set(input.title),
            message: Set(input.message),
            kind: Set(input.kind),
            category: Set(input.category),
            read: Set(false),
            important: Set(input.important),
            user_id: Set(input.user_id),
            created_at: Set(now),
            updated_at: Set(now),
        };

        notification.insert(&self.db).await
    }

    /// Applies an allow-listed update.
    ///
    /// # Errors
    ///
    /// Returns an error if the database update fails; `Ok(None)` when the id
    /// does not exist.
    pub async fn update(
        &self,
        id: Uuid,
        input: UpdateNotificationInput,
    ) -> Result<Option<notifications::Model>, DbErr> {
        let Some(notification) = notifications::Entity::find_by_id(id).one(&self.db).await? else {
            return Ok(None);
        };

        let mut active = notification.into_active_model();
        if let Some(read) = input.read {
            active.read = Set(read);
        }
        if let Some(important) = input.important {
            active.important = Set(important);
        }
        active.updated_at = Set(Utc::now().into());

        active.update(&self.db).await.map(Some)
    }

    /// Deletes a notification. Returns whether a row was removed.
    ///
    /// # Errors
    ///
    /// Returns an error if the database delete fails.
    pub async fn delete(&self, id: Uuid) -> Result<bool, DbErr> {
        let result = notifications::Entity::delete_by_id(id).exec(&self.db).await?;
        Ok(result.rows_affected > 0)
    }
}
