//! Persistence accessor for the `todo` table.

use std::sync::Arc;

use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, DatabaseConnection, DbErr, EntityTrait, QueryOrder, Set, TransactionTrait,
};
use tally_api::v1::{Todo, TodoDraft};
use thiserror::Error;
use uuid::Uuid;

use crate::entity::todo;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("todo {0} not found")]
    NotFound(Uuid),
    #[error(transparent)]
    Db(#[from] DbErr),
}

/// Handle over the database connection, cheap to clone and share.
#[derive(Clone)]
pub struct TodoStore {
    db: Arc<DatabaseConnection>,
}

impl TodoStore {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db: Arc::new(db) }
    }

    /// All todos, creation time ascending with id as tie-break.
    pub async fn list_all(&self) -> Result<Vec<Todo>, StoreError> {
        let models = todo::Entity::find()
            .order_by_asc(todo::Column::Created)
            .order_by_asc(todo::Column::Id)
            .all(self.db.as_ref())
            .await?;

        Ok(models.into_iter().map(Todo::from).collect())
    }

    /// Inserts a new record with a fresh id and `completed = false`.
    pub async fn create(&self, draft: TodoDraft) -> Result<Todo, StoreError> {
        let model = todo::ActiveModel {
            id: Set(Uuid::new_v4()),
            title: Set(draft.title),
            description: Set(draft.description),
            completed: Set(false),
            created: Set(Utc::now()),
        }
        .insert(self.db.as_ref())
        .await?;

        Ok(model.into())
    }

    pub async fn find_by_id(&self, id: Uuid) -> Result<Todo, StoreError> {
        let model = todo::Entity::find_by_id(id)
            .one(self.db.as_ref())
            .await?
            .ok_or(StoreError::NotFound(id))?;

        Ok(model.into())
    }

    /// Rewrites title and description; the completed flag never travels
    /// this path.
    pub async fn update_fields(&self, id: Uuid, draft: TodoDraft) -> Result<Todo, StoreError> {
        let model = todo::Entity::find_by_id(id)
            .one(self.db.as_ref())
            .await?
            .ok_or(StoreError::NotFound(id))?;

        let mut record: todo::ActiveModel = model.into();
        record.title = Set(draft.title);
        record.description = Set(draft.description);

        let updated = record.update(self.db.as_ref()).await?;
        Ok(updated.into())
    }

    /// Flips the completed flag. The read and the write share one
    /// transaction, so concurrent toggles on the same id serialize instead
    /// of losing an update.
    pub async fn toggle_completed(&self, id: Uuid) -> Result<Todo, StoreError> {
        let txn = self.db.begin().await?;

        let model = todo::Entity::find_by_id(id)
            .one(&txn)
            .await?
            .ok_or(StoreError::NotFound(id))?;

        let completed = model.completed;
        let mut record: todo::ActiveModel = model.into();
        record.completed = Set(!completed);

        let updated = record.update(&txn).await?;
        txn.commit().await?;

        Ok(updated.into())
    }

    pub async fn delete(&self, id: Uuid) -> Result<(), StoreError> {
        let result = todo::Entity::delete_by_id(id)
            .exec(self.db.as_ref())
            .await?;

        if result.rows_affected == 0 {
            return Err(StoreError::NotFound(id));
        }

        Ok(())
    }
}
