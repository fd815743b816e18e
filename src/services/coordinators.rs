use crate::{
    db::DbPool,
    entities::coordinator,
    errors::ServiceError,
    events::{Event, EventSender},
};
use sea_orm::{ActiveModelTrait, EntityTrait, QueryOrder, Set};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{info, instrument};
use utoipa::ToSchema;
use validator::Validate;

#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct CoordinatorInput {
    #[validate(length(min = 2, message = "Name must have at least 2 characters"))]
    pub name: String,
    #[validate(length(min = 2, message = "Surnames must have at least 2 characters"))]
    pub surnames: String,
}

/// Service for managing coordinators
#[derive(Clone)]
pub struct CoordinatorService {
    db_pool: Arc<DbPool>,
    event_sender: Arc<EventSender>,
}

impl CoordinatorService {
    pub fn new(db_pool: Arc<DbPool>, event_sender: Arc<EventSender>) -> Self {
        Self {
            db_pool,
            event_sender,
        }
    }

    /// Creates a new coordinator
    #[instrument(skip(self))]
    pub async fn create(&self, input: CoordinatorInput) -> Result<coordinator::Model, ServiceError> {
        input.validate()?;

        let db = &*self.db_pool;
        let saved = coordinator::ActiveModel {
            name: Set(input.name.trim().to_string()),
            surnames: Set(input.surnames.trim().to_string()),
            ..Default::default()
        }
        .insert(db)
        .await
        .map_err(ServiceError::from_db)?;

        info!(coordinator_id = saved.id, "Coordinator created");
        self.event_sender
            .send(Event::CoordinatorCreated(saved.id))
            .await
            .map_err(ServiceError::Event)?;

        Ok(saved)
    }

    /// Updates an existing coordinator
    #[instrument(skip(self))]
    pub async fn update(
        &self,
        id: i32,
        input: CoordinatorInput,
    ) -> Result<coordinator::Model, ServiceError> {
        input.validate()?;

        let db = &*self.db_pool;
        let existing = coordinator::Entity::find_by_id(id)
            .one(db)
            .await
            .map_err(ServiceError::from_db)?
            .ok_or_else(|| ServiceError::NotFound(format!("Coordinator {} not found", id)))?;

        let mut active: coordinator::ActiveModel = existing.into();
        active.name = Set(input.name.trim().to_string());
        active.surnames = Set(input.surnames.trim().to_string());
        let saved = active.update(db).await.map_err(ServiceError::from_db)?;

        self.event_sender
            .send(Event::CoordinatorUpdated(saved.id))
            .await
            .map_err(ServiceError::Event)?;

        Ok(saved)
    }

    /// Gets a coordinator by ID
    #[instrument(skip(self))]
    pub async fn get(&self, id: i32) -> Result<Option<coordinator::Model>, ServiceError> {
        let db = &*self.db_pool;
        coordinator::Entity::find_by_id(id)
            .one(db)
            .await
            .map_err(ServiceError::from_db)
    }

    /// Lists coordinators in insertion order
    #[instrument(skip(self))]
    pub async fn list(&self) -> Result<Vec<coordinator::Model>, ServiceError> {
        let db = &*self.db_pool;
        coordinator::Entity::find()
            .order_by_asc(coordinator::Column::Id)
            .all(db)
            .await
            .map_err(ServiceError::from_db)
    }
}
