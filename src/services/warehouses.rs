use crate::{
    db::DbPool,
    entities::{warehouse, zone::Zone},
    errors::ServiceError,
    events::{Event, EventSender},
};
use sea_orm::{ActiveModelTrait, ColumnTrait, EntityTrait, QueryFilter, QueryOrder, Set};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{info, instrument};
use utoipa::ToSchema;
use validator::Validate;

#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct WarehouseInput {
    #[validate(length(min = 1, message = "Name must not be empty"))]
    pub name: String,
    /// Regulatory council registry code; free text.
    #[serde(default)]
    pub codigo_consejo: String,
    pub zone: Option<Zone>,
}

/// Service for managing warehouses ("bodegas")
#[derive(Clone)]
pub struct WarehouseService {
    db_pool: Arc<DbPool>,
    event_sender: Arc<EventSender>,
}

impl WarehouseService {
    pub fn new(db_pool: Arc<DbPool>, event_sender: Arc<EventSender>) -> Self {
        Self {
            db_pool,
            event_sender,
        }
    }

    /// Creates a new warehouse
    #[instrument(skip(self))]
    pub async fn create(&self, input: WarehouseInput) -> Result<warehouse::Model, ServiceError> {
        input.validate()?;

        let db = &*self.db_pool;
        let saved = warehouse::ActiveModel {
            name: Set(input.name.trim().to_string()),
            codigo_consejo: Set(input.codigo_consejo.trim().to_string()),
            zone: Set(input.zone),
            ..Default::default()
        }
        .insert(db)
        .await
        .map_err(ServiceError::from_db)?;

        info!(warehouse_id = saved.id, "Warehouse created");
        self.event_sender
            .send(Event::WarehouseCreated(saved.id))
            .await
            .map_err(ServiceError::Event)?;

        Ok(saved)
    }

    /// Updates an existing warehouse
    #[instrument(skip(self))]
    pub async fn update(
        &self,
        id: i32,
        input: WarehouseInput,
    ) -> Result<warehouse::Model, ServiceError> {
        input.validate()?;

        let db = &*self.db_pool;
        let existing = warehouse::Entity::find_by_id(id)
            .one(db)
            .await
            .map_err(ServiceError::from_db)?
            .ok_or_else(|| ServiceError::NotFound(format!("Warehouse {} not found", id)))?;

        let mut active: warehouse::ActiveModel = existing.into();
        active.name = Set(input.name.trim().to_string());
        active.codigo_consejo = Set(input.codigo_consejo.trim().to_string());
        active.zone = Set(input.zone);
        let saved = active.update(db).await.map_err(ServiceError::from_db)?;

        self.event_sender
            .send(Event::WarehouseUpdated(saved.id))
            .await
            .map_err(ServiceError::Event)?;

        Ok(saved)
    }

    /// Gets a warehouse by ID
    #[instrument(skip(self))]
    pub async fn get(&self, id: i32) -> Result<Option<warehouse::Model>, ServiceError> {
        let db = &*self.db_pool;
        warehouse::Entity::find_by_id(id)
            .one(db)
            .await
            .map_err(ServiceError::from_db)
    }

    /// Lists warehouses in insertion order
    #[instrument(skip(self))]
    pub async fn list(&self) -> Result<Vec<warehouse::Model>, ServiceError> {
        let db = &*self.db_pool;
        warehouse::Entity::find()
            .order_by_asc(warehouse::Column::Id)
            .all(db)
            .await
            .map_err(ServiceError::from_db)
    }

    /// Natural-key lookup used by the import dedup
    #[instrument(skip(self))]
    pub async fn find_by_codigo_consejo(
        &self,
        codigo_consejo: &str,
    ) -> Result<Option<warehouse::Model>, ServiceError> {
        let db = &*self.db_pool;
        warehouse::Entity::find()
            .filter(warehouse::Column::CodigoConsejo.eq(codigo_consejo))
            .one(db)
            .await
            .map_err(ServiceError::from_db)
    }
}
