use crate::{
    commands::incident_types::{allocate_code, CreateIncidentTypeCommand},
    commands::Command,
    db::DbPool,
    entities::incident_type,
    errors::ServiceError,
    events::EventSender,
};
use sea_orm::{ColumnTrait, EntityTrait, QueryFilter, QueryOrder};
use std::sync::Arc;
use tracing::instrument;

/// Service for managing incident types and their unique codes
#[derive(Clone)]
pub struct IncidentTypeService {
    db_pool: Arc<DbPool>,
    event_sender: Arc<EventSender>,
}

impl IncidentTypeService {
    pub fn new(db_pool: Arc<DbPool>, event_sender: Arc<EventSender>) -> Self {
        Self {
            db_pool,
            event_sender,
        }
    }

    /// Allocates a code without persisting anything. Lets the forms show
    /// the next sequential code, or vet a custom one early.
    #[instrument(skip(self))]
    pub async fn allocate_code(&self, custom_code: Option<&str>) -> Result<String, ServiceError> {
        allocate_code(&self.db_pool, custom_code).await
    }

    /// Creates an incident type with an allocated code
    #[instrument(skip(self))]
    pub async fn create(
        &self,
        command: CreateIncidentTypeCommand,
    ) -> Result<incident_type::Model, ServiceError> {
        command
            .execute(self.db_pool.clone(), self.event_sender.clone())
            .await
    }

    /// Gets an incident type by ID
    #[instrument(skip(self))]
    pub async fn get(&self, id: i32) -> Result<Option<incident_type::Model>, ServiceError> {
        let db = &*self.db_pool;
        incident_type::Entity::find_by_id(id)
            .one(db)
            .await
            .map_err(ServiceError::from_db)
    }

    /// Looks an incident type up by its unique code
    #[instrument(skip(self))]
    pub async fn find_by_code(
        &self,
        code: &str,
    ) -> Result<Option<incident_type::Model>, ServiceError> {
        let db = &*self.db_pool;
        incident_type::Entity::find()
            .filter(incident_type::Column::Code.eq(code))
            .one(db)
            .await
            .map_err(ServiceError::from_db)
    }

    /// Lists incident types in insertion order
    #[instrument(skip(self))]
    pub async fn list(&self) -> Result<Vec<incident_type::Model>, ServiceError> {
        let db = &*self.db_pool;
        incident_type::Entity::find()
            .order_by_asc(incident_type::Column::Id)
            .all(db)
            .await
            .map_err(ServiceError::from_db)
    }
}
