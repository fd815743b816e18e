use crate::{
    db::DbPool,
    entities::{verifier, verifier::validate_phone, zone::Zone},
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
pub struct VerifierInput {
    #[validate(length(min = 2, message = "Name must have at least 2 characters"))]
    pub name: String,
    #[validate(length(min = 2, message = "Surnames must have at least 2 characters"))]
    pub surnames: String,
    /// Empty, or exactly 9 digits.
    #[serde(default)]
    #[validate(custom = "validate_phone")]
    pub phone: String,
    pub zone: Option<Zone>,
}

/// Service for managing field verifiers
#[derive(Clone)]
pub struct VerifierService {
    db_pool: Arc<DbPool>,
    event_sender: Arc<EventSender>,
}

impl VerifierService {
    pub fn new(db_pool: Arc<DbPool>, event_sender: Arc<EventSender>) -> Self {
        Self {
            db_pool,
            event_sender,
        }
    }

    /// Creates a new verifier
    #[instrument(skip(self))]
    pub async fn create(&self, input: VerifierInput) -> Result<verifier::Model, ServiceError> {
        input.validate()?;

        let db = &*self.db_pool;
        let saved = verifier::ActiveModel {
            name: Set(input.name.trim().to_string()),
            surnames: Set(input.surnames.trim().to_string()),
            phone: Set(input.phone.trim().to_string()),
            zone: Set(input.zone),
            ..Default::default()
        }
        .insert(db)
        .await
        .map_err(ServiceError::from_db)?;

        info!(verifier_id = saved.id, "Verifier created");
        self.event_sender
            .send(Event::VerifierCreated(saved.id))
            .await
            .map_err(ServiceError::Event)?;

        Ok(saved)
    }

    /// Updates an existing verifier
    #[instrument(skip(self))]
    pub async fn update(
        &self,
        id: i32,
        input: VerifierInput,
    ) -> Result<verifier::Model, ServiceError> {
        input.validate()?;

        let db = &*self.db_pool;
        let existing = verifier::Entity::find_by_id(id)
            .one(db)
            .await
            .map_err(ServiceError::from_db)?
            .ok_or_else(|| ServiceError::NotFound(format!("Verifier {} not found", id)))?;

        let mut active: verifier::ActiveModel = existing.into();
        active.name = Set(input.name.trim().to_string());
        active.surnames = Set(input.surnames.trim().to_string());
        active.phone = Set(input.phone.trim().to_string());
        active.zone = Set(input.zone);
        let saved = active.update(db).await.map_err(ServiceError::from_db)?;

        self.event_sender
            .send(Event::VerifierUpdated(saved.id))
            .await
            .map_err(ServiceError::Event)?;

        Ok(saved)
    }

    /// Gets a verifier by ID
    #[instrument(skip(self))]
    pub async fn get(&self, id: i32) -> Result<Option<verifier::Model>, ServiceError> {
        let db = &*self.db_pool;
        verifier::Entity::find_by_id(id)
            .one(db)
            .await
            .map_err(ServiceError::from_db)
    }

    /// Lists verifiers in insertion order
    #[instrument(skip(self))]
    pub async fn list(&self) -> Result<Vec<verifier::Model>, ServiceError> {
        let db = &*self.db_pool;
        verifier::Entity::find()
            .order_by_asc(verifier::Column::Id)
            .all(db)
            .await
            .map_err(ServiceError::from_db)
    }

    /// Natural-key lookup used by the import dedup
    #[instrument(skip(self))]
    pub async fn find_by_name_surnames(
        &self,
        name: &str,
        surnames: &str,
    ) -> Result<Option<verifier::Model>, ServiceError> {
        let db = &*self.db_pool;
        verifier::Entity::find()
            .filter(verifier::Column::Name.eq(name))
            .filter(verifier::Column::Surnames.eq(surnames))
            .one(db)
            .await
            .map_err(ServiceError::from_db)
    }
}
