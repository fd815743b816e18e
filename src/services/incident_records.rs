use crate::{
    commands::incident_records::CreateIncidentRecordCommand,
    commands::Command,
    db::DbPool,
    entities::{incident_record, incident_type},
    errors::ServiceError,
    events::EventSender,
    queries::{resolve_record_views, IncidentRecordView},
};
use sea_orm::{ColumnTrait, EntityTrait, QueryFilter, QueryOrder};
use serde::Serialize;
use std::sync::Arc;
use tracing::instrument;
use utoipa::ToSchema;

/// Outcome of a code search. An unknown code is not a failure of the
/// lookup itself, and a known code with no linked records is plain success.
#[derive(Debug, Serialize, ToSchema)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum IncidentCodeSearch {
    UnknownCode,
    Matches {
        incident_type: incident_type::Model,
        records: Vec<IncidentRecordView>,
    },
}

/// Service for creating and querying incident records
#[derive(Clone)]
pub struct IncidentRecordService {
    db_pool: Arc<DbPool>,
    event_sender: Arc<EventSender>,
}

impl IncidentRecordService {
    pub fn new(db_pool: Arc<DbPool>, event_sender: Arc<EventSender>) -> Self {
        Self {
            db_pool,
            event_sender,
        }
    }

    /// Creates a new incident record
    #[instrument(skip(self))]
    pub async fn create(
        &self,
        command: CreateIncidentRecordCommand,
    ) -> Result<incident_record::Model, ServiceError> {
        command
            .execute(self.db_pool.clone(), self.event_sender.clone())
            .await
    }

    /// Gets a record by ID without resolving joins
    #[instrument(skip(self))]
    pub async fn get(&self, id: i32) -> Result<Option<incident_record::Model>, ServiceError> {
        let db = &*self.db_pool;
        incident_record::Entity::find_by_id(id)
            .one(db)
            .await
            .map_err(ServiceError::from_db)
    }

    /// Returns the denormalized view of one record
    #[instrument(skip(self))]
    pub async fn get_details(&self, id: i32) -> Result<IncidentRecordView, ServiceError> {
        let db = &*self.db_pool;
        let record = incident_record::Entity::find_by_id(id)
            .one(db)
            .await
            .map_err(ServiceError::from_db)?
            .ok_or_else(|| ServiceError::NotFound(format!("Incident record {} not found", id)))?;

        let mut views = resolve_record_views(db, std::slice::from_ref(&record)).await?;
        Ok(views.remove(0))
    }

    /// Lists every record as a joined view, newest first
    #[instrument(skip(self))]
    pub async fn list_views(&self) -> Result<Vec<IncidentRecordView>, ServiceError> {
        let db = &*self.db_pool;
        let records = incident_record::Entity::find()
            .order_by_desc(incident_record::Column::Date)
            .order_by_desc(incident_record::Column::Id)
            .all(db)
            .await
            .map_err(ServiceError::from_db)?;

        resolve_record_views(db, &records).await
    }

    /// Finds every record linked to the incident type with the given code,
    /// newest first
    #[instrument(skip(self))]
    pub async fn search_by_incident_code(
        &self,
        code: &str,
    ) -> Result<IncidentCodeSearch, ServiceError> {
        let db = &*self.db_pool;

        let incident_type = match incident_type::Entity::find()
            .filter(incident_type::Column::Code.eq(code))
            .one(db)
            .await
            .map_err(ServiceError::from_db)?
        {
            Some(t) => t,
            None => return Ok(IncidentCodeSearch::UnknownCode),
        };

        let records = incident_record::Entity::find()
            .filter(incident_record::Column::IncidentTypeId.eq(incident_type.id))
            .order_by_desc(incident_record::Column::Date)
            .order_by_desc(incident_record::Column::Id)
            .all(db)
            .await
            .map_err(ServiceError::from_db)?;

        let records = resolve_record_views(db, &records).await?;

        Ok(IncidentCodeSearch::Matches {
            incident_type,
            records,
        })
    }
}
