use crate::{
    commands::Command,
    db::DbPool,
    entities::{
        coordinator, incident_record,
        incident_record::{IncidentStatus, Responsible},
        incident_type, verifier, warehouse,
    },
    errors::ServiceError,
    events::{Event, EventSender},
};
use chrono::NaiveDate;
use sea_orm::{ActiveModelTrait, DatabaseConnection, EntityTrait, Set};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{error, info, instrument};
use utoipa::ToSchema;

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct CreateIncidentRecordCommand {
    pub date: NaiveDate,
    pub registering_coordinator_id: i32,
    pub warehouse_id: i32,
    pub causing_verifier_id: i32,
    pub incident_type_id: i32,
    pub assigned_coordinator_id: i32,
    #[serde(default)]
    pub explanation: String,
    pub status: IncidentStatus,
    pub responsible: Responsible,
}

impl CreateIncidentRecordCommand {
    /// The forms only offer ids taken from live lists, but the engine does
    /// not trust its callers: every reference is re-checked here so a stale
    /// or hand-crafted id rejects the whole create instead of surfacing
    /// later as an "N/A" join.
    async fn check_references(&self, db: &DatabaseConnection) -> Result<(), ServiceError> {
        let missing = |what: &str, id: i32| {
            ServiceError::ReferentialIntegrity(format!("{} {} does not exist", what, id))
        };

        if coordinator::Entity::find_by_id(self.registering_coordinator_id)
            .one(db)
            .await
            .map_err(ServiceError::from_db)?
            .is_none()
        {
            return Err(missing(
                "Registering coordinator",
                self.registering_coordinator_id,
            ));
        }
        if warehouse::Entity::find_by_id(self.warehouse_id)
            .one(db)
            .await
            .map_err(ServiceError::from_db)?
            .is_none()
        {
            return Err(missing("Warehouse", self.warehouse_id));
        }
        if verifier::Entity::find_by_id(self.causing_verifier_id)
            .one(db)
            .await
            .map_err(ServiceError::from_db)?
            .is_none()
        {
            return Err(missing("Causing verifier", self.causing_verifier_id));
        }
        if incident_type::Entity::find_by_id(self.incident_type_id)
            .one(db)
            .await
            .map_err(ServiceError::from_db)?
            .is_none()
        {
            return Err(missing("Incident type", self.incident_type_id));
        }
        if coordinator::Entity::find_by_id(self.assigned_coordinator_id)
            .one(db)
            .await
            .map_err(ServiceError::from_db)?
            .is_none()
        {
            return Err(missing(
                "Assigned coordinator",
                self.assigned_coordinator_id,
            ));
        }

        Ok(())
    }
}

#[async_trait::async_trait]
impl Command for CreateIncidentRecordCommand {
    type Result = incident_record::Model;

    #[instrument(skip(self, db_pool, event_sender))]
    async fn execute(
        &self,
        db_pool: Arc<DbPool>,
        event_sender: Arc<EventSender>,
    ) -> Result<Self::Result, ServiceError> {
        let db = db_pool.as_ref();

        self.check_references(db).await?;

        let new_record = incident_record::ActiveModel {
            date: Set(self.date),
            registering_coordinator_id: Set(self.registering_coordinator_id),
            warehouse_id: Set(self.warehouse_id),
            causing_verifier_id: Set(self.causing_verifier_id),
            incident_type_id: Set(self.incident_type_id),
            assigned_coordinator_id: Set(self.assigned_coordinator_id),
            explanation: Set(self.explanation.clone()),
            status: Set(self.status),
            responsible: Set(self.responsible),
            ..Default::default()
        };

        let saved = new_record.insert(db).await.map_err(|e| {
            error!("Failed to create incident record: {}", e);
            ServiceError::from_db(e)
        })?;

        info!(
            record_id = saved.id,
            warehouse_id = self.warehouse_id,
            incident_type_id = self.incident_type_id,
            "Incident record created"
        );

        event_sender
            .send(Event::IncidentRecordCreated(saved.id))
            .await
            .map_err(ServiceError::Event)?;

        Ok(saved)
    }
}
