use crate::{
    commands::incident_actions::AddIncidentActionCommand,
    commands::Command,
    db::DbPool,
    entities::{incident_action, incident_record, incident_record::IncidentStatus},
    errors::ServiceError,
    events::EventSender,
    queries::{resolve_action_views, IncidentActionView},
};
use sea_orm::{ColumnTrait, EntityTrait, QueryFilter, QueryOrder};
use std::sync::Arc;
use tracing::instrument;

/// Service for the append-only action ledger
#[derive(Clone)]
pub struct IncidentActionService {
    db_pool: Arc<DbPool>,
    event_sender: Arc<EventSender>,
}

impl IncidentActionService {
    pub fn new(db_pool: Arc<DbPool>, event_sender: Arc<EventSender>) -> Self {
        Self {
            db_pool,
            event_sender,
        }
    }

    /// Appends an action and, when it carries a new status, flips the
    /// owning record in the same commit
    #[instrument(skip(self))]
    pub async fn add(
        &self,
        command: AddIncidentActionCommand,
    ) -> Result<incident_action::Model, ServiceError> {
        command
            .execute(self.db_pool.clone(), self.event_sender.clone())
            .await
    }

    /// History of one record, ascending by action date, performers resolved
    #[instrument(skip(self))]
    pub async fn list(&self, record_id: i32) -> Result<Vec<IncidentActionView>, ServiceError> {
        let db = &*self.db_pool;

        if incident_record::Entity::find_by_id(record_id)
            .one(db)
            .await
            .map_err(ServiceError::from_db)?
            .is_none()
        {
            return Err(ServiceError::NotFound(format!(
                "Incident record {} not found",
                record_id
            )));
        }

        let actions = incident_action::Entity::find()
            .filter(incident_action::Column::IncidentRecordId.eq(record_id))
            .order_by_asc(incident_action::Column::ActionDate)
            .order_by_asc(incident_action::Column::Id)
            .all(db)
            .await
            .map_err(ServiceError::from_db)?;

        resolve_action_views(db, &actions).await
    }

    /// Recomputes the record's status from the ledger: the latest inserted
    /// entry that set a status wins, else the record's stored status. Used
    /// when redisplaying a record, as a cross-check on the stored column.
    #[instrument(skip(self))]
    pub async fn reconciled_status(&self, record_id: i32) -> Result<IncidentStatus, ServiceError> {
        let db = &*self.db_pool;

        let record = incident_record::Entity::find_by_id(record_id)
            .one(db)
            .await
            .map_err(ServiceError::from_db)?
            .ok_or_else(|| {
                ServiceError::NotFound(format!("Incident record {} not found", record_id))
            })?;

        let last_status_action = incident_action::Entity::find()
            .filter(incident_action::Column::IncidentRecordId.eq(record_id))
            .filter(incident_action::Column::NewStatus.is_not_null())
            .order_by_desc(incident_action::Column::Id)
            .one(db)
            .await
            .map_err(ServiceError::from_db)?;

        Ok(last_status_action
            .and_then(|a| a.new_status)
            .unwrap_or(record.status))
    }
}
