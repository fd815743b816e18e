use crate::{
    commands::Command,
    db::DbPool,
    entities::{coordinator, incident_action, incident_record, incident_record::IncidentStatus},
    errors::ServiceError,
    events::{Event, EventSender},
};
use chrono::NaiveDate;
use sea_orm::{ActiveModelTrait, EntityTrait, Set, TransactionError, TransactionTrait};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{error, info, instrument};
use utoipa::ToSchema;
use validator::Validate;

#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct AddIncidentActionCommand {
    pub incident_record_id: i32,
    pub action_date: NaiveDate,
    #[validate(length(min = 1, message = "Action description must not be empty"))]
    pub action_description: String,
    /// When set, the owning record moves to this status in the same commit.
    pub new_status: Option<IncidentStatus>,
    pub performed_by: i32,
}

#[async_trait::async_trait]
impl Command for AddIncidentActionCommand {
    type Result = incident_action::Model;

    #[instrument(skip(self, db_pool, event_sender))]
    async fn execute(
        &self,
        db_pool: Arc<DbPool>,
        event_sender: Arc<EventSender>,
    ) -> Result<Self::Result, ServiceError> {
        self.validate().map_err(|e| {
            let msg = format!("Invalid input: {}", e);
            error!("{}", msg);
            ServiceError::Validation(msg)
        })?;

        let db = db_pool.as_ref();

        let record_id = self.incident_record_id;
        let performed_by = self.performed_by;
        let action_date = self.action_date;
        let description = self.action_description.clone();
        let new_status = self.new_status;

        // Append and status flip are one ledger entry: either both land or
        // neither does.
        let saved = db
            .transaction::<_, incident_action::Model, ServiceError>(move |txn| {
                Box::pin(async move {
                    let record = incident_record::Entity::find_by_id(record_id)
                        .one(txn)
                        .await
                        .map_err(ServiceError::from_db)?
                        .ok_or_else(|| {
                            ServiceError::ReferentialIntegrity(format!(
                                "Incident record {} does not exist",
                                record_id
                            ))
                        })?;

                    if coordinator::Entity::find_by_id(performed_by)
                        .one(txn)
                        .await
                        .map_err(ServiceError::from_db)?
                        .is_none()
                    {
                        return Err(ServiceError::ReferentialIntegrity(format!(
                            "Coordinator {} does not exist",
                            performed_by
                        )));
                    }

                    let new_action = incident_action::ActiveModel {
                        incident_record_id: Set(record_id),
                        action_date: Set(action_date),
                        action_description: Set(description),
                        new_status: Set(new_status),
                        performed_by: Set(performed_by),
                        ..Default::default()
                    };

                    let saved_action =
                        new_action.insert(txn).await.map_err(ServiceError::from_db)?;

                    if let Some(status) = new_status {
                        let mut active: incident_record::ActiveModel = record.into();
                        active.status = Set(status);
                        active.update(txn).await.map_err(ServiceError::from_db)?;
                    }

                    Ok(saved_action)
                })
            })
            .await
            .map_err(|e| match e {
                TransactionError::Connection(db_err) => ServiceError::from_db(db_err),
                TransactionError::Transaction(service_err) => service_err,
            })?;

        info!(
            record_id = self.incident_record_id,
            action_id = saved.id,
            new_status = ?self.new_status,
            "Incident action appended"
        );

        event_sender
            .send(Event::IncidentActionLogged {
                record_id: self.incident_record_id,
                action_id: saved.id,
                new_status: self.new_status,
            })
            .await
            .map_err(ServiceError::Event)?;

        Ok(saved)
    }
}
