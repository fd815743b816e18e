use crate::{
    db::DbPool,
    entities::{coordinator, incident_action, incident_record, incident_type, verifier, warehouse},
    errors::ServiceError,
    events::{Event, EventSender},
};
use sea_orm::{ActiveModelTrait, EntityTrait, QueryOrder, Set, TransactionError, TransactionTrait};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{info, instrument};
use utoipa::ToSchema;

/// Snapshot of all six tables, one array per table. A pure interchange
/// format: the core never reads its own decisions back out of a backup.
#[derive(Debug, Default, Serialize, Deserialize, ToSchema)]
pub struct BackupDocument {
    pub coordinators: Vec<coordinator::Model>,
    pub verifiers: Vec<verifier::Model>,
    pub warehouses: Vec<warehouse::Model>,
    pub incident_types: Vec<incident_type::Model>,
    pub incident_records: Vec<incident_record::Model>,
    pub incident_actions: Vec<incident_action::Model>,
}

/// Backup, restore and test-data teardown.
#[derive(Clone)]
pub struct BackupService {
    db_pool: Arc<DbPool>,
    event_sender: Arc<EventSender>,
}

impl BackupService {
    pub fn new(db_pool: Arc<DbPool>, event_sender: Arc<EventSender>) -> Self {
        Self {
            db_pool,
            event_sender,
        }
    }

    /// Serializes all six tables
    #[instrument(skip(self))]
    pub async fn snapshot(&self) -> Result<BackupDocument, ServiceError> {
        let db = &*self.db_pool;

        Ok(BackupDocument {
            coordinators: coordinator::Entity::find()
                .order_by_asc(coordinator::Column::Id)
                .all(db)
                .await
                .map_err(ServiceError::from_db)?,
            verifiers: verifier::Entity::find()
                .order_by_asc(verifier::Column::Id)
                .all(db)
                .await
                .map_err(ServiceError::from_db)?,
            warehouses: warehouse::Entity::find()
                .order_by_asc(warehouse::Column::Id)
                .all(db)
                .await
                .map_err(ServiceError::from_db)?,
            incident_types: incident_type::Entity::find()
                .order_by_asc(incident_type::Column::Id)
                .all(db)
                .await
                .map_err(ServiceError::from_db)?,
            incident_records: incident_record::Entity::find()
                .order_by_asc(incident_record::Column::Id)
                .all(db)
                .await
                .map_err(ServiceError::from_db)?,
            incident_actions: incident_action::Entity::find()
                .order_by_asc(incident_action::Column::Id)
                .all(db)
                .await
                .map_err(ServiceError::from_db)?,
        })
    }

    /// Reloads a snapshot, parents before children, preserving ids. The
    /// whole reload is one transaction; a half-restored store never
    /// becomes visible.
    #[instrument(skip(self, document))]
    pub async fn restore(&self, document: BackupDocument) -> Result<(), ServiceError> {
        let db = &*self.db_pool;

        db.transaction::<_, (), ServiceError>(move |txn| {
            Box::pin(async move {
                for c in document.coordinators {
                    coordinator::ActiveModel {
                        id: Set(c.id),
                        name: Set(c.name),
                        surnames: Set(c.surnames),
                    }
                    .insert(txn)
                    .await
                    .map_err(ServiceError::from_db)?;
                }
                for v in document.verifiers {
                    verifier::ActiveModel {
                        id: Set(v.id),
                        name: Set(v.name),
                        surnames: Set(v.surnames),
                        phone: Set(v.phone),
                        zone: Set(v.zone),
                    }
                    .insert(txn)
                    .await
                    .map_err(ServiceError::from_db)?;
                }
                for w in document.warehouses {
                    warehouse::ActiveModel {
                        id: Set(w.id),
                        name: Set(w.name),
                        codigo_consejo: Set(w.codigo_consejo),
                        zone: Set(w.zone),
                    }
                    .insert(txn)
                    .await
                    .map_err(ServiceError::from_db)?;
                }
                for t in document.incident_types {
                    incident_type::ActiveModel {
                        id: Set(t.id),
                        code: Set(t.code),
                        description: Set(t.description),
                    }
                    .insert(txn)
                    .await
                    .map_err(ServiceError::from_db)?;
                }
                for r in document.incident_records {
                    incident_record::ActiveModel {
                        id: Set(r.id),
                        date: Set(r.date),
                        registering_coordinator_id: Set(r.registering_coordinator_id),
                        warehouse_id: Set(r.warehouse_id),
                        causing_verifier_id: Set(r.causing_verifier_id),
                        incident_type_id: Set(r.incident_type_id),
                        assigned_coordinator_id: Set(r.assigned_coordinator_id),
                        explanation: Set(r.explanation),
                        status: Set(r.status),
                        responsible: Set(r.responsible),
                    }
                    .insert(txn)
                    .await
                    .map_err(ServiceError::from_db)?;
                }
                for a in document.incident_actions {
                    incident_action::ActiveModel {
                        id: Set(a.id),
                        incident_record_id: Set(a.incident_record_id),
                        action_date: Set(a.action_date),
                        action_description: Set(a.action_description),
                        new_status: Set(a.new_status),
                        performed_by: Set(a.performed_by),
                    }
                    .insert(txn)
                    .await
                    .map_err(ServiceError::from_db)?;
                }
                Ok(())
            })
        })
        .await
        .map_err(|e| match e {
            TransactionError::Connection(db_err) => ServiceError::from_db(db_err),
            TransactionError::Transaction(service_err) => service_err,
        })?;

        info!("Backup restored");
        self.event_sender
            .send(Event::DatabaseRestored)
            .await
            .map_err(ServiceError::Event)?;

        Ok(())
    }

    /// Purges all six tables, children first. Test-data teardown only.
    #[instrument(skip(self))]
    pub async fn reset(&self) -> Result<(), ServiceError> {
        let db = &*self.db_pool;

        db.transaction::<_, (), ServiceError>(|txn| {
            Box::pin(async move {
                incident_action::Entity::delete_many()
                    .exec(txn)
                    .await
                    .map_err(ServiceError::from_db)?;
                incident_record::Entity::delete_many()
                    .exec(txn)
                    .await
                    .map_err(ServiceError::from_db)?;
                incident_type::Entity::delete_many()
                    .exec(txn)
                    .await
                    .map_err(ServiceError::from_db)?;
                warehouse::Entity::delete_many()
                    .exec(txn)
                    .await
                    .map_err(ServiceError::from_db)?;
                verifier::Entity::delete_many()
                    .exec(txn)
                    .await
                    .map_err(ServiceError::from_db)?;
                coordinator::Entity::delete_many()
                    .exec(txn)
                    .await
                    .map_err(ServiceError::from_db)?;
                Ok(())
            })
        })
        .await
        .map_err(|e| match e {
            TransactionError::Connection(db_err) => ServiceError::from_db(db_err),
            TransactionError::Transaction(service_err) => service_err,
        })?;

        info!("All tables purged");
        self.event_sender
            .send(Event::DatabaseReset)
            .await
            .map_err(ServiceError::Event)?;

        Ok(())
    }
}
