//! Read-side helpers producing denormalized views.
//!
//! Joins are resolved as id-to-name lookup maps built once per query, and a
//! missing join degrades to "N/A" instead of dropping the row or the field.

use std::collections::{HashMap, HashSet};

use chrono::NaiveDate;
use sea_orm::{ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::entities::{
    coordinator, incident_action, incident_record,
    incident_record::{IncidentStatus, Responsible},
    incident_type, verifier, warehouse,
};
use crate::errors::ServiceError;

pub const MISSING: &str = "N/A";

/// Incident record with every foreign key resolved to its display form.
/// This is what listings, search, export and analytics consume.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct IncidentRecordView {
    pub id: i32,
    pub date: NaiveDate,
    pub registering_coordinator: String,
    pub warehouse: String,
    pub warehouse_zone: String,
    pub causing_verifier: String,
    pub verifier_zone: String,
    pub incident_code: String,
    pub incident_type: String,
    pub assigned_coordinator: String,
    pub explanation: String,
    pub status: IncidentStatus,
    pub responsible: Responsible,
}

/// Ledger entry with the performing coordinator resolved.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct IncidentActionView {
    pub id: i32,
    pub incident_record_id: i32,
    pub action_date: NaiveDate,
    pub action_description: String,
    pub new_status: Option<IncidentStatus>,
    pub performed_by: String,
}

/// Lookup maps for one batch of records.
struct RecordJoins {
    coordinators: HashMap<i32, coordinator::Model>,
    warehouses: HashMap<i32, warehouse::Model>,
    verifiers: HashMap<i32, verifier::Model>,
    incident_types: HashMap<i32, incident_type::Model>,
}

impl RecordJoins {
    async fn load(
        db: &DatabaseConnection,
        records: &[incident_record::Model],
    ) -> Result<Self, ServiceError> {
        let mut coordinator_ids = HashSet::new();
        let mut warehouse_ids = HashSet::new();
        let mut verifier_ids = HashSet::new();
        let mut type_ids = HashSet::new();

        for record in records {
            coordinator_ids.insert(record.registering_coordinator_id);
            coordinator_ids.insert(record.assigned_coordinator_id);
            warehouse_ids.insert(record.warehouse_id);
            verifier_ids.insert(record.causing_verifier_id);
            type_ids.insert(record.incident_type_id);
        }

        let coordinators = coordinator::Entity::find()
            .filter(coordinator::Column::Id.is_in(coordinator_ids))
            .all(db)
            .await
            .map_err(ServiceError::from_db)?
            .into_iter()
            .map(|c| (c.id, c))
            .collect();

        let warehouses = warehouse::Entity::find()
            .filter(warehouse::Column::Id.is_in(warehouse_ids))
            .all(db)
            .await
            .map_err(ServiceError::from_db)?
            .into_iter()
            .map(|w| (w.id, w))
            .collect();

        let verifiers = verifier::Entity::find()
            .filter(verifier::Column::Id.is_in(verifier_ids))
            .all(db)
            .await
            .map_err(ServiceError::from_db)?
            .into_iter()
            .map(|v| (v.id, v))
            .collect();

        let incident_types = incident_type::Entity::find()
            .filter(incident_type::Column::Id.is_in(type_ids))
            .all(db)
            .await
            .map_err(ServiceError::from_db)?
            .into_iter()
            .map(|t| (t.id, t))
            .collect();

        Ok(Self {
            coordinators,
            warehouses,
            verifiers,
            incident_types,
        })
    }

    fn view(&self, record: &incident_record::Model) -> IncidentRecordView {
        let coordinator_name = |id: i32| {
            self.coordinators
                .get(&id)
                .map(|c| c.full_name())
                .unwrap_or_else(|| MISSING.to_string())
        };

        let (warehouse_name, warehouse_zone) = self
            .warehouses
            .get(&record.warehouse_id)
            .map(|w| {
                (
                    w.name.clone(),
                    w.zone
                        .map(|z| z.to_string())
                        .unwrap_or_else(|| MISSING.to_string()),
                )
            })
            .unwrap_or_else(|| (MISSING.to_string(), MISSING.to_string()));

        let (verifier_name, verifier_zone) = self
            .verifiers
            .get(&record.causing_verifier_id)
            .map(|v| {
                (
                    v.full_name(),
                    v.zone
                        .map(|z| z.to_string())
                        .unwrap_or_else(|| MISSING.to_string()),
                )
            })
            .unwrap_or_else(|| (MISSING.to_string(), MISSING.to_string()));

        let (incident_code, incident_type) = self
            .incident_types
            .get(&record.incident_type_id)
            .map(|t| (t.code.clone(), t.description.clone()))
            .unwrap_or_else(|| (MISSING.to_string(), MISSING.to_string()));

        IncidentRecordView {
            id: record.id,
            date: record.date,
            registering_coordinator: coordinator_name(record.registering_coordinator_id),
            warehouse: warehouse_name,
            warehouse_zone,
            causing_verifier: verifier_name,
            verifier_zone,
            incident_code,
            incident_type,
            assigned_coordinator: coordinator_name(record.assigned_coordinator_id),
            explanation: record.explanation.clone(),
            status: record.status,
            responsible: record.responsible,
        }
    }
}

/// Resolves a batch of records into views, preserving input order.
pub async fn resolve_record_views(
    db: &DatabaseConnection,
    records: &[incident_record::Model],
) -> Result<Vec<IncidentRecordView>, ServiceError> {
    if records.is_empty() {
        return Ok(Vec::new());
    }
    let joins = RecordJoins::load(db, records).await?;
    Ok(records.iter().map(|r| joins.view(r)).collect())
}

/// Resolves a batch of ledger entries, preserving input order.
pub async fn resolve_action_views(
    db: &DatabaseConnection,
    actions: &[incident_action::Model],
) -> Result<Vec<IncidentActionView>, ServiceError> {
    if actions.is_empty() {
        return Ok(Vec::new());
    }

    let performer_ids: HashSet<i32> = actions.iter().map(|a| a.performed_by).collect();
    let performers: HashMap<i32, coordinator::Model> = coordinator::Entity::find()
        .filter(coordinator::Column::Id.is_in(performer_ids))
        .all(db)
        .await
        .map_err(ServiceError::from_db)?
        .into_iter()
        .map(|c| (c.id, c))
        .collect();

    Ok(actions
        .iter()
        .map(|a| IncidentActionView {
            id: a.id,
            incident_record_id: a.incident_record_id,
            action_date: a.action_date,
            action_description: a.action_description.clone(),
            new_status: a.new_status,
            performed_by: performers
                .get(&a.performed_by)
                .map(|c| c.full_name())
                .unwrap_or_else(|| MISSING.to_string()),
        })
        .collect())
}
