//! Axum route handlers, one module per resource.

use std::sync::Arc;

use crate::db::DbPool;
use crate::events::EventSender;
use crate::services::{
    backup::BackupService, coordinators::CoordinatorService, exports::ExportService,
    imports::ImportService, incident_actions::IncidentActionService,
    incident_records::IncidentRecordService, incident_types::IncidentTypeService,
    reports::ReportService, verifiers::VerifierService, warehouses::WarehouseService,
};

pub mod auth;
pub mod backup;
pub mod coordinators;
pub mod exports;
pub mod imports;
pub mod incident_records;
pub mod incident_types;
pub mod reports;
pub mod verifiers;
pub mod warehouses;

/// All business services, built once at startup and shared through the
/// router state.
#[derive(Clone)]
pub struct AppServices {
    pub coordinators: CoordinatorService,
    pub verifiers: VerifierService,
    pub warehouses: WarehouseService,
    pub incident_types: IncidentTypeService,
    pub incident_records: IncidentRecordService,
    pub incident_actions: IncidentActionService,
    pub reports: ReportService,
    pub imports: ImportService,
    pub exports: ExportService,
    pub backup: BackupService,
}

impl AppServices {
    pub fn new(db: Arc<DbPool>, event_sender: Arc<EventSender>) -> Self {
        let coordinators = CoordinatorService::new(db.clone(), event_sender.clone());
        let verifiers = VerifierService::new(db.clone(), event_sender.clone());
        let warehouses = WarehouseService::new(db.clone(), event_sender.clone());
        let imports = ImportService::new(verifiers.clone(), warehouses.clone());

        Self {
            coordinators,
            verifiers,
            warehouses: warehouses.clone(),
            incident_types: IncidentTypeService::new(db.clone(), event_sender.clone()),
            incident_records: IncidentRecordService::new(db.clone(), event_sender.clone()),
            incident_actions: IncidentActionService::new(db.clone(), event_sender.clone()),
            reports: ReportService::new(db.clone()),
            imports,
            exports: ExportService::new(db.clone()),
            backup: BackupService::new(db, event_sender),
        }
    }
}
