use crate::{
    db::DbPool,
    entities::{incident_action, incident_record},
    errors::ServiceError,
    queries::{resolve_action_views, resolve_record_views},
};
use chrono::Local;
use rust_xlsxwriter::{Workbook, XlsxError};
use sea_orm::{EntityTrait, QueryOrder};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::{info, instrument};

const RECORD_HEADERS: [&str; 13] = [
    "ID",
    "Fecha",
    "Coordinador Registrador",
    "Bodega",
    "Zona Bodega",
    "Verificador Causante",
    "Zona Verificador",
    "Código",
    "Tipo de Incidencia",
    "Coordinador Asignado",
    "Explicación",
    "Estado",
    "Responsable",
];

const ACTION_HEADERS: [&str; 5] = [
    "ID Registro",
    "Fecha Acción",
    "Descripción Acción",
    "Nuevo Estado",
    "Realizado Por",
];

fn xlsx_err(e: XlsxError) -> ServiceError {
    ServiceError::Export(e.to_string())
}

/// Produces the two-sheet incident history workbook.
#[derive(Clone)]
pub struct ExportService {
    db_pool: Arc<DbPool>,
}

impl ExportService {
    pub fn new(db_pool: Arc<DbPool>) -> Self {
        Self { db_pool }
    }

    /// Writes `historial_incidencias_{timestamp}.xlsx` into `output_dir`
    /// and returns the full path. Sheet "Incidencias" holds the joined
    /// record view; sheet "Acciones" the full ledger with resolved
    /// performer names.
    #[instrument(skip(self))]
    pub async fn export_history(&self, output_dir: &Path) -> Result<PathBuf, ServiceError> {
        let db = &*self.db_pool;

        let records = incident_record::Entity::find()
            .order_by_asc(incident_record::Column::Id)
            .all(db)
            .await
            .map_err(ServiceError::from_db)?;
        let record_views = resolve_record_views(db, &records).await?;

        let actions = incident_action::Entity::find()
            .order_by_asc(incident_action::Column::Id)
            .all(db)
            .await
            .map_err(ServiceError::from_db)?;
        let action_views = resolve_action_views(db, &actions).await?;

        let mut workbook = Workbook::new();

        let records_sheet = workbook.add_worksheet();
        records_sheet.set_name("Incidencias").map_err(xlsx_err)?;
        for (col, header) in RECORD_HEADERS.iter().enumerate() {
            records_sheet
                .write_string(0, col as u16, *header)
                .map_err(xlsx_err)?;
        }
        for (i, view) in record_views.iter().enumerate() {
            let row = (i + 1) as u32;
            let cells = [
                view.id.to_string(),
                view.date.to_string(),
                view.registering_coordinator.clone(),
                view.warehouse.clone(),
                view.warehouse_zone.clone(),
                view.causing_verifier.clone(),
                view.verifier_zone.clone(),
                view.incident_code.clone(),
                view.incident_type.clone(),
                view.assigned_coordinator.clone(),
                view.explanation.clone(),
                view.status.to_string(),
                view.responsible.to_string(),
            ];
            for (col, value) in cells.iter().enumerate() {
                records_sheet
                    .write_string(row, col as u16, value)
                    .map_err(xlsx_err)?;
            }
        }

        let actions_sheet = workbook.add_worksheet();
        actions_sheet.set_name("Acciones").map_err(xlsx_err)?;
        for (col, header) in ACTION_HEADERS.iter().enumerate() {
            actions_sheet
                .write_string(0, col as u16, *header)
                .map_err(xlsx_err)?;
        }
        for (i, view) in action_views.iter().enumerate() {
            let row = (i + 1) as u32;
            let cells = [
                view.incident_record_id.to_string(),
                view.action_date.to_string(),
                view.action_description.clone(),
                view.new_status
                    .map(|s| s.to_string())
                    .unwrap_or_else(|| "N/A".to_string()),
                view.performed_by.clone(),
            ];
            for (col, value) in cells.iter().enumerate() {
                actions_sheet
                    .write_string(row, col as u16, value)
                    .map_err(xlsx_err)?;
            }
        }

        let timestamp = Local::now().format("%Y%m%d_%H%M%S");
        let path = output_dir.join(format!("historial_incidencias_{}.xlsx", timestamp));
        workbook.save(&path).map_err(xlsx_err)?;

        info!(path = %path.display(), records = record_views.len(), actions = action_views.len(), "Incident history exported");
        Ok(path)
    }
}
