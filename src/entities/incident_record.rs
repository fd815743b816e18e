use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

/// Lifecycle status of an incident record. The stored strings are the
/// operational Spanish terms the forms and reports use.
#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    Hash,
    EnumIter,
    DeriveActiveEnum,
    Serialize,
    Deserialize,
    strum::Display,
    ToSchema,
)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(32))")]
pub enum IncidentStatus {
    #[sea_orm(string_value = "Pendiente")]
    #[serde(rename = "Pendiente")]
    #[strum(to_string = "Pendiente")]
    Pendiente,
    #[sea_orm(string_value = "En Proceso")]
    #[serde(rename = "En Proceso")]
    #[strum(to_string = "En Proceso")]
    EnProceso,
    #[sea_orm(string_value = "Solucionado")]
    #[serde(rename = "Solucionado")]
    #[strum(to_string = "Solucionado")]
    Solucionado,
    #[sea_orm(string_value = "Asignado a Técnicos")]
    #[serde(rename = "Asignado a Técnicos")]
    #[strum(to_string = "Asignado a Técnicos")]
    AsignadoATecnicos,
    #[sea_orm(string_value = "RRHH")]
    #[serde(rename = "RRHH")]
    #[strum(to_string = "RRHH")]
    Rrhh,
}

/// Party accountable for resolving a record.
#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    Hash,
    EnumIter,
    DeriveActiveEnum,
    Serialize,
    Deserialize,
    strum::Display,
    ToSchema,
)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(32))")]
pub enum Responsible {
    #[sea_orm(string_value = "Bodega")]
    #[serde(rename = "Bodega")]
    #[strum(to_string = "Bodega")]
    Bodega,
    #[sea_orm(string_value = "Verificador")]
    #[serde(rename = "Verificador")]
    #[strum(to_string = "Verificador")]
    Verificador,
    #[sea_orm(string_value = "RRHH")]
    #[serde(rename = "RRHH")]
    #[strum(to_string = "RRHH")]
    Rrhh,
    #[sea_orm(string_value = "Coordinacion")]
    #[serde(rename = "Coordinacion")]
    #[strum(to_string = "Coordinacion")]
    Coordinacion,
    #[sea_orm(string_value = "Servicios Informáticos")]
    #[serde(rename = "Servicios Informáticos")]
    #[strum(to_string = "Servicios Informáticos")]
    ServiciosInformaticos,
}

/// The `incident_records` table: one concrete occurrence linking a
/// warehouse, a causing verifier, an incident type and two coordinators
/// (registering/assigned). Status only moves through ledger actions.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize, Validate, ToSchema)]
#[sea_orm(table_name = "incident_records")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,

    pub date: Date,

    pub registering_coordinator_id: i32,
    pub warehouse_id: i32,
    pub causing_verifier_id: i32,
    pub incident_type_id: i32,
    pub assigned_coordinator_id: i32,

    pub explanation: String,

    pub status: IncidentStatus,
    pub responsible: Responsible,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::coordinator::Entity",
        from = "Column::RegisteringCoordinatorId",
        to = "super::coordinator::Column::Id"
    )]
    RegisteringCoordinator,
    #[sea_orm(
        belongs_to = "super::coordinator::Entity",
        from = "Column::AssignedCoordinatorId",
        to = "super::coordinator::Column::Id"
    )]
    AssignedCoordinator,
    #[sea_orm(
        belongs_to = "super::warehouse::Entity",
        from = "Column::WarehouseId",
        to = "super::warehouse::Column::Id"
    )]
    Warehouse,
    #[sea_orm(
        belongs_to = "super::verifier::Entity",
        from = "Column::CausingVerifierId",
        to = "super::verifier::Column::Id"
    )]
    CausingVerifier,
    #[sea_orm(
        belongs_to = "super::incident_type::Entity",
        from = "Column::IncidentTypeId",
        to = "super::incident_type::Column::Id"
    )]
    IncidentType,
    #[sea_orm(has_many = "super::incident_action::Entity")]
    IncidentActions,
}

impl Related<super::warehouse::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Warehouse.def()
    }
}

impl Related<super::verifier::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::CausingVerifier.def()
    }
}

impl Related<super::incident_type::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::IncidentType.def()
    }
}

impl Related<super::incident_action::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::IncidentActions.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_serializes_to_operational_terms() {
        assert_eq!(
            serde_json::to_value(IncidentStatus::AsignadoATecnicos).unwrap(),
            serde_json::json!("Asignado a Técnicos")
        );
        assert_eq!(
            serde_json::to_value(Responsible::ServiciosInformaticos).unwrap(),
            serde_json::json!("Servicios Informáticos")
        );
    }

    #[test]
    fn status_round_trips_through_serde() {
        let parsed: IncidentStatus = serde_json::from_value(serde_json::json!("En Proceso")).unwrap();
        assert_eq!(parsed, IncidentStatus::EnProceso);
    }
}
