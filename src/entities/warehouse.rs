use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use super::zone::Zone;

/// The `warehouses` table ("bodegas"). Identified in import files by the
/// regulatory council code rather than the superseded NIF field.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize, Validate, ToSchema)]
#[sea_orm(table_name = "warehouses")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,

    #[validate(length(min = 1, message = "Name must not be empty"))]
    pub name: String,

    /// Registry code assigned by the regulatory council; free text.
    pub codigo_consejo: String,

    pub zone: Option<Zone>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::incident_record::Entity")]
    IncidentRecords,
}

impl Related<super::incident_record::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::IncidentRecords.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
