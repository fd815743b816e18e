use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

/// The `incident_types` table. Each type carries a globally unique
/// human-facing code, either sequential ("001", "002", ...) or
/// operator-supplied ("INC-2025-001"). Uniqueness is enforced by a unique
/// index, not only by the allocator's pre-check.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize, Validate, ToSchema)]
#[sea_orm(table_name = "incident_types")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,

    #[sea_orm(unique)]
    #[validate(length(min = 3, max = 20, message = "Code must be 3 to 20 characters"))]
    pub code: String,

    #[validate(length(min = 10, message = "Description must have at least 10 characters"))]
    pub description: String,
}

impl Model {
    /// Dropdown label: "001 - descripción".
    pub fn label(&self) -> String {
        format!("{} - {}", self.code, self.description)
    }
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
