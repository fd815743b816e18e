use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

/// The `coordinators` table. Coordinators register incident records, get
/// assigned to them and perform ledger actions; they are never deleted.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize, Validate, ToSchema)]
#[sea_orm(table_name = "coordinators")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,

    #[validate(length(min = 2, message = "Name must have at least 2 characters"))]
    pub name: String,

    #[validate(length(min = 2, message = "Surnames must have at least 2 characters"))]
    pub surnames: String,
}

impl Model {
    /// Display form used in joined views and dropdowns.
    pub fn full_name(&self) -> String {
        format!("{} {}", self.name, self.surnames)
    }
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::incident_action::Entity")]
    IncidentActions,
}

impl Related<super::incident_action::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::IncidentActions.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
