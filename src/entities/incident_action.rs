use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use super::incident_record::IncidentStatus;

/// The `incident_actions` table: append-only ledger entries against an
/// incident record. Rows are never edited or deleted; an entry with a
/// `new_status` is the only thing that moves the owning record's status.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize, Validate, ToSchema)]
#[sea_orm(table_name = "incident_actions")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,

    pub incident_record_id: i32,

    pub action_date: Date,

    #[validate(length(min = 1, message = "Action description must not be empty"))]
    pub action_description: String,

    pub new_status: Option<IncidentStatus>,

    /// Coordinator who performed the action.
    pub performed_by: i32,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::incident_record::Entity",
        from = "Column::IncidentRecordId",
        to = "super::incident_record::Column::Id"
    )]
    IncidentRecord,
    #[sea_orm(
        belongs_to = "super::coordinator::Entity",
        from = "Column::PerformedBy",
        to = "super::coordinator::Column::Id"
    )]
    PerformedBy,
}

impl Related<super::incident_record::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::IncidentRecord.def()
    }
}

impl Related<super::coordinator::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::PerformedBy.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
