use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::{Validate, ValidationError};

use super::zone::Zone;

/// The `verifiers` table. Field verifiers can be named as the cause of an
/// incident record.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize, Validate, ToSchema)]
#[sea_orm(table_name = "verifiers")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,

    #[validate(length(min = 2, message = "Name must have at least 2 characters"))]
    pub name: String,

    #[validate(length(min = 2, message = "Surnames must have at least 2 characters"))]
    pub surnames: String,

    /// Empty, or exactly 9 digits.
    #[validate(custom = "validate_phone")]
    pub phone: String,

    pub zone: Option<Zone>,
}

impl Model {
    pub fn full_name(&self) -> String {
        format!("{} {}", self.name, self.surnames)
    }
}

pub fn validate_phone(phone: &str) -> Result<(), ValidationError> {
    if phone.is_empty() {
        return Ok(());
    }
    if phone.len() == 9 && phone.chars().all(|c| c.is_ascii_digit()) {
        return Ok(());
    }
    let mut err = ValidationError::new("phone");
    err.message = Some("Phone must be empty or exactly 9 digits".into());
    Err(err)
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

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn phone_accepts_empty_and_nine_digits() {
        assert!(validate_phone("").is_ok());
        assert!(validate_phone("123456789").is_ok());
    }

    #[test]
    fn phone_rejects_short_and_non_numeric() {
        assert!(validate_phone("12345").is_err());
        assert!(validate_phone("12a456789").is_err());
        assert!(validate_phone("1234567890").is_err());
    }
}
