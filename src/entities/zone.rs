use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Fixed geographic/organizational grouping assigned to verifiers and
/// warehouses.
#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    EnumIter,
    DeriveActiveEnum,
    Serialize,
    Deserialize,
    strum::Display,
    ToSchema,
)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(32))")]
pub enum Zone {
    #[sea_orm(string_value = "PENEDES")]
    #[serde(rename = "PENEDES")]
    #[strum(to_string = "PENEDES")]
    Penedes,
    #[sea_orm(string_value = "ALT CAMP")]
    #[serde(rename = "ALT CAMP")]
    #[strum(to_string = "ALT CAMP")]
    AltCamp,
    #[sea_orm(string_value = "CONCA")]
    #[serde(rename = "CONCA")]
    #[strum(to_string = "CONCA")]
    Conca,
    #[sea_orm(string_value = "ALMENDRALEJO")]
    #[serde(rename = "ALMENDRALEJO")]
    #[strum(to_string = "ALMENDRALEJO")]
    Almendralejo,
    #[sea_orm(string_value = "REQUENA")]
    #[serde(rename = "REQUENA")]
    #[strum(to_string = "REQUENA")]
    Requena,
    #[sea_orm(string_value = "CARIÑENA")]
    #[serde(rename = "CARIÑENA")]
    #[strum(to_string = "CARIÑENA")]
    Carinena,
}

impl Zone {
    /// Parses the display form used by forms and import files.
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_uppercase().as_str() {
            "PENEDES" => Some(Self::Penedes),
            "ALT CAMP" => Some(Self::AltCamp),
            "CONCA" => Some(Self::Conca),
            "ALMENDRALEJO" => Some(Self::Almendralejo),
            "REQUENA" => Some(Self::Requena),
            "CARIÑENA" | "CARINENA" => Some(Self::Carinena),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_accepts_display_forms() {
        assert_eq!(Zone::parse("PENEDES"), Some(Zone::Penedes));
        assert_eq!(Zone::parse(" alt camp "), Some(Zone::AltCamp));
        assert_eq!(Zone::parse("CARINENA"), Some(Zone::Carinena));
        assert_eq!(Zone::parse("MADRID"), None);
    }

    #[test]
    fn display_matches_stored_value() {
        assert_eq!(Zone::AltCamp.to_string(), "ALT CAMP");
        assert_eq!(Zone::Carinena.to_string(), "CARIÑENA");
    }
}
