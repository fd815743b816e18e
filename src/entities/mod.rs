//! SeaORM entities for the six persistent tables.

pub mod coordinator;
pub mod incident_action;
pub mod incident_record;
pub mod incident_type;
pub mod verifier;
pub mod warehouse;
pub mod zone;

pub use coordinator::Entity as Coordinator;
pub use incident_action::Entity as IncidentAction;
pub use incident_record::Entity as IncidentRecord;
pub use incident_record::{IncidentStatus, Responsible};
pub use incident_type::Entity as IncidentType;
pub use verifier::Entity as Verifier;
pub use warehouse::Entity as Warehouse;
pub use zone::Zone;
