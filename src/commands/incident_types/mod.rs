pub mod create_incident_type_command;

pub use create_incident_type_command::{allocate_code, CreateIncidentTypeCommand};
