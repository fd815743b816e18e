pub mod create_incident_record_command;

pub use create_incident_record_command::CreateIncidentRecordCommand;
