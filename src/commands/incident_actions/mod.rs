pub mod add_incident_action_command;

pub use add_incident_action_command::AddIncidentActionCommand;
