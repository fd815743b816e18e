//! Business services. Each service owns a handle to the connection pool and
//! the event channel; handlers own the services.

pub mod backup;
pub mod coordinators;
pub mod exports;
pub mod imports;
pub mod incident_actions;
pub mod incident_records;
pub mod incident_types;
pub mod reports;
pub mod verifiers;
pub mod warehouses;
