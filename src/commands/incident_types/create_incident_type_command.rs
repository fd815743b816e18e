use crate::{
    commands::Command,
    db::DbPool,
    entities::incident_type,
    errors::ServiceError,
    events::{Event, EventSender},
};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, PaginatorTrait, QueryFilter,
    Set,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{error, info, instrument};
use utoipa::ToSchema;
use validator::Validate;

const CODE_MIN_LEN: usize = 3;
const CODE_MAX_LEN: usize = 20;

fn is_sequential(code: &str) -> bool {
    code.len() == 3 && code.chars().all(|c| c.is_ascii_digit())
}

/// Allocates a unique incident type code.
///
/// With a custom code: trim, bound the length, and reject codes already
/// taken, naming the offender. Without one: propose the zero-padded
/// successor of the sequential codes in use, probing upward past any the
/// operators reserved by hand. The probe is bounded by the number of
/// existing codes, so it terminates; the unique index on the column
/// remains the final arbiter either way.
pub async fn allocate_code(
    db: &DatabaseConnection,
    custom_code: Option<&str>,
) -> Result<String, ServiceError> {
    // A blank custom code means "allocate for me".
    let custom_code = custom_code.map(str::trim).filter(|code| !code.is_empty());

    if let Some(code) = custom_code {
        if code.len() < CODE_MIN_LEN || code.len() > CODE_MAX_LEN {
            return Err(ServiceError::Validation(format!(
                "El código debe tener entre {} y {} caracteres",
                CODE_MIN_LEN, CODE_MAX_LEN
            )));
        }

        let taken = incident_type::Entity::find()
            .filter(incident_type::Column::Code.eq(code))
            .count(db)
            .await
            .map_err(ServiceError::from_db)?;
        if taken > 0 {
            return Err(ServiceError::Conflict(format!(
                "El código \"{}\" ya existe",
                code
            )));
        }

        return Ok(code.to_string());
    }

    let existing: std::collections::HashSet<String> = incident_type::Entity::find()
        .all(db)
        .await
        .map_err(ServiceError::from_db)?
        .into_iter()
        .map(|t| t.code)
        .collect();

    // Custom codes do not advance the sequence; only sequential-format
    // codes count toward it.
    let mut count = existing.iter().filter(|c| is_sequential(c)).count();
    loop {
        let code = format!("{:03}", count + 1);
        if !existing.contains(&code) {
            return Ok(code);
        }
        count += 1;
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct CreateIncidentTypeCommand {
    #[validate(length(min = 10, message = "Description must have at least 10 characters"))]
    pub description: String,

    /// Operator-supplied code; sequential allocation when absent.
    pub custom_code: Option<String>,
}

#[async_trait::async_trait]
impl Command for CreateIncidentTypeCommand {
    type Result = incident_type::Model;

    #[instrument(skip(self, db_pool, event_sender))]
    async fn execute(
        &self,
        db_pool: Arc<DbPool>,
        event_sender: Arc<EventSender>,
    ) -> Result<Self::Result, ServiceError> {
        self.validate().map_err(|e| {
            let msg = format!("Invalid input: {}", e);
            error!("{}", msg);
            ServiceError::Validation(msg)
        })?;

        let db = db_pool.as_ref();
        let code = allocate_code(db, self.custom_code.as_deref()).await?;

        let new_type = incident_type::ActiveModel {
            code: Set(code.clone()),
            description: Set(self.description.clone()),
            ..Default::default()
        };

        // A concurrent insert can still win the code between the probe and
        // this statement; the unique index turns that into a Conflict.
        let saved = new_type.insert(db).await.map_err(ServiceError::from_db)?;

        info!(
            incident_type_id = saved.id,
            code = %saved.code,
            "Incident type created"
        );

        event_sender
            .send(Event::IncidentTypeCreated {
                id: saved.id,
                code,
            })
            .await
            .map_err(ServiceError::Event)?;

        Ok(saved)
    }
}
