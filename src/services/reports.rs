use crate::{
    db::DbPool,
    entities::{incident_action, incident_record, incident_record::IncidentStatus, Responsible},
    errors::ServiceError,
    queries::{resolve_action_views, resolve_record_views, IncidentActionView, IncidentRecordView},
};
use chrono::{Duration, Utc};
use sea_orm::{ColumnTrait, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder, QuerySelect};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::Arc;
use tracing::instrument;
use utoipa::ToSchema;

const PENDING_FEED_LIMIT: u64 = 10;
const RECENT_ACTIONS_LIMIT: u64 = 5;
const RECENT_WINDOW_DAYS: i64 = 7;

/// One (key, count) pair of a grouped report
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct GroupCount {
    pub key: String,
    pub count: i64,
}

/// Headline figures for the dashboard
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct DashboardStats {
    pub total_records: u64,
    /// Records with status other than Solucionado
    pub pending_records: u64,
    pub resolved_records: u64,
    /// Records dated within the last 7 days
    pub recent_records: u64,
    pub by_status: Vec<GroupCount>,
}

/// Activity feed: latest pending records and latest ledger entries
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ActivityFeed {
    pub pending: Vec<IncidentRecordView>,
    pub recent_actions: Vec<IncidentActionView>,
}

/// Dimensions the grouped report can be keyed by
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum GroupDimension {
    WarehouseZone,
    CausingVerifier,
    Warehouse,
    IncidentType,
    Status,
}

/// Read-only aggregation over the joined record view. Everything here is
/// recomputed per query; there is no materialized state to go stale.
#[derive(Clone)]
pub struct ReportService {
    db_pool: Arc<DbPool>,
}

impl ReportService {
    pub fn new(db_pool: Arc<DbPool>) -> Self {
        Self { db_pool }
    }

    async fn all_views(&self) -> Result<Vec<IncidentRecordView>, ServiceError> {
        let db = &*self.db_pool;
        let records = incident_record::Entity::find()
            .all(db)
            .await
            .map_err(ServiceError::from_db)?;
        resolve_record_views(db, &records).await
    }

    fn group<F>(views: &[IncidentRecordView], key_fn: F) -> Vec<GroupCount>
    where
        F: Fn(&IncidentRecordView) -> String,
    {
        let mut counts: HashMap<String, i64> = HashMap::new();
        for view in views {
            *counts.entry(key_fn(view)).or_insert(0) += 1;
        }

        let mut groups: Vec<GroupCount> = counts
            .into_iter()
            .map(|(key, count)| GroupCount { key, count })
            .collect();
        groups.sort_by(|a, b| a.key.cmp(&b.key));
        groups
    }

    /// Grouped counts along the requested dimension
    #[instrument(skip(self))]
    pub async fn counts_by(
        &self,
        dimension: GroupDimension,
    ) -> Result<Vec<GroupCount>, ServiceError> {
        let views = self.all_views().await?;
        Ok(match dimension {
            GroupDimension::WarehouseZone => Self::group(&views, |v| v.warehouse_zone.clone()),
            GroupDimension::CausingVerifier => Self::group(&views, |v| v.causing_verifier.clone()),
            GroupDimension::Warehouse => Self::group(&views, |v| v.warehouse.clone()),
            GroupDimension::IncidentType => Self::group(&views, |v| v.incident_type.clone()),
            GroupDimension::Status => Self::group(&views, |v| v.status.to_string()),
        })
    }

    /// Counts per verifier over records whose responsible party is the
    /// verifier
    #[instrument(skip(self))]
    pub async fn assignments_by_verifier(&self) -> Result<Vec<GroupCount>, ServiceError> {
        let views = self.all_views().await?;
        let assigned: Vec<IncidentRecordView> = views
            .into_iter()
            .filter(|v| v.responsible == Responsible::Verificador)
            .collect();
        Ok(Self::group(&assigned, |v| v.causing_verifier.clone()))
    }

    /// Headline dashboard figures
    #[instrument(skip(self))]
    pub async fn dashboard_stats(&self) -> Result<DashboardStats, ServiceError> {
        let db = &*self.db_pool;

        let total_records = incident_record::Entity::find()
            .count(db)
            .await
            .map_err(ServiceError::from_db)?;

        let pending_records = incident_record::Entity::find()
            .filter(incident_record::Column::Status.ne(IncidentStatus::Solucionado))
            .count(db)
            .await
            .map_err(ServiceError::from_db)?;

        let resolved_records = incident_record::Entity::find()
            .filter(incident_record::Column::Status.eq(IncidentStatus::Solucionado))
            .count(db)
            .await
            .map_err(ServiceError::from_db)?;

        let window_start = Utc::now().date_naive() - Duration::days(RECENT_WINDOW_DAYS);
        let recent_records = incident_record::Entity::find()
            .filter(incident_record::Column::Date.gte(window_start))
            .count(db)
            .await
            .map_err(ServiceError::from_db)?;

        let by_status = self.counts_by(GroupDimension::Status).await?;

        Ok(DashboardStats {
            total_records,
            pending_records,
            resolved_records,
            recent_records,
            by_status,
        })
    }

    /// Latest pending records plus latest ledger entries
    #[instrument(skip(self))]
    pub async fn activity_feed(&self) -> Result<ActivityFeed, ServiceError> {
        let db = &*self.db_pool;

        let pending_records = incident_record::Entity::find()
            .filter(incident_record::Column::Status.ne(IncidentStatus::Solucionado))
            .order_by_desc(incident_record::Column::Date)
            .order_by_desc(incident_record::Column::Id)
            .limit(PENDING_FEED_LIMIT)
            .all(db)
            .await
            .map_err(ServiceError::from_db)?;
        let pending = resolve_record_views(db, &pending_records).await?;

        let latest_actions = incident_action::Entity::find()
            .order_by_desc(incident_action::Column::ActionDate)
            .order_by_desc(incident_action::Column::Id)
            .limit(RECENT_ACTIONS_LIMIT)
            .all(db)
            .await
            .map_err(ServiceError::from_db)?;
        let recent_actions = resolve_action_views(db, &latest_actions).await?;

        Ok(ActivityFeed {
            pending,
            recent_actions,
        })
    }
}
