use axum::{
    extract::{Query, State},
    Json,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use crate::cache::{CacheLookup, Freshness};
use crate::pipeline::{self, Reconstruction};
use crate::trajectory::TrajectorySet;
use crate::web::api::error::{ApiResult, ErrorResponse};
use crate::web::state::AppState;

#[derive(Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct BalloonsQuery {
    /// `true` or `1` bypasses the cache.
    #[serde(default)]
    pub refresh: Option<String>,
}

impl BalloonsQuery {
    pub fn force_refresh(&self) -> bool {
        self.refresh
            .as_deref()
            .map(|v| v.trim().eq_ignore_ascii_case("true") || v.trim() == "1")
            .unwrap_or(false)
    }
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct BalloonsResponse {
    /// Trajectory id to `[lat, lon, altitude, hour]` points.
    #[schema(value_type = Object)]
    pub balloons: TrajectorySet,
    pub total_balloons: usize,
    pub data_points_collected: usize,
    pub cached: bool,
    /// Seconds since the cached result was computed.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cache_age: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<DateTime<Utc>>,
}

impl BalloonsResponse {
    pub fn fresh(reconstruction: &Reconstruction) -> Self {
        BalloonsResponse {
            balloons: reconstruction.trajectories.clone(),
            total_balloons: reconstruction.trajectories.len(),
            data_points_collected: reconstruction.hours_collected,
            cached: false,
            cache_age: None,
            timestamp: Some(reconstruction.computed_at),
        }
    }

    pub fn from_lookup(lookup: &CacheLookup) -> Self {
        let mut response = Self::fresh(&lookup.reconstruction);
        if let Freshness::Cached { age } = lookup.freshness {
            response.cached = true;
            response.cache_age = Some(age.as_secs());
            response.timestamp = None;
        }
        response
    }
}

#[utoipa::path(
    get,
    path = "/api/balloons",
    tag = "balloons",
    params(BalloonsQuery),
    responses(
        (status = 200, description = "Reconstructed balloon trajectories", body = BalloonsResponse),
        (status = 500, description = "Reconstruction failed", body = ErrorResponse)
    )
)]
pub async fn get_balloons(
    State(state): State<AppState>,
    Query(query): Query<BalloonsQuery>,
) -> ApiResult<Json<BalloonsResponse>> {
    let source = state.source.clone();
    let lookup = state
        .cache
        .get_or_compute(query.force_refresh(), || pipeline::run_isolated(source))
        .await?;

    Ok(Json(BalloonsResponse::from_lookup(&lookup)))
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;
    use std::time::Duration;

    use super::*;
    use crate::snapshot::SnapshotSet;
    use crate::test_support::point;

    fn query(refresh: Option<&str>) -> BalloonsQuery {
        BalloonsQuery {
            refresh: refresh.map(String::from),
        }
    }

    #[test]
    fn test_refresh_flag_parsing() {
        assert!(query(Some("true")).force_refresh());
        assert!(query(Some("TRUE")).force_refresh());
        assert!(query(Some("1")).force_refresh());
        assert!(!query(Some("false")).force_refresh());
        assert!(!query(Some("yes please")).force_refresh());
        assert!(!query(Some("")).force_refresh());
        assert!(!query(None).force_refresh());
    }

    #[test]
    fn test_cached_response_shape() {
        let snapshots = SnapshotSet::from_hours(vec![
            Some(vec![point(1.0, 1.0, 10.0)]),
            Some(vec![point(1.1, 1.1, 11.0)]),
        ]);
        let lookup = CacheLookup {
            reconstruction: Arc::new(Reconstruction::from_snapshots(&snapshots)),
            freshness: Freshness::Cached {
                age: Duration::from_millis(42_900),
            },
        };

        let json = serde_json::to_value(BalloonsResponse::from_lookup(&lookup)).unwrap();

        assert_eq!(json["cached"], true);
        assert_eq!(json["cacheAge"], 42);
        assert_eq!(json["totalBalloons"], 1);
        assert_eq!(json["dataPointsCollected"], 2);
        assert!(json.get("timestamp").is_none());
        assert_eq!(
            json["balloons"]["balloon_0"],
            serde_json::json!([[1.0, 1.0, 10.0, 0], [1.1, 1.1, 11.0, 1]])
        );
    }

    #[test]
    fn test_fresh_response_shape() {
        let reconstruction = Reconstruction::from_snapshots(&SnapshotSet::empty());
        let json = serde_json::to_value(BalloonsResponse::fresh(&reconstruction)).unwrap();

        assert_eq!(json["cached"], false);
        assert_eq!(json["totalBalloons"], 0);
        assert_eq!(json["dataPointsCollected"], 0);
        assert_eq!(json["balloons"], serde_json::json!({}));
        assert!(json.get("cacheAge").is_none());
        assert!(json["timestamp"].is_string());
    }
}
