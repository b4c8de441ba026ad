/// Proximity query engine
///
/// Nearby thoughts are selected in two passes: storage returns public thoughts
/// inside a lat/lng bounding box, then exact haversine distances drop the box
/// corners, order the rest nearest first and cut to the limit. Comment previews
/// and counts are attached with one batched query each.
use crate::config::ProximityConfig;
use crate::db::ThoughtStore;
use crate::error::{AppError, Result};
use crate::geo::{distance_meters, BoundingBox, Coordinates};
use crate::metrics::proximity::{
    MODE_NEARBY, MODE_RECENT, PROXIMITY_CANDIDATES, PROXIMITY_QUERY_DURATION_SECONDS,
};
use crate::models::{Comment, CommentCount, Thought, ThoughtView};
use serde::Deserialize;
use std::collections::HashMap;
use std::str::FromStr;
use std::sync::Arc;
use utoipa::IntoParams;
use uuid::Uuid;

/// Raw query string of a proximity request. Values stay unparsed so malformed
/// input is reported by [`ProximityQuery::from_params`] as `InvalidQuery`.
#[derive(Debug, Clone, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct ProximityParams {
    /// Viewer latitude; omitted or 0 together with `lng` means no location
    #[param(value_type = Option<f64>)]
    pub lat: Option<String>,
    /// Viewer longitude
    #[param(value_type = Option<f64>)]
    pub lng: Option<String>,
    /// Search radius in kilometers (default 10)
    #[param(value_type = Option<f64>)]
    pub radius: Option<String>,
    /// Maximum number of thoughts (default 20)
    #[param(value_type = Option<u32>)]
    pub limit: Option<String>,
}

/// Validated proximity request
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ProximityQuery {
    pub origin: Coordinates,
    pub radius_km: f64,
    pub limit: usize,
}

impl ProximityQuery {
    pub fn from_params(params: &ProximityParams, config: &ProximityConfig) -> Result<Self> {
        let lat: f64 = parse_param("lat", params.lat.as_deref())?.unwrap_or(0.0);
        let lng: f64 = parse_param("lng", params.lng.as_deref())?.unwrap_or(0.0);
        let origin = Coordinates::checked(lat, lng).map_err(AppError::InvalidQuery)?;

        let radius_km: f64 =
            parse_param("radius", params.radius.as_deref())?.unwrap_or(config.default_radius_km);
        if !radius_km.is_finite() || radius_km <= 0.0 {
            return Err(AppError::InvalidQuery(
                "radius must be a positive number".to_string(),
            ));
        }

        let limit: usize =
            parse_param("limit", params.limit.as_deref())?.unwrap_or(config.default_limit);
        if limit == 0 {
            return Err(AppError::InvalidQuery(
                "limit must be a positive integer".to_string(),
            ));
        }

        Ok(Self {
            origin,
            radius_km,
            limit: limit.min(config.max_limit),
        })
    }
}

/// Empty values count as absent.
fn parse_param<T: FromStr>(name: &str, raw: Option<&str>) -> Result<Option<T>> {
    match raw.map(str::trim).filter(|value| !value.is_empty()) {
        None => Ok(None),
        Some(value) => value
            .parse()
            .map(Some)
            .map_err(|_| AppError::InvalidQuery(format!("{} is not a valid number: '{}'", name, value))),
    }
}

/// Annotate candidates with their distance to `origin`, keep those within
/// `radius_km`, nearest first (newer first on ties), at most `limit`.
pub fn rank_candidates(
    origin: Coordinates,
    radius_km: f64,
    candidates: Vec<Thought>,
    limit: usize,
) -> Vec<(Thought, i64)> {
    let max_distance_m = radius_km * 1000.0;

    let mut ranked: Vec<(Thought, i64)> = candidates
        .into_iter()
        .map(|thought| {
            let distance = distance_meters(origin, thought.coordinates());
            (thought, distance)
        })
        .filter(|(_, distance)| (*distance as f64) <= max_distance_m)
        .collect();

    ranked.sort_by(|(a, da), (b, db)| da.cmp(db).then_with(|| b.created_at.cmp(&a.created_at)));
    ranked.truncate(limit);
    ranked
}

pub struct ProximityService {
    store: Arc<dyn ThoughtStore>,
    config: ProximityConfig,
}

impl ProximityService {
    pub fn new(store: Arc<dyn ThoughtStore>, config: ProximityConfig) -> Self {
        Self { store, config }
    }

    /// Thoughts around the query origin, or the newest thoughts when the
    /// viewer shared no location.
    pub async fn nearby_thoughts(&self, query: &ProximityQuery) -> Result<Vec<ThoughtView>> {
        let mut views = if query.origin.is_unset() {
            self.recent_thoughts(query.limit).await?
        } else {
            self.thoughts_within_radius(query).await?
        };

        self.attach_comments(&mut views).await?;
        Ok(views)
    }

    async fn recent_thoughts(&self, limit: usize) -> Result<Vec<ThoughtView>> {
        let timer = PROXIMITY_QUERY_DURATION_SECONDS
            .with_label_values(&[MODE_RECENT])
            .start_timer();

        let thoughts = self.store.recent_public_thoughts(limit as i64).await?;
        timer.observe_duration();
        PROXIMITY_CANDIDATES
            .with_label_values(&[MODE_RECENT])
            .observe(thoughts.len() as f64);

        Ok(thoughts
            .into_iter()
            .map(|thought| ThoughtView::new(thought, self.config.no_location_distance_m))
            .collect())
    }

    async fn thoughts_within_radius(&self, query: &ProximityQuery) -> Result<Vec<ThoughtView>> {
        let timer = PROXIMITY_QUERY_DURATION_SECONDS
            .with_label_values(&[MODE_NEARBY])
            .start_timer();

        let bbox = BoundingBox::around(query.origin, query.radius_km);
        let candidates = self
            .store
            .public_thoughts_in_box(&bbox, self.config.max_candidates as i64)
            .await?;
        timer.observe_duration();

        let candidate_count = candidates.len();
        PROXIMITY_CANDIDATES
            .with_label_values(&[MODE_NEARBY])
            .observe(candidate_count as f64);
        if candidate_count >= self.config.max_candidates {
            tracing::warn!(
                candidates = candidate_count,
                radius_km = query.radius_km,
                "proximity candidate cap reached; farthest box rows were dropped"
            );
        }

        let ranked = rank_candidates(query.origin, query.radius_km, candidates, query.limit);
        tracing::debug!(
            candidates = candidate_count,
            returned = ranked.len(),
            "proximity query ranked"
        );

        Ok(ranked
            .into_iter()
            .map(|(thought, distance)| ThoughtView::new(thought, distance))
            .collect())
    }

    async fn attach_comments(&self, views: &mut [ThoughtView]) -> Result<()> {
        if views.is_empty() {
            return Ok(());
        }

        let ids: Vec<Uuid> = views.iter().map(|view| view.thought.id).collect();
        let previews = self
            .store
            .latest_comments(&ids, self.config.comment_preview as i64)
            .await?;
        let counts = self.store.comment_counts(&ids).await?;

        let mut previews_by_thought: HashMap<Uuid, Vec<Comment>> = HashMap::new();
        for comment in previews {
            previews_by_thought
                .entry(comment.thought_id)
                .or_default()
                .push(comment);
        }

        for view in views.iter_mut() {
            let id = view.thought.id;
            view.comments = previews_by_thought.remove(&id).unwrap_or_default();
            view.count = CommentCount {
                comments: counts.get(&id).copied().unwrap_or(0),
            };
        }

        Ok(())
    }
}
