/// Thought cloud: nearby thoughts plus their positions in the floating view
use crate::error::{AppError, Result};
use crate::metrics::activity::LAYOUT_PLACEMENTS_TOTAL;
use crate::models::ThoughtView;
use crate::services::proximity::{ProximityParams, ProximityQuery, ProximityService};
use rand::rngs::StdRng;
use rand::SeedableRng;
use serde::{Deserialize, Serialize};
use spatial_layout::{layout, LayoutConfig, LayoutItem, Placement, ViewTransform};
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;

#[derive(Debug, Clone, Default, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query)]
pub struct CloudParams {
    #[param(value_type = Option<f64>)]
    pub lat: Option<String>,
    #[param(value_type = Option<f64>)]
    pub lng: Option<String>,
    #[param(value_type = Option<f64>)]
    pub radius: Option<String>,
    #[param(value_type = Option<u32>)]
    pub limit: Option<String>,
    /// Horizontal pan in layout units
    #[param(value_type = Option<f64>)]
    pub offset_x: Option<String>,
    /// Vertical pan in layout units
    #[param(value_type = Option<f64>)]
    pub offset_y: Option<String>,
    /// Zoom factor, clamped to [0.5, 3]
    #[param(value_type = Option<f64>)]
    pub zoom: Option<String>,
    /// Layout seed; the same seed reproduces the same layout
    #[param(value_type = Option<u64>)]
    pub seed: Option<String>,
}

impl CloudParams {
    pub fn proximity(&self) -> ProximityParams {
        ProximityParams {
            lat: self.lat.clone(),
            lng: self.lng.clone(),
            radius: self.radius.clone(),
            limit: self.limit.clone(),
        }
    }

    pub fn view(&self) -> Result<ViewTransform> {
        let offset_x = parse_finite("offsetX", self.offset_x.as_deref())?.unwrap_or(0.0);
        let offset_y = parse_finite("offsetY", self.offset_y.as_deref())?.unwrap_or(0.0);
        let zoom = parse_finite("zoom", self.zoom.as_deref())?.unwrap_or(1.0);
        if zoom <= 0.0 {
            return Err(AppError::InvalidQuery("zoom must be positive".to_string()));
        }
        Ok(ViewTransform::new(offset_x, offset_y, zoom))
    }

    pub fn seed(&self) -> Result<Option<u64>> {
        match self.seed.as_deref().map(str::trim).filter(|s| !s.is_empty()) {
            None => Ok(None),
            Some(raw) => raw
                .parse()
                .map(Some)
                .map_err(|_| AppError::InvalidQuery(format!("seed is not a valid integer: '{}'", raw))),
        }
    }
}

fn parse_finite(name: &str, raw: Option<&str>) -> Result<Option<f64>> {
    match raw.map(str::trim).filter(|s| !s.is_empty()) {
        None => Ok(None),
        Some(value) => match value.parse::<f64>() {
            Ok(parsed) if parsed.is_finite() => Ok(Some(parsed)),
            _ => Err(AppError::InvalidQuery(format!(
                "{} is not a valid number: '{}'",
                name, value
            ))),
        },
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CloudPlacement {
    pub thought_id: Uuid,
    /// Horizontal position, percent of the viewport
    pub x: f64,
    /// Vertical position, percent of the viewport
    pub y: f64,
    pub depth: f64,
    pub size: f64,
    pub opacity: f64,
    /// radial, grid, uniform or forced
    pub strategy: String,
    /// Placed by the fallback grid; may overlap another placement
    pub forced: bool,
}

impl From<Placement<Uuid>> for CloudPlacement {
    fn from(placement: Placement<Uuid>) -> Self {
        Self {
            thought_id: placement.id,
            x: placement.x,
            y: placement.y,
            depth: placement.depth,
            size: placement.size,
            opacity: placement.opacity,
            strategy: placement.strategy.as_str().to_string(),
            forced: placement.is_forced(),
        }
    }
}

#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CloudView {
    pub offset_x: f64,
    pub offset_y: f64,
    pub zoom: f64,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct CloudResponse {
    pub thoughts: Vec<ThoughtView>,
    pub placements: Vec<CloudPlacement>,
    /// View after zoom clamping
    pub view: CloudView,
    pub seed: u64,
}

pub struct CloudService {
    proximity: ProximityService,
    layout: LayoutConfig,
}

impl CloudService {
    pub fn new(proximity: ProximityService, layout: LayoutConfig) -> Self {
        Self { proximity, layout }
    }

    pub async fn build_cloud(
        &self,
        query: &ProximityQuery,
        view: ViewTransform,
        seed: Option<u64>,
    ) -> Result<CloudResponse> {
        let thoughts = self.proximity.nearby_thoughts(query).await?;
        let seed = seed.unwrap_or_else(rand::random);

        let placements = place_thoughts(&thoughts, &view, &self.layout, seed);
        let forced = placements.iter().filter(|p| p.forced).count();
        if forced > 0 {
            tracing::debug!(
                forced,
                total = placements.len(),
                min_separation = self.layout.min_separation,
                "cloud layout fell back to forced placement"
            );
        }

        Ok(CloudResponse {
            thoughts,
            placements,
            view: CloudView {
                offset_x: view.offset_x,
                offset_y: view.offset_y,
                zoom: view.zoom(),
            },
            seed,
        })
    }
}

/// Deterministic for a given seed.
pub fn place_thoughts(
    thoughts: &[ThoughtView],
    view: &ViewTransform,
    config: &LayoutConfig,
    seed: u64,
) -> Vec<CloudPlacement> {
    let items: Vec<LayoutItem<Uuid>> = thoughts
        .iter()
        .map(|view| LayoutItem::new(view.thought.id, view.distance as f64))
        .collect();

    let mut rng = StdRng::seed_from_u64(seed);
    layout(&items, view, config, &mut rng)
        .into_iter()
        .map(|placement| {
            LAYOUT_PLACEMENTS_TOTAL
                .with_label_values(&[placement.strategy.as_str()])
                .inc();
            CloudPlacement::from(placement)
        })
        .collect()
}
