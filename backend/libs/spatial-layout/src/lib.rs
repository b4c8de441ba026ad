//! Spatial layout for the thought cloud
//!
//! Assigns every thought a position in a 0-100 viewport space (percent of the
//! visible area), plus a depth, a size and an opacity. Thoughts are processed
//! nearest first so that close thoughts claim the positions around the center.
//!
//! Placement is a bounded randomized search with three escalating strategies
//! (radial, grid, uniform). When every attempt collides the thought is
//! force-placed on a deterministic index-based grid, which may overlap an
//! existing placement. Callers can detect that through [`Placement::is_forced`].
//!
//! The random source is injected, so a fixed seed gives a reproducible layout:
//!
//! ```
//! use rand::{rngs::StdRng, SeedableRng};
//! use spatial_layout::{layout, LayoutConfig, LayoutItem, ViewTransform};
//!
//! let items = vec![LayoutItem::new("a", 80.0), LayoutItem::new("b", 1_200.0)];
//! let mut rng = StdRng::seed_from_u64(7);
//! let placements = layout(&items, &ViewTransform::default(), &LayoutConfig::default(), &mut rng);
//! assert_eq!(placements.len(), 2);
//! ```

mod band;
mod view;

pub use band::DistanceBand;
pub use view::{ViewTransform, MAX_ZOOM, MIN_ZOOM, ZOOM_STEP};

use rand::Rng;
use serde::Serialize;
use std::f64::consts::PI;

/// Center of the viewport on both axes.
pub const VIEWPORT_CENTER: f64 = 50.0;
/// Placements are clamped into `[MIN_COORD, MAX_COORD]` on both axes.
pub const MIN_COORD: f64 = 10.0;
pub const MAX_COORD: f64 = 90.0;

/// Distance at which size and opacity reach their floor.
const FADE_DISTANCE_M: f64 = 5_000.0;
const BASE_SIZE: f64 = 12.0;
const MIN_SIZE: f64 = 8.0;

/// Angular step between consecutive thoughts in radial placement, in units of PI.
const RADIAL_ANGLE_STEP: f64 = 2.4;
const RADIAL_ANGLE_JITTER: f64 = 0.8;

const SCATTER_MARGIN: f64 = 15.0;
const SCATTER_SPAN: f64 = 70.0;

const FORCED_ORIGIN: f64 = 20.0;
const FORCED_STEP: usize = 15;
const FORCED_ROW_WIDTH: usize = 60;

/// Placement strategy that produced a position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Strategy {
    Radial,
    Grid,
    Uniform,
    Forced,
}

impl Strategy {
    /// Strategies tried, in order, before falling back to forced placement.
    pub const SEARCH_ORDER: [Strategy; 3] = [Strategy::Radial, Strategy::Grid, Strategy::Uniform];

    pub fn as_str(&self) -> &'static str {
        match self {
            Strategy::Radial => "radial",
            Strategy::Grid => "grid",
            Strategy::Uniform => "uniform",
            Strategy::Forced => "forced",
        }
    }
}

/// Tuning for the placement search.
#[derive(Debug, Clone, PartialEq)]
pub struct LayoutConfig {
    /// Minimum center-to-center distance between two placements, in layout units.
    pub min_separation: f64,
    /// Attempt budget of each strategy in [`Strategy::SEARCH_ORDER`].
    pub attempts_per_strategy: u32,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            min_separation: 120.0,
            attempts_per_strategy: 50,
        }
    }
}

/// A thought to place, identified by `id`, at `distance_m` meters from the viewer.
#[derive(Debug, Clone)]
pub struct LayoutItem<Id> {
    pub id: Id,
    pub distance_m: f64,
}

impl<Id> LayoutItem<Id> {
    pub fn new(id: Id, distance_m: f64) -> Self {
        Self { id, distance_m }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Placement<Id> {
    pub id: Id,
    pub x: f64,
    pub y: f64,
    pub depth: f64,
    pub size: f64,
    pub opacity: f64,
    pub strategy: Strategy,
}

impl<Id> Placement<Id> {
    pub fn is_forced(&self) -> bool {
        self.strategy == Strategy::Forced
    }

    pub fn distance_to<Other>(&self, other: &Placement<Other>) -> f64 {
        ((self.x - other.x).powi(2) + (self.y - other.y).powi(2)).sqrt()
    }
}

#[derive(Debug, Clone, Copy)]
struct Candidate {
    x: f64,
    y: f64,
    depth: f64,
}

impl Candidate {
    fn clamped(self) -> Self {
        Self {
            x: self.x.clamp(MIN_COORD, MAX_COORD),
            y: self.y.clamp(MIN_COORD, MAX_COORD),
            depth: self.depth,
        }
    }
}

/// Lay out `items` for the given view.
///
/// The result is ordered by ascending distance (stable for ties), one placement
/// per item. Every placement lies within `[MIN_COORD, MAX_COORD]`, and every
/// non-forced placement keeps `min_separation` from all placements before it.
pub fn layout<Id, R>(
    items: &[LayoutItem<Id>],
    view: &ViewTransform,
    config: &LayoutConfig,
    rng: &mut R,
) -> Vec<Placement<Id>>
where
    Id: Clone,
    R: Rng + ?Sized,
{
    let mut ordered: Vec<&LayoutItem<Id>> = items.iter().collect();
    ordered.sort_by(|a, b| a.distance_m.total_cmp(&b.distance_m));

    let total = ordered.len();
    let mut placements: Vec<Placement<Id>> = Vec::with_capacity(total);

    for (index, item) in ordered.into_iter().enumerate() {
        let band = DistanceBand::for_distance(item.distance_m);
        let (candidate, strategy) =
            match search(index, total, band, view, config, &placements, rng) {
                Some(found) => found,
                None => (forced_candidate(index, view, rng), Strategy::Forced),
            };

        placements.push(Placement {
            id: item.id.clone(),
            x: candidate.x,
            y: candidate.y,
            depth: candidate.depth,
            size: size_for(item.distance_m, view.zoom()),
            opacity: opacity_for(item.distance_m, view.zoom()),
            strategy,
        });
    }

    placements
}

/// Rendered bubble size; nearer and more zoomed-in thoughts are larger.
pub fn size_for(distance_m: f64, zoom: f64) -> f64 {
    let multiplier = (1.0 - distance_m / FADE_DISTANCE_M).max(0.6);
    (BASE_SIZE * multiplier * zoom).max(MIN_SIZE)
}

/// Rendered opacity in `[0, 1]`; fades with distance, brightens with zoom.
pub fn opacity_for(distance_m: f64, zoom: f64) -> f64 {
    let base = (1.0 - distance_m / FADE_DISTANCE_M).max(0.4);
    (base + (zoom - 1.0) * 0.3).clamp(0.0, 1.0)
}

fn search<Id, R>(
    index: usize,
    total: usize,
    band: DistanceBand,
    view: &ViewTransform,
    config: &LayoutConfig,
    placed: &[Placement<Id>],
    rng: &mut R,
) -> Option<(Candidate, Strategy)>
where
    R: Rng + ?Sized,
{
    // Attempts are counted across strategies; the grid walks slots from that count.
    let mut attempt = 0u32;
    for strategy in Strategy::SEARCH_ORDER {
        for _ in 0..config.attempts_per_strategy {
            let candidate = propose(strategy, index, total, attempt, band, view, rng).clamped();
            attempt += 1;
            if !collides(&candidate, placed, config.min_separation) {
                return Some((candidate, strategy));
            }
        }
    }
    None
}

fn propose<R>(
    strategy: Strategy,
    index: usize,
    total: usize,
    attempt: u32,
    band: DistanceBand,
    view: &ViewTransform,
    rng: &mut R,
) -> Candidate
where
    R: Rng + ?Sized,
{
    match strategy {
        Strategy::Radial => {
            let angle = (index as f64 * RADIAL_ANGLE_STEP + rng.gen::<f64>() * RADIAL_ANGLE_JITTER) * PI;
            let radius = band.min_radius + rng.gen::<f64>() * band.width();
            Candidate {
                x: angle.cos() * radius + VIEWPORT_CENTER - view.offset_x,
                y: angle.sin() * radius + VIEWPORT_CENTER - view.offset_y,
                depth: rng.gen::<f64>() * 30.0,
            }
        }
        Strategy::Grid => {
            let cols = ((total as f64 * 1.5).sqrt().ceil() as usize).max(1);
            let cell = SCATTER_SPAN / cols as f64;
            let slot = index + (attempt / 10) as usize;
            Candidate {
                x: (slot % cols) as f64 * cell + SCATTER_MARGIN - view.offset_x,
                y: (slot / cols) as f64 * cell + SCATTER_MARGIN - view.offset_y,
                depth: rng.gen::<f64>() * 20.0,
            }
        }
        Strategy::Uniform | Strategy::Forced => Candidate {
            x: SCATTER_MARGIN + rng.gen::<f64>() * SCATTER_SPAN - view.offset_x,
            y: SCATTER_MARGIN + rng.gen::<f64>() * SCATTER_SPAN - view.offset_y,
            depth: rng.gen::<f64>() * 25.0,
        },
    }
}

fn forced_candidate<R>(index: usize, view: &ViewTransform, rng: &mut R) -> Candidate
where
    R: Rng + ?Sized,
{
    let step = index * FORCED_STEP;
    Candidate {
        x: FORCED_ORIGIN + (step % FORCED_ROW_WIDTH) as f64 - view.offset_x,
        y: FORCED_ORIGIN + (step / FORCED_ROW_WIDTH) as f64 * FORCED_STEP as f64 - view.offset_y,
        depth: rng.gen::<f64>() * 20.0,
    }
    .clamped()
}

fn collides<Id>(candidate: &Candidate, placed: &[Placement<Id>], min_separation: f64) -> bool {
    placed.iter().any(|p| {
        let distance = ((candidate.x - p.x).powi(2) + (candidate.y - p.y).powi(2)).sqrt();
        distance < min_separation
    })
}
