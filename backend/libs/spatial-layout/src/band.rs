/// Concentric band a thought is drawn in, as a radius range (viewport percent)
/// measured from the cloud center.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DistanceBand {
    pub min_radius: f64,
    pub max_radius: f64,
}

impl DistanceBand {
    pub const fn new(min_radius: f64, max_radius: f64) -> Self {
        Self {
            min_radius,
            max_radius,
        }
    }

    /// Map a distance in meters to its band. Nearer thoughts sit closer to the center.
    pub fn for_distance(distance_m: f64) -> Self {
        if distance_m <= 100.0 {
            Self::new(5.0, 15.0)
        } else if distance_m <= 500.0 {
            Self::new(15.0, 25.0)
        } else if distance_m <= 1000.0 {
            Self::new(25.0, 35.0)
        } else if distance_m <= 2000.0 {
            Self::new(35.0, 45.0)
        } else {
            Self::new(45.0, 55.0)
        }
    }

    pub fn width(&self) -> f64 {
        self.max_radius - self.min_radius
    }
}
