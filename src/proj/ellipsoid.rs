use crate::error::ProjectionError;

/// Reference ellipsoid defined by its axes.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Ellipsoid {
    /// Semi-major axis (metres)
    pub a: f64,
    /// Semi-minor axis (metres)
    pub b: f64,
    /// First eccentricity squared: 1 - (b/a)²
    pub e2: f64,
}

impl Ellipsoid {
    pub const fn from_axes(a: f64, b: f64) -> Self {
        let ratio = b / a;
        Self {
            a,
            b,
            e2: 1.0 - ratio * ratio,
        }
    }

    /// First eccentricity.
    pub fn eccentricity(&self) -> f64 {
        self.e2.sqrt()
    }

    /// A figure is spherical iff both axes are exactly equal.
    pub fn is_spherical(&self) -> bool {
        self.a == self.b
    }

    /// Validate the axes: both finite and positive, `b <= a`.
    pub fn validate(&self) -> Result<(), ProjectionError> {
        if !(self.a.is_finite() && self.a > 0.0) {
            return Err(ProjectionError::InvalidParameter(format!(
                "semi_major must be finite and positive, got {}",
                self.a
            )));
        }
        if !(self.b.is_finite() && self.b > 0.0 && self.b <= self.a) {
            return Err(ProjectionError::InvalidParameter(format!(
                "semi_minor must be in (0, semi_major], got {}",
                self.b
            )));
        }
        Ok(())
    }
}

pub const WGS84: Ellipsoid = Ellipsoid::from_axes(6_378_137.0, 6_356_752.314_245_179);
pub const GRS80: Ellipsoid = Ellipsoid::from_axes(6_378_137.0, 6_356_752.314_140_356);
/// International 1924, the figure underlying the New Zealand Map Grid.
pub const INTERNATIONAL_1924: Ellipsoid = Ellipsoid::from_axes(6_378_388.0, 6_356_911.946);
/// Authalic-style sphere of radius 6 371 000 m.
pub const SPHERE: Ellipsoid = Ellipsoid::from_axes(6_371_000.0, 6_371_000.0);
