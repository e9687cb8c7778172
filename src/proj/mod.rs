pub mod common;
pub mod ellipsoid;
pub mod equidistant;
pub mod mercator;
pub mod nzmg;
pub mod orthographic;
pub mod parameters;
pub mod stereographic;
pub mod transform;

use crate::error::ProjectionError;

/// Normalized forward/inverse transform pair.
///
/// Coordinates are dimensionless on a unit-radius ellipsoid/sphere, with the
/// central meridian already subtracted from the longitude. Implementations
/// never apply scale, false easting/northing or meridian rolling — that is
/// the job of [`transform::MapTransform`].
pub trait NormalizedProjection {
    /// Forward: (λ_rad, φ_rad) → dimensionless (x, y).
    fn transform_normalized(&self, lam: f64, phi: f64) -> Result<(f64, f64), ProjectionError>;

    /// Inverse: dimensionless (x, y) → (λ_rad, φ_rad).
    fn inverse_transform_normalized(&self, x: f64, y: f64)
        -> Result<(f64, f64), ProjectionError>;
}

/// The closed set of projection kernels, dispatched without trait objects.
pub enum Projection {
    Mercator(mercator::Mercator),
    EquidistantCylindrical(equidistant::EquidistantCylindrical),
    Orthographic(orthographic::Orthographic),
    Stereographic(stereographic::EquatorialStereographic),
    NewZealandMapGrid(nzmg::NewZealandMapGrid),
}

impl NormalizedProjection for Projection {
    fn transform_normalized(&self, lam: f64, phi: f64) -> Result<(f64, f64), ProjectionError> {
        match self {
            Projection::Mercator(p) => p.transform_normalized(lam, phi),
            Projection::EquidistantCylindrical(p) => p.transform_normalized(lam, phi),
            Projection::Orthographic(p) => p.transform_normalized(lam, phi),
            Projection::Stereographic(p) => p.transform_normalized(lam, phi),
            Projection::NewZealandMapGrid(p) => p.transform_normalized(lam, phi),
        }
    }

    fn inverse_transform_normalized(
        &self,
        x: f64,
        y: f64,
    ) -> Result<(f64, f64), ProjectionError> {
        match self {
            Projection::Mercator(p) => p.inverse_transform_normalized(x, y),
            Projection::EquidistantCylindrical(p) => p.inverse_transform_normalized(x, y),
            Projection::Orthographic(p) => p.inverse_transform_normalized(x, y),
            Projection::Stereographic(p) => p.inverse_transform_normalized(x, y),
            Projection::NewZealandMapGrid(p) => p.inverse_transform_normalized(x, y),
        }
    }
}

impl Projection {
    /// Short identifier used in log messages.
    pub fn name(&self) -> &'static str {
        match self {
            Projection::Mercator(_) => "mercator",
            Projection::EquidistantCylindrical(_) => "equidistant_cylindrical",
            Projection::Orthographic(_) => "orthographic",
            Projection::Stereographic(_) => "stereographic",
            Projection::NewZealandMapGrid(_) => "new_zealand_map_grid",
        }
    }
}
