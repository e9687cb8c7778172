//! Mercator projection (1SP), spherical and ellipsoidal sub-variants.
//!
//! Normalized formulas on the unit figure:
//!   spherical:   x = λ, y = ln(tan(π/4 + φ/2))
//!   ellipsoidal: x = λ, y = -ln(tsfn(φ, e))
//!
//! The sub-variant is fixed at construction time by comparing the ellipsoid
//! axes; the two paths differ only in the meridional-distance function.

use std::f64::consts::FRAC_PI_2;

use crate::error::ProjectionError;
use crate::proj::common::{cphi2, tsfn, EPS};
use crate::proj::parameters::ProjectionParams;
use crate::proj::NormalizedProjection;

pub struct Mercator {
    spherical: bool,
    /// First eccentricity; 0 for the spherical sub-variant.
    e: f64,
}

impl Mercator {
    pub fn new(params: &ProjectionParams) -> Self {
        let spherical = params.ellipsoid.is_spherical();
        Self {
            spherical,
            e: params.ellipsoid.eccentricity(),
        }
    }
}

impl NormalizedProjection for Mercator {
    fn transform_normalized(&self, lam: f64, phi: f64) -> Result<(f64, f64), ProjectionError> {
        // The poles project to infinity. NaN fails neither comparison and
        // falls through to a NaN output.
        if phi.abs() > FRAC_PI_2 - EPS {
            return Err(ProjectionError::OutsideDomain(format!(
                "latitude {phi} too close to a pole"
            )));
        }
        let y = if self.spherical {
            ((FRAC_PI_2 + phi) * 0.5).tan().ln()
        } else {
            -tsfn(phi, phi.sin(), self.e).ln()
        };
        Ok((lam, y))
    }

    fn inverse_transform_normalized(
        &self,
        x: f64,
        y: f64,
    ) -> Result<(f64, f64), ProjectionError> {
        let phi = if self.spherical {
            FRAC_PI_2 - 2.0 * (-y).exp().atan()
        } else {
            cphi2((-y).exp(), self.e)?
        };
        Ok((x, phi))
    }
}
