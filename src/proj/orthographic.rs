//! Oblique Orthographic projection (spherical only).
//!
//! Forward is undefined outside the hemisphere centred on the projection
//! origin; the inverse clamps rounding overshoot of sin(c) past the unit
//! circle instead of letting sqrt go NaN.

use crate::error::ProjectionError;
use crate::proj::common::EPS;
use crate::proj::parameters::ProjectionParams;
use crate::proj::NormalizedProjection;

pub struct Orthographic {
    latitude_of_origin: f64,
    sin_phi0: f64,
    cos_phi0: f64,
}

impl Orthographic {
    pub fn new(params: &ProjectionParams) -> Result<Self, ProjectionError> {
        if !params.ellipsoid.is_spherical() {
            return Err(ProjectionError::UnsupportedVariant(
                "ellipsoidal Orthographic is not supported".to_owned(),
            ));
        }
        let phi0 = params.latitude_of_origin;
        Ok(Self {
            latitude_of_origin: phi0,
            sin_phi0: phi0.sin(),
            cos_phi0: phi0.cos(),
        })
    }
}

impl NormalizedProjection for Orthographic {
    fn transform_normalized(&self, lam: f64, phi: f64) -> Result<(f64, f64), ProjectionError> {
        let cosphi = phi.cos();
        let coslam = lam.cos();
        // cos(c): great-circle cosine between the point and the origin.
        // NaN fails the comparison and propagates.
        if self.sin_phi0 * phi.sin() + self.cos_phi0 * cosphi * coslam < -EPS {
            return Err(ProjectionError::OutsideDomain(
                "point outside hemisphere".to_owned(),
            ));
        }
        let x = cosphi * lam.sin();
        let y = self.cos_phi0 * phi.sin() - self.sin_phi0 * cosphi * coslam;
        Ok((x, y))
    }

    fn inverse_transform_normalized(
        &self,
        x: f64,
        y: f64,
    ) -> Result<(f64, f64), ProjectionError> {
        let rho = x.hypot(y);
        let mut sinc = rho;
        if sinc > 1.0 {
            if sinc - 1.0 > EPS {
                return Err(ProjectionError::OutsideDomain(
                    "point outside hemisphere".to_owned(),
                ));
            }
            // Rounding pushed the radius just past the unit circle.
            sinc = 1.0;
        }
        let cosc = (1.0 - sinc * sinc).sqrt();
        if rho <= EPS {
            return Ok((0.0, self.latitude_of_origin));
        }
        let phi = (cosc * self.sin_phi0 + y * sinc * self.cos_phi0 / rho).asin();
        let lam = (x * sinc).atan2(rho * self.cos_phi0 * cosc - y * self.sin_phi0 * sinc);
        Ok((lam, phi))
    }
}
