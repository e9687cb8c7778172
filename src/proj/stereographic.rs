//! Equatorial Stereographic projection, spherical and ellipsoidal.
//!
//! The ellipsoidal variant maps geodetic latitude onto the conformal sphere
//! through `ssfn` and runs the plane formulas on the conformal latitude χ;
//! the inverse recovers φ from χ by fixed-point iteration. Normalized scale
//! constant k₀ = 2 (the outer wrapper applies the user scale factor).

use std::f64::consts::{FRAC_PI_2, FRAC_PI_4};

use crate::error::ProjectionError;
use crate::proj::common::{ssfn, EPS, MAX_ITER, TOL};
use crate::proj::parameters::ProjectionParams;
use crate::proj::NormalizedProjection;

const K0: f64 = 2.0;

#[derive(Debug)]
pub struct EquatorialStereographic {
    spherical: bool,
    e: f64,
}

impl EquatorialStereographic {
    pub fn new(params: &ProjectionParams) -> Result<Self, ProjectionError> {
        // Only the equatorial aspect is implemented; silently projecting
        // from the equator with an oblique origin requested would be wrong.
        if params.latitude_of_origin.abs() > EPS {
            return Err(ProjectionError::UnsupportedVariant(format!(
                "oblique Stereographic (latitude_of_origin {}) is not supported",
                params.latitude_of_origin.to_degrees()
            )));
        }
        Ok(Self {
            spherical: params.ellipsoid.is_spherical(),
            e: params.ellipsoid.eccentricity(),
        })
    }

    /// φ from conformal latitude χ, by iterating Snyder (3-4)/(3-24).
    fn phi_from_chi(&self, chi: f64) -> Result<f64, ProjectionError> {
        let t = (FRAC_PI_4 + 0.5 * chi).tan();
        let ehalf = 0.5 * self.e;
        let mut phi = chi;
        for _ in 0..MAX_ITER {
            let esin = self.e * phi.sin();
            let next = 2.0 * (t * ((1.0 + esin) / (1.0 - esin)).powf(ehalf)).atan() - FRAC_PI_2;
            let dphi = next - phi;
            phi = next;
            if !(dphi.abs() > TOL) {
                return Ok(phi);
            }
        }
        Err(ProjectionError::NoConvergence(MAX_ITER))
    }
}

impl NormalizedProjection for EquatorialStereographic {
    fn transform_normalized(&self, lam: f64, phi: f64) -> Result<(f64, f64), ProjectionError> {
        // Conformal latitude; identical to φ on the sphere.
        let chi = if self.spherical {
            phi
        } else {
            2.0 * ssfn(phi, phi.sin(), self.e).atan() - FRAC_PI_2
        };
        let cos_chi = chi.cos();
        let denom = 1.0 + cos_chi * lam.cos();
        // The antipode of the projection centre maps to infinity.
        if denom < EPS {
            return Err(ProjectionError::OutsideDomain(
                "value tends toward infinity".to_owned(),
            ));
        }
        let a = K0 / denom;
        Ok((a * cos_chi * lam.sin(), a * chi.sin()))
    }

    fn inverse_transform_normalized(
        &self,
        x: f64,
        y: f64,
    ) -> Result<(f64, f64), ProjectionError> {
        let rho = x.hypot(y);
        if rho < EPS {
            let phi = if self.spherical { y } else { self.phi_from_chi(y)? };
            return Ok((x, phi));
        }
        let c = 2.0 * (rho / K0).atan();
        let sinc = c.sin();
        let cosc = c.cos();
        let chi = (y * sinc / rho).asin();
        let lam = (x * sinc).atan2(rho * cosc);
        let phi = if self.spherical {
            chi
        } else {
            self.phi_from_chi(chi)?
        };
        Ok((lam, phi))
    }
}
