//! Shared numerical helpers for projection math.
//!
//! The iterative solvers terminate on `!(correction > TOL)` rather than
//! `correction <= TOL` so that a NaN input falls out of the loop and
//! propagates as NaN instead of exhausting the iteration cap.

use std::f64::consts::{FRAC_PI_2, FRAC_PI_4, PI};

use crate::error::ProjectionError;

/// Comparison / envelope tolerance.
pub const EPS: f64 = 1e-6;

/// Convergence tolerance for iterative solvers.
pub const TOL: f64 = 1e-10;

/// Iteration cap before an iterative solver fails with `NoConvergence`.
pub const MAX_ITER: usize = 15;

/// Roll an angle into [-π, π).
pub fn roll_longitude(x: f64) -> f64 {
    x - (2.0 * PI) * (x / (2.0 * PI) + 0.5).floor()
}

/// m(φ) = cosφ / sqrt(1 - e²·sin²φ), the radius of the parallel at φ
/// divided by the semi-major axis.
pub fn msfn(sinphi: f64, cosphi: f64, e2: f64) -> f64 {
    cosphi / (1.0 - sinphi * sinphi * e2).sqrt()
}

/// t(φ) = tan(π/4 - φ/2) / ((1 - e·sinφ)/(1 + e·sinφ))^(e/2), the isometric
/// colatitude function used by conformal projections.
pub fn tsfn(phi: f64, sinphi: f64, e: f64) -> f64 {
    let con = e * sinphi;
    (FRAC_PI_4 - 0.5 * phi).tan() / ((1.0 - con) / (1.0 + con)).powf(0.5 * e)
}

/// s(φ) = tan(π/4 + φ/2) · ((1 - e·sinφ)/(1 + e·sinφ))^(e/2), used to map
/// geodetic latitude onto the conformal sphere.
pub fn ssfn(phi: f64, sinphi: f64, e: f64) -> f64 {
    let con = e * sinphi;
    (FRAC_PI_4 + 0.5 * phi).tan() * ((1.0 - con) / (1.0 + con)).powf(0.5 * e)
}

/// Solve tsfn(φ) = ts for φ by fixed-point iteration.
///
/// Fails with `NoConvergence` if the angular correction is still above
/// [`TOL`] after [`MAX_ITER`] iterations. NaN input yields NaN output.
pub fn cphi2(ts: f64, e: f64) -> Result<f64, ProjectionError> {
    let ehalf = 0.5 * e;
    let mut phi = FRAC_PI_2 - 2.0 * ts.atan();
    for _ in 0..MAX_ITER {
        let con = e * phi.sin();
        let dphi =
            FRAC_PI_2 - 2.0 * (ts * ((1.0 - con) / (1.0 + con)).powf(ehalf)).atan() - phi;
        phi += dphi;
        if !(dphi.abs() > TOL) {
            return Ok(phi);
        }
    }
    Err(ProjectionError::NoConvergence(MAX_ITER))
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_roll_longitude_range() {
        assert_relative_eq!(roll_longitude(0.0), 0.0);
        assert_relative_eq!(roll_longitude(PI + 0.1), -PI + 0.1, epsilon = 1e-12);
        assert_relative_eq!(roll_longitude(-PI - 0.1), PI - 0.1, epsilon = 1e-12);
        assert_relative_eq!(roll_longitude(3.0 * PI), -PI, epsilon = 1e-12);
    }

    #[test]
    fn test_tsfn_cphi2_inverse_pair() {
        let e = 0.081_819_190_842_622; // WGS84
        for lat_deg in [-80.0, -45.0, -10.0, 0.0, 10.0, 45.0, 80.0] {
            let phi = (lat_deg as f64).to_radians();
            let ts = tsfn(phi, phi.sin(), e);
            let back = cphi2(ts, e).unwrap();
            assert_relative_eq!(back, phi, epsilon = 1e-10);
        }
    }

    #[test]
    fn test_cphi2_spherical_reduction() {
        // e = 0: cphi2 reduces to π/2 - 2·atan(ts) in a single step.
        let ts = 0.5;
        let phi = cphi2(ts, 0.0).unwrap();
        assert_relative_eq!(phi, FRAC_PI_2 - 2.0 * ts.atan(), epsilon = 1e-12);
    }

    #[test]
    fn test_cphi2_nan_propagates() {
        let phi = cphi2(f64::NAN, 0.08).unwrap();
        assert!(phi.is_nan());
    }

    #[test]
    fn test_msfn_equator() {
        assert_relative_eq!(msfn(0.0, 1.0, 0.006_694_38), 1.0);
    }
}
