//! New Zealand Map Grid.
//!
//! A conformal projection fitted to the shape of New Zealand as a degree-6
//! complex polynomial (LINZ, implemented after the PROJ `nzmg` formulation).
//! Latitude offsets are worked in units of 1e5 arc-seconds. The inverse
//! seeds φ/λ from a fitted series and then runs exactly two complex Newton
//! refinement steps; the published accuracy note says three iterations give
//! about 1e-3, and the fixed count is kept as published.

use num_complex::Complex64;

use crate::error::ProjectionError;
use crate::proj::parameters::ProjectionParams;
use crate::proj::NormalizedProjection;

const RAD_TO_SEC5: f64 = 0.206_264_806_247_096_355e1;
const SEC5_TO_RAD: f64 = 0.484_813_681_109_535_993_6;

/// ψ(Δφ) series coefficients (Δφ in 1e5 arc-seconds).
const TPSI: [f64; 10] = [
    0.6399175073,
    -0.1358797613,
    0.063294409,
    -0.02526853,
    0.0117879,
    -0.0055161,
    0.0026906,
    -0.001333,
    0.00067,
    -0.00034,
];

/// Δφ(ψ) series coefficients for the inverse.
const TPHI: [f64; 9] = [
    1.5627014243,
    0.5185406398,
    -0.03333098,
    -0.1052906,
    -0.0368594,
    0.007317,
    0.01220,
    0.00394,
    -0.0013,
];

/// Forward complex series: z = Σ A[k]·θ^(k+1).
const A: [Complex64; 6] = [
    Complex64::new(0.7557853228, 0.0),
    Complex64::new(0.249204646, 0.003371507),
    Complex64::new(-0.001541739, 0.041058560),
    Complex64::new(-0.10162907, 0.01727609),
    Complex64::new(-0.26623489, -0.36249218),
    Complex64::new(-0.6870983, -1.1651967),
];

/// Inverse seed series: θ₀ = Σ B[k]·z^(k+1).
const B: [Complex64; 6] = [
    Complex64::new(1.3231270439, 0.0),
    Complex64::new(-0.577245789, -0.007809598),
    Complex64::new(0.508307513, -0.112208952),
    Complex64::new(-0.15094762, 0.18200602),
    Complex64::new(1.01418179, 1.64497696),
    Complex64::new(1.9660549, 2.5127645),
];

/// Number of Newton refinement steps in the inverse. Fixed, not
/// convergence-tested.
const INVERSE_REFINEMENTS: usize = 2;

pub struct NewZealandMapGrid {
    latitude_of_origin: f64,
}

impl NewZealandMapGrid {
    pub fn new(params: &ProjectionParams) -> Self {
        Self {
            latitude_of_origin: params.latitude_of_origin,
        }
    }
}

/// Horner evaluation of p(z) = Σ coef[k]·z^(k+1) (zero constant term).
fn zpoly1(z: Complex64, coef: &[Complex64]) -> Complex64 {
    let mut acc = coef[coef.len() - 1];
    for &c in coef.iter().rev().skip(1) {
        acc = acc * z + c;
    }
    acc * z
}

impl NormalizedProjection for NewZealandMapGrid {
    fn transform_normalized(&self, lam: f64, phi: f64) -> Result<(f64, f64), ProjectionError> {
        let dphi = (phi - self.latitude_of_origin) * RAD_TO_SEC5;
        let mut psi = TPSI[TPSI.len() - 1];
        for c in TPSI.iter().rev().skip(1) {
            psi = psi * dphi + c;
        }
        psi *= dphi;

        let z = zpoly1(Complex64::new(psi, lam), &A);
        Ok((z.im, z.re))
    }

    fn inverse_transform_normalized(
        &self,
        x: f64,
        y: f64,
    ) -> Result<(f64, f64), ProjectionError> {
        let z = Complex64::new(y, x);
        let mut theta = zpoly1(z, &B);

        // θ ← (z + Σ (k-1)·A[k-1]·θ^k) / (Σ k·A[k-1]·θ^(k-1))
        for _ in 0..INVERSE_REFINEMENTS {
            let mut num = Complex64::new(0.0, 0.0);
            let mut den = Complex64::new(0.0, 0.0);
            let mut theta_pow = Complex64::new(1.0, 0.0);
            for (k, &a) in A.iter().enumerate() {
                den += a * theta_pow * (k as f64 + 1.0);
                theta_pow *= theta;
                num += a * theta_pow * (k as f64);
            }
            theta = (z + num) / den;
        }

        let psi = theta.re;
        let mut dphi = TPHI[TPHI.len() - 1];
        for c in TPHI.iter().rev().skip(1) {
            dphi = dphi * psi + c;
        }
        let phi = self.latitude_of_origin + psi * dphi * SEC5_TO_RAD;
        Ok((theta.im, phi))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::proj::ellipsoid::INTERNATIONAL_1924;
    use crate::proj::parameters::{
        ParameterBlock, LATITUDE_OF_ORIGIN, SEMI_MAJOR, SEMI_MINOR,
    };
    use approx::assert_relative_eq;

    fn nzmg() -> NewZealandMapGrid {
        let block = ParameterBlock::new()
            .set(SEMI_MAJOR, INTERNATIONAL_1924.a)
            .set(SEMI_MINOR, INTERNATIONAL_1924.b)
            .set(LATITUDE_OF_ORIGIN, -41.0);
        let params = ProjectionParams::from_block(&block).unwrap();
        NewZealandMapGrid::new(&params)
    }

    #[test]
    fn test_origin_maps_to_zero() {
        let proj = nzmg();
        let (x, y) = proj
            .transform_normalized(0.0, (-41.0_f64).to_radians())
            .unwrap();
        assert_relative_eq!(x, 0.0, epsilon = 1e-12);
        assert_relative_eq!(y, 0.0, epsilon = 1e-12);
    }

    #[test]
    fn test_roundtrip_over_new_zealand() {
        // λ is relative to the 173°E central meridian.
        let proj = nzmg();
        for (dlon_deg, lat_deg) in [
            (1.78, -41.29),  // Wellington
            (1.76, -36.85),  // Auckland
            (-0.41, -43.53), // Christchurch
            (-2.74, -45.87), // Southland
        ] {
            let lam = (dlon_deg as f64).to_radians();
            let phi = (lat_deg as f64).to_radians();
            let (x, y) = proj.transform_normalized(lam, phi).unwrap();
            let (lam2, phi2) = proj.inverse_transform_normalized(x, y).unwrap();
            // The fixed 2-step refinement leaves a residual far below a
            // millimetre over the fitted region.
            assert_relative_eq!(lam2, lam, epsilon = 1e-9);
            assert_relative_eq!(phi2, phi, epsilon = 1e-9);
        }
    }

    #[test]
    fn test_series_scale_near_origin() {
        // The grid is conformal with scale near 1 around the natural origin,
        // so one degree north must land about one degree's worth of
        // normalized northing. A wrong working unit for Δφ diverges the
        // series instead.
        let proj = nzmg();
        let dphi = 1.0_f64.to_radians();
        let (x, y) = proj
            .transform_normalized(0.0, (-41.0_f64).to_radians() + dphi)
            .unwrap();
        assert_relative_eq!(y, dphi, max_relative = 0.01);
        assert!(x.abs() < 1e-4, "x = {x}");
    }

    #[test]
    fn test_orientation() {
        let proj = nzmg();
        // North of the origin latitude → y > 0; east of the meridian → x > 0.
        let (x, y) = proj
            .transform_normalized(0.02, (-40.0_f64).to_radians())
            .unwrap();
        assert!(x > 0.0, "x = {x}");
        assert!(y > 0.0, "y = {y}");
    }

    #[test]
    fn test_nan_propagates() {
        let proj = nzmg();
        let (x, y) = proj.transform_normalized(f64::NAN, -0.7).unwrap();
        assert!(x.is_nan() && y.is_nan());
        let (lam, phi) = proj.inverse_transform_normalized(0.1, f64::NAN).unwrap();
        assert!(lam.is_nan() && phi.is_nan());
    }
}
