//! Equidistant Cylindrical projection (spherical only).
//!
//! Normalized formulas: x = λ·cos(φ₁), y = φ, with φ₁ the standard parallel.
//! Plate Carrée is the φ₁ = 0 special case.

use crate::error::ProjectionError;
use crate::proj::common::EPS;
use crate::proj::parameters::{ParameterBlock, ProjectionParams, STANDARD_PARALLEL_1};
use crate::proj::NormalizedProjection;

#[derive(Debug)]
pub struct EquidistantCylindrical {
    cos_standard_parallel: f64,
}

impl EquidistantCylindrical {
    pub fn new(
        params: &ProjectionParams,
        block: &ParameterBlock,
    ) -> Result<Self, ProjectionError> {
        if !params.ellipsoid.is_spherical() {
            return Err(ProjectionError::UnsupportedVariant(
                "ellipsoidal Equidistant Cylindrical is not supported".to_owned(),
            ));
        }
        let sp_deg = block.value(STANDARD_PARALLEL_1, 0.0);
        if !(-90.0..=90.0).contains(&sp_deg) {
            return Err(ProjectionError::InvalidParameter(format!(
                "standard_parallel_1 {sp_deg} outside [-90, 90]"
            )));
        }
        // cos(φ₁) = 0 at the poles would collapse x and break the inverse.
        if 90.0 - sp_deg.abs() < EPS {
            return Err(ProjectionError::InvalidParameter(format!(
                "standard_parallel_1 {sp_deg} too close to a pole"
            )));
        }
        Ok(Self {
            cos_standard_parallel: sp_deg.to_radians().cos(),
        })
    }

    /// Plate Carrée: standard parallel fixed at the equator.
    pub fn plate_carree(params: &ProjectionParams) -> Result<Self, ProjectionError> {
        Self::new(params, &ParameterBlock::new())
    }
}

impl NormalizedProjection for EquidistantCylindrical {
    fn transform_normalized(&self, lam: f64, phi: f64) -> Result<(f64, f64), ProjectionError> {
        Ok((lam * self.cos_standard_parallel, phi))
    }

    fn inverse_transform_normalized(
        &self,
        x: f64,
        y: f64,
    ) -> Result<(f64, f64), ProjectionError> {
        Ok((x / self.cos_standard_parallel, y))
    }
}
