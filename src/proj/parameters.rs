//! Parameter ingestion: a flat name → value mapping in fixed units
//! (degrees for angles, metres for lengths, dimensionless for scale),
//! frozen into an immutable [`ProjectionParams`] before any kernel exists.

use std::collections::HashMap;

use crate::error::ProjectionError;
use crate::proj::common::EPS;
use crate::proj::ellipsoid::Ellipsoid;

pub const SEMI_MAJOR: &str = "semi_major";
pub const SEMI_MINOR: &str = "semi_minor";
pub const CENTRAL_MERIDIAN: &str = "central_meridian";
pub const LATITUDE_OF_ORIGIN: &str = "latitude_of_origin";
pub const SCALE_FACTOR: &str = "scale_factor";
pub const FALSE_EASTING: &str = "false_easting";
pub const FALSE_NORTHING: &str = "false_northing";
pub const STANDARD_PARALLEL_1: &str = "standard_parallel_1";

/// Flat parameter mapping. Values are assumed unit-converted already:
/// degrees for angles, metres for lengths.
#[derive(Clone, Debug, Default)]
pub struct ParameterBlock {
    values: HashMap<String, f64>,
}

impl ParameterBlock {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insertion.
    pub fn set(mut self, name: &str, value: f64) -> Self {
        self.values.insert(name.to_owned(), value);
        self
    }

    /// Look up an optional parameter, falling back to its default.
    pub fn value(&self, name: &str, default: f64) -> f64 {
        self.values.get(name).copied().unwrap_or(default)
    }

    /// Look up a mandatory parameter.
    pub fn require(&self, name: &str) -> Result<f64, ProjectionError> {
        self.values
            .get(name)
            .copied()
            .ok_or_else(|| ProjectionError::InvalidParameter(format!("missing {name}")))
    }
}

/// Validated, immutable projection parameters in radians/metres.
#[derive(Clone, Copy, Debug)]
pub struct ProjectionParams {
    pub ellipsoid: Ellipsoid,
    /// Central meridian λ₀ (radians, in [-π, π]).
    pub central_meridian: f64,
    /// Latitude of origin φ₀ (radians, in [-π/2, π/2]).
    pub latitude_of_origin: f64,
    /// Scale factor at the natural origin (dimensionless).
    pub scale_factor: f64,
    /// False easting (metres).
    pub false_easting: f64,
    /// False northing (metres).
    pub false_northing: f64,
    /// scale_factor · semi_major — converts normalized coordinates to metres.
    pub global_scale: f64,
}

impl ProjectionParams {
    pub fn from_block(block: &ParameterBlock) -> Result<Self, ProjectionError> {
        let a = block.require(SEMI_MAJOR)?;
        let b = block.require(SEMI_MINOR)?;
        let ellipsoid = Ellipsoid::from_axes(a, b);
        ellipsoid.validate()?;

        let cm_deg = block.value(CENTRAL_MERIDIAN, 0.0);
        if !cm_deg.is_nan() && !(-180.0 - EPS..=180.0 + EPS).contains(&cm_deg) {
            return Err(ProjectionError::InvalidParameter(format!(
                "central_meridian {cm_deg} outside [-180, 180]"
            )));
        }
        let lat0_deg = block.value(LATITUDE_OF_ORIGIN, 0.0);
        if !lat0_deg.is_nan() && !(-90.0 - EPS..=90.0 + EPS).contains(&lat0_deg) {
            return Err(ProjectionError::InvalidParameter(format!(
                "latitude_of_origin {lat0_deg} outside [-90, 90]"
            )));
        }
        let scale_factor = block.value(SCALE_FACTOR, 1.0);
        if !(scale_factor.is_finite() && scale_factor > 0.0) {
            return Err(ProjectionError::InvalidParameter(format!(
                "scale_factor must be finite and positive, got {scale_factor}"
            )));
        }

        Ok(Self {
            ellipsoid,
            central_meridian: cm_deg.to_radians(),
            latitude_of_origin: lat0_deg.to_radians(),
            scale_factor,
            false_easting: block.value(FALSE_EASTING, 0.0),
            false_northing: block.value(FALSE_NORTHING, 0.0),
            global_scale: scale_factor * a,
        })
    }
}
