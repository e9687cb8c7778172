//! Outer transform wrapper.
//!
//! [`MapTransform`] owns the validated parameters and a projection kernel.
//! It converts degrees to radians, rolls longitude across the central
//! meridian, scales normalized coordinates by `scale_factor · semi_major`
//! and applies the false origin. Kernels see only centred radians and
//! produce dimensionless coordinates.

use crate::error::ProjectionError;
use crate::proj::common::{roll_longitude, EPS};
use crate::proj::ellipsoid::INTERNATIONAL_1924;
use crate::proj::equidistant::EquidistantCylindrical;
use crate::proj::mercator::Mercator;
use crate::proj::nzmg::NewZealandMapGrid;
use crate::proj::orthographic::Orthographic;
use crate::proj::parameters::{
    ParameterBlock, ProjectionParams, CENTRAL_MERIDIAN, FALSE_EASTING, FALSE_NORTHING,
    LATITUDE_OF_ORIGIN, SEMI_MAJOR, SEMI_MINOR,
};
use crate::proj::stereographic::EquatorialStereographic;
use crate::proj::{NormalizedProjection, Projection};

/// The projections this crate knows how to build.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ProjectionFamily {
    Mercator,
    EquidistantCylindrical,
    PlateCarree,
    Orthographic,
    EquatorialStereographic,
    NewZealandMapGrid,
}

enum Direction {
    Forward,
    Inverse,
}

/// A complete map projection: geographic degrees ↔ projected metres.
pub struct MapTransform {
    params: ProjectionParams,
    kernel: Projection,
}

impl MapTransform {
    /// Build a transform from a parameter block (degrees/metres units).
    pub fn new(family: ProjectionFamily, block: &ParameterBlock) -> Result<Self, ProjectionError> {
        let params = ProjectionParams::from_block(block)?;
        let kernel = match family {
            ProjectionFamily::Mercator => Projection::Mercator(Mercator::new(&params)),
            ProjectionFamily::EquidistantCylindrical => Projection::EquidistantCylindrical(
                EquidistantCylindrical::new(&params, block)?,
            ),
            ProjectionFamily::PlateCarree => Projection::EquidistantCylindrical(
                EquidistantCylindrical::plate_carree(&params)?,
            ),
            ProjectionFamily::Orthographic => {
                Projection::Orthographic(Orthographic::new(&params)?)
            }
            ProjectionFamily::EquatorialStereographic => {
                Projection::Stereographic(EquatorialStereographic::new(&params)?)
            }
            ProjectionFamily::NewZealandMapGrid => {
                Projection::NewZealandMapGrid(NewZealandMapGrid::new(&params))
            }
        };
        log::debug!(
            "built {} transform: a={}, b={}, lon0={}, lat0={}",
            kernel.name(),
            params.ellipsoid.a,
            params.ellipsoid.b,
            params.central_meridian.to_degrees(),
            params.latitude_of_origin.to_degrees(),
        );
        Ok(Self { params, kernel })
    }

    /// New Zealand Map Grid with its published defaults: International 1924
    /// ellipsoid, 173°E / 41°S natural origin, 2 510 000 m / 6 023 150 m
    /// false origin.
    pub fn new_zealand_map_grid() -> Result<Self, ProjectionError> {
        let block = ParameterBlock::new()
            .set(SEMI_MAJOR, INTERNATIONAL_1924.a)
            .set(SEMI_MINOR, INTERNATIONAL_1924.b)
            .set(CENTRAL_MERIDIAN, 173.0)
            .set(LATITUDE_OF_ORIGIN, -41.0)
            .set(FALSE_EASTING, 2_510_000.0)
            .set(FALSE_NORTHING, 6_023_150.0);
        Self::new(ProjectionFamily::NewZealandMapGrid, &block)
    }

    pub fn params(&self) -> &ProjectionParams {
        &self.params
    }

    /// Forward transform: (longitude°, latitude°) → (easting m, northing m).
    ///
    /// Fails with `OutOfEnvelope` for finite coordinates outside the
    /// geographic envelope; NaN inputs pass through as NaN outputs.
    pub fn forward(&self, lon_deg: f64, lat_deg: f64) -> Result<(f64, f64), ProjectionError> {
        check_envelope(lon_deg, lat_deg)?;
        if lon_deg.is_nan() || lat_deg.is_nan() {
            return Ok((f64::NAN, f64::NAN));
        }
        let mut lam = lon_deg.to_radians();
        let phi = lat_deg.to_radians();
        // Rolling is skipped for a zero meridian, so inputs exactly at
        // ±180° keep their sign.
        if self.params.central_meridian != 0.0 {
            lam = roll_longitude(lam - self.params.central_meridian);
        }
        let (x, y) = self.kernel.transform_normalized(lam, phi)?;
        Ok((
            x * self.params.global_scale + self.params.false_easting,
            y * self.params.global_scale + self.params.false_northing,
        ))
    }

    /// Inverse transform: (easting m, northing m) → (longitude°, latitude°).
    pub fn inverse(&self, x: f64, y: f64) -> Result<(f64, f64), ProjectionError> {
        if x.is_nan() || y.is_nan() {
            return Ok((f64::NAN, f64::NAN));
        }
        let nx = (x - self.params.false_easting) / self.params.global_scale;
        let ny = (y - self.params.false_northing) / self.params.global_scale;
        let (mut lam, phi) = self.kernel.inverse_transform_normalized(nx, ny)?;
        if self.params.central_meridian != 0.0 {
            lam = roll_longitude(lam + self.params.central_meridian);
        }
        let lon_deg = lam.to_degrees();
        let lat_deg = phi.to_degrees();
        check_envelope(lon_deg, lat_deg)?;
        Ok((lon_deg, lat_deg))
    }

    /// Batch forward over a flat `[x0, y0, x1, y1, ..]` buffer.
    ///
    /// Source and destination ranges may overlap; iteration runs backwards
    /// when the destination starts after the source so unread input is
    /// never clobbered. A failing point writes NaN for both ordinates and
    /// processing continues; the first error encountered is returned once
    /// the whole batch is done.
    pub fn forward_slice(
        &self,
        pts: &mut [f64],
        src_off: usize,
        dst_off: usize,
        count: usize,
    ) -> Result<(), ProjectionError> {
        self.transform_slice(pts, src_off, dst_off, count, Direction::Forward)
    }

    /// Batch inverse over a flat coordinate buffer; same aliasing and
    /// per-point failure contract as [`forward_slice`](Self::forward_slice).
    pub fn inverse_slice(
        &self,
        pts: &mut [f64],
        src_off: usize,
        dst_off: usize,
        count: usize,
    ) -> Result<(), ProjectionError> {
        self.transform_slice(pts, src_off, dst_off, count, Direction::Inverse)
    }

    /// Single-precision batch forward. Coordinates are widened to f64 for
    /// the transform and narrowed on write-back.
    pub fn forward_slice_f32(
        &self,
        pts: &mut [f32],
        src_off: usize,
        dst_off: usize,
        count: usize,
    ) -> Result<(), ProjectionError> {
        self.transform_slice_f32(pts, src_off, dst_off, count, Direction::Forward)
    }

    /// Single-precision batch inverse.
    pub fn inverse_slice_f32(
        &self,
        pts: &mut [f32],
        src_off: usize,
        dst_off: usize,
        count: usize,
    ) -> Result<(), ProjectionError> {
        self.transform_slice_f32(pts, src_off, dst_off, count, Direction::Inverse)
    }

    fn transform_one(&self, a: f64, b: f64, dir: &Direction) -> Result<(f64, f64), ProjectionError> {
        match dir {
            Direction::Forward => self.forward(a, b),
            Direction::Inverse => self.inverse(a, b),
        }
    }

    fn transform_slice(
        &self,
        pts: &mut [f64],
        src_off: usize,
        dst_off: usize,
        count: usize,
        dir: Direction,
    ) -> Result<(), ProjectionError> {
        check_slice_bounds(pts.len(), src_off, dst_off, count)?;
        let mut first_err: Option<ProjectionError> = None;
        let mut failures = 0usize;
        for i in point_order(src_off, dst_off, count) {
            let a = pts[src_off + 2 * i];
            let b = pts[src_off + 2 * i + 1];
            let (x, y) = match self.transform_one(a, b, &dir) {
                Ok(xy) => xy,
                Err(e) => {
                    failures += 1;
                    if first_err.is_none() {
                        first_err = Some(e);
                    }
                    (f64::NAN, f64::NAN)
                }
            };
            pts[dst_off + 2 * i] = x;
            pts[dst_off + 2 * i + 1] = y;
        }
        if let Some(e) = first_err {
            log::debug!("batch transform: {failures} of {count} points failed");
            return Err(e);
        }
        Ok(())
    }

    fn transform_slice_f32(
        &self,
        pts: &mut [f32],
        src_off: usize,
        dst_off: usize,
        count: usize,
        dir: Direction,
    ) -> Result<(), ProjectionError> {
        check_slice_bounds(pts.len(), src_off, dst_off, count)?;
        let mut first_err: Option<ProjectionError> = None;
        let mut failures = 0usize;
        for i in point_order(src_off, dst_off, count) {
            let a = pts[src_off + 2 * i] as f64;
            let b = pts[src_off + 2 * i + 1] as f64;
            let (x, y) = match self.transform_one(a, b, &dir) {
                Ok(xy) => xy,
                Err(e) => {
                    failures += 1;
                    if first_err.is_none() {
                        first_err = Some(e);
                    }
                    (f64::NAN, f64::NAN)
                }
            };
            pts[dst_off + 2 * i] = x as f32;
            pts[dst_off + 2 * i + 1] = y as f32;
        }
        if let Some(e) = first_err {
            log::debug!("batch transform: {failures} of {count} points failed");
            return Err(e);
        }
        Ok(())
    }

    /// Tolerance (in degrees) for round-trip consistency checks, widening
    /// with angular distance from the projection centre. Used by the test
    /// suite; not enforced at runtime.
    pub fn roundtrip_tolerance(&self, lon_deg: f64, lat_deg: f64) -> f64 {
        let delta = (lon_deg - self.params.central_meridian.to_degrees()).abs() / 2.0
            + (lat_deg - self.params.latitude_of_origin.to_degrees()).abs();
        if delta > 40.0 {
            1.0
        } else if delta > 15.0 {
            0.1
        } else {
            1e-6
        }
    }
}

fn check_envelope(lon_deg: f64, lat_deg: f64) -> Result<(), ProjectionError> {
    // NaN fails every comparison, so NaN coordinates pass through.
    if lon_deg < -180.0 - EPS
        || lon_deg > 180.0 + EPS
        || lat_deg < -90.0 - EPS
        || lat_deg > 90.0 + EPS
    {
        return Err(ProjectionError::OutOfEnvelope {
            lon: lon_deg,
            lat: lat_deg,
        });
    }
    Ok(())
}

fn check_slice_bounds(
    len: usize,
    src_off: usize,
    dst_off: usize,
    count: usize,
) -> Result<(), ProjectionError> {
    let need = 2 * count;
    if src_off + need > len || dst_off + need > len {
        return Err(ProjectionError::InvalidParameter(format!(
            "coordinate range out of bounds: len={len}, src_off={src_off}, \
             dst_off={dst_off}, count={count}"
        )));
    }
    Ok(())
}

/// Iteration order over point indices. When the destination range starts
/// after the source range and the two overlap, walk backwards so source
/// points are consumed before they are overwritten.
fn point_order(
    src_off: usize,
    dst_off: usize,
    count: usize,
) -> Box<dyn Iterator<Item = usize>> {
    if dst_off > src_off && dst_off < src_off + 2 * count {
        Box::new((0..count).rev())
    } else {
        Box::new(0..count)
    }
}
