//! Map projection transforms and an authority-backed object cache.
//!
//! The [`proj`] module implements forward/inverse coordinate transforms for a
//! closed set of projections (Mercator, Equidistant Cylindrical, Oblique
//! Orthographic, Equatorial Stereographic, New Zealand Map Grid). Geographic
//! input is in degrees, projected output in metres; every variant formula
//! works on a normalized unit-radius figure and the
//! [`proj::transform::MapTransform`] wrapper applies the central meridian,
//! global scale and false origin.
//!
//! The [`cache`] module provides a thread-safe keyed cache that guarantees
//! at-most-one concurrent construction per key, with a bounded strong tier
//! and weak-reference demotion of least-recently-used entries.

pub mod cache;
pub mod error;
pub mod proj;

pub use cache::{CacheConfig, CachePolicy, ObjectCache};
pub use error::{CacheError, ProjectionError};
pub use proj::transform::{MapTransform, ProjectionFamily};
