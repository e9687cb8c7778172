use thiserror::Error;

/// Errors raised by projection construction and coordinate transforms.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ProjectionError {
    /// Input longitude/latitude outside the valid geographic envelope.
    /// NaN inputs are exempt from this check and propagate as NaN outputs.
    #[error("coordinate ({lon}, {lat}) outside valid envelope")]
    OutOfEnvelope { lon: f64, lat: f64 },

    /// The transform is geometrically undefined at this input for the
    /// specific projection (wrong hemisphere, antipodal point, pole).
    #[error("point outside projection domain: {0}")]
    OutsideDomain(String),

    /// An iterative solver exceeded its iteration cap without converging.
    #[error("no convergence after {0} iterations")]
    NoConvergence(usize),

    /// The requested computation model is not supported by this projection.
    #[error("unsupported variant: {0}")]
    UnsupportedVariant(String),

    /// A projection parameter is missing or outside its legal range.
    #[error("invalid parameter: {0}")]
    InvalidParameter(String),
}

/// Errors raised by the authority object cache.
#[derive(Error, Debug)]
pub enum CacheError<E: std::error::Error + 'static> {
    /// The generator failed for this key. The failure is never cached; a
    /// later lookup for the same key retries construction.
    #[error("construction failed for key {key:?}")]
    Construction {
        key: String,
        #[source]
        source: E,
    },

    /// The cache was disposed; no further lookups are possible.
    #[error("cache has been disposed")]
    Disposed,
}
