use thiserror::Error;

/// Top-level error type for territory outline computation.
#[derive(Debug, Error)]
pub enum OutlineError {
    #[error(transparent)]
    Trace(#[from] TraceError),

    #[error(transparent)]
    Params(#[from] ParamsError),

    #[error(transparent)]
    Overlay(#[from] OverlayError),
}

/// Errors raised while tracing a region boundary.
///
/// These signal a caller bug, never a data problem: regions produced by
/// [`ExtractRegions`](crate::operations::extract::ExtractRegions) always trace.
#[derive(Debug, Error)]
pub enum TraceError {
    #[error("invalid region: start cell ({x}, {z}) {reason}")]
    InvalidRegion {
        x: i32,
        z: i32,
        reason: &'static str,
    },
}

/// Errors related to configuration values.
#[derive(Debug, Error)]
pub enum ParamsError {
    #[error("cell size must be finite and positive, got {0}")]
    InvalidCellSize(f64),
}

/// Errors reported by a rendering sink.
#[derive(Debug, Error)]
pub enum OverlayError {
    #[error("overlay sink rejected {id}: {message}")]
    Sink { id: String, message: String },
}

/// Convenience type alias for results using [`OutlineError`].
pub type Result<T> = std::result::Result<T, OutlineError>;
