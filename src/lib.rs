//! Territory outlines for grid-based claims.
//!
//! Owned map cells are split into edge-connected regions, and each region is
//! traced into one closed rectilinear polygon that has a vertex only where its
//! border turns.
//!
//! ```
//! use claim_outline::math::Cell;
//! use claim_outline::operations::{AssemblePolygons, OutlineParams};
//!
//! let cells = [Cell::new(0, 0), Cell::new(1, 0), Cell::new(0, 1), Cell::new(1, 1)];
//! let set = AssemblePolygons::new("A", &cells)
//!     .with_params(OutlineParams::new(16.0))
//!     .execute()?;
//! let square = set.get("A__0").map(|p| p.len());
//! assert_eq!(square, Some(4));
//! # Ok::<(), claim_outline::OutlineError>(())
//! ```

pub mod error;
pub mod geometry;
pub mod grid;
pub mod math;
pub mod operations;
pub mod overlay;

pub use error::{OutlineError, Result};
