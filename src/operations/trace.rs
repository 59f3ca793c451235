use crate::error::{Result, TraceError};
use crate::geometry::Polygon;
use crate::grid::SparseBitGrid;
use crate::math::{Cell, Point2};

use super::extract::ConnectedRegion;
use super::OutlineParams;

/// Walking direction along a region border.
///
/// `XPlus → ZPlus → XMinus → ZMinus` is a clockwise cycle on a north-up map
/// (+z south). The region interior is always on the walker's right.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Heading {
    XPlus,
    ZPlus,
    XMinus,
    ZMinus,
}

impl Heading {
    /// Cell offset one step ahead.
    fn ahead(self) -> (i32, i32) {
        match self {
            Self::XPlus => (1, 0),
            Self::ZPlus => (0, 1),
            Self::XMinus => (-1, 0),
            Self::ZMinus => (0, -1),
        }
    }

    /// Cell offset ahead and one step to the exterior side.
    fn diagonal(self) -> (i32, i32) {
        match self {
            Self::XPlus => (1, -1),
            Self::ZPlus => (1, 1),
            Self::XMinus => (-1, 1),
            Self::ZMinus => (-1, -1),
        }
    }

    /// Corner of the current cell where an edge in this heading ends.
    fn leading_corner(self) -> (i32, i32) {
        match self {
            Self::XPlus => (1, 0),
            Self::ZPlus => (1, 1),
            Self::XMinus => (0, 1),
            Self::ZMinus => (0, 0),
        }
    }

    fn clockwise(self) -> Self {
        match self {
            Self::XPlus => Self::ZPlus,
            Self::ZPlus => Self::XMinus,
            Self::XMinus => Self::ZMinus,
            Self::ZMinus => Self::XPlus,
        }
    }

    fn counter_clockwise(self) -> Self {
        match self {
            Self::XPlus => Self::ZMinus,
            Self::ZPlus => Self::XPlus,
            Self::XMinus => Self::ZPlus,
            Self::ZMinus => Self::XMinus,
        }
    }
}

/// Traces the outer boundary of one region into a closed polygon.
///
/// The walk starts at the region's top-left cell heading +x and emits a
/// vertex only where the border turns, so the output is proportional to the
/// perimeter. The first vertex is the top-left corner and the signed area
/// is positive ([`Winding::Positive`](crate::geometry::Winding::Positive)).
/// Interior holes are not traced.
pub struct TraceOutline<'a> {
    grid: &'a SparseBitGrid,
    start: Cell,
    params: Option<OutlineParams>,
}

impl<'a> TraceOutline<'a> {
    /// Creates a new `TraceOutline` for an extracted region.
    #[must_use]
    pub fn new(region: &'a ConnectedRegion) -> Self {
        Self::from_grid(region.grid(), region.corner())
    }

    /// Creates a new `TraceOutline` over an arbitrary grid starting at
    /// `start`, which must be the region's smallest-x, then smallest-z cell.
    #[must_use]
    pub fn from_grid(grid: &'a SparseBitGrid, start: Cell) -> Self {
        Self {
            grid,
            start,
            params: None,
        }
    }

    /// Scales the output into render units. Without params the polygon is in
    /// grid units.
    #[must_use]
    pub fn with_params(mut self, params: OutlineParams) -> Self {
        self.params = Some(params);
        self
    }

    /// Executes the trace.
    ///
    /// # Errors
    ///
    /// Returns `TraceError::InvalidRegion` if the start cell is not set, or
    /// has a set neighbour at -x or -z, and `ParamsError::InvalidCellSize` for
    /// a bad cell size.
    pub fn execute(&self) -> Result<Polygon> {
        let outline = Polygon::new(self.walk()?);
        match self.params {
            Some(params) => Ok(outline.scaled(params.validated_cell_size()?)),
            None => Ok(outline),
        }
    }

    fn check_start(&self) -> std::result::Result<(), TraceError> {
        let Cell { x, z } = self.start;
        let reason = if !self.grid.get(self.start) {
            "is not set in the region"
        } else if self.grid.get_offset(self.start, -1, 0)
            || self.grid.get_offset(self.start, 0, -1)
        {
            "is not the region's top-left corner"
        } else {
            return Ok(());
        };
        Err(TraceError::InvalidRegion { x, z, reason })
    }

    fn walk(&self) -> std::result::Result<Vec<Point2>, TraceError> {
        self.check_start()?;

        let start = self.start;
        let mut vertices = vec![start.corner(0, 0)];
        let mut cell = start;
        let mut heading = Heading::XPlus;

        // The step out of (start, -z) is the convex turn that re-emits the
        // first vertex, so stopping here closes the loop.
        while cell != start || heading != Heading::ZMinus {
            let (ax, az) = heading.ahead();
            let (dx, dz) = heading.diagonal();
            let (vx, vz) = heading.leading_corner();

            if !self.grid.get_offset(cell, ax, az) {
                vertices.push(cell.corner(vx, vz));
                heading = heading.clockwise();
            } else if let Some(next) = cell.offset(dx, dz).filter(|&n| self.grid.get(n)) {
                vertices.push(cell.corner(vx, vz));
                cell = next;
                heading = heading.counter_clockwise();
            } else {
                // ahead is set, so the offset exists
                cell = cell.offset(ax, az).unwrap_or(cell);
            }
        }

        Ok(vertices)
    }
}
