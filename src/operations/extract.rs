use crate::grid::SparseBitGrid;
use crate::math::Cell;

/// A maximal 4-connected group of cells.
#[derive(Debug, Clone)]
pub struct ConnectedRegion {
    grid: SparseBitGrid,
    corner: Cell,
    len: usize,
}

impl ConnectedRegion {
    /// The region's cells.
    #[must_use]
    pub fn grid(&self) -> &SparseBitGrid {
        &self.grid
    }

    /// Start corner for tracing: smallest x, then smallest z.
    #[must_use]
    pub fn corner(&self) -> Cell {
        self.corner
    }

    /// Number of cells in the region.
    #[must_use]
    pub fn len(&self) -> usize {
        self.len
    }

    /// Always false for extracted regions; present for API symmetry.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Consumes the region and returns its grid.
    #[must_use]
    pub fn into_grid(self) -> SparseBitGrid {
        self.grid
    }
}

/// Splits a cell sequence into maximal edge-connected regions.
///
/// Regions are returned in discovery order: a region is discovered at the
/// first input cell that does not belong to an earlier region. Diagonal
/// contact does not connect cells.
pub struct ExtractRegions<'a> {
    cells: &'a [Cell],
}

impl<'a> ExtractRegions<'a> {
    /// Creates a new `ExtractRegions` operation over `cells`.
    #[must_use]
    pub fn new(cells: &'a [Cell]) -> Self {
        Self { cells }
    }

    /// Executes the extraction.
    #[must_use]
    pub fn execute(&self) -> Vec<ConnectedRegion> {
        let mut remaining = SparseBitGrid::from_cells(self.cells.iter().copied());
        let mut regions = Vec::new();
        let mut stack = Vec::new();

        for &seed in self.cells {
            if !remaining.get(seed) {
                continue;
            }
            let region = flood_fill(&mut remaining, seed, &mut stack);
            tracing::trace!(
                index = regions.len(),
                cells = region.len,
                corner_x = region.corner.x,
                corner_z = region.corner.z,
                "extracted region"
            );
            regions.push(region);
        }

        regions
    }
}

/// Moves the component containing `seed` out of `remaining`.
///
/// `stack` is scratch space reused across calls; it is empty on return.
fn flood_fill(
    remaining: &mut SparseBitGrid,
    seed: Cell,
    stack: &mut Vec<Cell>,
) -> ConnectedRegion {
    let mut extracted = SparseBitGrid::new();
    let mut corner = seed;
    let mut len = 0;

    stack.push(seed);
    while let Some(cell) = stack.pop() {
        if !remaining.get(cell) {
            continue;
        }
        remaining.set(cell, false);
        extracted.set(cell, true);
        len += 1;
        if cell.is_before(corner) {
            corner = cell;
        }
        stack.extend(cell.neighbours().filter(|&n| remaining.get(n)));
    }

    ConnectedRegion {
        grid: extracted,
        corner,
        len,
    }
}
