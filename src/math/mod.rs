pub mod polygon_2d;

/// 2D point type. `x` is map x, `y` carries map z.
pub type Point2 = nalgebra::Point2<f64>;

/// Global geometric tolerance for floating-point comparisons.
pub const TOLERANCE: f64 = 1e-10;

/// One owned map tile, addressed by its integer grid coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Cell {
    pub x: i32,
    pub z: i32,
}

impl Cell {
    /// Creates a cell at `(x, z)`.
    #[must_use]
    pub const fn new(x: i32, z: i32) -> Self {
        Self { x, z }
    }

    /// Returns the cell displaced by `(dx, dz)`, or `None` if it would leave
    /// the `i32` coordinate range.
    #[must_use]
    pub fn offset(self, dx: i32, dz: i32) -> Option<Self> {
        Some(Self {
            x: self.x.checked_add(dx)?,
            z: self.z.checked_add(dz)?,
        })
    }

    /// The four edge-adjacent neighbours that exist in coordinate space.
    pub fn neighbours(self) -> impl Iterator<Item = Self> {
        [(1, 0), (-1, 0), (0, 1), (0, -1)]
            .into_iter()
            .filter_map(move |(dx, dz)| self.offset(dx, dz))
    }

    /// Grid-space position of this cell's corner displaced by `(dx, dz)` cells.
    #[must_use]
    pub fn corner(self, dx: i32, dz: i32) -> Point2 {
        Point2::new(
            f64::from(self.x) + f64::from(dx),
            f64::from(self.z) + f64::from(dz),
        )
    }

    /// Returns true if `self` precedes `other` as a region's start corner:
    /// smaller x, then smaller z.
    #[must_use]
    pub fn is_before(self, other: Self) -> bool {
        self.x < other.x || (self.x == other.x && self.z < other.z)
    }
}

impl From<(i32, i32)> for Cell {
    fn from((x, z): (i32, i32)) -> Self {
        Self::new(x, z)
    }
}
