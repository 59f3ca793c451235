use crate::math::polygon_2d::{is_rectilinear, perimeter_2d, signed_area_2d};
use crate::math::{Cell, Point2};

/// Orientation of a closed polygon's vertex order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Winding {
    /// Positive shoelace area in `(x, z)`. Clockwise on a north-up map,
    /// where +z points south.
    Positive,
    /// Negative shoelace area.
    Negative,
    /// Fewer than three vertices or zero area.
    Degenerate,
}

/// A closed rectilinear outline.
///
/// Vertex `x` is map x and vertex `y` is map z. The last vertex connects back
/// to the first; the first vertex is not repeated.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Polygon {
    vertices: Vec<Point2>,
}

impl Polygon {
    /// Creates a polygon from its vertices.
    #[must_use]
    pub fn new(vertices: Vec<Point2>) -> Self {
        Self { vertices }
    }

    /// The outline of a single cell, scaled by `cell_size`.
    #[must_use]
    pub fn cell_square(cell: Cell, cell_size: f64) -> Self {
        Self::new(vec![
            cell.corner(0, 0),
            cell.corner(1, 0),
            cell.corner(1, 1),
            cell.corner(0, 1),
        ])
        .scaled(cell_size)
    }

    /// The ordered vertices.
    #[must_use]
    pub fn vertices(&self) -> &[Point2] {
        &self.vertices
    }

    /// Number of vertices.
    #[must_use]
    pub fn len(&self) -> usize {
        self.vertices.len()
    }

    /// Returns true if the polygon has no vertices.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }

    /// Returns a copy with every coordinate multiplied by `factor`.
    #[must_use]
    pub fn scaled(&self, factor: f64) -> Self {
        Self::new(
            self.vertices
                .iter()
                .map(|p| Point2::new(p.x * factor, p.y * factor))
                .collect(),
        )
    }

    /// Shoelace signed area.
    #[must_use]
    pub fn signed_area(&self) -> f64 {
        signed_area_2d(&self.vertices)
    }

    /// Unsigned enclosed area.
    #[must_use]
    pub fn area(&self) -> f64 {
        self.signed_area().abs()
    }

    /// Length of the outline including the closing edge.
    #[must_use]
    pub fn perimeter(&self) -> f64 {
        perimeter_2d(&self.vertices)
    }

    /// Orientation of the vertex order.
    #[must_use]
    pub fn winding(&self) -> Winding {
        let area = self.signed_area();
        if area > 0.0 {
            Winding::Positive
        } else if area < 0.0 {
            Winding::Negative
        } else {
            Winding::Degenerate
        }
    }

    /// Returns true if every edge is axis-aligned.
    #[must_use]
    pub fn is_rectilinear(&self) -> bool {
        is_rectilinear(&self.vertices)
    }

    /// Splits into parallel x and z coordinate arrays, the shape most map
    /// marker APIs take.
    #[must_use]
    pub fn to_xz_arrays(&self) -> (Vec<f64>, Vec<f64>) {
        self.vertices.iter().map(|p| (p.x, p.y)).unzip()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn cell_square_scaled() {
        let sq = Polygon::cell_square(Cell::new(-1, 2), 16.0);
        let (xs, zs) = sq.to_xz_arrays();
        assert_eq!(xs, vec![-16.0, 0.0, 0.0, -16.0]);
        assert_eq!(zs, vec![32.0, 32.0, 48.0, 48.0]);
        assert_relative_eq!(sq.area(), 256.0);
        assert_relative_eq!(sq.perimeter(), 64.0);
        assert_eq!(sq.winding(), Winding::Positive);
        assert!(sq.is_rectilinear());
    }

    #[test]
    fn degenerate_winding() {
        assert_eq!(Polygon::default().winding(), Winding::Degenerate);
        let line = Polygon::new(vec![Point2::new(0.0, 0.0), Point2::new(1.0, 0.0)]);
        assert_eq!(line.winding(), Winding::Degenerate);
    }

    #[test]
    fn reversed_is_negative() {
        let mut v = Polygon::cell_square(Cell::new(0, 0), 1.0).vertices().to_vec();
        v.reverse();
        assert_eq!(Polygon::new(v).winding(), Winding::Negative);
    }
}
