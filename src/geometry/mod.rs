pub mod polygon;
pub mod polygon_set;

pub use polygon::{Polygon, Winding};
pub use polygon_set::{polygon_id, PolygonSet};
