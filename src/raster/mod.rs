pub mod line;
pub mod polygon;

pub use line::CellLine;
pub use polygon::{PolygonCells, world_to_cell};
