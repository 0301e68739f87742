pub mod constants;
pub mod error;
pub mod geometry;
pub mod info;

pub use constants::*;
pub use error::LayerError;
pub use geometry::{Bounds, CellRegion, Pose2};
pub use info::MapInfo;
