//! Costmap layer that keeps a planner from driving through its fleet mates.
//!
//! Other robots are located by transform-frame lookup; their shared footprint
//! polygon is placed at each resolved pose, rasterized, and written into the
//! master costmap as lethal cost. Cleanup of stale marks is the host's
//! planning cycle: the update window is repainted from scratch before layers
//! run, so this layer only ever adds cost.

pub mod config;
pub mod costmap;
pub mod footprint;
pub mod grid;
pub mod layers;
pub mod raster;
pub mod transform;
pub mod types;

pub use config::FleetConfig;
pub use costmap::{Costmap, Layer, LayeredCostmap};
pub use footprint::Footprint;
pub use grid::Grid2d;
pub use layers::{FleetLayer, Reconfigure};
pub use transform::{LookupError, PoseBuffer, PoseSource};
pub use types::{LayerError, MapInfo, Pose2};
