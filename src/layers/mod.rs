pub mod fleet;

pub use fleet::{FleetLayer, Reconfigure};
