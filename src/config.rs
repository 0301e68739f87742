//! Layer configuration, as supplied by the host's parameter system.
//!
//! The struct is plain serde `Deserialize`; the host owns the transport and
//! the on-disk format.

use serde::Deserialize;

use crate::footprint::Footprint;
use crate::types::LayerError;

#[derive(Clone, Debug, Deserialize)]
pub struct FleetConfig {
    /// Shared reference frame that robot poses are resolved in.
    #[serde(default = "default_global_frame")]
    pub global_frame: String,

    /// This robot's own frame; never looked up, never marked.
    #[serde(default = "default_base_frame")]
    pub robot_base_frame: String,

    /// Frames of every robot in the fleet, processed in this order.
    #[serde(default)]
    pub robot_frames: Vec<String>,

    /// Footprint polygon as a bracketed point list; wins over `robot_radius`.
    #[serde(default)]
    pub footprint: Option<String>,

    /// Radius (meters) of a circular footprint when no polygon is configured.
    #[serde(default)]
    pub robot_radius: Option<f32>,

    #[serde(default = "default_enabled")]
    pub enabled: bool,
}

impl Default for FleetConfig {
    fn default() -> Self {
        Self {
            global_frame: default_global_frame(),
            robot_base_frame: default_base_frame(),
            robot_frames: Vec::new(),
            footprint: None,
            robot_radius: None,
            enabled: default_enabled(),
        }
    }
}

impl FleetConfig {
    /// Strict pre-check for hosts that prefer failing at load time over the
    /// layer's log-and-degrade behavior.
    pub fn validate(&self) -> Result<(), LayerError> {
        if self.robot_frames.is_empty() {
            return Err(LayerError::InvalidConfiguration(
                "robot_frames is empty; no robots to track".to_string(),
            ));
        }
        Footprint::from_config(self.footprint.as_deref(), self.robot_radius).map(|_| ())
    }
}

fn default_global_frame() -> String {
    "map".to_string()
}

fn default_base_frame() -> String {
    "base_link".to_string()
}

fn default_enabled() -> bool {
    true
}
