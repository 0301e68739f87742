//! Costmap layer that marks the footprints of other robots as lethal.
//!
//! Each update pass resolves the latest pose of every tracked frame, places
//! the shared footprint polygon at that pose, rasterizes it, and burns the
//! covered cells into the master grid. A robot whose pose cannot be resolved
//! is skipped for that pass only; the others are still marked.

use std::sync::Arc;

use glam::Vec2;

use crate::config::FleetConfig;
use crate::costmap::{Costmap, Layer, mark_lethal};
use crate::footprint::Footprint;
use crate::transform::PoseSource;
use crate::types::{Bounds, CellRegion, MapInfo, Pose2};

/// Pending configuration changes from the host, applied between passes.
/// `None` fields are left untouched.
#[derive(Debug, Clone, Default)]
pub struct Reconfigure {
    pub enabled: Option<bool>,
    /// New footprint polygon as a bracketed point list.
    pub footprint: Option<String>,
}

pub struct FleetLayer {
    global_frame: String,
    robot_base_frame: String,
    robot_frames: Vec<String>,
    footprint: Footprint,
    enabled: bool,
    poses: Arc<dyn PoseSource>,
    info: Option<MapInfo>,
}

impl FleetLayer {
    /// Build the layer from host configuration.
    ///
    /// Construction never fails: an empty registry leaves the layer idle and
    /// a bad footprint spec falls back to the stock circle, each reported
    /// through the log once. Hosts that prefer a hard failure at load time
    /// call [`FleetConfig::validate`] first.
    pub fn new(config: FleetConfig, poses: Arc<dyn PoseSource>) -> Self {
        if config.robot_frames.is_empty() {
            log::error!("no robot frames configured; fleet layer will be idle");
        }
        let footprint = Footprint::from_config(config.footprint.as_deref(), config.robot_radius)
            .unwrap_or_else(|e| {
                log::error!("using stock footprint: {e}");
                Footprint::default()
            });

        Self {
            global_frame: config.global_frame,
            robot_base_frame: config.robot_base_frame,
            robot_frames: config.robot_frames,
            footprint,
            enabled: config.enabled,
            poses,
            info: None,
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    pub fn footprint(&self) -> &Footprint {
        &self.footprint
    }

    /// Apply a host reconfiguration. The host serializes this against update
    /// passes, so changes take effect atomically before the next pass.
    ///
    /// A malformed footprint spec keeps the previous footprint; blank specs
    /// mean "leave the footprint alone".
    pub fn reconfigure(&mut self, request: &Reconfigure) {
        if let Some(enabled) = request.enabled {
            self.enabled = enabled;
        }
        if let Some(spec) = &request.footprint {
            let trimmed = spec.trim();
            if trimmed.is_empty() || trimmed == "[]" {
                return;
            }
            match Footprint::parse(trimmed) {
                Ok(footprint) => self.footprint = footprint,
                Err(e) => log::error!("keeping previous footprint: {e}"),
            }
        }
    }
}

impl Layer for FleetLayer {
    fn reset(&mut self) {}

    fn is_clearable(&self) -> bool {
        false
    }

    fn update_bounds(&mut self, _robot: Pose2, bounds: &mut Bounds) {
        if !self.enabled {
            return;
        }
        // Tracked robots can be anywhere in the map; claim the full extent so
        // marks from the previous pass are repainted wherever they were.
        if let Some(info) = &self.info {
            bounds.expand_to_include(info.origin);
            bounds.expand_to_include(
                info.origin + Vec2::new(info.world_width(), info.world_height()),
            );
        }
    }

    fn update_costs(&mut self, master: &mut Costmap, _region: CellRegion) {
        if !self.enabled {
            return;
        }
        for frame in &self.robot_frames {
            if frame == &self.robot_base_frame {
                continue;
            }
            let pose = match self.poses.lookup(&self.global_frame, frame, None) {
                Ok(pose) => pose,
                Err(e) => {
                    log::warn!("skipping '{frame}' this pass: {e}");
                    continue;
                }
            };
            if !pose.is_finite() {
                log::warn!("skipping '{frame}' this pass: non-finite pose");
                continue;
            }

            let polygon = self.footprint.transform(pose);
            let Some(cells) = master.polygon_cells(&polygon) else {
                continue;
            };
            mark_lethal(master, cells);
            log::debug!(
                "marked '{frame}' at ({:.2}, {:.2})",
                pose.position.x,
                pose.position.y
            );
        }
    }

    fn on_footprint_changed(&mut self, footprint: &Footprint) {
        self.footprint = footprint.clone();
    }

    fn match_size(&mut self, info: &MapInfo) {
        self.info = Some(info.clone());
    }
}
