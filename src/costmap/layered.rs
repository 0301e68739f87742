//! Layered costmap: container of layers that write into a master grid.
//!
//! The update loop aggregates bounds from all layers, resets the master
//! window to the default cost, then calls each layer's `update_costs` in
//! insertion order. One `update_map` call is one planning cycle: marks from
//! the previous cycle are cleared by the window reset before layers repaint,
//! so layers only ever add cost, never erase it.

use glam::UVec2;

use crate::costmap::Costmap;
use crate::footprint::Footprint;
use crate::types::{Bounds, CellRegion, MapInfo, Pose2};

/// Layer plugin interface. Layers are called in order: each may expand the
/// update bounds, then each writes into the master grid within the computed
/// region.
pub trait Layer {
    /// Reset the layer to its initial state.
    fn reset(&mut self);

    /// Whether a global "clear costmap" request should reset this layer.
    fn is_clearable(&self) -> bool;

    /// Expand the world bounds that this layer needs to update.
    /// Called once per update; layers only expand bounds, never shrink.
    fn update_bounds(&mut self, robot: Pose2, bounds: &mut Bounds);

    /// Write into the master grid only within `region`.
    fn update_costs(&mut self, master: &mut Costmap, region: CellRegion);

    /// Called when the robot footprint changes. Default: no-op.
    fn on_footprint_changed(&mut self, _footprint: &Footprint) {}

    /// Called when the layer is attached or the master grid metadata changes.
    /// Default: no-op.
    fn match_size(&mut self, _info: &MapInfo) {}
}

/// Container of layers and a master costmap. Runs update_bounds then
/// update_costs in order each time `update_map` is called.
pub struct LayeredCostmap {
    master: Costmap,
    layers: Vec<Box<dyn Layer>>,
    default_value: u8,
}

impl LayeredCostmap {
    /// Create a layered costmap; `default_value` is the cost the update
    /// window is reset to before layers repaint it.
    pub fn new(master: Costmap, default_value: u8) -> Self {
        Self {
            master,
            layers: Vec::new(),
            default_value,
        }
    }

    /// Add a layer. Order matters: layers are updated in insertion order.
    /// The layer is sized to the master grid on attachment.
    pub fn add_layer(&mut self, mut layer: Box<dyn Layer>) {
        layer.match_size(self.master.info());
        self.layers.push(layer);
    }

    /// Immutable reference to the master grid.
    pub fn master(&self) -> &Costmap {
        &self.master
    }

    /// Mutable reference to the master grid.
    pub fn master_mut(&mut self) -> &mut Costmap {
        &mut self.master
    }

    /// Push a new robot footprint to every layer.
    pub fn set_footprint(&mut self, footprint: &Footprint) {
        for layer in &mut self.layers {
            layer.on_footprint_changed(footprint);
        }
    }

    /// Reset every clearable layer.
    pub fn reset_layers(&mut self) {
        for layer in &mut self.layers {
            if layer.is_clearable() {
                layer.reset();
            }
        }
    }

    /// Run the update loop: aggregate bounds from all layers, reset the
    /// master window, then call each layer's update_costs.
    pub fn update_map(&mut self, robot: Pose2) {
        let mut bounds = Bounds::empty();
        for layer in &mut self.layers {
            layer.update_bounds(robot, &mut bounds);
        }
        if bounds.is_empty() {
            return;
        }

        let width = self.master.width();
        let height = self.master.height();

        let min_cell = self.master.world_to_map(bounds.min).map(|c| c.as_uvec2());
        let max_cell = self.master.world_to_map(bounds.max).map(|c| c.as_uvec2());

        let (x0, y0) = match min_cell {
            Some(c) => (c.x.min(width), c.y.min(height)),
            None => (0, 0),
        };
        let (xn, yn) = match max_cell {
            Some(c) => ((c.x + 1).min(width), (c.y + 1).min(height)),
            None => (width, height),
        };

        if x0 >= xn || y0 >= yn {
            return;
        }

        let region = CellRegion {
            min: UVec2::new(x0, y0),
            max: UVec2::new(xn, yn),
        };

        self.master
            .reset_region(region.min, region.max, self.default_value);

        for layer in &mut self.layers {
            layer.update_costs(&mut self.master, region);
        }
    }
}
