//! End-to-end behavior of the fleet layer inside a layered costmap: pose
//! buffer in, lethal footprint blocks out.

use std::sync::Arc;

use glam::{UVec2, Vec2};

use fleet_layer::types::{COST_FREE, COST_LETHAL};
use fleet_layer::{
    Costmap, FleetConfig, FleetLayer, Footprint, LayeredCostmap, MapInfo, Pose2, PoseBuffer,
    Reconfigure,
};

const SQUARE_FOOTPRINT: &str = "[[0.25, 0.25], [-0.25, 0.25], [-0.25, -0.25], [0.25, -0.25]]";

fn fleet_config() -> FleetConfig {
    FleetConfig {
        global_frame: "map".to_string(),
        robot_base_frame: "robot_a".to_string(),
        robot_frames: vec![
            "robot_a".to_string(),
            "robot_b".to_string(),
            "robot_c".to_string(),
        ],
        footprint: Some(SQUARE_FOOTPRINT.to_string()),
        robot_radius: None,
        enabled: true,
    }
}

/// 4 m x 4 m map at 0.1 m/cell, all free.
fn harness(layer: FleetLayer) -> LayeredCostmap {
    let master = Costmap::filled(MapInfo::square(40, 0.1), COST_FREE);
    let mut layered = LayeredCostmap::new(master, COST_FREE);
    layered.add_layer(Box::new(layer));
    layered
}

fn lethal_cells(master: &Costmap) -> Vec<UVec2> {
    let mut cells = Vec::new();
    for y in 0..master.height() {
        for x in 0..master.width() {
            let cell = UVec2::new(x, y);
            if master.get(cell) == Some(&COST_LETHAL) {
                cells.push(cell);
            }
        }
    }
    cells
}

#[test]
fn marks_square_block_and_skips_unavailable_robot() {
    let poses = Arc::new(PoseBuffer::new("map"));
    poses.insert("robot_a", Pose2::new(Vec2::new(0.5, 0.5), 0.0));
    poses.insert("robot_b", Pose2::new(Vec2::new(2.0, 3.0), 0.0));
    // robot_c is configured but has no transform yet.

    let mut layered = harness(FleetLayer::new(fleet_config(), poses.clone()));
    layered.update_map(Pose2::new(Vec2::new(0.5, 0.5), 0.0));

    let cells = lethal_cells(layered.master());

    // A 0.5 m square at (2.0, 3.0) on a 0.1 m grid: a block around cell
    // (20, 30), about 5x5 cells plus boundary rounding.
    assert_eq!(layered.master().get(UVec2::new(20, 30)), Some(&COST_LETHAL));
    assert!(!cells.is_empty());
    assert!(
        cells
            .iter()
            .all(|c| (17..=22).contains(&c.x) && (27..=32).contains(&c.y)),
        "stray lethal cells: {cells:?}"
    );
    assert_eq!(cells.len(), 36);

    // Self-exclusion: robot_a's own pose at cell (5, 5) stays free.
    assert_eq!(layered.master().get(UVec2::new(5, 5)), Some(&COST_FREE));
}

#[test]
fn half_out_of_range_footprint_marks_only_inside_cells() {
    let poses = Arc::new(PoseBuffer::new("map"));
    poses.insert("robot_b", Pose2::new(Vec2::new(0.05, 2.0), 0.0));

    let mut layered = harness(FleetLayer::new(fleet_config(), poses.clone()));
    layered.update_map(Pose2::default());

    let cells = lethal_cells(layered.master());
    // Columns clamp to 0..=3; rows 17..=22 are fully inside.
    assert_eq!(cells.len(), 24);
    assert!(cells.iter().all(|c| c.x <= 3 && (17..=22).contains(&c.y)));
}

#[test]
fn stale_marks_are_repainted_when_a_robot_moves() {
    let poses = Arc::new(PoseBuffer::new("map"));
    poses.insert("robot_b", Pose2::new(Vec2::new(1.0, 1.0), 0.0));

    let mut layered = harness(FleetLayer::new(fleet_config(), poses.clone()));
    layered.update_map(Pose2::default());
    assert_eq!(layered.master().get(UVec2::new(10, 10)), Some(&COST_LETHAL));

    poses.insert("robot_b", Pose2::new(Vec2::new(3.0, 3.0), 0.0));
    layered.update_map(Pose2::default());

    assert_eq!(layered.master().get(UVec2::new(10, 10)), Some(&COST_FREE));
    assert_eq!(layered.master().get(UVec2::new(30, 30)), Some(&COST_LETHAL));
}

#[test]
fn robot_leaving_the_fleet_stops_being_marked() {
    let poses = Arc::new(PoseBuffer::new("map"));
    poses.insert("robot_b", Pose2::new(Vec2::new(2.0, 2.0), 0.0));

    let mut layered = harness(FleetLayer::new(fleet_config(), poses.clone()));
    layered.update_map(Pose2::default());
    assert!(!lethal_cells(layered.master()).is_empty());

    poses.remove("robot_b");
    layered.update_map(Pose2::default());
    assert!(lethal_cells(layered.master()).is_empty());
}

#[test]
fn disabled_layer_leaves_the_grid_untouched() {
    let poses = Arc::new(PoseBuffer::new("map"));
    poses.insert("robot_b", Pose2::new(Vec2::new(2.0, 2.0), 0.0));

    let mut layer = FleetLayer::new(fleet_config(), poses.clone());
    layer.reconfigure(&Reconfigure {
        enabled: Some(false),
        footprint: None,
    });

    let mut layered = harness(layer);
    layered.update_map(Pose2::default());
    assert!(lethal_cells(layered.master()).is_empty());
}

#[test]
fn host_pushed_footprint_replaces_the_configured_one() {
    let poses = Arc::new(PoseBuffer::new("map"));
    poses.insert("robot_b", Pose2::new(Vec2::new(2.0, 2.0), 0.0));

    let mut layered = harness(FleetLayer::new(fleet_config(), poses.clone()));
    layered.update_map(Pose2::default());
    assert_eq!(lethal_cells(layered.master()).len(), 36);

    layered.set_footprint(&Footprint::rectangle(0.2, 0.2).unwrap());
    layered.update_map(Pose2::default());
    assert_eq!(lethal_cells(layered.master()).len(), 9);
}
