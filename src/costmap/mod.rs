pub mod layered;

pub use layered::{Layer, LayeredCostmap};

use glam::UVec2;

use crate::grid::Grid2d;
use crate::types::COST_LETHAL;

pub type Costmap = Grid2d<u8>;

/// Write `cost` into every listed cell. Cells outside the map are silently
/// ignored; writing the same cell twice is harmless.
pub fn mark_cells(grid: &mut Costmap, cells: impl IntoIterator<Item = UVec2>, cost: u8) {
    for cell in cells {
        let _ = grid.set(cell, cost);
    }
}

/// Mark every listed cell as an impassable obstacle.
pub fn mark_lethal(grid: &mut Costmap, cells: impl IntoIterator<Item = UVec2>) {
    mark_cells(grid, cells, COST_LETHAL);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{COST_FREE, MapInfo};

    #[test]
    fn mark_lethal_is_idempotent() {
        let info = MapInfo::square(4, 1.0);
        let cells = [UVec2::new(1, 1), UVec2::new(2, 1)];

        let mut once = Costmap::filled(info.clone(), COST_FREE);
        mark_lethal(&mut once, cells);

        let mut twice = Costmap::filled(info, COST_FREE);
        mark_lethal(&mut twice, cells);
        mark_lethal(&mut twice, cells);

        assert_eq!(once.data(), twice.data());
        assert_eq!(once.get(UVec2::new(1, 1)), Some(&COST_LETHAL));
        assert_eq!(once.get(UVec2::new(0, 0)), Some(&COST_FREE));
    }

    #[test]
    fn out_of_bounds_cells_are_ignored() {
        let mut grid = Costmap::filled(MapInfo::square(4, 1.0), COST_FREE);
        mark_lethal(&mut grid, [UVec2::new(10, 10), UVec2::new(3, 3)]);
        assert_eq!(grid.get(UVec2::new(3, 3)), Some(&COST_LETHAL));
        assert!(grid.data().iter().filter(|&&c| c == COST_LETHAL).count() == 1);
    }
}
