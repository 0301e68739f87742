use glam::{UVec2, Vec2};

use crate::types::{LayerError, MapInfo};

/// Row-major 2D grid over a bounded, axis-aligned region.
///
/// The layer writes into a `Grid2d<u8>` owned by the host; it never resizes
/// or reallocates it.
#[derive(Debug, Clone)]
pub struct Grid2d<T> {
    info: MapInfo,
    data: Vec<T>,
}

impl<T> Grid2d<T> {
    pub fn new(info: MapInfo, data: Vec<T>) -> Result<Self, LayerError> {
        let expected_len = (info.width as usize) * (info.height as usize);
        if data.len() != expected_len {
            return Err(LayerError::InvalidMetadata(format!(
                "data length {} does not match map size {}",
                data.len(),
                expected_len
            )));
        }

        Ok(Self { info, data })
    }

    pub fn info(&self) -> &MapInfo {
        &self.info
    }

    pub fn width(&self) -> u32 {
        self.info.width
    }

    pub fn height(&self) -> u32 {
        self.info.height
    }

    pub fn get(&self, pos: UVec2) -> Option<&T> {
        if pos.x >= self.info.width || pos.y >= self.info.height {
            return None;
        }
        let idx = self.index(pos);
        Some(&self.data[idx])
    }

    pub fn set(&mut self, pos: UVec2, value: T) -> Result<(), LayerError> {
        if pos.x >= self.info.width || pos.y >= self.info.height {
            return Err(LayerError::OutOfBounds(format!(
                "cell ({}, {}) out of bounds for map {}x{}",
                pos.x, pos.y, self.info.width, self.info.height
            )));
        }
        let idx = self.index(pos);
        self.data[idx] = value;
        Ok(())
    }

    fn index(&self, pos: UVec2) -> usize {
        (pos.y as usize) * (self.info.width as usize) + (pos.x as usize)
    }

    pub fn map_to_world(&self, pos: Vec2) -> Vec2 {
        self.info.origin + pos * self.info.resolution
    }

    /// Continuous map coordinates for a world point, or `None` outside the map.
    pub fn world_to_map(&self, pos: Vec2) -> Option<Vec2> {
        let m = (pos - self.info.origin) / self.info.resolution;
        if m.x < 0.0 || m.y < 0.0 || m.x >= self.info.width as f32 || m.y >= self.info.height as f32
        {
            return None;
        }
        Some(m)
    }

    pub fn data(&self) -> &[T] {
        &self.data
    }
}

impl<T: Clone> Grid2d<T> {
    pub fn filled(info: MapInfo, value: T) -> Self {
        let len = (info.width as usize) * (info.height as usize);
        Self {
            info,
            data: vec![value; len],
        }
    }

    /// Set every cell in [min, max) to `value`.
    pub fn reset_region(&mut self, min: UVec2, max: UVec2, value: T) {
        let xn = max.x.min(self.info.width);
        let yn = max.y.min(self.info.height);
        for y in min.y..yn {
            for x in min.x..xn {
                let idx = self.index(UVec2::new(x, y));
                self.data[idx] = value.clone();
            }
        }
    }
}

impl<T: Clone + Default> Grid2d<T> {
    pub fn empty(info: MapInfo) -> Self {
        Self::filled(info, T::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn world_to_map_to_world(grid: &Grid2d<i8>, pos: Vec2) -> Vec2 {
        let map_pos = grid.world_to_map(pos).unwrap();
        grid.map_to_world(map_pos)
    }

    #[test]
    fn world_map_round_trip() {
        let grid = Grid2d::<i8>::new(
            MapInfo {
                width: 10,
                height: 10,
                resolution: 1.0,
                origin: Vec2::new(0.0, 0.0),
            },
            vec![0; 100],
        )
        .unwrap();

        for pos in [
            Vec2::new(0.0, 0.0),
            Vec2::new(1.0, 1.0),
            Vec2::new(0.5, 0.5),
            Vec2::new(1.5, 0.5),
            Vec2::new(0.5, 1.5),
        ] {
            assert_eq!(world_to_map_to_world(&grid, pos), pos);
        }
    }

    #[test]
    fn new_rejects_wrong_data_length() {
        let info = MapInfo::square(4, 1.0);
        assert!(Grid2d::<u8>::new(info, vec![0; 3]).is_err());
    }

    #[test]
    fn set_rejects_out_of_bounds() {
        let mut grid = Grid2d::<u8>::empty(MapInfo::square(4, 1.0));
        assert!(grid.set(UVec2::new(1, 1), 7).is_ok());
        assert!(grid.set(UVec2::new(4, 0), 7).is_err());
        assert_eq!(grid.get(UVec2::new(1, 1)), Some(&7));
        assert_eq!(grid.get(UVec2::new(0, 4)), None);
    }

    #[test]
    fn reset_region_clears_window() {
        let mut grid = Grid2d::<u8>::filled(MapInfo::square(4, 1.0), 9);
        grid.reset_region(UVec2::new(1, 1), UVec2::new(3, 3), 0);
        assert_eq!(grid.get(UVec2::new(0, 0)), Some(&9));
        assert_eq!(grid.get(UVec2::new(1, 1)), Some(&0));
        assert_eq!(grid.get(UVec2::new(2, 2)), Some(&0));
        assert_eq!(grid.get(UVec2::new(3, 3)), Some(&9));
    }
}
