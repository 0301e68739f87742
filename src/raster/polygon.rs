use glam::{IVec2, UVec2, Vec2};

use crate::grid::Grid2d;
use crate::raster::line::CellLine;
use crate::types::MapInfo;

/// Grid cell containing a world point. The cell may lie outside the map;
/// bounds are the caller's concern.
pub fn world_to_cell(info: &MapInfo, p: Vec2) -> IVec2 {
    ((p - info.origin) / info.resolution).floor().as_ivec2()
}

/// Iterator over all grid cells covered by a polygon, boundary and interior.
///
/// Points are expected in world coordinates (meters). Every edge (including
/// the implicit closing edge) is traced with [`CellLine`]; each traced row
/// then fills between its leftmost and rightmost traced column. Spans are
/// clamped to the map, so a polygon partially outside yields only its
/// in-range cells. Iteration order is ascending rows, then ascending columns,
/// and each cell is yielded exactly once.
pub struct PolygonCells {
    /// Inclusive column spans per row, ascending row order.
    spans: Vec<(u32, u32, u32)>,
    idx: usize,
    x: u32,
}

impl PolygonCells {
    /// Returns `None` for fewer than 3 points or non-finite coordinates.
    pub fn new(info: &MapInfo, points: &[Vec2]) -> Option<Self> {
        if points.len() < 3 || points.iter().any(|p| !p.is_finite()) {
            return None;
        }

        let cells: Vec<IVec2> = points.iter().map(|p| world_to_cell(info, *p)).collect();
        let min_y = cells.iter().map(|c| c.y).min()?;
        let max_y = cells.iter().map(|c| c.y).max()?;

        // Traced edges stay within the vertex bounding box, so one slot per row.
        let mut rows: Vec<Option<(i32, i32)>> = vec![None; (max_y - min_y + 1) as usize];
        for i in 0..cells.len() {
            let a = cells[i];
            let b = cells[(i + 1) % cells.len()];
            for cell in CellLine::new(a, b) {
                let span = rows[(cell.y - min_y) as usize].get_or_insert((cell.x, cell.x));
                span.0 = span.0.min(cell.x);
                span.1 = span.1.max(cell.x);
            }
        }

        let width = info.width as i32;
        let height = info.height as i32;
        let mut spans = Vec::with_capacity(rows.len());
        for (row, span) in rows.iter().enumerate() {
            let Some((x0, x1)) = span else { continue };
            let y = min_y + row as i32;
            if y < 0 || y >= height {
                continue;
            }
            let x0 = (*x0).max(0);
            let x1 = (*x1).min(width - 1);
            if x0 > x1 {
                continue;
            }
            spans.push((y as u32, x0 as u32, x1 as u32));
        }

        let x = spans.first().map(|s| s.1).unwrap_or(0);
        Some(Self { spans, idx: 0, x })
    }
}

impl Iterator for PolygonCells {
    type Item = UVec2;

    fn next(&mut self) -> Option<Self::Item> {
        let &(y, _, x_end) = self.spans.get(self.idx)?;
        let cell = UVec2::new(self.x, y);
        if self.x < x_end {
            self.x += 1;
        } else {
            self.idx += 1;
            if let Some(&(_, x_start, _)) = self.spans.get(self.idx) {
                self.x = x_start;
            }
        }
        Some(cell)
    }
}

impl<T> Grid2d<T> {
    /// Cells covered by a world polygon on this grid.
    pub fn polygon_cells(&self, points: &[Vec2]) -> Option<PolygonCells> {
        PolygonCells::new(self.info(), points)
    }
}
