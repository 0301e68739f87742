use glam::IVec2;

/// Iterator over the grid cells of a line between two cells, endpoints
/// included.
///
/// Classic incremental (Bresenham) stepping over signed cell coordinates, so
/// edges may run outside the map; callers clip afterwards. Consecutive cells
/// differ by at most one step per axis.
pub struct CellLine {
    cell: IVec2,
    end: IVec2,
    /// (dx, -dy) of the standard error formulation.
    d: IVec2,
    step: IVec2,
    err: i32,
    done: bool,
}

impl CellLine {
    pub fn new(start: IVec2, end: IVec2) -> Self {
        let dx = (end.x - start.x).abs();
        let dy = -(end.y - start.y).abs();
        Self {
            cell: start,
            end,
            d: IVec2::new(dx, dy),
            step: IVec2::new((end.x - start.x).signum(), (end.y - start.y).signum()),
            err: dx + dy,
            done: false,
        }
    }
}

impl Iterator for CellLine {
    type Item = IVec2;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }
        let current = self.cell;
        if current == self.end {
            self.done = true;
            return Some(current);
        }

        let e2 = 2 * self.err;
        if e2 >= self.d.y {
            self.err += self.d.y;
            self.cell.x += self.step.x;
        }
        if e2 <= self.d.x {
            self.err += self.d.x;
            self.cell.y += self.step.y;
        }
        Some(current)
    }
}
