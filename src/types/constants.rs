//! Cost values shared with the host costmap.

pub const COST_FREE: u8 = 0;
pub const COST_LETHAL: u8 = 254;
pub const COST_UNKNOWN: u8 = 255;
