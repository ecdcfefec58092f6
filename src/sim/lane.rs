//! Lane model
//!
//! Three discrete travel tracks, symmetric about the corridor center. Lane
//! switches snap - the lateral position of anything in a lane is always exactly
//! that lane's center offset.

use crate::consts::{LANE_COUNT, LANE_SPACING};

/// Index of the center lane (the player's starting lane)
pub const CENTER_LANE: usize = LANE_COUNT / 2;

/// Center offset of a lane, symmetric about 0
#[inline]
pub fn offset(lane: usize) -> f32 {
    (lane as f32 - CENTER_LANE as f32) * LANE_SPACING
}

/// One lane to the left, clamped at the wall (no-op at lane 0)
#[inline]
pub fn step_left(lane: usize) -> usize {
    lane.saturating_sub(1)
}

/// One lane to the right, clamped at the wall (no-op at the last lane)
#[inline]
pub fn step_right(lane: usize) -> usize {
    (lane + 1).min(LANE_COUNT - 1)
}
