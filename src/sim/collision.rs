//! Collision and collection detection
//!
//! Intentionally permissive axis-aligned proximity windows, not mesh collision.
//! All comparisons are strict `<` - boundary contact does not count. The
//! thresholds are load-bearing for game feel; keep them in `consts`.

use crate::consts::{
    DEPTH_HIT_RANGE, GEM_VERTICAL_RANGE, LATERAL_HIT_RANGE, OBSTACLE_CLEARANCE, PLAYER_DEPTH,
};

/// Does an obstacle at (lateral, depth, height) end the run for a player at
/// (lateral, vertical)? The player clears the obstacle only when jumping higher
/// than its top plus the clearance margin.
pub fn obstacle_hits(
    player_lateral: f32,
    player_y: f32,
    obstacle_lateral: f32,
    obstacle_depth: f32,
    obstacle_height: f32,
) -> bool {
    (obstacle_lateral - player_lateral).abs() < LATERAL_HIT_RANGE
        && (obstacle_depth - PLAYER_DEPTH).abs() < DEPTH_HIT_RANGE
        && player_y < obstacle_height + OBSTACLE_CLEARANCE
}

/// Is a gem at (lateral, depth, vertical) within the player's collection window?
pub fn gem_in_reach(
    player_lateral: f32,
    player_y: f32,
    gem_lateral: f32,
    gem_depth: f32,
    gem_y: f32,
) -> bool {
    (gem_lateral - player_lateral).abs() < LATERAL_HIT_RANGE
        && (gem_depth - PLAYER_DEPTH).abs() < DEPTH_HIT_RANGE
        && (gem_y - player_y).abs() < GEM_VERTICAL_RANGE
}
