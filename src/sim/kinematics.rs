//! Vertical jump physics for the player
//!
//! Explicit Euler with per-tick constants: position += velocity, then
//! velocity -= gravity. Deterministic at the fixed tick rate.

use crate::consts::GROUND_Y;
use crate::tuning::Tuning;

use super::state::Player;

/// Trigger a jump. No-op while the player is already airborne.
pub fn jump(player: &mut Player, tuning: &Tuning) {
    if player.airborne {
        return;
    }
    player.vertical_vel = tuning.jump_velocity;
    player.airborne = true;
}

/// Advance the jump arc by one tick. Grounded players are untouched.
pub fn step(player: &mut Player, tuning: &Tuning) {
    if !player.airborne {
        return;
    }

    player.y += player.vertical_vel;
    player.vertical_vel -= tuning.gravity;

    // Landing: clamp to ground, kill the arc
    if player.y <= GROUND_Y {
        player.y = GROUND_Y;
        player.vertical_vel = 0.0;
        player.airborne = false;
    }
}
