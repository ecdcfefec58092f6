//! Data-driven game balance
//!
//! Every balance knob the simulation reads lives in [`Tuning`]; the `Default`
//! impl is the canonical calibration (per-tick units at the 60 Hz tick rate).
//! Hosts may override individual fields from JSON - missing fields keep their
//! defaults. Fixed engine facts tests rely on (collision windows, lane
//! geometry, tick rate) are `consts` instead, not knobs.

use serde::{Deserialize, Serialize};

/// Balance knobs for a run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    /// Scroll speed at run start (units per tick)
    pub base_scroll_speed: f32,
    /// Speed gained every Playing tick; there is deliberately no cap
    pub speed_ramp_per_tick: f32,
    /// Per-tick Bernoulli chance of an obstacle spawn
    pub obstacle_spawn_chance: f32,
    /// Per-tick Bernoulli chance of a gem spawn
    pub gem_spawn_chance: f32,
    /// Initial upward velocity of a jump (units per tick)
    pub jump_velocity: f32,
    /// Per-tick velocity decrement while airborne (units per tick squared)
    pub gravity: f32,
    /// Score awarded per collected gem
    pub gem_value: u32,
    /// Capability switch: hosts without lateral controls can run a jump-only
    /// variant; the full rule set is a strict superset
    pub lane_switching: bool,
    pub min_obstacle_width: f32,
    pub max_obstacle_width: f32,
    pub min_obstacle_height: f32,
    pub max_obstacle_height: f32,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            base_scroll_speed: 0.15,
            speed_ramp_per_tick: 0.00002,
            obstacle_spawn_chance: 0.02,
            gem_spawn_chance: 0.015,
            jump_velocity: 0.25,
            gravity: 0.015,
            gem_value: 10,
            lane_switching: true,
            min_obstacle_width: 0.6,
            max_obstacle_width: 1.4,
            min_obstacle_height: 0.5,
            max_obstacle_height: 1.5,
        }
    }
}

impl Tuning {
    /// Parse a (possibly partial) tuning override from JSON
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        let tuning: Tuning = serde_json::from_str(json)?;
        if !tuning.is_sane() {
            log::warn!("Tuning overrides look degenerate: {:?}", tuning);
        }
        Ok(tuning)
    }

    /// Loose sanity check - degenerate values are logged, not rejected
    pub fn is_sane(&self) -> bool {
        self.base_scroll_speed > 0.0
            && self.speed_ramp_per_tick >= 0.0
            && (0.0..=1.0).contains(&self.obstacle_spawn_chance)
            && (0.0..=1.0).contains(&self.gem_spawn_chance)
            && self.jump_velocity > 0.0
            && self.gravity > 0.0
            && self.min_obstacle_width < self.max_obstacle_width
            && self.min_obstacle_height < self.max_obstacle_height
    }
}
