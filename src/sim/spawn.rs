//! Procedural entity spawner
//!
//! Each Playing tick draws two independent Bernoulli trials from the run RNG:
//! one for an obstacle, one for a gem. Successful draws place the entity at the
//! far spawn depth in a uniformly random lane. No cap on live entities - the
//! pass-through pruning bounds the set.

use rand::Rng;

use crate::consts::{LANE_COUNT, SPAWN_DEPTH};
use crate::scene::{SceneCommand, VisualKind};

use super::state::{GameState, Gem, GemColor, Obstacle};

/// Run the per-tick spawn schedule
pub fn spawn_entities(state: &mut GameState) {
    let obstacle_roll: f32 = state.rng.random();
    if obstacle_roll < state.tuning.obstacle_spawn_chance {
        spawn_obstacle(state);
    }

    let gem_roll: f32 = state.rng.random();
    if gem_roll < state.tuning.gem_spawn_chance {
        spawn_gem(state);
    }
}

fn spawn_obstacle(state: &mut GameState) {
    let id = state.next_entity_id();
    let lane = state.rng.random_range(0..LANE_COUNT);
    let width = state
        .rng
        .random_range(state.tuning.min_obstacle_width..state.tuning.max_obstacle_width);
    let height = state
        .rng
        .random_range(state.tuning.min_obstacle_height..state.tuning.max_obstacle_height);

    state.obstacles.push(Obstacle {
        id,
        lane,
        depth: SPAWN_DEPTH,
        width,
        height,
        alive: true,
    });
    state.commands.push(SceneCommand::Spawn {
        id,
        kind: VisualKind::Obstacle { width, height },
        lane,
        depth: SPAWN_DEPTH,
    });
}

fn spawn_gem(state: &mut GameState) {
    let id = state.next_entity_id();
    let lane = state.rng.random_range(0..LANE_COUNT);
    let color = match state.rng.random_range(0..4u32) {
        0 => GemColor::Ruby,
        1 => GemColor::Emerald,
        2 => GemColor::Sapphire,
        _ => GemColor::Amber,
    };
    let bob_phase = state.rng.random_range(0.0..std::f32::consts::TAU);

    state.gems.push(Gem {
        id,
        lane,
        depth: SPAWN_DEPTH,
        bob_phase,
        spin: 0.0,
        color,
        alive: true,
    });
    state.commands.push(SceneCommand::Spawn {
        id,
        kind: VisualKind::Gem { color },
        lane,
        depth: SPAWN_DEPTH,
    });
}
