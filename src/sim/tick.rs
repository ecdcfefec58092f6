//! The per-tick simulation step
//!
//! One call advances the world by exactly one tick: queued actions, then
//! kinematics, motion and deferred pruning, collision/collection, compaction,
//! spawning, and the difficulty ramp, finishing with the position commands for
//! the rendering collaborator. Idle and GameOver are frozen - the tick only
//! consumes a Start.

use glam::Vec3;

use crate::consts::{GEM_BOB_RATE, GEM_SPIN_RATE, PASS_THROUGH_DEPTH, PLAYER_DEPTH};
use crate::scene::{PLAYER_VISUAL_ID, SceneCommand};

use super::state::{GameEvent, GamePhase, GameState};
use super::{collision, kinematics, lane, spawn};

/// Logical player action, produced by the input mapper and consumed at the
/// start of the next tick
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    /// Begin a run (Idle or GameOver only)
    Start,
    /// Trigger a jump (Playing only)
    Jump,
    /// Shift one lane left (Playing only)
    MoveLeft,
    /// Shift one lane right (Playing only)
    MoveRight,
}

/// Advance the game by one fixed tick.
///
/// `actions` is the batch queued since the previous tick, applied in arrival
/// order before anything moves. Contextually invalid actions are dropped here
/// even if the mapper let them through, because the phase may have changed
/// between queueing and consumption.
pub fn tick(state: &mut GameState, actions: &[Action]) {
    state.commands.clear();
    state.events.clear();

    for &action in actions {
        apply_action(state, action);
    }

    // Idle waits for a start; GameOver holds the final frame
    if state.phase != GamePhase::Playing {
        return;
    }

    state.time_ticks += 1;
    state.run_ticks += 1;

    kinematics::step(&mut state.player, &state.tuning);

    // Motion and deferred pruning: passed entities are only marked here so the
    // detection pass below iterates a stable collection
    for obstacle in &mut state.obstacles {
        obstacle.depth += state.scroll_speed;
        if obstacle.depth > PASS_THROUGH_DEPTH {
            obstacle.alive = false;
        }
    }
    for gem in &mut state.gems {
        gem.depth += state.scroll_speed;
        gem.bob_phase += GEM_BOB_RATE;
        gem.spin += GEM_SPIN_RATE;
        if gem.depth > PASS_THROUGH_DEPTH {
            gem.alive = false;
        }
    }

    // Obstacle check - the first qualifying hit ends the run, the rest are moot
    let player_lateral = state.player.lateral();
    let hit = state.obstacles.iter().any(|o| {
        o.alive
            && collision::obstacle_hits(
                player_lateral,
                state.player.y,
                o.lateral(),
                o.depth,
                o.height,
            )
    });
    if hit {
        state.end_run();
        emit_positions(state);
        return;
    }

    // Gem check - every qualifying gem this tick is collected
    let mut collected = 0u32;
    for gem in &mut state.gems {
        if !gem.alive {
            continue;
        }
        if collision::gem_in_reach(player_lateral, state.player.y, gem.lateral(), gem.depth, gem.y())
        {
            gem.alive = false;
            collected += 1;
            state.score += state.tuning.gem_value;
            state.events.push(GameEvent::GemCollected {
                id: gem.id,
                total_score: state.score,
            });
        }
    }
    state.gems_collected += collected;

    state.compact();

    spawn::spawn_entities(state);

    // Difficulty ramp - monotone while Playing, unbounded
    state.scroll_speed += state.tuning.speed_ramp_per_tick;

    emit_positions(state);
}

fn apply_action(state: &mut GameState, action: Action) {
    match (state.phase, action) {
        (GamePhase::Idle | GamePhase::GameOver, Action::Start) => state.start_run(),
        (GamePhase::Playing, Action::Jump) => {
            kinematics::jump(&mut state.player, &state.tuning);
        }
        (GamePhase::Playing, Action::MoveLeft) if state.tuning.lane_switching => {
            state.player.lane = lane::step_left(state.player.lane);
        }
        (GamePhase::Playing, Action::MoveRight) if state.tuning.lane_switching => {
            state.player.lane = lane::step_right(state.player.lane);
        }
        // Contextually invalid input is silently ignored, never an error
        _ => {}
    }
}

/// Hand the updated positions to the renderer for this frame
fn emit_positions(state: &mut GameState) {
    state.commands.push(SceneCommand::SetPosition {
        id: PLAYER_VISUAL_ID,
        position: Vec3::new(state.player.lateral(), state.player.y, PLAYER_DEPTH),
    });
    for obstacle in &state.obstacles {
        state.commands.push(SceneCommand::SetPosition {
            id: obstacle.id,
            position: Vec3::new(obstacle.lateral(), obstacle.height / 2.0, obstacle.depth),
        });
    }
    for gem in &state.gems {
        state.commands.push(SceneCommand::SetPosition {
            id: gem.id,
            position: Vec3::new(gem.lateral(), gem.y(), gem.depth),
        });
        state.commands.push(SceneCommand::SetRotation {
            id: gem.id,
            angle: gem.spin,
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::{GROUND_Y, LANE_COUNT, SPAWN_DEPTH};
    use crate::sim::state::{Gem, GemColor, Obstacle};
    use crate::tuning::Tuning;

    /// A Playing state with spawning disabled so tests control the population
    fn quiet_state() -> GameState {
        let tuning = Tuning {
            obstacle_spawn_chance: 0.0,
            gem_spawn_chance: 0.0,
            ..Tuning::default()
        };
        let mut state = GameState::new(99, tuning);
        tick(&mut state, &[Action::Start]);
        state
    }

    fn push_obstacle(state: &mut GameState, lane: usize, depth: f32, height: f32) -> u32 {
        let id = state.next_entity_id();
        state.obstacles.push(Obstacle {
            id,
            lane,
            depth,
            width: 1.0,
            height,
            alive: true,
        });
        id
    }

    fn push_gem(state: &mut GameState, lane: usize, depth: f32) -> u32 {
        let id = state.next_entity_id();
        state.gems.push(Gem {
            id,
            lane,
            depth,
            bob_phase: 0.0,
            spin: 0.0,
            color: GemColor::Emerald,
            alive: true,
        });
        id
    }

    #[test]
    fn idle_state_does_not_tick() {
        let mut state = GameState::new(1, Tuning::default());
        tick(&mut state, &[]);
        assert_eq!(state.phase, GamePhase::Idle);
        assert_eq!(state.time_ticks, 0);
    }

    #[test]
    fn start_begins_a_run_and_ticks_immediately() {
        let mut state = GameState::new(1, Tuning::default());
        tick(&mut state, &[Action::Start]);
        assert_eq!(state.phase, GamePhase::Playing);
        assert_eq!(state.time_ticks, 1);
        assert!(
            state
                .events
                .iter()
                .any(|e| matches!(e, GameEvent::RunStarted { .. }))
        );
    }

    #[test]
    fn invalid_actions_are_silently_ignored() {
        let mut state = GameState::new(1, Tuning::default());
        tick(&mut state, &[Action::Jump, Action::MoveLeft, Action::MoveRight]);
        assert_eq!(state.phase, GamePhase::Idle);
        assert_eq!(state.player.lane, lane::CENTER_LANE);
        assert!(!state.player.airborne);

        let mut state = quiet_state();
        tick(&mut state, &[Action::Start]); // Start while Playing: ignored
        assert_eq!(state.phase, GamePhase::Playing);
        assert_eq!(state.time_ticks, 2);
    }

    #[test]
    fn lane_switch_actions_move_and_clamp() {
        let mut state = quiet_state();
        tick(&mut state, &[Action::MoveLeft]);
        assert_eq!(state.player.lane, 0);
        tick(&mut state, &[Action::MoveLeft]);
        assert_eq!(state.player.lane, 0); // clamped at the wall
        tick(&mut state, &[Action::MoveRight, Action::MoveRight, Action::MoveRight]);
        assert_eq!(state.player.lane, LANE_COUNT - 1);
    }

    #[test]
    fn lane_switching_capability_can_be_disabled() {
        let tuning = Tuning {
            lane_switching: false,
            obstacle_spawn_chance: 0.0,
            gem_spawn_chance: 0.0,
            ..Tuning::default()
        };
        let mut state = GameState::new(5, tuning);
        tick(&mut state, &[Action::Start]);
        tick(&mut state, &[Action::MoveLeft]);
        assert_eq!(state.player.lane, lane::CENTER_LANE);
        // Jumping still works in the reduced variant
        tick(&mut state, &[Action::Jump]);
        assert!(state.player.airborne);
    }

    // Scenario: center-lane obstacle scrolls into the player; the run ends
    // exactly once and the high score is committed.
    #[test]
    fn obstacle_collision_ends_the_run_once() {
        let mut state = quiet_state();
        state.score = 30;
        push_obstacle(&mut state, lane::CENTER_LANE, SPAWN_DEPTH, 1.0);

        let mut run_ended_events = 0;
        for _ in 0..400 {
            tick(&mut state, &[]);
            run_ended_events += state
                .events
                .iter()
                .filter(|e| matches!(e, GameEvent::RunEnded { .. }))
                .count();
            if state.phase == GamePhase::GameOver {
                break;
            }
        }

        assert_eq!(state.phase, GamePhase::GameOver);
        assert_eq!(run_ended_events, 1);
        assert_eq!(state.high_score, 30);
        assert!(!state.player.airborne);
        // The colliding obstacle stays; the run froze instead of removing it
        assert_eq!(state.obstacles.len(), 1);

        // Frozen: further ticks change nothing
        let ticks_at_death = state.time_ticks;
        tick(&mut state, &[]);
        assert_eq!(state.time_ticks, ticks_at_death);
    }

    #[test]
    fn jumping_clears_an_obstacle() {
        let mut state = quiet_state();
        // Obstacle two ticks from the depth window at base speed
        push_obstacle(&mut state, lane::CENTER_LANE, -1.5, 1.0);
        tick(&mut state, &[Action::Jump]);
        for _ in 0..20 {
            tick(&mut state, &[]);
            if state.obstacles.is_empty() {
                break;
            }
        }
        assert_eq!(state.phase, GamePhase::Playing, "jump should clear the obstacle");
    }

    #[test]
    fn dodging_into_another_lane_avoids_collision() {
        let mut state = quiet_state();
        push_obstacle(&mut state, lane::CENTER_LANE, -2.0, 1.0);
        tick(&mut state, &[Action::MoveLeft]);
        for _ in 0..100 {
            tick(&mut state, &[]);
        }
        assert_eq!(state.phase, GamePhase::Playing);
        assert!(state.obstacles.is_empty(), "obstacle should scroll past and prune");
    }

    // Scenario: gem in lane 0; player moves over and collects it for 10 points.
    #[test]
    fn gem_collection_scores_and_removes() {
        let mut state = quiet_state();
        let gem_id = push_gem(&mut state, 0, SPAWN_DEPTH);
        tick(&mut state, &[Action::MoveLeft]);

        let mut collected_tick_commands = Vec::new();
        for _ in 0..400 {
            tick(&mut state, &[]);
            if state.score > 0 {
                collected_tick_commands = state.commands.clone();
                break;
            }
        }

        assert_eq!(state.score, 10);
        assert_eq!(state.gems_collected, 1);
        assert!(state.gems.is_empty());
        assert!(
            collected_tick_commands
                .iter()
                .any(|c| matches!(c, SceneCommand::Remove { id } if *id == gem_id)),
            "collected gem visual must be removed"
        );
        assert_eq!(state.phase, GamePhase::Playing);
    }

    #[test]
    fn simultaneous_gems_are_all_collected() {
        let mut state = quiet_state();
        push_gem(&mut state, lane::CENTER_LANE, -0.5);
        push_gem(&mut state, lane::CENTER_LANE, -0.3);
        tick(&mut state, &[]);
        assert_eq!(state.score, 20);
        assert_eq!(state.gems_collected, 2);
        assert!(state.gems.is_empty());
        assert_eq!(
            state
                .events
                .iter()
                .filter(|e| matches!(e, GameEvent::GemCollected { .. }))
                .count(),
            2
        );
    }

    #[test]
    fn passed_entities_prune_within_one_tick() {
        let mut state = quiet_state();
        let obstacle_id = push_obstacle(&mut state, 0, PASS_THROUGH_DEPTH - 0.01, 1.0);
        let gem_id = push_gem(&mut state, 0, PASS_THROUGH_DEPTH - 0.01);

        tick(&mut state, &[]);
        assert!(state.obstacles.is_empty());
        assert!(state.gems.is_empty());
        let removed: Vec<u32> = state
            .commands
            .iter()
            .filter_map(|c| match c {
                SceneCommand::Remove { id } => Some(*id),
                _ => None,
            })
            .collect();
        assert!(removed.contains(&obstacle_id) && removed.contains(&gem_id));
    }

    #[test]
    fn scroll_speed_is_monotone_and_resets_on_restart() {
        let mut state = quiet_state();
        let base = state.tuning.base_scroll_speed;
        let mut last = state.scroll_speed;
        for _ in 0..200 {
            tick(&mut state, &[]);
            assert!(state.scroll_speed >= last);
            last = state.scroll_speed;
        }
        assert!(state.scroll_speed > base);

        state.end_run();
        tick(&mut state, &[Action::Start]);
        // One tick of ramp after the reset
        let expected = base + state.tuning.speed_ramp_per_tick;
        assert!((state.scroll_speed - expected).abs() < 1e-6);
    }

    // Scenario: restart from GameOver goes straight to a fresh Playing run.
    #[test]
    fn restart_from_game_over_resets_everything() {
        let mut state = quiet_state();
        state.score = 40;
        push_obstacle(&mut state, lane::CENTER_LANE, -0.5, 1.0);
        tick(&mut state, &[]);
        assert_eq!(state.phase, GamePhase::GameOver);
        assert_eq!(state.high_score, 40);

        tick(&mut state, &[Action::Start]);
        assert_eq!(state.phase, GamePhase::Playing);
        assert_eq!(state.score, 0);
        assert!(state.obstacles.is_empty() && state.gems.is_empty());
        assert_eq!(state.player.lane, lane::CENTER_LANE);
        assert_eq!(state.player.y, GROUND_Y);
        assert!(!state.player.airborne);
        assert_eq!(state.high_score, 40, "high score survives the restart");
    }

    #[test]
    fn player_position_is_emitted_every_playing_tick() {
        let mut state = quiet_state();
        tick(&mut state, &[]);
        assert!(state.commands.iter().any(|c| matches!(
            c,
            SceneCommand::SetPosition { id, .. } if *id == PLAYER_VISUAL_ID
        )));
    }

    #[test]
    fn gems_spin_and_bob_each_tick() {
        let mut state = quiet_state();
        push_gem(&mut state, 0, SPAWN_DEPTH);
        tick(&mut state, &[]);
        let gem = state.gems[0];
        assert!(gem.spin > 0.0);
        assert!(gem.bob_phase > 0.0);
        assert!(state.commands.iter().any(|c| matches!(
            c,
            SceneCommand::SetRotation { id, .. } if *id == gem.id
        )));
    }

    #[test]
    fn same_seed_and_actions_replay_identically() {
        let run = |seed: u64| {
            let mut state = GameState::new(seed, Tuning::default());
            tick(&mut state, &[Action::Start]);
            for i in 0..600u32 {
                let actions: &[Action] = match i % 37 {
                    0 => &[Action::Jump],
                    5 => &[Action::MoveLeft],
                    11 => &[Action::MoveRight],
                    _ => &[],
                };
                tick(&mut state, actions);
                if state.phase == GamePhase::GameOver {
                    break;
                }
            }
            (
                state.score,
                state.time_ticks,
                state.scroll_speed,
                state.obstacles,
                state.gems,
            )
        };
        assert_eq!(run(1234), run(1234));
    }
}
