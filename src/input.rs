//! Input mapper
//!
//! Translates raw host input (key presses, pointer clicks) into logical
//! [`Action`]s. The mapping is phase-contextual: the primary action starts a
//! run outside of Playing and jumps inside it; lane switches only exist while
//! Playing. Anything contextually invalid maps to `None` and is dropped
//! without comment.
//!
//! Handlers push mapped actions into an [`ActionQueue`]; the tick drains the
//! queue atomically at its start, so host events never mutate simulation
//! state directly.

use crate::sim::state::GamePhase;
use crate::sim::tick::Action;

/// Map a keyboard key (as reported by the host, e.g. `KeyboardEvent.key`) to a
/// logical action for the current phase.
pub fn map_key(key: &str, phase: GamePhase) -> Option<Action> {
    match key {
        " " | "Enter" | "ArrowUp" | "w" | "W" => Some(primary_action(phase)),
        "ArrowLeft" | "a" | "A" => playing_only(phase, Action::MoveLeft),
        "ArrowRight" | "d" | "D" => playing_only(phase, Action::MoveRight),
        _ => None,
    }
}

/// Map a primary pointer press (click/tap) for the current phase
pub fn map_pointer(phase: GamePhase) -> Option<Action> {
    Some(primary_action(phase))
}

/// The primary action is contextual: start when no run is live, jump otherwise
fn primary_action(phase: GamePhase) -> Action {
    match phase {
        GamePhase::Idle | GamePhase::GameOver => Action::Start,
        GamePhase::Playing => Action::Jump,
    }
}

fn playing_only(phase: GamePhase, action: Action) -> Option<Action> {
    (phase == GamePhase::Playing).then_some(action)
}

/// Pending actions queued by input handlers between ticks.
///
/// The host writes, the tick reads once. Everything runs on one logical
/// thread; the queue just keeps the handoff explicit.
#[derive(Debug, Default)]
pub struct ActionQueue {
    actions: Vec<Action>,
}

impl ActionQueue {
    pub fn new() -> Self {
        Self {
            actions: Vec::with_capacity(8),
        }
    }

    pub fn push(&mut self, action: Action) {
        self.actions.push(action);
    }

    /// Take every pending action, clearing the queue
    pub fn drain(&mut self) -> Vec<Action> {
        std::mem::take(&mut self.actions)
    }

    pub fn is_empty(&self) -> bool {
        self.actions.is_empty()
    }
}
