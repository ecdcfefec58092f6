//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed tick rate only (per-tick constants, no wall-clock reads)
//! - Seeded RNG only
//! - Stable iteration order (by entity id)
//! - No rendering or platform dependencies beyond the plain-data scene commands
//!   buffered on the state

pub mod collision;
pub mod kinematics;
pub mod lane;
pub mod spawn;
pub mod state;
pub mod tick;

pub use state::{GameEvent, GamePhase, GameState, Gem, GemColor, HudSnapshot, Obstacle, Player};
pub use tick::{Action, tick};
