//! Gauntlet Run - a lane-based medieval corridor runner
//!
//! Core modules:
//! - `sim`: Deterministic simulation (kinematics, spawning, collisions, game state)
//! - `scene`: Scene-command boundary to the external rendering collaborator
//! - `input`: Raw input to logical action mapping
//! - `tuning`: Data-driven game balance
//! - `scores`: Session score table

pub mod input;
pub mod scene;
pub mod scores;
pub mod sim;
pub mod tuning;

pub use scores::SessionScores;
pub use tuning::Tuning;

/// Game configuration constants
pub mod consts {
    /// Fixed simulation timestep (per-tick physics constants are calibrated to 60 Hz)
    pub const SIM_DT: f32 = 1.0 / 60.0;
    /// Maximum substeps per frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 8;

    /// Number of corridor lanes
    pub const LANE_COUNT: usize = 3;
    /// Distance between adjacent lane centers
    pub const LANE_SPACING: f32 = 2.0;

    /// Resting vertical position of the player
    pub const GROUND_Y: f32 = 0.5;
    /// Depth of the player along the travel axis (entities approach from negative depth)
    pub const PLAYER_DEPTH: f32 = 0.0;
    /// Depth at which new entities enter the corridor
    pub const SPAWN_DEPTH: f32 = -40.0;
    /// Depth beyond which an entity has scrolled past the player and is pruned
    pub const PASS_THROUGH_DEPTH: f32 = 10.0;

    /// Collision windows - strict `<` comparisons, boundary contact does not count.
    /// Lane spacing is 2.0, so the lateral window can never bridge adjacent lanes.
    pub const LATERAL_HIT_RANGE: f32 = 1.0;
    pub const DEPTH_HIT_RANGE: f32 = 1.0;
    /// Vertical clearance above an obstacle's height the player needs to hop it
    pub const OBSTACLE_CLEARANCE: f32 = 0.3;
    /// Vertical reach for gem collection
    pub const GEM_VERTICAL_RANGE: f32 = 1.5;

    /// Gem hover height (bob oscillates around this)
    pub const GEM_BASE_Y: f32 = 1.0;
    /// Bob amplitude (cosmetic, but feeds the collection window)
    pub const GEM_BOB_AMPLITUDE: f32 = 0.25;
    /// Bob phase advance per tick (radians)
    pub const GEM_BOB_RATE: f32 = 0.1;
    /// Gem spin per tick (radians, cosmetic only)
    pub const GEM_SPIN_RATE: f32 = 0.05;
}
