//! Game state and core simulation types
//!
//! Everything the simulation mutates lives here. The state is deterministic:
//! entity ids are allocated in order, the RNG is seeded per run, and per-tick
//! output (scene commands, game events) is buffered on the state itself and
//! drained by the host each frame.

use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use crate::consts::{GROUND_Y, PLAYER_DEPTH};
use crate::scene::{PLAYER_VISUAL_ID, SceneCommand, VisualKind};
use crate::tuning::Tuning;

use super::lane::{self, CENTER_LANE};

/// Current phase of gameplay
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Pre-game, waiting for the first start input
    Idle,
    /// Active run, simulation ticking
    Playing,
    /// Run ended, simulation frozen on the final frame
    GameOver,
}

/// Cosmetic gem color category - collision-irrelevant
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GemColor {
    Ruby,
    Emerald,
    Sapphire,
    Amber,
}

/// The player character
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Player {
    /// Current lane index
    pub lane: usize,
    /// Vertical position, never below [`GROUND_Y`]
    pub y: f32,
    /// Vertical velocity (units per tick)
    pub vertical_vel: f32,
    /// True iff mid-jump
    pub airborne: bool,
}

impl Player {
    pub fn new() -> Self {
        Self {
            lane: CENTER_LANE,
            y: GROUND_Y,
            vertical_vel: 0.0,
            airborne: false,
        }
    }

    /// Lateral position - always exactly the lane center (snapped, not interpolated)
    #[inline]
    pub fn lateral(&self) -> f32 {
        lane::offset(self.lane)
    }
}

impl Default for Player {
    fn default() -> Self {
        Self::new()
    }
}

/// A corridor obstacle
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Obstacle {
    pub id: u32,
    pub lane: usize,
    /// Distance along the travel axis; negative approaching, positive past the player
    pub depth: f32,
    pub width: f32,
    pub height: f32,
    /// Cleared by pruning or a collision; dead entries are compacted after detection
    pub alive: bool,
}

impl Obstacle {
    #[inline]
    pub fn lateral(&self) -> f32 {
        lane::offset(self.lane)
    }
}

/// A collectible gem
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Gem {
    pub id: u32,
    pub lane: usize,
    pub depth: f32,
    /// Bob oscillation phase (radians), advanced each tick
    pub bob_phase: f32,
    /// Accumulated spin angle (cosmetic)
    pub spin: f32,
    pub color: GemColor,
    pub alive: bool,
}

impl Gem {
    #[inline]
    pub fn lateral(&self) -> f32 {
        lane::offset(self.lane)
    }

    /// Current vertical position: hover height plus bob
    #[inline]
    pub fn y(&self) -> f32 {
        crate::consts::GEM_BASE_Y + self.bob_phase.sin() * crate::consts::GEM_BOB_AMPLITUDE
    }
}

/// Events the simulation reports outward each tick
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub enum GameEvent {
    RunStarted { seed: u64 },
    GemCollected { id: u32, total_score: u32 },
    RunEnded { score: u32, high_score: u32 },
}

/// Read-only state the presentation layer observes every frame
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct HudSnapshot {
    pub score: u32,
    pub high_score: u32,
    pub phase: GamePhase,
    pub speed: f32,
}

/// Complete game state
#[derive(Debug, Clone)]
pub struct GameState {
    /// Process seed; each run derives its own seed from this
    pub seed: u64,
    /// Run RNG, reseeded at every run start
    pub(crate) rng: Pcg32,
    pub tuning: Tuning,
    pub phase: GamePhase,
    pub score: u32,
    /// Best score this session; survives runs, dies with the process
    pub high_score: u32,
    pub scroll_speed: f32,
    /// Lifetime tick counter
    pub time_ticks: u64,
    /// Ticks in the current run
    pub run_ticks: u64,
    /// Gems collected in the current run
    pub gems_collected: u32,
    pub player: Player,
    pub obstacles: Vec<Obstacle>,
    pub gems: Vec<Gem>,
    /// Scene commands emitted this tick, drained by the host
    pub commands: Vec<SceneCommand>,
    /// Game events emitted this tick, drained by the host
    pub events: Vec<GameEvent>,
    /// Completed runs (feeds per-run seed derivation)
    runs: u32,
    /// Next entity id; 0 is reserved for the player visual
    next_id: u32,
    player_visual_live: bool,
}

impl GameState {
    /// Create a fresh state in the Idle phase
    pub fn new(seed: u64, tuning: Tuning) -> Self {
        Self {
            seed,
            rng: Pcg32::seed_from_u64(seed),
            scroll_speed: tuning.base_scroll_speed,
            tuning,
            phase: GamePhase::Idle,
            score: 0,
            high_score: 0,
            time_ticks: 0,
            run_ticks: 0,
            gems_collected: 0,
            player: Player::new(),
            obstacles: Vec::new(),
            gems: Vec::new(),
            commands: Vec::new(),
            events: Vec::new(),
            runs: 0,
            next_id: PLAYER_VISUAL_ID + 1,
            player_visual_live: false,
        }
    }

    /// Allocate a new entity id
    pub fn next_entity_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    /// Begin a fresh run (from Idle or straight from GameOver).
    ///
    /// Resets score and scroll speed, clears all active entities, resets the
    /// player, and reseeds the run RNG. The high score is the only survivor.
    pub fn start_run(&mut self) {
        // Sweep leftovers from the previous run out of the scene
        let commands = &mut self.commands;
        for obstacle in self.obstacles.drain(..) {
            commands.push(SceneCommand::Remove { id: obstacle.id });
        }
        for gem in self.gems.drain(..) {
            commands.push(SceneCommand::Remove { id: gem.id });
        }

        self.runs += 1;
        let run_seed = (self.runs as u64)
            .wrapping_mul(2654435761)
            .wrapping_add(self.seed);
        self.rng = Pcg32::seed_from_u64(run_seed);

        self.score = 0;
        self.gems_collected = 0;
        self.run_ticks = 0;
        self.scroll_speed = self.tuning.base_scroll_speed;
        self.player = Player::new();

        if !self.player_visual_live {
            self.commands.push(SceneCommand::Spawn {
                id: PLAYER_VISUAL_ID,
                kind: VisualKind::Player,
                lane: CENTER_LANE,
                depth: PLAYER_DEPTH,
            });
            self.player_visual_live = true;
        }

        self.phase = GamePhase::Playing;
        self.events.push(GameEvent::RunStarted { seed: run_seed });
        log::info!("Run {} started (seed {})", self.runs, run_seed);
    }

    /// End the current run. Commits the high score exactly once; calling this
    /// outside Playing is a no-op.
    pub fn end_run(&mut self) {
        if self.phase != GamePhase::Playing {
            return;
        }
        self.phase = GamePhase::GameOver;
        self.high_score = self.high_score.max(self.score);
        self.events.push(GameEvent::RunEnded {
            score: self.score,
            high_score: self.high_score,
        });
        log::info!("Run over: score {}, best {}", self.score, self.high_score);
    }

    /// Drop dead entities and tell the renderer to forget them. Called after
    /// detection so in-tick removal never invalidates iteration.
    pub fn compact(&mut self) {
        let commands = &mut self.commands;
        self.obstacles.retain(|o| {
            if !o.alive {
                commands.push(SceneCommand::Remove { id: o.id });
            }
            o.alive
        });
        self.gems.retain(|g| {
            if !g.alive {
                commands.push(SceneCommand::Remove { id: g.id });
            }
            g.alive
        });
    }

    /// Snapshot for the HUD
    pub fn hud(&self) -> HudSnapshot {
        HudSnapshot {
            score: self.score,
            high_score: self.high_score,
            phase: self.phase,
            speed: self.scroll_speed,
        }
    }
}
