//! Scene-command boundary between the simulation and the rendering collaborator
//!
//! The core never draws. Each tick it emits a batch of fire-and-forget
//! [`SceneCommand`]s describing what the presentation layer should show; a host
//! forwards the batch to whatever renderer is attached through [`RenderSink`].
//! Commands are plain data and serialize to JSON so a JS renderer can consume
//! them unchanged.

use glam::Vec3;
use serde::{Deserialize, Serialize};

use crate::sim::state::GemColor;

/// Reserved visual id for the player entity
pub const PLAYER_VISUAL_ID: u32 = 0;

/// What kind of visual instance a spawn command asks for
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum VisualKind {
    Player,
    Obstacle { width: f32, height: f32 },
    Gem { color: GemColor },
}

/// A single command to the rendering collaborator
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum SceneCommand {
    /// Create a visual instance for a newly spawned entity
    Spawn {
        id: u32,
        kind: VisualKind,
        lane: usize,
        depth: f32,
    },
    /// Destroy the visual instance for a removed entity
    Remove { id: u32 },
    /// Move a visual instance (x = lateral offset, y = vertical, z = depth)
    SetPosition { id: u32, position: Vec3 },
    /// Rotate a visual instance (cosmetic gem spin)
    SetRotation { id: u32, angle: f32 },
}

/// The collaborator surface the host hands command batches to.
///
/// `apply` is fire-and-forget: the core neither reads back nor depends on what
/// the renderer does with a batch. `teardown` releases renderer resources and
/// must be safe to call more than once.
pub trait RenderSink {
    fn apply(&mut self, commands: &[SceneCommand]);

    fn teardown(&mut self) {}
}

/// Sink that discards everything (headless hosts, missing renderer)
#[derive(Debug, Default)]
pub struct NullSink;

impl RenderSink for NullSink {
    fn apply(&mut self, _commands: &[SceneCommand]) {}
}

/// Sink that records every batch, for tests and the native demo
#[derive(Debug, Default)]
pub struct RecordingSink {
    pub frames: Vec<Vec<SceneCommand>>,
    pub teardowns: u32,
}

impl RecordingSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// All recorded commands flattened in arrival order
    pub fn all(&self) -> impl Iterator<Item = &SceneCommand> {
        self.frames.iter().flatten()
    }
}

impl RenderSink for RecordingSink {
    fn apply(&mut self, commands: &[SceneCommand]) {
        self.frames.push(commands.to_vec());
    }

    fn teardown(&mut self) {
        self.teardowns += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn recording_sink_captures_batches() {
        let mut sink = RecordingSink::new();
        sink.apply(&[SceneCommand::Remove { id: 3 }]);
        sink.apply(&[SceneCommand::SetRotation { id: 3, angle: 0.5 }]);
        assert_eq!(sink.frames.len(), 2);
        assert_eq!(sink.all().count(), 2);
    }

    #[test]
    fn teardown_is_idempotent_by_contract() {
        let mut sink = RecordingSink::new();
        sink.teardown();
        sink.teardown();
        assert_eq!(sink.teardowns, 2);
    }

    #[test]
    fn commands_serialize_to_json() {
        let cmd = SceneCommand::SetPosition {
            id: 1,
            position: Vec3::new(-2.0, 0.5, 0.0),
        };
        let json = serde_json::to_string(&cmd).unwrap();
        let back: SceneCommand = serde_json::from_str(&json).unwrap();
        assert_eq!(back, cmd);
    }
}
