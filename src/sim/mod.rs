//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Seeded RNG only, threaded explicitly through generation
//! - Stable iteration order (rows by index, rafts by id)
//! - No rendering or platform dependencies

pub mod player;
pub mod raft;
pub mod rowgen;
pub mod state;
pub mod tick;
pub mod tile;

pub use player::{DeathCause, Direction, MoveOutcome, Player, PlayerController, PlayerStatus};
pub use raft::{Drift, Raft, RaftSystem, WaterRowMeta};
pub use rowgen::{RowGenerator, RowResult};
pub use state::{GameEvent, GamePhase, GameState, PlayerView, Snapshot};
pub use tick::{apply_intent, autopilot_intent, tick};
pub use tile::{Row, RowLookup, Tile, TileField, TileKind};
