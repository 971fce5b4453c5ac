//! Lane Hopper - an endless lane-crossing arcade game
//!
//! Core modules:
//! - `sim`: Deterministic simulation (row generation, rafts, player, game state)
//! - `session`: The single world object a host owns and drives each frame
//! - `settings`: Data-driven game tuning
//! - `highscores`: In-process score table
//!
//! Drawing and input wiring live outside this crate: the host feeds
//! [`Direction`] intents and frame ticks in and reads [`Snapshot`]s out.

pub mod error;
pub mod highscores;
pub mod session;
pub mod settings;
pub mod sim;

pub use error::GameError;
pub use highscores::HighScores;
pub use session::GameSession;
pub use settings::{Difficulty, Settings};
pub use sim::{Direction, GameEvent, GamePhase, MoveOutcome, Snapshot, TileKind};

/// Game configuration constants
pub mod consts {
    /// Columns per row
    pub const FIELD_WIDTH: i32 = 20;
    /// Column the player spawns on (row 0)
    pub const SPAWN_COLUMN: i32 = 10;
    /// Rows rendered ahead of the player (camera row = player row - this)
    pub const TILES_AHEAD: i32 = 12;
    /// Rows kept behind the player before eviction (plus a margin of 2)
    pub const TILES_BEHIND: i32 = 4;
    /// Extra rows generated past the camera / kept past the trailing window
    pub const ROW_MARGIN: i32 = 2;

    /// Solid rock wall behind the spawn row (inclusive)
    pub const ROCK_BAND_FIRST: i32 = 1;
    pub const ROCK_BAND_LAST: i32 = 5;

    /// Chance a free row becomes a river
    pub const WATER_CHANCE: f64 = 0.2;
    /// Chance each land column becomes rock
    pub const ROCK_CHANCE: f64 = 0.35;

    /// Raft speed range in tiles/tick (max exclusive)
    pub const RAFT_SPEED_MIN: f32 = 0.02;
    pub const RAFT_SPEED_MAX: f32 = 0.05;
    /// Rafts spawned per river (inclusive)
    pub const RAFTS_PER_ROW_MIN: u32 = 2;
    pub const RAFTS_PER_ROW_MAX: u32 = 4;
    /// Raft width in tiles (inclusive)
    pub const RAFT_WIDTH_MIN: u32 = 2;
    pub const RAFT_WIDTH_MAX: u32 = 3;

    /// How far back connectivity repair looks for a land row
    pub const CONNECTIVITY_LOOKBACK: i32 = 5;
    /// Player hitbox is the cell center
    pub const HITBOX_CENTER: f32 = 0.5;
}

/// Round a continuous column to its grid cell, halves rounding up
///
/// A rider survives on `[-0.5, width - 0.5)`, which this maps onto
/// `[0, width - 1]`.
#[inline]
pub fn snap_column(column: f32) -> i32 {
    (column + 0.5).floor() as i32
}
