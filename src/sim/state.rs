//! Game state and render snapshot
//!
//! One `GameState` is one run: the live window of rows, the rafts on it, the
//! player, and the seeded RNG that produced them.

use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::player::{DeathCause, Player, PlayerController};
use super::raft::{Raft, RaftSystem};
use super::rowgen::RowGenerator;
use super::tile::{RowLookup, Tile, TileField};
use crate::consts::ROW_MARGIN;
use crate::{GameError, Settings};

/// Current phase of a run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    Playing,
    /// Terminal until restart
    GameOver,
}

/// Something the presentation layer may want to react to
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    /// Reached a new best row
    Advanced { row: i32, score: u32 },
    /// Move rejected by rock or the field edge
    Blocked { column: i32, row: i32 },
    Drowned { row: i32 },
    SweptAway { row: i32 },
    Restarted { seed: u64 },
}

/// Player as seen by the renderer
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PlayerView {
    pub column: f32,
    pub row: i32,
}

/// Everything a renderer needs for one frame
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Snapshot {
    pub seed: u64,
    pub tiles: Vec<Tile>,
    pub rafts: Vec<Raft>,
    pub player: PlayerView,
    /// Topmost rendered row
    pub camera_row: i32,
    pub score: u32,
    pub high_score: u32,
    pub is_game_over: bool,
    pub time_ticks: u64,
}

/// A single run of the game
#[derive(Debug, Clone)]
pub struct GameState {
    /// Run seed for reproducibility
    pub seed: u64,
    pub settings: Settings,
    pub phase: GamePhase,
    /// Frames simulated this run
    pub time_ticks: u64,
    pub field: TileField,
    pub rafts: RaftSystem,
    pub controller: PlayerController,
    /// Pending events, oldest first
    pub events: Vec<GameEvent>,
    generator: RowGenerator,
    rng: Pcg32,
}

impl GameState {
    /// Create a new run and generate the starting window
    pub fn new(settings: &Settings, seed: u64) -> Result<Self, GameError> {
        let mut state = Self::with_world(
            settings,
            seed,
            TileField::new(settings.field_width),
            RaftSystem::new(),
        )?;
        state.extend_forward()?;
        log::debug!(
            "Generated rows {:?}..={:?} for seed {}",
            state.field.min_row(),
            state.field.max_row(),
            seed
        );
        Ok(state)
    }

    /// Create a run on a prebuilt field; rows beyond it are generated as
    /// the player advances
    pub fn with_world(
        settings: &Settings,
        seed: u64,
        field: TileField,
        rafts: RaftSystem,
    ) -> Result<Self, GameError> {
        settings.validate()?;
        if field.width() != settings.field_width {
            return Err(GameError::InvalidSettings(format!(
                "field width {} does not match settings width {}",
                field.width(),
                settings.field_width
            )));
        }

        Ok(Self {
            seed,
            settings: settings.clone(),
            phase: GamePhase::Playing,
            time_ticks: 0,
            field,
            rafts,
            controller: PlayerController::new(settings.spawn_column),
            events: Vec::new(),
            generator: RowGenerator::new(settings),
            rng: Pcg32::seed_from_u64(seed),
        })
    }

    pub fn player(&self) -> &Player {
        &self.controller.player
    }

    pub fn score(&self) -> u32 {
        self.controller.score
    }

    pub fn is_game_over(&self) -> bool {
        self.phase == GamePhase::GameOver
    }

    pub fn camera_row(&self) -> i32 {
        self.settings.camera_row(self.controller.player.row)
    }

    /// Generate `row` and store it, along with its rafts
    fn generate_row(&mut self, row: i32) -> Result<(), GameError> {
        let result = self.generator.generate(row, &self.field, &mut self.rng);
        self.field.insert_row(row, result.row)?;
        self.rafts.insert(result.rafts);
        Ok(())
    }

    /// Make sure `row` exists; an evicted row comes back as a fresh one
    pub fn ensure_row(&mut self, row: i32) -> Result<(), GameError> {
        if !self.field.has_row(row) {
            log::debug!("Regenerating row {}", row);
            self.generate_row(row)?;
        }
        Ok(())
    }

    /// Fill every missing row between the field's front and just past the camera
    pub fn extend_forward(&mut self) -> Result<(), GameError> {
        let target = self.camera_row() - ROW_MARGIN;
        let start = match self.field.min_row() {
            Some(front) => front - 1,
            None => self.settings.trailing_row(self.controller.player.row),
        };
        for row in (target..=start).rev() {
            self.generate_row(row)?;
        }
        Ok(())
    }

    /// Drop rows and rafts behind the trailing window
    pub fn evict_behind(&mut self) {
        let from = self.settings.trailing_row(self.controller.player.row) + 1;
        let rows = self.field.evict_from(from);
        let rafts = self.rafts.evict_from(from);
        if rows > 0 {
            log::debug!("Evicted {} rows and {} rafts from row {}", rows, rafts, from);
        }
    }

    /// Enter the terminal phase
    pub fn end_run(&mut self, cause: DeathCause) {
        let row = self.controller.player.row;
        self.phase = GamePhase::GameOver;
        self.events.push(match cause {
            DeathCause::Drowned => GameEvent::Drowned { row },
            DeathCause::SweptAway => GameEvent::SweptAway { row },
        });
        log::info!(
            "Game over ({:?}) at row {} with score {}",
            cause,
            row,
            self.controller.score
        );
    }

    /// Read-only view for rendering
    pub fn snapshot(&self, high_score: u32) -> Snapshot {
        let player = &self.controller.player;
        Snapshot {
            seed: self.seed,
            tiles: self.field.tiles().collect(),
            rafts: self.rafts.rafts().to_vec(),
            player: PlayerView {
                column: player.column,
                row: player.row,
            },
            camera_row: self.camera_row(),
            score: self.controller.score,
            high_score: high_score.max(self.controller.score),
            is_game_over: self.is_game_over(),
            time_ticks: self.time_ticks,
        }
    }
}
