//! Player movement, raft riding and scoring
//!
//! The player lives on the grid: every discrete move snaps the column back
//! to an integer. Only while riding a raft does the column drift by
//! fractions of a tile.

use glam::IVec2;
use serde::{Deserialize, Serialize};

use super::raft::RaftSystem;
use super::tile::{RowLookup, TileField, TileKind};
use crate::consts::HITBOX_CENTER;
use crate::{GameError, snap_column};

/// A movement intent from the host
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Direction {
    Left,
    Right,
    /// Toward smaller row indices
    Forward,
    Backward,
}

impl Direction {
    pub const ALL: [Direction; 4] = [
        Direction::Left,
        Direction::Right,
        Direction::Forward,
        Direction::Backward,
    ];

    /// Grid step as (dx, dy)
    pub fn delta(self) -> IVec2 {
        match self {
            Direction::Left => IVec2::new(-1, 0),
            Direction::Right => IVec2::new(1, 0),
            Direction::Forward => IVec2::new(0, -1),
            Direction::Backward => IVec2::new(0, 1),
        }
    }
}

/// How a run ended
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DeathCause {
    /// In the water with nothing underfoot
    Drowned,
    /// Carried off the edge of the field by a raft
    SweptAway,
}

/// Alive, or dead for good until the session restarts
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PlayerStatus {
    Alive,
    Dead(DeathCause),
}

/// Result of a single move intent
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MoveOutcome {
    /// Player is dead; nothing happened
    Ignored,
    /// Off the field, into rock, or into a row that does not exist
    Blocked,
    /// Moved onto a tile that was already reached before
    Moved,
    /// Reached a new best row
    Advanced { row: i32, score: u32 },
    /// Stepped into open water
    Drowned,
}

/// Player position
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Player {
    /// Integer-valued except while riding
    pub column: f32,
    pub row: i32,
}

/// Owns the player and the run's score
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlayerController {
    pub player: Player,
    pub status: PlayerStatus,
    pub score: u32,
    /// Most negative row reached this run
    pub highest_row: i32,
}

impl PlayerController {
    pub fn new(spawn_column: i32) -> Self {
        Self {
            player: Player {
                column: spawn_column as f32,
                row: 0,
            },
            status: PlayerStatus::Alive,
            score: 0,
            highest_row: 0,
        }
    }

    pub fn is_alive(&self) -> bool {
        self.status == PlayerStatus::Alive
    }

    /// Cell a move in `direction` would land on, from the snapped column
    pub fn target(&self, direction: Direction) -> IVec2 {
        IVec2::new(snap_column(self.player.column), self.player.row) + direction.delta()
    }

    /// Validate and apply one move
    pub fn try_move(
        &mut self,
        direction: Direction,
        field: &TileField,
        rafts: &RaftSystem,
    ) -> Result<MoveOutcome, GameError> {
        if !self.is_alive() {
            return Ok(MoveOutcome::Ignored);
        }

        let target = self.target(direction);
        if !(0..field.width()).contains(&target.x) {
            return Ok(MoveOutcome::Blocked);
        }
        let kind = match field.kind_at(target.x, target.y)? {
            Some(kind) if kind.is_walkable() => kind,
            _ => return Ok(MoveOutcome::Blocked),
        };

        self.player.column = target.x as f32;
        self.player.row = target.y;

        if kind == TileKind::Water
            && rafts
                .raft_at(target.y, self.player.column + HITBOX_CENTER)
                .is_none()
        {
            self.status = PlayerStatus::Dead(DeathCause::Drowned);
            return Ok(MoveOutcome::Drowned);
        }

        if direction == Direction::Forward && target.y < self.highest_row {
            self.highest_row = target.y;
            self.score += 1;
            return Ok(MoveOutcome::Advanced {
                row: target.y,
                score: self.score,
            });
        }

        Ok(MoveOutcome::Moved)
    }

    /// Per-frame raft carry; returns the cause if this frame killed the player
    pub fn ride(&mut self, field: &TileField, rafts: &RaftSystem) -> Option<DeathCause> {
        if !self.is_alive() || !field.is_water_row(self.player.row) {
            return None;
        }

        let cause = match rafts.raft_at(self.player.row, self.player.column + HITBOX_CENTER) {
            Some(raft) => {
                self.player.column += raft.velocity();
                let width = field.width() as f32;
                if self.player.column < -HITBOX_CENTER || self.player.column >= width - HITBOX_CENTER {
                    DeathCause::SweptAway
                } else {
                    return None;
                }
            }
            None => DeathCause::Drowned,
        };

        self.status = PlayerStatus::Dead(cause);
        Some(cause)
    }
}
