//! Frame step and intent handling
//!
//! A frame drifts the rafts first, then carries (or drowns) the player.
//! Intents are applied between frames and run to completion, including any
//! row generation and eviction they trigger.

use super::player::{Direction, MoveOutcome};
use super::state::{GameEvent, GamePhase, GameState};
use super::tile::{RowLookup, TileKind};
use crate::consts::HITBOX_CENTER;
use crate::{GameError, snap_column};

/// Advance the game state by one frame
pub fn tick(state: &mut GameState) {
    // Game over freezes the world
    if state.phase == GamePhase::GameOver {
        return;
    }

    state.time_ticks += 1;
    state.rafts.advance(state.settings.field_width);

    if let Some(cause) = state.controller.ride(&state.field, &state.rafts) {
        state.end_run(cause);
    }
}

/// Apply one discrete move intent
pub fn apply_intent(state: &mut GameState, direction: Direction) -> Result<MoveOutcome, GameError> {
    if state.phase == GamePhase::GameOver {
        return Ok(MoveOutcome::Ignored);
    }

    let target = state.controller.target(direction);
    if (0..state.settings.field_width).contains(&target.x) {
        // Walking back past the trailing window finds a fresh row
        state.ensure_row(target.y)?;
    }

    let outcome = state
        .controller
        .try_move(direction, &state.field, &state.rafts)?;

    match outcome {
        MoveOutcome::Blocked => state.events.push(GameEvent::Blocked {
            column: target.x,
            row: target.y,
        }),
        MoveOutcome::Advanced { row, score } => {
            state.events.push(GameEvent::Advanced { row, score });
            state.extend_forward()?;
            state.evict_behind();
        }
        MoveOutcome::Drowned => state.end_run(super::player::DeathCause::Drowned),
        MoveOutcome::Moved | MoveOutcome::Ignored => {}
    }

    Ok(outcome)
}

/// Whether stepping onto (column, row) right now is survivable
fn is_safe(state: &GameState, column: i32, row: i32) -> bool {
    match state.field.kind_at(column, row) {
        Ok(Some(TileKind::Grass)) => true,
        Ok(Some(TileKind::Water)) => state
            .rafts
            .raft_at(row, column as f32 + HITBOX_CENTER)
            .is_some(),
        _ => false,
    }
}

/// Greedy autopilot: hop forward when safe, otherwise walk toward the
/// nearest safe column of the row ahead
pub fn autopilot_intent(state: &GameState) -> Option<Direction> {
    if state.phase == GamePhase::GameOver {
        return None;
    }

    let player = state.player();
    let column = snap_column(player.column);
    let ahead = player.row - 1;
    let width = state.field.width();

    if (0..width).contains(&column) && is_safe(state, column, ahead) {
        return Some(Direction::Forward);
    }

    // Riding: wait for a raft to line up with the far bank
    if state.field.is_water_row(player.row) {
        return None;
    }

    let goal = (0..width)
        .filter(|&c| is_safe(state, c, ahead))
        .min_by_key(|&c| (c - column).abs())?;
    let step = if goal < column {
        Direction::Left
    } else {
        Direction::Right
    };
    let next = column + step.delta().x;
    matches!(state.field.kind_at(next, player.row), Ok(Some(TileKind::Grass))).then_some(step)
}
