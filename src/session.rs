//! Game session
//!
//! The single object a host holds. It owns the current run, the settings it
//! was built from and the high score table that outlives individual runs.
//! Hosts call [`GameSession::handle_intent`] on each key press,
//! [`GameSession::tick`] once per frame and [`GameSession::snapshot`] to
//! draw.

use crate::highscores::HighScores;
use crate::sim::{self, Direction, GameEvent, GameState, MoveOutcome, Snapshot};
use crate::{GameError, Settings};

pub struct GameSession {
    settings: Settings,
    state: GameState,
    high_scores: HighScores,
    /// Current run already entered into `high_scores`
    recorded: bool,
}

impl GameSession {
    pub fn new(settings: Settings, seed: u64) -> Result<Self, GameError> {
        let state = GameState::new(&settings, seed)?;
        log::info!(
            "Session started (seed {}, {} difficulty, width {})",
            seed,
            settings.difficulty.as_str(),
            settings.field_width
        );
        Ok(Self {
            settings,
            state,
            high_scores: HighScores::new(),
            recorded: false,
        })
    }

    /// Apply one move intent (at most once per key press)
    pub fn handle_intent(&mut self, direction: Direction) -> Result<MoveOutcome, GameError> {
        let outcome = sim::apply_intent(&mut self.state, direction)?;
        self.record_if_over();
        Ok(outcome)
    }

    /// Advance one frame
    pub fn tick(&mut self) {
        sim::tick(&mut self.state);
        self.record_if_over();
    }

    pub fn snapshot(&self) -> Snapshot {
        self.state.snapshot(self.high_scores.top_score())
    }

    /// Start a fresh run seeded from the previous one
    pub fn restart(&mut self) -> Result<(), GameError> {
        self.restart_with_seed(self.state.seed.wrapping_add(1))
    }

    /// Start a fresh run; only the high score table survives
    pub fn restart_with_seed(&mut self, seed: u64) -> Result<(), GameError> {
        if !self.recorded {
            self.record_run();
        }
        let mut state = GameState::new(&self.settings, seed)?;
        state.events.push(GameEvent::Restarted { seed });
        self.state = state;
        self.recorded = false;
        log::info!("Restarted with seed {}", seed);
        Ok(())
    }

    /// Take all events raised since the last call
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.state.events)
    }

    pub fn is_game_over(&self) -> bool {
        self.state.is_game_over()
    }

    pub fn session_high_score(&self) -> u32 {
        self.high_scores.top_score()
    }

    pub fn high_scores(&self) -> &HighScores {
        &self.high_scores
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    fn record_if_over(&mut self) {
        if self.state.is_game_over() && !self.recorded {
            self.record_run();
            self.recorded = true;
        }
    }

    fn record_run(&mut self) {
        self.high_scores
            .add_score(self.state.score(), self.state.seed, self.state.time_ticks);
    }
}
