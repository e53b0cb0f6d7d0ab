//! Game session - the loop that drives a playfield
//!
//! The session turns elapsed-time ticks into gravity steps, keeps the score, tracks
//! pause and game over, and checkpoints the whole thing to a quick-save file.

use crate::config::SessionConfig;
use crate::core::{ClearResult, ClearedRows, Playfield, Result, ScoringState};
use crate::save::{QuickSave, SaveState};

/// Lifecycle phase of a session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Phase {
    Running,
    Paused,
    GameOver,
}

/// What a call to [`GameSession::update`] did
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionEvent {
    /// Nothing changed on the grid
    Idle,
    /// A new piece entered the field
    Spawned,
    /// The new piece could not be placed
    GameOver,
    /// The piece moved one row down
    Fell,
    /// The piece locked
    Locked {
        cleared_rows: ClearedRows,
        awarded: u32,
    },
}

#[derive(Debug)]
pub struct GameSession {
    playfield: Playfield,
    scoring: ScoringState,
    phase: Phase,
    fall_interval: f32,
    fall_timer: f32,
    speed_up: bool,
    spawn_pending: bool,
    smooth_offset: f32,
    quick_save: QuickSave,
}

impl GameSession {
    pub fn new(config: &SessionConfig, playfield: Playfield) -> Self {
        Self {
            playfield,
            scoring: ScoringState::new(),
            phase: Phase::Running,
            fall_interval: config.fall_interval,
            fall_timer: 0.0,
            speed_up: false,
            spawn_pending: true,
            smooth_offset: 0.0,
            quick_save: QuickSave::new(config.save_path.clone()),
        }
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn playfield(&self) -> &Playfield {
        &self.playfield
    }

    pub fn playfield_mut(&mut self) -> &mut Playfield {
        &mut self.playfield
    }

    pub fn scoring(&self) -> &ScoringState {
        &self.scoring
    }

    pub fn scoring_mut(&mut self) -> &mut ScoringState {
        &mut self.scoring
    }

    pub fn score(&self) -> u32 {
        self.scoring.score()
    }

    pub fn fall_timer(&self) -> f32 {
        self.fall_timer
    }

    pub fn spawn_pending(&self) -> bool {
        self.spawn_pending
    }

    /// Fraction of a row the piece has visually fallen (0 to -1)
    pub fn smooth_offset(&self) -> f32 {
        self.smooth_offset
    }

    pub fn quick_save_path(&self) -> &std::path::Path {
        self.quick_save.path()
    }

    /// Advance the session by `elapsed` seconds
    pub fn update(&mut self, elapsed: f32) -> Result<SessionEvent> {
        if self.phase != Phase::Running {
            return Ok(SessionEvent::Idle);
        }

        if self.spawn_pending {
            self.fall_timer = 0.0;
            self.spawn_pending = false;

            if !self.playfield.spawn() {
                self.phase = Phase::GameOver;
                return Ok(SessionEvent::GameOver);
            }
            return Ok(SessionEvent::Spawned);
        }

        // a restored checkpoint may carry neither a piece nor a pending spawn
        if !self.playfield.is_falling() {
            self.spawn_pending = true;
            return Ok(SessionEvent::Idle);
        }

        self.fall_timer += elapsed;
        if self.fall_timer >= self.fall_interval || self.speed_up {
            let event = match self.playfield.descend()? {
                ClearResult::Locked(cleared_rows) => {
                    self.spawn_pending = true;
                    let awarded = self.scoring.award(cleared_rows.len());
                    self.speed_up = false;
                    SessionEvent::Locked {
                        cleared_rows,
                        awarded,
                    }
                }
                ClearResult::Falling => SessionEvent::Fell,
            };
            self.fall_timer = 0.0;
            self.smooth_offset = 0.0;
            return Ok(event);
        }

        if self.playfield.can_descend()? {
            self.smooth_offset = -self.fall_timer / self.fall_interval;
        }
        Ok(SessionEvent::Idle)
    }

    /// Shift and/or rotate the falling piece; ignored unless running
    pub fn move_piece(&mut self, dx: i32, d_orientation: i32) -> bool {
        if self.phase != Phase::Running {
            return false;
        }
        self.playfield.try_move(dx, d_orientation)
    }

    /// Make the piece fall every update until it locks
    pub fn set_speed_up(&mut self, value: bool) {
        self.speed_up = value;
    }

    /// Toggle between running and paused. Returns false when the game is over.
    pub fn toggle_pause(&mut self) -> bool {
        match self.phase {
            Phase::Paused => {
                self.phase = Phase::Running;
                true
            }
            Phase::Running => {
                self.phase = Phase::Paused;
                true
            }
            Phase::GameOver => false,
        }
    }

    /// Start a new game. Difficulty is kept.
    pub fn restart(&mut self) {
        self.playfield.clear();
        self.phase = Phase::Running;
        self.scoring.set_score(0);
        self.fall_timer = 0.0;
        self.smooth_offset = 0.0;
        self.speed_up = false;
        self.spawn_pending = true;
    }

    /// Checkpoint of the whole session, `None` once the game is over
    pub fn save_state(&self) -> Option<SaveState> {
        if self.phase == Phase::GameOver {
            return None;
        }
        Some(SaveState {
            model: self.playfield.capture(),
            fall_timer: self.fall_timer,
            spawn_pending: self.spawn_pending,
            smooth_offset: self.smooth_offset,
            score: self.scoring.score(),
            difficulty: self.scoring.difficulty(),
        })
    }

    /// Resume from a checkpoint. On error the session is left untouched.
    pub fn load_state(&mut self, state: &SaveState) -> Result<()> {
        self.playfield.restore(&state.model)?;

        self.fall_timer = state.fall_timer;
        self.spawn_pending = state.spawn_pending;
        self.smooth_offset = state.smooth_offset;
        self.scoring.set_score(state.score);
        self.scoring.set_difficulty(state.difficulty);
        self.speed_up = false;
        self.phase = Phase::Running;
        Ok(())
    }

    /// Write a checkpoint to the quick-save file. Returns whether it succeeded.
    pub fn quick_save(&self) -> bool {
        let Some(state) = self.save_state() else {
            return false;
        };
        match self.quick_save.store(&state) {
            Ok(()) => {
                println!("[Session] Quick save written to {}", self.quick_save.path().display());
                true
            }
            Err(e) => {
                eprintln!("[Session] Quick save failed: {:#}", e);
                false
            }
        }
    }

    /// Resume from the quick-save file. Returns whether it succeeded.
    pub fn quick_load(&mut self) -> bool {
        let state = match self.quick_save.load() {
            Ok(state) => state,
            Err(e) => {
                eprintln!("[Session] Quick load failed: {:#}", e);
                return false;
            }
        };
        match self.load_state(&state) {
            Ok(()) => {
                println!("[Session] Quick load from {}", self.quick_save.path().display());
                true
            }
            Err(e) => {
                eprintln!("[Session] Quick load rejected: {}", e);
                false
            }
        }
    }
}
