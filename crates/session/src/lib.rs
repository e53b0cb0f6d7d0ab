//! Session module - timing, scoring and persistence around a playfield
//!
//! The core playfield has no clock. This crate adds the loop that drives it:
//!
//! 1. **Gravity**: [`GameSession::update`] accumulates elapsed seconds and descends
//!    the piece once per fall interval (every update while speed-up is held)
//! 2. **Lifecycle**: running, paused and game over phases; restart keeps difficulty
//! 3. **Scoring**: lines cleared by each lock are awarded through the scoring state
//! 4. **Checkpoints**: [`SaveState`] is the playfield snapshot plus the loop state,
//!    written as JSON by [`QuickSave`]
//!
//! # Environment Variables
//!
//! - `BLOCKFALL_FALL_INTERVAL`: seconds per gravity step (default: 0.5)
//! - `BLOCKFALL_SAVE_PATH`: quick-save file (default: `$HOME/.blockfall/saves/quick`)

pub mod config;
pub mod save;
pub mod session;

pub use blockfall_core as core;
pub use blockfall_types as types;

pub use config::SessionConfig;
pub use save::{QuickSave, SaveState};
pub use session::{GameSession, Phase, SessionEvent};
