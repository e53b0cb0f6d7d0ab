//! Blockfall (workspace facade crate).
//!
//! Exposes `blockfall::{core,session,types}` while the implementation lives in
//! dedicated crates under `crates/`.

pub use blockfall_core as core;
pub use blockfall_session as session;
pub use blockfall_types as types;
