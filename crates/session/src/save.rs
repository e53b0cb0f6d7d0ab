//! Persisted checkpoint of a whole session
//!
//! A [`SaveState`] is the playfield [`Snapshot`] plus the fields owned by the driving
//! loop (fall timer, pending spawn, smooth offset, score, difficulty). It is written
//! as JSON; the playfield fields are flattened into the top-level object.

use std::fs::{self, File};
use std::io::{BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::core::Snapshot;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SaveState {
    #[serde(flatten)]
    pub model: Snapshot,
    pub fall_timer: f32,
    pub spawn_pending: bool,
    pub smooth_offset: f32,
    pub score: u32,
    pub difficulty: u32,
}

impl SaveState {
    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string(self).context("serialize save state")
    }

    pub fn from_json(text: &str) -> Result<Self> {
        serde_json::from_str(text).context("parse save state")
    }
}

/// A save file on disk
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuickSave {
    path: PathBuf,
}

impl QuickSave {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn exists(&self) -> bool {
        self.path.is_file()
    }

    /// Write the state, creating parent directories as needed
    pub fn store(&self, state: &SaveState) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)
                    .with_context(|| format!("create save directory {}", parent.display()))?;
            }
        }

        let file = File::create(&self.path)
            .with_context(|| format!("create save file {}", self.path.display()))?;
        let mut writer = BufWriter::new(file);
        serde_json::to_writer(&mut writer, state)
            .with_context(|| format!("write save file {}", self.path.display()))?;
        writer.flush()?;
        Ok(())
    }

    /// Read and parse the state
    pub fn load(&self) -> Result<SaveState> {
        let file = File::open(&self.path)
            .with_context(|| format!("open save file {}", self.path.display()))?;
        serde_json::from_reader(BufReader::new(file))
            .with_context(|| format!("parse save file {}", self.path.display()))
    }
}
