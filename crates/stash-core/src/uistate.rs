//! Persisted UI preferences
//!
//! Small JSON blob remembered between sessions: display modes, recent
//! filter strings and the letters the user has bound to item kinds.
//! A missing or unreadable file degrades to defaults; saving is the
//! only operation that reports failure.

use std::collections::BTreeMap;
use std::fs::{self, File};
use std::io::{BufReader, BufWriter};
use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::errors::StashError;
use crate::selector::NavigationMode;

/// Filter strings kept in history.
const FILTER_HISTORY_CAP: usize = 20;

#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct UiState {
    /// Category-at-a-time navigation on by default?
    pub category_navigation: bool,
    /// Organize by containing item rather than flat categories?
    pub hierarchy_mode: bool,
    /// Most recent filter strings, newest first.
    pub filter_history: Vec<String>,
    /// Letter the user last assigned to each item kind.
    pub invlet_by_kind: BTreeMap<String, char>,
}

impl UiState {
    pub fn navigation_mode(&self) -> NavigationMode {
        if self.category_navigation {
            NavigationMode::Category
        } else {
            NavigationMode::Item
        }
    }

    /// Push a filter string onto the history, deduplicated and
    /// bounded.
    pub fn remember_filter(&mut self, raw: impl Into<String>) {
        let raw = raw.into();
        if raw.is_empty() {
            return;
        }
        self.filter_history.retain(|f| *f != raw);
        self.filter_history.insert(0, raw);
        self.filter_history.truncate(FILTER_HISTORY_CAP);
    }

    pub fn remember_invlet(&mut self, kind: impl Into<String>, invlet: char) {
        self.invlet_by_kind.insert(kind.into(), invlet);
    }

    fn prefs_path() -> Result<PathBuf, StashError> {
        let mut path = dirs::data_dir().ok_or(StashError::NoPrefsDir)?;
        path.push("stash");
        path.push("uistate.json");
        Ok(path)
    }

    /// Load preferences, falling back to defaults when the file is
    /// missing or unreadable.
    pub fn load() -> UiState {
        let path = match Self::prefs_path() {
            Ok(path) => path,
            Err(e) => {
                warn!("no preference path: {e}");
                return UiState::default();
            }
        };
        match File::open(&path) {
            Ok(file) => match serde_json::from_reader(BufReader::new(file)) {
                Ok(state) => {
                    debug!(?path, "loaded UI preferences");
                    state
                }
                Err(e) => {
                    warn!(?path, "unreadable preferences, using defaults: {e}");
                    UiState::default()
                }
            },
            Err(_) => UiState::default(),
        }
    }

    pub fn save(&self) -> Result<(), StashError> {
        let path = Self::prefs_path()?;
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        let file = File::create(&path)?;
        serde_json::to_writer_pretty(BufWriter::new(file), self)?;
        debug!(?path, "saved UI preferences");
        Ok(())
    }
}
