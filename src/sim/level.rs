//! Level descriptors and the level cursor

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use super::terrain::LayoutGrid;
use crate::config::{ColourSpec, Rgb};

/// Everything the simulation needs to start one level. Immutable once built.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LevelDescriptor {
    pub layout: LayoutGrid,
    /// Background image reference, passed through for rendering
    pub background: Option<String>,
    /// Terrain colour, passed through for rendering
    pub foreground: Rgb,
    /// Tree sprite reference, passed through for rendering
    pub trees: Option<String>,
    pub player_colours: BTreeMap<char, ColourSpec>,
}

impl LevelDescriptor {
    pub fn from_layout(layout: LayoutGrid) -> Self {
        Self {
            layout,
            background: None,
            foreground: Rgb::WHITE,
            trees: None,
            player_colours: BTreeMap::new(),
        }
    }
}

/// Source of level descriptors, in play order
pub trait LevelProvider: fmt::Debug {
    fn level_count(&self) -> usize;
    fn level(&self, index: usize) -> Option<LevelDescriptor>;
}

impl LevelProvider for Vec<LevelDescriptor> {
    fn level_count(&self) -> usize {
        self.len()
    }

    fn level(&self, index: usize) -> Option<LevelDescriptor> {
        self.get(index).cloned()
    }
}

/// Walks a provider one level at a time
#[derive(Debug)]
pub struct LevelManager {
    provider: Box<dyn LevelProvider>,
    /// Index of the next level to load
    cursor: usize,
}

impl LevelManager {
    pub fn new(provider: Box<dyn LevelProvider>) -> Self {
        Self {
            provider,
            cursor: 0,
        }
    }

    /// Take the next level, or `None` once the sequence is exhausted
    pub fn advance(&mut self) -> Option<LevelDescriptor> {
        let level = self.provider.level(self.cursor)?;
        self.cursor += 1;
        Some(level)
    }

    pub fn restart(&mut self) {
        self.cursor = 0;
    }

    /// Number of levels loaded so far (1-based index of the current level)
    pub fn levels_loaded(&self) -> usize {
        self.cursor
    }

    pub fn level_count(&self) -> usize {
        self.provider.level_count()
    }

    pub fn has_more(&self) -> bool {
        self.cursor < self.provider.level_count()
    }
}
