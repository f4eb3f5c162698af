//! Session score table
//!
//! Scores persist across levels and are only cleared on a full restart.
//! They grow with damage dealt and shrink only when spent in the shop.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// A single standings row
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Standing {
    pub symbol: char,
    pub score: i64,
}

/// Player symbol -> score
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreTable {
    entries: BTreeMap<char, i64>,
}

impl ScoreTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make sure a player has a row (starting at 0)
    pub fn register(&mut self, symbol: char) {
        self.entries.entry(symbol).or_insert(0);
    }

    pub fn get(&self, symbol: char) -> i64 {
        self.entries.get(&symbol).copied().unwrap_or(0)
    }

    /// Add earned points; negative amounts are ignored
    pub fn credit(&mut self, symbol: char, amount: i64) {
        *self.entries.entry(symbol).or_insert(0) += amount.max(0);
    }

    /// Spend `cost` if the player has at least `min_score`.
    /// Returns whether the purchase went through.
    pub fn try_spend(&mut self, symbol: char, min_score: i64, cost: i64) -> bool {
        let score = self.get(symbol);
        if score < min_score.max(cost) {
            return false;
        }
        self.entries.insert(symbol, score - cost);
        true
    }

    /// Rows sorted by score (highest first), ties by symbol
    pub fn standings(&self) -> Vec<Standing> {
        let mut rows: Vec<Standing> = self
            .entries
            .iter()
            .map(|(&symbol, &score)| Standing { symbol, score })
            .collect();
        rows.sort_by(|a, b| b.score.cmp(&a.score).then(a.symbol.cmp(&b.symbol)));
        rows
    }

    /// Highest scorer; equal top scores go to the lowest symbol
    pub fn winner(&self) -> Option<char> {
        self.standings().first().map(|s| s.symbol)
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Rows in symbol order
    pub fn iter(&self) -> impl Iterator<Item = (char, i64)> + '_ {
        self.entries.iter().map(|(&s, &v)| (s, v))
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }
}
