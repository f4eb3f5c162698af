//! Destructible heightmap terrain
//!
//! Heights are screen-space y values: 0 is the top of the playfield and
//! `world_height` is the floor. A larger height means lower ground.

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::consts::*;

/// One cell of a parsed level layout
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Marker {
    Empty,
    Solid,
    Tree,
    Player(char),
}

impl Marker {
    pub fn from_char(c: char) -> Self {
        match c {
            'X' => Marker::Solid,
            'T' => Marker::Tree,
            c if c.is_ascii_uppercase() => Marker::Player(c),
            _ => Marker::Empty,
        }
    }
}

/// Parsed level layout (rows top to bottom, columns left to right)
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LayoutGrid {
    pub rows: Vec<Vec<Marker>>,
}

impl LayoutGrid {
    pub fn parse(text: &str) -> Self {
        Self {
            rows: text
                .lines()
                .map(|line| line.chars().map(Marker::from_char).collect())
                .collect(),
        }
    }

    /// Iterate `(row, col, marker)` over every non-empty cell
    pub fn cells(&self) -> impl Iterator<Item = (usize, usize, Marker)> + '_ {
        self.rows.iter().enumerate().flat_map(|(row, line)| {
            line.iter()
                .enumerate()
                .filter(|(_, m)| **m != Marker::Empty)
                .map(move |(col, m)| (row, col, *m))
        })
    }

    /// Player markers as `(symbol, col)` in layout order
    pub fn players(&self) -> Vec<(char, usize)> {
        self.cells()
            .filter_map(|(_, col, m)| match m {
                Marker::Player(symbol) => Some((symbol, col)),
                _ => None,
            })
            .collect()
    }
}

/// Cosmetic tree position; `offset` jitters the sprite vertically
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TreeAnchor {
    pub x: f32,
    pub offset: i32,
}

/// Per-column heightmap
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TerrainField {
    heights: Vec<i32>,
    world_height: i32,
    cell_size: usize,
    trees: Vec<TreeAnchor>,
}

impl Default for TerrainField {
    fn default() -> Self {
        Self::new(TERRAIN_COLUMNS, WORLD_HEIGHT, CELL_SIZE)
    }
}

impl TerrainField {
    /// Flat terrain with every column resting on the floor
    pub fn new(columns: usize, world_height: i32, cell_size: usize) -> Self {
        Self {
            heights: vec![world_height; columns.max(1)],
            world_height,
            cell_size: cell_size.max(1),
            trees: Vec::new(),
        }
    }

    /// Flat terrain at a fixed surface height (mostly useful for tests)
    pub fn flat(columns: usize, world_height: i32, surface: i32) -> Self {
        let mut terrain = Self::new(columns, world_height, CELL_SIZE);
        terrain.heights.fill(surface.clamp(0, world_height));
        terrain
    }

    /// Build, smooth and plant trees for a level layout
    pub fn from_layout<R: Rng>(grid: &LayoutGrid, rng: &mut R) -> Self {
        let mut terrain = Self::default();
        terrain.build(grid);
        terrain.smooth();
        terrain.plant_trees(grid, rng);
        terrain
    }

    /// Stamp solid cells into the heightmap. Overlapping spans keep the
    /// highest elevation; columns with no solid cell stay on the floor.
    pub fn build(&mut self, grid: &LayoutGrid) {
        self.heights.fill(self.world_height);
        self.trees.clear();

        let columns = self.heights.len();
        for (row, col, marker) in grid.cells() {
            if marker != Marker::Solid {
                continue;
            }
            let base = ((row * self.cell_size) as i32).clamp(0, self.world_height);
            let start = col * self.cell_size;
            let end = ((col + 1) * self.cell_size).min(columns);
            for h in self.heights.iter_mut().take(end).skip(start) {
                *h = (*h).min(base);
            }
        }
    }

    /// Two passes of a forward sliding-window average one cell wide.
    /// Must run after `build` and before tanks are seated.
    pub fn smooth(&mut self) {
        let columns = self.heights.len();
        let last = columns - 1;
        let mut smoothed = vec![0; columns];

        for _ in 0..2 {
            for (x, out) in smoothed.iter_mut().enumerate() {
                let mut sum: i64 = 0;
                for j in x..=x + self.cell_size {
                    sum += self.heights[j.min(last)] as i64;
                }
                *out = (sum / (self.cell_size as i64 + 1)) as i32;
            }
            self.heights.copy_from_slice(&smoothed);
        }
    }

    /// Record a tree for every `T` marker, centred on its cell
    pub fn plant_trees<R: Rng>(&mut self, grid: &LayoutGrid, rng: &mut R) {
        self.trees = grid
            .cells()
            .filter(|(_, _, m)| *m == Marker::Tree)
            .map(|(_, col, _)| TreeAnchor {
                x: (col * self.cell_size + self.cell_size / 2) as f32,
                offset: rng.random_range(-30..=30),
            })
            .collect();
    }

    /// Surface height at `x`, clamping `x` into the column range
    pub fn height_at(&self, x: f32) -> i32 {
        let last = self.heights.len() as i32 - 1;
        let column = (x as i32).clamp(0, last);
        self.heights[column as usize]
    }

    /// Excavate a circular crater around `impact_x`. Columns only ever move
    /// toward the floor.
    pub fn deform(&mut self, impact_x: f32, radius: f32) {
        if radius <= 0.0 || !impact_x.is_finite() {
            return;
        }
        let last = self.heights.len() as i32 - 1;
        let start = ((impact_x - radius) as i32).max(0);
        let end = ((impact_x + radius) as i32).min(last);
        let centre_y = self.height_at(impact_x) as f32;

        for x in start..=end {
            let distance = (x as f32 - impact_x).abs();
            if distance >= radius {
                continue;
            }
            let depth = (radius * radius - distance * distance).sqrt();
            let floor = ((centre_y + depth) as i32).min(self.world_height);
            let h = &mut self.heights[x as usize];
            *h = (*h).max(floor);
        }
    }

    pub fn heights(&self) -> &[i32] {
        &self.heights
    }

    pub fn columns(&self) -> usize {
        self.heights.len()
    }

    pub fn world_height(&self) -> i32 {
        self.world_height
    }

    pub fn trees(&self) -> &[TreeAnchor] {
        &self.trees
    }
}
