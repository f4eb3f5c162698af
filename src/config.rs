//! Level configuration
//!
//! Decodes the JSON game config and its layout text files into immutable
//! [`LevelDescriptor`]s. The simulation never touches the filesystem.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::sim::level::LevelDescriptor;
use crate::sim::state::ShopPrices;
use crate::sim::terrain::LayoutGrid;

/// 8-bit RGB colour
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const WHITE: Rgb = Rgb::new(255, 255, 255);

    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }
}

/// Colour as written in the config: `"r,g,b"` or `"random"`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum ColourSpec {
    Fixed(Rgb),
    Random,
}

impl Default for ColourSpec {
    fn default() -> Self {
        ColourSpec::Fixed(Rgb::WHITE)
    }
}

impl ColourSpec {
    pub fn parse(s: &str) -> Option<Self> {
        let s = s.trim();
        if s.eq_ignore_ascii_case("random") {
            return Some(ColourSpec::Random);
        }
        let mut parts = s.split(',').map(|p| p.trim().parse::<u8>());
        match (parts.next(), parts.next(), parts.next(), parts.next()) {
            (Some(Ok(r)), Some(Ok(g)), Some(Ok(b)), None) => Some(ColourSpec::Fixed(Rgb::new(r, g, b))),
            _ => None,
        }
    }

    /// Pick a concrete colour, rolling one for `random`
    pub fn resolve<R: Rng>(self, rng: &mut R) -> Rgb {
        match self {
            ColourSpec::Fixed(rgb) => rgb,
            ColourSpec::Random => Rgb::new(rng.random(), rng.random(), rng.random()),
        }
    }
}

impl From<String> for ColourSpec {
    fn from(s: String) -> Self {
        ColourSpec::parse(&s).unwrap_or_else(|| {
            log::warn!("Invalid colour {:?}, using white", s);
            ColourSpec::default()
        })
    }
}

impl From<ColourSpec> for String {
    fn from(spec: ColourSpec) -> Self {
        match spec {
            ColourSpec::Fixed(Rgb { r, g, b }) => format!("{r},{g},{b}"),
            ColourSpec::Random => "random".to_string(),
        }
    }
}

/// Configuration loading errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid config JSON: {0}")]
    Json(#[from] serde_json::Error),
}

/// One entry of the `levels` array
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LevelEntry {
    /// Layout text file, relative to the config's directory
    pub layout: String,
    #[serde(default)]
    pub background: Option<String>,
    #[serde(rename = "foreground-colour", default)]
    pub foreground_colour: ColourSpec,
    #[serde(default)]
    pub trees: Option<String>,
}

/// Top-level game config
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GameConfig {
    #[serde(default)]
    pub levels: Vec<LevelEntry>,
    #[serde(default)]
    pub player_colours: BTreeMap<String, ColourSpec>,
    #[serde(default)]
    pub shop: ShopPrices,
}

impl GameConfig {
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let json = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let config = Self::from_json_str(&json)?;
        log::info!("Loaded config {} ({} levels)", path.display(), config.levels.len());
        Ok(config)
    }

    /// Player colours keyed by symbol; keys that are not a single
    /// character are skipped
    pub fn player_colours(&self) -> BTreeMap<char, ColourSpec> {
        let mut colours = BTreeMap::new();
        for (key, spec) in &self.player_colours {
            let mut chars = key.chars();
            match (chars.next(), chars.next()) {
                (Some(symbol), None) => {
                    colours.insert(symbol, *spec);
                }
                _ => log::warn!("Ignoring colour for invalid player key {:?}", key),
            }
        }
        colours
    }

    /// Build a descriptor for `entry` from already-read layout text
    pub fn describe_level(&self, entry: &LevelEntry, layout_text: &str) -> LevelDescriptor {
        let foreground = match entry.foreground_colour {
            ColourSpec::Fixed(rgb) => rgb,
            ColourSpec::Random => Rgb::WHITE,
        };
        LevelDescriptor {
            layout: LayoutGrid::parse(layout_text),
            background: entry.background.clone(),
            foreground,
            trees: entry.trees.clone(),
            player_colours: self.player_colours(),
        }
    }

    /// Read every layout file (relative to `base_dir`) into descriptors
    pub fn into_levels(&self, base_dir: &Path) -> Result<Vec<LevelDescriptor>, ConfigError> {
        self.levels
            .iter()
            .map(|entry| {
                let path = base_dir.join(&entry.layout);
                let text = std::fs::read_to_string(&path)
                    .map_err(|source| ConfigError::Io { path, source })?;
                Ok(self.describe_level(entry, &text))
            })
            .collect()
    }
}
