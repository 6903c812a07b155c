use core::fmt;
use core::str::FromStr;
use serde::{Deserialize, Serialize};

use crate::*;

/// Named board presets plus arbitrary validated configurations.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Difficulty {
    #[default]
    Easy,
    Medium,
    Hard,
    Expert,
    Custom(BoardConfig),
}

impl Difficulty {
    /// Presets in menu order, with their display labels.
    pub const PRESETS: &'static [(&'static str, Difficulty)] = &[
        ("Easy", Difficulty::Easy),
        ("Medium", Difficulty::Medium),
        ("Hard", Difficulty::Hard),
        ("Expert", Difficulty::Expert),
    ];

    pub const fn config(self) -> BoardConfig {
        use Difficulty::*;
        match self {
            Easy => BoardConfig::new_unchecked(10, 10),
            Medium => BoardConfig::new_unchecked(20, 40),
            Hard => BoardConfig::new_unchecked(30, 100),
            Expert => BoardConfig::new_unchecked(40, 250),
            Custom(config) => config,
        }
    }

    pub fn label(self) -> &'static str {
        Self::PRESETS
            .iter()
            .find(|&&(_, preset)| preset == self)
            .map_or("Custom", |&(label, _)| label)
    }
}

/// Maps a configuration back onto a preset when it matches one exactly.
impl From<BoardConfig> for Difficulty {
    fn from(config: BoardConfig) -> Self {
        Self::PRESETS
            .iter()
            .map(|&(_, preset)| preset)
            .find(|preset| preset.config() == config)
            .unwrap_or(Difficulty::Custom(config))
    }
}

impl FromStr for Difficulty {
    type Err = GameError;

    fn from_str(s: &str) -> Result<Self> {
        let s = s.trim();
        if let Some(&(_, preset)) = Self::PRESETS
            .iter()
            .find(|(label, _)| label.eq_ignore_ascii_case(s))
        {
            return Ok(preset);
        }
        s.parse::<BoardConfig>().map(Difficulty::from)
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Difficulty::Custom(config) => write!(f, "{config}"),
            preset => f.write_str(preset.label()),
        }
    }
}
