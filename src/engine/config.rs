use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::difficulty::{DifficultyProfile, Preset};
use crate::error::{ConfigError, ConfigResult};
use crate::logging::TracingConfig;
use crate::player::HeroClass;

/// Starting difficulty: a named preset or a hand-written profile
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProfileSelection {
    Preset(Preset),
    Custom(DifficultyProfile),
}

impl Default for ProfileSelection {
    fn default() -> Self {
        ProfileSelection::Preset(Preset::Normal)
    }
}

impl ProfileSelection {
    pub fn resolve(&self) -> DifficultyProfile {
        match self {
            ProfileSelection::Preset(preset) => preset.profile(),
            ProfileSelection::Custom(profile) => profile.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Seed of the first level; each level adds one
    pub seed: u64,
    pub profile: ProfileSelection,
    pub hero_class: HeroClass,
    /// Ticks per logical second for drivers that step the engine
    pub tick_rate: u32,
    pub logging: TracingConfig,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            seed: 42,
            profile: ProfileSelection::default(),
            hero_class: HeroClass::Warrior,
            tick_rate: 20,
            logging: TracingConfig::default(),
        }
    }
}

impl EngineConfig {
    /// Load a `.json` or `.ron` file, picked by extension, and validate it.
    pub fn load(path: impl AsRef<Path>) -> ConfigResult<Self> {
        let path = path.as_ref();
        let extension = path
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_ascii_lowercase());

        let config = match extension.as_deref() {
            Some("json") => Self::from_json_str(&fs::read_to_string(path)?)?,
            Some("ron") => Self::from_ron_str(&fs::read_to_string(path)?)?,
            _ => return Err(ConfigError::UnsupportedFormat(path.to_path_buf())),
        };
        config.validate()?;
        Ok(config)
    }

    pub fn from_json_str(content: &str) -> ConfigResult<Self> {
        Ok(serde_json::from_str(content)?)
    }

    pub fn from_ron_str(content: &str) -> ConfigResult<Self> {
        Ok(ron::from_str(content)?)
    }

    pub fn to_json(&self) -> ConfigResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn to_ron(&self) -> ConfigResult<String> {
        Ok(ron::ser::to_string_pretty(
            self,
            ron::ser::PrettyConfig::default(),
        )?)
    }

    pub fn validate(&self) -> ConfigResult<()> {
        if self.tick_rate == 0 {
            return Err(ConfigError::InvalidConfig(
                "tick_rate must be at least 1".into(),
            ));
        }
        self.resolve_profile().validate()
    }

    pub fn resolve_profile(&self) -> DifficultyProfile {
        self.profile.resolve()
    }

    /// Logical milliseconds between ticks.
    pub fn tick_interval_ms(&self) -> u64 {
        1000 / u64::from(self.tick_rate.max(1))
    }
}
