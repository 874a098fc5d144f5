//! Difficulty profiles.
//!
//! A profile bundles the generation ranges for one level. Two named presets
//! exist; every level-up derives a harder profile from the current one.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::constants::{DAMAGE_MULTIPLIER_STEP, MIN_MAP_SIZE};
use crate::error::{ConfigError, ConfigResult};
use crate::rng::SeededRng;

/// Inclusive `[min, max]` count range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CountRange {
    pub min: usize,
    pub max: usize,
}

impl CountRange {
    pub const fn new(min: usize, max: usize) -> Self {
        Self { min, max }
    }

    /// One inclusive draw from the stream.
    pub fn draw(&self, rng: &mut SeededRng) -> usize {
        rng.range(self.min, self.max)
    }

    pub fn contains(&self, value: usize) -> bool {
        (self.min..=self.max).contains(&value)
    }

    /// Each bound independently grows by 0 or 1; `max` never drops below `min`.
    fn nudge(&self, rng: &mut SeededRng) -> Self {
        let min = self.min + rng.range(0, 1);
        let max = self.max + rng.range(0, 1);
        Self {
            min,
            max: max.max(min),
        }
    }
}

/// Named starting presets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Preset {
    Normal,
    Hard,
}

impl Preset {
    pub fn as_str(&self) -> &'static str {
        match self {
            Preset::Normal => "normal",
            Preset::Hard => "hard",
        }
    }

    pub fn profile(&self) -> DifficultyProfile {
        match self {
            Preset::Normal => DifficultyProfile {
                monster_count: CountRange::new(1, 3),
                monster_damage_multiplier: 1.0,
                loot_count: CountRange::new(1, 3),
                room_count: CountRange::new(5, 10),
                map_size: CountRange::new(30, 50),
            },
            Preset::Hard => DifficultyProfile {
                monster_count: CountRange::new(2, 5),
                monster_damage_multiplier: 1.5,
                loot_count: CountRange::new(1, 2),
                room_count: CountRange::new(8, 14),
                map_size: CountRange::new(40, 60),
            },
        }
    }
}

impl fmt::Display for Preset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Preset {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "normal" => Ok(Preset::Normal),
            "hard" => Ok(Preset::Hard),
            _ => Err(ConfigError::UnknownPreset(s.to_string())),
        }
    }
}

/// Generation ranges and monster scaling for one level.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DifficultyProfile {
    pub monster_count: CountRange,
    pub monster_damage_multiplier: f32,
    pub loot_count: CountRange,
    pub room_count: CountRange,
    pub map_size: CountRange,
}

impl Default for DifficultyProfile {
    fn default() -> Self {
        Preset::Normal.profile()
    }
}

impl DifficultyProfile {
    pub fn preset(name: &str) -> ConfigResult<Self> {
        Ok(name.parse::<Preset>()?.profile())
    }

    /// Profile for the next level.
    ///
    /// The damage multiplier strictly increases by a fixed step; room-count
    /// and map-size bounds each grow by 0 or 1. Monster and loot ranges are
    /// carried over unchanged.
    pub fn level_up(&self, rng: &mut SeededRng) -> Self {
        Self {
            monster_count: self.monster_count,
            monster_damage_multiplier: self.monster_damage_multiplier + DAMAGE_MULTIPLIER_STEP,
            loot_count: self.loot_count,
            room_count: self.room_count.nudge(rng),
            map_size: self.map_size.nudge(rng),
        }
    }

    pub fn validate(&self) -> ConfigResult<()> {
        let ranges = [
            ("monster_count", self.monster_count),
            ("loot_count", self.loot_count),
            ("room_count", self.room_count),
            ("map_size", self.map_size),
        ];
        for (name, range) in ranges {
            if range.min > range.max {
                return Err(ConfigError::InvalidProfile(format!(
                    "{name} range is inverted ({} > {})",
                    range.min, range.max
                )));
            }
        }
        if self.room_count.min == 0 {
            return Err(ConfigError::InvalidProfile(
                "room_count must allow at least one room".into(),
            ));
        }
        if self.map_size.min < MIN_MAP_SIZE {
            return Err(ConfigError::InvalidProfile(format!(
                "map_size.min must be at least {MIN_MAP_SIZE}, got {}",
                self.map_size.min
            )));
        }
        if !self.monster_damage_multiplier.is_finite() || self.monster_damage_multiplier <= 0.0 {
            return Err(ConfigError::InvalidProfile(format!(
                "monster_damage_multiplier must be positive, got {}",
                self.monster_damage_multiplier
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_presets_are_valid() {
        assert!(Preset::Normal.profile().validate().is_ok());
        assert!(Preset::Hard.profile().validate().is_ok());
    }

    #[test]
    fn test_normal_preset_ranges() {
        let p = Preset::Normal.profile();
        assert_eq!(p.map_size, CountRange::new(30, 50));
        assert_eq!(p.room_count, CountRange::new(5, 10));
    }

    #[test]
    fn test_hard_is_harder_than_normal() {
        let n = Preset::Normal.profile();
        let h = Preset::Hard.profile();
        assert!(h.monster_damage_multiplier > n.monster_damage_multiplier);
        assert!(h.monster_count.max > n.monster_count.max);
    }

    #[test]
    fn test_preset_parse_case_insensitive() {
        assert_eq!("Normal".parse::<Preset>().unwrap(), Preset::Normal);
        assert_eq!(" HARD ".parse::<Preset>().unwrap(), Preset::Hard);
        assert!(matches!(
            "nightmare".parse::<Preset>(),
            Err(ConfigError::UnknownPreset(_))
        ));
    }

    #[test]
    fn test_level_up_monotonic() {
        let mut rng = SeededRng::new(1);
        let mut profile = Preset::Normal.profile();
        for _ in 0..50 {
            let next = profile.level_up(&mut rng);
            assert!(next.monster_damage_multiplier > profile.monster_damage_multiplier);
            assert!(next.room_count.min >= profile.room_count.min);
            assert!(next.room_count.max >= profile.room_count.max);
            assert!(next.map_size.min >= profile.map_size.min);
            assert!(next.map_size.max >= profile.map_size.max);
            assert!(next.room_count.min <= profile.room_count.min + 1);
            assert!(next.map_size.max <= profile.map_size.max + 1);
            assert!(next.validate().is_ok());
            profile = next;
        }
    }

    #[test]
    fn test_level_up_keeps_max_above_min() {
        let mut rng = SeededRng::new(3);
        let mut profile = Preset::Normal.profile();
        profile.room_count = CountRange::new(6, 6);
        for _ in 0..20 {
            profile = profile.level_up(&mut rng);
            assert!(profile.room_count.min <= profile.room_count.max);
        }
    }

    #[test]
    fn test_validate_rejects_bad_profiles() {
        let mut p = DifficultyProfile::default();
        p.loot_count = CountRange::new(4, 2);
        assert!(matches!(p.validate(), Err(ConfigError::InvalidProfile(_))));

        let mut p = DifficultyProfile::default();
        p.map_size = CountRange::new(8, 10);
        assert!(p.validate().is_err());

        let mut p = DifficultyProfile::default();
        p.monster_damage_multiplier = 0.0;
        assert!(p.validate().is_err());
    }
}
