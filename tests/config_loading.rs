//! Config files on disk: JSON and RON, by extension.

use std::fs;

use tempfile::tempdir;

use dungeon_core::difficulty::{CountRange, Preset};
use dungeon_core::engine::{Engine, EngineConfig, ProfileSelection};
use dungeon_core::error::ConfigError;
use dungeon_core::logging::LogLevel;
use dungeon_core::player::HeroClass;

#[test]
fn load_json_preset() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("run.json");
    fs::write(
        &path,
        r#"{
            "seed": 1234,
            "profile": { "preset": "hard" },
            "hero_class": "Rogue",
            "tick_rate": 30
        }"#,
    )
    .unwrap();

    let config = EngineConfig::load(&path).unwrap();
    assert_eq!(config.seed, 1234);
    assert_eq!(config.profile, ProfileSelection::Preset(Preset::Hard));
    assert_eq!(config.hero_class, HeroClass::Rogue);
    assert_eq!(config.tick_rate, 30);
    assert_eq!(config.logging.default_level, LogLevel::Info);

    let engine = Engine::new(&config, 0).unwrap();
    assert_eq!(engine.dungeon().seed, 1234);
    assert_eq!(engine.hero().stats.max_health, 90);
}

#[test]
fn load_ron_custom_profile() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("run.ron");
    fs::write(
        &path,
        r#"(
            seed: 5,
            profile: custom((
                monster_count: (min: 0, max: 0),
                monster_damage_multiplier: 2.0,
                loot_count: (min: 4, max: 4),
                room_count: (min: 3, max: 3),
                map_size: (min: 40, max: 40),
            )),
            hero_class: Mage,
            logging: (default_level: Debug),
        )"#,
    )
    .unwrap();

    let config = EngineConfig::load(&path).unwrap();
    let profile = config.resolve_profile();
    assert_eq!(profile.map_size, CountRange::new(40, 40));
    assert_eq!(profile.monster_damage_multiplier, 2.0);
    assert_eq!(config.logging.default_level, LogLevel::Debug);

    let engine = Engine::new(&config, 0).unwrap();
    let dungeon = engine.dungeon();
    assert_eq!((dungeon.grid.width, dungeon.grid.height), (40, 40));
    assert!(dungeon.monsters.is_empty());
    assert_eq!(dungeon.loot.len(), dungeon.interior_rooms().len() * 4);
}

#[test]
fn ron_written_by_engine_reloads() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("saved.ron");
    let config = EngineConfig {
        seed: 77,
        hero_class: HeroClass::Mage,
        ..Default::default()
    };
    fs::write(&path, config.to_ron().unwrap()).unwrap();
    assert_eq!(EngineConfig::load(&path).unwrap(), config);
}

#[test]
fn unknown_extension_rejected() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("run.toml");
    fs::write(&path, "seed = 1").unwrap();
    assert!(matches!(
        EngineConfig::load(&path),
        Err(ConfigError::UnsupportedFormat(_))
    ));
}

#[test]
fn missing_file_is_io_error() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("absent.json");
    assert!(matches!(EngineConfig::load(&path), Err(ConfigError::Io(_))));
}

#[test]
fn malformed_json_is_parse_error() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("bad.json");
    fs::write(&path, "{ seed: ").unwrap();
    assert!(matches!(EngineConfig::load(&path), Err(ConfigError::Json(_))));
}

#[test]
fn invalid_profile_rejected_on_load() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("tiny.json");
    fs::write(
        &path,
        r#"{ "profile": { "custom": {
            "monster_count": { "min": 1, "max": 2 },
            "monster_damage_multiplier": 1.0,
            "loot_count": { "min": 1, "max": 2 },
            "room_count": { "min": 2, "max": 4 },
            "map_size": { "min": 6, "max": 8 }
        } } }"#,
    )
    .unwrap();
    let err = EngineConfig::load(&path).unwrap_err();
    assert!(matches!(err, ConfigError::InvalidProfile(_)));
    assert!(err.to_string().contains("map_size"));
}
