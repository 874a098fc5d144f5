use serde::{Deserialize, Serialize};

use crate::generation::Dungeon;
use crate::player::Hero;

// =====================================================
// Intents (from the input collaborator)
// =====================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Intent {
    Move { dx: i32, dy: i32 },
    WarpToExit,
    /// Rendering hint only
    ToggleVisibility,
    GrantCheatResources,
}

// =====================================================
// Run results (to the score reporting collaborator)
// =====================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoreRecord {
    pub score: u32,
    pub time_in_seconds: f64,
    pub dungeon_level: u32,
    /// Seed the run started from
    pub seed: u64,
}

impl ScoreRecord {
    pub fn to_json(&self) -> String {
        serde_json::to_string(self).unwrap_or_default()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "state", content = "record", rename_all = "snake_case")]
pub enum RunStatus {
    Running,
    /// Terminal: the engine ignores further ticks and intents
    Over(ScoreRecord),
}

// =====================================================
// Read model (to the renderer collaborator)
// =====================================================

#[derive(Debug, Serialize)]
pub struct GameSnapshot<'a> {
    pub now: u64,
    pub dungeon: &'a Dungeon,
    pub hero: &'a Hero,
    pub hero_invincible: bool,
    pub reveal_map: bool,
    pub status: &'a RunStatus,
}

impl GameSnapshot<'_> {
    pub fn to_json(&self) -> String {
        serde_json::to_string(self).unwrap_or_default()
    }
}
