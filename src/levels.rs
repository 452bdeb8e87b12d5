//! Level configuration table
//!
//! Read-only data the simulation queries by index. Difficulty scales only
//! through `spawn_multiplier` and `traffic_speed_multiplier`; theme and
//! description are consumed by the renderer and UI.

use serde::Serialize;

/// Difficulty label shown in the UI
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Difficulty {
    Easy,
    Normal,
    Hard,
    Expert,
}

/// One stage of the run (serialized for the UI, never read back)
#[derive(Debug, Clone, Serialize)]
pub struct Level {
    pub name: &'static str,
    pub theme: &'static str,
    pub difficulty: Difficulty,
    pub description: &'static str,
    /// Shrinks the spawn interval (subject to the global floor)
    pub spawn_multiplier: f32,
    /// Scales the speed of spawned traffic
    pub traffic_speed_multiplier: f32,
}

/// The ordered stage list, easiest first
pub const LEVELS: &[Level] = &[
    Level {
        name: "City Drive",
        theme: "city",
        difficulty: Difficulty::Easy,
        description: "Neon signs and light traffic. Great for warm-up.",
        spawn_multiplier: 1.0,
        traffic_speed_multiplier: 1.0,
    },
    Level {
        name: "Desert Run",
        theme: "desert",
        difficulty: Difficulty::Normal,
        description: "Sandy winds and longer sight lines. Watch for dunes.",
        spawn_multiplier: 1.1,
        traffic_speed_multiplier: 1.05,
    },
    Level {
        name: "Forest Sprint",
        theme: "forest",
        difficulty: Difficulty::Normal,
        description: "Narrow roads and roadside trees. Visibility lower.",
        spawn_multiplier: 1.2,
        traffic_speed_multiplier: 1.1,
    },
    Level {
        name: "Night Chase",
        theme: "night",
        difficulty: Difficulty::Hard,
        description: "Lights and glare reduce reaction time. Traffic is faster.",
        spawn_multiplier: 1.4,
        traffic_speed_multiplier: 1.25,
    },
    Level {
        name: "Snow Drift",
        theme: "snow",
        difficulty: Difficulty::Hard,
        description: "Slippery lanes and drifting. Control matters.",
        spawn_multiplier: 1.6,
        traffic_speed_multiplier: 1.35,
    },
    Level {
        name: "Neon Overdrive",
        theme: "neon",
        difficulty: Difficulty::Expert,
        description: "High speed, dense traffic, and synthetic lights.",
        spawn_multiplier: 2.0,
        traffic_speed_multiplier: 1.6,
    },
];

/// Look up a level by index, falling back to the first level when the
/// index is out of range.
pub fn level_for(index: usize) -> &'static Level {
    LEVELS.get(index).unwrap_or(&LEVELS[0])
}
