/// Game tunables.
///
/// `Settings` holds the base values (loaded from an optional TOML file, every
/// field defaulted so partial files work).  `DynamicSettings` holds the values
/// that reset on every new game and scale up on every cleared fleet.

use std::{fs, path::Path};

use anyhow::Context;
use serde::{Deserialize, Serialize};

use crate::entities::{FleetDirection, Rgb};
use crate::fleet;

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
#[serde(default)]
pub struct ScreenSettings {
    pub width: f32,
    pub height: f32,
    pub bg_color: Rgb,
}
impl Default for ScreenSettings {
    fn default() -> Self {
        Self {
            width: 1200.0,
            height: 800.0,
            bg_color: Rgb(230, 230, 230),
        }
    }
}

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
#[serde(default)]
pub struct ShipSettings {
    pub width: f32,
    pub height: f32,
    pub speed: f32,
    /// Spare ships granted at the start of a game.
    pub limit: u32,
}
impl Default for ShipSettings {
    fn default() -> Self {
        Self {
            width: 60.0,
            height: 48.0,
            speed: 1.5,
            limit: 3,
        }
    }
}

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
#[serde(default)]
pub struct BulletSettings {
    pub width: f32,
    pub height: f32,
    pub speed: f32,
    pub color: Rgb,
    /// Maximum number of live bullets.
    pub allowed: usize,
}
impl Default for BulletSettings {
    fn default() -> Self {
        Self {
            width: 3.0,
            height: 15.0,
            speed: 3.0,
            color: Rgb(60, 60, 60),
            allowed: 3,
        }
    }
}

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
#[serde(default)]
pub struct AlienSettings {
    pub width: f32,
    pub height: f32,
    pub speed: f32,
    pub drop_speed: f32,
    pub points: u32,
}
impl Default for AlienSettings {
    fn default() -> Self {
        Self {
            width: 60.0,
            height: 58.0,
            speed: 1.0,
            drop_speed: 10.0,
            points: 50,
        }
    }
}

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
#[serde(default)]
pub struct DifficultySettings {
    /// Multiplier applied to ship, bullet and alien speed on every level-up.
    pub speedup_scale: f32,
    /// Multiplier applied to the alien point value on every level-up.
    pub score_scale: f32,
    /// Pause after the ship is hit, in milliseconds.
    pub hit_pause_ms: u64,
}
impl Default for DifficultySettings {
    fn default() -> Self {
        Self {
            speedup_scale: 1.1,
            score_scale: 1.5,
            hit_pause_ms: 500,
        }
    }
}

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq, Default)]
#[serde(default)]
pub struct Settings {
    pub screen: ScreenSettings,
    pub ship: ShipSettings,
    pub bullet: BulletSettings,
    pub alien: AlienSettings,
    pub difficulty: DifficultySettings,
}

impl Settings {
    pub fn load_from_file(path: impl AsRef<Path>) -> anyhow::Result<Self> {
        let path = path.as_ref();
        let data = fs::read_to_string(path)
            .with_context(|| format!("read config {}", path.display()))?;
        toml::from_str(&data).with_context(|| format!("parse TOML {}", path.display()))
    }

    /// Load file; on failure returns the default settings plus the error text.
    pub fn load_or_default(path: impl AsRef<Path>) -> (Self, Option<String>) {
        match Self::load_from_file(&path) {
            Ok(settings) => (settings, None),
            Err(e) => (Self::default(), Some(format!("{e:#}"))),
        }
    }

    /// Produce validation warnings (non-fatal) for suspicious values.
    pub fn validate(&self) -> Vec<String> {
        let mut w = Vec::new();
        if self.screen.width <= 0.0 || self.screen.height <= 0.0 {
            w.push("screen dimensions must be > 0".into());
        }
        if self.ship.width <= 0.0 || self.ship.height <= 0.0 {
            w.push("ship dimensions must be > 0".into());
        }
        if self.alien.width <= 0.0 || self.alien.height <= 0.0 {
            w.push("alien dimensions must be > 0".into());
        }
        if self.bullet.width <= 0.0 || self.bullet.height <= 0.0 {
            w.push("bullet dimensions must be > 0".into());
        }
        if self.bullet.allowed == 0 {
            w.push("bullet.allowed is 0 (the ship can never fire)".into());
        }
        if self.bullet.speed <= 0.0 {
            w.push("bullet.speed must be > 0".into());
        }
        if self.difficulty.speedup_scale < 1.0 {
            w.push(format!(
                "difficulty.speedup_scale {} < 1 (game gets slower each level)",
                self.difficulty.speedup_scale
            ));
        }
        if self.difficulty.score_scale < 1.0 {
            w.push(format!(
                "difficulty.score_scale {} < 1 (aliens get cheaper each level)",
                self.difficulty.score_scale
            ));
        }
        if self.alien.width > 0.0 && self.alien.height > 0.0 {
            let rows = fleet::get_number_rows(self, self.ship.height, self.alien.height);
            let cols = fleet::get_number_aliens(self, self.alien.width);
            if rows == 0 || cols == 0 {
                w.push(format!(
                    "screen fits no fleet ({rows} rows x {cols} aliens); every frame will level up"
                ));
            }
            let fleet_value = self.alien.points as u64 * rows as u64 * cols as u64;
            if fleet_value > u32::MAX as u64 {
                w.push(format!(
                    "alien.points {} saturates the score within the first fleet",
                    self.alien.points
                ));
            }
        }
        w
    }
}

/// Values that reset at game start and scale up as levels are cleared.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DynamicSettings {
    pub ship_speed: f32,
    pub bullet_speed: f32,
    pub alien_speed: f32,
    pub fleet_direction: FleetDirection,
    pub alien_points: u32,
}

impl DynamicSettings {
    pub fn reset_to_base(settings: &Settings) -> Self {
        DynamicSettings {
            ship_speed: settings.ship.speed,
            bullet_speed: settings.bullet.speed,
            alien_speed: settings.alien.speed,
            fleet_direction: FleetDirection::Right,
            alien_points: settings.alien.points,
        }
    }

    /// Speeds are multiplied by `speedup`; the point value by `score_scale`,
    /// truncated to a whole number and capped at `u32::MAX`.  The fleet keeps
    /// its heading.
    pub fn scale_up(&self, speedup: f32, score_scale: f32) -> Self {
        DynamicSettings {
            ship_speed: self.ship_speed * speedup,
            bullet_speed: self.bullet_speed * speedup,
            alien_speed: self.alien_speed * speedup,
            fleet_direction: self.fleet_direction,
            alien_points: (self.alien_points as f64 * score_scale as f64)
                .clamp(0.0, u32::MAX as f64) as u32,
        }
    }
}
