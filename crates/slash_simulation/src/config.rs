//! Game config — tuning из TOML файла
//!
//! Каждая секция опциональна (serde default), пустой файл = дефолты.
//!
//! ```toml
//! [simulation]
//! seed = 7
//! log_level = "debug"
//!
//! [enemy]
//! combat_radius = 600.0
//! ```

use std::path::{Path, PathBuf};

use bevy::prelude::*;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::ai::{EnemyConfig, PawnSensing};
use crate::combat::{HitReactConfig, WeaponConfig};
use crate::components::Attributes;
use crate::logger::LogLevel;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Invalid config: {0}")]
    Invalid(String),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationConfig {
    pub seed: u64,
    pub log_level: String,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            seed: 42,
            log_level: "info".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlayerConfig {
    pub attributes: Attributes,
    pub move_speed: f32,
    pub hit_react: HitReactConfig,
}

impl Default for PlayerConfig {
    fn default() -> Self {
        Self {
            attributes: Attributes::default(),
            move_speed: 300.0,
            hit_react: HitReactConfig::default(),
        }
    }
}

/// Весь tuning симуляции (Resource)
#[derive(Resource, Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    pub simulation: SimulationConfig,
    pub player: PlayerConfig,
    pub enemy: EnemyConfig,
    pub enemy_attributes: Attributes,
    pub enemy_hit_react: HitReactConfig,
    pub sensing: PawnSensing,
    pub weapon: WeaponConfig,
}

impl GameConfig {
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        let config: GameConfig = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    pub fn log_level(&self) -> Option<LogLevel> {
        LogLevel::parse(&self.simulation.log_level)
    }

    /// Радиусы и времена конечны и неотрицательны, attack radius внутри combat radius
    ///
    /// TOML пропускает `nan` и `inf`: такие значения ломают сравнения дистанций и gen_range пауз.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.log_level().is_none() {
            return Err(ConfigError::Invalid(format!(
                "unknown log level '{}'",
                self.simulation.log_level
            )));
        }

        let enemy = &self.enemy;
        let tunables = [
            ("enemy.combat_radius", enemy.combat_radius),
            ("enemy.attack_radius", enemy.attack_radius),
            ("enemy.patrol_radius", enemy.patrol_radius),
            ("enemy.patrol_wait_min", enemy.patrol_wait_min),
            ("enemy.patrol_wait_max", enemy.patrol_wait_max),
            ("enemy.attack_delay", enemy.attack_delay),
            ("enemy.death_lifespan", enemy.death_lifespan),
            ("enemy.patrol_speed", enemy.patrol_speed),
            ("enemy.chase_speed", enemy.chase_speed),
            ("enemy.acceptance_radius", enemy.acceptance_radius),
            ("enemy.drop_height", enemy.drop_height),
            ("enemy.warp_target_offset", enemy.warp_target_offset),
            ("sensing.sight_radius", self.sensing.sight_radius),
            ("sensing.peripheral_vision_angle", self.sensing.peripheral_vision_angle),
            ("sensing.sensing_interval", self.sensing.sensing_interval),
            ("weapon.damage", self.weapon.damage),
            ("player.move_speed", self.player.move_speed),
        ];
        if let Some((name, value)) = tunables
            .iter()
            .find(|(_, value)| !value.is_finite() || *value < 0.0)
        {
            return Err(ConfigError::Invalid(format!("{name} must be finite and >= 0 (got {value})")));
        }

        let vectors = [
            ("weapon.box_extents", self.weapon.box_extents),
            ("weapon.trace_start", self.weapon.trace_start),
            ("weapon.trace_end", self.weapon.trace_end),
        ];
        if let Some((name, _)) = vectors
            .iter()
            .find(|(_, value)| value.iter().any(|component| !component.is_finite()))
        {
            return Err(ConfigError::Invalid(format!("{name} must be finite")));
        }

        if enemy.attack_radius > enemy.combat_radius {
            return Err(ConfigError::Invalid(format!(
                "enemy.attack_radius ({}) exceeds enemy.combat_radius ({})",
                enemy.attack_radius, enemy.combat_radius
            )));
        }

        for (name, attributes) in [("player.attributes", &self.player.attributes), ("enemy_attributes", &self.enemy_attributes)] {
            if !attributes.max_health.is_finite() || attributes.max_health <= 0.0 {
                return Err(ConfigError::Invalid(format!("{name}.max_health must be finite and > 0")));
            }
            let values = [
                attributes.health,
                attributes.stamina,
                attributes.max_stamina,
                attributes.stamina_regen_rate,
                attributes.dodge_cost,
            ];
            if values.iter().any(|value| !value.is_finite()) {
                return Err(ConfigError::Invalid(format!("{name} values must be finite")));
            }
        }

        Ok(())
    }
}
