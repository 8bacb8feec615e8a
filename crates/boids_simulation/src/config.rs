//! Конфигурация симуляции (TOML)
//!
//! Все секции опциональны: отсутствующие поля берутся из `Default` (игровые значения).
//!
//! ```toml
//! corpse_linger_secs = 2.0
//!
//! [enemy]
//! detection_range = 6.0
//! missing_range = 18.0
//!
//! [spawn]
//! min_count = 4
//! max_count = 6
//!
//! [steering]
//! separation_distance = 2.0
//! ```

use bevy::prelude::*;
use serde::Deserialize;
use std::fs;
use std::path::Path;

use crate::ai::{PursuitConfig, SurvivorAIConfig};
use crate::combat::HealthBarColors;
use crate::components::{ContactDamage, Health, Locomotion};
use crate::error::{SimulationError, SimulationResult};
use crate::steering::SteeringConfig;

/// Базовые параметры актора (здоровье, движение, получаемый контактный урон)
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(default)]
pub struct ActorTuning {
    pub max_health: u32,
    pub move_speed: f32,
    pub rotation_speed: f32,
    /// Радиус, в котором враждебный актор наносит урон
    pub damage_range: f32,
    /// Cooldown на пару attacker → victim (секунды)
    pub damage_interval: f32,
    /// Урон за удар
    pub damage_amount: u32,
}

impl Default for ActorTuning {
    fn default() -> Self {
        Self {
            max_health: 100,
            move_speed: 3.0,
            rotation_speed: 5.0,
            damage_range: 2.0,
            damage_interval: 1.0,
            damage_amount: 10,
        }
    }
}

impl ActorTuning {
    pub fn health(&self) -> Health {
        Health::new(self.max_health)
    }

    pub fn locomotion(&self) -> Locomotion {
        Locomotion {
            move_speed: self.move_speed,
            rotation_speed: self.rotation_speed,
        }
    }

    pub fn contact_damage(&self) -> ContactDamage {
        ContactDamage {
            range: self.damage_range,
            interval: self.damage_interval,
            amount: self.damage_amount,
        }
    }

    fn validate(&self, section: &'static str) -> SimulationResult<()> {
        if self.max_health == 0 {
            return Err(invalid(section, "max_health must be > 0"));
        }
        if self.damage_amount == 0 {
            return Err(invalid(section, "damage_amount must be > 0"));
        }
        require_positive(section, "move_speed", self.move_speed)?;
        require_positive(section, "rotation_speed", self.rotation_speed)?;
        require_positive(section, "damage_range", self.damage_range)?;
        require_non_negative(section, "damage_interval", self.damage_interval)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(default)]
pub struct SurvivorTuning {
    pub stats: ActorTuning,
    /// Дистанция до лидера для Idle → Following
    pub detection_range: f32,
}

impl Default for SurvivorTuning {
    fn default() -> Self {
        Self {
            stats: ActorTuning::default(),
            detection_range: SurvivorAIConfig::default().detection_range,
        }
    }
}

impl SurvivorTuning {
    pub fn ai(&self) -> SurvivorAIConfig {
        SurvivorAIConfig {
            detection_range: self.detection_range,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(default)]
pub struct EnemyTuning {
    pub stats: ActorTuning,
    pub detection_range: f32,
    pub missing_range: f32,
}

impl Default for EnemyTuning {
    fn default() -> Self {
        let pursuit = PursuitConfig::default();
        Self {
            stats: ActorTuning::default(),
            detection_range: pursuit.detection_range,
            missing_range: pursuit.missing_range,
        }
    }
}

impl EnemyTuning {
    pub fn pursuit(&self) -> PursuitConfig {
        PursuitConfig {
            detection_range: self.detection_range,
            missing_range: self.missing_range,
        }
    }
}

/// Параметры спавна сцены
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(default)]
pub struct SpawnConfig {
    /// Минимум survivors/врагов (включительно)
    pub min_count: u32,
    /// Максимум survivors/врагов (включительно)
    pub max_count: u32,
    /// Размер области спавна по X (центр в начале координат)
    pub area_width: f32,
    /// Размер области спавна по Z
    pub area_depth: f32,
    /// Высота спавна над землёй
    pub y_offset: f32,
    pub player_position: [f32; 3],
}

impl Default for SpawnConfig {
    fn default() -> Self {
        Self {
            min_count: 3,
            max_count: 8,
            area_width: 10.0,
            area_depth: 10.0,
            y_offset: 1.02,
            player_position: [0.0, 1.02, 0.0],
        }
    }
}

impl SpawnConfig {
    pub fn player_position(&self) -> Vec3 {
        Vec3::from_array(self.player_position)
    }
}

/// Цвета health bar, RGBA в [0, 1]
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(default)]
pub struct DisplayConfig {
    pub zero_color: [f32; 4],
    pub full_color: [f32; 4],
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            zero_color: [1.0, 0.0, 0.0, 1.0],
            full_color: [0.0, 1.0, 0.0, 1.0],
        }
    }
}

impl DisplayConfig {
    pub fn health_bar_colors(&self) -> HealthBarColors {
        let [r, g, b, a] = self.zero_color;
        let zero = Srgba::new(r, g, b, a);
        let [r, g, b, a] = self.full_color;
        let full = Srgba::new(r, g, b, a);
        HealthBarColors { zero, full }
    }
}

/// Resource: полная конфигурация прогона
#[derive(Resource, Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct SimulationConfig {
    pub player: ActorTuning,
    pub survivor: SurvivorTuning,
    pub enemy: EnemyTuning,
    pub spawn: SpawnConfig,
    pub steering: SteeringConfig,
    pub display: DisplayConfig,
    /// Сколько секунд трупы врагов/survivors остаются в мире (0 → удаляются в конце того же тика)
    pub corpse_linger_secs: f32,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            player: ActorTuning::default(),
            survivor: SurvivorTuning::default(),
            enemy: EnemyTuning::default(),
            spawn: SpawnConfig::default(),
            steering: SteeringConfig::default(),
            display: DisplayConfig::default(),
            corpse_linger_secs: 0.0,
        }
    }
}

impl SimulationConfig {
    /// Парсинг + валидация
    pub fn from_toml_str(content: &str) -> SimulationResult<Self> {
        let config: SimulationConfig = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Загрузка из файла
    pub fn load(path: impl AsRef<Path>) -> SimulationResult<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|source| SimulationError::ConfigIo {
            path: path.to_path_buf(),
            source,
        })?;

        let config = Self::from_toml_str(&content)?;
        crate::log_info(&format!("📄 Config loaded from {}", path.display()));
        Ok(config)
    }

    pub fn validate(&self) -> SimulationResult<()> {
        self.player.validate("player")?;
        self.survivor.stats.validate("survivor.stats")?;
        self.enemy.stats.validate("enemy.stats")?;

        require_positive("survivor", "detection_range", self.survivor.detection_range)?;
        require_positive("enemy", "detection_range", self.enemy.detection_range)?;
        if self.enemy.missing_range < self.enemy.detection_range {
            return Err(invalid(
                "enemy",
                format!(
                    "missing_range ({}) must be >= detection_range ({})",
                    self.enemy.missing_range, self.enemy.detection_range
                ),
            ));
        }

        if self.spawn.min_count > self.spawn.max_count {
            return Err(invalid(
                "spawn",
                format!(
                    "min_count ({}) must be <= max_count ({})",
                    self.spawn.min_count, self.spawn.max_count
                ),
            ));
        }
        require_non_negative("spawn", "area_width", self.spawn.area_width)?;
        require_non_negative("spawn", "area_depth", self.spawn.area_depth)?;

        let steering = &self.steering;
        require_non_negative("steering", "follow_distance", steering.follow_distance)?;
        require_positive("steering", "separation_distance", steering.separation_distance)?;
        require_positive("steering", "obstacle_avoid_distance", steering.obstacle_avoid_distance)?;
        require_non_negative("steering", "separation_weight", steering.separation_weight)?;
        // epsilon ≤ 0 пропускает соседей в той же точке → normalize() даёт NaN
        require_positive("steering", "neighbor_epsilon", steering.neighbor_epsilon)?;
        require_non_negative("steering", "idle_min_force_sqr", steering.idle_min_force_sqr)?;
        require_non_negative("steering", "min_heading_sqr", steering.min_heading_sqr)?;
        require_non_negative("steering", "separation_blend_rate", steering.separation_blend_rate)?;
        require_non_negative("steering", "avoid_force", steering.avoid_force)?;
        require_non_negative("steering", "ray_height", steering.ray_height)?;
        require_non_negative("steering", "idle_speed_factor", steering.idle_speed_factor)?;

        require_non_negative("corpse_linger_secs", "corpse_linger_secs", self.corpse_linger_secs)
    }
}

fn invalid(field: &'static str, reason: impl Into<String>) -> SimulationError {
    SimulationError::InvalidConfig {
        field,
        reason: reason.into(),
    }
}

fn require_positive(section: &'static str, name: &str, value: f32) -> SimulationResult<()> {
    if value > 0.0 && value.is_finite() {
        Ok(())
    } else {
        Err(invalid(section, format!("{name} must be > 0 (got {value})")))
    }
}

fn require_non_negative(section: &'static str, name: &str, value: f32) -> SimulationResult<()> {
    if value >= 0.0 && value.is_finite() {
        Ok(())
    } else {
        Err(invalid(section, format!("{name} must be >= 0 (got {value})")))
    }
}
