//! Steering компоненты: параметры flocking и сглаженное состояние

use bevy::prelude::*;
use serde::Deserialize;

use crate::steering::obstacles::COLLISION_MASK_OBSTACLES;

/// Параметры flocking для survivor
///
/// Дефолты совпадают с игровыми: follow 3м, separation 1.5м, вес separation 0.5.
#[derive(Component, Debug, Clone, Copy, PartialEq, Reflect, Deserialize)]
#[reflect(Component)]
#[serde(default)]
pub struct SteeringConfig {
    /// Дистанция позади лидера (точка следования)
    pub follow_distance: f32,
    /// Радиус separation (сила = 0 ровно на границе)
    pub separation_distance: f32,
    /// Скорость сглаживания separation (1/с)
    pub separation_blend_rate: f32,
    /// Вес separation в итоговом heading (вторичная коррекция)
    pub separation_weight: f32,
    /// Длина луча obstacle avoidance
    pub obstacle_avoid_distance: f32,
    /// Скорость перехода follow → avoidance (1/с)
    pub avoid_force: f32,
    /// Высота начала луча над позицией актора
    pub ray_height: f32,
    /// Маска слоёв для raycast
    pub obstacle_mask: u32,
    /// Порог |heading|² ниже которого поворот/движение пропускается
    pub min_heading_sqr: f32,
    /// Соседи ближе epsilon игнорируются (нестабильная нормализация)
    pub neighbor_epsilon: f32,
    /// Множитель скорости idle separation
    pub idle_speed_factor: f32,
    /// Порог |force|² для idle separation
    pub idle_min_force_sqr: f32,
}

impl Default for SteeringConfig {
    fn default() -> Self {
        Self {
            follow_distance: 3.0,
            separation_distance: 1.5,
            separation_blend_rate: 5.0,
            separation_weight: 0.5,
            obstacle_avoid_distance: 2.0,
            avoid_force: 5.0,
            ray_height: 0.5,
            obstacle_mask: COLLISION_MASK_OBSTACLES,
            min_heading_sqr: 0.01,
            neighbor_epsilon: 0.01,
            idle_speed_factor: 0.5,
            idle_min_force_sqr: 0.001,
        }
    }
}

/// Состояние steering между тиками
///
/// Хранит сглаженный separation vector (lerp к свежему значению каждый тик).
#[derive(Component, Debug, Clone, Copy, Default, PartialEq, Reflect)]
#[reflect(Component)]
pub struct SteeringState {
    pub separation_smooth: Vec3,
}
