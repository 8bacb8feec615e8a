//! Steering module — flocking survivors вокруг лидера
//!
//! ECS ответственность:
//! - Какое направление выбрать (follow + separation + obstacle avoidance)
//! - FlockRegistry (явный реестр живых survivors)
//!
//! Host ответственность:
//! - Raycast против геометрии сцены (`ObstacleQuery`)
//! - Физическое разрешение коллизий

use bevy::prelude::*;

pub mod components;
pub mod flock;
pub mod math;
pub mod obstacles;
pub mod systems;

pub use components::{SteeringConfig, SteeringState};
pub use flock::FlockRegistry;
pub use math::{MotionStep, SteeringSample};
pub use obstacles::{ObstacleQuery, Obstacles, RayHit, StaticObstacles};
pub use systems::{register_flock_members, steer_survivors};

use crate::SimulationSet;

/// Steering Plugin
///
/// Регистрирует:
/// 1. register_flock_members — SimulationSet::Bind
/// 2. steer_survivors — SimulationSet::Move
///
/// `Obstacles` по умолчанию пустой (`StaticObstacles`); host подменяет resource своей реализацией.
pub struct SteeringPlugin;

impl Plugin for SteeringPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<FlockRegistry>()
            .init_resource::<Obstacles>()
            .add_systems(
                FixedUpdate,
                (
                    register_flock_members.in_set(SimulationSet::Bind),
                    steer_survivors.in_set(SimulationSet::Move),
                ),
            );
    }
}
