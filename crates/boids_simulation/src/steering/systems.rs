//! Steering системы: регистрация во flock + движение survivors

use bevy::prelude::*;

use crate::ai::{LeaderBinding, SurvivorState};
use crate::combat::Dead;
use crate::components::{Locomotion, Player, Survivor};
use crate::steering::math::{follow_step, idle_step, FollowInput};
use crate::steering::{FlockRegistry, Obstacles, SteeringConfig, SteeringState};

/// Система: новые survivors → FlockRegistry
///
/// Despawned извне survivors (без смерти) тоже убираем из реестра.
pub fn register_flock_members(
    mut registry: ResMut<FlockRegistry>,
    added: Query<Entity, (Added<Survivor>, Without<Dead>)>,
    mut removed: RemovedComponents<Survivor>,
) {
    for entity in added.iter() {
        if registry.insert(entity) {
            crate::log(&format!("🐦 Flock: {:?} joined ({} members)", entity, registry.len()));
        }
    }

    for entity in removed.read() {
        registry.remove(entity);
    }
}

/// Система: steering survivors
///
/// - Idle: только лёгкая separation прямо в позицию (половинная скорость, без поворота)
/// - Following: follow + separation + obstacle avoidance → сглаженный поворот и движение
///
/// Позиции соседей снимаются в начале тика (snapshot), порядок обновления не влияет на результат.
pub fn steer_survivors(
    time: Res<Time<Fixed>>,
    leader: Res<LeaderBinding>,
    registry: Res<FlockRegistry>,
    obstacles: Res<Obstacles>,
    leaders: Query<&Transform, (With<Player>, Without<Survivor>)>,
    mut survivors: Query<
        (
            Entity,
            &mut Transform,
            &SurvivorState,
            &Locomotion,
            &SteeringConfig,
            &mut SteeringState,
        ),
        (With<Survivor>, Without<Player>, Without<Dead>),
    >,
) {
    let delta = time.delta_secs();
    if delta <= 0.0 {
        return;
    }

    let flock: Vec<(Entity, Vec3)> = registry
        .members()
        .iter()
        .filter_map(|&member| {
            survivors
                .get(member)
                .ok()
                .map(|(_, transform, ..)| (member, transform.translation))
        })
        .collect();

    let leader_transform = leader.entity().and_then(|entity| leaders.get(entity).ok()).copied();

    for (entity, mut transform, state, locomotion, config, mut steering) in survivors.iter_mut() {
        let neighbors = flock
            .iter()
            .filter(|(member, _)| *member != entity)
            .map(|(_, position)| *position);

        match state {
            SurvivorState::Idle => {
                if let Some(offset) = idle_step(config, transform.translation, neighbors, locomotion.move_speed, delta) {
                    transform.translation += offset;
                }
            }

            SurvivorState::Following => {
                // Нет лидера → следовать некуда (MissingDependency уже залогирован)
                let Some(leader_transform) = leader_transform else {
                    continue;
                };

                let forward = *transform.forward();
                let ray_origin = transform.translation + Vec3::Y * config.ray_height;
                let obstacle_hit = obstacles.raycast(
                    ray_origin,
                    forward,
                    config.obstacle_avoid_distance,
                    config.obstacle_mask,
                );

                let input = FollowInput {
                    position: transform.translation,
                    forward,
                    leader_position: leader_transform.translation,
                    leader_forward: *leader_transform.forward(),
                    move_speed: locomotion.move_speed,
                    rotation_speed: locomotion.rotation_speed,
                    delta,
                    obstacle_hit,
                };

                let (_, step) = follow_step(config, &mut steering, &input, neighbors);
                if let Some(step) = step {
                    transform.look_to(step.forward, Vec3::Y);
                    transform.translation += step.translation;
                }
            }

            SurvivorState::Dead => {}
        }
    }
}
