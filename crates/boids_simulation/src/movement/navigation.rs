//! Headless navigation — движение по прямой к MoveTo цели
//!
//! Host engine обычно сам ведёт актора по navmesh (Navigate / ClearDestination).
//! Без host этот plugin двигает акторов напрямую, по плоскости XZ, со скоростью Locomotion.

use bevy::prelude::*;

use crate::combat::Dead;
use crate::components::{Locomotion, NavigationCommand};
use crate::movement::DestinationReached;
use crate::steering::steer_survivors;
use crate::SimulationSet;

/// Headless Navigation Plugin
///
/// Регистрирует advance_navigation в SimulationSet::Move (после steer_survivors:
/// survivors читают позицию лидера этого же тика до его сдвига).
/// Не входит в SimulationPlugin: host с настоящим navmesh его не ставит.
pub struct HeadlessNavigationPlugin;

impl Plugin for HeadlessNavigationPlugin {
    fn build(&self, app: &mut App) {
        app.add_event::<DestinationReached>()
            .add_systems(
                FixedUpdate,
                advance_navigation
                    .in_set(SimulationSet::Move)
                    .after(steer_survivors),
            );
    }
}

/// Результат одного шага навигации
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum NavigationStep {
    /// Продолжаем идти: новая позиция + направление
    Moving { position: Vec3, heading: Vec3 },
    /// Цель достигнута в этом шаге
    Arrived { position: Vec3 },
}

/// Шаг к цели по плоскости XZ (высота актора не меняется)
pub fn navigation_step(position: Vec3, target: Vec3, speed: f32, delta: f32) -> NavigationStep {
    let offset = Vec3::new(target.x - position.x, 0.0, target.z - position.z);
    let distance = offset.length();
    let step = speed * delta;

    if distance <= step || distance <= f32::EPSILON {
        return NavigationStep::Arrived {
            position: Vec3::new(target.x, position.y, target.z),
        };
    }

    let heading = offset / distance;
    NavigationStep::Moving {
        position: position + heading * step,
        heading,
    }
}

/// Система: движение акторов с NavigationCommand::MoveTo
pub fn advance_navigation(
    time: Res<Time<Fixed>>,
    mut actors: Query<(Entity, &mut Transform, &mut NavigationCommand, &Locomotion), Without<Dead>>,
    mut reached_events: EventWriter<DestinationReached>,
) {
    let delta = time.delta_secs();
    if delta <= 0.0 {
        return;
    }

    for (entity, mut transform, mut command, locomotion) in actors.iter_mut() {
        let Some(target) = command.destination() else {
            continue;
        };

        match navigation_step(transform.translation, target, locomotion.move_speed, delta) {
            NavigationStep::Moving { position, heading } => {
                transform.translation = position;
                transform.look_to(heading, Vec3::Y);
            }
            NavigationStep::Arrived { position } => {
                transform.translation = position;
                *command = NavigationCommand::Idle;
                reached_events.write(DestinationReached { entity, position });
            }
        }
    }
}
