//! Enemy pursuit system (hysteresis → NavigationCommand).

use bevy::prelude::*;

use crate::ai::{LeaderBinding, PursuitAction, PursuitConfig, PursuitState};
use crate::combat::Dead;
use crate::components::{Enemy, NavigationCommand, Player};

/// Система: enemy pursuit
///
/// Конвертирует PursuitState → NavigationCommand для host navmesh:
/// - Navigate: MoveTo(позиция лидера), обновляется каждый тик пока лидер в detection_range
/// - Hold: команда не трогается (путь к последней известной позиции сохраняется)
/// - Clear: Idle (только при выходе за missing_range)
pub fn update_enemy_pursuit(
    leader: Res<LeaderBinding>,
    leaders: Query<&Transform, With<Player>>,
    mut enemies: Query<
        (Entity, &Transform, &PursuitConfig, &mut PursuitState, &mut NavigationCommand),
        (With<Enemy>, Without<Dead>),
    >,
) {
    let Some(leader_position) = leader
        .entity()
        .and_then(|entity| leaders.get(entity).ok())
        .map(|transform| transform.translation)
    else {
        return;
    };

    for (entity, transform, config, mut state, mut command) in enemies.iter_mut() {
        let distance = transform.translation.distance(leader_position);
        let (next, action) = state.next(distance, config);

        if next != *state {
            crate::log(&format!("🏃 Enemy {:?}: {:?} → {:?} (distance {:.2})", entity, *state, next, distance));
            *state = next;
        }

        match action {
            PursuitAction::Navigate => {
                // Проверяем что команда изменилась — иначе Changed<NavigationCommand> спамит
                let desired = NavigationCommand::MoveTo { target: leader_position };
                if *command != desired {
                    *command = desired;
                }
            }
            PursuitAction::Hold => {}
            PursuitAction::Clear => {
                if *command != NavigationCommand::Idle {
                    *command = NavigationCommand::Idle;
                }
            }
        }
    }
}
