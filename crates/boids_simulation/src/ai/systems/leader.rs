//! Leader binding — разрешение лидера (Player) один раз за прогон.

use bevy::prelude::*;

use crate::components::Player;
use crate::error::SimulationError;

/// Resource: к какому entity привязаны survivors/enemies
///
/// `Missing` терминален: повторных попыток нет, зависимое поведение пропускается до конца прогона.
#[derive(Resource, Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LeaderBinding {
    #[default]
    Unresolved,
    Bound(Entity),
    Missing,
}

impl LeaderBinding {
    pub fn entity(&self) -> Option<Entity> {
        match self {
            LeaderBinding::Bound(entity) => Some(*entity),
            LeaderBinding::Unresolved | LeaderBinding::Missing => None,
        }
    }
}

/// Система: resolve leader на первом тике
pub fn resolve_leader(mut binding: ResMut<LeaderBinding>, players: Query<Entity, With<Player>>) {
    if *binding != LeaderBinding::Unresolved {
        return;
    }

    let mut candidates = players.iter();
    let Some(leader) = candidates.next() else {
        *binding = LeaderBinding::Missing;
        let error = SimulationError::MissingDependency { what: "actor tagged as Player (leader)" };
        crate::log_error(&format!("{error}; follow and pursuit disabled for this run"));
        return;
    };

    let extra = candidates.count();
    if extra > 0 {
        crate::log_warning(&format!("Leader: {} extra Player entities ignored, using {:?}", extra, leader));
    }

    *binding = LeaderBinding::Bound(leader);
    crate::log_info(&format!("Leader bound to {:?}", leader));
}
