//! AI decision-making module
//!
//! Явные FSM с guarded transitions:
//! - Survivor: Idle → Following (по дистанции до лидера), Dead терминальное
//! - Enemy: Idle ↔ Pursuing с hysteresis (detection_range / missing_range)

use bevy::prelude::*;

pub mod components;
pub mod events;
pub mod systems;

// Re-export основных типов
pub use components::{
    Highlight, PursuitAction, PursuitConfig, PursuitState, SurvivorAIConfig, SurvivorState,
};
pub use events::SurvivorRecruited;
pub use systems::{resolve_leader, update_enemy_pursuit, update_survivor_states, LeaderBinding};

use crate::SimulationSet;

/// AI Plugin
///
/// Порядок выполнения (FixedUpdate):
/// 1. resolve_leader — SimulationSet::Bind (один раз за прогон)
/// 2. update_survivor_states — SimulationSet::Decide
/// 3. update_enemy_pursuit — SimulationSet::Decide
pub struct AIPlugin;

impl Plugin for AIPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<LeaderBinding>()
            .add_event::<SurvivorRecruited>()
            .add_systems(
                FixedUpdate,
                (
                    resolve_leader.in_set(SimulationSet::Bind),
                    (update_survivor_states, update_enemy_pursuit)
                        .chain()
                        .in_set(SimulationSet::Decide),
                ),
            );
    }
}
