//! Маркеры ролей: Player (лидер), Survivor, Enemy
//!
//! Заменяют tag lookup host engine: системы фильтруют `With<Player>` / `With<Survivor>` / `With<Enemy>`.

use bevy::prelude::Component;

use crate::ai::{PursuitConfig, PursuitState, SurvivorAIConfig, SurvivorState, Highlight};
use crate::components::{Locomotion, NavigationCommand};
use crate::steering::{SteeringConfig, SteeringState};

/// Marker component для лидера (игрок)
///
/// Survivors следуют за ним, враги преследуют его.
/// В single-player только один entity имеет этот компонент;
/// если их несколько — `resolve_leader` берёт первого и пишет warning.
#[derive(Component, Debug, Clone, Copy, Default)]
#[require(NavigationCommand, Locomotion)]
pub struct Player;

/// Marker component для survivor (участник flock)
#[derive(Component, Debug, Clone, Copy, Default)]
#[require(
    SurvivorState,
    Highlight,
    SurvivorAIConfig,
    SteeringConfig,
    SteeringState,
    Locomotion
)]
pub struct Survivor;

/// Marker component для врага
#[derive(Component, Debug, Clone, Copy, Default)]
#[require(PursuitState, PursuitConfig, NavigationCommand, Locomotion)]
pub struct Enemy;
