//! Combat system module (contact damage)
//!
//! ECS ответственность:
//! - Game state: Health, ContactDamage, DamageCooldowns
//! - Combat rules: враждебность фракций, радиус контакта, cooldown на пару
//! - Events: DamageDealt, EntityDied, GameOver
//!
//! Host ответственность:
//! - Health bar: ориентация к камере, рендер (ядро публикует HealthDisplay)

use bevy::prelude::*;

pub mod cooldown;
pub mod damage;
pub mod display;
pub mod systems;

// Re-export основных типов
pub use cooldown::{CooldownKey, DamageCooldowns};
pub use damage::{DamageDealt, Dead, DespawnAfter, EntityDied, GameOver};
pub use display::{sync_health_display, HealthBarColors, HealthDisplay};
pub use systems::{apply_contact_damage, despawn_after_timeout, handle_deaths, prune_cooldowns};

use crate::config::SimulationConfig;
use crate::SimulationSet;

/// Combat Plugin
///
/// Порядок выполнения (FixedUpdate):
/// 1. apply_contact_damage — SimulationSet::Combat
/// 2. handle_deaths — Dead, FlockRegistry, GameOver
/// 3. prune_cooldowns — уборка записей мёртвых
/// 4. sync_health_display — SimulationSet::Present
/// 5. despawn_after_timeout — уборка трупов
pub struct CombatPlugin;

impl Plugin for CombatPlugin {
    fn build(&self, app: &mut App) {
        // Регистрация событий
        app.add_event::<DamageDealt>()
            .add_event::<EntityDied>()
            .add_event::<GameOver>();

        app.init_resource::<DamageCooldowns>()
            .init_resource::<HealthBarColors>()
            .init_resource::<SimulationConfig>();

        app.add_systems(
            FixedUpdate,
            (
                (apply_contact_damage, handle_deaths, prune_cooldowns)
                    .chain()
                    .in_set(SimulationSet::Combat),
                (sync_health_display, despawn_after_timeout)
                    .chain()
                    .in_set(SimulationSet::Present),
            ),
        );
    }
}
