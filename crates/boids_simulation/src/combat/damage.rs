//! Damage события и death маркеры

use bevy::prelude::*;

use crate::components::Faction;

/// Событие: урон нанесен
///
/// Генерируется после применения damage к Health.
/// Используется для UI, звуков, эффектов.
#[derive(Event, Debug, Clone)]
pub struct DamageDealt {
    pub attacker: Entity,
    pub victim: Entity,
    pub amount: u32,
    pub remaining: u32,
    pub victim_died: bool,
}

/// Событие: entity умер (health → 0), ровно один раз на актора
#[derive(Event, Debug, Clone)]
pub struct EntityDied {
    pub entity: Entity,
    pub faction: Faction,
    pub killer: Option<Entity>,
}

/// Событие: игрок умер — терминальное состояние игры
///
/// Player не удаляется из мира, host решает что показать.
#[derive(Event, Debug, Clone)]
pub struct GameOver {
    pub player: Entity,
}

/// Компонент-маркер: entity мертв (Health == 0)
///
/// Мёртвые не двигаются, не получают и не наносят урон.
#[derive(Component, Debug)]
pub struct Dead;

/// Компонент-маркер: деспавн entity после указанного времени
///
/// Используется для уборки мёртвых врагов и survivors.
#[derive(Component, Debug)]
pub struct DespawnAfter {
    /// Время деспавна (секунды Time<Fixed>::elapsed)
    pub despawn_time: f32,
}
