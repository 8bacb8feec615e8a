//! Combat компоненты

use bevy::prelude::*;

/// Контактный урон, который актор ПОЛУЧАЕТ от враждебных акторов
///
/// Каждый враждебный актор в радиусе `range` наносит `amount` урона
/// не чаще чем раз в `interval` секунд (cooldown на пару attacker → victim).
#[derive(Component, Debug, Clone, Copy, PartialEq, Reflect)]
#[reflect(Component)]
pub struct ContactDamage {
    /// Радиус контакта (метры)
    pub range: f32,
    /// Интервал между ударами одного атакующего (секунды)
    pub interval: f32,
    /// Урон за удар
    pub amount: u32,
}

impl Default for ContactDamage {
    fn default() -> Self {
        Self {
            range: 2.0,
            interval: 1.0,
            amount: 10,
        }
    }
}
