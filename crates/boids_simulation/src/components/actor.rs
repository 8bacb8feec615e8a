//! Базовые компоненты акторов: Actor, Faction, Health

use bevy::prelude::*;

use crate::combat::HealthDisplay;
use crate::components::ContactDamage;
use crate::error::{SimulationError, SimulationResult};

/// Фракция актора
///
/// Enemy враждебен Player и Survivor; Player и Survivor — союзники.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Reflect)]
pub enum Faction {
    Player,
    Survivor,
    Enemy,
}

impl Faction {
    pub fn is_hostile_to(self, other: Faction) -> bool {
        matches!(
            (self, other),
            (Faction::Enemy, Faction::Player)
                | (Faction::Enemy, Faction::Survivor)
                | (Faction::Player, Faction::Enemy)
                | (Faction::Survivor, Faction::Enemy)
        )
    }
}

/// Актор (игрок, survivor, враг) — базовый компонент для живых существ
///
/// Автоматически добавляет Health, ContactDamage, HealthDisplay и Transform через Required Components.
#[derive(Component, Debug, Clone, Copy, Reflect)]
#[reflect(Component)]
#[require(Health, ContactDamage, HealthDisplay, Transform)]
pub struct Actor {
    pub faction: Faction,
}

impl Actor {
    pub fn new(faction: Faction) -> Self {
        Self { faction }
    }
}

/// Здоровье актора
///
/// Инвариант: 0 ≤ current ≤ max, max > 0
#[derive(Component, Debug, Clone, Copy, PartialEq, Eq, Reflect)]
#[reflect(Component)]
pub struct Health {
    pub current: u32,
    pub max: u32,
}

impl Default for Health {
    fn default() -> Self {
        Self::new(100)
    }
}

/// Результат применения урона
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HealthChange {
    pub previous: u32,
    pub current: u32,
    /// true ровно один раз — на переходе alive → dead
    pub died: bool,
}

impl Health {
    /// `max` = 0 поднимается до 1 (иначе normalized() не определён)
    pub fn new(max: u32) -> Self {
        let max = max.max(1);
        Self { current: max, max }
    }

    pub fn is_alive(&self) -> bool {
        self.current > 0
    }

    /// current / max в [0, 1]
    pub fn normalized(&self) -> f32 {
        if self.max == 0 {
            return 0.0;
        }
        (self.current as f32 / self.max as f32).clamp(0.0, 1.0)
    }

    /// Применить урон (clamp в 0)
    ///
    /// Нулевой урон — ошибка вызывающего кода: возвращаем `InvalidDamageAmount`,
    /// здоровье не меняется.
    pub fn apply_damage(&mut self, amount: u32) -> SimulationResult<HealthChange> {
        if amount == 0 {
            return Err(SimulationError::InvalidDamageAmount { amount });
        }

        let previous = self.current;
        self.current = self.current.saturating_sub(amount);

        Ok(HealthChange {
            previous,
            current: self.current,
            died: previous > 0 && self.current == 0,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_health_damage() {
        let mut health = Health::new(100);
        assert_eq!(health.current, 100);

        let change = health.apply_damage(30).unwrap();
        assert_eq!(change.previous, 100);
        assert_eq!(health.current, 70);
        assert!(!change.died);
        assert!(health.is_alive());

        let change = health.apply_damage(100).unwrap(); // Saturating sub
        assert_eq!(health.current, 0);
        assert!(change.died);
        assert!(!health.is_alive());
    }

    #[test]
    fn test_death_transition_happens_once() {
        let mut health = Health::new(20);
        let deaths = (0..5)
            .map(|_| health.apply_damage(10).unwrap())
            .filter(|change| change.died)
            .count();

        assert_eq!(deaths, 1);
        assert_eq!(health.current, 0);
    }

    #[test]
    fn test_zero_damage_rejected() {
        let mut health = Health::new(100);
        let result = health.apply_damage(0);

        assert!(matches!(result, Err(SimulationError::InvalidDamageAmount { amount: 0 })));
        assert_eq!(health.current, 100);
    }

    #[test]
    fn test_health_stays_in_bounds() {
        let mut health = Health::new(55);
        for amount in [1, 7, 13, 40, 3, 99] {
            let _ = health.apply_damage(amount);
            assert!(health.current <= health.max);
            assert!((0.0..=1.0).contains(&health.normalized()));
        }
        assert_eq!(health.current, 0);
    }

    #[test]
    fn test_normalized() {
        let mut health = Health::new(100);
        assert_eq!(health.normalized(), 1.0);
        health.apply_damage(25).unwrap();
        assert_eq!(health.normalized(), 0.75);
        assert_eq!(Health::new(0).max, 1);
    }

    #[test]
    fn test_faction_hostility() {
        assert!(Faction::Enemy.is_hostile_to(Faction::Player));
        assert!(Faction::Enemy.is_hostile_to(Faction::Survivor));
        assert!(Faction::Survivor.is_hostile_to(Faction::Enemy));
        assert!(!Faction::Player.is_hostile_to(Faction::Survivor));
        assert!(!Faction::Enemy.is_hostile_to(Faction::Enemy));
    }
}
