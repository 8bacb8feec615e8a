//! DamageCooldowns — cooldown урона на пару (attacker, victim)
//!
//! Каждый атакующий копит свой cooldown против каждой жертвы независимо:
//! три врага рядом с survivor бьют его три раза за интервал, а не один.

use bevy::prelude::*;
use std::collections::HashMap;

/// Композитный ключ cooldown
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CooldownKey {
    pub attacker: Entity,
    pub victim: Entity,
}

impl CooldownKey {
    pub fn new(attacker: Entity, victim: Entity) -> Self {
        Self { attacker, victim }
    }
}

/// Resource: время последнего урона для каждой пары
///
/// Отсутствие записи ≡ «ещё не били» (cooldown выполнен).
/// Время хранится в f64 секундах: f32 теряет точность тика на длинных прогонах.
#[derive(Resource, Debug, Clone, Default)]
pub struct DamageCooldowns {
    last_damage: HashMap<CooldownKey, f64>,
}

impl DamageCooldowns {
    /// true (и запоминает `now`) если с прошлого урона прошло ≥ interval
    pub fn try_consume(&mut self, attacker: Entity, victim: Entity, now: f64, interval: f32) -> bool {
        let key = CooldownKey::new(attacker, victim);

        if let Some(&last) = self.last_damage.get(&key) {
            if now - last < f64::from(interval) {
                return false;
            }
        }

        self.last_damage.insert(key, now);
        true
    }

    pub fn last_damage_time(&self, attacker: Entity, victim: Entity) -> Option<f64> {
        self.last_damage.get(&CooldownKey::new(attacker, victim)).copied()
    }

    /// Удалить записи, для которых `keep` вернул false; возвращает количество удалённых
    pub fn retain(&mut self, mut keep: impl FnMut(&CooldownKey) -> bool) -> usize {
        let before = self.last_damage.len();
        self.last_damage.retain(|key, _| keep(key));
        before - self.last_damage.len()
    }

    pub fn len(&self) -> usize {
        self.last_damage.len()
    }

    pub fn is_empty(&self) -> bool {
        self.last_damage.is_empty()
    }
}
