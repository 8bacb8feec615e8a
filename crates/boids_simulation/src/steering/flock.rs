//! FlockRegistry — явный реестр живых survivors
//!
//! Survivor добавляется при появлении (Added<Survivor>) и удаляется при смерти/деспавне.
//! Separation читает весь реестр каждый тик.

use bevy::prelude::*;

/// Resource: множество живых survivors (порядок = порядок регистрации)
#[derive(Resource, Debug, Clone, Default)]
pub struct FlockRegistry {
    members: Vec<Entity>,
}

impl FlockRegistry {
    /// Возвращает false если entity уже в реестре
    pub fn insert(&mut self, entity: Entity) -> bool {
        if self.members.contains(&entity) {
            return false;
        }
        self.members.push(entity);
        true
    }

    /// Возвращает false если entity не было в реестре
    pub fn remove(&mut self, entity: Entity) -> bool {
        let before = self.members.len();
        self.members.retain(|&member| member != entity);
        before != self.members.len()
    }

    pub fn contains(&self, entity: Entity) -> bool {
        self.members.contains(&entity)
    }

    pub fn members(&self) -> &[Entity] {
        &self.members
    }

    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }
}
