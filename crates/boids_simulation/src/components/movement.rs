//! Movement компоненты: скорость, команды навигации

use bevy::prelude::*;

/// Команда навигации для актора (выполняется host engine NavMesh agent)
///
/// Архитектура:
/// - ECS система пишет NavigationCommand (Navigate / ClearDestination)
/// - Host читает Changed<NavigationCommand> и ведёт актора по navmesh
/// - Headless режим: `HeadlessNavigationPlugin` двигает по прямой
#[derive(Component, Debug, Clone, Copy, PartialEq, Default, Reflect)]
#[reflect(Component)]
pub enum NavigationCommand {
    /// Нет пути (ClearDestination)
    #[default]
    Idle,
    /// Двигаться к точке (Navigate)
    MoveTo { target: Vec3 },
}

impl NavigationCommand {
    pub fn destination(&self) -> Option<Vec3> {
        match self {
            NavigationCommand::Idle => None,
            NavigationCommand::MoveTo { target } => Some(*target),
        }
    }
}

/// Параметры передвижения актора
#[derive(Component, Debug, Clone, Copy, PartialEq, Reflect)]
#[reflect(Component)]
pub struct Locomotion {
    /// Скорость движения (м/с)
    pub move_speed: f32,
    /// Скорость поворота (множитель интерполяции, 1/с)
    pub rotation_speed: f32,
}

impl Default for Locomotion {
    fn default() -> Self {
        Self {
            move_speed: 3.0,
            rotation_speed: 5.0,
        }
    }
}
