//! ECS Components для игровых entity
//!
//! Организация по доменам:
//! - actor: базовые характеристики (faction, health)
//! - combat: контактный урон (ContactDamage)
//! - movement: навигация и перемещение (NavigationCommand, Locomotion)
//! - player: маркеры ролей (Player, Survivor, Enemy)

pub mod actor;
pub mod combat;
pub mod movement;
pub mod player;

// Re-exports для удобного импорта
pub use actor::*;
pub use combat::*;
pub use movement::*;
pub use player::*;
