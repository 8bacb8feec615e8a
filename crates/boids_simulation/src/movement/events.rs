//! Movement events

use bevy::prelude::*;

/// Event: актор дошёл до точки NavigationCommand::MoveTo
///
/// Генерируется:
/// - advance_navigation (headless режим)
/// - host navmesh integration (если подключена)
#[derive(Event, Debug, Clone)]
pub struct DestinationReached {
    pub entity: Entity,
    pub position: Vec3,
}
