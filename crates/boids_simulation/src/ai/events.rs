//! AI Events

use bevy::prelude::*;

/// Survivor присоединился к лидеру (Idle → Following)
#[derive(Event, Debug, Clone)]
pub struct SurvivorRecruited {
    pub survivor: Entity,
}
