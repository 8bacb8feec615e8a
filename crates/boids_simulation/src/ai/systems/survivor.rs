//! Survivor FSM system (Idle → Following + highlight).

use bevy::prelude::*;

use crate::ai::{Highlight, LeaderBinding, SurvivorAIConfig, SurvivorRecruited, SurvivorState};
use crate::combat::Dead;
use crate::components::{Player, Survivor};

/// Система: survivor state transitions
///
/// - Idle и лидер в detection_range → Following, highlight выключается
/// - Idle с выключенным highlight → highlight включается обратно
pub fn update_survivor_states(
    leader: Res<LeaderBinding>,
    leaders: Query<&Transform, With<Player>>,
    mut survivors: Query<
        (Entity, &Transform, &SurvivorAIConfig, &mut SurvivorState, &mut Highlight),
        (With<Survivor>, Without<Dead>),
    >,
    mut recruited: EventWriter<SurvivorRecruited>,
) {
    let Some(leader_position) = leader
        .entity()
        .and_then(|entity| leaders.get(entity).ok())
        .map(|transform| transform.translation)
    else {
        return;
    };

    for (entity, transform, config, mut state, mut highlight) in survivors.iter_mut() {
        let distance = transform.translation.distance(leader_position);
        let next = state.next(distance, config.detection_range);

        if next != *state {
            *state = next;
            if next.is_following() {
                recruited.write(SurvivorRecruited { survivor: entity });
                crate::log_info(&format!("🤝 Survivor {:?} Idle → Following (distance {:.2})", entity, distance));
            }
        }

        let want_highlight = *state == SurvivorState::Idle;
        if highlight.enabled != want_highlight {
            highlight.enabled = want_highlight;
        }
    }
}
