//! Contact damage, death handling и уборка мёртвых.

use bevy::prelude::*;
use std::collections::HashMap;

use crate::ai::{PursuitState, SurvivorState};
use crate::combat::{DamageCooldowns, DamageDealt, Dead, DespawnAfter, EntityDied, GameOver};
use crate::components::{Actor, ContactDamage, Faction, Health, NavigationCommand};
use crate::config::SimulationConfig;
use crate::steering::FlockRegistry;

/// Snapshot актора на начало тика (позиции не меняются внутри combat фазы)
#[derive(Debug, Clone, Copy)]
struct Combatant {
    entity: Entity,
    faction: Faction,
    position: Vec3,
    contact: ContactDamage,
    /// Idle survivors урон не получают (ещё не в отряде)
    vulnerable: bool,
}

/// Может ли актор получать контактный урон в текущем состоянии
fn is_vulnerable(faction: Faction, survivor_state: Option<&SurvivorState>) -> bool {
    match faction {
        Faction::Survivor => matches!(survivor_state, Some(SurvivorState::Following)),
        Faction::Player | Faction::Enemy => true,
    }
}

/// Система: контактный урон между враждебными фракциями
///
/// Для каждой жертвы: каждый враждебный живой актор в радиусе `ContactDamage::range`
/// жертвы наносит `amount` не чаще раза в `interval` (cooldown на пару).
/// Умерший в этом тике больше не бьёт и не получает урон.
pub fn apply_contact_damage(
    time: Res<Time<Fixed>>,
    mut cooldowns: ResMut<DamageCooldowns>,
    mut actors: Query<
        (Entity, &Actor, &Transform, &ContactDamage, &mut Health, Option<&SurvivorState>),
        Without<Dead>,
    >,
    mut damage_events: EventWriter<DamageDealt>,
) {
    let now = time.elapsed_secs_f64();

    let combatants: Vec<Combatant> = actors
        .iter()
        .filter(|(_, _, _, _, health, _)| health.is_alive())
        .map(|(entity, actor, transform, contact, _, survivor_state)| Combatant {
            entity,
            faction: actor.faction,
            position: transform.translation,
            contact: *contact,
            vulnerable: is_vulnerable(actor.faction, survivor_state),
        })
        .collect();

    let mut alive = vec![true; combatants.len()];

    for (victim_index, victim) in combatants.iter().enumerate() {
        if !victim.vulnerable {
            continue;
        }

        for (attacker_index, attacker) in combatants.iter().enumerate() {
            if !alive[victim_index] {
                break;
            }
            if !alive[attacker_index]
                || attacker.entity == victim.entity
                || !attacker.faction.is_hostile_to(victim.faction)
            {
                continue;
            }

            let distance = attacker.position.distance(victim.position);
            if distance > victim.contact.range {
                continue;
            }

            if !cooldowns.try_consume(attacker.entity, victim.entity, now, victim.contact.interval) {
                continue;
            }

            let Ok((_, _, _, _, mut health, _)) = actors.get_mut(victim.entity) else {
                continue;
            };

            match health.apply_damage(victim.contact.amount) {
                Ok(change) => {
                    crate::log(&format!(
                        "💥 {:?} → {:?}: -{} HP ({} → {})",
                        attacker.entity, victim.entity, victim.contact.amount, change.previous, change.current
                    ));

                    damage_events.write(DamageDealt {
                        attacker: attacker.entity,
                        victim: victim.entity,
                        amount: victim.contact.amount,
                        remaining: change.current,
                        victim_died: change.died,
                    });

                    if change.died {
                        alive[victim_index] = false;
                    }
                }
                Err(error) => {
                    crate::log_warning(&format!("Contact damage {:?} → {:?} skipped: {}", attacker.entity, victim.entity, error));
                }
            }
        }
    }
}

/// Система: переход в Dead
///
/// Ловит всех акторов с Health == 0 без маркера Dead (урон мог прийти и от host):
/// - Player: GameOver, из мира не удаляется
/// - Survivor: SurvivorState::Dead, удаление из FlockRegistry, деспавн по таймеру
/// - Enemy: навигация сбрасывается, деспавн по таймеру
///
/// EntityDied пишется ровно один раз — Dead исключает актора из query на следующих тиках.
pub fn handle_deaths(
    mut commands: Commands,
    time: Res<Time<Fixed>>,
    config: Res<SimulationConfig>,
    mut registry: ResMut<FlockRegistry>,
    mut damage_events: EventReader<DamageDealt>,
    mut dying: Query<
        (
            Entity,
            &Actor,
            &Health,
            Option<&mut SurvivorState>,
            Option<&mut PursuitState>,
            Option<&mut NavigationCommand>,
        ),
        Without<Dead>,
    >,
    mut died_events: EventWriter<EntityDied>,
    mut game_over_events: EventWriter<GameOver>,
) {
    let killers: HashMap<Entity, Entity> = damage_events
        .read()
        .filter(|event| event.victim_died)
        .map(|event| (event.victim, event.attacker))
        .collect();

    let despawn_time = time.elapsed_secs() + config.corpse_linger_secs;

    for (entity, actor, health, survivor_state, pursuit_state, navigation) in dying.iter_mut() {
        if health.is_alive() {
            continue;
        }

        let killer = killers.get(&entity).copied();

        if let Some(mut navigation) = navigation {
            *navigation = NavigationCommand::Idle;
        }

        match actor.faction {
            Faction::Player => {
                crate::log_warning(&format!("☠️ GAME OVER: player {:?} died (killer {:?})", entity, killer));
                game_over_events.write(GameOver { player: entity });
                commands.entity(entity).insert(Dead);
            }
            Faction::Survivor => {
                if let Some(mut state) = survivor_state {
                    *state = SurvivorState::Dead;
                }
                registry.remove(entity);

                crate::log_info(&format!("💀 Survivor {:?} died ({} left in flock)", entity, registry.len()));
                commands.entity(entity).insert((Dead, DespawnAfter { despawn_time }));
            }
            Faction::Enemy => {
                if let Some(mut state) = pursuit_state {
                    *state = PursuitState::Idle;
                }

                crate::log_info(&format!("💀 Enemy {:?} died (killer {:?})", entity, killer));
                commands.entity(entity).insert((Dead, DespawnAfter { despawn_time }));
            }
        }

        died_events.write(EntityDied {
            entity,
            faction: actor.faction,
            killer,
        });
    }
}

/// Система: уборка cooldown записей мёртвых/удалённых акторов
pub fn prune_cooldowns(
    mut cooldowns: ResMut<DamageCooldowns>,
    living: Query<(), (With<Actor>, Without<Dead>)>,
) {
    if cooldowns.is_empty() {
        return;
    }

    let removed = cooldowns.retain(|key| living.contains(key.attacker) && living.contains(key.victim));
    if removed > 0 {
        crate::log(&format!("🧹 Pruned {} cooldown entries ({} left)", removed, cooldowns.len()));
    }
}

/// Система: деспавн entities с истёкшим DespawnAfter timeout
pub fn despawn_after_timeout(
    mut commands: Commands,
    time: Res<Time<Fixed>>,
    query: Query<(Entity, &DespawnAfter)>,
) {
    let current_time = time.elapsed_secs();

    for (entity, despawn_after) in query.iter() {
        if current_time >= despawn_after.despawn_time {
            if let Ok(mut entity_commands) = commands.get_entity(entity) {
                crate::log(&format!("⚰️ Despawning entity {:?} (timeout)", entity));
                entity_commands.despawn();
            }
        }
    }
}
