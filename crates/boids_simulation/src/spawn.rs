//! Spawn акторов: bundles + стартовая сцена
//!
//! Сцена: один игрок, случайное число survivors и врагов (каждое в [min_count, max_count]),
//! равномерно по прямоугольной области вокруг начала координат. RNG — DeterministicRng,
//! одинаковый seed → одинаковая сцена.

use bevy::prelude::*;
use rand::Rng;

use crate::components::{Actor, Enemy, Faction, Player, Survivor};
use crate::config::{SimulationConfig, SpawnConfig};
use crate::DeterministicRng;

/// Bundle игрока (лидер flock)
pub fn player_bundle(config: &SimulationConfig, position: Vec3) -> impl Bundle {
    (
        Actor::new(Faction::Player),
        Player,
        Transform::from_translation(position),
        config.player.health(),
        config.player.locomotion(),
        config.player.contact_damage(),
    )
}

/// Bundle survivor (стартует в Idle, подсвечен)
pub fn survivor_bundle(config: &SimulationConfig, position: Vec3) -> impl Bundle {
    (
        Actor::new(Faction::Survivor),
        Survivor,
        Transform::from_translation(position),
        config.survivor.stats.health(),
        config.survivor.stats.locomotion(),
        config.survivor.stats.contact_damage(),
        config.survivor.ai(),
        config.steering,
    )
}

/// Bundle врага
pub fn enemy_bundle(config: &SimulationConfig, position: Vec3) -> impl Bundle {
    (
        Actor::new(Faction::Enemy),
        Enemy,
        Transform::from_translation(position),
        config.enemy.stats.health(),
        config.enemy.stats.locomotion(),
        config.enemy.stats.contact_damage(),
        config.enemy.pursuit(),
    )
}

/// Случайная точка в области спавна (y = y_offset)
pub fn random_spawn_point(spawn: &SpawnConfig, rng: &mut impl Rng) -> Vec3 {
    let half_width = spawn.area_width * 0.5;
    let half_depth = spawn.area_depth * 0.5;

    Vec3::new(
        rng.gen_range(-half_width..=half_width),
        spawn.y_offset,
        rng.gen_range(-half_depth..=half_depth),
    )
}

/// Число акторов одного типа в [min_count, max_count]
pub fn random_count(spawn: &SpawnConfig, rng: &mut impl Rng) -> u32 {
    rng.gen_range(spawn.min_count..=spawn.max_count)
}

/// Startup система: стартовая сцена
pub fn spawn_scene(
    mut commands: Commands,
    config: Res<SimulationConfig>,
    mut rng: ResMut<DeterministicRng>,
) {
    let spawn = &config.spawn;

    let player = commands.spawn(player_bundle(&config, spawn.player_position())).id();

    let survivor_count = random_count(spawn, &mut rng.rng);
    for _ in 0..survivor_count {
        let position = random_spawn_point(spawn, &mut rng.rng);
        commands.spawn(survivor_bundle(&config, position));
    }

    let enemy_count = random_count(spawn, &mut rng.rng);
    for _ in 0..enemy_count {
        let position = random_spawn_point(spawn, &mut rng.rng);
        commands.spawn(enemy_bundle(&config, position));
    }

    crate::log_info(&format!(
        "🌍 Scene spawned (seed {}): player {:?}, {} survivors, {} enemies",
        rng.seed, player, survivor_count, enemy_count
    ));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ai::{PursuitConfig, SurvivorState};
    use crate::components::{Health, Locomotion};
    use bevy::ecs::system::RunSystemOnce;

    fn spawn_with_seed(seed: u64, config: SimulationConfig) -> World {
        let mut world = World::new();
        world.insert_resource(config);
        world.insert_resource(DeterministicRng::new(seed));
        world.run_system_once(spawn_scene).expect("spawn_scene should run");
        world
    }

    fn count<T: Component>(world: &mut World) -> usize {
        world.query_filtered::<Entity, With<T>>().iter(world).count()
    }

    #[test]
    fn test_scene_counts_within_bounds() {
        for seed in 0..20 {
            let mut world = spawn_with_seed(seed, SimulationConfig::default());

            assert_eq!(count::<Player>(&mut world), 1);
            let survivors = count::<Survivor>(&mut world);
            let enemies = count::<Enemy>(&mut world);
            assert!((3..=8).contains(&survivors), "seed {seed}: {survivors} survivors");
            assert!((3..=8).contains(&enemies), "seed {seed}: {enemies} enemies");
        }
    }

    #[test]
    fn test_positions_inside_area() {
        let mut world = spawn_with_seed(7, SimulationConfig::default());

        let mut query = world.query_filtered::<&Transform, Without<Player>>();
        for transform in query.iter(&world) {
            let position = transform.translation;
            assert!(position.x.abs() <= 5.0 && position.z.abs() <= 5.0, "{position:?}");
            assert_eq!(position.y, 1.02);
        }
    }

    #[test]
    fn test_same_seed_same_scene() {
        let positions = |seed| {
            let mut world = spawn_with_seed(seed, SimulationConfig::default());
            let mut query = world.query::<(&Actor, &Transform)>();
            let mut result: Vec<(Faction, [f32; 3])> = query
                .iter(&world)
                .map(|(actor, transform)| (actor.faction, transform.translation.to_array()))
                .collect();
            result.sort_by(|a, b| a.1.partial_cmp(&b.1).unwrap_or(std::cmp::Ordering::Equal));
            result
        };

        assert_eq!(positions(42), positions(42));
        assert_ne!(positions(42), positions(43));
    }

    #[test]
    fn test_fixed_count_and_tuning_applied() {
        let mut config = SimulationConfig::default();
        config.spawn.min_count = 4;
        config.spawn.max_count = 4;
        config.enemy.stats.max_health = 40;
        config.enemy.missing_range = 30.0;
        config.survivor.stats.move_speed = 6.0;

        let mut world = spawn_with_seed(1, config);

        assert_eq!(count::<Survivor>(&mut world), 4);
        assert_eq!(count::<Enemy>(&mut world), 4);

        let mut enemies = world.query_filtered::<(&Health, &PursuitConfig), With<Enemy>>();
        for (health, pursuit) in enemies.iter(&world) {
            assert_eq!(*health, Health { current: 40, max: 40 });
            assert_eq!(pursuit.missing_range, 30.0);
        }

        let mut survivors = world.query_filtered::<(&Locomotion, &SurvivorState), With<Survivor>>();
        for (locomotion, state) in survivors.iter(&world) {
            assert_eq!(locomotion.move_speed, 6.0);
            assert_eq!(*state, SurvivorState::Idle);
        }
    }
}
