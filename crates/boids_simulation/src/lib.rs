//! Boids Simulation Core
//!
//! ECS-симуляция на Bevy 0.16: flocking survivors вокруг игрока, враги с
//! hysteresis преследованием, контактный урон с cooldown на пару.
//!
//! Разделение ответственности:
//! - ECS = решения (куда двигаться, когда наносить урон, состояния акторов)
//! - Host = navmesh, raycast по геометрии сцены, рендер health bar
//!
//! Без host всё запускается headless: `create_headless_app` + `HeadlessNavigationPlugin`.

use bevy::prelude::*;
use bevy::time::TimeUpdateStrategy;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use std::time::Duration;

// Публичные модули
pub mod ai;
pub mod combat;
pub mod components;
pub mod config;
pub mod error;
pub mod logger;
pub mod movement;
pub mod spawn;
pub mod steering;

// Re-export базовых компонентов для удобства
pub use ai::{AIPlugin, LeaderBinding, PursuitConfig, PursuitState, SurvivorRecruited, SurvivorState};
pub use combat::{
    CombatPlugin, DamageCooldowns, DamageDealt, Dead, DespawnAfter, EntityDied, GameOver, HealthBarColors,
    HealthDisplay,
};
pub use components::*;
pub use config::SimulationConfig;
pub use error::{SimulationError, SimulationResult};
pub use logger::{init_logger, log, log_error, log_info, log_warning, set_log_level, set_logger, LogLevel, LogPrinter};
pub use movement::{DestinationReached, HeadlessNavigationPlugin};
pub use spawn::spawn_scene;
pub use steering::{FlockRegistry, ObstacleQuery, Obstacles, SteeringPlugin, StaticObstacles};

/// Частота FixedUpdate (Hz)
pub const SIMULATION_HZ: f64 = 60.0;

/// Фазы тика (FixedUpdate), выполняются строго по порядку
#[derive(SystemSet, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SimulationSet {
    /// Привязка лидера, регистрация в FlockRegistry
    Bind,
    /// FSM переходы (survivors, enemy pursuit)
    Decide,
    /// Steering + навигация
    Move,
    /// Контактный урон, смерти
    Combat,
    /// HealthDisplay, уборка трупов
    Present,
}

/// Главный plugin симуляции (объединяет все подсистемы)
#[derive(Default)]
pub struct SimulationPlugin {
    pub config: SimulationConfig,
}

impl SimulationPlugin {
    pub fn with_config(config: SimulationConfig) -> Self {
        Self { config }
    }

    /// Конфиг, собранный в коде, тоже валидируется: невалидный → лог + дефолты
    fn validated_config(&self) -> SimulationConfig {
        match self.config.validate() {
            Ok(()) => self.config.clone(),
            Err(err) => {
                log_error(&format!("❌ Invalid SimulationConfig ({}), falling back to defaults", err));
                SimulationConfig::default()
            }
        }
    }
}

impl Plugin for SimulationPlugin {
    fn build(&self, app: &mut App) {
        let config = self.validated_config();

        app
            // Fixed timestep 60Hz для simulation tick
            .insert_resource(Time::<Fixed>::from_hz(SIMULATION_HZ))
            .insert_resource(config.display.health_bar_colors())
            .insert_resource(config)
            .configure_sets(
                FixedUpdate,
                (
                    SimulationSet::Bind,
                    SimulationSet::Decide,
                    SimulationSet::Move,
                    SimulationSet::Combat,
                    SimulationSet::Present,
                )
                    .chain(),
            )
            // Подсистемы
            .add_plugins((AIPlugin, SteeringPlugin, CombatPlugin));
    }
}

/// Детерминистичный RNG resource (seeded)
#[derive(Resource)]
pub struct DeterministicRng {
    pub rng: ChaCha8Rng,
    pub seed: u64,
}

impl DeterministicRng {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: ChaCha8Rng::seed_from_u64(seed),
            seed,
        }
    }
}

/// Создаёт minimal Bevy App для headless симуляции (дефолтная конфигурация)
///
/// Каждый `app.update()` двигает часы ровно на один fixed step → один тик FixedUpdate.
/// Первый update только запускает часы (delta = 0), FixedUpdate в нём не выполняется.
pub fn create_headless_app(seed: u64) -> App {
    create_headless_app_with_config(seed, SimulationConfig::default())
}

pub fn create_headless_app_with_config(seed: u64, config: SimulationConfig) -> App {
    let mut app = App::new();
    init_logger();
    app.add_plugins(MinimalPlugins)
        .add_plugins(SimulationPlugin::with_config(config))
        .insert_resource(DeterministicRng::new(seed))
        .insert_resource(TimeUpdateStrategy::ManualDuration(Duration::from_secs_f64(
            1.0 / SIMULATION_HZ,
        )));

    app
}

/// Snapshot мира для сравнения детерминизма
pub fn world_snapshot<T: Component>(world: &mut World) -> Vec<u8>
where
    T: std::fmt::Debug,
{
    // Собираем все компоненты в детерминированный формат
    let mut snapshot = Vec::new();

    let mut query = world.query::<(Entity, &T)>();
    let mut entities: Vec<_> = query.iter(world).collect();

    // Сортируем по Entity ID для детерминизма
    entities.sort_by_key(|(entity, _)| entity.index());

    // Сериализуем в байты через Debug (простейший способ)
    for (entity, component) in entities {
        snapshot.extend_from_slice(&entity.index().to_le_bytes());
        snapshot.extend_from_slice(format!("{:?}", component).as_bytes());
    }

    snapshot
}
