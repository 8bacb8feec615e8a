//! Headless симуляция Boids
//!
//! Запускает Bevy App без рендера: стартовая сцена, игрок ходит по заданному
//! маршруту, survivors собираются во flock, враги преследуют.

use std::path::PathBuf;
use std::process::ExitCode;

use bevy::prelude::*;
use clap::Parser;

use boids_simulation::{
    create_headless_app_with_config, log_error, log_info, log_warning, spawn_scene, Dead, Enemy, EntityDied,
    Faction, FlockRegistry, GameOver, Health, HeadlessNavigationPlugin, NavigationCommand, Obstacles, Player,
    SimulationConfig, SimulationSet, StaticObstacles, Survivor, SurvivorRecruited, SIMULATION_HZ,
};

/// Command line arguments for the simulation
#[derive(Parser, Debug)]
#[command(name = "boids_simulation")]
#[command(about = "Headless boids survival simulation")]
struct Args {
    /// Random seed for reproducibility
    #[arg(long, default_value_t = 42)]
    seed: u64,

    /// Number of ticks to simulate (60 ticks = 1 second)
    #[arg(long, default_value_t = 1000)]
    ticks: u64,

    /// Path to TOML config (defaults are used when omitted)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Interval between stats lines (in ticks)
    #[arg(long, default_value_t = 100)]
    report_interval: u64,
}

/// Маршрут игрока (вместо input)
#[derive(Resource, Debug)]
struct PatrolRoute {
    waypoints: Vec<Vec3>,
    next: usize,
}

/// Счётчики прогона
#[derive(Resource, Debug, Default)]
struct RunStats {
    recruited: u32,
    enemies_killed: u32,
    survivors_lost: u32,
    game_over: bool,
}

/// Система: игрок идёт к следующей точке маршрута, когда навигация свободна
fn drive_player_patrol(
    mut route: ResMut<PatrolRoute>,
    mut players: Query<&mut NavigationCommand, (With<Player>, Without<Dead>)>,
) {
    if route.waypoints.is_empty() {
        return;
    }

    for mut command in players.iter_mut() {
        if *command != NavigationCommand::Idle {
            continue;
        }

        let target = route.waypoints[route.next];
        route.next = (route.next + 1) % route.waypoints.len();
        *command = NavigationCommand::MoveTo { target };
    }
}

fn collect_stats(
    mut stats: ResMut<RunStats>,
    mut recruited: EventReader<SurvivorRecruited>,
    mut died: EventReader<EntityDied>,
    mut game_over: EventReader<GameOver>,
) {
    stats.recruited += recruited.read().count() as u32;

    for event in died.read() {
        match event.faction {
            Faction::Enemy => stats.enemies_killed += 1,
            Faction::Survivor => stats.survivors_lost += 1,
            Faction::Player => {}
        }
    }

    if game_over.read().next().is_some() {
        stats.game_over = true;
    }
}

fn report(app: &mut App, tick: u64) {
    let world = app.world_mut();
    let flock = world.resource::<FlockRegistry>().len();
    let enemies = world
        .query_filtered::<Entity, (With<Enemy>, Without<Dead>)>()
        .iter(world)
        .count();
    let survivors = world
        .query_filtered::<Entity, (With<Survivor>, Without<Dead>)>()
        .iter(world)
        .count();
    let player_health = world
        .query_filtered::<&Health, With<Player>>()
        .iter(world)
        .next()
        .map(|health| health.current)
        .unwrap_or(0);

    let stats = world.resource::<RunStats>();
    log_info(&format!(
        "Tick {} ({:.1}s): player HP {}, flock {}/{}, enemies {}, recruited {}, killed {}, lost {}",
        tick,
        tick as f64 / SIMULATION_HZ,
        player_health,
        flock,
        survivors,
        enemies,
        stats.recruited,
        stats.enemies_killed,
        stats.survivors_lost
    ));
}

fn main() -> ExitCode {
    let args = Args::parse();
    boids_simulation::init_logger();

    let config = match &args.config {
        Some(path) => match SimulationConfig::load(path) {
            Ok(config) => config,
            Err(error) => {
                log_error(&format!("Config error: {}", error));
                return ExitCode::FAILURE;
            }
        },
        None => SimulationConfig::default(),
    };

    log_info(&format!("Starting Boids headless simulation (seed: {}, ticks: {})", args.seed, args.ticks));

    let y = config.spawn.y_offset;
    let half_width = config.spawn.area_width * 0.5;
    let half_depth = config.spawn.area_depth * 0.5;

    let mut app = create_headless_app_with_config(args.seed, config);
    app.add_plugins(HeadlessNavigationPlugin)
        .insert_resource(Obstacles::new(
            StaticObstacles::new()
                .with_box(Vec3::new(0.0, 1.0, half_depth + 1.0), Vec3::new(half_width + 2.0, 1.0, 0.5))
                .with_box(Vec3::new(0.0, 1.0, -half_depth - 1.0), Vec3::new(half_width + 2.0, 1.0, 0.5)),
        ))
        .insert_resource(PatrolRoute {
            waypoints: vec![
                Vec3::new(half_width, y, half_depth),
                Vec3::new(-half_width, y, half_depth),
                Vec3::new(-half_width, y, -half_depth),
                Vec3::new(half_width, y, -half_depth),
            ],
            next: 0,
        })
        .init_resource::<RunStats>()
        .add_systems(Startup, spawn_scene)
        .add_systems(FixedUpdate, drive_player_patrol.in_set(SimulationSet::Decide))
        .add_systems(FixedUpdate, collect_stats.after(SimulationSet::Present));

    for tick in 0..args.ticks {
        app.update();

        if args.report_interval > 0 && tick % args.report_interval == 0 {
            report(&mut app, tick);
        }

        if app.world().resource::<RunStats>().game_over {
            log_warning(&format!("Simulation stopped at tick {}: player is dead", tick));
            break;
        }
    }

    report(&mut app, args.ticks);
    log_info("Simulation complete!");
    ExitCode::SUCCESS
}
