//! Obstacle queries — raycast контракт к host physics
//!
//! ## Layers (битовая маска):
//! - Layer 2 (0b10 = 2): Actors
//! - Layer 3 (0b100 = 4): Environment (стены, препятствия)
//!
//! Host engine реализует `ObstacleQuery` поверх своей физики.
//! Headless режим: `StaticObstacles` — набор AABB коробок.

use bevy::math::bounding::{Aabb3d, BoundingVolume, RayCast3d};
use bevy::prelude::*;

/// Layer 2: Actors (players, survivors, enemies)
pub const COLLISION_LAYER_ACTORS: u32 = 0b10;

/// Layer 3: Environment (walls, obstacles)
pub const COLLISION_LAYER_ENVIRONMENT: u32 = 0b100;

/// Mask: obstacle avoidance смотрит только на environment
pub const COLLISION_MASK_OBSTACLES: u32 = COLLISION_LAYER_ENVIRONMENT;

/// Попадание луча
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RayHit {
    pub point: Vec3,
    pub normal: Vec3,
    pub distance: f32,
}

/// Raycast против геометрии сцены
///
/// `direction` может быть не нормализован; нулевое направление → `None`.
pub trait ObstacleQuery: Send + Sync + 'static {
    fn raycast(&self, origin: Vec3, direction: Vec3, max_distance: f32, mask: u32) -> Option<RayHit>;
}

/// Resource: текущая реализация ObstacleQuery
#[derive(Resource)]
pub struct Obstacles(Box<dyn ObstacleQuery>);

impl Obstacles {
    pub fn new(query: impl ObstacleQuery) -> Self {
        Self(Box::new(query))
    }

    pub fn raycast(&self, origin: Vec3, direction: Vec3, max_distance: f32, mask: u32) -> Option<RayHit> {
        self.0.raycast(origin, direction, max_distance, mask)
    }
}

impl Default for Obstacles {
    fn default() -> Self {
        Self::new(StaticObstacles::default())
    }
}

/// Статичная коробка-препятствие
#[derive(Debug, Clone, Copy)]
pub struct ObstacleBox {
    pub bounds: Aabb3d,
    pub layer: u32,
}

/// Headless реализация: список AABB
#[derive(Debug, Clone, Default)]
pub struct StaticObstacles {
    boxes: Vec<ObstacleBox>,
}

impl StaticObstacles {
    pub fn new() -> Self {
        Self::default()
    }

    /// Добавить коробку на environment слой
    pub fn with_box(mut self, center: Vec3, half_size: Vec3) -> Self {
        self.boxes.push(ObstacleBox {
            bounds: Aabb3d::new(center, half_size),
            layer: COLLISION_LAYER_ENVIRONMENT,
        });
        self
    }

    pub fn len(&self) -> usize {
        self.boxes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.boxes.is_empty()
    }
}

impl ObstacleQuery for StaticObstacles {
    fn raycast(&self, origin: Vec3, direction: Vec3, max_distance: f32, mask: u32) -> Option<RayHit> {
        let Ok(direction) = Dir3::new(direction) else {
            return None;
        };
        let ray = RayCast3d::new(origin, direction, max_distance);

        self.boxes
            .iter()
            .filter(|obstacle| obstacle.layer & mask != 0)
            .filter_map(|obstacle| {
                let distance = ray.aabb_intersection_at(&obstacle.bounds)?;
                let point = origin + *direction * distance;
                Some(RayHit {
                    point,
                    normal: box_face_normal(&obstacle.bounds, point),
                    distance,
                })
            })
            .min_by(|a, b| a.distance.total_cmp(&b.distance))
    }
}

/// Нормаль грани AABB в точке попадания (ось с наибольшим относительным смещением)
fn box_face_normal(bounds: &Aabb3d, point: Vec3) -> Vec3 {
    let center = Vec3::from(bounds.center());
    let half = Vec3::from(bounds.half_size()).max(Vec3::splat(f32::EPSILON));
    let local = (point - center) / half;
    let abs = local.abs();

    if abs.x >= abs.y && abs.x >= abs.z {
        Vec3::X * local.x.signum()
    } else if abs.y >= abs.z {
        Vec3::Y * local.y.signum()
    } else {
        Vec3::Z * local.z.signum()
    }
}
