//! Flocking математика (чистые функции, без ECS)
//!
//! Итоговый heading survivor = normalize(follow' + separation_smooth × weight), где:
//! - follow = planar направление к точке позади лидера
//! - follow' = follow, подтянутый к avoidance direction (если луч упёрся в препятствие)
//! - separation_smooth = сглаженный (lerp) separation vector
//!
//! Ориентация сглаживается к heading, позиция двигается вдоль сглаженного forward.

use bevy::prelude::*;

use crate::steering::obstacles::RayHit;
use crate::steering::{SteeringConfig, SteeringState};

/// Clamp [0, 1] — все lerp факторы `dt × rate` насыщаются на 1
#[inline]
pub fn clamp01(value: f32) -> f32 {
    value.clamp(0.0, 1.0)
}

/// Обнулить вертикаль (steering планарный)
#[inline]
pub fn planar(v: Vec3) -> Vec3 {
    Vec3::new(v.x, 0.0, v.z)
}

/// Точка следования: позиция лидера минус его forward × follow_distance
pub fn follow_target_point(leader_position: Vec3, leader_forward: Vec3, follow_distance: f32) -> Vec3 {
    leader_position - leader_forward * follow_distance
}

/// Нормализованное планарное направление from → to (ноль если совпадают)
pub fn planar_direction(from: Vec3, to: Vec3) -> Vec3 {
    planar(to - from).normalize_or_zero()
}

/// Сила separation: линейный спад, 1 при distance → 0, 0 на границе
pub fn separation_strength(distance: f32, separation_distance: f32) -> f32 {
    if separation_distance <= 0.0 {
        return 0.0;
    }
    clamp01(1.0 - distance / separation_distance)
}

/// Сумма вкладов соседей внутри (epsilon, separation_distance) и их количество
fn accumulate_separation(
    position: Vec3,
    neighbors: impl IntoIterator<Item = Vec3>,
    separation_distance: f32,
    epsilon: f32,
) -> (Vec3, usize) {
    let mut sum = Vec3::ZERO;
    let mut count = 0;

    for other in neighbors {
        let diff = position - other;
        let distance = diff.length();

        if distance < separation_distance && distance > epsilon {
            sum += diff.normalize() * separation_strength(distance, separation_distance);
            count += 1;
        }
    }

    (sum, count)
}

/// Separation vector: средний вклад соседей, нормализованный
///
/// Нет соседей в радиусе → `Vec3::ZERO`.
pub fn separation_vector(
    position: Vec3,
    neighbors: impl IntoIterator<Item = Vec3>,
    separation_distance: f32,
    epsilon: f32,
) -> Vec3 {
    let (sum, count) = accumulate_separation(position, neighbors, separation_distance, epsilon);
    if count == 0 {
        return Vec3::ZERO;
    }
    (sum / count as f32).normalize_or_zero()
}

/// Idle separation: сырая сумма (без усреднения), направление выталкивания
pub fn idle_separation_force(
    position: Vec3,
    neighbors: impl IntoIterator<Item = Vec3>,
    separation_distance: f32,
    epsilon: f32,
) -> Vec3 {
    accumulate_separation(position, neighbors, separation_distance, epsilon).0
}

/// Lerp current → target с фактором clamp01(rate × delta)
pub fn smooth_toward(current: Vec3, target: Vec3, rate: f32, delta: f32) -> Vec3 {
    current.lerp(target, clamp01(rate * delta))
}

/// Отражение forward относительно нормали препятствия, планарно, нормализовано
pub fn avoidance_direction(forward: Vec3, normal: Vec3) -> Vec3 {
    let reflected = forward - 2.0 * forward.dot(normal) * normal;
    planar(reflected).normalize_or_zero()
}

/// Подтянуть follow к avoidance (чем дольше препятствие видно — тем сильнее)
pub fn apply_avoidance(follow: Vec3, avoidance: Vec3, avoid_force: f32, delta: f32) -> Vec3 {
    follow.lerp(avoidance, clamp01(delta * avoid_force))
}

/// Итоговый heading: follow + separation × weight, нормализованный
pub fn blend_heading(follow: Vec3, separation: Vec3, separation_weight: f32) -> Vec3 {
    (follow + separation * separation_weight).normalize_or_zero()
}

/// Per-tick результат steering (не сохраняется между тиками)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SteeringSample {
    /// Итоговый желаемый heading
    pub desired: Vec3,
    /// Сглаженный forward (планарный, не нормализованный)
    pub smoothed_forward: Vec3,
}

/// Шаг движения (None = вырожденный heading, тик пропускается)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MotionStep {
    pub forward: Vec3,
    pub translation: Vec3,
}

/// Входные данные follow steering для одного актора
#[derive(Debug, Clone, Copy)]
pub struct FollowInput {
    pub position: Vec3,
    pub forward: Vec3,
    pub leader_position: Vec3,
    pub leader_forward: Vec3,
    pub move_speed: f32,
    pub rotation_speed: f32,
    pub delta: f32,
    /// Результат forward raycast (если был hit)
    pub obstacle_hit: Option<RayHit>,
}

/// Полный шаг follow steering
///
/// Обновляет `state.separation_smooth`, возвращает sample и (если heading невырожденный) шаг движения.
pub fn follow_step(
    config: &SteeringConfig,
    state: &mut SteeringState,
    input: &FollowInput,
    neighbors: impl IntoIterator<Item = Vec3>,
) -> (SteeringSample, Option<MotionStep>) {
    let target = follow_target_point(input.leader_position, input.leader_forward, config.follow_distance);
    let mut follow = planar_direction(input.position, target);

    let separation = separation_vector(
        input.position,
        neighbors,
        config.separation_distance,
        config.neighbor_epsilon,
    );
    state.separation_smooth = smooth_toward(
        state.separation_smooth,
        separation,
        config.separation_blend_rate,
        input.delta,
    );

    if let Some(hit) = input.obstacle_hit {
        let avoidance = avoidance_direction(input.forward, hit.normal);
        follow = apply_avoidance(follow, avoidance, config.avoid_force, input.delta);
    }

    let desired = blend_heading(follow, state.separation_smooth, config.separation_weight);
    let smoothed_forward = planar(smooth_toward(input.forward, desired, input.rotation_speed, input.delta));

    let sample = SteeringSample {
        desired,
        smoothed_forward,
    };

    if smoothed_forward.length_squared() <= config.min_heading_sqr {
        return (sample, None);
    }

    let step = MotionStep {
        forward: smoothed_forward,
        translation: smoothed_forward * input.move_speed * input.delta,
    };
    (sample, Some(step))
}

/// Idle шаг: только separation, прямо в позицию, половинная скорость, без поворота
pub fn idle_step(
    config: &SteeringConfig,
    position: Vec3,
    neighbors: impl IntoIterator<Item = Vec3>,
    move_speed: f32,
    delta: f32,
) -> Option<Vec3> {
    let force = idle_separation_force(
        position,
        neighbors,
        config.separation_distance,
        config.neighbor_epsilon,
    );

    if force.length_squared() <= config.idle_min_force_sqr {
        return None;
    }

    Some(force.normalize() * move_speed * config.idle_speed_factor * delta)
}

#[cfg(test)]
mod tests {
    use super::*;

    const DT: f32 = 1.0 / 60.0;

    fn follow_input(position: Vec3, forward: Vec3) -> FollowInput {
        FollowInput {
            position,
            forward,
            leader_position: Vec3::ZERO,
            leader_forward: Vec3::Z,
            move_speed: 3.0,
            rotation_speed: 5.0,
            delta: DT,
            obstacle_hit: None,
        }
    }

    #[test]
    fn test_follow_target_behind_leader() {
        let target = follow_target_point(Vec3::ZERO, Vec3::Z, 3.0);
        assert_eq!(target, Vec3::new(0.0, 0.0, -3.0));

        // Follower в (0,0,-5) → тянется к +Z
        let follow = planar_direction(Vec3::new(0.0, 0.0, -5.0), target);
        assert_eq!(follow, Vec3::Z);
    }

    #[test]
    fn test_follow_direction_is_planar() {
        let follow = planar_direction(Vec3::new(0.0, 5.0, 0.0), Vec3::new(3.0, -2.0, 4.0));
        assert_eq!(follow.y, 0.0);
        assert!((follow.length() - 1.0).abs() < 1e-5);
        assert!((follow - Vec3::new(0.6, 0.0, 0.8)).length() < 1e-5);
    }

    #[test]
    fn test_lone_actor_has_zero_separation() {
        let alone = separation_vector(Vec3::ZERO, [], 1.5, 0.01);
        assert_eq!(alone, Vec3::ZERO);

        let far = separation_vector(Vec3::ZERO, [Vec3::new(5.0, 0.0, 0.0)], 1.5, 0.01);
        assert_eq!(far, Vec3::ZERO);
    }

    #[test]
    fn test_separation_strength_falloff() {
        let sd = 1.5;
        assert_eq!(separation_strength(sd, sd), 0.0);
        assert_eq!(separation_strength(2.0 * sd, sd), 0.0);
        assert!((separation_strength(0.0, sd) - 1.0).abs() < 1e-6);

        let mut previous = f32::INFINITY;
        for i in 0..=30 {
            let strength = separation_strength(i as f32 * 0.05, sd);
            assert!(strength <= previous, "strength must not grow with distance");
            previous = strength;
        }
    }

    #[test]
    fn test_two_survivors_push_apart() {
        let a = Vec3::ZERO;
        let b = Vec3::new(0.0, 0.0, 1.0);

        assert!((separation_strength(a.distance(b), 1.5) - 1.0 / 3.0).abs() < 1e-5);

        let push_a = separation_vector(a, [b], 1.5, 0.01);
        let push_b = separation_vector(b, [a], 1.5, 0.01);
        assert!((push_a - Vec3::NEG_Z).length() < 1e-5);
        assert!((push_b - Vec3::Z).length() < 1e-5);
    }

    #[test]
    fn test_coincident_neighbor_ignored() {
        let push = separation_vector(Vec3::ZERO, [Vec3::new(0.001, 0.0, 0.0)], 1.5, 0.01);
        assert_eq!(push, Vec3::ZERO);
    }

    #[test]
    fn test_separation_is_averaged_then_normalized() {
        let push = separation_vector(
            Vec3::ZERO,
            [Vec3::new(1.0, 0.0, 0.0), Vec3::new(0.0, 0.0, 0.5)],
            1.5,
            0.01,
        );
        assert!((push.length() - 1.0).abs() < 1e-5);
        assert!(push.x < 0.0 && push.z < 0.0);
        // Ближний сосед (z) толкает сильнее
        assert!(push.z.abs() > push.x.abs());
    }

    #[test]
    fn test_smoothing_lags_and_saturates() {
        let half = smooth_toward(Vec3::ZERO, Vec3::X, 5.0, 0.1);
        assert!((half - Vec3::new(0.5, 0.0, 0.0)).length() < 1e-5);

        let saturated = smooth_toward(Vec3::ZERO, Vec3::X, 5.0, 10.0);
        assert_eq!(saturated, Vec3::X);
    }

    #[test]
    fn test_avoidance_reflects_about_normal() {
        // Стена прямо впереди (нормаль к нам) под углом 45°
        let normal = Vec3::new(-1.0, 0.0, -1.0).normalize();
        let avoid = avoidance_direction(Vec3::Z, normal);
        assert!((avoid - Vec3::NEG_X).length() < 1e-5, "avoid = {avoid:?}");

        let follow = apply_avoidance(Vec3::Z, avoid, 5.0, 0.1);
        assert!((follow - Vec3::new(-0.5, 0.0, 0.5)).length() < 1e-5);
    }

    #[test]
    fn test_follow_step_moves_toward_target() {
        let config = SteeringConfig::default();
        let mut state = SteeringState::default();
        let input = follow_input(Vec3::new(0.0, 0.0, -5.0), Vec3::Z);

        let (sample, step) = follow_step(&config, &mut state, &input, []);
        let step = step.expect("non-degenerate heading");

        assert_eq!(sample.desired, Vec3::Z);
        assert_eq!(state.separation_smooth, Vec3::ZERO);
        assert!(step.translation.z > 0.0);
        assert!((step.translation.length() - 3.0 * DT).abs() < 1e-5);
    }

    #[test]
    fn test_follow_step_separation_is_minority_and_smoothed() {
        let config = SteeringConfig::default();
        let mut state = SteeringState::default();
        let input = follow_input(Vec3::new(0.0, 0.0, -5.0), Vec3::Z);

        // Сосед слева — separation толкает вправо (+X)
        let neighbor = Vec3::new(-0.5, 0.0, -5.0);
        let (first, _) = follow_step(&config, &mut state, &input, [neighbor]);
        let smoothed_once = state.separation_smooth;
        assert!(smoothed_once.x > 0.0 && smoothed_once.x < 1.0, "separation must lag");

        let (second, _) = follow_step(&config, &mut state, &input, [neighbor]);
        assert!(state.separation_smooth.x > smoothed_once.x);
        assert!(second.desired.x > first.desired.x);
        // Follow доминирует
        assert!(second.desired.z > second.desired.x);
    }

    #[test]
    fn test_follow_step_degenerate_heading_skips() {
        let config = SteeringConfig::default();
        let mut state = SteeringState::default();
        // Уже на точке следования, forward смотрит строго вверх → планарный forward нулевой
        let mut input = follow_input(Vec3::new(0.0, 0.0, -3.0), Vec3::Y);
        input.rotation_speed = 0.0;

        let (_, step) = follow_step(&config, &mut state, &input, []);
        assert!(step.is_none());
    }

    #[test]
    fn test_follow_step_avoidance_bends_heading() {
        let config = SteeringConfig::default();
        let mut state = SteeringState::default();
        let mut input = follow_input(Vec3::new(0.0, 0.0, -10.0), Vec3::Z);
        input.obstacle_hit = Some(RayHit {
            point: Vec3::new(0.0, 0.5, -8.5),
            normal: Vec3::new(-1.0, 0.0, -1.0).normalize(),
            distance: 1.5,
        });

        let (sample, _) = follow_step(&config, &mut state, &input, []);
        assert!(sample.desired.x < 0.0, "heading should bend away: {:?}", sample.desired);
        assert!(sample.desired.z > 0.0);
    }

    #[test]
    fn test_idle_step_half_speed_push() {
        let config = SteeringConfig::default();
        let step = idle_step(&config, Vec3::ZERO, [Vec3::new(0.0, 0.0, 1.0)], 3.0, DT)
            .expect("neighbor inside separation radius");

        assert!(step.z < 0.0);
        assert!((step.length() - 3.0 * 0.5 * DT).abs() < 1e-6);

        assert!(idle_step(&config, Vec3::ZERO, [Vec3::new(0.0, 0.0, 3.0)], 3.0, DT).is_none());
    }
}
