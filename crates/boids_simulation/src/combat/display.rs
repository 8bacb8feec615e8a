//! Health display — данные для presentation layer (health bar)
//!
//! Ядро публикует только fraction + цвет. Ориентация бара к камере, видимость
//! и сам рендер — забота host.

use bevy::color::Mix;
use bevy::prelude::*;

use crate::components::Health;

/// Цвета health bar (одинаковый закон для всех типов акторов)
#[derive(Resource, Debug, Clone, Copy, PartialEq)]
pub struct HealthBarColors {
    pub zero: Srgba,
    pub full: Srgba,
}

impl Default for HealthBarColors {
    fn default() -> Self {
        Self {
            zero: Srgba::RED,
            full: Srgba::GREEN,
        }
    }
}

impl HealthBarColors {
    /// Lerp zero → full по fraction (clamp [0, 1])
    pub fn color_at(&self, fraction: f32) -> Srgba {
        self.zero.mix(&self.full, fraction.clamp(0.0, 1.0))
    }
}

/// SetHealthFraction / SetHealthColor в виде данных
#[derive(Component, Debug, Clone, Copy, PartialEq)]
pub struct HealthDisplay {
    pub fraction: f32,
    pub color: Srgba,
}

impl Default for HealthDisplay {
    fn default() -> Self {
        Self {
            fraction: 1.0,
            color: HealthBarColors::default().full,
        }
    }
}

/// Система: Health → HealthDisplay (только для изменившихся)
pub fn sync_health_display(
    colors: Res<HealthBarColors>,
    mut query: Query<(&Health, &mut HealthDisplay), Changed<Health>>,
) {
    for (health, mut display) in query.iter_mut() {
        let fraction = health.normalized();
        display.fraction = fraction;
        display.color = colors.color_at(fraction);
    }
}
