//! FSM AI components: survivor (Idle → Following → Dead) и enemy pursuit (Idle ↔ Pursuing).

use bevy::prelude::*;

/// Состояния survivor
#[derive(Component, Debug, Clone, Copy, PartialEq, Eq, Default, Reflect)]
#[reflect(Component)]
pub enum SurvivorState {
    /// Начальное состояние: стоим, подсвечены, ждём лидера
    #[default]
    Idle,

    /// Следуем за лидером (обратного перехода в Idle нет)
    Following,

    /// Health == 0, терминальное
    Dead,
}

impl SurvivorState {
    /// Guarded transition по дистанции до лидера
    ///
    /// Idle → Following когда distance ≤ detection_range. Following и Dead не меняются.
    pub fn next(self, distance_to_leader: f32, detection_range: f32) -> SurvivorState {
        match self {
            SurvivorState::Idle if distance_to_leader <= detection_range => SurvivorState::Following,
            other => other,
        }
    }

    pub fn is_following(self) -> bool {
        self == SurvivorState::Following
    }
}

/// Подсветка survivor (видна пока он Idle)
#[derive(Component, Debug, Clone, Copy, PartialEq, Eq, Reflect)]
#[reflect(Component)]
pub struct Highlight {
    pub enabled: bool,
}

impl Default for Highlight {
    fn default() -> Self {
        Self { enabled: true }
    }
}

/// Параметры survivor AI
#[derive(Component, Debug, Clone, Copy, PartialEq, Reflect)]
#[reflect(Component)]
pub struct SurvivorAIConfig {
    /// Дистанция до лидера, на которой survivor присоединяется
    pub detection_range: f32,
}

impl Default for SurvivorAIConfig {
    fn default() -> Self {
        Self { detection_range: 5.0 }
    }
}

/// Режим преследования врага
#[derive(Component, Debug, Clone, Copy, PartialEq, Eq, Default, Reflect)]
#[reflect(Component)]
pub enum PursuitState {
    /// Пути нет
    #[default]
    Idle,
    /// Идём к лидеру
    Pursuing,
}

/// Что сделать с NavigationCommand после перехода
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PursuitAction {
    /// Navigate(leader position)
    Navigate,
    /// Ничего не трогаем (текущий путь сохраняется)
    Hold,
    /// ClearDestination
    Clear,
}

/// Параметры преследования (hysteresis: detection_range < missing_range)
#[derive(Component, Debug, Clone, Copy, PartialEq, Reflect)]
#[reflect(Component)]
pub struct PursuitConfig {
    /// Начинаем/обновляем преследование при distance ≤ detection_range
    pub detection_range: f32,
    /// Бросаем преследование только при distance > missing_range
    pub missing_range: f32,
}

impl Default for PursuitConfig {
    fn default() -> Self {
        Self {
            detection_range: 5.0,
            missing_range: 15.0,
        }
    }
}

impl PursuitState {
    /// Hysteresis transition
    ///
    /// | distance                  | Idle            | Pursuing          |
    /// |---------------------------|-----------------|-------------------|
    /// | ≤ detection               | Pursuing/Navigate | Pursuing/Navigate |
    /// | (detection, missing]      | Idle/Hold       | Pursuing/Hold     |
    /// | > missing                 | Idle/Hold       | Idle/Clear        |
    pub fn next(self, distance_to_leader: f32, config: &PursuitConfig) -> (PursuitState, PursuitAction) {
        if distance_to_leader <= config.detection_range {
            return (PursuitState::Pursuing, PursuitAction::Navigate);
        }

        match self {
            PursuitState::Pursuing if distance_to_leader > config.missing_range => {
                (PursuitState::Idle, PursuitAction::Clear)
            }
            state => (state, PursuitAction::Hold),
        }
    }
}
