//! Ошибки симуляции
//!
//! Фатальных ошибок в ядре нет: системы логируют и пропускают актора на этот тик.
//! `Result` возвращают только API вызовы (урон, загрузка конфига).

use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SimulationError {
    /// Нужный актор (например, лидер с тегом Player) не найден
    #[error("missing dependency: {what}")]
    MissingDependency { what: &'static str },

    /// Урон должен быть положительным целым
    #[error("invalid damage amount {amount}: damage must be a positive integer")]
    InvalidDamageAmount { amount: u32 },

    #[error("invalid config field `{field}`: {reason}")]
    InvalidConfig { field: &'static str, reason: String },

    #[error("failed to read config {path}: {source}")]
    ConfigIo {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config: {0}")]
    ConfigParse(#[from] toml::de::Error),
}

pub type SimulationResult<T> = Result<T, SimulationError>;
