//! Movement domain — навигация по NavigationCommand
//!
//! Содержит:
//! - DestinationReached (event прибытия)
//! - HeadlessNavigationPlugin (замена host navmesh для headless прогонов и тестов)

pub mod events;
pub mod navigation;

// Re-export all systems and events
pub use events::*;
pub use navigation::*;
