//! AI systems (leader binding, survivor FSM, enemy pursuit).

pub mod enemy;
pub mod leader;
pub mod survivor;

// Re-export all systems
pub use enemy::*;
pub use leader::*;
pub use survivor::*;
