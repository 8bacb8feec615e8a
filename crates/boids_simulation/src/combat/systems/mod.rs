//! Combat systems (contact damage, deaths, cleanup)

pub mod damage;


// Re-export all systems
pub use damage::*;
