//! AI components

pub mod fsm;
pub mod sensing;


// Re-export all components
pub use fsm::*;
pub use sensing::*;
