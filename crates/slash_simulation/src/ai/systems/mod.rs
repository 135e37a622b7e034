//! AI systems (enemy FSM logic)

pub mod fsm;
pub mod lifecycle;
pub mod perception;
pub mod reactions;

// Re-export all systems
pub use fsm::*;
pub use lifecycle::*;
pub use perception::*;
pub use reactions::*;
