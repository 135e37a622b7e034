//! ECS Components для игровых entity
//!
//! Организация по доменам:
//! - actor: базовые характеристики (faction, attributes, hurtbox, capability маркеры)
//! - movement: AI команды движения, ввод игрока, ориентация
//! - equipment: оружие в руках и attachment к socket

pub mod actor;
pub mod equipment;
pub mod movement;

// Re-exports для удобного импорта
pub use actor::*;
pub use equipment::*;
pub use movement::*;
