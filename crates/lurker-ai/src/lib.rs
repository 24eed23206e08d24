//! Decision layer for lurker agents.
//!
//! The smile gate budget, the patrol/pursuit/lockout state machine, and the
//! navigation contract it drives. No ECS dependency; operates on plain data
//! and a `Navigator` trait object supplied by the host.

pub use lurker_core as core;

pub mod fsm;
pub mod gate;
pub mod locomotion;
pub mod navigation;
pub mod timer;

pub use fsm::{AgentMemory, PursuitController, PursuitInput, PursuitOutput};
pub use gate::GateBudget;
pub use navigation::Navigator;

#[cfg(test)]
mod tests;
