//! ECS systems run by the engine each tick, in the order listed here.
//!
//! Systems are plain functions over `&mut World` (or `&World` when
//! read-only). Per-tick shared inputs are passed in explicitly.

pub mod target;
pub mod perception;
pub mod pursuit;
pub mod movement;
pub mod snapshot;
