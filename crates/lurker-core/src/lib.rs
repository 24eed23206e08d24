//! Core types and definitions for the lurker pursuit simulation.
//!
//! This crate defines the vocabulary shared across all other crates:
//! geometry and time types, perception feed records, tuning configuration,
//! events, presentation snapshots, and constants.
//! It has no dependency on any ECS or runtime framework.

pub mod config;
pub mod constants;
pub mod enums;
pub mod error;
pub mod events;
pub mod feed;
pub mod state;
pub mod types;

pub use glam::Vec3;
