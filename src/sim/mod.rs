//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Seeded RNG only
//! - Obstacles kept in spawn order
//! - No rendering or platform dependencies

pub mod clock;
pub mod collision;
pub mod physics;
pub mod scoring;
pub mod spawn;
pub mod state;
pub mod tick;

pub use clock::FrameClock;
pub use collision::{Verdict, detect, hits_obstacle};
pub use state::{Body, Obstacle, Phase, Run, Snapshot};
pub use tick::{GameEvent, TickInput, end_run, tick};
