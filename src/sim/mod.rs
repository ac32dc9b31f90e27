//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed per-frame integer steps only
//! - Seeded RNG only
//! - No rendering or platform dependencies

pub mod collision;
pub mod obstacle;
pub mod physics;
pub mod state;
pub mod tick;

pub use collision::{Hitbox, HitboxOwner, Shape, detect};
pub use obstacle::{ObstacleGenerator, ObstaclePair};
pub use state::{GameEvent, GameMode, GameState, PlayerState};
pub use tick::{TickInput, tick};
