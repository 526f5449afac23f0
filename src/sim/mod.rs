//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed per-tick stepping only
//! - Seeded RNG only, threaded explicitly through maze generation
//! - No rendering, audio, or platform dependencies
//!
//! Side effects for the presentation layer (sound triggers, round
//! transitions) come out as [`GameEvent`]s drained after each tick.

pub mod collision;
pub mod maze;
pub mod state;
pub mod tick;

pub use collision::{CollisionResult, OrientedBox, collision, collision_possible};
pub use maze::{Maze, MazeCell, MazeGrid};
pub use state::{Bullet, Explosion, GameEvent, GameState, Tank, Wall};
pub use tick::{PlayerInput, TickInput, tick};
