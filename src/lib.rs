//! Maze Tanks - a four-player maze arena game
//!
//! Core modules:
//! - `sim`: Deterministic simulation (SAT collision, maze generation, game state)
//! - `config`: Data-driven game tuning
//!
//! Rendering, audio playback, asset loading, and input polling are external
//! collaborators: the sim exposes entity transforms and animation frames for a
//! presentation layer to draw, and emits [`sim::GameEvent`]s for it to dispatch
//! (sound triggers and round transitions). Nothing in this crate touches a
//! window, a GPU, or a controller.

pub mod config;
pub mod sim;

pub use config::GameConfig;
pub use sim::{GameState, TickInput, tick};

use glam::Vec2;

/// Fixed game constants (everything tunable lives in [`GameConfig`])
pub mod consts {
    /// Maximum simultaneous players (one tank per corner)
    pub const MAX_PLAYERS: usize = 4;
    /// Tread animation frames per tank
    pub const TANK_ANIM_FRAMES: u8 = 8;
    /// Simulation ticks between tread animation steps
    pub const TANK_ANIM_INTERVAL: u8 = 3;
    /// Frames in the explosion animation
    pub const EXPLOSION_FRAMES: u32 = 25;
}

/// Wrap an angle to [0, 2π)
#[inline]
pub fn wrap_angle(angle: f32) -> f32 {
    angle.rem_euclid(std::f32::consts::TAU)
}

/// Unit direction vector for a heading angle (radians)
#[inline]
pub fn heading(angle: f32) -> Vec2 {
    Vec2::new(angle.cos(), angle.sin())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f32::consts::{PI, TAU};

    #[test]
    fn test_wrap_angle() {
        assert!((wrap_angle(TAU + 0.5) - 0.5).abs() < 1e-6);
        assert!((wrap_angle(-0.5) - (TAU - 0.5)).abs() < 1e-6);
        assert_eq!(wrap_angle(0.0), 0.0);
    }

    #[test]
    fn test_heading() {
        assert!((heading(0.0) - Vec2::X).length() < 1e-6);
        assert!((heading(PI / 2.0) - Vec2::Y).length() < 1e-6);
    }
}
