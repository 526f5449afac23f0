//! Data-driven game tuning
//!
//! Every gameplay number that is reasonable to tweak lives in [`GameConfig`].
//! Defaults reproduce the classic balance: a 640x480 arena split into an 8x6
//! maze with 8px walls, 6 shots per tank.

use std::error::Error;
use std::path::Path;

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Tunable game parameters
///
/// All angles are true radians, all speeds are per simulation tick.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Playfield width in world units
    pub arena_width: f32,
    /// Playfield height in world units
    pub arena_height: f32,
    /// Maze columns
    pub maze_cols: usize,
    /// Maze rows
    pub maze_rows: usize,
    /// Wall thickness in world units
    pub wall_thickness: f32,
    /// Number of tanks spawned per round (2-4)
    pub players: usize,
    /// Max live bullets per tank
    pub tank_ammo: u32,
    /// Tank collision box half extents
    pub tank_half_extents: Vec2,
    /// Tank forward/backward speed per tick
    pub tank_move_speed: f32,
    /// Tank turn rate (radians per tick)
    pub tank_turn_speed: f32,
    /// Bullet collision radius
    pub bullet_radius: f32,
    /// Bullet speed per tick
    pub bullet_speed: f32,
    /// Bullet lifetime in ticks
    pub bullet_life_ticks: u32,
    /// Distance from tank center to bullet spawn point
    pub muzzle_offset: f32,
    /// Spinning wall turn rate (radians per tick)
    pub spinner_speed: f32,
    /// Ticks each explosion animation frame is held
    pub explosion_frame_ticks: u32,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            arena_width: 640.0,
            arena_height: 480.0,
            maze_cols: 8,
            maze_rows: 6,
            wall_thickness: 8.0,
            players: 4,
            tank_ammo: 6,
            // 28x24 sprite at 0.75 scale
            tank_half_extents: Vec2::new(10.5, 9.0),
            tank_move_speed: 2.0,
            tank_turn_speed: 3.0_f32.to_radians(),
            bullet_radius: 2.0,
            bullet_speed: 4.0,
            // 5 seconds at 60 ticks/sec
            bullet_life_ticks: 300,
            muzzle_offset: 12.0,
            spinner_speed: 1.0_f32.to_radians(),
            explosion_frame_ticks: 5,
        }
    }
}

impl GameConfig {
    /// Load a config from a JSON file, falling back to defaults for absent fields
    pub fn load(path: &Path) -> Result<Self, Box<dyn Error>> {
        let json = std::fs::read_to_string(path)?;
        let config: Self = serde_json::from_str(&json)?;
        log::info!("Loaded config from {}", path.display());
        Ok(config)
    }

    /// Horizontal cell pitch of the maze grid
    #[inline]
    pub fn cell_width(&self) -> f32 {
        (self.arena_width - self.wall_thickness) / self.maze_cols as f32
    }

    /// Vertical cell pitch of the maze grid
    #[inline]
    pub fn cell_height(&self) -> f32 {
        (self.arena_height - self.wall_thickness) / self.maze_rows as f32
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_cell_pitch() {
        let config = GameConfig::default();
        assert!((config.cell_width() - 79.0).abs() < 1e-4);
        assert!((config.cell_height() - 472.0 / 6.0).abs() < 1e-4);
    }

    #[test]
    fn test_partial_json_overrides() {
        let config: GameConfig = serde_json::from_str(r#"{"players": 2, "tank_ammo": 3}"#).unwrap();
        assert_eq!(config.players, 2);
        assert_eq!(config.tank_ammo, 3);
        assert_eq!(config.maze_cols, 8);
    }
}
