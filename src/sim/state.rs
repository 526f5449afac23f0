//! Game state and core simulation types
//!
//! An arena-level [`GameState`] exclusively owns every live entity; entities
//! never hold references to one another. Cross-entity interaction happens by
//! index inside a single update pass, and removal is deferred to a sweep at
//! the end of the pass.

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;

use super::collision::OrientedBox;
use super::maze::Maze;
use crate::GameConfig;
use crate::consts::{EXPLOSION_FRAMES, TANK_ANIM_FRAMES};

/// Side effects the presentation layer should dispatch after a tick
///
/// The sim never plays sounds itself; it records what happened and the
/// embedder drains the queue (fire-and-forget, no feedback into game state).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameEvent {
    /// A fresh maze was generated and tanks respawned
    RoundStart { round: u32 },
    /// A tank fired a bullet
    Shoot { player: usize },
    /// A bullet bounced off a wall
    Ricochet,
    /// A tank went up in flames
    Explode { player: usize },
}

/// A wall segment, static or spinning
#[derive(Debug, Clone, Copy)]
pub struct Wall {
    pub body: OrientedBox,
    /// Radians per tick; 0 for static walls
    pub spin_speed: f32,
}

impl Wall {
    #[inline]
    pub fn is_spinner(&self) -> bool {
        self.spin_speed != 0.0
    }
}

/// A player's tank
#[derive(Debug, Clone)]
pub struct Tank {
    pub player: usize,
    pub body: OrientedBox,
    /// Tanks die to a single bullet
    pub hit_points: u32,
    /// Max live bullets attributed to this tank
    pub ammo: u32,
    pub move_speed: f32,
    pub turn_speed: f32,
    pub initial_move_speed: f32,
    pub initial_turn_speed: f32,
    /// Counts ticks between tread animation steps
    pub(crate) anim_tick: u8,
    /// Current tread frame, 0..TANK_ANIM_FRAMES (presentation picks sprites)
    pub anim_frame: u8,
}

impl Tank {
    pub fn new(player: usize, config: &GameConfig, center: Vec2, rotation: f32) -> Self {
        Self {
            player,
            body: OrientedBox::new(center, config.tank_half_extents, rotation),
            hit_points: 1,
            ammo: config.tank_ammo,
            move_speed: config.tank_move_speed,
            turn_speed: config.tank_turn_speed,
            initial_move_speed: config.tank_move_speed,
            initial_turn_speed: config.tank_turn_speed,
            anim_tick: 0,
            anim_frame: 0,
        }
    }

    /// Step the tread animation one frame forwards or backwards
    pub(crate) fn animate(&mut self, forwards: bool) {
        self.anim_frame = if forwards {
            (self.anim_frame + TANK_ANIM_FRAMES - 1) % TANK_ANIM_FRAMES
        } else {
            (self.anim_frame + 1) % TANK_ANIM_FRAMES
        };
    }
}

/// A live bullet
#[derive(Debug, Clone)]
pub struct Bullet {
    /// Owning player, for the ammo cap
    pub player: usize,
    pub body: OrientedBox,
    /// Current speed (halved while slow motion is active)
    pub speed: f32,
    pub initial_speed: f32,
    /// Remaining ticks; 0 marks the bullet dead for the sweep
    pub life: u32,
}

impl Bullet {
    pub fn new(player: usize, config: &GameConfig, center: Vec2, rotation: f32) -> Self {
        let half = Vec2::splat(config.bullet_radius);
        Self {
            player,
            body: OrientedBox::new(center, half, rotation),
            speed: config.bullet_speed,
            initial_speed: config.bullet_speed,
            life: config.bullet_life_ticks,
        }
    }
}

/// A cosmetic explosion; its mere existence triggers global slow motion
#[derive(Debug, Clone)]
pub struct Explosion {
    pub pos: Vec2,
    /// Remaining ticks; starts at frames * frame_length
    pub life: u32,
    /// Current animation frame, 0..EXPLOSION_FRAMES
    pub frame: u32,
    pub(crate) frame_length: u32,
}

impl Explosion {
    pub fn new(pos: Vec2, config: &GameConfig) -> Self {
        Self {
            pos,
            life: EXPLOSION_FRAMES * config.explosion_frame_ticks,
            frame: 0,
            frame_length: config.explosion_frame_ticks,
        }
    }
}

/// Complete arena state for one session
///
/// Deterministic given a seed and an input sequence: the only RNG is the
/// seeded generator threaded through maze generation.
#[derive(Debug, Clone)]
pub struct GameState {
    pub config: GameConfig,
    /// Session seed, for reproducing a run
    pub seed: u64,
    pub(crate) rng: Pcg32,
    /// Simulation tick counter
    pub time_ticks: u64,
    /// Rounds started so far
    pub round: u32,
    pub walls: Vec<Wall>,
    pub tanks: Vec<Tank>,
    pub bullets: Vec<Bullet>,
    pub explosions: Vec<Explosion>,
    pub(crate) events: Vec<GameEvent>,
}

impl GameState {
    pub fn new(seed: u64, config: GameConfig) -> Self {
        Self {
            config,
            seed,
            rng: Pcg32::seed_from_u64(seed),
            time_ticks: 0,
            round: 0,
            walls: Vec::new(),
            tanks: Vec::new(),
            bullets: Vec::new(),
            explosions: Vec::new(),
            events: Vec::new(),
        }
    }

    /// Any live explosion puts the whole arena into slow motion
    #[inline]
    pub fn slow_motion(&self) -> bool {
        !self.explosions.is_empty()
    }

    /// Live bullets attributed to a player
    pub fn live_bullets_for(&self, player: usize) -> usize {
        self.bullets.iter().filter(|b| b.player == player).count()
    }

    /// Hand accumulated events to the presentation layer
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    /// Tear down the old round and build a fresh one: new maze, new tanks
    pub fn start_round(&mut self) {
        self.tanks.clear();
        self.bullets.clear();
        self.explosions.clear();
        self.walls.clear();

        let config = self.config.clone();
        let mut maze = Maze::generate(&config, &mut self.rng);
        self.walls = maze.build_walls(&config, &mut self.rng);
        for (player, (center, rotation)) in
            maze.spawn_transforms(config.players).into_iter().enumerate()
        {
            self.tanks.push(Tank::new(player, &config, center, rotation));
        }

        self.round += 1;
        self.events.push(GameEvent::RoundStart { round: self.round });
        log::info!(
            "Round {}: {} walls ({} spinning), {} tanks",
            self.round,
            self.walls.len(),
            maze.spinner_count(),
            self.tanks.len()
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_start_round_populates_arena() {
        let mut state = GameState::new(42, GameConfig::default());
        state.start_round();
        assert_eq!(state.round, 1);
        assert_eq!(state.tanks.len(), 4);
        assert!(!state.walls.is_empty());
        assert!(state.bullets.is_empty());
        let events = state.drain_events();
        assert_eq!(events, vec![GameEvent::RoundStart { round: 1 }]);
        assert!(state.drain_events().is_empty());
    }

    #[test]
    fn test_tread_animation_wraps() {
        let config = GameConfig::default();
        let mut tank = Tank::new(0, &config, Vec2::ZERO, 0.0);
        tank.animate(true);
        assert_eq!(tank.anim_frame, TANK_ANIM_FRAMES - 1);
        tank.animate(false);
        assert_eq!(tank.anim_frame, 0);
    }

    #[test]
    fn test_slow_motion_tracks_explosions() {
        let config = GameConfig::default();
        let mut state = GameState::new(1, config.clone());
        assert!(!state.slow_motion());
        state.explosions.push(Explosion::new(Vec2::ZERO, &config));
        assert!(state.slow_motion());
    }
}
