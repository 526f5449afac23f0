//! Per-tick simulation update
//!
//! Advances the arena one tick in a fixed order: round reset check, spinning
//! walls, bullets, tanks, explosions. Single-threaded and strictly
//! sequential; each pass owns its collection, marks entities dead in place,
//! and sweeps them at the end of the pass.

use std::f32::consts::PI;

use super::collision::{collision, collision_possible};
use super::state::{Bullet, Explosion, GameEvent, GameState};
use crate::consts::{MAX_PLAYERS, TANK_ANIM_INTERVAL};
use crate::{heading, wrap_angle};

/// One player's held/pressed controls for a tick
#[derive(Debug, Clone, Copy, Default)]
pub struct PlayerInput {
    /// Drive forward (held)
    pub forward: bool,
    /// Drive backward (held)
    pub backward: bool,
    /// Turn counterclockwise (held)
    pub turn_left: bool,
    /// Turn clockwise (held)
    pub turn_right: bool,
    /// Fire a bullet (just pressed)
    pub fire: bool,
}

/// Input for a single tick, one slot per player
#[derive(Debug, Clone, Copy, Default)]
pub struct TickInput {
    pub players: [PlayerInput; MAX_PLAYERS],
}

/// Advance the game state by one tick
pub fn tick(state: &mut GameState, input: &TickInput) {
    // A round ends when at most one tank survives; the next begins once the
    // last explosion has burned out
    if state.tanks.len() <= 1 && state.explosions.is_empty() {
        state.start_round();
    }

    state.time_ticks += 1;

    update_spinners(state);
    update_bullets(state);
    update_tanks(state, input);
    update_explosions(state);
}

/// Advance spinning walls, at half rate during slow motion
fn update_spinners(state: &mut GameState) {
    let slow = state.slow_motion();
    for wall in state.walls.iter_mut().filter(|w| w.is_spinner()) {
        let speed = if slow { wall.spin_speed / 2.0 } else { wall.spin_speed };
        wall.body.rotation = wrap_angle(wall.body.rotation + speed);
    }
}

/// Bullet pass: lifetime, movement, and wall ricochets
fn update_bullets(state: &mut GameState) {
    let slow = state.slow_motion();
    let arena_w = state.config.arena_width;
    let arena_h = state.config.arena_height;

    for bullet in &mut state.bullets {
        bullet.speed = if slow { bullet.initial_speed / 2.0 } else { bullet.initial_speed };
        bullet.life = bullet.life.saturating_sub(1);
        if bullet.body.fully_outside(arena_w, arena_h) {
            bullet.life = 0;
        }
        if bullet.life == 0 {
            continue;
        }

        bullet.body.center += heading(bullet.body.rotation) * bullet.speed;

        // A bullet overlapping several walls (a corner, say) bounces off each
        for wall in &state.walls {
            if !collision_possible(&bullet.body, &wall.body) {
                continue;
            }
            let result = collision(&bullet.body, &wall.body);
            if result.hit() {
                bullet.body.center += result.push_out();
                // Reflect the heading about the penetration axis, then
                // reverse it: r' = -r + 2a + pi
                bullet.body.rotation =
                    wrap_angle(-bullet.body.rotation + 2.0 * result.axis_angle() + PI);
                state.events.push(GameEvent::Ricochet);
            }
        }
    }

    state.bullets.retain(|b| b.life > 0);
}

/// Tank pass: drive, collide with walls and bullets, shoot
fn update_tanks(state: &mut GameState, input: &TickInput) {
    let GameState {
        config,
        walls,
        tanks,
        bullets,
        explosions,
        events,
        ..
    } = state;

    for tank in tanks.iter_mut() {
        // Slow motion is re-checked per tank: a kill earlier in this pass
        // already slows everyone behind it
        let slow = !explosions.is_empty();
        tank.move_speed = if slow { tank.initial_move_speed / 2.0 } else { tank.initial_move_speed };
        tank.turn_speed = if slow { tank.initial_turn_speed / 2.0 } else { tank.initial_turn_speed };

        let controls = input.players[tank.player];
        let moved = (controls.forward || controls.backward)
            && !(controls.forward && controls.backward);
        // Heading is sampled before the turn is applied
        let dir = heading(tank.body.rotation);

        if controls.turn_right {
            tank.body.rotation = wrap_angle(tank.body.rotation + tank.turn_speed);
        }
        if controls.turn_left {
            tank.body.rotation = wrap_angle(tank.body.rotation - tank.turn_speed);
        }
        if controls.forward {
            tank.body.center += dir * tank.move_speed;
        }
        if controls.backward {
            tank.body.center -= dir * tank.move_speed;
        }

        // Treads step every few ticks; direction follows movement, or the
        // turn direction when standing still
        tank.anim_tick = (tank.anim_tick + 1) % TANK_ANIM_INTERVAL;
        if tank.anim_tick == 0 {
            if moved {
                tank.animate(controls.forward);
            } else if controls.turn_right {
                tank.animate(true);
            } else if controls.turn_left {
                tank.animate(false);
            }
        }

        // Walls shove the tank back out; unlike bullets, no heading change
        for wall in walls.iter() {
            if !collision_possible(&tank.body, &wall.body) {
                continue;
            }
            let result = collision(&tank.body, &wall.body);
            if result.hit() {
                tank.body.center += result.push_out();
            }
        }

        // Any bullet hit costs a hit point; at zero the tank explodes and
        // its turn ends immediately (no shooting from the grave)
        let mut destroyed = false;
        for bullet in bullets.iter_mut() {
            if bullet.life == 0 {
                continue;
            }
            if !collision_possible(&tank.body, &bullet.body) {
                continue;
            }
            if collision(&tank.body, &bullet.body).hit() {
                bullet.life = 0;
                tank.hit_points = tank.hit_points.saturating_sub(1);
                if tank.hit_points == 0 {
                    explosions.push(Explosion::new(tank.body.center, config));
                    events.push(GameEvent::Explode { player: tank.player });
                    destroyed = true;
                    break;
                }
            }
        }
        if destroyed {
            continue;
        }

        let live = bullets
            .iter()
            .filter(|b| b.life > 0 && b.player == tank.player)
            .count();
        if controls.fire && live < tank.ammo as usize {
            // Spawn at the muzzle, pre-advanced backward by one speed step so
            // the first move pushes it clear of the tank
            let dir = heading(tank.body.rotation);
            let muzzle = config.muzzle_offset + config.bullet_radius;
            let center = tank.body.center + dir * muzzle - dir * config.bullet_speed;
            bullets.push(Bullet::new(tank.player, config, center, tank.body.rotation));
            events.push(GameEvent::Shoot { player: tank.player });
        }
    }

    tanks.retain(|t| t.hit_points > 0);
    bullets.retain(|b| b.life > 0);
}

/// Explosion pass: countdown and frame stepping, no collision involvement
fn update_explosions(state: &mut GameState) {
    for explosion in &mut state.explosions {
        explosion.life = explosion.life.saturating_sub(1);
        if explosion.life > 0 && explosion.life % explosion.frame_length == 0 {
            explosion.frame += 1;
        }
    }
    state.explosions.retain(|e| e.life > 0);
}
