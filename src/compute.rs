//! Per-frame simulation.
//!
//! [`tick`] is the single entry point a driver calls once per display
//! refresh: advance the play clock, release expired effects, run the spawn
//! interval, move everything one step, then resolve collisions.  All
//! randomness comes through the injected `rng` so callers control it.

use rand::Rng;

use crate::catalog::{PICKUP_FALL_SPEED, STAR_MAX_SPEED};
use crate::collision;
use crate::entities::{GameSession, Phase, Star};
use crate::firing::{boss_shot, fire_bullet, fire_enemy_bullet};
use crate::phase;
use crate::spawner;
use crate::timers::{self, Millis};

// ── Constructors ────────────────────────────────────────────────────────────

/// A new session on the start screen with a randomly scattered starfield.
pub fn init_session(
    width: f32,
    height: f32,
    star_count: usize,
    rng: &mut impl Rng,
) -> GameSession {
    let mut session = GameSession::new(width, height);
    session.stars = (0..star_count)
        .map(|_| Star {
            x: rng.gen::<f32>() * width,
            y: rng.gen::<f32>() * height,
            size: rng.gen::<f32>() * 2.0 + 0.5,
            speed: rng.gen::<f32>() * STAR_MAX_SPEED + 0.1,
        })
        .collect();
    session
}

// ── Frame driver ────────────────────────────────────────────────────────────

/// Advance the session by one frame that took `dt` milliseconds.
///
/// Outside `Playing` nothing moves and the play clock stands still.
pub fn tick(session: &mut GameSession, dt: Millis, rng: &mut impl Rng) {
    if session.phase != Phase::Playing {
        return;
    }
    session.clock.advance(dt);
    timers::expire_timers(session);
    spawner::run_spawn_interval(session, rng);
    update(session, rng);
    collision::check_collisions(session, rng);
}

// ── Movement & lifecycle ────────────────────────────────────────────────────

/// Move every entity one step and drop the ones that left the field or
/// expired.  An enemy slipping past the bottom edge ends the session on
/// the spot.
pub fn update(session: &mut GameSession, rng: &mut impl Rng) {
    if session.phase != Phase::Playing {
        return;
    }
    let (width, height) = (session.width, session.height);
    let now = session.now();

    // A held touch doubles as the trigger.
    if session.input.touch_target.is_some() {
        fire_bullet(session);
    }

    move_player(session);

    session.bullets.retain_mut(|b| {
        b.y -= b.speed;
        b.y >= 0.0
    });

    for enemy in &mut session.enemies {
        enemy.y += enemy.speed;
        if rng.gen::<f32>() < enemy.shoot_chance {
            fire_enemy_bullet(enemy, &mut session.enemy_bullets);
        }
    }
    if session.enemies.iter().any(|e| e.y > height) {
        phase::game_over(session);
        return;
    }

    session.pickups.retain_mut(|p| {
        p.y += PICKUP_FALL_SPEED;
        p.y <= height
    });

    if let Some(boss) = session.boss.as_mut() {
        boss.x += boss.velocity;
        let half = boss.size / 2.0;
        if boss.x > width - half || boss.x < half {
            boss.velocity = -boss.velocity;
        }
        if now.saturating_sub(boss.last_shot_at) >= boss.shoot_interval_ms {
            session.enemy_bullets.push(boss_shot(boss));
            boss.last_shot_at = now;
        }
    }

    session.enemy_bullets.retain_mut(|b| {
        b.y += b.speed;
        b.y <= height
    });

    for star in &mut session.stars {
        star.y += star.speed;
        if star.y > height {
            star.y = 0.0;
            star.x = rng.gen::<f32>() * width;
        }
    }

    update_explosions(session);
    spawner::try_spawn_boss(session);
}

/// Apply held directional intents.  Keys move by `speed` per step; a touch
/// target is approached at most `speed` per step and snapped to once within
/// reach.  The ship never leaves `[size/2, width − size/2]`.
pub fn move_player(session: &mut GameSession) {
    let width = session.width;
    let input = &session.input;
    let p = &mut session.player;
    let half = p.size / 2.0;
    let clamp = |x: f32| x.max(half).min(width - half);

    if input.left {
        p.x = clamp(p.x - p.speed);
    }
    if input.right {
        p.x = clamp(p.x + p.speed);
    }
    if let Some(target) = input.touch_target {
        let dx = target - p.x;
        if dx.abs() > p.speed {
            p.x += dx.signum() * p.speed;
        } else {
            p.x = target;
        }
        p.x = clamp(p.x);
    }
}

/// Grow and fade each explosion by the fraction of its lifetime elapsed;
/// drop it once the lifetime is over.
pub fn update_explosions(session: &mut GameSession) {
    let now = session.now();
    session.explosions.retain_mut(|exp| {
        let elapsed = now.saturating_sub(exp.started_at);
        if elapsed > exp.duration_ms {
            return false;
        }
        let progress = if exp.duration_ms == 0 {
            1.0
        } else {
            elapsed as f32 / exp.duration_ms as f32
        };
        exp.radius = (exp.max_radius * progress).max(1.0);
        exp.alpha = 1.0 - progress;
        true
    });
}
