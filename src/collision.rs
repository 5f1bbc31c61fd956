//! Collision detection and resolution.
//!
//! Every test is a circle overlap: two entities touch when the distance
//! between their centres is less than the projectile radius plus half the
//! target's size.  Nothing is removed from a collection mid-scan; hits are
//! marked and the collections compacted once the scan is over.

use rand::Rng;
use tracing::{debug, info};

use crate::catalog::{
    ExplosionKind, PickupKind, PICKUP_DROP_CHANCE, ROCKET_SPLASH_DAMAGE, ROCKET_SPLASH_RADIUS,
};
use crate::entities::{Bullet, Explosion, GameSession, Phase, Pickup};
use crate::phase;
use crate::player::{apply_powerup_effect, hit_player};

/// Where a bullet struck, and which enemy (by index in this scan) took it.
#[derive(Clone, Copy, Debug)]
struct Impact {
    x: f32,
    y: f32,
    enemy: Option<usize>,
}

fn overlaps(ax: f32, ay: f32, bx: f32, by: f32, reach: f32) -> bool {
    (ax - bx).hypot(ay - by) < reach
}

/// Resolve every collision for this step.  Only runs while `Playing`, and
/// stops as soon as a resolution ends the session.
pub fn check_collisions(session: &mut GameSession, rng: &mut impl Rng) {
    if session.phase != Phase::Playing {
        return;
    }
    resolve_player_bullets(session, rng);
    if session.phase == Phase::Playing {
        resolve_enemy_bullets(session);
    }
    if session.phase == Phase::Playing {
        resolve_pickups(session);
    }
}

// ── Player bullets ↔ boss / enemies ─────────────────────────────────────────

fn resolve_player_bullets(session: &mut GameSession, rng: &mut impl Rng) {
    let mut dead = vec![false; session.enemies.len()];
    let bullets = std::mem::take(&mut session.bullets);
    let mut kept = Vec::with_capacity(bullets.len());

    let mut remaining = bullets.into_iter();
    for bullet in remaining.by_ref() {
        match strike(session, &bullet, &mut dead, rng) {
            Some(impact) if bullet.is_rocket => splash(session, impact, &mut dead),
            Some(_) => {}
            None => kept.push(bullet),
        }
        if session.phase != Phase::Playing {
            break;
        }
    }
    kept.extend(remaining);
    session.bullets = kept;

    let mut flags = dead.into_iter();
    session.enemies.retain(|_| !flags.next().unwrap_or(false));
}

/// Apply one bullet to the first target it touches: the boss if present,
/// otherwise the first live enemy in range.
fn strike(
    session: &mut GameSession,
    bullet: &Bullet,
    dead: &mut [bool],
    rng: &mut impl Rng,
) -> Option<Impact> {
    if let Some(boss) = session.boss.as_mut() {
        if overlaps(bullet.x, bullet.y, boss.x, boss.y, bullet.radius + boss.size / 2.0) {
            boss.health = boss.health.saturating_sub(bullet.damage);
            let impact = Impact {
                x: boss.x,
                y: boss.y,
                enemy: None,
            };
            if boss.health == 0 {
                let award = boss.score;
                session.boss = None;
                session.score = session.score.saturating_add(award);
                let now = session.now();
                session.explosions.push(Explosion::new(
                    ExplosionKind::BossDeath,
                    impact.x,
                    impact.y,
                    0.0,
                    now,
                ));
                info!(score = session.score, "boss destroyed");
                phase::victory(session);
            }
            return Some(impact);
        }
    }

    let index = session
        .enemies
        .iter()
        .enumerate()
        .find(|(i, e)| {
            !dead[*i] && overlaps(bullet.x, bullet.y, e.x, e.y, bullet.radius + e.size / 2.0)
        })
        .map(|(i, _)| i)?;

    let enemy = &mut session.enemies[index];
    enemy.health = enemy.health.saturating_sub(bullet.damage);
    let impact = Impact {
        x: enemy.x,
        y: enemy.y,
        enemy: Some(index),
    };
    if enemy.health == 0 {
        dead[index] = true;
        kill_enemy(session, index);
        roll_loot(session, impact.x, impact.y, rng);
    }
    Some(impact)
}

/// Rocket splash: every other live enemy near the impact takes a fixed hit.
/// Splash kills score and explode but never splash again or drop loot.
fn splash(session: &mut GameSession, impact: Impact, dead: &mut [bool]) {
    let now = session.now();
    session.explosions.push(Explosion::new(
        ExplosionKind::RocketImpact,
        impact.x,
        impact.y,
        ROCKET_SPLASH_RADIUS,
        now,
    ));

    for i in 0..session.enemies.len() {
        if dead[i] || impact.enemy == Some(i) {
            continue;
        }
        let enemy = &mut session.enemies[i];
        if !overlaps(impact.x, impact.y, enemy.x, enemy.y, ROCKET_SPLASH_RADIUS) {
            continue;
        }
        enemy.health = enemy.health.saturating_sub(ROCKET_SPLASH_DAMAGE);
        if enemy.health == 0 {
            dead[i] = true;
            kill_enemy(session, i);
        }
    }
}

/// Score and explode enemy `index`.  Removal happens when the scan compacts.
fn kill_enemy(session: &mut GameSession, index: usize) {
    let now = session.now();
    let enemy = &session.enemies[index];
    let explosion = Explosion::new(ExplosionKind::EnemyDeath, enemy.x, enemy.y, enemy.size, now);
    let (kind, award) = (enemy.kind, enemy.score);

    session.score = session.score.saturating_add(award);
    session.explosions.push(explosion);
    debug!(?kind, award, score = session.score, "enemy destroyed");
}

fn roll_loot(session: &mut GameSession, x: f32, y: f32, rng: &mut impl Rng) {
    if rng.gen::<f32>() >= PICKUP_DROP_CHANCE {
        return;
    }
    let pick = (rng.gen::<f32>() * PickupKind::ALL.len() as f32) as usize;
    let kind = PickupKind::ALL[pick.min(PickupKind::ALL.len() - 1)];
    debug!(?kind, x, y, "pickup dropped");
    session.pickups.push(Pickup::new(kind, x, y));
}

// ── Enemy bullets ↔ player ──────────────────────────────────────────────────

/// At most one enemy bullet is resolved per step.
fn resolve_enemy_bullets(session: &mut GameSession) {
    let player = &session.player;
    let hit = session.enemy_bullets.iter().position(|b| {
        overlaps(b.x, b.y, player.x, player.y, b.radius + player.size / 2.0)
    });
    let Some(index) = hit else {
        return;
    };

    let bullet = session.enemy_bullets.swap_remove(index);
    hit_player(session);
    let now = session.now();
    session.explosions.push(Explosion::new(
        ExplosionKind::PlayerHit,
        bullet.x,
        bullet.y,
        0.0,
        now,
    ));
}

// ── Pickups ↔ player ────────────────────────────────────────────────────────

/// At most one pickup is collected per step.
fn resolve_pickups(session: &mut GameSession) {
    let player = &session.player;
    let hit = session.pickups.iter().position(|p| {
        overlaps(p.x, p.y, player.x, player.y, p.radius + player.size / 2.0)
    });
    if let Some(index) = hit {
        let pickup = session.pickups.swap_remove(index);
        apply_powerup_effect(session, pickup.kind);
    }
}
