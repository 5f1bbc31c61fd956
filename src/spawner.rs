//! Enemy and boss spawning.

use rand::Rng;
use tracing::{debug, info};

use crate::catalog::{EnemyKind, BOSS_SCORE_THRESHOLD, ENEMY_SPAWN_INTERVAL_MS};
use crate::entities::{Boss, Enemy, GameSession, Phase};
use crate::timers::Deadline;

/// Spawn one ordinary enemy at the top of the playfield.
///
/// The kind is drawn from the cumulative bands in [`EnemyKind::from_roll`]
/// and the x position keeps the whole hull on-screen.  Does nothing outside
/// `Playing` or while the boss is up.
pub fn try_spawn_enemy(session: &mut GameSession, rng: &mut impl Rng) {
    if session.phase != Phase::Playing || session.is_boss_active() {
        return;
    }
    let kind = EnemyKind::from_roll(rng.gen::<f32>());
    let size = kind.archetype().size;
    let x = rng.gen::<f32>() * (session.width - size).max(0.0) + size / 2.0;
    debug!(?kind, x, "enemy spawned");
    session.enemies.push(Enemy::new(kind, x, 0.0));
}

/// (Re)start the spawn interval from now, unless the boss is active.
pub fn start_spawn_interval(session: &mut GameSession) {
    if session.is_boss_active() {
        session.spawn_timer.clear();
    } else {
        session.spawn_timer = Deadline::after(session.now(), ENEMY_SPAWN_INTERVAL_MS);
    }
}

pub fn halt_spawn_interval(session: &mut GameSession) {
    session.spawn_timer.clear();
}

/// Spawn once for every interval that has elapsed since the last check.
pub fn run_spawn_interval(session: &mut GameSession, rng: &mut impl Rng) {
    let now = session.now();
    while let Some(at) = session.spawn_timer.at() {
        if now < at {
            break;
        }
        session.spawn_timer = Deadline::after(at, ENEMY_SPAWN_INTERVAL_MS);
        try_spawn_enemy(session, rng);
    }
}

/// Bring in the boss once the score crosses the threshold.
///
/// Ordinary enemies on screen vanish without awarding score, and the spawn
/// interval stays halted for the rest of the session.
pub fn try_spawn_boss(session: &mut GameSession) {
    if session.is_boss_active() || session.score < BOSS_SCORE_THRESHOLD {
        return;
    }
    halt_spawn_interval(session);
    session.enemies.clear();
    session.boss = Some(Boss::new(session.width / 2.0, session.now()));
    info!(score = session.score, "boss spawned");
}
