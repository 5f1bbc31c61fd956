//! Read-only view of a session for renderers.

use crate::entities::{
    Bullet, Enemy, EnemyBullet, Explosion, GameSession, Phase, Pickup, Star,
};
use crate::player::current_gun;
use crate::timers::Millis;

#[derive(Clone, Debug, PartialEq)]
pub struct PlayerView {
    pub x: f32,
    pub y: f32,
    pub size: f32,
    pub health: u32,
    pub max_health: u32,
    pub invulnerable: bool,
    pub gun_name: &'static str,
    pub fire_rate_boosted: bool,
    pub speed_boosted: bool,
    /// Play time left on each boost, if running.
    pub fire_rate_boost_left: Option<Millis>,
    pub speed_boost_left: Option<Millis>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct BossView {
    pub x: f32,
    pub y: f32,
    pub size: f32,
    /// Remaining health in [0, 1].
    pub health_ratio: f32,
}

/// Everything a renderer needs for one frame.  Borrowed from the session,
/// so it cannot outlive the frame it was taken for.
#[derive(Clone, Debug)]
pub struct Snapshot<'a> {
    pub phase: Phase,
    pub score: u32,
    /// Play-clock time the snapshot was taken at.
    pub now: Millis,
    pub width: f32,
    pub height: f32,
    pub player: PlayerView,
    pub boss: Option<BossView>,
    pub bullets: &'a [Bullet],
    pub enemy_bullets: &'a [EnemyBullet],
    pub enemies: &'a [Enemy],
    pub pickups: &'a [Pickup],
    pub explosions: &'a [Explosion],
    pub stars: &'a [Star],
}

impl GameSession {
    pub fn snapshot(&self) -> Snapshot<'_> {
        let p = &self.player;
        let now = self.now();
        Snapshot {
            phase: self.phase,
            score: self.score,
            now,
            width: self.width,
            height: self.height,
            player: PlayerView {
                x: p.x,
                y: p.y,
                size: p.size,
                health: p.health,
                max_health: p.max_health,
                invulnerable: p.invulnerable(),
                gun_name: current_gun(p).name,
                fire_rate_boosted: p.fire_rate_boost.is_pending(),
                speed_boosted: p.speed_boost.is_pending(),
                fire_rate_boost_left: p.fire_rate_boost.remaining(now),
                speed_boost_left: p.speed_boost.remaining(now),
            },
            boss: self.boss.as_ref().map(|b| BossView {
                x: b.x,
                y: b.y,
                size: b.size,
                health_ratio: b.health_ratio(),
            }),
            bullets: &self.bullets,
            enemy_bullets: &self.enemy_bullets,
            enemies: &self.enemies,
            pickups: &self.pickups,
            explosions: &self.explosions,
            stars: &self.stars,
        }
    }
}
