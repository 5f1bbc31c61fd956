//! Projectile creation for the player, ordinary enemies, and the boss.

use crate::catalog::{BOSS, ENEMY_SPREAD_OFFSET};
use crate::entities::{Boss, Bullet, Enemy, EnemyBullet, GameSession, Phase};
use crate::player::current_gun;
use crate::timers::Deadline;

/// Fire one volley from the current gun and start its cooldown.
///
/// Volleys are spread symmetrically: projectile `i` of `count` sits at
/// `(i − (count − 1) / 2) × spread` from the ship's centre.
pub fn fire_bullet(session: &mut GameSession) {
    if session.phase != Phase::Playing || !session.player.can_shoot() {
        return;
    }
    let now = session.now();
    let player = &mut session.player;
    let gun = current_gun(player);

    let centre = (gun.count as f32 - 1.0) / 2.0;
    for i in 0..gun.count {
        let offset = (i as f32 - centre) * gun.spread;
        session.bullets.push(Bullet {
            x: player.x + offset,
            y: player.y - player.size,
            radius: gun.size,
            speed: gun.speed,
            damage: gun.damage,
            asset: gun.asset,
            is_rocket: gun.is_rocket,
        });
    }

    player.fire_cooldown = Deadline::after(now, gun.delay_ms);
}

/// Append `enemy`'s shots to `out`.  Bullet stats come from the kind's fixed
/// mapping; frigates and battlecruisers fire a three-way horizontal spread,
/// everything else a single shot.
pub fn fire_enemy_bullet(enemy: &Enemy, out: &mut Vec<EnemyBullet>) {
    let shot = enemy.kind.shot();
    let centre = (shot.count as f32 - 1.0) / 2.0;
    out.extend((0..shot.count).map(|i| EnemyBullet {
        x: enemy.x + (i as f32 - centre) * ENEMY_SPREAD_OFFSET,
        y: enemy.y + enemy.size / 2.0,
        radius: shot.radius,
        speed: shot.speed,
        asset: shot.asset,
    }));
}

/// Single downward boss shot from the bottom of its hull.
pub fn boss_shot(boss: &Boss) -> EnemyBullet {
    EnemyBullet {
        x: boss.x,
        y: boss.y + boss.size / 2.0,
        radius: BOSS.shot_radius,
        speed: BOSS.shot_speed,
        asset: BOSS.shot_asset,
    }
}
