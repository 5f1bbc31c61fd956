mod common;

use space_shooter::catalog::*;
use space_shooter::entities::*;
use space_shooter::player::{apply_powerup_effect, equip_gun, hit_player};

use common::make_session;

#[test]
fn snapshot_reflects_player_state() {
    let mut s = make_session();
    equip_gun(&mut s, 3);
    apply_powerup_effect(&mut s, PickupKind::FireRate);
    hit_player(&mut s);

    let snap = s.snapshot();
    assert_eq!(snap.phase, Phase::Playing);
    assert_eq!(snap.player.gun_name, "AutoCannon");
    assert!(snap.player.fire_rate_boosted);
    assert!(!snap.player.speed_boosted);
    assert!(snap.player.invulnerable);
    assert_eq!(snap.player.health, 4);
    assert_eq!(snap.player.max_health, 5);
    assert!(snap.boss.is_none());
}

#[test]
fn snapshot_reports_boost_time_left() {
    let mut s = make_session();
    apply_powerup_effect(&mut s, PickupKind::Speed);
    s.clock.advance(1200);

    let snap = s.snapshot();
    assert_eq!(snap.player.speed_boost_left, Some(3800));
    assert_eq!(snap.player.fire_rate_boost_left, None);
}

#[test]
fn snapshot_exposes_boss_health_ratio() {
    let mut s = make_session();
    let mut boss = Boss::new(300.0, 0);
    boss.health = 30;
    s.boss = Some(boss);
    let snap = s.snapshot();
    let view = snap.boss.expect("boss visible");
    assert_eq!(view.health_ratio, 0.2);
    assert_eq!((view.x, view.y, view.size), (300.0, 100.0, 250.0));
}

#[test]
fn snapshot_borrows_live_collections() {
    let mut s = make_session();
    s.enemies.push(Enemy::new(EnemyKind::Frigate, 50.0, 60.0));
    s.pickups.push(Pickup::new(PickupKind::Health, 1.0, 2.0));
    s.clock.advance(1234);

    let snap = s.snapshot();
    assert_eq!(snap.enemies, s.enemies.as_slice());
    assert_eq!(snap.pickups.len(), 1);
    assert!(snap.bullets.is_empty());
    assert_eq!(snap.now, 1234);
    assert_eq!((snap.width, snap.height), (600.0, 800.0));
}
