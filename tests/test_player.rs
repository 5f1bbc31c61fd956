mod common;

use space_shooter::catalog::*;
use space_shooter::entities::*;
use space_shooter::firing::fire_bullet;
use space_shooter::player::*;
use space_shooter::timers::expire_timers;

use common::make_session;

/// Move the play clock forward and release whatever expired.
fn advance(s: &mut GameSession, ms: u64) {
    s.clock.advance(ms);
    expire_timers(s);
}

// ── hit_player ────────────────────────────────────────────────────────────────

#[test]
fn hit_costs_one_health_and_grants_invulnerability() {
    let mut s = make_session();
    hit_player(&mut s);
    assert_eq!(s.player.health, 4);
    assert!(s.player.invulnerable());
    assert_eq!(s.player.invulnerability.at(), Some(1500));

    hit_player(&mut s); // absorbed
    assert_eq!(s.player.health, 4);
}

#[test]
fn invulnerability_lapses_after_window() {
    let mut s = make_session();
    hit_player(&mut s);
    advance(&mut s, 1499);
    assert!(s.player.invulnerable());
    advance(&mut s, 1);
    assert!(!s.player.invulnerable());

    hit_player(&mut s);
    assert_eq!(s.player.health, 3);
}

#[test]
fn hit_outside_playing_is_ignored() {
    let mut s = make_session();
    s.phase = Phase::Paused;
    hit_player(&mut s);
    assert_eq!(s.player.health, 5);
    assert!(!s.player.invulnerable());
}

#[test]
fn health_never_underflows() {
    let mut s = make_session();
    for _ in 0..10 {
        hit_player(&mut s);
        advance(&mut s, 1500);
    }
    assert_eq!(s.player.health, 0);
    assert_eq!(s.phase, Phase::GameOver);
}

// ── power-ups ─────────────────────────────────────────────────────────────────

#[test]
fn health_pickup_is_capped() {
    let mut s = make_session();
    apply_powerup_effect(&mut s, PickupKind::Health);
    assert_eq!(s.player.health, 5);

    s.player.health = 3;
    apply_powerup_effect(&mut s, PickupKind::Health);
    assert_eq!(s.player.health, 4);
}

#[test]
fn fire_rate_boost_halves_effective_delay_only() {
    let mut s = make_session();
    apply_powerup_effect(&mut s, PickupKind::FireRate);
    for (i, base) in GUNS.iter().enumerate() {
        s.player.current_gun = i;
        assert_eq!(current_gun(&s.player).delay_ms, base.delay_ms / 2);
    }
    // The catalog itself is untouched
    assert_eq!(GUNS[0].delay_ms, 250);
    assert_eq!(effective_gun(1, false).map(|g| g.delay_ms), Some(500));
    assert_eq!(effective_gun(1, true).map(|g| g.delay_ms), Some(250));
    assert_eq!(effective_gun(GUNS.len(), true), None);
}

#[test]
fn boosted_shot_uses_halved_cooldown() {
    let mut s = make_session();
    apply_powerup_effect(&mut s, PickupKind::FireRate);
    fire_bullet(&mut s);
    assert_eq!(s.player.fire_cooldown.at(), Some(125));
}

#[test]
fn repeat_fire_rate_pickup_refreshes_window() {
    let mut s = make_session();
    apply_powerup_effect(&mut s, PickupKind::FireRate);
    advance(&mut s, 3000);
    apply_powerup_effect(&mut s, PickupKind::FireRate);

    advance(&mut s, 4999); // t = 7999
    assert_eq!(current_gun(&s.player).delay_ms, 125);
    advance(&mut s, 1);
    assert_eq!(current_gun(&s.player).delay_ms, 250);
}

#[test]
fn repeat_speed_pickup_refreshes_without_stacking() {
    let mut s = make_session();
    apply_powerup_effect(&mut s, PickupKind::Speed);
    assert_eq!(s.player.speed, 16.0);

    advance(&mut s, 1000);
    apply_powerup_effect(&mut s, PickupKind::Speed);
    assert_eq!(s.player.speed, 16.0); // not 32
    assert_eq!(s.player.speed_boost.at(), Some(6000));

    advance(&mut s, 4999);
    assert_eq!(s.player.speed, 16.0);
    advance(&mut s, 1);
    assert_eq!(s.player.speed, 8.0);
}

// ── firing ────────────────────────────────────────────────────────────────────

#[test]
fn zapper_fires_single_shot_from_nose() {
    let mut s = make_session();
    fire_bullet(&mut s);
    assert_eq!(s.bullets.len(), 1);
    let b = &s.bullets[0];
    assert_eq!((b.x, b.y), (300.0, 600.0)); // y - size
    assert_eq!(b.damage, 1);
    assert!(!b.is_rocket);
    assert_eq!(s.player.fire_cooldown.at(), Some(250));
}

#[test]
fn spread_guns_fan_out_symmetrically() {
    let mut s = make_session();
    equip_gun(&mut s, 2);
    fire_bullet(&mut s);
    let xs: Vec<f32> = s.bullets.iter().map(|b| b.x).collect();
    assert_eq!(xs, vec![285.0, 300.0, 315.0]);

    let mut s = make_session();
    equip_gun(&mut s, 3);
    fire_bullet(&mut s);
    let xs: Vec<f32> = s.bullets.iter().map(|b| b.x).collect();
    assert_eq!(xs, vec![297.5, 302.5]);
    assert!(s.bullets.iter().all(|b| b.damage == 2));
}

#[test]
fn rocket_bullets_are_flagged() {
    let mut s = make_session();
    equip_gun(&mut s, 1);
    fire_bullet(&mut s);
    assert!(s.bullets[0].is_rocket);
    assert_eq!(s.bullets[0].radius, 30.0);
}

#[test]
fn cooldown_blocks_until_expiry() {
    let mut s = make_session();
    fire_bullet(&mut s);
    fire_bullet(&mut s);
    assert_eq!(s.bullets.len(), 1);

    advance(&mut s, 249);
    fire_bullet(&mut s);
    assert_eq!(s.bullets.len(), 1);

    advance(&mut s, 1);
    fire_bullet(&mut s);
    assert_eq!(s.bullets.len(), 2);
}

#[test]
fn no_firing_outside_playing() {
    let mut s = GameSession::new(600.0, 800.0);
    fire_bullet(&mut s);
    assert!(s.bullets.is_empty());
}

// ── gun selection ─────────────────────────────────────────────────────────────

#[test]
fn cycling_wraps_both_ways() {
    let mut s = make_session();
    for expected in [1, 2, 3, 0] {
        cycle_gun(&mut s, CycleDirection::Next);
        assert_eq!(s.player.current_gun, expected);
    }
    cycle_gun(&mut s, CycleDirection::Previous);
    assert_eq!(s.player.current_gun, 3);
}

#[test]
fn cycling_follows_collection_order() {
    let mut s = make_session();
    s.player.collected_guns = vec![0, 3];
    cycle_gun(&mut s, CycleDirection::Next);
    assert_eq!(s.player.current_gun, 3);
    cycle_gun(&mut s, CycleDirection::Next);
    assert_eq!(s.player.current_gun, 0);
}

#[test]
fn cycling_needs_two_guns() {
    let mut s = make_session();
    s.player.collected_guns = vec![2];
    s.player.current_gun = 2;
    cycle_gun(&mut s, CycleDirection::Next);
    assert_eq!(s.player.current_gun, 2);
}

#[test]
fn equip_requires_valid_owned_gun() {
    let mut s = make_session();
    equip_gun(&mut s, 2);
    assert_eq!(s.player.current_gun, 2);

    equip_gun(&mut s, 7);
    assert_eq!(s.player.current_gun, 2);

    s.player.collected_guns = vec![0, 2];
    equip_gun(&mut s, 3);
    assert_eq!(s.player.current_gun, 2);
}

#[test]
fn selection_ignored_while_paused() {
    let mut s = make_session();
    s.phase = Phase::Paused;
    equip_gun(&mut s, 1);
    cycle_gun(&mut s, CycleDirection::Next);
    assert_eq!(s.player.current_gun, 0);
}
