mod common;

use space_shooter::catalog::*;
use space_shooter::compute::tick;
use space_shooter::entities::*;
use space_shooter::phase;
use space_shooter::spawner::*;

use common::{make_session, seeded_rng, ScriptedRng};

// ── try_spawn_enemy ───────────────────────────────────────────────────────────

#[test]
fn kind_follows_first_roll() {
    let cases = [
        (0.1, EnemyKind::Fighter),
        (0.5, EnemyKind::Scout),
        (0.7, EnemyKind::Frigate),
        (0.8, EnemyKind::TorpedoShip),
        (0.9, EnemyKind::Battlecruiser),
        (0.97, EnemyKind::Dreadnought),
    ];
    for (roll, kind) in cases {
        let mut s = make_session();
        try_spawn_enemy(&mut s, &mut ScriptedRng::new(&[roll, 0.5]));
        assert_eq!(s.enemies.len(), 1);
        assert_eq!(s.enemies[0].kind, kind, "roll {roll}");
        assert_eq!(s.enemies[0].y, 0.0);
    }
}

#[test]
fn spawn_x_keeps_hull_on_screen() {
    for roll in [0.0, 0.5, 0.999] {
        let mut s = make_session();
        try_spawn_enemy(&mut s, &mut ScriptedRng::new(&[0.99, roll]));
        let e = &s.enemies[0];
        assert_eq!(e.kind, EnemyKind::Dreadnought);
        assert!(e.x - e.size / 2.0 >= 0.0);
        assert!(e.x + e.size / 2.0 <= s.width);
    }

    let mut s = make_session();
    try_spawn_enemy(&mut s, &mut ScriptedRng::new(&[0.0, 0.0]));
    assert_eq!(s.enemies[0].x, 37.5); // half a fighter
}

#[test]
fn no_spawn_while_boss_active_or_not_playing() {
    let mut s = make_session();
    s.boss = Some(Boss::new(300.0, 0));
    try_spawn_enemy(&mut s, &mut seeded_rng());
    assert!(s.enemies.is_empty());

    let mut s = make_session();
    s.phase = Phase::Paused;
    try_spawn_enemy(&mut s, &mut seeded_rng());
    assert!(s.enemies.is_empty());
}

// ── spawn interval ────────────────────────────────────────────────────────────

#[test]
fn interval_spawns_every_four_seconds() {
    let mut s = make_session();
    let mut rng = ScriptedRng::new(&[]);
    tick(&mut s, 3999, &mut rng);
    assert!(s.enemies.is_empty());
    tick(&mut s, 1, &mut rng);
    assert_eq!(s.enemies.len(), 1);
    tick(&mut s, 4000, &mut rng);
    assert_eq!(s.enemies.len(), 2);
    assert_eq!(s.spawn_timer.at(), Some(12_000));
}

#[test]
fn long_frame_catches_up_missed_spawns() {
    let mut s = make_session();
    run_spawn_interval_at(&mut s, 12_500);
    assert_eq!(s.enemies.len(), 3); // due at 4000, 8000, 12000
    assert_eq!(s.spawn_timer.at(), Some(16_000));
}

fn run_spawn_interval_at(s: &mut GameSession, now: u64) {
    s.clock.advance(now - s.now());
    run_spawn_interval(s, &mut ScriptedRng::new(&[]));
}

#[test]
fn resuming_restarts_interval_from_scratch() {
    let mut s = make_session();
    let mut rng = ScriptedRng::new(&[]);
    tick(&mut s, 3000, &mut rng);
    phase::toggle_pause(&mut s);
    assert!(!s.spawn_timer.is_pending());
    phase::toggle_pause(&mut s);
    assert_eq!(s.spawn_timer.at(), Some(7000));

    tick(&mut s, 3999, &mut rng);
    assert!(s.enemies.is_empty());
    tick(&mut s, 1, &mut rng);
    assert_eq!(s.enemies.len(), 1);
}

#[test]
fn interval_does_nothing_when_halted() {
    let mut s = make_session();
    halt_spawn_interval(&mut s);
    run_spawn_interval_at(&mut s, 60_000);
    assert!(s.enemies.is_empty());
}

#[test]
fn start_interval_refuses_while_boss_active() {
    let mut s = make_session();
    s.boss = Some(Boss::new(300.0, 0));
    start_spawn_interval(&mut s);
    assert!(!s.spawn_timer.is_pending());
}

// ── boss ──────────────────────────────────────────────────────────────────────

#[test]
fn boss_waits_for_threshold() {
    let mut s = make_session();
    s.score = BOSS_SCORE_THRESHOLD - 1;
    try_spawn_boss(&mut s);
    assert!(!s.is_boss_active());
}

#[test]
fn boss_arrival_clears_enemies_and_halts_spawning() {
    let mut s = make_session();
    s.clock.advance(2500);
    s.score = BOSS_SCORE_THRESHOLD;
    s.enemies.push(Enemy::new(EnemyKind::Frigate, 100.0, 100.0));
    try_spawn_boss(&mut s);

    let boss = s.boss.as_ref().expect("boss spawned");
    assert_eq!((boss.x, boss.y), (300.0, 100.0));
    assert_eq!(boss.health, 150);
    assert_eq!(boss.last_shot_at, 2500);
    assert!(s.enemies.is_empty());
    assert_eq!(s.score, 500);
    assert!(!s.spawn_timer.is_pending());
}

#[test]
fn only_one_boss_at_a_time() {
    let mut s = make_session();
    s.score = 900;
    try_spawn_boss(&mut s);
    if let Some(boss) = s.boss.as_mut() {
        boss.health = 10;
    }
    try_spawn_boss(&mut s);
    assert_eq!(s.boss.as_ref().map(|b| b.health), Some(10));
}

#[test]
fn no_enemies_during_boss_fight() {
    let mut s = make_session();
    s.score = 500;
    let mut rng = ScriptedRng::new(&[]);
    for _ in 0..100 {
        tick(&mut s, 1000, &mut rng);
    }
    assert!(s.is_boss_active());
    assert!(s.enemies.is_empty());
    assert_eq!(s.phase, Phase::Playing);
}
