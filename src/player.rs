//! Player state changes: damage, power-up effects, and gun selection.

use tracing::debug;

use crate::catalog::{GunArchetype, PickupKind, BOOST_DURATION_MS, GUNS, INVULNERABILITY_MS};
use crate::entities::{GameSession, Phase, Player};
use crate::phase;
use crate::timers::Deadline;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CycleDirection {
    Next,
    Previous,
}

// ── Effective gun stats ─────────────────────────────────────────────────────

/// The base catalog entry with active modifiers applied: the cooldown is
/// halved while a fire-rate boost is running.
pub fn effective_gun(index: usize, fire_rate_boosted: bool) -> Option<GunArchetype> {
    GUNS.get(index).map(|base| GunArchetype {
        delay_ms: if fire_rate_boosted {
            base.delay_ms / 2
        } else {
            base.delay_ms
        },
        ..*base
    })
}

/// The player's current gun, with modifiers applied.
pub fn current_gun(player: &Player) -> GunArchetype {
    let boosted = player.fire_rate_boost.is_pending();
    effective_gun(player.current_gun, boosted)
        .or_else(|| effective_gun(0, boosted))
        .unwrap_or(GUNS[0])
}

// ── Damage ──────────────────────────────────────────────────────────────────

/// Take one point of damage unless invulnerable.  Reaching zero health ends
/// the session.
pub fn hit_player(session: &mut GameSession) {
    if session.phase != Phase::Playing || session.player.invulnerable() {
        return;
    }
    let now = session.now();
    let player = &mut session.player;
    player.health = player.health.saturating_sub(1);
    player.invulnerability = Deadline::after(now, INVULNERABILITY_MS);
    debug!(health = player.health, "player hit");

    if player.health == 0 {
        phase::game_over(session);
    }
}

// ── Power-ups ───────────────────────────────────────────────────────────────

/// Apply a collected pickup.  Boosts refresh their window on repeat pickup
/// rather than stacking.
pub fn apply_powerup_effect(session: &mut GameSession, kind: PickupKind) {
    let now = session.now();
    let player = &mut session.player;
    match kind {
        PickupKind::Health => {
            player.health = (player.health + 1).min(player.max_health);
        }
        PickupKind::FireRate => {
            player.fire_rate_boost = Deadline::after(now, BOOST_DURATION_MS);
        }
        PickupKind::Speed => {
            player.speed = player.base_speed * 2.0;
            player.speed_boost = Deadline::after(now, BOOST_DURATION_MS);
        }
    }
    debug!(?kind, now, "power-up applied");
}

// ── Gun selection ───────────────────────────────────────────────────────────

pub fn cycle_gun(session: &mut GameSession, direction: CycleDirection) {
    let player = &mut session.player;
    let owned = player.collected_guns.len();
    if owned < 2 || session.phase != Phase::Playing {
        return;
    }
    let pos = player
        .collected_guns
        .iter()
        .position(|&g| g == player.current_gun)
        .unwrap_or(0);
    let next = match direction {
        CycleDirection::Next => (pos + 1) % owned,
        CycleDirection::Previous => (pos + owned - 1) % owned,
    };
    player.current_gun = player.collected_guns[next];
}

pub fn equip_gun(session: &mut GameSession, index: usize) {
    if session.phase != Phase::Playing || index >= GUNS.len() {
        return;
    }
    if session.player.collected_guns.contains(&index) {
        session.player.current_gun = index;
    }
}
