//! Timer service.
//!
//! Every time-boxed effect (cooldowns, boosts, the spawn cadence) is an
//! expiry timestamp stored on the session and checked at the start of each
//! tick.  Nothing is scheduled out-of-band, so replacing
//! the session discards every pending effect with it.

use tracing::debug;

use crate::entities::GameSession;

/// Milliseconds of play time since the session began.
pub type Millis = u64;

/// Play clock.  Only advanced while the session is `Playing`, so pausing
/// freezes every pending deadline.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct SessionClock {
    now: Millis,
}

impl SessionClock {
    pub fn now(&self) -> Millis {
        self.now
    }

    pub fn advance(&mut self, dt: Millis) {
        self.now = self.now.saturating_add(dt);
    }
}

/// An optional expiry timestamp.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Deadline(Option<Millis>);

impl Deadline {
    pub const IDLE: Deadline = Deadline(None);

    pub fn after(now: Millis, duration: Millis) -> Deadline {
        Deadline(Some(now.saturating_add(duration)))
    }

    pub fn at(&self) -> Option<Millis> {
        self.0
    }

    pub fn is_pending(&self) -> bool {
        self.0.is_some()
    }

    pub fn has_elapsed(&self, now: Millis) -> bool {
        matches!(self.0, Some(at) if now >= at)
    }

    pub fn clear(&mut self) {
        self.0 = None;
    }

    /// Clear the deadline if it has elapsed; returns whether it did.
    pub fn take_elapsed(&mut self, now: Millis) -> bool {
        if self.has_elapsed(now) {
            self.0 = None;
            true
        } else {
            false
        }
    }

    /// Milliseconds left before expiry, if pending.
    pub fn remaining(&self, now: Millis) -> Option<Millis> {
        self.0.map(|at| at.saturating_sub(now))
    }
}

/// Release every player effect whose deadline has passed.
///
/// The spawn deadline is left alone; the spawner consumes it.
pub fn expire_timers(session: &mut GameSession) {
    let now = session.clock.now();
    let player = &mut session.player;

    player.fire_cooldown.take_elapsed(now);
    player.invulnerability.take_elapsed(now);

    if player.fire_rate_boost.take_elapsed(now) {
        debug!(now, "fire-rate boost expired");
    }
    if player.speed_boost.take_elapsed(now) {
        player.speed = player.base_speed;
        debug!(now, "speed boost expired");
    }
}

/// Drop every pending deadline and restore boosted stats.
///
/// Used when the session enters a terminal phase.
pub fn cancel_all(session: &mut GameSession) {
    let player = &mut session.player;
    player.fire_cooldown.clear();
    player.invulnerability.clear();
    player.fire_rate_boost.clear();
    player.speed_boost.clear();
    player.speed = player.base_speed;
    session.spawn_timer.clear();
}

