//! Game phase state machine and intent dispatch.
//!
//! ```text
//! StartScreen ──start──▶ Playing ◀──toggle_pause──▶ Paused
//!     │  ▲                  │
//!  credits│                 ├──death / breach──▶ GameOver
//!     ▼  │return           └──boss defeated───▶ Victory
//!   Credits
//! ```
//!
//! `restart` is accepted from every phase; `return_to_menu` from Paused,
//! Credits, and both terminal phases.  Both replace the session wholesale.

use tracing::{debug, info};

use crate::entities::{GameSession, Phase};
use crate::firing;
use crate::player::{self, CycleDirection};
use crate::spawner;
use crate::timers;

/// Discrete intents from the input layer.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Intent {
    MoveLeft(bool),
    MoveRight(bool),
    /// Touch-drag target x, or `None` when the touch ends.
    SetHorizontalTarget(Option<f32>),
    Fire,
    CycleGun(CycleDirection),
    EquipGun(usize),
    TogglePause,
    Start,
    Restart,
    ReturnToMenu,
    OpenCredits,
}

/// Whether `phase` accepts `intent` at all.  Operations still apply their
/// own finer checks (cooldowns, ownership, …).
pub fn permits(phase: Phase, intent: &Intent) -> bool {
    match intent {
        Intent::MoveLeft(_) | Intent::MoveRight(_) | Intent::SetHorizontalTarget(_) => {
            matches!(phase, Phase::Playing | Phase::Paused)
        }
        Intent::Fire | Intent::CycleGun(_) | Intent::EquipGun(_) => phase == Phase::Playing,
        Intent::TogglePause => matches!(phase, Phase::Playing | Phase::Paused),
        Intent::Start | Intent::OpenCredits => phase == Phase::StartScreen,
        Intent::Restart => true,
        Intent::ReturnToMenu => {
            phase.is_terminal() || matches!(phase, Phase::Paused | Phase::Credits)
        }
    }
}

/// Route one intent to the operation that handles it.  Intents the current
/// phase does not permit are dropped.
pub fn apply_intent(session: &mut GameSession, intent: Intent) {
    if !permits(session.phase, &intent) {
        debug!(?intent, phase = ?session.phase, "intent ignored");
        return;
    }
    match intent {
        Intent::MoveLeft(active) => session.input.left = active,
        Intent::MoveRight(active) => session.input.right = active,
        Intent::SetHorizontalTarget(target) => {
            let width = session.width;
            session.input.touch_target = target.map(|x| x.clamp(0.0, width));
        }
        Intent::Fire => firing::fire_bullet(session),
        Intent::CycleGun(direction) => player::cycle_gun(session, direction),
        Intent::EquipGun(index) => player::equip_gun(session, index),
        Intent::TogglePause => toggle_pause(session),
        Intent::Start => start(session),
        Intent::Restart => restart(session),
        Intent::ReturnToMenu => return_to_menu(session),
        Intent::OpenCredits => open_credits(session),
    }
}

// ── Transitions ─────────────────────────────────────────────────────────────

fn enter(session: &mut GameSession, to: Phase) {
    info!(from = ?session.phase, to = ?to, score = session.score, "phase transition");
    session.phase = to;
}

/// Replace the session with a fresh one in `phase`.  Background stars are
/// scenery and carry over.
fn reset_into(session: &mut GameSession, phase: Phase) {
    let mut fresh = GameSession::new(session.width, session.height);
    fresh.stars = std::mem::take(&mut session.stars);
    fresh.phase = session.phase;
    enter(&mut fresh, phase);
    if phase == Phase::Playing {
        spawner::start_spawn_interval(&mut fresh);
    }
    *session = fresh;
}

pub fn start(session: &mut GameSession) {
    if session.phase == Phase::StartScreen {
        reset_into(session, Phase::Playing);
    }
}

/// Throw the current session away and begin a new one, from any phase.
pub fn restart(session: &mut GameSession) {
    reset_into(session, Phase::Playing);
}

pub fn toggle_pause(session: &mut GameSession) {
    match session.phase {
        Phase::Playing => {
            enter(session, Phase::Paused);
            spawner::halt_spawn_interval(session);
        }
        Phase::Paused => {
            enter(session, Phase::Playing);
            spawner::start_spawn_interval(session);
        }
        _ => {}
    }
}

pub fn return_to_menu(session: &mut GameSession) {
    let phase = session.phase;
    if phase.is_terminal() || matches!(phase, Phase::Paused | Phase::Credits) {
        reset_into(session, Phase::StartScreen);
    }
}

pub fn open_credits(session: &mut GameSession) {
    if session.phase == Phase::StartScreen {
        enter(session, Phase::Credits);
    }
}

/// Lose the session.  Every pending deadline is dropped so nothing can
/// mutate the finished session.
pub fn game_over(session: &mut GameSession) {
    if session.phase == Phase::Playing {
        enter(session, Phase::GameOver);
        timers::cancel_all(session);
    }
}

pub fn victory(session: &mut GameSession) {
    if session.phase == Phase::Playing {
        enter(session, Phase::Victory);
        timers::cancel_all(session);
    }
}
