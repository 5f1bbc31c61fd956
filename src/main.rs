mod display;

use std::collections::HashMap;
use std::fs::File;
use std::io::{stdout, BufWriter, Write};
use std::sync::{mpsc, Mutex};
use std::thread;
use std::time::{Duration, Instant};

use crossterm::{
    cursor,
    event::{
        self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEvent, KeyEventKind,
        KeyModifiers, KeyboardEnhancementFlags, MouseEvent, MouseEventKind,
        PopKeyboardEnhancementFlags, PushKeyboardEnhancementFlags,
    },
    terminal, ExecutableCommand,
};
use rand::thread_rng;
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

use space_shooter::compute::{init_session, tick};
use space_shooter::config::GameConfig;
use space_shooter::entities::{GameSession, Phase};
use space_shooter::error::ShooterResult;
use space_shooter::phase::{apply_intent, Intent};
use space_shooter::player::CycleDirection;

use display::GlyphSet;

/// A key is considered "held" if its last press/repeat event arrived within
/// this window.  Covers terminals that don't emit key-release events: the OS
/// key-repeat rate is ≥ 15 Hz, so the window is refreshed before it lapses
/// whatever the configured frame time.
const HOLD_WINDOW: Duration = Duration::from_millis(130);

/// Returns true if `key` was seen within `HOLD_WINDOW` of `now`.
fn is_held(last_seen: &HashMap<KeyCode, Instant>, key: &KeyCode, now: Instant) -> bool {
    last_seen
        .get(key)
        .map(|&seen| now.saturating_duration_since(seen) <= HOLD_WINDOW)
        .unwrap_or(false)
}

fn any_held(last_seen: &HashMap<KeyCode, Instant>, keys: &[KeyCode], now: Instant) -> bool {
    keys.iter().any(|k| is_held(last_seen, k, now))
}

// ── Key → intent mapping ──────────────────────────────────────────────────────

enum Command {
    Intent(Intent),
    Quit,
}

/// One-shot key presses.  Held keys (movement, fire) are handled per frame.
fn map_press(code: KeyCode, modifiers: KeyModifiers, phase: Phase) -> Option<Command> {
    if let KeyCode::Char('c') = code {
        if modifiers.contains(KeyModifiers::CONTROL) {
            return Some(Command::Quit);
        }
    }
    let intent = match (phase, code) {
        (Phase::StartScreen, KeyCode::Enter) => Intent::Start,
        (Phase::StartScreen, KeyCode::Char('c') | KeyCode::Char('C')) => Intent::OpenCredits,
        (Phase::StartScreen, KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc) => {
            return Some(Command::Quit);
        }
        (Phase::Credits, KeyCode::Esc | KeyCode::Enter | KeyCode::Backspace) => {
            Intent::ReturnToMenu
        }
        (Phase::Playing | Phase::Paused, KeyCode::Esc | KeyCode::Char('p')) => {
            Intent::TogglePause
        }
        (Phase::Playing, KeyCode::Char('e')) => Intent::CycleGun(CycleDirection::Next),
        (Phase::Playing, KeyCode::Char('q')) => Intent::CycleGun(CycleDirection::Previous),
        (Phase::Playing, KeyCode::Char(c @ '1'..='4')) => {
            Intent::EquipGun(c as usize - '1' as usize)
        }
        (Phase::Paused | Phase::GameOver | Phase::Victory, KeyCode::Char('r')) => Intent::Restart,
        (Phase::Paused | Phase::GameOver | Phase::Victory, KeyCode::Char('m')) => {
            Intent::ReturnToMenu
        }
        _ => return None,
    };
    Some(Command::Intent(intent))
}

/// Mouse drags steer like a touch: pressing or dragging sets the target,
/// releasing clears it.
fn map_mouse(ev: MouseEvent, world_w: f32) -> std::io::Result<Option<Intent>> {
    let intent = match ev.kind {
        MouseEventKind::Down(_) | MouseEventKind::Drag(_) => Intent::SetHorizontalTarget(Some(
            display::column_to_world_x(ev.column, world_w)?,
        )),
        MouseEventKind::Up(_) => Intent::SetHorizontalTarget(None),
        _ => return Ok(None),
    };
    Ok(Some(intent))
}

// ── Game loop ─────────────────────────────────────────────────────────────────

/// Input model: a `last_seen` map records when the last press/repeat event
/// arrived for every key.  Each frame the still-"fresh" keys are turned into
/// held intents, so Space + A/D can be held together.
fn game_loop<W: Write>(
    out: &mut W,
    session: &mut GameSession,
    rx: &mpsc::Receiver<Event>,
    glyphs: &GlyphSet,
    frame_time: Duration,
) -> ShooterResult<()> {
    let mut rng = thread_rng();
    let mut last_seen: HashMap<KeyCode, Instant> = HashMap::new();
    let mut last = Instant::now();

    loop {
        let frame_start = Instant::now();

        // ── Drain all pending input events (non-blocking) ─────────────────────
        while let Ok(ev) = rx.try_recv() {
            match ev {
                Event::Key(KeyEvent {
                    code,
                    kind,
                    modifiers,
                    ..
                }) => match kind {
                    KeyEventKind::Press => {
                        last_seen.insert(code, Instant::now());
                        match map_press(code, modifiers, session.phase) {
                            Some(Command::Quit) => return Ok(()),
                            Some(Command::Intent(intent)) => apply_intent(session, intent),
                            None => {}
                        }
                    }
                    KeyEventKind::Repeat => {
                        last_seen.insert(code, Instant::now());
                    }
                    KeyEventKind::Release => {
                        last_seen.remove(&code);
                    }
                },
                Event::Mouse(mouse) => {
                    if let Some(intent) = map_mouse(mouse, session.width)? {
                        apply_intent(session, intent);
                    }
                }
                _ => {}
            }
        }

        // ── Held keys → intents ───────────────────────────────────────────────
        if session.phase == Phase::Playing {
            let left = any_held(
                &last_seen,
                &[KeyCode::Left, KeyCode::Char('a'), KeyCode::Char('A')],
                frame_start,
            );
            let right = any_held(
                &last_seen,
                &[KeyCode::Right, KeyCode::Char('d'), KeyCode::Char('D')],
                frame_start,
            );
            apply_intent(session, Intent::MoveLeft(left));
            apply_intent(session, Intent::MoveRight(right));
            if is_held(&last_seen, &KeyCode::Char(' '), frame_start) {
                apply_intent(session, Intent::Fire);
            }
        }

        let now = Instant::now();
        let dt = now.duration_since(last).as_millis() as u64;
        last = now;
        tick(session, dt, &mut rng);

        display::render(out, &session.snapshot(), glyphs)?;

        let elapsed = frame_start.elapsed();
        if elapsed < frame_time {
            thread::sleep(frame_time - elapsed);
        }
    }
}

// ── Entry point ───────────────────────────────────────────────────────────────

fn init_logging(config: &GameConfig) -> std::io::Result<()> {
    let file = File::create(config.log_path())?;
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::from_default_env().add_directive(tracing::Level::INFO.into()),
        )
        .with_ansi(false)
        .with_writer(Mutex::new(file))
        .init();
    Ok(())
}

fn main() -> ShooterResult<()> {
    let path = GameConfig::default_path();
    let loaded = GameConfig::load(&path);
    let config = loaded.as_ref().cloned().unwrap_or_default();

    // stdout belongs to the game; without a log file we run silent.
    if let Err(e) = init_logging(&config) {
        eprintln!("could not open log file {}: {e}", config.log_path().display());
    }
    if let Err(e) = &loaded {
        warn!("{e}; using default config");
    }

    let glyphs = GlyphSet::load(&config.glyphs);
    let mut session = init_session(
        config.width,
        config.height,
        config.star_count,
        &mut thread_rng(),
    );

    let mut out = BufWriter::new(stdout());
    terminal::enable_raw_mode()?;
    out.execute(terminal::EnterAlternateScreen)?;
    out.execute(cursor::Hide)?;
    out.execute(EnableMouseCapture)?;

    // Request key-release (and key-repeat) events from the terminal.
    // Kitty-protocol terminals support this; others fall back gracefully.
    let keyboard_enhanced = out
        .execute(PushKeyboardEnhancementFlags(
            KeyboardEnhancementFlags::REPORT_EVENT_TYPES,
        ))
        .is_ok();

    // Dedicate a thread to blocking event reads, sending them through a
    // channel so the game loop never blocks on I/O.
    let (tx, rx) = mpsc::channel::<Event>();
    thread::spawn(move || {
        while let Ok(ev) = event::read() {
            if tx.send(ev).is_err() {
                break; // receiver dropped → program exiting
            }
        }
    });

    info!(width = config.width, height = config.height, "starting");
    let result = game_loop(
        &mut out,
        &mut session,
        &rx,
        &glyphs,
        Duration::from_millis(config.frame_ms),
    );

    // Always restore the terminal
    if keyboard_enhanced {
        let _ = out.execute(PopKeyboardEnhancementFlags);
    }
    let _ = out.execute(DisableMouseCapture);
    let _ = out.execute(cursor::Show);
    let _ = out.execute(terminal::LeaveAlternateScreen);
    let _ = terminal::disable_raw_mode();

    if let Err(e) = &result {
        error!("{e}");
    }
    info!(score = session.score, "exiting");
    result
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hold_window_is_measured_in_time_not_frames() {
        let pressed = Instant::now();
        let mut last_seen = HashMap::new();
        last_seen.insert(KeyCode::Left, pressed);

        assert!(is_held(&last_seen, &KeyCode::Left, pressed));
        assert!(is_held(&last_seen, &KeyCode::Left, pressed + HOLD_WINDOW));
        // One slow 100 ms frame later the key is still fresh; a few later it is not
        assert!(is_held(&last_seen, &KeyCode::Left, pressed + Duration::from_millis(100)));
        assert!(!is_held(&last_seen, &KeyCode::Left, pressed + Duration::from_millis(300)));
        assert!(!is_held(&last_seen, &KeyCode::Right, pressed));
    }

    #[test]
    fn any_held_checks_every_binding() {
        let now = Instant::now();
        let mut last_seen = HashMap::new();
        last_seen.insert(KeyCode::Char('a'), now);
        let left = [KeyCode::Left, KeyCode::Char('a'), KeyCode::Char('A')];
        assert!(any_held(&last_seen, &left, now));
        assert!(!any_held(&last_seen, &left, now + Duration::from_secs(1)));
    }

    #[test]
    fn key_map_depends_on_phase() {
        let none = KeyModifiers::NONE;
        assert!(matches!(
            map_press(KeyCode::Enter, none, Phase::StartScreen),
            Some(Command::Intent(Intent::Start))
        ));
        assert!(matches!(
            map_press(KeyCode::Char('q'), none, Phase::StartScreen),
            Some(Command::Quit)
        ));
        assert!(matches!(
            map_press(KeyCode::Char('q'), none, Phase::Playing),
            Some(Command::Intent(Intent::CycleGun(CycleDirection::Previous)))
        ));
        assert!(matches!(
            map_press(KeyCode::Char('3'), none, Phase::Playing),
            Some(Command::Intent(Intent::EquipGun(2)))
        ));
        assert!(matches!(
            map_press(KeyCode::Char('c'), KeyModifiers::CONTROL, Phase::Playing),
            Some(Command::Quit)
        ));
        assert!(map_press(KeyCode::Char('r'), none, Phase::Playing).is_none());
    }
}
