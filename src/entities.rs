//! Game entity types: data plus trivial constructors, no game logic.

use crate::catalog::{
    AssetKey, EnemyKind, ExplosionKind, PickupKind, BOSS, PICKUP_SIZE, PLAYER_BASE_SPEED,
    PLAYER_BOTTOM_OFFSET, PLAYER_MAX_HEALTH, PLAYER_SIZE,
};
use crate::timers::{Deadline, Millis, SessionClock};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Phase {
    StartScreen,
    Credits,
    Playing,
    Paused,
    GameOver,
    Victory,
}

impl Phase {
    /// GameOver and Victory end the session; only a restart or a return to
    /// the menu leaves them.
    pub fn is_terminal(self) -> bool {
        matches!(self, Phase::GameOver | Phase::Victory)
    }
}

// ── Player ──────────────────────────────────────────────────────────────────

#[derive(Clone, Debug, PartialEq)]
pub struct Player {
    pub x: f32,
    pub y: f32,
    /// Collision and render diameter.
    pub size: f32,
    /// Current movement per step; `base_speed` while no speed boost is active.
    pub speed: f32,
    pub base_speed: f32,
    pub health: u32,
    pub max_health: u32,
    pub invulnerability: Deadline,
    pub fire_cooldown: Deadline,
    /// Index into [`crate::catalog::GUNS`].
    pub current_gun: usize,
    /// Owned gun indices, in cycling order.
    pub collected_guns: Vec<usize>,
    pub fire_rate_boost: Deadline,
    pub speed_boost: Deadline,
}

impl Player {
    /// A full-health player centred at the bottom of a `width`×`height` field.
    pub fn new(width: f32, height: f32) -> Player {
        Player {
            x: width / 2.0,
            y: height - PLAYER_BOTTOM_OFFSET,
            size: PLAYER_SIZE,
            speed: PLAYER_BASE_SPEED,
            base_speed: PLAYER_BASE_SPEED,
            health: PLAYER_MAX_HEALTH,
            max_health: PLAYER_MAX_HEALTH,
            invulnerability: Deadline::IDLE,
            fire_cooldown: Deadline::IDLE,
            current_gun: 0,
            collected_guns: vec![0, 1, 2, 3],
            fire_rate_boost: Deadline::IDLE,
            speed_boost: Deadline::IDLE,
        }
    }

    pub fn invulnerable(&self) -> bool {
        self.invulnerability.is_pending()
    }

    pub fn can_shoot(&self) -> bool {
        !self.fire_cooldown.is_pending()
    }
}

// ── Enemies & boss ──────────────────────────────────────────────────────────

#[derive(Clone, Debug, PartialEq)]
pub struct Enemy {
    pub kind: EnemyKind,
    pub x: f32,
    pub y: f32,
    pub size: f32,
    pub health: u32,
    pub max_health: u32,
    /// Downward movement per step.
    pub speed: f32,
    /// Chance per step of firing.
    pub shoot_chance: f32,
    /// Awarded on death.
    pub score: u32,
}

impl Enemy {
    /// Stamp a full-health enemy of `kind` at the given position.
    pub fn new(kind: EnemyKind, x: f32, y: f32) -> Enemy {
        let a = kind.archetype();
        Enemy {
            kind,
            x,
            y,
            size: a.size,
            health: a.max_health,
            max_health: a.max_health,
            speed: a.speed,
            shoot_chance: a.shoot_chance,
            score: a.score,
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Boss {
    pub x: f32,
    pub y: f32,
    pub size: f32,
    pub health: u32,
    pub max_health: u32,
    /// Signed horizontal movement per step.
    pub velocity: f32,
    pub score: u32,
    pub shoot_interval_ms: Millis,
    pub last_shot_at: Millis,
}

impl Boss {
    pub fn new(x: f32, now: Millis) -> Boss {
        Boss {
            x,
            y: BOSS.spawn_y,
            size: BOSS.size,
            health: BOSS.max_health,
            max_health: BOSS.max_health,
            velocity: BOSS.speed,
            score: BOSS.score,
            shoot_interval_ms: BOSS.shoot_interval_ms,
            last_shot_at: now,
        }
    }

    pub fn health_ratio(&self) -> f32 {
        if self.max_health == 0 {
            0.0
        } else {
            self.health as f32 / self.max_health as f32
        }
    }
}

// ── Projectiles ─────────────────────────────────────────────────────────────

/// A player projectile.  Travels upward.
#[derive(Clone, Debug, PartialEq)]
pub struct Bullet {
    pub x: f32,
    pub y: f32,
    pub radius: f32,
    pub speed: f32,
    pub damage: u32,
    pub asset: AssetKey,
    /// Rockets deal splash damage on impact.
    pub is_rocket: bool,
}

/// An enemy or boss projectile.  Travels downward.
#[derive(Clone, Debug, PartialEq)]
pub struct EnemyBullet {
    pub x: f32,
    pub y: f32,
    pub radius: f32,
    pub speed: f32,
    pub asset: AssetKey,
}

// ── Pickups, explosions, stars ──────────────────────────────────────────────

#[derive(Clone, Debug, PartialEq)]
pub struct Pickup {
    pub x: f32,
    pub y: f32,
    pub radius: f32,
    pub kind: PickupKind,
}

impl Pickup {
    pub fn new(kind: PickupKind, x: f32, y: f32) -> Pickup {
        Pickup {
            x,
            y,
            radius: PICKUP_SIZE / 2.0,
            kind,
        }
    }

    pub fn asset(&self) -> AssetKey {
        self.kind.asset()
    }
}

/// Expanding, fading ring.  Never collides with anything.
#[derive(Clone, Debug, PartialEq)]
pub struct Explosion {
    pub x: f32,
    pub y: f32,
    pub radius: f32,
    pub max_radius: f32,
    pub alpha: f32,
    pub kind: ExplosionKind,
    pub started_at: Millis,
    pub duration_ms: Millis,
}

impl Explosion {
    /// `max_radius` only matters for kinds without a fixed radius.
    pub fn new(kind: ExplosionKind, x: f32, y: f32, max_radius: f32, now: Millis) -> Explosion {
        Explosion {
            x,
            y,
            radius: 1.0,
            max_radius: kind.fixed_radius().unwrap_or(max_radius),
            alpha: 1.0,
            kind,
            started_at: now,
            duration_ms: kind.duration_ms(),
        }
    }
}

/// Background star.
#[derive(Clone, Debug, PartialEq)]
pub struct Star {
    pub x: f32,
    pub y: f32,
    pub size: f32,
    pub speed: f32,
}

// ── Input ───────────────────────────────────────────────────────────────────

/// Held intents, sampled by every update step.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct InputState {
    pub left: bool,
    pub right: bool,
    /// Touch-drag target x; `Some` also means the touch is held.
    pub touch_target: Option<f32>,
}

// ── Master game state ───────────────────────────────────────────────────────

/// The entire session.  Owned by the driver and handed to each subsystem by
/// mutable reference; replaced wholesale on restart.
#[derive(Clone, Debug)]
pub struct GameSession {
    pub phase: Phase,
    pub score: u32,
    pub player: Player,
    pub bullets: Vec<Bullet>,
    pub enemy_bullets: Vec<EnemyBullet>,
    pub enemies: Vec<Enemy>,
    pub pickups: Vec<Pickup>,
    pub explosions: Vec<Explosion>,
    pub stars: Vec<Star>,
    pub boss: Option<Boss>,
    pub clock: SessionClock,
    /// Next ordinary enemy spawn; idle while the interval is halted.
    pub spawn_timer: Deadline,
    pub input: InputState,
    pub width: f32,
    pub height: f32,
}

impl GameSession {
    /// A brand-new session on the start screen, with no stars.
    pub fn new(width: f32, height: f32) -> GameSession {
        GameSession {
            phase: Phase::StartScreen,
            score: 0,
            player: Player::new(width, height),
            bullets: Vec::new(),
            enemy_bullets: Vec::new(),
            enemies: Vec::new(),
            pickups: Vec::new(),
            explosions: Vec::new(),
            stars: Vec::new(),
            boss: None,
            clock: SessionClock::default(),
            spawn_timer: Deadline::IDLE,
            input: InputState::default(),
            width,
            height,
        }
    }

    pub fn is_boss_active(&self) -> bool {
        self.boss.is_some()
    }

    pub fn now(&self) -> Millis {
        self.clock.now()
    }
}
