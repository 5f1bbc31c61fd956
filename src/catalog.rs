//! Static archetype tables and the visual-asset manifest.  Pure data, no
//! behaviour.

// ── Gameplay constants ──────────────────────────────────────────────────────

/// Score at which the boss arrives.
pub const BOSS_SCORE_THRESHOLD: u32 = 500;
/// Milliseconds of play time between ordinary enemy spawns.
pub const ENEMY_SPAWN_INTERVAL_MS: u64 = 4000;
/// Duration of the fire-rate and speed boosts.
pub const BOOST_DURATION_MS: u64 = 5000;
/// Invulnerability window after the player takes a hit.
pub const INVULNERABILITY_MS: u64 = 1500;
/// Probability that a killed enemy drops a pickup.
pub const PICKUP_DROP_CHANCE: f32 = 0.15;
/// Pickups fall this many units per step.
pub const PICKUP_FALL_SPEED: f32 = 3.0;
pub const ROCKET_SPLASH_RADIUS: f32 = 100.0;
pub const ROCKET_SPLASH_DAMAGE: u32 = 1;
/// Horizontal offset between the shots of a 3-way enemy volley.
pub const ENEMY_SPREAD_OFFSET: f32 = 15.0;

pub const STAR_MAX_SPEED: f32 = 0.5;

// ── Player ──────────────────────────────────────────────────────────────────

pub const PLAYER_SIZE: f32 = 100.0;
pub const PLAYER_BASE_SPEED: f32 = 8.0;
pub const PLAYER_MAX_HEALTH: u32 = 5;
/// Distance from the bottom edge to the player's centre line.
pub const PLAYER_BOTTOM_OFFSET: f32 = 100.0;

// ── Visual assets ───────────────────────────────────────────────────────────

/// Every visual the engine can ask a renderer for.  The engine only ever
/// refers to these keys; how (or whether) they resolve is the renderer's
/// business.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum AssetKey {
    Player,
    Boss,
    BulletZapper,
    BulletRocket,
    BulletBigSpace,
    BulletAutoCannon,
    Fighter,
    Scout,
    Frigate,
    TorpedoShip,
    Battlecruiser,
    Dreadnought,
    PickupHealth,
    PickupFireRate,
    PickupSpeed,
}

/// Key name and conventional image file for every asset.
pub const ASSET_MANIFEST: [(AssetKey, &str, &str); 15] = [
    (AssetKey::PickupHealth, "pickup_health", "pickup_health.png"),
    (AssetKey::PickupFireRate, "pickup_firerate", "pickup_firerate.png"),
    (AssetKey::PickupSpeed, "pickup_speed", "pickup_speed.png"),
    (AssetKey::Player, "player", "player_ship.png"),
    (AssetKey::Boss, "boss", "boss.png"),
    (AssetKey::BulletZapper, "bullet_zapper", "gun_zapper.png"),
    (AssetKey::BulletRocket, "bullet_rocket", "gun_rocket.png"),
    (AssetKey::BulletBigSpace, "bullet_bigspace", "gun_bigspace.png"),
    (AssetKey::BulletAutoCannon, "bullet_autocannon", "gun_autocannon.png"),
    (AssetKey::Fighter, "fighter", "enemy_fighter.png"),
    (AssetKey::Scout, "scout", "enemy_scout.png"),
    (AssetKey::Frigate, "frigate", "enemy_frigate.png"),
    (AssetKey::TorpedoShip, "torpedo_ship", "enemy_torpedoship.png"),
    (AssetKey::Battlecruiser, "battlecruiser", "enemy_battlecruiser.png"),
    (AssetKey::Dreadnought, "dreadnought", "enemy_dreadnought.png"),
];

impl AssetKey {
    pub fn name(self) -> &'static str {
        ASSET_MANIFEST
            .iter()
            .find(|(key, _, _)| *key == self)
            .map(|(_, name, _)| *name)
            .unwrap_or("unknown")
    }

    pub fn from_name(name: &str) -> Option<AssetKey> {
        ASSET_MANIFEST
            .iter()
            .find(|(_, n, _)| *n == name)
            .map(|(key, _, _)| *key)
    }
}

// ── Enemies ─────────────────────────────────────────────────────────────────

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum EnemyKind {
    Fighter,
    Scout,
    Frigate,
    TorpedoShip,
    Battlecruiser,
    Dreadnought,
}

/// Template stamped onto every enemy of a kind at spawn time.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct EnemyArchetype {
    pub size: f32,
    pub max_health: u32,
    pub speed: f32,
    pub score: u32,
    pub shoot_chance: f32,
    pub asset: AssetKey,
}

/// Shape of the shots an enemy kind fires.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct EnemyShot {
    pub radius: f32,
    pub speed: f32,
    pub asset: AssetKey,
    /// 1 for a single shot, 3 for a horizontal spread.
    pub count: u32,
}

impl EnemyKind {
    pub const ALL: [EnemyKind; 6] = [
        EnemyKind::Fighter,
        EnemyKind::Scout,
        EnemyKind::Frigate,
        EnemyKind::TorpedoShip,
        EnemyKind::Battlecruiser,
        EnemyKind::Dreadnought,
    ];

    pub fn archetype(self) -> EnemyArchetype {
        let (size, max_health, speed, score, shoot_chance, asset) = match self {
            EnemyKind::Fighter => (75.0, 1, 1.5, 10, 0.005, AssetKey::Fighter),
            EnemyKind::Scout => (85.0, 2, 1.2, 20, 0.003, AssetKey::Scout),
            EnemyKind::Frigate => (100.0, 4, 0.8, 40, 0.005, AssetKey::Frigate),
            EnemyKind::TorpedoShip => (100.0, 3, 0.6, 50, 0.008, AssetKey::TorpedoShip),
            EnemyKind::Battlecruiser => (135.0, 8, 0.5, 80, 0.003, AssetKey::Battlecruiser),
            EnemyKind::Dreadnought => (175.0, 12, 0.3, 120, 0.001, AssetKey::Dreadnought),
        };
        EnemyArchetype {
            size,
            max_health,
            speed,
            score,
            shoot_chance,
            asset,
        }
    }

    /// Bullet stats come from this table, never from the enemy's own stats.
    pub fn shot(self) -> EnemyShot {
        let (radius, speed, asset) = match self {
            EnemyKind::Fighter | EnemyKind::Scout => (10.0, 3.5, AssetKey::BulletZapper),
            EnemyKind::Frigate | EnemyKind::TorpedoShip => (10.0, 3.0, AssetKey::BulletBigSpace),
            EnemyKind::Battlecruiser | EnemyKind::Dreadnought => {
                (15.0, 2.0, AssetKey::BulletRocket)
            }
        };
        let count = match self {
            EnemyKind::Frigate | EnemyKind::Battlecruiser => 3,
            _ => 1,
        };
        EnemyShot {
            radius,
            speed,
            asset,
            count,
        }
    }

    /// Map a uniform roll in [0, 1) onto the cumulative spawn bands.
    pub fn from_roll(roll: f32) -> EnemyKind {
        if roll < 0.35 {
            EnemyKind::Fighter
        } else if roll < 0.60 {
            EnemyKind::Scout
        } else if roll < 0.75 {
            EnemyKind::Frigate
        } else if roll < 0.88 {
            EnemyKind::TorpedoShip
        } else if roll < 0.96 {
            EnemyKind::Battlecruiser
        } else {
            EnemyKind::Dreadnought
        }
    }
}

// ── Boss ────────────────────────────────────────────────────────────────────

pub struct BossArchetype {
    pub size: f32,
    pub max_health: u32,
    /// Horizontal speed; the sign flips at each wall.
    pub speed: f32,
    pub score: u32,
    pub shoot_interval_ms: u64,
    pub spawn_y: f32,
    pub shot_radius: f32,
    pub shot_speed: f32,
    pub shot_asset: AssetKey,
}

pub const BOSS: BossArchetype = BossArchetype {
    size: 250.0,
    max_health: 150,
    speed: 0.5,
    score: 1000,
    shoot_interval_ms: 500,
    spawn_y: 100.0,
    shot_radius: 20.0,
    shot_speed: 2.5,
    shot_asset: AssetKey::BulletRocket,
};

// ── Guns ────────────────────────────────────────────────────────────────────

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GunArchetype {
    pub name: &'static str,
    pub damage: u32,
    /// Cooldown between volleys, in milliseconds.
    pub delay_ms: u64,
    /// Projectiles per volley.
    pub count: u32,
    /// Horizontal distance between neighbouring projectiles.
    pub spread: f32,
    /// Projectile radius.
    pub size: f32,
    pub speed: f32,
    pub asset: AssetKey,
    pub is_rocket: bool,
}

/// The immutable base catalog.  Power-ups never touch it; see
/// [`crate::player::effective_gun`].
pub const GUNS: [GunArchetype; 4] = [
    GunArchetype {
        name: "Zapper",
        damage: 1,
        delay_ms: 250,
        count: 1,
        spread: 0.0,
        size: 10.0,
        speed: 7.0,
        asset: AssetKey::BulletZapper,
        is_rocket: false,
    },
    GunArchetype {
        name: "Rocket",
        damage: 3,
        delay_ms: 500,
        count: 1,
        spread: 0.0,
        size: 30.0,
        speed: 5.0,
        asset: AssetKey::BulletRocket,
        is_rocket: true,
    },
    GunArchetype {
        name: "BigSpaceGun",
        damage: 1,
        delay_ms: 300,
        count: 3,
        spread: 15.0,
        size: 10.0,
        speed: 7.0,
        asset: AssetKey::BulletBigSpace,
        is_rocket: false,
    },
    GunArchetype {
        name: "AutoCannon",
        damage: 2,
        delay_ms: 100,
        count: 2,
        spread: 5.0,
        size: 10.0,
        speed: 8.0,
        asset: AssetKey::BulletAutoCannon,
        is_rocket: false,
    },
];

// ── Pickups ─────────────────────────────────────────────────────────────────

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum PickupKind {
    /// Restores one point of health, up to the maximum.
    Health,
    /// Halves every gun's cooldown for [`BOOST_DURATION_MS`].
    FireRate,
    /// Doubles movement speed for [`BOOST_DURATION_MS`].
    Speed,
}

/// Diameter of every pickup sprite.
pub const PICKUP_SIZE: f32 = 40.0;

impl PickupKind {
    pub const ALL: [PickupKind; 3] = [PickupKind::Health, PickupKind::FireRate, PickupKind::Speed];

    pub fn asset(self) -> AssetKey {
        match self {
            PickupKind::Health => AssetKey::PickupHealth,
            PickupKind::FireRate => AssetKey::PickupFireRate,
            PickupKind::Speed => AssetKey::PickupSpeed,
        }
    }
}

// ── Explosions ──────────────────────────────────────────────────────────────

/// Colour class of an explosion; purely cosmetic.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ExplosionKind {
    BossDeath,
    EnemyDeath,
    RocketImpact,
    PlayerHit,
}

impl ExplosionKind {
    pub fn duration_ms(self) -> u64 {
        match self {
            ExplosionKind::BossDeath => 1000,
            ExplosionKind::EnemyDeath | ExplosionKind::RocketImpact => 500,
            ExplosionKind::PlayerHit => 200,
        }
    }

    /// Final radius, or `None` for enemy deaths, which grow to the size of
    /// the enemy that died.
    pub fn fixed_radius(self) -> Option<f32> {
        match self {
            ExplosionKind::BossDeath => Some(150.0),
            ExplosionKind::EnemyDeath => None,
            ExplosionKind::RocketImpact => Some(ROCKET_SPLASH_RADIUS),
            ExplosionKind::PlayerHit => Some(20.0),
        }
    }
}
