//! Rendering layer.  All terminal output lives here.
//!
//! Each function receives a mutable writer and an immutable snapshot of the
//! session.  No game logic is performed; this module only maps world
//! coordinates onto terminal cells and visual keys onto glyphs.

use std::collections::HashMap;
use std::io::Write;

use crossterm::{
    cursor,
    style::{self, Color, Print},
    terminal, QueueableCommand,
};
use tracing::warn;

use space_shooter::catalog::{AssetKey, ExplosionKind, ASSET_MANIFEST};
use space_shooter::entities::Phase;
use space_shooter::snapshot::Snapshot;

// ── Colour palette ────────────────────────────────────────────────────────────

const C_BORDER: Color = Color::DarkBlue;
const C_HUD_SCORE: Color = Color::Yellow;
const C_HUD_HEALTH: Color = Color::Red;
const C_HUD_GUN: Color = Color::Cyan;
const C_BOOST: Color = Color::Rgb { r: 255, g: 69, b: 0 };
const C_STAR: Color = Color::DarkGrey;
const C_HINT: Color = Color::DarkGrey;
const C_TITLE: Color = Color::Green;

/// Drawn for any visual whose glyph could not be resolved.
pub const PLACEHOLDER_GLYPH: &str = "?";

// ── Glyphs ────────────────────────────────────────────────────────────────────

/// Terminal stand-ins for the engine's visual keys.
pub struct GlyphSet {
    glyphs: HashMap<AssetKey, String>,
}

fn default_glyph(key: AssetKey) -> &'static str {
    match key {
        AssetKey::Player => "/▲\\",
        AssetKey::Boss => "<[■■■]>",
        AssetKey::BulletZapper => "|",
        AssetKey::BulletRocket => "♦",
        AssetKey::BulletBigSpace => "¦",
        AssetKey::BulletAutoCannon => "'",
        AssetKey::Fighter => "«▼»",
        AssetKey::Scout => "(v)",
        AssetKey::Frigate => "[▼]",
        AssetKey::TorpedoShip => "{Y}",
        AssetKey::Battlecruiser => "╠▼╣",
        AssetKey::Dreadnought => "◄█►",
        AssetKey::PickupHealth => "♥",
        AssetKey::PickupFireRate => "!",
        AssetKey::PickupSpeed => "»",
    }
}

fn colour_for(key: AssetKey) -> Color {
    match key {
        AssetKey::Player => Color::White,
        AssetKey::Boss => Color::Magenta,
        AssetKey::BulletZapper => Color::Yellow,
        AssetKey::BulletRocket => Color::Rgb { r: 255, g: 69, b: 0 },
        AssetKey::BulletBigSpace => Color::Magenta,
        AssetKey::BulletAutoCannon => Color::Cyan,
        AssetKey::Fighter => Color::Red,
        AssetKey::Scout => Color::Rgb { r: 255, g: 69, b: 0 },
        AssetKey::Frigate => Color::Rgb { r: 255, g: 136, b: 0 },
        AssetKey::TorpedoShip => Color::Magenta,
        AssetKey::Battlecruiser => Color::Blue,
        AssetKey::Dreadnought => Color::DarkMagenta,
        AssetKey::PickupHealth => Color::Red,
        AssetKey::PickupFireRate => Color::Yellow,
        AssetKey::PickupSpeed => Color::Green,
    }
}

impl GlyphSet {
    /// Resolve every manifest key, applying `overrides` (keyed by visual-key
    /// name).  Unknown names and empty glyphs are logged and fall back; they
    /// never stop the game.
    pub fn load(overrides: &HashMap<String, String>) -> GlyphSet {
        for name in overrides.keys() {
            if AssetKey::from_name(name).is_none() {
                warn!(name = %name, "glyph override for unknown visual key ignored");
            }
        }

        let glyphs = ASSET_MANIFEST
            .iter()
            .map(|(key, name, _)| {
                let glyph = match overrides.get(*name) {
                    Some(g) if g.trim().is_empty() => {
                        warn!(name = %name, "empty glyph; using placeholder");
                        PLACEHOLDER_GLYPH.to_string()
                    }
                    Some(g) => g.clone(),
                    None => default_glyph(*key).to_string(),
                };
                (*key, glyph)
            })
            .collect();
        GlyphSet { glyphs }
    }

    pub fn get(&self, key: AssetKey) -> &str {
        self.glyphs
            .get(&key)
            .map(String::as_str)
            .unwrap_or(PLACEHOLDER_GLYPH)
    }
}

// ── World → terminal mapping ──────────────────────────────────────────────────

/// Maps world coordinates into the bordered play area (rows 2 .. h-3).
struct Viewport {
    cols: u16,
    rows: u16,
    world_w: f32,
    world_h: f32,
}

impl Viewport {
    fn new(snap: &Snapshot<'_>, cols: u16, rows: u16) -> Viewport {
        Viewport {
            cols,
            rows,
            world_w: snap.width,
            world_h: snap.height,
        }
    }

    fn inner_cols(&self) -> f32 {
        self.cols.saturating_sub(2).max(1) as f32
    }

    fn inner_rows(&self) -> f32 {
        self.rows.saturating_sub(4).max(1) as f32
    }

    /// Cell for a world point, or `None` if it falls outside the play area.
    fn cell(&self, x: f32, y: f32) -> Option<(u16, u16)> {
        if x < 0.0 || y < 0.0 || x > self.world_w || y > self.world_h {
            return None;
        }
        let col = 1.0 + (x / self.world_w * self.inner_cols()).min(self.inner_cols() - 1.0);
        let row = 2.0 + (y / self.world_h * self.inner_rows()).min(self.inner_rows() - 1.0);
        Some((col as u16, row as u16))
    }

    /// Inverse of [`Viewport::cell`] for the horizontal axis.
    fn world_x(&self, col: u16) -> f32 {
        (col.saturating_sub(1) as f32 + 0.5) / self.inner_cols() * self.world_w
    }
}

/// World x under terminal column `col`, for mouse-drag steering.
pub fn column_to_world_x(col: u16, world_w: f32) -> std::io::Result<f32> {
    let (cols, _) = terminal::size()?;
    let vp = Viewport {
        cols,
        rows: 0,
        world_w,
        world_h: 1.0,
    };
    Ok(vp.world_x(col))
}

// ── Public entry point ────────────────────────────────────────────────────────

/// Render one complete frame.
pub fn render<W: Write>(
    out: &mut W,
    snap: &Snapshot<'_>,
    glyphs: &GlyphSet,
) -> std::io::Result<()> {
    let (cols, rows) = terminal::size()?;
    let vp = Viewport::new(snap, cols, rows);

    out.queue(terminal::Clear(terminal::ClearType::All))?;
    draw_border(out, &vp)?;
    draw_stars(out, snap, &vp)?;

    match snap.phase {
        Phase::StartScreen => draw_title(out, &vp)?,
        Phase::Credits => draw_credits(out, &vp)?,
        _ => {
            draw_hud(out, snap, &vp)?;
            draw_entities(out, snap, &vp, glyphs)?;
            draw_explosions(out, snap, &vp)?;
            match snap.phase {
                Phase::Paused => draw_banner(out, &vp, "PAUSED", Color::Yellow, None)?,
                Phase::GameOver => {
                    draw_banner(out, &vp, "GAME  OVER", Color::Red, Some(snap.score))?
                }
                Phase::Victory => draw_banner(
                    out,
                    &vp,
                    "VICTORY! You defeated the Boss!",
                    Color::Green,
                    Some(snap.score),
                )?,
                _ => {}
            }
        }
    }

    draw_controls_hint(out, snap.phase, &vp)?;

    // Park cursor in a harmless spot and flush
    out.queue(style::ResetColor)?;
    out.queue(cursor::MoveTo(0, rows.saturating_sub(1)))?;
    out.flush()?;
    Ok(())
}

// ── Border & background ───────────────────────────────────────────────────────

fn draw_border<W: Write>(out: &mut W, vp: &Viewport) -> std::io::Result<()> {
    let w = vp.cols as usize;
    let h = vp.rows;

    out.queue(style::SetForegroundColor(C_BORDER))?;
    out.queue(cursor::MoveTo(0, 1))?;
    out.queue(Print(format!("┌{}┐", "─".repeat(w.saturating_sub(2)))))?;
    out.queue(cursor::MoveTo(0, h.saturating_sub(2)))?;
    out.queue(Print(format!("└{}┘", "─".repeat(w.saturating_sub(2)))))?;

    for row in 2..h.saturating_sub(2) {
        out.queue(cursor::MoveTo(0, row))?;
        out.queue(Print("│"))?;
        out.queue(cursor::MoveTo(vp.cols.saturating_sub(1), row))?;
        out.queue(Print("│"))?;
    }
    Ok(())
}

fn draw_stars<W: Write>(out: &mut W, snap: &Snapshot<'_>, vp: &Viewport) -> std::io::Result<()> {
    out.queue(style::SetForegroundColor(C_STAR))?;
    for star in snap.stars {
        if let Some((col, row)) = vp.cell(star.x, star.y) {
            out.queue(cursor::MoveTo(col, row))?;
            out.queue(Print(if star.size > 1.5 { "+" } else { "." }))?;
        }
    }
    Ok(())
}

// ── HUD (row 0) ───────────────────────────────────────────────────────────────

fn draw_hud<W: Write>(out: &mut W, snap: &Snapshot<'_>, vp: &Viewport) -> std::io::Result<()> {
    out.queue(cursor::MoveTo(1, 0))?;
    out.queue(style::SetForegroundColor(C_HUD_SCORE))?;
    out.queue(Print(format!("Score:{:>6}", snap.score)))?;

    out.queue(style::SetForegroundColor(C_HUD_GUN))?;
    out.queue(Print(format!("  Gun: {}", snap.player.gun_name)))?;

    let mut status = String::new();
    if let Some(left) = snap.player.fire_rate_boost_left {
        status.push_str(&format!(" [FAST SHOOT {}s]", left.div_ceil(1000)));
    }
    if let Some(left) = snap.player.speed_boost_left {
        status.push_str(&format!(" [HIGH SPEED {}s]", left.div_ceil(1000)));
    }
    if !status.is_empty() {
        out.queue(style::SetForegroundColor(C_BOOST))?;
        out.queue(Print(&status))?;
    }

    let hearts = "♥".repeat(snap.player.health as usize);
    let right = format!("Health:{hearts}");
    let rx = vp.cols.saturating_sub(right.chars().count() as u16 + 1);
    out.queue(cursor::MoveTo(rx, 0))?;
    out.queue(style::SetForegroundColor(C_HUD_HEALTH))?;
    out.queue(Print(&right))?;

    if let Some(boss) = &snap.boss {
        // Boss health bar on the top border row
        let total = vp.cols.saturating_sub(4) as usize;
        let filled = (total as f32 * boss.health_ratio).round() as usize;
        out.queue(cursor::MoveTo(2, 1))?;
        out.queue(style::SetForegroundColor(Color::Red))?;
        out.queue(Print("█".repeat(filled.min(total))))?;
    }
    Ok(())
}

// ── Entities ──────────────────────────────────────────────────────────────────

fn draw_glyph<W: Write>(
    out: &mut W,
    vp: &Viewport,
    x: f32,
    y: f32,
    key: AssetKey,
    glyphs: &GlyphSet,
) -> std::io::Result<()> {
    let Some((col, row)) = vp.cell(x, y) else {
        return Ok(());
    };
    let glyph = glyphs.get(key);
    let half = glyph.chars().count() as u16 / 2;
    let col = col.saturating_sub(half).max(1);
    out.queue(cursor::MoveTo(col, row))?;
    out.queue(style::SetForegroundColor(colour_for(key)))?;
    out.queue(Print(glyph))?;
    Ok(())
}

fn draw_entities<W: Write>(
    out: &mut W,
    snap: &Snapshot<'_>,
    vp: &Viewport,
    glyphs: &GlyphSet,
) -> std::io::Result<()> {
    for pickup in snap.pickups {
        draw_glyph(out, vp, pickup.x, pickup.y, pickup.asset(), glyphs)?;
    }
    for enemy in snap.enemies {
        draw_glyph(out, vp, enemy.x, enemy.y, enemy.kind.archetype().asset, glyphs)?;
    }
    if let Some(boss) = &snap.boss {
        draw_glyph(out, vp, boss.x, boss.y, AssetKey::Boss, glyphs)?;
    }
    for bullet in snap.enemy_bullets {
        draw_glyph(out, vp, bullet.x, bullet.y, bullet.asset, glyphs)?;
    }
    for bullet in snap.bullets {
        draw_glyph(out, vp, bullet.x, bullet.y, bullet.asset, glyphs)?;
    }

    // Blink while invulnerable
    let blink_off = snap.player.invulnerable && (snap.now / 100) % 2 == 1;
    if !blink_off {
        draw_glyph(out, vp, snap.player.x, snap.player.y, AssetKey::Player, glyphs)?;
    }
    Ok(())
}

fn draw_explosions<W: Write>(
    out: &mut W,
    snap: &Snapshot<'_>,
    vp: &Viewport,
) -> std::io::Result<()> {
    for exp in snap.explosions {
        let Some((col, row)) = vp.cell(exp.x, exp.y) else {
            continue;
        };
        let colour = match exp.kind {
            ExplosionKind::BossDeath | ExplosionKind::PlayerHit => Color::Red,
            ExplosionKind::EnemyDeath => Color::Yellow,
            ExplosionKind::RocketImpact => Color::Rgb { r: 255, g: 165, b: 0 },
        };
        let glyph = if exp.alpha > 0.66 {
            "✶"
        } else if exp.alpha > 0.33 {
            "*"
        } else {
            "·"
        };
        out.queue(cursor::MoveTo(col, row))?;
        out.queue(style::SetForegroundColor(colour))?;
        out.queue(Print(glyph))?;
    }
    Ok(())
}

// ── Screens & overlays ────────────────────────────────────────────────────────

fn draw_centered<W: Write>(
    out: &mut W,
    vp: &Viewport,
    row: u16,
    text: &str,
    colour: Color,
) -> std::io::Result<()> {
    let col = (vp.cols / 2).saturating_sub(text.chars().count() as u16 / 2);
    out.queue(cursor::MoveTo(col, row))?;
    out.queue(style::SetForegroundColor(colour))?;
    out.queue(Print(text))?;
    Ok(())
}

fn draw_title<W: Write>(out: &mut W, vp: &Viewport) -> std::io::Result<()> {
    let cy = vp.rows / 2;
    draw_centered(out, vp, cy.saturating_sub(4), "ULTIMATE SPACE SHOOTER", C_TITLE)?;
    draw_centered(out, vp, cy.saturating_sub(1), "ENTER - Play", Color::White)?;
    draw_centered(out, vp, cy, "C - Credits", Color::White)?;
    draw_centered(out, vp, cy + 1, "Q - Quit", Color::White)?;
    Ok(())
}

fn draw_credits<W: Write>(out: &mut W, vp: &Viewport) -> std::io::Result<()> {
    let cy = vp.rows / 2;
    draw_centered(out, vp, cy.saturating_sub(2), "CREDITS", C_TITLE)?;
    draw_centered(out, vp, cy, "Design, code & pixels: the Space Shooter crew", Color::White)?;
    draw_centered(out, vp, cy + 2, "ESC - Back", Color::DarkGrey)?;
    Ok(())
}

fn draw_banner<W: Write>(
    out: &mut W,
    vp: &Viewport,
    title: &str,
    colour: Color,
    score: Option<u32>,
) -> std::io::Result<()> {
    let width = title.chars().count() + 6;
    let top = format!("╔{}╗", "═".repeat(width));
    let mid = format!("║   {title}   ║");
    let bottom = format!("╚{}╝", "═".repeat(width));
    let cy = (vp.rows / 2).saturating_sub(3);

    draw_centered(out, vp, cy, &top, colour)?;
    draw_centered(out, vp, cy + 1, &mid, colour)?;
    draw_centered(out, vp, cy + 2, &bottom, colour)?;
    if let Some(score) = score {
        draw_centered(out, vp, cy + 3, &format!("Final Score: {score:>6}"), Color::Yellow)?;
    }
    Ok(())
}

// ── Controls hint (last row) ──────────────────────────────────────────────────

fn draw_controls_hint<W: Write>(out: &mut W, phase: Phase, vp: &Viewport) -> std::io::Result<()> {
    let hint = match phase {
        Phase::StartScreen => "ENTER : Play   C : Credits   Q : Quit",
        Phase::Credits => "ESC : Back",
        Phase::Playing => {
            "← → / A D / mouse : Move   SPACE : Shoot   Q E / 1-4 : Gun   ESC : Pause"
        }
        Phase::Paused => "ESC : Resume   R : Restart   M : Menu",
        Phase::GameOver | Phase::Victory => "R : Play Again   M : Menu",
    };
    out.queue(cursor::MoveTo(1, vp.rows.saturating_sub(1)))?;
    out.queue(style::SetForegroundColor(C_HINT))?;
    out.queue(Print(hint))?;
    Ok(())
}
