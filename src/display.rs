/// Rendering layer — all terminal I/O lives here.
///
/// The simulation runs in world units on a 500 × 700 playfield; every
/// draw call projects world rectangles onto whatever cell grid the
/// terminal currently reports.  No game logic is performed; this module
/// only translates state into terminal commands.

use std::io::Write;

use crossterm::{
    cursor,
    style::{self, Color, Print},
    terminal,
    QueueableCommand,
};

use invaders::compute::{enemy_hitbox, player_hitbox, projectile_hitbox};
use invaders::entities::{GameState, GameStatus, Rect};

// ── Colour palette ────────────────────────────────────────────────────────────

const C_HUD_SCORE: Color = Color::Yellow;
const C_HUD_WAVE: Color = Color::Cyan;
const C_HUD_LIVES: Color = Color::Red;
const C_PLAYER: Color = Color::White;
const C_ENEMY: Color = Color::Green;
const C_PROJECTILE: Color = Color::Cyan;
const C_HINT: Color = Color::DarkGrey;

// ── Public entry point ────────────────────────────────────────────────────────

/// Render one complete frame onto a terminal of `term` (cols, rows).
pub fn render<W: Write>(
    out: &mut W,
    state: &GameState,
    term: (u16, u16),
) -> std::io::Result<()> {
    out.queue(terminal::Clear(terminal::ClearType::All))?;

    draw_hud(out, state, term)?;
    draw_player(out, state, term)?;

    out.queue(style::SetForegroundColor(C_PROJECTILE))?;
    for projectile in &state.projectile_pool {
        if projectile.free {
            continue;
        }
        if let Some((x, y, w, h)) = project(&projectile_hitbox(projectile), state, term) {
            fill_rect(out, x, y, w, h)?;
        }
    }

    out.queue(style::SetForegroundColor(C_ENEMY))?;
    for wave in &state.waves {
        for enemy in &wave.enemies {
            if let Some((x, y, w, h)) = project(&enemy_hitbox(enemy), state, term) {
                stroke_rect(out, x, y, w, h)?;
            }
        }
    }

    if state.status == GameStatus::GameOver {
        draw_game_over(out, state, term)?;
    }

    draw_controls_hint(out, term)?;

    // Park cursor in a harmless spot and flush
    out.queue(style::ResetColor)?;
    out.queue(cursor::MoveTo(0, term.1.saturating_sub(1)))?;
    out.flush()?;
    Ok(())
}

// ── World → cell projection ───────────────────────────────────────────────────

/// Project a world-space rectangle onto the terminal grid, clipped to the
/// screen.  Returns `None` when the rectangle is fully off-screen.
fn project(rect: &Rect, state: &GameState, term: (u16, u16)) -> Option<(u16, u16, u16, u16)> {
    let sx = term.0 as f32 / state.width;
    let sy = term.1 as f32 / state.height;

    let mut x0 = (rect.x * sx).round() as i32;
    let mut y0 = (rect.y * sy).round() as i32;
    let mut x1 = ((rect.x + rect.width) * sx).round() as i32;
    let mut y1 = ((rect.y + rect.height) * sy).round() as i32;

    // Sub-cell entities still occupy one cell.
    if x1 <= x0 {
        x1 = x0 + 1;
    }
    if y1 <= y0 {
        y1 = y0 + 1;
    }

    x0 = x0.max(0);
    y0 = y0.max(0);
    x1 = x1.min(term.0 as i32);
    y1 = y1.min(term.1 as i32);
    if x0 >= x1 || y0 >= y1 {
        return None;
    }
    Some((x0 as u16, y0 as u16, (x1 - x0) as u16, (y1 - y0) as u16))
}

fn fill_rect<W: Write>(out: &mut W, x: u16, y: u16, w: u16, h: u16) -> std::io::Result<()> {
    let row = "█".repeat(w as usize);
    for r in y..y + h {
        out.queue(cursor::MoveTo(x, r))?;
        out.queue(Print(&row))?;
    }
    Ok(())
}

fn stroke_rect<W: Write>(out: &mut W, x: u16, y: u16, w: u16, h: u16) -> std::io::Result<()> {
    if w < 2 || h < 2 {
        // Too small for an outline at this terminal size
        let row = "▒".repeat(w as usize);
        for r in y..y + h {
            out.queue(cursor::MoveTo(x, r))?;
            out.queue(Print(&row))?;
        }
        return Ok(());
    }

    let inner = "─".repeat((w - 2) as usize);
    out.queue(cursor::MoveTo(x, y))?;
    out.queue(Print(format!("┌{}┐", inner)))?;
    for r in y + 1..y + h - 1 {
        out.queue(cursor::MoveTo(x, r))?;
        out.queue(Print("│"))?;
        out.queue(cursor::MoveTo(x + w - 1, r))?;
        out.queue(Print("│"))?;
    }
    out.queue(cursor::MoveTo(x, y + h - 1))?;
    out.queue(Print(format!("└{}┘", inner)))?;
    Ok(())
}

// ── HUD (row 0) ───────────────────────────────────────────────────────────────

fn draw_hud<W: Write>(out: &mut W, state: &GameState, term: (u16, u16)) -> std::io::Result<()> {
    // Score — left
    out.queue(cursor::MoveTo(1, 0))?;
    out.queue(style::SetForegroundColor(C_HUD_SCORE))?;
    out.queue(Print(format!("Score:{:>5}", state.score)))?;

    // Wave counter — centre
    let wave_str = format!("Wave:{:>3}", state.wave_count);
    let wx = (term.0 / 2).saturating_sub(wave_str.len() as u16 / 2);
    out.queue(cursor::MoveTo(wx, 0))?;
    out.queue(style::SetForegroundColor(C_HUD_WAVE))?;
    out.queue(Print(&wave_str))?;

    // One pip per remaining life — right
    let pips: String = "▮".repeat(state.player.lives as usize);
    let lives_str = format!("Lives:{}", pips);
    let lx = term.0.saturating_sub(lives_str.chars().count() as u16 + 1);
    out.queue(cursor::MoveTo(lx, 0))?;
    out.queue(style::SetForegroundColor(C_HUD_LIVES))?;
    out.queue(Print(&lives_str))?;

    Ok(())
}

// ── Player ────────────────────────────────────────────────────────────────────

fn draw_player<W: Write>(
    out: &mut W,
    state: &GameState,
    term: (u16, u16),
) -> std::io::Result<()> {
    out.queue(style::SetForegroundColor(C_PLAYER))?;
    if let Some((x, y, w, h)) = project(&player_hitbox(&state.player), state, term) {
        fill_rect(out, x, y, w, h)?;
    }
    Ok(())
}

// ── Controls hint (last row) ──────────────────────────────────────────────────

fn draw_controls_hint<W: Write>(out: &mut W, term: (u16, u16)) -> std::io::Result<()> {
    out.queue(cursor::MoveTo(1, term.1.saturating_sub(1)))?;
    out.queue(style::SetForegroundColor(C_HINT))?;
    out.queue(Print("← → / A D : Move   SPACE : Shoot   Q : Quit"))?;
    Ok(())
}

// ── Game-over overlay ─────────────────────────────────────────────────────────

fn draw_game_over<W: Write>(
    out: &mut W,
    state: &GameState,
    term: (u16, u16),
) -> std::io::Result<()> {
    let box_lines = [
        "╔═══════════════════╗",
        "║    GAME  OVER     ║",
        "╚═══════════════════╝",
    ];
    let score_line = format!("Final Score: {:>5}", state.score);
    let hint = "Press R to restart";

    let cx = term.0 / 2;
    let total_rows = box_lines.len() + 2;
    let start_row = (term.1 / 2).saturating_sub(total_rows as u16 / 2);

    out.queue(style::SetForegroundColor(Color::Red))?;
    for (i, msg) in box_lines.iter().enumerate() {
        let col = cx.saturating_sub(msg.chars().count() as u16 / 2);
        out.queue(cursor::MoveTo(col, start_row + i as u16))?;
        out.queue(Print(*msg))?;
    }

    let score_row = start_row + box_lines.len() as u16;
    let col = cx.saturating_sub(score_line.chars().count() as u16 / 2);
    out.queue(cursor::MoveTo(col, score_row))?;
    out.queue(style::SetForegroundColor(Color::Yellow))?;
    out.queue(Print(&score_line))?;

    let col = cx.saturating_sub(hint.chars().count() as u16 / 2);
    out.queue(cursor::MoveTo(col, score_row + 1))?;
    out.queue(style::SetForegroundColor(Color::White))?;
    out.queue(Print(hint))?;

    Ok(())
}
