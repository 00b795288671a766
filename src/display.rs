/// Rendering layer. All terminal I/O lives here.
///
/// Each function receives a mutable writer and an immutable `Scene`.  No game
/// logic is performed; this module only translates the continuous game plane
/// into terminal cells.  Row 0 is the scoreboard, the remaining rows are the
/// playfield.

use std::io::Write;

use crossterm::{
    cursor,
    style::{self, Color, Print},
    terminal,
    QueueableCommand,
};

use crate::entities::{Rect, Rgb, Scene};

// ── Colour palette ────────────────────────────────────────────────────────────

const C_HUD: Color = Color::Black;
const C_SHIP: Color = Color::DarkBlue;
const C_ALIEN: Color = Color::DarkGreen;
const C_BUTTON: Rgb = Rgb(0, 255, 0);
const C_BUTTON_TEXT: Color = Color::White;
const C_HIT: Color = Color::Red;

const PLAY_BUTTON_WIDTH: f32 = 200.0;
const PLAY_BUTTON_HEIGHT: f32 = 50.0;

fn color(rgb: Rgb) -> Color {
    Color::Rgb {
        r: rgb.0,
        g: rgb.1,
        b: rgb.2,
    }
}

// ── Game plane ↔ terminal cells ───────────────────────────────────────────────

/// A block of terminal cells, in absolute terminal coordinates.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CellSpan {
    pub column: u16,
    pub row: u16,
    pub width: u16,
    pub height: u16,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Viewport {
    pub columns: u16,
    pub rows: u16,
    pub screen_width: f32,
    pub screen_height: f32,
}

impl Viewport {
    pub fn new(columns: u16, rows: u16, screen_width: f32, screen_height: f32) -> Self {
        Viewport {
            columns: columns.max(1),
            rows: rows.max(2),
            screen_width,
            screen_height,
        }
    }

    fn field_rows(&self) -> u16 {
        self.rows - 1
    }

    fn scale(&self) -> (f32, f32) {
        (
            self.columns as f32 / self.screen_width,
            self.field_rows() as f32 / self.screen_height,
        )
    }

    /// Cells covered by `rect`, clipped to the playfield.  `None` when nothing
    /// of it is visible.
    pub fn span(&self, rect: &Rect) -> Option<CellSpan> {
        let (sx, sy) = self.scale();
        let left = (rect.left() * sx).floor().max(0.0);
        let right = (rect.right() * sx).ceil().min(self.columns as f32);
        let top = (rect.top() * sy).floor().max(0.0);
        let bottom = (rect.bottom() * sy).ceil().min(self.field_rows() as f32);
        if right <= left || bottom <= top {
            return None;
        }
        Some(CellSpan {
            column: left as u16,
            row: top as u16 + 1,
            width: (right - left) as u16,
            height: (bottom - top) as u16,
        })
    }

    /// Centre of a terminal cell in game units.  `None` for the scoreboard row
    /// and anything outside the terminal.
    pub fn to_game(&self, column: u16, row: u16) -> Option<(f32, f32)> {
        if row == 0 || row >= self.rows || column >= self.columns {
            return None;
        }
        let (sx, sy) = self.scale();
        Some((
            (column as f32 + 0.5) / sx,
            ((row - 1) as f32 + 0.5) / sy,
        ))
    }
}

// ── Play button ───────────────────────────────────────────────────────────────

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PlayButton {
    pub rect: Rect,
}

impl PlayButton {
    pub fn centered(screen_width: f32, screen_height: f32) -> Self {
        PlayButton {
            rect: Rect::new(
                (screen_width - PLAY_BUTTON_WIDTH) / 2.0,
                (screen_height - PLAY_BUTTON_HEIGHT) / 2.0,
                PLAY_BUTTON_WIDTH,
                PLAY_BUTTON_HEIGHT,
            ),
        }
    }

    pub fn contains(&self, x: f32, y: f32) -> bool {
        self.rect.contains_point(x, y)
    }

    /// Hit test for a click reported in terminal cells.
    pub fn clicked(&self, viewport: &Viewport, column: u16, row: u16) -> bool {
        viewport
            .to_game(column, row)
            .map_or(false, |(x, y)| self.contains(x, y))
    }
}

// ── Scoreboard text ───────────────────────────────────────────────────────────

/// Score rounded to the nearest ten, with thousands separators.
pub fn format_score(score: u32) -> String {
    let rounded = (score as u64 + 5) / 10 * 10;
    let digits = rounded.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

// ── Public entry point ────────────────────────────────────────────────────────

/// Render one complete frame.
pub fn render<W: Write>(out: &mut W, scene: &Scene, viewport: &Viewport) -> std::io::Result<()> {
    out.queue(style::SetBackgroundColor(color(scene.bg_color)))?;
    out.queue(terminal::Clear(terminal::ClearType::All))?;

    // Bullets behind the ship and aliens
    for bullet in &scene.bullets {
        draw_bullet(out, viewport, bullet, scene.bullet_color)?;
    }
    draw_ship(out, viewport, &scene.ship)?;
    for alien in &scene.aliens {
        draw_alien(out, viewport, alien)?;
    }

    draw_hud(out, scene, viewport)?;

    if scene.stunned {
        draw_hit_banner(out, viewport)?;
    }
    if scene.show_play_button {
        draw_play_button(out, scene, viewport)?;
    }

    // Park cursor in a harmless spot and flush
    out.queue(style::ResetColor)?;
    out.queue(cursor::MoveTo(0, viewport.rows.saturating_sub(1)))?;
    out.flush()?;
    Ok(())
}

fn fill<W: Write>(out: &mut W, span: CellSpan, glyph: char) -> std::io::Result<()> {
    let line: String = std::iter::repeat(glyph).take(span.width as usize).collect();
    for r in 0..span.height {
        out.queue(cursor::MoveTo(span.column, span.row + r))?;
        out.queue(Print(&line))?;
    }
    Ok(())
}

// ── HUD (row 0) ───────────────────────────────────────────────────────────────

fn draw_hud<W: Write>(out: &mut W, scene: &Scene, viewport: &Viewport) -> std::io::Result<()> {
    out.queue(style::SetForegroundColor(C_HUD))?;

    // Remaining ships, left
    out.queue(cursor::MoveTo(1, 0))?;
    out.queue(Print("▲".repeat(scene.ships_left as usize)))?;

    // High score, centre
    let high = format!("HIGH {}", format_score(scene.high_score));
    let hx = (viewport.columns / 2).saturating_sub(high.chars().count() as u16 / 2);
    out.queue(cursor::MoveTo(hx, 0))?;
    out.queue(Print(&high))?;

    // Score and level, right
    let right = format!("SCORE {}  LEVEL {}", format_score(scene.score), scene.level);
    let rx = viewport
        .columns
        .saturating_sub(right.chars().count() as u16 + 1);
    out.queue(cursor::MoveTo(rx, 0))?;
    out.queue(Print(&right))?;

    Ok(())
}

// ── Entities ──────────────────────────────────────────────────────────────────

fn draw_ship<W: Write>(out: &mut W, viewport: &Viewport, ship: &Rect) -> std::io::Result<()> {
    let Some(span) = viewport.span(ship) else {
        return Ok(());
    };
    out.queue(style::SetForegroundColor(C_SHIP))?;

    // Nose on the top row, hull below
    out.queue(cursor::MoveTo(span.column + span.width / 2, span.row))?;
    out.queue(Print("▲"))?;
    if span.height > 1 {
        fill(
            out,
            CellSpan {
                row: span.row + 1,
                height: span.height - 1,
                ..span
            },
            '█',
        )?;
    }
    Ok(())
}

fn draw_alien<W: Write>(out: &mut W, viewport: &Viewport, alien: &Rect) -> std::io::Result<()> {
    let Some(span) = viewport.span(alien) else {
        return Ok(());
    };
    out.queue(style::SetForegroundColor(C_ALIEN))?;

    // Row 0: <ooo>   remaining rows: /\/\/
    let w = span.width as usize;
    let head: String = if w >= 3 {
        format!("<{}>", "o".repeat(w - 2))
    } else {
        "o".repeat(w)
    };
    out.queue(cursor::MoveTo(span.column, span.row))?;
    out.queue(Print(&head))?;

    let legs: String = (0..w).map(|i| if i % 2 == 0 { '/' } else { '\\' }).collect();
    for r in 1..span.height {
        out.queue(cursor::MoveTo(span.column, span.row + r))?;
        out.queue(Print(&legs))?;
    }
    Ok(())
}

fn draw_bullet<W: Write>(
    out: &mut W,
    viewport: &Viewport,
    bullet: &Rect,
    rgb: Rgb,
) -> std::io::Result<()> {
    let Some(span) = viewport.span(bullet) else {
        return Ok(());
    };
    out.queue(style::SetForegroundColor(color(rgb)))?;
    fill(out, span, '│')
}

// ── Overlays ──────────────────────────────────────────────────────────────────

fn draw_hit_banner<W: Write>(out: &mut W, viewport: &Viewport) -> std::io::Result<()> {
    let msg = "*** SHIP HIT ***";
    let col = (viewport.columns / 2).saturating_sub(msg.len() as u16 / 2);
    out.queue(cursor::MoveTo(col, viewport.rows / 2))?;
    out.queue(style::SetForegroundColor(C_HIT))?;
    out.queue(Print(msg))?;
    Ok(())
}

fn draw_play_button<W: Write>(
    out: &mut W,
    scene: &Scene,
    viewport: &Viewport,
) -> std::io::Result<()> {
    let button = PlayButton::centered(scene.screen_width, scene.screen_height);
    let Some(span) = viewport.span(&button.rect) else {
        return Ok(());
    };

    out.queue(style::SetBackgroundColor(color(C_BUTTON)))?;
    fill(out, span, ' ')?;

    let label = "Play";
    let lx = (span.column + span.width / 2).saturating_sub(label.len() as u16 / 2);
    out.queue(cursor::MoveTo(lx, span.row + span.height / 2))?;
    out.queue(style::SetForegroundColor(C_BUTTON_TEXT))?;
    out.queue(Print(label))?;

    out.queue(style::SetBackgroundColor(color(scene.bg_color)))?;
    Ok(())
}
