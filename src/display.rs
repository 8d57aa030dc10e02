/// Rendering layer: all terminal I/O lives here.
///
/// `TerminalSurface` implements the game's `Surface` by rasterising world
/// coordinates (y-up) onto a character grid inside a border.  Nothing is
/// written until `render`, which queues the whole frame through crossterm
/// and flushes once.
use std::io::Write;

use crossterm::{
    cursor,
    style::{self, Color as TermColor, Print},
    terminal,
    QueueableCommand,
};

use crate::draw::{Color, Surface};
use crate::entities::Rect;

// ── Colour palette ────────────────────────────────────────────────────────────

const C_BORDER: TermColor = TermColor::DarkBlue;
const C_SHIP: TermColor = TermColor::White;
const C_EXPLOSION: TermColor = TermColor::Yellow;
const C_TEXT: TermColor = TermColor::Yellow;
const C_HINT: TermColor = TermColor::DarkGrey;
const C_ALIENS: [TermColor; 3] = [TermColor::Green, TermColor::Magenta, TermColor::Red];

// ── Sprites ───────────────────────────────────────────────────────────────────

const SHIP_SPRITE: &str = "/▲\\";
const EXPLOSION_FRAMES: [&str; 5] = ["\\|/", "-*-", "✶✷✶", " ✸ ", " · "];
const ALIEN_SPRITES: [&str; 3] = ["<▼>", "(◉)", "/Ö\\"];

const CONTROLS_HINT: &str = "← → / A D : Move   ↑ / SPACE : Fire   S : Start   Q : Quit";

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Cell {
    pub ch: char,
    pub color: TermColor,
}

fn term_color(color: Color) -> TermColor {
    match color {
        // The defense line must stay visible on a dark terminal.
        Color::Black => TermColor::DarkGrey,
        Color::White => TermColor::White,
        Color::Cyan => TermColor::Cyan,
        Color::Red => TermColor::Red,
        Color::Yellow => TermColor::Yellow,
    }
}

pub struct TerminalSurface {
    /// Terminal size in cells.
    width: u16,
    height: u16,
    /// World size the play area represents.
    world_width: f64,
    world_height: f64,
    /// Play-area cells, row 0 at the top.
    cells: Vec<Vec<Option<Cell>>>,
}

impl TerminalSurface {
    /// One border cell on each side and a hint row below the bottom border.
    pub fn new(width: u16, height: u16, world_width: f64, world_height: f64) -> Self {
        let cols = width.saturating_sub(2) as usize;
        let rows = height.saturating_sub(3) as usize;
        TerminalSurface {
            width,
            height,
            world_width,
            world_height,
            cells: vec![vec![None; cols]; rows],
        }
    }

    pub fn columns(&self) -> usize {
        self.cells.first().map_or(0, Vec::len)
    }

    pub fn rows(&self) -> usize {
        self.cells.len()
    }

    pub fn cell(&self, column: usize, row: usize) -> Option<Cell> {
        self.cells.get(row).and_then(|r| r.get(column)).copied().flatten()
    }

    /// Play-area column for world x, clamped to the grid.
    pub fn column_of(&self, x: f64) -> usize {
        let cols = self.columns();
        let c = (x / self.world_width * cols as f64).floor();
        (c.max(0.0) as usize).min(cols.saturating_sub(1))
    }

    /// Play-area row for world y (y-up, so the top of the world is row 0).
    pub fn row_of(&self, y: f64) -> usize {
        let rows = self.rows();
        let r = ((self.world_height - y) / self.world_height * rows as f64).floor();
        (r.max(0.0) as usize).min(rows.saturating_sub(1))
    }

    fn put(&mut self, column: usize, row: usize, ch: char, color: TermColor) {
        if let Some(slot) = self.cells.get_mut(row).and_then(|r| r.get_mut(column)) {
            *slot = Some(Cell { ch, color });
        }
    }

    /// Write `text` centered on the given cell.
    fn put_str(&mut self, column: usize, row: usize, text: &str, color: TermColor) {
        let len = text.chars().count();
        let start = column.saturating_sub(len / 2);
        for (i, ch) in text.chars().enumerate() {
            if ch != ' ' {
                self.put(start + i, row, ch, color);
            }
        }
    }

    // ── Output ───────────────────────────────────────────────────────────────

    /// Draw the border, the rasterised play area and the controls hint.
    pub fn render<W: Write>(&self, out: &mut W) -> std::io::Result<()> {
        out.queue(terminal::Clear(terminal::ClearType::All))?;
        self.draw_border(out)?;

        for (r, row) in self.cells.iter().enumerate() {
            for (c, cell) in row.iter().enumerate() {
                if let Some(cell) = cell {
                    out.queue(cursor::MoveTo(c as u16 + 1, r as u16 + 1))?;
                    out.queue(style::SetForegroundColor(cell.color))?;
                    out.queue(Print(cell.ch))?;
                }
            }
        }

        out.queue(cursor::MoveTo(1, self.height.saturating_sub(1)))?;
        out.queue(style::SetForegroundColor(C_HINT))?;
        out.queue(Print(CONTROLS_HINT))?;

        // Park cursor in a harmless spot and flush
        out.queue(style::ResetColor)?;
        out.queue(cursor::MoveTo(0, self.height.saturating_sub(1)))?;
        out.flush()?;
        Ok(())
    }

    fn draw_border<W: Write>(&self, out: &mut W) -> std::io::Result<()> {
        let w = self.width as usize;
        let bottom = self.height.saturating_sub(2);

        out.queue(style::SetForegroundColor(C_BORDER))?;

        out.queue(cursor::MoveTo(0, 0))?;
        out.queue(Print(format!("┌{}┐", "─".repeat(w.saturating_sub(2)))))?;

        out.queue(cursor::MoveTo(0, bottom))?;
        out.queue(Print(format!("└{}┘", "─".repeat(w.saturating_sub(2)))))?;

        for row in 1..bottom {
            out.queue(cursor::MoveTo(0, row))?;
            out.queue(Print("│"))?;
            out.queue(cursor::MoveTo(self.width.saturating_sub(1), row))?;
            out.queue(Print("│"))?;
        }

        Ok(())
    }
}

impl Surface for TerminalSurface {
    fn fill_rect(&mut self, rect: Rect, color: Color) {
        let (c0, c1) = (self.column_of(rect.left()), self.column_of(rect.right()));
        let (r0, r1) = (self.row_of(rect.top()), self.row_of(rect.bottom()));
        let color = term_color(color);
        for row in r0..=r1 {
            for column in c0..=c1 {
                self.put(column, row, '│', color);
            }
        }
    }

    fn draw_image(&mut self, rect: Rect, variant: usize) {
        let sprite = ALIEN_SPRITES[variant % ALIEN_SPRITES.len()];
        let color = C_ALIENS[variant % C_ALIENS.len()];
        let (column, row) = (self.column_of(rect.x), self.row_of(rect.y));
        self.put_str(column, row, sprite, color);
    }

    fn draw_sprite(&mut self, rect: Rect, frame: usize) {
        let (column, row) = (self.column_of(rect.x), self.row_of(rect.y));
        if frame == 0 {
            self.put_str(column, row, SHIP_SPRITE, C_SHIP);
        } else {
            let sprite = EXPLOSION_FRAMES[(frame - 1).min(EXPLOSION_FRAMES.len() - 1)];
            self.put_str(column, row, sprite, C_EXPLOSION);
        }
    }

    fn draw_line(&mut self, y: f64, color: Color) {
        let row = self.row_of(y);
        let color = term_color(color);
        for column in 0..self.columns() {
            self.put(column, row, '─', color);
        }
    }

    fn draw_text(&mut self, x: f64, y: f64, text: &str) {
        let (column, row) = (self.column_of(x), self.row_of(y));
        self.put_str(column, row, text, C_TEXT);
    }
}
