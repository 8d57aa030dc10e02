//! Drawing contract between the game and whatever paints the screen.
//!
//! Entities never know how they are rendered; they describe themselves to a
//! `Surface`.  The terminal implementation lives in `display`.

use crate::entities::Rect;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Color {
    Black,
    White,
    Cyan,
    Red,
    Yellow,
}

/// Something that can be painted on.  Coordinates are world units, y-up.
pub trait Surface {
    fn fill_rect(&mut self, rect: Rect, color: Color);
    /// One of the alien images, by index.
    fn draw_image(&mut self, rect: Rect, variant: usize);
    /// A frame of the ship sprite.
    fn draw_sprite(&mut self, rect: Rect, frame: usize);
    /// A horizontal line across the whole play area.
    fn draw_line(&mut self, y: f64, color: Color);
    /// Text centered on (`x`, `y`).
    fn draw_text(&mut self, x: f64, y: f64, text: &str);
}

pub trait Drawable {
    fn draw(&self, surface: &mut dyn Surface);
}

/// A line of text: prompts, score and lives.
#[derive(Clone, Debug, PartialEq)]
pub struct Label {
    pub x: f64,
    pub y: f64,
    pub text: String,
}

impl Label {
    pub fn new(x: f64, y: f64, text: impl Into<String>) -> Self {
        Label { x, y, text: text.into() }
    }
}

impl Drawable for Label {
    fn draw(&self, surface: &mut dyn Surface) {
        surface.draw_text(self.x, self.y, &self.text);
    }
}
