#![allow(dead_code)]

use alien_invaders::draw::{Color, Surface};
use alien_invaders::entities::Rect;
use rand::rngs::StdRng;
use rand::SeedableRng;

pub fn seeded_rng() -> StdRng {
    StdRng::seed_from_u64(42)
}

/// Every call a `Surface` received, in order.
#[derive(Clone, Debug, PartialEq)]
pub enum DrawOp {
    Rect(Rect, Color),
    Image(Rect, usize),
    Sprite(Rect, usize),
    Line(f64, Color),
    Text(String),
}

#[derive(Default)]
pub struct RecordingSurface {
    pub ops: Vec<DrawOp>,
}

impl Surface for RecordingSurface {
    fn fill_rect(&mut self, rect: Rect, color: Color) {
        self.ops.push(DrawOp::Rect(rect, color));
    }

    fn draw_image(&mut self, rect: Rect, variant: usize) {
        self.ops.push(DrawOp::Image(rect, variant));
    }

    fn draw_sprite(&mut self, rect: Rect, frame: usize) {
        self.ops.push(DrawOp::Sprite(rect, frame));
    }

    fn draw_line(&mut self, y: f64, color: Color) {
        self.ops.push(DrawOp::Line(y, color));
    }

    fn draw_text(&mut self, _x: f64, _y: f64, text: &str) {
        self.ops.push(DrawOp::Text(text.to_string()));
    }
}
