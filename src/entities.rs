/// Game entity types: the ship, the aliens, the bolts and the defense line.
///
/// Entities carry their own geometry and the corner-containment collision
/// tests; everything that depends on more than one entity lives in
/// `formation` and `wave`.
use crate::config::Config;
use crate::draw::{Color, Drawable, Surface};
use crate::error::GameError;

// ── Geometry ──────────────────────────────────────────────────────────────────

/// An axis-aligned box described by its center (y-up world coordinates).
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    pub fn left(&self) -> f64 {
        self.x - self.width / 2.0
    }

    pub fn right(&self) -> f64 {
        self.x + self.width / 2.0
    }

    pub fn bottom(&self) -> f64 {
        self.y - self.height / 2.0
    }

    pub fn top(&self) -> f64 {
        self.y + self.height / 2.0
    }

    /// Point containment, edges included.
    pub fn contains(&self, (px, py): (f64, f64)) -> bool {
        self.left() <= px && px <= self.right() && self.bottom() <= py && py <= self.top()
    }

    /// Bottom-left, bottom-right, top-left, top-right.
    pub fn corners(&self) -> [(f64, f64); 4] {
        [
            (self.left(), self.bottom()),
            (self.right(), self.bottom()),
            (self.left(), self.top()),
            (self.right(), self.top()),
        ]
    }

    /// True if any corner of `other` lies inside `self`.
    ///
    /// This is not a full overlap test: a box that straddles `self` without
    /// putting a corner inside it does not count.
    pub fn contains_corner_of(&self, other: &Rect) -> bool {
        other.corners().iter().any(|&corner| self.contains(corner))
    }
}

// ── Bolts ─────────────────────────────────────────────────────────────────────

/// A laser bolt.  The sign of `velocity` decides who fired it.
#[derive(Clone, Debug, PartialEq)]
pub struct Bolt {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
    velocity: f64,
    color: Color,
}

impl Bolt {
    pub fn new(x: f64, y: f64, velocity: f64, config: &Config) -> Self {
        let color = if velocity > 0.0 { Color::Cyan } else { Color::Red };
        Bolt {
            x,
            y,
            width: config.bolt_width,
            height: config.bolt_height,
            velocity,
            color,
        }
    }

    /// A bolt fired upward from the ship centered at (`x`, `y`).
    pub fn from_ship(x: f64, y: f64, config: &Config) -> Self {
        let y = y + config.ship_height / 2.0 + config.bolt_height / 2.0;
        Bolt::new(x, y, config.bolt_speed, config)
    }

    /// A bolt fired downward from the alien centered at (`x`, `y`).
    pub fn from_alien(x: f64, y: f64, config: &Config) -> Self {
        let y = y - (config.alien_height / 2.0 + config.bolt_height / 2.0);
        Bolt::new(x, y, -config.bolt_speed, config)
    }

    pub fn velocity(&self) -> f64 {
        self.velocity
    }

    pub fn color(&self) -> Color {
        self.color
    }

    pub fn is_player_bolt(&self) -> bool {
        self.velocity > 0.0
    }

    pub fn bounds(&self) -> Rect {
        Rect { x: self.x, y: self.y, width: self.width, height: self.height }
    }

    /// One frame of travel, biased by half the bolt's height in the
    /// direction of flight.
    pub fn advance(&mut self) {
        if self.is_player_bolt() {
            self.y += self.velocity + self.height / 2.0;
        } else {
            self.y += self.velocity - self.height / 2.0;
        }
    }

    /// Player bolts leave through the top, alien bolts through the bottom.
    pub fn is_off_screen(&self, game_height: f64) -> bool {
        if self.is_player_bolt() {
            self.bounds().bottom() > game_height
        } else {
            self.bounds().top() < 0.0
        }
    }
}

impl Drawable for Bolt {
    fn draw(&self, surface: &mut dyn Surface) {
        surface.fill_rect(self.bounds(), self.color);
    }
}

// ── Ship ──────────────────────────────────────────────────────────────────────

/// The player's ship.  Its sprite frame only changes while it explodes.
#[derive(Clone, Debug, PartialEq)]
pub struct Ship {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
    frame: usize,
    frame_count: usize,
}

impl Ship {
    pub fn new(x: f64, y: f64, config: &Config) -> Self {
        Ship {
            x,
            y,
            width: config.ship_width,
            height: config.ship_height,
            frame: 0,
            frame_count: config.ship_frames,
        }
    }

    /// A fresh ship at the default spawn position.
    pub fn spawn(config: &Config) -> Self {
        let (x, y) = config.ship_spawn();
        Ship::new(x, y, config)
    }

    pub fn frame(&self) -> usize {
        self.frame
    }

    pub fn frame_count(&self) -> usize {
        self.frame_count
    }

    pub fn last_frame(&self) -> usize {
        self.frame_count - 1
    }

    /// Panics on a frame the sprite does not have.
    pub fn set_frame(&mut self, frame: usize) {
        assert!(
            frame < self.frame_count,
            "ship frame {} out of range (sprite has {})",
            frame,
            self.frame_count
        );
        self.frame = frame;
    }

    pub fn bounds(&self) -> Rect {
        Rect { x: self.x, y: self.y, width: self.width, height: self.height }
    }

    /// Alien bolts hit the ship when one of their corners is inside it.
    pub fn collides(&self, bolt: &Bolt) -> bool {
        !bolt.is_player_bolt() && self.bounds().contains_corner_of(&bolt.bounds())
    }
}

impl Drawable for Ship {
    fn draw(&self, surface: &mut dyn Surface) {
        surface.draw_sprite(self.bounds(), self.frame);
    }
}

// ── Aliens ────────────────────────────────────────────────────────────────────

#[derive(Clone, Debug, PartialEq)]
pub struct Alien {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
    variant: usize,
}

impl Alien {
    /// Fails if `variant` is not one of the configured alien images.
    pub fn new(x: f64, y: f64, variant: usize, config: &Config) -> Result<Self, GameError> {
        if variant >= config.alien_variants {
            return Err(GameError::InvalidVariant {
                index: variant,
                available: config.alien_variants,
            });
        }
        Ok(Alien {
            x,
            y,
            width: config.alien_width,
            height: config.alien_height,
            variant,
        })
    }

    pub fn variant(&self) -> usize {
        self.variant
    }

    pub fn bounds(&self) -> Rect {
        Rect { x: self.x, y: self.y, width: self.width, height: self.height }
    }

    /// Player bolts hit an alien when one of their corners is inside it.
    pub fn collides(&self, bolt: &Bolt) -> bool {
        bolt.is_player_bolt() && self.bounds().contains_corner_of(&bolt.bounds())
    }
}

impl Drawable for Alien {
    fn draw(&self, surface: &mut dyn Surface) {
        surface.draw_image(self.bounds(), self.variant);
    }
}

// ── Defense line ──────────────────────────────────────────────────────────────

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DefenseLine {
    pub y: f64,
}

impl DefenseLine {
    /// An alien whose lower edge is at or below the line has broken through.
    pub fn is_breached_by(&self, alien: &Alien) -> bool {
        alien.bounds().bottom() <= self.y
    }
}

impl Drawable for DefenseLine {
    fn draw(&self, surface: &mut dyn Surface) {
        surface.draw_line(self.y, Color::Black);
    }
}
