//! The alien formation: a fixed rows × columns grid whose cells empty out
//! as aliens are shot.
//!
//! The formation marches sideways one step each time its timer runs past
//! `alien_speed`, drops a row and turns around when it reaches either side,
//! and fires a bolt every few steps.  Row 0 is the top row.

use log::trace;
use rand::seq::SliceRandom;
use rand::Rng;

use crate::config::Config;
use crate::draw::{Drawable, Surface};
use crate::entities::{Alien, Bolt, DefenseLine};
use crate::error::GameError;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Direction {
    Left,
    Right,
}

impl Direction {
    fn flipped(self) -> Self {
        match self {
            Direction::Left => Direction::Right,
            Direction::Right => Direction::Left,
        }
    }
}

/// Image shared by every alien in `row`: rows come in pairs, offset by one
/// so the top row stands alone.
pub fn row_variant(row: usize, variants: usize) -> usize {
    if row % 2 == 0 {
        ((row + 1) / 2) % variants
    } else {
        (row / 2) % variants
    }
}

fn roll_fire_threshold(config: &Config, rng: &mut impl Rng) -> u32 {
    rng.gen_range(1..=config.bolt_rate)
}

#[derive(Clone, Debug)]
pub struct Formation {
    grid: Vec<Vec<Option<Alien>>>,
    direction: Direction,
    /// Seconds since the last step.
    timer: f64,
    /// Steps taken since the last shot.
    steps: u32,
    /// Step count at which the next shot is fired.
    fire_threshold: u32,
}

impl Formation {
    pub fn new(config: &Config, rng: &mut impl Rng) -> Result<Self, GameError> {
        let mut grid = Vec::with_capacity(config.alien_rows);
        let mut y = config.game_height - config.alien_ceiling;

        for row in 0..config.alien_rows {
            let variant = row_variant(row, config.alien_variants);
            let mut x = config.alien_h_sep + config.alien_width / 2.0;
            let mut cells = Vec::with_capacity(config.aliens_in_row);
            for _ in 0..config.aliens_in_row {
                cells.push(Some(Alien::new(x, y, variant, config)?));
                x += config.alien_h_sep + config.alien_width;
            }
            grid.push(cells);
            y -= config.alien_height + config.alien_v_sep;
        }

        Ok(Formation {
            grid,
            direction: Direction::Right,
            timer: 0.0,
            steps: 0,
            fire_threshold: roll_fire_threshold(config, rng),
        })
    }

    // ── Queries ──────────────────────────────────────────────────────────────

    pub fn grid(&self) -> &[Vec<Option<Alien>>] {
        &self.grid
    }

    pub fn rows(&self) -> usize {
        self.grid.len()
    }

    pub fn columns(&self) -> usize {
        self.grid.first().map_or(0, Vec::len)
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }

    pub fn steps(&self) -> u32 {
        self.steps
    }

    pub fn fire_threshold(&self) -> u32 {
        self.fire_threshold
    }

    /// Living aliens in row-major order.
    pub fn aliens(&self) -> impl Iterator<Item = &Alien> {
        self.grid.iter().flatten().flatten()
    }

    pub fn aliens_mut(&mut self) -> impl Iterator<Item = &mut Alien> {
        self.grid.iter_mut().flatten().flatten()
    }

    pub fn alive_count(&self) -> usize {
        self.aliens().count()
    }

    pub fn any_alive(&self) -> bool {
        self.aliens().next().is_some()
    }

    /// Living aliens in `column`, top to bottom.
    fn column(&self, column: usize) -> impl DoubleEndedIterator<Item = &Alien> {
        self.grid.iter().filter_map(move |row| row.get(column).and_then(Option::as_ref))
    }

    /// Any alien from the rightmost column that still has one.
    pub fn rightmost(&self) -> Option<&Alien> {
        (0..self.columns()).rev().find_map(|c| self.column(c).next())
    }

    /// Any alien from the leftmost column that still has one.
    pub fn leftmost(&self) -> Option<&Alien> {
        (0..self.columns()).find_map(|c| self.column(c).next())
    }

    /// The lowest living alien in `column`.
    pub fn bottom_of_column(&self, column: usize) -> Option<&Alien> {
        self.column(column).next_back()
    }

    /// Pick the alien that fires next: a random non-empty column, lowest
    /// alien in it.  `None` only when the formation is wiped out.
    pub fn choose_shooter(&self, rng: &mut impl Rng) -> Option<&Alien> {
        let columns: Vec<usize> = (0..self.columns())
            .filter(|&c| self.bottom_of_column(c).is_some())
            .collect();
        let &column = columns.choose(rng)?;
        self.bottom_of_column(column)
    }

    pub fn is_breaching(&self, line: &DefenseLine) -> bool {
        self.aliens().any(|alien| line.is_breached_by(alien))
    }

    /// True when the leading edge is within one gap of the side it is
    /// marching toward.
    pub fn at_edge(&self, config: &Config) -> bool {
        match self.direction {
            Direction::Right => self
                .rightmost()
                .map_or(false, |a| config.game_width - a.bounds().right() < config.alien_h_sep),
            Direction::Left => self
                .leftmost()
                .map_or(false, |a| a.bounds().left() < config.alien_h_sep),
        }
    }

    // ── Mutation ─────────────────────────────────────────────────────────────

    /// Run one frame of formation movement.  Returns the bolt fired this
    /// frame, if any.
    pub fn advance(&mut self, dt: f64, config: &Config, rng: &mut impl Rng) -> Option<Bolt> {
        let bolt = if self.steps == self.fire_threshold {
            self.steps = 0;
            self.fire_threshold = roll_fire_threshold(config, rng);
            let shot = self
                .choose_shooter(rng)
                .map(|alien| Bolt::from_alien(alien.x, alien.y, config));
            if let Some(b) = &shot {
                trace!("alien fires from ({:.1}, {:.1})", b.x, b.y);
            }
            shot
        } else {
            None
        };

        self.timer += dt;
        if self.timer > config.alien_speed {
            self.timer = 0.0;
            self.steps += 1;
            let dx = match self.direction {
                Direction::Right => config.alien_h_walk,
                Direction::Left => -config.alien_h_walk,
            };
            self.shift(dx, 0.0);

            if self.at_edge(config) {
                self.shift(0.0, -config.alien_v_walk);
                self.direction = self.direction.flipped();
                trace!("formation turns {:?}", self.direction);
            }
        }

        bolt
    }

    fn shift(&mut self, dx: f64, dy: f64) {
        for alien in self.aliens_mut() {
            alien.x += dx;
            alien.y += dy;
        }
    }

    /// Destroy the first alien (row-major) the bolt hits.  Returns whether
    /// anything was hit.
    pub fn hit(&mut self, bolt: &Bolt) -> bool {
        for cell in self.grid.iter_mut().flatten() {
            if cell.as_ref().map_or(false, |alien| alien.collides(bolt)) {
                *cell = None;
                return true;
            }
        }
        false
    }

    /// Empty one cell, returning whoever was in it.
    pub fn remove(&mut self, row: usize, column: usize) -> Option<Alien> {
        self.grid.get_mut(row)?.get_mut(column)?.take()
    }
}

impl Drawable for Formation {
    fn draw(&self, surface: &mut dyn Surface) {
        for alien in self.aliens() {
            alien.draw(surface);
        }
    }
}
