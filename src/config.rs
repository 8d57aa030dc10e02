//! Fixed game constants, bundled so a wave never reads globals.
//!
//! `Config::default()` carries the classic arcade values.  Sizes are in
//! world units (y-up, origin at the bottom-left of the play area), times
//! are in seconds, speeds are per frame.

use crate::error::GameError;

#[derive(Clone, Debug, PartialEq)]
pub struct Config {
    // ── Play area ────────────────────────────────────────────────────────────
    pub game_width: f64,
    pub game_height: f64,
    /// y-coordinate of the defense line.
    pub defense_line: f64,

    // ── Ship ─────────────────────────────────────────────────────────────────
    pub ship_width: f64,
    pub ship_height: f64,
    /// Distance from the bottom of the play area to the ship's lower edge.
    pub ship_bottom: f64,
    pub ship_movement: f64,
    pub ship_lives: u32,
    /// Number of frames in the ship's explosion sprite.
    pub ship_frames: usize,
    /// Seconds the explosion takes to play through.
    pub death_speed: f64,

    // ── Aliens ───────────────────────────────────────────────────────────────
    pub alien_width: f64,
    pub alien_height: f64,
    pub alien_h_sep: f64,
    pub alien_v_sep: f64,
    /// Distance from the top of the play area to the first row's center.
    pub alien_ceiling: f64,
    pub alien_rows: usize,
    pub aliens_in_row: usize,
    pub alien_h_walk: f64,
    pub alien_v_walk: f64,
    /// Seconds between formation steps.
    pub alien_speed: f64,
    pub alien_variants: usize,

    // ── Bolts ────────────────────────────────────────────────────────────────
    pub bolt_width: f64,
    pub bolt_height: f64,
    pub bolt_speed: f64,
    /// Upper bound of the random step count between alien shots.
    pub bolt_rate: u32,

    /// Points per destroyed alien.
    pub score_multiplier: u32,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            game_width: 800.0,
            game_height: 700.0,
            defense_line: 100.0,

            ship_width: 44.0,
            ship_height: 44.0,
            ship_bottom: 32.0,
            ship_movement: 5.0,
            ship_lives: 3,
            ship_frames: 6,
            death_speed: 0.3,

            alien_width: 33.0,
            alien_height: 33.0,
            alien_h_sep: 16.0,
            alien_v_sep: 16.0,
            alien_ceiling: 100.0,
            alien_rows: 5,
            aliens_in_row: 12,
            alien_h_walk: 8.0,
            alien_v_walk: 16.0,
            alien_speed: 1.0,
            alien_variants: 3,

            bolt_width: 4.0,
            bolt_height: 16.0,
            bolt_speed: 10.0,
            bolt_rate: 5,

            score_multiplier: 10,
        }
    }
}

impl Config {
    /// Reject values the simulation cannot run with.
    pub fn validate(&self) -> Result<(), GameError> {
        let positive = [
            ("game_width", self.game_width),
            ("game_height", self.game_height),
            ("ship_width", self.ship_width),
            ("ship_height", self.ship_height),
            ("ship_movement", self.ship_movement),
            ("death_speed", self.death_speed),
            ("alien_width", self.alien_width),
            ("alien_height", self.alien_height),
            ("alien_h_walk", self.alien_h_walk),
            ("alien_v_walk", self.alien_v_walk),
            ("alien_speed", self.alien_speed),
            ("bolt_width", self.bolt_width),
            ("bolt_height", self.bolt_height),
            ("bolt_speed", self.bolt_speed),
        ];
        for (name, value) in positive {
            if !(value.is_finite() && value > 0.0) {
                return Err(GameError::InvalidConfig(format!(
                    "{} must be positive, got {}",
                    name, value
                )));
            }
        }

        if self.alien_rows == 0 || self.aliens_in_row == 0 {
            return Err(GameError::InvalidConfig("alien grid must be non-empty".into()));
        }
        if self.alien_variants == 0 {
            return Err(GameError::InvalidConfig("need at least one alien image".into()));
        }
        if self.bolt_rate == 0 {
            return Err(GameError::InvalidConfig("bolt_rate must be at least 1".into()));
        }
        if self.ship_frames < 2 {
            return Err(GameError::InvalidConfig(
                "ship sprite needs at least two frames".into(),
            ));
        }
        if !(0.0..self.game_height).contains(&self.defense_line) {
            return Err(GameError::InvalidConfig(format!(
                "defense line {} outside play area",
                self.defense_line
            )));
        }
        Ok(())
    }

    /// Where a fresh ship's center sits.
    pub fn ship_spawn(&self) -> (f64, f64) {
        (
            self.game_width / 2.0,
            self.ship_bottom + self.ship_height / 2.0,
        )
    }
}
