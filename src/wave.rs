/// One wave of aliens: the ship, the formation, every bolt in flight and
/// the defense line, advanced one frame at a time.
///
/// A `Wave` is built fresh for every attempt and thrown away when the
/// attempt ends; nothing in it is ever reset in place.  All randomness comes
/// through the injected RNG so tests can drive it with a seeded generator.
use log::{debug, info, warn};
use rand::Rng;

use crate::animation::{AnimationStatus, DeathAnimation};
use crate::config::Config;
use crate::draw::{Drawable, Surface};
use crate::entities::{Bolt, DefenseLine, Ship};
use crate::error::GameError;
use crate::formation::Formation;
use crate::input::{Key, KeyInput};

/// How the wave ended, if it has.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Outcome {
    Undetermined,
    Won,
    Lost,
}

#[derive(Clone, Debug)]
pub struct Wave {
    config: Config,
    /// `None` between the end of the explosion and `create_new_ship`.
    ship: Option<Ship>,
    formation: Formation,
    bolts: Vec<Bolt>,
    defense_line: DefenseLine,
    lives: u32,
    /// Aliens shot down so far.
    destroyed: u32,
    animation: DeathAnimation,
    ship_destroyed: bool,
    outcome: Outcome,
}

impl Wave {
    pub fn new(config: Config, rng: &mut impl Rng) -> Result<Self, GameError> {
        config.validate()?;
        let formation = Formation::new(&config, rng)?;
        info!(
            "new wave: {}x{} aliens, {} lives",
            formation.rows(),
            formation.columns(),
            config.ship_lives
        );

        Ok(Wave {
            ship: Some(Ship::spawn(&config)),
            formation,
            bolts: Vec::new(),
            defense_line: DefenseLine { y: config.defense_line },
            lives: config.ship_lives,
            destroyed: 0,
            animation: DeathAnimation::new(config.death_speed),
            ship_destroyed: false,
            outcome: Outcome::Undetermined,
            config,
        })
    }

    // ── Caller-facing queries ────────────────────────────────────────────────

    pub fn lives(&self) -> u32 {
        self.lives
    }

    pub fn is_life_left(&self) -> bool {
        self.lives > 0
    }

    pub fn score(&self) -> u32 {
        self.destroyed * self.config.score_multiplier
    }

    pub fn outcome(&self) -> Outcome {
        self.outcome
    }

    /// `Some(true)` on a win, `Some(false)` on a loss, `None` while playing.
    pub fn has_player_won(&self) -> Option<bool> {
        match self.outcome {
            Outcome::Undetermined => None,
            Outcome::Won => Some(true),
            Outcome::Lost => Some(false),
        }
    }

    pub fn is_ship_destroyed(&self) -> bool {
        self.ship_destroyed
    }

    pub fn reset_ship_destroyed(&mut self) {
        self.ship_destroyed = false;
    }

    /// Put a replacement ship at the spawn position.
    pub fn create_new_ship(&mut self) {
        self.ship = Some(Ship::spawn(&self.config));
        self.animation.reset();
    }

    pub fn is_exploding(&self) -> bool {
        self.animation.is_running()
    }

    // ── Entity access ────────────────────────────────────────────────────────

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn ship(&self) -> Option<&Ship> {
        self.ship.as_ref()
    }

    pub fn ship_mut(&mut self) -> Option<&mut Ship> {
        self.ship.as_mut()
    }

    pub fn formation(&self) -> &Formation {
        &self.formation
    }

    pub fn formation_mut(&mut self) -> &mut Formation {
        &mut self.formation
    }

    pub fn bolts(&self) -> &[Bolt] {
        &self.bolts
    }

    pub fn defense_line(&self) -> DefenseLine {
        self.defense_line
    }

    /// Track a new bolt.  A player bolt is refused while another player
    /// bolt is still in flight.
    pub fn add_bolt(&mut self, bolt: Bolt) -> bool {
        if bolt.is_player_bolt() && self.bolts.iter().any(Bolt::is_player_bolt) {
            return false;
        }
        self.bolts.push(bolt);
        true
    }

    // ── Per-frame update ─────────────────────────────────────────────────────

    /// Advance the wave by one frame of `dt` seconds.
    ///
    /// While the ship is exploding, ship movement and firing are skipped.
    /// Fails without touching anything if `dt` is negative or not finite.
    pub fn update(
        &mut self,
        input: &impl KeyInput,
        dt: f64,
        rng: &mut impl Rng,
    ) -> Result<(), GameError> {
        if !(dt.is_finite() && dt >= 0.0) {
            warn!("rejecting frame with dt = {}", dt);
            return Err(GameError::InvalidElapsed(dt));
        }

        // ── 1. Ship: explosion or player control ─────────────────────────────
        if self.animation.is_running() {
            self.step_explosion(dt);
        } else if self.ship.is_some() {
            self.move_ship(input);
            self.fire(input);
        }

        // ── 2. Formation march and return fire ───────────────────────────────
        if self.formation.any_alive() {
            if let Some(bolt) = self.formation.advance(dt, &self.config, rng) {
                self.bolts.push(bolt);
            }
        }

        // ── 3. Bolts ─────────────────────────────────────────────────────────
        self.move_bolts();

        // ── 4. Collisions, then the end-of-wave check ────────────────────────
        self.resolve_collisions();
        self.check_outcome();

        Ok(())
    }

    fn step_explosion(&mut self, dt: f64) {
        let Some(ship) = self.ship.as_mut() else {
            self.animation.reset();
            return;
        };
        if self.animation.step(dt, ship) == AnimationStatus::Finished {
            debug!("ship explosion finished, {} lives left", self.lives);
            self.ship_destroyed = true;
            self.ship = None;
            self.bolts.clear();
            self.animation.reset();
        }
    }

    /// Wrap around the screen edges, otherwise follow the held keys.
    fn move_ship(&mut self, input: &impl KeyInput) {
        let Some(ship) = self.ship.as_mut() else {
            return;
        };
        let half = ship.width / 2.0;

        if ship.x > self.config.game_width - half {
            ship.x = half;
        } else if ship.x < half {
            ship.x = self.config.game_width - half;
        } else {
            if input.is_key_down(Key::Right) {
                ship.x += self.config.ship_movement;
            }
            if input.is_key_down(Key::Left) {
                ship.x -= self.config.ship_movement;
            }
        }
    }

    fn fire(&mut self, input: &impl KeyInput) {
        if !input.is_key_down(Key::Fire) {
            return;
        }
        if let Some(ship) = &self.ship {
            let bolt = Bolt::from_ship(ship.x, ship.y, &self.config);
            self.add_bolt(bolt);
        }
    }

    fn move_bolts(&mut self) {
        let height = self.config.game_height;
        for bolt in &mut self.bolts {
            bolt.advance();
        }
        self.bolts.retain(|bolt| !bolt.is_off_screen(height));
    }

    /// Check one player bolt against the formation and one alien bolt
    /// against the ship.  Extra alien bolts wait for a later frame.
    fn resolve_collisions(&mut self) {
        if let Some(i) = self.bolts.iter().rposition(Bolt::is_player_bolt) {
            if self.formation.any_alive() && self.formation.hit(&self.bolts[i]) {
                self.bolts.remove(i);
                self.destroyed += 1;
                debug!(
                    "alien destroyed, {} remaining, score {}",
                    self.formation.alive_count(),
                    self.score()
                );
            }
        }

        if let Some(i) = self.bolts.iter().rposition(|b| !b.is_player_bolt()) {
            let hit = self
                .ship
                .as_ref()
                .map_or(false, |ship| ship.collides(&self.bolts[i]));
            if hit {
                self.animation.start();
                self.bolts.remove(i);
                self.lives = self.lives.saturating_sub(1);
                debug!("ship hit, {} lives left", self.lives);
            }
        }
    }

    /// A cleared grid wins, but a breach or running out of lives in the
    /// same frame loses instead.  Once decided, the outcome sticks.
    fn check_outcome(&mut self) {
        if self.outcome != Outcome::Undetermined {
            return;
        }

        let mut outcome = Outcome::Undetermined;
        if !self.formation.any_alive() {
            outcome = Outcome::Won;
        }
        if self.formation.is_breaching(&self.defense_line) || self.lives == 0 {
            outcome = Outcome::Lost;
        }

        if outcome != Outcome::Undetermined {
            info!("wave over: {:?}, score {}", outcome, self.score());
            self.outcome = outcome;
        }
    }
}

impl Drawable for Wave {
    /// Ship, defense line, aliens row by row, then bolts.
    fn draw(&self, surface: &mut dyn Surface) {
        if let Some(ship) = &self.ship {
            ship.draw(surface);
        }
        self.defense_line.draw(surface);
        self.formation.draw(surface);
        for bolt in &self.bolts {
            bolt.draw(surface);
        }
    }
}
