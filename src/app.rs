//! Screen-level state machine around a `Wave`.
//!
//! Inactive → NewWave → Active → {Paused → Continue → Active} → Complete →
//! NewGame → Inactive.  States that need no input fall through to the next
//! state within the same frame, so a start press goes straight into play.

use log::info;
use rand::Rng;

use crate::config::Config;
use crate::draw::{Drawable, Label, Surface};
use crate::error::GameError;
use crate::input::{Key, KeyInput};
use crate::wave::Wave;

/// Seconds after a finished wave before the "new game" message shows.
pub const NEW_GAME_MESSAGE_DELAY: f64 = 2.0;
/// Seconds after a finished wave before returning to the title prompt.
pub const NEW_GAME_DELAY: f64 = 4.0;

/// Distance of the score and lives labels from the top corners.
const HUD_MARGIN_X: f64 = 80.0;
const HUD_MARGIN_Y: f64 = 30.0;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GameState {
    /// Waiting for the player to start.
    Inactive,
    /// Building a fresh wave.
    NewWave,
    Active,
    /// Ship lost, lives remain; waiting for the player to continue.
    Paused,
    /// Spawning the replacement ship.
    Continue,
    /// Wave won or lost; picking the closing message.
    Complete,
    /// Counting down to the title prompt.
    NewGame,
}

pub struct App {
    config: Config,
    state: GameState,
    wave: Option<Wave>,
    message: Label,
    /// Seconds spent in `NewGame`.
    timer: f64,
    /// Start key state last frame; transitions fire on a fresh press only.
    start_was_down: bool,
}

impl App {
    pub fn new(config: Config) -> Result<Self, GameError> {
        config.validate()?;
        let message = prompt(&config, "Press S to play");
        Ok(App {
            config,
            state: GameState::Inactive,
            wave: None,
            message,
            timer: 0.0,
            start_was_down: false,
        })
    }

    pub fn state(&self) -> GameState {
        self.state
    }

    pub fn wave(&self) -> Option<&Wave> {
        self.wave.as_ref()
    }

    pub fn wave_mut(&mut self) -> Option<&mut Wave> {
        self.wave.as_mut()
    }

    pub fn message(&self) -> &str {
        &self.message.text
    }

    pub fn update(
        &mut self,
        input: &impl KeyInput,
        dt: f64,
        rng: &mut impl Rng,
    ) -> Result<(), GameError> {
        let start_down = input.is_key_down(Key::Start);
        let start_pressed = start_down && !self.start_was_down;
        self.start_was_down = start_down;

        if self.state == GameState::Inactive {
            self.message = prompt(&self.config, "Press S to play");
            if start_pressed {
                self.state = GameState::NewWave;
            }
        }
        if self.state == GameState::NewWave {
            self.wave = Some(Wave::new(self.config.clone(), rng)?);
            self.state = GameState::Active;
        }
        if self.state == GameState::Active {
            self.update_active(input, dt, rng)?;
        }
        if self.state == GameState::Paused {
            self.message = prompt(&self.config, "Press S to continue");
            if start_pressed {
                self.state = GameState::Continue;
            }
        }
        if self.state == GameState::Continue {
            if let Some(wave) = self.wave.as_mut() {
                wave.create_new_ship();
                wave.reset_ship_destroyed();
            }
            self.state = GameState::Active;
        }
        if self.state == GameState::Complete {
            let won = self.wave.as_ref().and_then(Wave::has_player_won) == Some(true);
            let text = if won { "Congratulations!" } else { "Sorry. You lose!" };
            self.message = prompt(&self.config, text);
            self.timer = 0.0;
            self.state = GameState::NewGame;
        }
        if self.state == GameState::NewGame {
            self.timer += dt;
            if self.timer >= NEW_GAME_DELAY {
                self.timer = 0.0;
                self.wave = None;
                self.message = prompt(&self.config, "Press S to play");
                self.state = GameState::Inactive;
            } else if self.timer >= NEW_GAME_MESSAGE_DELAY {
                self.message = prompt(&self.config, "Initializing new game");
            }
        }

        Ok(())
    }

    fn update_active(
        &mut self,
        input: &impl KeyInput,
        dt: f64,
        rng: &mut impl Rng,
    ) -> Result<(), GameError> {
        let Some(wave) = self.wave.as_mut() else {
            self.state = GameState::NewWave;
            return Ok(());
        };
        wave.update(input, dt, rng)?;

        if wave.has_player_won().is_some() {
            self.state = GameState::Complete;
        }
        if wave.is_ship_destroyed() {
            self.state = if wave.is_life_left() {
                GameState::Paused
            } else {
                GameState::Complete
            };
        }
        if self.state != GameState::Active {
            info!("{:?} (score {}, lives {})", self.state, wave.score(), wave.lives());
        }
        Ok(())
    }

    fn hud(&self, wave: &Wave) -> [Label; 2] {
        let y = self.config.game_height - HUD_MARGIN_Y;
        [
            Label::new(HUD_MARGIN_X, y, format!("Score: {}", wave.score())),
            Label::new(
                self.config.game_width - HUD_MARGIN_X,
                y,
                format!("Lives: {}", wave.lives()),
            ),
        ]
    }
}

impl Drawable for App {
    fn draw(&self, surface: &mut dyn Surface) {
        match (self.state, &self.wave) {
            (GameState::NewWave | GameState::Active, Some(wave)) => {
                wave.draw(surface);
                for label in self.hud(wave) {
                    label.draw(surface);
                }
            }
            (GameState::Paused, Some(wave)) => {
                wave.draw(surface);
                self.message.draw(surface);
            }
            _ => self.message.draw(surface),
        }
    }
}

fn prompt(config: &Config, text: &str) -> Label {
    Label::new(config.game_width / 2.0, config.game_height / 2.0, text)
}
