//! Ship explosion, played through the ship's sprite frames.
//!
//! The animation is stepped with each frame's elapsed time.  It owns no
//! reference to the ship; the caller passes the ship in on every step.

use crate::entities::Ship;

/// How close the fractional frame index must be to a whole frame before
/// the sprite switches to it.
pub const FRAME_TOLERANCE: f64 = 0.1;

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum AnimationState {
    Idle,
    Animating { elapsed: f64 },
    Done,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AnimationStatus {
    /// Nothing to play.
    Idle,
    Running,
    /// The last frame is showing.
    Finished,
}

#[derive(Clone, Debug, PartialEq)]
pub struct DeathAnimation {
    state: AnimationState,
    /// Seconds from first to last frame.
    duration: f64,
}

impl DeathAnimation {
    pub fn new(duration: f64) -> Self {
        DeathAnimation { state: AnimationState::Idle, duration }
    }

    pub fn state(&self) -> AnimationState {
        self.state
    }

    pub fn is_running(&self) -> bool {
        matches!(self.state, AnimationState::Animating { .. })
    }

    /// (Re)start from time zero.
    pub fn start(&mut self) {
        self.state = AnimationState::Animating { elapsed: 0.0 };
    }

    pub fn reset(&mut self) {
        self.state = AnimationState::Idle;
    }

    /// Advance by `dt` seconds and update the ship's frame.
    pub fn step(&mut self, dt: f64, ship: &mut Ship) -> AnimationStatus {
        let elapsed = match self.state {
            AnimationState::Idle => return AnimationStatus::Idle,
            AnimationState::Done => return AnimationStatus::Finished,
            AnimationState::Animating { elapsed } => elapsed + dt,
        };

        let count = ship.frame_count();
        let last = ship.last_frame();
        if elapsed >= self.duration {
            // A long frame can jump past the last frame's window.
            ship.set_frame(last);
        } else {
            let index = elapsed / self.duration * count as f64;
            if let Some(frame) = (1..count).find(|&f| (index - f as f64).abs() <= FRAME_TOLERANCE) {
                ship.set_frame(frame);
            }
        }

        if ship.frame() == last {
            self.state = AnimationState::Done;
            AnimationStatus::Finished
        } else {
            self.state = AnimationState::Animating { elapsed };
            AnimationStatus::Running
        }
    }
}
