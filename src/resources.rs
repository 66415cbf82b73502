//! ECS Resources for use by various systems

use sdl2::pixels::Color;

/// Resource that represents the amount of real time (in seconds) that has elapsed since the last
/// time all of the systems were run.
///
/// Often this will be close to one frame's worth of time, but it may be larger if there is lag or
/// if a system takes too long.
pub struct TimeElapsed(pub f64);

/// Resource that represents which part of the game is currently in progress.
///
/// Entities only update and draw during `Playing`. Pausing or opening a menu freezes every timer,
/// state machine, and position exactly where it was.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameMode {
    Playing,
    Paused,
    Menu,
}

impl Default for GameMode {
    fn default() -> Self {
        GameMode::Playing
    }
}

/// Resource that represents the current tone of the world.
///
/// The world flips between a benign and a hostile version of itself. Townsfolk are harmless and
/// drawn normally while the world is benign. In the hostile world they are drawn with a warning
/// tint and damage the player on contact.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WorldTone {
    Benign,
    Hostile,
}

impl Default for WorldTone {
    fn default() -> Self {
        WorldTone::Benign
    }
}

impl WorldTone {
    /// Returns the tint color that sprites should be drawn with under this tone
    pub fn tint(self) -> Color {
        match self {
            WorldTone::Benign => Color::RGBA(255, 255, 255, 255),
            WorldTone::Hostile => Color::RGBA(255, 0, 0, 255),
        }
    }
}
