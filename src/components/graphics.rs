//! Components related to graphics and animation

use std::collections::HashMap;

use specs::{Component, VecStorage, HashMapStorage};
use sdl2::rect::{Point, Rect};

use crate::assets::TextureId;

/// The width and height of a single frame box in the townsfolk spritesheet
pub const FRAME_SIZE: u32 = 32;

/// The x coordinate where each character's frames begin in the spritesheet (two frame boxes in)
pub const SHEET_BASE_X: i32 = 64;

/// The number of frames in a walk cycle. Frames are numbered 1 to WALK_FRAME_COUNT; the standing
/// pose is a separate image selected by state, not frame 0 of the walk cycle.
pub const WALK_FRAME_COUNT: i32 = 3;

/// Everything drawn at this scale
pub const SPRITE_SCALE: u32 = 4;

lazy_static! {
    /// How far each character's collision box sits from its draw position.
    ///
    /// The characters do not fill their frame boxes evenly, so each one needs its own
    /// adjustment to put the collision box over its body. Offsets are in-image pixel
    /// distances multiplied by the sprite scale, plus a small draw adjustment.
    static ref COLLISION_OFFSETS: HashMap<i32, Point> = {
        let mut offsets = HashMap::new();
        // Luby
        offsets.insert(1, Point::new(8 * 4, 12 * 4 + 18));
        // Blup
        offsets.insert(5, Point::new(9 * 4, 14 * 4 + 18));
        // Billow
        offsets.insert(9, Point::new(7 * 4, 9 * 4 + 18));
        offsets
    };
}

/// The spritesheet that an entity's frames are drawn from.
///
/// The texture itself lives in the TextureManager and is shared by every entity that uses it.
#[derive(Debug, Clone, Component)]
#[storage(VecStorage)]
pub struct SpriteSheet(pub TextureId);

/// Which of the characters in the shared spritesheet this entity looks like.
///
/// The appearance selects the row of the spritesheet to draw frames from and the collision box
/// offset to apply at construction. It never changes after construction.
#[derive(Debug, Clone, Component)]
#[storage(VecStorage)]
pub struct Appearance {
    pub index: i32,
    /// The y coordinate of this character's row in the spritesheet
    pub row_y: i32,
}

impl Appearance {
    pub fn new(index: i32) -> Self {
        Self {
            index,
            row_y: FRAME_SIZE as i32 * index + 1,
        }
    }

    /// Returns the offset from the draw position at which this character's collision box should
    /// be placed. Characters without a configured offset get no adjustment.
    pub fn collision_offset(&self) -> Point {
        COLLISION_OFFSETS.get(&self.index)
            .copied()
            .unwrap_or_else(|| Point::new(0, 0))
    }

    /// The spritesheet region for this character's standing pose
    pub fn standing_region(&self) -> Rect {
        Rect::new(SHEET_BASE_X, self.row_y, FRAME_SIZE, FRAME_SIZE)
    }

    /// The spritesheet region for the given frame of this character's walk cycle
    pub fn walking_region(&self, frame: i32) -> Rect {
        Rect::new(
            SHEET_BASE_X + frame * FRAME_SIZE as i32,
            self.row_y,
            FRAME_SIZE,
            FRAME_SIZE,
        )
    }
}

/// The walk cycle animation timer.
///
/// Accumulates elapsed time and advances the frame index once per frame duration. The frame index
/// cycles 1, 2, 3, 1, ... once the animation has started. Note that the advance is capped at one
/// frame per call: if a single tick takes longer than a frame duration, the extra frames are
/// dropped rather than caught up on.
#[derive(Debug, Clone, Component)]
#[storage(HashMapStorage)]
pub struct WalkCycle {
    /// The current frame of the walk cycle (0 only before the first advance)
    pub frame: i32,
    /// Time accumulated towards the next frame (seconds)
    pub time_passed: f64,
    /// How long each frame is displayed for (seconds)
    pub time_per_frame: f64,
}

impl WalkCycle {
    pub fn new(fps: f64) -> Self {
        Self {
            frame: 0,
            time_passed: 0.0,
            time_per_frame: 1.0 / fps,
        }
    }

    /// Advances the animation by the given number of elapsed seconds.
    ///
    /// Advances the frame index at most once, subtracting exactly one frame duration from the
    /// accumulated time so that sub-frame remainders carry over to the next call.
    pub fn advance(&mut self, elapsed: f64) {
        self.time_passed += elapsed;

        if self.time_passed >= self.time_per_frame {
            self.frame += 1;

            // The walk cycle has ended, return to the first walking frame
            if self.frame > WALK_FRAME_COUNT {
                self.frame = 1;
            }

            self.time_passed -= self.time_per_frame;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn frame_advances_after_one_frame_duration() {
        let mut cycle = WalkCycle::new(10.0);
        assert_eq!(cycle.frame, 0);

        // Two updates summing to exactly one frame duration
        cycle.advance(0.05);
        assert_eq!(cycle.frame, 0);
        cycle.advance(0.05);
        assert_eq!(cycle.frame, 1);
    }

    #[test]
    fn at_most_one_advance_per_call() {
        let mut cycle = WalkCycle::new(10.0);

        // 0.35s is three and a half frames worth of time, but a single call only ever advances
        // one frame. The remainder stays in the accumulator.
        cycle.advance(0.35);
        assert_eq!(cycle.frame, 1);
        assert!((cycle.time_passed - 0.25).abs() < 1e-9);
    }

    #[test]
    fn remainder_carries_over_between_advances() {
        let mut cycle = WalkCycle::new(10.0);

        cycle.advance(0.15);
        assert_eq!(cycle.frame, 1);
        // 0.05s left over, so another 0.05s completes the next frame
        cycle.advance(0.05);
        assert_eq!(cycle.frame, 2);
    }

    #[test]
    fn frames_cycle_one_through_three() {
        let mut cycle = WalkCycle::new(10.0);

        let mut seen = Vec::new();
        for _ in 0..7 {
            cycle.advance(0.1);
            seen.push(cycle.frame);
        }
        assert_eq!(seen, vec![1, 2, 3, 1, 2, 3, 1]);
    }

    #[test]
    fn frame_never_returns_to_zero() {
        let mut cycle = WalkCycle::new(10.0);
        for _ in 0..100 {
            cycle.advance(0.037);
            if cycle.frame != 0 {
                assert!(cycle.frame >= 1 && cycle.frame <= WALK_FRAME_COUNT);
            }
        }
        assert_ne!(cycle.frame, 0);
    }

    #[test]
    fn appearance_rows_and_regions() {
        let luby = Appearance::new(1);
        assert_eq!(luby.row_y, 33);
        assert_eq!(luby.standing_region(), Rect::new(64, 33, 32, 32));
        assert_eq!(luby.walking_region(2), Rect::new(128, 33, 32, 32));

        let billow = Appearance::new(9);
        assert_eq!(billow.row_y, 289);
        assert_eq!(billow.walking_region(1), Rect::new(96, 289, 32, 32));
    }

    #[test]
    fn collision_offsets_per_character() {
        assert_eq!(Appearance::new(1).collision_offset(), Point::new(32, 66));
        assert_eq!(Appearance::new(5).collision_offset(), Point::new(36, 74));
        assert_eq!(Appearance::new(9).collision_offset(), Point::new(28, 54));
        // Unknown appearances silently get no offset
        assert_eq!(Appearance::new(3).collision_offset(), Point::new(0, 0));
        assert_eq!(Appearance::new(42).collision_offset(), Point::new(0, 0));
    }
}
