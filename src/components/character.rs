//! Components related to character specific properties

use component_group::ComponentGroup;
use rand::Rng;
use specs::{Component, VecStorage, HashMapStorage, NullStorage};
use sdl2::rect::{Point, Rect};

use crate::assets::TextureId;
use super::{Position, CollisionBox, SpriteSheet, Appearance, WalkCycle};

/// How long a character faces in one direction before walking or turning around (seconds)
const TURN_DELAY: f64 = 1.0;

/// How far a walking character moves every tick (pixels)
const WALK_STEP: i32 = 3;

/// Frames per second of the walk cycle animation
const ANIMATION_FPS: f64 = 10.0;

/// The draw position sits this far below the spawn point so characters line up with the ground
const DRAW_BASELINE: i32 = 26;

/// The amount of health left for a given entity
#[derive(Debug, Clone, Component)]
#[storage(VecStorage)]
pub struct HealthPoints(pub usize);

/// Entities with this component wander back and forth and damage the player on contact while the
/// world is hostile
#[derive(Debug, Clone, Copy, Default, Component)]
#[storage(NullStorage)]
pub struct Npc;

/// The player character. Only one entity should hold this at a given time.
#[derive(Debug, Clone, Copy, Default, Component)]
#[storage(NullStorage)]
pub struct Player;

/// Entities with this component cannot take contact damage
#[derive(Debug, Clone, Copy, Default, Component)]
#[storage(NullStorage)]
pub struct GodMode;

/// The direction the player is being pushed after taking contact damage
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Knockback {
    None,
    Left,
    Right,
}

impl Default for Knockback {
    fn default() -> Self {
        Knockback::None
    }
}

/// The player's jump state, written by the knockback system and consumed by whatever resolves
/// jumping against the level (not part of this crate)
#[derive(Debug, Clone, Default, Component)]
#[storage(HashMapStorage)]
pub struct JumpState {
    pub is_jumping: bool,
    pub velocity_y: f64,
    pub knockback: Knockback,
}

/// Latched when the player takes contact damage. The player cannot take damage again until this
/// is cleared, which happens when they next land on a platform tile (resolved outside this
/// crate). This gives a brief invulnerability buffer after every hit.
#[derive(Debug, Clone, Default, Component)]
#[storage(HashMapStorage)]
pub struct DamageLatch(pub bool);

/// The facing/walking states a wandering character moves through
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WanderState {
    FaceLeft,
    FaceRight,
    WalkLeft,
    WalkRight,
}

impl WanderState {
    /// Returns true for the states where the character is moving
    pub fn is_walking(self) -> bool {
        match self {
            WanderState::WalkLeft | WanderState::WalkRight => true,
            WanderState::FaceLeft | WanderState::FaceRight => false,
        }
    }

    /// Returns true for the states where the sprite should be flipped to face left
    pub fn faces_left(self) -> bool {
        match self {
            WanderState::FaceLeft | WanderState::WalkLeft => true,
            WanderState::FaceRight | WanderState::WalkRight => false,
        }
    }
}

/// The state machine that drives a character's back-and-forth wandering.
///
/// A character faces in one direction for a second, walks that way for one to two seconds, then
/// faces forward again and turns around. Tracking the previous state is what distinguishes "just
/// turned around, about to walk" from "just finished walking, about to turn around".
#[derive(Debug, Clone, Component)]
#[storage(HashMapStorage)]
pub struct Wander {
    pub state: WanderState,
    pub prev_state: WanderState,
    /// Time spent in the current state so far (seconds)
    pub state_duration: f64,
    /// How long this character walks before stopping (seconds). Sampled once at construction
    /// from [1.0, 2.0) and reused for every walk after that.
    pub walk_duration: f64,
}

impl Wander {
    pub fn new(starting_state: WanderState, rng: &mut impl Rng) -> Self {
        Self {
            state: starting_state,
            prev_state: WanderState::FaceLeft,
            // Begin with the turn delay already served so the first transition fires immediately
            state_duration: TURN_DELAY,
            walk_duration: rng.gen_range(1.0, 2.0),
        }
    }

    /// Advances the state machine by the given number of elapsed seconds and returns the
    /// horizontal distance (in pixels) the character moved this tick.
    ///
    /// Movement applies before the transition check, so the tick that leaves a walking state
    /// still takes a step. Transitions subtract their threshold from the accumulated duration
    /// rather than resetting it, so overshoot from a long tick carries into the next state.
    pub fn advance(&mut self, elapsed: f64) -> i32 {
        self.state_duration += elapsed;

        let dx = match self.state {
            WanderState::WalkLeft => -WALK_STEP,
            WanderState::WalkRight => WALK_STEP,
            WanderState::FaceLeft | WanderState::FaceRight => 0,
        };

        if let Some((threshold, next_state)) = self.next_transition() {
            if self.state_duration >= threshold {
                self.state_duration -= threshold;
                self.prev_state = self.state;
                self.state = next_state;
            }
        }

        dx
    }

    /// The transition this character will take once it has been in its current state long
    /// enough, or None if no transition applies (a character that starts out facing the same way
    /// it "previously" faced just stands there).
    fn next_transition(&self) -> Option<(f64, WanderState)> {
        use self::WanderState::*;

        match (self.state, self.prev_state) {
            // Walk after turning around, turn around after walking
            (FaceLeft, FaceRight) => Some((TURN_DELAY, WalkLeft)),
            (FaceLeft, WalkLeft) => Some((TURN_DELAY, FaceRight)),
            (FaceRight, FaceLeft) => Some((TURN_DELAY, WalkRight)),
            (FaceRight, WalkRight) => Some((TURN_DELAY, FaceLeft)),
            // Stop walking after the walk duration, regardless of what came before
            (WalkLeft, _) => Some((self.walk_duration, FaceLeft)),
            (WalkRight, _) => Some((self.walk_duration, FaceRight)),
            _ => None,
        }
    }
}

/// All the components of a wandering NPC. Grouped together so a whole character can be added to
/// the world in one call without forgetting a component.
#[derive(Debug, ComponentGroup)]
pub struct NpcComponents {
    pub npc: Npc,
    pub position: Position,
    pub collision_box: CollisionBox,
    pub sprite_sheet: SpriteSheet,
    pub appearance: Appearance,
    pub wander: Wander,
    pub walk_cycle: WalkCycle,
}

impl NpcComponents {
    /// Builds a wandering NPC at the given spawn point.
    ///
    /// `(x, y)` is the spawn point and `(width, height)` the size of the collision box. The draw
    /// position and the collision box are both derived from the spawn point: the draw position
    /// drops by the baseline adjustment, and the collision box shifts by the appearance's offset
    /// so that it covers the character's body within the frame.
    pub fn new(
        sprite_sheet: TextureId,
        x: i32,
        y: i32,
        width: u32,
        height: u32,
        starting_state: WanderState,
        appearance_index: i32,
        rng: &mut impl Rng,
    ) -> Self {
        let appearance = Appearance::new(appearance_index);
        let offset = appearance.collision_offset();

        Self {
            npc: Npc,
            position: Position(Point::new(x, y + DRAW_BASELINE)),
            collision_box: CollisionBox(Rect::new(x + offset.x(), y + offset.y(), width, height)),
            sprite_sheet: SpriteSheet(sprite_sheet),
            appearance,
            wander: Wander::new(starting_state, rng),
            walk_cycle: WalkCycle::new(ANIMATION_FPS),
        }
    }
}

/// All the components of the player. Grouped together so they can be added to the world in one
/// call without forgetting a component.
#[derive(Debug, ComponentGroup)]
pub struct PlayerComponents {
    pub player: Player,
    pub health_points: HealthPoints,
    pub position: Position,
    pub collision_box: CollisionBox,
    pub jump_state: JumpState,
    pub damage_latch: DamageLatch,
}

#[cfg(test)]
mod tests {
    use super::*;

    use rand::{rngs::StdRng, SeedableRng};

    use self::WanderState::*;

    fn wander(state: WanderState, prev_state: WanderState, walk_duration: f64) -> Wander {
        Wander {
            state,
            prev_state,
            state_duration: 0.0,
            walk_duration,
        }
    }

    #[test]
    fn new_wander_starts_at_turn_threshold() {
        let mut rng = StdRng::seed_from_u64(20217);
        let wander = Wander::new(FaceRight, &mut rng);

        // The turn delay starts already served so the character springs to life on the first
        // tick instead of standing still for a second
        assert_eq!(wander.state, FaceRight);
        assert_eq!(wander.prev_state, FaceLeft);
        assert!((wander.state_duration - 1.0).abs() < 1e-9);
        assert!(wander.walk_duration >= 1.0 && wander.walk_duration < 2.0);
    }

    #[test]
    fn face_right_after_face_left_walks_right() {
        let mut wander = wander(FaceRight, FaceLeft, 1.5);

        let dx = wander.advance(0.6);
        assert_eq!(dx, 0);
        assert_eq!(wander.state, FaceRight);

        let dx = wander.advance(0.6);
        assert_eq!(dx, 0);
        assert_eq!(wander.state, WalkRight);
        assert_eq!(wander.prev_state, FaceRight);
        // 1.2s accumulated minus the 1.0s threshold
        assert!((wander.state_duration - 0.2).abs() < 1e-9);
    }

    #[test]
    fn face_right_after_walk_right_turns_around() {
        let mut wander = wander(FaceRight, WalkRight, 1.5);

        wander.advance(1.0);
        assert_eq!(wander.state, FaceLeft);
        assert_eq!(wander.prev_state, FaceRight);
    }

    #[test]
    fn face_left_after_face_right_walks_left() {
        let mut wander = wander(FaceLeft, FaceRight, 1.5);

        wander.advance(1.0);
        assert_eq!(wander.state, WalkLeft);
        assert_eq!(wander.prev_state, FaceLeft);
    }

    #[test]
    fn face_left_after_walk_left_turns_around() {
        let mut wander = wander(FaceLeft, WalkLeft, 1.5);

        wander.advance(1.0);
        assert_eq!(wander.state, FaceRight);
        assert_eq!(wander.prev_state, FaceLeft);
    }

    #[test]
    fn facing_with_matching_previous_state_never_transitions() {
        // A character constructed facing left starts with prev_state also FaceLeft, and no
        // transition row matches that pair. It accumulates duration forever.
        let mut wander = wander(FaceLeft, FaceLeft, 1.5);

        for _ in 0..100 {
            assert_eq!(wander.advance(0.5), 0);
            assert_eq!(wander.state, FaceLeft);
        }
        assert!(wander.state_duration >= 50.0);
    }

    #[test]
    fn walking_steps_three_pixels_per_tick() {
        let mut left = wander(WalkLeft, FaceLeft, 10.0);
        let mut right = wander(WalkRight, FaceRight, 10.0);
        for _ in 0..5 {
            assert_eq!(left.advance(0.1), -3);
            assert_eq!(right.advance(0.1), 3);
        }
    }

    #[test]
    fn walk_ends_after_walk_duration_with_overshoot_preserved() {
        let mut wander = wander(WalkLeft, FaceLeft, 1.5);

        wander.advance(1.4);
        assert_eq!(wander.state, WalkLeft);

        // The tick that crosses the threshold still takes a step
        let dx = wander.advance(0.3);
        assert_eq!(dx, -3);
        assert_eq!(wander.state, FaceLeft);
        assert_eq!(wander.prev_state, WalkLeft);
        // 1.7s accumulated minus the 1.5s walk duration
        assert!((wander.state_duration - 0.2).abs() < 1e-9);
    }

    #[test]
    fn walk_duration_is_never_resampled() {
        let mut wander = wander(WalkRight, FaceRight, 1.25);

        // First walk ends
        wander.advance(1.25);
        assert_eq!(wander.state, FaceRight);

        // Turn around, walk back, stop, turn around again, and start a second walk to the right
        wander.advance(1.0);
        assert_eq!(wander.state, FaceLeft);
        wander.advance(1.0);
        assert_eq!(wander.state, WalkLeft);
        wander.advance(1.25);
        assert_eq!(wander.state, FaceLeft);
        wander.advance(1.0);
        assert_eq!(wander.state, FaceRight);
        wander.advance(1.0);
        assert_eq!(wander.state, WalkRight);

        // Every walk reuses the duration sampled at construction
        assert!((wander.walk_duration - 1.25).abs() < 1e-9);
    }

    #[test]
    fn full_wander_cycle() {
        let mut wander = wander(FaceRight, FaceLeft, 1.5);
        let mut seen = vec![wander.state];

        // Drive with small ticks and record each distinct state
        for _ in 0..2000 {
            wander.advance(0.01);
            if *seen.last().unwrap() != wander.state {
                seen.push(wander.state);
            }
        }

        assert_eq!(
            &seen[0..8],
            &[FaceRight, WalkRight, FaceRight, FaceLeft, WalkLeft, FaceLeft, FaceRight, WalkRight],
        );
    }

    #[test]
    fn npc_construction_offsets() {
        let mut rng = StdRng::seed_from_u64(417);
        let sheet = TextureId::default();

        // Luby: collision box shifts (+32, +66), draw position drops by the baseline
        let npc = NpcComponents::new(sheet, 100, 200, 40, 60, FaceRight, 1, &mut rng);
        assert_eq!(npc.position.0, Point::new(100, 226));
        assert_eq!(npc.collision_box.0, Rect::new(132, 266, 40, 60));
        assert_eq!(npc.appearance.row_y, 33);

        // Unrecognized appearance: collision box is not adjusted
        let npc = NpcComponents::new(sheet, 100, 200, 40, 60, FaceLeft, 2, &mut rng);
        assert_eq!(npc.collision_box.0, Rect::new(100, 200, 40, 60));
    }
}
