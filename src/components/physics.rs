//! Components for physics-related uses

use specs::{Component, VecStorage};
use sdl2::rect::{Point, Rect};

/// Represents the XY world coordinates of the top left corner of an entity's sprite.
///
/// This is the position the entity is drawn at. It is tracked separately from the entity's
/// CollisionBox because the visible sprite and the part of it that should collide with things do
/// not line up exactly.
#[derive(Debug, Clone, Component)]
#[storage(VecStorage)]
pub struct Position(pub Point);

/// The axis-aligned rectangle used for collision between this entity and other entities.
///
/// The rectangle carries its own position, offset from the draw position at construction so that
/// it covers the "body" of the sprite rather than the whole frame. Anything that moves the entity
/// must move this rectangle by the same amount.
#[derive(Debug, Clone, Component)]
#[storage(VecStorage)]
pub struct CollisionBox(pub Rect);

impl CollisionBox {
    /// Returns true if this box and the given box overlap.
    ///
    /// Boxes that merely share an edge or corner (zero-area overlap) do not count as
    /// intersecting.
    pub fn intersects(&self, other: &CollisionBox) -> bool {
        self.0.has_intersection(other.0)
    }
}
