//! Drives the wandering characters: walk cycle animation, facing/walking transitions, and
//! movement

use specs::shred::ResourceId;
use specs::{System, SystemData, Join, ReadExpect, WriteStorage, World};

use crate::components::{Wander, WalkCycle, Position, CollisionBox};
use crate::resources::{TimeElapsed, GameMode};

#[derive(SystemData)]
pub struct WanderingData<'a> {
    game_mode: ReadExpect<'a, GameMode>,
    time: ReadExpect<'a, TimeElapsed>,
    wanderers: WriteStorage<'a, Wander>,
    walk_cycles: WriteStorage<'a, WalkCycle>,
    positions: WriteStorage<'a, Position>,
    collision_boxes: WriteStorage<'a, CollisionBox>,
}

pub struct Wandering;

impl<'a> System<'a> for Wandering {
    type SystemData = WanderingData<'a>;

    fn run(&mut self, data: Self::SystemData) {
        let WanderingData {
            game_mode,
            time,
            mut wanderers,
            mut walk_cycles,
            mut positions,
            mut collision_boxes,
        } = data;

        // Characters only animate and move during gameplay. Everything freezes in place while
        // paused or in a menu.
        if *game_mode != GameMode::Playing {
            return;
        }

        let TimeElapsed(elapsed) = *time;

        for (wander, cycle, Position(pos), CollisionBox(rect)) in
            (&mut wanderers, &mut walk_cycles, &mut positions, &mut collision_boxes).join()
        {
            cycle.advance(elapsed);

            // The draw position and the collision box move together
            let dx = wander.advance(elapsed);
            *pos = pos.offset(dx, 0);
            rect.set_x(rect.x() + dx);
        }
    }
}
