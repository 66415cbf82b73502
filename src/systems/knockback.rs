//! Applies contact damage and knockback to the player when they touch an NPC in the hostile
//! world

use specs::shred::ResourceId;
use specs::{System, SystemData, Join, Entities, ReadExpect, ReadStorage, WriteStorage, World};

use crate::components::{
    Npc, Player, GodMode, Knockback, JumpState, DamageLatch, HealthPoints, CollisionBox,
};
use crate::resources::{GameMode, WorldTone};

/// The upward velocity applied to the player when they are knocked back
const KNOCKBACK_JUMP_VELOCITY: f64 = -23.0;

/// How much health the player loses on contact with an NPC
const CONTACT_DAMAGE: usize = 5;

#[derive(SystemData)]
pub struct KnockbackData<'a> {
    entities: Entities<'a>,
    game_mode: ReadExpect<'a, GameMode>,
    tone: ReadExpect<'a, WorldTone>,
    npcs: ReadStorage<'a, Npc>,
    players: ReadStorage<'a, Player>,
    god_modes: ReadStorage<'a, GodMode>,
    collision_boxes: ReadStorage<'a, CollisionBox>,
    health_points: WriteStorage<'a, HealthPoints>,
    jump_states: WriteStorage<'a, JumpState>,
    damage_latches: WriteStorage<'a, DamageLatch>,
}

pub struct PlayerKnockback;

impl<'a> System<'a> for PlayerKnockback {
    type SystemData = KnockbackData<'a>;

    fn run(&mut self, data: Self::SystemData) {
        let KnockbackData {
            entities,
            game_mode,
            tone,
            npcs,
            players,
            god_modes,
            collision_boxes,
            mut health_points,
            mut jump_states,
            mut damage_latches,
        } = data;

        if *game_mode != GameMode::Playing {
            return;
        }

        // NPCs are only dangerous while the world is hostile
        if *tone != WorldTone::Hostile {
            return;
        }

        for (player_entity, _, player_box, jump, latch, hp) in (
            &entities,
            &players,
            &collision_boxes,
            &mut jump_states,
            &mut damage_latches,
            &mut health_points,
        ).join() {
            if god_modes.contains(player_entity) {
                continue;
            }

            // Checked per NPC rather than once up front: the first hit of the tick sets the
            // latch, which shields the player from every later NPC in the same pass. The player
            // cannot take damage again until they touch a platform tile (resolved outside this
            // crate).
            for (_, npc_box) in (&npcs, &collision_boxes).join() {
                if latch.0 || !player_box.intersects(npc_box) {
                    continue;
                }

                jump.is_jumping = true;
                latch.0 = true;
                jump.velocity_y = KNOCKBACK_JUMP_VELOCITY;
                hp.0 = hp.0.saturating_sub(CONTACT_DAMAGE);

                // Push the player away from the NPC
                jump.knockback = if npc_box.0.x() >= player_box.0.x() {
                    Knockback::Left
                } else {
                    Knockback::Right
                };
            }
        }
    }
}
