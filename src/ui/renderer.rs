use sdl2::{
    pixels::Color,
    rect::Rect,
    render::{Canvas, RenderTarget},
};
use specs::shred::ResourceId;
use specs::{Join, ReadExpect, ReadStorage, SystemData, World};

use crate::assets::{TextureId, TextureManager};
use crate::components::{
    Position, SpriteSheet, Appearance, Wander, WalkCycle, FRAME_SIZE, SPRITE_SCALE,
};
use crate::resources::{GameMode, WorldTone};
use super::SDLError;

#[derive(SystemData)]
pub struct RenderData<'a> {
    game_mode: ReadExpect<'a, GameMode>,
    tone: ReadExpect<'a, WorldTone>,
    positions: ReadStorage<'a, Position>,
    sprite_sheets: ReadStorage<'a, SpriteSheet>,
    appearances: ReadStorage<'a, Appearance>,
    wanderers: ReadStorage<'a, Wander>,
    walk_cycles: ReadStorage<'a, WalkCycle>,
}

/// Everything needed to issue one copy of a character's current frame to the canvas
#[derive(Debug, Clone, PartialEq)]
pub struct DrawCall {
    pub sprite_sheet: TextureId,
    pub source_rect: Rect,
    pub dest_rect: Rect,
    pub flip_horizontal: bool,
    pub tint: Color,
}

pub fn setup(world: &mut World) {
    RenderData::setup(world);
}

/// Computes the draw call for every wandering character: one per character, from its spritesheet
/// row, flipped to face the way it is walking and tinted by the current world tone.
///
/// Returns nothing unless gameplay is in progress.
pub fn draw_calls(world: &World) -> Vec<DrawCall> {
    let RenderData {
        game_mode,
        tone,
        positions,
        sprite_sheets,
        appearances,
        wanderers,
        walk_cycles,
    } = world.system_data();

    if *game_mode != GameMode::Playing {
        return Vec::new();
    }

    let tint = tone.tint();

    (&positions, &sprite_sheets, &appearances, &wanderers, &walk_cycles).join()
        .map(|(Position(pos), &SpriteSheet(sprite_sheet), appearance, wander, cycle)| {
            // Walking states animate through the walk cycle; facing states use the standing pose
            let source_rect = if wander.state.is_walking() {
                appearance.walking_region(cycle.frame)
            } else {
                appearance.standing_region()
            };

            let size = FRAME_SIZE * SPRITE_SCALE;

            DrawCall {
                sprite_sheet,
                source_rect,
                dest_rect: Rect::new(pos.x(), pos.y(), size, size),
                flip_horizontal: wander.state.faces_left(),
                tint,
            }
        })
        .collect()
}

/// Issues the current draw calls to the given canvas
pub fn render<T: RenderTarget, U>(
    world: &World,
    canvas: &mut Canvas<T>,
    textures: &mut TextureManager<U>,
) -> Result<(), SDLError> {
    for call in draw_calls(world) {
        let texture = textures.get_mut(call.sprite_sheet);
        texture.set_color_mod(call.tint.r, call.tint.g, call.tint.b);

        canvas.copy_ex(
            texture,
            call.source_rect,
            call.dest_rect,
            0.0,
            None,
            call.flip_horizontal,
            false,
        ).map_err(SDLError)?;
    }

    Ok(())
}
