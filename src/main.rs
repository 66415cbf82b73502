#![deny(unused_must_use)]

#[macro_use]
extern crate lazy_static;

mod assets;
mod components;
mod resources;
mod systems;
mod ui;

use std::{thread, time::Duration};

use component_group::ComponentGroup;
use rand::thread_rng;
use sdl2::{
    event::Event as SDLEvent,
    keyboard::{Keycode, Scancode},
    rect::{Point, Rect},
};
use specs::{DispatcherBuilder, World, WorldExt};

use crate::assets::TextureManager;
use crate::components::{
    CollisionBox, DamageLatch, HealthPoints, JumpState, NpcComponents, Player, PlayerComponents,
    Position, WanderState,
};
use crate::resources::{GameMode, TimeElapsed, WorldTone};
use crate::ui::{SDLError, Window};

fn main() -> Result<(), SDLError> {
    let fps = 30.0;

    let mut window = Window::init(1280, 720)?;
    let texture_creator = window.texture_creator();
    let mut event_pump = window.event_pump()?;

    let mut textures = TextureManager::new(&texture_creator);
    let townsfolk_sheet = textures.create_png_texture("assets/townsfolk.png")?;

    let mut world = World::new();
    world.insert(TimeElapsed(0.0));
    world.insert(GameMode::default());
    world.insert(WorldTone::default());

    let mut dispatcher = DispatcherBuilder::new()
        .with(systems::Wandering, "Wandering", &[])
        .with(systems::PlayerKnockback, "PlayerKnockback", &["Wandering"])
        .build();
    dispatcher.setup(&mut world);
    // The renderer is not part of the dispatcher, so we need to separately set up the component
    // storages for anything it uses.
    ui::setup(&mut world);

    // The townsfolk for this level
    let mut rng = thread_rng();
    NpcComponents::new(townsfolk_sheet, 300, 400, 40, 60, WanderState::FaceRight, 1, &mut rng)
        .create(&mut world);
    NpcComponents::new(townsfolk_sheet, 600, 400, 44, 52, WanderState::FaceLeft, 5, &mut rng)
        .create(&mut world);
    NpcComponents::new(townsfolk_sheet, 900, 400, 36, 64, WanderState::FaceRight, 9, &mut rng)
        .create(&mut world);

    // Add the character
    let player = PlayerComponents {
        player: Player,
        health_points: HealthPoints(20),
        position: Position(Point::new(100, 420)),
        collision_box: CollisionBox(Rect::new(100, 420, 32, 64)),
        jump_state: JumpState::default(),
        damage_latch: DamageLatch(false),
    };
    player.create(&mut world);

    let mut timer = window.timer()?;
    let mut last_ticks = timer.ticks(); // ms
    let mut running = true;
    while running {
        let ticks = timer.ticks();

        for event in event_pump.poll_iter() {
            match event {
                SDLEvent::Quit { .. }
                | SDLEvent::KeyDown {
                    keycode: Some(Keycode::Escape),
                    ..
                } => {
                    running = false;
                }
                SDLEvent::KeyDown {
                    scancode: Some(Scancode::P),
                    repeat: false,
                    ..
                } => {
                    let mode = *world.read_resource::<GameMode>();
                    world.insert(match mode {
                        GameMode::Playing => GameMode::Paused,
                        GameMode::Paused | GameMode::Menu => GameMode::Playing,
                    });
                }
                SDLEvent::KeyDown {
                    scancode: Some(Scancode::T),
                    repeat: false,
                    ..
                } => {
                    let tone = *world.read_resource::<WorldTone>();
                    world.insert(match tone {
                        WorldTone::Benign => WorldTone::Hostile,
                        WorldTone::Hostile => WorldTone::Benign,
                    });
                }
                _ => {}
            }
        }

        *world.write_resource::<TimeElapsed>() = TimeElapsed((ticks - last_ticks) as f64 / 1000.0);
        dispatcher.dispatch(&world);
        world.maintain();

        window.canvas_mut().clear();
        ui::render(&world, window.canvas_mut(), &mut textures)?;
        window.canvas_mut().present();

        last_ticks = ticks;

        // Keep roughly to the target frame rate
        let ms_per_frame = (1000.0 / fps) as u64;
        let ms_elapsed = (timer.ticks() - ticks) as u64;
        if ms_elapsed < ms_per_frame {
            thread::sleep(Duration::from_millis(ms_per_frame - ms_elapsed));
        }
    }

    Ok(())
}
