use sdl2::{
    self,
    Sdl,
    TimerSubsystem,
    EventPump,
    image::{Sdl2ImageContext, InitFlag},
    pixels::Color,
    render::{TextureCreator, Canvas},
    video::{Window as SDLWindow, WindowContext},
};

use super::SDLError;

pub struct Window {
    sdl_context: Sdl,
    /// Required to use images, but not used for anything after it is created
    _image_context: Sdl2ImageContext,
    canvas: Canvas<SDLWindow>,
}

impl Window {
    pub fn init(width: u32, height: u32) -> Result<Self, SDLError> {
        let sdl_context = sdl2::init().map_err(SDLError)?;
        let video_subsystem = sdl_context.video().map_err(SDLError)?;
        let _image_context = sdl2::image::init(InitFlag::PNG).map_err(|e| SDLError(e.to_string()))?;

        //FIXME: Remove this unwrap() when we start using proper error types
        let window = video_subsystem.window("Townsfolk", width, height)
            .position_centered()
            .build()
            .unwrap();

        //FIXME: Remove this unwrap() when we start using proper error types
        let mut canvas = window.into_canvas()
            .accelerated()
            .present_vsync()
            .build()
            .unwrap();

        // The background color
        canvas.set_draw_color(Color::RGBA(32, 28, 48, 255));

        Ok(Self {
            sdl_context,
            _image_context,
            canvas,
        })
    }

    pub fn texture_creator(&self) -> TextureCreator<WindowContext> {
        self.canvas.texture_creator()
    }

    pub fn timer(&self) -> Result<TimerSubsystem, SDLError> {
        self.sdl_context.timer().map_err(SDLError)
    }

    pub fn event_pump(&self) -> Result<EventPump, SDLError> {
        self.sdl_context.event_pump().map_err(SDLError)
    }

    pub fn canvas_mut(&mut self) -> &mut Canvas<SDLWindow> {
        &mut self.canvas
    }
}
