mod window;
mod renderer;

pub use self::window::*;
pub use self::renderer::{setup, render};

#[derive(Debug, Clone)]
pub struct SDLError(pub String);
