mod physics;
mod character;
mod graphics;

pub use self::physics::*;
pub use self::character::*;
pub use self::graphics::*;
