mod wander;
mod knockback;

pub use self::wander::*;
pub use self::knockback::*;
