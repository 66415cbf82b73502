mod texture_manager;

pub use self::texture_manager::*;
