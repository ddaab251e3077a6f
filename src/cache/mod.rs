// Cache module
mod texture_cache;

pub use texture_cache::{is_remote, TextureCache};
