// Poster texture cache with LRU eviction
use std::num::NonZeroUsize;
use std::path::Path;

use egui::{ColorImage, Context, TextureHandle};
use lru::LruCache;

/// Cached poster lookup result. Failed loads are remembered so a broken
/// poster is not re-read every frame.
enum Slot {
    Loaded(TextureHandle),
    Missing,
}

/// Texture cache for entry posters, keyed by entry id
pub struct TextureCache {
    cache: LruCache<String, Slot>,
}

impl TextureCache {
    /// Create a new texture cache with the given maximum size
    pub fn new(max_size: usize) -> Self {
        let capacity = NonZeroUsize::new(max_size).unwrap_or(NonZeroUsize::MIN);
        Self {
            cache: LruCache::new(capacity),
        }
    }

    /// Poster texture for an entry, loading it on first use.
    /// Returns `None` when the poster cannot be read, so callers draw a placeholder.
    pub fn poster(&mut self, ctx: &Context, id: &str, url: &str) -> Option<&TextureHandle> {
        if !self.cache.contains(id) {
            let slot = match load_poster(ctx, id, url) {
                Ok(handle) => Slot::Loaded(handle),
                Err(e) => {
                    tracing::warn!("Poster {} for {} unavailable: {}", url, id, e);
                    Slot::Missing
                }
            };
            self.cache.put(id.to_string(), slot);
        }
        match self.cache.get(id) {
            Some(Slot::Loaded(handle)) => Some(handle),
            _ => None,
        }
    }

    pub fn clear(&mut self) {
        self.cache.clear();
    }
}

/// Posters served over http(s) go through egui's URI loaders instead of this cache
pub fn is_remote(url: &str) -> bool {
    url.starts_with("http://") || url.starts_with("https://")
}

fn load_poster(ctx: &Context, id: &str, url: &str) -> image::ImageResult<TextureHandle> {
    let path = url.strip_prefix("file://").unwrap_or(url);
    let img = image::open(Path::new(path))?.to_rgba8();
    let (w, h) = img.dimensions();
    let color_image = ColorImage::from_rgba_unmultiplied([w as usize, h as usize], &img);
    Ok(ctx.load_texture(format!("poster-{id}"), color_image, egui::TextureOptions::LINEAR))
}
