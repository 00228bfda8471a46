//! Texture ownership table.
//!
//! The [`TextureStore`] owns every loaded texture and hands out
//! [`TextureHandle`]s. Handles are generation-checked slotmap keys: once a
//! texture is removed, stale copies held by atlases or animation frames
//! resolve to `None` instead of pointing at a destroyed GPU resource.
//!
//! The store is generic over the texture type so the core can be exercised
//! without a GPU. With raylib it is `TextureStore<Texture2D>`; keep it on the
//! main thread (it is not inserted into the ECS world).

use slotmap::{SlotMap, new_key_type};

use crate::backend::TextureQuery;

new_key_type! {
    /// Non-owning reference to a texture in a [`TextureStore`].
    pub struct TextureHandle;
}

/// Anything that knows its own pixel size.
pub trait TextureSize {
    fn size(&self) -> (i32, i32);
}

/// Arena of loaded textures addressed by [`TextureHandle`].
pub struct TextureStore<T> {
    textures: SlotMap<TextureHandle, T>,
}

impl<T> Default for TextureStore<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> TextureStore<T> {
    /// Create an empty texture store.
    pub fn new() -> Self {
        Self {
            textures: SlotMap::with_key(),
        }
    }

    /// Take ownership of a texture and return its handle.
    pub fn insert(&mut self, texture: T) -> TextureHandle {
        self.textures.insert(texture)
    }

    pub fn get(&self, handle: TextureHandle) -> Option<&T> {
        self.textures.get(handle)
    }

    /// Destroy a texture. Every copy of `handle` becomes stale.
    pub fn remove(&mut self, handle: TextureHandle) -> Option<T> {
        self.textures.remove(handle)
    }

    pub fn contains(&self, handle: TextureHandle) -> bool {
        self.textures.contains_key(handle)
    }

    /// Remove all loaded textures.
    pub fn clear(&mut self) {
        self.textures.clear();
    }

    pub fn len(&self) -> usize {
        self.textures.len()
    }

    pub fn is_empty(&self) -> bool {
        self.textures.is_empty()
    }
}

impl<T: TextureSize> TextureQuery for TextureStore<T> {
    fn texture_size(&self, handle: TextureHandle) -> Option<(i32, i32)> {
        self.get(handle).map(TextureSize::size)
    }
}
