//! Texture atlases: ordered lists of texture handles.
//!
//! An [`Atlas`] groups the textures of one animation, typically loaded from a
//! numbered file sequence (`run_1.png`, `run_2.png`, ...). The atlas owns its
//! textures in the sense that [`Atlas::release`] destroys them in the
//! [`TextureStore`]; animations built from it only keep handle copies.
//!
//! [`AtlasStore`] is the ECS resource that keeps atlases by name so
//! [`AnimationStore`](crate::resources::animationstore::AnimationStore) clips
//! can refer to them.

use bevy_ecs::prelude::Resource;
use log::{info, warn};
use rustc_hash::FxHashMap;

use crate::backend::TextureLoader;
use crate::resources::texturestore::{TextureHandle, TextureStore};

/// Ordered collection of texture handles.
#[derive(Debug, Clone, Default)]
pub struct Atlas {
    textures: Vec<TextureHandle>,
}

impl Atlas {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.textures.len()
    }

    pub fn is_empty(&self) -> bool {
        self.textures.is_empty()
    }

    /// Handle at `index`, or `None` (with a warning) when out of range.
    pub fn texture(&self, index: usize) -> Option<TextureHandle> {
        let handle = self.textures.get(index).copied();
        if handle.is_none() {
            warn!(
                "Atlas texture index out of range: index {}, size {}",
                index,
                self.textures.len()
            );
        }
        handle
    }

    pub fn textures(&self) -> &[TextureHandle] {
        &self.textures
    }

    pub fn add_texture(&mut self, handle: TextureHandle) {
        self.textures.push(handle);
    }

    /// Load `count` files numbered from 1 and append them in order.
    ///
    /// `template` must contain one `%d` or `{}` placeholder for the number.
    /// Stops at the first file that fails; files loaded before it stay in the
    /// atlas. Returns how many textures were added.
    pub fn load(
        &mut self,
        loader: &mut impl TextureLoader,
        template: &str,
        count: usize,
    ) -> Result<usize, String> {
        for number in 1..=count {
            let path = expand_template(template, number)?;
            let handle = loader
                .load_texture(&path)
                .map_err(|e| format!("Failed to load atlas frame {}: {}", path, e))?;
            self.textures.push(handle);
        }
        info!("Loaded {} atlas textures from '{}'", count, template);
        Ok(count)
    }

    /// Forget all handles without destroying the textures.
    pub fn clear(&mut self) {
        self.textures.clear();
    }

    /// Destroy every texture of this atlas and clear it.
    ///
    /// Frames still holding these handles will skip drawing from now on.
    pub fn release<T>(&mut self, store: &mut TextureStore<T>) {
        for handle in self.textures.drain(..) {
            store.remove(handle);
        }
    }
}

/// Substitute `number` for the first `%d` or `{}` in `template`.
pub fn expand_template(template: &str, number: usize) -> Result<String, String> {
    for placeholder in ["%d", "{}"] {
        if let Some(pos) = template.find(placeholder) {
            let mut path = String::with_capacity(template.len() + 4);
            path.push_str(&template[..pos]);
            path.push_str(&number.to_string());
            path.push_str(&template[pos + placeholder.len()..]);
            return Ok(path);
        }
    }
    Err(format!("Path template '{}' has no number placeholder", template))
}

/// Named atlases available to animation clips.
#[derive(Resource, Debug, Default)]
pub struct AtlasStore {
    atlases: FxHashMap<String, Atlas>,
}

impl AtlasStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, id: impl Into<String>, atlas: Atlas) {
        self.atlases.insert(id.into(), atlas);
    }

    pub fn get(&self, id: impl AsRef<str>) -> Option<&Atlas> {
        self.atlases.get(id.as_ref())
    }

    pub fn remove(&mut self, id: impl AsRef<str>) -> Option<Atlas> {
        self.atlases.remove(id.as_ref())
    }

    pub fn len(&self) -> usize {
        self.atlases.len()
    }

    pub fn is_empty(&self) -> bool {
        self.atlases.is_empty()
    }
}
