//! Animation clip registry.
//!
//! This module provides a store for animation definitions that can be reused
//! by multiple entities. A clip names an [`Atlas`](crate::resources::atlas::Atlas)
//! in the [`AtlasStore`] and says how to cut it into frames and how to play
//! them. [`AnimationStore::instantiate`] turns a clip into a ready-to-spawn
//! [`Animation`] component.
//!
//! # JSON format
//!
//! ```json
//! {
//!   "explosion": { "atlas": "boom", "interval": 0.05, "looped": false, "on_finished": "boom_done" },
//!   "runner":    { "atlas": "runner_sheet", "slices": 6, "interval": 0.1 }
//! }
//! ```

use bevy_ecs::prelude::Resource;
use log::{info, warn};
use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

use crate::backend::TextureQuery;
use crate::components::animation::Animation;
use crate::resources::atlas::AtlasStore;

/// Central registry of reusable animation clips keyed by string IDs.
#[derive(Resource, Debug, Default)]
pub struct AnimationStore {
    pub clips: FxHashMap<String, AnimationClip>,
}

/// Immutable description of how to build an [`Animation`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnimationClip {
    /// Key in the [`AtlasStore`].
    pub atlas: String,
    /// Cut the atlas' first texture into this many horizontal slices.
    /// When absent, every atlas texture is one frame.
    #[serde(default)]
    pub slices: Option<u32>,
    /// Seconds per frame.
    pub interval: f32,
    /// Whether the animation restarts after the last frame.
    #[serde(default = "default_looped")]
    pub looped: bool,
    /// Signal sent when a non-looping clip finishes.
    #[serde(default)]
    pub on_finished: Option<String>,
}

fn default_looped() -> bool {
    true
}

impl AnimationStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse clips from a JSON object and merge them into the store.
    ///
    /// Returns the number of clips read. Existing keys are replaced.
    pub fn load_from_json(&mut self, json: &str) -> Result<usize, String> {
        let clips: FxHashMap<String, AnimationClip> = serde_json::from_str(json)
            .map_err(|e| format!("Failed to parse animation clips: {}", e))?;
        let count = clips.len();
        self.clips.extend(clips);
        Ok(count)
    }

    /// Read a JSON clip file from disk, see [`AnimationStore::load_from_json`].
    pub fn load_from_file(&mut self, path: &str) -> Result<usize, String> {
        let json = std::fs::read_to_string(path)
            .map_err(|e| format!("Failed to read clip file {}: {}", path, e))?;
        let count = self.load_from_json(&json)?;
        info!("Loaded {} animation clips from {}", count, path);
        Ok(count)
    }

    pub fn insert(&mut self, id: impl Into<String>, clip: AnimationClip) {
        self.clips.insert(id.into(), clip);
    }

    pub fn get(&self, id: impl AsRef<str>) -> Option<&AnimationClip> {
        self.clips.get(id.as_ref())
    }

    /// Build a configured [`Animation`] from the clip `id`.
    ///
    /// Returns `None` (with a warning) when the clip or its atlas is unknown,
    /// or when no frame could be built.
    pub fn instantiate(
        &self,
        id: &str,
        atlases: &AtlasStore,
        textures: &impl TextureQuery,
    ) -> Option<Animation> {
        let Some(clip) = self.clips.get(id) else {
            warn!("Animation clip '{}' not found", id);
            return None;
        };
        let Some(atlas) = atlases.get(&clip.atlas) else {
            warn!("Atlas '{}' for clip '{}' not found", clip.atlas, id);
            return None;
        };

        let mut animation = Animation::new()
            .with_interval(clip.interval)
            .with_loop(clip.looped);
        animation.set_on_finished(clip.on_finished.clone());

        let added = match clip.slices {
            Some(slices) => match atlas.texture(0) {
                Some(texture) => animation.add_strip(textures, texture, slices),
                None => 0,
            },
            None => animation.add_atlas(textures, atlas),
        };
        if added == 0 {
            warn!("Animation clip '{}' produced no frames", id);
            return None;
        }
        Some(animation)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::resources::atlas::Atlas;
    use crate::resources::texturestore::{TextureSize, TextureStore};

    struct Tex(i32, i32);

    impl TextureSize for Tex {
        fn size(&self) -> (i32, i32) {
            (self.0, self.1)
        }
    }

    const CLIPS: &str = r#"{
        "explosion": { "atlas": "boom", "interval": 0.05, "looped": false, "on_finished": "boom_done" },
        "runner": { "atlas": "sheet", "slices": 4, "interval": 0.1 }
    }"#;

    fn fixtures() -> (TextureStore<Tex>, AtlasStore) {
        let mut textures = TextureStore::new();
        let mut atlases = AtlasStore::new();

        let mut boom = Atlas::new();
        for _ in 0..3 {
            boom.add_texture(textures.insert(Tex(32, 32)));
        }
        atlases.insert("boom", boom);

        let mut sheet = Atlas::new();
        sheet.add_texture(textures.insert(Tex(128, 24)));
        atlases.insert("sheet", sheet);

        (textures, atlases)
    }

    #[test]
    fn test_load_from_json_applies_defaults() {
        let mut store = AnimationStore::new();
        assert_eq!(store.load_from_json(CLIPS).unwrap(), 2);

        let runner = store.get("runner").unwrap();
        assert!(runner.looped);
        assert_eq!(runner.slices, Some(4));
        assert!(runner.on_finished.is_none());

        let explosion = store.get("explosion").unwrap();
        assert!(!explosion.looped);
        assert_eq!(explosion.on_finished.as_deref(), Some("boom_done"));
    }

    #[test]
    fn test_load_from_json_rejects_garbage() {
        let mut store = AnimationStore::new();
        let err = store.load_from_json("[1, 2, 3]").unwrap_err();
        assert!(err.starts_with("Failed to parse animation clips"));
        assert!(store.clips.is_empty());
    }

    #[test]
    fn test_instantiate_atlas_clip() {
        let (textures, atlases) = fixtures();
        let mut store = AnimationStore::new();
        store.load_from_json(CLIPS).unwrap();

        let anim = store.instantiate("explosion", &atlases, &textures).unwrap();
        assert_eq!(anim.frames().len(), 3);
        assert!(!anim.is_looping());
        assert_eq!(anim.interval(), 0.05);
        assert_eq!(anim.on_finished(), Some("boom_done"));
    }

    #[test]
    fn test_instantiate_strip_clip() {
        let (textures, atlases) = fixtures();
        let mut store = AnimationStore::new();
        store.load_from_json(CLIPS).unwrap();

        let anim = store.instantiate("runner", &atlases, &textures).unwrap();
        assert_eq!(anim.frames().len(), 4);
        assert_eq!(anim.frames()[3].source.x, 96);
        assert!(anim.is_looping());
    }

    #[test]
    fn test_instantiate_unknown_clip_or_atlas() {
        let (textures, atlases) = fixtures();
        let mut store = AnimationStore::new();
        assert!(store.instantiate("nope", &atlases, &textures).is_none());

        store.insert(
            "orphan",
            AnimationClip {
                atlas: "missing".to_string(),
                slices: None,
                interval: 0.1,
                looped: true,
                on_finished: None,
            },
        );
        assert!(store.instantiate("orphan", &atlases, &textures).is_none());
    }
}
