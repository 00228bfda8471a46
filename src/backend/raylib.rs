//! raylib implementations of the backend traits.
//!
//! - [`RaylibBackend`] draws through any raylib draw handle (plain drawing,
//!   2D mode, texture mode) using textures from a `TextureStore<Texture2D>`.
//! - [`RaylibLoader`] loads image files into that store.
//!
//! Must be used from the main thread, like everything else touching raylib.

use log::warn;
use raylib::prelude::{
    Color, RaylibDraw, RaylibHandle, RaylibThread, Rectangle, Texture2D, Vector2 as RlVector2,
};

use crate::backend::{FRect, Flip, IRect, RenderBackend, TextureLoader, TextureQuery};
use crate::resources::texturestore::{TextureHandle, TextureSize, TextureStore};
use crate::vector2::Vector2;

impl TextureSize for Texture2D {
    fn size(&self) -> (i32, i32) {
        (self.width, self.height)
    }
}

impl From<Vector2> for RlVector2 {
    fn from(v: Vector2) -> Self {
        RlVector2 { x: v.x, y: v.y }
    }
}

impl From<RlVector2> for Vector2 {
    fn from(v: RlVector2) -> Self {
        Vector2::new(v.x, v.y)
    }
}

/// Source rectangle with raylib's negative-extent flipping applied.
fn source_rectangle(src: IRect, flip: Flip) -> Rectangle {
    let mut rect = Rectangle {
        x: src.x as f32,
        y: src.y as f32,
        width: src.width as f32,
        height: src.height as f32,
    };
    if matches!(flip, Flip::Horizontal | Flip::Both) {
        rect.width = -rect.width;
    }
    if matches!(flip, Flip::Vertical | Flip::Both) {
        rect.height = -rect.height;
    }
    rect
}

/// Destination rectangle and origin for `draw_texture_pro`.
///
/// raylib places `origin` at `(dest.x, dest.y)`, while our `dst` is the
/// top-left corner with the pivot relative to it, so the corner is moved by
/// the pivot.
fn destination_and_origin(dst: FRect, pivot: Vector2) -> (Rectangle, RlVector2) {
    let dest = Rectangle {
        x: dst.x + pivot.x,
        y: dst.y + pivot.y,
        width: dst.width,
        height: dst.height,
    };
    (dest, pivot.into())
}

/// Draws store textures through a borrowed raylib draw handle.
pub struct RaylibBackend<'a, D: RaylibDraw> {
    draw: &'a mut D,
    textures: &'a TextureStore<Texture2D>,
}

impl<'a, D: RaylibDraw> RaylibBackend<'a, D> {
    pub fn new(draw: &'a mut D, textures: &'a TextureStore<Texture2D>) -> Self {
        Self { draw, textures }
    }
}

impl<D: RaylibDraw> TextureQuery for RaylibBackend<'_, D> {
    fn texture_size(&self, handle: TextureHandle) -> Option<(i32, i32)> {
        self.textures.texture_size(handle)
    }
}

impl<D: RaylibDraw> RenderBackend for RaylibBackend<'_, D> {
    fn draw_texture(
        &mut self,
        handle: TextureHandle,
        src: IRect,
        dst: FRect,
        angle: f64,
        pivot: Vector2,
        flip: Flip,
    ) {
        let Some(texture) = self.textures.get(handle) else {
            warn!("Texture {:?} no longer loaded, draw skipped", handle);
            return;
        };
        let source = source_rectangle(src, flip);
        let (dest, origin) = destination_and_origin(dst, pivot);
        self.draw
            .draw_texture_pro(texture, source, dest, origin, angle as f32, Color::WHITE);
    }
}

/// Loads textures from disk into a `TextureStore<Texture2D>`.
pub struct RaylibLoader<'a> {
    rl: &'a mut RaylibHandle,
    thread: &'a RaylibThread,
    store: &'a mut TextureStore<Texture2D>,
}

impl<'a> RaylibLoader<'a> {
    pub fn new(
        rl: &'a mut RaylibHandle,
        thread: &'a RaylibThread,
        store: &'a mut TextureStore<Texture2D>,
    ) -> Self {
        Self { rl, thread, store }
    }
}

impl TextureLoader for RaylibLoader<'_> {
    fn load_texture(&mut self, path: &str) -> Result<TextureHandle, String> {
        let texture = self
            .rl
            .load_texture(self.thread, path)
            .map_err(|e| format!("Failed to load texture {}: {}", path, e))?;
        Ok(self.store.insert(texture))
    }
}
