//! Rendering backend seam.
//!
//! The animation core never talks to a graphics API directly. It needs three
//! capabilities, each expressed as a trait:
//!
//! - [`TextureQuery`] – look up the pixel size of a texture handle
//! - [`RenderBackend`] – draw a region of a texture into a destination rect
//! - [`TextureLoader`] – turn an image file into a texture handle
//!
//! [`raylib`] provides the implementations used by the demo binary. Tests use
//! in-memory recorders instead.

pub mod raylib;

use serde::{Deserialize, Serialize};

use crate::resources::texturestore::TextureHandle;
use crate::vector2::Vector2;

/// Integer rectangle in source texture pixels.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct IRect {
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
}

impl IRect {
    pub const fn new(x: i32, y: i32, width: i32, height: i32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }
}

/// Floating point rectangle in screen coordinates.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct FRect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl FRect {
    pub const fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Same size, origin moved by `-offset`.
    pub fn shifted_by(self, offset: Vector2) -> Self {
        FRect {
            x: self.x - offset.x,
            y: self.y - offset.y,
            ..self
        }
    }
}

/// Mirroring applied when drawing.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Flip {
    #[default]
    None,
    Horizontal,
    Vertical,
    Both,
}

/// Read access to texture dimensions.
pub trait TextureQuery {
    /// Width and height in pixels, or `None` if the handle no longer resolves.
    fn texture_size(&self, handle: TextureHandle) -> Option<(i32, i32)>;
}

/// Immediate-mode texture drawing.
///
/// `dst` gives the top-left corner and size on screen. `pivot` is relative to
/// that corner and is the point `angle` (degrees, clockwise) rotates around.
pub trait RenderBackend: TextureQuery {
    fn draw_texture(
        &mut self,
        handle: TextureHandle,
        src: IRect,
        dst: FRect,
        angle: f64,
        pivot: Vector2,
        flip: Flip,
    );
}

/// Loads image files into texture handles.
pub trait TextureLoader {
    fn load_texture(&mut self, path: &str) -> Result<TextureHandle, String>;
}
