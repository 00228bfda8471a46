//! Animation rendering.
//!
//! [`render_animations`] draws the current frame of every
//! [`Animation`](crate::components::animation::Animation) through the
//! [`Camera`](crate::resources::camera::Camera) resource and a
//! [`RenderBackend`](crate::backend::RenderBackend).

use bevy_ecs::prelude::*;
use log::warn;

use crate::backend::RenderBackend;
use crate::components::animation::Animation;
use crate::components::zindex::ZIndex;
use crate::resources::camera::Camera;

/// Draw the current frame of every animation through the camera.
///
/// Runs outside the schedule because the backend usually borrows a draw
/// handle for the duration of the frame. Animations are drawn in `ZIndex`
/// order (painter's algorithm); ties keep query order.
pub fn render_animations(world: &mut World, backend: &mut impl RenderBackend) {
    let mut query = world.query::<(&Animation, Option<&ZIndex>)>();
    let mut to_draw: Vec<(&Animation, ZIndex)> = query
        .iter(world)
        .map(|(animation, z)| (animation, z.copied().unwrap_or_default()))
        .collect();

    to_draw.sort_by_key(|(_, z)| *z);

    let Some(camera) = world.get_resource::<Camera>() else {
        warn!("No Camera resource, skipping animation render");
        return;
    };

    for (animation, _z) in to_draw {
        animation.render(camera, backend);
    }
}
