//! Camera shake system.
//!
//! Drives the [`Camera`](crate::resources::camera::Camera) resource with the
//! frame delta so shakes re-randomize every frame and expire on time.

use bevy_ecs::prelude::*;

use crate::resources::camera::Camera;
use crate::resources::worldtime::WorldTime;

pub fn camera_system(mut camera: ResMut<Camera>, time: Res<WorldTime>) {
    camera.update(time.delta);
}
