//! Animation completion events.
//!
//! A non-looping [`Animation`](crate::components::animation::Animation) with
//! an `on_finished` signal triggers an [`AnimationFinishedEvent`] once per
//! playthrough, when it lands on its last frame. Calling
//! [`Animation::reset`](crate::components::animation::Animation::reset) arms
//! it again.
//!
//! # Related
//!
//! - [`crate::systems::animation::animation_system`] – emits these events

use bevy_ecs::prelude::*;

/// Event emitted when a non-looping animation finishes.
#[derive(Event, Debug, Clone, PartialEq, Eq)]
pub struct AnimationFinishedEvent {
    /// The entity whose animation finished.
    pub entity: Entity,
    /// The `on_finished` signal of the animation.
    pub signal: String,
}
