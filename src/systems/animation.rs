//! Animation playback system.
//!
//! [`animation_system`] advances every [`Animation`] component by the frame
//! delta. When a non-looping animation lands on its last frame and has an
//! `on_finished` signal, an [`AnimationFinishedEvent`] is triggered.
//!
//! # Related
//!
//! - [`crate::components::animation::Animation`] – per-entity frame state
//! - [`crate::events::animation::AnimationFinishedEvent`] – completion event
//! - [`crate::systems::render::render_animations`] – draws the current frames

use bevy_ecs::prelude::*;

use crate::components::animation::{Animation, AnimationEvent};
use crate::events::animation::AnimationFinishedEvent;
use crate::resources::worldtime::WorldTime;

/// Advance animation playback.
///
/// Contract
/// - Reads [`WorldTime`] for the scaled delta.
/// - Mutates [`Animation`] frame index and timer.
/// - Triggers [`AnimationFinishedEvent`] at most once per playthrough.
pub fn animation_system(
    mut query: Query<(Entity, &mut Animation)>,
    time: Res<WorldTime>,
    mut commands: Commands,
) {
    for (entity, mut animation) in query.iter_mut() {
        if animation.update(time.delta) != Some(AnimationEvent::Finished) {
            continue;
        }
        if let Some(signal) = animation.on_finished() {
            commands.trigger(AnimationFinishedEvent {
                entity,
                signal: signal.to_string(),
            });
        }
    }
}
