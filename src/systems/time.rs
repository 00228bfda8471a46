//! Time update systems.
//!
//! - [`update_world_time`] updates the shared
//!   [`WorldTime`](crate::resources::worldtime::WorldTime) resource once per
//!   frame, applying `time_scale` to the provided delta.
//! - [`update_timers`] advances standalone [`Timer`] components and triggers
//!   [`TimerEvent`]s for the ones that fire.
use bevy_ecs::prelude::*;

use crate::components::timer::Timer;
use crate::events::timer::TimerEvent;
use crate::resources::worldtime::WorldTime;

/// Update elapsed and delta seconds on the `WorldTime` resource.
///
/// `dt` is expected to be the unscaled frame delta in seconds. The system
/// applies the current `time_scale` and writes both `elapsed` and `delta`.
pub fn update_world_time(world: &mut World, dt: f32) {
    let mut wt = world.resource_mut::<WorldTime>();
    let scaled_dt = dt * wt.time_scale;
    wt.elapsed += scaled_dt;
    wt.delta = scaled_dt;
}

/// Advance every [`Timer`] component by the frame delta.
///
/// Timers that fire and carry a signal trigger a [`TimerEvent`]. Timers
/// without a signal still advance (and re-arm/expire) silently.
pub fn update_timers(
    world_time: Res<WorldTime>,
    mut query: Query<(Entity, &mut Timer)>,
    mut commands: Commands,
) {
    for (entity, mut timer) in query.iter_mut() {
        if !timer.update(world_time.delta) {
            continue;
        }
        if let Some(signal) = timer.signal() {
            commands.trigger(TimerEvent {
                entity,
                signal: signal.to_string(),
            });
        }
    }
}
