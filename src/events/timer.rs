//! Timer expiration events.
//!
//! When a [`Timer`](crate::components::timer::Timer) component with a signal
//! fires, a [`TimerEvent`] is triggered. Observers can subscribe to this event
//! to react to the signal name.
//!
//! # Example
//!
//! ```ignore
//! world.add_observer(|trigger: On<TimerEvent>, mut camera: ResMut<Camera>| {
//!     if trigger.event().signal == "quake" {
//!         camera.shake(6.0, 0.4);
//!     }
//! });
//! ```
//!
//! # Related
//!
//! - [`crate::components::timer::Timer`] – the timer component
//! - [`crate::systems::time::update_timers`] – the system that emits these events

use bevy_ecs::prelude::*;

/// Event emitted when a timer fires.
///
/// Silent timers (no signal configured) never emit it.
#[derive(Event, Debug, Clone, PartialEq, Eq)]
pub struct TimerEvent {
    /// The entity whose timer fired.
    pub entity: Entity,
    /// The signal name configured on the timer.
    pub signal: String,
}
