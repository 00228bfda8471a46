//! Interval timer with one-shot and repeating modes.
//!
//! The [`Timer`] accumulates elapsed time and reports when its wait interval
//! has been crossed. It is used in two ways:
//!
//! - embedded in [`Animation`](crate::components::animation::Animation) and
//!   [`Camera`](crate::resources::camera::Camera), which react to the return
//!   value of [`Timer::update`];
//! - as a standalone ECS component, where
//!   [`update_timers`](crate::systems::time::update_timers) turns every firing
//!   into a [`TimerEvent`](crate::events::timer::TimerEvent) carrying the
//!   configured signal.
//!
//! # Semantics
//!
//! - Only one trigger check runs per [`Timer::update`] call, even if `delta`
//!   spans several intervals.
//! - On a trigger the interval is subtracted from `elapsed`, so the remainder
//!   carries over to the next interval.
//! - A wait time of zero (or below) triggers on every update.
//! - A one-shot timer fires once until [`Timer::restart`] is called.

use bevy_ecs::prelude::Component;

#[derive(Component, Debug, Clone, Default)]
pub struct Timer {
    elapsed: f32,
    wait: f32,
    paused: bool,
    fired_once: bool,
    one_shot: bool,
    signal: Option<String>,
}

impl Timer {
    /// Create a repeating timer with a zero wait time.
    pub fn new() -> Self {
        Self::default()
    }

    /// Repeating timer that fires every `wait` seconds.
    pub fn repeating(wait: f32) -> Self {
        Timer {
            wait,
            ..Self::default()
        }
    }

    /// Timer that fires once after `wait` seconds, until restarted.
    pub fn one_shot(wait: f32) -> Self {
        Timer {
            wait,
            one_shot: true,
            ..Self::default()
        }
    }

    /// Attach the signal sent with [`TimerEvent`](crate::events::timer::TimerEvent).
    pub fn with_signal(mut self, signal: impl Into<String>) -> Self {
        self.signal = Some(signal.into());
        self
    }

    /// Zero the accumulated time and re-arm a one-shot timer.
    ///
    /// The pause state is left untouched.
    pub fn restart(&mut self) {
        self.elapsed = 0.0;
        self.fired_once = false;
    }

    pub fn set_wait_time(&mut self, seconds: f32) {
        self.wait = seconds;
    }

    pub fn set_one_shot(&mut self, one_shot: bool) {
        self.one_shot = one_shot;
    }

    /// Replace the signal emitted on timeout. `None` keeps the timer silent.
    pub fn set_on_timeout(&mut self, signal: Option<String>) {
        self.signal = signal;
    }

    pub fn pause(&mut self) {
        self.paused = true;
    }

    pub fn resume(&mut self) {
        self.paused = false;
    }

    /// Advance the timer by `delta` seconds.
    ///
    /// Returns `true` when this call crossed the interval and the timer is
    /// allowed to fire (always for repeating timers, only the first time for
    /// one-shot timers).
    pub fn update(&mut self, delta: f32) -> bool {
        if self.paused {
            return false;
        }

        self.elapsed += delta;
        if self.elapsed < self.wait {
            return false;
        }

        let can_fire = !self.one_shot || !self.fired_once;
        self.fired_once = true;
        self.elapsed -= self.wait;
        can_fire
    }

    pub fn elapsed(&self) -> f32 {
        self.elapsed
    }

    pub fn wait_time(&self) -> f32 {
        self.wait
    }

    pub fn is_paused(&self) -> bool {
        self.paused
    }

    pub fn is_one_shot(&self) -> bool {
        self.one_shot
    }

    /// Whether the interval has been crossed since the last restart.
    pub fn has_fired(&self) -> bool {
        self.fired_once
    }

    pub fn signal(&self) -> Option<&str> {
        self.signal.as_deref()
    }
}
