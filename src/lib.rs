//! Kinescope library.
//!
//! Time-driven presentation pieces for 2D games: interval timers, frame
//! animations and a shaking camera, with bevy_ecs components, resources,
//! systems and events to drive them, plus a raylib rendering backend.

pub mod backend;
pub mod components;
pub mod events;
pub mod resources;
pub mod systems;
pub mod vector2;
