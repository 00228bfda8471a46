//! Engine systems.
//!
//! Submodules overview
//! - [`animation`] – advance animation frames and emit completion events
//! - [`camera`] – advance the camera shake
//! - [`render`] – draw animations through the camera and a backend
//! - [`time`] – update simulation time and delta, process timers

pub mod animation;
pub mod camera;
pub mod render;
pub mod time;
