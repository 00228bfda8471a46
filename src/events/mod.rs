//! Event types emitted by the engine systems.
//!
//! Events replace stored callbacks: instead of calling closures owned by a
//! timer or animation, systems trigger typed events carrying the entity and a
//! user-defined signal name, and observers react to them.
//!
//! Submodules:
//! - [`animation`] – a non-looping animation reached its last frame
//! - [`timer`] – a standalone timer component fired
pub mod animation;
pub mod timer;
