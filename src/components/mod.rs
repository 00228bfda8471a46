//! ECS components for entities.
//!
//! Submodules overview:
//! - [`animation`] – frame list, playback state and rendering of a sprite animation
//! - [`timer`] – interval timer, one-shot or repeating, that can emit signals
//! - [`zindex`] – rendering order hint for 2D drawing

pub mod animation;
pub mod timer;
pub mod zindex;
