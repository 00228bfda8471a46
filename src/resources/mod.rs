//! ECS resources and asset stores.
//!
//! Overview
//! - `animationstore` – JSON-defined animation clips reused across entities
//! - `atlas` – ordered texture handle lists and the named atlas registry
//! - `camera` – shared camera holding the screen-shake offset
//! - `gameconfig` – INI-backed settings for the demo binary
//! - `texturestore` – generation-checked arena owning loaded textures
//! - `worldtime` – simulation time and delta
pub mod animationstore;
pub mod atlas;
pub mod camera;
pub mod gameconfig;
pub mod texturestore;
pub mod worldtime;
