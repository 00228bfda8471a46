//! Screen-shake camera resource.
//!
//! The [`Camera`] does not pan or zoom. It holds a displacement that is
//! subtracted from every destination rectangle drawn through it, and that
//! displacement is only non-zero while a shake is running.
//!
//! # Shake
//!
//! [`Camera::shake`] arms a one-shot [`Timer`] for the shake duration. Until
//! it fires, every [`Camera::update`] picks a fresh random offset with each
//! axis uniform in `[-strength, strength]`. When the timer fires the shake
//! stops and the offset snaps back to `(0, 0)`.
//!
//! The random source is owned by the camera and can be seeded with
//! [`Camera::with_seed`] for reproducible shakes.

use bevy_ecs::prelude::Resource;
use fastrand::Rng;
use log::debug;

use crate::backend::{FRect, Flip, IRect, RenderBackend};
use crate::components::timer::Timer;
use crate::resources::texturestore::TextureHandle;
use crate::vector2::Vector2;

#[derive(Resource)]
pub struct Camera {
    offset: Vector2,
    shaking: bool,
    shake_strength: f32,
    timer: Timer,
    rng: Rng,
}

impl Default for Camera {
    fn default() -> Self {
        Self::new()
    }
}

impl Camera {
    /// Camera with an entropy-seeded random source.
    pub fn new() -> Self {
        Self::with_rng(Rng::new())
    }

    /// Camera whose shake offsets are reproducible for a given seed.
    pub fn with_seed(seed: u64) -> Self {
        Self::with_rng(Rng::with_seed(seed))
    }

    pub fn with_rng(rng: Rng) -> Self {
        Camera {
            offset: Vector2::ZERO,
            shaking: false,
            shake_strength: 0.0,
            timer: Timer::one_shot(0.0),
            rng,
        }
    }

    /// Current displacement applied to everything drawn through the camera.
    pub fn position(&self) -> Vector2 {
        self.offset
    }

    pub fn is_shaking(&self) -> bool {
        self.shaking
    }

    pub fn shake_strength(&self) -> f32 {
        self.shake_strength
    }

    pub fn reset(&mut self) {
        self.offset = Vector2::ZERO;
    }

    /// Start shaking with amplitude `strength` for `duration` seconds.
    ///
    /// Calling this while already shaking restarts the duration.
    pub fn shake(&mut self, strength: f32, duration: f32) {
        debug!("Camera shake: strength {} for {}s", strength, duration);
        self.shaking = true;
        self.shake_strength = strength;
        self.timer.set_wait_time(duration);
        self.timer.restart();
    }

    pub fn update(&mut self, delta: f32) {
        if self.timer.update(delta) {
            debug!("Camera shake finished");
            self.shaking = false;
            self.reset();
        }

        if self.shaking {
            self.offset = Vector2::new(self.random_axis(), self.random_axis());
        }
    }

    /// Uniform sample in `[-strength, strength]`.
    fn random_axis(&mut self) -> f32 {
        (self.rng.f32() * 2.0 - 1.0) * self.shake_strength
    }

    /// Draw a texture region with the camera offset applied to `dst`.
    pub fn render_texture(
        &self,
        backend: &mut impl RenderBackend,
        texture: TextureHandle,
        src: IRect,
        dst: FRect,
        angle: f64,
        pivot: Vector2,
    ) {
        let dst = dst.shifted_by(self.offset);
        backend.draw_texture(texture, src, dst, angle, pivot, Flip::None);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::TextureQuery;
    use crate::resources::texturestore::TextureStore;

    #[derive(Default)]
    struct Recorder {
        draws: Vec<(TextureHandle, IRect, FRect, f64, Vector2, Flip)>,
    }

    impl TextureQuery for Recorder {
        fn texture_size(&self, _handle: TextureHandle) -> Option<(i32, i32)> {
            None
        }
    }

    impl RenderBackend for Recorder {
        fn draw_texture(
            &mut self,
            handle: TextureHandle,
            src: IRect,
            dst: FRect,
            angle: f64,
            pivot: Vector2,
            flip: Flip,
        ) {
            self.draws.push((handle, src, dst, angle, pivot, flip));
        }
    }

    fn in_range(v: Vector2, strength: f32) -> bool {
        v.x.abs() <= strength && v.y.abs() <= strength
    }

    #[test]
    fn test_new_camera_is_still() {
        let camera = Camera::with_seed(1);
        assert!(!camera.is_shaking());
        assert_eq!(camera.position(), Vector2::ZERO);
    }

    #[test]
    fn test_shake_offsets_stay_in_range() {
        let mut camera = Camera::with_seed(42);
        camera.shake(5.0, 1.0);
        assert!(camera.is_shaking());
        assert!(in_range(camera.position(), 5.0));
        for _ in 0..50 {
            camera.update(0.01);
            assert!(camera.is_shaking());
            assert!(in_range(camera.position(), 5.0));
        }
    }

    #[test]
    fn test_shake_rerandomizes_each_update() {
        let mut camera = Camera::with_seed(7);
        camera.shake(10.0, 1.0);
        camera.update(0.01);
        let first = camera.position();
        let changed = (0..10).any(|_| {
            camera.update(0.01);
            camera.position() != first
        });
        assert!(changed);
    }

    #[test]
    fn test_shake_ends_and_resets_offset() {
        let mut camera = Camera::with_seed(3);
        camera.shake(4.0, 0.3);
        camera.update(0.1);
        camera.update(0.1);
        assert!(camera.is_shaking());
        camera.update(0.15);
        assert!(!camera.is_shaking());
        assert_eq!(camera.position(), Vector2::ZERO);

        // Stays still afterwards.
        camera.update(1.0);
        assert_eq!(camera.position(), Vector2::ZERO);
    }

    #[test]
    fn test_zero_duration_shake_stops_on_next_update() {
        let mut camera = Camera::with_seed(9);
        camera.shake(3.0, 0.0);
        assert!(camera.is_shaking());
        camera.update(0.016);
        assert!(!camera.is_shaking());
        assert_eq!(camera.position(), Vector2::ZERO);
    }

    #[test]
    fn test_shake_can_be_retriggered() {
        let mut camera = Camera::with_seed(11);
        camera.shake(2.0, 0.1);
        camera.update(0.2);
        assert!(!camera.is_shaking());
        camera.shake(2.0, 0.1);
        camera.update(0.05);
        assert!(camera.is_shaking());
    }

    #[test]
    fn test_same_seed_same_offsets() {
        let mut a = Camera::with_seed(1234);
        let mut b = Camera::with_seed(1234);
        a.shake(6.0, 1.0);
        b.shake(6.0, 1.0);
        for _ in 0..5 {
            a.update(0.016);
            b.update(0.016);
            assert_eq!(a.position(), b.position());
        }
    }

    #[test]
    fn test_render_texture_subtracts_offset() {
        let mut store: TextureStore<()> = TextureStore::new();
        let handle = store.insert(());
        let mut camera = Camera::with_seed(5);
        camera.shake(8.0, 1.0);
        camera.update(0.016);
        let offset = camera.position();

        let mut recorder = Recorder::default();
        let src = IRect::new(16, 0, 16, 16);
        let dst = FRect::new(100.0, 50.0, 16.0, 16.0);
        let pivot = Vector2::new(8.0, 8.0);
        camera.render_texture(&mut recorder, handle, src, dst, 45.0, pivot);

        assert_eq!(recorder.draws.len(), 1);
        let (h, s, d, angle, p, flip) = recorder.draws[0];
        assert_eq!(h, handle);
        assert_eq!(s, src);
        assert_eq!(d.x, 100.0 - offset.x);
        assert_eq!(d.y, 50.0 - offset.y);
        assert_eq!(d.width, 16.0);
        assert_eq!(d.height, 16.0);
        assert_eq!(angle, 45.0);
        assert_eq!(p, pivot);
        assert_eq!(flip, Flip::None);
    }
}
