//! Frame animation component.
//!
//! An [`Animation`] owns an ordered list of [`Frame`]s and a repeating
//! [`Timer`]. Every time the timer fires the frame index advances by one:
//!
//! - looping animations wrap back to frame 0;
//! - non-looping animations clamp on the last frame and report
//!   [`AnimationEvent::Finished`] once, on the trigger that first lands on it.
//!
//! Frames come either from one texture cut into equal horizontal slices
//! ([`Animation::add_strip`]) or from every texture of an
//! [`Atlas`] ([`Animation::add_atlas`]). Frames reference textures by
//! [`TextureHandle`] only; the [`TextureStore`](crate::resources::texturestore::TextureStore)
//! keeps ownership.
//!
//! Rendering always uses the native pixel size of the current frame, centred
//! on [`Animation::position`], and goes through the [`Camera`] so shake
//! offsets apply.

use bevy_ecs::prelude::Component;
use log::{debug, warn};

use crate::backend::{FRect, IRect, RenderBackend, TextureQuery};
use crate::components::timer::Timer;
use crate::resources::atlas::Atlas;
use crate::resources::camera::Camera;
use crate::resources::texturestore::TextureHandle;
use crate::vector2::Vector2;

/// One displayable pose: a texture and the region of it to show.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Frame {
    pub texture: TextureHandle,
    pub source: IRect,
}

/// What happened during an [`Animation::update`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnimationEvent {
    /// The timer fired and the current frame is now `frame`.
    Advanced { frame: usize },
    /// A non-looping animation reached its last frame.
    Finished,
}

#[derive(Component, Debug, Clone)]
pub struct Animation {
    position: Vector2,
    rotation: f64,
    pivot: Vector2,
    frames: Vec<Frame>,
    current: usize,
    looping: bool,
    timer: Timer,
    on_finished: Option<String>,
    finished: bool,
}

impl Default for Animation {
    fn default() -> Self {
        Self::new()
    }
}

impl Animation {
    /// Empty looping animation with a zero frame interval.
    pub fn new() -> Self {
        Self {
            position: Vector2::ZERO,
            rotation: 0.0,
            pivot: Vector2::ZERO,
            frames: Vec::new(),
            current: 0,
            looping: true,
            timer: Timer::repeating(0.0),
            on_finished: None,
            finished: false,
        }
    }

    pub fn with_interval(mut self, seconds: f32) -> Self {
        self.set_interval(seconds);
        self
    }

    pub fn with_loop(mut self, looping: bool) -> Self {
        self.looping = looping;
        self
    }

    pub fn with_position(mut self, position: Vector2) -> Self {
        self.position = position;
        self
    }

    pub fn with_on_finished(mut self, signal: impl Into<String>) -> Self {
        self.on_finished = Some(signal.into());
        self
    }

    pub fn set_position(&mut self, position: Vector2) {
        self.position = position;
    }

    /// Rotation in degrees, clockwise, around the pivot.
    pub fn set_rotation(&mut self, angle: f64) {
        self.rotation = angle;
    }

    /// Rotation pivot relative to the top-left corner of the drawn frame.
    pub fn set_center(&mut self, pivot: Vector2) {
        self.pivot = pivot;
    }

    pub fn set_loop(&mut self, looping: bool) {
        self.looping = looping;
    }

    /// Seconds each frame stays on screen.
    pub fn set_interval(&mut self, seconds: f32) {
        self.timer.set_wait_time(seconds);
    }

    /// Signal carried by [`AnimationFinishedEvent`](crate::events::animation::AnimationFinishedEvent).
    pub fn set_on_finished(&mut self, signal: Option<String>) {
        self.on_finished = signal;
    }

    /// Cut `texture` into `num_h` equal horizontal slices and append them
    /// left to right. Returns the number of frames added.
    ///
    /// The slice width uses integer division, so any remainder pixels on the
    /// right edge of the texture are never shown.
    pub fn add_strip(
        &mut self,
        textures: &impl TextureQuery,
        texture: TextureHandle,
        num_h: u32,
    ) -> usize {
        if num_h == 0 {
            warn!("Animation strip needs at least one slice");
            return 0;
        }
        let Some((width, height)) = textures.texture_size(texture) else {
            warn!("Animation strip texture {:?} not found", texture);
            return 0;
        };

        let Ok(slices) = i32::try_from(num_h) else {
            warn!("Animation strip slice count {} is too large", num_h);
            return 0;
        };

        let before = self.frames.len();
        let slice_width = width / slices;
        for i in 0..slices {
            self.frames.push(Frame {
                texture,
                source: IRect::new(i * slice_width, 0, slice_width, height),
            });
        }
        self.frames.len() - before
    }

    /// Append one full-texture frame per texture in `atlas`.
    ///
    /// Handles that no longer resolve are skipped. Returns the number of
    /// frames added.
    pub fn add_atlas(&mut self, textures: &impl TextureQuery, atlas: &Atlas) -> usize {
        let mut added = 0;
        for &texture in atlas.textures() {
            let Some((width, height)) = textures.texture_size(texture) else {
                warn!("Atlas texture {:?} not found, frame skipped", texture);
                continue;
            };
            self.frames.push(Frame {
                texture,
                source: IRect::new(0, 0, width, height),
            });
            added += 1;
        }
        added
    }

    /// Append a single prepared frame.
    pub fn push_frame(&mut self, frame: Frame) {
        self.frames.push(frame);
    }

    /// Rewind to the first frame and restart the frame timer.
    pub fn reset(&mut self) {
        self.timer.restart();
        self.current = 0;
        self.finished = false;
    }

    /// Advance playback by `delta` seconds.
    pub fn update(&mut self, delta: f32) -> Option<AnimationEvent> {
        if !self.timer.update(delta) {
            return None;
        }
        self.advance()
    }

    fn advance(&mut self) -> Option<AnimationEvent> {
        if self.frames.is_empty() {
            return None;
        }

        let last = self.frames.len() - 1;
        self.current += 1;
        if self.current > last {
            self.current = if self.looping { 0 } else { last };
        }

        if !self.looping && self.current == last && !self.finished {
            self.finished = true;
            debug!("Animation finished on frame {}", last);
            return Some(AnimationEvent::Finished);
        }
        Some(AnimationEvent::Advanced {
            frame: self.current,
        })
    }

    /// Destination rectangle of the current frame, before camera offset.
    ///
    /// Centred on the animation position at native pixel size.
    pub fn destination(&self) -> Option<FRect> {
        let frame = self.current_frame()?;
        let src = frame.source;
        Some(FRect::new(
            self.position.x - (src.width / 2) as f32,
            self.position.y - (src.height / 2) as f32,
            src.width as f32,
            src.height as f32,
        ))
    }

    /// Draw the current frame through `camera`. Draws nothing without frames.
    pub fn render(&self, camera: &Camera, backend: &mut impl RenderBackend) {
        let (Some(frame), Some(dst)) = (self.current_frame(), self.destination()) else {
            debug!("Animation has no frames to render");
            return;
        };
        camera.render_texture(
            backend,
            frame.texture,
            frame.source,
            dst,
            self.rotation,
            self.pivot,
        );
    }

    pub fn current_frame(&self) -> Option<&Frame> {
        self.frames.get(self.current)
    }

    pub fn frame_index(&self) -> usize {
        self.current
    }

    pub fn frames(&self) -> &[Frame] {
        &self.frames
    }

    pub fn is_looping(&self) -> bool {
        self.looping
    }

    /// Whether a non-looping playthrough has reached its last frame.
    pub fn is_finished(&self) -> bool {
        self.finished
    }

    pub fn position(&self) -> Vector2 {
        self.position
    }

    pub fn rotation(&self) -> f64 {
        self.rotation
    }

    pub fn center(&self) -> Vector2 {
        self.pivot
    }

    pub fn interval(&self) -> f32 {
        self.timer.wait_time()
    }

    pub fn on_finished(&self) -> Option<&str> {
        self.on_finished.as_deref()
    }

    /// Freeze playback on the current frame.
    pub fn pause(&mut self) {
        self.timer.pause();
    }

    pub fn resume(&mut self) {
        self.timer.resume();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::Flip;
    use crate::resources::texturestore::{TextureSize, TextureStore};

    struct Tex(i32, i32);

    impl TextureSize for Tex {
        fn size(&self) -> (i32, i32) {
            (self.0, self.1)
        }
    }

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

    /// Animation with `n` slices of a `16 * n` x 16 strip, one second per frame.
    fn strip_animation(n: u32) -> (TextureStore<Tex>, Animation) {
        let mut store = TextureStore::new();
        let handle = store.insert(Tex(16 * n as i32, 16));
        let mut anim = Animation::new().with_interval(1.0);
        anim.add_strip(&store, handle, n);
        (store, anim)
    }

    #[test]
    fn test_strip_slices_use_integer_division() {
        let mut store = TextureStore::new();
        let handle = store.insert(Tex(100, 24));
        let mut anim = Animation::new();
        assert_eq!(anim.add_strip(&store, handle, 3), 3);

        let xs: Vec<i32> = anim.frames().iter().map(|f| f.source.x).collect();
        assert_eq!(xs, vec![0, 33, 66]);
        for frame in anim.frames() {
            assert_eq!(frame.texture, handle);
            assert_eq!(frame.source.width, 33);
            assert_eq!(frame.source.height, 24);
            assert_eq!(frame.source.y, 0);
        }
    }

    #[test]
    fn test_strip_with_zero_slices_adds_nothing() {
        let mut store = TextureStore::new();
        let handle = store.insert(Tex(64, 16));
        let mut anim = Animation::new();
        assert_eq!(anim.add_strip(&store, handle, 0), 0);
        assert!(anim.frames().is_empty());
    }

    #[test]
    fn test_strip_with_oversized_slice_count_adds_nothing() {
        let mut store = TextureStore::new();
        let handle = store.insert(Tex(64, 16));
        let mut anim = Animation::new();
        assert_eq!(anim.add_strip(&store, handle, u32::MAX), 0);
        assert_eq!(anim.add_strip(&store, handle, i32::MAX as u32 + 1), 0);
        assert!(anim.frames().is_empty());
    }

    #[test]
    fn test_push_frame_appends_after_strip() {
        let (_store, mut anim) = strip_animation(2);
        let texture = anim.frames()[0].texture;
        anim.push_frame(Frame {
            texture,
            source: IRect::new(0, 0, 8, 8),
        });
        assert_eq!(anim.frames().len(), 3);
        assert_eq!(anim.frames()[2].source, IRect::new(0, 0, 8, 8));

        anim.update(1.0);
        anim.update(1.0);
        assert_eq!(anim.frame_index(), 2);
        assert_eq!(anim.current_frame().map(|f| f.source.width), Some(8));
    }

    #[test]
    fn test_strip_with_stale_handle_adds_nothing() {
        let mut store = TextureStore::new();
        let handle = store.insert(Tex(64, 16));
        store.remove(handle);
        let mut anim = Animation::new();
        assert_eq!(anim.add_strip(&store, handle, 4), 0);
    }

    #[test]
    fn test_atlas_frames_span_full_textures() {
        let mut store = TextureStore::new();
        let mut atlas = Atlas::new();
        atlas.add_texture(store.insert(Tex(32, 32)));
        atlas.add_texture(store.insert(Tex(48, 40)));
        let stale = store.insert(Tex(1, 1));
        store.remove(stale);
        atlas.add_texture(stale);

        let mut anim = Animation::new();
        assert_eq!(anim.add_atlas(&store, &atlas), 2);
        assert_eq!(anim.frames()[0].source, IRect::new(0, 0, 32, 32));
        assert_eq!(anim.frames()[1].source, IRect::new(0, 0, 48, 40));
        assert_ne!(anim.frames()[0].texture, anim.frames()[1].texture);
    }

    #[test]
    fn test_looping_sequence_wraps() {
        let (_store, mut anim) = strip_animation(4);
        let seq: Vec<usize> = (0..5)
            .map(|_| {
                anim.update(1.0);
                anim.frame_index()
            })
            .collect();
        assert_eq!(seq, vec![1, 2, 3, 0, 1]);
    }

    #[test]
    fn test_looping_index_is_triggers_mod_len() {
        let (_store, mut anim) = strip_animation(3);
        for t in 1..=20 {
            anim.update(1.0);
            assert_eq!(anim.frame_index(), t % 3);
        }
    }

    #[test]
    fn test_update_reports_advance() {
        let (_store, mut anim) = strip_animation(4);
        assert_eq!(anim.update(0.5), None);
        assert_eq!(anim.update(0.5), Some(AnimationEvent::Advanced { frame: 1 }));
    }

    #[test]
    fn test_non_looping_clamps_and_finishes_once() {
        let (_store, mut anim) = strip_animation(4);
        anim.set_loop(false);

        let events: Vec<Option<AnimationEvent>> = (0..6).map(|_| anim.update(1.0)).collect();
        assert_eq!(events[0], Some(AnimationEvent::Advanced { frame: 1 }));
        assert_eq!(events[1], Some(AnimationEvent::Advanced { frame: 2 }));
        assert_eq!(events[2], Some(AnimationEvent::Finished));
        assert_eq!(events[3], Some(AnimationEvent::Advanced { frame: 3 }));
        assert_eq!(events[4], Some(AnimationEvent::Advanced { frame: 3 }));

        let finished = events
            .iter()
            .filter(|e| **e == Some(AnimationEvent::Finished))
            .count();
        assert_eq!(finished, 1);
        assert_eq!(anim.frame_index(), 3);
        assert!(anim.is_finished());
    }

    #[test]
    fn test_single_frame_non_looping_finishes_on_first_trigger() {
        let (_store, mut anim) = strip_animation(1);
        anim.set_loop(false);
        assert_eq!(anim.update(1.0), Some(AnimationEvent::Finished));
        assert_eq!(anim.frame_index(), 0);
        assert_eq!(anim.update(1.0), Some(AnimationEvent::Advanced { frame: 0 }));
    }

    #[test]
    fn test_reset_replays_same_sequence() {
        let (_store, mut anim) = strip_animation(3);
        anim.set_loop(false);
        let first: Vec<_> = (0..4).map(|_| anim.update(1.0)).collect();

        anim.update(0.4);
        anim.reset();
        assert_eq!(anim.frame_index(), 0);
        assert!(!anim.is_finished());

        let second: Vec<_> = (0..4).map(|_| anim.update(1.0)).collect();
        assert_eq!(first, second);
    }

    #[test]
    fn test_empty_animation_never_advances() {
        let mut anim = Animation::new().with_interval(0.1);
        assert_eq!(anim.update(1.0), None);
        assert_eq!(anim.frame_index(), 0);
        assert!(anim.current_frame().is_none());
    }

    #[test]
    fn test_paused_animation_holds_frame() {
        let (_store, mut anim) = strip_animation(4);
        anim.pause();
        anim.update(5.0);
        assert_eq!(anim.frame_index(), 0);
        anim.resume();
        anim.update(1.0);
        assert_eq!(anim.frame_index(), 1);
    }

    #[test]
    fn test_setters_store_values() {
        let mut anim = Animation::new();
        assert!(anim.is_looping());
        anim.set_loop(false);
        anim.set_interval(0.08);
        anim.set_position(Vector2::new(10.0, 20.0));
        anim.set_rotation(90.0);
        anim.set_center(Vector2::new(4.0, 4.0));
        anim.set_on_finished(Some("explosion_done".to_string()));

        assert!(!anim.is_looping());
        assert_eq!(anim.interval(), 0.08);
        assert_eq!(anim.position(), Vector2::new(10.0, 20.0));
        assert_eq!(anim.rotation(), 90.0);
        assert_eq!(anim.center(), Vector2::new(4.0, 4.0));
        assert_eq!(anim.on_finished(), Some("explosion_done"));
    }

    #[test]
    fn test_render_centres_current_frame() {
        let mut store = TextureStore::new();
        let handle = store.insert(Tex(90, 20));
        let mut anim = Animation::new().with_interval(1.0);
        anim.add_strip(&store, handle, 3);
        anim.set_position(Vector2::new(100.0, 50.0));
        anim.set_rotation(30.0);
        anim.set_center(Vector2::new(15.0, 10.0));
        anim.update(1.0);

        let camera = Camera::with_seed(0);
        let mut recorder = Recorder::default();
        anim.render(&camera, &mut recorder);

        assert_eq!(recorder.draws.len(), 1);
        let (h, src, dst, angle, pivot, flip) = recorder.draws[0];
        assert_eq!(h, handle);
        assert_eq!(src, IRect::new(30, 0, 30, 20));
        assert_eq!(dst, FRect::new(85.0, 40.0, 30.0, 20.0));
        assert_eq!(angle, 30.0);
        assert_eq!(pivot, Vector2::new(15.0, 10.0));
        assert_eq!(flip, Flip::None);
    }

    #[test]
    fn test_destination_halves_odd_widths_like_integers() {
        let mut anim = Animation::new().with_position(Vector2::new(10.0, 10.0));
        let mut store = TextureStore::new();
        let handle = store.insert(Tex(5, 3));
        anim.add_strip(&store, handle, 1);
        // 5 / 2 == 2 and 3 / 2 == 1
        assert_eq!(anim.destination(), Some(FRect::new(8.0, 9.0, 5.0, 3.0)));
    }

    #[test]
    fn test_render_without_frames_draws_nothing() {
        let anim = Animation::new();
        let camera = Camera::with_seed(0);
        let mut recorder = Recorder::default();
        anim.render(&camera, &mut recorder);
        assert!(recorder.draws.is_empty());
    }
}
