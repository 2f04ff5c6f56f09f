// Copyright 2026 the Ribbon Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The circular gallery: scroll physics, ribbon layout, texture streaming and
//! input routing driven from one frame callback.
//!
//! [`Gallery`] is platform-neutral. The backend owns the canvas, the loader
//! and the frame source; it forwards input through
//! [`handle_input`](Gallery::handle_input), load outcomes through
//! [`texture_loaded`](Gallery::texture_loaded), and calls
//! [`frame`](Gallery::frame) once per display refresh. A frame that returns
//! a [`FrameReport`] with `draw` set should be drawn from
//! [`ribbon`](Gallery::ribbon) and [`slot_texture`](Gallery::slot_texture).

use alloc::vec;
use alloc::vec::Vec;

use kurbo::Size;

use crate::config::{DeviceClass, GalleryConfig, GalleryItem};
use crate::frame::LoopState;
use crate::input::{DragAction, InputAction, InputEvent, InputMode, InputRouter};
use crate::layout::{Ribbon, viewport_for_screen};
use crate::scroll::{ClampBound, Direction, ScrollState};
use crate::texture::{ImageLoader, LoadError, StreamPolicy, Texture, TextureStream};
use crate::time::{Duration, HostTime};
use crate::timing::FrameThrottle;
use crate::trace::{DragEvent, DragPhase, FrameEvent, TextureEvent, TextureEventKind, Tracer};

/// Delay after the last wheel event before the target snaps to an item.
pub const WHEEL_SETTLE_DELAY: Duration = Duration::from_millis(200);

/// Facts about the host detected once at construction.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct HostEnvironment {
    /// Container size in CSS pixels.
    pub screen: Size,
    /// Primary pointer class.
    pub device: DeviceClass,
    /// Event family to listen to.
    pub input_mode: InputMode,
}

/// Outcome of a frame that did work.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FrameReport {
    /// Monotonic frame counter.
    pub frame_index: u64,
    /// Direction of travel this frame.
    pub direction: Direction,
    /// Slots that wrapped this frame.
    pub wrapped: usize,
    /// Whether the frame should be drawn. Withheld until the eager batch has
    /// settled.
    pub draw: bool,
}

/// One gallery instance.
#[derive(Debug)]
pub struct Gallery<H> {
    config: GalleryConfig,
    scroll: ScrollState,
    ribbon: Ribbon,
    stream: TextureStream<H>,
    slot_textures: Vec<Option<Texture<H>>>,
    router: InputRouter,
    throttle: FrameThrottle,
    state: LoopState,
    frame_index: u64,
    settle_at: Option<HostTime>,
}

impl<H: Clone> Gallery<H> {
    /// Builds a gallery for `items`, laid out for `env.screen`.
    ///
    /// The configuration is adjusted for `env.device`. Slots that start
    /// off-screen on either side are wrapped to the nearer end.
    #[must_use]
    pub fn new(items: Vec<GalleryItem>, config: GalleryConfig, env: HostEnvironment) -> Self {
        let config = config.for_device(env.device);
        let mut ribbon = Ribbon::new(items, config.bend);
        ribbon.layout(env.screen, viewport_for_screen(env.screen));
        ribbon.prime(0.0, &mut Tracer::none());
        let stream = TextureStream::new(ribbon.unique_sources(), StreamPolicy::web());
        let router = InputRouter::new(
            env.input_mode,
            env.device,
            config.scroll_speed,
            config.wheel_enabled,
        );
        Self {
            scroll: ScrollState::new(config.effective_ease()),
            slot_textures: vec![None; ribbon.slots().len()],
            ribbon,
            stream,
            router,
            config,
            throttle: FrameThrottle::disabled(),
            state: LoopState::Idle,
            frame_index: 0,
            settle_at: None,
        }
    }

    /// Replaces the frame throttle.
    pub fn set_throttle(&mut self, throttle: FrameThrottle) {
        self.throttle = throttle;
    }

    /// Starts the loop and requests the eager batch. Returns `false` if the
    /// gallery was already started or stopped.
    pub fn start<L: ImageLoader<Handle = H>>(
        &mut self,
        loader: &mut L,
        tracer: &mut Tracer<'_>,
    ) -> bool {
        if !self.state.start() {
            return false;
        }
        self.stream.start(&mut TracedLoader { loader, tracer });
        true
    }

    /// Stops the loop and drops every cached texture. Idempotent.
    ///
    /// Returns the handles the backend should release.
    pub fn stop(&mut self) -> Vec<H> {
        if !self.state.stop() {
            return Vec::new();
        }
        self.settle_at = None;
        self.slot_textures.iter_mut().for_each(|t| *t = None);
        self.stream.destroy()
    }

    /// Returns the loop state.
    #[must_use]
    pub fn state(&self) -> LoopState {
        self.state
    }

    /// Returns the device-adjusted configuration.
    #[must_use]
    pub fn config(&self) -> &GalleryConfig {
        &self.config
    }

    /// Returns the scroll state.
    #[must_use]
    pub fn scroll(&self) -> &ScrollState {
        &self.scroll
    }

    /// Returns the ribbon.
    #[must_use]
    pub fn ribbon(&self) -> &Ribbon {
        &self.ribbon
    }

    /// Returns the texture applied to slot `index`, if it has loaded.
    #[must_use]
    pub fn slot_texture(&self, index: usize) -> Option<&Texture<H>> {
        self.slot_textures.get(index).and_then(Option::as_ref)
    }

    /// Returns the texture stream.
    #[must_use]
    pub fn stream(&self) -> &TextureStream<H> {
        &self.stream
    }

    /// Returns `true` while a drag is in progress.
    #[must_use]
    pub fn is_dragging(&self) -> bool {
        self.router.is_dragging()
    }

    /// Returns `true` while the pointer is over the container.
    #[must_use]
    pub fn is_hovering(&self) -> bool {
        self.router.is_hovering()
    }

    /// Re-lays out the ribbon for a new container size.
    pub fn resize(&mut self, screen: Size) {
        if self.state == LoopState::Stopped {
            return;
        }
        self.ribbon.layout(screen, viewport_for_screen(screen));
    }

    /// Routes an input event into the scroll state.
    pub fn handle_input(&mut self, event: &InputEvent, now: HostTime, tracer: &mut Tracer<'_>) {
        if self.state == LoopState::Stopped {
            return;
        }
        let Some(action) = self.router.route(event) else {
            return;
        };
        let width = self.ribbon.item_width();
        match action {
            InputAction::Drag(DragAction::Start { x, bound, is_touch }) => {
                self.scroll.set_bound(bound);
                self.scroll.begin_drag();
                tracer.drag(&DragEvent {
                    phase: DragPhase::Start,
                    x,
                    is_touch,
                });
            }
            InputAction::Drag(DragAction::Move { x, distance }) => {
                let anchor = self.scroll.drag_anchor().unwrap_or(self.scroll.current);
                self.scroll.set_target(anchor + distance, width);
                tracer.drag(&DragEvent {
                    phase: DragPhase::Move,
                    x,
                    is_touch: self.scroll.bound() == ClampBound::Touch,
                });
            }
            InputAction::Drag(DragAction::End) => {
                self.scroll.end_drag();
                self.settle();
                tracer.drag(&DragEvent {
                    phase: DragPhase::End,
                    x: 0.0,
                    is_touch: self.scroll.bound() == ClampBound::Touch,
                });
            }
            InputAction::HoverEnter => self.scroll.pin(),
            InputAction::HoverLeave => self.scroll.commit(),
            InputAction::Wheel { delta } => {
                self.scroll.nudge(delta, width);
                self.settle_at = Some(now.saturating_add(WHEEL_SETTLE_DELAY));
            }
        }
    }

    /// Applies a finished load to every slot showing `source`.
    ///
    /// Returns the number of slots updated. Loads finishing after
    /// [`stop`](Self::stop) are dropped.
    pub fn texture_loaded<L: ImageLoader<Handle = H>>(
        &mut self,
        source: &str,
        result: Result<Texture<H>, LoadError>,
        loader: &mut L,
        tracer: &mut Tracer<'_>,
    ) -> usize {
        let Some(texture) = self.stream.complete(source, result, loader) else {
            return 0;
        };
        tracer.texture(&TextureEvent {
            source,
            kind: if texture.is_fallback {
                TextureEventKind::Fallback
            } else {
                TextureEventKind::Ready
            },
        });
        let slots: Vec<usize> = self.ribbon.slots_for_source(source).collect();
        for &slot in &slots {
            self.slot_textures[slot] = Some(texture.clone());
        }
        slots.len()
    }

    /// Snaps the target to the nearest whole item.
    fn settle(&mut self) {
        self.scroll.target = self.ribbon.settle_to_nearest_item(self.scroll.target);
    }

    /// Runs one frame. Returns `None` when the loop is not running or the
    /// frame was throttled.
    pub fn frame<L: ImageLoader<Handle = H>>(
        &mut self,
        now: HostTime,
        loader: &mut L,
        tracer: &mut Tracer<'_>,
    ) -> Option<FrameReport> {
        if !self.state.is_running() || !self.throttle.should_run(now) {
            return None;
        }
        self.frame_index += 1;

        if self.stream.take_pump_request() {
            self.stream.pump(&mut TracedLoader {
                loader: &mut *loader,
                tracer: &mut *tracer,
            });
        }

        if let Some(at) = self.settle_at
            && now >= at
        {
            self.settle_at = None;
            self.settle();
        }

        let width = self.ribbon.item_width();
        let auto = self.config.auto_scroll_speed;
        if !self.router.is_dragging() && !self.router.is_hovering() && auto != 0.0 {
            self.scroll.nudge(auto, width);
        }

        let direction = self.scroll.tick();
        let wrapped = self.ribbon.reposition(self.scroll.current, direction, tracer);
        let draw = self.stream.eager_settled();
        self.scroll.commit();

        tracer.frame(&FrameEvent {
            frame_index: self.frame_index,
            now,
            current: self.scroll.current,
            target: self.scroll.target,
            direction,
            drew: draw,
        });
        Some(FrameReport {
            frame_index: self.frame_index,
            direction,
            wrapped,
            draw,
        })
    }
}

/// Reports every load the stream starts.
struct TracedLoader<'l, 't, 'a, L> {
    loader: &'l mut L,
    tracer: &'t mut Tracer<'a>,
}

impl<L: ImageLoader> ImageLoader for TracedLoader<'_, '_, '_, L> {
    type Handle = L::Handle;

    fn begin(&mut self, source: &str) {
        self.tracer.texture(&TextureEvent {
            source,
            kind: TextureEventKind::Requested,
        });
        self.loader.begin(source);
    }

    fn fallback(&mut self) -> Texture<Self::Handle> {
        self.loader.fallback()
    }
}

#[cfg(test)]
mod tests {
    use alloc::format;
    use alloc::string::String;

    use kurbo::Point;

    use super::*;
    use crate::input::PointerKind;

    #[derive(Default)]
    struct QueueLoader {
        begun: Vec<String>,
    }

    impl ImageLoader for QueueLoader {
        type Handle = u32;

        fn begin(&mut self, source: &str) {
            self.begun.push(String::from(source));
        }

        fn fallback(&mut self) -> Texture<u32> {
            Texture {
                handle: 0,
                width: 2,
                height: 2,
                is_fallback: true,
            }
        }
    }

    fn env() -> HostEnvironment {
        HostEnvironment {
            screen: Size::new(1200.0, 600.0),
            device: DeviceClass::Fine,
            input_mode: InputMode::PointerEvents,
        }
    }

    fn items(n: usize) -> Vec<GalleryItem> {
        (0..n)
            .map(|i| GalleryItem::new(format!("/img/{i}.jpeg"), format!("#{i}")))
            .collect()
    }

    fn texture(handle: u32) -> Result<Texture<u32>, LoadError> {
        Ok(Texture {
            handle,
            width: 800,
            height: 600,
            is_fallback: false,
        })
    }

    fn started(n: usize, config: GalleryConfig) -> (Gallery<u32>, QueueLoader) {
        let mut gallery = Gallery::new(items(n), config, env());
        let mut loader = QueueLoader::default();
        assert!(gallery.start(&mut loader, &mut Tracer::none()));
        (gallery, loader)
    }

    fn settle_eager(gallery: &mut Gallery<u32>, loader: &mut QueueLoader) {
        let begun = loader.begun.clone();
        for (i, source) in begun.iter().enumerate() {
            gallery.texture_loaded(source, texture(i as u32 + 1), loader, &mut Tracer::none());
        }
    }

    fn still() -> GalleryConfig {
        GalleryConfig {
            auto_scroll_speed: 0.0,
            ..GalleryConfig::new()
        }
    }

    fn down(x: f64) -> InputEvent {
        InputEvent::PointerDown {
            pointer_id: 1,
            kind: PointerKind::Mouse,
            position: Point::new(x, 0.0),
        }
    }

    fn drag_to(x: f64) -> InputEvent {
        InputEvent::PointerMove {
            pointer_id: 1,
            kind: PointerKind::Mouse,
            position: Point::new(x, 0.0),
        }
    }

    #[test]
    fn frames_are_withheld_until_eager_batch_settles() {
        let (mut gallery, mut loader) = started(8, still());
        let mut tracer = Tracer::none();
        let report = gallery.frame(HostTime(0), &mut loader, &mut tracer).unwrap();
        assert!(!report.draw);
        settle_eager(&mut gallery, &mut loader);
        let report = gallery.frame(HostTime(16_000), &mut loader, &mut tracer).unwrap();
        assert!(report.draw);
    }

    #[test]
    fn remaining_textures_are_pumped_from_frames() {
        let (mut gallery, mut loader) = started(8, still());
        let mut tracer = Tracer::none();
        assert_eq!(loader.begun.len(), 5);
        settle_eager(&mut gallery, &mut loader);
        assert_eq!(loader.begun.len(), 5, "completions do not start loads");
        gallery.frame(HostTime(0), &mut loader, &mut tracer);
        assert_eq!(loader.begun.len(), 8);
    }

    #[test]
    fn loaded_texture_applies_to_both_copies() {
        let (mut gallery, mut loader) = started(3, still());
        let updated =
            gallery.texture_loaded("/img/1.jpeg", texture(9), &mut loader, &mut Tracer::none());
        assert_eq!(updated, 2);
        assert_eq!(gallery.slot_texture(1).map(|t| t.handle), Some(9));
        assert_eq!(gallery.slot_texture(4).map(|t| t.handle), Some(9));
        assert!(gallery.slot_texture(0).is_none());
    }

    #[test]
    fn autoscroll_advances_until_hover() {
        let (mut gallery, mut loader) = started(4, GalleryConfig::new());
        let mut tracer = Tracer::none();
        let mut now = HostTime(0);
        for _ in 0..10 {
            gallery.frame(now, &mut loader, &mut tracer);
            now = now + Duration::from_millis(16);
        }
        let moving = gallery.scroll().target;
        assert!(moving > 0.0);

        gallery.handle_input(&InputEvent::Enter, now, &mut tracer);
        let pinned = gallery.scroll().current;
        assert_eq!(gallery.scroll().target, pinned);
        for _ in 0..10 {
            gallery.frame(now, &mut loader, &mut tracer);
            now = now + Duration::from_millis(16);
        }
        assert_eq!(gallery.scroll().target, pinned, "hover suspends autoscroll");
        assert_eq!(gallery.scroll().current, pinned);

        gallery.handle_input(&InputEvent::Leave, now, &mut tracer);
        gallery.frame(now, &mut loader, &mut tracer);
        assert!(gallery.scroll().target > pinned);
    }

    #[test]
    fn drag_moves_target_and_settles_on_release() {
        let (mut gallery, mut loader) = started(6, still());
        let mut tracer = Tracer::none();
        let width = gallery.ribbon().item_width();
        gallery.handle_input(&down(500.0), HostTime(0), &mut tracer);
        assert!(gallery.is_dragging());
        gallery.handle_input(&drag_to(400.0), HostTime(0), &mut tracer);
        // 100 px × speed 2 × 0.025.
        assert!((gallery.scroll().target - 5.0).abs() < 1e-9);
        gallery.handle_input(&InputEvent::PointerUp { pointer_id: 1 }, HostTime(0), &mut tracer);
        assert!(!gallery.is_dragging());
        let target = gallery.scroll().target;
        let items = target / width;
        assert!((items - items.round()).abs() < 1e-9, "release snaps to an item");
        gallery.frame(HostTime(0), &mut loader, &mut tracer);
    }

    #[test]
    fn runaway_drag_is_clamped() {
        let (mut gallery, _loader) = started(6, still());
        let mut tracer = Tracer::none();
        let width = gallery.ribbon().item_width();
        gallery.handle_input(&down(10_000.0), HostTime(0), &mut tracer);
        gallery.handle_input(&drag_to(-10_000.0), HostTime(0), &mut tracer);
        assert!((gallery.scroll().target - width * 6.0).abs() < 1e-9);
        assert_eq!(gallery.scroll().bound(), ClampBound::Pointer);
    }

    #[test]
    fn wheel_settles_after_debounce() {
        let config = GalleryConfig {
            wheel_enabled: true,
            ..still()
        };
        let (mut gallery, mut loader) = started(6, config);
        let mut tracer = Tracer::none();
        gallery.handle_input(&InputEvent::Wheel { delta_y: 100.0 }, HostTime(0), &mut tracer);
        gallery.handle_input(
            &InputEvent::Wheel { delta_y: 100.0 },
            HostTime(100_000),
            &mut tracer,
        );
        assert!((gallery.scroll().target - 0.8).abs() < 1e-9);
        gallery.frame(HostTime(250_000), &mut loader, &mut tracer);
        assert!(
            (gallery.scroll().target - 0.8).abs() < 1e-9,
            "debounce restarts on each wheel event"
        );
        gallery.frame(HostTime(300_000), &mut loader, &mut tracer);
        assert_eq!(gallery.scroll().target, 0.0, "0.8 rounds down to item 0");
    }

    #[test]
    fn stop_is_idempotent_and_drops_late_loads() {
        let (mut gallery, mut loader) = started(3, still());
        let mut tracer = Tracer::none();
        gallery.texture_loaded("/img/0.jpeg", texture(4), &mut loader, &mut tracer);
        assert_eq!(gallery.stop(), vec![4]);
        assert!(gallery.stop().is_empty());
        assert_eq!(gallery.state(), LoopState::Stopped);
        assert_eq!(
            gallery.texture_loaded("/img/1.jpeg", texture(5), &mut loader, &mut tracer),
            0
        );
        assert!(gallery.frame(HostTime(0), &mut loader, &mut tracer).is_none());
        assert!(!gallery.start(&mut loader, &mut tracer), "no restart");
        gallery.handle_input(&down(0.0), HostTime(0), &mut tracer);
        assert!(!gallery.is_dragging());
    }

    #[test]
    fn frames_before_start_do_nothing() {
        let mut gallery: Gallery<u32> = Gallery::new(items(2), still(), env());
        let mut loader = QueueLoader::default();
        assert!(gallery.frame(HostTime(0), &mut loader, &mut Tracer::none()).is_none());
        assert!(loader.begun.is_empty());
    }

    #[test]
    fn throttle_skips_fast_frames() {
        let (mut gallery, mut loader) = started(2, still());
        gallery.set_throttle(FrameThrottle::new(FrameThrottle::DEFAULT_INTERVAL));
        let mut tracer = Tracer::none();
        assert!(gallery.frame(HostTime(0), &mut loader, &mut tracer).is_some());
        assert!(gallery.frame(HostTime(8_000), &mut loader, &mut tracer).is_none());
        assert!(gallery.frame(HostTime(16_000), &mut loader, &mut tracer).is_some());
    }

    #[test]
    fn coarse_devices_get_adjusted_config() {
        let env = HostEnvironment {
            device: DeviceClass::Coarse,
            ..env()
        };
        let gallery: Gallery<u32> = Gallery::new(items(2), GalleryConfig::new(), env);
        assert!((gallery.config().auto_scroll_speed - 0.006).abs() < 1e-12);
        assert!((gallery.scroll().ease() - 0.06).abs() < 1e-12);
    }

    #[test]
    fn flat_gallery_never_rotates() {
        let config = GalleryConfig {
            bend: 0.0,
            auto_scroll_speed: 0.5,
            ..GalleryConfig::new()
        };
        let (mut gallery, mut loader) = started(5, config);
        let mut tracer = Tracer::none();
        for i in 0..300 {
            gallery.frame(HostTime(i * 16_000), &mut loader, &mut tracer);
            for slot in gallery.ribbon().slots() {
                assert_eq!(slot.placement.rotation_z, 0.0);
                assert_eq!(slot.placement.y, 0.0);
            }
        }
    }

    #[test]
    fn resize_relayouts() {
        let (mut gallery, _loader) = started(3, still());
        let before = gallery.ribbon().viewport();
        gallery.resize(Size::new(600.0, 600.0));
        let after = gallery.ribbon().viewport();
        assert!((after.width - before.width / 2.0).abs() < 1e-9, "viewport follows aspect");
        assert_eq!(gallery.ribbon().screen(), Size::new(600.0, 600.0));
    }
}
