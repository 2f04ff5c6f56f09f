// Copyright 2026 the Ribbon Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The circular gallery component.
//!
//! [`CircularGallery::mount`] waits for the container to approach the
//! viewport, then builds the canvas, renderer, loader and frame loop in an
//! idle period. Everything is torn down by [`CircularGallery::unmount`] or on
//! drop.

use alloc::boxed::Box;
use alloc::rc::Rc;
use alloc::vec::Vec;
use core::cell::{Cell, RefCell};

use kurbo::Size;
use wasm_bindgen::prelude::*;
use web_sys::{Document, Event, EventTarget, HtmlCanvasElement, HtmlElement};

use ribbon_core::config::{GalleryConfig, GalleryItem};
use ribbon_core::gallery::{Gallery, HostEnvironment};
use ribbon_core::input::{InputEvent, InputMode};
use ribbon_core::mount::{IDLE_TIMEOUT, LazyMount, MountAction, ROOT_MARGIN_PX};
use ribbon_core::time::HostTime;
use ribbon_core::trace::{TraceSink, Tracer};
use ribbon_render::{Camera, CaptionTexture, GalleryPlan, TextureKey};

use crate::caption::render_caption;
use crate::dom::{self, EventListeners};
use crate::gl::PlaneRenderer;
use crate::input::{self, Capture, CaptureTracker};
use crate::loader::WebImageLoader;
use crate::now;
use crate::raf::RafLoop;
use crate::visibility::{VisibilityObserver, request_idle, vertical_margin};

/// Upper bound on the canvas device pixel ratio.
pub const MAX_DEVICE_PIXEL_RATIO: f64 = 1.5;

type Sink = Option<Box<dyn TraceSink>>;

fn tracer_for(sink: &mut Sink) -> Tracer<'_> {
    match sink {
        Some(sink) => Tracer::new(&mut **sink),
        None => Tracer::none(),
    }
}

/// Everything the frame callback and event handlers mutate.
struct GalleryState {
    gallery: Gallery<TextureKey>,
    renderer: PlaneRenderer,
    loader: WebImageLoader,
    camera: Camera,
    plan: GalleryPlan,
    captions: Vec<Option<CaptionTexture>>,
    container: HtmlElement,
    canvas: HtmlCanvasElement,
    capture: CaptureTracker,
    sink: Sink,
}

/// Returns the freshly uploaded key if the stream settled its source on a
/// different texture, or dropped it.
fn superseded(uploaded: Option<TextureKey>, kept: Option<TextureKey>) -> Option<TextureKey> {
    uploaded.filter(|key| kept != Some(*key))
}

impl GalleryState {
    fn frame(&mut self, now: HostTime) {
        let Self {
            gallery,
            renderer,
            loader,
            camera,
            plan,
            captions,
            sink,
            ..
        } = self;
        let mut tracer = tracer_for(sink);

        for (source, outcome) in loader.drain(renderer) {
            let uploaded = outcome.as_ref().ok().map(|texture| texture.handle);
            gallery.texture_loaded(&source, outcome, loader, &mut tracer);
            let kept = gallery.stream().cached(&source).map(|texture| texture.handle);
            if let Some(key) = superseded(uploaded, kept) {
                renderer.release([key]);
            }
        }
        let Some(report) = gallery.frame(now, loader, &mut tracer) else {
            return;
        };
        if report.draw {
            plan.build(camera, gallery, captions);
            renderer.draw(plan);
        }
    }

    fn input(&mut self, event: &InputEvent, now: HostTime) {
        // Capture errors mean the pointer is already gone.
        match self.capture.on_event(event) {
            Some(Capture::Take(id)) => {
                let _ = self.container.set_pointer_capture(id);
            }
            Some(Capture::Release(id)) => {
                let _ = self.container.release_pointer_capture(id);
            }
            None => {}
        }
        let mut tracer = tracer_for(&mut self.sink);
        self.gallery.handle_input(event, now, &mut tracer);
    }

    /// Matches the drawing buffer and layout to the container size.
    fn resize(&mut self) {
        let screen = container_size(&self.container);
        let dpr = dom::device_pixel_ratio(MAX_DEVICE_PIXEL_RATIO);
        let width = device_pixels(screen.width, dpr);
        let height = device_pixels(screen.height, dpr);
        self.canvas.set_width(width);
        self.canvas.set_height(height);
        self.renderer.resize(width, height);
        self.camera = Camera::for_screen(screen);
        self.gallery.resize(screen);
    }

    fn teardown(&mut self) {
        if let Some(id) = self.capture.take() {
            let _ = self.container.release_pointer_capture(id);
        }
        let mut keys = self.gallery.stop();
        keys.extend(self.captions.drain(..).flatten().map(|c| c.key));
        self.loader.cancel_all();
        self.renderer.release(keys);
        self.renderer.destroy();
        if let Some(parent) = self.canvas.parent_node() {
            let _ = parent.remove_child(&self.canvas);
        }
    }
}

fn container_size(container: &HtmlElement) -> Size {
    Size::new(
        f64::from(container.client_width()),
        f64::from(container.client_height()),
    )
}

#[expect(
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss,
    reason = "clamped to at least one pixel; containers are far below u32::MAX"
)]
fn device_pixels(css: f64, dpr: f64) -> u32 {
    (css * dpr).round().max(1.0) as u32
}

/// A constructed gallery.
struct Live {
    state: Rc<RefCell<GalleryState>>,
    raf: RafLoop,
    listeners: EventListeners,
}

impl Live {
    fn build(
        container: &HtmlElement,
        items: Vec<GalleryItem>,
        config: GalleryConfig,
        sink: Sink,
    ) -> Result<Self, JsValue> {
        let document = dom::document()?;
        if let Some(root) = document.document_element() {
            let _ = root.class_list().remove_1("no-js");
        }

        let canvas: HtmlCanvasElement = document.create_element("canvas")?.unchecked_into();
        let style = canvas.style();
        style.set_property("width", "100%")?;
        style.set_property("height", "100%")?;
        style.set_property("display", "block")?;
        style.set_property("touch-action", input::TOUCH_ACTION)?;
        container.append_child(&canvas)?;

        Self::wire(container, canvas.clone(), document, items, config, sink).inspect_err(|_| {
            let _ = container.remove_child(&canvas);
        })
    }

    fn wire(
        container: &HtmlElement,
        canvas: HtmlCanvasElement,
        document: Document,
        items: Vec<GalleryItem>,
        config: GalleryConfig,
        sink: Sink,
    ) -> Result<Self, JsValue> {
        let mut renderer = PlaneRenderer::new(&canvas)?;
        let input_mode = InputMode::detect(dom::has_pointer_events());
        let screen = container_size(container);
        let env = HostEnvironment {
            screen,
            device: dom::device_class(),
            input_mode,
        };
        let gallery = Gallery::new(items, config, env);

        let captions = gallery
            .ribbon()
            .items()
            .iter()
            .map(|item| caption_texture(&document, &mut renderer, item, gallery.config()))
            .collect();
        let loader = WebImageLoader::new(document, renderer.fallback());

        let mut state = GalleryState {
            gallery,
            renderer,
            loader,
            camera: Camera::for_screen(screen),
            plan: GalleryPlan::new(),
            captions,
            container: container.clone(),
            canvas,
            capture: CaptureTracker::default(),
            sink,
        };
        state.resize();
        {
            let GalleryState {
                gallery,
                loader,
                sink,
                ..
            } = &mut state;
            gallery.start(loader, &mut tracer_for(sink));
        }
        let state = Rc::new(RefCell::new(state));

        let mut listeners = EventListeners::default();
        let window: EventTarget = dom::window()?.into();
        for &kind in input::window_events(input_mode) {
            listeners.add(&window, kind, input_handler(&state))?;
        }
        let target: &EventTarget = container.as_ref();
        for &kind in input::container_events(input_mode) {
            listeners.add(target, kind, input_handler(&state))?;
        }
        if state.borrow().gallery.config().wheel_enabled {
            listeners.add(target, "wheel", input_handler(&state))?;
        }
        {
            let state = Rc::clone(&state);
            listeners.add(&window, "resize", move |_| {
                if let Ok(mut state) = state.try_borrow_mut() {
                    state.resize();
                }
            })?;
        }

        let raf = {
            let state = Rc::clone(&state);
            RafLoop::new(move |tick| {
                if let Ok(mut state) = state.try_borrow_mut() {
                    state.frame(tick.now);
                }
            })
        };
        raf.start();

        Ok(Self {
            state,
            raf,
            listeners,
        })
    }

    fn teardown(mut self) {
        self.raf.stop();
        self.listeners.clear();
        self.state.borrow_mut().teardown();
    }
}

fn caption_texture(
    document: &Document,
    renderer: &mut PlaneRenderer,
    item: &GalleryItem,
    config: &GalleryConfig,
) -> Option<CaptionTexture> {
    if item.caption.is_empty() {
        return None;
    }
    let canvas = render_caption(document, &item.caption, &config.font, &config.text_color).ok()?;
    let aspect = f64::from(canvas.width()) / f64::from(canvas.height().max(1));
    let key = renderer.upload_canvas(&canvas).ok()?;
    Some(CaptionTexture { key, aspect })
}

fn input_handler(state: &Rc<RefCell<GalleryState>>) -> impl FnMut(Event) + 'static {
    let state = Rc::clone(state);
    move |event: Event| {
        let Some(input) = input::translate(&event) else {
            return;
        };
        let now = now();
        if let Ok(mut state) = state.try_borrow_mut() {
            state.input(&input, now);
        }
    }
}

struct Mount {
    container: HtmlElement,
    lazy: Cell<LazyMount>,
    pending: RefCell<Option<(Vec<GalleryItem>, GalleryConfig, Sink)>>,
    observer: RefCell<Option<VisibilityObserver>>,
    live: RefCell<Option<Live>>,
}

impl Mount {
    fn on_intersect(self: &Rc<Self>, is_intersecting: bool) {
        let mut lazy = self.lazy.get();
        let action = lazy.on_intersect(is_intersecting);
        self.lazy.set(lazy);
        if action == MountAction::ScheduleIdle {
            // Still running inside the observer callback; keep its closure.
            if let Some(observer) = self.observer.borrow().as_ref() {
                observer.disconnect();
            }
            let mount = Rc::downgrade(self);
            request_idle(
                move || {
                    if let Some(mount) = mount.upgrade() {
                        mount.on_idle();
                    }
                },
                IDLE_TIMEOUT,
            );
        }
    }

    fn on_idle(&self) {
        let mut lazy = self.lazy.get();
        let build = lazy.on_idle();
        self.lazy.set(lazy);
        if build {
            self.build();
        }
    }

    fn build(&self) {
        let Some((items, config, sink)) = self.pending.borrow_mut().take() else {
            return;
        };
        match Live::build(&self.container, items, config, sink) {
            Ok(live) => *self.live.borrow_mut() = Some(live),
            Err(err) => web_sys::console::error_1(&err),
        }
    }

    fn destroy(&self) {
        let mut lazy = self.lazy.get();
        lazy.destroy();
        self.lazy.set(lazy);
        self.pending.borrow_mut().take();
        if let Some(observer) = self.observer.borrow_mut().take() {
            observer.disconnect();
        }
        if let Some(live) = self.live.borrow_mut().take() {
            live.teardown();
        }
    }
}

/// A circular WebGL gallery mounted into a container element.
///
/// Construction is deferred until the container comes within
/// [`ROOT_MARGIN_PX`] of the viewport. Without `IntersectionObserver` the
/// gallery is built immediately.
pub struct CircularGallery {
    mount: Rc<Mount>,
}

impl core::fmt::Debug for CircularGallery {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("CircularGallery")
            .field("phase", &self.mount.lazy.get().phase())
            .finish_non_exhaustive()
    }
}

impl CircularGallery {
    /// Mounts a gallery of `items` into `container`.
    ///
    /// An empty `items` list shows the placeholder set.
    pub fn mount(
        container: &HtmlElement,
        items: Vec<GalleryItem>,
        config: GalleryConfig,
    ) -> Result<Self, JsValue> {
        Self::mount_with_sink(container, items, config, None)
    }

    /// Like [`mount`](Self::mount), reporting frame, wrap, texture and drag
    /// events to `sink`.
    pub fn mount_traced(
        container: &HtmlElement,
        items: Vec<GalleryItem>,
        config: GalleryConfig,
        sink: Box<dyn TraceSink>,
    ) -> Result<Self, JsValue> {
        Self::mount_with_sink(container, items, config, Some(sink))
    }

    fn mount_with_sink(
        container: &HtmlElement,
        items: Vec<GalleryItem>,
        config: GalleryConfig,
        sink: Sink,
    ) -> Result<Self, JsValue> {
        let has_observer = dom::has_intersection_observer();
        let mount = Rc::new(Mount {
            container: container.clone(),
            lazy: Cell::new(LazyMount::new(has_observer)),
            pending: RefCell::new(Some((items, config, sink))),
            observer: RefCell::new(None),
            live: RefCell::new(None),
        });

        if has_observer {
            let weak = Rc::downgrade(&mount);
            let observer = VisibilityObserver::new(
                container,
                &vertical_margin(ROOT_MARGIN_PX),
                0.0,
                move |visible| {
                    if let Some(mount) = weak.upgrade() {
                        mount.on_intersect(visible);
                    }
                },
            )?;
            *mount.observer.borrow_mut() = Some(observer);
        } else {
            mount.build();
        }
        Ok(Self { mount })
    }

    /// Returns `true` once the canvas and frame loop exist.
    #[must_use]
    pub fn is_active(&self) -> bool {
        self.mount.live.borrow().is_some()
    }

    /// Stops the loop, removes listeners and the canvas, and releases every
    /// texture. Idempotent.
    pub fn unmount(&self) {
        self.mount.destroy();
    }
}

impl Drop for CircularGallery {
    fn drop(&mut self) {
        self.unmount();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn device_pixels_scale_and_round() {
        assert_eq!(device_pixels(800.0, 1.5), 1200);
        assert_eq!(device_pixels(333.0, 1.5), 500);
        assert_eq!(device_pixels(0.0, 1.5), 1, "never a zero-sized buffer");
    }

    #[test]
    fn duplicate_upload_is_released() {
        let (fresh, cached) = (TextureKey(9), TextureKey(3));
        assert_eq!(superseded(Some(fresh), Some(cached)), Some(fresh));
        assert_eq!(superseded(Some(fresh), None), Some(fresh), "stopped stream");
        assert_eq!(superseded(Some(fresh), Some(fresh)), None, "kept as uploaded");
        assert_eq!(superseded(None, Some(cached)), None, "failed loads upload nothing");
    }
}
