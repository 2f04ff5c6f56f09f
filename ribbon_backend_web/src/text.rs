// Copyright 2026 the Ribbon Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Scramble-reveal text component.
//!
//! Renders as
//!
//! ```html
//! <span class="whitespace-pre-wrap {parent}">
//!   <span class="sr-only">TEXT</span>
//!   <span aria-hidden="true"><span class="{class}">T</span>…</span>
//! </span>
//! ```
//!
//! Characters that are still scrambling carry the encrypted class instead.
//!
//! A text only runs a frame loop while its reveal has a tick or a staggered
//! trigger scheduled. Idle and revealed texts cost nothing per frame.

use alloc::boxed::Box;
use alloc::format;
use alloc::rc::{Rc, Weak};
use alloc::string::String;
use alloc::vec::Vec;
use core::cell::RefCell;

use rand::SeedableRng;
use rand::rngs::SmallRng;
use wasm_bindgen::prelude::*;
use web_sys::{Document, Element, EventTarget};

use ribbon_core::reveal::{AnimateOn, RevealConfig, Scramble};
use ribbon_core::stagger::StaggerCoordinator;
use ribbon_core::time::HostTime;
use ribbon_core::trace::{TraceSink, Tracer};

use crate::dom::{self, EventListeners};
use crate::now;
use crate::raf::RafLoop;
use crate::visibility::VisibilityObserver;

/// Fraction of the text that must be visible to count as in view.
const VIEW_THRESHOLD: f64 = 0.1;

/// CSS classes applied to the rendered spans.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct TextClasses {
    /// Classes for revealed characters.
    pub revealed: String,
    /// Classes for characters that are still scrambling.
    pub encrypted: String,
    /// Classes for the outer span.
    pub parent: String,
}

/// Shared stagger state for every reveal text on a page.
pub type SharedStagger = Rc<RefCell<StaggerCoordinator>>;

/// Creates a fresh [`SharedStagger`].
#[must_use]
pub fn shared_stagger() -> SharedStagger {
    Rc::new(RefCell::new(StaggerCoordinator::new()))
}

/// Class for one character span.
fn cell_class(classes: &TextClasses, is_final: bool) -> &str {
    if is_final {
        &classes.revealed
    } else {
        &classes.encrypted
    }
}

fn parent_class(parent: &str) -> String {
    format!("whitespace-pre-wrap {parent}").trim_end().into()
}

struct TextState {
    this: Weak<RefCell<TextState>>,
    scramble: Scramble<SmallRng>,
    stagger: SharedStagger,
    classes: TextClasses,
    document: Document,
    screen_reader: Element,
    glyphs: Element,
    cells: Vec<Element>,
    /// What each span currently shows; `None` until first written.
    rendered: Vec<Option<(char, bool)>>,
    frames: Option<RafLoop>,
    observer: Option<VisibilityObserver>,
    sink: Option<Box<dyn TraceSink>>,
}

impl TextState {
    fn with_tracer<T>(&mut self, f: impl FnOnce(&mut Self, &mut Tracer<'_>) -> T) -> T {
        let mut sink = self.sink.take();
        let mut tracer = match sink.as_deref_mut() {
            Some(sink) => Tracer::new(sink),
            None => Tracer::none(),
        };
        let out = f(self, &mut tracer);
        self.sink = sink;
        out
    }

    fn frame(&mut self, now: HostTime) {
        self.with_tracer(|state, tracer| state.scramble.on_frame(now, tracer));
        self.render();
        if !self.scramble.needs_frames()
            && let Some(frames) = &self.frames
        {
            frames.stop();
        }
    }

    /// Starts a frame loop if the reveal has work scheduled and none runs.
    ///
    /// Never called from inside a frame, so replacing a stopped loop here
    /// does not drop a running closure.
    fn wake(&mut self) {
        if !self.scramble.needs_frames() || self.frames.as_ref().is_some_and(RafLoop::is_running)
        {
            return;
        }
        let this = Weak::clone(&self.this);
        let frames = RafLoop::new(move |tick| {
            if let Some(state) = this.upgrade()
                && let Ok(mut state) = state.try_borrow_mut()
            {
                state.frame(tick.now);
            }
        });
        frames.start();
        self.frames = Some(frames);
    }

    fn hover(&mut self, entered: bool) {
        let now = now();
        self.with_tracer(|state, tracer| {
            if entered {
                state.scramble.hover_enter(now, tracer);
            } else {
                state.scramble.hover_leave(now, tracer);
            }
        });
        self.render();
        self.wake();
    }

    fn visibility(&mut self, visible: bool) {
        let now = now();
        let stagger = Rc::clone(&self.stagger);
        self.with_tracer(|state, tracer| {
            let mut stagger = stagger.borrow_mut();
            state
                .scramble
                .visibility_changed(visible, now, &mut stagger, tracer);
        });
        if !self.scramble.wants_visibility()
            && let Some(observer) = &self.observer
        {
            // Possibly inside the observer's own callback; keep its closure.
            observer.disconnect();
        }
        self.render();
        self.wake();
    }

    /// Brings the DOM in line with the scramble's cells.
    fn render(&mut self) {
        let len = self.scramble.cells().count();
        if len != self.cells.len() {
            self.glyphs.set_text_content(None);
            self.cells.clear();
            for _ in 0..len {
                let Ok(span) = self.document.create_element("span") else {
                    break;
                };
                if self.glyphs.append_child(&span).is_err() {
                    break;
                }
                self.cells.push(span);
            }
            self.rendered.clear();
            self.rendered.resize(self.cells.len(), None);
        }
        let mut changed = false;
        let spans = self.cells.iter().zip(&mut self.rendered);
        for (cell, (span, shown)) in self.scramble.cells().zip(spans) {
            if *shown == Some(cell) {
                continue;
            }
            let (c, is_final) = cell;
            let mut buf = [0_u8; 4];
            span.set_text_content(Some(c.encode_utf8(&mut buf)));
            span.set_class_name(cell_class(&self.classes, is_final));
            *shown = Some(cell);
            changed = true;
        }
        if changed {
            self.screen_reader
                .set_text_content(Some(&self.scramble.text()));
        }
    }
}

/// A scramble-reveal text mounted into a parent element.
pub struct DecryptedText {
    root: Element,
    listeners: EventListeners,
    state: Rc<RefCell<TextState>>,
}

impl core::fmt::Debug for DecryptedText {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        let mut out = f.debug_struct("DecryptedText");
        if let Ok(state) = self.state.try_borrow() {
            out.field("phase", &state.scramble.phase())
                .field("frames", &state.frames)
                .field("observed", &state.observer.is_some());
        }
        out.finish_non_exhaustive()
    }
}

impl DecryptedText {
    /// Appends a reveal text showing `text` to `parent`.
    ///
    /// View-triggered texts share `stagger` so that texts entering view
    /// together cascade.
    pub fn mount(
        parent: &Element,
        text: &str,
        config: RevealConfig,
        classes: TextClasses,
        stagger: &SharedStagger,
    ) -> Result<Self, JsValue> {
        Self::mount_with_sink(parent, text, config, classes, stagger, None)
    }

    /// Like [`mount`](Self::mount), reporting reveal phase changes to `sink`.
    pub fn mount_traced(
        parent: &Element,
        text: &str,
        config: RevealConfig,
        classes: TextClasses,
        stagger: &SharedStagger,
        sink: Box<dyn TraceSink>,
    ) -> Result<Self, JsValue> {
        Self::mount_with_sink(parent, text, config, classes, stagger, Some(sink))
    }

    fn mount_with_sink(
        parent: &Element,
        text: &str,
        config: RevealConfig,
        classes: TextClasses,
        stagger: &SharedStagger,
        sink: Option<Box<dyn TraceSink>>,
    ) -> Result<Self, JsValue> {
        let document = dom::document()?;
        let root = document.create_element("span")?;
        root.set_class_name(&parent_class(&classes.parent));
        let screen_reader = document.create_element("span")?;
        screen_reader.set_class_name("sr-only");
        let glyphs = document.create_element("span")?;
        glyphs.set_attribute("aria-hidden", "true")?;
        root.append_child(&screen_reader)?;
        root.append_child(&glyphs)?;

        let animate_on = config.animate_on;
        let rng = SmallRng::seed_from_u64(js_sys::Math::random().to_bits());
        let state = Rc::new_cyclic(|this| {
            let mut state = TextState {
                this: Weak::clone(this),
                scramble: Scramble::new(text, config, rng),
                stagger: Rc::clone(stagger),
                classes,
                document,
                screen_reader,
                glyphs,
                cells: Vec::new(),
                rendered: Vec::new(),
                frames: None,
                observer: None,
                sink,
            };
            state.render();
            RefCell::new(state)
        });
        let wants_visibility = state.borrow().scramble.wants_visibility();
        parent.append_child(&root)?;

        let mut listeners = EventListeners::default();
        if matches!(animate_on, AnimateOn::Hover | AnimateOn::Both) {
            let target: &EventTarget = root.as_ref();
            for (kind, entered) in [("mouseenter", true), ("mouseleave", false)] {
                let state = Rc::clone(&state);
                listeners.add(target, kind, move |_| {
                    if let Ok(mut state) = state.try_borrow_mut() {
                        state.hover(entered);
                    }
                })?;
            }
        }

        if wants_visibility {
            if dom::has_intersection_observer() {
                let this = Rc::downgrade(&state);
                let observer =
                    VisibilityObserver::new(&root, "0px", VIEW_THRESHOLD, move |visible| {
                        if let Some(state) = this.upgrade()
                            && let Ok(mut state) = state.try_borrow_mut()
                        {
                            state.visibility(visible);
                        }
                    })?;
                state.borrow_mut().observer = Some(observer);
            } else {
                state.borrow_mut().visibility(true);
            }
        }

        Ok(Self {
            root,
            listeners,
            state,
        })
    }

    /// Stops the animation, removes listeners and detaches the text.
    /// Idempotent.
    pub fn unmount(&mut self) {
        self.listeners.clear();
        if let Ok(mut state) = self.state.try_borrow_mut() {
            if let Some(frames) = state.frames.take() {
                frames.stop();
            }
            if let Some(observer) = state.observer.take() {
                observer.disconnect();
            }
        }
        self.root.remove();
    }
}

impl Drop for DecryptedText {
    fn drop(&mut self) {
        self.unmount();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parent_class_has_no_trailing_space() {
        assert_eq!(parent_class(""), "whitespace-pre-wrap");
        assert_eq!(parent_class("block"), "whitespace-pre-wrap block");
    }

    #[test]
    fn cells_pick_class_by_finality() {
        let classes = TextClasses {
            revealed: "text-fg".into(),
            encrypted: "text-fg/40".into(),
            parent: String::new(),
        };
        assert_eq!(cell_class(&classes, true), "text-fg");
        assert_eq!(cell_class(&classes, false), "text-fg/40");
    }
}
