// Copyright 2026 the Ribbon Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! DOM helpers: feature probes, device queries and removable listeners.

use alloc::boxed::Box;
use alloc::vec::Vec;

use js_sys::Reflect;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::prelude::*;
use web_sys::{Document, Event, EventTarget, Window};

use ribbon_core::config::DeviceClass;

/// Returns the global `Window`.
pub(crate) fn window() -> Result<Window, JsValue> {
    web_sys::window().ok_or_else(|| JsValue::from_str("no global window"))
}

/// Returns the window's `Document`.
pub(crate) fn document() -> Result<Document, JsValue> {
    window()?
        .document()
        .ok_or_else(|| JsValue::from_str("window has no document"))
}

/// Returns `true` if the global object has a property named `name`.
pub(crate) fn has_global(name: &str) -> bool {
    web_sys::window()
        .and_then(|w| Reflect::has(&w, &JsValue::from_str(name)).ok())
        .unwrap_or(false)
}

/// Returns `true` when the browser delivers pointer events.
#[must_use]
pub fn has_pointer_events() -> bool {
    has_global("PointerEvent")
}

/// Returns `true` when `IntersectionObserver` is available.
#[must_use]
pub fn has_intersection_observer() -> bool {
    has_global("IntersectionObserver")
}

/// Classifies the primary pointer with `(pointer: coarse)`.
#[must_use]
pub fn device_class() -> DeviceClass {
    let coarse = web_sys::window()
        .and_then(|w| w.match_media("(pointer: coarse)").ok().flatten())
        .is_some_and(|query| query.matches());
    if coarse {
        DeviceClass::Coarse
    } else {
        DeviceClass::Fine
    }
}

/// Returns `devicePixelRatio`, at least 1 and at most `cap`.
#[must_use]
pub fn device_pixel_ratio(cap: f64) -> f64 {
    let dpr = web_sys::window().map_or(1.0, |w| w.device_pixel_ratio());
    clamp_dpr(dpr, cap)
}

pub(crate) fn clamp_dpr(dpr: f64, cap: f64) -> f64 {
    if dpr.is_finite() && dpr > 0.0 {
        dpr.clamp(1.0_f64.min(cap), cap)
    } else {
        1.0
    }
}

type ListenerClosure = Closure<dyn FnMut(Event)>;

/// Event listeners that are removed when the set is cleared or dropped.
#[derive(Default)]
pub(crate) struct EventListeners {
    entries: Vec<(EventTarget, &'static str, ListenerClosure)>,
}

impl core::fmt::Debug for EventListeners {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("EventListeners")
            .field("count", &self.entries.len())
            .finish()
    }
}

impl EventListeners {
    /// Adds `handler` for `kind` events on `target`.
    pub(crate) fn add(
        &mut self,
        target: &EventTarget,
        kind: &'static str,
        handler: impl FnMut(Event) + 'static,
    ) -> Result<(), JsValue> {
        let closure = Closure::wrap(Box::new(handler) as Box<dyn FnMut(Event)>);
        target.add_event_listener_with_callback(kind, closure.as_ref().unchecked_ref())?;
        self.entries.push((target.clone(), kind, closure));
        Ok(())
    }

    /// Removes every listener.
    pub(crate) fn clear(&mut self) {
        for (target, kind, closure) in self.entries.drain(..) {
            let _ =
                target.remove_event_listener_with_callback(kind, closure.as_ref().unchecked_ref());
        }
    }
}

impl Drop for EventListeners {
    fn drop(&mut self) {
        self.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dpr_is_capped() {
        assert_eq!(clamp_dpr(3.0, 1.5), 1.5);
        assert_eq!(clamp_dpr(1.25, 1.5), 1.25);
    }

    #[test]
    fn dpr_floor_is_one() {
        assert_eq!(clamp_dpr(0.5, 1.5), 1.0);
        assert_eq!(clamp_dpr(f64::NAN, 1.5), 1.0);
        assert_eq!(clamp_dpr(0.0, 1.5), 1.0);
    }
}
