// Copyright 2026 the Ribbon Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! `IntersectionObserver` and idle-callback plumbing.

use alloc::boxed::Box;
use alloc::format;
use alloc::string::String;

use js_sys::{Array, Function, Object, Reflect};
use wasm_bindgen::closure::Closure;
use wasm_bindgen::prelude::*;
use web_sys::{Element, IntersectionObserver, IntersectionObserverEntry, IntersectionObserverInit};

use ribbon_core::time::Duration;

use crate::dom;
use crate::raf::request_animation_frame;

type ObserverClosure = Closure<dyn FnMut(Array, IntersectionObserver)>;

/// Watches one element and reports whether it intersects the viewport.
///
/// The observer is disconnected on [`disconnect`](Self::disconnect) or drop.
pub(crate) struct VisibilityObserver {
    observer: IntersectionObserver,
    _closure: ObserverClosure,
}

impl core::fmt::Debug for VisibilityObserver {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("VisibilityObserver").finish_non_exhaustive()
    }
}

impl VisibilityObserver {
    /// Observes `target`. `on_change` receives `isIntersecting` for every
    /// entry the observer reports.
    pub(crate) fn new(
        target: &Element,
        root_margin: &str,
        threshold: f64,
        mut on_change: impl FnMut(bool) + 'static,
    ) -> Result<Self, JsValue> {
        let closure = Closure::wrap(Box::new(move |entries: Array, _: IntersectionObserver| {
            for entry in entries.iter() {
                if let Ok(entry) = entry.dyn_into::<IntersectionObserverEntry>() {
                    on_change(entry.is_intersecting());
                }
            }
        }) as Box<dyn FnMut(Array, IntersectionObserver)>);

        let init = IntersectionObserverInit::new();
        init.set_root_margin(root_margin);
        init.set_threshold(&JsValue::from_f64(threshold));
        let observer =
            IntersectionObserver::new_with_options(closure.as_ref().unchecked_ref(), &init)?;
        observer.observe(target);
        Ok(Self {
            observer,
            _closure: closure,
        })
    }

    /// Stops observing.
    pub(crate) fn disconnect(&self) {
        self.observer.disconnect();
    }
}

impl Drop for VisibilityObserver {
    fn drop(&mut self) {
        self.disconnect();
    }
}

/// Formats a vertical-only root margin, e.g. `"300px 0px"`.
pub(crate) fn vertical_margin(px: u32) -> String {
    format!("{px}px 0px")
}

/// Runs `callback` once during an idle period, or after `timeout` at the
/// latest. Falls back to the next animation frame when idle callbacks are
/// unavailable.
pub(crate) fn request_idle(callback: impl FnOnce() + 'static, timeout: Duration) {
    let closure = Closure::once_into_js(callback);
    if let Ok(window) = dom::window()
        && let Ok(idle) = Reflect::get(&window, &JsValue::from_str("requestIdleCallback"))
        && let Ok(idle) = idle.dyn_into::<Function>()
    {
        let options = Object::new();
        let _ = Reflect::set(
            &options,
            &JsValue::from_str("timeout"),
            &JsValue::from_f64(timeout.as_millis_f64()),
        );
        if idle.call2(&window, &closure, &options).is_ok() {
            return;
        }
    }
    request_animation_frame(&closure);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn margin_is_vertical_only() {
        assert_eq!(vertical_margin(300), "300px 0px");
    }
}
