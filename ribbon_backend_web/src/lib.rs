// Copyright 2026 the Ribbon Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Web backend for the ribbon gallery.
//!
//! This crate binds `ribbon_core` to browser APIs:
//!
//! - [`RafLoop`]: `requestAnimationFrame` tick source
//! - [`PlaneRenderer`]: WebGL2 drawing of a [`GalleryPlan`](ribbon_render::GalleryPlan)
//! - [`WebImageLoader`]: `HTMLImageElement` loads for the texture stream
//! - [`CircularGallery`]: the lazily mounted gallery component
//! - [`DecryptedText`]: the scramble-reveal text component
//!
//! Pointer, mouse, touch and wheel events are normalized into
//! [`InputEvent`](ribbon_core::input::InputEvent)s before they reach the
//! gallery. Which family is listened to is decided once per mount from
//! [`has_pointer_events`].

#![no_std]

extern crate alloc;

mod caption;
mod dom;
mod gallery;
mod gl;
mod input;
mod loader;
mod raf;
mod text;
mod visibility;

pub use dom::{device_class, device_pixel_ratio, has_intersection_observer, has_pointer_events};
pub use gallery::{CircularGallery, MAX_DEVICE_PIXEL_RATIO};
pub use gl::PlaneRenderer;
pub use loader::WebImageLoader;
pub use raf::RafLoop;
pub use text::{DecryptedText, SharedStagger, TextClasses, shared_stagger};

use ribbon_core::time::HostTime;

/// Returns the current host time from `performance.now()`.
///
/// The returned [`HostTime`] is in microsecond ticks.
#[must_use]
pub fn now() -> HostTime {
    HostTime::from_millis_f64(raf::performance_now())
}
