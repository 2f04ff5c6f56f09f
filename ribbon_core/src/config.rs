// Copyright 2026 the Ribbon Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Gallery content and configuration.
//!
//! The host page supplies a list of [`GalleryItem`]s and a [`GalleryConfig`].
//! Both are plain values: nothing here is mutated once the gallery is built.

use alloc::string::String;
use alloc::vec::Vec;

/// One image in the gallery, with an optional caption.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct GalleryItem {
    /// Image URL or path.
    pub image: String,
    /// Caption drawn beneath the image. Empty means no caption.
    pub caption: String,
}

impl GalleryItem {
    /// Creates an item from an image source and a caption.
    #[must_use]
    pub fn new(image: impl Into<String>, caption: impl Into<String>) -> Self {
        Self {
            image: image.into(),
            caption: caption.into(),
        }
    }
}

const PLACEHOLDER_ITEMS: [(&str, &str); 12] = [
    ("https://picsum.photos/seed/1/800/600?grayscale", "Bridge"),
    ("https://picsum.photos/seed/2/800/600?grayscale", "Desk Setup"),
    ("https://picsum.photos/seed/3/800/600?grayscale", "Waterfall"),
    ("https://picsum.photos/seed/4/800/600?grayscale", "Strawberries"),
    ("https://picsum.photos/seed/5/800/600?grayscale", "Deep Diving"),
    ("https://picsum.photos/seed/16/800/600?grayscale", "Train Track"),
    ("https://picsum.photos/seed/17/800/600?grayscale", "Santorini"),
    ("https://picsum.photos/seed/8/800/600?grayscale", "Blurry Lights"),
    ("https://picsum.photos/seed/9/800/600?grayscale", "New York"),
    ("https://picsum.photos/seed/10/800/600?grayscale", "Good Boy"),
    ("https://picsum.photos/seed/21/800/600?grayscale", "Coastline"),
    ("https://picsum.photos/seed/12/800/600?grayscale", "Palm Trees"),
];

/// Returns the bundled placeholder list used when the host supplies no items.
#[must_use]
pub fn placeholder_items() -> Vec<GalleryItem> {
    PLACEHOLDER_ITEMS
        .iter()
        .map(|&(image, caption)| GalleryItem::new(image, caption))
        .collect()
}

/// Returns `items`, or the placeholder list if `items` is empty.
#[must_use]
pub fn items_or_placeholder(items: Vec<GalleryItem>) -> Vec<GalleryItem> {
    if items.is_empty() {
        placeholder_items()
    } else {
        items
    }
}

/// Visual and behavioral configuration for a gallery instance.
#[derive(Clone, Debug, PartialEq)]
pub struct GalleryConfig {
    /// Ribbon curvature. Zero lays items flat; the sign picks the arc side.
    pub bend: f64,
    /// CSS color of caption text.
    pub text_color: String,
    /// Corner radius in UV units (0.0–0.5).
    pub border_radius: f32,
    /// CSS font shorthand for captions.
    pub font: String,
    /// Drag and wheel sensitivity.
    pub scroll_speed: f64,
    /// Linear interpolation factor applied each frame, in `(0, 1]`.
    pub scroll_ease: f64,
    /// Whether wheel input over the container scrolls the ribbon.
    pub wheel_enabled: bool,
    /// Target increment added each frame while idle. Zero disables autoscroll.
    pub auto_scroll_speed: f64,
}

impl GalleryConfig {
    /// Default configuration, matching the component's documented defaults.
    #[must_use]
    pub fn new() -> Self {
        Self {
            bend: 3.0,
            text_color: String::from("#ffffff"),
            border_radius: 0.05,
            font: String::from("bold 30px Figtree"),
            scroll_speed: 2.0,
            scroll_ease: 0.05,
            wheel_enabled: false,
            auto_scroll_speed: 0.01,
        }
    }

    /// Returns the configuration tuned for the given device class.
    ///
    /// Coarse pointers (touch screens) autoscroll slower and ease faster so a
    /// short swipe still feels responsive.
    #[must_use]
    pub fn for_device(mut self, device: DeviceClass) -> Self {
        if device == DeviceClass::Coarse {
            self.auto_scroll_speed *= 0.6;
            self.scroll_ease = (self.scroll_ease * 1.2).min(0.12);
        }
        self
    }

    /// Returns the ease clamped into `(0, 1]`.
    ///
    /// Non-finite or non-positive values fall back to the default ease.
    #[must_use]
    pub fn effective_ease(&self) -> f64 {
        if self.scroll_ease.is_finite() && self.scroll_ease > 0.0 {
            self.scroll_ease.min(1.0)
        } else {
            Self::new().scroll_ease
        }
    }
}

impl Default for GalleryConfig {
    fn default() -> Self {
        Self::new()
    }
}

/// Primary pointing device class, as reported by `(pointer: coarse)`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum DeviceClass {
    /// Mouse, trackpad, or stylus.
    #[default]
    Fine,
    /// Touch screen.
    Coarse,
}
