// Copyright 2026 the Ribbon Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Infinite ribbon layout.
//!
//! A [`Ribbon`] lays `N` gallery items out as `2N` slots in a horizontal
//! strip. Each frame every slot is placed at `base_offset − scroll − wrap`
//! and optionally bent along a circular arc. When a slot has scrolled fully
//! off one edge in the direction of travel, its `wrap` accumulator jumps by
//! the strip's total width so the slot reappears at the other end. Doubling
//! the list guarantees there is always a slot available to fill the seam.
//!
//! Units are world units of a perspective camera with a 45° vertical field
//! of view at distance 20 (see [`viewport_for_screen`]).

use alloc::vec::Vec;

use kurbo::Size;

use crate::config::{GalleryItem, items_or_placeholder};
use crate::scroll::Direction;
use crate::trace::{Tracer, WrapEvent};

/// Vertical field of view of the gallery camera, in degrees.
pub const CAMERA_FOV_DEGREES: f64 = 45.0;

/// Distance of the gallery camera from the ribbon plane.
pub const CAMERA_DISTANCE: f64 = 20.0;

/// World-unit gap between neighboring planes.
pub const SLOT_PADDING: f64 = 2.0;

/// Screen height, in CSS pixels, at which planes are drawn at their
/// reference size.
const REFERENCE_SCREEN_HEIGHT: f64 = 1500.0;
const REFERENCE_PLANE_WIDTH: f64 = 700.0;
const REFERENCE_PLANE_HEIGHT: f64 = 900.0;

/// Returns the world-space size visible at the ribbon plane for a container
/// of the given pixel size.
///
/// A degenerate screen (zero or negative height) yields [`Size::ZERO`].
#[must_use]
pub fn viewport_for_screen(screen: Size) -> Size {
    if !(screen.height > 0.0) || !(screen.width > 0.0) {
        return Size::ZERO;
    }
    let fov = CAMERA_FOV_DEGREES.to_radians();
    let height = 2.0 * libm::tan(fov / 2.0) * CAMERA_DISTANCE;
    let width = height * (screen.width / screen.height);
    Size::new(width, height)
}

/// Where a slot is drawn this frame.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Placement {
    /// Horizontal center in world units (0 is the middle of the viewport).
    pub x: f64,
    /// Vertical center in world units.
    pub y: f64,
    /// Rotation around the view axis, in radians.
    pub rotation_z: f64,
}

/// One rendered instance of a gallery item.
#[derive(Clone, Debug, PartialEq)]
pub struct RibbonSlot {
    /// Position in the doubled list.
    pub index: usize,
    /// Index of the item in the (undoubled) item list.
    pub item: usize,
    /// Horizontal offset before scrolling: `width × index`.
    pub base_offset: f64,
    /// Signed offset accumulated by wraparound jumps.
    pub wrap: f64,
    /// Plane size in world units.
    pub plane: Size,
    /// Slot stride: plane width plus padding.
    pub width: f64,
    /// The slot is fully past the leading (left) edge.
    pub is_before: bool,
    /// The slot is fully past the trailing (right) edge.
    pub is_after: bool,
    /// Position computed by the last [`Ribbon::reposition`].
    pub placement: Placement,
}

/// The doubled, wraparound-capable strip of gallery slots.
#[derive(Clone, Debug)]
pub struct Ribbon {
    items: Vec<GalleryItem>,
    slots: Vec<RibbonSlot>,
    bend: f64,
    screen: Size,
    viewport: Size,
    width: f64,
    total_width: f64,
}

impl Ribbon {
    /// Builds a ribbon for `items`, substituting the placeholder list when
    /// `items` is empty.
    ///
    /// Slots have zero size until [`layout`](Self::layout) is called.
    #[must_use]
    pub fn new(items: Vec<GalleryItem>, bend: f64) -> Self {
        let items = items_or_placeholder(items);
        let count = items.len();
        let slots = (0..count * 2)
            .map(|index| RibbonSlot {
                index,
                item: index % count,
                base_offset: 0.0,
                wrap: 0.0,
                plane: Size::ZERO,
                width: 0.0,
                is_before: false,
                is_after: false,
                placement: Placement::default(),
            })
            .collect();
        Self {
            items,
            slots,
            bend: if bend.is_finite() { bend } else { 0.0 },
            screen: Size::ZERO,
            viewport: Size::ZERO,
            width: 0.0,
            total_width: 0.0,
        }
    }

    /// Recomputes every slot's size and base offset for a container of
    /// `screen` pixels showing `viewport` world units.
    ///
    /// Wrap accumulators are kept; callers re-run
    /// [`reposition`](Self::reposition) afterwards.
    pub fn layout(&mut self, screen: Size, viewport: Size) {
        self.screen = screen;
        self.viewport = viewport;
        let plane = if screen.width > 0.0 && screen.height > 0.0 {
            let scale = screen.height / REFERENCE_SCREEN_HEIGHT;
            Size::new(
                viewport.width * (REFERENCE_PLANE_WIDTH * scale) / screen.width,
                viewport.height * (REFERENCE_PLANE_HEIGHT * scale) / screen.height,
            )
        } else {
            Size::ZERO
        };
        self.width = plane.width + SLOT_PADDING;
        self.total_width = self.width * self.slots.len() as f64;
        for slot in &mut self.slots {
            slot.plane = plane;
            slot.width = self.width;
            slot.base_offset = self.width * slot.index as f64;
        }
    }

    /// Places every slot for scroll position `current` and applies the
    /// wraparound rule for the given direction of travel.
    ///
    /// Returns the number of slots that wrapped.
    pub fn reposition(
        &mut self,
        current: f64,
        direction: Direction,
        tracer: &mut Tracer<'_>,
    ) -> usize {
        let half_viewport = self.viewport.width / 2.0;
        let mut wrapped = 0;
        for slot in &mut self.slots {
            let x = slot.base_offset - current - slot.wrap;
            let (y, rotation_z) = bend_offset(x, half_viewport, self.bend);
            slot.placement = Placement { x, y, rotation_z };

            let half_plane = slot.plane.width / 2.0;
            slot.is_before = x + half_plane < -half_viewport;
            slot.is_after = x - half_plane > half_viewport;

            let jump = match direction {
                Direction::Forward if slot.is_before => -self.total_width,
                Direction::Backward if slot.is_after => self.total_width,
                _ => continue,
            };
            slot.wrap += jump;
            slot.is_before = false;
            slot.is_after = false;
            wrapped += 1;
            tracer.wrap(&WrapEvent {
                slot: slot.index,
                delta: jump,
                wrap: slot.wrap,
            });
        }
        wrapped
    }

    /// Runs the wraparound rule in both directions so slots that start
    /// off-screen on either side are moved to the nearer end.
    pub fn prime(&mut self, current: f64, tracer: &mut Tracer<'_>) {
        self.reposition(current, Direction::Forward, tracer);
        self.reposition(current, Direction::Backward, tracer);
    }

    /// Snaps `target` to the nearest whole multiple of the slot stride,
    /// keeping its sign.
    #[must_use]
    pub fn settle_to_nearest_item(&self, target: f64) -> f64 {
        if !(self.width > 0.0) {
            return target;
        }
        let item = self.width * libm::round(target.abs() / self.width);
        if target < 0.0 { -item } else { item }
    }

    /// Returns the slot stride (plane width plus padding).
    #[must_use]
    pub fn item_width(&self) -> f64 {
        self.width
    }

    /// Returns `item_width × slot_count`.
    #[must_use]
    pub fn total_width(&self) -> f64 {
        self.total_width
    }

    /// Returns the configured bend.
    #[must_use]
    pub fn bend(&self) -> f64 {
        self.bend
    }

    /// Returns the last laid-out container size in pixels.
    #[must_use]
    pub fn screen(&self) -> Size {
        self.screen
    }

    /// Returns the last laid-out viewport size in world units.
    #[must_use]
    pub fn viewport(&self) -> Size {
        self.viewport
    }

    /// Returns the (undoubled) items.
    #[must_use]
    pub fn items(&self) -> &[GalleryItem] {
        &self.items
    }

    /// Returns all slots in doubled-list order.
    #[must_use]
    pub fn slots(&self) -> &[RibbonSlot] {
        &self.slots
    }

    /// Returns the item shown by a slot.
    #[must_use]
    pub fn item_for(&self, slot: &RibbonSlot) -> &GalleryItem {
        &self.items[slot.item]
    }

    /// Returns the indices of all slots showing `source`.
    pub fn slots_for_source<'a>(&'a self, source: &'a str) -> impl Iterator<Item = usize> + 'a {
        self.slots
            .iter()
            .filter(move |slot| self.items[slot.item].image == source)
            .map(|slot| slot.index)
    }

    /// Returns the distinct image sources in first-appearance order.
    #[must_use]
    pub fn unique_sources(&self) -> Vec<&str> {
        let mut sources: Vec<&str> = Vec::with_capacity(self.items.len());
        for item in &self.items {
            if !sources.contains(&item.image.as_str()) {
                sources.push(&item.image);
            }
        }
        sources
    }
}

/// Computes the vertical offset and rotation of a plane at horizontal
/// position `x` on an arc of curvature `bend`.
///
/// With `bend == 0` both are exactly zero.
#[must_use]
pub fn bend_offset(x: f64, half_viewport: f64, bend: f64) -> (f64, f64) {
    if bend == 0.0 || !(half_viewport > 0.0) {
        return (0.0, 0.0);
    }
    let b = bend.abs();
    let radius = (half_viewport * half_viewport + b * b) / (2.0 * b);
    let effective_x = x.abs().min(half_viewport);
    let arc = radius - libm::sqrt(radius * radius - effective_x * effective_x);
    let angle = libm::asin(effective_x / radius);
    let side = if x > 0.0 {
        1.0
    } else if x < 0.0 {
        -1.0
    } else {
        0.0
    };
    if bend > 0.0 {
        (-arc, -side * angle)
    } else {
        (arc, side * angle)
    }
}

/// Size and offset of a caption quad attached beneath a plane.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CaptionPlacement {
    /// Caption quad size in world units.
    pub size: Size,
    /// Vertical offset from the plane's center.
    pub offset_y: f64,
}

/// Places a caption whose rendered text has aspect ratio `text_aspect`
/// (width over height) beneath a plane of size `plane`.
#[must_use]
pub fn caption_placement(plane: Size, text_aspect: f64) -> CaptionPlacement {
    let height = plane.height * 0.15;
    let aspect = if text_aspect.is_finite() && text_aspect > 0.0 {
        text_aspect
    } else {
        1.0
    };
    CaptionPlacement {
        size: Size::new(height * aspect, height),
        offset_y: -plane.height * 0.5 - height * 0.5 - 0.05,
    }
}

/// Returns the UV scale that makes an image of size `image` cover a plane of
/// size `plane` without distortion, cropping the overflowing axis.
///
/// Both components are in `(0, 1]`; the UV is then centered with
/// `uv × ratio + (1 − ratio) / 2`.
#[must_use]
pub fn cover_uv_ratio(plane: Size, image: Size) -> (f64, f64) {
    let safe = |v: f64| if v > 0.0 && v.is_finite() { v } else { 1.0 };
    let (pw, ph) = (safe(plane.width), safe(plane.height));
    let (iw, ih) = (safe(image.width), safe(image.height));
    let x = ((pw / ph) / (iw / ih)).min(1.0);
    let y = ((ph / pw) / (ih / iw)).min(1.0);
    (x, y)
}
