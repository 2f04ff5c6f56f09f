// Copyright 2026 the Ribbon Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Texture streaming: deduplicated, bounded, cancellable image loads.
//!
//! [`TextureStream`] owns the cache of every texture the gallery has asked
//! for, keyed by image source. Loading itself is delegated to an
//! [`ImageLoader`] supplied by the backend; the loader starts work in
//! [`begin`](ImageLoader::begin) and the backend reports the outcome later
//! through [`TextureStream::complete`].
//!
//! Policy:
//!
//! - The first [`StreamPolicy::eager`] unique sources are requested as soon
//!   as the stream starts.
//! - Once the eager batch has settled, the rest are requested by
//!   [`pump`](TextureStream::pump), which never lets more than
//!   [`StreamPolicy::concurrency`] loads be in flight.
//! - Each completion raises a pump request; the owner honours it from its
//!   next frame callback, so loads never start from inside a completion.
//! - A failed load resolves to the loader's fallback texture and is cached
//!   like any other result.
//! - After [`destroy`](TextureStream::destroy) every entry point is inert.

use alloc::collections::{BTreeMap, VecDeque};
use alloc::string::String;
use alloc::vec::Vec;
use core::fmt;

/// Longest side, in pixels, a texture is uploaded at.
pub const MAX_TEXTURE_DIMENSION: u32 = 1280;

/// Scales `width × height` down so that neither side exceeds `max`, keeping
/// the aspect ratio. Sizes already within bounds are returned unchanged.
///
/// Each side of the result is at least 1.
#[must_use]
pub fn fit_within(width: u32, height: u32, max: u32) -> (u32, u32) {
    let (width, height) = (width.max(1), height.max(1));
    let longest = width.max(height);
    if longest <= max || max == 0 {
        return (width, height);
    }
    let scale = f64::from(max) / f64::from(longest);
    let fit = |side: u32| {
        #[expect(
            clippy::cast_possible_truncation,
            clippy::cast_sign_loss,
            reason = "scaled side is positive and no larger than the input"
        )]
        let scaled = (f64::from(side) * scale + 0.5) as u32;
        scaled.clamp(1, max)
    };
    (fit(width), fit(height))
}

/// Why a texture load failed.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum LoadError {
    /// The image could not be fetched.
    Fetch(String),
    /// The image was fetched but could not be decoded.
    Decode(String),
    /// The decoded image could not be uploaded to the GPU.
    Upload,
}

impl fmt::Display for LoadError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Fetch(source) => write!(f, "failed to fetch image {source}"),
            Self::Decode(source) => write!(f, "failed to decode image {source}"),
            Self::Upload => f.write_str("failed to upload texture"),
        }
    }
}

impl core::error::Error for LoadError {}

/// A texture the stream has settled on.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Texture<H> {
    /// Backend handle.
    pub handle: H,
    /// Uploaded size in pixels.
    pub width: u32,
    /// Uploaded size in pixels.
    pub height: u32,
    /// Whether this is the fallback for a failed load.
    pub is_fallback: bool,
}

/// Result of [`TextureStream::request`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum TextureRequest<H> {
    /// The texture is cached.
    Ready(Texture<H>),
    /// A load is in flight (possibly started by this call).
    Pending,
}

/// Starts image loads on behalf of a [`TextureStream`].
pub trait ImageLoader {
    /// Backend texture handle.
    type Handle: Clone;

    /// Starts loading `source`. The outcome is reported to
    /// [`TextureStream::complete`] later.
    fn begin(&mut self, source: &str);

    /// Returns the texture used when a load fails.
    fn fallback(&mut self) -> Texture<Self::Handle>;
}

/// Eager batch size and concurrency bound.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct StreamPolicy {
    /// Sources requested immediately on start.
    pub eager: usize,
    /// Upper bound on in-flight loads once pumping.
    pub concurrency: usize,
}

impl StreamPolicy {
    /// Browser defaults: 5 eager, 3 concurrent.
    #[must_use]
    pub const fn web() -> Self {
        Self {
            eager: 5,
            concurrency: 3,
        }
    }
}

impl Default for StreamPolicy {
    fn default() -> Self {
        Self::web()
    }
}

#[derive(Clone, Debug)]
enum Entry<H> {
    Pending,
    Ready(Texture<H>),
}

/// Deduplicating texture cache with an eager batch and a bounded pump.
#[derive(Debug)]
pub struct TextureStream<H> {
    policy: StreamPolicy,
    cache: BTreeMap<String, Entry<H>>,
    eager: Vec<String>,
    queue: VecDeque<String>,
    in_flight: usize,
    pump_requested: bool,
    destroyed: bool,
}

impl<H: Clone> TextureStream<H> {
    /// Creates a stream over `sources`, deduplicated in first-appearance
    /// order. Nothing is loaded until [`start`](Self::start).
    #[must_use]
    pub fn new<'s>(sources: impl IntoIterator<Item = &'s str>, policy: StreamPolicy) -> Self {
        let mut unique: Vec<String> = Vec::new();
        for source in sources {
            if !unique.iter().any(|s| s == source) {
                unique.push(String::from(source));
            }
        }
        let split = policy.eager.min(unique.len());
        let queue: VecDeque<String> = unique.split_off(split).into();
        Self {
            policy,
            cache: BTreeMap::new(),
            eager: unique,
            queue,
            in_flight: 0,
            pump_requested: false,
            destroyed: false,
        }
    }

    /// Requests the eager batch.
    pub fn start<L: ImageLoader<Handle = H>>(&mut self, loader: &mut L) {
        let eager = core::mem::take(&mut self.eager);
        for source in &eager {
            let _ = self.request(source, loader);
        }
        self.eager = eager;
    }

    /// Returns the cached texture for `source`, starting a load if none is
    /// cached or in flight.
    pub fn request<L: ImageLoader<Handle = H>>(
        &mut self,
        source: &str,
        loader: &mut L,
    ) -> TextureRequest<H> {
        if self.destroyed {
            return TextureRequest::Pending;
        }
        match self.cache.get(source) {
            Some(Entry::Ready(texture)) => TextureRequest::Ready(texture.clone()),
            Some(Entry::Pending) => TextureRequest::Pending,
            None => {
                self.cache.insert(String::from(source), Entry::Pending);
                self.in_flight += 1;
                loader.begin(source);
                TextureRequest::Pending
            }
        }
    }

    /// Records the outcome of a load and returns the texture to apply to
    /// every slot showing `source`.
    ///
    /// Returns `None` after destroy, or when `source` was never requested.
    pub fn complete<L: ImageLoader<Handle = H>>(
        &mut self,
        source: &str,
        result: Result<Texture<H>, LoadError>,
        loader: &mut L,
    ) -> Option<Texture<H>> {
        if self.destroyed {
            return None;
        }
        let entry = self.cache.get_mut(source)?;
        if let Entry::Ready(texture) = entry {
            return Some(texture.clone());
        }
        let texture = match result {
            Ok(texture) => texture,
            Err(_) => loader.fallback(),
        };
        *entry = Entry::Ready(texture.clone());
        self.in_flight = self.in_flight.saturating_sub(1);
        self.pump_requested = true;
        Some(texture)
    }

    /// Starts queued loads until the concurrency bound is reached. Does
    /// nothing until the eager batch has settled.
    ///
    /// Returns the number of loads started.
    pub fn pump<L: ImageLoader<Handle = H>>(&mut self, loader: &mut L) -> usize {
        self.pump_requested = false;
        if !self.eager_settled() {
            return 0;
        }
        let before = self.in_flight;
        while !self.destroyed && self.in_flight < self.policy.concurrency {
            let Some(source) = self.queue.pop_front() else {
                break;
            };
            let _ = self.request(&source, loader);
        }
        self.in_flight - before
    }

    /// Returns and clears the pending pump request.
    pub fn take_pump_request(&mut self) -> bool {
        core::mem::take(&mut self.pump_requested)
    }

    /// Returns `true` once every eager source has settled.
    #[must_use]
    pub fn eager_settled(&self) -> bool {
        self.eager
            .iter()
            .all(|source| matches!(self.cache.get(source), Some(Entry::Ready(_))))
    }

    /// Returns the cached texture for `source`, if settled.
    #[must_use]
    pub fn cached(&self, source: &str) -> Option<&Texture<H>> {
        match self.cache.get(source) {
            Some(Entry::Ready(texture)) => Some(texture),
            _ => None,
        }
    }

    /// Returns the number of loads in flight.
    #[must_use]
    pub fn in_flight(&self) -> usize {
        self.in_flight
    }

    /// Returns the number of sources still waiting for the pump.
    #[must_use]
    pub fn queued(&self) -> usize {
        self.queue.len()
    }

    /// Returns `true` after [`destroy`](Self::destroy).
    #[must_use]
    pub fn is_destroyed(&self) -> bool {
        self.destroyed
    }

    /// Drops the cache and makes every later call inert.
    ///
    /// Returns the cached handles so the backend can release them.
    pub fn destroy(&mut self) -> Vec<H> {
        self.destroyed = true;
        self.queue.clear();
        self.eager.clear();
        self.in_flight = 0;
        self.pump_requested = false;
        core::mem::take(&mut self.cache)
            .into_values()
            .filter_map(|entry| match entry {
                Entry::Ready(texture) => Some(texture.handle),
                Entry::Pending => None,
            })
            .collect()
    }
}
