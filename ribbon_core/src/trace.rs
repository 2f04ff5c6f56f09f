// Copyright 2026 the Ribbon Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Tracing and diagnostics for the gallery and reveal loops.
//!
//! This module provides a [`TraceSink`] trait with per-event methods that the
//! frame path calls at interesting points. All method bodies default to
//! no-ops, so implementing only the events you care about is fine.
//!
//! [`Tracer`] wraps an optional `&mut dyn TraceSink`. When the `trace` feature
//! is **off**, every `Tracer` method compiles to nothing (zero overhead). When
//! **on**, each method performs a single `Option` branch before dispatching.

use crate::scroll::Direction;
use crate::time::HostTime;

// ---------------------------------------------------------------------------
// Event structs
// ---------------------------------------------------------------------------

/// Emitted once per gallery frame that did work.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FrameEvent {
    /// Monotonic frame counter.
    pub frame_index: u64,
    /// Host time of the frame callback.
    pub now: HostTime,
    /// Scroll position after the physics tick.
    pub current: f64,
    /// Scroll target after autoscroll.
    pub target: f64,
    /// Direction of travel this frame.
    pub direction: Direction,
    /// Whether a draw plan was produced.
    pub drew: bool,
}

/// Emitted when a slot jumps across the ribbon.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct WrapEvent {
    /// Slot index in the doubled list.
    pub slot: usize,
    /// Signed jump applied to the wrap accumulator.
    pub delta: f64,
    /// Wrap accumulator after the jump.
    pub wrap: f64,
}

/// What happened to a texture source.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum TextureEventKind {
    /// A load was started.
    Requested,
    /// The image decoded and was uploaded.
    Ready,
    /// The load failed; the fallback texture is used.
    Fallback,
}

/// Emitted as textures move through the stream.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TextureEvent<'a> {
    /// Image source.
    pub source: &'a str,
    /// Transition.
    pub kind: TextureEventKind,
}

/// Stage of a drag session.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum DragPhase {
    /// Press.
    Start,
    /// Movement while pressed.
    Move,
    /// Release or cancellation.
    End,
}

/// Emitted for every drag action the input router produces.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DragEvent {
    /// Stage of the drag.
    pub phase: DragPhase,
    /// Horizontal client coordinate.
    pub x: f64,
    /// Whether the session came from a touch source.
    pub is_touch: bool,
}

/// Phase of a scramble-reveal text.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum RevealPhase {
    /// Showing the original text, not animating.
    Idle,
    /// Animating.
    Scrambling,
    /// Finished; showing the original text.
    Revealed,
}

/// Emitted when a reveal changes phase.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RevealEvent {
    /// Host time of the transition.
    pub now: HostTime,
    /// New phase.
    pub phase: RevealPhase,
    /// Number of revealed positions.
    pub revealed: usize,
    /// Text length in characters.
    pub len: usize,
}

// ---------------------------------------------------------------------------
// TraceSink trait
// ---------------------------------------------------------------------------

/// Receives trace events from the gallery and reveal loops.
///
/// All methods have default no-op implementations, so you only need to
/// override the events you care about.
pub trait TraceSink {
    /// Called after a gallery frame.
    fn on_frame(&mut self, e: &FrameEvent) {
        _ = e;
    }

    /// Called when a slot wraps.
    fn on_wrap(&mut self, e: &WrapEvent) {
        _ = e;
    }

    /// Called on texture transitions.
    fn on_texture(&mut self, e: &TextureEvent<'_>) {
        _ = e;
    }

    /// Called on drag actions.
    fn on_drag(&mut self, e: &DragEvent) {
        _ = e;
    }

    /// Called on reveal phase changes.
    fn on_reveal(&mut self, e: &RevealEvent) {
        _ = e;
    }
}

// ---------------------------------------------------------------------------
// NoopSink
// ---------------------------------------------------------------------------

/// A [`TraceSink`] that discards all events.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoopSink;

impl TraceSink for NoopSink {}

// ---------------------------------------------------------------------------
// Tracer wrapper
// ---------------------------------------------------------------------------

/// Thin wrapper around an optional [`TraceSink`].
///
/// When the `trace` feature is **off**, every method compiles to nothing. When
/// **on**, each method checks the inner `Option` (one branch) before
/// dispatching to the sink.
pub struct Tracer<'a> {
    #[cfg(feature = "trace")]
    sink: Option<&'a mut dyn TraceSink>,
    #[cfg(not(feature = "trace"))]
    _marker: core::marker::PhantomData<&'a mut dyn TraceSink>,
}

impl core::fmt::Debug for Tracer<'_> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Tracer").finish_non_exhaustive()
    }
}

impl<'a> Tracer<'a> {
    /// Creates a tracer that dispatches to the given sink.
    #[inline]
    #[must_use]
    pub fn new(sink: &'a mut dyn TraceSink) -> Self {
        #[cfg(feature = "trace")]
        {
            Self { sink: Some(sink) }
        }
        #[cfg(not(feature = "trace"))]
        {
            _ = sink;
            Self {
                _marker: core::marker::PhantomData,
            }
        }
    }

    /// Creates a tracer that discards all events.
    #[inline]
    #[must_use]
    pub fn none() -> Self {
        #[cfg(feature = "trace")]
        {
            Self { sink: None }
        }
        #[cfg(not(feature = "trace"))]
        {
            Self {
                _marker: core::marker::PhantomData,
            }
        }
    }

    /// Emits a [`FrameEvent`].
    #[inline]
    pub fn frame(&mut self, e: &FrameEvent) {
        #[cfg(feature = "trace")]
        if let Some(s) = &mut self.sink {
            s.on_frame(e);
        }
        #[cfg(not(feature = "trace"))]
        {
            _ = e;
        }
    }

    /// Emits a [`WrapEvent`].
    #[inline]
    pub fn wrap(&mut self, e: &WrapEvent) {
        #[cfg(feature = "trace")]
        if let Some(s) = &mut self.sink {
            s.on_wrap(e);
        }
        #[cfg(not(feature = "trace"))]
        {
            _ = e;
        }
    }

    /// Emits a [`TextureEvent`].
    #[inline]
    pub fn texture(&mut self, e: &TextureEvent<'_>) {
        #[cfg(feature = "trace")]
        if let Some(s) = &mut self.sink {
            s.on_texture(e);
        }
        #[cfg(not(feature = "trace"))]
        {
            _ = e;
        }
    }

    /// Emits a [`DragEvent`].
    #[inline]
    pub fn drag(&mut self, e: &DragEvent) {
        #[cfg(feature = "trace")]
        if let Some(s) = &mut self.sink {
            s.on_drag(e);
        }
        #[cfg(not(feature = "trace"))]
        {
            _ = e;
        }
    }

    /// Emits a [`RevealEvent`].
    #[inline]
    pub fn reveal(&mut self, e: &RevealEvent) {
        #[cfg(feature = "trace")]
        if let Some(s) = &mut self.sink {
            s.on_reveal(e);
        }
        #[cfg(not(feature = "trace"))]
        {
            _ = e;
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
