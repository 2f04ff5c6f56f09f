// Copyright 2026 the Ribbon Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Human-readable trace output.
//!
//! [`PrettyPrintSink`] implements [`TraceSink`] and writes one line per event
//! to a [`Write`](std::io::Write) destination (default: stderr). Host times
//! are printed in milliseconds.

use std::io::Write;

use ribbon_core::scroll::Direction;
use ribbon_core::time::HostTime;
use ribbon_core::trace::{
    DragEvent, DragPhase, FrameEvent, RevealEvent, RevealPhase, TextureEvent, TextureEventKind,
    TraceSink, WrapEvent,
};

/// Writes human-readable trace lines to a [`Write`](std::io::Write) destination.
pub struct PrettyPrintSink<W: Write = Box<dyn Write>> {
    writer: W,
}

impl<W: Write> std::fmt::Debug for PrettyPrintSink<W> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PrettyPrintSink").finish_non_exhaustive()
    }
}

impl PrettyPrintSink {
    /// Creates a sink that writes to stderr.
    #[must_use]
    pub fn stderr() -> Self {
        Self {
            writer: Box::new(std::io::stderr()),
        }
    }

    /// Creates a sink that writes to a boxed writer.
    #[must_use]
    pub fn new(writer: Box<dyn Write>) -> Self {
        Self { writer }
    }
}

impl<W: Write> PrettyPrintSink<W> {
    /// Creates a sink that writes to the given destination.
    #[must_use]
    pub fn with_writer(writer: W) -> Self {
        Self { writer }
    }

    /// Consumes the sink and returns its writer.
    pub fn into_inner(self) -> W {
        self.writer
    }
}

fn ms(t: HostTime) -> f64 {
    t.micros() as f64 / 1000.0
}

fn direction_name(direction: Direction) -> &'static str {
    match direction {
        Direction::Forward => "fwd",
        Direction::Backward => "back",
    }
}

fn texture_name(kind: TextureEventKind) -> &'static str {
    match kind {
        TextureEventKind::Requested => "requested",
        TextureEventKind::Ready => "ready",
        TextureEventKind::Fallback => "FALLBACK",
    }
}

fn drag_name(phase: DragPhase) -> &'static str {
    match phase {
        DragPhase::Start => "start",
        DragPhase::Move => "move",
        DragPhase::End => "end",
    }
}

fn reveal_name(phase: RevealPhase) -> &'static str {
    match phase {
        RevealPhase::Idle => "idle",
        RevealPhase::Scrambling => "scrambling",
        RevealPhase::Revealed => "revealed",
    }
}

impl<W: Write> TraceSink for PrettyPrintSink<W> {
    fn on_frame(&mut self, e: &FrameEvent) {
        let drew = if e.drew { "draw" } else { "held" };
        let _ = writeln!(
            self.writer,
            "[frame] #{} at {:.1}ms current={:.4} target={:.4} {} {drew}",
            e.frame_index,
            ms(e.now),
            e.current,
            e.target,
            direction_name(e.direction),
        );
    }

    fn on_wrap(&mut self, e: &WrapEvent) {
        let _ = writeln!(
            self.writer,
            "[wrap] slot={} delta={:+.3} wrap={:.3}",
            e.slot, e.delta, e.wrap,
        );
    }

    fn on_texture(&mut self, e: &TextureEvent<'_>) {
        let _ = writeln!(
            self.writer,
            "[texture] {} {}",
            texture_name(e.kind),
            e.source,
        );
    }

    fn on_drag(&mut self, e: &DragEvent) {
        let source = if e.is_touch { "touch" } else { "pointer" };
        let _ = writeln!(
            self.writer,
            "[drag:{}] x={:.1} {source}",
            drag_name(e.phase),
            e.x,
        );
    }

    fn on_reveal(&mut self, e: &RevealEvent) {
        let _ = writeln!(
            self.writer,
            "[reveal] {} at {:.1}ms {}/{}",
            reveal_name(e.phase),
            ms(e.now),
            e.revealed,
            e.len,
        );
    }
}
