// Copyright 2026 the Ribbon Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! JSON-lines trace output.
//!
//! [`JsonLinesSink`] writes every event as one JSON object on its own line.
//! Each object carries a `"kind"` tag; times are in microseconds.

use std::io::Write;

use serde_json::{Value, json};

use ribbon_core::trace::{DragEvent, FrameEvent, RevealEvent, TextureEvent, TraceSink, WrapEvent};

/// Writes one JSON object per event to a [`Write`](std::io::Write) destination.
pub struct JsonLinesSink<W: Write> {
    writer: W,
    written: u64,
}

impl<W: Write> std::fmt::Debug for JsonLinesSink<W> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JsonLinesSink")
            .field("written", &self.written)
            .finish_non_exhaustive()
    }
}

impl<W: Write> JsonLinesSink<W> {
    /// Creates a sink that writes to the given destination.
    #[must_use]
    pub fn new(writer: W) -> Self {
        Self { writer, written: 0 }
    }

    /// Number of lines written successfully.
    #[must_use]
    pub fn written(&self) -> u64 {
        self.written
    }

    /// Consumes the sink and returns its writer.
    pub fn into_inner(self) -> W {
        self.writer
    }

    fn emit(&mut self, value: &Value) {
        if serde_json::to_writer(&mut self.writer, value).is_ok()
            && self.writer.write_all(b"\n").is_ok()
        {
            self.written += 1;
        }
    }
}

impl<W: Write> TraceSink for JsonLinesSink<W> {
    fn on_frame(&mut self, e: &FrameEvent) {
        self.emit(&json!({
            "kind": "frame",
            "frame_index": e.frame_index,
            "now_us": e.now.micros(),
            "current": e.current,
            "target": e.target,
            "direction": format!("{:?}", e.direction),
            "drew": e.drew,
        }));
    }

    fn on_wrap(&mut self, e: &WrapEvent) {
        self.emit(&json!({
            "kind": "wrap",
            "slot": e.slot,
            "delta": e.delta,
            "wrap": e.wrap,
        }));
    }

    fn on_texture(&mut self, e: &TextureEvent<'_>) {
        self.emit(&json!({
            "kind": "texture",
            "source": e.source,
            "event": format!("{:?}", e.kind),
        }));
    }

    fn on_drag(&mut self, e: &DragEvent) {
        self.emit(&json!({
            "kind": "drag",
            "phase": format!("{:?}", e.phase),
            "x": e.x,
            "is_touch": e.is_touch,
        }));
    }

    fn on_reveal(&mut self, e: &RevealEvent) {
        self.emit(&json!({
            "kind": "reveal",
            "now_us": e.now.micros(),
            "phase": format!("{:?}", e.phase),
            "revealed": e.revealed,
            "len": e.len,
        }));
    }
}
