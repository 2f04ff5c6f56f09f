// Copyright 2026 the Ribbon Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Platform-neutral state for an infinite circular image gallery and
//! scramble-reveal text.
//!
//! `ribbon_core` holds everything that can be decided without a browser:
//! scroll physics, ribbon layout, texture streaming policy, input routing,
//! frame pacing and the reveal scheduler. It is `no_std` compatible (with
//! `alloc`). Backends feed it timestamps, input and load outcomes, and draw
//! what it lays out.
//!
//! # Architecture
//!
//! ```text
//!   Backend (frame source, loader, listeners)
//!       │ InputEvent           │ load outcome
//!       ▼                      ▼
//!   InputRouter ──► ScrollState      TextureStream ──► slot textures
//!                       │
//!   Gallery::frame(now) ┴─► tick ──► Ribbon::reposition ──► FrameReport
//! ```
//!
//! **[`scroll`]**: Eased scroll position with a clamped target.
//!
//! **[`layout`]**: The doubled ribbon of slots, bend curve and wraparound.
//!
//! **[`texture`]**: Deduplicated texture cache with an eager batch and a
//! bounded pump.
//!
//! **[`input`]**: Tagged input events, normalization and the drag state
//! machine.
//!
//! **[`gallery`]**: Ties the above together behind one frame callback.
//!
//! **[`frame`]** and **[`timing`]**: Loop lifecycle, frame ticks and an
//! optional frame throttle.
//!
//! **[`reveal`]** and **[`stagger`]**: Scramble-reveal text and the
//! page-wide cascade coordinator.
//!
//! **[`mount`]**: Visibility-gated construction.
//!
//! **[`trace`]**: [`TraceSink`](trace::TraceSink) trait and event types,
//! with a zero-overhead [`Tracer`](trace::Tracer) wrapper.
//!
//! # Crate features
//!
//! - `std` (disabled by default): Enables `std` support in dependencies.
//! - `trace` (disabled by default): Enables `Tracer` method bodies (one branch
//!   per call site).

#![no_std]
#![cfg_attr(docsrs, feature(doc_cfg))]

extern crate alloc;

pub mod config;
pub mod frame;
pub mod gallery;
pub mod input;
pub mod layout;
pub mod mount;
pub mod reveal;
pub mod scroll;
pub mod stagger;
pub mod texture;
pub mod time;
pub mod timing;
pub mod trace;
