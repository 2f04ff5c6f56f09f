// Copyright 2026 the Ribbon Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Draw plans, camera projection and plane meshes for the ribbon gallery.
//!
//! This crate sits between [`ribbon_core`]'s gallery state and a
//! backend-specific renderer. It defines:
//!
//! - [`GalleryPlan`]: the planes and captions to draw for one frame
//! - [`Camera`]: the fixed 45° perspective camera at `z = 20`
//! - [`PlaneMesh`]: the subdivided unit plane every slot is drawn with
//! - [`TextureKey`]: opaque handle for backend-managed textures
//!
//! # Crate features
//!
//! - `std` (disabled by default): Enables `std` support in dependencies.

#![no_std]
#![cfg_attr(docsrs, feature(doc_cfg))]

extern crate alloc;

mod camera;
mod mesh;
mod plan;
mod resource;
mod transform;

pub use camera::{Camera, FAR, NEAR};
pub use mesh::{PLANE_HEIGHT_SEGMENTS, PLANE_WIDTH_SEGMENTS, PlaneMesh, PlaneVertex};
pub use plan::{CaptionItem, CaptionTexture, GalleryPlan, PlaneItem};
pub use resource::TextureKey;
pub use transform::Transform3d;
