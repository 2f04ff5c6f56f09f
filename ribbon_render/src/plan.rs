// Copyright 2026 the Ribbon Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Gallery plan: the planes and captions to draw for one frame.

use alloc::vec::Vec;

use kurbo::Size;
use ribbon_core::gallery::Gallery;
use ribbon_core::layout::{RibbonSlot, caption_placement, cover_uv_ratio};

use crate::camera::Camera;
use crate::resource::TextureKey;
use crate::transform::Transform3d;

/// A rendered caption for one gallery item.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CaptionTexture {
    /// Texture holding the rasterized caption text.
    pub key: TextureKey,
    /// Width over height of the caption texture.
    pub aspect: f64,
}

/// Caption quad attached beneath a plane.
#[derive(Clone, Debug, PartialEq)]
pub struct CaptionItem {
    /// Caption texture.
    pub texture: TextureKey,
    /// Model transform of the unit quad (column-major 4x4).
    pub world_transform: [f32; 16],
}

/// One textured plane.
#[derive(Clone, Debug, PartialEq)]
pub struct PlaneItem {
    /// Slot index in the doubled list.
    pub slot: usize,
    /// Index of the item shown.
    pub item: usize,
    /// Model transform of the unit plane (column-major 4x4).
    pub world_transform: [f32; 16],
    /// Texture to sample; `None` draws the placeholder.
    pub texture: Option<TextureKey>,
    /// Object-cover UV scale, see [`cover_uv_ratio`].
    pub uv_scale: [f32; 2],
    /// Caption, if the item has text and its texture exists.
    pub caption: Option<CaptionItem>,
}

/// The planes to draw for one frame, in slot order.
#[derive(Clone, Debug, Default)]
pub struct GalleryPlan {
    /// World-to-clip transform (column-major 4x4).
    pub view_projection: [f32; 16],
    /// Corner radius in UV units.
    pub border_radius: f32,
    /// Draw items.
    pub items: Vec<PlaneItem>,
}

impl GalleryPlan {
    /// Creates an empty plan.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Clears the plan for reuse.
    pub fn clear(&mut self) {
        self.items.clear();
    }

    /// Rebuilds the plan from the gallery's current layout.
    ///
    /// `captions` is indexed by item; missing entries draw no caption.
    pub fn build(
        &mut self,
        camera: &Camera,
        gallery: &Gallery<TextureKey>,
        captions: &[Option<CaptionTexture>],
    ) {
        self.clear();
        self.view_projection = camera.view_projection().to_f32_cols();
        self.border_radius = gallery.config().border_radius;

        for slot in gallery.ribbon().slots() {
            let texture = gallery.slot_texture(slot.index);
            let image = texture.map_or(Size::new(2.0, 2.0), |t| {
                Size::new(f64::from(t.width), f64::from(t.height))
            });
            let (u, v) = cover_uv_ratio(slot.plane, image);
            let caption = captions
                .get(slot.item)
                .copied()
                .flatten()
                .map(|c| caption_item(slot, c));
            self.items.push(PlaneItem {
                slot: slot.index,
                item: slot.item,
                world_transform: plane_transform(slot).to_f32_cols(),
                texture: texture.map(|t| t.handle),
                uv_scale: [narrow(u), narrow(v)],
                caption,
            });
        }
    }
}

/// Places the unit plane at the slot's position, rotation and size.
fn placement_transform(slot: &RibbonSlot) -> Transform3d {
    let p = slot.placement;
    Transform3d::from_translation(p.x, p.y, 0.0) * Transform3d::from_rotation_z(p.rotation_z)
}

fn plane_transform(slot: &RibbonSlot) -> Transform3d {
    placement_transform(slot) * Transform3d::from_scale(slot.plane.width, slot.plane.height, 1.0)
}

fn caption_item(slot: &RibbonSlot, caption: CaptionTexture) -> CaptionItem {
    let placed = caption_placement(slot.plane, caption.aspect);
    let transform = placement_transform(slot)
        * Transform3d::from_translation(0.0, placed.offset_y, 0.0)
        * Transform3d::from_scale(placed.size.width, placed.size.height, 1.0);
    CaptionItem {
        texture: caption.key,
        world_transform: transform.to_f32_cols(),
    }
}

#[expect(
    clippy::cast_possible_truncation,
    reason = "UV scales are in (0, 1]"
)]
fn narrow(v: f64) -> f32 {
    v as f32
}

#[cfg(test)]
mod tests {
    use alloc::format;
    use alloc::string::String;
    use alloc::vec;

    use ribbon_core::config::{DeviceClass, GalleryConfig, GalleryItem};
    use ribbon_core::gallery::HostEnvironment;
    use ribbon_core::input::InputMode;
    use ribbon_core::texture::{ImageLoader, Texture};
    use ribbon_core::trace::Tracer;

    use super::*;

    #[derive(Default)]
    struct KeyLoader {
        begun: Vec<String>,
    }

    impl ImageLoader for KeyLoader {
        type Handle = TextureKey;

        fn begin(&mut self, source: &str) {
            self.begun.push(String::from(source));
        }

        fn fallback(&mut self) -> Texture<TextureKey> {
            Texture {
                handle: TextureKey(0),
                width: 2,
                height: 2,
                is_fallback: true,
            }
        }
    }

    fn gallery(n: usize, bend: f64) -> (Gallery<TextureKey>, KeyLoader) {
        let items = (0..n)
            .map(|i| GalleryItem::new(format!("/img/{i}.jpeg"), format!("Piece {i}")))
            .collect();
        let config = GalleryConfig {
            bend,
            auto_scroll_speed: 0.0,
            ..GalleryConfig::default()
        };
        let env = HostEnvironment {
            screen: Size::new(1200.0, 600.0),
            device: DeviceClass::Fine,
            input_mode: InputMode::PointerEvents,
        };
        let mut gallery = Gallery::new(items, config, env);
        let mut loader = KeyLoader::default();
        assert!(gallery.start(&mut loader, &mut Tracer::none()));
        (gallery, loader)
    }

    fn camera() -> Camera {
        Camera::for_screen(Size::new(1200.0, 600.0))
    }

    #[test]
    fn one_item_per_slot() {
        let (g, _) = gallery(3, 0.0);
        let mut plan = GalleryPlan::new();
        plan.build(&camera(), &g, &[]);
        assert_eq!(plan.items.len(), 6);
        let items: Vec<usize> = plan.items.iter().map(|p| p.item).collect();
        assert_eq!(items, vec![0, 1, 2, 0, 1, 2]);
        assert!(plan.items.iter().all(|p| p.texture.is_none()), "placeholders");
        assert!(plan.items.iter().all(|p| p.caption.is_none()));
        assert_eq!(plan.border_radius, g.config().border_radius);
    }

    #[test]
    fn loaded_textures_reach_every_copy() {
        let (mut g, mut loader) = gallery(2, 0.0);
        let result = Ok(Texture {
            handle: TextureKey(9),
            width: 1280,
            height: 640,
            is_fallback: false,
        });
        g.texture_loaded("/img/1.jpeg", result, &mut loader, &mut Tracer::none());
        let mut plan = GalleryPlan::new();
        plan.build(&camera(), &g, &[]);
        let keyed: Vec<usize> = plan
            .items
            .iter()
            .filter(|p| p.texture == Some(TextureKey(9)))
            .map(|p| p.slot)
            .collect();
        assert_eq!(keyed, vec![1, 3]);
        let wide = &plan.items[1];
        assert_eq!(wide.uv_scale[1], 1.0, "a wider image crops horizontally");
        assert!(wide.uv_scale[0] < 1.0);
    }

    #[test]
    fn flat_plane_transform_is_translate_scale() {
        let (g, _) = gallery(3, 0.0);
        let mut plan = GalleryPlan::new();
        plan.build(&camera(), &g, &[]);
        let slot = &g.ribbon().slots()[1];
        let m = plan.items[1].world_transform;
        assert!((f64::from(m[0]) - slot.plane.width).abs() < 1e-4);
        assert!((f64::from(m[5]) - slot.plane.height).abs() < 1e-4);
        assert!((f64::from(m[12]) - slot.placement.x).abs() < 1e-4);
        assert_eq!(m[13], 0.0);
    }

    #[test]
    fn captions_hang_below_their_plane() {
        let (g, _) = gallery(2, 0.0);
        let captions = [
            Some(CaptionTexture {
                key: TextureKey(100),
                aspect: 4.0,
            }),
            None,
        ];
        let mut plan = GalleryPlan::new();
        plan.build(&camera(), &g, &captions);
        let with: Vec<usize> = plan
            .items
            .iter()
            .filter(|p| p.caption.is_some())
            .map(|p| p.slot)
            .collect();
        assert_eq!(with, vec![0, 2]);
        let Some(caption) = &plan.items[0].caption else {
            panic!("slot 0 has a caption");
        };
        let plane = g.ribbon().slots()[0].plane;
        assert_eq!(caption.texture, TextureKey(100));
        assert!(f64::from(caption.world_transform[13]) < -plane.height * 0.5);
        let height = f64::from(caption.world_transform[5]);
        assert!((f64::from(caption.world_transform[0]) - height * 4.0).abs() < 1e-4);
    }

    #[test]
    fn rebuild_replaces_items() {
        let (g, _) = gallery(2, 3.0);
        let mut plan = GalleryPlan::new();
        plan.build(&camera(), &g, &[]);
        plan.build(&camera(), &g, &[]);
        assert_eq!(plan.items.len(), 4);
        plan.clear();
        assert!(plan.items.is_empty());
    }
}
