// Copyright 2026 the Ribbon Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Browser image loading for the texture stream.
//!
//! [`WebImageLoader::begin`] starts an `HTMLImageElement` load. Outcomes are
//! queued by the element's `load`/`error` handlers and drained on the next
//! frame, where the image is downscaled if needed and uploaded.

use alloc::boxed::Box;
use alloc::collections::{BTreeMap, VecDeque};
use alloc::rc::Rc;
use alloc::string::{String, ToString};
use alloc::vec::Vec;
use core::cell::RefCell;

use wasm_bindgen::closure::Closure;
use wasm_bindgen::prelude::*;
use web_sys::{Document, HtmlCanvasElement, HtmlImageElement};

use ribbon_core::texture::{ImageLoader, LoadError, MAX_TEXTURE_DIMENSION, Texture, fit_within};
use ribbon_render::TextureKey;

use crate::caption::context_2d;
use crate::gl::PlaneRenderer;

/// Whether a source needs `crossOrigin = "anonymous"` to be uploadable.
pub(crate) fn needs_cors(source: &str) -> bool {
    let scheme = source.split_once(':').map(|(s, _)| s);
    scheme.is_some_and(|s| s.eq_ignore_ascii_case("http") || s.eq_ignore_ascii_case("https"))
}

struct Pending {
    image: HtmlImageElement,
    _on_load: Closure<dyn FnMut()>,
    _on_error: Closure<dyn FnMut()>,
}

/// Loads gallery images with `HTMLImageElement`.
pub struct WebImageLoader {
    document: Document,
    pending: BTreeMap<String, Pending>,
    settled: Rc<RefCell<VecDeque<(String, bool)>>>,
    fallback: Texture<TextureKey>,
}

impl core::fmt::Debug for WebImageLoader {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("WebImageLoader")
            .field("pending", &self.pending.len())
            .field("fallback", &self.fallback)
            .finish_non_exhaustive()
    }
}

impl WebImageLoader {
    /// Creates a loader that substitutes `fallback` for failed loads.
    #[must_use]
    pub fn new(document: Document, fallback: Texture<TextureKey>) -> Self {
        Self {
            document,
            pending: BTreeMap::new(),
            settled: Rc::new(RefCell::new(VecDeque::new())),
            fallback,
        }
    }

    /// Number of loads started but not yet drained.
    #[must_use]
    pub fn in_flight(&self) -> usize {
        self.pending.len()
    }

    /// Uploads every load that settled since the last call.
    ///
    /// Returns `(source, outcome)` pairs in settlement order.
    pub fn drain(
        &mut self,
        renderer: &mut PlaneRenderer,
    ) -> Vec<(String, Result<Texture<TextureKey>, LoadError>)> {
        let settled: Vec<_> = self.settled.borrow_mut().drain(..).collect();
        let mut out = Vec::with_capacity(settled.len());
        for (source, loaded) in settled {
            let outcome = match self.pending.remove(&source) {
                Some(pending) if loaded => self.upload(&pending.image, renderer),
                _ => Err(LoadError::Fetch(source.clone())),
            };
            out.push((source, outcome));
        }
        out
    }

    /// Abandons every in-flight load.
    pub fn cancel_all(&mut self) {
        for pending in core::mem::take(&mut self.pending).into_values() {
            pending.image.set_onload(None);
            pending.image.set_onerror(None);
            pending.image.set_src("");
        }
        self.settled.borrow_mut().clear();
    }

    fn upload(
        &self,
        image: &HtmlImageElement,
        renderer: &mut PlaneRenderer,
    ) -> Result<Texture<TextureKey>, LoadError> {
        let (natural_w, natural_h) = (image.natural_width(), image.natural_height());
        if natural_w == 0 || natural_h == 0 {
            return Err(LoadError::Decode(image.src()));
        }
        let (width, height) = fit_within(natural_w, natural_h, MAX_TEXTURE_DIMENSION);
        let handle = if (width, height) == (natural_w, natural_h) {
            renderer.upload_image(image)
        } else {
            self.downscale(image, width, height)
                .and_then(|canvas| renderer.upload_canvas(&canvas))
        }
        .map_err(|_| LoadError::Upload)?;
        Ok(Texture {
            handle,
            width,
            height,
            is_fallback: false,
        })
    }

    fn downscale(
        &self,
        image: &HtmlImageElement,
        width: u32,
        height: u32,
    ) -> Result<HtmlCanvasElement, JsValue> {
        let canvas: HtmlCanvasElement = self.document.create_element("canvas")?.unchecked_into();
        canvas.set_width(width);
        canvas.set_height(height);
        context_2d(&canvas)?.draw_image_with_html_image_element_and_dw_and_dh(
            image,
            0.0,
            0.0,
            f64::from(width),
            f64::from(height),
        )?;
        Ok(canvas)
    }

    fn settle_handler(&self, source: &str, loaded: bool) -> Closure<dyn FnMut()> {
        let settled = Rc::clone(&self.settled);
        let source = source.to_string();
        Closure::wrap(Box::new(move || {
            settled.borrow_mut().push_back((source.clone(), loaded));
        }) as Box<dyn FnMut()>)
    }
}

impl ImageLoader for WebImageLoader {
    type Handle = TextureKey;

    fn begin(&mut self, source: &str) {
        if self.pending.contains_key(source) {
            return;
        }
        let image = match HtmlImageElement::new() {
            Ok(image) => image,
            Err(_) => {
                self.settled
                    .borrow_mut()
                    .push_back((source.to_string(), false));
                return;
            }
        };
        if needs_cors(source) {
            image.set_cross_origin(Some("anonymous"));
        }
        let on_load = self.settle_handler(source, true);
        let on_error = self.settle_handler(source, false);
        image.set_onload(Some(on_load.as_ref().unchecked_ref()));
        image.set_onerror(Some(on_error.as_ref().unchecked_ref()));
        image.set_src(source);
        self.pending.insert(
            source.to_string(),
            Pending {
                image,
                _on_load: on_load,
                _on_error: on_error,
            },
        );
    }

    fn fallback(&mut self) -> Texture<TextureKey> {
        self.fallback.clone()
    }
}

impl Drop for WebImageLoader {
    fn drop(&mut self) {
        self.cancel_all();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_http_sources_request_cors() {
        assert!(needs_cors("https://picsum.photos/seed/1/800/600"));
        assert!(needs_cors("HTTP://example.com/a.jpg"));
        assert!(!needs_cors("/portfolio/1.jpeg"));
        assert!(!needs_cors("data:image/png;base64,AAAA"));
        assert!(!needs_cors("blob:https://example.com/x"));
    }
}
