// Copyright 2026 the Ribbon Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Caption rasterization into a 2D canvas.

use wasm_bindgen::prelude::*;
use web_sys::{CanvasRenderingContext2d, Document, HtmlCanvasElement};

/// Font size used when the CSS font string has no `<n>px` component.
pub(crate) const DEFAULT_FONT_SIZE_PX: u32 = 30;

/// Transparent margin around the text, in pixels.
const CAPTION_PADDING_PX: u32 = 20;

/// Extracts the first `<digits>px` from a CSS font shorthand.
pub(crate) fn font_size_px(font: &str) -> u32 {
    let bytes = font.as_bytes();
    let mut start = None;
    for (i, &b) in bytes.iter().enumerate() {
        if b.is_ascii_digit() {
            start.get_or_insert(i);
        } else if let Some(s) = start.take()
            && font[i..].starts_with("px")
            && let Ok(size) = font[s..i].parse()
        {
            return size;
        }
    }
    DEFAULT_FONT_SIZE_PX
}

/// Canvas size for text `text_width` pixels wide set in `font`.
pub(crate) fn caption_canvas_size(text_width: f64, font: &str) -> (u32, u32) {
    #[expect(
        clippy::cast_possible_truncation,
        clippy::cast_sign_loss,
        reason = "measured text widths are small and non-negative"
    )]
    let width = text_width.max(0.0).ceil() as u32;
    #[expect(
        clippy::cast_possible_truncation,
        clippy::cast_sign_loss,
        reason = "font sizes are small and non-negative"
    )]
    let height = (f64::from(font_size_px(font)) * 1.2).ceil() as u32;
    (width + CAPTION_PADDING_PX, height + CAPTION_PADDING_PX)
}

/// Renders `text` centered in a fresh canvas sized to fit it.
pub(crate) fn render_caption(
    document: &Document,
    text: &str,
    font: &str,
    color: &str,
) -> Result<HtmlCanvasElement, JsValue> {
    let canvas: HtmlCanvasElement = document.create_element("canvas")?.unchecked_into();
    let context = context_2d(&canvas)?;
    context.set_font(font);
    let metrics = context.measure_text(text)?;
    let (width, height) = caption_canvas_size(metrics.width(), font);
    canvas.set_width(width);
    canvas.set_height(height);

    // Resizing resets the context state.
    context.set_font(font);
    context.set_fill_style_str(color);
    context.set_text_baseline("middle");
    context.set_text_align("center");
    let (w, h) = (f64::from(width), f64::from(height));
    context.clear_rect(0.0, 0.0, w, h);
    context.fill_text(text, w / 2.0, h / 2.0)?;
    Ok(canvas)
}

pub(crate) fn context_2d(canvas: &HtmlCanvasElement) -> Result<CanvasRenderingContext2d, JsValue> {
    Ok(canvas
        .get_context("2d")?
        .ok_or_else(|| JsValue::from_str("canvas has no 2d context"))?
        .unchecked_into())
}
