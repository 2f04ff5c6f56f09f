// Copyright 2026 the Ribbon Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Web demo: the studio's portfolio section.
//!
//! Builds a section with two scramble-reveal headings, a circular gallery of
//! portfolio images and a scramble-reveal link, all driven by
//! `ribbon_backend_web`.
//!
//! Build with: `wasm-pack build --target web demos/studio_site`
//!
//! Then call `mount_studio_site()` from the page once the module has loaded.
//! The returned handle's `unmount()` tears everything down again.

// This crate only runs in the browser; suppress dead-code warnings when
// cargo-checking on a native host target.
#![no_std]
#![cfg_attr(
    not(target_arch = "wasm32"),
    allow(dead_code, reason = "this crate only runs in the browser")
)]

extern crate alloc;

use alloc::format;
use alloc::string::String;
use alloc::vec::Vec;

use wasm_bindgen::prelude::*;
use web_sys::{Document, Element, HtmlElement};

use ribbon_backend_web::{CircularGallery, DecryptedText, TextClasses, shared_stagger};
use ribbon_core::config::{GalleryConfig, GalleryItem};
use ribbon_core::reveal::{AnimateOn, RevealConfig};

const PORTFOLIO_IMAGES: usize = 11;

const INSTAGRAM_URL: &str = "https://instagram.com/";

fn portfolio_items() -> Vec<GalleryItem> {
    (1..=PORTFOLIO_IMAGES)
        .map(|n| GalleryItem::new(format!("/portfolio/work-{n:02}.jpeg"), ""))
        .collect()
}

fn gallery_config() -> GalleryConfig {
    GalleryConfig {
        bend: 2.0,
        text_color: String::from("#fdf9f3"),
        border_radius: 0.08,
        font: String::from("600 28px 'IBM Plex Mono'"),
        scroll_speed: 1.0,
        scroll_ease: 0.15,
        ..GalleryConfig::new()
    }
}

/// Headings reveal left to right, once, reusing their own letters.
fn heading_config() -> RevealConfig {
    RevealConfig {
        animate_on: AnimateOn::View,
        sequential: true,
        use_original_chars_only: true,
        ..RevealConfig::new()
    }
}

fn classes(revealed: &str, encrypted: &str, parent: &str) -> TextClasses {
    TextClasses {
        revealed: revealed.into(),
        encrypted: encrypted.into(),
        parent: parent.into(),
    }
}

fn element(document: &Document, tag: &str, class: &str) -> Result<Element, JsValue> {
    let el = document.create_element(tag)?;
    el.set_class_name(class);
    Ok(el)
}

/// The mounted portfolio section.
#[wasm_bindgen]
#[derive(Debug)]
pub struct StudioSite {
    section: Element,
    texts: Vec<DecryptedText>,
    gallery: CircularGallery,
}

#[wasm_bindgen]
impl StudioSite {
    /// Stops every animation and removes the section. Idempotent.
    pub fn unmount(&mut self) {
        self.gallery.unmount();
        for text in &mut self.texts {
            text.unmount();
        }
        self.section.remove();
    }
}

/// Appends the portfolio section to `<body>`.
#[wasm_bindgen]
pub fn mount_studio_site() -> Result<StudioSite, JsValue> {
    let window = web_sys::window().ok_or("no global window")?;
    let document = window.document().ok_or("no document")?;
    let body = document.body().ok_or("no body")?;
    let stagger = shared_stagger();

    let section = element(&document, "section", "py-16")?;
    section.set_id("portfolio");
    let header = element(&document, "div", "text-center mb-12")?;
    let label = element(&document, "div", "mb-4")?;
    let title = element(&document, "h2", "text-3xl font-mono font-light mb-4")?;
    header.append_child(&label)?;
    header.append_child(&title)?;
    section.append_child(&header)?;

    let mut texts = Vec::new();
    texts.push(DecryptedText::mount(
        &label,
        "WORK:",
        heading_config(),
        classes(
            "text-muted-foreground/60",
            "text-muted-foreground/40",
            "block font-mono text-xs tracking-wider",
        ),
        &stagger,
    )?);
    texts.push(DecryptedText::mount(
        &title,
        "RECENT_WORK",
        heading_config(),
        classes("", "", "block"),
        &stagger,
    )?);

    let container: HtmlElement = element(&document, "div", "relative w-full")?.unchecked_into();
    container.style().set_property("height", "560px")?;
    section.append_child(&container)?;

    let footer = element(&document, "div", "text-center mt-12")?;
    let link = element(&document, "a", "inline-flex items-center gap-2 px-6 py-3 text-xs")?;
    link.set_attribute("href", INSTAGRAM_URL)?;
    link.set_attribute("target", "_blank")?;
    link.set_attribute("rel", "noopener noreferrer")?;
    footer.append_child(&link)?;
    section.append_child(&footer)?;
    texts.push(DecryptedText::mount(
        &link,
        "MORE_ON_INSTAGRAM",
        heading_config(),
        classes("text-black", "text-black/60", "inline-block"),
        &stagger,
    )?);

    body.append_child(&section)?;
    let gallery = CircularGallery::mount(&container, portfolio_items(), gallery_config())?;

    Ok(StudioSite {
        section,
        texts,
        gallery,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn portfolio_has_eleven_uncaptioned_items() {
        let items = portfolio_items();
        assert_eq!(items.len(), 11);
        assert_eq!(items[0].image, "/portfolio/work-01.jpeg");
        assert_eq!(items[10].image, "/portfolio/work-11.jpeg");
        assert!(items.iter().all(|i| i.caption.is_empty()));
    }

    #[test]
    fn headings_reveal_once_on_view() {
        let config = heading_config();
        assert!(config.should_trigger_once(), "view-only reveals are final");
        assert!(config.sequential);
    }
}
