// Copyright 2026 the Ribbon Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! DOM event translation.

use kurbo::Point;
use wasm_bindgen::JsCast as _;
use web_sys::{Event, MouseEvent, PointerEvent, TouchEvent, WheelEvent};

use ribbon_core::input::{InputEvent, InputMode, PointerKind};

/// Events listened for on the window in each input mode.
pub(crate) const fn window_events(mode: InputMode) -> &'static [&'static str] {
    match mode {
        InputMode::PointerEvents => &["pointermove", "pointerup", "pointercancel"],
        InputMode::Legacy => &[
            "mousedown",
            "mousemove",
            "mouseup",
            "touchstart",
            "touchmove",
            "touchend",
            "touchcancel",
        ],
    }
}

/// Events listened for on the gallery container in each input mode.
pub(crate) const fn container_events(mode: InputMode) -> &'static [&'static str] {
    match mode {
        InputMode::PointerEvents => &[
            "pointerdown",
            "lostpointercapture",
            "mouseenter",
            "mouseleave",
        ],
        InputMode::Legacy => &["mouseenter", "mouseleave"],
    }
}

/// `touch-action` for the canvas. Horizontal touch drags stay with the
/// gallery while vertical pans still scroll the page.
pub(crate) const TOUCH_ACTION: &str = "pan-y";

/// A pointer capture call on the gallery container.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum Capture {
    /// `setPointerCapture(id)`.
    Take(i32),
    /// `releasePointerCapture(id)`.
    Release(i32),
}

/// Tracks the one pointer the container holds captured.
///
/// Capture is taken on press so that the drag keeps receiving events once
/// the pointer leaves the container, and released on up or cancel.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub(crate) struct CaptureTracker {
    held: Option<i32>,
}

impl CaptureTracker {
    /// Returns the capture call `event` needs and records the outcome.
    pub(crate) fn on_event(&mut self, event: &InputEvent) -> Option<Capture> {
        match *event {
            InputEvent::PointerDown { pointer_id, .. } if self.held.is_none() => {
                self.held = Some(pointer_id);
                Some(Capture::Take(pointer_id))
            }
            InputEvent::PointerUp { pointer_id } | InputEvent::PointerCancel { pointer_id }
                if self.held == Some(pointer_id) =>
            {
                self.held = None;
                Some(Capture::Release(pointer_id))
            }
            InputEvent::LostPointerCapture { pointer_id } if self.held == Some(pointer_id) => {
                self.held = None;
                None
            }
            _ => None,
        }
    }

    /// Forgets the held pointer, returning it so it can be released.
    pub(crate) fn take(&mut self) -> Option<i32> {
        self.held.take()
    }
}

/// Maps `PointerEvent.pointerType`.
pub(crate) fn pointer_kind(pointer_type: &str) -> PointerKind {
    match pointer_type {
        "touch" => PointerKind::Touch,
        "pen" => PointerKind::Pen,
        _ => PointerKind::Mouse,
    }
}

fn client(event: &MouseEvent) -> Point {
    Point::new(f64::from(event.client_x()), f64::from(event.client_y()))
}

fn first_touch(event: &TouchEvent) -> Option<Point> {
    event
        .touches()
        .get(0)
        .map(|t| Point::new(f64::from(t.client_x()), f64::from(t.client_y())))
}

/// Translates a DOM event into an [`InputEvent`].
///
/// Returns `None` for event types the gallery does not use.
pub(crate) fn translate(event: &Event) -> Option<InputEvent> {
    let kind = event.type_();
    let pointer = || event.dyn_ref::<PointerEvent>();
    let mouse = || event.dyn_ref::<MouseEvent>();
    let touch = || event.dyn_ref::<TouchEvent>();
    Some(match kind.as_str() {
        "pointerdown" => {
            let e = pointer()?;
            InputEvent::PointerDown {
                pointer_id: e.pointer_id(),
                kind: pointer_kind(&e.pointer_type()),
                position: client(e),
            }
        }
        "pointermove" => {
            let e = pointer()?;
            InputEvent::PointerMove {
                pointer_id: e.pointer_id(),
                kind: pointer_kind(&e.pointer_type()),
                position: client(e),
            }
        }
        "pointerup" => InputEvent::PointerUp {
            pointer_id: pointer()?.pointer_id(),
        },
        "pointercancel" => InputEvent::PointerCancel {
            pointer_id: pointer()?.pointer_id(),
        },
        "lostpointercapture" => InputEvent::LostPointerCapture {
            pointer_id: pointer()?.pointer_id(),
        },
        "touchstart" => InputEvent::TouchStart(first_touch(touch()?)),
        "touchmove" => InputEvent::TouchMove(first_touch(touch()?)),
        "touchend" | "touchcancel" => InputEvent::TouchEnd,
        "mousedown" => InputEvent::MouseDown(client(mouse()?)),
        "mousemove" => InputEvent::MouseMove(client(mouse()?)),
        "mouseup" => InputEvent::MouseUp,
        "mouseenter" => InputEvent::Enter,
        "mouseleave" => InputEvent::Leave,
        "wheel" => InputEvent::Wheel {
            delta_y: event.dyn_ref::<WheelEvent>()?.delta_y(),
        },
        _ => return None,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pointer_types() {
        assert_eq!(pointer_kind("touch"), PointerKind::Touch);
        assert_eq!(pointer_kind("pen"), PointerKind::Pen);
        assert_eq!(pointer_kind("mouse"), PointerKind::Mouse);
        assert_eq!(pointer_kind(""), PointerKind::Mouse);
    }

    #[test]
    fn modes_listen_to_disjoint_drag_sources() {
        let pointer = window_events(InputMode::PointerEvents);
        let legacy = window_events(InputMode::Legacy);
        assert!(pointer.iter().all(|e| e.starts_with("pointer")));
        assert!(legacy.iter().all(|e| !e.starts_with("pointer")));
        assert!(container_events(InputMode::Legacy).contains(&"mouseenter"));
        assert!(container_events(InputMode::PointerEvents).contains(&"pointerdown"));
    }

    fn down(pointer_id: i32) -> InputEvent {
        InputEvent::PointerDown {
            pointer_id,
            kind: PointerKind::Touch,
            position: Point::new(10.0, 20.0),
        }
    }

    #[test]
    fn press_takes_capture_and_release_gives_it_back() {
        let mut capture = CaptureTracker::default();
        assert_eq!(capture.on_event(&down(4)), Some(Capture::Take(4)));
        let moved = InputEvent::PointerMove {
            pointer_id: 4,
            kind: PointerKind::Touch,
            position: Point::new(60.0, 20.0),
        };
        assert_eq!(capture.on_event(&moved), None);
        assert_eq!(
            capture.on_event(&InputEvent::PointerUp { pointer_id: 4 }),
            Some(Capture::Release(4))
        );
        assert_eq!(capture.take(), None, "nothing left to release");
    }

    #[test]
    fn cancel_releases_the_held_pointer() {
        let mut capture = CaptureTracker::default();
        capture.on_event(&down(2));
        assert_eq!(
            capture.on_event(&InputEvent::PointerCancel { pointer_id: 2 }),
            Some(Capture::Release(2))
        );
    }

    #[test]
    fn second_pointer_is_not_captured() {
        let mut capture = CaptureTracker::default();
        capture.on_event(&down(1));
        assert_eq!(capture.on_event(&down(2)), None);
        assert_eq!(capture.on_event(&InputEvent::PointerUp { pointer_id: 2 }), None);
        assert_eq!(capture.take(), Some(1), "teardown releases the first pointer");
    }

    #[test]
    fn lost_capture_needs_no_release() {
        let mut capture = CaptureTracker::default();
        capture.on_event(&down(3));
        assert_eq!(
            capture.on_event(&InputEvent::LostPointerCapture { pointer_id: 3 }),
            None
        );
        assert_eq!(capture.on_event(&InputEvent::PointerUp { pointer_id: 3 }), None);
        assert_eq!(capture.take(), None);
    }
}
