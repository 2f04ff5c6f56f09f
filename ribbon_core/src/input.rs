// Copyright 2026 the Ribbon Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Pointer, touch and mouse input routing.
//!
//! Browsers deliver the same gesture through up to three event families.
//! The backend translates whichever family it listens to into
//! [`InputEvent`]s, and [`InputRouter`] turns those into [`InputAction`]s for
//! the gallery. The router only listens to one family, chosen once by
//! [`InputMode`], so a touch that also produces synthetic mouse events is
//! not counted twice.
//!
//! ```text
//!            down                 up / cancel / lost capture
//!   Idle ───────────► Dragging ───────────────────────────► Idle
//!                       │  ▲     (same pointer id only)
//!                       └──┘ move
//! ```

use kurbo::Point;

use crate::config::DeviceClass;
use crate::scroll::ClampBound;

/// Pointer device type, as reported by `PointerEvent.pointerType`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum PointerKind {
    /// Mouse or trackpad.
    #[default]
    Mouse,
    /// Stylus.
    Pen,
    /// Finger.
    Touch,
}

/// Platform input, normalized to a tagged union.
///
/// Coordinates are client (viewport) CSS pixels.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum InputEvent {
    /// `pointerdown`.
    PointerDown {
        /// `pointerId`.
        pointer_id: i32,
        /// `pointerType`.
        kind: PointerKind,
        /// Client position.
        position: Point,
    },
    /// `pointermove`.
    PointerMove {
        /// `pointerId`.
        pointer_id: i32,
        /// `pointerType`.
        kind: PointerKind,
        /// Client position.
        position: Point,
    },
    /// `pointerup`.
    PointerUp {
        /// `pointerId`.
        pointer_id: i32,
    },
    /// `pointercancel`.
    PointerCancel {
        /// `pointerId`.
        pointer_id: i32,
    },
    /// `lostpointercapture`.
    LostPointerCapture {
        /// `pointerId`.
        pointer_id: i32,
    },
    /// `touchstart`; `None` when the touch list is empty.
    TouchStart(Option<Point>),
    /// `touchmove`; `None` when the touch list is empty.
    TouchMove(Option<Point>),
    /// `touchend` or `touchcancel`.
    TouchEnd,
    /// `mousedown`.
    MouseDown(Point),
    /// `mousemove`.
    MouseMove(Point),
    /// `mouseup`.
    MouseUp,
    /// Pointer entered the gallery container.
    Enter,
    /// Pointer left the gallery container.
    Leave,
    /// Wheel over the gallery container.
    Wheel {
        /// `deltaY`.
        delta_y: f64,
    },
}

/// A position extracted from an [`InputEvent`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct NormalizedPoint {
    /// Client x.
    pub x: f64,
    /// Client y.
    pub y: f64,
    /// Whether the source is a finger.
    pub is_touch_like: bool,
}

/// Extracts the position carried by `event`, if any.
#[must_use]
pub fn normalize(event: &InputEvent) -> Option<NormalizedPoint> {
    let (position, is_touch_like) = match *event {
        InputEvent::PointerDown { kind, position, .. }
        | InputEvent::PointerMove { kind, position, .. } => (position, kind == PointerKind::Touch),
        InputEvent::TouchStart(position) | InputEvent::TouchMove(position) => (position?, true),
        InputEvent::MouseDown(position) | InputEvent::MouseMove(position) => (position, false),
        _ => return None,
    };
    Some(NormalizedPoint {
        x: position.x,
        y: position.y,
        is_touch_like,
    })
}

/// Which event family the router accepts.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum InputMode {
    /// Pointer events (`pointerdown`, ...).
    #[default]
    PointerEvents,
    /// Touch and mouse events, for platforms without pointer events.
    Legacy,
}

impl InputMode {
    /// Picks pointer events when the platform has them.
    #[must_use]
    pub const fn detect(has_pointer_events: bool) -> Self {
        if has_pointer_events {
            Self::PointerEvents
        } else {
            Self::Legacy
        }
    }

    fn accepts(self, event: &InputEvent) -> bool {
        match event {
            InputEvent::PointerDown { .. }
            | InputEvent::PointerMove { .. }
            | InputEvent::PointerUp { .. }
            | InputEvent::PointerCancel { .. }
            | InputEvent::LostPointerCapture { .. } => self == Self::PointerEvents,
            InputEvent::TouchStart(_)
            | InputEvent::TouchMove(_)
            | InputEvent::TouchEnd
            | InputEvent::MouseDown(_)
            | InputEvent::MouseMove(_)
            | InputEvent::MouseUp => self == Self::Legacy,
            InputEvent::Enter | InputEvent::Leave | InputEvent::Wheel { .. } => true,
        }
    }
}

/// Drag lifecycle actions.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum DragAction {
    /// A drag began at client x `x`.
    Start {
        /// Client x at press.
        x: f64,
        /// Clamp bound for this session.
        bound: ClampBound,
        /// Whether a finger started the drag.
        is_touch: bool,
    },
    /// The drag moved; `distance` is the scroll offset from the anchor.
    Move {
        /// Client x.
        x: f64,
        /// `(start_x − x) × multiplier`.
        distance: f64,
    },
    /// The drag ended.
    End,
}

/// What the gallery should do in response to an event.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum InputAction {
    /// Drag lifecycle.
    Drag(DragAction),
    /// Pointer entered the container: pin and suspend autoscroll.
    HoverEnter,
    /// Pointer left the container: resume autoscroll.
    HoverLeave,
    /// Nudge the target by `delta` and schedule a settle.
    Wheel {
        /// Signed target increment.
        delta: f64,
    },
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum DragSource {
    Pointer(i32),
    Touch,
    Mouse,
}

#[derive(Clone, Copy, Debug, PartialEq)]
enum DragState {
    Idle,
    Dragging {
        source: DragSource,
        start_x: f64,
        multiplier: f64,
    },
}

/// Turns [`InputEvent`]s into [`InputAction`]s.
#[derive(Clone, Debug)]
pub struct InputRouter {
    mode: InputMode,
    device: DeviceClass,
    scroll_speed: f64,
    wheel_enabled: bool,
    state: DragState,
    hovering: bool,
}

impl InputRouter {
    /// Creates a router in the idle state.
    #[must_use]
    pub fn new(
        mode: InputMode,
        device: DeviceClass,
        scroll_speed: f64,
        wheel_enabled: bool,
    ) -> Self {
        Self {
            mode,
            device,
            scroll_speed,
            wheel_enabled,
            state: DragState::Idle,
            hovering: false,
        }
    }

    /// Returns the accepted event family.
    #[must_use]
    pub fn mode(&self) -> InputMode {
        self.mode
    }

    /// Returns `true` while a drag is in progress.
    #[must_use]
    pub fn is_dragging(&self) -> bool {
        matches!(self.state, DragState::Dragging { .. })
    }

    /// Returns `true` while the pointer is over the container.
    #[must_use]
    pub fn is_hovering(&self) -> bool {
        self.hovering
    }

    /// Drag multiplier for mouse and pen.
    #[must_use]
    pub fn pointer_multiplier(&self) -> f64 {
        self.scroll_speed * 0.025
    }

    /// Drag multiplier for touch. Coarse-pointer devices get a larger one.
    #[must_use]
    pub fn touch_multiplier(&self) -> f64 {
        match self.device {
            DeviceClass::Coarse => self.scroll_speed * 0.06,
            DeviceClass::Fine => self.scroll_speed * 0.045,
        }
    }

    /// Routes one event. Returns `None` for events that do not apply in the
    /// current mode or state.
    pub fn route(&mut self, event: &InputEvent) -> Option<InputAction> {
        if !self.mode.accepts(event) {
            return None;
        }
        match *event {
            InputEvent::PointerDown {
                pointer_id, kind, ..
            } => self.press(DragSource::Pointer(pointer_id), kind == PointerKind::Touch, event),
            InputEvent::TouchStart(_) => self.press(DragSource::Touch, true, event),
            InputEvent::MouseDown(_) => self.press(DragSource::Mouse, false, event),

            InputEvent::PointerMove { pointer_id, .. } => {
                self.drag(DragSource::Pointer(pointer_id), event)
            }
            InputEvent::TouchMove(_) => self.drag(DragSource::Touch, event),
            InputEvent::MouseMove(_) => self.drag(DragSource::Mouse, event),

            InputEvent::PointerUp { pointer_id }
            | InputEvent::PointerCancel { pointer_id }
            | InputEvent::LostPointerCapture { pointer_id } => {
                self.release(DragSource::Pointer(pointer_id))
            }
            InputEvent::TouchEnd => self.release(DragSource::Touch),
            InputEvent::MouseUp => self.release(DragSource::Mouse),

            InputEvent::Enter => {
                self.hovering = true;
                Some(InputAction::HoverEnter)
            }
            InputEvent::Leave => {
                self.hovering = false;
                Some(InputAction::HoverLeave)
            }
            InputEvent::Wheel { delta_y } => {
                if !self.wheel_enabled || delta_y == 0.0 || !delta_y.is_finite() {
                    return None;
                }
                let step = self.scroll_speed * 0.2;
                Some(InputAction::Wheel {
                    delta: if delta_y > 0.0 { step } else { -step },
                })
            }
        }
    }

    fn press(
        &mut self,
        source: DragSource,
        is_touch: bool,
        event: &InputEvent,
    ) -> Option<InputAction> {
        if self.is_dragging() {
            return None;
        }
        let point = normalize(event)?;
        let multiplier = if is_touch {
            self.touch_multiplier()
        } else {
            self.pointer_multiplier()
        };
        self.state = DragState::Dragging {
            source,
            start_x: point.x,
            multiplier,
        };
        Some(InputAction::Drag(DragAction::Start {
            x: point.x,
            bound: if is_touch {
                ClampBound::Touch
            } else {
                ClampBound::Pointer
            },
            is_touch,
        }))
    }

    fn drag(&self, source: DragSource, event: &InputEvent) -> Option<InputAction> {
        let DragState::Dragging {
            source: active,
            start_x,
            multiplier,
        } = self.state
        else {
            return None;
        };
        if active != source {
            return None;
        }
        let point = normalize(event)?;
        Some(InputAction::Drag(DragAction::Move {
            x: point.x,
            distance: (start_x - point.x) * multiplier,
        }))
    }

    fn release(&mut self, source: DragSource) -> Option<InputAction> {
        match self.state {
            DragState::Dragging { source: active, .. } if active == source => {
                self.state = DragState::Idle;
                Some(InputAction::Drag(DragAction::End))
            }
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn down(id: i32, kind: PointerKind, x: f64) -> InputEvent {
        InputEvent::PointerDown {
            pointer_id: id,
            kind,
            position: Point::new(x, 10.0),
        }
    }

    fn moved(id: i32, kind: PointerKind, x: f64) -> InputEvent {
        InputEvent::PointerMove {
            pointer_id: id,
            kind,
            position: Point::new(x, 10.0),
        }
    }

    fn router() -> InputRouter {
        InputRouter::new(InputMode::PointerEvents, DeviceClass::Fine, 2.0, true)
    }

    #[test]
    fn normalize_extracts_positions() {
        let p = normalize(&down(1, PointerKind::Touch, 5.0)).unwrap();
        assert_eq!((p.x, p.y, p.is_touch_like), (5.0, 10.0, true));
        let p = normalize(&InputEvent::MouseMove(Point::new(1.0, 2.0))).unwrap();
        assert!(!p.is_touch_like);
        assert_eq!(normalize(&InputEvent::TouchStart(None)), None);
        assert_eq!(normalize(&InputEvent::Enter), None);
        assert_eq!(normalize(&InputEvent::PointerUp { pointer_id: 1 }), None);
    }

    #[test]
    fn move_while_idle_is_ignored() {
        let mut r = router();
        assert_eq!(r.route(&moved(1, PointerKind::Mouse, 50.0)), None);
        assert_eq!(r.route(&InputEvent::PointerUp { pointer_id: 1 }), None);
        assert!(!r.is_dragging());
    }

    #[test]
    fn drag_reports_scaled_distance() {
        let mut r = router();
        let start = r.route(&down(1, PointerKind::Mouse, 100.0));
        assert_eq!(
            start,
            Some(InputAction::Drag(DragAction::Start {
                x: 100.0,
                bound: ClampBound::Pointer,
                is_touch: false,
            }))
        );
        let Some(InputAction::Drag(DragAction::Move { distance, .. })) =
            r.route(&moved(1, PointerKind::Mouse, 60.0))
        else {
            panic!("expected a move");
        };
        assert!((distance - 40.0 * 0.05).abs() < 1e-12);
        assert_eq!(
            r.route(&InputEvent::PointerUp { pointer_id: 1 }),
            Some(InputAction::Drag(DragAction::End))
        );
        assert!(!r.is_dragging());
    }

    #[test]
    fn only_matching_pointer_ends_drag() {
        let mut r = router();
        r.route(&down(7, PointerKind::Touch, 0.0));
        // A second finger neither restarts nor moves nor ends the drag.
        assert_eq!(r.route(&down(8, PointerKind::Touch, 30.0)), None);
        assert_eq!(r.route(&moved(8, PointerKind::Touch, 30.0)), None);
        assert_eq!(r.route(&InputEvent::PointerUp { pointer_id: 8 }), None);
        assert!(r.is_dragging());
        assert_eq!(
            r.route(&InputEvent::LostPointerCapture { pointer_id: 7 }),
            Some(InputAction::Drag(DragAction::End))
        );
        assert_eq!(r.route(&InputEvent::PointerCancel { pointer_id: 7 }), None);
    }

    #[test]
    fn touch_multiplier_depends_on_device() {
        let fine = InputRouter::new(InputMode::PointerEvents, DeviceClass::Fine, 2.0, false);
        let coarse = InputRouter::new(InputMode::PointerEvents, DeviceClass::Coarse, 2.0, false);
        assert!((fine.pointer_multiplier() - 0.05).abs() < 1e-12);
        assert!((fine.touch_multiplier() - 0.09).abs() < 1e-12);
        assert!((coarse.touch_multiplier() - 0.12).abs() < 1e-12);
    }

    #[test]
    fn touch_drag_uses_touch_bound_and_multiplier() {
        let mut r = InputRouter::new(InputMode::PointerEvents, DeviceClass::Coarse, 1.0, false);
        let Some(InputAction::Drag(DragAction::Start { bound, is_touch, .. })) =
            r.route(&down(3, PointerKind::Touch, 200.0))
        else {
            panic!("expected a start");
        };
        assert_eq!(bound, ClampBound::Touch);
        assert!(is_touch);
        let Some(InputAction::Drag(DragAction::Move { distance, .. })) =
            r.route(&moved(3, PointerKind::Touch, 100.0))
        else {
            panic!("expected a move");
        };
        assert!((distance - 6.0).abs() < 1e-12);
    }

    #[test]
    fn pointer_mode_ignores_legacy_events() {
        let mut r = router();
        assert_eq!(r.route(&InputEvent::MouseDown(Point::new(1.0, 1.0))), None);
        assert_eq!(r.route(&InputEvent::TouchStart(Some(Point::ZERO))), None);
        assert!(!r.is_dragging());
    }

    #[test]
    fn legacy_mode_ignores_pointer_events() {
        let mut r = InputRouter::new(InputMode::Legacy, DeviceClass::Fine, 2.0, false);
        assert_eq!(r.route(&down(1, PointerKind::Mouse, 0.0)), None);
        assert!(r.route(&InputEvent::TouchStart(Some(Point::new(50.0, 0.0)))).is_some());
        // Synthetic mouse events during a touch drag do not interfere.
        assert_eq!(r.route(&InputEvent::MouseMove(Point::new(0.0, 0.0))), None);
        assert_eq!(r.route(&InputEvent::MouseUp), None);
        assert!(r.is_dragging());
        assert_eq!(
            r.route(&InputEvent::TouchEnd),
            Some(InputAction::Drag(DragAction::End))
        );
    }

    #[test]
    fn empty_touch_list_does_not_start_a_drag() {
        let mut r = InputRouter::new(InputMode::Legacy, DeviceClass::Fine, 2.0, false);
        assert_eq!(r.route(&InputEvent::TouchStart(None)), None);
        assert!(!r.is_dragging());
    }

    #[test]
    fn hover_is_tracked() {
        let mut r = router();
        assert_eq!(r.route(&InputEvent::Enter), Some(InputAction::HoverEnter));
        assert!(r.is_hovering());
        assert_eq!(r.route(&InputEvent::Leave), Some(InputAction::HoverLeave));
        assert!(!r.is_hovering());
    }

    #[test]
    fn wheel_steps_by_a_fifth_of_speed() {
        let mut r = router();
        assert_eq!(
            r.route(&InputEvent::Wheel { delta_y: 120.0 }),
            Some(InputAction::Wheel { delta: 0.4 })
        );
        assert_eq!(
            r.route(&InputEvent::Wheel { delta_y: -3.0 }),
            Some(InputAction::Wheel { delta: -0.4 })
        );
        assert_eq!(r.route(&InputEvent::Wheel { delta_y: 0.0 }), None);
    }

    #[test]
    fn wheel_disabled_is_ignored() {
        let mut r = InputRouter::new(InputMode::PointerEvents, DeviceClass::Fine, 2.0, false);
        assert_eq!(r.route(&InputEvent::Wheel { delta_y: 120.0 }), None);
    }

    #[test]
    fn mode_detection() {
        assert_eq!(InputMode::detect(true), InputMode::PointerEvents);
        assert_eq!(InputMode::detect(false), InputMode::Legacy);
    }
}
