// Copyright 2026 the Ribbon Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Scroll physics: a single eased scalar with a clamped target.
//!
//! [`ScrollState`] keeps `current` chasing `target` by linear interpolation,
//! once per frame. Every write to `target` is clamped so that it never lands
//! more than a bounded number of item widths away from a reference point.
//! Without that bound a single fling could skip past more slots than the
//! ribbon holds, and the wraparound rule would no longer hide the seam.

/// Distance below which `current` snaps exactly onto `target`.
pub const SNAP_EPSILON: f64 = 1e-4;

/// Which way the ribbon moved during the last [`tick`](ScrollState::tick).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Direction {
    /// `current` increased: items move towards the left edge.
    Forward,
    /// `current` decreased or stayed put.
    Backward,
}

/// How far a single interaction may move the target, in item widths.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum ClampBound {
    /// Mouse and pen sessions: at most 6 item widths.
    #[default]
    Pointer,
    /// Touch sessions: at most 8 item widths.
    Touch,
}

impl ClampBound {
    /// Returns the bound as a multiple of one item's width.
    #[must_use]
    pub const fn item_multiple(self) -> f64 {
        match self {
            Self::Pointer => 6.0,
            Self::Touch => 8.0,
        }
    }
}

/// Eased scroll position for one gallery.
#[derive(Clone, Debug, PartialEq)]
pub struct ScrollState {
    /// Position rendered this frame.
    pub current: f64,
    /// Position `current` is easing towards.
    pub target: f64,
    /// `current` as of the previous committed frame.
    pub last: f64,
    ease: f64,
    drag_anchor: Option<f64>,
    bound: ClampBound,
}

impl ScrollState {
    /// Creates a state at rest at zero.
    ///
    /// `ease` is clamped into `(0, 1]`; non-positive or non-finite values
    /// become `1.0` (no easing).
    #[must_use]
    pub fn new(ease: f64) -> Self {
        let ease = if ease.is_finite() && ease > 0.0 {
            ease.min(1.0)
        } else {
            1.0
        };
        Self {
            current: 0.0,
            target: 0.0,
            last: 0.0,
            ease,
            drag_anchor: None,
            bound: ClampBound::Pointer,
        }
    }

    /// Returns the interpolation factor.
    #[must_use]
    pub fn ease(&self) -> f64 {
        self.ease
    }

    /// Returns the active clamp bound.
    #[must_use]
    pub fn bound(&self) -> ClampBound {
        self.bound
    }

    /// Selects the clamp bound for subsequent target writes.
    pub fn set_bound(&mut self, bound: ClampBound) {
        self.bound = bound;
    }

    /// Returns the drag anchor if a drag is in progress.
    #[must_use]
    pub fn drag_anchor(&self) -> Option<f64> {
        self.drag_anchor
    }

    /// Anchors a drag at the current position.
    pub fn begin_drag(&mut self) {
        self.drag_anchor = Some(self.current);
    }

    /// Clears the drag anchor.
    pub fn end_drag(&mut self) {
        self.drag_anchor = None;
    }

    /// Clamps `value` to within the active bound of `reference`.
    #[must_use]
    pub fn clamp(&self, value: f64, reference: f64, item_width: f64) -> f64 {
        let item_width = if item_width.is_finite() && item_width > 0.0 {
            item_width
        } else {
            1.0
        };
        let max_delta = item_width * self.bound.item_multiple();
        let delta = value - reference;
        if delta > max_delta {
            reference + max_delta
        } else if delta < -max_delta {
            reference - max_delta
        } else {
            value
        }
    }

    /// Sets the target, clamped against the drag anchor while dragging and
    /// against `current` otherwise.
    pub fn set_target(&mut self, value: f64, item_width: f64) {
        let reference = self.drag_anchor.unwrap_or(self.current);
        self.set_target_from(value, reference, item_width);
    }

    /// Sets the target, clamped against an explicit reference point.
    pub fn set_target_from(&mut self, value: f64, reference: f64, item_width: f64) {
        self.target = self.clamp(value, reference, item_width);
    }

    /// Moves the target by `delta`, clamped against `current`.
    pub fn nudge(&mut self, delta: f64, item_width: f64) {
        let value = self.target + delta;
        self.set_target_from(value, self.current, item_width);
    }

    /// Pins target and last to the current position, stopping all motion.
    pub fn pin(&mut self) {
        self.target = self.current;
        self.last = self.current;
    }

    /// Advances `current` one step towards `target` and reports the
    /// direction of travel relative to `last`.
    pub fn tick(&mut self) -> Direction {
        let gap = self.target - self.current;
        if gap.abs() < SNAP_EPSILON {
            self.current = self.target;
        } else {
            self.current += gap * self.ease;
        }
        self.direction()
    }

    /// Returns the direction of travel since the last commit.
    #[must_use]
    pub fn direction(&self) -> Direction {
        if self.current > self.last {
            Direction::Forward
        } else {
            Direction::Backward
        }
    }

    /// Records `current` as the reference for the next direction check.
    pub fn commit(&mut self) {
        self.last = self.current;
    }

    /// Returns `true` when `current` has reached `target`.
    #[must_use]
    pub fn is_settled(&self) -> bool {
        self.current == self.target
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tick_converges_without_overshoot() {
        for ease in [0.05, 0.12, 0.3, 0.9] {
            for target in [-250.0, -1.0, 0.5, 37.0, 900.0] {
                let mut s = ScrollState::new(ease);
                s.target = target;
                let mut gap = (s.target - s.current).abs();
                let mut settled_at = None;
                for i in 0..2_000 {
                    s.tick();
                    s.commit();
                    let next_gap = (s.target - s.current).abs();
                    assert!(next_gap <= gap, "gap grew at tick {i} (ease {ease})");
                    if target > 0.0 {
                        assert!(s.current <= target, "overshot {target} (ease {ease})");
                    } else {
                        assert!(s.current >= target, "overshot {target} (ease {ease})");
                    }
                    gap = next_gap;
                    if s.is_settled() {
                        settled_at = Some(i);
                        break;
                    }
                }
                assert!(
                    settled_at.is_some(),
                    "ease {ease} did not settle on {target} within 2000 ticks"
                );
                assert_eq!(s.current, target);
            }
        }
    }

    #[test]
    fn ease_of_one_jumps_immediately() {
        let mut s = ScrollState::new(1.0);
        s.target = 42.0;
        s.tick();
        assert_eq!(s.current, 42.0);
    }

    #[test]
    fn invalid_ease_disables_easing() {
        assert_eq!(ScrollState::new(0.0).ease(), 1.0);
        assert_eq!(ScrollState::new(-0.3).ease(), 1.0);
        assert_eq!(ScrollState::new(f64::NAN).ease(), 1.0);
        assert_eq!(ScrollState::new(3.0).ease(), 1.0);
    }

    #[test]
    fn direction_follows_current_against_last() {
        let mut s = ScrollState::new(0.5);
        s.target = 10.0;
        assert_eq!(s.tick(), Direction::Forward);
        s.commit();
        s.target = -10.0;
        assert_eq!(s.tick(), Direction::Backward);
        s.commit();
        // No movement reads as backward.
        s.pin();
        assert_eq!(s.tick(), Direction::Backward);
    }

    #[test]
    fn set_target_never_exceeds_bound() {
        let item_width = 7.5;
        for bound in [ClampBound::Pointer, ClampBound::Touch] {
            let mut s = ScrollState::new(0.05);
            s.set_bound(bound);
            s.current = 13.0;
            let limit = item_width * bound.item_multiple();
            for step in -400..=400 {
                let drag = f64::from(step) * 0.75;
                s.set_target(s.current + drag, item_width);
                let delta = (s.target - s.current).abs();
                assert!(delta <= limit + 1e-9, "delta {delta} exceeds {limit}");
                if drag.abs() <= limit {
                    assert!((s.target - (s.current + drag)).abs() < 1e-9, "clamped a legal drag");
                }
            }
        }
    }

    #[test]
    fn drag_clamps_against_anchor_not_current() {
        let mut s = ScrollState::new(0.05);
        s.current = 100.0;
        s.begin_drag();
        s.current = 140.0;
        s.set_target(1_000.0, 1.0);
        assert_eq!(s.target, 106.0);
        s.end_drag();
        s.set_target(1_000.0, 1.0);
        assert_eq!(s.target, 146.0);
    }

    #[test]
    fn touch_bound_is_wider_than_pointer() {
        let mut s = ScrollState::new(0.05);
        s.set_target(100.0, 2.0);
        assert_eq!(s.target, 12.0);
        s.set_bound(ClampBound::Touch);
        s.set_target(100.0, 2.0);
        assert_eq!(s.target, 16.0);
        s.set_target(-100.0, 2.0);
        assert_eq!(s.target, -16.0);
    }

    #[test]
    fn zero_item_width_falls_back_to_unit_width() {
        let mut s = ScrollState::new(0.05);
        s.set_target(50.0, 0.0);
        assert_eq!(s.target, 6.0);
    }

    #[test]
    fn nudge_accumulates_on_target() {
        let mut s = ScrollState::new(0.05);
        s.nudge(0.5, 10.0);
        s.nudge(0.5, 10.0);
        assert_eq!(s.target, 1.0);
    }

    #[test]
    fn pin_stops_motion() {
        let mut s = ScrollState::new(0.2);
        s.target = 30.0;
        s.tick();
        s.pin();
        assert_eq!(s.target, s.current);
        assert_eq!(s.last, s.current);
        assert!(s.is_settled());
    }
}
