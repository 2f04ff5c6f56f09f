// Copyright 2026 the Ribbon Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Deferred gallery construction.
//!
//! Building a gallery allocates a GL context and starts image downloads, so
//! it waits until the container is about to scroll into view:
//!
//! ```text
//!   Dormant ──intersect──► Pending ──idle callback──► Active
//!      │                                                ▲
//!      └──────────── no observer API ───────────────────┘
//! ```
//!
//! Any state moves to `Destroyed` on unmount; callbacks arriving afterwards
//! are ignored.

use crate::time::Duration;

/// Margin around the viewport, in CSS pixels, within which the container
/// counts as visible.
pub const ROOT_MARGIN_PX: u32 = 300;

/// Upper bound on how long construction waits for an idle period.
pub const IDLE_TIMEOUT: Duration = Duration::from_millis(750);

/// Lifecycle of a lazily mounted component.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum MountPhase {
    /// Waiting for the container to approach the viewport.
    Dormant,
    /// Visible; construction is scheduled for the next idle period.
    Pending,
    /// Constructed.
    Active,
    /// Unmounted.
    Destroyed,
}

/// What the backend should do after a visibility report.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum MountAction {
    /// Nothing.
    None,
    /// Disconnect the observer and schedule construction for an idle period
    /// (or the next frame when idle callbacks are unavailable).
    ScheduleIdle,
}

/// Visibility-gated mount state machine.
#[derive(Clone, Copy, Debug)]
pub struct LazyMount {
    phase: MountPhase,
}

impl LazyMount {
    /// Creates a mount. Without an observer API the component is built
    /// right away.
    #[must_use]
    pub fn new(has_observer: bool) -> Self {
        Self {
            phase: if has_observer {
                MountPhase::Dormant
            } else {
                MountPhase::Active
            },
        }
    }

    /// Returns the current phase.
    #[must_use]
    pub fn phase(&self) -> MountPhase {
        self.phase
    }

    /// Returns `true` once the component should exist.
    #[must_use]
    pub fn is_active(&self) -> bool {
        self.phase == MountPhase::Active
    }

    /// Handles an intersection report.
    pub fn on_intersect(&mut self, is_intersecting: bool) -> MountAction {
        if is_intersecting && self.phase == MountPhase::Dormant {
            self.phase = MountPhase::Pending;
            MountAction::ScheduleIdle
        } else {
            MountAction::None
        }
    }

    /// Handles the idle (or frame) callback. Returns `true` when the
    /// component should be constructed now.
    pub fn on_idle(&mut self) -> bool {
        if self.phase == MountPhase::Pending {
            self.phase = MountPhase::Active;
            true
        } else {
            false
        }
    }

    /// Marks the mount destroyed.
    pub fn destroy(&mut self) {
        self.phase = MountPhase::Destroyed;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn waits_for_intersection_then_idle() {
        let mut mount = LazyMount::new(true);
        assert_eq!(mount.phase(), MountPhase::Dormant);
        assert!(!mount.on_idle(), "idle before intersection does nothing");
        assert_eq!(mount.on_intersect(false), MountAction::None);
        assert_eq!(mount.on_intersect(true), MountAction::ScheduleIdle);
        assert_eq!(mount.on_intersect(true), MountAction::None, "scheduled once");
        assert!(mount.on_idle());
        assert!(mount.is_active());
        assert!(!mount.on_idle());
    }

    #[test]
    fn no_observer_mounts_immediately() {
        let mount = LazyMount::new(false);
        assert!(mount.is_active());
    }

    #[test]
    fn destroyed_mount_ignores_callbacks() {
        let mut mount = LazyMount::new(true);
        mount.on_intersect(true);
        mount.destroy();
        assert!(!mount.on_idle());
        assert_eq!(mount.on_intersect(true), MountAction::None);
        assert_eq!(mount.phase(), MountPhase::Destroyed);
    }
}
