// Copyright 2026 the Ribbon Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Render loop lifecycle.
//!
//! A loop is started at most once and stopped at most once. Stopping is
//! idempotent and final: a stopped loop never schedules another frame, which
//! lets teardown run in any order relative to a pending frame callback.

/// Lifecycle of a frame loop.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum LoopState {
    /// Constructed, no frame scheduled yet.
    #[default]
    Idle,
    /// Frames are being scheduled.
    Running,
    /// Torn down.
    Stopped,
}

impl LoopState {
    /// Moves `Idle → Running`. Returns `false` from any other state.
    pub fn start(&mut self) -> bool {
        if *self == Self::Idle {
            *self = Self::Running;
            true
        } else {
            false
        }
    }

    /// Moves to `Stopped`. Returns `true` only on the first call.
    pub fn stop(&mut self) -> bool {
        if *self == Self::Stopped {
            false
        } else {
            *self = Self::Stopped;
            true
        }
    }

    /// Returns `true` while frames should be scheduled.
    #[must_use]
    pub fn is_running(self) -> bool {
        self == Self::Running
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_once() {
        let mut state = LoopState::default();
        assert!(state.start());
        assert!(!state.start());
        assert!(state.is_running());
    }

    #[test]
    fn stop_is_idempotent_and_final() {
        let mut state = LoopState::Idle;
        state.start();
        assert!(state.stop());
        assert!(!state.stop());
        assert!(!state.start(), "a stopped loop cannot restart");
        assert!(!state.is_running());
    }

    #[test]
    fn stop_before_start() {
        let mut state = LoopState::Idle;
        assert!(state.stop());
        assert!(!state.start());
    }
}
