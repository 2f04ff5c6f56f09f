// Copyright 2026 the Ribbon Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Frame ticks and frame pacing.
//!
//! Backends turn their platform frame callback into a [`FrameTick`]. The
//! browser offers pacing only (no predicted present time), so a tick carries
//! just the callback timestamp and a monotonically increasing counter.
//!
//! [`FrameThrottle`] optionally skips work when ticks arrive faster than a
//! minimum interval, bounding CPU/GPU cost on high-refresh or low-power
//! devices.

use crate::time::{Duration, HostTime};

/// A frame opportunity delivered by the backend.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct FrameTick {
    /// Host time when the callback fired.
    pub now: HostTime,
    /// Monotonically increasing frame counter.
    pub frame_index: u64,
}

/// Skips frames that arrive sooner than a minimum interval after the last
/// frame that did work.
#[derive(Clone, Copy, Debug)]
pub struct FrameThrottle {
    min_interval: Duration,
    last_work: Option<HostTime>,
}

impl FrameThrottle {
    /// The interval used when throttling is enabled: ~16 ms, one 60 Hz frame.
    pub const DEFAULT_INTERVAL: Duration = Duration::from_millis(16);

    /// Creates a throttle with the given minimum interval.
    ///
    /// A zero interval never skips.
    #[must_use]
    pub const fn new(min_interval: Duration) -> Self {
        Self {
            min_interval,
            last_work: None,
        }
    }

    /// Creates a throttle that never skips.
    #[must_use]
    pub const fn disabled() -> Self {
        Self::new(Duration::ZERO)
    }

    /// Returns `true` if work should be done for a frame at `now`, recording
    /// `now` as the last working frame when it does.
    pub fn should_run(&mut self, now: HostTime) -> bool {
        if let Some(last) = self.last_work
            && now.saturating_duration_since(last) < self.min_interval
        {
            return false;
        }
        self.last_work = Some(now);
        true
    }
}

impl Default for FrameThrottle {
    fn default() -> Self {
        Self::disabled()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn disabled_throttle_runs_every_frame() {
        let mut throttle = FrameThrottle::disabled();
        assert!(throttle.should_run(HostTime(0)));
        assert!(throttle.should_run(HostTime(1)));
        assert!(throttle.should_run(HostTime(1)));
    }

    #[test]
    fn throttle_skips_frames_inside_interval() {
        let mut throttle = FrameThrottle::new(FrameThrottle::DEFAULT_INTERVAL);
        assert!(throttle.should_run(HostTime(0)));
        // 120 Hz tick: 8.3 ms later, skipped.
        assert!(!throttle.should_run(HostTime(8_333)));
        assert!(throttle.should_run(HostTime(16_666)));
        // Skipped frames do not move the reference point.
        assert!(!throttle.should_run(HostTime(24_999)));
        assert!(throttle.should_run(HostTime(32_666)));
    }
}
