// Copyright 2026 the Ribbon Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Cascade delays for reveal texts entering view together.
//!
//! One [`StaggerCoordinator`] is shared by every reveal on a page. Each
//! priority trigger waits one step longer than the previous one, so a block
//! of headings scrolling into view animates as a cascade. The count resets
//! once no priority trigger has happened for [`StaggerCoordinator::RESET_AFTER`].

use crate::time::{Duration, HostTime};

/// Hands out stagger delays for reveal triggers.
#[derive(Clone, Debug, Default)]
pub struct StaggerCoordinator {
    counter: u64,
    last_priority: Option<HostTime>,
}

impl StaggerCoordinator {
    /// Delay added per earlier priority trigger.
    pub const PRIORITY_STEP: Duration = Duration::from_millis(15);
    /// Delay for non-priority triggers.
    pub const NORMAL_DELAY: Duration = Duration::from_millis(50);
    /// Quiet period after which the cascade restarts.
    pub const RESET_AFTER: Duration = Duration::from_millis(5_000);

    /// Creates a coordinator with an empty cascade.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the delay for a trigger at `now`.
    pub fn delay_for(&mut self, priority: bool, now: HostTime) -> Duration {
        if !priority {
            return Self::NORMAL_DELAY;
        }
        if let Some(last) = self.last_priority
            && now.saturating_duration_since(last) >= Self::RESET_AFTER
        {
            self.counter = 0;
        }
        let delay = Self::PRIORITY_STEP.saturating_mul(self.counter);
        self.counter += 1;
        self.last_priority = Some(now);
        delay
    }

    /// Returns the number of priority triggers in the current cascade.
    #[must_use]
    pub fn counter(&self) -> u64 {
        self.counter
    }
}
