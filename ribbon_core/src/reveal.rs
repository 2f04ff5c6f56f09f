// Copyright 2026 the Ribbon Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Scramble-reveal text.
//!
//! A [`Scramble`] shows its text as-is until triggered, then replaces every
//! hidden character with a random one on each tick until the text is
//! revealed again. Two modes:
//!
//! - **Iteration**: every tick re-randomizes all hidden characters; after
//!   [`RevealConfig::max_iterations`] ticks the original text snaps back.
//! - **Sequential**: every tick locks a batch of positions to their original
//!   character, in the order given by [`RevealDirection`], and re-randomizes
//!   the rest. The reveal ends when every position is locked.
//!
//! Whitespace is never scrambled.
//!
//! Ticks are paced by [`Scramble::on_frame`], which runs at most one tick per
//! call once [`RevealConfig::speed`] has elapsed since the previous one.

use alloc::collections::BTreeSet;
use alloc::string::String;
use alloc::vec::Vec;

use rand::Rng;
use rand::seq::SliceRandom;

use crate::stagger::StaggerCoordinator;
use crate::time::{Duration, HostTime};
use crate::trace::{RevealEvent, RevealPhase, Tracer};

/// Characters drawn from when scrambling, unless configured otherwise.
pub const DEFAULT_CHARACTERS: &str =
    "ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz!@#$%^&*()_+";

/// What starts the animation.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum AnimateOn {
    /// Pointer entering the text.
    #[default]
    Hover,
    /// The text scrolling into view.
    View,
    /// Either.
    Both,
}

impl AnimateOn {
    fn on_hover(self) -> bool {
        matches!(self, Self::Hover | Self::Both)
    }

    fn on_view(self) -> bool {
        matches!(self, Self::View | Self::Both)
    }
}

/// Order in which sequential mode locks positions.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum RevealDirection {
    /// Left to right.
    #[default]
    Start,
    /// Right to left.
    End,
    /// Alternating outward from the middle.
    Center,
}

/// Configuration for one scramble-reveal text.
#[derive(Clone, Debug, PartialEq)]
pub struct RevealConfig {
    /// Time between ticks.
    pub speed: Duration,
    /// Ticks before iteration mode snaps back.
    pub max_iterations: u32,
    /// Lock positions one batch at a time instead of iterating.
    pub sequential: bool,
    /// Lock order in sequential mode.
    pub direction: RevealDirection,
    /// Scramble by shuffling the text's own hidden characters.
    pub use_original_chars_only: bool,
    /// Character pool for scrambling.
    pub characters: String,
    /// Trigger source.
    pub animate_on: AnimateOn,
    /// Whether completion is final. `None` means "only when animating on
    /// view".
    pub trigger_once: Option<bool>,
    /// Faster batches and a shared cascade delay.
    pub priority: bool,
}

impl RevealConfig {
    /// Default configuration: 25 ms ticks, 10 iterations, hover trigger.
    #[must_use]
    pub fn new() -> Self {
        Self {
            speed: Duration::from_millis(25),
            max_iterations: 10,
            sequential: false,
            direction: RevealDirection::Start,
            use_original_chars_only: false,
            characters: String::from(DEFAULT_CHARACTERS),
            animate_on: AnimateOn::Hover,
            trigger_once: None,
            priority: false,
        }
    }

    /// Returns the effective trigger-once policy.
    #[must_use]
    pub fn should_trigger_once(&self) -> bool {
        self.trigger_once.unwrap_or(self.animate_on == AnimateOn::View)
    }

    /// Positions locked per sequential tick for a text of `len` characters.
    #[must_use]
    pub fn reveal_batch(&self, len: usize) -> usize {
        let per = if self.priority { 20 } else { 30 };
        len.div_ceil(per).max(1)
    }
}

impl Default for RevealConfig {
    fn default() -> Self {
        Self::new()
    }
}

/// Returns the next position to lock, or `None` when all are locked.
///
/// `Center` alternates `mid, mid − 1, mid + 1, mid − 2, ...`; when the
/// candidate is out of range or already locked, the lowest unlocked position
/// is used instead.
pub(crate) fn next_index(
    direction: RevealDirection,
    len: usize,
    revealed: &BTreeSet<usize>,
) -> Option<usize> {
    let size = revealed.len();
    if size >= len {
        return None;
    }
    let candidate = match direction {
        RevealDirection::Start => Some(size),
        RevealDirection::End => (len - 1).checked_sub(size),
        RevealDirection::Center => {
            let mid = len / 2;
            let offset = size / 2;
            if size % 2 == 0 {
                Some(mid + offset)
            } else {
                mid.checked_sub(offset + 1)
            }
        }
    };
    match candidate {
        Some(index) if index < len && !revealed.contains(&index) => Some(index),
        _ => (0..len).find(|i| !revealed.contains(i)),
    }
}

fn is_whitespace(c: char) -> bool {
    matches!(c, ' ' | '\n' | '\r' | '\t')
}

/// One scramble-reveal text instance.
#[derive(Debug)]
pub struct Scramble<R> {
    config: RevealConfig,
    original: Vec<char>,
    display: Vec<char>,
    pool: Vec<char>,
    revealed: BTreeSet<usize>,
    phase: RevealPhase,
    iteration: u32,
    next_tick: Option<HostTime>,
    pending_trigger: Option<HostTime>,
    has_completed_once: bool,
    view_armed: bool,
    rng: R,
}

impl<R: Rng> Scramble<R> {
    /// Creates an idle instance showing `text`.
    pub fn new(text: &str, config: RevealConfig, rng: R) -> Self {
        let original: Vec<char> = text.chars().collect();
        let pool = config.characters.chars().collect();
        Self {
            display: original.clone(),
            original,
            pool,
            config,
            revealed: BTreeSet::new(),
            phase: RevealPhase::Idle,
            iteration: 0,
            next_tick: None,
            pending_trigger: None,
            has_completed_once: false,
            view_armed: true,
            rng,
        }
    }

    /// Returns the configuration.
    #[must_use]
    pub fn config(&self) -> &RevealConfig {
        &self.config
    }

    /// Returns the current phase.
    #[must_use]
    pub fn phase(&self) -> RevealPhase {
        self.phase
    }

    /// Returns the locked positions.
    #[must_use]
    pub fn revealed(&self) -> &BTreeSet<usize> {
        &self.revealed
    }

    /// Returns `true` once a reveal has run to completion.
    #[must_use]
    pub fn has_completed_once(&self) -> bool {
        self.has_completed_once
    }

    /// Returns the text as currently displayed.
    #[must_use]
    pub fn text(&self) -> String {
        self.display.iter().collect()
    }

    /// Returns each displayed character with whether it is final.
    ///
    /// Outside [`RevealPhase::Scrambling`] every character is final.
    pub fn cells(&self) -> impl Iterator<Item = (char, bool)> + '_ {
        let scrambling = self.phase == RevealPhase::Scrambling;
        self.display
            .iter()
            .enumerate()
            .map(move |(i, &c)| (c, !scrambling || self.revealed.contains(&i)))
    }

    /// Returns `true` while a visibility observer is still useful.
    #[must_use]
    pub fn wants_visibility(&self) -> bool {
        self.config.animate_on.on_view() && self.view_armed
    }

    /// Returns `true` while a tick or a staggered trigger is scheduled.
    ///
    /// Hosts only need to call [`on_frame`](Self::on_frame) while this holds.
    #[must_use]
    pub fn needs_frames(&self) -> bool {
        self.pending_trigger.is_some() || self.next_tick.is_some()
    }

    /// Pointer entered the text.
    pub fn hover_enter(&mut self, now: HostTime, tracer: &mut Tracer<'_>) {
        if self.config.animate_on.on_hover() {
            self.trigger(now, tracer);
        }
    }

    /// Pointer left the text.
    pub fn hover_leave(&mut self, now: HostTime, tracer: &mut Tracer<'_>) {
        if self.config.animate_on.on_hover() {
            self.release(now, tracer);
        }
    }

    /// Visibility changed.
    ///
    /// Entering view schedules a trigger after the coordinator's stagger
    /// delay. Leaving view cancels a pending trigger and, unless completion
    /// is final, resets the text.
    pub fn visibility_changed(
        &mut self,
        visible: bool,
        now: HostTime,
        stagger: &mut StaggerCoordinator,
        tracer: &mut Tracer<'_>,
    ) {
        if !self.wants_visibility() {
            return;
        }
        if visible {
            if self.pending_trigger.is_none() && self.phase == RevealPhase::Idle {
                let delay = stagger.delay_for(self.config.priority, now);
                self.pending_trigger = Some(now.saturating_add(delay));
                if self.config.should_trigger_once() {
                    self.view_armed = false;
                }
            }
        } else {
            self.pending_trigger = None;
            if self.config.animate_on == AnimateOn::View {
                self.release(now, tracer);
            }
        }
    }

    /// Starts the animation unless completion is final and has happened.
    pub fn trigger(&mut self, now: HostTime, tracer: &mut Tracer<'_>) {
        if self.config.should_trigger_once() && self.has_completed_once {
            return;
        }
        if self.phase == RevealPhase::Scrambling {
            return;
        }
        self.revealed.clear();
        self.iteration = 0;
        self.set_phase(RevealPhase::Scrambling, now, tracer);
        self.next_tick = Some(now.saturating_add(self.config.speed));
    }

    /// Stops the animation and shows the original text.
    ///
    /// Locked positions are kept only when completion is final and has
    /// happened.
    pub fn release(&mut self, now: HostTime, tracer: &mut Tracer<'_>) {
        self.next_tick = None;
        self.pending_trigger = None;
        self.display.clone_from(&self.original);
        if !self.config.should_trigger_once() || !self.has_completed_once {
            self.revealed.clear();
            self.set_phase(RevealPhase::Idle, now, tracer);
        }
    }

    /// Fires a due trigger and runs a due tick.
    ///
    /// Returns `true` when the displayed text changed.
    pub fn on_frame(&mut self, now: HostTime, tracer: &mut Tracer<'_>) -> bool {
        if let Some(at) = self.pending_trigger
            && now >= at
        {
            self.pending_trigger = None;
            self.trigger(now, tracer);
        }
        match self.next_tick {
            Some(at) if now >= at => {
                self.next_tick = Some(now.saturating_add(self.config.speed));
                self.tick(now, tracer);
                true
            }
            _ => false,
        }
    }

    /// Runs one animation step.
    pub fn tick(&mut self, now: HostTime, tracer: &mut Tracer<'_>) {
        if self.phase != RevealPhase::Scrambling {
            return;
        }
        if self.config.sequential {
            let batch = self.config.reveal_batch(self.original.len());
            for _ in 0..batch {
                let Some(index) =
                    next_index(self.config.direction, self.original.len(), &self.revealed)
                else {
                    break;
                };
                self.revealed.insert(index);
            }
            self.scramble();
            if self.revealed.len() >= self.original.len() {
                self.complete(now, tracer);
            }
        } else {
            self.scramble();
            self.iteration += 1;
            if self.iteration >= self.config.max_iterations {
                self.complete(now, tracer);
            }
        }
    }

    fn complete(&mut self, now: HostTime, tracer: &mut Tracer<'_>) {
        self.display.clone_from(&self.original);
        self.next_tick = None;
        self.has_completed_once = true;
        self.set_phase(RevealPhase::Revealed, now, tracer);
    }

    fn scramble(&mut self) {
        let hidden = |i: usize, c: char| !is_whitespace(c) && !self.revealed.contains(&i);
        if self.config.use_original_chars_only {
            let mut chars: Vec<char> = self
                .original
                .iter()
                .enumerate()
                .filter(|&(i, &c)| hidden(i, c))
                .map(|(_, &c)| c)
                .collect();
            chars.shuffle(&mut self.rng);
            let mut shuffled = chars.into_iter();
            for (i, &c) in self.original.iter().enumerate() {
                self.display[i] = if hidden(i, c) {
                    shuffled.next().unwrap_or(c)
                } else {
                    c
                };
            }
        } else {
            for (i, &c) in self.original.iter().enumerate() {
                self.display[i] = if hidden(i, c) {
                    self.pool.choose(&mut self.rng).copied().unwrap_or(c)
                } else {
                    c
                };
            }
        }
    }

    fn set_phase(&mut self, phase: RevealPhase, now: HostTime, tracer: &mut Tracer<'_>) {
        if self.phase == phase {
            return;
        }
        self.phase = phase;
        tracer.reveal(&RevealEvent {
            now,
            phase,
            revealed: self.revealed.len(),
            len: self.original.len(),
        });
    }
}

#[cfg(test)]
mod tests {
    use alloc::vec;

    use rand::SeedableRng;
    use rand::rngs::SmallRng;

    use super::*;

    fn rng() -> SmallRng {
        SmallRng::seed_from_u64(0x5eed)
    }

    fn sequential(direction: RevealDirection) -> RevealConfig {
        RevealConfig {
            sequential: true,
            direction,
            ..RevealConfig::new()
        }
    }

    fn order(direction: RevealDirection, len: usize) -> Vec<usize> {
        let mut revealed = BTreeSet::new();
        let mut out = Vec::new();
        while let Some(i) = next_index(direction, len, &revealed) {
            revealed.insert(i);
            out.push(i);
        }
        out
    }

    #[test]
    fn direction_orders() {
        assert_eq!(order(RevealDirection::Start, 4), vec![0, 1, 2, 3]);
        assert_eq!(order(RevealDirection::End, 4), vec![3, 2, 1, 0]);
        assert_eq!(order(RevealDirection::Center, 5), vec![2, 1, 3, 0, 4]);
        assert_eq!(order(RevealDirection::Center, 4), vec![2, 1, 3, 0]);
        assert_eq!(order(RevealDirection::Center, 1), vec![0]);
        assert_eq!(order(RevealDirection::Center, 0), Vec::<usize>::new());
    }

    #[test]
    fn center_falls_back_to_lowest_unrevealed() {
        let revealed: BTreeSet<usize> = [2, 3].into_iter().collect();
        // Even size: candidate mid + 1 = 3 is taken.
        assert_eq!(next_index(RevealDirection::Center, 5, &revealed), Some(0));
    }

    #[test]
    fn sequential_start_reveals_left_to_right() {
        let mut tracer = Tracer::none();
        let mut s = Scramble::new("AB", sequential(RevealDirection::Start), rng());
        s.trigger(HostTime(0), &mut tracer);
        s.tick(HostTime(25_000), &mut tracer);
        assert!(s.revealed().contains(&0));
        assert!(!s.revealed().contains(&1));
        let cells: Vec<(char, bool)> = s.cells().collect();
        assert_eq!(cells[0], ('A', true));
        assert!(!cells[1].1, "position 1 is still hidden");
        assert!(DEFAULT_CHARACTERS.contains(cells[1].0));

        s.tick(HostTime(50_000), &mut tracer);
        assert_eq!(s.revealed().len(), 2);
        assert_eq!(s.text(), "AB");
        assert_eq!(s.phase(), RevealPhase::Revealed);
    }

    #[test]
    fn original_chars_only_permutes_hidden_characters() {
        let mut tracer = Tracer::none();
        let config = RevealConfig {
            use_original_chars_only: true,
            max_iterations: 50,
            ..RevealConfig::new()
        };
        let mut s = Scramble::new("AA ", config, rng());
        s.trigger(HostTime(0), &mut tracer);
        for i in 1..50 {
            s.tick(HostTime(i * 25_000), &mut tracer);
            assert_eq!(s.text(), "AA ");
        }

        let config = RevealConfig {
            use_original_chars_only: true,
            sequential: true,
            ..RevealConfig::new()
        };
        let text = "tattoo studio";
        let mut s = Scramble::new(text, config, rng());
        s.trigger(HostTime(0), &mut tracer);
        let mut expected: Vec<char> = text.chars().collect();
        expected.sort_unstable();
        while s.phase() == RevealPhase::Scrambling {
            s.tick(HostTime(0), &mut tracer);
            let mut shown: Vec<char> = s.text().chars().collect();
            shown.sort_unstable();
            assert_eq!(shown, expected, "display is a permutation of the original");
            assert_eq!(s.text().chars().nth(6), Some(' '), "whitespace stays put");
        }
    }

    #[test]
    fn whitespace_is_never_scrambled() {
        let mut tracer = Tracer::none();
        let mut s = Scramble::new("a b\tc\n", RevealConfig::new(), rng());
        s.trigger(HostTime(0), &mut tracer);
        for _ in 0..9 {
            s.tick(HostTime(0), &mut tracer);
            let shown: Vec<char> = s.text().chars().collect();
            assert_eq!(shown[1], ' ');
            assert_eq!(shown[3], '\t');
            assert_eq!(shown[5], '\n');
        }
    }

    #[test]
    fn iteration_mode_snaps_back_after_max_iterations() {
        let mut tracer = Tracer::none();
        let config = RevealConfig {
            max_iterations: 3,
            ..RevealConfig::new()
        };
        let mut s = Scramble::new("INK", config, rng());
        s.trigger(HostTime(0), &mut tracer);
        s.tick(HostTime(0), &mut tracer);
        s.tick(HostTime(0), &mut tracer);
        assert_eq!(s.phase(), RevealPhase::Scrambling);
        s.tick(HostTime(0), &mut tracer);
        assert_eq!(s.phase(), RevealPhase::Revealed);
        assert_eq!(s.text(), "INK");
        assert!(s.has_completed_once());
    }

    #[test]
    fn on_frame_paces_ticks() {
        let mut tracer = Tracer::none();
        let mut s = Scramble::new("AB", sequential(RevealDirection::Start), rng());
        s.hover_enter(HostTime(0), &mut tracer);
        assert!(!s.on_frame(HostTime(16_000), &mut tracer), "first tick waits a full period");
        assert!(s.on_frame(HostTime(25_000), &mut tracer));
        assert_eq!(s.revealed().len(), 1);
        assert!(!s.on_frame(HostTime(40_000), &mut tracer));
        assert!(s.on_frame(HostTime(50_000), &mut tracer));
        assert_eq!(s.phase(), RevealPhase::Revealed);
        assert!(!s.on_frame(HostTime(1_000_000), &mut tracer), "no ticks after completion");
    }

    #[test]
    fn hover_leave_resets_without_trigger_once() {
        let mut tracer = Tracer::none();
        let mut s = Scramble::new("ABCD", sequential(RevealDirection::End), rng());
        s.hover_enter(HostTime(0), &mut tracer);
        s.tick(HostTime(0), &mut tracer);
        assert_eq!(s.revealed().len(), 1);
        s.hover_leave(HostTime(0), &mut tracer);
        assert_eq!(s.phase(), RevealPhase::Idle);
        assert!(s.revealed().is_empty());
        assert_eq!(s.text(), "ABCD");
        // Re-arms.
        s.hover_enter(HostTime(0), &mut tracer);
        assert_eq!(s.phase(), RevealPhase::Scrambling);
    }

    #[test]
    fn trigger_once_does_not_rearm() {
        let mut tracer = Tracer::none();
        let config = RevealConfig {
            trigger_once: Some(true),
            max_iterations: 1,
            ..RevealConfig::new()
        };
        let mut s = Scramble::new("OK", config, rng());
        s.hover_enter(HostTime(0), &mut tracer);
        s.tick(HostTime(0), &mut tracer);
        assert_eq!(s.phase(), RevealPhase::Revealed);
        s.hover_leave(HostTime(0), &mut tracer);
        assert_eq!(s.phase(), RevealPhase::Revealed);
        s.hover_enter(HostTime(0), &mut tracer);
        assert_eq!(s.phase(), RevealPhase::Revealed, "completion is final");
    }

    #[test]
    fn trigger_once_defaults_follow_animate_on() {
        let view = RevealConfig {
            animate_on: AnimateOn::View,
            ..RevealConfig::new()
        };
        assert!(view.should_trigger_once());
        assert!(!RevealConfig::new().should_trigger_once());
        let both = RevealConfig {
            animate_on: AnimateOn::Both,
            ..RevealConfig::new()
        };
        assert!(!both.should_trigger_once());
    }

    #[test]
    fn reveal_batch_scales_with_length() {
        let mut config = RevealConfig::new();
        assert_eq!(config.reveal_batch(0), 1);
        assert_eq!(config.reveal_batch(2), 1);
        assert_eq!(config.reveal_batch(31), 2);
        config.priority = true;
        assert_eq!(config.reveal_batch(31), 2);
        assert_eq!(config.reveal_batch(41), 3);
    }

    #[test]
    fn hover_is_ignored_when_animating_on_view() {
        let mut tracer = Tracer::none();
        let config = RevealConfig {
            animate_on: AnimateOn::View,
            ..RevealConfig::new()
        };
        let mut s = Scramble::new("WORK:", config, rng());
        s.hover_enter(HostTime(0), &mut tracer);
        assert_eq!(s.phase(), RevealPhase::Idle);
    }

    #[test]
    fn visibility_trigger_waits_for_stagger_delay() {
        let mut tracer = Tracer::none();
        let mut stagger = StaggerCoordinator::new();
        let config = RevealConfig {
            animate_on: AnimateOn::View,
            ..RevealConfig::new()
        };
        let mut s = Scramble::new("RECENT_WORK", config, rng());
        assert!(s.wants_visibility());
        s.visibility_changed(true, HostTime(0), &mut stagger, &mut tracer);
        assert!(!s.wants_visibility(), "trigger-once disarms the observer");
        s.on_frame(HostTime(49_000), &mut tracer);
        assert_eq!(s.phase(), RevealPhase::Idle);
        s.on_frame(HostTime(50_000), &mut tracer);
        assert_eq!(s.phase(), RevealPhase::Scrambling);
    }

    #[test]
    fn frames_are_needed_only_while_work_is_scheduled() {
        let mut tracer = Tracer::none();
        let mut stagger = StaggerCoordinator::new();
        let config = RevealConfig {
            animate_on: AnimateOn::View,
            ..sequential(RevealDirection::Start)
        };
        let mut s = Scramble::new("AB", config, rng());
        assert!(!s.needs_frames(), "idle text sleeps");

        s.visibility_changed(true, HostTime(0), &mut stagger, &mut tracer);
        assert_eq!(s.phase(), RevealPhase::Idle);
        assert!(s.needs_frames(), "staggered trigger is pending");

        let mut now = HostTime(0);
        while s.phase() != RevealPhase::Revealed {
            assert!(s.needs_frames());
            assert!(now < HostTime(1_000_000), "reveal never finished");
            now = now.saturating_add(Duration(16_000));
            s.on_frame(now, &mut tracer);
        }
        assert!(!s.needs_frames(), "revealed text sleeps");
    }

    #[test]
    fn trigger_once_view_stops_wanting_visibility_after_entering() {
        let mut tracer = Tracer::none();
        let mut stagger = StaggerCoordinator::new();
        let config = RevealConfig {
            animate_on: AnimateOn::View,
            ..RevealConfig::new()
        };
        let mut s = Scramble::new("MORE", config, rng());
        s.visibility_changed(false, HostTime(0), &mut stagger, &mut tracer);
        assert!(s.wants_visibility(), "offscreen reports keep it armed");
        s.visibility_changed(true, HostTime(1_000), &mut stagger, &mut tracer);
        assert!(!s.wants_visibility());
        // Later reports are ignored, so the pending trigger survives them.
        s.visibility_changed(false, HostTime(2_000), &mut stagger, &mut tracer);
        s.on_frame(HostTime(60_000), &mut tracer);
        assert_eq!(s.phase(), RevealPhase::Scrambling);
    }

    #[test]
    fn hover_leave_stops_scheduling_frames() {
        let mut tracer = Tracer::none();
        let mut s = Scramble::new("ABCD", RevealConfig::new(), rng());
        s.hover_enter(HostTime(0), &mut tracer);
        assert!(s.needs_frames());
        s.hover_leave(HostTime(5_000), &mut tracer);
        assert_eq!(s.phase(), RevealPhase::Idle);
        assert!(!s.needs_frames());
    }

    #[test]
    fn leaving_view_cancels_pending_trigger() {
        let mut tracer = Tracer::none();
        let mut stagger = StaggerCoordinator::new();
        let config = RevealConfig {
            animate_on: AnimateOn::View,
            trigger_once: Some(false),
            ..RevealConfig::new()
        };
        let mut s = Scramble::new("INK", config, rng());
        s.visibility_changed(true, HostTime(0), &mut stagger, &mut tracer);
        s.visibility_changed(false, HostTime(10_000), &mut stagger, &mut tracer);
        s.on_frame(HostTime(100_000), &mut tracer);
        assert_eq!(s.phase(), RevealPhase::Idle);
        assert!(s.wants_visibility());
    }

    #[test]
    fn empty_text_completes_immediately_in_sequential_mode() {
        let mut tracer = Tracer::none();
        let mut s = Scramble::new("", sequential(RevealDirection::Center), rng());
        s.trigger(HostTime(0), &mut tracer);
        s.tick(HostTime(0), &mut tracer);
        assert_eq!(s.phase(), RevealPhase::Revealed);
        assert_eq!(s.text(), "");
    }

    #[test]
    fn empty_character_pool_keeps_original() {
        let mut tracer = Tracer::none();
        let config = RevealConfig {
            characters: String::new(),
            ..RevealConfig::new()
        };
        let mut s = Scramble::new("XY", config, rng());
        s.trigger(HostTime(0), &mut tracer);
        s.tick(HostTime(0), &mut tracer);
        assert_eq!(s.text(), "XY");
    }
}
