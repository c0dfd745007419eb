//! Section navigation: serialized transitions with exactly-once handoff.
//!
//! The `Navigator` owns the "which section is active" state and is the
//! only writer of it. A transition is the ordered sequence
//! exit → theme-swap → enter → commit, measured on the tick clock.
//! Guards: a second request while one is in flight is dropped, as is a
//! request for the already-active section. `current()` keeps reporting
//! the pre-transition section until the full sequence completes.
//!
//! The navigator is pure data plus a `tick` function; it never touches
//! the terminal. The effects layer interprets the events it emits.

use crate::section::{Section, SectionSet};

// ============================================================================
// TIMING
// ============================================================================

/// Fixed phase durations, in ticks.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TransitionTiming {
    /// Ticks spent fading out the outgoing view.
    pub exit: u32,
    /// Ticks spent fading in the incoming view.
    pub enter: u32,
}

impl TransitionTiming {
    /// Default pacing: ~0.4s out, ~0.6s in at the 30 Hz tick rate.
    pub const DEFAULT: TransitionTiming = TransitionTiming { exit: 12, enter: 18 };

    /// Zero-length phases; a transition settles on the next tick.
    /// Used by reduced-motion mode.
    pub const INSTANT: TransitionTiming = TransitionTiming { exit: 0, enter: 0 };
}

// ============================================================================
// TRANSITION STATE
// ============================================================================

/// Which half of the sequence an active transition is in.
///
/// The theme swap and visibility flip happen atomically on the
/// Exit → Enter boundary.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavPhase {
    Exit,
    Enter,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Active {
    target: Section,
    phase: NavPhase,
    remaining: u32,
}

/// Boundary event emitted by `tick`. The caller reacts; the navigator
/// itself only tracks section state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavEvent {
    /// Exit finished: the target's theme applies now and the target
    /// view becomes the visible one. `current()` is still the old
    /// section at this point.
    ThemeSwapped { target: Section },
    /// Enter finished: `current` now equals `section` and the guard is
    /// released. Ambient decorations for the new section start here.
    Committed { section: Section },
}

// ============================================================================
// NAVIGATOR
// ============================================================================

/// Single-writer navigation state machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Navigator {
    current: Section,
    timing: TransitionTiming,
    active: Option<Active>,
}

impl Navigator {
    /// Start of the journey: Intro active, nothing in flight.
    pub fn new() -> Self {
        Navigator::with_timing(TransitionTiming::DEFAULT)
    }

    pub fn with_timing(timing: TransitionTiming) -> Self {
        Navigator {
            current: Section::Intro,
            timing,
            active: None,
        }
    }

    /// The committed section. Mid-transition reads return the
    /// pre-transition value; `current` changes only at commit.
    pub fn current(&self) -> Section {
        self.current
    }

    pub fn transitioning(&self) -> bool {
        self.active.is_some()
    }

    /// The section a renderer should draw: the outgoing view during
    /// exit, the incoming view from the theme swap onward.
    pub fn visible(&self) -> Section {
        match self.active {
            Some(Active { phase: NavPhase::Exit, .. }) | None => self.current,
            Some(Active { phase: NavPhase::Enter, target, .. }) => target,
        }
    }

    /// Phase and completion fraction of the active transition, for
    /// fade rendering. `None` when settled.
    pub fn phase_progress(&self) -> Option<(NavPhase, f32)> {
        let active = self.active?;
        let total = match active.phase {
            NavPhase::Exit => self.timing.exit,
            NavPhase::Enter => self.timing.enter,
        };
        let progress = if total == 0 {
            1.0
        } else {
            1.0 - active.remaining as f32 / total as f32
        };
        Some((active.phase, progress))
    }

    /// Request a transition. Returns whether the request was accepted.
    ///
    /// Dropped (no state change, no animation) while a transition is
    /// in flight or when `target` is already active. Repeated
    /// completion signals from a view land here and die quietly.
    pub fn navigate_to(&mut self, target: Section) -> bool {
        if self.active.is_some() || target == self.current {
            return false;
        }
        self.active = Some(Active {
            target,
            phase: NavPhase::Exit,
            remaining: self.timing.exit,
        });
        true
    }

    /// Advance the active transition by one tick.
    ///
    /// `mounted` is the set of locatable views. If the outgoing or the
    /// target view has gone missing, the remaining phases are skipped
    /// and the transition commits immediately: the guard must never
    /// stay locked over a view that isn't there. Worst case is a
    /// skipped fade, never frozen navigation.
    pub fn tick(&mut self, mounted: SectionSet) -> Vec<NavEvent> {
        let mut events = Vec::new();
        let Some(mut active) = self.active.take() else {
            return events;
        };

        if !mounted.contains(active.target) || !mounted.contains(self.current) {
            if active.phase == NavPhase::Exit {
                events.push(NavEvent::ThemeSwapped { target: active.target });
            }
            self.current = active.target;
            events.push(NavEvent::Committed { section: active.target });
            return events;
        }

        if active.remaining > 0 {
            active.remaining -= 1;
        }

        // Fall through zero-length phases so INSTANT settles in one tick.
        loop {
            if active.remaining > 0 {
                self.active = Some(active);
                break;
            }
            match active.phase {
                NavPhase::Exit => {
                    events.push(NavEvent::ThemeSwapped { target: active.target });
                    active.phase = NavPhase::Enter;
                    active.remaining = self.timing.enter;
                }
                NavPhase::Enter => {
                    self.current = active.target;
                    events.push(NavEvent::Committed { section: active.target });
                    break;
                }
            }
        }
        events
    }

    /// Teardown: drop any in-flight transition without committing.
    ///
    /// Afterwards `transitioning()` is false and `current` still holds
    /// the pre-transition section, so a remount starts clean.
    pub fn cancel(&mut self) {
        self.active = None;
    }
}

impl Default for Navigator {
    fn default() -> Self {
        Navigator::new()
    }
}

// ============================================================================
// TESTS
// ============================================================================
