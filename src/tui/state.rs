//! TUI state algebra: pure types, zero effects.
//!
//! These types define the journey's entire state space. The navigator
//! owns which section is active; each section view carries only its
//! own local state machine and never touches navigation directly — a
//! view that wants to move the journey forward returns `Cmd::Complete`
//! and the controller wiring decides what that means.
//!
//! Design principle: view structs hold transient per-section state
//! (typed-out characters, the locked answer, the lid of the gift box).
//! Shared data (the quiz deck, the particle field, the effect
//! registry) lives in `App`.

use crossterm::event::KeyEvent;

use crate::content::{self, QuizDeck};
use crate::effects::{EffectRegistry, Trigger};
use crate::nav::{Navigator, TransitionTiming};
use crate::particles::ParticleField;
use crate::section::{Section, SectionSet};

// ============================================================================
// APP EVENTS
// ============================================================================

/// Everything the event loop can receive from its channel.
///
/// Two producers feed a single mpsc channel: a key reader thread sends
/// `Key` variants, a ticker thread sends `Tick` at the frame rate. The
/// event loop dispatches keys through `map_key → handle_action` and
/// ticks through `handle_tick`.
#[derive(Debug)]
pub enum AppEvent {
    /// A terminal key event from the crossterm reader thread.
    Key(KeyEvent),
    /// One step of the shared animation clock.
    Tick,
}

// ============================================================================
// ACTIONS
// ============================================================================

/// Semantic user action, decoupled from raw key events.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    /// Pick answer 1–4 on the quiz.
    Choose(u8),
    /// Advance the current section's interaction (continue, open,
    /// acknowledge).
    Continue,
    /// Quit the application.
    Quit,
}

// ============================================================================
// COMMANDS
// ============================================================================

/// What a view update asks the controller to do.
///
/// `Complete` is the single navigation capability a section view
/// holds; the rest describe effects for the shared registry. Pure
/// update code returns these, effectful wiring interprets them.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Cmd {
    /// The view's local interaction finished; move the journey on.
    Complete,
    /// Fire `trigger` once after `delay` ticks.
    Schedule { delay: u32, trigger: Trigger },
    /// Spawn a confetti burst right now.
    Burst { count: usize },
}

// ============================================================================
// TYPEWRITER
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum TypePhase {
    Typing,
    Holding { remaining: u32 },
    Clearing,
}

/// Ticks a fully-typed looping message is held before clearing.
const HOLD_TICKS: u32 = 60;

/// Ticks a message out character by character. In looping mode the
/// message is held, cleared, and replaced by the next one forever; in
/// one-shot mode it types once and stays.
#[derive(Debug, Clone, PartialEq)]
pub struct Typewriter {
    messages: Vec<String>,
    looping: bool,
    msg: usize,
    shown: usize,
    phase: TypePhase,
    done: bool,
}

impl Typewriter {
    pub fn once(text: String) -> Self {
        Typewriter {
            messages: vec![text],
            looping: false,
            msg: 0,
            shown: 0,
            phase: TypePhase::Typing,
            done: false,
        }
    }

    pub fn looping(messages: Vec<String>) -> Self {
        Typewriter {
            messages,
            looping: true,
            msg: 0,
            shown: 0,
            phase: TypePhase::Typing,
            done: false,
        }
    }

    fn current_len(&self) -> usize {
        self.messages
            .get(self.msg)
            .map(|m| m.chars().count())
            .unwrap_or(0)
    }

    /// One `TypeTick` worth of progress.
    pub fn advance(&mut self) {
        if self.done || self.messages.is_empty() {
            return;
        }
        match self.phase {
            TypePhase::Typing => {
                if self.shown < self.current_len() {
                    self.shown += 1;
                }
                if self.shown >= self.current_len() {
                    if self.looping {
                        self.phase = TypePhase::Holding { remaining: HOLD_TICKS };
                    } else {
                        self.done = true;
                    }
                }
            }
            TypePhase::Holding { ref mut remaining } => {
                if *remaining > 0 {
                    *remaining -= 1;
                } else {
                    self.phase = TypePhase::Clearing;
                }
            }
            TypePhase::Clearing => {
                self.shown = self.shown.saturating_sub(2);
                if self.shown == 0 {
                    self.msg = (self.msg + 1) % self.messages.len();
                    self.phase = TypePhase::Typing;
                }
            }
        }
    }

    /// The visible prefix of the current message.
    pub fn line(&self) -> String {
        self.messages
            .get(self.msg)
            .map(|m| m.chars().take(self.shown).collect())
            .unwrap_or_default()
    }

    /// One-shot mode only: has the full text been typed?
    pub fn finished(&self) -> bool {
        self.done
    }

    /// Jump straight to the fully-typed message (impatient Enter).
    pub fn skip_to_end(&mut self) {
        self.shown = self.current_len();
        if !self.looping {
            self.done = true;
        }
    }
}

// ============================================================================
// SECTION VIEWS
// ============================================================================

/// Intro: a typed-out headline, then a "press enter" gate.
#[derive(Debug, Clone, PartialEq)]
pub struct IntroView {
    pub headline: Typewriter,
}

impl IntroView {
    pub fn new(recipient: Option<&str>) -> Self {
        IntroView {
            headline: Typewriter::once(content::headline(recipient)),
        }
    }
}

/// Quiz: Answering → (answer locked) → Revealed → next question,
/// until Completed. Completion may signal exactly once.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct QuizView {
    /// Index of the question on screen.
    pub index: usize,
    /// Locked-in answer for the current question.
    pub selected: Option<usize>,
    /// Explanation panel visible (arrives on a delay after locking).
    pub explanation: bool,
    pub score: usize,
    pub completed: bool,
    /// Completion already signalled; further continues are no-ops.
    pub signaled: bool,
}

impl QuizView {
    pub fn new() -> Self {
        QuizView::default()
    }
}

/// Gift: Closed → Opening → Revealed(video). The completion signal
/// fires only from Revealed, on an explicit acknowledgment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GiftView {
    Closed,
    Opening {
        /// Ticks since the box was clicked open; drives the lid art.
        elapsed: u32,
    },
    Revealed {
        video: VideoPanel,
        acknowledged: bool,
    },
}

/// The embedded video playback panel (loops until acknowledged).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct VideoPanel {
    pub elapsed: u32,
}

/// Final: terminal section, looping typewriter, no completion.
#[derive(Debug, Clone, PartialEq)]
pub struct FinalView {
    pub message: Typewriter,
}

impl FinalView {
    pub fn new() -> Self {
        FinalView {
            message: Typewriter::looping(
                content::FINAL_MESSAGES.iter().map(|m| m.to_string()).collect(),
            ),
        }
    }
}

impl Default for FinalView {
    fn default() -> Self {
        FinalView::new()
    }
}

// ============================================================================
// APPLICATION STATE
// ============================================================================

/// Top-level TUI model.
#[derive(Debug)]
pub struct App {
    pub nav: Navigator,
    pub intro: IntroView,
    pub quiz: QuizView,
    pub gift: GiftView,
    pub finale: FinalView,

    /// Read-only question sequence.
    pub deck: QuizDeck,
    pub particles: ParticleField,
    pub effects: EffectRegistry,

    /// Zero-length transitions, no decorative particles.
    pub reduced_motion: bool,
    /// Frame counter for pulse-style animations derived from time.
    pub frame: u64,
    /// Set to true when the app should exit on the next tick.
    pub should_quit: bool,
}

impl App {
    pub fn new(deck: QuizDeck, recipient: Option<&str>, reduced_motion: bool) -> Self {
        let timing = if reduced_motion {
            TransitionTiming::INSTANT
        } else {
            TransitionTiming::DEFAULT
        };
        App {
            nav: Navigator::with_timing(timing),
            intro: IntroView::new(recipient),
            quiz: QuizView::new(),
            gift: GiftView::Closed,
            finale: FinalView::new(),
            deck,
            particles: ParticleField::new(),
            effects: EffectRegistry::new(),
            reduced_motion,
            frame: 0,
            should_quit: false,
        }
    }

    /// Sections whose views can currently be located. The quiz view
    /// only mounts with at least one question to show.
    pub fn mounted(&self) -> SectionSet {
        let mut set = SectionSet::all();
        if self.deck.is_empty() {
            set.remove(Section::Quiz);
        }
        set
    }

    /// Unmount: revoke every pending effect and drop any in-flight
    /// transition so nothing keeps mutating a torn-down view.
    pub fn teardown(&mut self) {
        self.effects.cancel_all();
        self.nav.cancel();
        self.particles.clear();
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn app_starts_on_intro_with_nothing_pending() {
        let app = App::new(QuizDeck::builtin(), None, false);
        assert_eq!(app.nav.current(), Section::Intro);
        assert!(!app.nav.transitioning());
        assert!(app.effects.is_empty());
        assert!(!app.should_quit);
    }

    #[test]
    fn empty_deck_unmounts_the_quiz() {
        let deck: QuizDeck = serde_json::from_str("[]").unwrap();
        let app = App::new(deck, None, false);
        assert!(!app.mounted().contains(Section::Quiz));
        assert!(app.mounted().contains(Section::Gift));
    }

    #[test]
    fn teardown_clears_effects_and_transition() {
        let mut app = App::new(QuizDeck::builtin(), None, false);
        app.effects
            .schedule_repeating(Section::Intro, 1, Trigger::AmbientDrift);
        app.nav.navigate_to(Section::Quiz);

        app.teardown();
        assert!(app.effects.is_empty());
        assert!(!app.nav.transitioning());
        assert!(app.particles.is_empty());
    }

    #[test]
    fn quiz_view_starts_answering() {
        let view = QuizView::new();
        assert_eq!(view.index, 0);
        assert!(view.selected.is_none());
        assert!(!view.explanation);
        assert!(!view.completed);
    }

    #[test]
    fn typewriter_types_one_char_per_advance() {
        let mut tw = Typewriter::once("hey".to_string());
        assert_eq!(tw.line(), "");
        tw.advance();
        assert_eq!(tw.line(), "h");
        tw.advance();
        tw.advance();
        assert_eq!(tw.line(), "hey");
        assert!(tw.finished());
    }

    #[test]
    fn typewriter_once_stays_finished() {
        let mut tw = Typewriter::once("ab".to_string());
        for _ in 0..10 {
            tw.advance();
        }
        assert_eq!(tw.line(), "ab");
        assert!(tw.finished());
    }

    #[test]
    fn typewriter_skip_jumps_to_full_text() {
        let mut tw = Typewriter::once("long message".to_string());
        tw.advance();
        tw.skip_to_end();
        assert_eq!(tw.line(), "long message");
        assert!(tw.finished());
    }

    #[test]
    fn typewriter_loop_cycles_to_next_message() {
        let mut tw = Typewriter::looping(vec!["ab".to_string(), "cd".to_string()]);
        // Type "ab" (2), hold (HOLD_TICKS + 1), clear (1), then type.
        for _ in 0..(2 + HOLD_TICKS + 2 + 3) {
            tw.advance();
        }
        assert!(!tw.finished(), "looping typewriter never finishes");
        assert!(tw.line().is_empty() || tw.line().starts_with('c'));
    }

    #[test]
    fn typewriter_counts_chars_not_bytes() {
        let mut tw = Typewriter::once("héé".to_string());
        tw.advance();
        tw.advance();
        assert_eq!(tw.line(), "hé");
    }

    #[test]
    fn video_panel_defaults_to_start() {
        let panel = VideoPanel::default();
        assert_eq!(panel.elapsed, 0);
    }
}
