//! Pure view transitions plus the controller wiring around them.
//!
//! Per-view update functions are the core logic: (view, action) →
//! commands, fully testable without a terminal. The wiring functions
//! (`handle_action`, `handle_tick`, `mount`) interpret those commands:
//! navigation requests go through the navigator's guard, effect
//! requests land in the scoped registry, and the ambient particle set
//! swaps when a transition commits.
//!
//! Input routing: key actions reach the *committed* section's view,
//! and only while no transition is in flight — the transitioning flag
//! is the journey's single lock.

use crate::effects::Trigger;
use crate::nav::NavEvent;
use crate::section::Section;

use crate::content::QuizDeck;

use super::state::{Action, App, Cmd, GiftView, QuizView, VideoPanel};
use super::theme;

// ============================================================================
// PACING
// ============================================================================

/// Ticks between locking an answer and showing the explanation
/// (~1.5 s at the default tick rate).
const EXPLANATION_DELAY: u32 = 45;

/// Ticks between the gift opening and the video reveal.
const VIDEO_REVEAL_DELAY: u32 = 40;

/// Ticks until the second, smaller confetti burst of the opening.
const FOLLOWUP_BURST_DELAY: u32 = 12;

const AMBIENT_PERIOD: u32 = 6;
const RAIN_PERIOD: u32 = 30;
const TYPE_PERIOD: u32 = 2;

const OPEN_BURST: usize = 48;
const FOLLOWUP_BURST: usize = 20;
const AMBIENT_COUNT: usize = 2;
const RAIN_COUNT: usize = 5;

// ============================================================================
// MOUNT
// ============================================================================

/// First mount: apply the Intro theme's ambient set and start its
/// looping effects. No transition sequence runs — there is no previous
/// section to exit.
pub fn mount(app: &mut App) {
    let section = app.nav.current();
    app.particles.swap_set(theme::section_theme(section).ambient);
    install_section_effects(app, section);
}

/// Register the looping effects a freshly shown section owns. All of
/// them are scoped to `section` and revoked together when it exits.
fn install_section_effects(app: &mut App, section: Section) {
    if matches!(section, Section::Intro | Section::Final) {
        app.effects
            .schedule_repeating(section, TYPE_PERIOD, Trigger::TypeTick);
    }
    if app.reduced_motion {
        return;
    }
    app.effects
        .schedule_repeating(section, AMBIENT_PERIOD, Trigger::AmbientDrift);
    if section == Section::Final {
        app.effects
            .schedule_repeating(section, RAIN_PERIOD, Trigger::ConfettiRain);
    }
}

// ============================================================================
// ACTION DISPATCH
// ============================================================================

pub fn handle_action(app: &mut App, action: &Action) {
    if *action == Action::Quit {
        app.should_quit = true;
        return;
    }
    // Interaction is parked while a transition is in flight; the
    // guard below would drop any resulting navigation anyway.
    if app.nav.transitioning() {
        return;
    }

    let section = app.nav.current();
    let cmds = match section {
        Section::Intro => update_intro(app, action),
        Section::Quiz => update_quiz(&mut app.quiz, action, &app.deck),
        Section::Gift => update_gift(&mut app.gift, action),
        Section::Final => Vec::new(),
    };
    apply_cmds(app, section, cmds);
}

fn apply_cmds(app: &mut App, owner: Section, cmds: Vec<Cmd>) {
    for cmd in cmds {
        match cmd {
            Cmd::Complete => {
                if let Some(target) = app.mounted().next_mounted(owner) {
                    // Duplicate completion signals die in this guard.
                    app.nav.navigate_to(target);
                }
            }
            Cmd::Schedule { delay, trigger } => {
                app.effects.schedule(owner, delay, trigger);
            }
            Cmd::Burst { count } => {
                if !app.reduced_motion {
                    app.particles.burst(count);
                }
            }
        }
    }
}

// ============================================================================
// PER-VIEW UPDATES
// ============================================================================

fn update_intro(app: &mut App, action: &Action) -> Vec<Cmd> {
    match action {
        Action::Continue => {
            if app.intro.headline.finished() {
                vec![Cmd::Complete]
            } else {
                app.intro.headline.skip_to_end();
                Vec::new()
            }
        }
        _ => Vec::new(),
    }
}

/// Quiz state machine: lock an answer, reveal on a delay, advance
/// through the deck, complete exactly once.
fn update_quiz(view: &mut QuizView, action: &Action, deck: &QuizDeck) -> Vec<Cmd> {
    match action {
        Action::Choose(n) if !view.completed && view.selected.is_none() => {
            let choice = (*n as usize).wrapping_sub(1);
            let Some(question) = deck.get(view.index) else {
                return Vec::new();
            };
            if choice >= question.options.len() {
                return Vec::new();
            }
            view.selected = Some(choice);
            if choice == question.correct {
                view.score += 1;
            }
            vec![Cmd::Schedule {
                delay: EXPLANATION_DELAY,
                trigger: Trigger::RevealExplanation,
            }]
        }
        Action::Continue if view.completed => {
            if view.signaled {
                Vec::new()
            } else {
                view.signaled = true;
                vec![Cmd::Complete]
            }
        }
        Action::Continue if view.explanation => {
            if view.index + 1 < deck.len() {
                view.index += 1;
                view.selected = None;
                view.explanation = false;
            } else {
                view.completed = true;
                view.explanation = false;
            }
            Vec::new()
        }
        _ => Vec::new(),
    }
}

fn update_gift(view: &mut GiftView, action: &Action) -> Vec<Cmd> {
    match action {
        Action::Continue => match view {
            GiftView::Closed => {
                *view = GiftView::Opening { elapsed: 0 };
                vec![
                    Cmd::Burst { count: OPEN_BURST },
                    Cmd::Schedule {
                        delay: FOLLOWUP_BURST_DELAY,
                        trigger: Trigger::ConfettiBurst,
                    },
                    Cmd::Schedule {
                        delay: VIDEO_REVEAL_DELAY,
                        trigger: Trigger::RevealVideo,
                    },
                ]
            }
            // The box opens on its own clock; input waits.
            GiftView::Opening { .. } => Vec::new(),
            GiftView::Revealed { acknowledged, .. } => {
                if *acknowledged {
                    Vec::new()
                } else {
                    *acknowledged = true;
                    vec![Cmd::Complete]
                }
            }
        },
        _ => Vec::new(),
    }
}

// ============================================================================
// TICK DISPATCH
// ============================================================================

pub fn handle_tick(app: &mut App) {
    app.frame = app.frame.wrapping_add(1);

    // Advance any in-flight transition. On commit, the outgoing
    // section's effects are revoked as one scope and the ambient set
    // is replaced (the old generation fades out on its own).
    let previous = app.nav.current();
    for event in app.nav.tick(app.mounted()) {
        if let NavEvent::Committed { section } = event {
            app.effects.cancel_section(previous);
            app.particles.swap_set(theme::section_theme(section).ambient);
            install_section_effects(app, section);
        }
    }

    for trigger in app.effects.tick() {
        apply_trigger(app, trigger);
    }

    advance_view_clocks(app);
    app.particles.advance();
}

fn apply_trigger(app: &mut App, trigger: Trigger) {
    match trigger {
        Trigger::AmbientDrift => app.particles.emit_ambient(AMBIENT_COUNT),
        Trigger::ConfettiRain => app.particles.rain(RAIN_COUNT),
        Trigger::ConfettiBurst => {
            if !app.reduced_motion {
                app.particles.burst(FOLLOWUP_BURST);
            }
        }
        Trigger::TypeTick => match app.nav.visible() {
            Section::Intro => app.intro.headline.advance(),
            Section::Final => app.finale.message.advance(),
            _ => {}
        },
        Trigger::RevealExplanation => {
            if app.quiz.selected.is_some() && !app.quiz.completed {
                app.quiz.explanation = true;
            }
        }
        Trigger::RevealVideo => {
            if matches!(app.gift, GiftView::Opening { .. }) {
                app.gift = GiftView::Revealed {
                    video: VideoPanel::default(),
                    acknowledged: false,
                };
            }
        }
    }
}

/// Per-tick view-local animation clocks (only for the visible view).
fn advance_view_clocks(app: &mut App) {
    if app.nav.visible() != Section::Gift {
        return;
    }
    match &mut app.gift {
        GiftView::Opening { elapsed } => *elapsed += 1,
        GiftView::Revealed { video, .. } => video.elapsed = video.elapsed.wrapping_add(1),
        GiftView::Closed => {}
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::QuizDeck;

    fn test_app() -> App {
        let mut app = App::new(QuizDeck::builtin(), None, false);
        mount(&mut app);
        app
    }

    /// Tick until the navigator settles.
    fn settle(app: &mut App) {
        for _ in 0..1000 {
            if !app.nav.transitioning() {
                return;
            }
            handle_tick(app);
        }
        panic!("navigator never settled");
    }

    fn finish_intro(app: &mut App) {
        handle_action(app, &Action::Continue); // skip typing
        handle_action(app, &Action::Continue); // complete
        settle(app);
    }

    /// Answer the current question (correctly) and continue past the
    /// explanation.
    fn answer_and_continue(app: &mut App) {
        let correct = app.deck.get(app.quiz.index).unwrap().correct;
        handle_action(app, &Action::Choose(correct as u8 + 1));
        // Explanation arrives on a delay.
        for _ in 0..=EXPLANATION_DELAY {
            handle_tick(app);
        }
        assert!(app.quiz.explanation);
        handle_action(app, &Action::Continue);
    }

    // -- Mount --

    #[test]
    fn mount_installs_intro_effects_without_a_transition() {
        let app = test_app();
        assert!(!app.nav.transitioning());
        assert!(!app.effects.is_empty());
    }

    #[test]
    fn reduced_motion_mount_skips_particle_effects() {
        let mut app = App::new(QuizDeck::builtin(), None, true);
        mount(&mut app);
        // Only the typewriter remains.
        assert_eq!(app.effects.len(), 1);
    }

    // -- Intro --

    #[test]
    fn intro_continue_first_skips_typing_then_completes() {
        let mut app = test_app();
        handle_action(&mut app, &Action::Continue);
        assert!(app.intro.headline.finished());
        assert!(!app.nav.transitioning());

        handle_action(&mut app, &Action::Continue);
        assert!(app.nav.transitioning());
        settle(&mut app);
        assert_eq!(app.nav.current(), Section::Quiz);
    }

    #[test]
    fn intro_completion_after_typewriter_finishes_naturally() {
        let mut app = test_app();
        for _ in 0..500 {
            handle_tick(&mut app);
        }
        assert!(app.intro.headline.finished());
        handle_action(&mut app, &Action::Continue);
        assert!(app.nav.transitioning());
    }

    // -- Controller guards --

    #[test]
    fn input_during_transition_is_dropped() {
        let mut app = test_app();
        finish_intro(&mut app);
        assert_eq!(app.nav.current(), Section::Quiz);

        // Start answering, then a completion-ish flood mid-transition
        // must not corrupt anything: force a transition and spam.
        let before = app.quiz;
        app.nav.navigate_to(Section::Gift);
        handle_action(&mut app, &Action::Choose(1));
        handle_action(&mut app, &Action::Continue);
        assert_eq!(app.quiz, before, "no view mutation while transitioning");
    }

    #[test]
    fn commit_swaps_effects_scope_and_ambient_set() {
        let mut app = test_app();
        let intro_effects = app.effects.len();
        assert!(intro_effects > 0);

        finish_intro(&mut app);
        // Intro's typewriter and drift are gone; quiz installed its own.
        assert!(!app.effects.is_empty());
        assert_eq!(app.nav.current(), Section::Quiz);
    }

    // -- Quiz --

    #[test]
    fn choosing_locks_the_answer_and_schedules_explanation() {
        let mut app = test_app();
        finish_intro(&mut app);

        handle_action(&mut app, &Action::Choose(2));
        assert_eq!(app.quiz.selected, Some(1));
        assert!(!app.quiz.explanation, "explanation is delayed");

        for _ in 0..=EXPLANATION_DELAY {
            handle_tick(&mut app);
        }
        assert!(app.quiz.explanation);
    }

    #[test]
    fn second_choice_is_ignored_once_locked() {
        let mut app = test_app();
        finish_intro(&mut app);

        handle_action(&mut app, &Action::Choose(2));
        handle_action(&mut app, &Action::Choose(3));
        assert_eq!(app.quiz.selected, Some(1));
    }

    #[test]
    fn correct_answer_scores_wrong_does_not() {
        let mut app = test_app();
        finish_intro(&mut app);

        let correct = app.deck.get(0).unwrap().correct;
        let wrong = (correct + 1) % 4;
        handle_action(&mut app, &Action::Choose(wrong as u8 + 1));
        assert_eq!(app.quiz.score, 0);

        // Next question, answer right.
        for _ in 0..=EXPLANATION_DELAY {
            handle_tick(&mut app);
        }
        handle_action(&mut app, &Action::Continue);
        let correct = app.deck.get(1).unwrap().correct;
        handle_action(&mut app, &Action::Choose(correct as u8 + 1));
        assert_eq!(app.quiz.score, 1);
    }

    #[test]
    fn continue_before_explanation_is_a_noop() {
        let mut app = test_app();
        finish_intro(&mut app);

        handle_action(&mut app, &Action::Choose(1));
        handle_action(&mut app, &Action::Continue);
        assert_eq!(app.quiz.index, 0, "cannot continue before the reveal");
    }

    #[test]
    fn final_question_completes_then_signals_once() {
        // The fifth (final) question's continue leads to the
        // completion screen, and the next continue navigates to the
        // gift exactly once.
        let mut app = test_app();
        finish_intro(&mut app);

        let len = app.deck.len();
        for _ in 0..len {
            answer_and_continue(&mut app);
        }
        assert!(app.quiz.completed);
        assert_eq!(app.quiz.score, len);
        assert!(!app.nav.transitioning(), "completion screen shown first");

        handle_action(&mut app, &Action::Continue);
        assert!(app.nav.transitioning());
        settle(&mut app);
        assert_eq!(app.nav.current(), Section::Gift);
    }

    #[test]
    fn repeated_completion_signal_is_tolerated() {
        let mut app = test_app();
        finish_intro(&mut app);
        for _ in 0..app.deck.len() {
            answer_and_continue(&mut app);
        }

        handle_action(&mut app, &Action::Continue);
        settle(&mut app);
        assert_eq!(app.nav.current(), Section::Gift);

        // The quiz can no longer signal; even a forced duplicate would
        // hit the navigator's same-section guard.
        let quiz_before = app.quiz;
        handle_action(&mut app, &Action::Continue);
        assert_eq!(app.quiz, quiz_before);
        assert_eq!(app.nav.current(), Section::Gift);
    }

    // -- Gift --

    fn reach_gift(app: &mut App) {
        finish_intro(app);
        for _ in 0..app.deck.len() {
            answer_and_continue(app);
        }
        handle_action(app, &Action::Continue);
        settle(app);
        assert_eq!(app.nav.current(), Section::Gift);
    }

    #[test]
    fn gift_opens_with_confetti_and_delayed_video() {
        let mut app = test_app();
        reach_gift(&mut app);

        assert_eq!(app.gift, GiftView::Closed);
        handle_action(&mut app, &Action::Continue);
        assert!(matches!(app.gift, GiftView::Opening { .. }));
        assert!(!app.particles.is_empty(), "burst fired immediately");

        for _ in 0..=VIDEO_REVEAL_DELAY {
            handle_tick(&mut app);
        }
        assert!(matches!(app.gift, GiftView::Revealed { .. }));
    }

    #[test]
    fn gift_never_completes_automatically() {
        let mut app = test_app();
        reach_gift(&mut app);
        handle_action(&mut app, &Action::Continue);

        // Run well past the reveal: without an acknowledgment the
        // journey must stay on the gift.
        for _ in 0..300 {
            handle_tick(&mut app);
        }
        assert_eq!(app.nav.current(), Section::Gift);
        assert!(matches!(
            app.gift,
            GiftView::Revealed { acknowledged: false, .. }
        ));
    }

    #[test]
    fn gift_acknowledgment_moves_to_final() {
        let mut app = test_app();
        reach_gift(&mut app);
        handle_action(&mut app, &Action::Continue);
        for _ in 0..=VIDEO_REVEAL_DELAY {
            handle_tick(&mut app);
        }

        handle_action(&mut app, &Action::Continue);
        assert!(app.nav.transitioning());
        settle(&mut app);
        assert_eq!(app.nav.current(), Section::Final);
    }

    #[test]
    fn input_while_opening_is_ignored() {
        let mut app = test_app();
        reach_gift(&mut app);
        handle_action(&mut app, &Action::Continue);

        handle_action(&mut app, &Action::Continue);
        assert!(matches!(app.gift, GiftView::Opening { .. }));
        assert!(!app.nav.transitioning());
    }

    // -- Missing views --

    #[test]
    fn empty_deck_routes_intro_straight_to_gift() {
        let deck: QuizDeck = serde_json::from_str("[]").unwrap();
        let mut app = App::new(deck, None, false);
        mount(&mut app);

        handle_action(&mut app, &Action::Continue);
        handle_action(&mut app, &Action::Continue);
        settle(&mut app);
        assert_eq!(app.nav.current(), Section::Gift);
    }

    // -- Final --

    #[test]
    fn final_section_is_terminal() {
        let mut app = test_app();
        reach_gift(&mut app);
        handle_action(&mut app, &Action::Continue);
        for _ in 0..=VIDEO_REVEAL_DELAY {
            handle_tick(&mut app);
        }
        handle_action(&mut app, &Action::Continue);
        settle(&mut app);

        handle_action(&mut app, &Action::Continue);
        assert!(!app.nav.transitioning());
        assert_eq!(app.nav.current(), Section::Final);
    }

    #[test]
    fn final_rain_keeps_the_field_populated() {
        let mut app = test_app();
        reach_gift(&mut app);
        handle_action(&mut app, &Action::Continue);
        for _ in 0..=VIDEO_REVEAL_DELAY {
            handle_tick(&mut app);
        }
        handle_action(&mut app, &Action::Continue);
        settle(&mut app);

        for _ in 0..120 {
            handle_tick(&mut app);
        }
        assert!(!app.particles.is_empty());
    }

    // -- Quit / teardown --

    #[test]
    fn quit_sets_the_flag_from_anywhere() {
        let mut app = test_app();
        handle_action(&mut app, &Action::Quit);
        assert!(app.should_quit);
    }

    #[test]
    fn teardown_mid_transition_leaves_clean_state() {
        let mut app = test_app();
        finish_intro(&mut app);
        app.nav.navigate_to(Section::Gift);
        handle_tick(&mut app);
        assert!(app.nav.transitioning());

        app.teardown();
        assert!(!app.nav.transitioning());
        assert!(app.effects.is_empty());
        // Nothing fires after teardown.
        let quiz = app.quiz;
        let gift = app.gift;
        for _ in 0..100 {
            assert!(app.effects.tick().is_empty());
        }
        assert_eq!(app.quiz, quiz);
        assert_eq!(app.gift, gift);
    }
}
