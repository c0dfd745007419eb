//! Pure rendering: map App state to the terminal frame.
//!
//! Draw order per frame: gradient background, then the visible
//! section's content, then the particle overlay. The background and
//! content both scale with the navigator's transition progress, which
//! is what makes a section change read as a cross-fade: the outgoing
//! view darkens, the theme swaps, the incoming view brightens.

use ratatui::Frame;
use ratatui::buffer::Buffer;
use ratatui::layout::{Alignment, Constraint, Layout, Rect};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Paragraph, Widget, Wrap};

use crate::content;
use crate::nav::{NavPhase, Navigator};
use crate::particles::ParticleField;
use crate::section::Section;

use super::state::{App, GiftView};
use super::theme;

/// Below this brightness the section content is hidden entirely —
/// the middle of a cross-fade shows only the gradient and particles.
const CONTENT_FADE_FLOOR: f32 = 0.45;

// ============================================================================
// DISPATCH
// ============================================================================

pub fn render(app: &App, frame: &mut Frame) {
    let area = frame.area();
    let section = app.nav.visible();
    let fade = transition_fade(&app.nav);
    let styling = theme::section_theme(section);

    frame.render_widget(
        Background {
            top: styling.top,
            bottom: styling.bottom,
            fade,
        },
        area,
    );

    let chunks = Layout::vertical([
        Constraint::Length(1), // title
        Constraint::Min(0),    // content
        Constraint::Length(1), // help
    ])
    .split(area);

    frame.render_widget(render_title(section), chunks[0]);
    frame.render_widget(render_help(app, section), chunks[2]);

    if fade >= CONTENT_FADE_FLOOR {
        match section {
            Section::Intro => render_intro(app, frame, chunks[1]),
            Section::Quiz => render_quiz(app, frame, chunks[1]),
            Section::Gift => render_gift(app, frame, chunks[1]),
            Section::Final => render_final(app, frame, chunks[1]),
        }
    }

    frame.render_widget(
        ParticleOverlay {
            field: &app.particles,
            fade,
        },
        area,
    );
}

/// Brightness for the current frame: 1.0 when settled, dipping toward
/// zero through the exit phase and recovering through enter.
fn transition_fade(nav: &Navigator) -> f32 {
    match nav.phase_progress() {
        None => 1.0,
        Some((NavPhase::Exit, p)) => 1.0 - 0.9 * p,
        Some((NavPhase::Enter, p)) => 0.1 + 0.9 * p,
    }
}

// ============================================================================
// BACKGROUND + PARTICLES
// ============================================================================

/// Vertical two-stop gradient fill.
struct Background {
    top: (u8, u8, u8),
    bottom: (u8, u8, u8),
    fade: f32,
}

impl Widget for Background {
    fn render(self, area: Rect, buf: &mut Buffer) {
        for row in 0..area.height {
            let t = if area.height <= 1 {
                0.0
            } else {
                row as f32 / (area.height - 1) as f32
            };
            let rgb = theme::dim_rgb(theme::lerp_rgb(self.top, self.bottom, t), self.fade);
            let color = theme::to_color(rgb);
            for col in 0..area.width {
                if let Some(cell) = buf.cell_mut((area.x + col, area.y + row)) {
                    cell.set_char(' ');
                    cell.set_bg(color);
                }
            }
        }
    }
}

/// Glyph overlay for the particle field (unit space → cells).
struct ParticleOverlay<'a> {
    field: &'a ParticleField,
    fade: f32,
}

impl Widget for ParticleOverlay<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if area.width == 0 || area.height == 0 {
            return;
        }
        for p in self.field.iter() {
            let x = area.x + (p.x * (area.width - 1) as f32).round() as u16;
            let y = area.y + (p.y * (area.height - 1) as f32).round() as u16;
            let Some(cell) = buf.cell_mut((x, y)) else {
                continue;
            };
            // Expiring particles dim before they vanish.
            let strength = if p.vitality() < 0.35 { self.fade * 0.5 } else { self.fade };
            let fg = match p.color {
                Some(rgb) => theme::to_color(theme::dim_rgb(rgb, strength)),
                None => theme::to_color(theme::dim_rgb((255, 255, 255), strength)),
            };
            cell.set_char(p.glyph);
            cell.set_fg(fg);
        }
    }
}

// ============================================================================
// CHROME
// ============================================================================

fn render_title(section: Section) -> Paragraph<'static> {
    Paragraph::new(Line::from(vec![
        Span::styled(" birthday-journey", theme::STYLE_TITLE),
        Span::styled(format!("  ·  {}", section.label()), theme::STYLE_DIM),
    ]))
}

fn render_help(app: &App, section: Section) -> Paragraph<'static> {
    let help = match section {
        Section::Intro => " [Enter] begin  [q] quit",
        Section::Quiz if app.quiz.completed => " [Enter] continue  [q] quit",
        Section::Quiz if app.quiz.explanation => " [Enter] next  [q] quit",
        Section::Quiz if app.quiz.selected.is_some() => " [q] quit",
        Section::Quiz => " [1-4] answer  [q] quit",
        Section::Gift => match app.gift {
            GiftView::Closed => " [Enter] open the gift  [q] quit",
            GiftView::Opening { .. } => " [q] quit",
            GiftView::Revealed { .. } => " [Enter] continue  [q] quit",
        },
        Section::Final => " [q] quit",
    };
    Paragraph::new(Span::styled(help, theme::STYLE_HELP))
}

/// Slow on/off blink for call-to-action hints.
fn blink_on(frame: u64) -> bool {
    (frame / 20) % 2 == 0
}

// ============================================================================
// SECTION: INTRO
// ============================================================================

fn render_intro(app: &App, frame: &mut Frame, area: Rect) {
    // Heart pulse on the shared frame clock.
    let heart = if (app.frame / 15) % 2 == 0 { "💖" } else { "💗" };

    let mut lines = vec![
        Line::from(""),
        Line::from(""),
        Line::from(Span::styled(app.intro.headline.line(), theme::STYLE_TITLE)),
        Line::from(""),
        Line::from(Span::styled(content::INTRO_SUBTITLE, theme::STYLE_BODY)),
        Line::from(""),
        Line::from(Span::styled(heart, theme::STYLE_TITLE)),
        Line::from(""),
    ];
    if app.intro.headline.finished() && blink_on(app.frame) {
        lines.push(Line::from(Span::styled(
            "Press Enter to start! 👇",
            theme::STYLE_DIM,
        )));
    }

    let paragraph = Paragraph::new(lines)
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true });
    frame.render_widget(paragraph, area);
}

// ============================================================================
// SECTION: QUIZ
// ============================================================================

fn render_quiz(app: &App, frame: &mut Frame, area: Rect) {
    if app.quiz.completed {
        render_quiz_complete(app, frame, area);
        return;
    }
    let Some(question) = app.deck.get(app.quiz.index) else {
        return;
    };

    let total = app.deck.len();
    let mut lines = vec![
        Line::from(""),
        Line::from(Span::styled(content::QUIZ_TITLE, theme::STYLE_TITLE)),
        Line::from(""),
        progress_line(app.quiz.index + 1, total),
        Line::from(Span::styled(
            format!("Question {} of {}", app.quiz.index + 1, total),
            theme::STYLE_DIM,
        )),
        Line::from(""),
        Line::from(Span::styled(
            format!("{}  {}", question.glyph, question.prompt),
            theme::STYLE_BODY,
        )),
        Line::from(""),
    ];

    for (i, option) in question.options.iter().enumerate() {
        let letter = (b'A' + i as u8) as char;
        let (marker, style) = option_presentation(app, i, question.correct);
        lines.push(Line::from(Span::styled(
            format!("{marker}{letter}. {option}"),
            style,
        )));
    }

    if app.quiz.explanation {
        lines.push(Line::from(""));
        lines.push(Line::from(Span::styled(
            format!("💡 {}", question.explanation),
            theme::STYLE_EXPLANATION,
        )));
        lines.push(Line::from(""));
        let hint = if app.quiz.index + 1 < total {
            "🚀 Press Enter — Next Question ✨"
        } else {
            "🎉 Press Enter — See Results 🏆"
        };
        if blink_on(app.frame) {
            lines.push(Line::from(Span::styled(hint, theme::STYLE_DIM)));
        }
    }

    let paragraph = Paragraph::new(lines)
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true });
    frame.render_widget(paragraph, area);
}

/// Marker and style for one quiz option given the lock state.
fn option_presentation(app: &App, index: usize, correct: usize) -> (&'static str, ratatui::style::Style) {
    match app.quiz.selected {
        None => ("  ", theme::STYLE_OPTION),
        Some(sel) if index == sel => {
            if sel == correct {
                ("✓ ", theme::STYLE_CORRECT)
            } else {
                ("✗ ", theme::STYLE_INCORRECT)
            }
        }
        // Once the explanation lands, the right answer is spotlighted
        // even when it wasn't chosen.
        Some(_) if app.quiz.explanation && index == correct => ("✓ ", theme::STYLE_CORRECT),
        Some(_) => ("  ", theme::STYLE_FADED),
    }
}

fn progress_line(done: usize, total: usize) -> Line<'static> {
    const WIDTH: usize = 30;
    let filled = if total == 0 { 0 } else { WIDTH * done / total };
    let bar: String = "█".repeat(filled) + &"░".repeat(WIDTH - filled);
    Line::from(Span::styled(bar, theme::STYLE_PROGRESS))
}

fn render_quiz_complete(app: &App, frame: &mut Frame, area: Rect) {
    let mut lines = vec![
        Line::from(""),
        Line::from(Span::styled("🎓", theme::STYLE_TITLE)),
        Line::from(""),
        Line::from(Span::styled(content::QUIZ_COMPLETE_TITLE, theme::STYLE_TITLE)),
        Line::from(""),
        Line::from(Span::styled(
            format!("Score: {}/{} 🌟", app.quiz.score, app.deck.len()),
            theme::STYLE_BODY,
        )),
        Line::from(""),
        Line::from(Span::styled("🎉✨🎊", theme::STYLE_BODY)),
        Line::from(""),
        Line::from(Span::styled(
            "Your linguistic skills are incredible! Now let's see what surprise awaits you...",
            theme::STYLE_BODY,
        )),
        Line::from(""),
    ];
    if blink_on(app.frame) {
        lines.push(Line::from(Span::styled(
            "Continue Adventure 🎁 — press Enter",
            theme::STYLE_DIM,
        )));
    }

    let paragraph = Paragraph::new(lines)
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true });
    frame.render_widget(paragraph, area);
}

// ============================================================================
// SECTION: GIFT
// ============================================================================

const GIFT_CLOSED_ART: [&str; 6] = [
    "      🎀      ",
    "╔══════╦══════╗",
    "║      ║      ║",
    "╠══════╬══════╣",
    "║      ║      ║",
    "╚══════╩══════╝",
];

const GIFT_AJAR_ART: [&str; 6] = [
    "   🎀          ",
    " ╔══════╦══════╗",
    "╔══════╦══════╗ ",
    "║      ║      ║ ",
    "║      ║      ║ ",
    "╚══════╩══════╝ ",
];

const GIFT_OPEN_ART: [&str; 6] = [
    "  ✨   🎬   ✨  ",
    "               ",
    "╔═════════════╗",
    "║             ║",
    "║             ║",
    "╚═════════════╝",
];

fn render_gift(app: &App, frame: &mut Frame, area: Rect) {
    match &app.gift {
        GiftView::Closed => {
            let mut lines = vec![
                Line::from(""),
                Line::from(Span::styled(content::GIFT_TITLE, theme::STYLE_TITLE)),
                Line::from(""),
                Line::from(Span::styled(content::GIFT_INSTRUCTION, theme::STYLE_BODY)),
                Line::from(""),
            ];
            lines.extend(gift_art(&GIFT_CLOSED_ART));
            lines.push(Line::from(""));
            lines.push(Line::from(Span::styled("✨ 💫 ⭐ 🌟 💫 ✨", theme::STYLE_DIM)));
            if blink_on(app.frame) {
                lines.push(Line::from(Span::styled("Open me! 👆✨", theme::STYLE_DIM)));
            }
            centered(lines, frame, area);
        }
        GiftView::Opening { elapsed } => {
            let art = if *elapsed < 16 { &GIFT_AJAR_ART } else { &GIFT_OPEN_ART };
            let mut lines = vec![
                Line::from(""),
                Line::from(Span::styled(content::GIFT_TITLE, theme::STYLE_TITLE)),
                Line::from(""),
                Line::from(""),
            ];
            lines.extend(gift_art(art));
            lines.push(Line::from(""));
            lines.push(Line::from(Span::styled("✨ Opening... ✨", theme::STYLE_BODY)));
            centered(lines, frame, area);
        }
        GiftView::Revealed { video, .. } => render_video(app, video.elapsed, frame, area),
    }
}

fn gift_art(art: &[&'static str]) -> Vec<Line<'static>> {
    art.iter()
        .map(|row| Line::from(Span::styled(*row, theme::STYLE_BODY)))
        .collect()
}

/// The embedded video: a looping playback panel with the old video
/// section's green accent.
fn render_video(app: &App, elapsed: u32, frame: &mut Frame, area: Rect) {
    const LOOP_TICKS: u32 = 300;
    const BAR_WIDTH: usize = 28;

    let position = elapsed % LOOP_TICKS;
    let filled = (position as usize * BAR_WIDTH) / LOOP_TICKS as usize;
    let bar: String = "█".repeat(filled) + &"░".repeat(BAR_WIDTH - filled);
    let seconds = position / 30;
    let total = LOOP_TICKS / 30;

    let (accent_a, accent_b) = theme::VIDEO_ACCENT;
    let accent = theme::to_color(theme::lerp_rgb(
        accent_a,
        accent_b,
        position as f32 / LOOP_TICKS as f32,
    ));

    // A sliding row of hearts stands in for the picture.
    let offset = (elapsed / 3) as usize % 8;
    let reel: String = (0..8)
        .map(|i| if (i + offset) % 4 == 0 { "💖" } else { " · " })
        .collect();

    let mut lines = vec![
        Line::from(""),
        Line::from(Span::styled(content::VIDEO_TITLE, theme::STYLE_TITLE)),
        Line::from(""),
        Line::from(Span::styled("╭──────────────────────────────╮", theme::STYLE_DIM)),
        Line::from(Span::styled(reel, theme::STYLE_BODY)),
        Line::from(vec![
            Span::styled("▶ ", ratatui::style::Style::new().fg(accent)),
            Span::styled(bar, ratatui::style::Style::new().fg(accent)),
        ]),
        Line::from(Span::styled(
            format!("0:{seconds:02} / 0:{total:02}  ⟳ loop"),
            theme::STYLE_DIM,
        )),
        Line::from(Span::styled("╰──────────────────────────────╯", theme::STYLE_DIM)),
        Line::from(""),
        Line::from(Span::styled(content::VIDEO_CAPTION, theme::STYLE_BODY)),
        Line::from(""),
    ];
    if blink_on(app.frame) {
        lines.push(Line::from(Span::styled(
            "Press Enter when you're ready 💖",
            theme::STYLE_DIM,
        )));
    }
    centered(lines, frame, area);
}

// ============================================================================
// SECTION: FINAL
// ============================================================================

fn render_final(app: &App, frame: &mut Frame, area: Rect) {
    let mut lines = vec![
        Line::from(""),
        Line::from(Span::styled(content::FINAL_TITLE, theme::STYLE_TITLE)),
        Line::from(""),
        Line::from(Span::styled("❤️", theme::STYLE_TITLE)),
        Line::from(""),
        Line::from(Span::styled(app.finale.message.line(), theme::STYLE_TITLE)),
        Line::from(""),
    ];
    for body in content::FINAL_BODY {
        lines.push(Line::from(Span::styled(body, theme::STYLE_BODY)));
        lines.push(Line::from(""));
    }
    lines.push(Line::from(Span::styled("Te iubesc mult! 💕", theme::STYLE_TITLE)));
    lines.push(Line::from(""));
    for greeting in content::FINAL_GREETINGS {
        lines.push(Line::from(Span::styled(greeting, theme::STYLE_BODY)));
    }
    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled("🎂🎉🎊✨🌟💫🎈🎁", theme::STYLE_BODY)));
    lines.push(Line::from(""));
    for sig in content::SIGNATURE {
        lines.push(Line::from(Span::styled(sig, theme::STYLE_DIM)));
    }

    centered(lines, frame, area);
}

// ============================================================================
// SHARED
// ============================================================================

fn centered(lines: Vec<Line<'static>>, frame: &mut Frame, area: Rect) {
    let paragraph = Paragraph::new(lines)
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true });
    frame.render_widget(paragraph, area);
}

// ============================================================================
// TESTS
// ============================================================================
