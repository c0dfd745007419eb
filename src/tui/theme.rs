//! Section themes and shared style constants.
//!
//! Each section owns a two-stop background gradient and an ambient
//! glyph set; the mapping is static, read-only configuration. Only the
//! navigation controller decides when the active theme changes (at the
//! swap point of a transition) — this module just says what each
//! theme is.

use ratatui::style::{Color, Modifier, Style};

use crate::section::Section;

// ============================================================================
// SECTION THEMES
// ============================================================================

/// Background descriptor plus ambient decoration for one section.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SectionTheme {
    /// Gradient endpoint at the top of the screen (RGB).
    pub top: (u8, u8, u8),
    /// Gradient endpoint at the bottom of the screen (RGB).
    pub bottom: (u8, u8, u8),
    /// Glyphs the ambient particle field draws from.
    pub ambient: &'static [char],
}

/// Static Section → theme mapping.
pub fn section_theme(section: Section) -> SectionTheme {
    match section {
        // Purple dusk.
        Section::Intro => SectionTheme {
            top: (0x66, 0x7e, 0xea),
            bottom: (0x76, 0x4b, 0xa2),
            ambient: &['💖', '✨', '🎉', '💕', '🌟'],
        },
        // Pink to coral.
        Section::Quiz => SectionTheme {
            top: (0xf0, 0x93, 0xfb),
            bottom: (0xf5, 0x57, 0x6c),
            ambient: &['🌍', '💫', '✨', '⭐'],
        },
        // Sky to aqua.
        Section::Gift => SectionTheme {
            top: (0x4f, 0xac, 0xfe),
            bottom: (0x00, 0xf2, 0xfe),
            ambient: &['✨', '💫', '⭐', '🌟'],
        },
        // Sunset to gold.
        Section::Final => SectionTheme {
            top: (0xfa, 0x70, 0x9a),
            bottom: (0xfe, 0xe1, 0x40),
            ambient: &['💖', '💕', '❤', '💗', '💝', '💘'],
        },
    }
}

/// Accent pair for the video panel inside the gift (the green pair
/// the standalone video view used to own).
pub const VIDEO_ACCENT: ((u8, u8, u8), (u8, u8, u8)) = ((0x43, 0xe9, 0x7b), (0x38, 0xf9, 0xd7));

// ============================================================================
// SEMANTIC STYLES
// ============================================================================

/// Section headline.
pub const STYLE_TITLE: Style = Style::new().fg(Color::White).add_modifier(Modifier::BOLD);

/// Body copy.
pub const STYLE_BODY: Style = Style::new().fg(Color::White);

/// De-emphasized copy (hints, captions).
pub const STYLE_DIM: Style = Style::new().fg(Color::Gray);

/// Keybinding hints in the footer.
pub const STYLE_HELP: Style = Style::new().fg(Color::DarkGray);

/// A quiz option before any answer is locked.
pub const STYLE_OPTION: Style = Style::new().fg(Color::White);

/// The locked answer when it is correct / the revealed right answer.
pub const STYLE_CORRECT: Style = Style::new().fg(Color::Green).add_modifier(Modifier::BOLD);

/// The locked answer when it is wrong.
pub const STYLE_INCORRECT: Style = Style::new().fg(Color::Red).add_modifier(Modifier::BOLD);

/// Options dimmed out once an answer is locked.
pub const STYLE_FADED: Style = Style::new().fg(Color::DarkGray);

/// The explanation panel.
pub const STYLE_EXPLANATION: Style = Style::new().fg(Color::LightGreen);

/// Quiz progress bar fill.
pub const STYLE_PROGRESS: Style = Style::new().fg(Color::Yellow);

// ============================================================================
// COLOR HELPERS
// ============================================================================

/// Linear blend between two RGB endpoints, `t` clamped to [0, 1].
pub fn lerp_rgb(a: (u8, u8, u8), b: (u8, u8, u8), t: f32) -> (u8, u8, u8) {
    let t = t.clamp(0.0, 1.0);
    let mix = |x: u8, y: u8| (x as f32 + (y as f32 - x as f32) * t).round() as u8;
    (mix(a.0, b.0), mix(a.1, b.1), mix(a.2, b.2))
}

/// Scale a color toward black; `factor` 1.0 = unchanged, 0.0 = black.
/// Drives the cross-fade during section transitions.
pub fn dim_rgb(color: (u8, u8, u8), factor: f32) -> (u8, u8, u8) {
    let f = factor.clamp(0.0, 1.0);
    let scale = |x: u8| (x as f32 * f).round() as u8;
    (scale(color.0), scale(color.1), scale(color.2))
}

pub fn to_color(rgb: (u8, u8, u8)) -> Color {
    Color::Rgb(rgb.0, rgb.1, rgb.2)
}

// ============================================================================
// TESTS
// ============================================================================
