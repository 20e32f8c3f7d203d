//! Color themes for pairpad.
//!
//! Two built-ins: `dark` (ANSI 16 colors, safe on any terminal) and
//! `catppuccin-mocha` (RGB, needs truecolor). Syntax colors inside the editor
//! panel come from syntect and are not part of this struct.

use ratatui::style::Color;

/// All color values used across pairpad's UI surfaces.
#[derive(Debug, Clone)]
pub struct Theme {
    // Panel borders
    pub border_active: Color,
    pub border_inactive: Color,

    // Diff panel, one color per `DiffLineKind`
    pub diff_added: Color,
    pub diff_removed: Color,
    pub diff_context: Color,
    pub diff_meta: Color,

    // Chat panel
    /// Role label for the user's lines.
    pub chat_user: Color,
    /// Role label for assistant replies.
    pub chat_assistant: Color,
    /// Placeholder and tip text.
    pub hint: Color,

    // Editor panel
    pub line_number: Color,

    // Status bar
    pub status_bar_bg: Color,
    pub status_bar_fg: Color,
    pub status_mode_normal: Color,
    pub status_mode_input: Color,
    pub selftest_ok: Color,
    pub selftest_failed: Color,
}

impl Theme {
    /// Built-in dark theme using ANSI 16 colors.
    pub fn dark() -> Self {
        Self {
            border_active: Color::Cyan,
            border_inactive: Color::DarkGray,

            diff_added: Color::Green,
            diff_removed: Color::Red,
            diff_context: Color::Reset,
            diff_meta: Color::Cyan,

            chat_user: Color::Yellow,
            chat_assistant: Color::Cyan,
            hint: Color::DarkGray,

            line_number: Color::DarkGray,

            status_bar_bg: Color::DarkGray,
            status_bar_fg: Color::White,
            status_mode_normal: Color::Cyan,
            status_mode_input: Color::Green,
            selftest_ok: Color::Green,
            selftest_failed: Color::Red,
        }
    }

    /// Catppuccin Mocha palette in RGB.
    ///
    /// Palette source: <https://github.com/catppuccin/catppuccin> Mocha variant.
    pub fn catppuccin_mocha() -> Self {
        let green = Color::Rgb(166, 227, 161);    // #a6e3a1
        let red = Color::Rgb(243, 139, 168);      // #f38ba8
        let yellow = Color::Rgb(249, 226, 175);   // #f9e2af
        let teal = Color::Rgb(148, 226, 213);     // #94e2d5
        let lavender = Color::Rgb(180, 190, 254); // #b4befe
        let overlay1 = Color::Rgb(127, 132, 156); // #7f849c
        let surface1 = Color::Rgb(69, 71, 90);    // #45475a
        let text = Color::Rgb(205, 214, 244);     // #cdd6f4

        Self {
            border_active: lavender,
            border_inactive: overlay1,

            diff_added: green,
            diff_removed: red,
            diff_context: text,
            diff_meta: teal,

            chat_user: yellow,
            chat_assistant: lavender,
            hint: overlay1,

            line_number: overlay1,

            status_bar_bg: surface1,
            status_bar_fg: text,
            status_mode_normal: lavender,
            status_mode_input: green,
            selftest_ok: green,
            selftest_failed: red,
        }
    }

    /// Resolves a configured theme name. Unknown names fall back to `dark`.
    pub fn from_name(name: &str) -> Self {
        match name {
            "catppuccin-mocha" | "catppuccin_mocha" => Self::catppuccin_mocha(),
            "dark" => Self::dark(),
            other => {
                tracing::warn!(theme = other, "unknown theme, falling back to 'dark'");
                Self::dark()
            }
        }
    }
}
