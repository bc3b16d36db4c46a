use crate::backend::colors::{Color, Palette};
use anyhow::Context;

const STYLE: &str = include_str!("style.scss");

const BUTTON_SHADE: f64 = 1.1;
const ACTIVE_SHADE: f64 = 0.9;

/// CSS class of the menu window.
pub const MENU_CLASS: &str = "menu";
/// CSS class of confirmation dialogs.
pub const CONFIRM_CLASS: &str = "confirm";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StyleSheet {
    pub background: Color,
    pub foreground: Color,
    pub border: Color,
    pub button: Color,
    pub hover_background: Color,
    pub hover_foreground: Color,
    pub active: Color,
}

pub fn render(palette: &Palette) -> StyleSheet {
    StyleSheet {
        background: palette.background,
        foreground: palette.foreground,
        border: palette.accent,
        button: palette.background.shade(BUTTON_SHADE),
        hover_background: palette.accent,
        hover_foreground: palette.background,
        active: palette.accent.shade(ACTIVE_SHADE),
    }
}

impl StyleSheet {
    pub fn menu_css(&self) -> anyhow::Result<String> {
        self.compile(MENU_CLASS)
    }

    pub fn dialog_css(&self) -> anyhow::Result<String> {
        self.compile(CONFIRM_CLASS)
    }

    fn compile(&self, window_class: &str) -> anyhow::Result<String> {
        let scss = format!(
            "{}\n{STYLE}\nwindow.{window_class} {{ @include theme; }}\n",
            self.variables()
        );
        grass::from_string(scss, &grass::Options::default())
            .map_err(|e| anyhow::anyhow!("{e}"))
            .context("Invalid stylesheet")
    }

    fn variables(&self) -> String {
        [
            ("background", self.background),
            ("foreground", self.foreground),
            ("border", self.border),
            ("button", self.button),
            ("hover-background", self.hover_background),
            ("hover-foreground", self.hover_foreground),
            ("active", self.active),
        ]
        .iter()
        .map(|(name, color)| format!("${name}: {color};\n"))
        .collect()
    }
}
