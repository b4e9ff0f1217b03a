use std::sync::OnceLock;

use ratatui::style::{Color, Modifier, Style};
use serde::Deserialize;

static THEME: OnceLock<Theme> = OnceLock::new();

/// Install the theme built from config. Only the first call has any effect.
pub fn init(config: &ThemeConfig) {
    let _ = THEME.set(config.clone().into_theme());
}

/// Get the active theme, falling back to the default if `init` never ran.
pub fn current() -> &'static Theme {
    THEME.get_or_init(Theme::default)
}

// Const fallbacks used in places that need compile-time styles
pub const DIM_STYLE: Style = Style::new().fg(Color::DarkGray);
pub const KEY_STYLE: Style = Style::new().fg(Color::Cyan).add_modifier(Modifier::BOLD);

#[derive(Debug, Clone)]
pub struct Theme {
    pub name: String,
    pub today: Style,
    pub selected: Style,
    pub taken: Style,
    pub header: Style,
    pub dim: Style,
    pub border: Style,
    pub focus_border: Style,
    pub status: Style,
    pub button: Style,
    pub button_focused: Style,
    pub dialog: Style,
}

impl Default for Theme {
    fn default() -> Self {
        Self {
            name: "default".to_string(),
            today: Style::default().fg(Color::Black).bg(Color::Yellow),
            selected: Style::default().fg(Color::Black).bg(Color::Cyan),
            taken: Style::default().fg(Color::Black).bg(Color::Green),
            header: Style::default().fg(Color::White).add_modifier(Modifier::BOLD),
            dim: Style::default().fg(Color::DarkGray),
            border: Style::default().fg(Color::Gray),
            focus_border: Style::default().fg(Color::Cyan),
            status: Style::default().fg(Color::White).bg(Color::DarkGray),
            button: Style::default().fg(Color::White).bg(Color::DarkGray),
            button_focused: Style::default()
                .fg(Color::Black)
                .bg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
            dialog: Style::default().fg(Color::Green),
        }
    }
}

impl Theme {
    /// Get a built-in preset by name.
    pub fn preset(name: &str) -> Self {
        match name {
            "dracula" => Self::dracula(),
            "gruvbox" => Self::gruvbox(),
            "nord" => Self::nord(),
            _ => Self::default(),
        }
    }

    fn dracula() -> Self {
        let bg = Color::Rgb(68, 71, 90);
        let fg = Color::Rgb(248, 248, 242);
        Self {
            name: "dracula".to_string(),
            today: Style::default().fg(Color::Black).bg(Color::Rgb(189, 147, 249)), // purple
            selected: Style::default().fg(Color::Black).bg(Color::Rgb(139, 233, 253)), // cyan
            taken: Style::default().fg(Color::Black).bg(Color::Rgb(80, 250, 123)), // green
            header: Style::default().fg(fg).add_modifier(Modifier::BOLD),
            dim: Style::default().fg(Color::Rgb(98, 114, 164)),
            border: Style::default().fg(bg),
            focus_border: Style::default().fg(Color::Rgb(139, 233, 253)),
            status: Style::default().fg(fg).bg(bg),
            button: Style::default().fg(fg).bg(bg),
            button_focused: Style::default()
                .fg(Color::Black)
                .bg(Color::Rgb(139, 233, 253))
                .add_modifier(Modifier::BOLD),
            dialog: Style::default().fg(Color::Rgb(80, 250, 123)),
        }
    }

    fn gruvbox() -> Self {
        let bg = Color::Rgb(80, 73, 69);
        let fg = Color::Rgb(235, 219, 178);
        Self {
            name: "gruvbox".to_string(),
            today: Style::default().fg(Color::Black).bg(Color::Rgb(250, 189, 47)), // yellow
            selected: Style::default().fg(Color::Black).bg(Color::Rgb(131, 165, 152)), // aqua
            taken: Style::default().fg(Color::Black).bg(Color::Rgb(184, 187, 38)), // green
            header: Style::default().fg(fg).add_modifier(Modifier::BOLD),
            dim: Style::default().fg(Color::Rgb(146, 131, 116)),
            border: Style::default().fg(Color::Rgb(102, 92, 84)),
            focus_border: Style::default().fg(Color::Rgb(131, 165, 152)),
            status: Style::default().fg(fg).bg(bg),
            button: Style::default().fg(fg).bg(bg),
            button_focused: Style::default()
                .fg(Color::Black)
                .bg(Color::Rgb(131, 165, 152))
                .add_modifier(Modifier::BOLD),
            dialog: Style::default().fg(Color::Rgb(184, 187, 38)),
        }
    }

    fn nord() -> Self {
        let bg = Color::Rgb(67, 76, 94);
        let fg = Color::Rgb(229, 233, 240);
        Self {
            name: "nord".to_string(),
            today: Style::default().fg(Color::Black).bg(Color::Rgb(235, 203, 139)), // yellow
            selected: Style::default().fg(Color::Black).bg(Color::Rgb(136, 192, 208)), // frost
            taken: Style::default().fg(Color::Black).bg(Color::Rgb(163, 190, 140)), // green
            header: Style::default().fg(fg).add_modifier(Modifier::BOLD),
            dim: Style::default().fg(Color::Rgb(76, 86, 106)),
            border: Style::default().fg(bg),
            focus_border: Style::default().fg(Color::Rgb(136, 192, 208)),
            status: Style::default().fg(fg).bg(bg),
            button: Style::default().fg(fg).bg(bg),
            button_focused: Style::default()
                .fg(Color::Black)
                .bg(Color::Rgb(136, 192, 208))
                .add_modifier(Modifier::BOLD),
            dialog: Style::default().fg(Color::Rgb(163, 190, 140)),
        }
    }
}

// ── TOML config types ──

/// The `[theme]` table of the config file.
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct ThemeConfig {
    pub preset: Option<String>,
    pub today_fg: Option<String>,
    pub today_bg: Option<String>,
    pub selected_fg: Option<String>,
    pub selected_bg: Option<String>,
    pub taken_fg: Option<String>,
    pub taken_bg: Option<String>,
    pub header_fg: Option<String>,
    pub dim_fg: Option<String>,
    pub border_fg: Option<String>,
    pub status_fg: Option<String>,
    pub status_bg: Option<String>,
}

impl ThemeConfig {
    pub fn into_theme(self) -> Theme {
        // Start from preset or default
        let mut theme = self
            .preset
            .as_deref()
            .map(Theme::preset)
            .unwrap_or_default();

        // Override individual colors
        if let Some(c) = self.today_fg.as_deref().and_then(parse_color) {
            theme.today = theme.today.fg(c);
        }
        if let Some(c) = self.today_bg.as_deref().and_then(parse_color) {
            theme.today = theme.today.bg(c);
        }
        if let Some(c) = self.selected_fg.as_deref().and_then(parse_color) {
            theme.selected = theme.selected.fg(c);
        }
        if let Some(c) = self.selected_bg.as_deref().and_then(parse_color) {
            theme.selected = theme.selected.bg(c);
        }
        if let Some(c) = self.taken_fg.as_deref().and_then(parse_color) {
            theme.taken = theme.taken.fg(c);
        }
        if let Some(c) = self.taken_bg.as_deref().and_then(parse_color) {
            theme.taken = theme.taken.bg(c);
        }
        if let Some(c) = self.header_fg.as_deref().and_then(parse_color) {
            theme.header = theme.header.fg(c);
        }
        if let Some(c) = self.dim_fg.as_deref().and_then(parse_color) {
            theme.dim = theme.dim.fg(c);
        }
        if let Some(c) = self.border_fg.as_deref().and_then(parse_color) {
            theme.border = theme.border.fg(c);
        }
        if let Some(c) = self.status_fg.as_deref().and_then(parse_color) {
            theme.status = theme.status.fg(c);
        }
        if let Some(c) = self.status_bg.as_deref().and_then(parse_color) {
            theme.status = theme.status.bg(c);
        }

        theme
    }
}

/// Parse a color string: hex "#rrggbb", or named colors.
fn parse_color(s: &str) -> Option<Color> {
    let s = s.trim();
    if s.starts_with('#') && s.len() == 7 {
        let r = u8::from_str_radix(&s[1..3], 16).ok()?;
        let g = u8::from_str_radix(&s[3..5], 16).ok()?;
        let b = u8::from_str_radix(&s[5..7], 16).ok()?;
        return Some(Color::Rgb(r, g, b));
    }
    match s.to_lowercase().as_str() {
        "black" => Some(Color::Black),
        "red" => Some(Color::Red),
        "green" => Some(Color::Green),
        "yellow" => Some(Color::Yellow),
        "blue" => Some(Color::Blue),
        "magenta" => Some(Color::Magenta),
        "cyan" => Some(Color::Cyan),
        "white" => Some(Color::White),
        "gray" | "grey" => Some(Color::Gray),
        "darkgray" | "darkgrey" => Some(Color::DarkGray),
        "lightgreen" => Some(Color::LightGreen),
        "lightblue" => Some(Color::LightBlue),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_hex_and_names() {
        assert_eq!(parse_color("#10ff00"), Some(Color::Rgb(16, 255, 0)));
        assert_eq!(parse_color(" Green "), Some(Color::Green));
        assert_eq!(parse_color("#12"), None);
        assert_eq!(parse_color("chartreuse"), None);
    }

    #[test]
    fn overrides_apply_on_top_of_preset() {
        let config = ThemeConfig {
            preset: Some("gruvbox".to_string()),
            taken_bg: Some("blue".to_string()),
            ..Default::default()
        };
        let theme = config.into_theme();
        assert_eq!(theme.name, "gruvbox");
        assert_eq!(theme.taken.bg, Some(Color::Blue));
    }

    #[test]
    fn unknown_preset_is_default() {
        assert_eq!(Theme::preset("solarized").name, "default");
    }
}
