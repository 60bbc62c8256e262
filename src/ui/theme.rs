use ratatui::style::Color;

use crate::document::ColorToken;

/// Colors for the terminal chrome. Calendar annotations use the document's
/// own [`ColorTheme`](crate::document::ColorTheme).
#[derive(Debug, Clone, PartialEq)]
pub struct Theme {
    pub name: String,
    pub title: Color,
    pub selected_bg: Color,
    pub selected_fg: Color,
    pub today: Color,
    pub month_header: Color,
    pub weekday_header: Color,
    pub week_number: Color,
    pub inactive_day: Color,
    pub status_bar: Color,
    pub help_title: Color,
    pub help_section: Color,
    pub command_mode: Color,
    pub error: Color,
    pub success: Color,
}

impl Theme {
    pub fn default_theme() -> Self {
        Self {
            name: "default".to_string(),
            title: Color::Cyan,
            selected_bg: Color::Blue,
            selected_fg: Color::White,
            today: Color::Green,
            month_header: Color::Yellow,
            weekday_header: Color::DarkGray,
            week_number: Color::DarkGray,
            inactive_day: Color::DarkGray,
            status_bar: Color::White,
            help_title: Color::Cyan,
            help_section: Color::Yellow,
            command_mode: Color::White,
            error: Color::Red,
            success: Color::Green,
        }
    }

    pub fn gruvbox() -> Self {
        Self {
            name: "gruvbox".to_string(),
            title: Color::Rgb(251, 184, 108),
            selected_bg: Color::Rgb(60, 56, 54),
            selected_fg: Color::Rgb(235, 219, 178),
            today: Color::Rgb(184, 187, 38),
            month_header: Color::Rgb(250, 189, 47),
            weekday_header: Color::Rgb(254, 128, 25),
            week_number: Color::Rgb(146, 131, 116),
            inactive_day: Color::Rgb(102, 92, 84),
            status_bar: Color::Rgb(235, 219, 178),
            help_title: Color::Rgb(251, 184, 108),
            help_section: Color::Rgb(254, 128, 25),
            command_mode: Color::Rgb(235, 219, 178),
            error: Color::Rgb(251, 73, 52),
            success: Color::Rgb(184, 187, 38),
        }
    }

    pub fn nord() -> Self {
        Self {
            name: "nord".to_string(),
            title: Color::Rgb(136, 192, 208),
            selected_bg: Color::Rgb(59, 66, 82),
            selected_fg: Color::Rgb(236, 239, 244),
            today: Color::Rgb(163, 190, 140),
            month_header: Color::Rgb(235, 203, 139),
            weekday_header: Color::Rgb(129, 161, 193),
            week_number: Color::Rgb(76, 86, 106),
            inactive_day: Color::Rgb(67, 76, 94),
            status_bar: Color::Rgb(216, 222, 233),
            help_title: Color::Rgb(136, 192, 208),
            help_section: Color::Rgb(235, 203, 139),
            command_mode: Color::Rgb(216, 222, 233),
            error: Color::Rgb(191, 97, 106),
            success: Color::Rgb(163, 190, 140),
        }
    }

    pub fn get_by_name(name: &str) -> Self {
        match name.to_lowercase().as_str() {
            "gruvbox" => Self::gruvbox(),
            "nord" => Self::nord(),
            _ => Self::default_theme(),
        }
    }

    pub fn available_themes() -> Vec<&'static str> {
        vec!["default", "gruvbox", "nord"]
    }
}

impl Default for Theme {
    fn default() -> Self {
        Self::default_theme()
    }
}

pub fn token_color(token: ColorToken) -> Color {
    let (r, g, b) = token.rgb();
    Color::Rgb(r, g, b)
}

/// Readable text on top of a filled cell.
pub fn text_on(token: ColorToken) -> Color {
    if token.is_light() { Color::Black } else { Color::White }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::{Hue, Shade};

    #[test]
    fn unknown_theme_falls_back_to_default() {
        assert_eq!(Theme::get_by_name("solarized"), Theme::default_theme());
    }

    #[test]
    fn theme_lookup_ignores_case() {
        assert_eq!(Theme::get_by_name("Nord").name, "nord");
    }

    #[test]
    fn every_listed_theme_resolves_to_itself() {
        for name in Theme::available_themes() {
            assert_eq!(Theme::get_by_name(name).name, name);
        }
    }

    #[test]
    fn token_converts_to_rgb() {
        let token = ColorToken::new(Hue::Blue, Shade::S500);
        assert_eq!(token_color(token), Color::Rgb(0x3b, 0x82, 0xf6));
    }

    #[test]
    fn light_fill_gets_dark_text() {
        assert_eq!(text_on(ColorToken::new(Hue::Green, Shade::S300)), Color::Black);
        assert_eq!(text_on(ColorToken::new(Hue::Green, Shade::S700)), Color::White);
    }
}
