use ratatui::style::Color;

#[derive(Debug, Clone)]
pub struct Theme {
    pub name: &'static str,
    pub header_accent_bg: Color,
    pub header_accent_fg: Color,
    pub border: Color,
    pub statusbar_bg: Color,
    pub text_primary: Color,
    pub text_secondary: Color,
    pub pill_key_bg: Color,
    pub pill_key_fg: Color,
    pub pill_desc_fg: Color,
    pub gauge_unfilled: Color,
    pub selection_bg: Color,
    pub selection_fg: Color,
    /// Low, mid and high usage.
    pub heat_colors: [Color; 3],
}

impl Theme {
    pub fn from_config(theme_name: &str) -> Self {
        match theme_name.to_lowercase().as_str() {
            "light" => Self::light(),
            _ => Self::dark(),
        }
    }

    pub fn dark() -> Self {
        Theme {
            name: "dark",
            header_accent_bg: Color::Green,
            header_accent_fg: Color::Black,
            border: Color::DarkGray,
            statusbar_bg: Color::DarkGray,
            text_primary: Color::White,
            text_secondary: Color::Gray,
            pill_key_bg: Color::Yellow,
            pill_key_fg: Color::Black,
            pill_desc_fg: Color::White,
            gauge_unfilled: Color::Rgb(60, 60, 60),
            selection_bg: Color::Indexed(62),
            selection_fg: Color::White,
            heat_colors: [
                Color::Rgb(16, 185, 129),
                Color::Rgb(249, 115, 22),
                Color::Rgb(239, 68, 68),
            ],
        }
    }

    pub fn light() -> Self {
        Theme {
            name: "light",
            header_accent_bg: Color::Blue,
            header_accent_fg: Color::White,
            border: Color::Rgb(150, 150, 150),
            statusbar_bg: Color::Rgb(220, 220, 220),
            text_primary: Color::Black,
            text_secondary: Color::DarkGray,
            pill_key_bg: Color::Blue,
            pill_key_fg: Color::White,
            pill_desc_fg: Color::Black,
            gauge_unfilled: Color::Rgb(231, 227, 219),
            selection_bg: Color::Rgb(200, 215, 240),
            selection_fg: Color::Black,
            heat_colors: [
                Color::Rgb(60, 160, 60),
                Color::Rgb(220, 150, 30),
                Color::Rgb(200, 60, 60),
            ],
        }
    }

    /// Color for a usage percentage.
    pub fn heat(&self, percent: f64) -> Color {
        if percent >= 80.0 {
            self.heat_colors[2]
        } else if percent >= 50.0 {
            self.heat_colors[1]
        } else {
            self.heat_colors[0]
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_theme_falls_back_to_dark() {
        assert_eq!(Theme::from_config("LIGHT").name, "light");
        assert_eq!(Theme::from_config("solarized").name, "dark");
    }

    #[test]
    fn heat_thresholds() {
        let theme = Theme::dark();
        assert_eq!(theme.heat(10.0), theme.heat_colors[0]);
        assert_eq!(theme.heat(50.0), theme.heat_colors[1]);
        assert_eq!(theme.heat(99.0), theme.heat_colors[2]);
    }
}
