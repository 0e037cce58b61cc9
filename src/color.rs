use ratatui::style::Color;
use serde::{Deserialize, Serialize};

/// Palette for live cells
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub enum ColorScheme {
    #[default]
    Chalk,
    Phosphor,
    Amber,
    Ice,
    Orchid,
}

impl ColorScheme {
    pub fn name(&self) -> &str {
        match self {
            ColorScheme::Chalk => "Chalk",
            ColorScheme::Phosphor => "Phosphor",
            ColorScheme::Amber => "Amber",
            ColorScheme::Ice => "Ice",
            ColorScheme::Orchid => "Orchid",
        }
    }

    pub fn next(&self) -> Self {
        match self {
            ColorScheme::Chalk => ColorScheme::Phosphor,
            ColorScheme::Phosphor => ColorScheme::Amber,
            ColorScheme::Amber => ColorScheme::Ice,
            ColorScheme::Ice => ColorScheme::Orchid,
            ColorScheme::Orchid => ColorScheme::Chalk,
        }
    }

    pub fn prev(&self) -> Self {
        match self {
            ColorScheme::Chalk => ColorScheme::Orchid,
            ColorScheme::Phosphor => ColorScheme::Chalk,
            ColorScheme::Amber => ColorScheme::Phosphor,
            ColorScheme::Ice => ColorScheme::Amber,
            ColorScheme::Orchid => ColorScheme::Ice,
        }
    }

    /// Foreground color for live cells
    pub fn cell_color(&self) -> Color {
        match self {
            ColorScheme::Chalk => Color::Rgb(235, 235, 235),
            ColorScheme::Phosphor => Color::Rgb(80, 250, 123),
            ColorScheme::Amber => Color::Rgb(255, 176, 0),
            ColorScheme::Ice => Color::Rgb(139, 233, 253),
            ColorScheme::Orchid => Color::Rgb(255, 121, 198),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_next_prev_are_inverse() {
        let mut scheme = ColorScheme::default();
        for _ in 0..5 {
            assert_eq!(scheme.next().prev(), scheme);
            scheme = scheme.next();
        }
        assert_eq!(scheme, ColorScheme::default());
    }
}
