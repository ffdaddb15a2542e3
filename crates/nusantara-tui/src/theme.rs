use crossterm::style::Color;
use nusantara_core::Difficulty;

/// Color theme for the TUI
#[derive(Debug, Clone)]
pub struct Theme {
    /// Background color
    pub bg: Color,
    /// Default text color
    pub fg: Color,
    /// Grid border color
    pub border: Color,
    /// Box border color (thicker 3x3 separators)
    pub box_border: Color,
    /// Given (puzzle) cell color
    pub given: Color,
    /// User-entered value color
    pub filled: Color,
    /// Note (pencil mark) color
    pub note: Color,
    /// Selected cell background
    pub selected_bg: Color,
    /// Highlighted cells (same row/col/box)
    pub highlight_bg: Color,
    /// Wrong-entry color
    pub error: Color,
    /// Success/complete color
    pub success: Color,
    /// Timer/info text color
    pub info: Color,
    /// Key binding text color
    pub key: Color,
}

impl Default for Theme {
    fn default() -> Self {
        Self::batik()
    }
}

impl Theme {
    /// Dark batik-inspired palette (default)
    pub fn batik() -> Self {
        Self {
            bg: Color::Rgb { r: 24, g: 20, b: 16 },
            fg: Color::Rgb { r: 235, g: 228, b: 215 },
            border: Color::Rgb { r: 90, g: 75, b: 55 },
            box_border: Color::Rgb { r: 180, g: 145, b: 80 },
            given: Color::Rgb { r: 250, g: 245, b: 230 },
            filled: Color::Rgb { r: 240, g: 180, b: 80 },
            note: Color::Rgb { r: 150, g: 135, b: 110 },
            selected_bg: Color::Rgb { r: 110, g: 75, b: 35 },
            highlight_bg: Color::Rgb { r: 42, g: 36, b: 28 },
            error: Color::Rgb { r: 230, g: 80, b: 70 },
            success: Color::Rgb { r: 120, g: 220, b: 120 },
            info: Color::Rgb { r: 175, g: 165, b: 145 },
            key: Color::Rgb { r: 255, g: 205, b: 95 },
        }
    }

    /// Batik base palette recolored with the tier's culture accent.
    pub fn for_difficulty(difficulty: Difficulty) -> Self {
        let accent = Self::accent(difficulty);
        let mut theme = Self::batik();
        theme.box_border = accent;
        theme.key = accent;
        theme.selected_bg = dim(accent);
        theme
    }

    /// Accent color tied to the tier's culture, used in the banner.
    pub fn accent(difficulty: Difficulty) -> Color {
        match difficulty {
            Difficulty::Jawa => Color::Rgb { r: 170, g: 110, b: 40 },
            Difficulty::Bali => Color::Rgb { r: 230, g: 150, b: 60 },
            Difficulty::Betawi => Color::Rgb { r: 220, g: 70, b: 60 },
            Difficulty::Minang => Color::Rgb { r: 190, g: 40, b: 40 },
            Difficulty::Toraja => Color::Rgb { r: 150, g: 80, b: 170 },
            Difficulty::Papua => Color::Rgb { r: 60, g: 180, b: 160 },
        }
    }
}

/// Halve an RGB color so accents can double as a selection background.
fn dim(color: Color) -> Color {
    match color {
        Color::Rgb { r, g, b } => Color::Rgb {
            r: r / 2,
            g: g / 2,
            b: b / 2,
        },
        other => other,
    }
}
