// Color themes for the TUI chrome. The three chakra modes share a dark base
// and differ in their accent colours. Visualizer palettes are unaffected.

use ratatui::style::Color;

pub const THEME_KAMINARI: &str = "Kaminari Mode";
pub const THEME_SUSANOO: &str = "Susanoo Mode";
pub const THEME_DRAGON_GOD: &str = "Dragon God Mode";

/// Theme names in cycling order.
pub const THEME_NAMES: [&str; 3] = [THEME_KAMINARI, THEME_SUSANOO, THEME_DRAGON_GOD];

/// Named color slots used by the UI chrome (borders, text, status indicators).
#[derive(Debug, Clone, PartialEq)]
pub struct Theme {
    pub name: &'static str,
    /// Primary accent color (active items, highlights, header).
    pub primary: Color,
    /// Secondary color, used behind selected rows.
    pub secondary: Color,
    /// Accent color for key hints and the quote line.
    pub accent: Color,
    /// Panel background.
    pub background: Color,
    /// Normal text color.
    pub text: Color,
    /// Dimmed / inactive text color.
    pub text_dim: Color,
    /// Background color for selected items.
    pub selection_bg: Color,
    /// Border and divider color.
    pub border: Color,
    pub error: Color,
    /// Loading indicator color.
    pub buffering: Color,
    /// Playing indicator color.
    pub success: Color,
}

impl Theme {
    /// Electric yellow on charcoal.
    pub fn kaminari() -> Self {
        Self {
            name: THEME_KAMINARI,
            primary: Color::Rgb(0xFF, 0xD7, 0x00),
            secondary: Color::Rgb(0x00, 0x00, 0x00),
            accent: Color::Rgb(0xFF, 0xA5, 0x00),
            background: Color::Rgb(0x1A, 0x1A, 0x1A),
            text: Color::Rgb(0xFF, 0xFF, 0xFF),
            text_dim: Color::DarkGray,
            selection_bg: Color::Rgb(0x3A, 0x33, 0x10),
            border: Color::Rgb(0x80, 0x6C, 0x00),
            error: Color::Red,
            buffering: Color::Rgb(0xFF, 0xA5, 0x00),
            success: Color::Rgb(0xFF, 0xD7, 0x00),
        }
    }

    /// Blue spirit armour.
    pub fn susanoo() -> Self {
        Self {
            name: THEME_SUSANOO,
            primary: Color::Rgb(0x00, 0x66, 0xCC),
            secondary: Color::Rgb(0x00, 0x00, 0x00),
            accent: Color::Rgb(0x00, 0xCC, 0xFF),
            background: Color::Rgb(0x0A, 0x0A, 0x0A),
            text: Color::Rgb(0xFF, 0xFF, 0xFF),
            text_dim: Color::DarkGray,
            selection_bg: Color::Rgb(0x0A, 0x1E, 0x33),
            border: Color::Rgb(0x00, 0x44, 0x88),
            error: Color::Red,
            buffering: Color::Rgb(0x00, 0xCC, 0xFF),
            success: Color::Rgb(0x00, 0xCC, 0xFF),
        }
    }

    /// Crimson and purple.
    pub fn dragon_god() -> Self {
        Self {
            name: THEME_DRAGON_GOD,
            primary: Color::Rgb(0xDC, 0x14, 0x3C),
            secondary: Color::Rgb(0x80, 0x00, 0x80),
            accent: Color::Rgb(0xFF, 0x45, 0x00),
            background: Color::Rgb(0x2D, 0x1B, 0x3D),
            text: Color::Rgb(0xFF, 0xFF, 0xFF),
            text_dim: Color::Gray,
            selection_bg: Color::Rgb(0x4A, 0x1A, 0x4A),
            border: Color::Rgb(0x80, 0x00, 0x80),
            error: Color::LightRed,
            buffering: Color::Rgb(0xFF, 0x45, 0x00),
            success: Color::Rgb(0xDC, 0x14, 0x3C),
        }
    }

    pub fn from_name(name: &str) -> Self {
        match name {
            THEME_SUSANOO => Self::susanoo(),
            THEME_DRAGON_GOD => Self::dragon_god(),
            _ => Self::kaminari(),
        }
    }

    /// The theme after this one, wrapping around.
    pub fn next(&self) -> Self {
        let idx = THEME_NAMES
            .iter()
            .position(|n| *n == self.name)
            .unwrap_or(0);
        Self::from_name(THEME_NAMES[(idx + 1) % THEME_NAMES.len()])
    }
}

impl Default for Theme {
    fn default() -> Self {
        Self::kaminari()
    }
}
