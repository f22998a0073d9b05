use ratatui::style::Color;

use crate::settings::Theme;

/// Colours for every kind of cell, chosen by theme
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Palette {
    pub ground: Color,
    pub border: Color,
    pub rock: Color,
    pub tree: Color,
    pub candy: Color,
    pub snake: Color,
    pub mouth: Color,
}

const fn rgb(hex: u32) -> Color {
    Color::Rgb((hex >> 16) as u8, (hex >> 8) as u8, hex as u8)
}

impl Palette {
    pub fn for_theme(theme: Theme) -> Self {
        match theme {
            Theme::Green => Self {
                ground: rgb(0x56f854),
                border: rgb(0x39c09f),
                rock: rgb(0xebebeb),
                tree: rgb(0x639541),
                candy: rgb(0x1d5846),
                snake: rgb(0x1d5846),
                mouth: rgb(0x39c09f),
            },
            Theme::Orange => Self {
                ground: rgb(0xd68a4c),
                border: rgb(0xffac38),
                rock: rgb(0xacacac),
                tree: rgb(0xa2d109),
                candy: rgb(0x614bdd),
                snake: rgb(0xff470a),
                mouth: rgb(0x614bdd),
            },
            Theme::Lilac => Self {
                ground: rgb(0xd199ff),
                border: rgb(0xb04ce6),
                rock: rgb(0xebebeb),
                tree: rgb(0x53d0c1),
                candy: rgb(0x9900ff),
                snake: rgb(0xff2ed2),
                mouth: rgb(0x614bdd),
            },
        }
    }
}

impl From<Theme> for Palette {
    fn from(theme: Theme) -> Self {
        Self::for_theme(theme)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rgb_split() {
        assert_eq!(rgb(0xff470a), Color::Rgb(0xff, 0x47, 0x0a));
    }

    #[test]
    fn test_themes_differ() {
        let green = Palette::for_theme(Theme::Green);
        let orange = Palette::from(Theme::Orange);
        assert_ne!(green, orange);
        assert_eq!(orange.snake, Color::Rgb(0xff, 0x47, 0x0a));
    }
}
