//! Color palettes for the two supported themes. The palette is resolved once
//! per frame so the rest of the drawing code never branches on the theme.

use ratatui::style::{Color, Modifier, Style};

use crate::config::Theme;

pub(crate) struct Palette {
    /// Default text style.
    pub text: Style,
    /// De-emphasized hints and borders.
    pub dim: Style,
    /// Titles and the progress gauge.
    pub accent: Style,
    /// The selected checklist row.
    pub highlight: Style,
}

impl Palette {
    pub(crate) fn for_theme(theme: Theme) -> Self {
        match theme {
            Theme::Light => Self {
                text: Style::default(),
                dim: Style::default().fg(Color::DarkGray),
                accent: Style::default().fg(Color::Blue),
                highlight: Style::default()
                    .fg(Color::Blue)
                    .add_modifier(Modifier::BOLD),
            },
            Theme::Dark => Self {
                text: Style::default().fg(Color::White),
                dim: Style::default().fg(Color::Gray),
                accent: Style::default().fg(Color::Cyan),
                highlight: Style::default()
                    .fg(Color::LightCyan)
                    .add_modifier(Modifier::BOLD),
            },
        }
    }
}
