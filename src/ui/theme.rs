//! Colour palette and text styles used across the UI.

use ratatui::style::{Color, Modifier, Style};

use crate::core::placeholder::gradient_at;

/// Central theme: change colours here and they propagate everywhere.
pub struct Theme;

impl Theme {
    /// Page background, the colour orbs are blended onto.
    pub const PAGE_BG: [u8; 3] = [0x0b, 0x10, 0x20];

    // ── page ───────────────────────────────────────────────────
    pub fn page_style() -> Style {
        Style::default().bg(rgb(Self::PAGE_BG)).fg(Color::White)
    }

    pub fn hint_style() -> Style {
        Style::default().fg(Color::DarkGray)
    }

    pub fn glyph_style() -> Style {
        Style::default()
            .fg(Color::White)
            .add_modifier(Modifier::BOLD)
    }

    pub fn pending_style() -> Style {
        Style::default()
            .fg(Color::DarkGray)
            .add_modifier(Modifier::ITALIC)
    }

    // ── scroller ───────────────────────────────────────────────
    pub fn hovered_item_style() -> Style {
        Style::default().fg(rgb(gradient_at(0.0)))
    }

    // ── play button ────────────────────────────────────────────
    pub fn play_style() -> Style {
        Style::default()
            .fg(Color::White)
            .bg(rgb(gradient_at(1.0)))
            .add_modifier(Modifier::BOLD)
    }

    // ── chrome ─────────────────────────────────────────────────
    pub fn border_style() -> Style {
        Style::default().fg(Color::Gray)
    }

    pub fn title_style() -> Style {
        Style::default()
            .fg(rgb(gradient_at(0.0)))
            .add_modifier(Modifier::BOLD)
    }

    pub fn status_bar_style() -> Style {
        Style::default().bg(Color::DarkGray).fg(Color::White)
    }
}

pub fn rgb([r, g, b]: [u8; 3]) -> Color {
    Color::Rgb(r, g, b)
}

/// Mix `top` over `bottom` with the given opacity.
pub fn blend(top: [u8; 3], bottom: [u8; 3], opacity: f64) -> [u8; 3] {
    let a = opacity.clamp(0.0, 1.0);
    let mix = |t: u8, b: u8| (t as f64 * a + b as f64 * (1.0 - a)).round() as u8;
    [mix(top[0], bottom[0]), mix(top[1], bottom[1]), mix(top[2], bottom[2])]
}
