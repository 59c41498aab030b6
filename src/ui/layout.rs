//! Layout helpers: split the terminal area into regions and map cells to
//! page pixels.

use ratatui::layout::{Constraint, Direction, Layout, Rect};

use crate::core::view::PxRect;

/// Width of one terminal cell in page pixels.
pub const CELL_W_PX: f64 = 8.0;
/// Height of one terminal cell in page pixels.
pub const CELL_H_PX: f64 = 16.0;

/// Rows taken by the scroller strip, borders included.
const SCROLLER_ROWS: u16 = 8;
const PLAY_ROWS: u16 = 3;
const PLAY_WIDTH: u16 = 12;

/// Primary screen layout: hero on top, play button under it, scroller strip
/// and a bottom status bar.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageLayout {
    pub hero_area: Rect,
    pub play_area: Rect,
    pub scroller_area: Rect,
    pub status_area: Rect,
}

impl PageLayout {
    /// Compute the layout from the full terminal area.
    pub fn from_area(area: Rect) -> Self {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Min(3),                // hero pane
                Constraint::Length(PLAY_ROWS),     // play button row
                Constraint::Length(SCROLLER_ROWS), // scroller strip
                Constraint::Length(1),             // status bar
            ])
            .split(area);

        let play_row = chunks[1];
        let width = PLAY_WIDTH.min(play_row.width);
        let play_area = Rect::new(
            play_row.x + (play_row.width - width) / 2,
            play_row.y,
            width,
            play_row.height,
        );

        Self {
            hero_area: chunks[0],
            play_area,
            scroller_area: chunks[2],
            status_area: chunks[3],
        }
    }

    /// The scroller viewport: the strip minus its border.
    pub fn scroller_inner(&self) -> Rect {
        inset(self.scroller_area)
    }

    /// Where the hero content is drawn: the pane minus its border.
    pub fn hero_inner(&self) -> Rect {
        inset(self.hero_area)
    }
}

/// Shrink `area` by one cell on every side.
pub fn inset(area: Rect) -> Rect {
    Rect::new(
        area.x.saturating_add(1),
        area.y.saturating_add(1),
        area.width.saturating_sub(2),
        area.height.saturating_sub(2),
    )
}

/// Page-pixel rectangle covered by a cell rectangle.
pub fn rect_to_px(area: Rect) -> PxRect {
    PxRect::new(
        area.x as f64 * CELL_W_PX,
        area.y as f64 * CELL_H_PX,
        area.width as f64 * CELL_W_PX,
        area.height as f64 * CELL_H_PX,
    )
}

/// Page-pixel position of the centre of a cell.
pub fn cell_center_px(col: u16, row: u16) -> (f64, f64) {
    ((col as f64 + 0.5) * CELL_W_PX, (row as f64 + 0.5) * CELL_H_PX)
}

/// Cell offset for a pixel translation, rounded to the nearest cell.
pub fn px_to_cells(dx: f64, dy: f64) -> (i32, i32) {
    ((dx / CELL_W_PX).round() as i32, (dy / CELL_H_PX).round() as i32)
}

pub fn point_in_rect(area: Rect, col: u16, row: u16) -> bool {
    col >= area.x
        && col < area.x.saturating_add(area.width)
        && row >= area.y
        && row < area.y.saturating_add(area.height)
}

/// `area` shifted by a cell offset and clipped to `bounds`.
pub fn shift_within(area: Rect, dx: i32, dy: i32, bounds: Rect) -> Rect {
    let x = (area.x as i32 + dx).max(0) as u16;
    let y = (area.y as i32 + dy).max(0) as u16;
    Rect::new(x, y, area.width, area.height).intersection(bounds)
}

/// `area` scaled around its centre.
pub fn scale_about_center(area: Rect, scale: f64) -> Rect {
    let scale = scale.max(0.0);
    let w = ((area.width as f64) * scale).round() as u16;
    let h = ((area.height as f64) * scale).round() as u16;
    let w = w.min(area.width);
    let h = h.min(area.height);
    Rect::new(
        area.x + (area.width - w) / 2,
        area.y + (area.height - h) / 2,
        w,
        h,
    )
}
