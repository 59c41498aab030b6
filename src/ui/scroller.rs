//! Scroller strip: the marquee clock, item geometry and the widget.
//!
//! ## Architecture
//!
//! * **Clock** (`Marquee`): advances the loop offset from wall-clock time,
//!   frozen while the track carries the `paused` class.
//! * **Geometry** (`item_slots`): pure layout math shared between the
//!   widget (rendering) and the handler (hit-testing).
//! * **Widget** (`ScrollerWidget`): draws the visible slots.

use std::time::Instant;

use ratatui::{
    buffer::Buffer,
    layout::{Position, Rect},
    text::Span,
    widgets::{Block, BorderType, Borders, Widget},
};

use crate::core::document::Document;
use crate::core::interactions::Reaction;
use crate::core::scroller::PAUSED_CLASS;
use crate::core::view::{NodeId, View};
use crate::ui::element::{render_element, Assets};
use crate::ui::layout::{inset, CELL_W_PX};
use crate::ui::theme::Theme;

// ─── clock ──────────────────────────────────────────────────────

/// Loop position of the track, in page pixels.
#[derive(Debug, Clone, Default)]
pub struct Marquee {
    offset_px: f64,
    last: Option<Instant>,
}

impl Marquee {
    /// Move the loop forward to `now`.  One full loop travels `loop_px`
    /// in `duration_s`; nothing moves while paused.
    pub fn advance(&mut self, now: Instant, loop_px: f64, duration_s: f64, paused: bool) {
        let elapsed = self
            .last
            .map_or(0.0, |last| now.saturating_duration_since(last).as_secs_f64());
        self.last = Some(now);
        if paused || loop_px <= 0.0 || duration_s <= 0.0 {
            return;
        }
        self.offset_px = (self.offset_px + loop_px / duration_s * elapsed) % loop_px;
    }

    pub fn offset_px(&self) -> f64 {
        self.offset_px
    }
}

/// The track's `animation-duration` style in seconds.
pub fn loop_duration_s<V: View>(view: &V, track: NodeId) -> Option<f64> {
    view.style(track, "animation-duration")?
        .strip_suffix('s')?
        .parse()
        .ok()
}

pub fn is_paused<V: View>(view: &V, track: NodeId) -> bool {
    view.has_class(track, PAUSED_CLASS)
}

// ─── geometry ───────────────────────────────────────────────────

/// One item as it lands on screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ItemSlot {
    pub node: NodeId,
    /// Unclipped cell rectangle; may start left of the viewport.
    pub x: i32,
    pub width: u16,
    /// Visible part of the slot.
    pub visible: Rect,
}

impl ItemSlot {
    pub fn contains(&self, col: u16, row: u16) -> bool {
        crate::ui::layout::point_in_rect(self.visible, col, row)
    }
}

/// Visible item slots of `track` inside `viewport` when the loop is at
/// `offset_px`.
pub fn item_slots<V: View>(view: &V, track: NodeId, offset_px: f64, viewport: Rect) -> Vec<ItemSlot> {
    let right = viewport.x as i32 + viewport.width as i32;
    let mut slots = Vec::new();
    let mut start_px = -offset_px;

    for node in view.children(track) {
        let extent = view.scroll_extent(node);
        let first = viewport.x as i32 + (start_px / CELL_W_PX).floor() as i32;
        let last = viewport.x as i32 + ((start_px + extent) / CELL_W_PX).floor() as i32;
        start_px += extent;

        if first >= right {
            break;
        }
        let clip_left = first.max(viewport.x as i32);
        let clip_right = last.min(right);
        if clip_right <= clip_left {
            continue;
        }
        slots.push(ItemSlot {
            node,
            x: first,
            width: (last - first) as u16,
            visible: Rect::new(
                clip_left as u16,
                viewport.y,
                (clip_right - clip_left) as u16,
                viewport.height,
            ),
        });
    }
    slots
}

/// Position of an item in its logo list, read from its preview listener.
pub fn item_index<V: View>(view: &V, item: NodeId) -> Option<usize> {
    view.listeners(item).iter().find_map(|l| match l.reaction {
        Reaction::PreviewInHero { index } => Some(index),
        _ => None,
    })
}

// ─── widget ─────────────────────────────────────────────────────

pub struct ScrollerWidget<'a> {
    pub doc: &'a Document,
    pub track: NodeId,
    pub offset_px: f64,
    pub hovered: Option<NodeId>,
    pub assets: Assets<'a>,
}

impl<'a> Widget for ScrollerWidget<'a> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let title = if is_paused(self.doc, self.track) {
            " Logos · paused "
        } else {
            " Logos "
        };
        let block = Block::default()
            .title(title)
            .title_style(Theme::title_style())
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(Theme::border_style());
        let viewport = inset(area);
        block.render(area, buf);

        for slot in item_slots(self.doc, self.track, self.offset_px, viewport) {
            self.render_slot(slot, buf);
        }
    }
}

impl<'a> ScrollerWidget<'a> {
    /// Draw the slot into a scratch buffer of its full size, then copy the
    /// visible columns.  Edge items slide out instead of squeezing.
    fn render_slot(&self, slot: ItemSlot, buf: &mut Buffer) {
        let full = Rect::new(0, 0, slot.width, slot.visible.height);
        let mut scratch = Buffer::empty(full);
        scratch.set_style(full, Theme::page_style());

        // One column of gap on the right, the bottom row for the label.
        let content = Rect::new(0, 0, slot.width.saturating_sub(1), full.height.saturating_sub(1));
        if let Some(child) = self.doc.children(slot.node).first() {
            render_element(self.doc, *child, content, self.assets, &mut scratch);
        }
        if self.hovered == Some(slot.node) {
            if let Some(index) = item_index(self.doc, slot.node) {
                let label = format!("◆ {}", index + 1);
                let width = (label.chars().count() as u16).min(content.width);
                let x = (content.width - width) / 2;
                let row = Rect::new(x, full.height.saturating_sub(1), width, 1);
                Span::styled(label, Theme::hovered_item_style()).render(row, &mut scratch);
            }
        }

        for col in 0..slot.visible.width {
            let src_col = (slot.visible.x as i32 - slot.x) as u16 + col;
            for row in 0..slot.visible.height {
                let Some(src) = scratch.cell(Position::new(src_col, row)) else {
                    continue;
                };
                let src = src.clone();
                if let Some(dst) = buf.cell_mut(Position::new(slot.visible.x + col, slot.visible.y + row)) {
                    *dst = src;
                }
            }
        }
    }
}
