//! Input handling: maps key/mouse/terminal events to page events.

use crossterm::event::{
    KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseButton, MouseEvent, MouseEventKind,
};
use ratatui::layout::Rect;

use crate::core::interactions::Event;
use crate::core::view::NodeId;
use crate::ui::layout::{cell_center_px, point_in_rect};
use crate::ui::scroller::item_slots;

use super::state::{ActiveView, AppState};

/// Process a key event, dispatching based on the active view.
pub fn handle_key(state: &mut AppState, key: KeyEvent) {
    if key.kind == KeyEventKind::Release {
        return;
    }
    // Ctrl+c always quits, regardless of view.
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        state.should_quit = true;
        return;
    }

    match state.active_view {
        ActiveView::Alert => state.dismiss_alert(),
        ActiveView::Page => match key.code {
            KeyCode::Char('q') | KeyCode::Esc => state.should_quit = true,
            KeyCode::Char('p') | KeyCode::Enter => {
                let play = state.page.nodes.play;
                state.dispatch(play, Event::Click);
            }
            _ => {}
        },
    }
}

pub fn handle_mouse(state: &mut AppState, mouse: MouseEvent) {
    if state.active_view == ActiveView::Alert {
        if let MouseEventKind::Down(_) = mouse.kind {
            state.dismiss_alert();
        }
        return;
    }

    match mouse.kind {
        MouseEventKind::Moved | MouseEventKind::Drag(_) => {
            pointer_moved(state, mouse.column, mouse.row);
        }
        MouseEventKind::Down(MouseButton::Left) => {
            let layout = state.layout();
            if point_in_rect(layout.play_area, mouse.column, mouse.row) {
                let play = state.page.nodes.play;
                state.dispatch(play, Event::Click);
            } else if let Some(item) = item_at(state, mouse.column, mouse.row) {
                state.dispatch(item, Event::Click);
            }
        }
        _ => {}
    }
}

/// The terminal lost focus: treat it as the pointer leaving the document.
pub fn handle_focus_lost(state: &mut AppState) {
    set_hovered(state, None);
    let root = state.page.nodes.root;
    state.dispatch(root, Event::PointerLeaveDocument);
}

pub fn handle_resize(state: &mut AppState, width: u16, height: u16) {
    state.terminal_area = Rect::new(0, 0, width, height);
    state.sync_geometry();
    let root = state.page.nodes.root;
    state.dispatch(root, Event::Resize);
    tracing::debug!(width, height, copies = state.page.scroller.copies(&state.doc), "resized");
}

fn pointer_moved(state: &mut AppState, col: u16, row: u16) {
    let hovered = item_at(state, col, row);
    set_hovered(state, hovered);

    let (x, y) = cell_center_px(col, row);
    let root = state.page.nodes.root;
    state.dispatch(root, Event::PointerMove { x, y });
}

/// Move the hover to `item`, sending leave/enter as an actual pointer would.
fn set_hovered(state: &mut AppState, item: Option<NodeId>) {
    if state.hovered == item {
        return;
    }
    if let Some(previous) = state.hovered.take() {
        state.dispatch(previous, Event::PointerLeave);
    }
    if let Some(next) = item {
        state.dispatch(next, Event::PointerEnter);
    }
    state.hovered = item;
}

/// Scroller item under a cell, using the geometry the widget draws with.
fn item_at(state: &AppState, col: u16, row: u16) -> Option<NodeId> {
    let viewport = state.layout().scroller_inner();
    if !point_in_rect(viewport, col, row) {
        return None;
    }
    item_slots(&state.doc, state.page.scroller.track(), state.marquee.offset_px(), viewport)
        .into_iter()
        .find(|slot| slot.contains(col, row))
        .map(|slot| slot.node)
}
