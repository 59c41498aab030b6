//! Scroller population and continuity maintenance.
//!
//! The track holds the item set twice and is translated by one copy's extent
//! per loop, so the seam never shows.  When the viewport grows past half the
//! track, [`ScrollerPopulator::adjust_for_viewport`] doubles the content
//! (keeping both halves identical) until the track covers the viewport twice.

use super::interactions::{EventKind, Listener, Reaction};
use super::logos::LogoReference;
use super::view::{ElementKind, ImageElement, NodeId, View};

/// Estimated extent of one item plus its gap, in px.
pub const ITEM_EXTENT_PX: f64 = 100.0;
/// Target scroll speed, in px per second.
pub const SPEED_PX_PER_S: f64 = 40.0;
/// Floor for the loop duration, in seconds.
pub const MIN_DURATION_S: u64 = 18;
/// Copies of the item set appended by [`ScrollerPopulator::populate`].
pub const LOOP_COPIES: usize = 2;
/// Default cap on copies of the item set kept in the track.
pub const DEFAULT_MAX_COPIES: usize = 16;

pub const ITEM_CLASS: &str = "scroller-item";
/// Class on the track while the animation is held.
pub const PAUSED_CLASS: &str = "paused";

/// Loop duration for `count` items: the set's estimated extent at
/// [`SPEED_PX_PER_S`], never below [`MIN_DURATION_S`].
pub fn loop_duration_secs(count: usize) -> u64 {
    let total = count as f64 * ITEM_EXTENT_PX;
    ((total / SPEED_PX_PER_S).round() as u64).max(MIN_DURATION_S)
}

/// Builds and maintains the content of the scroller track.
#[derive(Debug, Clone)]
pub struct ScrollerPopulator {
    track: NodeId,
    /// Upper bound on copies of the item set; resize duplication stops here.
    max_copies: usize,
    /// Items in one copy of the set (the configured reference count).
    set_len: usize,
}

impl ScrollerPopulator {
    pub fn new(track: NodeId, max_copies: usize) -> Self {
        Self {
            track,
            max_copies: max_copies.max(LOOP_COPIES),
            set_len: 0,
        }
    }

    pub fn track(&self) -> NodeId {
        self.track
    }

    /// Replace the track's content with two copies of one item per
    /// reference and set the loop duration.  Returns the duration in seconds.
    pub fn populate<V: View>(&mut self, view: &mut V, list: &[LogoReference]) -> u64 {
        view.clear_children(self.track);
        self.set_len = list.len();

        let items: Vec<NodeId> = list
            .iter()
            .enumerate()
            .map(|(index, reference)| self.create_item(view, reference, index))
            .collect();

        for copy in 0..LOOP_COPIES {
            for &item in &items {
                let node = if copy == 0 {
                    item
                } else {
                    view.clone_node(item, true)
                };
                view.append_child(self.track, node);
            }
        }

        let placed = items.len() * LOOP_COPIES;
        let duration = loop_duration_secs(placed);
        view.set_style(self.track, "animation-duration", format!("{duration}s"));
        tracing::debug!(items = placed, duration, "scroller populated");
        duration
    }

    /// Build one detached item for `reference` at position `index`.
    pub fn create_item<V: View>(
        &self,
        view: &mut V,
        reference: &LogoReference,
        index: usize,
    ) -> NodeId {
        let item = view.create_element(ElementKind::Container);
        view.add_class(item, ITEM_CLASS);
        view.set_extent(item, ITEM_EXTENT_PX);

        let image = view.create_element(ElementKind::Image(ImageElement::new(
            reference.clone(),
            format!("Logo {}", index + 1),
        )));
        view.listen(
            image,
            Listener::new(EventKind::LoadFailure, Reaction::SwapToPlaceholder { index }),
        );
        view.append_child(item, image);

        view.listen(item, Listener::new(EventKind::PointerEnter, Reaction::PauseScroller));
        view.listen(item, Listener::new(EventKind::PointerLeave, Reaction::ResumeScroller));
        view.listen(item, Listener::new(EventKind::Click, Reaction::PreviewInHero { index }));
        item
    }

    /// Copies of the item set currently in the track.
    pub fn copies<V: View>(&self, view: &V) -> usize {
        if self.set_len == 0 {
            return 0;
        }
        view.children(self.track).len() / self.set_len
    }

    /// Distance travelled by one loop: the extent of a single item set.
    /// Any whole number of sets in the track repeats seamlessly at this
    /// period, so duplication never changes the scroll speed.
    pub fn loop_extent<V: View>(&self, view: &V) -> f64 {
        match self.copies(view) {
            0 => 0.0,
            copies => view.scroll_extent(self.track) / copies as f64,
        }
    }

    /// Double the track's content if it is shorter than twice its viewport.
    /// Returns whether anything was appended.
    pub fn adjust_for_viewport<V: View>(&self, view: &mut V) -> bool {
        let extent = view.scroll_extent(self.track);
        let Some(mask) = view.parent(self.track) else {
            return false;
        };
        let viewport = view.client_extent(mask);
        if extent >= viewport * 2.0 {
            return false;
        }

        let copies = self.copies(view);
        if copies == 0 || copies * 2 > self.max_copies {
            tracing::debug!(copies, max = self.max_copies, "scroller duplication capped");
            return false;
        }

        for child in view.children(self.track) {
            let copy = view.clone_node(child, true);
            view.append_child(self.track, copy);
        }
        tracing::debug!(extent, viewport, copies = copies * 2, "scroller extended");
        true
    }
}
