//! Event registration and dispatch.
//!
//! Listeners are plain data stored on elements: an [`EventKind`] and the
//! [`Reaction`] to run.  Reactions only ever act on the element they fire on,
//! its relatives, or the bound page nodes, so a cloned element carries
//! listeners that keep working for the clone.

use std::time::Duration;

use super::animation::{Animation, Easing, Transform};
use super::page::Page;
use super::parallax::parallax_transform;
use super::placeholder::placeholder_graphic;
use super::scroller::PAUSED_CLASS;
use super::view::{ElementKind, NodeId, View};

/// Relative size of the hero preview clone.
pub const PREVIEW_SIZE: &str = "84%";
/// Length of the hero pulse after a preview swap.
pub const PULSE_DURATION: Duration = Duration::from_millis(320);
/// Scale the hero pulse starts from.
pub const PULSE_FROM_SCALE: f64 = 0.98;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventKind {
    LoadFailure,
    PointerEnter,
    PointerLeave,
    Click,
    PointerMove,
    /// The pointer left the whole document.
    PointerLeaveDocument,
    Resize,
}

/// An event delivered to one target element.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Event {
    LoadFailure,
    PointerEnter,
    PointerLeave,
    Click,
    /// Pointer position in page pixels.
    PointerMove { x: f64, y: f64 },
    PointerLeaveDocument,
    Resize,
}

impl Event {
    pub fn kind(&self) -> EventKind {
        match self {
            Event::LoadFailure => EventKind::LoadFailure,
            Event::PointerEnter => EventKind::PointerEnter,
            Event::PointerLeave => EventKind::PointerLeave,
            Event::Click => EventKind::Click,
            Event::PointerMove { .. } => EventKind::PointerMove,
            Event::PointerLeaveDocument => EventKind::PointerLeaveDocument,
            Event::Resize => EventKind::Resize,
        }
    }
}

/// What a listener does when its event fires.
#[derive(Debug, Clone, PartialEq)]
pub enum Reaction {
    /// Replace the content of the target's parent item with the placeholder
    /// for `index`.
    SwapToPlaceholder { index: usize },
    PauseScroller,
    ResumeScroller,
    /// Show the target item's image (or its placeholder) in the hero.
    PreviewInHero { index: usize },
    Parallax,
    ResetParallax,
    AdjustScroller,
    Alert { message: String },
}

#[derive(Debug, Clone, PartialEq)]
pub struct Listener {
    pub on: EventKind,
    pub reaction: Reaction,
}

impl Listener {
    pub fn new(on: EventKind, reaction: Reaction) -> Self {
        Self { on, reaction }
    }
}

/// Something the host has to surface itself.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notice {
    Alert(String),
}

/// Run the target's listeners for `event`, in registration order.
pub fn dispatch<V: View>(view: &mut V, page: &Page, target: NodeId, event: Event) -> Vec<Notice> {
    let reactions: Vec<Reaction> = view
        .listeners(target)
        .iter()
        .filter(|l| l.on == event.kind())
        .map(|l| l.reaction.clone())
        .collect();

    reactions
        .into_iter()
        .filter_map(|reaction| react(view, page, target, &reaction, event))
        .collect()
}

fn react<V: View>(
    view: &mut V,
    page: &Page,
    target: NodeId,
    reaction: &Reaction,
    event: Event,
) -> Option<Notice> {
    match reaction {
        Reaction::SwapToPlaceholder { index } => {
            // Already swapped out: the image is no longer inside an item.
            let item = view.parent(target)?;
            view.clear_children(item);
            let graphic = view.create_element(ElementKind::Placeholder(placeholder_graphic(*index)));
            view.append_child(item, graphic);
            None
        }
        Reaction::PauseScroller => {
            view.add_class(page.scroller.track(), PAUSED_CLASS);
            None
        }
        Reaction::ResumeScroller => {
            view.remove_class(page.scroller.track(), PAUSED_CLASS);
            None
        }
        Reaction::PreviewInHero { index } => {
            preview_in_hero(view, page.nodes.hero, target, *index);
            None
        }
        Reaction::Parallax => {
            if let Event::PointerMove { x, y } = event {
                let hero = page.nodes.hero;
                if let Some(transform) = parallax_transform(view.bounding_rect(hero), x, y) {
                    view.set_transform(hero, Some(transform));
                }
            }
            None
        }
        Reaction::ResetParallax => {
            view.set_transform(page.nodes.hero, None);
            None
        }
        Reaction::AdjustScroller => {
            page.scroller.adjust_for_viewport(view);
            None
        }
        Reaction::Alert { message } => Some(Notice::Alert(message.clone())),
    }
}

/// Swap the hero's content for a preview of `item`.
fn preview_in_hero<V: View>(view: &mut V, hero: NodeId, item: NodeId, index: usize) {
    let loaded_image = view.children(item).into_iter().find(|&child| {
        matches!(view.kind(child), ElementKind::Image(img) if img.load.is_loaded())
    });

    view.clear_children(hero);
    let content = match loaded_image {
        Some(image) => {
            let clone = view.clone_node(image, false);
            view.set_style(clone, "width", PREVIEW_SIZE.to_string());
            view.set_style(clone, "height", PREVIEW_SIZE.to_string());
            view.set_style(clone, "object-fit", "contain".to_string());
            clone
        }
        None => view.create_element(ElementKind::Placeholder(placeholder_graphic(index))),
    };
    view.append_child(hero, content);

    view.animate(
        hero,
        Animation::once(
            vec![Transform::IDENTITY.with_scale(PULSE_FROM_SCALE), Transform::IDENTITY],
            PULSE_DURATION,
            Easing::EaseOut,
        ),
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::document::Document;
    use crate::core::logos::LogoReference;
    use crate::core::page::{build_markup, PLAY_MESSAGE};
    use crate::core::scroller::DEFAULT_MAX_COPIES;
    use crate::core::view::{LoadState, PxRect};
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn mounted(n: usize) -> (Document, Page) {
        let mut doc = Document::new();
        build_markup(&mut doc);
        let logos: Vec<LogoReference> = (0..n)
            .map(|i| LogoReference::new(format!("logo{i}.png")))
            .collect();
        let mut rng = StdRng::seed_from_u64(0);
        let page = Page::mount(&mut doc, &logos, 0, DEFAULT_MAX_COPIES, &mut rng).unwrap();
        (doc, page)
    }

    fn first_image(doc: &Document, item: NodeId) -> NodeId {
        doc.children(item)[0]
    }

    fn fail_all_loads(doc: &mut Document, page: &Page) {
        for item in doc.children(page.nodes.track) {
            let image = first_image(doc, item);
            doc.set_load_state(image, LoadState::Failed);
            dispatch(doc, page, image, Event::LoadFailure);
        }
    }

    #[test]
    fn test_all_loads_fail_scenario() {
        let (mut doc, page) = mounted(5);
        fail_all_loads(&mut doc, &page);

        let items = doc.children(page.nodes.track);
        assert_eq!(items.len(), 10);
        let ids: Vec<String> = items
            .iter()
            .map(|&item| {
                let content = doc.children(item);
                assert_eq!(content.len(), 1);
                match doc.kind(content[0]) {
                    ElementKind::Placeholder(g) => g.gradient_id(),
                    other => panic!("expected placeholder, got {other:?}"),
                }
            })
            .collect();
        assert_eq!(ids, vec!["g0", "g1", "g2", "g3", "g4", "g0", "g1", "g2", "g3", "g4"]);
        assert_eq!(doc.style(page.nodes.track, "animation-duration"), Some("25s"));
    }

    #[test]
    fn test_second_failure_is_harmless() {
        let (mut doc, page) = mounted(1);
        let item = doc.children(page.nodes.track)[0];
        let image = first_image(&doc, item);
        dispatch(&mut doc, &page, image, Event::LoadFailure);
        dispatch(&mut doc, &page, image, Event::LoadFailure);
        assert_eq!(doc.children(item).len(), 1);
    }

    #[test]
    fn test_hover_pauses_and_resumes() {
        let (mut doc, page) = mounted(2);
        let item = doc.children(page.nodes.track)[3];
        let track = page.nodes.track;

        dispatch(&mut doc, &page, item, Event::PointerEnter);
        assert!(doc.has_class(track, PAUSED_CLASS));
        dispatch(&mut doc, &page, item, Event::PointerEnter);
        assert!(doc.has_class(track, PAUSED_CLASS));
        dispatch(&mut doc, &page, item, Event::PointerLeave);
        assert!(!doc.has_class(track, PAUSED_CLASS));
    }

    #[test]
    fn test_click_loaded_item_clones_its_image() {
        let (mut doc, page) = mounted(3);
        let item = doc.children(page.nodes.track)[1];
        let image = first_image(&doc, item);
        doc.set_load_state(
            image,
            LoadState::Loaded {
                width: 64,
                height: 32,
            },
        );

        dispatch(&mut doc, &page, item, Event::Click);

        let hero = page.nodes.hero;
        let shown = doc.children(hero);
        assert_eq!(shown.len(), 1);
        assert_ne!(shown[0], image);
        assert_eq!(doc.kind(shown[0]), doc.kind(image));
        assert_eq!(doc.style(shown[0], "width"), Some("84%"));
        assert_eq!(doc.style(shown[0], "height"), Some("84%"));
        assert_eq!(doc.style(shown[0], "object-fit"), Some("contain"));
        assert_eq!(doc.animations(hero).len(), 1);
        assert_eq!(doc.animations(hero)[0].animation.duration, PULSE_DURATION);
    }

    #[test]
    fn test_click_failed_item_shows_its_placeholder() {
        let (mut doc, page) = mounted(3);
        fail_all_loads(&mut doc, &page);
        let item = doc.children(page.nodes.track)[5];

        dispatch(&mut doc, &page, item, Event::Click);

        let shown = doc.children(page.nodes.hero);
        assert_eq!(shown.len(), 1);
        assert_eq!(
            doc.kind(shown[0]),
            &ElementKind::Placeholder(placeholder_graphic(2))
        );
    }

    #[test]
    fn test_click_pending_item_shows_placeholder() {
        let (mut doc, page) = mounted(2);
        let item = doc.children(page.nodes.track)[0];
        dispatch(&mut doc, &page, item, Event::Click);
        let shown = doc.children(page.nodes.hero);
        assert_eq!(
            doc.kind(shown[0]),
            &ElementKind::Placeholder(placeholder_graphic(0))
        );
    }

    #[test]
    fn test_repeated_clicks_replace_hero_content() {
        let (mut doc, page) = mounted(2);
        let items = doc.children(page.nodes.track);
        dispatch(&mut doc, &page, items[0], Event::Click);
        dispatch(&mut doc, &page, items[1], Event::Click);
        let shown = doc.children(page.nodes.hero);
        assert_eq!(shown.len(), 1);
        assert_eq!(
            doc.kind(shown[0]),
            &ElementKind::Placeholder(placeholder_graphic(1))
        );
    }

    #[test]
    fn test_parallax_follows_pointer_and_resets() {
        let (mut doc, page) = mounted(1);
        let hero = page.nodes.hero;
        let root = doc.root();
        doc.set_bounding_rect(hero, PxRect::new(0.0, 0.0, 100.0, 100.0));

        dispatch(&mut doc, &page, root, Event::PointerMove { x: 100.0, y: 50.0 });
        let t = doc.transform(hero).unwrap();
        assert!((t.translate_x - 4.0).abs() < 1e-9);
        assert!((t.rotate_deg - 1.0).abs() < 1e-9);

        dispatch(&mut doc, &page, root, Event::PointerLeaveDocument);
        assert_eq!(doc.transform(hero), None);
    }

    #[test]
    fn test_resize_extends_track() {
        let (mut doc, page) = mounted(2);
        let mask = doc.parent(page.nodes.track).unwrap();
        doc.set_client_extent(mask, 500.0);
        let root = doc.root();

        dispatch(&mut doc, &page, root, Event::Resize);
        assert_eq!(doc.children(page.nodes.track).len(), 8);
        dispatch(&mut doc, &page, root, Event::Resize);
        assert_eq!(doc.children(page.nodes.track).len(), 16);
        dispatch(&mut doc, &page, root, Event::Resize);
        assert_eq!(doc.children(page.nodes.track).len(), 16);
    }

    #[test]
    fn test_play_raises_alert() {
        let (mut doc, page) = mounted(1);
        let notices = dispatch(&mut doc, &page, page.nodes.play, Event::Click);
        assert_eq!(notices, vec![Notice::Alert(PLAY_MESSAGE.to_string())]);
    }

    #[test]
    fn test_unmatched_event_does_nothing() {
        let (mut doc, page) = mounted(1);
        let notices = dispatch(&mut doc, &page, page.nodes.play, Event::PointerEnter);
        assert!(notices.is_empty());
        assert!(doc.children(page.nodes.hero).is_empty());
    }
}
