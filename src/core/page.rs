//! The showcase page: markup, the element contract, and startup wiring.

use rand::Rng;
use thiserror::Error;

use super::interactions::{EventKind, Listener, Reaction};
use super::logos::LogoReference;
use super::orbs::make_orbs;
use super::scroller::ScrollerPopulator;
use super::view::{ElementKind, NodeId, View};

// ───────────────────────────────────────── contract ──────────

pub const TRACK_ID: &str = "scroller-track";
pub const ORBS_ID: &str = "orbs";
pub const HERO_ID: &str = "hero-logo";
pub const PLAY_ID: &str = "btn-play";

pub const MASK_CLASS: &str = "scroller-mask";
pub const PLAY_LABEL: &str = "Play";
pub const PLAY_MESSAGE: &str = "Play clicked — plug your game or demo here.";

#[derive(Debug, Error, PartialEq, Eq)]
pub enum PageError {
    #[error("page markup has no element with id \"{0}\"")]
    MissingElement(&'static str),
}

/// Build the static markup the page logic binds to: the orb layer, the
/// hero, the play button, and the scroller track inside its mask.
pub fn build_markup<V: View>(view: &mut V) {
    let root = view.root();

    let orbs = view.create_element(ElementKind::Container);
    view.set_id(orbs, ORBS_ID);
    view.append_child(root, orbs);

    let hero = view.create_element(ElementKind::Container);
    view.set_id(hero, HERO_ID);
    view.append_child(root, hero);

    let play = view.create_element(ElementKind::Button {
        label: PLAY_LABEL.to_string(),
    });
    view.set_id(play, PLAY_ID);
    view.append_child(root, play);

    let mask = view.create_element(ElementKind::Container);
    view.add_class(mask, MASK_CLASS);
    view.append_child(root, mask);

    let track = view.create_element(ElementKind::Container);
    view.set_id(track, TRACK_ID);
    view.append_child(mask, track);
}

/// Elements the page logic depends on, looked up once.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageNodes {
    pub root: NodeId,
    pub track: NodeId,
    pub orbs: NodeId,
    pub hero: NodeId,
    pub play: NodeId,
}

impl PageNodes {
    pub fn bind<V: View>(view: &V) -> Result<Self, PageError> {
        let lookup = |id: &'static str| view.element_by_id(id).ok_or(PageError::MissingElement(id));
        Ok(Self {
            root: view.root(),
            track: lookup(TRACK_ID)?,
            orbs: lookup(ORBS_ID)?,
            hero: lookup(HERO_ID)?,
            play: lookup(PLAY_ID)?,
        })
    }

    /// The element whose client extent is the scroller's viewport.
    pub fn mask<V: View>(&self, view: &V) -> Option<NodeId> {
        view.parent(self.track)
    }
}

// ───────────────────────────────────────── mounted page ──────

/// A page whose scroller is populated and whose listeners are registered.
#[derive(Debug, Clone)]
pub struct Page {
    pub nodes: PageNodes,
    pub scroller: ScrollerPopulator,
}

impl Page {
    /// Bind the contract, populate the scroller, create the orbs, register
    /// the document-level listeners and run the first viewport adjustment.
    pub fn mount<V: View, R: Rng + ?Sized>(
        view: &mut V,
        logos: &[LogoReference],
        orb_count: usize,
        max_copies: usize,
        rng: &mut R,
    ) -> Result<Self, PageError> {
        let nodes = PageNodes::bind(view)?;

        let mut scroller = ScrollerPopulator::new(nodes.track, max_copies);
        scroller.populate(view, logos);

        make_orbs(view, nodes.orbs, orb_count, rng);

        view.listen(nodes.root, Listener::new(EventKind::PointerMove, Reaction::Parallax));
        view.listen(
            nodes.root,
            Listener::new(EventKind::PointerLeaveDocument, Reaction::ResetParallax),
        );
        view.listen(nodes.root, Listener::new(EventKind::Resize, Reaction::AdjustScroller));
        view.listen(
            nodes.play,
            Listener::new(
                EventKind::Click,
                Reaction::Alert {
                    message: PLAY_MESSAGE.to_string(),
                },
            ),
        );

        scroller.adjust_for_viewport(view);
        tracing::info!(logos = logos.len(), orb_count, "page mounted");

        Ok(Self { nodes, scroller })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::document::Document;
    use crate::core::scroller::DEFAULT_MAX_COPIES;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_bind_finds_contract_elements() {
        let mut doc = Document::new();
        build_markup(&mut doc);
        let nodes = PageNodes::bind(&doc).unwrap();
        assert_eq!(doc.element_by_id(TRACK_ID), Some(nodes.track));
        let mask = nodes.mask(&doc).unwrap();
        assert!(doc.has_class(mask, MASK_CLASS));
        assert!(matches!(doc.kind(nodes.play), ElementKind::Button { .. }));
    }

    #[test]
    fn test_bind_reports_missing_element() {
        let doc = Document::new();
        assert_eq!(
            PageNodes::bind(&doc).unwrap_err(),
            PageError::MissingElement(TRACK_ID)
        );

        let mut doc = Document::new();
        build_markup(&mut doc);
        let hero = doc.element_by_id(HERO_ID).unwrap();
        let root = doc.root();
        doc.clear_children(root);
        doc.append_child(root, hero);
        assert!(PageNodes::bind(&doc).is_err());
    }

    #[test]
    fn test_mount_wires_everything() {
        let mut doc = Document::new();
        build_markup(&mut doc);
        let mask = doc.parent(doc.element_by_id(TRACK_ID).unwrap()).unwrap();
        doc.set_client_extent(mask, 800.0);

        let logos: Vec<LogoReference> = ["a.png", "b.png", "c.png"].map(LogoReference::from).to_vec();
        let mut rng = StdRng::seed_from_u64(9);
        let page = Page::mount(&mut doc, &logos, 4, DEFAULT_MAX_COPIES, &mut rng).unwrap();

        // 600px after population, doubled once on the startup adjustment.
        assert_eq!(doc.children(page.nodes.track).len(), 12);
        assert_eq!(doc.children(page.nodes.orbs).len(), 4);
        assert_eq!(doc.listeners(page.nodes.root).len(), 3);
        assert_eq!(doc.listeners(page.nodes.play).len(), 1);
        assert_eq!(page.scroller.copies(&doc), 4);
    }
}
