//! Central application state.
//!
//! All mutable state lives here so that the rest of the app can be pure
//! functions over `&AppState` (rendering) or `&mut AppState` (event handling).

use std::collections::HashMap;
use std::time::Instant;

use image::RgbaImage;
use rand::Rng;
use ratatui::layout::Rect;

use crate::config::AppConfig;
use crate::core::{
    document::Document,
    interactions::{dispatch, Event, Notice},
    logos::LogoReference,
    page::{build_markup, Page, PageError, PageNodes},
    placeholder::placeholder_graphic,
    view::{LoadState, NodeId},
};
use crate::ui::{
    element::Assets,
    layout::{rect_to_px, PageLayout, CELL_W_PX},
    scroller::{is_paused, loop_duration_s, Marquee},
};

use super::loader::LoadUpdate;

/// Which view / overlay is currently active.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ActiveView {
    #[default]
    Page,
    Alert,
}

/// Top-level application state.
pub struct AppState {
    /// The page being shown.
    pub doc: Document,
    /// Bound contract elements and the scroller.
    pub page: Page,
    pub config: AppConfig,
    /// Decoded logos by reference.  Filled in as background loads finish.
    pub logos: HashMap<LogoReference, RgbaImage>,
    /// Rasterised placeholder square; identical for every index.
    pub placeholder: RgbaImage,
    pub loaded: usize,
    pub failed: usize,
    /// Which view / overlay is currently shown.
    pub active_view: ActiveView,
    /// Message of the open alert.
    pub alert: Option<String>,
    /// Scroller item currently under the pointer.
    pub hovered: Option<NodeId>,
    pub marquee: Marquee,
    /// Full terminal area, updated on resize.
    pub terminal_area: Rect,
    /// Controls the main event loop.
    pub should_quit: bool,
}

impl AppState {
    /// Build the page markup, size it for `terminal_area` and mount it.
    pub fn mount<R: Rng + ?Sized>(
        config: AppConfig,
        terminal_area: Rect,
        rng: &mut R,
    ) -> Result<Self, PageError> {
        let mut doc = Document::new();
        build_markup(&mut doc);
        let nodes = PageNodes::bind(&doc)?;
        apply_geometry(&mut doc, &nodes, PageLayout::from_area(terminal_area));

        let page = Page::mount(
            &mut doc,
            &config.logos,
            config.orb_count,
            config.max_copies,
            rng,
        )?;

        Ok(Self {
            doc,
            page,
            config,
            logos: HashMap::new(),
            placeholder: placeholder_graphic(0).rasterize(),
            loaded: 0,
            failed: 0,
            active_view: ActiveView::default(),
            alert: None,
            hovered: None,
            marquee: Marquee::default(),
            terminal_area,
            should_quit: false,
        })
    }

    pub fn layout(&self) -> PageLayout {
        PageLayout::from_area(self.terminal_area)
    }

    pub fn assets(&self) -> Assets<'_> {
        Assets {
            logos: &self.logos,
            placeholder: &self.placeholder,
        }
    }

    /// Push the current terminal geometry into the document.
    pub fn sync_geometry(&mut self) {
        let layout = self.layout();
        apply_geometry(&mut self.doc, &self.page.nodes, layout);
    }

    /// Deliver `event` to `target` and surface whatever it raises.
    pub fn dispatch(&mut self, target: NodeId, event: Event) {
        let notices = dispatch(&mut self.doc, &self.page, target, event);
        for notice in notices {
            match notice {
                Notice::Alert(message) => {
                    tracing::info!(%message, "alert raised");
                    self.alert = Some(message);
                    self.active_view = ActiveView::Alert;
                }
            }
        }
    }

    pub fn dismiss_alert(&mut self) {
        self.alert = None;
        self.active_view = ActiveView::Page;
    }

    /// Record a finished load on every image bound to its reference.
    /// Failures are dispatched so the images swap to their placeholders.
    pub fn apply_load(&mut self, update: LoadUpdate) {
        let state = match &update {
            LoadUpdate::Loaded { logo, .. } => LoadState::Loaded {
                width: logo.width,
                height: logo.height,
            },
            LoadUpdate::Failed { .. } => LoadState::Failed,
        };
        let targets: Vec<NodeId> = self
            .doc
            .pending_images()
            .into_iter()
            .filter(|(_, src)| src == update.reference())
            .map(|(node, _)| node)
            .collect();
        for &node in &targets {
            self.doc.set_load_state(node, state);
        }

        match update {
            LoadUpdate::Loaded { reference, logo } => {
                tracing::debug!(%reference, width = logo.width, height = logo.height, "logo loaded");
                self.loaded += 1;
                self.logos.insert(reference, logo.thumbnail);
            }
            LoadUpdate::Failed { reference, error } => {
                tracing::debug!(%reference, %error, "logo failed to load, using placeholder");
                self.failed += 1;
                for node in targets {
                    self.dispatch(node, Event::LoadFailure);
                }
            }
        }
    }

    /// Advance time-driven state: the marquee and finished animations.
    pub fn tick(&mut self, now: Instant) {
        let track = self.page.scroller.track();
        let duration = loop_duration_s(&self.doc, track).unwrap_or(0.0);
        self.marquee.advance(
            now,
            self.page.scroller.loop_extent(&self.doc),
            duration,
            is_paused(&self.doc, track),
        );
        self.doc.prune_animations(now);
    }

    /// One-line summary for the status bar.
    pub fn status_line(&self) -> String {
        let total = crate::app::loader::distinct(&self.config.logos).len();
        let copies = self.page.scroller.copies(&self.doc);
        let mut line = format!(
            " q: quit | p: play | {} logos, {} loaded, {} placeholder | {}× loop",
            total, self.loaded, self.failed, copies
        );
        if total > self.loaded + self.failed {
            line.push_str(" | loading…");
        }
        line
    }
}

/// Hero position and scroller viewport, in page pixels.
fn apply_geometry(doc: &mut Document, nodes: &PageNodes, layout: PageLayout) {
    doc.set_bounding_rect(nodes.hero, rect_to_px(layout.hero_inner()));
    if let Some(mask) = nodes.mask(&*doc) {
        doc.set_client_extent(mask, layout.scroller_inner().width as f64 * CELL_W_PX);
    }
}
