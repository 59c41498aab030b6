//! View-layer abstraction over the page's element tree.
//!
//! Population, adjustment and the interaction reactions only ever talk to a
//! [`View`].  The in-memory [`Document`](super::document::Document) is the one
//! implementation: the terminal host renders it, and tests assert on it
//! directly.

use super::animation::{Animation, Transform};
use super::interactions::Listener;
use super::logos::LogoReference;
use super::orbs::OrbSpec;
use super::placeholder::PlaceholderGraphic;

/// Index of an element inside a view.
pub type NodeId = usize;

// ───────────────────────────────────────── geometry ──────────

/// Axis-aligned rectangle in page pixels.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct PxRect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl PxRect {
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    pub fn center(&self) -> (f64, f64) {
        (self.x + self.width / 2.0, self.y + self.height / 2.0)
    }

    /// A rect with no area can't anchor any relative measurement.
    pub fn is_empty(&self) -> bool {
        self.width <= 0.0 || self.height <= 0.0
    }
}

// ───────────────────────────────────────── element kinds ─────

/// Progress of an image element's resource load.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LoadState {
    #[default]
    Pending,
    /// Natural size of the decoded resource.
    Loaded { width: u32, height: u32 },
    Failed,
}

impl LoadState {
    pub fn is_loaded(self) -> bool {
        matches!(self, LoadState::Loaded { .. })
    }
}

/// An `<img>`-like element bound to a logo reference.
#[derive(Debug, Clone, PartialEq)]
pub struct ImageElement {
    pub src: LogoReference,
    pub alt: String,
    pub load: LoadState,
}

impl ImageElement {
    pub fn new(src: LogoReference, alt: impl Into<String>) -> Self {
        Self {
            src,
            alt: alt.into(),
            load: LoadState::Pending,
        }
    }
}

/// What an element is.  Everything that isn't a leaf graphic is a container.
#[derive(Debug, Clone, PartialEq)]
pub enum ElementKind {
    Container,
    Image(ImageElement),
    Placeholder(PlaceholderGraphic),
    Orb(OrbSpec),
    Button { label: String },
}

impl ElementKind {
    /// Short tag used by outlines and logs.
    pub fn tag(&self) -> &'static str {
        match self {
            ElementKind::Container => "div",
            ElementKind::Image(_) => "img",
            ElementKind::Placeholder(_) => "svg",
            ElementKind::Orb(_) => "orb",
            ElementKind::Button { .. } => "button",
        }
    }
}

// ───────────────────────────────────────── trait ─────────────

/// Query / mutate operations the page logic needs from its host tree.
///
/// Panics on a `NodeId` the view never handed out; ids are only obtained
/// from the view itself.
pub trait View {
    /// The document root (where document-level listeners live).
    fn root(&self) -> NodeId;

    /// Look up a connected element by its `id` attribute.
    fn element_by_id(&self, id: &str) -> Option<NodeId>;

    /// Create a detached element.
    fn create_element(&mut self, kind: ElementKind) -> NodeId;

    fn set_id(&mut self, node: NodeId, id: &str);

    fn kind(&self, node: NodeId) -> &ElementKind;

    fn parent(&self, node: NodeId) -> Option<NodeId>;

    fn children(&self, node: NodeId) -> Vec<NodeId>;

    /// Append `child` as the last child of `parent`, detaching it first if
    /// it already has a parent.
    fn append_child(&mut self, parent: NodeId, child: NodeId);

    /// Detach every child of `node`.
    fn clear_children(&mut self, node: NodeId);

    /// Copy an element (and with `deep`, its subtree).  The copy is detached
    /// and never carries the source node's `id`.
    fn clone_node(&mut self, node: NodeId, deep: bool) -> NodeId;

    fn add_class(&mut self, node: NodeId, class: &str);

    fn remove_class(&mut self, node: NodeId, class: &str);

    fn has_class(&self, node: NodeId, class: &str) -> bool;

    fn set_style(&mut self, node: NodeId, property: &str, value: String);

    fn style(&self, node: NodeId, property: &str) -> Option<&str>;

    /// `None` resets to identity.
    fn set_transform(&mut self, node: NodeId, transform: Option<Transform>);

    fn transform(&self, node: NodeId) -> Option<Transform>;

    /// Give an element a fixed extent along the scroll axis.
    fn set_extent(&mut self, node: NodeId, px: f64);

    /// Full rendered extent of the element's content along the scroll axis.
    fn scroll_extent(&self, node: NodeId) -> f64;

    /// Visible extent of the element along the scroll axis.
    fn client_extent(&self, node: NodeId) -> f64;

    /// Where the element was last laid out, in page pixels.
    fn bounding_rect(&self, node: NodeId) -> PxRect;

    fn listen(&mut self, node: NodeId, listener: Listener);

    fn listeners(&self, node: NodeId) -> &[Listener];

    /// Start a declarative animation on the element.
    fn animate(&mut self, node: NodeId, animation: Animation);
}
