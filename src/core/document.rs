//! In-memory element tree: the page the showcase draws.
//!
//! Elements live in a flat arena and reference each other by index, the same
//! way the rest of the app keeps trees: no recursive ownership, cheap
//! traversal, trivial borrowing.  Detached elements simply stay in the arena.

use std::collections::BTreeMap;
use std::fmt::Write as _;
use std::time::Instant;

use super::animation::{Animation, Transform};
use super::interactions::Listener;
use super::logos::LogoReference;
use super::view::{ElementKind, LoadState, NodeId, PxRect, View};

/// An animation together with the moment it was started.
#[derive(Debug, Clone)]
pub struct RunningAnimation {
    pub animation: Animation,
    pub started: Instant,
}

impl RunningAnimation {
    pub fn sample(&self, now: Instant) -> Option<Transform> {
        self.animation.sample(now.saturating_duration_since(self.started))
    }
}

/// A single node in the arena.
#[derive(Debug, Clone)]
pub struct Element {
    pub kind: ElementKind,
    pub id: Option<String>,
    pub classes: Vec<String>,
    pub style: BTreeMap<String, String>,
    pub transform: Option<Transform>,
    pub parent: Option<NodeId>,
    pub children: Vec<NodeId>,
    pub listeners: Vec<Listener>,
    pub animations: Vec<RunningAnimation>,
    /// Fixed extent along the scroll axis; containers without one measure
    /// their children.
    pub extent: Option<f64>,
    /// Visible extent, set by the host for elements acting as viewports.
    pub client_extent: f64,
    /// Last layout position, set by the host.
    pub rect: PxRect,
}

impl Element {
    fn new(kind: ElementKind) -> Self {
        Self {
            kind,
            id: None,
            classes: Vec::new(),
            style: BTreeMap::new(),
            transform: None,
            parent: None,
            children: Vec::new(),
            listeners: Vec::new(),
            animations: Vec::new(),
            extent: None,
            client_extent: 0.0,
            rect: PxRect::default(),
        }
    }

    /// Shallow copy as `cloneNode(false)` would make it.
    fn shallow_copy(&self) -> Self {
        Self {
            kind: self.kind.clone(),
            classes: self.classes.clone(),
            style: self.style.clone(),
            transform: self.transform,
            listeners: self.listeners.clone(),
            extent: self.extent,
            ..Self::new(ElementKind::Container)
        }
    }
}

/// Arena-backed page tree.
#[derive(Debug, Clone)]
pub struct Document {
    nodes: Vec<Element>,
    root: NodeId,
}

impl Default for Document {
    fn default() -> Self {
        Self::new()
    }
}

impl Document {
    /// A document with only its root container.
    pub fn new() -> Self {
        Self {
            nodes: vec![Element::new(ElementKind::Container)],
            root: 0,
        }
    }

    pub fn get(&self, node: NodeId) -> &Element {
        &self.nodes[node]
    }

    /// Whether `node` is reachable from the root.
    pub fn is_connected(&self, node: NodeId) -> bool {
        let mut current = Some(node);
        while let Some(id) = current {
            if id == self.root {
                return true;
            }
            current = self.nodes[id].parent;
        }
        false
    }

    /// `node` and everything below it, in document order.
    fn descendants(&self, node: NodeId) -> Vec<NodeId> {
        let mut out = Vec::new();
        let mut stack = vec![node];
        while let Some(id) = stack.pop() {
            out.push(id);
            stack.extend(self.nodes[id].children.iter().rev());
        }
        out
    }

    // ── host-side mutation ──────────────────────────────────────

    pub fn set_client_extent(&mut self, node: NodeId, px: f64) {
        self.nodes[node].client_extent = px.max(0.0);
    }

    pub fn set_bounding_rect(&mut self, node: NodeId, rect: PxRect) {
        self.nodes[node].rect = rect;
    }

    /// Record a load result on an image element.  No-op on other kinds.
    pub fn set_load_state(&mut self, node: NodeId, state: LoadState) {
        if let ElementKind::Image(img) = &mut self.nodes[node].kind {
            img.load = state;
        }
    }

    /// Connected image elements still waiting on their resource.
    pub fn pending_images(&self) -> Vec<(NodeId, LogoReference)> {
        self.descendants(self.root)
            .into_iter()
            .filter_map(|id| match &self.nodes[id].kind {
                ElementKind::Image(img) if img.load == LoadState::Pending => {
                    Some((id, img.src.clone()))
                }
                _ => None,
            })
            .collect()
    }

    pub fn animations(&self, node: NodeId) -> &[RunningAnimation] {
        &self.nodes[node].animations
    }

    /// Drop animations that have run their course.
    pub fn prune_animations(&mut self, now: Instant) {
        for element in &mut self.nodes {
            element.animations.retain(|running| {
                !running
                    .animation
                    .is_finished(now.saturating_duration_since(running.started))
            });
        }
    }

    /// Combined transform of the element at `now`: the first running
    /// animation's sample, else the element's own transform.
    pub fn effective_transform(&self, node: NodeId, now: Instant) -> Option<Transform> {
        self.nodes[node]
            .animations
            .iter()
            .find_map(|running| running.sample(now))
            .or(self.nodes[node].transform)
    }

    /// Indented text outline of the connected tree.
    pub fn outline(&self) -> String {
        let mut out = String::new();
        self.write_outline(self.root, 0, &mut out);
        out
    }

    fn write_outline(&self, node: NodeId, depth: usize, out: &mut String) {
        let el = &self.nodes[node];
        let _ = write!(out, "{}<{}", "  ".repeat(depth), el.kind.tag());
        if let Some(id) = &el.id {
            let _ = write!(out, " id=\"{id}\"");
        }
        if !el.classes.is_empty() {
            let _ = write!(out, " class=\"{}\"", el.classes.join(" "));
        }
        if !el.style.is_empty() {
            let style: Vec<String> = el.style.iter().map(|(k, v)| format!("{k}: {v}")).collect();
            let _ = write!(out, " style=\"{}\"", style.join("; "));
        }
        if let Some(transform) = &el.transform {
            let _ = write!(out, " transform=\"{}\"", transform.to_css());
        }
        match &el.kind {
            ElementKind::Image(img) => {
                let _ = write!(out, " src=\"{}\" alt=\"{}\" load={:?}", img.src, img.alt, img.load);
            }
            ElementKind::Placeholder(graphic) => {
                let _ = write!(out, " gradient=\"{}\"", graphic.gradient_id());
            }
            ElementKind::Orb(spec) => {
                let _ = write!(
                    out,
                    " size={:.0}px left={}% top={}% opacity={:.2} duration={:.1}s",
                    spec.size_px,
                    spec.left_pct,
                    spec.top_pct,
                    spec.opacity,
                    spec.duration.as_secs_f64()
                );
            }
            ElementKind::Button { label } => {
                let _ = write!(out, " label=\"{label}\"");
            }
            ElementKind::Container => {}
        }
        out.push_str(">\n");
        for &child in &el.children {
            self.write_outline(child, depth + 1, out);
        }
    }

    fn detach(&mut self, child: NodeId) {
        if let Some(parent) = self.nodes[child].parent.take() {
            self.nodes[parent].children.retain(|&c| c != child);
        }
    }
}

impl View for Document {
    fn root(&self) -> NodeId {
        self.root
    }

    fn element_by_id(&self, id: &str) -> Option<NodeId> {
        self.nodes
            .iter()
            .enumerate()
            .find(|(_, el)| el.id.as_deref() == Some(id))
            .map(|(node, _)| node)
            .filter(|&node| self.is_connected(node))
    }

    fn create_element(&mut self, kind: ElementKind) -> NodeId {
        self.nodes.push(Element::new(kind));
        self.nodes.len() - 1
    }

    fn set_id(&mut self, node: NodeId, id: &str) {
        self.nodes[node].id = Some(id.to_string());
    }

    fn kind(&self, node: NodeId) -> &ElementKind {
        &self.nodes[node].kind
    }

    fn parent(&self, node: NodeId) -> Option<NodeId> {
        self.nodes[node].parent
    }

    fn children(&self, node: NodeId) -> Vec<NodeId> {
        self.nodes[node].children.clone()
    }

    fn append_child(&mut self, parent: NodeId, child: NodeId) {
        self.detach(child);
        self.nodes[child].parent = Some(parent);
        self.nodes[parent].children.push(child);
    }

    fn clear_children(&mut self, node: NodeId) {
        for child in std::mem::take(&mut self.nodes[node].children) {
            self.nodes[child].parent = None;
        }
    }

    fn clone_node(&mut self, node: NodeId, deep: bool) -> NodeId {
        let copy = self.nodes[node].shallow_copy();
        self.nodes.push(copy);
        let id = self.nodes.len() - 1;
        if deep {
            for child in self.nodes[node].children.clone() {
                let child_copy = self.clone_node(child, true);
                self.append_child(id, child_copy);
            }
        }
        id
    }

    fn add_class(&mut self, node: NodeId, class: &str) {
        let classes = &mut self.nodes[node].classes;
        if !classes.iter().any(|c| c == class) {
            classes.push(class.to_string());
        }
    }

    fn remove_class(&mut self, node: NodeId, class: &str) {
        self.nodes[node].classes.retain(|c| c != class);
    }

    fn has_class(&self, node: NodeId, class: &str) -> bool {
        self.nodes[node].classes.iter().any(|c| c == class)
    }

    fn set_style(&mut self, node: NodeId, property: &str, value: String) {
        self.nodes[node].style.insert(property.to_string(), value);
    }

    fn style(&self, node: NodeId, property: &str) -> Option<&str> {
        self.nodes[node].style.get(property).map(String::as_str)
    }

    fn set_transform(&mut self, node: NodeId, transform: Option<Transform>) {
        self.nodes[node].transform = transform;
    }

    fn transform(&self, node: NodeId) -> Option<Transform> {
        self.nodes[node].transform
    }

    fn set_extent(&mut self, node: NodeId, px: f64) {
        self.nodes[node].extent = Some(px);
    }

    fn scroll_extent(&self, node: NodeId) -> f64 {
        let el = &self.nodes[node];
        el.extent.unwrap_or_else(|| {
            el.children
                .iter()
                .map(|&child| self.scroll_extent(child))
                .sum()
        })
    }

    fn client_extent(&self, node: NodeId) -> f64 {
        self.nodes[node].client_extent
    }

    fn bounding_rect(&self, node: NodeId) -> PxRect {
        self.nodes[node].rect
    }

    fn listen(&mut self, node: NodeId, listener: Listener) {
        self.nodes[node].listeners.push(listener);
    }

    fn listeners(&self, node: NodeId) -> &[Listener] {
        &self.nodes[node].listeners
    }

    fn animate(&mut self, node: NodeId, animation: Animation) {
        self.nodes[node].animations.push(RunningAnimation {
            animation,
            started: Instant::now(),
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;
    use crate::core::animation::Easing;
    use crate::core::interactions::{EventKind, Reaction};

    fn container(doc: &mut Document) -> NodeId {
        doc.create_element(ElementKind::Container)
    }

    #[test]
    fn test_append_moves_between_parents() {
        let mut doc = Document::new();
        let a = container(&mut doc);
        let b = container(&mut doc);
        let child = container(&mut doc);
        doc.append_child(a, child);
        doc.append_child(b, child);
        assert!(doc.children(a).is_empty());
        assert_eq!(doc.children(b), vec![child]);
        assert_eq!(doc.parent(child), Some(b));
    }

    #[test]
    fn test_clear_children_detaches() {
        let mut doc = Document::new();
        let root = doc.root();
        let child = container(&mut doc);
        doc.append_child(root, child);
        doc.clear_children(root);
        assert!(doc.children(root).is_empty());
        assert_eq!(doc.parent(child), None);
        assert!(!doc.is_connected(child));
    }

    #[test]
    fn test_element_by_id_requires_connection() {
        let mut doc = Document::new();
        let node = container(&mut doc);
        doc.set_id(node, "hero-logo");
        assert_eq!(doc.element_by_id("hero-logo"), None);
        let root = doc.root();
        doc.append_child(root, node);
        assert_eq!(doc.element_by_id("hero-logo"), Some(node));
    }

    #[test]
    fn test_deep_clone_copies_everything_but_id() {
        let mut doc = Document::new();
        let item = container(&mut doc);
        doc.set_id(item, "unique");
        doc.add_class(item, "scroller-item");
        doc.set_style(item, "opacity", "0.5".into());
        doc.set_extent(item, 100.0);
        doc.listen(
            item,
            Listener::new(EventKind::Click, Reaction::PreviewInHero { index: 4 }),
        );
        let inner = container(&mut doc);
        doc.append_child(item, inner);

        let copy = doc.clone_node(item, true);
        let el = doc.get(copy);
        assert_eq!(el.id, None);
        assert_eq!(el.classes, vec!["scroller-item"]);
        assert_eq!(doc.style(copy, "opacity"), Some("0.5"));
        assert_eq!(doc.scroll_extent(copy), 100.0);
        assert_eq!(doc.listeners(copy), doc.listeners(item));
        assert_eq!(doc.parent(copy), None);

        let copied_children = doc.children(copy);
        assert_eq!(copied_children.len(), 1);
        assert_ne!(copied_children[0], inner);
        assert_eq!(doc.parent(copied_children[0]), Some(copy));
    }

    #[test]
    fn test_shallow_clone_has_no_children() {
        let mut doc = Document::new();
        let item = container(&mut doc);
        let inner = container(&mut doc);
        doc.append_child(item, inner);
        let copy = doc.clone_node(item, false);
        assert!(doc.children(copy).is_empty());
    }

    #[test]
    fn test_scroll_extent_sums_children() {
        let mut doc = Document::new();
        let track = container(&mut doc);
        for _ in 0..4 {
            let item = container(&mut doc);
            doc.set_extent(item, 100.0);
            doc.append_child(track, item);
        }
        assert_eq!(doc.scroll_extent(track), 400.0);
    }

    #[test]
    fn test_classes_are_a_set() {
        let mut doc = Document::new();
        let node = container(&mut doc);
        doc.add_class(node, "paused");
        doc.add_class(node, "paused");
        assert_eq!(doc.get(node).classes.len(), 1);
        doc.remove_class(node, "paused");
        assert!(!doc.has_class(node, "paused"));
    }

    #[test]
    fn test_pending_images_only_connected() {
        let mut doc = Document::new();
        let root = doc.root();
        let attached = doc.create_element(ElementKind::Image(
            crate::core::view::ImageElement::new("a.png".into(), "Logo 1"),
        ));
        let _detached = doc.create_element(ElementKind::Image(
            crate::core::view::ImageElement::new("b.png".into(), "Logo 2"),
        ));
        doc.append_child(root, attached);

        let pending = doc.pending_images();
        assert_eq!(pending, vec![(attached, LogoReference::new("a.png"))]);

        doc.set_load_state(attached, LoadState::Failed);
        assert!(doc.pending_images().is_empty());
    }

    #[test]
    fn test_effective_transform_prefers_running_animation() {
        let mut doc = Document::new();
        let hero = container(&mut doc);
        doc.set_transform(hero, Some(Transform::translate(3.0, 0.0)));
        let start = Instant::now();
        assert_eq!(
            doc.effective_transform(hero, start),
            Some(Transform::translate(3.0, 0.0))
        );

        doc.animate(
            hero,
            Animation::once(
                vec![Transform::IDENTITY.with_scale(0.5), Transform::IDENTITY],
                Duration::from_secs(60),
                Easing::Linear,
            ),
        );
        let sampled = doc.effective_transform(hero, Instant::now()).unwrap();
        assert!(sampled.scale < 1.0);

        let later = Instant::now() + Duration::from_secs(61);
        doc.prune_animations(later);
        assert!(doc.animations(hero).is_empty());
        assert_eq!(
            doc.effective_transform(hero, later),
            Some(Transform::translate(3.0, 0.0))
        );
    }

    #[test]
    fn test_outline_mentions_ids_and_classes() {
        let mut doc = Document::new();
        let root = doc.root();
        let track = container(&mut doc);
        doc.set_id(track, "scroller-track");
        doc.add_class(track, "paused");
        doc.append_child(root, track);
        let outline = doc.outline();
        assert!(outline.contains("<div id=\"scroller-track\" class=\"paused\">"));
    }

    #[test]
    fn test_outline_shows_inline_transform() {
        let mut doc = Document::new();
        let root = doc.root();
        let hero = container(&mut doc);
        doc.append_child(root, hero);
        doc.set_transform(hero, Some(Transform::translate(4.0, -2.0)));
        assert!(doc
            .outline()
            .contains("transform=\"translate3d(4px, -2px, 0) rotate3d(0,0,1,0deg) scale(1)\""));
    }
}
