//! Scene queries: the host-environment surface the interaction core sees.
//!
//! The describer and the trail engine never touch a live DOM. They work
//! against `SceneQuery` — point lookup, ancestor walks, bounding boxes —
//! which the host supplies. `SceneDom` is the in-memory implementation,
//! a `StableDiGraph` tree with front-to-back hit testing.

use crate::id::Atom;
use crate::layout::Viewport;
use kurbo::{Point, Rect};
use petgraph::graph::NodeIndex;
use petgraph::stable_graph::StableDiGraph;
use smallvec::SmallVec;

/// Opaque handle to an element in the scene.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SceneRef(NodeIndex);

/// A scene element: the structured view of one UI node.
#[derive(Debug, Clone)]
pub struct SceneElement {
    /// Tag name, lowercased on construction.
    pub tag: Atom,
    pub id: Option<Atom>,
    pub classes: SmallVec<[Atom; 4]>,
    /// Attribute key/value pairs in insertion order. `class` and `style`
    /// may appear here; interaction snapshots drop them.
    pub attributes: Vec<(Atom, String)>,
    /// Geometry in viewport coordinates. `None` for non-visual elements
    /// (they never hit, and the describer omits their position).
    pub bounds: Option<Rect>,
}

impl SceneElement {
    pub fn new(tag: &str) -> Self {
        Self {
            tag: Atom::intern_lower(tag),
            id: None,
            classes: SmallVec::new(),
            attributes: Vec::new(),
            bounds: None,
        }
    }

    pub fn with_id(mut self, id: &str) -> Self {
        self.id = Some(Atom::intern(id));
        self
    }

    pub fn with_class(mut self, class: &str) -> Self {
        self.classes.push(Atom::intern(class));
        self
    }

    pub fn with_attr(mut self, key: &str, value: &str) -> Self {
        self.attributes.push((Atom::intern(key), value.to_string()));
        self
    }

    pub fn with_bounds(mut self, bounds: Rect) -> Self {
        self.bounds = Some(bounds);
        self
    }

    pub fn has_class(&self, class: Atom) -> bool {
        self.classes.contains(&class)
    }

    pub fn attr(&self, key: Atom) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(k, _)| *k == key)
            .map(|(_, v)| v.as_str())
    }

    /// Space-joined class string, `None` when the element has no classes.
    pub fn class_string(&self) -> Option<String> {
        if self.classes.is_empty() {
            return None;
        }
        Some(
            self.classes
                .iter()
                .map(|c| c.as_str())
                .collect::<Vec<_>>()
                .join(" "),
        )
    }
}

/// What the interaction core may ask of the host environment.
pub trait SceneQuery {
    /// Topmost element at a viewport point, or `None` for background.
    fn element_at(&self, p: Point) -> Option<SceneRef>;
    fn parent(&self, r: SceneRef) -> Option<SceneRef>;
    fn children(&self, r: SceneRef) -> Vec<SceneRef>;
    /// All children of `r`'s parent, in document order, `r` included.
    /// Unlike [`SceneQuery::parent`], this sees past the scene root, so
    /// top-level elements still know their siblings.
    fn siblings(&self, r: SceneRef) -> Vec<SceneRef>;
    fn element(&self, r: SceneRef) -> &SceneElement;
    fn bounds_of(&self, r: SceneRef) -> Option<Rect>;
    fn viewport(&self) -> Viewport;
    fn user_agent(&self) -> &str;
}

/// In-memory scene tree.
pub struct SceneDom {
    graph: StableDiGraph<SceneElement, ()>,
    root: NodeIndex,
    viewport: Viewport,
    user_agent: String,
}

impl SceneDom {
    pub fn new(viewport: Viewport, user_agent: &str) -> Self {
        let mut graph = StableDiGraph::new();
        let root = graph.add_node(
            SceneElement::new("root").with_bounds(Rect::new(0.0, 0.0, viewport.width, viewport.height)),
        );
        Self {
            graph,
            root,
            viewport,
            user_agent: user_agent.to_string(),
        }
    }

    pub fn root(&self) -> SceneRef {
        SceneRef(self.root)
    }

    /// Add an element as a child of `parent`. Later siblings paint on top.
    pub fn add_element(&mut self, parent: SceneRef, element: SceneElement) -> SceneRef {
        let idx = self.graph.add_node(element);
        self.graph.add_edge(parent.0, idx, ());
        SceneRef(idx)
    }

    /// Children in document (insertion) order. Sorted by index so the
    /// order is deterministic regardless of adjacency iteration.
    fn child_indices(&self, idx: NodeIndex) -> Vec<NodeIndex> {
        let mut children: Vec<NodeIndex> = self
            .graph
            .neighbors_directed(idx, petgraph::Direction::Outgoing)
            .collect();
        children.sort();
        children
    }

    /// Reverse-walk the tree (last painted = topmost).
    fn hit_node(&self, idx: NodeIndex, p: Point) -> Option<NodeIndex> {
        for &child in self.child_indices(idx).iter().rev() {
            if let Some(hit) = self.hit_node(child, p) {
                return Some(hit);
            }
        }
        if idx == self.root {
            return None;
        }
        if let Some(b) = self.graph[idx].bounds
            && b.contains(p)
        {
            return Some(idx);
        }
        None
    }
}

impl SceneQuery for SceneDom {
    fn element_at(&self, p: Point) -> Option<SceneRef> {
        self.hit_node(self.root, p).map(SceneRef)
    }

    fn parent(&self, r: SceneRef) -> Option<SceneRef> {
        if r.0 == self.root {
            return None;
        }
        self.graph
            .neighbors_directed(r.0, petgraph::Direction::Incoming)
            .next()
            .filter(|&idx| idx != self.root)
            .map(SceneRef)
    }

    fn children(&self, r: SceneRef) -> Vec<SceneRef> {
        self.child_indices(r.0).into_iter().map(SceneRef).collect()
    }

    fn siblings(&self, r: SceneRef) -> Vec<SceneRef> {
        let parent = self
            .graph
            .neighbors_directed(r.0, petgraph::Direction::Incoming)
            .next();
        match parent {
            Some(p) => self.child_indices(p).into_iter().map(SceneRef).collect(),
            None => vec![r],
        }
    }

    fn element(&self, r: SceneRef) -> &SceneElement {
        &self.graph[r.0]
    }

    fn bounds_of(&self, r: SceneRef) -> Option<Rect> {
        self.graph[r.0].bounds
    }

    fn viewport(&self) -> Viewport {
        self.viewport
    }

    fn user_agent(&self) -> &str {
        &self.user_agent
    }
}

/// Ancestor chain starting at `r` itself, walking toward the root.
pub fn self_and_ancestors(scene: &dyn SceneQuery, r: SceneRef) -> Vec<SceneRef> {
    let mut chain = vec![r];
    let mut current = r;
    while let Some(parent) = scene.parent(current) {
        chain.push(parent);
        current = parent;
    }
    chain
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scene_with_two_nodes() -> (SceneDom, SceneRef, SceneRef) {
        let mut dom = SceneDom::new(Viewport::default(), "test-agent");
        let root = dom.root();
        let a = dom.add_element(
            root,
            SceneElement::new("div")
                .with_class("project-node")
                .with_bounds(Rect::new(10.0, 10.0, 110.0, 60.0)),
        );
        let b = dom.add_element(
            root,
            SceneElement::new("div")
                .with_class("project-node")
                .with_bounds(Rect::new(50.0, 10.0, 150.0, 60.0)),
        );
        (dom, a, b)
    }

    #[test]
    fn hit_test_prefers_topmost() {
        let (dom, _a, b) = scene_with_two_nodes();
        // Overlap region: the later sibling paints on top.
        assert_eq!(dom.element_at(Point::new(60.0, 20.0)), Some(b));
    }

    #[test]
    fn hit_test_misses_background() {
        let (dom, ..) = scene_with_two_nodes();
        assert_eq!(dom.element_at(Point::new(500.0, 500.0)), None);
    }

    #[test]
    fn geometry_less_elements_never_hit() {
        let mut dom = SceneDom::new(Viewport::default(), "test-agent");
        let root = dom.root();
        dom.add_element(root, SceneElement::new("script"));
        assert_eq!(dom.element_at(Point::new(1.0, 1.0)), None);
    }

    #[test]
    fn ancestors_walk_excludes_root() {
        let mut dom = SceneDom::new(Viewport::default(), "test-agent");
        let root = dom.root();
        let outer = dom.add_element(root, SceneElement::new("main"));
        let inner = dom.add_element(outer, SceneElement::new("section"));
        let leaf = dom.add_element(inner, SceneElement::new("button"));

        let chain = self_and_ancestors(&dom, leaf);
        assert_eq!(chain, vec![leaf, inner, outer]);
    }
}
