//! Interaction describer: raw event + scene target → structured snapshot.
//!
//! Everything here is a pure function of the scene and the event. The
//! output feeds the event log as a human-readable trace; the selector
//! string is the centerpiece ("what did I just click, in CSS terms").

use crate::input::InputEvent;
use crate::layout::Viewport;
use crate::scene::{SceneQuery, SceneRef, self_and_ancestors};
use serde::Serialize;

/// Ancestor depth bound for synthesized selectors.
const SELECTOR_DEPTH_CONCISE: usize = 3;
const SELECTOR_DEPTH_FULL: usize = 5;

/// Attribute snapshot cap — interaction traces are size-bounded.
const MAX_ATTRIBUTES: usize = 16;

/// Class-name substrings considered meaningful in concise selectors.
const MEANINGFUL_CLASS_PATTERNS: [&str; 7] = [
    "project",
    "button",
    "panel",
    "container",
    "main",
    "header",
    "footer",
];

/// Structured view of one element involved in an interaction.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ElementInfo {
    pub tag_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub class_name: Option<String>,
    pub selector: String,
    /// Bounding-box center in viewport coordinates; absent for
    /// geometry-less elements.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub position: Option<(f64, f64)>,
    /// Attributes minus `style`/`class`, insertion order, capped.
    /// Omitted entirely when empty.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub attributes: Option<Vec<(String, String)>>,
}

/// Immutable snapshot of one interaction. Never mutated after creation.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InteractionDetails {
    pub event_type: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub coordinates: Option<(f64, f64)>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub key: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub target: Option<ElementInfo>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub current_target: Option<ElementInfo>,
    pub user_agent: String,
    pub viewport: (f64, f64),
}

/// Synthesize a CSS-like selector for an element by walking its ancestors.
///
/// Stops at the first ancestor carrying an `#id` (unique — nothing above
/// it adds information) or at the depth bound. In concise mode only
/// classes matching the meaningful allow-list survive.
pub fn synthesize_selector(scene: &dyn SceneQuery, target: SceneRef, concise: bool) -> String {
    let depth_bound = if concise {
        SELECTOR_DEPTH_CONCISE
    } else {
        SELECTOR_DEPTH_FULL
    };

    let mut parts: Vec<String> = Vec::new();
    for r in self_and_ancestors(scene, target) {
        let element = scene.element(r);
        let mut part = element.tag.as_str().to_string();

        if let Some(id) = element.id {
            part.push('#');
            part.push_str(id.as_str());
            parts.insert(0, part);
            break;
        }

        if !element.classes.is_empty() {
            let classes: Vec<&str> = if concise {
                element
                    .classes
                    .iter()
                    .map(|c| c.as_str())
                    .filter(|c| MEANINGFUL_CLASS_PATTERNS.iter().any(|p| c.contains(p)))
                    .collect()
            } else {
                element.classes.iter().map(|c| c.as_str()).collect()
            };
            for class in classes {
                part.push('.');
                part.push_str(class);
            }
        }

        // Disambiguate among same-tag siblings (1-based position).
        let same_tag: Vec<SceneRef> = scene
            .siblings(r)
            .into_iter()
            .filter(|&s| scene.element(s).tag == element.tag)
            .collect();
        if same_tag.len() > 1
            && let Some(index) = same_tag.iter().position(|&s| s == r)
        {
            part.push_str(&format!(":nth-child({})", index + 1));
        }

        parts.insert(0, part);
        if parts.len() >= depth_bound {
            break;
        }
    }

    parts.join(" > ")
}

/// Snapshot a single element: identity, selector, center, attributes.
pub fn element_info(scene: &dyn SceneQuery, target: SceneRef, concise: bool) -> ElementInfo {
    let element = scene.element(target);

    // `style` and `class` are excluded here, whatever the scene stored.
    let mut attributes: Vec<(String, String)> = element
        .attributes
        .iter()
        .filter(|(k, _)| !matches!(k.as_str(), "style" | "class"))
        .map(|(k, v)| (k.as_str().to_string(), v.clone()))
        .collect();
    attributes.truncate(MAX_ATTRIBUTES);

    ElementInfo {
        tag_name: element.tag.as_str().to_string(),
        id: element.id.map(|id| id.as_str().to_string()),
        class_name: element.class_string(),
        selector: synthesize_selector(scene, target, concise),
        position: scene.bounds_of(target).map(|b| {
            let c = b.center();
            (c.x, c.y)
        }),
        attributes: if attributes.is_empty() {
            None
        } else {
            Some(attributes)
        },
    }
}

/// Describe an interaction: event classification plus target snapshots.
///
/// Deterministic given identical scene state and event; no side effects.
pub fn describe(
    scene: &dyn SceneQuery,
    event: &InputEvent,
    event_type: &str,
    target: Option<SceneRef>,
    current_target: Option<SceneRef>,
    concise: bool,
) -> InteractionDetails {
    let Viewport { width, height } = scene.viewport();
    let (key, code) = match event.key_info() {
        Some((k, c)) => (Some(k.to_string()), Some(c.to_string())),
        None => (None, None),
    };

    InteractionDetails {
        event_type: event_type.to_string(),
        coordinates: event.position(),
        key,
        code,
        target: target.map(|r| element_info(scene, r, concise)),
        current_target: current_target.map(|r| element_info(scene, r, concise)),
        user_agent: scene.user_agent().to_string(),
        viewport: (width, height),
    }
}
