//! End-to-end describer scenario: a scene assembled from real project
//! data through the layout pass, hit-tested and described the way the
//! event log consumes it.

use atlas_core::describe::{describe, synthesize_selector};
use atlas_core::input::{InputEvent, Modifiers};
use atlas_core::layout::{Viewport, resolve_layout};
use atlas_core::model::{PercentPos, Project, ProjectId};
use atlas_core::scene::{SceneDom, SceneElement, SceneQuery};
use pretty_assertions::assert_eq;

fn project_at(id: i64, title: &str, x: f64, y: f64, major: bool) -> Project {
    Project {
        id: ProjectId(id),
        title: title.to_string(),
        meta: String::new(),
        description: String::new(),
        links: Vec::new(),
        related: Vec::new(),
        tags: Vec::new(),
        is_major: major,
        position: PercentPos { x, y },
    }
}

/// Build the page skeleton the way the display layer does: a `main`
/// canvas, a node per project positioned by the layout pass.
fn portfolio_scene(projects: &[Project]) -> SceneDom {
    let viewport = Viewport::default();
    let bounds = resolve_layout(projects, viewport);

    let mut dom = SceneDom::new(viewport, "atlas-test/1.0");
    let root = dom.root();
    dom.add_element(
        root,
        SceneElement::new("header").with_bounds(kurbo::Rect::new(0.0, 0.0, viewport.width, 64.0)),
    );
    let canvas = dom.add_element(
        root,
        SceneElement::new("main")
            .with_class("canvas-container")
            .with_bounds(kurbo::Rect::new(0.0, 64.0, viewport.width, viewport.height)),
    );
    for project in projects {
        dom.add_element(
            canvas,
            SceneElement::new("div")
                .with_class("project-node")
                .with_attr("data-project-id", &project.id.0.to_string())
                .with_attr("role", "button")
                .with_bounds(bounds[&project.id]),
        );
    }
    dom
}

#[test]
fn click_on_node_is_described_with_concise_selector() {
    let projects = vec![
        project_at(1, "Atlas", 30.0, 40.0, false),
        project_at(2, "Lexicon", 70.0, 60.0, true),
    ];
    let scene = portfolio_scene(&projects);

    // Center of project 2: 70% x 60% of the default 1280x800 viewport.
    let event = InputEvent::PointerDown {
        x: 896.0,
        y: 480.0,
        modifiers: Modifiers::NONE,
    };
    let target = scene.element_at(kurbo::Point::new(896.0, 480.0));
    assert!(target.is_some());

    let details = describe(&scene, &event, "click", target, None, true);
    let info = details.target.unwrap();
    assert_eq!(info.tag_name, "div");
    assert_eq!(info.class_name.as_deref(), Some("project-node"));
    assert_eq!(info.position, Some((896.0, 480.0)));
    assert_eq!(
        info.attributes,
        Some(vec![
            ("data-project-id".to_string(), "2".to_string()),
            ("role".to_string(), "button".to_string()),
        ])
    );
    assert_eq!(details.viewport, (1280.0, 800.0));
}

#[test]
fn sibling_nodes_get_distinct_selectors() {
    let projects = vec![
        project_at(1, "Atlas", 20.0, 40.0, false),
        project_at(2, "Lexicon", 50.0, 40.0, false),
        project_at(3, "Archive", 80.0, 40.0, false),
    ];
    let scene = portfolio_scene(&projects);
    let bounds = resolve_layout(&projects, Viewport::default());

    let selectors: Vec<String> = projects
        .iter()
        .map(|p| {
            let hit = scene
                .element_at(bounds[&p.id].center())
                .unwrap_or_else(|| panic!("no node for {}", p.title));
            synthesize_selector(&scene, hit, true)
        })
        .collect();

    assert_eq!(
        selectors,
        vec![
            "main.canvas-container > div.project-node:nth-child(1)",
            "main.canvas-container > div.project-node:nth-child(2)",
            "main.canvas-container > div.project-node:nth-child(3)",
        ]
    );
}

#[test]
fn background_click_describes_without_target() {
    let scene = portfolio_scene(&[project_at(1, "Atlas", 10.0, 90.0, false)]);
    let point = kurbo::Point::new(640.0, 400.0);
    // Background here means the main canvas, not a node.
    let hit = scene.element_at(point);
    let tag = hit.map(|r| scene.element(r).tag.as_str());
    assert_eq!(tag, Some("main"));

    let event = InputEvent::PointerMove {
        x: point.x,
        y: point.y,
        modifiers: Modifiers::NONE,
    };
    let details = describe(&scene, &event, "mousemove", hit, None, true);
    assert_eq!(details.target.unwrap().selector, "main.canvas-container");
}
