//! Simulated session: load projects, hover and select a node, describe a
//! click, and print the resulting console log.
//!
//! Run with `RUST_LOG=debug` to see the store's transition logging.

use atlas_core::console::{EventLog, MessageKind};
use atlas_core::describe::describe;
use atlas_core::input::{InputEvent, Modifiers};
use atlas_core::layout::{Viewport, resolve_layout};
use atlas_core::model::{ConnectionSet, PercentPos, Project, ProjectId};
use atlas_core::Rect;
use atlas_core::scene::{SceneDom, SceneElement, SceneQuery};
use atlas_core::time::{Clock, SystemClock, TimeOfDay};
use atlas_state::{PortfolioStore, ProjectCache, StaticProjectService};
use rand::SeedableRng;
use rand::rngs::SmallRng;

fn project(id: i64, title: &str, related: &[&str], x: f64, y: f64, major: bool) -> Project {
    Project {
        id: ProjectId(id),
        title: title.to_string(),
        meta: "Demo • 2026".to_string(),
        description: format!("{title} demo project"),
        links: Vec::new(),
        related: related.iter().map(|s| s.to_string()).collect(),
        tags: vec!["Demo".to_string()],
        is_major: major,
        position: PercentPos { x, y },
    }
}

fn main() {
    env_logger::init();
    let clock = SystemClock;
    let now = clock.now_ms();

    // Load projects through the cache.
    let service = StaticProjectService::new(vec![
        project(1, "Atlas", &["Lexicon"], 30.0, 40.0, true),
        project(2, "Lexicon", &["Archive"], 70.0, 55.0, false),
        project(3, "Archive", &[], 50.0, 80.0, false),
    ]);
    let mut cache = ProjectCache::new();
    cache.fetch_all(&service);
    println!("loaded {} projects", cache.projects().len());

    let connections = ConnectionSet::build(cache.projects());
    let viewport = Viewport::default();
    let bounds = resolve_layout(cache.projects(), viewport);

    // Assemble the scene the display layer would render.
    let mut scene = SceneDom::new(viewport, "atlas-demo/1.0");
    let root = scene.root();
    let canvas = scene.add_element(
        root,
        SceneElement::new("main")
            .with_class("canvas-container")
            .with_bounds(Rect::new(0.0, 0.0, viewport.width, viewport.height)),
    );
    for p in cache.projects() {
        scene.add_element(
            canvas,
            SceneElement::new("div")
                .with_class("project-node")
                .with_attr("data-project-id", &p.id.0.to_string())
                .with_bounds(bounds[&p.id]),
        );
    }

    // Hover then select the first project.
    let mut store = PortfolioStore::new();
    let atlas = cache.projects()[0].clone();
    store.hover_project(Some(atlas.id), connections.touching(atlas.id));
    store.select_project(Some(atlas.clone()), connections.touching(atlas.id));
    println!(
        "selected {:?}, {} connection(s) highlighted",
        atlas.title,
        store.active_connections().len()
    );

    // Describe the click and log it to the console.
    let mut log = EventLog::new();
    log.push(
        format!("background: {}", TimeOfDay::from_hour(clock.local_hour()).as_token()),
        MessageKind::System,
        None,
        now,
    );

    let click_point = bounds[&atlas.id].center();
    let event = InputEvent::PointerDown {
        x: click_point.x,
        y: click_point.y,
        modifiers: Modifiers::NONE,
    };
    if let Some(target) = scene.element_at(click_point) {
        let details = describe(&scene, &event, "click", Some(target), None, true);
        log.push(
            format!("click {}", details.target.as_ref().map_or("?", |t| t.selector.as_str())),
            MessageKind::Interaction,
            Some(details.clone()),
            now,
        );
    }

    let mut rng = SmallRng::seed_from_u64(now);
    log.push_personal_fragment(now, &mut rng);

    for entry in log.entries() {
        println!("[{:?}] {}", entry.kind, entry.content);
    }
}
