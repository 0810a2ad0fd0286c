//! Client-side project cache over the Project Data Service.
//!
//! The service exposes five read operations; the cache drives each
//! through the three-phase fetch contract (pending → fulfilled |
//! rejected), keeping a loading flag and an error string the display
//! layer can render. Failures leave the last-known-good data in place;
//! nothing retries automatically.

use atlas_core::console::{EventLog, MessageKind};
use atlas_core::model::{Project, ProjectImage, ProjectId};
use atlas_core::time::Clock;
use thiserror::Error;

/// Failures surfaced by a Project Data Service backend.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum DataError {
    #[error("data service unavailable")]
    Unavailable,
    #[error("data service error: {0}")]
    Backend(String),
}

/// Read-only queries against the project store. Missing ids and
/// unmatched tags are empty results, never errors.
pub trait ProjectDataService {
    /// All projects, ordered by id ascending.
    fn list_all(&self) -> Result<Vec<Project>, DataError>;
    /// One project, or `Ok(None)` when the id matches nothing.
    fn get_by_id(&self, id: ProjectId) -> Result<Option<Project>, DataError>;
    /// Projects flagged major, ordered by id ascending.
    fn list_major(&self) -> Result<Vec<Project>, DataError>;
    /// Projects carrying `tag`, ordered by id ascending; empty on no match.
    fn list_by_tag(&self, tag: &str) -> Result<Vec<Project>, DataError>;
    /// Gallery images for a project, ordered by display order
    /// (ties keep insertion order).
    fn list_images(&self, id: ProjectId) -> Result<Vec<ProjectImage>, DataError>;
}

/// Cached project data plus fetch status.
#[derive(Debug, Default)]
pub struct ProjectCache {
    projects: Vec<Project>,
    selected: Option<Project>,
    loading: bool,
    error: Option<String>,
}

impl ProjectCache {
    pub fn new() -> Self {
        Self::default()
    }

    // ─── Three-phase fetch contract ──────────────────────────────────────

    /// Pending: raise the loading flag, clear any stale error.
    pub fn begin_fetch(&mut self) {
        self.loading = true;
        self.error = None;
    }

    /// Fulfilled with a project list (list-all / major / by-tag).
    pub fn resolve_projects(&mut self, projects: Vec<Project>) {
        self.loading = false;
        self.projects = projects;
    }

    /// Fulfilled with a single project lookup.
    pub fn resolve_selected(&mut self, project: Option<Project>) {
        self.loading = false;
        self.selected = project;
    }

    /// Rejected: record the reason, keep last-known-good data.
    pub fn reject(&mut self, error: &DataError) {
        log::warn!("project fetch failed: {error}");
        self.loading = false;
        self.error = Some(error.to_string());
    }

    // ─── Convenience drivers (cooperative model: run to completion) ──────

    pub fn fetch_all(&mut self, service: &dyn ProjectDataService) {
        self.begin_fetch();
        match service.list_all() {
            Ok(projects) => self.resolve_projects(projects),
            Err(e) => self.reject(&e),
        }
    }

    pub fn fetch_major(&mut self, service: &dyn ProjectDataService) {
        self.begin_fetch();
        match service.list_major() {
            Ok(projects) => self.resolve_projects(projects),
            Err(e) => self.reject(&e),
        }
    }

    pub fn fetch_by_tag(&mut self, service: &dyn ProjectDataService, tag: &str) {
        self.begin_fetch();
        match service.list_by_tag(tag) {
            Ok(projects) => self.resolve_projects(projects),
            Err(e) => self.reject(&e),
        }
    }

    pub fn fetch_project(&mut self, service: &dyn ProjectDataService, id: ProjectId) {
        self.begin_fetch();
        match service.get_by_id(id) {
            Ok(project) => self.resolve_selected(project),
            Err(e) => self.reject(&e),
        }
    }

    pub fn clear_error(&mut self) {
        self.error = None;
    }

    // ─── Timed drivers ───────────────────────────────────────────────────
    //
    // Same drivers, plus a `[FETCH] <action> <ms>ms` system line into the
    // event log. Success and failure are both timed.

    pub fn fetch_all_timed(
        &mut self,
        service: &dyn ProjectDataService,
        log: &mut EventLog,
        clock: &dyn Clock,
    ) {
        let start = clock.now_ms();
        self.fetch_all(service);
        log_fetch_duration(log, clock, "projects/fetchProjects", start);
    }

    pub fn fetch_major_timed(
        &mut self,
        service: &dyn ProjectDataService,
        log: &mut EventLog,
        clock: &dyn Clock,
    ) {
        let start = clock.now_ms();
        self.fetch_major(service);
        log_fetch_duration(log, clock, "projects/fetchMajorProjects", start);
    }

    pub fn fetch_by_tag_timed(
        &mut self,
        service: &dyn ProjectDataService,
        tag: &str,
        log: &mut EventLog,
        clock: &dyn Clock,
    ) {
        let start = clock.now_ms();
        self.fetch_by_tag(service, tag);
        log_fetch_duration(log, clock, "projects/fetchProjectsByTag", start);
    }

    pub fn fetch_project_timed(
        &mut self,
        service: &dyn ProjectDataService,
        id: ProjectId,
        log: &mut EventLog,
        clock: &dyn Clock,
    ) {
        let start = clock.now_ms();
        self.fetch_project(service, id);
        log_fetch_duration(log, clock, "projects/fetchProjectById", start);
    }

    // ─── Read-only snapshot ──────────────────────────────────────────────

    pub fn projects(&self) -> &[Project] {
        &self.projects
    }

    pub fn project(&self, id: ProjectId) -> Option<&Project> {
        self.projects.iter().find(|p| p.id == id)
    }

    pub fn selected(&self) -> Option<&Project> {
        self.selected.as_ref()
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }
}

fn log_fetch_duration(log: &mut EventLog, clock: &dyn Clock, action: &str, start_ms: u64) {
    let now = clock.now_ms();
    log.push(
        format!("[FETCH] {action} {}ms", now.saturating_sub(start_ms)),
        MessageKind::System,
        None,
        now,
    );
}

// ─── In-memory service ───────────────────────────────────────────────────

/// Project Data Service over an in-memory table. The canonical backend
/// for demos and the test fixture for everything above it.
#[derive(Debug, Default)]
pub struct StaticProjectService {
    projects: Vec<Project>,
    images: Vec<(ProjectId, ProjectImage)>,
}

impl StaticProjectService {
    pub fn new(mut projects: Vec<Project>) -> Self {
        projects.sort_by_key(|p| p.id);
        Self {
            projects,
            images: Vec::new(),
        }
    }

    /// Load from a JSON project list in the transport shape.
    pub fn from_json(json: &str) -> Result<Self, DataError> {
        let projects: Vec<Project> =
            serde_json::from_str(json).map_err(|e| DataError::Backend(e.to_string()))?;
        Ok(Self::new(projects))
    }

    pub fn with_images(mut self, project: ProjectId, mut images: Vec<ProjectImage>) -> Self {
        // Stable sort: display-order ties keep insertion order.
        images.sort_by_key(|img| img.display_order);
        self.images.extend(images.into_iter().map(|img| (project, img)));
        self
    }
}

impl ProjectDataService for StaticProjectService {
    fn list_all(&self) -> Result<Vec<Project>, DataError> {
        Ok(self.projects.clone())
    }

    fn get_by_id(&self, id: ProjectId) -> Result<Option<Project>, DataError> {
        Ok(self.projects.iter().find(|p| p.id == id).cloned())
    }

    fn list_major(&self) -> Result<Vec<Project>, DataError> {
        Ok(self.projects.iter().filter(|p| p.is_major).cloned().collect())
    }

    fn list_by_tag(&self, tag: &str) -> Result<Vec<Project>, DataError> {
        Ok(self
            .projects
            .iter()
            .filter(|p| p.has_tag(tag))
            .cloned()
            .collect())
    }

    fn list_images(&self, id: ProjectId) -> Result<Vec<ProjectImage>, DataError> {
        Ok(self
            .images
            .iter()
            .filter(|(pid, _)| *pid == id)
            .map(|(_, img)| img.clone())
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use atlas_core::model::PercentPos;
    use atlas_core::time::ManualClock;
    use pretty_assertions::assert_eq;

    fn project(id: i64, major: bool, tags: &[&str]) -> Project {
        Project {
            id: ProjectId(id),
            title: format!("p{id}"),
            meta: String::new(),
            description: String::new(),
            links: Vec::new(),
            related: Vec::new(),
            tags: tags.iter().map(|s| s.to_string()).collect(),
            is_major: major,
            position: PercentPos::default(),
        }
    }

    #[test]
    fn static_service_orders_by_id() {
        let svc = StaticProjectService::new(vec![
            project(3, false, &[]),
            project(1, true, &[]),
            project(2, false, &[]),
        ]);
        let ids: Vec<i64> = svc.list_all().unwrap().iter().map(|p| p.id.0).collect();
        assert_eq!(ids, vec![1, 2, 3]);
        assert_eq!(svc.list_major().unwrap().len(), 1);
    }

    #[test]
    fn missing_ids_and_tags_are_empty_results() {
        let svc = StaticProjectService::new(vec![project(1, false, &["Theory"])]);
        assert_eq!(svc.get_by_id(ProjectId(42)).unwrap(), None);
        assert!(svc.list_by_tag("No Such Tag").unwrap().is_empty());
        assert!(svc.list_images(ProjectId(42)).unwrap().is_empty());
    }

    #[test]
    fn images_order_by_display_order_then_insertion() {
        let img = |id: i64, order: i32| ProjectImage {
            id,
            url: format!("/g/{id}.png"),
            filename: format!("{id}.png"),
            alt_text: None,
            display_order: order,
        };
        let svc = StaticProjectService::new(vec![project(1, false, &[])])
            .with_images(ProjectId(1), vec![img(10, 2), img(11, 1), img(12, 2)]);

        let ids: Vec<i64> = svc
            .list_images(ProjectId(1))
            .unwrap()
            .iter()
            .map(|i| i.id)
            .collect();
        assert_eq!(ids, vec![11, 10, 12]);
    }

    /// Delegating service that burns clock time on every call.
    struct SlowService<'a> {
        inner: StaticProjectService,
        clock: &'a ManualClock,
        cost_ms: u64,
    }

    impl ProjectDataService for SlowService<'_> {
        fn list_all(&self) -> Result<Vec<Project>, DataError> {
            self.clock.advance(self.cost_ms);
            self.inner.list_all()
        }
        fn get_by_id(&self, id: ProjectId) -> Result<Option<Project>, DataError> {
            self.clock.advance(self.cost_ms);
            self.inner.get_by_id(id)
        }
        fn list_major(&self) -> Result<Vec<Project>, DataError> {
            self.clock.advance(self.cost_ms);
            self.inner.list_major()
        }
        fn list_by_tag(&self, tag: &str) -> Result<Vec<Project>, DataError> {
            self.clock.advance(self.cost_ms);
            self.inner.list_by_tag(tag)
        }
        fn list_images(&self, id: ProjectId) -> Result<Vec<ProjectImage>, DataError> {
            self.clock.advance(self.cost_ms);
            self.inner.list_images(id)
        }
    }

    #[test]
    fn timed_fetch_logs_duration_line() {
        let clock = ManualClock::new(0, 12);
        let svc = SlowService {
            inner: StaticProjectService::new(vec![project(1, false, &[])]),
            clock: &clock,
            cost_ms: 25,
        };
        let mut cache = ProjectCache::new();
        let mut log = EventLog::new();

        cache.fetch_all_timed(&svc, &mut log, &clock);
        assert_eq!(cache.projects().len(), 1);

        let entry = log.entries().next().unwrap();
        assert_eq!(entry.kind, MessageKind::System);
        assert_eq!(entry.content, "[FETCH] projects/fetchProjects 25ms");

        // A miss is still a timed fetch.
        cache.fetch_project_timed(&svc, ProjectId(42), &mut log, &clock);
        assert_eq!(cache.selected(), None);
        let last = log.entries().last().unwrap();
        assert_eq!(last.content, "[FETCH] projects/fetchProjectById 25ms");
    }

    #[test]
    fn loads_from_transport_json() {
        let json = r#"[
            {
                "id": 2,
                "title": "Lexicon",
                "meta": "Essay • 2024",
                "description": "",
                "links": [],
                "tags": ["Theory"],
                "isMajor": false,
                "position": { "x": 70.0, "y": 55.0 }
            },
            {
                "id": 1,
                "title": "Atlas",
                "meta": "Map • 2023",
                "description": "",
                "links": [],
                "tags": [],
                "isMajor": true,
                "position": { "x": 30.0, "y": 40.0 }
            }
        ]"#;
        let svc = StaticProjectService::from_json(json).unwrap();
        let titles: Vec<String> = svc.list_all().unwrap().iter().map(|p| p.title.clone()).collect();
        assert_eq!(titles, vec!["Atlas", "Lexicon"]);

        let err = StaticProjectService::from_json("not json").unwrap_err();
        assert!(matches!(err, DataError::Backend(_)));
    }

    #[test]
    fn reject_keeps_last_known_good() {
        let mut cache = ProjectCache::new();
        cache.resolve_projects(vec![project(1, false, &[])]);

        cache.begin_fetch();
        assert!(cache.is_loading());
        cache.reject(&DataError::Backend("connection refused".into()));

        assert!(!cache.is_loading());
        assert_eq!(cache.projects().len(), 1);
        assert_eq!(
            cache.error(),
            Some("data service error: connection refused")
        );

        // The next pending phase clears the error.
        cache.begin_fetch();
        assert_eq!(cache.error(), None);
    }
}
