//! Cursor-trail engine: turns pointer movement into fading polyline paths.
//!
//! The engine is a per-path state machine (Growing → Fading → removed)
//! driven by two explicit inputs: `pointer_move(now, point, scene)` and
//! `tick(now)`. It never consults a wall clock itself, so tests drive it
//! deterministically.

use atlas_core::scene::SceneQuery;
use atlas_core::selector::{self, Selector};
use kurbo::Point;
use std::collections::VecDeque;

use crate::surface::{DrawSurface, PathId, StrokeStyle, path_data};

/// Tuning knobs for the trail engine.
#[derive(Debug, Clone, PartialEq)]
pub struct TrailConfig {
    /// Delay after a path starts before its fade begins.
    pub fade_delay_ms: u64,
    pub fade_duration_ms: u64,
    pub stroke_opacity: f64,
    pub stroke_width: f64,
    /// Oldest paths are evicted beyond this count.
    pub max_paths: usize,
    /// Minimum distance between recorded points.
    pub min_move_distance: f64,
    /// A gap longer than this between moves ends the current path.
    pub liveness_timeout_ms: u64,
    /// Selectors over which the trail never draws.
    pub avoid_selectors: Vec<String>,
}

impl Default for TrailConfig {
    fn default() -> Self {
        Self {
            fade_delay_ms: 0,
            fade_duration_ms: 60_000,
            stroke_opacity: 0.6,
            stroke_width: 2.0,
            max_paths: 20,
            min_move_distance: 4.0,
            liveness_timeout_ms: 500,
            avoid_selectors: [
                "header",
                "nav",
                "button",
                "a",
                ".project-node",
                ".detail-panel",
                ".console",
                "[role=\"button\"]",
                "[role=\"link\"]",
            ]
            .iter()
            .map(|s| s.to_string())
            .collect(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum PathPhase {
    Growing,
    Fading,
}

#[derive(Debug)]
struct TrailPath {
    id: PathId,
    points: Vec<Point>,
    phase: PathPhase,
    /// When the fade transition becomes due.
    fade_at: u64,
    /// Set once fading; when disposal becomes due.
    remove_at: Option<u64>,
}

/// Owns the live paths and drives a `DrawSurface`.
pub struct TrailEngine<S: DrawSurface> {
    config: TrailConfig,
    avoid: Vec<Selector>,
    surface: S,
    paths: VecDeque<TrailPath>,
    current: Option<PathId>,
    last_point: Option<Point>,
    last_move_ms: u64,
    enabled: bool,
    next_path_id: u64,
}

impl<S: DrawSurface> TrailEngine<S> {
    pub fn new(config: TrailConfig, surface: S) -> Self {
        let avoid = selector::parse_list(&config.avoid_selectors);
        Self {
            config,
            avoid,
            surface,
            paths: VecDeque::new(),
            current: None,
            last_point: None,
            last_move_ms: 0,
            enabled: true,
            next_path_id: 0,
        }
    }

    /// Build an engine for a device; trails start disabled on touch devices.
    pub fn for_device(config: TrailConfig, surface: S, touch_capable: bool) -> Self {
        let mut engine = Self::new(config, surface);
        if touch_capable {
            engine.enabled = false;
        }
        engine
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    pub fn path_count(&self) -> usize {
        self.paths.len()
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    /// Feed one pointer movement at viewport `point`.
    pub fn pointer_move(&mut self, now_ms: u64, point: Point, scene: &dyn SceneQuery) {
        if !self.enabled {
            return;
        }

        // No drawing over avoided regions; a move onto one also ends the
        // path being drawn.
        if self.over_avoided(point, scene) {
            self.end_current_path();
            return;
        }

        // A long gap means the old path is stale: abandon it and restart
        // at the current point.
        if self.current.is_some()
            && now_ms.saturating_sub(self.last_move_ms) > self.config.liveness_timeout_ms
        {
            log::trace!(
                "trail path went stale after {}ms gap",
                now_ms.saturating_sub(self.last_move_ms)
            );
            self.end_current_path();
        }
        self.last_move_ms = now_ms;

        match self.current {
            None => self.start_path(now_ms, point),
            Some(id) => {
                let far_enough = self
                    .last_point
                    .is_none_or(|last| last.distance(point) >= self.config.min_move_distance);
                if far_enough {
                    self.append_point(id, point);
                }
            }
        }
    }

    /// Process due fade transitions and disposals.
    pub fn tick(&mut self, now_ms: u64) {
        let surface = &mut self.surface;
        for path in &mut self.paths {
            if path.phase == PathPhase::Growing && now_ms >= path.fade_at {
                surface.begin_fade(path.id, self.config.fade_duration_ms);
                path.phase = PathPhase::Fading;
                path.remove_at = Some(now_ms + self.config.fade_duration_ms);
            }
        }
        // Fades all share one duration, so disposal order is creation order.
        while self
            .paths
            .front()
            .is_some_and(|p| p.remove_at.is_some_and(|at| now_ms >= at))
        {
            if let Some(done) = self.paths.pop_front() {
                self.surface.dispose(done.id);
                if self.current == Some(done.id) {
                    self.current = None;
                    self.last_point = None;
                }
            }
        }
    }

    /// Stop growing the current path (pointer up, pointer leaving the
    /// canvas). The path keeps its own fade schedule.
    pub fn end_current_path(&mut self) {
        self.current = None;
        self.last_point = None;
    }

    /// Disabling abandons the current path only; paths already on screen
    /// finish fading on their own.
    pub fn set_enabled(&mut self, enabled: bool) {
        if !enabled {
            self.end_current_path();
        }
        self.enabled = enabled;
    }

    /// Dispose every path immediately, bypassing fades. Pending fade and
    /// removal schedules go with the paths, so nothing later acts on a
    /// disposed drawable.
    pub fn clear_all(&mut self) {
        for path in self.paths.drain(..) {
            self.surface.dispose(path.id);
        }
        self.current = None;
        self.last_point = None;
    }

    pub fn shutdown(&mut self) {
        self.clear_all();
        self.enabled = false;
    }

    fn over_avoided(&self, point: Point, scene: &dyn SceneQuery) -> bool {
        let Some(hit) = scene.element_at(point) else {
            return false;
        };
        self.avoid
            .iter()
            .any(|sel| selector::closest(scene, hit, sel).is_some())
    }

    fn start_path(&mut self, now_ms: u64, point: Point) {
        if self.paths.len() >= self.config.max_paths
            && let Some(evicted) = self.paths.pop_front()
        {
            // Eviction disposes the drawable and drops its fade schedule.
            self.surface.dispose(evicted.id);
        }

        let id = PathId(self.next_path_id);
        self.next_path_id += 1;
        let style = StrokeStyle {
            opacity: self.config.stroke_opacity,
            width: self.config.stroke_width,
        };
        self.surface.create(id, &style);
        self.surface.set_path_data(id, &path_data(&[point]));
        self.paths.push_back(TrailPath {
            id,
            points: vec![point],
            phase: PathPhase::Growing,
            fade_at: now_ms + self.config.fade_delay_ms,
            remove_at: None,
        });
        self.current = Some(id);
        self.last_point = Some(point);
    }

    fn append_point(&mut self, id: PathId, point: Point) {
        if let Some(path) = self.paths.iter_mut().find(|p| p.id == id) {
            path.points.push(point);
            self.surface.set_path_data(id, &path_data(&path.points));
            self.last_point = Some(point);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::surface::RecordingSurface;
    use atlas_core::layout::Viewport;
    use atlas_core::scene::SceneDom;
    use pretty_assertions::assert_eq;

    fn empty_scene() -> SceneDom {
        SceneDom::new(Viewport::default(), "test-agent")
    }

    #[test]
    fn first_move_starts_a_path() {
        let scene = empty_scene();
        let mut engine = TrailEngine::new(TrailConfig::default(), RecordingSurface::new());
        engine.pointer_move(0, Point::new(400.0, 300.0), &scene);
        assert_eq!(engine.path_count(), 1);
        assert_eq!(engine.surface().last_path_data(PathId(0)), Some("M 400 300"));
    }

    #[test]
    fn disabled_engine_ignores_moves() {
        let scene = empty_scene();
        let mut engine =
            TrailEngine::for_device(TrailConfig::default(), RecordingSurface::new(), true);
        engine.pointer_move(0, Point::new(400.0, 300.0), &scene);
        assert_eq!(engine.path_count(), 0);
    }
}
