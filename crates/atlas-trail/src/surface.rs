//! The drawable surface the trail engine paints on.
//!
//! The engine owns path lifecycle; the surface owns pixels. A host
//! implementation maps these calls onto whatever it draws with (an SVG
//! overlay, a canvas layer). `RecordingSurface` captures the call stream
//! for tests.

use kurbo::Point;

/// Identity of one drawable path on the surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PathId(pub u64);

/// Stroke parameters for a trail path.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StrokeStyle {
    pub opacity: f64,
    pub width: f64,
}

/// Drawing operations the engine issues, in order, per path:
/// `create` → `set_path_data`* → `begin_fade`? → `dispose`.
pub trait DrawSurface {
    fn create(&mut self, id: PathId, style: &StrokeStyle);
    fn set_path_data(&mut self, id: PathId, d: &str);
    /// Animate opacity to zero over `duration_ms`.
    fn begin_fade(&mut self, id: PathId, duration_ms: u64);
    /// Remove the drawable. No further calls reference `id`.
    fn dispose(&mut self, id: PathId);
}

/// Build the polyline path string: `M x y` then ` L x y` per point.
pub fn path_data(points: &[Point]) -> String {
    let mut d = String::new();
    for (i, p) in points.iter().enumerate() {
        if i == 0 {
            d.push_str(&format!("M {} {}", p.x, p.y));
        } else {
            d.push_str(&format!(" L {} {}", p.x, p.y));
        }
    }
    d
}

// ─── Test surface ────────────────────────────────────────────────────────

/// A call-recording surface for tests and headless runs.
#[derive(Debug, Default)]
pub struct RecordingSurface {
    pub ops: Vec<SurfaceOp>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum SurfaceOp {
    Create(PathId),
    SetPathData(PathId, String),
    BeginFade(PathId, u64),
    Dispose(PathId),
}

impl RecordingSurface {
    pub fn new() -> Self {
        Self::default()
    }

    /// Ids created but not yet disposed.
    pub fn live_paths(&self) -> Vec<PathId> {
        let mut live = Vec::new();
        for op in &self.ops {
            match op {
                SurfaceOp::Create(id) => live.push(*id),
                SurfaceOp::Dispose(id) => live.retain(|l| l != id),
                _ => {}
            }
        }
        live
    }

    pub fn last_path_data(&self, id: PathId) -> Option<&str> {
        self.ops.iter().rev().find_map(|op| match op {
            SurfaceOp::SetPathData(pid, d) if *pid == id => Some(d.as_str()),
            _ => None,
        })
    }
}

impl DrawSurface for RecordingSurface {
    fn create(&mut self, id: PathId, _style: &StrokeStyle) {
        self.ops.push(SurfaceOp::Create(id));
    }

    fn set_path_data(&mut self, id: PathId, d: &str) {
        self.ops.push(SurfaceOp::SetPathData(id, d.to_string()));
    }

    fn begin_fade(&mut self, id: PathId, duration_ms: u64) {
        self.ops.push(SurfaceOp::BeginFade(id, duration_ms));
    }

    fn dispose(&mut self, id: PathId) {
        self.ops.push(SurfaceOp::Dispose(id));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn path_data_builds_polyline() {
        assert_eq!(path_data(&[]), "");
        assert_eq!(path_data(&[Point::new(4.0, 5.0)]), "M 4 5");
        assert_eq!(
            path_data(&[Point::new(0.0, 0.0), Point::new(10.0, 0.0), Point::new(10.0, 8.5)]),
            "M 0 0 L 10 0 L 10 8.5"
        );
    }

    #[test]
    fn recording_surface_tracks_live_paths() {
        let mut surface = RecordingSurface::new();
        let style = StrokeStyle {
            opacity: 0.6,
            width: 2.0,
        };
        surface.create(PathId(1), &style);
        surface.create(PathId(2), &style);
        surface.dispose(PathId(1));
        assert_eq!(surface.live_paths(), vec![PathId(2)]);
    }
}
