//! Canvas layout: percentage positions → absolute node bounds.
//!
//! Each project node is centered on its `position` (percent of viewport)
//! with a fixed footprint; major projects get a larger one. Connection
//! endpoints are node centers.

use crate::model::{ConnectionId, ConnectionSet, Project, ProjectId};
use kurbo::{Point, Rect};
use std::collections::HashMap;

/// The canvas (viewport) dimensions.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    pub width: f64,
    pub height: f64,
}

impl Default for Viewport {
    fn default() -> Self {
        Self {
            width: 1280.0,
            height: 800.0,
        }
    }
}

/// Footprint of a regular node, in canvas pixels.
const NODE_SIZE: (f64, f64) = (140.0, 48.0);
/// Footprint of a major node.
const MAJOR_NODE_SIZE: (f64, f64) = (180.0, 64.0);

/// Resolve absolute bounds for every project node.
pub fn resolve_layout(projects: &[Project], viewport: Viewport) -> HashMap<ProjectId, Rect> {
    let mut bounds = HashMap::with_capacity(projects.len());
    for project in projects {
        let cx = project.position.x / 100.0 * viewport.width;
        let cy = project.position.y / 100.0 * viewport.height;
        let (w, h) = if project.is_major {
            MAJOR_NODE_SIZE
        } else {
            NODE_SIZE
        };
        bounds.insert(
            project.id,
            Rect::new(cx - w / 2.0, cy - h / 2.0, cx + w / 2.0, cy + h / 2.0),
        );
    }
    bounds
}

/// Endpoint pairs for drawing connection lines between resolved nodes.
/// Connections whose endpoints are not in `bounds` are skipped.
pub fn connection_endpoints(
    set: &ConnectionSet,
    bounds: &HashMap<ProjectId, Rect>,
) -> Vec<(ConnectionId, Point, Point)> {
    set.all()
        .iter()
        .filter_map(|c| {
            let from = bounds.get(&c.from)?.center();
            let to = bounds.get(&c.to)?.center();
            Some((c.id, from, to))
        })
        .collect()
}
