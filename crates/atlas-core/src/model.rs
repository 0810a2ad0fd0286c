//! Core data model for the portfolio canvas.
//!
//! Projects are the nodes of the spatial map. Their on-canvas placement is
//! a percentage position (0–100 of the viewport) resolved by the layout
//! pass; `related` titles give rise to the visual connection graph.
//! Records are immutable once loaded — the cache replaces, never patches.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Stable project identity, assigned by the data store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProjectId(pub i64);

impl std::fmt::Display for ProjectId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Percentage position on the canvas (0–100 on each axis).
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct PercentPos {
    pub x: f64,
    pub y: f64,
}

/// An outbound link shown in the detail panel.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectLink {
    pub title: String,
    pub url: String,
}

/// One creative-work record.
///
/// Serializes to the service transport shape:
/// `{id, title, meta, description, links, tags, isMajor, position}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Project {
    pub id: ProjectId,
    pub title: String,
    /// Category / date label, e.g. "Writing / Installation • 2021".
    pub meta: String,
    pub description: String,
    #[serde(default)]
    pub links: Vec<ProjectLink>,
    /// Titles of related projects — source of the connection graph.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub related: Vec<String>,
    #[serde(default)]
    pub tags: Vec<String>,
    /// Larger visual treatment; does not affect behavior.
    #[serde(default)]
    pub is_major: bool,
    pub position: PercentPos,
}

impl Project {
    pub fn has_tag(&self, tag: &str) -> bool {
        self.tags.iter().any(|t| t == tag)
    }
}

/// A gallery image reference for a project.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectImage {
    pub id: i64,
    pub url: String,
    pub filename: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub alt_text: Option<String>,
    pub display_order: i32,
}

// ─── Connections ─────────────────────────────────────────────────────────

/// Identity of a visual link between two nodes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ConnectionId(pub u32);

/// A visual link between two project nodes, highlighted when either
/// endpoint is hovered or selected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Connection {
    pub id: ConnectionId,
    pub from: ProjectId,
    pub to: ProjectId,
}

/// The derived connection graph for a loaded project set.
#[derive(Debug, Clone, Default)]
pub struct ConnectionSet {
    connections: Vec<Connection>,
}

impl ConnectionSet {
    /// Build connections by resolving each project's `related` titles.
    /// Titles that match no loaded project are skipped; duplicate pairs
    /// (a→b and b→a) collapse to one connection.
    pub fn build(projects: &[Project]) -> Self {
        let by_title: HashMap<&str, ProjectId> = projects
            .iter()
            .map(|p| (p.title.as_str(), p.id))
            .collect();

        let mut seen: Vec<(ProjectId, ProjectId)> = Vec::new();
        let mut connections = Vec::new();
        for project in projects {
            for title in &project.related {
                let Some(&other) = by_title.get(title.as_str()) else {
                    continue;
                };
                if other == project.id {
                    continue;
                }
                let pair = if project.id < other {
                    (project.id, other)
                } else {
                    (other, project.id)
                };
                if seen.contains(&pair) {
                    continue;
                }
                seen.push(pair);
                connections.push(Connection {
                    id: ConnectionId(connections.len() as u32),
                    from: pair.0,
                    to: pair.1,
                });
            }
        }
        log::debug!("built {} connections from {} projects", connections.len(), projects.len());
        Self { connections }
    }

    pub fn all(&self) -> &[Connection] {
        &self.connections
    }

    /// Connection ids touching the given project — the highlight set the
    /// store receives on hover/select.
    pub fn touching(&self, id: ProjectId) -> Vec<ConnectionId> {
        self.connections
            .iter()
            .filter(|c| c.from == id || c.to == id)
            .map(|c| c.id)
            .collect()
    }
}
