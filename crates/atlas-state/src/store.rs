//! The central interaction/selection store.
//!
//! One state machine over hover, selection, and the highlighted
//! connection set, plus an independent tag-filter sub-state. Two rules
//! are deliberate and load-bearing:
//!
//! - **Selection pins highlighting.** While a project is selected, hover
//!   changes never touch `active_connections`.
//! - **Closing the panel keeps stale connections while hovering.** If a
//!   project is still hovered when the panel closes, the pre-close
//!   connection set is left in place rather than recomputed. Flagged as
//!   ambiguous in DESIGN.md; kept as observed.
//!
//! All operations are synchronous and total — an id that matches nothing
//! simply highlights nothing downstream.

use atlas_core::model::{ConnectionId, Project, ProjectId};

/// Interaction state consumed read-only by the display layer.
#[derive(Debug, Default)]
pub struct PortfolioStore {
    selected: Option<Project>,
    hovered: Option<ProjectId>,
    detail_panel_open: bool,
    active_connections: Vec<ConnectionId>,
    selected_tag: Option<String>,
}

impl PortfolioStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Select a project (opening the panel) or clear with `None`
    /// (closing it). The connection highlight is replaced either way.
    pub fn select_project(&mut self, project: Option<Project>, connections: Vec<ConnectionId>) {
        log::debug!(
            "select_project: {:?}",
            project.as_ref().map(|p| p.id)
        );
        self.detail_panel_open = project.is_some();
        self.selected = project;
        self.active_connections = connections;
    }

    /// Update hover. The connection highlight follows hover only while
    /// nothing is selected — selection has priority.
    pub fn hover_project(&mut self, project: Option<ProjectId>, connections: Vec<ConnectionId>) {
        self.hovered = project;
        if self.selected.is_none() {
            self.active_connections = connections;
        }
    }

    /// Close the detail panel and clear selection. Connections reset to
    /// empty unless a project is still hovered, in which case the
    /// pre-close set is intentionally left untouched.
    pub fn close_detail_panel(&mut self) {
        self.selected = None;
        self.detail_panel_open = false;
        if self.hovered.is_none() {
            self.active_connections.clear();
        }
    }

    /// Replace the highlighted connection set directly.
    pub fn set_active_connections(&mut self, connections: Vec<ConnectionId>) {
        self.active_connections = connections;
    }

    /// Toggle the tag filter: re-selecting the active tag clears it.
    /// Independent of selection and gallery state.
    pub fn select_tag(&mut self, tag: &str) {
        if self.selected_tag.as_deref() == Some(tag) {
            self.selected_tag = None;
        } else {
            self.selected_tag = Some(tag.to_string());
        }
    }

    // ─── Read-only snapshot ──────────────────────────────────────────────

    pub fn selected_project(&self) -> Option<&Project> {
        self.selected.as_ref()
    }

    pub fn hovered_project(&self) -> Option<ProjectId> {
        self.hovered
    }

    pub fn detail_panel_open(&self) -> bool {
        self.detail_panel_open
    }

    pub fn active_connections(&self) -> &[ConnectionId] {
        &self.active_connections
    }

    pub fn selected_tag(&self) -> Option<&str> {
        self.selected_tag.as_deref()
    }
}
