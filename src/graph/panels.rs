//! Panel registry - the ordered set of open graph panels.
//!
//! Every panel has a twin figure inside the plotting engine keyed by the panel
//! title. Removals always drop the panel here first and then tell the engine to
//! delete the figure by title, so the two sets stay in lockstep.

use crate::engine::PlotEngine;
use crate::error::{CastplotError, Result};

/// Stable identifier assigned to a panel at creation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PanelId(u64);

impl PanelId {
    /// Raw identifier value.
    pub fn get(self) -> u64 {
        self.0
    }
}

/// A named plot container.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlotPanel {
    /// Stable identity, never reused.
    pub id: PanelId,
    /// Panel name, unique among open panels.
    pub name: String,
    /// Display title; also the key the plotting engine knows the figure by.
    pub title: String,
}

/// Build a panel. Its identity comes from `seq`.
pub fn make_panel(seq: u64, name: impl Into<String>, title: impl Into<String>) -> PlotPanel {
    PlotPanel {
        id: PanelId(seq),
        name: name.into(),
        title: title.into(),
    }
}

/// Title of the standard panel at zero-based `index`.
pub fn positional_title(index: usize) -> String {
    format!("Graph {}", index + 1)
}

/// What a reconcile pass changed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReconcileReport {
    /// Titles created, in creation order.
    pub created: Vec<String>,
    /// Titles removed, in removal order.
    pub removed: Vec<String>,
}

impl ReconcileReport {
    /// True if nothing changed.
    pub fn is_noop(&self) -> bool {
        self.created.is_empty() && self.removed.is_empty()
    }
}

/// Ordered collection of open panels.
#[derive(Debug, Default)]
pub struct PanelRegistry {
    panels: Vec<PlotPanel>,
    next_seq: u64,
}

impl PanelRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of open panels.
    pub fn len(&self) -> usize {
        self.panels.len()
    }

    /// True if no panels are open.
    pub fn is_empty(&self) -> bool {
        self.panels.is_empty()
    }

    /// Open panels in display order.
    pub fn panels(&self) -> &[PlotPanel] {
        &self.panels
    }

    /// Panel at `index`.
    pub fn get(&self, index: usize) -> Option<&PlotPanel> {
        self.panels.get(index)
    }

    /// Panel with the given stable id.
    pub fn find(&self, id: PanelId) -> Option<&PlotPanel> {
        self.panels.iter().find(|p| p.id == id)
    }

    /// Position of the panel with the given stable id.
    pub fn position(&self, id: PanelId) -> Option<usize> {
        self.panels.iter().position(|p| p.id == id)
    }

    /// Titles in display order.
    pub fn titles(&self) -> Vec<String> {
        self.panels.iter().map(|p| p.title.clone()).collect()
    }

    /// True if a panel with this name or title is open.
    pub fn contains(&self, name: &str) -> bool {
        self.panels.iter().any(|p| p.name == name || p.title == name)
    }

    /// Name for the next ad hoc panel: `"Graph <len+1>"`, or the first free
    /// `"Graph <n>"` above it if that one is taken.
    pub fn next_name(&self) -> String {
        let mut index = self.panels.len();
        loop {
            let name = positional_title(index);
            if !self.contains(&name) {
                return name;
            }
            index += 1;
        }
    }

    /// Append a new panel.
    pub fn create_panel(&mut self, name: &str, title: &str) -> Result<PanelId> {
        if self.contains(name) || self.contains(title) {
            return Err(CastplotError::duplicate_panel(name));
        }

        let panel = make_panel(self.next_seq, name, title);
        self.next_seq += 1;
        let id = panel.id;
        tracing::debug!("Created panel {} ({:?})", panel.title, id);
        self.panels.push(panel);
        Ok(id)
    }

    /// Remove the panel at `index`, then delete its figure by title.
    pub fn remove_panel<E: PlotEngine + ?Sized>(
        &mut self,
        index: usize,
        engine: &mut E,
    ) -> Result<PlotPanel> {
        if index >= self.panels.len() {
            return Err(CastplotError::StaleIndexRemoval {
                index,
                len: self.panels.len(),
            });
        }

        let panel = self.panels.remove(index);
        engine.delete_plot(&panel.title);
        tracing::debug!("Removed panel {} ({:?})", panel.title, panel.id);
        Ok(panel)
    }

    /// Bring the panel set to exactly `"Graph 1"` .. `"Graph <target>"`.
    ///
    /// Panels are removed from the end backward, down to `target` or down to the
    /// first panel whose title is not its positional title, whichever is lower.
    /// Missing positional panels are then appended.
    pub fn reconcile_count<E: PlotEngine + ?Sized>(
        &mut self,
        target: usize,
        engine: &mut E,
    ) -> Result<ReconcileReport> {
        let mut report = ReconcileReport::default();

        let keep = self
            .panels
            .iter()
            .enumerate()
            .take_while(|(i, p)| p.title == positional_title(*i))
            .count()
            .min(target);

        while self.panels.len() > keep {
            let panel = self.remove_panel(self.panels.len() - 1, engine)?;
            report.removed.push(panel.title);
        }

        for index in self.panels.len()..target {
            let title = positional_title(index);
            self.create_panel(&title, &title)?;
            report.created.push(title);
        }

        if !report.is_noop() {
            tracing::info!(
                "Reconciled panels to {}: +{} -{}",
                target,
                report.created.len(),
                report.removed.len()
            );
        }
        Ok(report)
    }

    /// Remove every panel, last to first, deleting each figure by title.
    pub fn remove_all<E: PlotEngine + ?Sized>(&mut self, engine: &mut E) -> Vec<String> {
        let mut removed = Vec::with_capacity(self.panels.len());
        while let Some(panel) = self.panels.pop() {
            engine.delete_plot(&panel.title);
            removed.push(panel.title);
        }
        removed
    }
}
