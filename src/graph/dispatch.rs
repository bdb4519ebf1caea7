//! Plot command dispatcher.
//!
//! Turns a completed (cast, X, Y) selection or a standard graphs request into
//! panel allocations plus plot commands. When an operation returns, the
//! registry's panel titles and the engine's figure titles are the same set.

use super::panels::{PanelId, PanelRegistry, ReconcileReport};
use super::selection::SelectionCursor;
use crate::engine::PlotEngine;
use crate::error::{CastplotError, Result};

/// Why a new plot cannot be created right now, if it cannot.
pub fn create_plot_blocker<E: PlotEngine + ?Sized>(
    engine: &E,
    cursor: &SelectionCursor,
) -> Option<CastplotError> {
    if !engine.is_data_loaded() {
        return Some(CastplotError::NoActiveCast);
    }
    if cursor.axes().is_none() {
        return Some(CastplotError::MissingAxisSelection);
    }
    None
}

/// Whether the standard plots action is enabled.
pub fn can_request_standard_plots<E: PlotEngine + ?Sized>(engine: &E) -> bool {
    engine.is_data_loaded()
}

/// Borrows the registry and the engine for the span of one user action.
#[derive(Debug)]
pub struct PlotDispatcher<'a, E: PlotEngine + ?Sized> {
    registry: &'a mut PanelRegistry,
    engine: &'a mut E,
}

impl<'a, E: PlotEngine + ?Sized> PlotDispatcher<'a, E> {
    /// Create a dispatcher over `registry` and `engine`.
    pub fn new(registry: &'a mut PanelRegistry, engine: &'a mut E) -> Self {
        Self { registry, engine }
    }

    /// Why a new plot cannot be created right now, if it cannot.
    pub fn create_plot_blocker(&self, cursor: &SelectionCursor) -> Option<CastplotError> {
        create_plot_blocker(&*self.engine, cursor)
    }

    /// Whether the create-plot action is enabled.
    pub fn can_create_plot(&self, cursor: &SelectionCursor) -> bool {
        self.create_plot_blocker(cursor).is_none()
    }

    /// Whether the standard plots action is enabled.
    pub fn can_request_standard_plots(&self) -> bool {
        can_request_standard_plots(&*self.engine)
    }

    /// Open one new panel and plot the selected Y against X in it.
    ///
    /// Returns `Ok(None)` without touching anything when the action is disabled.
    pub fn create_plot(&mut self, cursor: &SelectionCursor) -> Result<Option<PanelId>> {
        if !self.can_create_plot(cursor) {
            return Ok(None);
        }
        let Some((x, y)) = cursor.axes() else {
            return Ok(None);
        };

        let name = self.registry.next_name();
        let id = self.registry.create_panel(&name, &name)?;

        if let Err(err) = self.engine.plot(&name, x, y) {
            tracing::error!("Plotting {} v. {} in {} failed: {}", x, y, name, err);
            if let Some(index) = self.registry.position(id) {
                self.registry.remove_panel(index, &mut *self.engine)?;
            }
            return Err(err);
        }

        tracing::info!("Plotted {} v. {} in {}", x, y, name);
        Ok(Some(id))
    }

    /// Match the panel set to the standard graph count, then re-plot it in bulk.
    ///
    /// Returns `Ok(None)` when no cast data is loaded.
    pub fn request_standard_plots(&mut self) -> Result<Option<ReconcileReport>> {
        if !self.can_request_standard_plots() {
            return Ok(None);
        }

        let target = self.engine.standard_graph_count();
        let report = self.registry.reconcile_count(target, &mut *self.engine)?;
        self.engine.plot_standard_set()?;
        Ok(Some(report))
    }

    /// Close every panel.
    pub fn delete_all_plots(&mut self) -> Vec<String> {
        let removed = self.registry.remove_all(&mut *self.engine);
        tracing::info!("Deleted {} plots", removed.len());
        removed
    }
}
