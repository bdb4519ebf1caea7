mod common;

use castplot::graph::{PanelRegistry, PlotDispatcher, SelectionCursor};
use castplot::CastplotError;
use common::{Call, RecordingEngine};

fn registry_with(count: usize, engine: &mut RecordingEngine) -> PanelRegistry {
    let mut registry = PanelRegistry::new();
    registry.reconcile_count(count, engine).expect("reconcile");
    engine.calls.clear();
    registry
}

#[test]
fn reconcile_from_empty_creates_positional_titles() {
    let mut engine = RecordingEngine::new(3);
    let mut registry = PanelRegistry::new();

    let report = registry.reconcile_count(3, &mut engine).unwrap();

    assert_eq!(registry.titles(), ["Graph 1", "Graph 2", "Graph 3"]);
    assert_eq!(report.created, ["Graph 1", "Graph 2", "Graph 3"]);
    assert!(report.removed.is_empty());
    assert!(engine.calls.is_empty());
}

#[test]
fn reconcile_is_idempotent() {
    let mut engine = RecordingEngine::new(4);
    let mut registry = registry_with(4, &mut engine);
    let ids: Vec<_> = registry.panels().iter().map(|p| p.id).collect();

    let report = registry.reconcile_count(4, &mut engine).unwrap();

    assert!(report.is_noop());
    assert!(engine.calls.is_empty());
    let after: Vec<_> = registry.panels().iter().map(|p| p.id).collect();
    assert_eq!(ids, after);
}

#[test]
fn shrinking_removes_from_the_end_backward() {
    let mut engine = RecordingEngine::new(5);
    let mut registry = registry_with(5, &mut engine);

    let report = registry.reconcile_count(2, &mut engine).unwrap();

    assert_eq!(report.removed, ["Graph 5", "Graph 4", "Graph 3"]);
    assert_eq!(engine.deletes(), ["Graph 5", "Graph 4", "Graph 3"]);
    assert_eq!(registry.titles(), ["Graph 1", "Graph 2"]);
}

#[test]
fn remove_all_then_reconcile_matches_fresh_reconcile() {
    let mut engine = RecordingEngine::new(3);
    let mut registry = registry_with(5, &mut engine);

    let removed = registry.remove_all(&mut engine);
    assert_eq!(
        removed,
        ["Graph 5", "Graph 4", "Graph 3", "Graph 2", "Graph 1"]
    );
    registry.reconcile_count(3, &mut engine).unwrap();

    let mut fresh = PanelRegistry::new();
    fresh.reconcile_count(3, &mut engine).unwrap();
    assert_eq!(registry.titles(), fresh.titles());
}

#[test]
fn remove_panel_notifies_engine_by_title() {
    let mut engine = RecordingEngine::new(3);
    let mut registry = registry_with(3, &mut engine);

    let panel = registry.remove_panel(1, &mut engine).unwrap();

    assert_eq!(panel.title, "Graph 2");
    assert_eq!(engine.calls, [Call::Delete("Graph 2".to_string())]);
    assert_eq!(registry.titles(), ["Graph 1", "Graph 3"]);
}

#[test]
fn stale_index_is_rejected() {
    let mut engine = RecordingEngine::new(2);
    let mut registry = registry_with(2, &mut engine);

    let err = registry.remove_panel(2, &mut engine).unwrap_err();

    assert!(matches!(
        err,
        CastplotError::StaleIndexRemoval { index: 2, len: 2 }
    ));
    assert!(engine.calls.is_empty());
    assert_eq!(registry.len(), 2);
}

#[test]
fn reconcile_replaces_out_of_position_panels() {
    let mut engine = RecordingEngine::new(3);
    let mut registry = registry_with(3, &mut engine);
    registry.remove_panel(0, &mut engine).unwrap();
    engine.calls.clear();

    // "Graph 2" now sits at position 0.
    let report = registry.reconcile_count(3, &mut engine).unwrap();

    assert_eq!(report.removed, ["Graph 3", "Graph 2"]);
    assert_eq!(registry.titles(), ["Graph 1", "Graph 2", "Graph 3"]);
}

#[test]
fn next_name_skips_titles_in_use() {
    let mut engine = RecordingEngine::new(3);
    let mut registry = registry_with(3, &mut engine);
    registry.remove_panel(0, &mut engine).unwrap();

    assert_eq!(registry.next_name(), "Graph 4");
}

#[test]
fn standard_request_grows_panels_and_plots_once() {
    let mut engine = RecordingEngine::loaded(3);
    let mut registry = registry_with(2, &mut engine);

    let report = PlotDispatcher::new(&mut registry, &mut engine)
        .request_standard_plots()
        .unwrap()
        .expect("enabled");

    assert_eq!(report.created, ["Graph 3"]);
    assert_eq!(engine.calls, [Call::PlotStandard]);
    assert_eq!(registry.titles(), engine.figure_titles());
}

#[test]
fn standard_request_without_cast_is_disabled() {
    let mut engine = RecordingEngine::new(3);
    let mut registry = PanelRegistry::new();

    let result = PlotDispatcher::new(&mut registry, &mut engine)
        .request_standard_plots()
        .unwrap();

    assert!(result.is_none());
    assert!(registry.is_empty());
    assert!(engine.calls.is_empty());
}

#[test]
fn create_plot_requires_both_axes() {
    let mut engine = RecordingEngine::loaded(3);
    let mut registry = PanelRegistry::new();
    let mut cursor = SelectionCursor::new();
    cursor.select_cast("cast_001");
    cursor.select_variable("Temp");

    let mut dispatcher = PlotDispatcher::new(&mut registry, &mut engine);
    assert!(matches!(
        dispatcher.create_plot_blocker(&cursor),
        Some(CastplotError::MissingAxisSelection)
    ));
    assert_eq!(dispatcher.create_plot(&cursor).unwrap(), None);
    assert!(registry.is_empty());
    assert!(engine.calls.is_empty());
}

#[test]
fn failed_plot_leaves_no_orphan_panel() {
    let mut engine = RecordingEngine::loaded(3);
    engine.fail_plot = true;
    let mut registry = PanelRegistry::new();
    let mut cursor = SelectionCursor::new();
    cursor.select_cast("cast_001");
    cursor.select_variable("Temp");
    cursor.select_variable("Depth");

    let result = PlotDispatcher::new(&mut registry, &mut engine).create_plot(&cursor);

    assert!(result.is_err());
    assert!(registry.is_empty());
    assert!(engine.figures.is_empty());
    assert_eq!(engine.deletes(), ["Graph 1"]);
}
