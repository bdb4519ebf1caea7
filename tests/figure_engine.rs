mod common;

use castplot::engine::{CastLoader, FigureEngine, Instrument, PlotEngine};
use castplot::graph::{GraphScreen, PanelRegistry, PlotDispatcher, SelectionCursor};

fn screen(instrument: Instrument) -> (tempfile::TempDir, GraphScreen<FigureEngine>) {
    let dir = tempfile::tempdir().unwrap();
    common::write_casts(dir.path(), &["cast_001", "cast_002"]);
    let engine = FigureEngine::open(CastLoader::new(dir.path()), instrument).unwrap();
    (dir, GraphScreen::new(engine))
}

#[test]
fn standard_graphs_match_panels() {
    let (_dir, mut screen) = screen(Instrument::Ctd);
    screen.click_cast(0);
    screen.request_standard_plots();

    let count = Instrument::Ctd.standard_graphs().len();
    assert_eq!(screen.registry().len(), count);
    assert_eq!(screen.registry().titles().len(), count);

    let mut titles = screen.registry().titles();
    titles.sort();
    assert_eq!(titles, screen.engine().figure_titles());
}

#[test]
fn standard_request_shrinks_extra_panels_from_the_end() {
    let dir = tempfile::tempdir().unwrap();
    common::write_casts(dir.path(), &["cast_001"]);
    let mut engine = FigureEngine::open(CastLoader::new(dir.path()), Instrument::Uctd).unwrap();
    engine.load_cast("cast_001").unwrap();
    let mut registry = PanelRegistry::new();
    let mut cursor = SelectionCursor::new();
    cursor.select_cast("cast_001");
    cursor.select_variable("Temperature (degC)");
    cursor.select_variable("Depth (m)");

    let mut dispatcher = PlotDispatcher::new(&mut registry, &mut engine);
    let first = dispatcher.request_standard_plots().unwrap().unwrap();
    assert_eq!(first.created.len(), 6);
    for _ in 0..3 {
        dispatcher.create_plot(&cursor).unwrap();
    }

    let report = dispatcher.request_standard_plots().unwrap().unwrap();
    assert_eq!(report.removed, ["Graph 9", "Graph 8", "Graph 7"]);
    assert!(report.created.is_empty());

    let mut titles = registry.titles();
    titles.sort();
    assert_eq!(titles.len(), Instrument::Uctd.standard_graphs().len());
    assert_eq!(titles, engine.figure_titles());
}

#[test]
fn standard_request_retitles_an_ad_hoc_graph() {
    let (_dir, mut screen) = screen(Instrument::Ctd);
    screen.click_cast(0);
    let variables = screen.engine().variables().to_vec();
    let position = |name: &str| variables.iter().position(|v| v == name).unwrap();

    screen.click_variable(position("Oxygen (ml_per_l)"));
    screen.click_variable(position("Temperature (degC)"));
    screen.create_plot();
    let figure = screen.engine().figure("Graph 1").unwrap();
    assert_eq!(figure.x_label.as_deref(), Some("Oxygen (ml_per_l)"));

    screen.request_standard_plots();
    let figure = screen.engine().figure("Graph 1").unwrap();
    assert_eq!(figure.title.as_deref(), Some("Temperature (degC) v. Depth (m)"));
    assert_eq!(figure.x_label.as_deref(), Some("Temperature (degC)"));
    assert_eq!(figure.y_label.as_deref(), Some("Depth (m)"));
    assert!(figure.series.iter().all(|s| s.x_var != "Oxygen (ml_per_l)"));
}

#[test]
fn flag_columns_drive_the_split() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(
        dir.path().join("cast_001.csv"),
        "Depth (m),Temperature (degC),Temperature (degC) invalid,is_downcast\n\
         1.0,12.5,False,True\n\
         4.0,12.0,True,True\n\
         10.0,10.5,False,True\n\
         8.0,11.0,False,False\n\
         12.0,9.0,False,False\n",
    )
    .unwrap();
    let engine = FigureEngine::open(CastLoader::new(dir.path()), Instrument::Ctd).unwrap();
    let mut screen = GraphScreen::new(engine);
    screen.click_cast(0);

    assert!(!screen
        .engine()
        .variables()
        .iter()
        .any(|v| v.ends_with(" invalid") || v == "is_downcast"));

    screen.request_standard_plots();
    let figure = screen.engine().figure("Graph 2").unwrap();
    let series = &figure.series[0];
    // The flag column replaces the surface soak mask, and the direction
    // column overrides the deepest sample.
    assert_eq!(series.down, vec![(12.5, 1.0), (10.5, 10.0)]);
    assert_eq!(series.invalid_down, vec![(12.0, 4.0)]);
    assert_eq!(series.up, vec![(11.0, 8.0), (9.0, 12.0)]);
}

#[test]
fn ad_hoc_plot_uses_selected_axes() {
    let (_dir, mut screen) = screen(Instrument::Ctd);
    screen.click_cast(0);
    let variables = screen.engine().variables().to_vec();
    let temp = variables
        .iter()
        .position(|v| v == "Temperature (degC)")
        .unwrap();
    let depth = variables.iter().position(|v| v == "Depth (m)").unwrap();

    screen.click_variable(temp);
    screen.click_variable(depth);
    screen.create_plot();

    let panel = screen.active_panel().unwrap();
    let figure = screen.engine().figure(&panel.title).unwrap();
    assert_eq!(figure.title.as_deref(), Some("Temperature (degC) v. Depth (m)"));
    assert!(figure.y_inverted());
    // Down to the deepest sample, surface soak flagged invalid.
    let series = &figure.series[0];
    assert_eq!(series.down.len(), 3);
    assert_eq!(series.invalid_down.len(), 1);
    assert_eq!(series.up.len(), 2);
}

#[test]
fn empty_directory_has_nothing_to_plot() {
    let dir = tempfile::tempdir().unwrap();
    let engine = FigureEngine::open(CastLoader::new(dir.path()), Instrument::Ctd).unwrap();
    let mut screen = GraphScreen::new(engine);

    assert!(screen.engine().casts().is_empty());
    assert!(!screen.can_request_standard_plots());
    screen.request_standard_plots();
    assert!(screen.registry().is_empty());
}
