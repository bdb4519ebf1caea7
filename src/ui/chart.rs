//! Figure rendering.

use super::formatters::{format_axis_label, format_value, truncate};
use super::ThemeColors;
use crate::engine::figures::{DisplayState, Figure, Layer, LayerKind};
use ratatui::{
    layout::{Alignment, Rect},
    style::{Color, Style},
    symbols::Marker,
    widgets::{Axis, Block, Borders, Chart, Dataset, GraphType, LegendPosition, Paragraph},
    Frame,
};

/// Draw the figure backing the active panel.
pub(super) fn draw_figure(
    f: &mut Frame<'_>,
    area: Rect,
    figure: Option<&Figure>,
    display: &DisplayState,
    padding: f64,
    colors: &ThemeColors,
) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(colors.border))
        .style(Style::default().bg(colors.bg));

    let Some(figure) = figure else {
        let para = Paragraph::new("No graph open. a: create plot | s: standard graphs")
            .style(Style::default().fg(colors.text))
            .alignment(Alignment::Center)
            .block(block);
        f.render_widget(para, area);
        return;
    };

    let title = figure.title.as_deref().unwrap_or(&figure.name);
    let block = block
        .title(format!(" {} ", truncate(title, area.width.saturating_sub(4) as usize)))
        .title_style(Style::default().fg(colors.heading));

    let Some((x_bounds, y_bounds)) = figure.bounds(display) else {
        let para = Paragraph::new("No valid data to display")
            .style(Style::default().fg(colors.text))
            .alignment(Alignment::Center)
            .block(block);
        f.render_widget(para, area);
        return;
    };

    let inverted = figure.y_inverted();
    let layers = figure.layers(display);

    // Chart y grows upward, so depth-like axes are drawn negated.
    let series: Vec<Vec<(f64, f64)>> = layers
        .iter()
        .map(|layer| {
            let points = downsample(layer.points, area.width);
            if inverted {
                points.into_iter().map(|(x, y)| (x, -y)).collect()
            } else {
                points
            }
        })
        .collect();

    let datasets: Vec<Dataset<'_>> = layers
        .iter()
        .zip(series.iter())
        .map(|(layer, points)| {
            let graph_type = match layer.kind {
                LayerKind::Invalid => GraphType::Scatter,
                _ => GraphType::Line,
            };
            Dataset::default()
                .name(layer.label.clone())
                .marker(Marker::Braille)
                .graph_type(graph_type)
                .style(Style::default().fg(layer_color(layer, colors)))
                .data(points)
        })
        .collect();

    // A zoomed view is drawn as is; data bounds get a margin.
    let ([x_min, x_max], [y_min, y_max]) = match figure.view {
        Some(view) => view,
        None => (pad(x_bounds, padding), pad(y_bounds, padding)),
    };

    let x_axis = Axis::default()
        .title(figure.x_label.clone().unwrap_or_default())
        .style(Style::default().fg(colors.text))
        .bounds([x_min, x_max])
        .labels(vec![
            format_axis_label(x_min),
            format_axis_label((x_min + x_max) / 2.0),
            format_axis_label(x_max),
        ]);

    let (y_axis_bounds, y_labels) = if inverted {
        (
            [-y_max, -y_min],
            vec![
                format_axis_label(y_max),
                format_axis_label((y_min + y_max) / 2.0),
                format_axis_label(y_min),
            ],
        )
    } else {
        (
            [y_min, y_max],
            vec![
                format_axis_label(y_min),
                format_axis_label((y_min + y_max) / 2.0),
                format_axis_label(y_max),
            ],
        )
    };

    let y_axis = Axis::default()
        .title(figure.y_label.clone().unwrap_or_default())
        .style(Style::default().fg(colors.text))
        .bounds(y_axis_bounds)
        .labels(y_labels);

    let block = if display.show_tooltips {
        block.title_bottom(readout(&layers))
    } else {
        block
    };

    let legend = figure.legend_visible.then_some(LegendPosition::TopRight);
    let chart = Chart::new(datasets)
        .block(block)
        .x_axis(x_axis)
        .y_axis(y_axis)
        .legend_position(legend);

    f.render_widget(chart, area);
}

fn layer_color(layer: &Layer<'_>, colors: &ThemeColors) -> Color {
    match layer.kind {
        LayerKind::Invalid => colors.invalid,
        LayerKind::Upcast => colors.upcast,
        LayerKind::Downcast if layer.secondary => colors.secondary,
        LayerKind::Downcast => colors.downcast,
    }
}

/// Widen `[min, max]` by `factor` of its span on each side.
fn pad([min, max]: [f64; 2], factor: f64) -> [f64; 2] {
    let span = max - min;
    let margin = if span > 0.0 { span * factor } else { 1.0 };
    [min - margin, max + margin]
}

/// Thin a point set to roughly one point per column.
fn downsample(points: &[(f64, f64)], width: u16) -> Vec<(f64, f64)> {
    let bins = (width as usize).saturating_sub(8).max(1) * 2;
    if width <= 4 || points.len() <= bins {
        return points.to_vec();
    }

    let step = (points.len() as f64) / (bins as f64);
    let mut simple = Vec::with_capacity(bins + 1);
    let mut pos = 0.0;
    while (pos as usize) < points.len() {
        simple.push(points[pos as usize]);
        pos += step;
    }
    // Keep the deepest/last sample so the line reaches the end of the cast.
    if let Some(last) = points.last() {
        if simple.last() != Some(last) {
            simple.push(*last);
        }
    }
    simple
}

/// Range readout of each drawn layer.
fn readout(layers: &[Layer<'_>]) -> String {
    let parts: Vec<String> = layers
        .iter()
        .filter_map(|layer| {
            let (x0, x1, y0, y1) = layer.points.iter().fold(
                (
                    f64::INFINITY,
                    f64::NEG_INFINITY,
                    f64::INFINITY,
                    f64::NEG_INFINITY,
                ),
                |(x0, x1, y0, y1), &(x, y)| (x0.min(x), x1.max(x), y0.min(y), y1.max(y)),
            );
            (!layer.points.is_empty()).then(|| {
                format!(
                    "{}: {} pts x {}..{} y {}..{}",
                    layer.label,
                    layer.points.len(),
                    format_value(x0),
                    format_value(x1),
                    format_value(y0),
                    format_value(y1)
                )
            })
        })
        .collect();
    format!(" {} ", parts.join(" | "))
}
