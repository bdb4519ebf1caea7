//! Graph screen rendering.

use super::chart::draw_figure;
use super::formatters::truncate;
use super::ThemeColors;
use crate::app::{App, Pane};
use crate::engine::PlotEngine;
use crate::graph::{Field, ToolMode};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, ListState, Paragraph, Tabs},
    Frame,
};

/// Draw the graph screen.
pub(super) fn draw_graph_screen(f: &mut Frame<'_>, app: &App) {
    let colors = ThemeColors::from_theme(&app.theme);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),
            Constraint::Min(1),
            Constraint::Length(1),
            Constraint::Length(1),
        ])
        .split(f.area());

    draw_toolbar(f, app, chunks[0], &colors);

    let content = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Length(app.layout.sidebar_width), Constraint::Min(1)])
        .split(chunks[1]);

    draw_sidebar(f, app, content[0], &colors);
    draw_panels(f, app, content[1], &colors);

    let status = Paragraph::new(app.screen.status.as_str())
        .style(Style::default().fg(colors.status_fg).bg(colors.status_bg));
    f.render_widget(status, chunks[2]);

    draw_keymap(f, chunks[3], &colors);
}

fn draw_toolbar(f: &mut Frame<'_>, app: &App, area: Rect, colors: &ThemeColors) {
    let tools = app.screen.tools();
    let mut spans = Vec::new();

    for (i, mode) in ToolMode::ALL.iter().enumerate() {
        let style = if tools.is_checked(*mode) {
            Style::default()
                .fg(colors.cursor_fg)
                .bg(colors.cursor_bg)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(colors.text)
        };
        spans.push(Span::styled(format!(" {}:{} ", i + 1, mode.name()), style));
    }

    let toggle = |key: &str, label: &str, on: bool| {
        let style = if on {
            Style::default().fg(colors.value)
        } else {
            Style::default().fg(colors.disabled)
        };
        Span::styled(format!(" {}:{}", key, label), style)
    };
    spans.push(Span::raw(" |"));
    spans.push(toggle("L", "legend", tools.legend_visible()));
    spans.push(toggle("i", "invalid", tools.invalid_points_visible()));
    spans.push(toggle("t", "tips", tools.tooltips_visible()));
    spans.push(Span::styled(
        format!(" u:{}", tools.up_down_cast().as_str()),
        Style::default().fg(colors.label),
    ));

    let action = |key: &str, label: &str, enabled: bool| {
        let style = if enabled {
            Style::default().fg(colors.heading)
        } else {
            Style::default().fg(colors.disabled)
        };
        Span::styled(format!(" {}:{}", key, label), style)
    };
    spans.push(Span::raw(" |"));
    spans.push(action("a", "plot", app.screen.can_create_plot()));
    spans.push(action(
        "s",
        "standard",
        app.screen.can_request_standard_plots(),
    ));

    let bar = Paragraph::new(Line::from(spans)).style(Style::default().bg(colors.status_bg));
    f.render_widget(bar, area);
}

fn draw_sidebar(f: &mut Frame<'_>, app: &App, area: Rect, colors: &ThemeColors) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(5),
            Constraint::Percentage(app.layout.cast_list_percent),
            Constraint::Min(3),
        ])
        .split(area);

    draw_fields(f, app, chunks[0], colors);

    let engine = app.screen.engine();
    let cursor = app.screen.cursor();
    let casts_title = format!(" Casts ({}) ", engine.instrument().name());
    draw_list(
        f,
        chunks[1],
        &casts_title,
        engine.casts(),
        cursor.cast(),
        app.cast_row,
        app.pane == Pane::Casts,
        colors,
    );
    draw_list(
        f,
        chunks[2],
        " Variables ",
        engine.variables(),
        None,
        app.variable_row,
        app.pane == Pane::Variables,
        colors,
    );
}

/// Cast/X/Y fields, with the one the next click fills highlighted.
fn draw_fields(f: &mut Frame<'_>, app: &App, area: Rect, colors: &ThemeColors) {
    let cursor = app.screen.cursor();
    let focus = cursor.focus();
    let width = area.width.saturating_sub(6) as usize;

    let lines: Vec<Line<'_>> = [
        (Field::Cast, cursor.cast()),
        (Field::X, cursor.x()),
        (Field::Y, cursor.y()),
    ]
    .into_iter()
    .map(|(field, value)| {
        let value_style = if field == focus {
            Style::default().fg(colors.cursor_fg).bg(colors.cursor_bg)
        } else {
            Style::default().fg(colors.value)
        };
        Line::from(vec![
            Span::styled(format!("{:>4}: ", field.name()), Style::default().fg(colors.label)),
            Span::styled(truncate(value.unwrap_or("-"), width), value_style),
        ])
    })
    .collect();

    let title = match &app.settings.vessel {
        Some(vessel) => format!(" Selection - {} ", vessel),
        None => " Selection ".to_string(),
    };
    let para = Paragraph::new(lines).block(
        Block::default()
            .title(title)
            .borders(Borders::ALL)
            .border_style(Style::default().fg(colors.border))
            .style(Style::default().bg(colors.bg)),
    );
    f.render_widget(para, area);
}

#[allow(clippy::too_many_arguments)]
fn draw_list(
    f: &mut Frame<'_>,
    area: Rect,
    title: &str,
    rows: &[String],
    chosen: Option<&str>,
    row: usize,
    focused: bool,
    colors: &ThemeColors,
) {
    let width = area.width.saturating_sub(2) as usize;
    let items: Vec<ListItem<'_>> = rows
        .iter()
        .map(|name| {
            let style = if Some(name.as_str()) == chosen {
                Style::default()
                    .fg(colors.value)
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(colors.text)
            };
            ListItem::new(Line::from(truncate(name, width))).style(style)
        })
        .collect();

    let border = if focused { colors.heading } else { colors.border };
    let list = List::new(items)
        .block(
            Block::default()
                .title(title)
                .borders(Borders::ALL)
                .border_style(Style::default().fg(border))
                .style(Style::default().bg(colors.bg)),
        )
        .highlight_style(
            Style::default()
                .fg(colors.cursor_fg)
                .bg(colors.cursor_bg)
                .add_modifier(Modifier::BOLD),
        );

    let mut state = ListState::default();
    if focused && !rows.is_empty() {
        state.select(Some(row));
    }
    f.render_stateful_widget(list, area, &mut state);
}

fn draw_panels(f: &mut Frame<'_>, app: &App, area: Rect, colors: &ThemeColors) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(1), Constraint::Min(1)])
        .split(area);

    let registry = app.screen.registry();
    let tabs = Tabs::new(registry.titles())
        .style(Style::default().fg(colors.text).bg(colors.bg))
        .highlight_style(
            Style::default()
                .fg(colors.cursor_fg)
                .bg(colors.cursor_bg),
        )
        .select(app.screen.active_index());
    f.render_widget(tabs, chunks[0]);

    let engine = app.screen.engine();
    let figure = app
        .screen
        .active_panel()
        .and_then(|panel| engine.figure(&panel.title));
    draw_figure(
        f,
        chunks[1],
        figure,
        engine.display(),
        app.layout.axis_padding_factor,
        colors,
    );
}

fn draw_keymap(f: &mut Frame<'_>, area: Rect, colors: &ThemeColors) {
    let keymap_text = "q:quit | Tab:pane | jk:nav | Enter:select | a:plot | s:standard | \
                       D:delete all | x:close | []:graph | 1-4:tool | +-:zoom | S-arrows:pan | 0:reset | \
                       m:mark invalid | y:copy | r:refresh | T:theme";
    let paragraph =
        Paragraph::new(keymap_text).style(Style::default().fg(colors.text).bg(colors.bg));
    f.render_widget(paragraph, area);
}
