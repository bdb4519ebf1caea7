//! castplot - terminal graph screen for CTD/UCTD cast data.

use anyhow::{Context, Result};
use castplot::app::App;
use castplot::config::Settings;
use castplot::engine::{CastLoader, FigureEngine, Instrument, PlotEngine};
use castplot::graph::ViewAction;
use castplot::ui;
use clap::Parser;
use crossterm::{
    event::{self, Event, KeyCode, KeyEventKind, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io;
use std::path::PathBuf;
use std::sync::Mutex;
use tracing_subscriber::{EnvFilter, FmtSubscriber};

#[derive(Parser, Debug)]
#[command(name = "castplot")]
#[command(about = "Plot oceanographic cast variables in the terminal", long_about = None)]
struct Args {
    /// Root data directory
    data_path: Option<PathBuf>,

    /// Instrument the casts were recorded with
    #[arg(long, value_enum)]
    instrument: Option<Instrument>,

    /// Survey directory name
    #[arg(long)]
    survey: Option<String>,

    /// Vessel name
    #[arg(long)]
    vessel: Option<String>,

    /// Use the deployed layout (<data>/<instrument>)
    #[arg(long)]
    deployed: bool,

    /// Read casts from this directory instead of the derived converted path
    #[arg(long)]
    converted: Option<PathBuf>,

    /// Settings file (TOML)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Enable logging to specified file
    #[arg(long)]
    log: Option<PathBuf>,

    /// Print the available casts and exit
    #[arg(long)]
    list_casts: bool,
}

impl Args {
    /// Settings file values overridden by command-line values.
    fn settings(&self) -> Result<Settings> {
        let mut settings = match &self.config {
            Some(path) => Settings::load(path)?,
            None => Settings::default(),
        };

        if let Some(data_path) = &self.data_path {
            settings.data_path = data_path.clone();
        }
        if let Some(instrument) = self.instrument {
            settings.instrument = instrument;
        }
        if self.survey.is_some() {
            settings.survey = self.survey.clone();
        }
        if self.vessel.is_some() {
            settings.vessel = self.vessel.clone();
        }
        if self.deployed {
            settings.deployed = true;
        }
        Ok(settings)
    }
}

fn main() -> Result<()> {
    let args = Args::parse();

    // Set up logging if --log option is provided
    if let Some(log_path) = &args.log {
        let file = std::fs::OpenOptions::new()
            .create(true)
            .write(true)
            .truncate(true)
            .open(log_path)
            .with_context(|| format!("Failed to open log file {}", log_path.display()))?;
        let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("debug"));
        let subscriber = FmtSubscriber::builder()
            .with_env_filter(filter)
            .with_ansi(false)
            .with_writer(Mutex::new(file))
            .finish();
        tracing::subscriber::set_global_default(subscriber)?;
        tracing::info!("Starting castplot");
    }

    let settings = args.settings()?;
    let cast_dir = args
        .converted
        .clone()
        .unwrap_or_else(|| settings.converted_path());

    if !cast_dir.is_dir() {
        eprintln!("Error: Cast directory not found: {}", cast_dir.display());
        std::process::exit(1);
    }

    tracing::info!(
        "Instrument {} ({}), casts in {}",
        settings.instrument.name(),
        settings.source_type(),
        cast_dir.display()
    );
    let engine = FigureEngine::open(CastLoader::new(&cast_dir), settings.instrument)?;

    if args.list_casts {
        for cast in engine.casts() {
            println!("{}", cast);
        }
        return Ok(());
    }

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // Run app
    let app = App::new(engine, settings);
    let res = run_app(&mut terminal, app);

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    if let Err(err) = res {
        eprintln!("Error: {}", err);
    }

    if args.log.is_some() {
        tracing::info!("castplot exited");
    }

    Ok(())
}

fn run_app<B: ratatui::backend::Backend>(terminal: &mut Terminal<B>, mut app: App) -> Result<()> {
    loop {
        terminal.draw(|f| ui::draw(f, &app))?;

        if !event::poll(std::time::Duration::from_millis(100))? {
            continue;
        }
        let Event::Key(key) = event::read()? else {
            continue;
        };
        if key.kind != KeyEventKind::Press {
            continue;
        }

        if key.modifiers.contains(KeyModifiers::SHIFT) {
            let action = match key.code {
                KeyCode::Left => Some(ViewAction::PanLeft),
                KeyCode::Right => Some(ViewAction::PanRight),
                KeyCode::Up => Some(ViewAction::PanUp),
                KeyCode::Down => Some(ViewAction::PanDown),
                _ => None,
            };
            if let Some(action) = action {
                app.screen.adjust_view(action);
                continue;
            }
        }

        match key.code {
            KeyCode::Char('q') => return Ok(()),

            // Lists
            KeyCode::Tab => app.switch_pane(),
            KeyCode::Up | KeyCode::Char('k') => app.cursor_up(),
            KeyCode::Down | KeyCode::Char('j') => app.cursor_down(),
            KeyCode::Enter => app.select(),

            // Plot commands
            KeyCode::Char('a') => app.screen.create_plot(),
            KeyCode::Char('s') => app.screen.request_standard_plots(),
            KeyCode::Char('D') => app.screen.delete_all_plots(),
            KeyCode::Char('x') => app.screen.close_active_panel(),
            KeyCode::Char(']') => app.screen.next_panel(),
            KeyCode::Char('[') => app.screen.prev_panel(),

            // Tools
            KeyCode::Char(c @ '1'..='4') => {
                if let Some(number) = c.to_digit(10) {
                    app.select_tool(number as usize);
                }
            },
            KeyCode::Char('L') => app.screen.toggle_legend(),
            KeyCode::Char('i') => app.screen.toggle_invalid_points(),
            KeyCode::Char('t') => app.screen.toggle_tooltips(),
            KeyCode::Char('u') => app.screen.toggle_up_down_cast(),

            // View
            KeyCode::Char('+') | KeyCode::Char('=') => app.screen.adjust_view(ViewAction::ZoomIn),
            KeyCode::Char('-') => app.screen.adjust_view(ViewAction::ZoomOut),
            KeyCode::Char('0') => app.screen.adjust_view(ViewAction::Reset),
            KeyCode::Char('m') => app.screen.mark_invalid(),

            // Misc
            KeyCode::Char('T') => app.cycle_theme(),
            KeyCode::Char('y') => app.copy_active_graph(),
            KeyCode::Char('r') => app.refresh_casts(),
            KeyCode::Char('?') => {
                app.screen.status = "Enter a cast, then X and Y variables; a: plot, s: standard graphs".to_string();
            },
            _ => {},
        }
    }
}
