//! castplot - graph screen for oceanographic cast processing.
//!
//! castplot lets an operator pick a cast, choose X and Y variables and open
//! graph panels for them in the terminal.
//!
//! # Features
//!
//! - Cast/X/Y selection cursor that alternates between the axes
//! - Dynamic graph panels kept in sync with the plotting engine
//! - Standard graph sets for CTD and UCTD casts
//! - Key pan/zoom and invalid-point editing driven by the tool mode
//! - Legend, invalid point and up/down cast toggles
//! - Gruvbox color themes
//! - Clipboard export of the active graph
//!
//! # Example
//!
//! ```ignore
//! use castplot::engine::{CastLoader, FigureEngine, Instrument};
//! use castplot::graph::GraphScreen;
//!
//! let engine = FigureEngine::open(CastLoader::new("casts"), Instrument::Ctd)?;
//! let mut screen = GraphScreen::new(engine);
//! screen.click_cast(0);
//! screen.request_standard_plots();
//! println!("{} panels open", screen.registry().len());
//! ```

#![warn(
    missing_docs,
    missing_debug_implementations,
    rust_2018_idioms,
    unreachable_pub
)]
#![deny(unsafe_code)]

pub mod app;
pub mod clipboard;
pub mod config;
pub mod engine;
pub mod error;
pub mod graph;
pub mod ui;

pub use error::{CastplotError, Result};
