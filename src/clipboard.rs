//! Clipboard integration.

use crate::engine::figures::{DisplayState, Figure};
use crate::error::Result;
use arboard::Clipboard;

/// Copy text to clipboard.
pub fn copy_to_clipboard(text: &str) -> Result<()> {
    let mut clipboard = Clipboard::new()?;
    clipboard.set_text(text)?;
    Ok(())
}

/// Drawn points of a figure as TSV: one block per layer, `x<TAB>y` rows.
pub fn figure_to_tsv(figure: &Figure, display: &DisplayState) -> String {
    let mut out = String::new();
    out.push_str(&format!(
        "# {}\n",
        figure.title.as_deref().unwrap_or(&figure.name)
    ));

    for layer in figure.layers(display) {
        out.push_str(&format!("# {}\n", layer.label));
        for (x, y) in layer.points {
            out.push_str(&format!("{}\t{}\n", x, y));
        }
    }
    out
}
