// SPDX-License-Identifier: AGPL-3.0-or-later WITH Palimpsest

use std::path::Path;

use formfill_core::Template;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Install the stderr log subscriber. `RUST_LOG` applies unless `verbose`
/// forces `debug`; the fallback level is `warn`.
pub fn init_logging(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .init();
}

/// Read a whole file, printing a one-line error on failure.
pub fn read_file(path: &Path) -> Result<Vec<u8>, i32> {
    if !path.exists() {
        eprintln!("Error: file not found: {}", path.display());
        return Err(1);
    }

    std::fs::read(path).map_err(|e| {
        eprintln!("Error: failed to read {}: {e}", path.display());
        1
    })
}

/// Load a form template from disk.
pub fn open_template(path: &Path) -> Result<Template, i32> {
    let bytes = read_file(path)?;
    Template::load(&bytes).map_err(|e| {
        eprintln!("Error: {}: {e}", path.display());
        1
    })
}
