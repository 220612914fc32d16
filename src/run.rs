use anyhow::{Context, Result};
use tracing::debug;

use std::{
    fs::File,
    io::Write,
    path::PathBuf,
    time::{Duration, Instant},
};

use crate::{
    catalogue::Catalogue,
    dataset,
    report::{Aggregation, Rendered},
};

/// The file the report is written to when no other path is given.
pub const RESULTS_FILE: &str = "SalesResults.txt";

/// Where to read the inputs from and write the report to.
#[derive(Clone, Debug)]
pub struct Options {
    pub catalogue: PathBuf,
    pub sales: PathBuf,
    pub output: PathBuf,
}

impl Options {
    /// Options that write the report to [`RESULTS_FILE`] in the current
    /// directory.
    #[must_use]
    pub fn new(catalogue: impl Into<PathBuf>, sales: impl Into<PathBuf>) -> Self {
        Self {
            catalogue: catalogue.into(),
            sales: sales.into(),
            output: PathBuf::from(RESULTS_FILE),
        }
    }
}

/// What a successful run produced.
#[derive(Debug)]
pub struct Summary {
    pub rendered: Rendered,
    pub elapsed: Duration,
}

/// Prices the sales in `opts.sales` against `opts.catalogue`, prints the
/// report to `out`, and writes it to `opts.output`.
///
/// The results file ends with the elapsed time, measured from just before
/// the catalogue is loaded. Nothing is printed or written unless both input
/// files load successfully.
///
/// # Errors
///
/// Returns any [`dataset::LoadError`] from reading the inputs, or any error
/// writing the report.
pub fn run(opts: &Options, out: &mut impl Write) -> Result<Summary> {
    let start = Instant::now();
    let catalogue = Catalogue::from_file(&opts.catalogue)?;
    let sales = dataset::read_sales(&opts.sales)?;
    let rendered = Aggregation::from_sales(&catalogue, &sales).render();
    writeln!(out, "{}", rendered.console_text())?;

    let mut file = File::create(&opts.output)
        .with_context(|| format!("creating {}", opts.output.display()))?;
    file.write_all(rendered.file_text().as_bytes())
        .with_context(|| format!("writing {}", opts.output.display()))?;
    let elapsed = start.elapsed();
    let timing = format!("Time elapsed:{} seconds", elapsed.as_secs_f64());
    writeln!(out, "{timing}")?;
    writeln!(file, "{timing}")
        .with_context(|| format!("writing {}", opts.output.display()))?;
    debug!("wrote report to {}", opts.output.display());
    Ok(Summary { rendered, elapsed })
}
