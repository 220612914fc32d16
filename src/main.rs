use clap::{CommandFactory, Parser};
use tracing::error;
use tracing_subscriber::EnvFilter;

use std::{
    io::{self, IsTerminal},
    path::PathBuf,
    process::ExitCode,
};

use compute_sales::{run, Options};

/// Prices sales records against a product catalogue and reports the total
/// owed per product and overall.
///
/// The report is printed and also written to SalesResults.txt in the
/// current directory.
#[derive(Debug, Parser)]
#[command(disable_help_flag = true, disable_version_flag = true)]
struct Args {
    /// JSON catalogue: an array of objects with "title" and "price"
    #[arg(allow_hyphen_values = true)]
    catalogue: PathBuf,
    /// JSON sales: an array of objects with "Product" and "Quantity"
    #[arg(allow_hyphen_values = true)]
    sales: PathBuf,
}

fn main() -> ExitCode {
    init_logger();
    // exactly two paths; anything else, "--" included, is a usage error
    if std::env::args_os().len() != 3 {
        eprintln!("{}", Args::command().render_usage());
        return ExitCode::FAILURE;
    }
    let args = match Args::try_parse() {
        Ok(args) => args,
        Err(e) => {
            let _ = e.print();
            return ExitCode::FAILURE;
        }
    };
    match run(&Options::new(args.catalogue, args.sales), &mut io::stdout()) {
        Ok(_) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{e:#}");
            ExitCode::FAILURE
        }
    }
}

/// Logs to stderr, filtered by `RUST_LOG` if set, otherwise showing warnings
/// from this crate.
fn init_logger() {
    let filter = match std::env::var("RUST_LOG") {
        Ok(_) => EnvFilter::from_default_env(),
        Err(_) => EnvFilter::new(concat!(env!("CARGO_CRATE_NAME"), "=warn")),
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_ansi(io::stderr().is_terminal())
        .without_time()
        .with_target(false)
        .init();
}
