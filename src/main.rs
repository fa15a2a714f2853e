use std::process::ExitCode;

use apiref::cli::{Arguments, ExitStatus};
use clap::Parser;
use tracing_subscriber::{EnvFilter, Layer, fmt, layer::SubscriberExt, util::SubscriberInitExt};

fn main() -> ExitCode {
    let args = Arguments::parse();
    init_logging(args.verbose());

    match apiref::cli::run_cli(args) {
        Ok(code) => code,
        Err(err) => {
            eprintln!("Error: {:#}", err);
            ExitStatus::from_error(&err).into()
        }
    }
}

fn init_logging(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("apiref=debug")
    } else {
        EnvFilter::new("apiref=warn")
    };

    let stderr_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_ansi(false)
        .with_target(false)
        .with_filter(filter);

    tracing_subscriber::registry().with(stderr_layer).init();
}
