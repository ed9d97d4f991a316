//! Binary entry point for the `blockfile` command-line tool.
//!
//! Parses arguments with clap, initialises `env_logger` from the `-v`/`-q`
//! ladder (overridable through `RUST_LOG`), and runs one compress or
//! decompress operation. Exit code 0 on success, 1 on any error.

use clap::Parser;

use blockfile::cli::{args::Args, run};

fn main() {
    let args = Args::parse();

    env_logger::Builder::new()
        .filter_level(args.log_level())
        .parse_default_env()
        .format_timestamp(None)
        .init();

    if let Err(e) = run(&args) {
        if args.log_level() > log::LevelFilter::Off {
            eprintln!("blockfile: {e:#}");
        }
        std::process::exit(1);
    }
}
