use clap::Parser;
use fiberfinder_core::logging::{self, LogSink};

mod cli;

use crate::cli::Cli;

fn main() {
    let cli = Cli::parse();

    let sink = if cli.log_stderr {
        LogSink::Stderr
    } else {
        LogSink::StateFile
    };
    logging::init(sink, cli.verbose);

    if let Err(err) = cli.run() {
        eprintln!("fiberfinder error: {:#}", err);
        std::process::exit(1);
    }
}
