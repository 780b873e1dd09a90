use clap::Parser;

mod cli;
mod error;
mod format;
mod generate;
mod io;
mod logging;

pub use cli::{Cli, OutputFormat, PathOrStdin};

fn main() {
    let cli = Cli::parse();
    logging::init(cli.quiet, cli.verbose);

    if let Err(e) = generate::run(&cli) {
        eprintln!("{}", e.message());
        std::process::exit(e.exit_code());
    }
}
