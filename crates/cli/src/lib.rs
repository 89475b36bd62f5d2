use std::process::ExitCode;

use clap::Parser;

pub mod cli;

pub fn run() -> ExitCode {
    let args = cli::Cli::parse();
    cli::init_tracing(args.verbose);
    match cli::execute(&args) {
        Ok(status) => status.into(),
        Err(err) => {
            eprintln!("route-params: {:#}", err);
            cli::Status::Fatal.into()
        }
    }
}
