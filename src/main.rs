use std::process::ExitCode;

use clap::error::ErrorKind;
use clap::{CommandFactory, Parser};
use tracing::Level;
use tracing_subscriber::FmtSubscriber;

use smr::cli_main::Cli;
use smr::pipeline::count_matrix::run_count_matrix;
use smr::{SmrConfig, SmrError};

fn main() -> ExitCode {
    // clap would exit with status 2 on its own; usage errors here exit with 1
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) => {
            let _ = e.print();
            return match e.kind() {
                ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => ExitCode::SUCCESS,
                _ => ExitCode::FAILURE,
            };
        }
    };

    // Logs go to stderr; stdout may be carrying the matrix
    let subscriber = FmtSubscriber::builder()
        .with_max_level(if cli.verbose { Level::DEBUG } else { Level::INFO })
        .with_writer(std::io::stderr)
        .finish();
    if let Err(e) = tracing::subscriber::set_global_default(subscriber) {
        eprintln!("warning: unable to install log subscriber: {}", e);
    }

    match SmrConfig::from_cli(&cli).and_then(|config| run_count_matrix(&config)) {
        Ok(_) => ExitCode::SUCCESS,
        Err(e) => {
            report(&e);
            ExitCode::FAILURE
        }
    }
}

fn report(e: &SmrError) {
    eprintln!("error: {}", e);
    if e.is_config() {
        let mut stderr = std::io::stderr();
        let _ = Cli::command().write_help(&mut stderr);
    }
}
