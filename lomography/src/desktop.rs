use clap::Parser;
use std::process::ExitCode;

fn main() -> ExitCode {
    let cli = match lomography::Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) => {
            _ = e.print();
            return ExitCode::FAILURE;
        }
    };

    lomography::init_logger();

    match lomography::desktop_main(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            let program = std::env::args().next().unwrap_or_else(|| "lomography".to_string());
            eprintln!("Error: {program}: {e:#}");
            ExitCode::FAILURE
        }
    }
}
