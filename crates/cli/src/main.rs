use clap::Parser;
use stac_populator_cli::StacPopulator;
use std::process::ExitCode;

fn main() -> ExitCode {
    let args = StacPopulator::parse();
    match args.run(true) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("ERROR: {err:#}");
            ExitCode::FAILURE
        }
    }
}
