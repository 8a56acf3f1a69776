use clap::error::ErrorKind;
use clap::{CommandFactory, Parser};
use resize_images::constants::{EXIT_CONFIGURATION_ERROR, EXIT_USAGE, USAGE};
use resize_images::{batch_resize_images, error, logger, Args, Result};
use std::process::ExitCode;

fn main() -> ExitCode {
    if std::env::args_os().len() <= 1 {
        println!("{}", USAGE);
        return ExitCode::from(EXIT_USAGE);
    }

    let args = match Args::try_parse() {
        Ok(args) => args,
        Err(e) if matches!(e.kind(), ErrorKind::DisplayHelp | ErrorKind::DisplayVersion) => {
            let _ = e.print();
            return ExitCode::SUCCESS;
        }
        Err(e) => {
            eprint!("\n{}", e);
            print_help();
            return ExitCode::from(EXIT_CONFIGURATION_ERROR);
        }
    };

    logger::set_verbosity(args.verbosity());

    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{}", e);
            if e.is_configuration_error() {
                print_help();
            }
            ExitCode::from(EXIT_CONFIGURATION_ERROR)
        }
    }
}

fn run(args: &Args) -> Result<()> {
    let request = args.to_request()?;
    batch_resize_images(request, args.jobs)?;
    Ok(())
}

fn print_help() {
    eprintln!("\n{}", Args::command().render_help());
}
