use std::io::{stderr, stdout, Write};
use std::process::ExitCode;

use argot_core::error::Result;
use argot_core::{config, file_handling};
use clap::Parser;
use log::{debug, info};

use argot_cli::cli_args::Args;
use argot_cli::report;

fn execute(args: &Args) -> Result<ExitCode> {
    let definitions_path = config::get_definitions_path(args.definitions.as_deref());
    debug!("Definitions path: `{}`", definitions_path);

    let mut parser = file_handling::load_parser(&definitions_path)?;
    info!("Loaded declarations for `{}`", parser.program());

    if args.show_help {
        parser.write_help(&mut stdout(), args.help_style.into())?;
        return Ok(ExitCode::SUCCESS);
    }

    if parser.parse(&args.arguments).is_empty() {
        report::write_report(&mut stdout(), &parser)?;
        return Ok(ExitCode::SUCCESS);
    }

    let mut stderr = stderr();
    report::write_diagnostics(&mut stderr, &parser)?;
    writeln!(stderr, "Run with `--show-help` to see the declared arguments.")?;
    Ok(ExitCode::FAILURE)
}

fn main() -> ExitCode {
    env_logger::init();

    let args = Args::parse();
    match execute(&args) {
        Ok(code) => code,
        Err(e) => {
            eprintln!("{e}");
            ExitCode::FAILURE
        }
    }
}
