use clap::CommandFactory;
use colored::Colorize;
use propsxls::cli::{self, Cli, Invocation};
use propsxls::error::ConvertError;
use std::process::ExitCode;

fn main() -> ExitCode {
    let args = Cli::parse_args();
    cli::init_tracing(args.verbose);

    let result = match args.invocation() {
        Ok(Invocation::Export {
            workbook,
            working_directory,
            file_pattern,
            languages,
        }) => cli::export(workbook, working_directory, file_pattern, languages),

        Ok(Invocation::Import {
            workbook,
            working_directory,
        }) => cli::import(workbook, working_directory),

        Ok(Invocation::Unknown(_)) => {
            Cli::command().print_help().ok();
            Ok(())
        }

        Err(e) => Err(e),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{} {}", "error:".bold().red(), e);
            if matches!(e, ConvertError::Config(_)) {
                eprintln!("{}", Cli::command().render_help());
            }
            ExitCode::FAILURE
        }
    }
}
