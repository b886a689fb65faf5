mod args;
mod cmd;
mod error;
mod gitignore_api;
mod ignore_file;
mod logger;
mod prompt;
mod template;

use args::Args;
use clap::Parser;
use cmd::{Command, Context};
use error::Error;
use gitignore_api::ToptalApi;
use ignore_file::OUTPUT_FILE_NAME;
use prompt::TerminalPrompter;
use std::path::PathBuf;
use std::process::ExitCode;

fn main() -> ExitCode {
    let args = match Args::try_parse() {
        Ok(args) => args,
        Err(error) => {
            // --help and --version come through here too
            let _ = error.print();
            return if error.use_stderr() {
                ExitCode::FAILURE
            } else {
                ExitCode::SUCCESS
            };
        }
    };
    match run(args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(error) => {
            log::debug!("{:?}", error);
            print_message(&error.to_string());
            ExitCode::from(error.exit_code())
        }
    }
}
fn run(args: Args) -> Result<(), Error> {
    logger::setup_logger(args.verbose)?;
    let service = ToptalApi::new(&args.api_url);
    let mut prompter = TerminalPrompter;
    let mut out = std::io::stdout();
    let mut context = Context {
        service: &service,
        prompter: &mut prompter,
        target: PathBuf::from(OUTPUT_FILE_NAME),
        out: &mut out,
    };
    let outcome = Command::new(args).run(&mut context)?;
    if let Some(message) = outcome.message() {
        print_message(&message);
    }
    Ok(())
}
fn print_message(message: &str) {
    eprintln!("[{}] \x1b[93m{}\x1b[0m", env!["CARGO_PKG_NAME"], message);
}
