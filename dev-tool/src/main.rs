use std::process::exit;

use anyhow::Error;
use structopt::StructOpt;

use crate::exit_code::FATAL_ERROR;

mod analyze;
mod catalog;
mod exit_code;
mod input;
mod recommend;

/// Tooling for the developers of the shelf planner.
#[derive(StructOpt, Debug)]
enum CommandArgs {
    Analyze(analyze::AnalyzeCmd),
    Recommend(recommend::RecommendCmd),
}

impl CommandArgs {
    fn run(self) -> Result<i32, Error> {
        match self {
            CommandArgs::Analyze(cmd) => cmd.run(),
            CommandArgs::Recommend(cmd) => cmd.run(),
        }
    }
}

fn main() {
    env_logger::init();

    let exit_code = match CommandArgs::from_args().run() {
        Ok(exit_code) => exit_code,
        Err(error) => {
            eprintln!("{:?}", error);
            FATAL_ERROR
        }
    };

    exit(exit_code);
}
