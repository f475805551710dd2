use std::process::ExitCode;

use clap::Parser;

use version_manager::cli::{orchestration, Args};
use version_manager::ui;
use version_manager::workflow::StepError;

fn main() -> ExitCode {
    let args = Args::parse();

    match orchestration::run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            // Step failures have already been reported with the step's name
            if e.downcast_ref::<StepError>().is_none() {
                ui::display_error(&format!("{:#}", e));
            }
            ExitCode::FAILURE
        }
    }
}
