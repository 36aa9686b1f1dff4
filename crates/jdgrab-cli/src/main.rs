use jdgrab_core::logging;

mod cli;

use crate::cli::CliCommand;

#[tokio::main]
async fn main() {
    // File logging when the state dir is usable, stderr otherwise.
    if let Err(err) = logging::init_logging() {
        match logging::init_logging_stderr() {
            Ok(()) => tracing::warn!("file logging unavailable, using stderr: {:#}", err),
            Err(e) => eprintln!("jdgrab: logging disabled: {:#}", e),
        }
    }

    if let Err(err) = CliCommand::run_from_args().await {
        eprintln!("jdgrab error: {:#}", err);
        std::process::exit(1);
    }
}
