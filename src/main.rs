// src/main.rs

use mux::{cli, logging, run};

#[tokio::main]
async fn main() {
    let args = cli::parse();

    if let Err(err) = logging::init_logging(args.log_level) {
        eprintln!("mux error: {err:?}");
        std::process::exit(1);
    }

    // `process::exit` skips destructors: children that are still running are
    // neither killed nor waited for.
    match run(args).await {
        Ok(termination) => std::process::exit(termination.exit_code()),
        Err(err) if err.is_usage() => {
            eprintln!("mux: {err}");
            std::process::exit(1);
        }
        Err(err) => {
            eprintln!("mux error: {err:?}");
            std::process::exit(1);
        }
    }
}
