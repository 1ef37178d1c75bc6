use std::io;
use std::process::ExitCode;

use clap::Parser;
use sp3t_router::{run, Cli, SimulatedDriver, EXIT_FAILURE};
use tracing_subscriber::EnvFilter;

fn main() -> ExitCode {
    let cli = Cli::parse();

    // RUST_LOG wins over -v
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(cli.log_level()));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();

    let program = std::env::args()
        .next()
        .unwrap_or_else(|| "sp3t-route".to_owned());

    let stdin = io::stdin();
    let code = match run(
        &cli,
        &program,
        SimulatedDriver::new(),
        stdin.lock(),
        &mut io::stdout(),
        &mut io::stderr(),
    ) {
        Ok(code) => code,
        Err(e) => {
            eprintln!("error: {e}");
            EXIT_FAILURE
        }
    };

    ExitCode::from(code)
}
