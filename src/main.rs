use clap::Parser;
use fincalc::api::{Cli, Command, run_calc_command, run_http_server};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    match Cli::parse().command {
        Command::Serve(config) => {
            if let Err(e) = run_http_server(&config).await {
                eprintln!("Server error: {e}");
                std::process::exit(1);
            }
        }
        Command::Calc { request, summary } => match run_calc_command(&request, summary) {
            Ok(output) => println!("{output}"),
            Err(e) => {
                eprintln!("{e}");
                std::process::exit(1);
            }
        },
    }
}
