use clap::Parser;
use serde::Serialize;
use tracing_subscriber::EnvFilter;

use fincalc::api::report::{compound_report, investment_report, loan_report, trading_report};
use fincalc::cli::{Cli, Command};
use fincalc::core::InputError;

fn print_report<T: Serialize>(outcome: Result<T, InputError>) {
    let report = match outcome {
        Ok(report) => report,
        Err(e) => {
            eprintln!("Invalid input: {e}");
            std::process::exit(2);
        }
    };
    match serde_json::to_string_pretty(&report) {
        Ok(json) => println!("{json}"),
        Err(e) => {
            eprintln!("Failed to serialize report: {e}");
            std::process::exit(1);
        }
    }
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    match Cli::parse().command {
        Command::Serve(args) => {
            if let Err(e) = fincalc::api::run_http_server(args.addr()).await {
                eprintln!("Server error: {e}");
                std::process::exit(1);
            }
        }
        Command::Compound(args) => print_report(compound_report(&args)),
        Command::Investment(args) => print_report(investment_report(&args)),
        Command::Loan(args) => print_report(loan_report(&args)),
        Command::Trading(args) => print_report(trading_report(&args)),
    }
}
