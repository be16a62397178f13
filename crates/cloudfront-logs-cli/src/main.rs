//! `cf-logs`: provision CloudFront distributions and ship their access logs
//! to S3 through CloudWatch Logs deliveries.
//!
//! ```sh
//! cf-logs provision --origin-host app.example.com \
//!     --cache-policy-id ... --origin-request-policy-id ... \
//!     --response-headers-policy-id ... --bucket-name my-logs
//! cf-logs attach --distribution-id E123 --bucket-name my-logs --region us-west-2
//! cf-logs attach-parquet --distribution-id E123 --bucket-name my-logs
//! ```
//!
//! Run with `-v`, `-vv` or `-vvv` to see what happens under the hood.
use std::process::ExitCode;

use cflogs::{aws::Aws, cli::Cli};
use clap::{CommandFactory, Parser};

fn print_usage(subcommand: &str) {
    let mut cmd = Cli::command();
    cmd.build();
    let result = match cmd.find_subcommand_mut(subcommand) {
        Some(sub) => sub.print_help(),
        None => cmd.print_help(),
    };
    if let Err(e) = result {
        log::error!("could not print usage: {e}");
    }
}

#[::tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    let level = match cli.verbosity {
        0 => log::LevelFilter::Warn,
        1 => log::LevelFilter::Info,
        2 => log::LevelFilter::Debug,
        _ => log::LevelFilter::Trace,
    };
    env_logger::Builder::default()
        .filter_level(log::LevelFilter::Warn)
        .filter_module("cflogs", level)
        .filter_module("cf_logs", level)
        .init();

    if let Err(e) = cli.command.validate() {
        println!("Error: {e}");
        print_usage(cli.command.name());
        return ExitCode::FAILURE;
    }

    let options = match cli.delivery_options() {
        Ok(options) => options,
        Err(e) => {
            eprintln!("{e}");
            return ExitCode::FAILURE;
        }
    };
    log::debug!("delivery options: {options:?}");

    let platform = Aws::load(cli.command.region()).await;
    match cli.command.execute(options, &platform).await {
        Ok(summary) => {
            println!();
            print!("{summary}");
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("{e}");
            ExitCode::FAILURE
        }
    }
}
