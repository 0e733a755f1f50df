use std::{
    io::{self, IsTerminal},
    process::ExitCode,
};

use clap::{Parser, ValueEnum};
use ocpp_mock::{Config, ResponderBuilder, TransactionIdRange};
use tracing::subscriber;
use tracing_subscriber::{EnvFilter, FmtSubscriber};

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum LogFormat {
    Compact,
    Pretty,
    Json,
}

/// Mock OCPP 1.6 central system: answers calls read from stdin on stdout.
#[derive(Debug, Parser)]
#[command(name = "ocpp-mock", version, about)]
struct Cli {
    /// Filter directives for the diagnostics written to stderr.
    #[arg(long, env = "OCPP_MOCK_LOG", default_value = "debug")]
    log_filter: String,

    #[arg(long, value_enum, default_value_t = LogFormat::Compact)]
    log_format: LogFormat,

    /// Smallest transaction id handed out by StartTransaction.
    #[arg(long, default_value_t = 10_000)]
    transaction_id_min: i32,

    /// Largest transaction id handed out by StartTransaction.
    #[arg(long, default_value_t = 99_999)]
    transaction_id_max: i32,
}

fn init_tracing(cli: &Cli) {
    let (filter, filter_error) = match EnvFilter::try_new(&cli.log_filter) {
        Ok(filter) => (filter, None),
        Err(error) => (EnvFilter::new("debug"), Some(error)),
    };

    // stdout carries protocol frames only.
    let builder = FmtSubscriber::builder()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_ansi(io::stderr().is_terminal());

    match cli.log_format {
        LogFormat::Compact => subscriber::set_global_default(builder.compact().finish()),
        LogFormat::Pretty => subscriber::set_global_default(builder.pretty().finish()),
        LogFormat::Json => subscriber::set_global_default(builder.json().finish()),
    }
    .expect("setting default subscriber failed");

    if let Some(error) = filter_error {
        tracing::warn!("Invalid log filter '{}' ({error}), using 'debug'", cli.log_filter);
    }
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(&cli);

    let transaction_ids =
        match TransactionIdRange::new(cli.transaction_id_min, cli.transaction_id_max) {
            Ok(transaction_ids) => transaction_ids,
            Err(error) => {
                tracing::error!("{error}");
                return ExitCode::FAILURE;
            }
        };

    let responder = ResponderBuilder::new(Config::new(transaction_ids)).build();

    if let Err(error) = responder.run_stdio().await {
        tracing::error!("Error running responder: {error}");
        return ExitCode::FAILURE;
    }
    ExitCode::SUCCESS
}
