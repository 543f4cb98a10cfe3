use crate::form::{run_options, run_screen, OptionsArgs, ScreenArgs};
use crate::server;
use clap::{Args, Parser, Subcommand};
use fraud_check::config::DataConfig;
use fraud_check::error::AppError;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    name = "Fraud Check",
    about = "Screen transactions against the trained fraud classifier",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Start the HTTP service (default command)
    Serve(ServeArgs),
    /// List the values each form field currently offers
    Options(OptionsArgs),
    /// Encode a transaction and print the classifier's verdict
    Screen(ScreenArgs),
}

#[derive(Args, Debug, Default)]
pub(crate) struct ServeArgs {
    /// Override the configured host for the HTTP server
    #[arg(long)]
    pub(crate) host: Option<String>,
    /// Override the configured port for the HTTP server
    #[arg(long)]
    pub(crate) port: Option<u16>,
    #[command(flatten)]
    pub(crate) data: DataArgs,
}

/// Overrides for the reference dataset and model artifact locations.
#[derive(Args, Debug, Default, Clone)]
pub(crate) struct DataArgs {
    /// Reference transactions CSV (defaults to APP_REFERENCE_DATA)
    #[arg(long)]
    pub(crate) reference_data: Option<PathBuf>,
    /// Serialized classifier JSON (defaults to APP_MODEL_PATH)
    #[arg(long)]
    pub(crate) model_path: Option<PathBuf>,
}

impl DataArgs {
    pub(crate) fn apply(mut self, config: &mut DataConfig) {
        if let Some(path) = self.reference_data.take() {
            config.reference_data = path;
        }
        if let Some(path) = self.model_path.take() {
            config.model_path = path;
        }
    }
}

pub(crate) async fn run() -> Result<(), AppError> {
    let cli = Cli::parse();
    let command = cli
        .command
        .unwrap_or_else(|| Command::Serve(ServeArgs::default()));

    match command {
        Command::Serve(args) => server::run(args).await,
        Command::Options(args) => run_options(args),
        Command::Screen(args) => run_screen(args),
    }
}
