//! Iris Classifier API - Main Entry Point

use clap::Parser;
use iris_serve::cli::{cmd_inspect, cmd_predict, cmd_serve, Cli, Commands};
use iris_serve::server::PredictionRequest;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "iris_serve=info,tower_http=info".into()),
        )
        .init();

    let cli = Cli::parse();

    match cli.command {
        Some(Commands::Serve { host, port, model }) => {
            cmd_serve(host, port, model).await?;
        }
        Some(Commands::Predict { model, sepal_length, sepal_width, petal_length, petal_width }) => {
            let request = PredictionRequest {
                sepal_length,
                sepal_width,
                petal_length,
                petal_width,
            };
            cmd_predict(&model, request)?;
        }
        Some(Commands::Inspect { model }) => {
            cmd_inspect(&model)?;
        }
        None => {
            cmd_serve(None, None, None).await?;
        }
    }

    Ok(())
}
