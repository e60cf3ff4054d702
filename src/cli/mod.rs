//! Iris Classifier CLI Module
//!
//! Command-line entry points: run the HTTP server, classify a single sample
//! offline, or inspect a model artifact.

use clap::{Parser, Subcommand};
use colored::*;
use std::path::{Path, PathBuf};

use crate::error::{InferenceError, Result};
use crate::model::{self, Classifier, DecisionTreeClassifier, ModelArtifact};
use crate::server::{self, PredictionRequest, ServerConfig, FEATURE_NAMES};

fn dim(s: &str) -> ColoredString { s.truecolor(100, 100, 100) }
fn muted(s: &str) -> ColoredString { s.truecolor(140, 140, 140) }
fn ok(s: &str) -> ColoredString { s.truecolor(100, 210, 120) }

fn kv(key: &str, val: &str) -> String {
    format!("{} {}", muted(&format!("{:<12}", key)), val.white())
}

fn section(title: &str) {
    println!();
    println!("  {}", title.white().bold());
    println!("  {}", dim(&"─".repeat(40)));
}

#[derive(Parser)]
#[command(name = "iris-serve")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Iris species classifier inference service")]
#[command(long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Start the HTTP server
    Serve {
        /// Bind host (overrides API_HOST)
        #[arg(long)]
        host: Option<String>,

        /// Bind port (overrides API_PORT)
        #[arg(short, long)]
        port: Option<u16>,

        /// Model artifact (overrides MODEL_PATH)
        #[arg(short, long)]
        model: Option<PathBuf>,
    },

    /// Classify one sample without starting the server
    Predict {
        /// Model artifact
        #[arg(short, long, env = "MODEL_PATH", default_value = "models/iris_tree.json")]
        model: PathBuf,

        #[arg(long, allow_hyphen_values = true)]
        sepal_length: f64,

        #[arg(long, allow_hyphen_values = true)]
        sepal_width: f64,

        #[arg(long, allow_hyphen_values = true)]
        petal_length: f64,

        #[arg(long, allow_hyphen_values = true)]
        petal_width: f64,
    },

    /// Print a summary of a model artifact
    Inspect {
        /// Model artifact
        #[arg(short, long, env = "MODEL_PATH", default_value = "models/iris_tree.json")]
        model: PathBuf,
    },
}

/// Start the server, applying command-line overrides on top of the environment
pub async fn cmd_serve(host: Option<String>, port: Option<u16>, model: Option<PathBuf>) -> anyhow::Result<()> {
    let mut config = ServerConfig::default();
    if let Some(host) = host {
        config.host = host;
    }
    if let Some(port) = port {
        config.port = port;
    }
    if let Some(model) = model {
        config.model_path = model;
    }
    server::run_server(config).await
}

/// Classify a single sample and print the label
pub fn cmd_predict(model_path: &Path, request: PredictionRequest) -> Result<String> {
    let model = model::load_model(model_path)?;
    let labels = model.predict(&request.to_array())?;
    let label = labels
        .into_iter()
        .next()
        .ok_or(InferenceError::EmptyOutput)?;

    println!("  {} {}", ok("✓"), kv("predicted", &label));
    Ok(label)
}

/// Print model type, features, classes and tree shape
pub fn cmd_inspect(model_path: &Path) -> Result<()> {
    let artifact = ModelArtifact::read(model_path)?;
    let model = DecisionTreeClassifier::from_artifact(artifact);

    section("Model artifact");
    println!("  {}", kv("path", &model_path.display().to_string()));
    println!("  {}", kv("type", model.model_type()));
    println!("  {}", kv("features", &model.feature_names().join(", ")));
    println!("  {}", kv("classes", &model.classes().join(", ")));
    println!("  {}", kv("depth", &model.depth().to_string()));
    println!("  {}", kv("leaves", &model.n_leaves().to_string()));

    let matches_schema = model
        .feature_names()
        .iter()
        .map(String::as_str)
        .eq(FEATURE_NAMES.iter().copied());
    if matches_schema {
        println!("  {} feature order matches the request schema", ok("✓"));
    } else {
        println!("  {} feature order differs from the request schema", "!".yellow());
    }
    println!();
    Ok(())
}
