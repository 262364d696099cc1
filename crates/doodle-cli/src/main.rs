//! Doodle guessing command-line tool.

use std::path::{Path, PathBuf};

use anyhow::{bail, Context};
use clap::{Parser, Subcommand};
use image::ImageFormat;
use tracing::info;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use doodle_ai::{GeminiClient, GuessPipeline};
use doodle_classifier::{TensorLayout, DEFAULT_TOP_K};
use doodle_media::{DataUri, ImageMime};

#[derive(Debug, Parser)]
#[command(name = "doodle", version, about = "Guess what a children's drawing shows")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Ask the generative model for a one-word guess
    Guess {
        /// PNG or JPEG drawing
        image: PathBuf,
        /// Word the child was asked to draw
        #[arg(long)]
        target: Option<String>,
    },
    /// Run the pretrained sketch classifier
    Classify {
        /// PNG or JPEG drawing
        image: PathBuf,
        /// ONNX model file
        #[arg(long, default_value = "models/quickdraw/quickdraw.onnx")]
        model: PathBuf,
        /// Newline-separated class names
        #[arg(long, default_value = "models/quickdraw/labels.txt")]
        labels: PathBuf,
        /// Name of the score output tensor
        #[arg(long, default_value = "output")]
        output_name: String,
        /// Input tensor layout (nhwc or nchw)
        #[arg(long, default_value = "nhwc")]
        layout: TensorLayout,
        #[arg(long, default_value_t = DEFAULT_TOP_K)]
        top_k: usize,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Install rustls crypto provider (required for TLS/HTTPS)
    rustls::crypto::ring::default_provider()
        .install_default()
        .map_err(|_| anyhow::anyhow!("Failed to install rustls crypto provider"))?;

    dotenvy::dotenv().ok();
    init_tracing()?;

    let cli = Cli::parse();

    match cli.command {
        Command::Guess { image, target } => guess(&image, target.as_deref()).await,
        Command::Classify {
            image,
            model,
            labels,
            output_name,
            layout,
            top_k,
        } => {
            let config = doodle_classifier::ClassifierModelConfig {
                model_path: model,
                labels_path: labels,
                output_name,
                layout,
                top_k,
            };
            classify(&image, config).await
        }
    }
}

/// JSON logs when `LOG_FORMAT=json`, coloured text otherwise; always on stderr.
fn init_tracing() -> anyhow::Result<()> {
    let use_json = std::env::var("LOG_FORMAT")
        .map(|v| v.to_lowercase() == "json")
        .unwrap_or(false);

    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("warn"))
        .add_directive("doodle=info".parse()?)
        .add_directive("ort=warn".parse()?);

    if use_json {
        tracing_subscriber::registry()
            .with(fmt::layer().json().with_writer(std::io::stderr))
            .with(env_filter)
            .init();
    } else {
        tracing_subscriber::registry()
            .with(
                fmt::layer()
                    .with_ansi(true)
                    .with_target(true)
                    .with_writer(std::io::stderr),
            )
            .with(env_filter)
            .init();
    }
    Ok(())
}

async fn guess(image: &Path, target: Option<&str>) -> anyhow::Result<()> {
    let client = GeminiClient::from_env().context("Gemini client configuration")?;
    info!(config = ?client.config(), "Starting guess");

    let data_uri = read_data_uri(image)?;
    let result = GuessPipeline::new(client).analyze(&data_uri, target).await;

    println!("{}", serde_json::to_string_pretty(&result)?);
    Ok(())
}

#[cfg(feature = "onnx")]
async fn classify(
    image: &Path,
    config: doodle_classifier::ClassifierModelConfig,
) -> anyhow::Result<()> {
    use doodle_classifier::ClassifierPipeline;
    use doodle_media::DrawingImage;

    let pipeline = ClassifierPipeline::load(config).context("Loading sketch classifier")?;

    let bytes = std::fs::read(image).with_context(|| format!("Reading {}", image.display()))?;
    let canvas = DrawingImage::decode(&bytes)?;
    let result = pipeline.analyze(&canvas).await?;
    pipeline.shutdown();

    println!("{}", serde_json::to_string_pretty(&result)?);
    Ok(())
}

#[cfg(not(feature = "onnx"))]
async fn classify(
    _image: &Path,
    _config: doodle_classifier::ClassifierModelConfig,
) -> anyhow::Result<()> {
    bail!("doodle was built without the `onnx` feature; rebuild with --features onnx")
}

/// Read a PNG/JPEG file into a base64 data URI.
fn read_data_uri(path: &Path) -> anyhow::Result<String> {
    let bytes = std::fs::read(path).with_context(|| format!("Reading {}", path.display()))?;

    let mime = match image::guess_format(&bytes) {
        Ok(ImageFormat::Png) => ImageMime::Png,
        Ok(ImageFormat::Jpeg) => ImageMime::Jpeg,
        Ok(other) => bail!("Unsupported image format {:?}; use PNG or JPEG", other),
        Err(e) => bail!("Unrecognised image {}: {}", path.display(), e),
    };

    Ok(DataUri::encode(mime, &bytes).to_string())
}
