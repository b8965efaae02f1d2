use anyhow::{Context, Result};
use artifact_loader::{ModelArtifacts, TreeEnsemble, CROP_FEATURES, FERTILIZER_FEATURES};
use clap::{Args, Parser, Subcommand};
use colored::Colorize;
use pipeline::{
    Label, LabelTable, Recommendation, Recommender, SoilInput, SoilType, WeatherInput, CROPS,
    FERTILIZERS,
};
use server::AppState;
use std::net::SocketAddr;
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};
use tracing::info;

/// AgriVision - Crop & Fertilizer Recommendation
#[derive(Parser)]
#[command(name = "agrivision")]
#[command(about = "Crop and fertilizer recommendations from soil and weather measurements", long_about = None)]
struct Cli {
    /// Directory holding crop_model.json, fertilizer_model.json and scaler.json
    #[arg(short, long, default_value = "models")]
    artifacts_dir: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Serve the recommendation form over HTTP
    Serve {
        /// Address to listen on
        #[arg(long, default_value = "127.0.0.1:8501")]
        bind: SocketAddr,
    },

    /// Run one recommendation from the command line
    Predict {
        #[command(flatten)]
        inputs: InputArgs,

        /// Print the result as JSON
        #[arg(long)]
        json: bool,
    },

    /// Summarize the loaded artifacts
    Inspect,
}

/// Same fields, defaults and ranges as the web form
#[derive(Args)]
struct InputArgs {
    /// Nitrogen (N), 0-200
    #[arg(long, default_value_t = 50)]
    nitrogen: u16,

    /// Phosphorus (P), 0-200
    #[arg(long, default_value_t = 50)]
    phosphorus: u16,

    /// Potassium (K), 0-200
    #[arg(long, default_value_t = 50)]
    potassium: u16,

    /// Soil pH, 0-14
    #[arg(long, default_value_t = 6.5)]
    ph: f64,

    /// Soil moisture (%), 0-100
    #[arg(long, default_value_t = 30.0)]
    moisture: f64,

    /// Sandy, Clay or Loamy
    #[arg(long, default_value = "Sandy")]
    soil_type: SoilType,

    /// Temperature (°C), 0-60
    #[arg(long, default_value_t = 25.0)]
    temperature: f64,

    /// Humidity (%), 0-100
    #[arg(long, default_value_t = 60.0)]
    humidity: f64,

    /// Rainfall (mm), 0-500
    #[arg(long, default_value_t = 100.0)]
    rainfall: f64,
}

impl InputArgs {
    fn into_inputs(self) -> (SoilInput, WeatherInput) {
        let soil = SoilInput {
            nitrogen: self.nitrogen,
            phosphorus: self.phosphorus,
            potassium: self.potassium,
            ph: self.ph,
            moisture: self.moisture,
            soil_type: self.soil_type,
        };
        let weather = WeatherInput {
            temperature: self.temperature,
            humidity: self.humidity,
            rainfall: self.rainfall,
        };
        (soil, weather)
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        // stdout carries command output only
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    // Dispatch to appropriate command handler
    match cli.command {
        Commands::Serve { bind } => handle_serve(&cli.artifacts_dir, bind).await?,
        Commands::Predict { inputs, json } => handle_predict(&cli.artifacts_dir, inputs, json)?,
        Commands::Inspect => handle_inspect(&cli.artifacts_dir)?,
    }

    Ok(())
}

/// Handle the 'serve' command
async fn handle_serve(artifacts_dir: &Path, bind: SocketAddr) -> Result<()> {
    info!("Loading artifacts from {}", artifacts_dir.display());
    // Nothing is served unless every artifact loads
    let state = AppState::load(artifacts_dir)?;
    server::serve(state, bind).await
}

/// Handle the 'predict' command
fn handle_predict(artifacts_dir: &Path, inputs: InputArgs, json: bool) -> Result<()> {
    print!("{}", predict_output(artifacts_dir, inputs, json)?);
    Ok(())
}

/// Everything `predict` writes to stdout.
///
/// With `json` set this is a single JSON document and nothing else.
fn predict_output(artifacts_dir: &Path, inputs: InputArgs, json: bool) -> Result<String> {
    let (soil, weather) = inputs.into_inputs();
    soil.validate().context("Invalid soil input")?;
    weather.validate().context("Invalid weather input")?;

    let (artifacts, elapsed) = load_artifacts(artifacts_dir)?;
    let recommender = Recommender::from_artifacts(artifacts);
    let recommendation = recommender
        .recommend(&soil, &weather)
        .context("Prediction failed")?;

    if json {
        let mut out = serde_json::to_string_pretty(&recommendation)?;
        out.push('\n');
        return Ok(out);
    }

    let mut out = loaded_line(artifacts_dir, elapsed);
    out.push_str(&format_recommendation(&recommendation));
    Ok(out)
}

/// Handle the 'inspect' command
fn handle_inspect(artifacts_dir: &Path) -> Result<()> {
    let (artifacts, elapsed) = load_artifacts(artifacts_dir)?;
    print!("{}", loaded_line(artifacts_dir, elapsed));

    println!("{}", "Model artifacts:".bold().blue());
    print_model("Crop model", &artifacts.crop_model, &CROP_FEATURES, &CROPS);
    print_model(
        "Fertilizer model",
        &artifacts.fertilizer_model,
        &FERTILIZER_FEATURES,
        &FERTILIZERS,
    );

    println!("{}", "Scaler".bold());
    println!("{}Kind: {}", "• ".green(), artifacts.scaler.kind());
    println!("{}Columns: {}", "• ".green(), artifacts.scaler.n_features());
    Ok(())
}

fn load_artifacts(artifacts_dir: &Path) -> Result<(ModelArtifacts, Duration)> {
    let start = Instant::now();
    let artifacts = ModelArtifacts::load_from_dir(artifacts_dir)
        .context("Failed to load model artifacts")?;
    Ok((artifacts, start.elapsed()))
}

fn loaded_line(artifacts_dir: &Path, elapsed: Duration) -> String {
    format!(
        "{} Loaded artifacts from {} in {:?}\n",
        "✓".green(),
        artifacts_dir.display(),
        elapsed
    )
}

fn print_model(title: &str, model: &TreeEnsemble, layout: &[&str], table: &LabelTable) {
    println!("{}", title.bold());
    println!("{}Name: {}", "• ".green(), model.name);
    println!("{}Trees: {}", "• ".green(), model.trees.len());
    println!("{}Features: {}", "• ".green(), layout.join(", "));
    println!("{}Classes: {}", "• ".green(), model.n_classes());

    // Labels the model can emit that the lookup table cannot name
    let unnamed: Vec<String> = model
        .classes
        .iter()
        .map(|label| label.trunc() as i64)
        .filter(|id| !table.lookup(*id).is_known())
        .map(|id| id.to_string())
        .collect();
    if !unnamed.is_empty() {
        println!(
            "{}Class ids without a {} name: {}",
            "• ".yellow(),
            table.kind,
            unnamed.join(", ").yellow()
        );
    }
}

fn format_recommendation(recommendation: &Recommendation) -> String {
    format!(
        "{}\n{}{}",
        "Recommendations:".bold().blue(),
        label_line("Crop", &recommendation.crop),
        label_line("Fertilizer", &recommendation.fertilizer)
    )
}

fn label_line(title: &str, label: &Label) -> String {
    match label {
        Label::Known { id, name } => {
            format!("{}: {} (class {})\n", title, name.green().bold(), id)
        }
        Label::Unknown { raw_id } => format!(
            "{}: {} - the model predicted an unknown value: {}\n",
            title,
            "Prediction Error".red().bold(),
            raw_id.to_string().red()
        ),
    }
}
