//! `krishi`: terminal client for the crop-advisory inference API.
//!
//! Runs the same validate-then-call flows as the web UI, so a field left
//! blank fails locally with the UI's message and never reaches the network.

mod inference;
mod render;

#[cfg(test)]
#[path = "main_test.rs"]
mod main_test;

use std::path::{Path, PathBuf};
use std::process::ExitCode;

use advisory::{CropParams, FertilizerParams, ImageUpload, SubmitError};
use clap::{Args, Parser, Subcommand};
use serde_json::Value;

use crate::inference::ReqwestInference;

#[derive(Debug, thiserror::Error)]
enum CliError {
    #[error(transparent)]
    Submit(#[from] SubmitError),
    #[error("cannot read {path}: {source}")]
    ReadImage { path: PathBuf, source: std::io::Error },
    #[error("invalid JSON payload: {0}")]
    InvalidJson(#[from] serde_json::Error),
}

#[derive(Parser, Debug)]
#[command(name = "krishi", about = "Krishi Mithra crop-advisory CLI")]
struct Cli {
    #[arg(long, env = "KRISHI_INFERENCE_URL", default_value = advisory::DEFAULT_BASE_URL)]
    base_url: String,

    /// Print machine-readable JSON instead of text.
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug)]
struct CliContext {
    api: ReqwestInference,
    json: bool,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Check that the inference API is reachable.
    Ping,
    /// Classify a leaf photo.
    Detect {
        image: PathBuf,
    },
    /// Recommend a crop for soil and weather conditions.
    RecommendCrop(CropArgs),
    /// Recommend a fertilizer for soil, crop and nutrient readings.
    RecommendFertilizer(FertilizerArgs),
    /// Ask the farming assistant a question.
    Ask {
        #[arg(required = true, num_args = 1..)]
        question: Vec<String>,
    },
}

#[derive(Args, Debug)]
struct CropArgs {
    #[arg(long = "n", visible_alias = "nitrogen", default_value = "")]
    nitrogen: String,
    #[arg(long = "p", visible_alias = "phosphorus", default_value = "")]
    phosphorus: String,
    #[arg(long = "k", visible_alias = "potassium", default_value = "")]
    potassium: String,
    #[arg(long, default_value = "")]
    temperature: String,
    #[arg(long, default_value = "")]
    humidity: String,
    #[arg(long, default_value = "")]
    ph: String,
    #[arg(long, default_value = "")]
    rainfall: String,
}

impl From<CropArgs> for CropParams {
    fn from(args: CropArgs) -> Self {
        Self {
            nitrogen: args.nitrogen,
            phosphorus: args.phosphorus,
            potassium: args.potassium,
            temperature: args.temperature,
            humidity: args.humidity,
            ph: args.ph,
            rainfall: args.rainfall,
        }
    }
}

#[derive(Args, Debug)]
struct FertilizerArgs {
    #[arg(long, default_value = "")]
    temperature: String,
    #[arg(long, default_value = "")]
    humidity: String,
    #[arg(long, default_value = "")]
    moisture: String,
    #[arg(long, default_value = "")]
    soil_type: String,
    #[arg(long, default_value = "")]
    crop_type: String,
    #[arg(long = "n", visible_alias = "nitrogen", default_value = "")]
    nitrogen: String,
    #[arg(long = "p", visible_alias = "phosphorus", default_value = "")]
    phosphorus: String,
    #[arg(long = "k", visible_alias = "potassium", default_value = "")]
    potassium: String,
}

impl From<FertilizerArgs> for FertilizerParams {
    fn from(args: FertilizerArgs) -> Self {
        Self {
            temperature: args.temperature,
            humidity: args.humidity,
            moisture: args.moisture,
            soil_type: args.soil_type,
            crop_type: args.crop_type,
            nitrogen: args.nitrogen,
            phosphorus: args.phosphorus,
            potassium: args.potassium,
        }
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    match run(Cli::parse()).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {e}");
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> Result<(), CliError> {
    let ctx = CliContext { api: ReqwestInference::new(&cli.base_url), json: cli.json };

    match cli.command {
        Command::Ping => run_ping(&ctx).await,
        Command::Detect { image } => run_detect(&ctx, &image).await,
        Command::RecommendCrop(args) => run_recommend_crop(&ctx, args.into()).await,
        Command::RecommendFertilizer(args) => run_recommend_fertilizer(&ctx, args.into()).await,
        Command::Ask { question } => run_ask(&ctx, &question.join(" ")).await,
    }
}

async fn run_ping(ctx: &CliContext) -> Result<(), CliError> {
    let body = ctx.api.ping().await.map_err(SubmitError::from)?;
    if ctx.json {
        let value = serde_json::from_str::<Value>(&body).unwrap_or(Value::String(body));
        return print_json(&value);
    }
    eprintln!("inference API at {} is up", ctx.api.base_url());
    println!("{}", body.trim());
    Ok(())
}

async fn run_detect(ctx: &CliContext, path: &Path) -> Result<(), CliError> {
    let upload = read_image(path).await?;
    let diagnosis = advisory::detect(&ctx.api, Some(&upload)).await?;
    if ctx.json {
        return print_json(&render::diagnosis_json(&diagnosis));
    }
    print!("{}", render::diagnosis_text(&diagnosis));
    Ok(())
}

async fn run_recommend_crop(ctx: &CliContext, params: CropParams) -> Result<(), CliError> {
    let crop = advisory::recommend_crop(&ctx.api, &params).await?;
    if ctx.json {
        return print_json(&render::recommendation_json(&crop));
    }
    println!("{}", render::recommendation_text("crop", &crop));
    Ok(())
}

async fn run_recommend_fertilizer(ctx: &CliContext, params: FertilizerParams) -> Result<(), CliError> {
    let fertilizer = advisory::recommend_fertilizer(&ctx.api, &params).await?;
    if ctx.json {
        return print_json(&render::recommendation_json(&fertilizer));
    }
    println!("{}", render::recommendation_text("fertilizer", &fertilizer));
    Ok(())
}

async fn run_ask(ctx: &CliContext, question: &str) -> Result<(), CliError> {
    let answer = advisory::ask_assistant(&ctx.api, question).await?;
    if ctx.json {
        return print_json(&render::answer_json(&answer));
    }
    println!("{}", answer.trim_end());
    Ok(())
}

async fn read_image(path: &Path) -> Result<ImageUpload, CliError> {
    let bytes = tokio::fs::read(path)
        .await
        .map_err(|source| CliError::ReadImage { path: path.to_owned(), source })?;
    let file_name = path.file_name().map_or_else(|| "image".to_owned(), |n| n.to_string_lossy().into_owned());
    let content_type = ImageUpload::guess_content_type(&file_name);
    Ok(ImageUpload::new(file_name, content_type, bytes))
}

fn print_json(value: &Value) -> Result<(), CliError> {
    let rendered = serde_json::to_string_pretty(value)?;
    println!("{rendered}");
    Ok(())
}
