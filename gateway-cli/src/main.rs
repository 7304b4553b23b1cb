use std::fs::File;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::Parser;
use gateway_lib::{
    GatewayClient, GatewayConfig, UploadFile, UploadOptions, Validation, file_type_label,
    format_file_size,
};
use log::{error, info};
use simplelog::{ColorChoice, Config, TermLogger, TerminalMode, WriteLogger};

mod cli;

use cli::Args;

#[tokio::main]
async fn main() -> Result<ExitCode> {
    let args = Args::parse();
    init_logging(&args)?;

    let config = match &args.config {
        Some(path) => load_config(path).await?,
        None => GatewayConfig::default(),
    };
    let config = args.apply(config);
    let client = config.client().context("Failed to create gateway client")?;
    let options = args.upload_options();
    info!("using gateway {}", client.endpoint());

    let failures = process_all(&client, &args.files, &options, args.check).await;
    if failures > 0 {
        eprintln!("{failures} of {} file(s) failed", args.files.len());
        return Ok(ExitCode::FAILURE);
    }
    Ok(ExitCode::SUCCESS)
}

fn init_logging(args: &Args) -> Result<()> {
    let level = args.log_level();
    match &args.log_file {
        Some(path) => {
            let file = File::create(path)
                .with_context(|| format!("Failed to create log file {}", path.display()))?;
            WriteLogger::init(level, Config::default(), file)
                .context("Failed to initialize logger")?;
        }
        None => {
            TermLogger::init(
                level,
                Config::default(),
                TerminalMode::Stderr,
                ColorChoice::Auto,
            )
            .context("Failed to initialize logger")?;
        }
    }
    Ok(())
}

async fn load_config(path: &Path) -> Result<GatewayConfig> {
    let json = tokio::fs::read_to_string(path)
        .await
        .with_context(|| format!("Failed to read config {}", path.display()))?;
    GatewayConfig::from_json(&json)
        .with_context(|| format!("Invalid config {}", path.display()))
}

/// Process every file, logging each failure once. Returns the failure count.
async fn process_all(
    client: &GatewayClient,
    files: &[PathBuf],
    options: &UploadOptions,
    check_only: bool,
) -> usize {
    let mut failures = 0;
    for path in files {
        if let Err(e) = process(client, path, options, check_only).await {
            error!("{}: {e:#}", path.display());
            failures += 1;
        }
    }
    failures
}

/// Validate one file and, unless only checking, upload it.
async fn process(
    client: &GatewayClient,
    path: &Path,
    options: &UploadOptions,
    check_only: bool,
) -> Result<()> {
    let file = UploadFile::from_path(path)
        .await
        .with_context(|| format!("Failed to read {}", path.display()))?;

    println!(
        "{}: {}, {}",
        file.name,
        file_type_label(&file.mime_type),
        format_file_size(file.size())
    );

    if let Validation::Invalid(failure) = client.validate(&file) {
        anyhow::bail!("{failure}");
    }
    if check_only {
        println!("{}: ok", file.name);
        return Ok(());
    }

    let body = client
        .upload_file(&file, options)
        .await
        .context("Upload failed")?;
    println!("{}", serde_json::to_string_pretty(&body)?);
    Ok(())
}
