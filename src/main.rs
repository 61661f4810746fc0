// pdf-convert/src/main.rs

use anyhow::{bail, Context};
use chrono::Utc;
use pdf_convert::config::Config;
use pdf_convert::{ConvertError, PdfConverter, RequestCookies, WkHtmlToPdf};
use sha2::{Digest, Sha256};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::io::AsyncReadExt;
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use uuid::Uuid;

const USAGE: &str = "usage: pdfconv <input.html|-> [options.json]";

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load configuration
    let config = match Config::load() {
        Ok(cfg) => cfg,
        Err(e) => {
            eprintln!("FATAL: Failed to load configuration: {}", e);
            std::process::exit(1);
        }
    };

    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| config.service.log_level.clone().into()),
        )
        .with(tracing_subscriber::fmt::layer().json().with_writer(std::io::stderr))
        .init();

    let mut args = std::env::args().skip(1);
    let Some(input) = args.next() else {
        bail!(USAGE);
    };
    let options_path = args.next();

    let job_id = Uuid::new_v4();

    info!(
        service = %config.service.name,
        version = env!("CARGO_PKG_VERSION"),
        job_id = %job_id,
        input = %input,
        "Starting conversion"
    );

    let options = match &options_path {
        Some(path) => {
            let raw = tokio::fs::read(path)
                .await
                .with_context(|| format!("Failed to read options file {}", path))?;
            config
                .request_options(&raw)
                .with_context(|| format!("Invalid options file {}", path))?
        }
        None => config.options.clone(),
    };

    let mut engine = WkHtmlToPdf::new(&config.engine.executable);
    if let Some(temp_dir) = &config.engine.temp_dir {
        tokio::fs::create_dir_all(temp_dir)
            .await
            .with_context(|| format!("Failed to create temp directory {}", temp_dir))?;
        engine = engine.with_temp_dir(temp_dir);
    }

    let mut converter = PdfConverter::new(engine);
    // Cookie header of the originating request, forwarded for forms authentication
    if let Ok(header) = std::env::var("PDFCONV_COOKIE") {
        converter = converter.with_cookies(RequestCookies::parse_header(&header));
    }
    let converter = Arc::new(converter);

    let result = if input == "-" {
        let mut html = String::new();
        tokio::io::stdin()
            .read_to_string(&mut html)
            .await
            .context("Failed to read HTML from stdin")?;

        tokio::task::spawn_blocking(move || converter.convert_html(&html, &options)).await?
    } else {
        let path = PathBuf::from(&input);
        tokio::task::spawn_blocking(move || converter.convert_file(&path, &options, None)).await?
    };

    let pdf = match result {
        Ok(pdf) => pdf,
        Err(e) => return report_failure(job_id, &e),
    };

    let output_path = output_path(&config.output.directory, &input);
    tokio::fs::create_dir_all(&config.output.directory)
        .await
        .with_context(|| format!("Failed to create output directory {}", config.output.directory))?;
    tokio::fs::write(&output_path, &pdf)
        .await
        .with_context(|| format!("Failed to write {}", output_path.display()))?;

    let mut hasher = Sha256::new();
    hasher.update(&pdf);
    let sha256_checksum = hex::encode(hasher.finalize());

    info!(
        job_id = %job_id,
        output = %output_path.display(),
        size_bytes = pdf.len(),
        sha256 = %sha256_checksum,
        "Conversion completed"
    );

    println!("{}", output_path.display());
    Ok(())
}

fn report_failure(job_id: Uuid, e: &ConvertError) -> anyhow::Result<()> {
    let response = e.to_error_response();
    error!(
        job_id = %job_id,
        error_type = %response.error_type,
        error = %response.error,
        "Conversion failed"
    );
    println!("{}", serde_json::to_string(&response)?);
    std::process::exit(1);
}

/// `{output_dir}/{input stem}_{timestamp}.pdf`
fn output_path(directory: &str, input: &str) -> PathBuf {
    let stem = if input == "-" {
        "stdin".to_string()
    } else {
        Path::new(input)
            .file_stem()
            .map(|stem| stem.to_string_lossy().into_owned())
            .unwrap_or_else(|| "document".to_string())
    };

    let sanitized = stem
        .chars()
        .map(|c| if c.is_alphanumeric() || c == '-' || c == '_' { c } else { '_' })
        .collect::<String>();

    Path::new(directory).join(format!(
        "{}_{}.pdf",
        sanitized,
        Utc::now().format("%Y%m%d_%H%M%S")
    ))
}
