use std::path::Path;

use edupath_core::core::service::CoreService;
use serde_json::json;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let args: Vec<String> = std::env::args().collect();
    if args.len() < 2 {
        eprintln!("Usage: report_harness <report-card.txt|pdf|png|jpg> [grade] [interest,...]");
        std::process::exit(1);
    }

    let path = &args[1];
    if !Path::new(path).exists() {
        eprintln!("File not found: {path}");
        std::process::exit(2);
    }

    let grade = match args.get(2) {
        Some(value) => match value.parse::<u8>() {
            Ok(grade) => grade,
            Err(_) => {
                eprintln!("Grade must be a number between 9 and 12, got {value}");
                std::process::exit(1);
            }
        },
        None => 9,
    };

    let interests: Vec<String> = args
        .get(3)
        .map(|v| {
            v.split(',')
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty())
                .collect()
        })
        .unwrap_or_default();

    let file_name = Path::new(path)
        .file_name()
        .and_then(|v| v.to_str())
        .unwrap_or("report-card.txt")
        .to_string();

    let bytes = tokio::fs::read(path).await?;

    let service = CoreService::new().await?;
    let mut settings = service.get_settings().await;
    if let Ok(tesseract_path) = std::env::var("EDUPATH_TESSERACT_PATH") {
        settings.tesseract_path = tesseract_path;
    }
    if let Ok(pdftoppm_path) = std::env::var("EDUPATH_PDFTOPPM_PATH") {
        settings.pdftoppm_path = pdftoppm_path;
    }
    service.override_settings(settings).await;

    let outcome = service.analyze_report_card(&file_name, &bytes, grade).await?;
    if !interests.is_empty() {
        service.update_interests(interests).await;
    }
    let snapshot = service.snapshot().await;

    let report = json!({
        "analysis": outcome,
        "profile": snapshot.profile,
        "summary": snapshot.summary,
        "digest": snapshot.digest,
        "recommendations": snapshot.recommendations,
    });
    println!("{}", serde_json::to_string_pretty(&report)?);
    Ok(())
}
