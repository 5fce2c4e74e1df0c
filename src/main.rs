use std::path::PathBuf;
use std::process::ExitCode;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod client;
mod model;
mod service;

use client::AnalysisClient;
use model::Config;
use service::report::render_report;
use service::{AnalysisService, DocumentUpload, Session};

#[tokio::main]
async fn main() -> ExitCode {
    // Load .env file if present (ignore if missing)
    let _ = dotenvy::dotenv();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let mut args = std::env::args().skip(1);
    let path = match args.next() {
        Some(path) => PathBuf::from(path),
        None => {
            eprintln!("Usage: legalenz-analysis <contract.pdf> [question...]");
            return ExitCode::FAILURE;
        }
    };
    let question: Option<String> = {
        let rest: Vec<String> = args.collect();
        if rest.is_empty() {
            None
        } else {
            Some(rest.join(" "))
        }
    };

    let config = Config::from_env();
    tracing::info!(base_url = %config.base_url, "Starting contract analysis");

    let upload = match DocumentUpload::from_path(&path) {
        Ok(upload) => upload,
        Err(e) => {
            eprintln!("{}", e);
            return ExitCode::FAILURE;
        }
    };

    let service = AnalysisService::new(AnalysisClient::new(&config));
    let mut session = Session::new();

    let completed = match service.run(&mut session, upload).await {
        Ok(completed) => completed,
        Err(e) => {
            eprintln!("{}", e);
            return ExitCode::FAILURE;
        }
    };

    println!("{}", completed.analysis.summary.summary);
    println!();
    println!("{}", render_report(&completed.assessment));

    if let Some(question) = question {
        match service.ask(&question, &completed.analysis.namespace).await {
            Ok(response) => {
                println!("Q: {}", question);
                println!("A: {}", response.answer);
            }
            Err(e) => {
                eprintln!("{}", e);
                return ExitCode::FAILURE;
            }
        }
    }

    ExitCode::SUCCESS
}
