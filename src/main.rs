//! Savor CLI entrypoint: `savor "<query>"` prints `{"<restaurant>": <score>}`.

use std::process::ExitCode;

use anyhow::Context;
use mimalloc::MiMalloc;

use savor::config::Config;
use savor::pipeline::build_pipeline;

#[global_allocator]
static GLOBAL: MiMalloc = MiMalloc;

const USAGE: &str = "usage: savor \"<query>\"\n\nexample: savor \"Tell me about Subway\"";

const EXIT_PIPELINE_FAILURE: u8 = 1;
const EXIT_USAGE: u8 = 2;

#[tokio::main]
async fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let args: Vec<String> = std::env::args().skip(1).collect();
    if args.iter().any(|a| a == "-h" || a == "--help") {
        println!("{USAGE}");
        return ExitCode::SUCCESS;
    }

    let query = args.join(" ");
    let query = query.trim();
    if query.is_empty() {
        eprintln!("{USAGE}");
        return ExitCode::from(EXIT_USAGE);
    }

    let config = match load_config() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("configuration error: {e:#}");
            return ExitCode::from(EXIT_USAGE);
        }
    };

    tracing::info!(backend = %config.agent_backend, query = %query, "Savor starting");

    let pipeline = build_pipeline(&config);
    match pipeline.run(query).await {
        Ok(report) => {
            println!("{}", report.score.to_json_line());
            ExitCode::SUCCESS
        }
        Err(e) => {
            match e.failed_stage() {
                Some(stage) => eprintln!("{stage} stage failed: {e}"),
                None => eprintln!("pipeline failed: {e}"),
            }
            ExitCode::from(EXIT_PIPELINE_FAILURE)
        }
    }
}

fn load_config() -> anyhow::Result<Config> {
    let config = Config::from_env().context("failed to read SAVOR_* environment")?;
    config.validate().context("invalid configuration")?;
    Ok(config)
}
