use balloon_tracker::pipeline;
use balloon_tracker::snapshot::HttpSource;
use balloon_tracker::web::{self, api::balloons::BalloonsResponse, Config};
use clap::{Parser, Subcommand};
use std::process::ExitCode;

#[derive(Parser)]
#[command(name = "balloon-tracker")]
#[command(about = "Reconstruct balloon trajectories from hourly position snapshots")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Serve reconstructed trajectories over HTTP
    Serve {
        #[arg(short, long)]
        config: Option<String>,
    },
    /// Fetch the last 24 hours once and print the trajectories as JSON
    Reconstruct {
        #[arg(short, long)]
        config: Option<String>,
        #[arg(long)]
        pretty: bool,
    },
    /// Check a config file and print the effective settings
    ValidateConfig { config: String },
}

#[tokio::main]
async fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Serve { config } => serve(config.as_deref()).await,
        Commands::Reconstruct { config, pretty } => reconstruct(config.as_deref(), pretty).await,
        Commands::ValidateConfig { config } => validate_config(&config),
    }
}

async fn serve(path: Option<&str>) -> ExitCode {
    let config = match Config::load(path) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Error loading config: {}", e);
            return ExitCode::FAILURE;
        }
    };

    match web::run_server(config).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Server error: {}", e);
            ExitCode::FAILURE
        }
    }
}

async fn reconstruct(path: Option<&str>, pretty: bool) -> ExitCode {
    let config = match Config::load(path) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Error loading config: {}", e);
            return ExitCode::FAILURE;
        }
    };

    let source = match HttpSource::new(&config.source.base_url, config.source.timeout) {
        Ok(s) => s,
        Err(e) => {
            eprintln!("Error building upstream client: {}", e);
            return ExitCode::FAILURE;
        }
    };

    let reconstruction = pipeline::run(&source).await;
    let response = BalloonsResponse::fresh(&reconstruction);

    let rendered = if pretty {
        serde_json::to_string_pretty(&response)
    } else {
        serde_json::to_string(&response)
    };

    match rendered {
        Ok(json) => {
            println!("{}", json);
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("Error encoding response: {}", e);
            ExitCode::FAILURE
        }
    }
}

fn validate_config(path: &str) -> ExitCode {
    match Config::from_file(path) {
        Ok(config) => {
            println!("Config is valid");
            println!("  bind:     {}", config.web.bind);
            println!("  upstream: {}", config.source.base_url);
            println!(
                "  timeout:  {}",
                humantime::format_duration(config.source.timeout)
            );
            println!(
                "  ttl:      {}",
                humantime::format_duration(config.cache.ttl)
            );
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("Config error: {}", e);
            ExitCode::FAILURE
        }
    }
}
