use clap::Parser;
use hacker_stories::Variant;
use hacker_stories::core::config::{StoriesConfig, load_config, resolve};
use hacker_stories::tui;
use simplelog::{ConfigBuilder, LevelFilter, WriteLogger};
use std::fs::File;

#[derive(Parser)]
#[command(name = "hacker-stories", about = "Search Hacker News stories from the terminal")]
struct Args {
    /// Screen variant (overrides config file and HACKER_STORIES_VARIANT)
    #[arg(short, long, value_enum)]
    variant: Option<Variant>,

    /// Initial search term (replaces the remembered one)
    #[arg(short, long)]
    query: Option<String>,

    /// Search endpoint (overrides config file and HN_SEARCH_ENDPOINT)
    #[arg(short, long)]
    endpoint: Option<String>,
}

#[tokio::main]
async fn main() -> std::io::Result<()> {
    let args = Args::parse();
    dotenv::dotenv().ok();

    // Initialize file logger - writes to hacker-stories.log in current directory
    let log_config = ConfigBuilder::new()
        .set_time_format_rfc3339()
        .build();

    if let Ok(log_file) = File::create("hacker-stories.log") {
        let _ = WriteLogger::init(LevelFilter::Debug, log_config, log_file);
    }

    let config = match load_config() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Warning: {}, using defaults", e);
            log::warn!("Config load failed: {}", e);
            StoriesConfig::default()
        }
    };
    let resolved = resolve(&config, args.variant, args.endpoint.as_deref());

    log::info!(
        "Hacker Stories starting up: variant={}, endpoint={}",
        resolved.variant.label(),
        resolved.endpoint
    );

    tui::run(resolved, args.query)
}
