use clap::Parser;
use simplelog::{ConfigBuilder, LevelFilter, WriteLogger};
use std::fs::File;

use memotime::core::config;
use memotime::tui;

#[derive(Parser)]
#[command(name = "memotime", about = "Terminal client for the MemoTime notes service")]
struct Args {
    /// Base URL of the notes server (overrides config file and env var)
    #[arg(short, long)]
    server: Option<String>,
}

#[tokio::main]
async fn main() -> std::io::Result<()> {
    let args = Args::parse();
    dotenv::dotenv().ok();

    // File logger - the TUI owns the terminal, so logs go to memotime.log
    let log_config = ConfigBuilder::new()
        .set_time_format_rfc3339()
        .build();

    if let Ok(log_file) = File::create("memotime.log") {
        let _ = WriteLogger::init(LevelFilter::Debug, log_config, log_file);
    }

    let file_config = config::load_config().unwrap_or_else(|e| {
        log::warn!("Config unusable, falling back to defaults: {}", e);
        config::MemotimeConfig::default()
    });
    let resolved = config::resolve(&file_config, args.server.as_deref());

    log::info!("MemoTime starting up against {}", resolved.base_url);

    tui::run(resolved)
}
