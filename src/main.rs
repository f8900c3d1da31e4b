use clap::Parser;
use nyaya::core::config;
use nyaya::services::Language;
use nyaya::tui;
use simplelog::{ConfigBuilder, LevelFilter, WriteLogger};
use std::fs::File;

#[derive(Parser)]
#[command(name = "nyaya", about = "Legal help assistant for the terminal")]
struct Args {
    /// Translation language for assistant messages
    #[arg(short, long, value_enum)]
    language: Option<Language>,

    /// Chat model to use
    #[arg(short, long)]
    model: Option<String>,
}

#[tokio::main]
async fn main() -> std::io::Result<()> {
    let args = Args::parse();
    dotenv::dotenv().ok();

    // Initialize file logger - writes to nyaya.log in current directory
    let log_config = ConfigBuilder::new().set_time_format_rfc3339().build();

    if let Ok(log_file) = File::create("nyaya.log") {
        let _ = WriteLogger::init(LevelFilter::Debug, log_config, log_file);
    }

    let file_config = config::load_config().unwrap_or_else(|e| {
        log::warn!("Ignoring config file: {}", e);
        config::NyayaConfig::default()
    });
    let resolved = config::resolve(&file_config, args.language, args.model.as_deref());

    log::info!(
        "Nyaya starting up (model: {}, language: {})",
        resolved.model_name,
        resolved.language.code()
    );

    tui::run(resolved)
}
