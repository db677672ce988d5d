use std::{error, fs};

use clap::Parser;
use engine::demo::FlagDemo;
use engine::flag::artwork;
use tracing::info;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::EnvFilter;
use ui::app::App;

mod config;

use config::Config;

/// Logs go to `log_file` when set, stdout otherwise. The returned guard
/// flushes the file writer on drop and must live until exit.
fn setup_logging(config: &Config) -> Result<Option<WorkerGuard>, Box<dyn error::Error>> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    let Some(path) = &config.log_file else {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .compact()
            .init();
        return Ok(None);
    };

    let file = fs::File::create(path)?;
    let (writer, guard) = tracing_appender::non_blocking(file);
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_ansi(false)
        .with_writer(writer)
        .init();

    Ok(Some(guard))
}

fn main() -> Result<(), Box<dyn error::Error>> {
    let config = Config::parse();
    let _guard = setup_logging(&config)?;

    info!("flagwave v{}", env!("CARGO_PKG_VERSION"));

    let catalog = artwork::default_catalog()?;
    let demo = FlagDemo::new(catalog, config.flag.as_deref())?;
    let app = App::new(demo, config.paused);

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1280.0, 720.0])
            .with_title("flagwave"),
        ..Default::default()
    };

    eframe::run_native("flagwave", options, Box::new(|_cc| Ok(Box::new(app))))?;

    Ok(())
}
