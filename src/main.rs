use std::{env, fs::File};

use env_logger::{Env, Target};
use log::info;
use sqlite_viewer::{config::ViewerConfig, ui::DatabaseViewerUI};

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = ViewerConfig::from_env()?;
    init_logging(&config)?;

    info!("starting {}", env!("CARGO_PKG_VERSION"));
    let mut tui = DatabaseViewerUI::new(config);
    tui.run_ui().await?;

    Ok(())
}

/// The terminal is taken over by the UI, so logs go to a file when one is
/// configured. Without one, logging only happens if RUST_LOG asks for it.
fn init_logging(config: &ViewerConfig) -> Result<(), Box<dyn std::error::Error>> {
    let filter = Env::default().default_filter_or("info");

    match &config.log_file {
        Some(path) => {
            let file = File::create(path)?;
            env_logger::Builder::from_env(filter)
                .target(Target::Pipe(Box::new(file)))
                .init();
        }
        None if env::var_os("RUST_LOG").is_some() => {
            env_logger::Builder::from_env(filter).init();
        }
        None => {}
    }

    Ok(())
}
