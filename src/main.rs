#![forbid(unsafe_code)]

mod cli;
mod gui;
mod render;
mod settings;

use anyhow::Result;
use clap::Parser;
use tracing::{Level as TraceLevel, info};
use tracing_subscriber::FmtSubscriber;

use gui::FormLayout;
use render::ChartClient;
use settings::StyleSettings;

fn main() -> Result<()> {
    // Parse log level from environment variable
    let log_level = match std::env::var("LOG_LEVEL")
        .unwrap_or_else(|_| "info".to_string())
        .to_lowercase()
        .as_str()
    {
        "trace" => TraceLevel::TRACE,
        "debug" => TraceLevel::DEBUG,
        "warn" => TraceLevel::WARN,
        "error" => TraceLevel::ERROR,
        _ => TraceLevel::INFO,
    };

    let subscriber = FmtSubscriber::builder()
        .with_max_level(log_level)
        .finish();

    tracing::subscriber::set_global_default(subscriber)?;

    let args = cli::Cli::parse();

    let mut settings = StyleSettings::matplotlib_defaults();
    for raw in &args.set {
        let (key, value) = cli::parse_override(raw)?;
        settings.set(key, value);
        info!(key, value, "Applied style override");
    }

    let layout = if args.flat {
        FormLayout::Flat
    } else {
        FormLayout::Grouped
    };
    info!(
        endpoint = %args.endpoint,
        ?layout,
        fields = settings.len(),
        "Starting chart style preview"
    );

    let client = ChartClient::new(&args.endpoint)?;
    gui::run_gui(settings, client, layout)
}
