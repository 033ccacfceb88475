//! Olympic History Dashboard - medal statistics over 120 years of Olympic games.
//!
//! Exit codes:
//!   0 - Success
//!   1 - Invalid arguments, unreadable input or failed export

use anyhow::{Context, Result};
use eframe::egui;
use olympic_dashboard::cli::Args;
use olympic_dashboard::config::{Config, CONFIG_FILE_NAME};
use olympic_dashboard::gui::DashboardApp;
use olympic_dashboard::pipeline::Pipeline;
use olympic_dashboard::report;
use std::path::Path;
use tracing::{debug, error, info};
use tracing_subscriber::{EnvFilter, FmtSubscriber};

fn main() {
    let args = Args::parse_args();

    if let Err(e) = args.validate() {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }

    if args.init_config {
        if let Err(e) = handle_init_config() {
            eprintln!("Error: {:#}", e);
            std::process::exit(1);
        }
        return;
    }

    if let Err(e) = init_logging(&args) {
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }

    info!("Olympic History Dashboard v{}", env!("CARGO_PKG_VERSION"));
    debug!("Arguments: {:?}", args);

    if let Err(e) = run(args) {
        error!("{:#}", e);
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }
}

/// Handle --init-config: generate a default .olympic-dashboard.toml.
fn handle_init_config() -> Result<()> {
    let path = Path::new(CONFIG_FILE_NAME);

    if path.exists() {
        anyhow::bail!(
            "{} already exists. Remove it first or edit it manually.",
            CONFIG_FILE_NAME
        );
    }

    let content = Config::default_toml()?;
    std::fs::write(path, content)
        .with_context(|| format!("Failed to write {}", CONFIG_FILE_NAME))?;

    println!("Created {} with default settings.", CONFIG_FILE_NAME);
    Ok(())
}

/// Initialize logging. `RUST_LOG` overrides the level chosen by the flags.
fn init_logging(args: &Args) -> Result<()> {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(args.log_level().as_str()));

    let subscriber = FmtSubscriber::builder()
        .with_env_filter(filter)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .with_line_number(false)
        .compact()
        .finish();

    tracing::subscriber::set_global_default(subscriber)
        .context("Failed to set tracing subscriber")
}

fn run(args: Args) -> Result<()> {
    let config = Config::resolve(&args).context("Failed to load configuration")?;
    debug!("Configuration: {:?}", config);

    let pipeline = Pipeline::load(&config.loader(), config.pipeline.null_policy)
        .context("Failed to prepare the dataset")?;
    info!(
        "Dataset ready: {} merged rows, {} after cleaning",
        pipeline.merged_rows(),
        pipeline.cleaned().height()
    );

    let params = config.view_params();

    if args.headless {
        let views = pipeline.views(params)?;
        let written = report::export_dashboard(&views, &args.export_dir)
            .with_context(|| format!("Failed to export to {}", args.export_dir.display()))?;
        println!(
            "Exported {} files to {}",
            written.len(),
            args.export_dir.display()
        );
        return Ok(());
    }

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1400.0, 900.0])
            .with_min_inner_size([1000.0, 700.0])
            .with_title("Olympic History Dashboard"),
        ..Default::default()
    };

    eframe::run_native(
        "Olympic History Dashboard",
        options,
        Box::new(move |cc| Ok(Box::new(DashboardApp::new(cc, pipeline, params)))),
    )
    .map_err(|e| anyhow::anyhow!("Window error: {}", e))
}
