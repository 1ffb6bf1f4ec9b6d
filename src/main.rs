mod app;
mod color;
mod config;
mod data;
mod state;
mod ui;

use std::sync::Arc;

use anyhow::Result;
use app::SalesDashboardApp;
use clap::Parser;
use config::Args;
use data::loader::load_file;
use data::model::Datasets;
use eframe::egui;
use state::AppState;

/// Load both datasets once; every frame reads them through the shared handle.
fn load_datasets(args: &Args) -> Result<Datasets> {
    let unbalanced = load_file(&args.unbalanced, "unbalanced")?;
    log::info!(
        "Loaded {} unbalanced rows from {}",
        unbalanced.len(),
        args.unbalanced.display()
    );
    let balanced = load_file(&args.balanced, "balanced")?;
    log::info!(
        "Loaded {} balanced rows from {}",
        balanced.len(),
        args.balanced.display()
    );
    Ok(Datasets::new(unbalanced, balanced))
}

fn main() -> eframe::Result {
    env_logger::init();
    let args = Args::parse();

    let state = match load_datasets(&args) {
        Ok(datasets) => AppState::new(Arc::new(datasets)),
        Err(e) => {
            log::error!("Failed to load datasets: {e:#}");
            AppState::with_error(format!("Error: {e:#}"))
        }
    };

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([args.width, args.height])
            .with_min_inner_size([800.0, 500.0]),
        ..Default::default()
    };

    eframe::run_native(
        "Sales Dashboard",
        options,
        Box::new(|_cc| Ok(Box::new(SalesDashboardApp::new(state)))),
    )
}
