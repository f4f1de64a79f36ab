mod app;

use std::path::PathBuf;

use anyhow::{Context, anyhow};
use clap::Parser;

use connectome_view::connectome::{ConnectomeGraph, clean_adjacency, load_sheet};
use connectome_view::layout::{DEFAULT_ITERATIONS, DEFAULT_SEED, LayoutConfig, spring_layout};

#[derive(Debug, Parser)]
#[command(author, version, about)]
struct Args {
    #[arg(
        long,
        default_value = "SI 5 Connectome adjacency matrices, corrected July 2020.xlsx"
    )]
    workbook: PathBuf,

    #[arg(long, default_value = "male chemical")]
    sheet: String,

    #[arg(long, default_value_t = DEFAULT_SEED)]
    seed: u64,

    #[arg(long, default_value_t = DEFAULT_ITERATIONS)]
    iterations: usize,
}

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = Args::parse();

    let table = load_sheet(&args.workbook, &args.sheet)?;
    let matrix = clean_adjacency(&table)
        .with_context(|| format!("failed to clean sheet {:?}", args.sheet))?;
    let graph = ConnectomeGraph::from_adjacency(&matrix);

    let config = LayoutConfig {
        seed: args.seed,
        iterations: args.iterations,
        ..LayoutConfig::default()
    };
    let layout = spring_layout(&graph, &config);
    let scene = app::Scene::build(&graph, &layout);

    let options = eframe::NativeOptions {
        viewport: eframe::egui::ViewportBuilder::default().with_inner_size([1440.0, 920.0]),
        ..Default::default()
    };

    eframe::run_native(
        "connectome-view",
        options,
        Box::new(move |cc| Ok(Box::new(app::ConnectomeApp::new(cc, graph, scene)))),
    )
    .map_err(|err| anyhow!("failed to open the connectome window: {err}"))
}
