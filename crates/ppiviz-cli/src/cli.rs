use super::commands;
use clap::{Parser, Subcommand};
use env_logger::Env;
use ppiviz_chord::{ArcColoringMode, ChordConfig, ColoringMode, DEFAULT_LINK_BASE};
use std::path::PathBuf;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Log at debug level.
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Draw a chord diagram of an interaction table as SVG.
    Render {
        /// Interaction table (CSV).
        #[arg(short, long)]
        interactions: PathBuf,
        /// Protein length/domain table (.json or .csv).
        #[arg(short, long)]
        proteins: Option<PathBuf>,
        #[arg(short, long)]
        output: PathBuf,

        #[command(flatten)]
        plot: PlotArgs,
    },
    /// Write the drawable rows and resolved protein lengths as JSON.
    Normalize {
        #[arg(short, long)]
        interactions: PathBuf,
        #[arg(short, long)]
        proteins: Option<PathBuf>,
        #[arg(short, long)]
        output: PathBuf,
    },
}

#[derive(clap::Args, Debug)]
pub struct PlotArgs {
    #[arg(long, default_value_t = 600.0)]
    size: f64,
    #[arg(long)]
    title: Option<String>,
    #[arg(long, default_value_t = 2.0)]
    pad_angle: f64,
    /// by-protein1, by-partner, varied or gradient.
    #[arg(long, default_value_t = ColoringMode::ByProtein1)]
    coloring_mode: ColoringMode,
    /// Protein moved to the top of the circle.
    #[arg(long)]
    query: Option<String>,
    /// Give the query protein 60% of the circle.
    #[arg(long)]
    expand_query: bool,
    #[arg(long)]
    show_domains: bool,
    /// default or grey-only.
    #[arg(long, default_value_t = ArcColoringMode::Default)]
    arc_coloring: ArcColoringMode,
    #[arg(long, default_value_t = 0.0)]
    chord_radius: f64,
    #[arg(long, default_value = DEFAULT_LINK_BASE)]
    link_base: String,
}

impl PlotArgs {
    pub fn config(self) -> ChordConfig {
        ChordConfig::builder()
            .size(self.size)
            .maybe_title(self.title)
            .pad_angle(self.pad_angle)
            .coloring_mode(self.coloring_mode)
            .maybe_query_protein(self.query)
            .expand_query(self.expand_query)
            .show_domains_on_arcs(self.show_domains)
            .arc_coloring_mode(self.arc_coloring)
            .chord_radius(self.chord_radius)
            .link_base(self.link_base)
            .build()
    }
}

impl Cli {
    pub fn execute(self) -> anyhow::Result<()> {
        let level = if self.verbose { "debug" } else { "info" };
        env_logger::Builder::from_env(Env::default().default_filter_or(level)).init();

        match self.command {
            Commands::Render {
                interactions,
                proteins,
                output,
                plot,
            } => commands::render::execute(interactions, proteins, output, plot.config()),
            Commands::Normalize {
                interactions,
                proteins,
                output,
            } => commands::normalize::execute(interactions, proteins, output),
        }
    }
}
