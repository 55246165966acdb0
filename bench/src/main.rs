mod config;
mod input;
mod report;
mod study;
mod synth;

use std::path::PathBuf;

use anyhow::Result;
use clap::{Args, Parser, Subcommand};
use graph_repr_core::BackendKind;
use tracing_subscriber::EnvFilter;

use config::{
    DescribeConfig, StudyConfig, DEFAULT_ORIGIN, DEFAULT_OUT_DIR, DEFAULT_SYNTH_VERTICES,
    DEFAULT_TARGETS,
};
use synth::SynthMode;

#[derive(Parser)]
#[command(
    name = "graph-repr-bench",
    version,
    about = "Compare adjacency-matrix and adjacency-list graph backends"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Write degree reports and BFS/DFS tables for one edge-list file
    Describe {
        input: PathBuf,

        #[command(flatten)]
        common: CommonArgs,

        #[arg(long, value_delimiter = ',', default_values = ["matrix", "list"])]
        backends: Vec<BackendKind>,
    },

    /// Time minimum-path queries per backend over one or more edge-list files
    Study {
        #[arg(required = true)]
        inputs: Vec<PathBuf>,

        #[command(flatten)]
        common: CommonArgs,

        /// Destination labels to query from the origin
        #[arg(long, value_delimiter = ',', default_values_t = DEFAULT_TARGETS)]
        targets: Vec<usize>,

        #[arg(long, value_delimiter = ',', default_values = ["list", "matrix"])]
        backends: Vec<BackendKind>,

        /// Also write a JSON summary to this file
        #[arg(long)]
        json: Option<PathBuf>,
    },

    /// Benchmark both backends on generated topologies
    Synth {
        #[arg(value_enum, default_value_t = SynthMode::All)]
        mode: SynthMode,

        #[arg(long, default_value_t = DEFAULT_SYNTH_VERTICES)]
        vertices: usize,

        /// Save each generated edge list into this directory
        #[arg(long)]
        write: Option<PathBuf>,
    },
}

#[derive(Args)]
struct CommonArgs {
    /// Output directory for report files
    #[arg(long, default_value = DEFAULT_OUT_DIR)]
    out: PathBuf,

    /// Origin vertex label
    #[arg(long, default_value_t = DEFAULT_ORIGIN)]
    origin: usize,

    /// Treat the input as weighted (third column required). Without this
    /// flag or --unweighted, each file's first edge line decides.
    #[arg(long, conflicts_with = "unweighted")]
    weighted: bool,

    /// Treat the input as unweighted (two columns only)
    #[arg(long)]
    unweighted: bool,
}

impl CommonArgs {
    /// `None` leaves the decision to the input file.
    fn weighted(&self) -> Option<bool> {
        match (self.weighted, self.unweighted) {
            (true, _) => Some(true),
            (_, true) => Some(false),
            _ => None,
        }
    }
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Describe {
            input,
            common,
            backends,
        } => {
            let config = DescribeConfig {
                out_dir: common.out.clone(),
                origin: common.origin,
                weighted: common.weighted(),
                backends,
            };
            study::run_describe(&input, &config)?;
        }
        Commands::Study {
            inputs,
            common,
            targets,
            backends,
            json,
        } => {
            let config = StudyConfig {
                out_dir: common.out.clone(),
                origin: common.origin,
                targets,
                weighted: common.weighted(),
                backends,
                json,
            };
            study::run_study(&inputs, &config)?;
        }
        Commands::Synth {
            mode,
            vertices,
            write,
        } => {
            synth::run_synth(mode, vertices, write.as_deref())?;
        }
    }

    Ok(())
}
