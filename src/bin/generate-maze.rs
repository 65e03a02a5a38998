//! CLI for maze generation

use std::{fs, path::PathBuf};

use anyhow::Context;
use clap::Parser;
use maze_game::{MazeGenerator, MazeProperties, TextCodec};
use tracing::info;
use tracing_subscriber::EnvFilter;

/// Generate a maze with customizable wall, path, start and exit characters
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// File to write the maze to. Printed to stdout when omitted.
    output: Option<PathBuf>,

    /// Size of the maze, between 5 and 100. Even sizes are rounded down.
    #[arg(long, default_value_t = 10)]
    size: usize,

    /// Random seed
    #[arg(long)]
    seed: Option<u64>,

    /// Character for walls
    #[arg(long, default_value_t = '#')]
    wall: char,

    /// Character for paths
    #[arg(long, default_value_t = ' ')]
    path: char,

    /// Character for the start point
    #[arg(long, default_value_t = 'S')]
    start: char,

    /// Character for the exit
    #[arg(long, default_value_t = 'E')]
    end: char,

    /// Write a `<height> <width>` line before the maze
    #[arg(long)]
    header: bool,

    /// Also print the maze to the console
    #[arg(short, long)]
    print: bool,
}

/// Generate a maze, write it out
fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .init();

    let args = Args::parse();
    let properties = MazeProperties {
        size: args.size,
        wall: args.wall,
        path: args.path,
        start: args.start,
        exit: args.end,
    };
    let codec = TextCodec::new(properties)?;

    let mut gen = MazeGenerator::new(args.seed);
    let grid = gen.generate(codec.properties().size)?;
    let text = codec.to_text(&grid, args.header);

    match &args.output {
        Some(path) => {
            fs::write(path, &text)
                .with_context(|| format!("Error writing to file {}", path.display()))?;
            info!(path = %path.display(), size = grid.width(), "Wrote maze");
            if args.print {
                print!("{text}");
            }
        }
        None => print!("{text}"),
    }
    Ok(())
}
