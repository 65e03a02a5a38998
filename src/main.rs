//! CLI for playing a maze

use std::{
    fs,
    io::{self, BufRead, Write},
    path::{Path, PathBuf},
};

use anyhow::{bail, Context};
use clap::Parser;
use itertools::Itertools;
use maze_game::{Command, Grid, MazeGenerator, MazeProperties, MoveOutcome, Navigator, TextCodec};
use tracing::info;
use tracing_subscriber::EnvFilter;

/// Marker drawn on the player position
const PLAYER: char = 'X';

/// Maze Game: navigate through the maze to find the exit
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// File containing the maze layout
    maze_file: PathBuf,

    /// Refresh the display after each move
    #[arg(short, long)]
    refresh: bool,

    /// Generate a new maze and save it to the maze file first
    #[arg(short, long)]
    generate: bool,

    /// Size of a generated maze, between 5 and 100
    #[arg(long, default_value_t = 10)]
    size: usize,

    /// Random seed for a generated maze
    #[arg(long)]
    seed: Option<u64>,

    /// Overwrite an existing maze file without asking
    #[arg(long)]
    force: bool,

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
}

impl Args {
    /// Maze settings from the size and symbol flags
    fn properties(&self) -> MazeProperties {
        MazeProperties {
            size: self.size,
            wall: self.wall,
            path: self.path,
            start: self.start,
            exit: self.end,
        }
    }
}

/// How a game loop finished
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Ending {
    Won,
    Quit,
}

/// Optionally generate a maze, then play it on the terminal
fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_writer(io::stderr)
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .init();

    let args = Args::parse();
    let codec = TextCodec::new(args.properties())?;
    let mut input = io::stdin().lock();
    let mut output = io::stdout().lock();

    if args.generate {
        if args.maze_file.exists() && !args.force {
            let answer = prompt(
                &mut input,
                &mut output,
                &format!(
                    "The file '{}' already exists. Overwrite it? [Y/N]: ",
                    args.maze_file.display()
                ),
            )?;
            if !answer.is_some_and(|a| a.eq_ignore_ascii_case("y")) {
                writeln!(output, "Exiting without generating a new maze.")?;
                return Ok(());
            }
        }
        let grid = MazeGenerator::new(args.seed).generate(codec.properties().size)?;
        fs::write(&args.maze_file, codec.to_text(&grid, false)).with_context(|| {
            format!("Error writing to file {}", args.maze_file.display())
        })?;
        info!(path = %args.maze_file.display(), size = grid.width(), "Generated maze");
    }

    let mut nav = Navigator::new(load_maze(&codec, &args.maze_file)?)?;
    let ending = play(&codec, &mut nav, &mut input, &mut output, args.refresh)?;
    info!(?ending, "Game over");
    Ok(())
}

/// Read and parse a maze file
fn load_maze(codec: &TextCodec, path: &Path) -> anyhow::Result<Grid> {
    if !path.is_file() {
        bail!("The file '{}' does not exist.", path.display());
    }
    let text = fs::read_to_string(path)
        .with_context(|| format!("Error reading file {}", path.display()))?;
    let grid = codec
        .parse(text.lines())
        .with_context(|| format!("Could not load maze from {}", path.display()))?;
    Ok(grid)
}

/// Game loop, until the exit is found or the player quits
///
/// Running out of input counts as quitting.
fn play(
    codec: &TextCodec,
    nav: &mut Navigator,
    input: &mut impl BufRead,
    out: &mut impl Write,
    refresh: bool,
) -> anyhow::Result<Ending> {
    clear_terminal(out)?;
    writeln!(
        out,
        "Welcome to the Maze Game! (W, A, S, D to move.{})",
        if refresh { "" } else { " M for Map" }
    )?;
    print_maze(out, codec, nav)?;

    let question = if refresh {
        "Next move (W/A/S/D/Q): "
    } else {
        "Next move (W/A/S/D/M/Q): "
    };

    while !nav.is_won() {
        let Some(line) = prompt(input, out, question)? else {
            writeln!(out, "Quitting game.")?;
            return Ok(Ending::Quit);
        };

        let message = match line.parse::<Command>() {
            Ok(Command::Quit) => {
                writeln!(out, "Quitting game.")?;
                return Ok(Ending::Quit);
            }
            Ok(Command::ShowMap) if !refresh => {
                print_maze(out, codec, nav)?;
                ""
            }
            Ok(Command::ShowMap) => "",
            Ok(Command::Move(direction)) => match nav.move_player(direction) {
                MoveOutcome::Moved => "",
                MoveOutcome::Blocked => "Invalid move: you can't move through walls.",
                MoveOutcome::OutOfBounds => "Invalid move: you can't move out of bounds.",
            },
            Err(_) => "Invalid input: please use W, A, S, D, M, or Q.",
        };

        if refresh {
            clear_terminal(out)?;
            writeln!(out, "{message}")?;
            print_maze(out, codec, nav)?;
        } else {
            writeln!(out, "{message}")?;
        }
    }

    writeln!(out, "Congratulations! You've found the exit and won the game.")?;
    Ok(Ending::Won)
}

/// Ask a question, `None` once input is exhausted
fn prompt(
    input: &mut impl BufRead,
    out: &mut impl Write,
    question: &str,
) -> anyhow::Result<Option<String>> {
    write!(out, "{question}")?;
    out.flush()?;

    let mut line = String::new();
    if input.read_line(&mut line)? == 0 {
        return Ok(None);
    }
    Ok(Some(line.trim().to_owned()))
}

fn print_maze(out: &mut impl Write, codec: &TextCodec, nav: &Navigator) -> io::Result<()> {
    let lines = codec.render_with_marker(nav.grid(), nav.position(), PLAYER);
    writeln!(out, "{}", lines.iter().join("\n"))
}

fn clear_terminal(out: &mut impl Write) -> io::Result<()> {
    write!(out, "\x1B[2J\x1B[1;1H")
}

#[cfg(test)]
mod tests {
    use std::io::Cursor;

    use maze_game::Point;
    use rand::rngs::mock::StepRng;

    use super::*;

    /// Always taking the first carve candidate gives
    /// ```text
    /// #####
    /// S # #
    /// # # #
    /// #   #
    /// ###E#
    /// ```
    fn first_choice_maze() -> Navigator {
        let grid = MazeGenerator::with_rng(StepRng::new(0, 0))
            .generate(5)
            .unwrap();
        Navigator::new(grid).unwrap()
    }

    fn run(keys: &str, refresh: bool) -> (Ending, Navigator, String) {
        let codec = TextCodec::new(MazeProperties::default()).unwrap();
        let mut nav = first_choice_maze();
        let mut out = Vec::new();
        let ending = play(&codec, &mut nav, &mut Cursor::new(keys), &mut out, refresh).unwrap();
        (ending, nav, String::from_utf8(out).unwrap())
    }

    #[test]
    fn symbol_flags_reach_the_codec() {
        let args = Args::try_parse_from([
            "play-maze", "maze.txt", "--wall", "@", "--path", ".", "--start", "<", "--end", ">",
        ])
        .unwrap();
        let codec = TextCodec::new(args.properties()).unwrap();
        let grid = codec.parse(["@@@", "<.>", "@@@"]).unwrap();
        assert_eq!(grid.start(), Some(Point::new(0, 1)));

        let defaults = Args::try_parse_from(["play-maze", "maze.txt"]).unwrap();
        assert_eq!(defaults.properties(), MazeProperties::default());
    }

    #[test]
    fn winning_route() {
        let (ending, nav, out) = run("d\ns\ns\nd\nd\ns\n", false);
        assert_eq!(ending, Ending::Won);
        assert!(nav.is_won());
        assert!(out.ends_with("Congratulations! You've found the exit and won the game.\n"));
    }

    #[test]
    fn quit_stops_the_game() {
        let (ending, nav, out) = run("d\nq\ns\n", false);
        assert_eq!(ending, Ending::Quit);
        assert_eq!(nav.position(), Point::new(1, 1));
        assert!(out.ends_with("Quitting game.\n"));
    }

    #[test]
    fn end_of_input_quits() {
        let (ending, nav, out) = run("d\n", false);
        assert_eq!(ending, Ending::Quit);
        assert_eq!(nav.position(), Point::new(1, 1));
        assert!(out.ends_with("Quitting game.\n"));
    }

    #[test]
    fn bad_moves_and_input_are_reported() {
        let (ending, nav, out) = run("w\na\nx\nq\n", false);
        assert_eq!(ending, Ending::Quit);
        assert_eq!(nav.position(), nav.start());
        assert!(out.contains("Invalid move: you can't move through walls."));
        assert!(out.contains("Invalid move: you can't move out of bounds."));
        assert!(out.contains("Invalid input: please use W, A, S, D, M, or Q."));
    }

    #[test]
    fn map_key_redraws_without_refresh() {
        let drawn = "#####\nX # #\n";
        let (_, _, out) = run("m\nq\n", false);
        assert_eq!(out.matches(drawn).count(), 2);
    }

    #[test]
    fn map_key_is_ignored_with_refresh() {
        let drawn = "#####\nX # #\n";
        let (ending, _, out) = run("m\nq\n", true);
        assert_eq!(ending, Ending::Quit);
        // Initial draw plus the redraw after the `m` turn, nothing extra
        assert_eq!(out.matches(drawn).count(), 2);
        assert!(!out.contains("M for Map"));
        assert!(!out.contains("Invalid input"));
    }

    #[test]
    fn marker_follows_player() {
        let (_, _, out) = run("d\nm\nq\n", false);
        assert!(out.contains("#####\nSX# #\n"));
    }
}
