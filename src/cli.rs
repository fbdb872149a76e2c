use std::error::Error;
use std::path::PathBuf;

use clap::{Parser, Subcommand};
use quadwords::{FileHistory, NoLookup, PuzzleAssembler, WordResolver};
use rand::thread_rng;
use serde_json::json;

#[derive(Parser, Debug)]
#[command(name = "quadwords", about = "Generate and inspect four-group word puzzles", version)]
pub struct Cli {
    /// Emit JSON instead of human-readable tables.
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Operations on full puzzles.
    #[command(subcommand)]
    Puzzle(PuzzleCommand),
    /// Operations on single themes.
    #[command(subcommand)]
    Theme(ThemeCommand),
    /// Inspect the rolling history of served puzzles.
    #[command(subcommand)]
    History(HistoryCommand),
    /// Run the HTTP API server.
    #[cfg(feature = "web")]
    Serve {
        /// Address to bind.
        #[arg(long, default_value = "127.0.0.1:8080")]
        addr: std::net::SocketAddr,
        /// History file consulted for repeat avoidance.
        #[arg(long)]
        history: Option<PathBuf>,
    },
}

#[derive(Subcommand, Debug)]
enum PuzzleCommand {
    /// Assemble a new puzzle and record it in the history.
    Generate {
        /// History file consulted for repeat avoidance.
        #[arg(long)]
        history: Option<PathBuf>,
    },
}

#[derive(Subcommand, Debug)]
enum ThemeCommand {
    /// Resolve the four words for a theme name.
    Resolve {
        /// Theme to resolve, e.g. "card suits".
        theme: String,
    },
}

#[derive(Subcommand, Debug)]
enum HistoryCommand {
    /// Show the recorded themes and group keys, oldest first.
    Show {
        /// History file to read.
        #[arg(long)]
        history: Option<PathBuf>,
    },
}

fn history_path(flag: Option<PathBuf>) -> PathBuf {
    flag.unwrap_or_else(|| PathBuf::from("quadwords-history.json"))
}

pub fn run() -> Result<(), Box<dyn Error>> {
    let cli = Cli::parse();
    match cli.command {
        Command::Puzzle(PuzzleCommand::Generate { history }) => {
            handle_generate(history_path(history), cli.json)
        }
        Command::Theme(ThemeCommand::Resolve { theme }) => handle_resolve(&theme, cli.json),
        Command::History(HistoryCommand::Show { history }) => {
            handle_history_show(history_path(history), cli.json)
        }
        #[cfg(feature = "web")]
        Command::Serve { addr, history } => handle_serve(addr, history_path(history)),
    }
}

fn handle_generate(history: PathBuf, as_json: bool) -> Result<(), Box<dyn Error>> {
    let mut assembler = PuzzleAssembler::new(NoLookup, FileHistory::open(history));
    let assembled = assembler
        .assemble(&mut thread_rng())
        .map_err(|err| format!("puzzle assembly failed: {err}"))?;

    if as_json {
        let groups: Vec<_> = assembled
            .puzzle
            .groups()
            .iter()
            .map(|group| {
                json!({
                    "title": group.title(),
                    "words": group.words(),
                    "color": group.color(),
                })
            })
            .collect();
        let payload = json!({ "groups": groups, "fresh": assembled.fresh });
        println!("{}", serde_json::to_string_pretty(&payload)?);
    } else {
        print_puzzle_table(&assembled.puzzle);
        if !assembled.fresh {
            println!("\nNote: retry budget exhausted; this puzzle repeats recent history.");
        }
    }
    Ok(())
}

fn handle_resolve(theme: &str, as_json: bool) -> Result<(), Box<dyn Error>> {
    let resolver = WordResolver::new(NoLookup);
    let words = resolver
        .resolve(theme, &mut thread_rng())
        .map_err(|err| err.to_string())?;

    if as_json {
        let payload = json!({ "theme": quadwords::normalize_theme(theme), "words": words });
        println!("{}", serde_json::to_string_pretty(&payload)?);
    } else {
        println!("Words for {:?}:", quadwords::normalize_theme(theme));
        for word in &words {
            println!("  {word}");
        }
    }
    Ok(())
}

fn handle_history_show(history: PathBuf, as_json: bool) -> Result<(), Box<dyn Error>> {
    let history = FileHistory::open(history);

    if as_json {
        let payload = json!({
            "themes": history.recent_themes().collect::<Vec<_>>(),
            "groups": history.recent_groups().collect::<Vec<_>>(),
        });
        println!("{}", serde_json::to_string_pretty(&payload)?);
        return Ok(());
    }

    let themes: Vec<&str> = history.recent_themes().collect();
    if themes.is_empty() {
        println!("History is empty.");
        return Ok(());
    }
    println!("Recent themes (oldest first):");
    for theme in themes {
        println!("  {theme}");
    }
    println!("\nRecent group keys (oldest first):");
    for key in history.recent_groups() {
        println!("  {key}");
    }
    Ok(())
}

fn print_puzzle_table(puzzle: &quadwords::Puzzle) {
    let width = puzzle
        .groups()
        .iter()
        .map(|g| g.title().len())
        .max()
        .unwrap_or("THEME".len())
        .max("THEME".len());
    println!("{:<width$}  {:<13}  {}", "THEME", "COLOR", "WORDS", width = width);
    println!("{:-<width$}  {:-<13}  {:-<5}", "", "", "", width = width);
    for group in puzzle.groups() {
        println!(
            "{:<width$}  {:<13}  {}",
            group.title(),
            group.color(),
            group.words().join(", "),
            width = width
        );
    }
}

#[cfg(feature = "web")]
fn handle_serve(addr: std::net::SocketAddr, history: PathBuf) -> Result<(), Box<dyn Error>> {
    use tracing_subscriber::EnvFilter;

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();
    let config = quadwords::web::WebConfig {
        addr,
        history_path: history,
    };
    let runtime = tokio::runtime::Runtime::new()?;
    runtime.block_on(quadwords::web::serve(config))?;
    Ok(())
}
