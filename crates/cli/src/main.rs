use anyhow::{Context, Result};
use chatbot::{AppConfig, CineBot, GREETING, SetupReport};
use clap::{Parser, Subcommand};
use colored::Colorize;
use data_loader::MIN_VOTE_COUNT;
use rustyline::error::ReadlineError;
use std::path::PathBuf;
use std::time::Instant;

const PROMPT: &str = "Você: ";
const RELOAD_COMMAND: &str = ":reload";

/// CineBot - movie questions and genre-based recommendations
#[derive(Parser)]
#[command(name = "cinebot")]
#[command(about = "Movie chatbot over the TMDB 5000 dataset", long_about = None)]
struct Cli {
    /// Base directory for every relative path below
    #[arg(long, global = true)]
    root: Option<PathBuf>,

    /// TMDB movies CSV export
    #[arg(long, global = true)]
    csv: Option<PathBuf>,

    /// SQLite database file
    #[arg(long, global = true)]
    db: Option<PathBuf>,

    /// Directory holding the model artifacts
    #[arg(long, global = true)]
    model_dir: Option<PathBuf>,

    /// Directory holding the schema scripts
    #[arg(long, global = true)]
    sql_dir: Option<PathBuf>,

    /// Minimum vote count for a movie to be kept
    #[arg(long, global = true, default_value_t = MIN_VOTE_COUNT)]
    min_vote_count: i64,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Build the database and the model from the CSV
    Setup,

    /// Retrain the model from the current database
    Train,

    /// Interactive chat (type :reload to reload the model)
    Chat,

    /// Answer a single message and exit
    Ask {
        /// Message in Portuguese, e.g. "Qual o melhor gênero?"
        message: String,
    },

    /// Delete the database and the model artifacts
    Reset,
}

impl Cli {
    fn config(&self) -> AppConfig {
        let defaults = AppConfig::default();
        let config = AppConfig {
            csv_path: self.csv.clone().unwrap_or(defaults.csv_path),
            db_path: self.db.clone().unwrap_or(defaults.db_path),
            model_dir: self.model_dir.clone().unwrap_or(defaults.model_dir),
            sql_dir: self.sql_dir.clone().unwrap_or(defaults.sql_dir),
            min_vote_count: self.min_vote_count,
        };
        match &self.root {
            Some(root) => config.rooted_at(root),
            None => config,
        }
    }
}

fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();
    let config = cli.config();

    match cli.command {
        Commands::Setup => handle_setup(&config)?,
        Commands::Train => handle_train(&config)?,
        Commands::Chat => handle_chat(&config)?,
        Commands::Ask { message } => handle_ask(&config, &message)?,
        Commands::Reset => handle_reset(&config)?,
    }

    Ok(())
}

/// Handle the 'setup' command
fn handle_setup(config: &AppConfig) -> Result<()> {
    let start = Instant::now();
    let report = chatbot::run_setup(config)?;
    print_report(&report);
    println!("{} Setup finished in {:?}", "✓".green(), start.elapsed());
    Ok(())
}

/// Handle the 'train' command
fn handle_train(config: &AppConfig) -> Result<()> {
    match chatbot::retrain(config)? {
        Some(size) => println!("{} Model trained on {} movies", "✓".green(), size),
        None => println!("{} No movies to train on, run setup first", "✗".red()),
    }
    Ok(())
}

/// Handle the 'chat' command
fn handle_chat(config: &AppConfig) -> Result<()> {
    let mut bot = chatbot::open(config)?;
    let mut rl = rustyline::DefaultEditor::new().context("Failed to start the prompt")?;

    println!("{}", "CineBot".bold().blue());
    println!("{}", GREETING);

    loop {
        match rl.readline(PROMPT) {
            Ok(line) => {
                let line = line.trim();
                if line.is_empty() {
                    continue;
                }
                let _ = rl.add_history_entry(line);

                if line == RELOAD_COMMAND {
                    match chatbot::reload_model(&mut bot, &config.model_dir) {
                        Ok(true) => println!("{} Model reloaded", "✓".green()),
                        Ok(false) => println!(
                            "{} No model found in {}",
                            "✗".red(),
                            config.model_dir.display()
                        ),
                        Err(err) => eprintln!("Error: {:?}", err),
                    }
                    continue;
                }

                print_response(&bot, line);
            }
            Err(ReadlineError::Interrupted) => {
                println!("CTRL-C");
                break;
            }
            Err(ReadlineError::Eof) => {
                println!("CTRL-D: exiting.");
                break;
            }
            Err(e) => {
                println!("Error: {:?}", e);
                break;
            }
        }
    }
    Ok(())
}

/// Handle the 'ask' command
fn handle_ask(config: &AppConfig, message: &str) -> Result<()> {
    let bot = chatbot::open(config)?;
    let response = bot.respond(message)?;
    println!("{}", response);
    Ok(())
}

/// Handle the 'reset' command
fn handle_reset(config: &AppConfig) -> Result<()> {
    chatbot::reset(config)?;
    println!("{} Removed {} and the model artifacts", "✓".green(), config.db_path.display());
    Ok(())
}

fn print_response(bot: &CineBot, prompt: &str) {
    match bot.respond(prompt) {
        Ok(response) => println!("{} {}", "CineBot:".bold().blue(), response),
        Err(err) => eprintln!("Error: {:?}", err),
    }
}

fn print_report(report: &SetupReport) {
    println!("{}", "Setup summary:".bold().blue());
    println!("{}Raw movies: {}", "• ".green(), report.raw_movies);
    println!("{}Clean movies: {}", "• ".green(), report.normalize.clean_movies);
    println!("{}Genre relations: {}", "• ".green(), report.normalize.genre_relations);
    if !report.normalize.skipped_movie_ids.is_empty() {
        println!(
            "{}Skipped (bad genres): {:?}",
            "• ".yellow(),
            report.normalize.skipped_movie_ids
        );
    }
    println!("{}Genres rated: {}", "• ".cyan(), report.genres_rated);
    match report.model_size {
        Some(size) => println!("{}Model documents: {}", "• ".cyan(), size),
        None => println!("{}Model: not trained (no documents)", "• ".yellow()),
    }
}
