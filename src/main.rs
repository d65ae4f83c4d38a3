use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use std::path::{Path, PathBuf};

use game_ledger::config::{self, Config};
use game_ledger::error::TemplateError;
use game_ledger::{output, scoring, store, template};

const EXIT_SUCCESS: i32 = 0;
const EXIT_CONFIG: i32 = 4;
const EXIT_NOT_FOUND: i32 = 5;
const EXIT_DATA: i32 = 6;

#[derive(ValueEnum, Clone, Copy, Debug, Default, PartialEq, Eq)]
enum OutputFormat {
    #[default]
    Table,
    Tsv,
    Json,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Score one session: placements and league points from raw scores
    Score {
        /// JSON array of players ({"userId", "rawScore"} or {"userId", "scoreDetails"})
        sheet: PathBuf,

        /// Named template from the config file used to compute raw scores
        #[arg(long, conflicts_with = "template_file")]
        template: Option<String>,

        /// Template JSON file used to compute raw scores
        #[arg(long)]
        template_file: Option<PathBuf>,

        /// Write the scored players to this file
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Append the scored rows to this sessions file
        #[arg(long, requires = "session_id")]
        record: Option<PathBuf>,

        /// Session identifier stored with recorded rows
        #[arg(long)]
        session_id: Option<String>,

        /// Game identifier stored with recorded rows
        #[arg(long)]
        game: Option<String>,

        #[arg(long, value_enum, default_value_t)]
        format: OutputFormat,
    },
    /// Show the leaderboard built from stored sessions
    Leaderboard {
        /// JSON array of session rows
        sessions: PathBuf,

        /// Number of players to show (defaults to config, then 10)
        #[arg(
            short,
            long,
            value_parser = clap::builder::RangedU64ValueParser::<usize>::new().range(1..)
        )]
        top: Option<usize>,

        /// Only count sessions of this game
        #[arg(long)]
        game: Option<String>,

        #[arg(long, value_enum, default_value_t)]
        format: OutputFormat,
    },
    /// Show one player's rank and stats
    Rank {
        /// JSON array of session rows
        sessions: PathBuf,

        user_id: String,

        /// Only count sessions of this game
        #[arg(long)]
        game: Option<String>,
    },
    /// Validate a template file and list its fields
    Template { file: PathBuf },
}

#[derive(Parser, Debug)]
#[command(name = "game-ledger")]
#[command(about = "Game night scoring and leaderboards", long_about = None)]
#[command(version)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Path to config file (defaults to ~/.config/game-ledger/config.yaml)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

fn init_logging(verbose: bool) {
    let mut builder = pretty_env_logger::formatted_builder();
    if verbose {
        builder.filter_level(log::LevelFilter::Debug);
    } else if let Ok(filters) = std::env::var("RUST_LOG") {
        builder.parse_filters(&filters);
    } else {
        builder.filter_level(log::LevelFilter::Warn);
    }
    builder.init();
}

/// Template problems are the user's to fix; anything else is bad input data.
fn exit_code_for(err: &anyhow::Error) -> i32 {
    if err.downcast_ref::<TemplateError>().is_some() {
        EXIT_CONFIG
    } else {
        EXIT_DATA
    }
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let config_path = cli.config.as_deref();
    let config = match config::load_config(config_path) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Config error: {:#}", e);
            std::process::exit(EXIT_CONFIG);
        }
    };

    if let Err(errors) = config::validate_config(&config) {
        eprintln!("Config errors:");
        for error in errors {
            eprintln!("  - {}", error);
        }
        std::process::exit(EXIT_CONFIG);
    }

    let use_colors = config.color().unwrap_or_else(output::should_use_colors);

    let result = match cli.command {
        Commands::Score {
            sheet,
            template,
            template_file,
            output,
            record,
            session_id,
            game,
            format,
        } => {
            let template_path = match (template, template_file) {
                (Some(name), _) => match config.find_template(&name) {
                    Some(t) => config::resolve_template_path(config_path, t).map(Some),
                    None => {
                        eprintln!(
                            "Unknown template '{}'. Add it under 'templates' in the config file.",
                            name
                        );
                        std::process::exit(EXIT_CONFIG);
                    }
                },
                (None, file) => Ok(file),
            };
            template_path.and_then(|template_path| {
                run_score(ScoreArgs {
                    sheet: &sheet,
                    template_path: template_path.as_deref(),
                    output: output.as_deref(),
                    record: record.as_deref(),
                    session_id: session_id.as_deref(),
                    game: game.as_deref(),
                    format,
                    use_colors,
                })
            })
        }
        Commands::Leaderboard {
            sessions,
            top,
            game,
            format,
        } => run_leaderboard(&config, &sessions, top, game.as_deref(), format, use_colors),
        Commands::Rank {
            sessions,
            user_id,
            game,
        } => run_rank(&sessions, &user_id, game.as_deref(), use_colors),
        Commands::Template { file } => run_template(&file),
    };

    match result {
        Ok(code) => std::process::exit(code),
        Err(e) => {
            eprintln!("Error: {:#}", e);
            std::process::exit(exit_code_for(&e));
        }
    }
}

struct ScoreArgs<'a> {
    sheet: &'a Path,
    template_path: Option<&'a Path>,
    output: Option<&'a Path>,
    record: Option<&'a Path>,
    session_id: Option<&'a str>,
    game: Option<&'a str>,
    format: OutputFormat,
    use_colors: bool,
}

fn run_score(args: ScoreArgs) -> Result<i32> {
    let mut players = store::load_score_sheet(args.sheet)?;

    if let Some(path) = args.template_path {
        let json = store::load_template_json(path)?;
        let fields = template::parse_template_fields(&json)
            .with_context(|| format!("Invalid template {}", path.display()))?;
        log::debug!("Scoring with {} template fields from {}", fields.len(), path.display());
        players = scoring::apply_template(players, &fields);
    }

    let scored = scoring::process_player_scores(players)?;

    if let Some(path) = args.output {
        store::save_scored_session(path, &scored)?;
        log::info!("Saved scored session to {}", path.display());
    }

    if let (Some(path), Some(session_id)) = (args.record, args.session_id) {
        let rows = scoring::session_rows(&scored, session_id, args.game);
        let total = store::append_sessions(path, &rows)?;
        log::info!("Recorded session {} ({} rows total in {})", session_id, total, path.display());
    }

    match args.format {
        OutputFormat::Table => {
            println!("{}", output::format_session_table(&scored, args.use_colors))
        }
        OutputFormat::Tsv => println!("{}", output::format_session_tsv(&scored)),
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&scored)?),
    }

    Ok(EXIT_SUCCESS)
}

/// Load session rows and narrow them to one game when asked.
fn load_filtered_sessions(path: &Path, game: Option<&str>) -> Result<Vec<scoring::SessionData>> {
    let sessions = store::load_sessions(path)?;
    Ok(match game {
        Some(game_id) => scoring::sessions_for_game(&sessions, game_id),
        None => sessions,
    })
}

fn run_leaderboard(
    config: &Config,
    sessions_path: &Path,
    top: Option<usize>,
    game: Option<&str>,
    format: OutputFormat,
    use_colors: bool,
) -> Result<i32> {
    let sessions = load_filtered_sessions(sessions_path, game)?;
    let stats: Vec<_> = scoring::aggregate_player_stats(&sessions).into_values().collect();
    let limit = top.or_else(|| config.leaderboard_limit());
    let leaders = scoring::get_top_players(&stats, limit);

    match format {
        OutputFormat::Table => {
            println!("{}", output::format_leaderboard_table(&leaders, use_colors))
        }
        OutputFormat::Tsv => println!("{}", output::format_leaderboard_tsv(&leaders)),
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&leaders)?),
    }

    Ok(EXIT_SUCCESS)
}

fn run_rank(
    sessions_path: &Path,
    user_id: &str,
    game: Option<&str>,
    use_colors: bool,
) -> Result<i32> {
    let all_sessions = store::load_sessions(sessions_path)?;
    let sessions = match game {
        Some(game_id) => scoring::sessions_for_game(&all_sessions, game_id),
        None => all_sessions.clone(),
    };

    let aggregated = scoring::aggregate_player_stats(&sessions);
    let stats: Vec<_> = aggregated.values().cloned().collect();

    let rank = scoring::calculate_player_rank(user_id, &stats);
    let Some(player) = aggregated.get(user_id).filter(|_| rank > 0) else {
        eprintln!("{} has no recorded sessions.", user_id);
        return Ok(EXIT_NOT_FOUND);
    };

    println!("{}", output::format_player_detail(player, rank, use_colors));
    if game.is_some() {
        let overall = scoring::calculate_win_rate(user_id, &all_sessions);
        println!("  Overall win rate: {:.1}%", overall);
    }

    Ok(EXIT_SUCCESS)
}

fn run_template(path: &Path) -> Result<i32> {
    let json = store::load_template_json(path)?;

    let looks_valid = serde_json::from_str::<serde_json::Value>(&json)
        .map(|value| template::validate_template_fields(&value))
        .unwrap_or(false);
    if !looks_valid {
        log::debug!("Template {} failed the pre-check", path.display());
    }

    let fields = template::parse_template_fields(&json)
        .with_context(|| format!("Invalid template {}", path.display()))?;

    if !looks_valid {
        // Accepted after normalization, e.g. a non-numeric multiplier replaced by 1
        eprintln!("Warning: {} has fields that were normalized on load", path.display());
    }

    println!("{}", output::format_template_fields(&fields));
    Ok(EXIT_SUCCESS)
}
