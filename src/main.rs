use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use clap::Parser;
use log::info;

use minimax_connect_four::config::{AgentKind, AppConfig};
use minimax_connect_four::engine::Game;
use minimax_connect_four::game::Player;
use minimax_connect_four::stats::GameStats;

/// Play one game of Connect Four between two configured agents.
#[derive(Parser)]
#[command(name = "connect-four", about = "Play Connect Four with a minimax search agent")]
struct Cli {
    /// Path to TOML configuration file
    #[arg(long, default_value = "config.toml")]
    config: PathBuf,

    /// Override search depth
    #[arg(long)]
    depth: Option<usize>,

    /// Override the agent playing Red
    #[arg(long, value_enum)]
    red: Option<AgentKind>,

    /// Override the agent playing Yellow
    #[arg(long, value_enum)]
    yellow: Option<AgentKind>,

    /// Seed for random agents
    #[arg(long)]
    seed: Option<u64>,

    /// Write the opening search tree as JSON to this path
    #[arg(long)]
    export_tree: Option<PathBuf>,

    /// Print the default configuration and exit
    #[arg(long)]
    print_config: bool,
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();
    if cli.print_config {
        print!("{}", AppConfig::default_toml());
        return Ok(());
    }

    let mut config = AppConfig::load_or_default(&cli.config)
        .with_context(|| format!("loading config from {}", cli.config.display()))?;

    // Apply CLI overrides
    if let Some(depth) = cli.depth {
        config.search.depth = depth;
    }
    if let Some(red) = cli.red {
        config.players.red = red;
    }
    if let Some(yellow) = cli.yellow {
        config.players.yellow = yellow;
    }
    if cli.seed.is_some() {
        config.players.seed = cli.seed;
    }
    config.validate().context("validating configuration")?;

    let evaluator = config
        .evaluator
        .build(config.board.rows, config.board.cols)
        .context("building evaluator")?;
    let mut game = Game::new(config.board.rows, config.board.cols)?
        .with_evaluator(evaluator)
        .context("attaching evaluator")?;

    if let Some(path) = &cli.export_tree {
        export_opening_tree(&game, config.search.depth, path)?;
    }

    let mut red = config.build_agent(config.players.red, 0).context("building Red agent")?;
    let mut yellow = config
        .build_agent(config.players.yellow, 1)
        .context("building Yellow agent")?;
    info!(
        "{}x{} board, {} (Red) vs {} (Yellow), depth {}",
        config.board.rows,
        config.board.cols,
        red.name(),
        yellow.name(),
        config.search.depth
    );

    let mut stats = GameStats::new();
    let result = loop {
        let player = game.current_player();
        let agent = match player {
            Player::Red => red.as_mut(),
            Player::Yellow => yellow.as_mut(),
        };
        let col = agent.select_action(game.state());
        let outcome = game.apply_move(col);
        if !outcome.applied {
            bail!("{} picked illegal column {}", agent.name(), col);
        }
        info!("{} plays column {}", player.name(), col);

        if let Some(result) = stats.record_move(&outcome) {
            break result;
        }
    };

    println!("{}", game.board());
    match (result.winner, result.axis) {
        (Some(winner), Some(axis)) => println!(
            "{} wins with a {} line after {} moves",
            winner.name(),
            axis.name(),
            result.game_length
        ),
        _ => println!("Draw after {} moves", result.game_length),
    }

    Ok(())
}

fn export_opening_tree(game: &Game, depth: usize, path: &Path) -> Result<()> {
    let Some(search) = game.search(depth) else {
        bail!("no search possible from a finished game");
    };
    let json = serde_json::to_string_pretty(&search.tree.export(None))
        .context("serializing search tree")?;
    std::fs::write(path, json).with_context(|| format!("writing {}", path.display()))?;
    info!(
        "wrote {} node search tree to {}",
        search.tree.node_count(),
        path.display()
    );
    Ok(())
}
