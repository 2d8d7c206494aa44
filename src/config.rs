use std::path::{Path, PathBuf};
use std::sync::Arc;

use log::warn;

use crate::ai::{
    Agent, Evaluator, MinimaxAgent, ProbabilityTable, RandomAgent, RunLengthEvaluator,
    TableEvaluator,
};
use crate::error::{ConfigError, TableError};
use crate::game::{COLS, MAX_DIMENSION, ROWS};

#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct BoardConfig {
    pub rows: usize,
    pub cols: usize,
}

impl Default for BoardConfig {
    fn default() -> Self {
        BoardConfig {
            rows: ROWS,
            cols: COLS,
        }
    }
}

#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct SearchConfig {
    /// Plies expanded below the current position.
    pub depth: usize,
}

impl Default for SearchConfig {
    fn default() -> Self {
        SearchConfig { depth: 4 }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EvaluatorKind {
    RunLength,
    Table,
}

#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct EvaluatorConfig {
    pub kind: EvaluatorKind,
    /// JSON probability table, required for `kind = "table"`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub table_path: Option<PathBuf>,
}

impl Default for EvaluatorConfig {
    fn default() -> Self {
        EvaluatorConfig {
            kind: EvaluatorKind::RunLength,
            table_path: None,
        }
    }
}

impl EvaluatorConfig {
    /// Build the configured evaluator for a `rows` x `cols` board, loading
    /// the table if one is used.
    pub fn build(&self, rows: usize, cols: usize) -> Result<Box<dyn Evaluator>, TableError> {
        match (self.kind, &self.table_path) {
            (EvaluatorKind::Table, Some(path)) => {
                let table = ProbabilityTable::load(path)?;
                Ok(Box::new(TableEvaluator::for_board(Arc::new(table), rows, cols)?))
            }
            _ => Ok(Box::new(RunLengthEvaluator)),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize, clap::ValueEnum)]
#[serde(rename_all = "snake_case")]
pub enum AgentKind {
    Search,
    Random,
}

#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct PlayersConfig {
    pub red: AgentKind,
    pub yellow: AgentKind,
    /// Seed for random agents; entropy from the OS when absent.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub seed: Option<u64>,
}

impl Default for PlayersConfig {
    fn default() -> Self {
        PlayersConfig {
            red: AgentKind::Search,
            yellow: AgentKind::Random,
            seed: None,
        }
    }
}

/// Top-level application configuration, loadable from TOML.
#[derive(Debug, Clone, Default, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub board: BoardConfig,
    pub search: SearchConfig,
    pub evaluator: EvaluatorConfig,
    pub players: PlayersConfig,
}

impl AppConfig {
    /// Load configuration from a TOML file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::FileRead {
            path: path.to_path_buf(),
            source: e,
        })?;
        let config: AppConfig = toml::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a TOML file, falling back to defaults if the file
    /// does not exist.
    pub fn load_or_default(path: &Path) -> Result<Self, ConfigError> {
        if path.exists() {
            Self::load(path)
        } else {
            warn!("config file '{}' not found, using defaults", path.display());
            Ok(Self::default())
        }
    }

    /// Validate configuration values.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(1..=MAX_DIMENSION).contains(&self.board.rows) {
            return Err(ConfigError::Validation(format!(
                "board.rows must be in 1..={MAX_DIMENSION}"
            )));
        }
        if !(1..=MAX_DIMENSION).contains(&self.board.cols) {
            return Err(ConfigError::Validation(format!(
                "board.cols must be in 1..={MAX_DIMENSION}"
            )));
        }
        if self.search.depth == 0 {
            return Err(ConfigError::Validation(
                "search.depth must be >= 1".into(),
            ));
        }
        if self.evaluator.kind == EvaluatorKind::Table && self.evaluator.table_path.is_none() {
            return Err(ConfigError::Validation(
                "evaluator.table_path is required when evaluator.kind = \"table\"".into(),
            ));
        }

        Ok(())
    }

    /// Agent for one seat. Search agents each get their own evaluator.
    pub fn build_agent(&self, kind: AgentKind, seed_offset: u64) -> Result<Box<dyn Agent>, TableError> {
        Ok(match kind {
            AgentKind::Search => Box::new(MinimaxAgent::with_evaluator(
                self.search.depth,
                self.evaluator.build(self.board.rows, self.board.cols)?,
            )),
            AgentKind::Random => match self.players.seed {
                Some(seed) => Box::new(RandomAgent::seeded(seed.wrapping_add(seed_offset))),
                None => Box::new(RandomAgent::new()),
            },
        })
    }

    /// Generate a TOML string with all default values (useful for creating
    /// example config files).
    pub fn default_toml() -> String {
        toml::to_string_pretty(&AppConfig::default()).expect("default config serializes")
    }
}
